//! Pin shape: a marker image, optionally cropped to a sub-rectangle.

use super::ShapeId;
use base64::{Engine, engine::general_purpose::STANDARD};
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Baked-in map marker drawn when a pin has no image of its own.
const MARKER_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="376" height="564" viewBox="0 0 375.84 563.76"><rect x="93.52" y="83.47" width="188.8" height="197.39" fill="white"/><path fill="#e53935" d="M187.92 0C84.14 0 0 84.14 0 187.92c0 33.38 8.96 64.59 24.22 91.76 2.53 4.51 5.2 8.95 8.08 13.23l155.63 270.86 155.62-270.86c2.4-3.56 4.46-7.31 6.6-11.02l1.48-2.21c15.24-27.16 24.22-58.37 24.22-91.76C375.84 84.14 291.7 0 187.92 0zm0 117.44c38.92 0 70.47 31.56 70.47 70.48 0 38.92-31.54 70.46-70.47 70.46-38.92 0-70.48-31.54-70.48-70.46 0-38.92 31.56-70.48 70.48-70.48z"/></svg>"##;

static MARKER_URL: LazyLock<String> =
    LazyLock::new(|| format!("data:image/svg+xml;base64,{}", STANDARD.encode(MARKER_SVG)));

/// Data URI of the default marker image.
pub fn default_marker_url() -> String {
    MARKER_URL.clone()
}

/// Normalized sub-rectangle of the source image, both corners in `[0, 1]²`.
///
/// Deserialized crops go through [`Crop::new`] and are clamped the same way.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawCrop")]
pub struct Crop {
    pub top_left: Point,
    pub bottom_right: Point,
}

/// Crop as stored by the host, before clamping.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCrop {
    top_left: Point,
    bottom_right: Point,
}

impl From<RawCrop> for Crop {
    fn from(raw: RawCrop) -> Self {
        Crop::new(raw.top_left, raw.bottom_right)
    }
}

impl Crop {
    /// Build a crop, clamping both corners into the unit square.
    pub fn new(top_left: Point, bottom_right: Point) -> Self {
        Self {
            top_left: clamp_unit(top_left),
            bottom_right: clamp_unit(bottom_right),
        }
    }

    /// Normalized extent of the crop, or `None` when the rectangle is
    /// degenerate, inverted or not finite.
    pub fn extent(&self) -> Option<Size> {
        let w = self.bottom_right.x - self.top_left.x;
        let h = self.bottom_right.y - self.top_left.y;
        (w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0).then(|| Size::new(w, h))
    }

    pub fn is_valid(&self) -> bool {
        self.extent().is_some()
    }
}

fn clamp_unit(p: Point) -> Point {
    let clamp = |v: f64| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
    Point::new(clamp(p.x), clamp(p.y))
}

/// Persisted pin props.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PinProps {
    /// Image source. Defaults to the baked-in marker.
    #[serde(default = "default_marker_url")]
    pub url: String,
    #[serde(default)]
    pub crop: Option<Crop>,
}

impl Default for PinProps {
    fn default() -> Self {
        Self {
            url: default_marker_url(),
            crop: None,
        }
    }
}

/// A pin placed on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Pin {
    pub(crate) id: ShapeId,
    /// Top-left corner in document space.
    pub position: Point,
    pub size: Size,
    pub props: PinProps,
}

impl Pin {
    pub const DEFAULT_SIZE: Size = Size::new(40.0, 40.0);

    /// Default pin: 40×40, no crop, default marker image.
    pub fn create_default(id: ShapeId, position: Point) -> Self {
        Self::with_size(id, position, Self::DEFAULT_SIZE)
    }

    pub fn with_size(id: ShapeId, position: Point, size: Size) -> Self {
        Self {
            id,
            position,
            size,
            props: PinProps::default(),
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.props.url = url.into();
        self
    }

    pub fn with_crop(mut self, crop: Crop) -> Self {
        self.props.crop = Some(crop);
        self
    }
}
