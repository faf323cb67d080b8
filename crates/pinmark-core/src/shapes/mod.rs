//! Annotation shape definitions.
//!
//! Shapes are plain data. The closed [`Shape`] union covers every kind the
//! overlay persists; per-kind behavior is looked up through [`ShapeKind`]
//! rather than dispatched through trait objects.

mod label;
mod pin;
mod resize;

pub use label::{FontFamily, Label, LabelProps, LabelSize, TextAlign};
pub use pin::{default_marker_url, Crop, Pin, PinProps};
pub use resize::{resize_box, HandleKind, ResizeInfo};

use crate::geometry::PageBox;
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for shapes. Assigned by the host, immutable afterwards.
pub type ShapeId = Uuid;

/// Shape errors.
#[derive(Debug, Error)]
pub enum ShapeError {
    #[error("Shape {id} is a {actual:?}, not a {expected:?}")]
    KindMismatch {
        id: ShapeId,
        expected: ShapeKind,
        actual: ShapeKind,
    },
    #[error("Props patch must be a JSON object, got: {0}")]
    InvalidPatch(String),
    #[error("Invalid props: {0}")]
    Props(#[from] serde_json::Error),
}

/// Result type for shape record conversions.
pub type ShapeResult<T> = Result<T, ShapeError>;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// CSS/SVG color string: `#rrggbb` when opaque, `rgba(...)` otherwise.
    pub fn to_css(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({}, {}, {}, {:.3})",
                self.r,
                self.g,
                self.b,
                self.a as f64 / 255.0
            )
        }
    }
}

impl Default for SerializableColor {
    fn default() -> Self {
        Self::black()
    }
}

/// Discriminant of the persisted shape kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Pin,
    Label,
}

impl ShapeKind {
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Pin => "pin",
            ShapeKind::Label => "label",
        }
    }

    /// Interaction capabilities declared by the kind.
    pub fn flags(&self) -> ShapeFlags {
        match self {
            ShapeKind::Pin => ShapeFlags {
                resizable: true,
                bindable: true,
                aspect_ratio_locked: false,
            },
            ShapeKind::Label => ShapeFlags {
                resizable: true,
                bindable: false,
                aspect_ratio_locked: false,
            },
        }
    }
}

/// Capability flags a host consults before offering an interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeFlags {
    pub resizable: bool,
    pub bindable: bool,
    pub aspect_ratio_locked: bool,
}

/// Closed union over every persisted shape kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Pin(Pin),
    Label(Label),
}

impl Shape {
    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Pin(s) => s.id,
            Shape::Label(s) => s.id,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Pin(_) => ShapeKind::Pin,
            Shape::Label(_) => ShapeKind::Label,
        }
    }

    pub fn position(&self) -> Point {
        match self {
            Shape::Pin(s) => s.position,
            Shape::Label(s) => s.position,
        }
    }

    pub fn size(&self) -> Size {
        match self {
            Shape::Pin(s) => s.size,
            Shape::Label(s) => s.size,
        }
    }

    pub fn bounds(&self) -> PageBox {
        let p = self.position();
        let s = self.size();
        PageBox::new(p.x, p.y, s.width, s.height)
    }

    fn set_bounds(&mut self, b: PageBox) {
        let (position, size) = match self {
            Shape::Pin(s) => (&mut s.position, &mut s.size),
            Shape::Label(s) => (&mut s.position, &mut s.size),
        };
        *position = b.origin();
        *size = b.size();
    }

    pub fn flags(&self) -> ShapeFlags {
        self.kind().flags()
    }

    pub fn as_pin(&self) -> Option<&Pin> {
        match self {
            Shape::Pin(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_label(&self) -> Option<&Label> {
        match self {
            Shape::Label(l) => Some(l),
            _ => None,
        }
    }

    /// Apply the host's resize gesture.
    ///
    /// Returns the shape unchanged when the resulting box would have a
    /// non-positive size.
    pub fn resize(&self, info: &ResizeInfo) -> Shape {
        let mut next = self.clone();
        match resize_box(info) {
            Some(b) => next.set_bounds(b),
            None => log::debug!("Ignoring degenerate resize of {}", self.id()),
        }
        next
    }

    /// Convert into the host's persisted record form.
    pub fn to_record(&self) -> ShapeResult<ShapeRecord> {
        let props = match self {
            Shape::Pin(s) => serde_json::to_value(&s.props)?,
            Shape::Label(s) => serde_json::to_value(&s.props)?,
        };
        let b = self.bounds();
        Ok(ShapeRecord {
            id: self.id(),
            kind: self.kind(),
            x: b.x,
            y: b.y,
            w: b.w,
            h: b.h,
            props,
        })
    }

    /// Rebuild a shape from a persisted record.
    pub fn from_record(record: &ShapeRecord) -> ShapeResult<Shape> {
        let position = Point::new(record.x, record.y);
        let size = Size::new(record.w.max(0.0), record.h.max(0.0));
        let shape = match record.kind {
            ShapeKind::Pin => Shape::Pin(Pin {
                id: record.id,
                position,
                size,
                props: serde_json::from_value(record.props.clone())?,
            }),
            ShapeKind::Label => Shape::Label(Label {
                id: record.id,
                position,
                size,
                props: serde_json::from_value(record.props.clone())?,
            }),
        };
        Ok(shape)
    }

    /// Merge a partial update (geometry and/or props patch) into the shape.
    pub fn apply_update(&mut self, update: &ShapeUpdate) -> ShapeResult<()> {
        if update.kind != self.kind() {
            return Err(ShapeError::KindMismatch {
                id: self.id(),
                expected: update.kind,
                actual: self.kind(),
            });
        }

        let mut record = self.to_record()?;
        if let Some(x) = update.x {
            record.x = x;
        }
        if let Some(y) = update.y {
            record.y = y;
        }
        if let Some(w) = update.w {
            record.w = w;
        }
        if let Some(h) = update.h {
            record.h = h;
        }
        if let Some(patch) = &update.props {
            let Value::Object(patch) = patch else {
                return Err(ShapeError::InvalidPatch(patch.to_string()));
            };
            if let Value::Object(props) = &mut record.props {
                for (key, value) in patch {
                    props.insert(key.clone(), value.clone());
                }
            }
        }

        *self = Shape::from_record(&record)?;
        Ok(())
    }
}

/// Host-native persisted shape record: `{id, type, x, y, w, h, props}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeRecord {
    pub id: ShapeId,
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub props: Value,
}

/// Partial shape mutation: `{id, type, props}` plus optional geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeUpdate {
    pub id: ShapeId,
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub w: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<Value>,
}

impl ShapeUpdate {
    /// Props-only update.
    pub fn props(id: ShapeId, kind: ShapeKind, props: Value) -> Self {
        Self {
            id,
            kind,
            x: None,
            y: None,
            w: None,
            h: None,
            props: Some(props),
        }
    }

    /// Replace a label's text.
    pub fn label_text(id: ShapeId, text: &str) -> Self {
        Self::props(id, ShapeKind::Label, serde_json::json!({ "text": text }))
    }

    /// Geometry-only update from a box.
    pub fn bounds(id: ShapeId, kind: ShapeKind, b: PageBox) -> Self {
        Self {
            id,
            kind,
            x: Some(b.x),
            y: Some(b.y),
            w: Some(b.w),
            h: Some(b.h),
            props: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pin() -> Shape {
        Shape::Pin(Pin::create_default(Uuid::new_v4(), Point::new(10.0, 20.0)))
    }

    #[test]
    fn test_record_roundtrip_uses_host_schema() {
        let shape = pin();
        let record = shape.to_record().unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "pin");
        assert_eq!(json["w"], 40.0);
        assert!(json["props"]["url"].as_str().unwrap().starts_with("data:image/svg+xml"));

        let back = Shape::from_record(&record).unwrap();
        assert_eq!(back, shape);
    }

    #[test]
    fn test_record_crop_out_of_range_is_clamped() {
        let json = serde_json::json!({
            "id": Uuid::new_v4(), "type": "pin",
            "x": 0.0, "y": 0.0, "w": 40.0, "h": 40.0,
            "props": {
                "crop": {
                    "topLeft": { "x": -0.5, "y": 0.0 },
                    "bottomRight": { "x": 1.5, "y": 1.0 }
                }
            }
        });
        let record: ShapeRecord = serde_json::from_value(json).unwrap();
        let shape = Shape::from_record(&record).unwrap();
        let crop = shape.as_pin().unwrap().props.crop.unwrap();
        assert_eq!(crop.top_left, Point::new(0.0, 0.0));
        assert_eq!(crop.bottom_right, Point::new(1.0, 1.0));

        let mut updated = pin();
        let patch = serde_json::json!({
            "crop": { "topLeft": { "x": 0.5, "y": -2.0 }, "bottomRight": { "x": 3.0, "y": 0.5 } }
        });
        updated
            .apply_update(&ShapeUpdate::props(updated.id(), ShapeKind::Pin, patch))
            .unwrap();
        let crop = updated.as_pin().unwrap().props.crop.unwrap();
        assert_eq!(crop.top_left, Point::new(0.5, 0.0));
        assert_eq!(crop.bottom_right, Point::new(1.0, 0.5));
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let json = serde_json::json!({
            "id": Uuid::new_v4(), "type": "arrow",
            "x": 0.0, "y": 0.0, "w": 1.0, "h": 1.0, "props": {}
        });
        assert!(serde_json::from_value::<ShapeRecord>(json).is_err());
    }

    #[test]
    fn test_apply_label_text_update() {
        let id = Uuid::new_v4();
        let mut shape = Shape::Label(Label::new(id, Point::ZERO, ""));
        shape.apply_update(&ShapeUpdate::label_text(id, "hello")).unwrap();
        assert_eq!(shape.as_label().unwrap().props.text, "hello");
    }

    #[test]
    fn test_apply_update_kind_mismatch() {
        let mut shape = pin();
        let update = ShapeUpdate::label_text(shape.id(), "nope");
        assert!(matches!(
            shape.apply_update(&update),
            Err(ShapeError::KindMismatch { .. })
        ));
    }

    #[test]
    fn test_apply_update_rejects_non_object_patch() {
        let mut shape = pin();
        let update = ShapeUpdate::props(shape.id(), ShapeKind::Pin, Value::from(3));
        assert!(matches!(
            shape.apply_update(&update),
            Err(ShapeError::InvalidPatch(_))
        ));
    }

    #[test]
    fn test_apply_geometry_update() {
        let mut shape = pin();
        let update = ShapeUpdate::bounds(shape.id(), ShapeKind::Pin, PageBox::new(1.0, 2.0, 3.0, 4.0));
        shape.apply_update(&update).unwrap();
        assert_eq!(shape.bounds(), PageBox::new(1.0, 2.0, 3.0, 4.0));
    }

    #[test]
    fn test_resize_updates_bounds() {
        let shape = pin();
        let info = ResizeInfo {
            handle: HandleKind::BottomRight,
            new_point: Point::new(10.0, 20.0),
            scale_x: 2.0,
            scale_y: 1.5,
            initial_bounds: shape.bounds(),
        };
        let resized = shape.resize(&info);
        assert_eq!(resized.bounds(), PageBox::new(10.0, 20.0, 80.0, 60.0));
        assert_eq!(resized.id(), shape.id());
    }

    #[test]
    fn test_degenerate_resize_is_noop() {
        let shape = pin();
        let info = ResizeInfo {
            handle: HandleKind::Right,
            new_point: Point::new(10.0, 20.0),
            scale_x: 0.0,
            scale_y: 1.0,
            initial_bounds: shape.bounds(),
        };
        assert_eq!(shape.resize(&info), shape);
    }

    #[test]
    fn test_pin_flags() {
        let flags = ShapeKind::Pin.flags();
        assert!(flags.resizable);
        assert!(flags.bindable);
        assert!(!flags.aspect_ratio_locked);
    }

    #[test]
    fn test_color_css() {
        assert_eq!(SerializableColor::new(255, 0, 16, 255).to_css(), "#ff0010");
        assert_eq!(SerializableColor::transparent().to_css(), "rgba(0, 0, 0, 0.000)");
    }
}
