//! Crop layout shared by screen markup and SVG export.
//!
//! Both renderers place the pin image from the same [`ImageLayout`], so a
//! cropped pin looks the same on screen and in an exported document.

use kurbo::{Size, Vec2};
use pinmark_core::shapes::Pin;

/// Where a pin's image is drawn, relative to the pin's origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageLayout {
    /// Full image width, scaled so the cropped part fills the pin.
    pub width: f64,
    pub height: f64,
    /// Image translation moving the crop's top-left to the pin origin.
    pub offset: Vec2,
    /// Visible region at the pin origin, `None` when uncropped.
    pub clip: Option<Size>,
}

impl ImageLayout {
    pub fn is_cropped(&self) -> bool {
        self.clip.is_some()
    }
}

/// Lay out a pin's image, honoring its crop.
///
/// A degenerate crop (empty, inverted or non-finite) is drawn uncropped.
pub fn image_layout(pin: &Pin) -> ImageLayout {
    let Size { width: w, height: h } = pin.size;
    let uncropped = ImageLayout {
        width: w,
        height: h,
        offset: Vec2::ZERO,
        clip: None,
    };

    let Some(crop) = pin.props.crop else {
        return uncropped;
    };
    let Some(extent) = crop.extent() else {
        log::warn!("Pin {} has a degenerate crop {:?}, drawing uncropped", pin.id(), crop);
        return uncropped;
    };

    let width = w / extent.width;
    let height = h / extent.height;
    ImageLayout {
        width,
        height,
        offset: Vec2::new(-crop.top_left.x * width, -crop.top_left.y * height),
        clip: Some(Size::new(extent.width * width, extent.height * height)),
    }
}
