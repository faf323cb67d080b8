//! Camera module for pan/zoom transforms between document and screen space.

use crate::geometry::PageBox;
use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

/// Camera holds the host canvas view transform.
///
/// Document ("page") coordinates are unaffected by pan and zoom; screen
/// coordinates are relative to the canvas' top-left corner after the view
/// transform is applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Current translation offset (pan), in screen pixels.
    pub offset: Vec2,
    /// Current zoom level (1.0 = 100%).
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transform converting page coordinates to screen coordinates.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    /// Transform converting screen coordinates to page coordinates.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.zoom) * Affine::translate(-self.offset)
    }

    pub fn page_to_screen(&self, page_point: Point) -> Point {
        self.transform() * page_point
    }

    pub fn screen_to_page(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    pub fn zoom_level(&self) -> f64 {
        self.zoom
    }

    /// Project a page-space box to screen space.
    pub fn box_to_screen(&self, page_box: &PageBox) -> PageBox {
        let origin = self.page_to_screen(page_box.origin());
        PageBox::new(
            origin.x,
            origin.y,
            page_box.w * self.zoom,
            page_box.h * self.zoom,
        )
    }
}
