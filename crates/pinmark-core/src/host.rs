//! Boundary with the host canvas editor.
//!
//! Tools and the text bridge never reach for a global editor handle: every
//! handler receives the host as an explicit `&mut dyn HostEditor`.

use crate::geometry::PageBox;
use crate::input::ToolEvent;
use crate::shapes::{Shape, ShapeId, ShapeUpdate};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Cursor shapes the tools request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CursorKind {
    #[default]
    Default,
    Cross,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Cursor {
    #[serde(rename = "type")]
    pub kind: CursorKind,
    pub rotation: f64,
}

impl Cursor {
    pub const DEFAULT: Cursor = Cursor {
        kind: CursorKind::Default,
        rotation: 0.0,
    };

    pub const CROSS: Cursor = Cursor {
        kind: CursorKind::Cross,
        rotation: 0.0,
    };
}

/// Capabilities the overlay consumes from the host editor.
///
/// The host owns the shape store, selection, editing id and camera, and
/// serializes every command it receives.
pub trait HostEditor {
    /// Allocate a fresh, unique shape id.
    fn create_shape_id(&mut self) -> ShapeId;

    fn create_shape(&mut self, shape: Shape);

    fn update_shapes(&mut self, updates: &[ShapeUpdate]);

    fn get_shape(&self, id: ShapeId) -> Option<Shape>;

    fn select(&mut self, ids: &[ShapeId]);

    fn editing_shape_id(&self) -> Option<ShapeId>;

    fn set_editing_shape(&mut self, id: Option<ShapeId>);

    /// End the current editing session.
    fn complete(&mut self);

    /// Queue a raw event for the host's own pointer dispatch.
    fn dispatch(&mut self, event: ToolEvent);

    fn set_cursor(&mut self, cursor: Cursor);

    fn page_to_screen(&self, point: Point) -> Point;

    fn zoom_level(&self) -> f64;

    /// Project a document-space box to screen space.
    fn box_to_screen(&self, page_box: &PageBox) -> PageBox {
        let origin = self.page_to_screen(page_box.origin());
        let zoom = self.zoom_level();
        PageBox::new(origin.x, origin.y, page_box.w * zoom, page_box.h * zoom)
    }

    /// One-shot result of a finished screenshot gesture.
    fn capture_region(&mut self, region: PageBox);
}
