//! Box resize semantics shared by every resizable shape.

use crate::geometry::PageBox;
use kurbo::Point;

/// Selection handle the host is dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

impl HandleKind {
    /// Edge handles only scale one axis.
    fn scales_x(&self) -> bool {
        !matches!(self, HandleKind::Top | HandleKind::Bottom)
    }

    fn scales_y(&self) -> bool {
        !matches!(self, HandleKind::Left | HandleKind::Right)
    }
}

/// Resize gesture as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeInfo {
    pub handle: HandleKind,
    /// Page position of the box's new anchor corner (the unflipped top-left).
    pub new_point: Point,
    pub scale_x: f64,
    pub scale_y: f64,
    /// Bounds of the shape when the gesture started.
    pub initial_bounds: PageBox,
}

/// Compute the resized box, or `None` if it would have a non-positive size.
///
/// A negative scale flips the box so it extends left of (or above) the anchor.
/// The aspect ratio is never locked.
pub fn resize_box(info: &ResizeInfo) -> Option<PageBox> {
    let scale_x = if info.handle.scales_x() { info.scale_x } else { 1.0 };
    let scale_y = if info.handle.scales_y() { info.scale_y } else { 1.0 };

    let w = info.initial_bounds.w * scale_x.abs();
    let h = info.initial_bounds.h * scale_y.abs();
    if !(w.is_finite() && h.is_finite()) || w <= 0.0 || h <= 0.0 {
        return None;
    }

    let x = if scale_x < 0.0 { info.new_point.x - w } else { info.new_point.x };
    let y = if scale_y < 0.0 { info.new_point.y - h } else { info.new_point.y };
    Some(PageBox::new(x, y, w, h))
}
