//! Per-kind capability table.
//!
//! Shape behavior is resolved by looking up [`ShapeKind`] here rather than
//! through trait objects: flags, default construction, resize, screen
//! rendering, SVG export and the selection indicator.

use crate::element::Element;
use crate::{screen, svg};
use kurbo::Point;
use pinmark_core::shapes::{Label, Pin, ResizeInfo, Shape, ShapeFlags, ShapeId, ShapeKind};

/// Capabilities of one shape kind.
#[derive(Debug, Clone, Copy)]
pub struct ShapeUtil {
    pub kind: ShapeKind,
    pub flags: ShapeFlags,
    pub default_shape: fn(ShapeId, Point) -> Shape,
    pub resize: fn(&Shape, &ResizeInfo) -> Shape,
    /// Screen markup; the flag says whether the shape is being edited.
    pub render: fn(&Shape, bool) -> Element,
    pub export: fn(&Shape) -> Element,
    pub indicator: fn(&Shape) -> Element,
}

static PIN_UTIL: ShapeUtil = ShapeUtil {
    kind: ShapeKind::Pin,
    flags: ShapeFlags {
        resizable: true,
        bindable: true,
        aspect_ratio_locked: false,
    },
    default_shape: |id, point| Shape::Pin(Pin::create_default(id, point)),
    resize: Shape::resize,
    render: screen::render_shape,
    export: svg::export_shape,
    indicator: bounds_indicator,
};

static LABEL_UTIL: ShapeUtil = ShapeUtil {
    kind: ShapeKind::Label,
    flags: ShapeFlags {
        resizable: true,
        bindable: false,
        aspect_ratio_locked: false,
    },
    default_shape: |id, point| Shape::Label(Label::new(id, point, "")),
    resize: Shape::resize,
    render: screen::render_shape,
    export: svg::export_shape,
    indicator: bounds_indicator,
};

pub fn shape_util(kind: ShapeKind) -> &'static ShapeUtil {
    match kind {
        ShapeKind::Pin => &PIN_UTIL,
        ShapeKind::Label => &LABEL_UTIL,
    }
}

/// Selection indicator: the shape's bounding rect in local coordinates.
fn bounds_indicator(shape: &Shape) -> Element {
    let size = shape.size();
    Element::new("rect")
        .attr("width", size.width)
        .attr("height", size.height)
}

/// Screen markup for a shape, resolved through its kind.
pub fn render(shape: &Shape, editing: bool) -> Element {
    (shape_util(shape.kind()).render)(shape, editing)
}

/// SVG group for a shape, resolved through its kind.
pub fn export(shape: &Shape) -> Element {
    (shape_util(shape.kind()).export)(shape)
}

pub fn indicator(shape: &Shape) -> Element {
    (shape_util(shape.kind()).indicator)(shape)
}
