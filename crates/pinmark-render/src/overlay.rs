//! Screenshot selection box drawn in front of the canvas.

use crate::element::{Element, px, style};
use pinmark_core::geometry::PageBox;
use pinmark_core::host::HostEditor;
use pinmark_core::observable::Subscription;
use pinmark_core::tools::ToolManager;
use std::cell::Cell;
use std::rc::Rc;

/// State path in which the selection box is shown.
pub const SCREENSHOT_DRAGGING: &str = "screenshot.dragging";

/// The in-progress screenshot box in screen space, or `None` unless the
/// active state is exactly `screenshot.dragging`.
pub fn screenshot_brush(manager: &ToolManager, host: &dyn HostEditor) -> Option<PageBox> {
    if manager.current_path() != SCREENSHOT_DRAGGING {
        return None;
    }
    let page_box = manager.state_descendant(SCREENSHOT_DRAGGING)?.get()?;
    Some(host.box_to_screen(&page_box))
}

/// Outlined box element for a screen-space brush. Never takes pointer events.
pub fn render_brush(brush: &PageBox) -> Element {
    Element::new("div").attr("class", "pinmark-screenshot-box").attr(
        "style",
        style(&[
            ("position", "absolute".to_string()),
            ("top", px(0.0)),
            ("left", px(0.0)),
            ("transform", format!("translate({}, {})", px(brush.x), px(brush.y))),
            ("width", px(brush.w)),
            ("height", px(brush.h)),
            ("border", "1px solid var(--color-text-0)".to_string()),
            ("z-index", "999".to_string()),
            ("pointer-events", "none".to_string()),
        ]),
    )
}

/// Display adapter for the screenshot box.
///
/// Subscribes to the screenshot session so the host knows when to redraw.
#[derive(Debug)]
pub struct ScreenshotOverlay {
    dirty: Rc<Cell<bool>>,
    _subscription: Option<Subscription>,
}

impl ScreenshotOverlay {
    pub fn attach(manager: &ToolManager) -> Self {
        let dirty = Rc::new(Cell::new(true));
        let subscription = manager.state_descendant(SCREENSHOT_DRAGGING).map(|session| {
            let dirty = Rc::clone(&dirty);
            session.subscribe(move |_| dirty.set(true))
        });
        if subscription.is_none() {
            log::warn!("No screenshot session registered; overlay will not update");
        }
        Self {
            dirty,
            _subscription: subscription,
        }
    }

    /// Whether the box changed since the last call.
    pub fn take_dirty(&self) -> bool {
        self.dirty.replace(false)
    }

    pub fn render(&self, manager: &ToolManager, host: &dyn HostEditor) -> Option<Element> {
        screenshot_brush(manager, host).map(|brush| render_brush(&brush))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Point, Vec2};
    use pinmark_core::editor::MemoryEditor;
    use pinmark_core::input::ToolEvent;
    use pinmark_core::tools::ToolKind;

    fn dragging(host: &mut MemoryEditor) -> ToolManager {
        let mut manager = ToolManager::new();
        manager.set_current_tool(ToolKind::Screenshot, host);
        manager.dispatch(&ToolEvent::pointer_down(Point::new(10.0, 10.0)), host);
        manager.dispatch(&ToolEvent::pointer_move(Point::new(110.0, 60.0)), host);
        manager
    }

    #[test]
    fn test_nothing_outside_dragging() {
        let mut host = MemoryEditor::new();
        let mut manager = ToolManager::new();
        assert!(screenshot_brush(&manager, &host).is_none());

        manager.set_current_tool(ToolKind::Screenshot, &mut host);
        manager.dispatch(&ToolEvent::pointer_down(Point::ZERO), &mut host);
        assert_eq!(manager.current_path(), "screenshot.pointing");
        assert!(screenshot_brush(&manager, &host).is_none());
    }

    #[test]
    fn test_brush_applies_zoom_and_pan() {
        let mut host = MemoryEditor::new();
        let manager = dragging(&mut host);
        assert_eq!(
            screenshot_brush(&manager, &host),
            Some(PageBox::new(10.0, 10.0, 100.0, 50.0))
        );

        host.camera.zoom = 2.0;
        host.camera.offset = Vec2::new(5.0, -5.0);
        assert_eq!(
            screenshot_brush(&manager, &host),
            Some(PageBox::new(25.0, 15.0, 200.0, 100.0))
        );
    }

    #[test]
    fn test_box_ignores_pointer_events() {
        let mut host = MemoryEditor::new();
        let manager = dragging(&mut host);
        let overlay = ScreenshotOverlay::attach(&manager);
        let el = overlay.render(&manager, &host).unwrap();
        let css = el.get_attr("style").unwrap();
        assert!(css.contains("pointer-events: none"));
        assert!(css.contains("z-index: 999"));
        assert!(css.contains("translate(10px, 10px)"));
    }

    #[test]
    fn test_overlay_marks_dirty_on_change() {
        let mut host = MemoryEditor::new();
        let mut manager = ToolManager::new();
        let overlay = ScreenshotOverlay::attach(&manager);
        assert!(overlay.take_dirty());
        assert!(!overlay.take_dirty());

        manager.set_current_tool(ToolKind::Screenshot, &mut host);
        manager.dispatch(&ToolEvent::pointer_down(Point::ZERO), &mut host);
        manager.dispatch(&ToolEvent::pointer_move(Point::new(4.0, 4.0)), &mut host);
        assert!(overlay.take_dirty());

        manager.dispatch(&ToolEvent::pointer_up(Point::new(4.0, 4.0)), &mut host);
        assert!(overlay.take_dirty());
        assert!(overlay.render(&manager, &host).is_none());
    }
}
