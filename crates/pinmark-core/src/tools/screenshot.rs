//! Screenshot region tool.
//!
//! Never creates a shape: a finished drag hands the selected region to the
//! host through [`HostEditor::capture_region`].

use super::{SessionBox, Tool, ToolKind, Transition};
use crate::config::OverlayConfig;
use crate::geometry::PageBox;
use crate::host::{Cursor, HostEditor};
use crate::input::ToolEvent;
use kurbo::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
enum ScreenshotState {
    Idle,
    Pointing { origin: Point },
    Dragging { origin: Point },
}

#[derive(Debug, Clone)]
pub struct ScreenshotTool {
    drag_threshold: f64,
    state: ScreenshotState,
    /// Growing selection box while dragging, `None` otherwise.
    screenshot_box: SessionBox,
}

impl ScreenshotTool {
    pub fn new(config: &OverlayConfig) -> Self {
        Self {
            drag_threshold: config.drag_threshold,
            state: ScreenshotState::Idle,
            screenshot_box: SessionBox::new(None),
        }
    }

    fn reset(&mut self) {
        self.state = ScreenshotState::Idle;
        if self.screenshot_box.get().is_some() {
            self.screenshot_box.set(None);
        }
    }

    fn complete(&mut self) -> Transition {
        self.reset();
        Transition::Activate(ToolKind::Select)
    }
}

impl Tool for ScreenshotTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Screenshot
    }

    fn children(&self) -> &'static [&'static str] {
        &["idle", "pointing", "dragging"]
    }

    fn current_child(&self) -> &'static str {
        match self.state {
            ScreenshotState::Idle => "idle",
            ScreenshotState::Pointing { .. } => "pointing",
            ScreenshotState::Dragging { .. } => "dragging",
        }
    }

    fn on_enter(&mut self, host: &mut dyn HostEditor) {
        self.reset();
        host.set_cursor(Cursor::CROSS);
    }

    fn on_exit(&mut self, host: &mut dyn HostEditor) {
        self.reset();
        host.set_cursor(Cursor::DEFAULT);
    }

    fn on_interrupt(&mut self, _host: &mut dyn HostEditor) -> Transition {
        self.complete()
    }

    fn on_cancel(&mut self, _host: &mut dyn HostEditor) -> Transition {
        self.complete()
    }

    fn handle_event(&mut self, event: &ToolEvent, host: &mut dyn HostEditor) -> Transition {
        match (self.state, event) {
            (ScreenshotState::Idle, ToolEvent::PointerDown { point, .. }) => {
                self.state = ScreenshotState::Pointing { origin: *point };
                Transition::Stay
            }
            (ScreenshotState::Pointing { origin }, ToolEvent::PointerMove { point, .. }) => {
                if origin.distance(*point) > self.drag_threshold {
                    self.state = ScreenshotState::Dragging { origin };
                    self.screenshot_box.set(Some(PageBox::from_points(origin, *point)));
                }
                Transition::Stay
            }
            (ScreenshotState::Pointing { .. }, ToolEvent::PointerUp { .. }) => {
                log::debug!("Screenshot click without drag, cancelling");
                self.complete()
            }
            (ScreenshotState::Dragging { origin }, ToolEvent::PointerMove { point, .. }) => {
                self.screenshot_box.set(Some(PageBox::from_points(origin, *point)));
                Transition::Stay
            }
            (ScreenshotState::Dragging { origin }, ToolEvent::PointerUp { point, .. }) => {
                let region = PageBox::from_points(origin, *point);
                log::debug!("Capturing region {:?}", region);
                host.capture_region(region);
                self.complete()
            }
            _ => Transition::Stay,
        }
    }

    fn session(&self) -> Option<&SessionBox> {
        Some(&self.screenshot_box)
    }
}
