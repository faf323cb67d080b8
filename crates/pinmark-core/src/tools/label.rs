//! Label placement tool.

use super::{Tool, ToolKind, Transition};
use crate::config::OverlayConfig;
use crate::host::{Cursor, CursorKind, HostEditor};
use crate::input::ToolEvent;
use crate::shapes::{Label, LabelSize, Shape};
use kurbo::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
enum LabelState {
    Idle,
    Pointing { origin: Point },
}

/// Places an empty label at the pressed point and starts editing it.
#[derive(Debug, Clone)]
pub struct LabelTool {
    size: LabelSize,
    state: LabelState,
}

impl LabelTool {
    pub fn new(config: &OverlayConfig) -> Self {
        Self {
            size: config.label_size,
            state: LabelState::Idle,
        }
    }

    fn abandon(&mut self) -> Transition {
        self.state = LabelState::Idle;
        Transition::Activate(ToolKind::Select)
    }
}

impl Tool for LabelTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Label
    }

    fn children(&self) -> &'static [&'static str] {
        &["idle", "pointing"]
    }

    fn current_child(&self) -> &'static str {
        match self.state {
            LabelState::Idle => "idle",
            LabelState::Pointing { .. } => "pointing",
        }
    }

    fn on_enter(&mut self, host: &mut dyn HostEditor) {
        self.state = LabelState::Idle;
        host.set_cursor(Cursor {
            kind: CursorKind::Text,
            rotation: 0.0,
        });
    }

    fn on_exit(&mut self, host: &mut dyn HostEditor) {
        self.state = LabelState::Idle;
        host.set_cursor(Cursor::DEFAULT);
    }

    fn on_interrupt(&mut self, _host: &mut dyn HostEditor) -> Transition {
        self.abandon()
    }

    fn on_cancel(&mut self, _host: &mut dyn HostEditor) -> Transition {
        self.abandon()
    }

    fn handle_event(&mut self, event: &ToolEvent, host: &mut dyn HostEditor) -> Transition {
        match (self.state, event) {
            (LabelState::Idle, ToolEvent::PointerDown { point, .. }) => {
                self.state = LabelState::Pointing { origin: *point };
                Transition::Stay
            }
            (LabelState::Pointing { origin }, ToolEvent::PointerUp { .. }) => {
                let id = host.create_shape_id();
                let label = Label::new(id, origin, "").with_size_preset(self.size);
                host.create_shape(Shape::Label(label));
                host.select(&[id]);
                host.set_editing_shape(Some(id));
                log::debug!("Placed label {}, editing", id);

                self.state = LabelState::Idle;
                Transition::Activate(ToolKind::Select)
            }
            _ => Transition::Stay,
        }
    }
}
