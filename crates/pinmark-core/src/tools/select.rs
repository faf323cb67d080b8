//! Default tool: selects shapes and ends editing.

use super::{Tool, ToolKind, Transition};
use crate::host::HostEditor;
use crate::input::{PointerTarget, ToolEvent};

#[derive(Debug, Clone, Default)]
pub struct SelectTool;

impl SelectTool {
    pub fn new() -> Self {
        Self
    }

    fn end_editing(host: &mut dyn HostEditor) {
        if host.editing_shape_id().is_some() {
            host.complete();
        }
    }
}

impl Tool for SelectTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Select
    }

    fn children(&self) -> &'static [&'static str] {
        &["idle"]
    }

    fn current_child(&self) -> &'static str {
        "idle"
    }

    fn on_interrupt(&mut self, _host: &mut dyn HostEditor) -> Transition {
        Transition::Stay
    }

    fn on_cancel(&mut self, host: &mut dyn HostEditor) -> Transition {
        Self::end_editing(host);
        Transition::Stay
    }

    fn handle_event(&mut self, event: &ToolEvent, host: &mut dyn HostEditor) -> Transition {
        if let ToolEvent::PointerDown { target, .. } = event {
            match *target {
                PointerTarget::Shape(id) => {
                    if host.editing_shape_id().is_some_and(|editing| editing != id) {
                        host.complete();
                    }
                    host.select(&[id]);
                }
                PointerTarget::Canvas => {
                    Self::end_editing(host);
                    host.select(&[]);
                }
            }
        }
        Transition::Stay
    }
}
