//! Pin placement tool.

use super::{Tool, ToolKind, Transition};
use crate::config::OverlayConfig;
use crate::geometry::PageBox;
use crate::host::{Cursor, HostEditor};
use crate::input::ToolEvent;
use crate::shapes::{Pin, Shape};
use kurbo::{Point, Size};

#[derive(Debug, Clone, Copy, PartialEq)]
enum PinState {
    Idle,
    Pointing {
        origin: Point,
        current: Point,
        dragged: bool,
    },
}

/// Places a pin: a click drops a default-size pin centered on the pointer,
/// a drag spans the dragged box.
#[derive(Debug, Clone)]
pub struct PinTool {
    pin_size: Size,
    drag_threshold: f64,
    state: PinState,
}

impl PinTool {
    pub fn new(config: &OverlayConfig) -> Self {
        Self {
            pin_size: config.pin_size,
            drag_threshold: config.drag_threshold,
            state: PinState::Idle,
        }
    }

    fn place(&self, origin: Point, current: Point, dragged: bool) -> PageBox {
        let dragged_box = PageBox::from_points(origin, current);
        if dragged && !dragged_box.is_empty() {
            dragged_box
        } else {
            PageBox::new(
                origin.x - self.pin_size.width / 2.0,
                origin.y - self.pin_size.height / 2.0,
                self.pin_size.width,
                self.pin_size.height,
            )
        }
    }

    fn abandon(&mut self) -> Transition {
        self.state = PinState::Idle;
        Transition::Activate(ToolKind::Select)
    }
}

impl Tool for PinTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Pin
    }

    fn children(&self) -> &'static [&'static str] {
        &["idle", "pointing"]
    }

    fn current_child(&self) -> &'static str {
        match self.state {
            PinState::Idle => "idle",
            PinState::Pointing { .. } => "pointing",
        }
    }

    fn on_enter(&mut self, host: &mut dyn HostEditor) {
        self.state = PinState::Idle;
        host.set_cursor(Cursor::CROSS);
    }

    fn on_exit(&mut self, host: &mut dyn HostEditor) {
        self.state = PinState::Idle;
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
            (PinState::Idle, ToolEvent::PointerDown { point, .. }) => {
                self.state = PinState::Pointing {
                    origin: *point,
                    current: *point,
                    dragged: false,
                };
                Transition::Stay
            }
            (PinState::Pointing { origin, dragged, .. }, ToolEvent::PointerMove { point, .. }) => {
                self.state = PinState::Pointing {
                    origin,
                    current: *point,
                    dragged: dragged || origin.distance(*point) > self.drag_threshold,
                };
                Transition::Stay
            }
            (PinState::Pointing { origin, dragged, .. }, ToolEvent::PointerUp { point, .. }) => {
                let b = self.place(origin, *point, dragged);
                let id = host.create_shape_id();
                host.create_shape(Shape::Pin(Pin::with_size(id, b.origin(), b.size())));
                host.select(&[id]);
                log::debug!("Placed pin {} at {:?}", id, b);

                self.state = PinState::Idle;
                Transition::Activate(ToolKind::Select)
            }
            _ => Transition::Stay,
        }
    }
}
