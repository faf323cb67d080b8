//! Input events fed by the host into the active tool.

use crate::shapes::ShapeId;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ..Modifiers::NONE
    };

    /// Ctrl on Windows/Linux, Cmd on macOS; either counts.
    pub fn accel(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Keys the tools and the text bridge react to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Enter,
    Tab,
    Escape,
    Character(String),
    Other(String),
}

/// What the pointer went down on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerTarget {
    Canvas,
    Shape(ShapeId),
}

/// Raw interaction event in document space.
///
/// The host converts screen positions with its camera before dispatching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ToolEvent {
    PointerDown {
        point: Point,
        target: PointerTarget,
        modifiers: Modifiers,
    },
    PointerMove {
        point: Point,
        modifiers: Modifiers,
    },
    PointerUp {
        point: Point,
        modifiers: Modifiers,
    },
    KeyDown {
        key: Key,
        modifiers: Modifiers,
    },
}

impl ToolEvent {
    pub fn pointer_down(point: Point) -> Self {
        ToolEvent::PointerDown {
            point,
            target: PointerTarget::Canvas,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn pointer_down_on(point: Point, shape: ShapeId) -> Self {
        ToolEvent::PointerDown {
            point,
            target: PointerTarget::Shape(shape),
            modifiers: Modifiers::NONE,
        }
    }

    pub fn pointer_move(point: Point) -> Self {
        ToolEvent::PointerMove {
            point,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn pointer_up(point: Point) -> Self {
        ToolEvent::PointerUp {
            point,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn key(key: Key) -> Self {
        ToolEvent::KeyDown {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    /// Event name as reported in logs.
    pub fn name(&self) -> &'static str {
        match self {
            ToolEvent::PointerDown { .. } => "pointer_down",
            ToolEvent::PointerMove { .. } => "pointer_move",
            ToolEvent::PointerUp { .. } => "pointer_up",
            ToolEvent::KeyDown { .. } => "key_down",
        }
    }
}
