//! Tool system for the overlay.
//!
//! Each tool is an explicit state machine implementing [`Tool`]. The
//! [`ToolManager`] keeps one instance per [`ToolKind`], tracks which one is
//! active, and drives every transition through [`ToolManager::dispatch`].

mod label;
mod pin;
mod screenshot;
mod select;

pub use label::LabelTool;
pub use pin::PinTool;
pub use screenshot::ScreenshotTool;
pub use select::SelectTool;

use crate::config::OverlayConfig;
use crate::geometry::PageBox;
use crate::host::HostEditor;
use crate::input::{Key, ToolEvent};
use crate::observable::Observable;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Select,
    Pin,
    Label,
    Screenshot,
}

impl ToolKind {
    /// Id used in state paths and by the toolbar.
    pub fn id(&self) -> &'static str {
        match self {
            ToolKind::Select => "select",
            ToolKind::Pin => "pin",
            ToolKind::Label => "label",
            ToolKind::Screenshot => "screenshot",
        }
    }

    pub fn from_id(id: &str) -> Option<ToolKind> {
        Self::all().iter().copied().find(|kind| kind.id() == id)
    }

    pub fn all() -> &'static [ToolKind] {
        &[
            ToolKind::Select,
            ToolKind::Pin,
            ToolKind::Label,
            ToolKind::Screenshot,
        ]
    }
}

/// What the manager should do after a tool handled a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Stay,
    /// Hand control to another tool.
    Activate(ToolKind),
}

/// In-progress rectangle of a gesture, in document space.
pub type SessionBox = Observable<Option<PageBox>>;

/// An input-interpreting state machine.
///
/// Child states are identified by name; `current_child` must always be one
/// of `children`. Hooks receive the host explicitly.
pub trait Tool {
    fn kind(&self) -> ToolKind;

    fn initial_child(&self) -> &'static str {
        "idle"
    }

    fn children(&self) -> &'static [&'static str];

    fn current_child(&self) -> &'static str;

    fn on_enter(&mut self, _host: &mut dyn HostEditor) {}

    fn on_exit(&mut self, _host: &mut dyn HostEditor) {}

    /// Another tool is taking over, or the host interrupted the gesture.
    fn on_interrupt(&mut self, host: &mut dyn HostEditor) -> Transition;

    /// Explicit cancel, e.g. Escape.
    fn on_cancel(&mut self, host: &mut dyn HostEditor) -> Transition;

    fn handle_event(&mut self, event: &ToolEvent, host: &mut dyn HostEditor) -> Transition;

    /// Observable gesture rectangle for display adapters, if the tool has one.
    fn session(&self) -> Option<&SessionBox> {
        None
    }

    fn is_gesture_active(&self) -> bool {
        self.current_child() != self.initial_child()
    }
}

/// Registry of tools plus the active one.
pub struct ToolManager {
    tools: HashMap<ToolKind, Box<dyn Tool>>,
    current: ToolKind,
}

impl std::fmt::Debug for ToolManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolManager")
            .field("current", &self.current)
            .field("path", &self.current_path())
            .finish()
    }
}

impl Default for ToolManager {
    fn default() -> Self {
        Self::with_config(&OverlayConfig::default())
    }
}

impl ToolManager {
    /// Create a manager with every built-in tool and Select active.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &OverlayConfig) -> Self {
        let mut manager = Self {
            tools: HashMap::new(),
            current: ToolKind::Select,
        };
        manager.register(Box::new(SelectTool::new()));
        manager.register(Box::new(PinTool::new(config)));
        manager.register(Box::new(LabelTool::new(config)));
        manager.register(Box::new(ScreenshotTool::new(config)));
        manager
    }

    /// Add or replace the tool registered for its kind.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        self.tools.insert(tool.kind(), tool);
    }

    pub fn current_tool(&self) -> ToolKind {
        self.current
    }

    pub fn tool(&self, kind: ToolKind) -> Option<&dyn Tool> {
        self.tools.get(&kind).map(|tool| tool.as_ref())
    }

    /// Dotted state path of the active tool, e.g. `screenshot.dragging`.
    pub fn current_path(&self) -> String {
        match self.tool(self.current) {
            Some(tool) => format!("{}.{}", self.current.id(), tool.current_child()),
            None => self.current.id().to_string(),
        }
    }

    /// Session of the state named by a dotted path such as
    /// `screenshot.dragging`.
    pub fn state_descendant(&self, path: &str) -> Option<&SessionBox> {
        let (tool_id, child) = path.split_once('.')?;
        let tool = self.tool(ToolKind::from_id(tool_id)?)?;
        if !tool.children().iter().any(|c| *c == child) {
            return None;
        }
        tool.session()
    }

    /// Activate a tool, cleanly leaving the previous one.
    pub fn set_current_tool(&mut self, kind: ToolKind, host: &mut dyn HostEditor) {
        if kind == self.current {
            return;
        }
        if !self.tools.contains_key(&kind) {
            log::warn!("No tool registered for {}", kind.id());
            return;
        }

        if let Some(tool) = self.tools.get_mut(&self.current) {
            if tool.is_gesture_active() {
                log::debug!("Interrupting {} mid-gesture", self.current.id());
                // The incoming tool wins over whatever the interrupt requests.
                let _ = tool.on_interrupt(host);
            }
            tool.on_exit(host);
        }

        log::debug!("Tool {} -> {}", self.current.id(), kind.id());
        self.current = kind;
        if let Some(tool) = self.tools.get_mut(&kind) {
            tool.on_enter(host);
        }
    }

    /// Feed an event to the active tool. Escape cancels.
    pub fn dispatch(&mut self, event: &ToolEvent, host: &mut dyn HostEditor) {
        if let ToolEvent::KeyDown {
            key: Key::Escape, ..
        } = event
        {
            self.cancel(host);
            return;
        }

        let Some(tool) = self.tools.get_mut(&self.current) else {
            return;
        };
        let transition = tool.handle_event(event, host);
        self.apply(transition, host);
    }

    pub fn interrupt(&mut self, host: &mut dyn HostEditor) {
        let Some(tool) = self.tools.get_mut(&self.current) else {
            return;
        };
        let transition = tool.on_interrupt(host);
        self.apply(transition, host);
    }

    pub fn cancel(&mut self, host: &mut dyn HostEditor) {
        let Some(tool) = self.tools.get_mut(&self.current) else {
            return;
        };
        let transition = tool.on_cancel(host);
        self.apply(transition, host);
    }

    fn apply(&mut self, transition: Transition, host: &mut dyn HostEditor) {
        if let Transition::Activate(kind) = transition {
            self.set_current_tool(kind, host);
        }
    }
}
