//! Toolbar registration table for the overlay's tools.

use crate::host::HostEditor;
use crate::input::Modifiers;
use crate::tools::{ToolKind, ToolManager};

/// A toolbar entry the host's command surface shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolItem {
    pub id: ToolKind,
    pub label: &'static str,
    pub icon: &'static str,
    pub kbd: &'static str,
    /// Whether the item stays available in read-only mode.
    pub readonly_ok: bool,
}

impl ToolItem {
    pub const fn new(id: ToolKind, label: &'static str, icon: &'static str, kbd: &'static str) -> Self {
        Self {
            id,
            label,
            icon,
            kbd,
            readonly_ok: false,
        }
    }

    /// Activate this item's tool.
    pub fn select(&self, manager: &mut ToolManager, host: &mut dyn HostEditor) {
        log::debug!("Toolbar selected {}", self.label);
        manager.set_current_tool(self.id, host);
    }

    /// Format the shortcut for display (e.g., "C").
    pub fn format_kbd(&self) -> String {
        self.kbd.to_uppercase()
    }
}

/// Registry of the overlay's toolbar items, in toolbar order.
pub struct ToolbarRegistry;

impl ToolbarRegistry {
    pub fn all() -> Vec<ToolItem> {
        vec![
            ToolItem::new(ToolKind::Pin, "Pin", "avatar", "c"),
            ToolItem::new(ToolKind::Label, "Label", "note", "l"),
            ToolItem::new(ToolKind::Screenshot, "Screenshot", "tool-screenshot", "j"),
        ]
    }

    /// Items usable in the given mode.
    pub fn available(readonly: bool) -> Vec<ToolItem> {
        Self::all()
            .into_iter()
            .filter(|item| !readonly || item.readonly_ok)
            .collect()
    }

    pub fn find(id: ToolKind) -> Option<ToolItem> {
        Self::all().into_iter().find(|item| item.id == id)
    }

    /// Item bound to an unmodified key press.
    pub fn for_shortcut(key: &str, modifiers: Modifiers) -> Option<ToolItem> {
        if modifiers.accel() || modifiers.alt {
            return None;
        }
        Self::all()
            .into_iter()
            .find(|item| item.kbd.eq_ignore_ascii_case(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::MemoryEditor;
    use std::collections::HashSet;

    #[test]
    fn test_shortcuts_are_unique() {
        let keys: HashSet<_> = ToolbarRegistry::all().iter().map(|item| item.kbd).collect();
        assert_eq!(keys.len(), ToolbarRegistry::all().len());
    }

    #[test]
    fn test_shortcut_lookup() {
        let item = ToolbarRegistry::for_shortcut("J", Modifiers::NONE).unwrap();
        assert_eq!(item.id, ToolKind::Screenshot);

        let ctrl = Modifiers {
            ctrl: true,
            ..Modifiers::NONE
        };
        assert!(ToolbarRegistry::for_shortcut("c", ctrl).is_none());
        assert!(ToolbarRegistry::for_shortcut("q", Modifiers::NONE).is_none());
    }

    #[test]
    fn test_none_available_readonly() {
        assert!(ToolbarRegistry::available(true).is_empty());
        assert_eq!(ToolbarRegistry::available(false).len(), 3);
    }

    #[test]
    fn test_select_activates_tool() {
        let mut host = MemoryEditor::new();
        let mut manager = ToolManager::new();
        ToolbarRegistry::find(ToolKind::Label)
            .unwrap()
            .select(&mut manager, &mut host);
        assert_eq!(manager.current_tool(), ToolKind::Label);
        assert_eq!(ToolbarRegistry::find(ToolKind::Pin).unwrap().format_kbd(), "C");
    }
}
