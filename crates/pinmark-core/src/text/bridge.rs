//! Bridge between an editable text surface and a label's persisted text.
//!
//! The host owns the surface (a textarea, a native text widget, or a
//! [`PlainTextSurface`]) and forwards its focus, blur, key, change and
//! selection events here. Work that must wait for the host to settle its own
//! focus handling is deferred to the next animation frame: the host calls
//! [`EditableTextBridge::run_frame`] once per frame.

use super::field::{Selection, TextField};
use super::{normalize_text, replace_tabs};
use crate::config::OverlayConfig;
use crate::host::HostEditor;
use crate::input::{Key, Modifiers, PointerTarget, ToolEvent};
use crate::shapes::{Shape, ShapeId, ShapeUpdate};
use kurbo::Point;
use std::collections::VecDeque;

/// Whether an event should keep bubbling to the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Continue,
    Stop,
}

/// Result of a key press routed through the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not editing, or a key the bridge leaves to the surface.
    Ignored,
    /// Consumed; the surface's default action must be prevented.
    Handled,
    /// Editing was completed.
    Completed,
}

/// An editable text surface as seen by the bridge.
pub trait TextSurface {
    fn field(&self) -> &TextField;

    fn field_mut(&mut self) -> &mut TextField;

    fn is_focused(&self) -> bool;

    /// Give the surface input focus. Returns `true` if focus changed, in
    /// which case the bridge behaves as if a focus event fired.
    fn focus(&mut self) -> bool;

    /// Drop every selection range (the surface keeps its value).
    fn clear_ranges(&mut self);

    /// Current selection ranges.
    fn ranges(&self) -> Vec<Selection> {
        vec![self.field().selection()]
    }

    /// Re-apply captured ranges. Plain fields support a single range.
    fn restore_ranges(&mut self, ranges: &[Selection]) {
        if let Some(first) = ranges.first() {
            self.field_mut().set_selection(*first);
        }
    }
}

/// Minimal in-memory surface.
#[derive(Debug, Clone, Default)]
pub struct PlainTextSurface {
    pub field: TextField,
    focused: bool,
    has_ranges: bool,
}

impl PlainTextSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Simulate user typing: replace the value and place the caret.
    pub fn type_value(&mut self, value: &str, caret: usize) {
        self.field.set_value(value);
        self.field.set_selection(Selection::caret(caret));
        self.has_ranges = true;
    }

    /// Simulate the user selecting a range.
    pub fn select(&mut self, start: usize, end: usize) {
        self.field.set_selection(Selection::new(start, end));
        self.has_ranges = true;
    }
}

impl TextSurface for PlainTextSurface {
    fn field(&self) -> &TextField {
        &self.field
    }

    fn field_mut(&mut self) -> &mut TextField {
        self.has_ranges = true;
        &mut self.field
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    fn focus(&mut self) -> bool {
        !std::mem::replace(&mut self.focused, true)
    }

    fn clear_ranges(&mut self) {
        self.has_ranges = false;
    }

    fn ranges(&self) -> Vec<Selection> {
        if self.has_ranges {
            vec![self.field.selection()]
        } else {
            Vec::new()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum FrameTask {
    Focus { skip_select: bool },
    Blur { ranges: Option<Vec<Selection>> },
}

/// Synchronizes one label's text with an editable surface.
#[derive(Debug, Clone)]
pub struct EditableTextBridge {
    shape_id: ShapeId,
    indent: String,
    skip_select_on_focus: bool,
    selection_ranges: Option<Vec<Selection>>,
    frames: VecDeque<FrameTask>,
}

impl EditableTextBridge {
    pub fn new(shape_id: ShapeId, indent: &str) -> Self {
        Self {
            shape_id,
            indent: indent.to_string(),
            skip_select_on_focus: false,
            selection_ranges: None,
            frames: VecDeque::new(),
        }
    }

    /// Bridge using the configured indent unit.
    pub fn with_config(shape_id: ShapeId, config: &OverlayConfig) -> Self {
        Self::new(shape_id, &config.indent_unit)
    }

    pub fn shape_id(&self) -> ShapeId {
        self.shape_id
    }

    pub fn is_editing(&self, host: &dyn HostEditor) -> bool {
        host.editing_shape_id() == Some(self.shape_id)
    }

    /// Whether work is waiting for the next animation frame.
    pub fn has_pending_frame(&self) -> bool {
        !self.frames.is_empty()
    }

    /// Call after the host's editing id may have changed: focuses the
    /// surface when this label has become the editing target.
    pub fn sync(&mut self, host: &dyn HostEditor, surface: &mut dyn TextSurface) {
        if self.is_editing(host) && !surface.is_focused() && surface.focus() {
            self.handle_focus();
        }
    }

    /// The surface gained focus.
    pub fn handle_focus(&mut self) {
        let skip_select = std::mem::take(&mut self.skip_select_on_focus);
        self.frames.push_back(FrameTask::Focus { skip_select });
    }

    /// The surface lost focus.
    pub fn handle_blur(&mut self) {
        let ranges = self.selection_ranges.clone();
        self.frames.push_back(FrameTask::Blur { ranges });
    }

    /// Run work deferred to this frame. Work queued while running lands in
    /// the next frame.
    pub fn run_frame(&mut self, host: &mut dyn HostEditor, surface: &mut dyn TextSurface) {
        let tasks = std::mem::take(&mut self.frames);
        for task in tasks {
            match task {
                FrameTask::Focus { skip_select } => self.finish_focus(skip_select, host, surface),
                FrameTask::Blur { ranges } => self.finish_blur(ranges, host, surface),
            }
        }
    }

    fn finish_focus(&mut self, skip_select: bool, host: &dyn HostEditor, surface: &mut dyn TextSurface) {
        let Some(Shape::Label(label)) = host.get_shape(self.shape_id) else {
            return;
        };
        let field = surface.field_mut();
        field.set_value(&label.props.text);
        if !field.is_empty() && !skip_select {
            field.select_all();
        }
    }

    fn finish_blur(
        &mut self,
        ranges: Option<Vec<Selection>>,
        host: &mut dyn HostEditor,
        surface: &mut dyn TextSurface,
    ) {
        match host.editing_shape_id() {
            Some(id) if id == self.shape_id => match ranges {
                Some(ranges) if !ranges.is_empty() => {
                    if surface.focus() {
                        self.skip_select_on_focus = true;
                        self.handle_focus();
                    }
                    surface.restore_ranges(&ranges);
                }
                _ => self.focus_surface(surface),
            },
            // Editing moved to another shape; that shape's bridge takes over.
            Some(_) => {}
            None => {
                log::debug!("Label {} lost focus, completing edit", self.shape_id);
                surface.clear_ranges();
                host.complete();
            }
        }
    }

    fn focus_surface(&mut self, surface: &mut dyn TextSurface) {
        if surface.focus() {
            self.handle_focus();
        }
    }

    /// Ctrl/Cmd+Enter completes; Tab indents, Shift+Tab unindents.
    pub fn handle_key_down(
        &mut self,
        key: &Key,
        modifiers: Modifiers,
        host: &mut dyn HostEditor,
        surface: &mut dyn TextSurface,
    ) -> KeyOutcome {
        if !self.is_editing(host) {
            return KeyOutcome::Ignored;
        }

        match key {
            Key::Enter if modifiers.accel() => {
                host.complete();
                KeyOutcome::Completed
            }
            Key::Tab => {
                let field = surface.field_mut();
                if modifiers.shift {
                    field.unindent();
                } else {
                    field.indent(&self.indent);
                }
                self.handle_change(host, surface);
                KeyOutcome::Handled
            }
            _ => KeyOutcome::Ignored,
        }
    }

    /// Accelerator chords typed into the surface must not reach canvas shortcuts.
    pub fn key_propagation(&self, modifiers: Modifiers) -> Propagation {
        if modifiers.accel() {
            Propagation::Stop
        } else {
            Propagation::Continue
        }
    }

    /// The surface's value changed. Normalizes it and pushes it to the shape.
    pub fn handle_change(&mut self, host: &mut dyn HostEditor, surface: &mut dyn TextSurface) {
        if !self.is_editing(host) {
            return;
        }

        let field = surface.field_mut();
        let raw = field.value().to_string();
        let normalized = normalize_text(&raw);
        let selection = field.selection();
        let selection = Selection::new(
            normalized_offset(&raw, selection.start),
            normalized_offset(&raw, selection.end),
        );

        // Pasted tabs become indent units; the caret follows the growth.
        let text = replace_tabs(&normalized, &self.indent);
        if text != normalized {
            let delta = text.chars().count() as isize - normalized.chars().count() as isize;
            let caret = (selection.start as isize + delta).max(0) as usize;
            field.set_value(&text);
            field.set_selection(Selection::caret(caret));
        } else if text != raw {
            field.set_value(&text);
            field.set_selection(selection);
        }

        host.update_shapes(&[ShapeUpdate::label_text(self.shape_id, &text)]);
    }

    /// The document selection changed; remember it for the next blur.
    pub fn handle_selection_change(&mut self, host: &dyn HostEditor, surface: &dyn TextSurface) {
        if !self.is_editing(host) {
            return;
        }
        let ranges = surface.ranges();
        if !ranges.is_empty() {
            self.selection_ranges = Some(ranges);
        }
    }

    /// Pointer pressed inside the surface. Re-dispatched to the host as a
    /// press on this shape so it stays selected; never bubbles to the canvas.
    pub fn handle_input_pointer_down(
        &self,
        point: Point,
        modifiers: Modifiers,
        host: &mut dyn HostEditor,
    ) -> Propagation {
        host.dispatch(ToolEvent::PointerDown {
            point,
            target: PointerTarget::Shape(self.shape_id),
            modifiers,
        });
        Propagation::Stop
    }

    pub fn handle_double_click(&self) -> Propagation {
        Propagation::Stop
    }
}

/// Map a char offset in `raw` to the same position after `\r\n` pairs
/// collapse to one line break.
fn normalized_offset(raw: &str, offset: usize) -> usize {
    let chars: Vec<char> = raw.chars().collect();
    let collapsed = chars
        .windows(2)
        .take(offset)
        .filter(|pair| pair[0] == '\r' && pair[1] == '\n')
        .count();
    offset - collapsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::MemoryEditor;
    use crate::shapes::Label;

    fn editing_label(text: &str) -> (MemoryEditor, EditableTextBridge, PlainTextSurface) {
        let mut host = MemoryEditor::new();
        let id = host.create_shape_id();
        host.create_shape(Shape::Label(Label::new(id, Point::ZERO, text)));
        host.set_editing_shape(Some(id));
        (host, EditableTextBridge::with_config(id, &OverlayConfig::default()), PlainTextSurface::new())
    }

    fn label_text(host: &MemoryEditor, id: ShapeId) -> String {
        host.shape(id).and_then(Shape::as_label).unwrap().props.text.clone()
    }

    #[test]
    fn test_focus_selects_all_on_next_frame() {
        let (mut host, mut bridge, mut surface) = editing_label("hello");
        bridge.sync(&host, &mut surface);
        assert!(surface.is_focused());
        assert!(bridge.has_pending_frame());
        assert_eq!(surface.field.value(), "");

        bridge.run_frame(&mut host, &mut surface);
        assert_eq!(surface.field.value(), "hello");
        assert_eq!(surface.field.selection(), Selection::new(0, 5));
    }

    #[test]
    fn test_focus_on_empty_text_does_not_select() {
        let (mut host, mut bridge, mut surface) = editing_label("");
        bridge.sync(&host, &mut surface);
        bridge.run_frame(&mut host, &mut surface);
        assert_eq!(surface.field.selection(), Selection::caret(0));
    }

    #[test]
    fn test_blur_restores_captured_selection() {
        let (mut host, mut bridge, mut surface) = editing_label("hello");
        bridge.sync(&host, &mut surface);
        bridge.run_frame(&mut host, &mut surface);

        surface.select(1, 3);
        bridge.handle_selection_change(&host, &surface);

        // Focus goes to a toolbar button and the label is still being edited.
        surface.blur();
        bridge.handle_blur();
        bridge.run_frame(&mut host, &mut surface);
        assert!(surface.is_focused());
        assert_eq!(surface.field.selection(), Selection::new(1, 3));

        // The re-focus frame must not select everything.
        bridge.run_frame(&mut host, &mut surface);
        assert_eq!(surface.field.selection(), Selection::new(1, 3));
        assert_eq!(host.completions(), 0);
    }

    #[test]
    fn test_blur_without_editing_target_completes() {
        let (mut host, mut bridge, mut surface) = editing_label("hello");
        bridge.sync(&host, &mut surface);
        bridge.run_frame(&mut host, &mut surface);

        surface.blur();
        host.set_editing_shape(None);
        let before = host.complete_requests();
        bridge.handle_blur();
        bridge.run_frame(&mut host, &mut surface);
        assert!(surface.ranges().is_empty());
        assert!(!surface.is_focused());
        assert_eq!(host.complete_requests(), before + 1);
    }

    #[test]
    fn test_blur_to_other_shape_does_not_complete() {
        let (mut host, mut bridge, mut surface) = editing_label("hello");
        let other = host.create_shape_id();
        host.create_shape(Shape::Label(Label::new(other, Point::ZERO, "other")));
        bridge.sync(&host, &mut surface);
        bridge.run_frame(&mut host, &mut surface);

        surface.blur();
        host.set_editing_shape(Some(other));
        bridge.handle_blur();
        bridge.run_frame(&mut host, &mut surface);
        assert_eq!(host.complete_requests(), 0);
    }

    #[test]
    fn test_refused_refocus_keeps_select_all() {
        let (mut host, mut bridge, mut surface) = editing_label("hello");
        bridge.sync(&host, &mut surface);
        bridge.run_frame(&mut host, &mut surface);
        surface.select(1, 3);
        bridge.handle_selection_change(&host, &surface);

        // Blur fires but the surface never lost focus, so focus() is a no-op.
        bridge.handle_blur();
        bridge.run_frame(&mut host, &mut surface);
        assert!(!bridge.has_pending_frame());
        assert_eq!(surface.field.selection(), Selection::new(1, 3));

        // A later, unrelated focus selects everything again.
        surface.blur();
        bridge.sync(&host, &mut surface);
        bridge.run_frame(&mut host, &mut surface);
        assert_eq!(surface.field.selection(), Selection::new(0, 5));
    }

    #[test]
    fn test_blur_to_other_shape_leaves_it_alone() {
        let (mut host, mut bridge, mut surface) = editing_label("hello");
        let other = host.create_shape_id();
        host.create_shape(Shape::Label(Label::new(other, Point::ZERO, "other")));
        bridge.sync(&host, &mut surface);
        bridge.run_frame(&mut host, &mut surface);

        surface.blur();
        host.set_editing_shape(Some(other));
        bridge.handle_blur();
        bridge.run_frame(&mut host, &mut surface);
        assert!(!surface.is_focused());
        assert_eq!(host.editing_shape_id(), Some(other));
    }

    #[test]
    fn test_ctrl_enter_completes() {
        let (mut host, mut bridge, mut surface) = editing_label("hi");
        let modifiers = Modifiers {
            ctrl: true,
            ..Modifiers::NONE
        };
        let outcome = bridge.handle_key_down(&Key::Enter, modifiers, &mut host, &mut surface);
        assert_eq!(outcome, KeyOutcome::Completed);
        assert_eq!(host.editing_shape_id(), None);
        assert_eq!(host.completions(), 1);
        assert_eq!(bridge.key_propagation(modifiers), Propagation::Stop);
    }

    #[test]
    fn test_plain_enter_is_left_to_surface() {
        let (mut host, mut bridge, mut surface) = editing_label("hi");
        let outcome = bridge.handle_key_down(&Key::Enter, Modifiers::NONE, &mut host, &mut surface);
        assert_eq!(outcome, KeyOutcome::Ignored);
        assert_eq!(bridge.key_propagation(Modifiers::NONE), Propagation::Continue);
    }

    #[test]
    fn test_tab_indents_and_updates_shape() {
        let (mut host, mut bridge, mut surface) = editing_label("");
        surface.type_value("abc", 0);
        let outcome = bridge.handle_key_down(&Key::Tab, Modifiers::NONE, &mut host, &mut surface);
        assert_eq!(outcome, KeyOutcome::Handled);
        assert_eq!(surface.field.value(), "  abc");
        assert_eq!(surface.field.selection(), Selection::caret(2));
        assert_eq!(label_text(&host, bridge.shape_id()), "  abc");
    }

    #[test]
    fn test_shift_tab_unindents() {
        let (mut host, mut bridge, mut surface) = editing_label("");
        surface.type_value("  abc", 5);
        bridge.handle_key_down(&Key::Tab, Modifiers::SHIFT, &mut host, &mut surface);
        assert_eq!(surface.field.value(), "abc");
        assert_eq!(surface.field.selection(), Selection::caret(3));
        assert_eq!(label_text(&host, bridge.shape_id()), "abc");
    }

    #[test]
    fn test_keys_ignored_when_not_editing() {
        let (mut host, mut bridge, mut surface) = editing_label("");
        host.set_editing_shape(None);
        surface.type_value("abc", 0);
        let outcome = bridge.handle_key_down(&Key::Tab, Modifiers::NONE, &mut host, &mut surface);
        assert_eq!(outcome, KeyOutcome::Ignored);
        assert_eq!(surface.field.value(), "abc");
    }

    #[test]
    fn test_pasted_tab_becomes_indent() {
        let (mut host, mut bridge, mut surface) = editing_label("");
        surface.type_value("a\tb", 3);
        bridge.handle_change(&mut host, &mut surface);
        assert_eq!(surface.field.value(), "a  b");
        assert_eq!(surface.field.selection(), Selection::caret(4));
        assert_eq!(label_text(&host, bridge.shape_id()), "a  b");
    }

    #[test]
    fn test_change_normalizes_line_breaks() {
        let (mut host, mut bridge, mut surface) = editing_label("");
        surface.type_value("a\r\nb\rc", 6);
        bridge.handle_change(&mut host, &mut surface);
        assert_eq!(label_text(&host, bridge.shape_id()), "a\nb\nc");
        assert_eq!(surface.field.value(), "a\nb\nc");
        assert_eq!(surface.field.selection(), Selection::caret(5));
    }

    #[test]
    fn test_crlf_collapse_keeps_caret_on_its_char() {
        let (mut host, mut bridge, mut surface) = editing_label("");
        // Caret after "b", before "cd".
        surface.type_value("a\r\nb\r\ncd", 6);
        bridge.handle_change(&mut host, &mut surface);
        assert_eq!(surface.field.value(), "a\nb\ncd");
        assert_eq!(surface.field.selection(), Selection::caret(4));
    }

    #[test]
    fn test_with_config_uses_indent_unit() {
        let mut host = MemoryEditor::new();
        let id = host.create_shape_id();
        host.create_shape(Shape::Label(Label::new(id, Point::ZERO, "")));
        host.set_editing_shape(Some(id));
        let config = OverlayConfig {
            indent_unit: "\u{3000}".to_string(),
            ..OverlayConfig::default()
        };
        let mut bridge = EditableTextBridge::with_config(id, &config);
        let mut surface = PlainTextSurface::new();

        surface.type_value("ab", 0);
        bridge.handle_key_down(&Key::Tab, Modifiers::NONE, &mut host, &mut surface);
        assert_eq!(surface.field.value(), "\u{3000}ab");

        surface.type_value("x\ty", 2);
        bridge.handle_change(&mut host, &mut surface);
        assert_eq!(surface.field.value(), "x\u{3000}y");
        assert_eq!(surface.field.selection(), Selection::caret(2));
    }

    #[test]
    fn test_change_ignored_when_not_editing() {
        let (mut host, mut bridge, mut surface) = editing_label("keep");
        host.set_editing_shape(None);
        surface.type_value("changed", 7);
        bridge.handle_change(&mut host, &mut surface);
        assert_eq!(label_text(&host, bridge.shape_id()), "keep");
    }

    #[test]
    fn test_pointer_down_is_forwarded_not_bubbled() {
        let (mut host, bridge, _) = editing_label("x");
        let propagation =
            bridge.handle_input_pointer_down(Point::new(3.0, 4.0), Modifiers::NONE, &mut host);
        assert_eq!(propagation, Propagation::Stop);
        assert_eq!(
            host.next_event(),
            Some(ToolEvent::pointer_down_on(Point::new(3.0, 4.0), bridge.shape_id()))
        );
        assert_eq!(bridge.handle_double_click(), Propagation::Stop);
    }
}
