//! In-memory reference host.
//!
//! `MemoryEditor` implements [`HostEditor`] over a plain shape store. It is
//! what the tests drive, and what a host without its own document model
//! can embed directly.

use crate::camera::Camera;
use crate::geometry::PageBox;
use crate::host::{Cursor, HostEditor};
use crate::input::ToolEvent;
use crate::shapes::{Shape, ShapeId, ShapeRecord, ShapeResult, ShapeUpdate};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use uuid::Uuid;

/// Serialized form of the shape store.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Snapshot {
    shapes: Vec<ShapeRecord>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryEditor {
    /// All shapes, keyed by ID.
    shapes: HashMap<ShapeId, Shape>,
    /// Z-order of shapes (back to front).
    z_order: Vec<ShapeId>,
    selected: Vec<ShapeId>,
    editing: Option<ShapeId>,
    pub cursor: Cursor,
    pub camera: Camera,
    /// Capture results, oldest first.
    captures: Vec<PageBox>,
    /// Events queued through [`HostEditor::dispatch`].
    pending_events: VecDeque<ToolEvent>,
    completions: usize,
    complete_requests: usize,
}

impl MemoryEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a shape, replacing any shape with the same ID.
    pub fn add_shape(&mut self, shape: Shape) {
        let id = shape.id();
        if self.shapes.insert(id, shape).is_none() {
            self.z_order.push(id);
        }
    }

    /// Delete a shape. Host-level deletion is the only way shapes die.
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Shape> {
        self.z_order.retain(|&shape_id| shape_id != id);
        self.selected.retain(|&shape_id| shape_id != id);
        if self.editing == Some(id) {
            self.editing = None;
        }
        self.shapes.remove(&id)
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    /// Shapes in z-order (back to front).
    pub fn shapes_ordered(&self) -> impl Iterator<Item = &Shape> {
        self.z_order.iter().filter_map(|id| self.shapes.get(id))
    }

    /// Shapes whose bounds overlap the region, back to front.
    pub fn shapes_in_box(&self, region: &PageBox) -> Vec<&Shape> {
        self.shapes_ordered()
            .filter(|s| s.bounds().intersects(region))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn selected(&self) -> &[ShapeId] {
        &self.selected
    }

    pub fn captures(&self) -> &[PageBox] {
        &self.captures
    }

    pub fn take_captures(&mut self) -> Vec<PageBox> {
        std::mem::take(&mut self.captures)
    }

    /// Pop the next event queued for the host's pointer dispatch.
    pub fn next_event(&mut self) -> Option<ToolEvent> {
        self.pending_events.pop_front()
    }

    /// Number of editing sessions ended through [`HostEditor::complete`].
    pub fn completions(&self) -> usize {
        self.completions
    }

    /// Every [`HostEditor::complete`] call, including ones with nothing to end.
    pub fn complete_requests(&self) -> usize {
        self.complete_requests
    }

    pub fn to_json(&self) -> ShapeResult<String> {
        let shapes = self
            .shapes_ordered()
            .map(Shape::to_record)
            .collect::<ShapeResult<Vec<_>>>()?;
        Ok(serde_json::to_string_pretty(&Snapshot { shapes })?)
    }

    pub fn from_json(json: &str) -> ShapeResult<Self> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        let mut editor = Self::new();
        for record in &snapshot.shapes {
            editor.add_shape(Shape::from_record(record)?);
        }
        Ok(editor)
    }
}

impl HostEditor for MemoryEditor {
    fn create_shape_id(&mut self) -> ShapeId {
        Uuid::new_v4()
    }

    fn create_shape(&mut self, shape: Shape) {
        log::debug!("Creating {} {}", shape.kind().name(), shape.id());
        self.add_shape(shape);
    }

    fn update_shapes(&mut self, updates: &[ShapeUpdate]) {
        for update in updates {
            let Some(shape) = self.shapes.get_mut(&update.id) else {
                log::warn!("Update for unknown shape {}", update.id);
                continue;
            };
            if let Err(e) = shape.apply_update(update) {
                log::warn!("Rejected update for {}: {}", update.id, e);
            }
        }
    }

    fn get_shape(&self, id: ShapeId) -> Option<Shape> {
        self.shapes.get(&id).cloned()
    }

    fn select(&mut self, ids: &[ShapeId]) {
        self.selected = ids
            .iter()
            .copied()
            .filter(|id| self.shapes.contains_key(id))
            .collect();
    }

    fn editing_shape_id(&self) -> Option<ShapeId> {
        self.editing
    }

    fn set_editing_shape(&mut self, id: Option<ShapeId>) {
        self.editing = id.filter(|id| self.shapes.contains_key(id));
    }

    fn complete(&mut self) {
        self.complete_requests += 1;
        if self.editing.take().is_some() {
            self.completions += 1;
        }
    }

    fn dispatch(&mut self, event: ToolEvent) {
        self.pending_events.push_back(event);
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    fn page_to_screen(&self, point: Point) -> Point {
        self.camera.page_to_screen(point)
    }

    fn zoom_level(&self) -> f64 {
        self.camera.zoom_level()
    }

    fn box_to_screen(&self, page_box: &PageBox) -> PageBox {
        self.camera.box_to_screen(page_box)
    }

    fn capture_region(&mut self, region: PageBox) {
        self.captures.push(region);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Crop, Label, Pin};

    #[test]
    fn test_add_and_remove() {
        let mut editor = MemoryEditor::new();
        let id = editor.create_shape_id();
        editor.create_shape(Shape::Pin(Pin::create_default(id, Point::ZERO)));
        editor.select(&[id]);
        editor.set_editing_shape(Some(id));
        assert_eq!(editor.len(), 1);

        editor.remove_shape(id);
        assert!(editor.is_empty());
        assert!(editor.selected().is_empty());
        assert_eq!(editor.editing_shape_id(), None);
    }

    #[test]
    fn test_editing_requires_existing_shape() {
        let mut editor = MemoryEditor::new();
        editor.set_editing_shape(Some(Uuid::new_v4()));
        assert_eq!(editor.editing_shape_id(), None);
    }

    #[test]
    fn test_complete_counts_sessions() {
        let mut editor = MemoryEditor::new();
        let id = editor.create_shape_id();
        editor.create_shape(Shape::Label(Label::new(id, Point::ZERO, "")));
        editor.complete();
        assert_eq!(editor.completions(), 0);
        assert_eq!(editor.complete_requests(), 1);

        editor.set_editing_shape(Some(id));
        editor.complete();
        assert_eq!(editor.completions(), 1);
        assert_eq!(editor.complete_requests(), 2);
        assert_eq!(editor.editing_shape_id(), None);
    }

    #[test]
    fn test_update_unknown_shape_is_ignored() {
        let mut editor = MemoryEditor::new();
        editor.update_shapes(&[ShapeUpdate::label_text(Uuid::new_v4(), "x")]);
        assert!(editor.is_empty());
    }

    #[test]
    fn test_shapes_in_box() {
        let mut editor = MemoryEditor::new();
        let a = editor.create_shape_id();
        let b = editor.create_shape_id();
        editor.create_shape(Shape::Pin(Pin::create_default(a, Point::new(0.0, 0.0))));
        editor.create_shape(Shape::Pin(Pin::create_default(b, Point::new(500.0, 500.0))));

        let hits = editor.shapes_in_box(&PageBox::new(-10.0, -10.0, 100.0, 100.0));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id(), a);
    }

    #[test]
    fn test_json_roundtrip_keeps_order() {
        let mut editor = MemoryEditor::new();
        let a = editor.create_shape_id();
        let b = editor.create_shape_id();
        let pin = Pin::create_default(a, Point::new(1.0, 2.0))
            .with_crop(Crop::new(Point::new(0.25, 0.25), Point::new(0.75, 0.75)));
        editor.create_shape(Shape::Pin(pin));
        editor.create_shape(Shape::Label(Label::new(b, Point::ZERO, "hi")));

        let json = editor.to_json().unwrap();
        let restored = MemoryEditor::from_json(&json).unwrap();
        let ids: Vec<_> = restored.shapes_ordered().map(Shape::id).collect();
        assert_eq!(ids, vec![a, b]);
        assert_eq!(restored.shape(a), editor.shape(a));
    }
}
