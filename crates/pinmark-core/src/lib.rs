//! Pinmark Core Library
//!
//! Shape model, tool state machines and text editing bridge for the pinmark
//! image-annotation overlay. Rendering lives in `pinmark-render`.

pub mod camera;
pub mod config;
pub mod editor;
pub mod geometry;
pub mod host;
pub mod input;
pub mod observable;
pub mod shapes;
pub mod text;
pub mod toolbar;
pub mod tools;

pub use camera::Camera;
pub use config::{ConfigError, ExportConfig, FontFaceConfig, OverlayConfig};
pub use editor::MemoryEditor;
pub use geometry::PageBox;
pub use host::{Cursor, CursorKind, HostEditor};
pub use input::{Key, Modifiers, PointerTarget, ToolEvent};
pub use observable::{Observable, Subscription};
pub use shapes::{Shape, ShapeError, ShapeId, ShapeKind, ShapeRecord, ShapeUpdate};
pub use text::{EditableTextBridge, KeyOutcome, PlainTextSurface, Propagation, TextSurface};
pub use toolbar::{ToolItem, ToolbarRegistry};
pub use tools::{SessionBox, Tool, ToolKind, ToolManager, Transition};
