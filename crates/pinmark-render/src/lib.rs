//! Pinmark Render Library
//!
//! Screen markup and SVG export for pinmark shapes. Both outputs share one
//! crop layout so a pin looks the same on screen and in an exported file.

mod element;
pub mod export;
pub mod fonts;
pub mod layout;
pub mod overlay;
pub mod screen;
pub mod svg;
pub mod utils;

pub use element::{Element, Node, RenderError, RenderResult};
pub use export::{ExportError, ExportResult, SvgExporter};
pub use fonts::{FontError, FontFetcher, FontResult, MemoryFontFetcher};
pub use layout::{ImageLayout, image_layout};
pub use overlay::{ScreenshotOverlay, screenshot_brush};
pub use utils::{ShapeUtil, shape_util};

#[cfg(feature = "http")]
pub use fonts::HttpFontFetcher;
