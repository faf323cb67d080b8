//! Whole-document SVG export.

use crate::element::{Element, RenderError};
use crate::fonts::{FontFetcher, font_style_element};
use crate::utils;
use pinmark_core::config::{ExportConfig, FontFaceConfig, OverlayConfig};
use pinmark_core::geometry::PageBox;
use pinmark_core::shapes::{FontFamily, Shape};
use thiserror::Error;

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Nothing to export")]
    Empty,
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Builds SVG documents from shapes, embedding label fonts when it can.
pub struct SvgExporter<'a> {
    config: ExportConfig,
    fonts: Vec<FontFaceConfig>,
    fetcher: Option<&'a dyn FontFetcher>,
}

impl<'a> SvgExporter<'a> {
    pub fn new(config: &OverlayConfig) -> Self {
        Self {
            config: config.export.clone(),
            fonts: config.fonts.clone(),
            fetcher: None,
        }
    }

    pub fn with_fetcher(mut self, fetcher: &'a dyn FontFetcher) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Export the shapes overlapping `region`, or all given shapes when no
    /// region is set. The document's viewBox is the region (or the shapes'
    /// common bounds), grown by the configured padding.
    pub async fn export<'s>(
        &self,
        shapes: impl IntoIterator<Item = &'s Shape>,
        region: Option<PageBox>,
    ) -> ExportResult<String> {
        let shapes: Vec<&Shape> = shapes
            .into_iter()
            .filter(|shape| region.is_none_or(|r| shape.bounds().intersects(&r)))
            .collect();

        let bounds = match region {
            Some(r) => r,
            None => {
                let boxes: Vec<PageBox> = shapes.iter().map(|s| s.bounds()).collect();
                PageBox::common_bounds(&boxes).ok_or(ExportError::Empty)?
            }
        };
        let bounds = bounds.expand(self.config.padding);

        let mut svg = Element::new("svg")
            .attr("xmlns", "http://www.w3.org/2000/svg")
            .attr("xmlns:xlink", "http://www.w3.org/1999/xlink")
            .attr("width", bounds.w)
            .attr("height", bounds.h)
            .attr(
                "viewBox",
                format!("{} {} {} {}", bounds.x, bounds.y, bounds.w, bounds.h),
            );

        let styles = self.font_styles(&shapes).await;
        if !styles.is_empty() {
            svg = svg.child(styles.into_iter().fold(Element::new("defs"), Element::child));
        }

        for shape in &shapes {
            let p = shape.position();
            let mut group = utils::export(shape);
            group.set_attr("transform", format!("translate({}, {})", p.x, p.y));
            svg = svg.child(group);
        }

        log::debug!("Exported {} shapes in {:?}", shapes.len(), bounds);
        Ok(svg.to_markup()?)
    }

    /// `<style>` definitions for every font family the labels use.
    async fn font_styles(&self, shapes: &[&Shape]) -> Vec<Element> {
        let Some(fetcher) = self.fetcher.filter(|_| self.config.embed_fonts) else {
            return Vec::new();
        };

        let mut families: Vec<FontFamily> = Vec::new();
        for label in shapes.iter().filter_map(|s| s.as_label()) {
            if !families.contains(&label.props.font_family) {
                families.push(label.props.font_family);
            }
        }

        let mut styles = Vec::new();
        for family in families {
            let Some(face) = self.fonts.iter().find(|f| f.family == family) else {
                log::debug!("No font-face configured for {}", family.key());
                continue;
            };
            if let Some(style) = font_style_element(face, fetcher).await {
                styles.push(style);
            }
        }
        styles
    }
}
