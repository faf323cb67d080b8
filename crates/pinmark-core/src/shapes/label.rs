//! Label shape: editable text attached to the canvas.

use super::{SerializableColor, ShapeId};
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// Font family options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    /// Hand-drawn style font (default).
    #[default]
    Draw,
    Sans,
    Serif,
    Mono,
}

impl FontFamily {
    /// CSS font stack used for screen markup and export.
    pub fn css_stack(&self) -> &'static str {
        match self {
            FontFamily::Draw => "'pinmark_draw', 'Shantell Sans', cursive",
            FontFamily::Sans => "'pinmark_sans', 'Inter', sans-serif",
            FontFamily::Serif => "'pinmark_serif', 'Source Serif Pro', serif",
            FontFamily::Mono => "'pinmark_mono', 'IBM Plex Mono', monospace",
        }
    }

    /// Key used to match font-face definitions for embedding.
    pub fn key(&self) -> &'static str {
        match self {
            FontFamily::Draw => "draw",
            FontFamily::Sans => "sans",
            FontFamily::Serif => "serif",
            FontFamily::Mono => "mono",
        }
    }

    pub fn all() -> &'static [FontFamily] {
        &[
            FontFamily::Draw,
            FontFamily::Sans,
            FontFamily::Serif,
            FontFamily::Mono,
        ]
    }
}

/// Preset label sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelSize {
    S,
    #[default]
    M,
    L,
    Xl,
}

impl LabelSize {
    pub fn font_size(&self) -> f64 {
        match self {
            LabelSize::S => 18.0,
            LabelSize::M => 22.0,
            LabelSize::L => 26.0,
            LabelSize::Xl => 32.0,
        }
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Start,
    #[default]
    Middle,
    End,
}

impl TextAlign {
    pub fn css(&self) -> &'static str {
        match self {
            TextAlign::Start => "left",
            TextAlign::Middle => "center",
            TextAlign::End => "right",
        }
    }

    /// SVG `text-anchor` value.
    pub fn anchor(&self) -> &'static str {
        match self {
            TextAlign::Start => "start",
            TextAlign::Middle => "middle",
            TextAlign::End => "end",
        }
    }
}

/// Persisted label props.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelProps {
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    #[serde(default)]
    pub font_family: FontFamily,
    #[serde(default)]
    pub color: SerializableColor,
    #[serde(default)]
    pub align: TextAlign,
}

fn default_font_size() -> f64 {
    LabelSize::default().font_size()
}

impl Default for LabelProps {
    fn default() -> Self {
        Self {
            text: String::new(),
            font_size: default_font_size(),
            font_family: FontFamily::default(),
            color: SerializableColor::black(),
            align: TextAlign::default(),
        }
    }
}

/// A text label.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub(crate) id: ShapeId,
    pub position: Point,
    pub size: Size,
    pub props: LabelProps,
}

impl Label {
    /// Line height as a multiple of the font size.
    pub const LINE_HEIGHT: f64 = 1.35;
    /// Inner padding between the box edge and the text.
    pub const PADDING: f64 = 8.0;
    const MIN_WIDTH: f64 = 32.0;

    pub fn new(id: ShapeId, position: Point, text: &str) -> Self {
        let mut label = Self {
            id,
            position,
            size: Size::ZERO,
            props: LabelProps {
                text: text.to_string(),
                ..LabelProps::default()
            },
        };
        label.fit_to_text();
        label
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn with_size_preset(mut self, size: LabelSize) -> Self {
        self.props.font_size = size.font_size();
        self.fit_to_text();
        self
    }

    pub fn with_font_family(mut self, family: FontFamily) -> Self {
        self.props.font_family = family;
        self.fit_to_text();
        self
    }

    pub fn line_height(&self) -> f64 {
        self.props.font_size * Self::LINE_HEIGHT
    }

    /// Lines of text; an empty label still has one line.
    pub fn lines(&self) -> Vec<&str> {
        self.props.text.split('\n').collect()
    }

    pub fn is_empty(&self) -> bool {
        self.props.text.trim().is_empty()
    }

    /// Resize the box to the approximate extent of the text.
    pub fn fit_to_text(&mut self) {
        self.size = Size::new(
            (self.approximate_width() + Self::PADDING * 2.0).max(Self::MIN_WIDTH),
            self.approximate_height() + Self::PADDING * 2.0,
        );
    }

    /// Rough width from character count; actual width depends on the font.
    fn approximate_width(&self) -> f64 {
        let widest = self
            .lines()
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);

        let char_width_factor = match self.props.font_family {
            FontFamily::Draw => 0.58,
            FontFamily::Sans => 0.52,
            FontFamily::Serif => 0.50,
            FontFamily::Mono => 0.60,
        };
        widest as f64 * self.props.font_size * char_width_factor
    }

    fn approximate_height(&self) -> f64 {
        self.lines().len() as f64 * self.line_height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_empty_label_has_one_line() {
        let label = Label::new(Uuid::new_v4(), Point::ZERO, "");
        assert_eq!(label.lines(), vec![""]);
        assert!(label.is_empty());
        assert!((label.size.width - 32.0).abs() < f64::EPSILON);
        assert!(label.size.height > label.line_height());
    }

    #[test]
    fn test_fit_grows_with_lines() {
        let one = Label::new(Uuid::new_v4(), Point::ZERO, "hello");
        let two = Label::new(Uuid::new_v4(), Point::ZERO, "hello\nworld");
        assert!(two.size.height > one.size.height);
        assert!((two.size.width - one.size.width).abs() < f64::EPSILON);
    }

    #[test]
    fn test_size_presets() {
        let label = Label::new(Uuid::new_v4(), Point::ZERO, "x").with_size_preset(LabelSize::Xl);
        assert!((label.props.font_size - 32.0).abs() < f64::EPSILON);
        assert!((LabelSize::S.font_size() - 18.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_props_serde_camel_case() {
        let props = LabelProps::default();
        let json = serde_json::to_value(&props).unwrap();
        assert_eq!(json["fontFamily"], "draw");
        assert_eq!(json["align"], "middle");
        assert_eq!(json["fontSize"], 22.0);
    }
}
