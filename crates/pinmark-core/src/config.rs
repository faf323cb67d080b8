//! Overlay configuration.

use crate::shapes::{FontFamily, LabelSize};
use kurbo::Size;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

/// A font-face the exporter may embed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontFaceConfig {
    pub family: FontFamily,
    /// Where the font file is fetched from.
    pub url: String,
    /// `@font-face` rule referencing `url`; the URL is swapped for a data URI
    /// when embedding.
    pub face_rule: String,
}

/// Export settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub embed_fonts: bool,
    /// Extra space around the exported region, in document units.
    pub padding: f64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            embed_fonts: true,
            padding: 0.0,
        }
    }
}

/// Settings for tools, the text bridge and export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Size of a pin placed with a click.
    pub pin_size: Size,
    /// Size preset for new labels.
    pub label_size: LabelSize,
    /// Text inserted by Tab in the label editor.
    pub indent_unit: String,
    /// Pointer travel (document units) before a press becomes a drag.
    pub drag_threshold: f64,
    pub export: ExportConfig,
    pub fonts: Vec<FontFaceConfig>,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            pin_size: Size::new(40.0, 40.0),
            label_size: LabelSize::default(),
            indent_unit: crate::text::INDENT.to_string(),
            drag_threshold: 0.0,
            export: ExportConfig::default(),
            fonts: Vec::new(),
        }
    }
}

impl OverlayConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        log::debug!("Loading overlay config from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config = OverlayConfig::from_json(r#"{ "drag_threshold": 3.0 }"#).unwrap();
        assert!((config.drag_threshold - 3.0).abs() < f64::EPSILON);
        assert_eq!(config.indent_unit, "  ");
        assert_eq!(config.pin_size, Size::new(40.0, 40.0));
        assert!(config.export.embed_fonts);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "label_size": "xl", "fonts": [{{ "family": "mono", "url": "https://example.com/m.woff2", "face_rule": "@font-face {{ src: url(https://example.com/m.woff2); }}" }}] }}"#
        )
        .unwrap();

        let config = OverlayConfig::load(file.path()).unwrap();
        assert_eq!(config.label_size, LabelSize::Xl);
        assert_eq!(config.fonts.len(), 1);
        assert_eq!(config.fonts[0].family, FontFamily::Mono);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            OverlayConfig::from_json("{ nope"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            OverlayConfig::load("/definitely/not/here.json"),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_roundtrip() {
        let config = OverlayConfig::default();
        let json = config.to_json().unwrap();
        assert_eq!(OverlayConfig::from_json(&json).unwrap(), config);
    }
}
