//! ereader configuration: default layout and measurement settings.

use anyhow::{Context, Result, bail};
use reflow::{EstimatedMetrics, LayoutParams, LineHeight, WidthClass};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_FONT_SIZE_PX: f32 = 18.0;
const DEFAULT_CONTAINER_WIDTH_PX: u32 = 720;
const DEFAULT_LINE_HEIGHT: f32 = 1.5;
const DEFAULT_ADVANCE_FACTOR: f32 = 0.6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReaderConfig {
    /// Body text size in pixels
    #[serde(default = "default_font_size_px")]
    pub font_size_px: f32,

    /// Column width class (narrow, comfort, wide)
    #[serde(default)]
    pub width: WidthClass,

    /// Font family name. None means the host default.
    #[serde(default)]
    pub font_family: Option<String>,

    /// Width of the text column in pixels
    #[serde(default = "default_container_width_px")]
    pub container_width_px: u32,

    /// Line height as a multiple of the font size
    #[serde(default = "default_line_height")]
    pub line_height: f32,

    /// Average glyph advance as a fraction of the font size
    #[serde(default = "default_advance_factor")]
    pub advance_factor: f32,

    /// Blank lines between paragraphs
    #[serde(default)]
    pub paragraph_gap_lines: u32,
}

fn default_font_size_px() -> f32 {
    DEFAULT_FONT_SIZE_PX
}

fn default_container_width_px() -> u32 {
    DEFAULT_CONTAINER_WIDTH_PX
}

fn default_line_height() -> f32 {
    DEFAULT_LINE_HEIGHT
}

fn default_advance_factor() -> f32 {
    DEFAULT_ADVANCE_FACTOR
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            font_size_px: default_font_size_px(),
            width: WidthClass::default(),
            font_family: None,
            container_width_px: default_container_width_px(),
            line_height: default_line_height(),
            advance_factor: default_advance_factor(),
            paragraph_gap_lines: 0,
        }
    }
}

impl ReaderConfig {
    /// Get the config file path: ~/.config/cli-programs/ereader.toml
    pub fn config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME").or_else(|_| std::env::var("USERPROFILE"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("cli-programs")
            .join("ereader.toml"))
    }

    /// Load config from file, returning default if file doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: ReaderConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn set_font_size(&mut self, px: f32) -> Result<()> {
        if !px.is_finite() || px <= 0.0 {
            bail!("Font size must be a positive number of pixels, got {px}");
        }
        self.font_size_px = px;
        Ok(())
    }

    pub fn set_container_width(&mut self, px: u32) -> Result<()> {
        if px == 0 {
            bail!("Container width must be at least 1 pixel");
        }
        self.container_width_px = px;
        Ok(())
    }

    /// Layout parameters from the saved settings.
    pub fn layout_params(&self) -> LayoutParams {
        let params = LayoutParams::new(self.font_size_px, self.width, self.container_width_px);
        match &self.font_family {
            Some(family) => params.with_font_family(family.clone()),
            None => params,
        }
    }

    /// Estimated-metrics provider tuned by the saved settings.
    pub fn metrics(&self) -> EstimatedMetrics {
        EstimatedMetrics::new()
            .with_line_height(LineHeight::Multiplier(self.line_height))
            .with_advance_factor(self.advance_factor)
            .with_paragraph_gap(self.paragraph_gap_lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = ReaderConfig::default();
        assert_eq!(config.font_size_px, 18.0);
        assert_eq!(config.width, WidthClass::Comfort);
        assert_eq!(config.container_width_px, 720);
        assert_eq!(config.line_height, 1.5);
        assert!(config.font_family.is_none());
    }

    #[test]
    fn test_config_path() {
        let path = ReaderConfig::config_path();
        assert!(path.is_ok());
        let path = path.unwrap();
        assert!(path.ends_with("cli-programs/ereader.toml"));
    }

    #[test]
    fn test_parse_config() {
        let toml_str = r#"
font_size_px = 22.0
width = "wide"
font_family = "Georgia"
container_width_px = 900
"#;
        let config: ReaderConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.font_size_px, 22.0);
        assert_eq!(config.width, WidthClass::Wide);
        assert_eq!(config.font_family.as_deref(), Some("Georgia"));
        assert_eq!(config.container_width_px, 900);
        assert_eq!(config.advance_factor, 0.6);
    }

    #[test]
    fn test_parse_empty_config() {
        let config: ReaderConfig = toml::from_str("").unwrap();
        assert_eq!(config, ReaderConfig::default());
    }

    #[test]
    fn test_unknown_width_is_rejected() {
        assert!(toml::from_str::<ReaderConfig>("width = \"huge\"").is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("ereader.toml");
        assert_eq!(ReaderConfig::load_from(&path).unwrap(), ReaderConfig::default());

        let mut config = ReaderConfig::default();
        config.set_font_size(24.0).unwrap();
        config.width = WidthClass::Narrow;
        config.save_to(&path).unwrap();

        let loaded = ReaderConfig::load_from(&path).unwrap();
        assert_eq!(loaded.font_size_px, 24.0);
        assert_eq!(loaded.width, WidthClass::Narrow);
    }

    #[test]
    fn test_setters_validate() {
        let mut config = ReaderConfig::default();
        assert!(config.set_font_size(0.0).is_err());
        assert!(config.set_font_size(f32::NAN).is_err());
        assert!(config.set_container_width(0).is_err());
        assert_eq!(config, ReaderConfig::default());
    }

    #[test]
    fn test_layout_params() {
        let config = ReaderConfig {
            font_family: Some("Georgia".to_string()),
            width: WidthClass::Wide,
            ..ReaderConfig::default()
        };
        let params = config.layout_params();
        assert_eq!(params.max_lines(), 32);
        assert_eq!(params.font_family.as_deref(), Some("Georgia"));
        assert_eq!(params.container_width_px, 720);
    }
}
