//! Layout parameters supplied by the reading UI.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{LayoutError, Result};

/// Line height used when the surface reports nothing usable, as a multiple of font size.
pub const DEFAULT_LINE_HEIGHT_MULTIPLIER: f32 = 1.5;

/// Reading column width preset; also decides how many lines a page may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidthClass {
    Narrow,
    #[default]
    Comfort,
    Wide,
}

impl WidthClass {
    /// Maximum rendered lines per page.
    pub fn max_lines(self) -> u32 {
        match self {
            Self::Narrow => 24,
            Self::Comfort => 28,
            Self::Wide => 32,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Narrow => "narrow",
            Self::Comfort => "comfort",
            Self::Wide => "wide",
        }
    }
}

impl fmt::Display for WidthClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WidthClass {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "narrow" => Ok(Self::Narrow),
            "comfort" => Ok(Self::Comfort),
            "wide" => Ok(Self::Wide),
            _ => Err(LayoutError::UnknownWidthClass(s.to_string())),
        }
    }
}

/// Everything that changes how a chapter is cut into pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutParams {
    pub font_size_px: f32,
    pub width_class: WidthClass,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// Zero while the host has not measured its container yet.
    pub container_width_px: u32,
}

impl LayoutParams {
    pub fn new(font_size_px: f32, width_class: WidthClass, container_width_px: u32) -> Self {
        Self {
            font_size_px,
            width_class,
            font_family: None,
            container_width_px,
        }
    }

    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    pub fn max_lines(&self) -> u32 {
        self.width_class.max_lines()
    }

    /// Check the parameters before a pass.
    ///
    /// A zero container width is a deferral, not a hard failure.
    pub fn validate(&self) -> Result<()> {
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(LayoutError::InvalidFontSize(self.font_size_px));
        }
        if self.container_width_px == 0 {
            return Err(LayoutError::LayoutPending);
        }
        Ok(())
    }

    /// The style handed to the measurement surface.
    pub fn text_style(&self) -> TextStyle {
        TextStyle {
            font_size_px: self.font_size_px,
            font_family: self.font_family.clone(),
            width_class: self.width_class,
            container_width_px: self.container_width_px,
        }
    }
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self::new(18.0, WidthClass::Comfort, 720)
    }
}

/// Style a scratch surface renders with.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font_size_px: f32,
    pub font_family: Option<String>,
    pub width_class: WidthClass,
    pub container_width_px: u32,
}

/// Line height as reported by a measurement surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineHeight {
    /// Concrete pixel value.
    Px(f32),
    /// Unitless multiplier of the font size.
    Multiplier(f32),
    /// Nothing usable (e.g. `normal`).
    Normal,
}

impl LineHeight {
    /// Resolve to pixels.
    pub fn resolve_px(self, font_size_px: f32) -> f32 {
        let usable = |v: f32| v.is_finite() && v > 0.0;
        match self {
            Self::Px(px) if usable(px) => px,
            Self::Multiplier(m) if usable(m) => m * font_size_px,
            _ => font_size_px * DEFAULT_LINE_HEIGHT_MULTIPLIER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_lines_policy() {
        assert_eq!(WidthClass::Narrow.max_lines(), 24);
        assert_eq!(WidthClass::Comfort.max_lines(), 28);
        assert_eq!(WidthClass::Wide.max_lines(), 32);
    }

    #[test]
    fn test_width_class_from_str() {
        assert_eq!("Narrow".parse::<WidthClass>().unwrap(), WidthClass::Narrow);
        assert_eq!(" wide ".parse::<WidthClass>().unwrap(), WidthClass::Wide);
        assert!(matches!(
            "huge".parse::<WidthClass>(),
            Err(LayoutError::UnknownWidthClass(_))
        ));
    }

    #[test]
    fn test_validate() {
        assert!(LayoutParams::default().validate().is_ok());

        let pending = LayoutParams::new(18.0, WidthClass::Wide, 0);
        assert_eq!(pending.validate(), Err(LayoutError::LayoutPending));

        let bad_font = LayoutParams::new(f32::NAN, WidthClass::Wide, 400);
        assert!(matches!(
            bad_font.validate(),
            Err(LayoutError::InvalidFontSize(_))
        ));
    }

    #[test]
    fn test_line_height_resolution() {
        assert_eq!(LineHeight::Px(27.0).resolve_px(18.0), 27.0);
        assert_eq!(LineHeight::Multiplier(2.0).resolve_px(16.0), 32.0);
        assert_eq!(LineHeight::Normal.resolve_px(20.0), 30.0);
        assert_eq!(LineHeight::Px(0.0).resolve_px(20.0), 30.0);
        assert_eq!(LineHeight::Multiplier(f32::INFINITY).resolve_px(10.0), 15.0);
    }

    #[test]
    fn test_text_style_carries_params() {
        let params = LayoutParams::new(16.0, WidthClass::Narrow, 320).with_font_family("Georgia");
        let style = params.text_style();
        assert_eq!(style.font_size_px, 16.0);
        assert_eq!(style.font_family.as_deref(), Some("Georgia"));
        assert_eq!(style.width_class, WidthClass::Narrow);
        assert_eq!(style.container_width_px, 320);
        assert_eq!(params.width_class.to_string(), "narrow");
    }
}
