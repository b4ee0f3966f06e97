//! Themes — descriptors, the applier, and the selectable catalog.
//!
//! A [`ThemeDescriptor`] is a flat bag of opaque CSS-like strings keyed by
//! semantic slot. Nothing here validates the values; rendering them is the
//! collaborator's job. Keys use the camelCase names of the theme JSON
//! (`backgroundColor`, `studentCardSelectedBackground`, ...). Any key a
//! descriptor omits takes the default theme's value, except the headline
//! size and color, which fall back to fixed constants.

pub mod applier;
pub mod catalog;
pub mod error;

use serde::{Deserialize, Serialize};
use tracing::warn;

pub use applier::{CardStyle, Property, Target, ThemeApplier, VisualAssignments};
pub use catalog::ThemeCatalog;
pub use error::{ThemeError, ThemeResult};

/// Name of the built-in theme.
pub const DEFAULT_THEME_NAME: &str = "默认主题";

/// Fallback for an empty `nameDisplaySize`.
pub const DEFAULT_NAME_DISPLAY_SIZE: &str = "6vw";

/// Fallback for an empty `nameDisplayColor` (headline and card text).
pub const DEFAULT_TEXT_COLOR: &str = "#333";

/// Text color of the selected student card, for contrast.
pub const SELECTED_CARD_TEXT_COLOR: &str = "#0a1128";

/// Shadow applied to the start/stop buttons.
pub const BUTTON_SHADOW: &str = "0 8px 25px rgba(0,0,0,0.4)";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeDescriptor {
    pub theme_name: String,
    /// Page background. A gradient or `url(...)` makes the container
    /// transparent.
    pub background_color: String,
    pub container_background_color: String,
    pub display_area_background_color: String,
    pub display_area_border_color: String,
    /// Absent or empty resolves to [`DEFAULT_TEXT_COLOR`].
    #[serde(default)]
    pub name_display_color: String,
    /// Absent or empty resolves to [`DEFAULT_NAME_DISPLAY_SIZE`].
    #[serde(default)]
    pub name_display_size: String,
    pub start_btn_background: String,
    pub start_btn_border_color: String,
    pub stop_btn_background: String,
    pub stop_btn_border_color: String,
    pub student_card_background: String,
    pub student_card_border_color: String,
    pub student_card_selected_background: String,
    pub student_card_selected_border_color: String,
    pub footer_background_color: String,
}

impl Default for ThemeDescriptor {
    fn default() -> Self {
        Self {
            theme_name: DEFAULT_THEME_NAME.into(),
            background_color: "linear-gradient(135deg, #f6d365, #fda085)".into(),
            container_background_color: "rgba(255, 255, 255, 0.8)".into(),
            display_area_background_color: "linear-gradient(45deg, #e0e0e0, #f9f9f9)".into(),
            display_area_border_color: "rgba(100, 100, 100, 0.5)".into(),
            name_display_color: "#333333".into(),
            name_display_size: "5.5rem".into(),
            start_btn_background: "linear-gradient(135deg, #4CAF50, #8BC34A)".into(),
            start_btn_border_color: "rgba(139, 195, 74, 0.5)".into(),
            stop_btn_background: "linear-gradient(135deg, #FF5722, #FF9800)".into(),
            stop_btn_border_color: "rgba(255, 152, 0, 0.5)".into(),
            student_card_background: "rgba(255, 255, 255, 0.9)".into(),
            student_card_border_color: "rgba(200, 200, 200, 0.6)".into(),
            student_card_selected_background: "rgba(76, 175, 80, 0.8)".into(),
            student_card_selected_border_color: "rgba(76, 175, 80, 0.9)".into(),
            footer_background_color: "rgba(245, 245, 245, 0.7)".into(),
        }
    }
}

impl ThemeDescriptor {
    /// Parse a single descriptor from JSON.
    pub fn from_json(raw: &str) -> ThemeResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn to_json(&self) -> ThemeResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Whether the page background is an image layer (gradient or URL)
    /// rather than a plain color.
    pub fn has_image_background(&self) -> bool {
        is_image_value(&self.background_color)
    }

    /// Headline size, falling back when unset.
    pub fn name_display_size_or_default(&self) -> &str {
        non_empty_or(&self.name_display_size, DEFAULT_NAME_DISPLAY_SIZE)
    }

    /// Headline and card text color, falling back when unset.
    pub fn text_color_or_default(&self) -> &str {
        non_empty_or(&self.name_display_color, DEFAULT_TEXT_COLOR)
    }
}

/// Selection boundary: parse a descriptor, or fall back to the default.
pub fn select_theme(raw: &str) -> ThemeDescriptor {
    match ThemeDescriptor::from_json(raw) {
        Ok(theme) => theme,
        Err(e) => {
            warn!("theme selection failed, using default: {e}");
            ThemeDescriptor::default()
        }
    }
}

/// CSS values that paint an image layer instead of a color.
pub fn is_image_value(value: &str) -> bool {
    value.contains("gradient") || value.contains("url(")
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}
