//! The editor's mutually exclusive tools and their slider ranges.

use serde::{Deserialize, Serialize};

/// Value range for one tool's slider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderRange {
    pub min: f32,
    pub max: f32,
    pub default: f32,
}

impl SliderRange {
    /// Clamp `value` into `[min, max]`. NaN resets to the default.
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            self.default
        } else {
            value.clamp(self.min, self.max)
        }
    }

    pub fn contains(&self, value: f32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

const INTENSITY_RANGE: SliderRange = SliderRange {
    min: 0.0,
    max: 100.0,
    default: 100.0,
};

const MANUAL_RANGE: SliderRange = SliderRange {
    min: crate::adjustments::MANUAL_MIN,
    max: crate::adjustments::MANUAL_MAX,
    default: 0.0,
};

/// The active tool. `Filters` drives preset intensity; every other variant
/// drives one manual slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
    #[default]
    Filters,
    Brightness,
    Contrast,
    Saturation,
    Warmth,
    Highlights,
    Shadows,
}

impl EditMode {
    /// Human-readable label for toolbars.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Filters => "Filters",
            Self::Brightness => "Brightness",
            Self::Contrast => "Contrast",
            Self::Saturation => "Saturation",
            Self::Warmth => "Warmth",
            Self::Highlights => "Highlights",
            Self::Shadows => "Shadows",
        }
    }

    /// Slider range metadata for this tool.
    pub const fn range(&self) -> SliderRange {
        match self {
            Self::Filters => INTENSITY_RANGE,
            _ => MANUAL_RANGE,
        }
    }

    /// All tools in toolbar order.
    pub fn all() -> &'static [Self] {
        const ALL: [EditMode; 7] = [
            EditMode::Filters,
            EditMode::Brightness,
            EditMode::Contrast,
            EditMode::Saturation,
            EditMode::Warmth,
            EditMode::Highlights,
            EditMode::Shadows,
        ];
        &ALL
    }

    /// Format a slider value for display: `"75%"` for intensity, a signed
    /// whole number (`"+20"`, `"0"`, `"-15"`) for manual sliders.
    pub fn format_value(&self, value: f32) -> String {
        let whole = value.round() as i32;
        match self {
            Self::Filters => format!("{whole}%"),
            _ if whole > 0 => format!("+{whole}"),
            _ => format!("{whole}"),
        }
    }
}

impl std::str::FromStr for EditMode {
    type Err = UnknownEditMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|mode| mode.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownEditMode(s.to_string()))
    }
}

/// Returned when parsing a tool name that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown edit mode: {0}")]
pub struct UnknownEditMode(pub String);
