use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{TimelineError, TimelineResult};

pub const DEFAULT_PX_PER_DAY: f64 = 48.0;
pub const DEFAULT_MIN_ITEM_WIDTH_PX: f64 = 72.0;
pub const DEFAULT_LABEL_CHARACTER_PX: f64 = 7.0;
pub const DEFAULT_LABEL_PADDING_PX: f64 = 24.0;
pub const DEFAULT_MAX_OVERFLOW_DAYS: u32 = 3;

const MIN_PX_PER_DAY: f64 = 1.0;
const MIN_ITEM_WIDTH_FLOOR_PX: f64 = 4.0;
const MIN_LABEL_CHARACTER_PX: f64 = 1.0;

/// Geometry inputs for lane layout.
///
/// Values outside their documented range are never an error for the layout
/// engine: [`LayoutConfig::sanitized`] swaps each offending field for its
/// default. [`LayoutConfig::validate`] is available for hosts that prefer to
/// reject bad input up front.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Pixels per calendar day, `>= 1`.
    #[serde(default = "default_px_per_day")]
    pub px_per_day: f64,
    /// Minimum rendered box width regardless of duration, `>= 4`.
    #[serde(default = "default_min_item_width_px")]
    pub min_item_width_px: f64,
    /// Approximate width of one label character, `>= 1`.
    #[serde(default = "default_label_character_px")]
    pub label_character_px: f64,
    /// Extra pixels reserved around the label text, `>= 0`.
    #[serde(default = "default_label_padding_px")]
    pub label_padding_px: f64,
    /// How many days a box may grow past its real duration to fit a label.
    #[serde(default = "default_max_overflow_days")]
    pub max_overflow_days: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            px_per_day: DEFAULT_PX_PER_DAY,
            min_item_width_px: DEFAULT_MIN_ITEM_WIDTH_PX,
            label_character_px: DEFAULT_LABEL_CHARACTER_PX,
            label_padding_px: DEFAULT_LABEL_PADDING_PX,
            max_overflow_days: DEFAULT_MAX_OVERFLOW_DAYS,
        }
    }
}

impl LayoutConfig {
    #[must_use]
    pub fn with_px_per_day(mut self, px_per_day: f64) -> Self {
        self.px_per_day = px_per_day;
        self
    }

    #[must_use]
    pub fn with_min_item_width_px(mut self, min_item_width_px: f64) -> Self {
        self.min_item_width_px = min_item_width_px;
        self
    }

    #[must_use]
    pub fn with_label_character_px(mut self, label_character_px: f64) -> Self {
        self.label_character_px = label_character_px;
        self
    }

    #[must_use]
    pub fn with_label_padding_px(mut self, label_padding_px: f64) -> Self {
        self.label_padding_px = label_padding_px;
        self
    }

    #[must_use]
    pub fn with_max_overflow_days(mut self, max_overflow_days: u32) -> Self {
        self.max_overflow_days = max_overflow_days;
        self
    }

    /// Replaces every non-finite or out-of-range field with its default.
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self {
            px_per_day: at_least(self.px_per_day, MIN_PX_PER_DAY, DEFAULT_PX_PER_DAY),
            min_item_width_px: at_least(
                self.min_item_width_px,
                MIN_ITEM_WIDTH_FLOOR_PX,
                DEFAULT_MIN_ITEM_WIDTH_PX,
            ),
            label_character_px: at_least(
                self.label_character_px,
                MIN_LABEL_CHARACTER_PX,
                DEFAULT_LABEL_CHARACTER_PX,
            ),
            label_padding_px: at_least(self.label_padding_px, 0.0, DEFAULT_LABEL_PADDING_PX),
            max_overflow_days: self.max_overflow_days,
        }
    }

    pub fn validate(self) -> TimelineResult<Self> {
        for (value, min, name) in [
            (self.px_per_day, MIN_PX_PER_DAY, "px_per_day"),
            (
                self.min_item_width_px,
                MIN_ITEM_WIDTH_FLOOR_PX,
                "min_item_width_px",
            ),
            (
                self.label_character_px,
                MIN_LABEL_CHARACTER_PX,
                "label_character_px",
            ),
            (self.label_padding_px, 0.0, "label_padding_px"),
        ] {
            if !value.is_finite() || value < min {
                return Err(TimelineError::InvalidConfig(format!(
                    "layout config `{name}` must be finite and >= {min}"
                )));
            }
        }
        Ok(self)
    }

    /// Reads a loosely-typed option object.
    ///
    /// Both `camelCase` and `snake_case` keys are recognised. Missing,
    /// non-numeric or out-of-range values fall back to defaults, unknown keys
    /// are ignored, and a non-object payload yields the defaults.
    #[must_use]
    pub fn from_json_value(value: &Value) -> Self {
        let Some(options) = value.as_object() else {
            debug!("layout options are not an object; using defaults");
            return Self::default();
        };
        let number = |camel: &str, snake: &str| {
            options
                .get(camel)
                .or_else(|| options.get(snake))
                .and_then(Value::as_f64)
        };

        let defaults = Self::default();
        let max_overflow_days = number("maxOverflowDays", "max_overflow_days")
            .filter(|days| days.is_finite() && *days >= 0.0)
            .map_or(defaults.max_overflow_days, |days| {
                days.floor().min(f64::from(u32::MAX)) as u32
            });

        Self {
            px_per_day: number("pxPerDay", "px_per_day").unwrap_or(defaults.px_per_day),
            min_item_width_px: number("minItemWidthPx", "min_item_width_px")
                .unwrap_or(defaults.min_item_width_px),
            label_character_px: number("labelCharacterPx", "label_character_px")
                .unwrap_or(defaults.label_character_px),
            label_padding_px: number("labelPaddingPx", "label_padding_px")
                .unwrap_or(defaults.label_padding_px),
            max_overflow_days,
        }
        .sanitized()
    }
}

fn at_least(value: f64, min: f64, fallback: f64) -> f64 {
    if value.is_finite() && value >= min {
        value
    } else {
        fallback
    }
}

fn default_px_per_day() -> f64 {
    DEFAULT_PX_PER_DAY
}

fn default_min_item_width_px() -> f64 {
    DEFAULT_MIN_ITEM_WIDTH_PX
}

fn default_label_character_px() -> f64 {
    DEFAULT_LABEL_CHARACTER_PX
}

fn default_label_padding_px() -> f64 {
    DEFAULT_LABEL_PADDING_PX
}

fn default_max_overflow_days() -> u32 {
    DEFAULT_MAX_OVERFLOW_DAYS
}
