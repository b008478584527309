use serde::{Deserialize, Serialize};

use crate::error::{TimelineError, TimelineResult};
use crate::interaction::TimeframePreset;
use crate::layout::LayoutConfig;

/// Public engine bootstrap configuration.
///
/// Serializable so host applications can persist/load timeline setup
/// without inventing their own format. Pixel scale comes from the zoom
/// preset; the remaining fields feed [`LayoutConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEngineConfig {
    #[serde(default)]
    pub timeframe: TimeframePreset,
    #[serde(default = "default_min_item_width_px")]
    pub min_item_width_px: f64,
    #[serde(default = "default_label_character_px")]
    pub label_character_px: f64,
    #[serde(default = "default_label_padding_px")]
    pub label_padding_px: f64,
    #[serde(default = "default_max_overflow_days")]
    pub max_overflow_days: u32,
}

impl Default for TimelineEngineConfig {
    fn default() -> Self {
        Self {
            timeframe: TimeframePreset::default(),
            min_item_width_px: default_min_item_width_px(),
            label_character_px: default_label_character_px(),
            label_padding_px: default_label_padding_px(),
            max_overflow_days: default_max_overflow_days(),
        }
    }
}

impl TimelineEngineConfig {
    /// Sets the initial zoom preset.
    #[must_use]
    pub fn with_timeframe(mut self, timeframe: TimeframePreset) -> Self {
        self.timeframe = timeframe;
        self
    }

    #[must_use]
    pub fn with_min_item_width_px(mut self, min_item_width_px: f64) -> Self {
        self.min_item_width_px = min_item_width_px;
        self
    }

    #[must_use]
    pub fn with_label_metrics(mut self, character_px: f64, padding_px: f64) -> Self {
        self.label_character_px = character_px;
        self.label_padding_px = padding_px;
        self
    }

    #[must_use]
    pub fn with_max_overflow_days(mut self, max_overflow_days: u32) -> Self {
        self.max_overflow_days = max_overflow_days;
        self
    }

    /// Layout inputs at the given scale.
    #[must_use]
    pub fn layout_config(self, px_per_day: f64) -> LayoutConfig {
        LayoutConfig {
            px_per_day,
            min_item_width_px: self.min_item_width_px,
            label_character_px: self.label_character_px,
            label_padding_px: self.label_padding_px,
            max_overflow_days: self.max_overflow_days,
        }
    }

    pub fn validate(self) -> TimelineResult<Self> {
        self.layout_config(self.timeframe.px_per_day()).validate()?;
        Ok(self)
    }

    pub fn from_json_str(input: &str) -> TimelineResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            TimelineError::InvalidConfig(format!("failed to parse engine config json: {e}"))
        })?;
        config.validate()
    }

    pub fn to_json_pretty(self) -> TimelineResult<String> {
        serde_json::to_string_pretty(&self).map_err(|e| {
            TimelineError::InvalidConfig(format!("failed to serialize engine config json: {e}"))
        })
    }
}

fn default_min_item_width_px() -> f64 {
    96.0
}

fn default_label_character_px() -> f64 {
    7.0
}

fn default_label_padding_px() -> f64 {
    28.0
}

fn default_max_overflow_days() -> u32 {
    3
}
