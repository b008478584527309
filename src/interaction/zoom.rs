use serde::{Deserialize, Serialize};

/// Named zoom levels, ordered from most to least zoomed-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeframePreset {
    Week,
    #[default]
    TwoWeek,
    Month,
}

impl TimeframePreset {
    pub const ALL: [TimeframePreset; 3] = [Self::Week, Self::TwoWeek, Self::Month];

    #[must_use]
    pub fn px_per_day(self) -> f64 {
        match self {
            Self::Week => 68.0,
            Self::TwoWeek => 52.0,
            Self::Month => 38.0,
        }
    }

    /// Stable value used by host selectors.
    #[must_use]
    pub fn value(self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::TwoWeek => "two-week",
            Self::Month => "month",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Week => "Week",
            Self::TwoWeek => "2 week",
            Self::Month => "Month",
        }
    }

    #[must_use]
    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|preset| preset.value() == value)
    }

    fn index(self) -> usize {
        match self {
            Self::Week => 0,
            Self::TwoWeek => 1,
            Self::Month => 2,
        }
    }
}

/// Current zoom level; zooming in moves towards [`TimeframePreset::Week`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ZoomState {
    preset: TimeframePreset,
}

impl ZoomState {
    #[must_use]
    pub fn new(preset: TimeframePreset) -> Self {
        Self { preset }
    }

    #[must_use]
    pub fn preset(self) -> TimeframePreset {
        self.preset
    }

    #[must_use]
    pub fn px_per_day(self) -> f64 {
        self.preset.px_per_day()
    }

    #[must_use]
    pub fn can_zoom_in(self) -> bool {
        self.preset.index() > 0
    }

    #[must_use]
    pub fn can_zoom_out(self) -> bool {
        self.preset.index() + 1 < TimeframePreset::ALL.len()
    }

    /// Returns `true` when the level changed.
    pub fn zoom_in(&mut self) -> bool {
        if !self.can_zoom_in() {
            return false;
        }
        self.preset = TimeframePreset::ALL[self.preset.index() - 1];
        true
    }

    /// Returns `true` when the level changed.
    pub fn zoom_out(&mut self) -> bool {
        if !self.can_zoom_out() {
            return false;
        }
        self.preset = TimeframePreset::ALL[self.preset.index() + 1];
        true
    }

    /// Selects a preset by its host value; unknown values are ignored.
    ///
    /// Returns `true` when the level changed.
    pub fn select(&mut self, value: &str) -> bool {
        match TimeframePreset::from_value(value) {
            Some(preset) if preset != self.preset => {
                self.preset = preset;
                true
            }
            _ => false,
        }
    }

    /// Toolbar readout, e.g. `"52px / day"`.
    #[must_use]
    pub fn zoom_label(self) -> String {
        format!("{}px / day", self.px_per_day())
    }
}
