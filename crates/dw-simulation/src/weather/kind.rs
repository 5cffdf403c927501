use std::fmt;

use serde::{Deserialize, Serialize};

use dw_core::EffectHandle;

/// The atmospheric states the engine cycles through.
///
/// The set is closed: an unknown kind is unrepresentable, so the "unknown
/// identifier is a no-op" rule only ever applies to zone lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeatherKind {
    /// No weather effect; the fallback of every selection.
    Clear,
    /// Rain particles and lightning bolts.
    Storm,
    /// Swaying snow sprites.
    Snow,
    /// Low fog driven by a time accumulator.
    Mist,
    /// Visual distortion driven by a time accumulator.
    Glitch,
}

impl WeatherKind {
    /// Every kind, in the fixed order used for weighted selection.
    pub const ALL: [WeatherKind; 5] = [
        WeatherKind::Clear,
        WeatherKind::Storm,
        WeatherKind::Snow,
        WeatherKind::Mist,
        WeatherKind::Glitch,
    ];

    /// Baseline selection weight, before time-of-day shaping.
    pub fn base_weight(self) -> f64 {
        match self {
            Self::Clear => 0.4,
            Self::Storm => 0.2,
            Self::Snow => 0.15,
            Self::Mist => 0.15,
            Self::Glitch => 0.1,
        }
    }

    /// Time-of-day multiplier applied to the base weight.
    ///
    /// Storms favor the night, snow the colder shoulders of the day, mist
    /// the hours around dawn.
    pub fn time_multiplier(self, time_of_day: f64) -> f64 {
        match self {
            Self::Storm => {
                if time_of_day > 0.8 || time_of_day < 0.2 {
                    2.0
                } else {
                    1.0
                }
            }
            Self::Snow => {
                if time_of_day > 0.7 || time_of_day < 0.3 {
                    1.5
                } else {
                    1.0
                }
            }
            Self::Mist => {
                if time_of_day > 0.05 && time_of_day < 0.25 {
                    2.0
                } else {
                    1.0
                }
            }
            Self::Clear | Self::Glitch => 1.0,
        }
    }

    /// Selection weight at the given time of day.
    pub fn effective_weight(self, time_of_day: f64) -> f64 {
        self.base_weight() * self.time_multiplier(time_of_day)
    }

    /// The visual resource this kind attaches, if any.
    pub fn effect_handle(self) -> Option<EffectHandle> {
        match self {
            Self::Clear => None,
            Self::Storm => Some(EffectHandle::new("weather/storm")),
            Self::Snow => Some(EffectHandle::new("weather/snow")),
            Self::Mist => Some(EffectHandle::new("weather/mist")),
            Self::Glitch => Some(EffectHandle::new("weather/glitch")),
        }
    }

    /// Lowercase display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Storm => "storm",
            Self::Snow => "snow",
            Self::Mist => "mist",
            Self::Glitch => "glitch",
        }
    }
}

impl fmt::Display for WeatherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// All kinds with their weights at the given time of day, in the fixed
/// selection order.
pub fn shaped_weights(time_of_day: f64) -> [(WeatherKind, f64); 5] {
    WeatherKind::ALL.map(|kind| (kind, kind.effective_weight(time_of_day)))
}
