use serde::{Deserialize, Serialize};

use dw_core::clock::DEFAULT_DAY_LENGTH;

/// Tunable parameters for a [`Simulation`](crate::Simulation).
///
/// `Default` gives the stock world; `with_*` builders override individual
/// knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Seed for the simulation's random number generator.
    pub seed: u64,
    /// Bounds in seconds for the delay between natural weather changes.
    pub weather_change_range: (f64, f64),
    /// Seconds until the next natural change after meditation ends.
    pub resume_countdown: f64,
    /// Number of rain particles in a storm.
    pub storm_particles: usize,
    /// Number of lightning bolts in a storm.
    pub storm_bolts: usize,
    /// Number of snow sprites in snowfall.
    pub snow_sprites: usize,
    /// Height of the particle volume above the ground plane.
    pub sky_ceiling: f64,
    /// Seconds per simulated day.
    pub day_length: f64,
    /// Event log cap; zero keeps everything.
    pub max_events: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            weather_change_range: (60.0, 360.0),
            resume_countdown: 30.0,
            storm_particles: 120,
            storm_bolts: 3,
            snow_sprites: 80,
            sky_ceiling: 60.0,
            day_length: DEFAULT_DAY_LENGTH,
            max_events: 0,
        }
    }
}

impl SimConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the bounds for the natural weather-change delay.
    pub fn with_weather_change_range(mut self, min: f64, max: f64) -> Self {
        self.weather_change_range = (min, max.max(min));
        self
    }

    /// Set the delay before weather resumes after meditation.
    pub fn with_resume_countdown(mut self, seconds: f64) -> Self {
        self.resume_countdown = seconds;
        self
    }

    /// Set storm particle and bolt counts.
    pub fn with_storm_density(mut self, particles: usize, bolts: usize) -> Self {
        self.storm_particles = particles;
        self.storm_bolts = bolts;
        self
    }

    /// Set the snow sprite count.
    pub fn with_snow_sprites(mut self, sprites: usize) -> Self {
        self.snow_sprites = sprites;
        self
    }

    /// Set the height of the particle volume.
    pub fn with_sky_ceiling(mut self, ceiling: f64) -> Self {
        self.sky_ceiling = ceiling;
        self
    }

    /// Set the seconds per simulated day.
    pub fn with_day_length(mut self, seconds: f64) -> Self {
        self.day_length = seconds;
        self
    }

    /// Cap the event log at `max_events` entries; zero keeps everything.
    pub fn with_max_events(mut self, max_events: usize) -> Self {
        self.max_events = max_events;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_single_knob() {
        let config = SimConfig::default().with_seed(7).with_sky_ceiling(100.0);
        assert_eq!(config.seed, 7);
        assert_eq!(config.sky_ceiling, 100.0);
        assert_eq!(config.storm_particles, 120);
    }

    #[test]
    fn change_range_keeps_max_at_least_min() {
        let config = SimConfig::default().with_weather_change_range(50.0, 10.0);
        assert_eq!(config.weather_change_range, (50.0, 50.0));
    }
}
