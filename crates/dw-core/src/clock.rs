/// Seconds per simulated day when none is configured.
pub const DEFAULT_DAY_LENGTH: f64 = 600.0;

/// Tracks the simulated time of day as a fraction in `[0, 1)`.
///
/// Advanced only by the `dt` handed to each update, never by wall-clock
/// time, so fast-forwarding and determinism in tests are trivial.
/// `0.0` is midnight, `0.5` is noon.
#[derive(Debug, Clone)]
pub struct DayClock {
    time_of_day: f64,
    day_length: f64,
}

/// Snapshot of the atmospheric signals derived from the clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtmosphericData {
    /// Fraction of the day in `[0, 1)`; `0.5` is noon.
    pub time_of_day: f64,
    /// Sunlight contribution in `[0, 1]`; zero through the night.
    pub sun_intensity: f64,
}

impl DayClock {
    /// Create a clock at midnight with the given day length in seconds.
    pub fn new(day_length: f64) -> Self {
        Self::starting_at(0.0, day_length)
    }

    /// Create a clock at an arbitrary point of the day.
    ///
    /// `time_of_day` is wrapped into `[0, 1)`.
    pub fn starting_at(time_of_day: f64, day_length: f64) -> Self {
        Self {
            time_of_day: time_of_day.rem_euclid(1.0),
            day_length: day_length.max(f64::EPSILON),
        }
    }

    /// Advance the clock by `dt` simulated seconds, wrapping at day's end.
    pub fn advance(&mut self, dt: f64) {
        self.time_of_day = (self.time_of_day + dt / self.day_length).rem_euclid(1.0);
    }

    /// Current fraction of the day in `[0, 1)`.
    pub fn time_of_day(&self) -> f64 {
        self.time_of_day
    }

    /// Configured seconds per simulated day.
    pub fn day_length(&self) -> f64 {
        self.day_length
    }

    /// True in the night band of the day cycle.
    pub fn is_night(&self) -> bool {
        self.time_of_day > 0.8 || self.time_of_day < 0.2
    }

    /// Current atmospheric signals.
    pub fn atmospheric_data(&self) -> AtmosphericData {
        // Sun follows a half-sine arc peaking at noon.
        let sun = (std::f64::consts::TAU * (self.time_of_day - 0.25))
            .sin()
            .max(0.0);
        AtmosphericData {
            time_of_day: self.time_of_day,
            sun_intensity: sun,
        }
    }
}

impl Default for DayClock {
    fn default() -> Self {
        Self::new(DEFAULT_DAY_LENGTH)
    }
}
