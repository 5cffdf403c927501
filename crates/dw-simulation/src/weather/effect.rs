use rand::rngs::StdRng;

use crate::weather::snow::SnowState;
use crate::weather::storm::StormState;

/// Monotonic timer feeding a continuous visual function.
///
/// Mist and glitch have no discrete events; their renderers sample this
/// accumulator.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TimeAccumulator {
    elapsed: f64,
}

impl TimeAccumulator {
    /// Create a zeroed accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `dt` simulated seconds.
    pub fn advance(&mut self, dt: f64) {
        self.elapsed += dt;
    }

    /// Total accumulated seconds.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}

/// Per-kind simulation state, tagged by kind.
#[derive(Debug, Clone)]
pub enum WeatherEffectState {
    /// No simulation (clear skies).
    None,
    /// Rain particles and lightning.
    Storm(StormState),
    /// Snow sprites.
    Snow(SnowState),
    /// Fog accumulator.
    Mist(TimeAccumulator),
    /// Distortion accumulator.
    Glitch(TimeAccumulator),
}

impl WeatherEffectState {
    /// Advance whatever simulation this state carries.
    pub fn simulate(&mut self, dt: f64, rng: &mut StdRng) {
        match self {
            Self::None => {}
            Self::Storm(storm) => storm.simulate(dt, rng),
            Self::Snow(snow) => snow.simulate(dt, rng),
            Self::Mist(acc) | Self::Glitch(acc) => acc.advance(dt),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn accumulator_is_monotonic() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut state = WeatherEffectState::Mist(TimeAccumulator::new());
        state.simulate(0.3, &mut rng);
        state.simulate(0.2, &mut rng);
        let WeatherEffectState::Mist(acc) = state else {
            unreachable!();
        };
        assert!((acc.elapsed() - 0.5).abs() < 1e-12);
    }
}
