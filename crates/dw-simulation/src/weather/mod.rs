//! Probabilistic weather cycling and per-kind particle simulations.

mod effect;
mod engine;
mod kind;
mod snow;
mod storm;

pub use effect::{TimeAccumulator, WeatherEffectState};
pub use engine::{WeatherEngine, WeatherInfo};
pub use kind::{WeatherKind, shaped_weights};
pub use snow::{SnowSprite, SnowState};
pub use storm::{LightningBolt, StormState};
