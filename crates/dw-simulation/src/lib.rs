//! Zone trigger state machine and probabilistic weather engine.
//!
//! The world reacts to a moving [`Vehicle`](dw_core::Vehicle) and to
//! elapsed simulated time: spherical zones fire enter/active/exit
//! behaviors as the vehicle crosses them, and a weather engine cycles
//! through atmospheric kinds with weights shaped by the time of day,
//! running a particle simulation for whichever kind is active.
//!
//! Everything is single-threaded and advanced only by the `dt` handed to
//! [`Simulation::update`]; with a fixed seed and fixed `dt` sequence a run
//! replays exactly.

/// Tunable simulation parameters.
pub mod config;
/// Mutable context passed to the engines each tick.
pub mod context;
/// Error types for the simulation crate.
pub mod error;
/// Simulation event types and the event log.
pub mod event;
/// Simulated-time deferred work.
pub mod scheduler;
/// Weighted random selection.
pub mod selector;
/// Top-level simulation orchestrator.
pub mod simulation;
/// Weather cycling and per-kind particle simulations.
pub mod weather;
/// Trigger zones, their behaviors, and the zone engine.
pub mod zone;

/// Re-export of [`config::SimConfig`].
pub use config::SimConfig;
/// Re-export of [`context::SimContext`].
pub use context::SimContext;
/// Re-exports of [`error::SimError`] and [`error::SimResult`].
pub use error::{SimError, SimResult};
/// Re-exports of [`event::EventLog`], [`event::SimEvent`], and [`event::SimEventKind`].
pub use event::{EventLog, SimEvent, SimEventKind};
/// Re-export of [`scheduler::TaskList`].
pub use scheduler::TaskList;
/// Re-export of [`simulation::Simulation`].
pub use simulation::Simulation;
/// Re-exports of the weather engine surface.
pub use weather::{WeatherEngine, WeatherInfo, WeatherKind};
/// Re-exports of the zone engine surface.
pub use zone::{ZoneBehavior, ZoneEffect, ZoneId, ZoneRegistry, ZoneTriggerEngine};
