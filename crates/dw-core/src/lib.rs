//! Collaborator boundary for Driftwelt.
//!
//! This crate defines the types the simulation consumes from and exposes to
//! its host: the moving [`Vehicle`], the simulated [`DayClock`], and the
//! [`Renderer`] and [`Narrator`] traits through which visual and narrative
//! effects leave the simulation. It holds no simulation state of its own —
//! the engines in `dw-simulation` borrow these types each tick.

/// Simulated time-of-day signal.
pub mod clock;
/// Error types for renderer interactions.
pub mod error;
/// Narrator collaborator notified on zone entry and exit.
pub mod narrator;
/// Renderer collaborator that attaches and detaches visual resources.
pub mod render;
/// The moving agent the world reacts to.
pub mod vehicle;

/// Re-exports of [`clock::AtmosphericData`] and [`clock::DayClock`].
pub use clock::{AtmosphericData, DayClock};
/// Re-exports of [`error::RenderError`] and [`error::RenderResult`].
pub use error::{RenderError, RenderResult};
/// Re-exports of the narrator trait and its stock implementations.
pub use narrator::{Narrator, NarratorCall, NullNarrator, RecordingNarrator};
/// Re-exports of the renderer trait and its stock implementations.
pub use render::{
    EffectHandle, NullRenderer, RecordingRenderer, RejectingRenderer, RenderOp, Renderer,
};
/// Re-export of [`vehicle::Vehicle`].
pub use vehicle::Vehicle;
