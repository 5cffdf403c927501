use rand::Rng;
use rand::rngs::StdRng;

use crate::config::SimConfig;
use crate::context::SimContext;
use crate::event::SimEventKind;
use crate::scheduler::TaskList;
use crate::selector::pick_weighted;
use crate::weather::effect::{TimeAccumulator, WeatherEffectState};
use crate::weather::kind::{WeatherKind, shaped_weights};
use crate::weather::snow::SnowState;
use crate::weather::storm::StormState;

/// Snapshot of the current weather, for hosts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherInfo {
    /// The active kind.
    pub kind: WeatherKind,
    /// Intensity in `[0, 1]`.
    pub intensity: f64,
    /// Seconds since the last kind change.
    pub duration: f64,
}

/// One weather kind and its simulation state.
///
/// Slots are created once at construction and live for the engine's
/// lifetime; only their buffers and timers mutate.
#[derive(Debug)]
struct WeatherSlot {
    kind: WeatherKind,
    effect: WeatherEffectState,
}

/// Probabilistic weather cycling and per-kind simulation.
///
/// A countdown drawn from a uniform range triggers each natural change;
/// the replacement kind is drawn with weights shaped by the time of day.
/// Exactly one kind has its effect resource attached at a time, and the
/// outgoing resource is always detached before the incoming one attaches.
#[derive(Debug)]
pub struct WeatherEngine {
    slots: Vec<WeatherSlot>,
    current: WeatherKind,
    intensity: f64,
    weather_duration: f64,
    transition_elapsed: f64,
    next_change: f64,
    reverts: TaskList<WeatherKind>,
    change_range: (f64, f64),
    resume_countdown: f64,
}

impl WeatherEngine {
    /// Create an engine starting in clear weather, with all per-kind
    /// simulation buffers seeded from `rng`.
    pub fn new(config: &SimConfig, rng: &mut StdRng) -> Self {
        let slots = WeatherKind::ALL
            .into_iter()
            .map(|kind| WeatherSlot {
                kind,
                effect: match kind {
                    WeatherKind::Clear => WeatherEffectState::None,
                    WeatherKind::Storm => WeatherEffectState::Storm(StormState::new(
                        config.storm_particles,
                        config.storm_bolts,
                        config.sky_ceiling,
                        rng,
                    )),
                    WeatherKind::Snow => WeatherEffectState::Snow(SnowState::new(
                        config.snow_sprites,
                        config.sky_ceiling,
                        rng,
                    )),
                    WeatherKind::Mist => WeatherEffectState::Mist(TimeAccumulator::new()),
                    WeatherKind::Glitch => WeatherEffectState::Glitch(TimeAccumulator::new()),
                },
            })
            .collect();
        let (min, max) = config.weather_change_range;
        Self {
            slots,
            current: WeatherKind::Clear,
            intensity: 1.0,
            weather_duration: 0.0,
            transition_elapsed: 0.0,
            // Inclusive: a degenerate range (min == max) is a fixed cadence,
            // not a panic.
            next_change: rng.random_range(min..=max),
            reverts: TaskList::new(),
            change_range: config.weather_change_range,
            resume_countdown: config.resume_countdown,
        }
    }

    /// Advance the weather by `dt` simulated seconds.
    pub fn update(&mut self, dt: f64, ctx: &mut SimContext<'_>) {
        self.next_change -= dt;
        self.weather_duration += dt;
        self.transition_elapsed += dt;

        for kind in self.reverts.advance(dt) {
            self.change_weather(kind, 1.0, ctx);
        }

        if self.next_change <= 0.0 {
            let picked = pick_weighted(
                ctx.rng,
                &shaped_weights(ctx.clock.time_of_day()),
                WeatherKind::Clear,
            );
            self.change_weather(picked, 1.0, ctx);
            let (min, max) = self.change_range;
            self.next_change = ctx.rng.random_range(min..=max);
        }

        // The active kind's simulation runs every tick, change or not.
        if let Some(slot) = self.slots.iter_mut().find(|s| s.kind == self.current) {
            slot.effect.simulate(dt, ctx.rng);
        }
    }

    /// Switch to `kind` at the given intensity.
    ///
    /// A switch to the current kind is a no-op that leaves all counters
    /// untouched. Otherwise the outgoing kind's resource is detached
    /// before the incoming one attaches.
    pub fn change_weather(&mut self, kind: WeatherKind, intensity: f64, ctx: &mut SimContext<'_>) {
        if kind == self.current {
            return;
        }
        if let Some(effect) = self.current.effect_handle() {
            ctx.detach_effect(&effect);
        }
        if let Some(effect) = kind.effect_handle() {
            ctx.attach_effect(&effect);
        }
        let from = self.current;
        self.current = kind;
        self.intensity = intensity.clamp(0.0, 1.0);
        self.weather_duration = 0.0;
        self.transition_elapsed = 0.0;
        ctx.emit(
            SimEventKind::WeatherChanged { from, to: kind },
            format!("weather shifted from {from} to {kind}"),
        );
    }

    /// Force `kind` immediately, overriding the natural cycle.
    ///
    /// With a duration, a one-shot revert to clear fires after exactly
    /// that many simulated seconds. Any previously scheduled revert is
    /// dropped.
    pub fn force_weather(
        &mut self,
        kind: WeatherKind,
        duration: Option<f64>,
        ctx: &mut SimContext<'_>,
    ) {
        self.change_weather(kind, 1.0, ctx);
        self.reverts.cancel_all();
        if let Some(seconds) = duration {
            self.reverts.schedule(seconds, WeatherKind::Clear);
        }
    }

    /// Switch to clear and suspend the natural cycle indefinitely.
    pub fn enable_meditation_weather(&mut self, ctx: &mut SimContext<'_>) {
        self.change_weather(WeatherKind::Clear, 1.0, ctx);
        self.next_change = f64::INFINITY;
    }

    /// Resume the natural cycle after a short fixed countdown.
    pub fn disable_meditation_weather(&mut self) {
        self.next_change = self.resume_countdown;
    }

    /// Snapshot of the current weather.
    pub fn current_info(&self) -> WeatherInfo {
        WeatherInfo {
            kind: self.current,
            intensity: self.intensity,
            duration: self.weather_duration,
        }
    }

    /// The active kind.
    pub fn current(&self) -> WeatherKind {
        self.current
    }

    /// Seconds since the last change completed.
    pub fn transition_elapsed(&self) -> f64 {
        self.transition_elapsed
    }

    /// Seconds until the next natural change; infinite while meditation
    /// suppression is on.
    pub fn next_change(&self) -> f64 {
        self.next_change
    }

    /// Simulation state of a kind, for hosts that render it.
    pub fn effect(&self, kind: WeatherKind) -> Option<&WeatherEffectState> {
        self.slots.iter().find(|s| s.kind == kind).map(|s| &s.effect)
    }
}
