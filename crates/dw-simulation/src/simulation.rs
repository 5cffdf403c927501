use std::fmt;

use rand::SeedableRng;
use rand::rngs::StdRng;

use dw_core::{DayClock, Narrator, NullNarrator, NullRenderer, Renderer, Vehicle};

use crate::config::SimConfig;
use crate::context::SimContext;
use crate::event::EventLog;
use crate::weather::{WeatherEngine, WeatherInfo, WeatherKind};
use crate::zone::{ZoneRegistry, ZoneTriggerEngine};

/// Owns both engines, the collaborators, and the shared RNG, and drives
/// them through one `update(dt)` per host frame.
///
/// Zones run before weather each tick. The whole simulation is
/// deterministic under a fixed seed and fixed `dt` sequence.
pub struct Simulation {
    vehicle: Vehicle,
    clock: DayClock,
    zones: ZoneTriggerEngine,
    weather: WeatherEngine,
    events: EventLog,
    rng: StdRng,
    narrator: Box<dyn Narrator>,
    renderer: Box<dyn Renderer>,
    tick: u64,
}

impl fmt::Debug for Simulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulation")
            .field("vehicle", &self.vehicle)
            .field("clock", &self.clock)
            .field("zones", &self.zones)
            .field("weather", &self.weather)
            .field("tick", &self.tick)
            .finish_non_exhaustive()
    }
}

impl Simulation {
    /// Create a simulation over the given zones with no-op collaborators.
    pub fn new(config: &SimConfig, registry: ZoneRegistry) -> Self {
        Self::with_collaborators(
            config,
            registry,
            Box::new(NullNarrator),
            Box::new(NullRenderer),
        )
    }

    /// Create a simulation wired to a host's narrator and renderer.
    pub fn with_collaborators(
        config: &SimConfig,
        registry: ZoneRegistry,
        narrator: Box<dyn Narrator>,
        renderer: Box<dyn Renderer>,
    ) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let weather = WeatherEngine::new(config, &mut rng);
        Self {
            vehicle: Vehicle::default(),
            clock: DayClock::new(config.day_length),
            zones: ZoneTriggerEngine::new(registry),
            weather,
            events: EventLog::with_capacity_limit(config.max_events),
            rng,
            narrator,
            renderer,
            tick: 0,
        }
    }

    /// Advance the whole world by `dt` simulated seconds.
    pub fn update(&mut self, dt: f64) {
        self.tick += 1;
        self.clock.advance(dt);
        let Self {
            vehicle,
            clock,
            zones,
            weather,
            events,
            rng,
            narrator,
            renderer,
            tick,
        } = self;
        let mut ctx = SimContext {
            vehicle,
            clock,
            narrator: narrator.as_mut(),
            renderer: renderer.as_mut(),
            events,
            rng,
            tick: *tick,
        };
        zones.update(dt, &mut ctx);
        weather.update(dt, &mut ctx);
    }

    /// Run `ticks` updates of `dt` seconds each.
    pub fn run(&mut self, ticks: u64, dt: f64) {
        for _ in 0..ticks {
            self.update(dt);
        }
    }

    /// Switch the weather immediately.
    pub fn change_weather(&mut self, kind: WeatherKind, intensity: f64) {
        let (weather, mut ctx) = self.weather_and_ctx();
        weather.change_weather(kind, intensity, &mut ctx);
    }

    /// Force a weather kind, optionally reverting to clear after a
    /// simulated duration.
    pub fn force_weather(&mut self, kind: WeatherKind, duration: Option<f64>) {
        let (weather, mut ctx) = self.weather_and_ctx();
        weather.force_weather(kind, duration, &mut ctx);
    }

    /// Hold the sky clear until meditation ends.
    pub fn enable_meditation_weather(&mut self) {
        let (weather, mut ctx) = self.weather_and_ctx();
        weather.enable_meditation_weather(&mut ctx);
    }

    /// Resume the natural weather cycle.
    pub fn disable_meditation_weather(&mut self) {
        self.weather.disable_meditation_weather();
    }

    /// Snapshot of the current weather.
    pub fn weather_info(&self) -> WeatherInfo {
        self.weather.current_info()
    }

    /// The moving agent.
    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    /// The moving agent, mutably; hosts drive position and velocity.
    pub fn vehicle_mut(&mut self) -> &mut Vehicle {
        &mut self.vehicle
    }

    /// The day cycle.
    pub fn clock(&self) -> &DayClock {
        &self.clock
    }

    /// The zone state machine.
    pub fn zones(&self) -> &ZoneTriggerEngine {
        &self.zones
    }

    /// The weather engine.
    pub fn weather(&self) -> &WeatherEngine {
        &self.weather
    }

    /// Everything the engines did so far.
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Number of updates run so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    fn weather_and_ctx(&mut self) -> (&mut WeatherEngine, SimContext<'_>) {
        let Self {
            vehicle,
            clock,
            weather,
            events,
            rng,
            narrator,
            renderer,
            tick,
            ..
        } = self;
        let ctx = SimContext {
            vehicle,
            clock,
            narrator: narrator.as_mut(),
            renderer: renderer.as_mut(),
            events,
            rng,
            tick: *tick,
        };
        (weather, ctx)
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec3;

    use crate::event::SimEventKind;
    use crate::zone::{ZoneBehavior, ZoneId};

    use super::*;

    fn world() -> ZoneRegistry {
        let mut registry = ZoneRegistry::new();
        registry.register("a", DVec3::ZERO, 10.0, ZoneBehavior::mass_drift(1.02));
        registry.register(
            "b",
            DVec3::new(5.0, 0.0, 0.0),
            10.0,
            ZoneBehavior::ambient("fx/b"),
        );
        registry
    }

    fn quiet_sim() -> Simulation {
        let config = SimConfig::default()
            .with_weather_change_range(1.0e6, 2.0e6)
            .with_storm_density(10, 1)
            .with_snow_sprites(10);
        Simulation::new(&config, world())
    }

    #[test]
    fn scenario_two_zones_then_leave() {
        let mut sim = quiet_sim();
        sim.vehicle_mut().position = DVec3::new(2.0, 0.0, 0.0);
        sim.update(0.1);
        assert_eq!(sim.zones().active_zone(), Some(ZoneId(0)));

        sim.vehicle_mut().position = DVec3::new(20.0, 0.0, 0.0);
        sim.update(0.1);
        sim.update(0.1);
        assert_eq!(sim.zones().active_zone(), None);

        let exits = sim
            .events()
            .events()
            .iter()
            .filter(|e| matches!(e.kind, SimEventKind::ZoneExited { .. }))
            .count();
        assert_eq!(exits, 1);
    }

    #[test]
    fn mass_drift_round_trip_through_the_full_loop() {
        let mut sim = quiet_sim();
        sim.vehicle_mut().position = DVec3::new(2.0, 0.0, 0.0);
        sim.run(10, 0.1);
        assert!(sim.vehicle().mass > 1.0);

        sim.vehicle_mut().position = DVec3::new(50.0, 0.0, 0.0);
        sim.update(0.1);
        assert_eq!(sim.vehicle().mass, 1.0);
    }

    #[test]
    fn same_seed_same_story() {
        let run = |seed: u64| {
            let config = SimConfig::default()
                .with_seed(seed)
                .with_weather_change_range(5.0, 20.0)
                .with_storm_density(10, 1)
                .with_snow_sprites(10);
            let mut sim = Simulation::new(&config, world());
            sim.vehicle_mut().position = DVec3::new(2.0, 0.0, 0.0);
            sim.run(2_000, 0.5);
            (sim.weather_info().kind, sim.events().len())
        };
        assert_eq!(run(9), run(9));
    }

    #[test]
    fn forced_weather_survives_the_orchestrator_loop() {
        let mut sim = quiet_sim();
        sim.force_weather(WeatherKind::Snow, Some(5.0));
        sim.run(49, 0.1);
        assert_eq!(sim.weather_info().kind, WeatherKind::Snow);
        sim.update(0.1);
        assert_eq!(sim.weather_info().kind, WeatherKind::Clear);
    }

    #[test]
    fn clock_advances_with_updates() {
        let mut sim = quiet_sim();
        sim.run(60, 1.0);
        assert!((sim.clock().time_of_day() - 0.1).abs() < 1e-9);
    }
}
