use std::fmt::Debug;

use dw_core::EffectHandle;

use crate::context::SimContext;
use crate::error::SimResult;
use crate::event::SimEventKind;
use crate::zone::ZoneId;

/// Remaining lifetime within this tolerance of zero counts as expired, so
/// an artifact aged by many small `dt` steps is removed on the tick its
/// accumulated age reaches the configured expiry.
const EXPIRY_TOLERANCE: f64 = 1e-9;

/// Callback contract for user-supplied zone behaviors.
///
/// `on_enter` and `on_exit` run exactly once per transition edge;
/// `on_active` runs every tick the zone is active and receives the
/// cumulative dwell time. `fade` runs every tick for every zone, active or
/// not, so lingering visuals can age out after the vehicle leaves.
pub trait ZoneEffect: Debug {
    /// The vehicle crossed into the zone.
    fn on_enter(&mut self, ctx: &mut SimContext<'_>) -> SimResult<()>;

    /// The zone is active this tick; `dwell` is seconds since entry.
    fn on_active(&mut self, dwell: f64, dt: f64, ctx: &mut SimContext<'_>) -> SimResult<()>;

    /// The vehicle crossed out of the zone.
    fn on_exit(&mut self, ctx: &mut SimContext<'_>) -> SimResult<()>;

    /// Per-tick aging, regardless of activity.
    fn fade(&mut self, _dt: f64, _ctx: &mut SimContext<'_>) -> SimResult<()> {
        Ok(())
    }
}

/// A lingering visual left behind by a trail zone.
#[derive(Debug, Clone)]
pub struct TrailArtifact {
    /// Attached resource.
    pub effect: EffectHandle,
    /// Seconds until the artifact is removed.
    pub ttl: f64,
}

/// One dwell-gated escalation step of a staged zone.
#[derive(Debug, Clone)]
pub struct Stage {
    /// Dwell seconds after which this stage fires.
    pub after: f64,
    /// Label reported in the escalation event.
    pub label: String,
}

/// What a zone does across the enter/active/exit lifecycle.
///
/// The built-in kinds cover the stock world; `Custom` plugs in anything
/// else via the [`ZoneEffect`] trait.
#[derive(Debug)]
pub enum ZoneBehavior {
    /// Multiplies the vehicle's mass by `factor` every active tick,
    /// uncapped, and restores the pre-entry baseline on exit.
    MassDrift {
        /// Per-tick mass multiplier.
        factor: f64,
        /// Mass captured on entry; `None` while the vehicle is outside.
        baseline: Option<f64>,
    },
    /// Spawns a short-lived visual artifact whenever the vehicle moves
    /// faster than `speed_threshold` inside the zone.
    Trail {
        /// Speed above which artifacts spawn, in units per second.
        speed_threshold: f64,
        /// Lifetime of each artifact in seconds.
        artifact_ttl: f64,
        /// Live artifacts, oldest first.
        artifacts: Vec<TrailArtifact>,
        /// Artifacts spawned so far, used to name handles uniquely.
        spawned: u64,
    },
    /// Attaches one effect on entry and detaches it on exit.
    Ambient {
        /// The attached resource.
        effect: EffectHandle,
    },
    /// Fires labelled escalations as dwell time crosses stage thresholds.
    Staged {
        /// Thresholds in ascending `after` order.
        stages: Vec<Stage>,
        /// Number of stages already fired this visit.
        fired: usize,
    },
    /// User-supplied behavior.
    Custom(Box<dyn ZoneEffect>),
}

impl ZoneBehavior {
    /// A mass-drift zone with the given per-tick multiplier.
    pub fn mass_drift(factor: f64) -> Self {
        Self::MassDrift {
            factor,
            baseline: None,
        }
    }

    /// A trail zone spawning artifacts above `speed_threshold`, each
    /// living `artifact_ttl` seconds.
    pub fn trail(speed_threshold: f64, artifact_ttl: f64) -> Self {
        Self::Trail {
            speed_threshold,
            artifact_ttl,
            artifacts: Vec::new(),
            spawned: 0,
        }
    }

    /// An ambient zone attaching the named effect while active.
    pub fn ambient(effect: impl Into<String>) -> Self {
        Self::Ambient {
            effect: EffectHandle::new(effect),
        }
    }

    /// A staged zone escalating at the given dwell thresholds.
    pub fn staged(stages: Vec<Stage>) -> Self {
        Self::Staged { stages, fired: 0 }
    }

    /// A zone driven by a user-supplied [`ZoneEffect`].
    pub fn custom(effect: Box<dyn ZoneEffect>) -> Self {
        Self::Custom(effect)
    }

    pub(crate) fn enter(
        &mut self,
        _id: ZoneId,
        _name: &str,
        ctx: &mut SimContext<'_>,
    ) -> SimResult<()> {
        match self {
            Self::MassDrift { baseline, .. } => {
                // Idempotent: a second enter without an exit keeps the
                // original baseline.
                if baseline.is_none() {
                    *baseline = Some(ctx.vehicle.mass);
                }
                Ok(())
            }
            Self::Trail { .. } => Ok(()),
            Self::Ambient { effect } => {
                ctx.attach_effect(effect);
                Ok(())
            }
            Self::Staged { fired, .. } => {
                *fired = 0;
                Ok(())
            }
            Self::Custom(inner) => inner.on_enter(ctx),
        }
    }

    pub(crate) fn active(
        &mut self,
        id: ZoneId,
        name: &str,
        dwell: f64,
        dt: f64,
        ctx: &mut SimContext<'_>,
    ) -> SimResult<()> {
        match self {
            Self::MassDrift { factor, .. } => {
                ctx.vehicle.mass *= *factor;
                Ok(())
            }
            Self::Trail {
                speed_threshold,
                artifact_ttl,
                artifacts,
                spawned,
            } => {
                if ctx.vehicle.speed() > *speed_threshold {
                    let effect = EffectHandle::new(format!("zone/{name}/trail-{spawned}"));
                    *spawned += 1;
                    ctx.attach_effect(&effect);
                    ctx.emit(
                        SimEventKind::ArtifactSpawned {
                            zone: id,
                            effect: effect.name().to_string(),
                        },
                        format!("{name} left a trail artifact"),
                    );
                    artifacts.push(TrailArtifact {
                        effect,
                        ttl: *artifact_ttl,
                    });
                }
                Ok(())
            }
            Self::Ambient { .. } => Ok(()),
            Self::Staged { stages, fired } => {
                while *fired < stages.len() && dwell >= stages[*fired].after {
                    let label = stages[*fired].label.clone();
                    *fired += 1;
                    ctx.emit(
                        SimEventKind::ZoneEscalation {
                            zone: id,
                            label: label.clone(),
                        },
                        format!("{name} escalated: {label}"),
                    );
                }
                Ok(())
            }
            Self::Custom(inner) => inner.on_active(dwell, dt, ctx),
        }
    }

    pub(crate) fn exit(
        &mut self,
        _id: ZoneId,
        _name: &str,
        ctx: &mut SimContext<'_>,
    ) -> SimResult<()> {
        match self {
            Self::MassDrift { baseline, .. } => {
                if let Some(mass) = baseline.take() {
                    ctx.vehicle.mass = mass;
                }
                Ok(())
            }
            Self::Trail { .. } => Ok(()),
            Self::Ambient { effect } => {
                ctx.detach_effect(effect);
                Ok(())
            }
            Self::Staged { fired, .. } => {
                *fired = 0;
                Ok(())
            }
            Self::Custom(inner) => inner.on_exit(ctx),
        }
    }

    pub(crate) fn fade(
        &mut self,
        id: ZoneId,
        name: &str,
        dt: f64,
        ctx: &mut SimContext<'_>,
    ) -> SimResult<()> {
        match self {
            Self::Trail { artifacts, .. } => {
                let mut i = 0;
                while i < artifacts.len() {
                    artifacts[i].ttl -= dt;
                    if artifacts[i].ttl <= EXPIRY_TOLERANCE {
                        let artifact = artifacts.remove(i);
                        ctx.detach_effect(&artifact.effect);
                        ctx.emit(
                            SimEventKind::ArtifactExpired {
                                zone: id,
                                effect: artifact.effect.name().to_string(),
                            },
                            format!("a trail artifact of {name} faded"),
                        );
                    } else {
                        i += 1;
                    }
                }
                Ok(())
            }
            Self::MassDrift { .. } | Self::Ambient { .. } | Self::Staged { .. } => Ok(()),
            Self::Custom(inner) => inner.fade(dt, ctx),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use dw_core::{DayClock, NullNarrator, RecordingRenderer, Vehicle};
    use glam::DVec3;

    use crate::event::EventLog;

    use super::*;

    struct Fixture {
        vehicle: Vehicle,
        clock: DayClock,
        narrator: NullNarrator,
        renderer: RecordingRenderer,
        events: EventLog,
        rng: StdRng,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                vehicle: Vehicle::default(),
                clock: DayClock::default(),
                narrator: NullNarrator,
                renderer: RecordingRenderer::new(),
                events: EventLog::new(),
                rng: StdRng::seed_from_u64(7),
            }
        }

        fn ctx(&mut self) -> SimContext<'_> {
            SimContext {
                vehicle: &mut self.vehicle,
                clock: &self.clock,
                narrator: &mut self.narrator,
                renderer: &mut self.renderer,
                events: &mut self.events,
                rng: &mut self.rng,
                tick: 0,
            }
        }
    }

    #[test]
    fn mass_drift_compounds_and_restores() {
        let mut fx = Fixture::new();
        fx.vehicle.mass = 2.0;
        let mut behavior = ZoneBehavior::mass_drift(1.5);

        {
            let mut ctx = fx.ctx();
            behavior.enter(ZoneId(0), "drift", &mut ctx).unwrap();
            behavior
                .active(ZoneId(0), "drift", 0.1, 0.1, &mut ctx)
                .unwrap();
            behavior
                .active(ZoneId(0), "drift", 0.2, 0.1, &mut ctx)
                .unwrap();
        }
        assert!((fx.vehicle.mass - 4.5).abs() < 1e-12);

        behavior.exit(ZoneId(0), "drift", &mut fx.ctx()).unwrap();
        assert_eq!(fx.vehicle.mass, 2.0);
    }

    #[test]
    fn mass_drift_double_enter_keeps_first_baseline() {
        let mut fx = Fixture::new();
        fx.vehicle.mass = 3.0;
        let mut behavior = ZoneBehavior::mass_drift(2.0);

        behavior.enter(ZoneId(0), "drift", &mut fx.ctx()).unwrap();
        fx.vehicle.mass = 99.0;
        behavior.enter(ZoneId(0), "drift", &mut fx.ctx()).unwrap();
        behavior.exit(ZoneId(0), "drift", &mut fx.ctx()).unwrap();
        assert_eq!(fx.vehicle.mass, 3.0);
    }

    #[test]
    fn trail_spawns_above_threshold_and_expires_artifacts() {
        let mut fx = Fixture::new();
        fx.vehicle.velocity = DVec3::new(2.0, 0.0, 0.0);
        let mut behavior = ZoneBehavior::trail(1.0, 2.0);

        {
            let mut ctx = fx.ctx();
            behavior.enter(ZoneId(1), "wake", &mut ctx).unwrap();
            behavior
                .active(ZoneId(1), "wake", 0.1, 0.1, &mut ctx)
                .unwrap();
        }
        assert_eq!(fx.renderer.attached(), vec!["zone/wake/trail-0"]);

        // Slow down: no further spawns, existing artifact keeps aging.
        fx.vehicle.velocity = DVec3::ZERO;
        {
            let mut ctx = fx.ctx();
            behavior
                .active(ZoneId(1), "wake", 0.2, 0.1, &mut ctx)
                .unwrap();
            behavior.fade(ZoneId(1), "wake", 1.9, &mut ctx).unwrap();
        }
        assert_eq!(fx.renderer.attached(), vec!["zone/wake/trail-0"]);

        behavior.fade(ZoneId(1), "wake", 0.1, &mut fx.ctx()).unwrap();
        assert!(fx.renderer.attached().is_empty());
        assert!(
            fx.events
                .events()
                .iter()
                .any(|e| matches!(e.kind, SimEventKind::ArtifactExpired { .. }))
        );
    }

    #[test]
    fn artifact_expires_on_the_boundary_despite_float_residue() {
        let mut fx = Fixture::new();
        fx.vehicle.velocity = DVec3::new(2.0, 0.0, 0.0);
        let mut behavior = ZoneBehavior::trail(1.0, 2.0);

        {
            let mut ctx = fx.ctx();
            behavior.enter(ZoneId(1), "wake", &mut ctx).unwrap();
            behavior
                .active(ZoneId(1), "wake", 0.1, 0.1, &mut ctx)
                .unwrap();
        }
        fx.vehicle.velocity = DVec3::ZERO;

        // Twenty 0.1s fades accumulate to the 2s expiry with residue only.
        for _ in 0..19 {
            behavior.fade(ZoneId(1), "wake", 0.1, &mut fx.ctx()).unwrap();
        }
        assert_eq!(fx.renderer.attached(), vec!["zone/wake/trail-0"]);

        behavior.fade(ZoneId(1), "wake", 0.1, &mut fx.ctx()).unwrap();
        assert!(fx.renderer.attached().is_empty());
    }

    #[test]
    fn trail_artifacts_outlive_zone_exit() {
        let mut fx = Fixture::new();
        fx.vehicle.velocity = DVec3::new(2.0, 0.0, 0.0);
        let mut behavior = ZoneBehavior::trail(1.0, 2.0);

        {
            let mut ctx = fx.ctx();
            behavior.enter(ZoneId(1), "wake", &mut ctx).unwrap();
            behavior
                .active(ZoneId(1), "wake", 0.1, 0.1, &mut ctx)
                .unwrap();
            behavior.exit(ZoneId(1), "wake", &mut ctx).unwrap();

            // Fades continue while the zone is inactive.
            behavior.fade(ZoneId(1), "wake", 2.5, &mut ctx).unwrap();
        }
        assert!(fx.renderer.attached().is_empty());
    }

    #[test]
    fn ambient_attaches_on_enter_detaches_on_exit() {
        let mut fx = Fixture::new();
        let mut behavior = ZoneBehavior::ambient("fx/hum");

        behavior.enter(ZoneId(2), "hum", &mut fx.ctx()).unwrap();
        assert_eq!(fx.renderer.attached(), vec!["fx/hum"]);
        behavior.exit(ZoneId(2), "hum", &mut fx.ctx()).unwrap();
        assert!(fx.renderer.attached().is_empty());
    }

    #[test]
    fn staged_fires_each_threshold_once_per_visit() {
        let mut fx = Fixture::new();
        let mut behavior = ZoneBehavior::staged(vec![
            Stage {
                after: 5.0,
                label: "first".into(),
            },
            Stage {
                after: 10.0,
                label: "second".into(),
            },
        ]);

        {
            let mut ctx = fx.ctx();
            behavior.enter(ZoneId(3), "deep", &mut ctx).unwrap();
            behavior
                .active(ZoneId(3), "deep", 4.0, 1.0, &mut ctx)
                .unwrap();
        }
        assert_eq!(fx.events.len(), 0);

        {
            let mut ctx = fx.ctx();
            behavior
                .active(ZoneId(3), "deep", 6.0, 1.0, &mut ctx)
                .unwrap();
            behavior
                .active(ZoneId(3), "deep", 7.0, 1.0, &mut ctx)
                .unwrap();
        }
        assert_eq!(fx.events.len(), 1);

        // A big dwell jump fires the remaining stage.
        behavior
            .active(ZoneId(3), "deep", 12.0, 5.0, &mut fx.ctx())
            .unwrap();
        assert_eq!(fx.events.len(), 2);

        // Re-entry starts the ladder over.
        {
            let mut ctx = fx.ctx();
            behavior.exit(ZoneId(3), "deep", &mut ctx).unwrap();
            behavior.enter(ZoneId(3), "deep", &mut ctx).unwrap();
            behavior
                .active(ZoneId(3), "deep", 6.0, 1.0, &mut ctx)
                .unwrap();
        }
        assert_eq!(fx.events.len(), 3);
    }
}
