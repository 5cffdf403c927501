use crate::context::SimContext;
use crate::event::SimEventKind;
use crate::zone::{ZoneBehavior, ZoneId, ZoneRegistry};

/// Per-tick nearest-zone resolution and enter/active/exit dispatch.
///
/// At most one zone is active at a time. When the vehicle sits inside
/// several overlapping zones the one with the smallest center distance
/// wins; exact ties go to the earlier-registered zone. Transitions always
/// run the old zone's exit before the new zone's enter.
#[derive(Debug)]
pub struct ZoneTriggerEngine {
    registry: ZoneRegistry,
    active: Option<ZoneId>,
    previous: Option<ZoneId>,
    transition_elapsed: f64,
    cooldown: f64,
}

impl ZoneTriggerEngine {
    /// Create an engine over a registry of zones.
    pub fn new(registry: ZoneRegistry) -> Self {
        Self {
            registry,
            active: None,
            previous: None,
            transition_elapsed: 0.0,
            cooldown: 0.0,
        }
    }

    /// Advance the zone state machine by `dt` simulated seconds.
    pub fn update(&mut self, dt: f64, ctx: &mut SimContext<'_>) {
        // Fades run before dispatch: an artifact spawned during this tick's
        // active callback starts aging on the next tick, so it lives its
        // full configured lifetime.
        for zone in self.registry.iter_mut() {
            let id = zone.id;
            if let Err(err) = zone.behavior.fade(id, &zone.name, dt, ctx) {
                ctx.emit(
                    SimEventKind::BehaviorFailed {
                        zone: id,
                        reason: err.to_string(),
                    },
                    format!("behavior of {} failed while fading", zone.name),
                );
            }
        }

        let position = ctx.vehicle.position;
        // min_by keeps the first of equally-near candidates, which is
        // registry order.
        let nearest = self
            .registry
            .iter()
            .filter(|z| z.contains(position))
            .map(|z| (z.id, position.distance(z.center)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id);

        if nearest != self.active {
            if let Some(old) = self.active {
                self.run_exit(old, ctx);
            }
            if let Some(new) = nearest {
                self.run_enter(new, ctx);
            }
            self.previous = self.active;
            self.active = nearest;
            self.transition_elapsed = 0.0;
        }

        if let Some(id) = self.active {
            self.run_active(id, dt, ctx);
        }

        self.transition_elapsed += dt;
        self.cooldown = (self.cooldown - dt).max(0.0);
    }

    fn run_active(&mut self, id: ZoneId, dt: f64, ctx: &mut SimContext<'_>) {
        let Some(zone) = self.registry.get_mut(id) else {
            return;
        };
        zone.dwell_time += dt;
        let dwell = zone.dwell_time;
        if let Err(err) = zone.behavior.active(id, &zone.name, dwell, dt, ctx) {
            ctx.emit(
                SimEventKind::BehaviorFailed {
                    zone: id,
                    reason: err.to_string(),
                },
                format!("behavior of {} failed while active", zone.name),
            );
        }
    }

    fn run_exit(&mut self, id: ZoneId, ctx: &mut SimContext<'_>) {
        let Some(zone) = self.registry.get_mut(id) else {
            return;
        };
        if let Err(err) = zone.behavior.exit(id, &zone.name, ctx) {
            ctx.emit(
                SimEventKind::BehaviorFailed {
                    zone: id,
                    reason: err.to_string(),
                },
                format!("behavior of {} failed on exit", zone.name),
            );
        }
        ctx.narrator.exit_zone();
        zone.is_active = false;
        zone.entered_at = None;
        let dwell = zone.dwell_time;
        ctx.emit(
            SimEventKind::ZoneExited { zone: id, dwell },
            format!("left zone after {dwell:.1}s"),
        );
    }

    fn run_enter(&mut self, id: ZoneId, ctx: &mut SimContext<'_>) {
        let Some(zone) = self.registry.get_mut(id) else {
            return;
        };
        ctx.narrator.enter_zone(&zone.name);
        if let Err(err) = zone.behavior.enter(id, &zone.name, ctx) {
            ctx.emit(
                SimEventKind::BehaviorFailed {
                    zone: id,
                    reason: err.to_string(),
                },
                format!("behavior of {} failed on enter", zone.name),
            );
        }
        zone.is_active = true;
        zone.dwell_time = 0.0;
        zone.entered_at = Some(ctx.tick);
        let name = zone.name.clone();
        ctx.emit(
            SimEventKind::ZoneEntered {
                zone: id,
                name: name.clone(),
            },
            format!("entered zone {name}"),
        );
    }

    /// Swap a zone's behavior, returning the old one. Unknown ids return
    /// the replacement unchanged.
    pub fn replace_behavior(&mut self, id: ZoneId, behavior: ZoneBehavior) -> ZoneBehavior {
        match self.registry.get_mut(id) {
            Some(zone) => std::mem::replace(&mut zone.behavior, behavior),
            None => behavior,
        }
    }

    /// The currently active zone, if any.
    pub fn active_zone(&self) -> Option<ZoneId> {
        self.active
    }

    /// The zone active before the last transition, if any.
    pub fn previous_zone(&self) -> Option<ZoneId> {
        self.previous
    }

    /// Seconds since the last transition (including to or from "no zone").
    pub fn transition_elapsed(&self) -> f64 {
        self.transition_elapsed
    }

    /// Interaction cooldown remaining. Decrements toward zero each tick;
    /// nothing is gated on it.
    pub fn cooldown(&self) -> f64 {
        self.cooldown
    }

    /// The zones this engine drives.
    pub fn registry(&self) -> &ZoneRegistry {
        &self.registry
    }
}
