use rand::rngs::StdRng;

use dw_core::{DayClock, EffectHandle, Narrator, Renderer, Vehicle};

use crate::event::{EventLog, SimEvent, SimEventKind};

/// Mutable view of the world handed to the engines for one update.
///
/// Bundles the collaborators so engine signatures stay short and the borrow
/// of each piece is explicit at the call site.
pub struct SimContext<'a> {
    /// The moving agent.
    pub vehicle: &'a mut Vehicle,
    /// The day cycle, read-only during an update.
    pub clock: &'a DayClock,
    /// Narrative sink for zone crossings.
    pub narrator: &'a mut dyn Narrator,
    /// Visual sink for effect attach/detach.
    pub renderer: &'a mut dyn Renderer,
    /// Event log the engines append to.
    pub events: &'a mut EventLog,
    /// The simulation's random number generator.
    pub rng: &'a mut StdRng,
    /// Current update tick.
    pub tick: u64,
}

impl SimContext<'_> {
    /// Append an event stamped with the current tick.
    pub fn emit(&mut self, kind: SimEventKind, description: impl Into<String>) {
        self.events.push(SimEvent {
            tick: self.tick,
            kind,
            description: description.into(),
        });
    }

    /// Attach an effect, degrading a renderer rejection to a logged event.
    pub fn attach_effect(&mut self, effect: &EffectHandle) {
        if let Err(err) = self.renderer.attach(effect) {
            self.emit(
                SimEventKind::EffectRejected {
                    effect: effect.name().to_string(),
                    reason: err.to_string(),
                },
                format!("could not attach {effect}"),
            );
        }
    }

    /// Detach an effect, degrading a renderer rejection to a logged event.
    pub fn detach_effect(&mut self, effect: &EffectHandle) {
        if let Err(err) = self.renderer.detach(effect) {
            self.emit(
                SimEventKind::EffectRejected {
                    effect: effect.name().to_string(),
                    reason: err.to_string(),
                },
                format!("could not detach {effect}"),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use dw_core::{NullNarrator, RejectingRenderer};

    use super::*;

    #[test]
    fn rejected_attach_becomes_event_not_error() {
        let mut vehicle = Vehicle::default();
        let clock = DayClock::default();
        let mut narrator = NullNarrator;
        let mut renderer = RejectingRenderer;
        let mut events = EventLog::new();
        let mut rng = StdRng::seed_from_u64(1);
        let mut ctx = SimContext {
            vehicle: &mut vehicle,
            clock: &clock,
            narrator: &mut narrator,
            renderer: &mut renderer,
            events: &mut events,
            rng: &mut rng,
            tick: 3,
        };

        ctx.attach_effect(&EffectHandle::new("weather/storm"));

        assert_eq!(events.len(), 1);
        assert_eq!(events.events()[0].tick, 3);
        assert!(matches!(
            events.events()[0].kind,
            SimEventKind::EffectRejected { .. }
        ));
    }
}
