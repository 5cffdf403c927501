//! Tick-stamped record of what the engines did.
//!
//! Hosts read the log to drive UI, audio, or assertions in tests; the
//! engines only ever append. The log is the observability channel for
//! failures that are deliberately non-fatal (behavior panics caught as
//! errors, renderer rejections).

use crate::weather::WeatherKind;
use crate::zone::ZoneId;

/// What happened.
#[derive(Debug, Clone, PartialEq)]
pub enum SimEventKind {
    /// The vehicle entered a zone.
    ZoneEntered {
        /// The zone that became active.
        zone: ZoneId,
        /// Its registered name.
        name: String,
    },
    /// The vehicle left a zone.
    ZoneExited {
        /// The zone that was deactivated.
        zone: ZoneId,
        /// Seconds the vehicle dwelled inside it.
        dwell: f64,
    },
    /// A staged zone crossed a dwell threshold.
    ZoneEscalation {
        /// The escalating zone.
        zone: ZoneId,
        /// Label of the stage that fired.
        label: String,
    },
    /// A trail zone spawned a visual artifact.
    ArtifactSpawned {
        /// The spawning zone.
        zone: ZoneId,
        /// Handle name of the artifact.
        effect: String,
    },
    /// A trail artifact reached the end of its lifetime.
    ArtifactExpired {
        /// The zone that owned the artifact.
        zone: ZoneId,
        /// Handle name of the artifact.
        effect: String,
    },
    /// The active weather kind changed.
    WeatherChanged {
        /// Outgoing kind.
        from: WeatherKind,
        /// Incoming kind.
        to: WeatherKind,
    },
    /// A zone behavior callback returned an error; the transition still
    /// completed.
    BehaviorFailed {
        /// The zone whose behavior failed.
        zone: ZoneId,
        /// The error it reported.
        reason: String,
    },
    /// The renderer rejected an attach or detach; the logical state still
    /// changed.
    EffectRejected {
        /// Handle name of the rejected resource.
        effect: String,
        /// The error the renderer reported.
        reason: String,
    },
}

/// One logged event.
#[derive(Debug, Clone, PartialEq)]
pub struct SimEvent {
    /// Update tick on which the event was emitted.
    pub tick: u64,
    /// What happened.
    pub kind: SimEventKind,
    /// Human-readable one-liner.
    pub description: String,
}

impl SimEventKind {
    /// True if the event concerns the given zone.
    pub fn concerns_zone(&self, id: ZoneId) -> bool {
        match self {
            Self::ZoneEntered { zone, .. }
            | Self::ZoneExited { zone, .. }
            | Self::ZoneEscalation { zone, .. }
            | Self::ArtifactSpawned { zone, .. }
            | Self::ArtifactExpired { zone, .. }
            | Self::BehaviorFailed { zone, .. } => *zone == id,
            Self::WeatherChanged { .. } | Self::EffectRejected { .. } => false,
        }
    }
}

/// Append-only event log with an optional size cap.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<SimEvent>,
    max_events: usize,
}

impl EventLog {
    /// Create an unbounded log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a log that keeps at most `max_events` entries, discarding the
    /// oldest. Zero means unbounded.
    pub fn with_capacity_limit(max_events: usize) -> Self {
        Self {
            events: Vec::new(),
            max_events,
        }
    }

    /// Append an event.
    pub fn push(&mut self, event: SimEvent) {
        self.events.push(event);
        if self.max_events > 0 && self.events.len() > self.max_events {
            let excess = self.events.len() - self.max_events;
            self.events.drain(..excess);
        }
    }

    /// All retained events, oldest first.
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    /// Events emitted on a specific tick.
    pub fn events_at_tick(&self, tick: u64) -> impl Iterator<Item = &SimEvent> {
        self.events.iter().filter(move |e| e.tick == tick)
    }

    /// Events that concern a specific zone.
    pub fn events_for_zone(&self, zone: ZoneId) -> impl Iterator<Item = &SimEvent> {
        self.events.iter().filter(move |e| e.kind.concerns_zone(zone))
    }

    /// Number of retained events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True when nothing has been logged (or everything was discarded).
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drop all retained events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}
