//! Spherical trigger zones and their registry.

mod behavior;
mod engine;

pub use behavior::{Stage, TrailArtifact, ZoneBehavior, ZoneEffect};
pub use engine::ZoneTriggerEngine;

use glam::DVec3;

/// Identifies a zone within its registry.
///
/// Ids are dense and assigned in registration order, which is also the
/// tie-break order when the vehicle is equidistant from overlapping zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ZoneId(pub u32);

/// A spherical region that reacts to the vehicle.
#[derive(Debug)]
pub struct Zone {
    /// Registry-assigned identifier.
    pub id: ZoneId,
    /// Display name, handed to the narrator on entry.
    pub name: String,
    /// Center of the trigger sphere.
    pub center: DVec3,
    /// Radius of the trigger sphere.
    pub radius: f64,
    /// What the zone does while the vehicle is inside.
    pub behavior: ZoneBehavior,
    /// True while this zone is the active one.
    pub is_active: bool,
    /// Seconds the vehicle has dwelled inside during the current visit.
    pub dwell_time: f64,
    /// Tick of the current visit's entry, if any.
    pub entered_at: Option<u64>,
}

impl Zone {
    /// True if `position` lies strictly inside the trigger sphere.
    pub fn contains(&self, position: DVec3) -> bool {
        position.distance(self.center) < self.radius
    }
}

/// Owns the zones of a world, in registration order.
#[derive(Debug, Default)]
pub struct ZoneRegistry {
    zones: Vec<Zone>,
}

impl ZoneRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a zone and return its id.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        center: DVec3,
        radius: f64,
        behavior: ZoneBehavior,
    ) -> ZoneId {
        let id = ZoneId(u32::try_from(self.zones.len()).unwrap_or(u32::MAX));
        self.zones.push(Zone {
            id,
            name: name.into(),
            center,
            radius,
            behavior,
            is_active: false,
            dwell_time: 0.0,
            entered_at: None,
        });
        id
    }

    /// Look up a zone by id.
    pub fn get(&self, id: ZoneId) -> Option<&Zone> {
        self.zones.get(id.0 as usize)
    }

    /// Look up a zone by id, mutably.
    pub fn get_mut(&mut self, id: ZoneId) -> Option<&mut Zone> {
        self.zones.get_mut(id.0 as usize)
    }

    /// Iterate zones in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Zone> {
        self.zones.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Zone> {
        self.zones.iter_mut()
    }

    /// Number of registered zones.
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    /// True when no zones are registered.
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}
