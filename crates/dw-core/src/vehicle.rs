use glam::DVec3;

/// The moving agent the world reacts to.
///
/// Owned by the host; the simulation reads position and velocity every tick
/// and is the single writer of `mass` during an update (drift zones scale it
/// and restore the pre-entry baseline on exit).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vehicle {
    /// World-space position.
    pub position: DVec3,
    /// World-space velocity in units per second.
    pub velocity: DVec3,
    /// Current mass. Must stay positive.
    pub mass: f64,
}

impl Vehicle {
    /// Create a vehicle with explicit position, velocity, and mass.
    pub fn new(position: DVec3, velocity: DVec3, mass: f64) -> Self {
        Self {
            position,
            velocity,
            mass,
        }
    }

    /// Create a stationary vehicle of unit mass at the given position.
    pub fn at(position: DVec3) -> Self {
        Self::new(position, DVec3::ZERO, 1.0)
    }

    /// Current speed (velocity magnitude) in units per second.
    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }
}

impl Default for Vehicle {
    fn default() -> Self {
        Self::at(DVec3::ZERO)
    }
}
