use glam::DVec3;
use rand::Rng;
use rand::rngs::StdRng;

/// Horizontal half-extent of the snowfall volume around the origin.
const HORIZONTAL_SPREAD: f64 = 40.0;

/// One falling snow sprite.
#[derive(Debug, Clone, PartialEq)]
pub struct SnowSprite {
    /// World-space position.
    pub position: DVec3,
    /// Base fall velocity, before sway.
    pub velocity: DVec3,
    /// Accumulated spin in radians.
    pub rotation: f64,
    /// Spin rate in radians per second.
    pub rotation_speed: f64,
    /// Sway phase offset desynchronizing this sprite from its neighbors.
    pub phase: f64,
    /// Height the sprite respawns at when it reaches the ground.
    pub respawn_height: f64,
}

/// Snow sprites of an active snowfall.
///
/// Sprite count is fixed; grounded sprites respawn at their top height.
#[derive(Debug, Clone)]
pub struct SnowState {
    sprites: Vec<SnowSprite>,
    clock: f64,
    sway_amplitude: f64,
    sway_frequency: f64,
}

impl SnowState {
    /// Seed a snowfall of `sprites` flakes under a sky of the given
    /// `ceiling` height.
    pub fn new(sprites: usize, ceiling: f64, rng: &mut StdRng) -> Self {
        let sprites = (0..sprites)
            .map(|_| SnowSprite {
                position: DVec3::new(
                    rng.random_range(-HORIZONTAL_SPREAD..HORIZONTAL_SPREAD),
                    rng.random_range(0.0..ceiling),
                    rng.random_range(-HORIZONTAL_SPREAD..HORIZONTAL_SPREAD),
                ),
                velocity: DVec3::new(
                    rng.random_range(-0.5..0.5),
                    rng.random_range(-3.0..-1.0),
                    rng.random_range(-0.5..0.5),
                ),
                rotation: 0.0,
                rotation_speed: rng.random_range(-2.0..2.0),
                phase: rng.random_range(0.0..std::f64::consts::TAU),
                respawn_height: rng.random_range(0.8 * ceiling..ceiling),
            })
            .collect();
        Self {
            sprites,
            clock: 0.0,
            sway_amplitude: 1.5,
            sway_frequency: 0.8,
        }
    }

    /// Advance all sprites by `dt` simulated seconds.
    pub fn simulate(&mut self, dt: f64, rng: &mut StdRng) {
        self.clock += dt;
        for sprite in &mut self.sprites {
            sprite.position += sprite.velocity * dt;
            // Sinusoidal sway keyed to the shared clock, desynchronized by
            // the per-sprite phase.
            let sway = (self.clock * self.sway_frequency + sprite.phase).sin();
            sprite.position.x += sway * self.sway_amplitude * dt;
            sprite.rotation += sprite.rotation_speed * dt;
            if sprite.position.y < 0.0 {
                sprite.position = DVec3::new(
                    rng.random_range(-HORIZONTAL_SPREAD..HORIZONTAL_SPREAD),
                    sprite.respawn_height,
                    rng.random_range(-HORIZONTAL_SPREAD..HORIZONTAL_SPREAD),
                );
            }
        }
    }

    /// Current sprites.
    pub fn sprites(&self) -> &[SnowSprite] {
        &self.sprites
    }

    /// Seconds this snowfall has been simulated.
    pub fn clock(&self) -> f64 {
        self.clock
    }
}
