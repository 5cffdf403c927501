use glam::DVec3;
use rand::Rng;
use rand::rngs::StdRng;

use crate::scheduler::TaskList;

/// Horizontal half-extent of the rain volume around the origin.
const HORIZONTAL_SPREAD: f64 = 40.0;

/// Seconds a lightning flash stays lit, as a randomized range.
const FLASH_DURATION: (f64, f64) = (0.08, 0.25);

/// Seconds between flashes of one bolt, as a randomized range.
const FLASH_INTERVAL: (f64, f64) = (2.0, 8.0);

/// One lightning bolt's flash timer.
#[derive(Debug, Clone)]
pub struct LightningBolt {
    /// Seconds since the last flash began.
    pub flash_elapsed: f64,
    /// Seconds between flashes, redrawn after each one.
    pub next_flash_interval: f64,
    /// True while the bolt is lit.
    pub flashing: bool,
}

/// Rain particles and lightning timers of an active storm.
///
/// Particle count is fixed for the lifetime of the state: particles that
/// fall below ground are respawned high up, never removed.
#[derive(Debug, Clone)]
pub struct StormState {
    positions: Vec<DVec3>,
    velocities: Vec<DVec3>,
    bolts: Vec<LightningBolt>,
    ceiling: f64,
    flash_offs: TaskList<usize>,
}

impl StormState {
    /// Seed a storm with `particles` raindrops and `bolts` lightning bolts
    /// under a sky of the given `ceiling` height.
    pub fn new(particles: usize, bolts: usize, ceiling: f64, rng: &mut StdRng) -> Self {
        let positions = (0..particles)
            .map(|_| {
                DVec3::new(
                    rng.random_range(-HORIZONTAL_SPREAD..HORIZONTAL_SPREAD),
                    rng.random_range(0.0..ceiling),
                    rng.random_range(-HORIZONTAL_SPREAD..HORIZONTAL_SPREAD),
                )
            })
            .collect();
        let velocities = (0..particles)
            .map(|_| {
                DVec3::new(
                    rng.random_range(-2.0..2.0),
                    rng.random_range(-18.0..-10.0),
                    rng.random_range(-2.0..2.0),
                )
            })
            .collect();
        let bolts = (0..bolts)
            .map(|_| LightningBolt {
                flash_elapsed: 0.0,
                next_flash_interval: rng.random_range(FLASH_INTERVAL.0..FLASH_INTERVAL.1),
                flashing: false,
            })
            .collect();
        Self {
            positions,
            velocities,
            bolts,
            ceiling,
            flash_offs: TaskList::new(),
        }
    }

    /// Advance rain and lightning by `dt` simulated seconds.
    pub fn simulate(&mut self, dt: f64, rng: &mut StdRng) {
        for bolt_index in self.flash_offs.advance(dt) {
            if let Some(bolt) = self.bolts.get_mut(bolt_index) {
                bolt.flashing = false;
            }
        }

        for (position, velocity) in self.positions.iter_mut().zip(&self.velocities) {
            *position += *velocity * dt;
            if position.y < 0.0 {
                *position = DVec3::new(
                    rng.random_range(-HORIZONTAL_SPREAD..HORIZONTAL_SPREAD),
                    rng.random_range(0.75 * self.ceiling..self.ceiling),
                    rng.random_range(-HORIZONTAL_SPREAD..HORIZONTAL_SPREAD),
                );
                position.y = position.y.clamp(0.0, self.ceiling);
            }
        }

        for (index, bolt) in self.bolts.iter_mut().enumerate() {
            bolt.flash_elapsed += dt;
            if bolt.flash_elapsed >= bolt.next_flash_interval {
                bolt.flashing = true;
                bolt.flash_elapsed = 0.0;
                bolt.next_flash_interval = rng.random_range(FLASH_INTERVAL.0..FLASH_INTERVAL.1);
                self.flash_offs
                    .schedule(rng.random_range(FLASH_DURATION.0..FLASH_DURATION.1), index);
            }
        }
    }

    /// Current raindrop positions.
    pub fn positions(&self) -> &[DVec3] {
        &self.positions
    }

    /// Current lightning bolts.
    pub fn bolts(&self) -> &[LightningBolt] {
        &self.bolts
    }

    /// Height of the rain volume.
    pub fn ceiling(&self) -> f64 {
        self.ceiling
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn particle_count_is_invariant_and_heights_stay_clamped() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut storm = StormState::new(50, 2, 60.0, &mut rng);

        for _ in 0..2_000 {
            storm.simulate(0.1, &mut rng);
            assert_eq!(storm.positions().len(), 50);
            for position in storm.positions() {
                assert!((0.0..=60.0).contains(&position.y));
            }
        }
    }

    #[test]
    fn bolts_flash_and_clear_again() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut storm = StormState::new(0, 1, 60.0, &mut rng);

        // Intervals are at most 8s, flashes at most 0.25s.
        let mut saw_flash = false;
        for _ in 0..100 {
            storm.simulate(0.1, &mut rng);
            if storm.bolts()[0].flashing {
                saw_flash = true;
            }
        }
        assert!(saw_flash);

        // With enough quiet time after the last trigger the flash clears.
        let mut saw_dark_after_flash = false;
        for _ in 0..100 {
            storm.simulate(0.1, &mut rng);
            if saw_flash && !storm.bolts()[0].flashing {
                saw_dark_after_flash = true;
            }
        }
        assert!(saw_dark_after_flash);
    }

    #[test]
    fn seeded_storms_evolve_identically() {
        let mut rng_a = StdRng::seed_from_u64(77);
        let mut rng_b = StdRng::seed_from_u64(77);
        let mut a = StormState::new(20, 2, 60.0, &mut rng_a);
        let mut b = StormState::new(20, 2, 60.0, &mut rng_b);

        for _ in 0..500 {
            a.simulate(0.05, &mut rng_a);
            b.simulate(0.05, &mut rng_b);
        }
        assert_eq!(a.positions(), b.positions());
    }
}
