//! World state owned by the tick loop

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::body::{Body, KindTag};
use super::pool::{BodyId, BodyPool};
use crate::config::SimConfig;

/// Attempts at finding a spawn point clear of the ship before giving up
const SPAWN_ATTEMPTS: u32 = 16;

/// Current phase of the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Playing,
    /// Ship destroyed; ticks are no-ops
    GameOver,
}

/// Everything the tick loop mutates
#[derive(Debug, Clone)]
pub struct World {
    pub config: SimConfig,
    /// Canonical list of live bodies
    pub bodies: BodyPool,
    /// Player ship, while it exists
    pub ship: Option<BodyId>,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Asteroids removed after being destroyed
    pub asteroids_destroyed: u64,
    rng: Pcg32,
}

impl World {
    /// New world with the ship at the center and a full asteroid field
    pub fn new(config: SimConfig, seed: u64) -> Self {
        let mut world = Self::empty(config, seed);
        let ship = world.bodies.insert(Body::ship(&world.config));
        world.ship = Some(ship);
        world.top_up_asteroids();
        world
    }

    /// World with no bodies at all
    pub fn empty(config: SimConfig, seed: u64) -> Self {
        Self {
            config,
            bodies: BodyPool::new(),
            ship: None,
            phase: GamePhase::Playing,
            time_ticks: 0,
            asteroids_destroyed: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn ship_body(&self) -> Option<&Body> {
        self.ship.and_then(|id| self.bodies.get(id))
    }

    pub fn asteroid_count(&self) -> usize {
        self.bodies
            .iter()
            .filter(|(_, b)| b.tag() == KindTag::Asteroid)
            .count()
    }

    /// Spawn asteroids until the configured population is reached.
    /// Returns how many were spawned.
    pub fn top_up_asteroids(&mut self) -> usize {
        let missing = self.config.asteroid_count.saturating_sub(self.asteroid_count());
        for _ in 0..missing {
            let asteroid = self.random_asteroid();
            self.bodies.insert(asteroid);
        }
        if missing > 0 {
            log::debug!("Spawned {} asteroids at tick {}", missing, self.time_ticks);
        }
        missing
    }

    /// Asteroid on a random arena edge with a random heading, kept clear of
    /// the ship when possible
    fn random_asteroid(&mut self) -> Body {
        let size = self.config.arena_size;
        let ship_center = self.ship_body().map(|s| s.center);

        let mut center = Vec2::ZERO;
        for _ in 0..SPAWN_ATTEMPTS {
            let along = self.rng.random_range(0.0..size);
            center = match self.rng.random_range(0..4u8) {
                0 => Vec2::new(along, 0.0),
                1 => Vec2::new(along, size),
                2 => Vec2::new(0.0, along),
                _ => Vec2::new(size, along),
            };
            let clear = ship_center
                .is_none_or(|ship| ship.distance(center) >= self.config.spawn_clearance);
            if clear {
                break;
            }
        }

        let speed = if self.config.asteroid_speed_max > self.config.asteroid_speed_min {
            self.rng
                .random_range(self.config.asteroid_speed_min..self.config.asteroid_speed_max)
        } else {
            self.config.asteroid_speed_min
        };
        let heading = self.rng.random_range(-std::f32::consts::PI..std::f32::consts::PI);
        Body::asteroid(center, speed, heading, self.config.asteroid_radius)
    }
}
