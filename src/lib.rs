//! Quadroids - quadtree collision engine for a toroidal asteroid arena
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, quadtree, collision rules, tick loop)
//! - `config`: Data-driven tuning loaded from JSON
//! - `error`: Configuration errors

pub mod config;
pub mod error;
pub mod sim;

pub use config::SimConfig;
pub use error::ConfigError;

use glam::Vec2;

/// Default tuning constants. `SimConfig::default()` is built from these.
pub mod consts {
    /// Side of the square arena
    pub const ARENA_SIZE: f32 = 512.0;
    /// Quadtree cells at or below this side switch to exact overlap checks
    pub const MIN_CELL_SIZE: f32 = 1.0;
    /// Deepest quadtree level that may still subdivide
    pub const MAX_DEPTH: u32 = 12;
    /// Ticks a bounced body sits out of collision analysis
    pub const COLLISION_COOLDOWN: u32 = 5;

    /// Ship defaults
    pub const SHIP_SPEED: f32 = 5.0;
    pub const SHIP_RADIUS: f32 = 15.0;
    /// Radians per tick at full turn input
    pub const SHIP_TURN_RATE: f32 = 0.1;

    /// Bullet defaults
    pub const BULLET_SPEED: f32 = 8.0;
    pub const BULLET_RADIUS: f32 = 3.0;
    pub const BULLET_DEATH_TIME: u32 = 40;
    /// Bullet spawn offset, in ship radii, ahead of the ship
    pub const BULLET_SPAWN_DISTANCE: f32 = 1.3;

    /// Asteroid defaults
    pub const ASTEROID_RADIUS: f32 = 10.0;
    pub const ASTEROID_COUNT: usize = 8;
    pub const ASTEROID_SPEED_MIN: f32 = 1.0;
    pub const ASTEROID_SPEED_MAX: f32 = 3.0;
    /// Respawned asteroids keep at least this far from the ship
    pub const SPAWN_CLEARANCE: f32 = 60.0;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
