//! Simulation tuning
//!
//! Every tunable lives in [`SimConfig`]. Missing JSON keys fall back to the
//! compile-time defaults in [`crate::consts`], so a config file only needs the
//! values it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Immutable simulation configuration, passed to constructors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === Arena / quadtree ===
    /// Side of the square, toroidally wrapped arena
    pub arena_size: f32,
    /// Cells at or below this side do exact overlap checks instead of subdividing
    pub min_cell_size: f32,
    /// Nodes at this depth never subdivide (root is depth 0)
    pub max_depth: u32,
    /// Cooldown ticks given to both bodies after an elastic bounce
    pub collision_cooldown: u32,

    // === Ship ===
    pub ship_speed: f32,
    pub ship_radius: f32,
    /// Radians per tick at full turn input
    pub ship_turn_rate: f32,

    // === Bullets ===
    pub bullet_speed: f32,
    pub bullet_radius: f32,
    /// Ticks a bullet lives
    pub bullet_death_time: u32,
    /// Spawn offset ahead of the ship, in ship radii
    pub bullet_spawn_distance: f32,

    // === Asteroids ===
    pub asteroid_radius: f32,
    /// Population the driver keeps topped up (0 disables respawning)
    pub asteroid_count: usize,
    pub asteroid_speed_min: f32,
    pub asteroid_speed_max: f32,
    /// Minimum distance between a respawned asteroid and the ship
    pub spawn_clearance: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            arena_size: ARENA_SIZE,
            min_cell_size: MIN_CELL_SIZE,
            max_depth: MAX_DEPTH,
            collision_cooldown: COLLISION_COOLDOWN,

            ship_speed: SHIP_SPEED,
            ship_radius: SHIP_RADIUS,
            ship_turn_rate: SHIP_TURN_RATE,

            bullet_speed: BULLET_SPEED,
            bullet_radius: BULLET_RADIUS,
            bullet_death_time: BULLET_DEATH_TIME,
            bullet_spawn_distance: BULLET_SPAWN_DISTANCE,

            asteroid_radius: ASTEROID_RADIUS,
            asteroid_count: ASTEROID_COUNT,
            asteroid_speed_min: ASTEROID_SPEED_MIN,
            asteroid_speed_max: ASTEROID_SPEED_MAX,
            spawn_clearance: SPAWN_CLEARANCE,
        }
    }
}

impl SimConfig {
    /// Parse and validate a config from JSON text
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&text)?;
        log::info!("Loaded simulation config from {}", path.display());
        Ok(config)
    }

    /// Reject values the engine cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("arena_size", self.arena_size)?;
        positive("min_cell_size", self.min_cell_size)?;
        positive("ship_radius", self.ship_radius)?;
        positive("bullet_radius", self.bullet_radius)?;
        positive("asteroid_radius", self.asteroid_radius)?;
        non_negative("ship_speed", self.ship_speed)?;
        non_negative("ship_turn_rate", self.ship_turn_rate)?;
        non_negative("bullet_speed", self.bullet_speed)?;
        non_negative("bullet_spawn_distance", self.bullet_spawn_distance)?;
        non_negative("asteroid_speed_min", self.asteroid_speed_min)?;
        non_negative("spawn_clearance", self.spawn_clearance)?;

        if self.asteroid_speed_max < self.asteroid_speed_min || !self.asteroid_speed_max.is_finite()
        {
            return Err(ConfigError::Invalid {
                name: "asteroid_speed_max",
                value: self.asteroid_speed_max as f64,
                reason: "must be finite and at least asteroid_speed_min",
            });
        }
        if self.max_depth > 32 {
            return Err(ConfigError::Invalid {
                name: "max_depth",
                value: self.max_depth as f64,
                reason: "must be at most 32",
            });
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            name,
            value: value as f64,
            reason: "must be positive and finite",
        })
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            name,
            value: value as f64,
            reason: "must be non-negative and finite",
        })
    }
}
