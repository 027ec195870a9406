//! Simulated bodies
//!
//! Every entity in the arena is a circle. The kind-specific data (ship
//! orientation, bullet lifetime) lives in [`BodyKind`]; everything the
//! collision engine needs is shared on [`Body`].

use std::f32::consts::PI;

use glam::Vec2;

use crate::config::SimConfig;
use crate::{normalize_angle, polar_to_cartesian};

/// Angle between neighbouring hull corners of the ship
const THIRD_OF_CIRCLE: f32 = 2.0 * PI / 3.0;

/// Kind-specific body data
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyKind {
    /// Player ship; `rotate` is its heading in radians
    Ship { rotate: f32 },
    Asteroid,
    /// Projectile that expires once `age >= death_time`
    Bullet { death_time: u32 },
}

/// Fieldless kind tag, used where only the variant matters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KindTag {
    Ship,
    Asteroid,
    Bullet,
}

impl BodyKind {
    pub fn tag(&self) -> KindTag {
        match self {
            BodyKind::Ship { .. } => KindTag::Ship,
            BodyKind::Asteroid => KindTag::Asteroid,
            BodyKind::Bullet { .. } => KindTag::Bullet,
        }
    }

    /// Display color for renderers
    pub fn color(&self) -> [u8; 3] {
        match self {
            BodyKind::Ship { .. } => [170, 55, 170],
            BodyKind::Asteroid => [240, 240, 210],
            BodyKind::Bullet { .. } => [240, 80, 80],
        }
    }
}

/// Ship hull corner, as an offset in thirds of a turn from the heading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HullCorner {
    Front,
    Right,
    Left,
}

impl HullCorner {
    fn offset(self) -> f32 {
        match self {
            HullCorner::Front => 0.0,
            HullCorner::Right => 1.0,
            HullCorner::Left => -1.0,
        }
    }
}

/// A circular body in the arena
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub center: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    /// Bullets: ticks lived. Others: remaining collision cooldown.
    pub age: u32,
    /// Inert and pending removal
    pub destroyed: bool,
    pub kind: BodyKind,
}

impl Body {
    fn new(center: Vec2, velocity: Vec2, radius: f32, kind: BodyKind) -> Self {
        Self {
            center,
            velocity,
            radius,
            age: 0,
            destroyed: false,
            kind,
        }
    }

    /// Asteroid moving at `speed` along `heading` (radians)
    pub fn asteroid(center: Vec2, speed: f32, heading: f32, radius: f32) -> Self {
        Self::new(
            center,
            polar_to_cartesian(speed, heading),
            radius,
            BodyKind::Asteroid,
        )
    }

    /// Bullet fired along `heading` at the configured bullet speed
    pub fn bullet(center: Vec2, heading: f32, config: &SimConfig) -> Self {
        Self::new(
            center,
            polar_to_cartesian(config.bullet_speed, heading),
            config.bullet_radius,
            BodyKind::Bullet {
                death_time: config.bullet_death_time,
            },
        )
    }

    /// Stationary ship at the arena center, facing +x
    pub fn ship(config: &SimConfig) -> Self {
        let half = config.arena_size / 2.0;
        Self::new(
            Vec2::splat(half),
            Vec2::ZERO,
            config.ship_radius,
            BodyKind::Ship { rotate: 0.0 },
        )
    }

    #[inline]
    pub fn tag(&self) -> KindTag {
        self.kind.tag()
    }

    #[inline]
    pub fn is_bullet(&self) -> bool {
        matches!(self.kind, BodyKind::Bullet { .. })
    }

    #[inline]
    pub fn is_ship(&self) -> bool {
        matches!(self.kind, BodyKind::Ship { .. })
    }

    /// Area of the collision circle, used as mass
    #[inline]
    pub fn mass(&self) -> f32 {
        PI * self.radius * self.radius
    }

    /// Move one tick: wrap to the opposite edge if outside the arena, then
    /// translate by velocity.
    pub fn advance(&mut self, arena_size: f32) {
        if self.center.x > arena_size {
            self.center.x = 0.0;
        } else if self.center.x < 0.0 {
            self.center.x = arena_size;
        }

        if self.center.y > arena_size {
            self.center.y = 0.0;
        } else if self.center.y < 0.0 {
            self.center.y = arena_size;
        }

        self.center += self.velocity;
    }

    /// Age a bullet by one tick. Returns true once it has expired.
    /// Other kinds are untouched and never expire.
    pub fn tick_decay(&mut self) -> bool {
        match self.kind {
            BodyKind::Bullet { death_time } => {
                self.age += 1;
                self.age >= death_time
            }
            _ => false,
        }
    }

    /// Count down the collision cooldown. Returns true while still cooling.
    /// Bullets use `age` as a lifetime and are left alone.
    pub fn cooldown_tick(&mut self) -> bool {
        if self.is_bullet() || self.age == 0 {
            return false;
        }
        self.age -= 1;
        true
    }

    /// Bullet lifetime is over
    pub fn is_expired(&self) -> bool {
        match self.kind {
            BodyKind::Bullet { death_time } => self.age >= death_time,
            _ => false,
        }
    }

    /// Whether the quadtree accepts this body: not destroyed, and not a
    /// non-bullet that is still cooling down.
    #[inline]
    pub fn is_insertable(&self) -> bool {
        !self.destroyed && (self.is_bullet() || self.age == 0)
    }

    /// Whether two collision circles touch or overlap
    #[inline]
    pub fn overlaps(&self, other: &Body) -> bool {
        self.center.distance(other.center) <= self.radius + other.radius
    }

    /// Ship heading, if this is a ship
    pub fn heading(&self) -> Option<f32> {
        match self.kind {
            BodyKind::Ship { rotate } => Some(rotate),
            _ => None,
        }
    }

    /// Rotate a ship by `delta` radians. No-op for other kinds.
    pub fn turn(&mut self, delta: f32) {
        if let BodyKind::Ship { rotate } = &mut self.kind {
            *rotate = normalize_angle(*rotate + delta);
        }
    }

    /// Set ship velocity along its heading, or stop it. No-op for other kinds.
    pub fn give_speed(&mut self, thrust: bool, ship_speed: f32) {
        if let Some(rotate) = self.heading() {
            let speed = if thrust { ship_speed } else { 0.0 };
            self.velocity = polar_to_cartesian(speed, rotate);
        }
    }

    /// One hull corner of a ship
    pub fn hull_corner(&self, corner: HullCorner) -> Option<Vec2> {
        let rotate = self.heading()? + THIRD_OF_CIRCLE * corner.offset();
        Some(self.center + polar_to_cartesian(self.radius, rotate))
    }

    /// Front, right and left hull corners of a ship
    pub fn hull_corners(&self) -> Option<[Vec2; 3]> {
        Some([
            self.hull_corner(HullCorner::Front)?,
            self.hull_corner(HullCorner::Right)?,
            self.hull_corner(HullCorner::Left)?,
        ])
    }

    /// New bullet just ahead of a ship, fired along its heading
    pub fn summon_bullet(&self, config: &SimConfig) -> Option<Body> {
        let rotate = self.heading()?;
        let offset = polar_to_cartesian(self.radius * config.bullet_spawn_distance, rotate);
        Some(Body::bullet(self.center + offset, rotate, config))
    }
}
