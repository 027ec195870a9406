//! Collision resolution rules
//!
//! The quadtree only decides *which* pairs touch. What happens to them
//! depends on the kinds involved:
//! - bullet vs ship: nothing
//! - any other pair with a ship or bullet: both destroyed
//! - asteroid vs asteroid: elastic bounce, then both cool down

use glam::Vec2;

use super::body::{Body, KindTag};
use super::pool::{BodyId, BodyPool};

/// What the rules call for, based on kinds alone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairAction {
    Ignore,
    Destroy,
    Bounce,
}

/// What resolving a pair actually did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ignored,
    Destroyed,
    Bounced,
    /// Bounce skipped because the centers coincide
    Degenerate,
}

/// Pick the rule for a pair of kinds. Symmetric in its arguments.
pub fn classify_pair(first: KindTag, second: KindTag) -> PairAction {
    use KindTag::*;

    match (first, second) {
        // Ships are immune to bullets, including their own
        (Bullet, Ship) | (Ship, Bullet) => PairAction::Ignore,
        (Ship, _) | (_, Ship) | (Bullet, _) | (_, Bullet) => PairAction::Destroy,
        (Asteroid, Asteroid) => PairAction::Bounce,
    }
}

/// Post-collision velocity of body A along the line of centers
///
/// v_A' = v_A - (c_A - c_B) * 2 m_B ((v_A - v_B)·(c_A - c_B)) / (m_A + m_B) / |c_A - c_B|²
///
/// Caller guarantees `c_a != c_b`.
pub fn elastic_velocity(v_a: Vec2, m_a: f32, c_a: Vec2, v_b: Vec2, m_b: f32, c_b: Vec2) -> Vec2 {
    let delta = c_a - c_b;
    let factor = 2.0 * m_b * (v_a - v_b).dot(delta) / (m_a + m_b) / delta.length_squared();
    v_a - delta * factor
}

/// New velocities for both bodies of an elastic collision
pub fn elastic_collision(first: &Body, second: &Body) -> (Vec2, Vec2) {
    let (m_1, m_2) = (first.mass(), second.mass());
    (
        elastic_velocity(
            first.velocity,
            m_1,
            first.center,
            second.velocity,
            m_2,
            second.center,
        ),
        elastic_velocity(
            second.velocity,
            m_2,
            second.center,
            first.velocity,
            m_1,
            first.center,
        ),
    )
}

/// Apply the collision rules to a pair, in place.
///
/// Returns `None` when either handle is stale or both name the same body.
pub fn resolve_collision(
    pool: &mut BodyPool,
    first: BodyId,
    second: BodyId,
    cooldown: u32,
) -> Option<Outcome> {
    let (a, b) = pool.get_pair_mut(first, second)?;

    let outcome = match classify_pair(a.tag(), b.tag()) {
        PairAction::Ignore => Outcome::Ignored,
        PairAction::Destroy => {
            a.destroyed = true;
            b.destroyed = true;
            Outcome::Destroyed
        }
        PairAction::Bounce if a.center == b.center => Outcome::Degenerate,
        PairAction::Bounce => {
            let (v_a, v_b) = elastic_collision(a, b);
            a.velocity = v_a;
            b.velocity = v_b;
            a.age = cooldown;
            b.age = cooldown;
            Outcome::Bounced
        }
    };
    Some(outcome)
}
