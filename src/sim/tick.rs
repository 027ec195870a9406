//! Per-tick simulation loop
//!
//! Order within a tick: apply input to the ship, move and age every body,
//! build a fresh quadtree and insert every live body (collisions resolve
//! during insertion), then purge what was destroyed or expired and top the
//! asteroid field back up.

use super::body::{Body, KindTag};
use super::collision::Outcome;
use super::pool::BodyId;
use super::quadtree::{Collision, Quadtree};
use super::state::{GamePhase, World};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Turn amount in [-1, 1], scaled by the configured turn rate
    pub turn: f32,
    /// Hold to move along the heading
    pub thrust: bool,
    /// Fire one bullet this tick
    pub fire: bool,
    /// Demo mode: the ship steers and fires on its own
    pub autopilot: bool,
}

/// What happened during one tick
#[derive(Debug, Clone, Default)]
pub struct TickReport {
    pub collisions: Vec<Collision>,
    /// Bodies purged this tick (destroyed or expired)
    pub removed: usize,
    /// Asteroids spawned to refill the field
    pub spawned: usize,
    /// Quadtree nodes built this tick
    pub nodes: usize,
}

impl TickReport {
    pub fn count(&self, outcome: Outcome) -> usize {
        self.collisions
            .iter()
            .filter(|c| c.outcome == outcome)
            .count()
    }
}

/// Advance the world by one tick
pub fn tick(world: &mut World, input: &TickInput) -> TickReport {
    tick_with_tree(world, input, |_| {})
}

/// Advance the world by one tick, handing the finished quadtree to `inspect`
/// (e.g. for drawing node borders) before it is dropped.
pub fn tick_with_tree<F>(world: &mut World, input: &TickInput, inspect: F) -> TickReport
where
    F: FnOnce(&Quadtree),
{
    if world.phase == GamePhase::GameOver {
        return TickReport::default();
    }
    world.time_ticks += 1;

    let input = if input.autopilot {
        autopilot_input(world.time_ticks)
    } else {
        input.clone()
    };
    apply_ship_input(world, &input);

    // Move and age
    let arena = world.config.arena_size;
    for (_, body) in world.bodies.iter_mut() {
        body.advance(arena);
        if body.is_bullet() {
            body.tick_decay();
        } else {
            body.cooldown_tick();
        }
    }

    // Broad phase + resolution
    let mut tree = Quadtree::new(&world.config);
    for id in world.bodies.ids() {
        if world.bodies.get(id).is_some_and(|body| !body.is_expired()) {
            tree.insert(&mut world.bodies, id);
        }
    }

    // Purge
    let doomed: Vec<BodyId> = world
        .bodies
        .iter()
        .filter(|(_, body)| body.destroyed || body.is_expired())
        .map(|(id, _)| id)
        .collect();
    for &id in &doomed {
        tree.delete(id);
        if let Some(body) = world.bodies.remove(id) {
            on_removed(world, id, &body);
        }
    }

    inspect(&tree);

    let spawned = if world.phase == GamePhase::Playing {
        world.top_up_asteroids()
    } else {
        0
    };

    let report = TickReport {
        collisions: tree.collisions().to_vec(),
        removed: doomed.len(),
        spawned,
        nodes: tree.node_count(),
    };
    log::debug!(
        "tick {}: {} bodies, {} nodes, {} collisions, {} removed",
        world.time_ticks,
        world.bodies.len(),
        report.nodes,
        report.collisions.len(),
        report.removed
    );
    report
}

fn apply_ship_input(world: &mut World, input: &TickInput) {
    let Some(ship_id) = world.ship else {
        return;
    };
    let config = &world.config;
    let Some(ship) = world.bodies.get_mut(ship_id) else {
        return;
    };

    ship.turn(input.turn.clamp(-1.0, 1.0) * config.ship_turn_rate);
    ship.give_speed(input.thrust, config.ship_speed);

    if input.fire {
        if let Some(bullet) = ship.summon_bullet(config) {
            world.bodies.insert(bullet);
        }
    }
}

fn on_removed(world: &mut World, id: BodyId, body: &Body) {
    match body.tag() {
        KindTag::Ship if world.ship == Some(id) => {
            world.ship = None;
            world.phase = GamePhase::GameOver;
            log::info!("Ship destroyed at tick {}", world.time_ticks);
        }
        KindTag::Asteroid if body.destroyed => world.asteroids_destroyed += 1,
        _ => {}
    }
}

/// Scripted input for demo runs: sweep slowly, pulse thrust, fire in bursts
fn autopilot_input(time_ticks: u64) -> TickInput {
    let t = time_ticks as f32 * 0.02;
    TickInput {
        turn: t.sin(),
        thrust: time_ticks % 120 < 30,
        fire: time_ticks % 8 == 0,
        autopilot: true,
    }
}
