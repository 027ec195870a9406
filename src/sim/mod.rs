//! Deterministic simulation module
//!
//! All simulation logic lives here. This module must be pure and deterministic:
//! - One synchronous tick at a time
//! - Seeded RNG only
//! - Stable iteration order (pool slot order)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod pool;
pub mod quadtree;
pub mod state;
pub mod tick;

pub use body::{Body, BodyKind, HullCorner, KindTag};
pub use collision::{
    Outcome, PairAction, classify_pair, elastic_collision, elastic_velocity, resolve_collision,
};
pub use pool::{BodyId, BodyPool};
pub use quadtree::{BORDER_COLOR, BORDER_WIDTH, Collision, NodeId, Quadrant, Quadtree, Rect};
pub use state::{GamePhase, World};
pub use tick::{TickInput, TickReport, tick, tick_with_tree};
