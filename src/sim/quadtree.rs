//! Quadtree broad phase with narrow-phase resolution at the leaves
//!
//! Bodies are inserted at the root every tick. A node holding two or more
//! bodies pushes them down into the quadrants their bounding squares overlap,
//! creating those quadrants on first use. Once a node is no larger than the
//! minimum cell size, an inserted body that overlaps the node's first other
//! body is resolved against everything in the node instead of subdividing.
//!
//! Insertion runs on an explicit stack so pathological clustering cannot blow
//! the call stack. Frames are pushed so they pop in the same depth-first order
//! a recursive implementation would use.

use glam::Vec2;

use super::collision::{Outcome, resolve_collision};
use super::pool::{BodyId, BodyPool};
use crate::config::SimConfig;

/// Color handed to the border callback
pub const BORDER_COLOR: [u8; 3] = [0, 255, 0];
/// Line width handed to the border callback
pub const BORDER_WIDTH: u32 = 1;

/// One of the four sub-regions of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    TopLeft = 0,
    TopRight = 1,
    BottomLeft = 2,
    BottomRight = 3,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::TopLeft,
        Quadrant::TopRight,
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Axis-aligned square handed to renderers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// Index of a node inside its tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);
}

/// A resolved pair, in the order it was handed to the rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collision {
    pub first: BodyId,
    pub second: BodyId,
    pub outcome: Outcome,
}

#[derive(Debug, Clone)]
struct Node {
    /// Top-left corner
    corner: Vec2,
    /// Side length
    distance: f32,
    depth: u32,
    values: Vec<BodyId>,
    leaves: [Option<NodeId>; 4],
}

impl Node {
    fn new(corner: Vec2, distance: f32, depth: u32) -> Self {
        Self {
            corner,
            distance,
            depth,
            values: Vec::new(),
            leaves: [None; 4],
        }
    }

    fn rect(&self) -> Rect {
        Rect {
            x: self.corner.x,
            y: self.corner.y,
            w: self.distance,
            h: self.distance,
        }
    }

    fn leaf_corner(&self, quadrant: Quadrant) -> Vec2 {
        let half = self.distance / 2.0;
        match quadrant {
            Quadrant::TopLeft => self.corner,
            Quadrant::TopRight => Vec2::new(self.corner.x + half, self.corner.y),
            Quadrant::BottomLeft => Vec2::new(self.corner.x, self.corner.y + half),
            Quadrant::BottomRight => self.corner + Vec2::splat(half),
        }
    }

    /// Quadrants touched by the square `center ± radius`, indexed by `Quadrant`
    fn overlapped_quadrants(&self, center: Vec2, radius: f32) -> [bool; 4] {
        let mid = self.corner + Vec2::splat(self.distance / 2.0);
        let top = center.y - radius < mid.y;
        let bottom = center.y + radius > mid.y;
        let left = center.x - radius < mid.x;
        let right = center.x + radius > mid.x;
        [top && left, top && right, bottom && left, bottom && right]
    }
}

/// Pending work on the insertion stack
#[derive(Debug, Clone, Copy)]
enum Frame {
    Insert {
        node: NodeId,
        body: BodyId,
    },
    /// Re-insert bodies of `node` (from `cursor` on, except `skip`) that no
    /// child has picked up yet
    Propagate {
        node: NodeId,
        skip: BodyId,
        cursor: usize,
    },
}

#[derive(Debug, Clone)]
pub struct Quadtree {
    nodes: Vec<Node>,
    min_cell_size: f32,
    max_depth: u32,
    cooldown: u32,
    collisions: Vec<Collision>,
}

impl Quadtree {
    /// Empty tree covering the whole arena
    pub fn new(config: &SimConfig) -> Self {
        Self::with_region(Vec2::ZERO, config.arena_size, config)
    }

    /// Empty tree whose root covers the square at `corner` with side `side`
    pub fn with_region(corner: Vec2, side: f32, config: &SimConfig) -> Self {
        Self {
            nodes: vec![Node::new(corner, side, 0)],
            min_cell_size: config.min_cell_size,
            max_depth: config.max_depth,
            cooldown: config.collision_cooldown,
            collisions: Vec::new(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Bodies recorded at a node, in insertion order
    pub fn bodies_at(&self, node: NodeId) -> &[BodyId] {
        self.nodes
            .get(node.0)
            .map(|n| n.values.as_slice())
            .unwrap_or(&[])
    }

    pub fn children(&self, node: NodeId) -> [Option<NodeId>; 4] {
        self.nodes.get(node.0).map(|n| n.leaves).unwrap_or([None; 4])
    }

    pub fn region(&self, node: NodeId) -> Option<Rect> {
        self.nodes.get(node.0).map(Node::rect)
    }

    /// Whether any node still records `body`
    pub fn contains_anywhere(&self, body: BodyId) -> bool {
        self.nodes.iter().any(|n| n.values.contains(&body))
    }

    /// Every pair handed to the collision rules so far, in order
    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }

    /// Create the child at `index` if it is a valid quadrant. Invalid indices
    /// are ignored.
    pub fn create_leaf_at(&mut self, node: NodeId, index: usize) -> Option<NodeId> {
        let quadrant = Quadrant::from_index(index)?;
        if node.0 >= self.nodes.len() {
            return None;
        }
        Some(self.leaf_or_create(node, quadrant))
    }

    fn leaf_or_create(&mut self, node: NodeId, quadrant: Quadrant) -> NodeId {
        if let Some(leaf) = self.nodes[node.0].leaves[quadrant.index()] {
            return leaf;
        }
        let parent = &self.nodes[node.0];
        let leaf = Node::new(
            parent.leaf_corner(quadrant),
            parent.distance / 2.0,
            parent.depth + 1,
        );
        let id = NodeId(self.nodes.len());
        self.nodes.push(leaf);
        self.nodes[node.0].leaves[quadrant.index()] = Some(id);
        id
    }

    fn in_any_child(&self, node: NodeId, body: BodyId) -> bool {
        self.nodes[node.0]
            .leaves
            .iter()
            .flatten()
            .any(|leaf| self.nodes[leaf.0].values.contains(&body))
    }

    /// Insert a body at the root, subdividing and resolving collisions as
    /// needed. Destroyed, cooling-down or stale bodies are ignored.
    pub fn insert(&mut self, pool: &mut BodyPool, body: BodyId) {
        let mut stack = vec![Frame::Insert {
            node: NodeId::ROOT,
            body,
        }];

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Insert { node, body } => self.insert_step(pool, node, body, &mut stack),
                Frame::Propagate { node, skip, cursor } => {
                    self.propagate_step(node, skip, cursor, &mut stack)
                }
            }
        }
    }

    fn insert_step(
        &mut self,
        pool: &mut BodyPool,
        node: NodeId,
        body: BodyId,
        stack: &mut Vec<Frame>,
    ) {
        let Some(obj) = pool.get(body) else {
            return;
        };
        if !obj.is_insertable() {
            return;
        }
        let (center, radius) = (obj.center, obj.radius);

        let n = &mut self.nodes[node.0];
        if !n.values.contains(&body) {
            n.values.push(body);
        }
        if n.values.len() <= 1 {
            return;
        }

        if n.distance <= self.min_cell_size {
            let first = n.values.iter().copied().find(|&id| id != body);
            let touching = first
                .and_then(|id| pool.get(id))
                .is_some_and(|other| obj.overlaps(other));

            if touching {
                let others: Vec<BodyId> =
                    n.values.iter().copied().filter(|&id| id != body).collect();
                for other in others {
                    self.resolve(pool, other, body);
                }
                return;
            }
        }

        if n.depth >= self.max_depth {
            return;
        }

        // A point body sitting exactly on the midpoint touches no child
        let hits = n.overlapped_quadrants(center, radius);
        if !hits.contains(&true) {
            return;
        }

        stack.push(Frame::Propagate {
            node,
            skip: body,
            cursor: 0,
        });

        for quadrant in Quadrant::ALL.into_iter().rev() {
            if hits[quadrant.index()] {
                let leaf = self.leaf_or_create(node, quadrant);
                stack.push(Frame::Insert { node: leaf, body });
            }
        }
    }

    fn propagate_step(&self, node: NodeId, skip: BodyId, cursor: usize, stack: &mut Vec<Frame>) {
        let values = &self.nodes[node.0].values;
        for (i, &val) in values.iter().enumerate().skip(cursor) {
            if val != skip && !self.in_any_child(node, val) {
                stack.push(Frame::Propagate {
                    node,
                    skip,
                    cursor: i + 1,
                });
                stack.push(Frame::Insert { node, body: val });
                return;
            }
        }
    }

    fn resolve(&mut self, pool: &mut BodyPool, first: BodyId, second: BodyId) {
        if let Some(outcome) = resolve_collision(pool, first, second, self.cooldown) {
            log::trace!("collision {:?} / {:?}: {:?}", first, second, outcome);
            self.collisions.push(Collision {
                first,
                second,
                outcome,
            });
        }
    }

    /// Remove a body from every node that records it. Absent bodies are a
    /// no-op. A body recorded in a child is always recorded in its parent,
    /// so branches without it are skipped.
    pub fn delete(&mut self, body: BodyId) {
        let mut stack = vec![NodeId::ROOT];

        while let Some(node) = stack.pop() {
            let n = &mut self.nodes[node.0];
            let Some(pos) = n.values.iter().position(|&id| id == body) else {
                continue;
            };
            n.values.remove(pos);
            stack.extend(n.leaves.iter().flatten().copied());
        }
    }

    /// Visit every node pre-order, handing its square to `draw` along with
    /// the border color and line width.
    pub fn draw_borders<F>(&self, mut draw: F)
    where
        F: FnMut(Rect, [u8; 3], u32),
    {
        let mut stack = vec![NodeId::ROOT];
        while let Some(node) = stack.pop() {
            let n = &self.nodes[node.0];
            draw(n.rect(), BORDER_COLOR, BORDER_WIDTH);
            stack.extend(n.leaves.iter().rev().flatten().copied());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::body::Body;
    use proptest::prelude::*;

    fn config() -> SimConfig {
        SimConfig::default()
    }

    fn rock(x: f32, y: f32, vx: f32, vy: f32) -> Body {
        let mut body = Body::asteroid(Vec2::new(x, y), 0.0, 0.0, 10.0);
        body.velocity = Vec2::new(vx, vy);
        body
    }

    /// Tree whose root is already at the minimum cell size
    fn min_cell_tree() -> Quadtree {
        Quadtree::with_region(Vec2::ZERO, 1.0, &config())
    }

    fn occurrences(tree: &Quadtree, body: BodyId) -> Vec<usize> {
        (0..tree.node_count())
            .map(|i| {
                tree.bodies_at(NodeId(i))
                    .iter()
                    .filter(|&&id| id == body)
                    .count()
            })
            .collect()
    }

    #[test]
    fn test_single_body_stays_at_root() {
        let mut pool = BodyPool::new();
        let a = pool.insert(rock(100.0, 100.0, 0.0, 0.0));
        let mut tree = Quadtree::new(&config());

        tree.insert(&mut pool, a);
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.bodies_at(NodeId::ROOT), &[a]);
    }

    #[test]
    fn test_insert_twice_never_duplicates() {
        let mut pool = BodyPool::new();
        let a = pool.insert(rock(100.0, 100.0, 0.0, 0.0));
        let b = pool.insert(rock(400.0, 400.0, 0.0, 0.0));
        let mut tree = Quadtree::new(&config());

        for _ in 0..2 {
            tree.insert(&mut pool, a);
            tree.insert(&mut pool, b);
        }
        assert!(occurrences(&tree, a).iter().all(|&n| n <= 1));
        assert!(occurrences(&tree, b).iter().all(|&n| n <= 1));
    }

    #[test]
    fn test_separated_bodies_split_into_quadrants() {
        let mut pool = BodyPool::new();
        let a = pool.insert(rock(100.0, 100.0, 0.0, 0.0));
        let b = pool.insert(rock(400.0, 400.0, 0.0, 0.0));
        let mut tree = Quadtree::new(&config());
        tree.insert(&mut pool, a);
        tree.insert(&mut pool, b);

        let [tl, tr, bl, br] = tree.children(NodeId::ROOT);
        assert!(tr.is_none());
        assert!(bl.is_none());
        // The earlier body is pushed down once a sibling creates quadrants
        assert_eq!(tree.bodies_at(tl.unwrap()), &[a]);
        assert_eq!(tree.bodies_at(br.unwrap()), &[b]);
        assert_eq!(
            tree.region(br.unwrap()),
            Some(Rect {
                x: 256.0,
                y: 256.0,
                w: 256.0,
                h: 256.0
            })
        );
        assert!(tree.collisions().is_empty());
    }

    #[test]
    fn test_straddling_body_enters_every_touched_quadrant() {
        let mut pool = BodyPool::new();
        let a = pool.insert(rock(256.0, 256.0, 0.0, 0.0));
        let b = pool.insert(rock(50.0, 50.0, 0.0, 0.0));
        let mut tree = Quadtree::new(&config());
        tree.insert(&mut pool, a);
        tree.insert(&mut pool, b);

        for leaf in tree.children(NodeId::ROOT) {
            assert!(tree.bodies_at(leaf.unwrap()).contains(&a));
        }
    }

    #[test]
    fn test_cooling_asteroid_is_rejected_until_cooled() {
        let mut pool = BodyPool::new();
        let a = pool.insert(rock(100.0, 100.0, 0.0, 0.0));
        pool.get_mut(a).unwrap().age = 2;

        let mut tree = Quadtree::new(&config());
        tree.insert(&mut pool, a);
        assert!(!tree.contains_anywhere(a));

        while pool.get_mut(a).unwrap().cooldown_tick() {}
        tree.insert(&mut pool, a);
        assert!(tree.contains_anywhere(a));
    }

    #[test]
    fn test_destroyed_and_stale_bodies_are_rejected() {
        let mut pool = BodyPool::new();
        let a = pool.insert(rock(100.0, 100.0, 0.0, 0.0));
        pool.get_mut(a).unwrap().destroyed = true;
        let b = pool.insert(rock(200.0, 200.0, 0.0, 0.0));
        pool.remove(b);

        let mut tree = Quadtree::new(&config());
        tree.insert(&mut pool, a);
        tree.insert(&mut pool, b);
        assert!(tree.bodies_at(NodeId::ROOT).is_empty());
    }

    #[test]
    fn test_old_bullet_is_still_insertable() {
        let config = config();
        let mut pool = BodyPool::new();
        let mut bullet = Body::bullet(Vec2::new(30.0, 30.0), 0.0, &config);
        bullet.age = 39;
        let id = pool.insert(bullet);

        let mut tree = Quadtree::new(&config);
        tree.insert(&mut pool, id);
        assert!(tree.contains_anywhere(id));
    }

    #[test]
    fn test_asteroid_bounce_at_min_cell_matches_formula() {
        let mut pool = BodyPool::new();
        let a = pool.insert(rock(0.2, 0.5, 2.0, 0.5));
        let b = pool.insert(rock(0.8, 0.4, -1.0, 0.0));
        let before_a = pool.get(a).unwrap().clone();
        let before_b = pool.get(b).unwrap().clone();

        let mut tree = min_cell_tree();
        tree.insert(&mut pool, a);
        tree.insert(&mut pool, b);

        // Existing body first, new body second
        let expected_a = crate::sim::collision::elastic_velocity(
            before_a.velocity,
            before_a.mass(),
            before_a.center,
            before_b.velocity,
            before_b.mass(),
            before_b.center,
        );
        let expected_b = crate::sim::collision::elastic_velocity(
            before_b.velocity,
            before_b.mass(),
            before_b.center,
            before_a.velocity,
            before_a.mass(),
            before_a.center,
        );
        let after_a = pool.get(a).unwrap();
        let after_b = pool.get(b).unwrap();
        assert!((after_a.velocity - expected_a).length() < 1e-4);
        assert!((after_b.velocity - expected_b).length() < 1e-4);
        assert_eq!(after_a.age, 5);
        assert_eq!(after_b.age, 5);
        assert_eq!(tree.node_count(), 1);
        assert_eq!(
            tree.collisions(),
            &[Collision {
                first: a,
                second: b,
                outcome: Outcome::Bounced
            }]
        );
    }

    #[test]
    fn test_bullet_hits_asteroid_at_min_cell() {
        let config = config();
        let mut pool = BodyPool::new();
        let rock_id = pool.insert(rock(0.5, 0.5, 1.0, 1.0));
        let bullet_id = pool.insert(Body::bullet(Vec2::new(0.6, 0.5), 0.0, &config));
        let bullet_velocity = pool.get(bullet_id).unwrap().velocity;

        let mut tree = min_cell_tree();
        tree.insert(&mut pool, rock_id);
        tree.insert(&mut pool, bullet_id);

        let r = pool.get(rock_id).unwrap();
        let b = pool.get(bullet_id).unwrap();
        assert!(r.destroyed && b.destroyed);
        assert_eq!(r.velocity, Vec2::new(1.0, 1.0));
        assert_eq!(b.velocity, bullet_velocity);
    }

    #[test]
    fn test_bullet_passes_through_ship_at_min_cell() {
        let config = config();
        let mut pool = BodyPool::new();
        let mut ship = Body::ship(&config);
        ship.center = Vec2::new(0.5, 0.5);
        ship.velocity = Vec2::new(0.0, 3.0);
        let ship_id = pool.insert(ship);
        let bullet_id = pool.insert(Body::bullet(Vec2::new(0.5, 0.6), 1.0, &config));
        let bullet_velocity = pool.get(bullet_id).unwrap().velocity;

        let mut tree = min_cell_tree();
        tree.insert(&mut pool, ship_id);
        tree.insert(&mut pool, bullet_id);

        assert!(!pool.get(ship_id).unwrap().destroyed);
        assert!(!pool.get(bullet_id).unwrap().destroyed);
        assert_eq!(pool.get(ship_id).unwrap().velocity, Vec2::new(0.0, 3.0));
        assert_eq!(pool.get(bullet_id).unwrap().velocity, bullet_velocity);
        assert_eq!(tree.collisions()[0].outcome, Outcome::Ignored);
    }

    #[test]
    fn test_coincident_asteroids_in_full_arena_skip_resolution() {
        let config = config();
        let mut pool = BodyPool::new();
        let ship = pool.insert(Body::ship(&config));
        let a = pool.insert(Body::asteroid(Vec2::new(10.0, 10.0), 2.0, 0.0, 10.0));
        let b = pool.insert(Body::asteroid(Vec2::new(10.0, 10.0), 0.0, 0.0, 10.0));

        let mut tree = Quadtree::new(&config);
        for id in [ship, a, b] {
            tree.insert(&mut pool, id);
        }

        assert!(!tree.collisions().is_empty());
        assert!(
            tree.collisions()
                .iter()
                .all(|c| c.outcome == Outcome::Degenerate)
        );
        assert_eq!(pool.get(a).unwrap().velocity, Vec2::new(2.0, 0.0));
        assert_eq!(pool.get(b).unwrap().velocity, Vec2::ZERO);
        assert_eq!(pool.get(a).unwrap().age, 0);
        assert!(!pool.get(ship).unwrap().destroyed);
    }

    #[test]
    fn test_asteroids_touching_in_full_arena_bounce_once() {
        let config = config();
        let mut pool = BodyPool::new();
        let a = pool.insert(rock(100.0, 100.0, 1.0, 0.0));
        let b = pool.insert(rock(115.0, 100.0, -1.0, 0.0));

        let mut tree = Quadtree::new(&config);
        tree.insert(&mut pool, a);
        tree.insert(&mut pool, b);

        // Cooldown gating stops the pair from being resolved in every shared cell
        let bounces = tree
            .collisions()
            .iter()
            .filter(|c| c.outcome == Outcome::Bounced)
            .count();
        assert_eq!(bounces, 1);
        assert!((pool.get(a).unwrap().velocity - Vec2::new(-1.0, 0.0)).length() < 1e-5);
        assert!((pool.get(b).unwrap().velocity - Vec2::new(1.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_near_miss_terminates_at_depth_cap() {
        let config = SimConfig {
            max_depth: 10,
            ..SimConfig::default()
        };
        let mut pool = BodyPool::new();
        // Bounding squares overlap, circles do not
        let a = pool.insert(rock(100.0, 100.0, 0.0, 0.0));
        let b = pool.insert(rock(116.0, 116.0, 0.0, 0.0));

        let mut tree = Quadtree::new(&config);
        tree.insert(&mut pool, a);
        tree.insert(&mut pool, b);

        assert!(tree.collisions().is_empty());
        assert!(tree.node_count() > 1);
    }

    #[test]
    fn test_point_bodies_on_midpoint_stay_at_root() {
        let mut pool = BodyPool::new();
        let a = pool.insert(Body::asteroid(Vec2::splat(256.0), 0.0, 0.0, 0.0));
        let b = pool.insert(Body::asteroid(Vec2::splat(256.0), 0.0, 0.0, 0.0));

        let mut tree = Quadtree::new(&config());
        tree.insert(&mut pool, a);
        tree.insert(&mut pool, b);

        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.bodies_at(NodeId::ROOT), &[a, b]);
        assert!(tree.collisions().is_empty());
    }

    #[test]
    fn test_delete_removes_from_every_node() {
        let mut pool = BodyPool::new();
        let a = pool.insert(rock(256.0, 256.0, 0.0, 0.0));
        let b = pool.insert(rock(40.0, 40.0, 0.0, 0.0));
        let c = pool.insert(rock(470.0, 470.0, 0.0, 0.0));
        let mut tree = Quadtree::new(&config());
        for id in [a, b, c] {
            tree.insert(&mut pool, id);
        }
        assert!(occurrences(&tree, a).iter().filter(|&&n| n > 0).count() > 1);

        tree.delete(a);
        assert!(!tree.contains_anywhere(a));
        assert!(tree.contains_anywhere(b));
        assert!(tree.contains_anywhere(c));

        // Deleting again, or deleting something never inserted, is a no-op
        let before = tree.node_count();
        tree.delete(a);
        assert_eq!(tree.node_count(), before);
    }

    #[test]
    fn test_create_leaf_with_invalid_index_is_noop() {
        let mut tree = Quadtree::new(&config());
        assert!(tree.create_leaf_at(NodeId::ROOT, 7).is_none());
        assert_eq!(tree.node_count(), 1);

        let leaf = tree.create_leaf_at(NodeId::ROOT, 1).unwrap();
        assert_eq!(tree.create_leaf_at(NodeId::ROOT, 1), Some(leaf));
        assert_eq!(
            tree.region(leaf),
            Some(Rect {
                x: 256.0,
                y: 0.0,
                w: 256.0,
                h: 256.0
            })
        );
    }

    #[test]
    fn test_draw_borders_visits_every_node_preorder() {
        let mut pool = BodyPool::new();
        let a = pool.insert(rock(100.0, 100.0, 0.0, 0.0));
        let b = pool.insert(rock(400.0, 400.0, 0.0, 0.0));
        let mut tree = Quadtree::new(&config());
        tree.insert(&mut pool, a);
        tree.insert(&mut pool, b);

        let mut rects = Vec::new();
        tree.draw_borders(|rect, color, width| {
            assert_eq!(color, BORDER_COLOR);
            assert_eq!(width, 1);
            rects.push(rect);
        });
        assert_eq!(rects.len(), tree.node_count());
        assert_eq!(rects[0].w, 512.0);
        assert_eq!((rects[1].x, rects[1].y), (0.0, 0.0));
        assert_eq!((rects[2].x, rects[2].y), (256.0, 256.0));
    }

    proptest! {
        #[test]
        fn prop_insert_is_idempotent_per_node(
            points in prop::collection::vec((0.0f32..512.0, 0.0f32..512.0), 1..12),
        ) {
            let mut pool = BodyPool::new();
            let ids: Vec<BodyId> = points
                .iter()
                .map(|&(x, y)| pool.insert(Body::asteroid(Vec2::new(x, y), 0.0, 0.0, 3.0)))
                .collect();
            let mut tree = Quadtree::new(&SimConfig::default());
            for &id in ids.iter().chain(ids.iter()) {
                tree.insert(&mut pool, id);
            }
            for i in 0..tree.node_count() {
                let values = tree.bodies_at(NodeId(i));
                for id in values {
                    prop_assert_eq!(values.iter().filter(|&v| v == id).count(), 1);
                }
            }
        }

        #[test]
        fn prop_delete_leaves_no_trace(
            points in prop::collection::vec((0.0f32..512.0, 0.0f32..512.0), 2..12),
            victim in 0usize..12,
        ) {
            let mut pool = BodyPool::new();
            let ids: Vec<BodyId> = points
                .iter()
                .map(|&(x, y)| pool.insert(Body::asteroid(Vec2::new(x, y), 0.0, 0.0, 3.0)))
                .collect();
            let mut tree = Quadtree::new(&SimConfig::default());
            for &id in &ids {
                tree.insert(&mut pool, id);
            }
            let victim = ids[victim % ids.len()];
            tree.delete(victim);
            prop_assert!(!tree.contains_anywhere(victim));
        }
    }
}
