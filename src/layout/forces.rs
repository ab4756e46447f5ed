use eframe::egui::Vec2;

use crate::util::stable_unit;

use super::LayoutNode;
use super::quadtree::QuadNode;

/// Deterministic sub-pixel offsets for coincident points.
pub(super) struct Jiggle {
    counter: u64,
}

impl Jiggle {
    pub(super) fn new() -> Self {
        Self { counter: 0 }
    }

    pub(super) fn sample(&mut self) -> f32 {
        self.counter = self.counter.wrapping_add(1);
        stable_unit(self.counter) * 1e-6
    }
}

#[derive(Clone, Copy)]
pub(super) struct ManyBodyParams {
    pub(super) strength: f32,
    pub(super) alpha: f32,
    pub(super) theta: f32,
    pub(super) distance_min_sq: f32,
}

/// Velocity nudge toward each node's target, proportional to the distance.
pub(super) fn apply_targets(nodes: &mut [LayoutNode], x_strength: f32, y_strength: f32, alpha: f32) {
    for node in nodes {
        node.velocity.y += (node.target.y - node.position.y) * y_strength * alpha;
        node.velocity.x += (node.target.x - node.position.x) * x_strength * alpha;
    }
}

/// Pushes apart every pair whose predicted positions are closer than the sum
/// of their radii. The larger circle moves less.
pub(super) fn apply_collisions(
    nodes: &mut [LayoutNode],
    predicted: &mut Vec<Vec2>,
    radii: &mut Vec<f32>,
    strength: f32,
    jiggle: &mut Jiggle,
) {
    predicted.clear();
    radii.clear();
    for node in nodes.iter() {
        predicted.push(node.position + node.velocity);
        radii.push(node.radius);
    }

    let Some(tree) = QuadNode::build(predicted, radii) else {
        return;
    };

    for index in 0..nodes.len() {
        let origin = nodes[index].position + nodes[index].velocity;
        visit_collisions(&tree, index, origin, nodes, strength, jiggle);
    }
}

fn visit_collisions(
    quad: &QuadNode,
    index: usize,
    origin: Vec2,
    nodes: &mut [LayoutNode],
    strength: f32,
    jiggle: &mut Jiggle,
) {
    let radius = nodes[index].radius;
    if quad.bounds.out_of_reach(origin, radius + quad.max_radius) {
        return;
    }

    if !quad.is_leaf() {
        for child in quad.children.iter().flatten() {
            visit_collisions(child, index, origin, nodes, strength, jiggle);
        }
        return;
    }

    for &other in &quad.indices {
        if other <= index {
            continue;
        }

        let other_radius = nodes[other].radius;
        let reach = radius + other_radius;
        let mut delta = origin - nodes[other].position - nodes[other].velocity;
        let mut distance_sq = delta.length_sq();
        if distance_sq >= reach * reach {
            continue;
        }

        if delta.x == 0.0 {
            delta.x = jiggle.sample();
            distance_sq += delta.x * delta.x;
        }
        if delta.y == 0.0 {
            delta.y = jiggle.sample();
            distance_sq += delta.y * delta.y;
        }

        let distance = distance_sq.sqrt();
        let push = delta * ((reach - distance) / distance * strength);
        let other_sq = other_radius * other_radius;
        let share = other_sq / (radius * radius + other_sq);

        nodes[index].velocity += push * share;
        nodes[other].velocity -= push * (1.0 - share);
    }
}

/// Barnes-Hut body force. Negative strength repels.
pub(super) fn apply_many_body(
    nodes: &mut [LayoutNode],
    positions: &mut Vec<Vec2>,
    radii: &mut Vec<f32>,
    params: ManyBodyParams,
    jiggle: &mut Jiggle,
) {
    positions.clear();
    radii.clear();
    for node in nodes.iter() {
        positions.push(node.position);
        radii.push(node.radius);
    }

    let Some(tree) = QuadNode::build(positions, radii) else {
        return;
    };

    for (index, node) in nodes.iter_mut().enumerate() {
        let mut force = Vec2::ZERO;
        accumulate_many_body(&tree, index, positions, params, jiggle, &mut force);
        node.velocity += force;
    }
}

fn body_pull(mut delta: Vec2, weight: f32, params: ManyBodyParams, jiggle: &mut Jiggle) -> Vec2 {
    let mut distance_sq = delta.length_sq();
    if delta.x == 0.0 {
        delta.x = jiggle.sample();
        distance_sq += delta.x * delta.x;
    }
    if delta.y == 0.0 {
        delta.y = jiggle.sample();
        distance_sq += delta.y * delta.y;
    }
    if distance_sq < params.distance_min_sq {
        distance_sq = (params.distance_min_sq * distance_sq).sqrt();
    }

    delta * (params.strength * weight * params.alpha / distance_sq)
}

fn accumulate_many_body(
    quad: &QuadNode,
    index: usize,
    positions: &[Vec2],
    params: ManyBodyParams,
    jiggle: &mut Jiggle,
    force: &mut Vec2,
) {
    if quad.mass <= 0.0 {
        return;
    }

    let point = positions[index];

    if quad.is_leaf() {
        for &other in &quad.indices {
            if other == index {
                continue;
            }
            *force += body_pull(positions[other] - point, 1.0, params, jiggle);
        }
        return;
    }

    let delta = quad.center_of_mass - point;
    let distance = delta.length().max(0.0001);
    let can_approximate =
        !quad.bounds.contains(point) && (quad.bounds.side_length() / distance) < params.theta;

    if can_approximate {
        *force += body_pull(delta, quad.mass, params, jiggle);
        return;
    }

    for child in quad.children.iter().flatten() {
        accumulate_many_body(child, index, positions, params, jiggle, force);
    }
}
