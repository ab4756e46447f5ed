mod forces;
mod quadtree;

use eframe::egui::Vec2;

use crate::config::ForceConfig;
use forces::{Jiggle, ManyBodyParams, apply_collisions, apply_many_body, apply_targets};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutNode {
    pub position: Vec2,
    pub velocity: Vec2,
    pub target: Vec2,
    /// Collision radius, padding included.
    pub radius: f32,
}

impl LayoutNode {
    pub fn new(position: Vec2, target: Vec2, radius: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            target,
            radius,
        }
    }
}

/// Cooling force simulation. Alpha starts hot, decays every tick, and the
/// simulation is settled once alpha drops below `alpha_min`.
pub struct Simulation {
    nodes: Vec<LayoutNode>,
    config: ForceConfig,
    alpha: f32,
    alpha_target: f32,
    ticks: u64,
    jiggle: Jiggle,
    scratch_positions: Vec<Vec2>,
    scratch_radii: Vec<f32>,
}

impl Simulation {
    pub fn new(nodes: Vec<LayoutNode>, config: ForceConfig) -> Self {
        Self {
            nodes,
            config,
            alpha: 1.0,
            alpha_target: 0.0,
            ticks: 0,
            jiggle: Jiggle::new(),
            scratch_positions: Vec::new(),
            scratch_radii: Vec::new(),
        }
    }

    pub fn nodes(&self) -> &[LayoutNode] {
        &self.nodes
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_settled(&self) -> bool {
        self.alpha < self.config.alpha_min
    }

    pub fn reheat(&mut self) {
        self.alpha = 1.0;
        log::debug!("layout reheated at tick {}", self.ticks);
    }

    /// One tick while the simulation is still cooling. Returns false once
    /// settled without touching any node.
    pub fn step(&mut self) -> bool {
        if self.is_settled() {
            return false;
        }

        self.tick();
        if self.is_settled() {
            log::debug!(
                "layout settled after {} ticks (alpha {:.5})",
                self.ticks,
                self.alpha
            );
        }
        true
    }

    pub fn run_until_settled(&mut self, max_ticks: u64) -> u64 {
        let mut ran = 0;
        while ran < max_ticks && self.step() {
            ran += 1;
        }
        ran
    }

    /// Advances one tick regardless of alpha.
    pub fn tick(&mut self) {
        let config = self.config;
        self.alpha += (self.alpha_target - self.alpha) * config.alpha_decay;
        self.ticks += 1;

        if self.nodes.is_empty() {
            return;
        }

        apply_collisions(
            &mut self.nodes,
            &mut self.scratch_positions,
            &mut self.scratch_radii,
            config.collide_strength,
            &mut self.jiggle,
        );
        apply_targets(
            &mut self.nodes,
            config.x_strength,
            config.y_strength,
            self.alpha,
        );
        apply_many_body(
            &mut self.nodes,
            &mut self.scratch_positions,
            &mut self.scratch_radii,
            ManyBodyParams {
                strength: config.charge_strength,
                alpha: self.alpha,
                theta: config.theta,
                distance_min_sq: config.distance_min * config.distance_min,
            },
            &mut self.jiggle,
        );

        let retain = 1.0 - config.velocity_decay;
        for node in &mut self.nodes {
            node.velocity *= retain;
            node.position += node.velocity;
        }
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;

    use super::*;

    fn cluster(radii: &[f32], padding: f32) -> Vec<LayoutNode> {
        radii
            .iter()
            .map(|radius| LayoutNode::new(vec2(265.0, 0.0), vec2(265.0, 200.0), radius + padding))
            .collect()
    }

    #[test]
    fn settles_within_cooling_schedule() {
        let mut simulation = Simulation::new(cluster(&[5.0, 10.0], 40.0), ForceConfig::default());
        let ran = simulation.run_until_settled(10_000);

        assert!(simulation.is_settled());
        assert!((295..=305).contains(&ran), "ran {ran} ticks");
        assert!(!simulation.step());
        assert_eq!(simulation.ticks(), ran);
    }

    #[test]
    fn settled_layout_respects_collision_padding() {
        let padding = 40.0;
        let radii = [0.0, 3.0, 8.0, 12.5, 20.0, 31.6, 44.7, 70.7, 100.0, 15.8, 22.4, 5.0];
        let mut simulation = Simulation::new(cluster(&radii, padding), ForceConfig::default());
        simulation.run_until_settled(10_000);

        let nodes = simulation.nodes();
        for i in 0..nodes.len() {
            for j in (i + 1)..nodes.len() {
                let distance = (nodes[i].position - nodes[j].position).length();
                let required = radii[i] + radii[j] + padding;
                assert!(
                    distance >= required - 0.5,
                    "nodes {i} and {j} overlap: {distance} < {required}"
                );
            }
        }
    }

    #[test]
    fn cluster_centers_on_target() {
        let radii = [10.0, 10.0, 10.0, 10.0, 10.0, 10.0];
        let mut simulation = Simulation::new(cluster(&radii, 40.0), ForceConfig::default());
        simulation.run_until_settled(10_000);

        let nodes = simulation.nodes();
        let centroid =
            nodes.iter().map(|node| node.position).fold(Vec2::ZERO, |acc, p| acc + p) / nodes.len() as f32;
        assert!((centroid - vec2(265.0, 200.0)).length() < 2.0, "centroid {centroid:?}");
    }

    #[test]
    fn coincident_pair_is_separated_by_first_tick() {
        let mut simulation = Simulation::new(cluster(&[10.0, 10.0], 0.0), ForceConfig::default());
        simulation.tick();

        let nodes = simulation.nodes();
        assert!(nodes.iter().all(|node| node.position.x.is_finite() && node.position.y.is_finite()));
        assert!((nodes[0].position - nodes[1].position).length() > 1.0);
    }

    #[test]
    fn reheat_restarts_a_settled_layout() {
        let mut simulation = Simulation::new(cluster(&[10.0], 0.0), ForceConfig::default());
        simulation.run_until_settled(10_000);
        assert!(simulation.is_settled());

        simulation.reheat();
        assert!(!simulation.is_settled());
        assert!(simulation.step());
    }

    #[test]
    fn lone_node_walks_to_its_target() {
        let mut simulation = Simulation::new(cluster(&[10.0], 40.0), ForceConfig::default());
        simulation.run_until_settled(10_000);
        let node = simulation.nodes()[0];
        assert!((node.position - node.target).length() < 0.5);
    }
}
