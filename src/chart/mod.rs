mod export;
mod search;
mod tooltip;

use eframe::egui::{Color32, Pos2, vec2};

use crate::config::ChartConfig;
use crate::layout::{LayoutNode, Simulation};
use crate::sales::{SaleRecord, SalesDataset};
use crate::scales::Scales;

pub use export::{LayoutExport, write_layout};
use tooltip::{TooltipContent, TooltipState};

/// Everything that can change the chart. Pointer positions are in chart
/// coordinates, relative to the inner origin.
#[derive(Clone, Debug, PartialEq)]
pub enum ChartEvent {
    Tick,
    PointerEnter { index: usize, pointer: Pos2 },
    PointerMove { pointer: Pos2 },
    PointerLeave,
    SearchChanged(String),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircleView {
    pub index: usize,
    pub center: Pos2,
    pub radius: f32,
    pub fill: Color32,
    pub stroke_width: f32,
}

pub struct ChartState {
    config: ChartConfig,
    dataset: SalesDataset,
    radii: Vec<f32>,
    base_fills: Vec<Color32>,
    fills: Vec<Color32>,
    search: String,
    matched: usize,
    tooltip: TooltipState,
    simulation: Simulation,
}

impl ChartState {
    pub fn new(dataset: SalesDataset, config: ChartConfig) -> Self {
        let scales = Scales::new(&config, dataset.years());
        let [x_start, x_stop] = config.x_range();
        let fallback_x = (x_start + x_stop) * 0.5;

        let mut radii = Vec::with_capacity(dataset.len());
        let mut base_fills = Vec::with_capacity(dataset.len());
        let mut nodes = Vec::with_capacity(dataset.len());
        for record in &dataset.records {
            let radius = scales.radius.radius(record.sale_price);
            let target_x = scales.x.position(record.year).unwrap_or(fallback_x);

            radii.push(radius);
            base_fills.push(scales.color.color(record.price_per_unit));
            nodes.push(LayoutNode::new(
                vec2(target_x, 0.0),
                vec2(target_x, config.baseline_y),
                radius + config.forces.collide_padding,
            ));
        }

        let simulation = Simulation::new(nodes, config.forces);
        let fills = base_fills.clone();
        let matched = dataset.len();

        Self {
            config,
            dataset,
            radii,
            base_fills,
            fills,
            search: String::new(),
            matched,
            tooltip: TooltipState::default(),
            simulation,
        }
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn dataset(&self) -> &SalesDataset {
        &self.dataset
    }

    pub fn records(&self) -> &[SaleRecord] {
        &self.dataset.records
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn matched(&self) -> usize {
        self.matched
    }

    pub fn tooltip(&self) -> TooltipState {
        self.tooltip
    }

    pub fn hovered(&self) -> Option<usize> {
        self.tooltip.record
    }

    pub fn tooltip_content(&self) -> Option<TooltipContent> {
        self.tooltip
            .record
            .and_then(|index| self.dataset.records.get(index))
            .map(TooltipContent::for_record)
    }

    /// Applies one event. Returns true when anything visible changed.
    pub fn handle(&mut self, event: ChartEvent) -> bool {
        match event {
            ChartEvent::Tick => self.simulation.step(),
            ChartEvent::PointerEnter { index, pointer } => {
                if index >= self.dataset.len() || self.tooltip.record == Some(index) {
                    return false;
                }
                self.tooltip.show(index, pointer, self.config.tooltip_offset);
                true
            }
            ChartEvent::PointerMove { pointer } => {
                if !self.tooltip.is_visible() {
                    return false;
                }
                self.tooltip.follow(pointer, self.config.tooltip_offset);
                true
            }
            ChartEvent::PointerLeave => {
                let was_visible = self.tooltip.is_visible();
                self.tooltip.hide();
                was_visible
            }
            ChartEvent::SearchChanged(query) => {
                self.matched = search::apply_search(
                    &self.dataset.records,
                    &self.base_fills,
                    &query,
                    self.config.muted_fill,
                    &mut self.fills,
                );
                self.search = query;
                true
            }
        }
    }

    pub fn reheat(&mut self) {
        self.simulation.reheat();
    }

    /// Runs the layout to rest without drawing. Returns the ticks spent.
    pub fn settle(&mut self, max_ticks: u64) -> u64 {
        self.simulation.run_until_settled(max_ticks)
    }

    /// Circles as they should be drawn right now, in dataset order.
    pub fn circles(&self) -> impl Iterator<Item = CircleView> + '_ {
        self.simulation
            .nodes()
            .iter()
            .enumerate()
            .map(move |(index, node)| CircleView {
                index,
                center: node.position.to_pos2(),
                radius: self.radii[index],
                fill: self.fills[index],
                stroke_width: if self.tooltip.record == Some(index) {
                    self.config.hover_stroke_width
                } else {
                    self.config.stroke_width
                },
            })
    }

    /// Closest circle whose disc contains `point`.
    pub fn hit_test(&self, point: Pos2) -> Option<usize> {
        self.circles()
            .filter_map(|circle| {
                let distance = circle.center.distance(point);
                if distance <= circle.radius {
                    Some((circle.index, distance))
                } else {
                    None
                }
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }
}
