use eframe::egui::{Color32, Sense, Stroke, Ui, vec2};

use crate::chart::ChartEvent;

use super::super::ViewModel;
use super::super::render_utils::{chart_to_screen, circle_visible, inner_origin, ticks_for_frame};

impl ViewModel {
    pub(in crate::app) fn draw_chart(&mut self, ui: &mut Ui) {
        let config = self.chart.config();
        let outer_size = vec2(config.outer_width, config.outer_height);
        let margin = config.inner_origin();
        let stroke_color = config.stroke_color;

        let (response, painter) = ui.allocate_painter(outer_size, Sense::hover());
        let rect = response.rect;
        painter.rect_filled(rect, 0.0, Color32::WHITE);

        let origin = inner_origin(rect, margin);
        self.chart_origin = Some(origin);

        let delta_seconds = ui.input(|input| input.stable_dt);
        for _ in 0..ticks_for_frame(delta_seconds) {
            if !self.chart.handle(ChartEvent::Tick) {
                break;
            }
        }
        if !self.chart.simulation().is_settled() {
            ui.ctx().request_repaint();
        }

        self.handle_pointer(&response, origin);

        for circle in self.chart.circles() {
            let center = chart_to_screen(origin, circle.center);
            if !circle_visible(rect, center, circle.radius + circle.stroke_width) {
                continue;
            }
            painter.circle(
                center,
                circle.radius,
                circle.fill,
                Stroke::new(circle.stroke_width, stroke_color),
            );
        }
    }
}
