use eframe::egui::{self, Pos2};

use super::super::ViewModel;
use super::super::render_utils::{hover_events, screen_to_chart};

impl ViewModel {
    /// Turns this frame's pointer into enter/move/leave events for the
    /// circle under it.
    pub(in crate::app) fn handle_pointer(&mut self, response: &egui::Response, origin: Pos2) {
        let pointer = response
            .hover_pos()
            .map(|screen| screen_to_chart(origin, screen));
        let hit = pointer.and_then(|point| self.chart.hit_test(point));

        let mut changed = false;
        for event in hover_events(self.chart.hovered(), hit, pointer) {
            changed |= self.chart.handle(event);
        }

        if changed {
            response.ctx.request_repaint();
        }
    }
}
