use eframe::egui::Ui;

use crate::chart::ChartEvent;

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.label("Search buyer")
                .on_hover_text("Case-insensitive substring match; other sales turn gray.");
            let response = ui.text_edit_singleline(&mut self.search);
            if response.changed() {
                self.chart
                    .handle(ChartEvent::SearchChanged(self.search.clone()));
                ui.ctx().request_repaint();
            }

            if !self.search.is_empty() {
                ui.label(format!(
                    "{} of {} match",
                    self.chart.matched(),
                    self.chart.records().len()
                ));
            }
        });
    }
}
