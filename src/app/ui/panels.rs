use eframe::egui::{self, Align, Context, Layout};

use crate::chart::ChartState;

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn new(chart: ChartState) -> Self {
        Self {
            chart,
            search: String::new(),
            chart_origin: None,
        }
    }

    pub(in crate::app) fn show(&mut self, ctx: &Context, data_path: &str) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Hotel sales 2021");
                    ui.separator();
                    ui.label(format!("data: {data_path}"));
                    ui.label(format!("records: {}", self.chart.records().len()));
                    if self.chart.dataset().skipped > 0 {
                        ui.label(format!("skipped: {}", self.chart.dataset().skipped))
                            .on_hover_text("Rows with missing or non-numeric values; see the log.");
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui.button("Reheat").clicked() {
                            self.chart.reheat();
                        }
                        ui.label(self.simulation_text());
                    });
                });
            });

        egui::TopBottomPanel::top("search_bar")
            .resizable(false)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_chart(ui);
        });

        self.draw_tooltip(ctx);
    }

    fn simulation_text(&self) -> String {
        let simulation = self.chart.simulation();
        if simulation.is_settled() {
            format!("settled after {} ticks", simulation.ticks())
        } else {
            format!("settling: alpha {:.3}", simulation.alpha())
        }
    }
}
