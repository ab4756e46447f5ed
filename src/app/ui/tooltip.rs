use eframe::egui::{self, Context, Order, RichText};

use super::super::ViewModel;
use super::super::render_utils::chart_to_screen;

impl ViewModel {
    /// Overlay for the hovered sale, anchored next to the pointer.
    pub(in crate::app) fn draw_tooltip(&self, ctx: &Context) {
        let Some(content) = self.chart.tooltip_content() else {
            return;
        };
        let Some(origin) = self.chart_origin else {
            return;
        };

        let anchor = chart_to_screen(origin, self.chart.tooltip().anchor);
        egui::Area::new(egui::Id::new("sale_tooltip"))
            .order(Order::Tooltip)
            .fixed_pos(anchor)
            .interactable(false)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.set_max_width(320.0);
                    ui.label(RichText::new(&content.title).heading());
                    ui.add_space(4.0);
                    for (label, value) in &content.rows {
                        ui.horizontal_wrapped(|ui| {
                            ui.label(RichText::new(format!("{label}:")).strong());
                            ui.label(value.as_str());
                        });
                    }
                });
            });
    }
}
