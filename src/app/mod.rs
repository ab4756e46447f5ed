use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context, Pos2};

use crate::chart::ChartState;
use crate::config::ChartConfig;
use crate::sales::{SalesDataset, load_sales};

mod canvas;
mod render_utils;
mod ui;

pub struct BubbleChartApp {
    data_path: PathBuf,
    config: ChartConfig,
    state: AppState,
}

enum AppState {
    Loading {
        rx: Receiver<Result<SalesDataset, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    chart: ChartState,
    search: String,
    chart_origin: Option<Pos2>,
}

impl BubbleChartApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, data_path: PathBuf, config: ChartConfig) -> Self {
        let state = Self::start_load(data_path.clone(), config.default_year);
        Self {
            data_path,
            config,
            state,
        }
    }

    fn spawn_load(data_path: PathBuf, default_year: i32) -> Receiver<Result<SalesDataset, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_sales(&data_path, default_year).map_err(|error| {
                log::error!("{error}");
                error.to_string()
            });
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(data_path: PathBuf, default_year: i32) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(data_path, default_year),
        }
    }
}

impl eframe::App for BubbleChartApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(Ok(dataset)) => {
                        let chart = ChartState::new(dataset, self.config.clone());
                        transition = Some(AppState::Ready(Box::new(ViewModel::new(chart))));
                    }
                    Ok(Err(error)) => transition = Some(AppState::Error(error)),
                    Err(TryRecvError::Empty) => ctx.request_repaint(),
                    Err(TryRecvError::Disconnected) => {
                        transition =
                            Some(AppState::Error("Background load worker disconnected".to_owned()));
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading hotel sales...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load hotel sales");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(
                            self.data_path.clone(),
                            self.config.default_year,
                        ));
                    }
                });
            }
            AppState::Ready(model) => {
                model.show(ctx, &self.data_path.display().to_string());
            }
        }

        if let Some(next_state) = transition {
            self.state = next_state;
        }
    }
}
