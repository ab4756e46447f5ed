mod app;
mod chart;
mod config;
mod layout;
mod sales;
mod scales;
mod util;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use eframe::egui::Color32;

use crate::chart::{ChartEvent, ChartState, LayoutExport, write_layout};
use crate::config::ChartConfig;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// CSV of hotel sale transactions.
    #[arg(long, default_value = "2021_hotels_clean.csv")]
    data: PathBuf,

    /// Run the layout headless and write the settled circles as JSON.
    #[arg(long)]
    export_layout: Option<PathBuf>,

    /// Buyer filter applied before exporting.
    #[arg(long, requires = "export_layout")]
    search: Option<String>,

    /// Tick budget for the headless layout run.
    #[arg(long, default_value_t = 1000)]
    max_ticks: u64,

    /// Fill at the low end of the price-per-unit domain.
    #[arg(long, value_parser = parse_color_arg)]
    low_color: Option<Color32>,

    /// Fill at the high end of the price-per-unit domain.
    #[arg(long, value_parser = parse_color_arg)]
    high_color: Option<Color32>,
}

fn parse_color_arg(value: &str) -> Result<Color32, String> {
    util::parse_hex_color(value).ok_or_else(|| format!("expected #rrggbb, got {value:?}"))
}

fn chart_config(args: &Args) -> ChartConfig {
    let mut config = ChartConfig::default();
    if let Some(color) = args.low_color {
        config.color_range[0] = color;
    }
    if let Some(color) = args.high_color {
        config.color_range[1] = color;
    }
    config
}

fn export(args: &Args, output: &Path, config: ChartConfig) -> Result<()> {
    let dataset = sales::load_sales(&args.data, config.default_year)
        .with_context(|| format!("failed to load {}", args.data.display()))?;

    let mut state = ChartState::new(dataset, config);
    if let Some(query) = &args.search {
        state.handle(ChartEvent::SearchChanged(query.clone()));
    }

    let ticks = state.settle(args.max_ticks);
    if !state.simulation().is_settled() {
        log::warn!(
            "layout still moving after {ticks} ticks (alpha {:.4})",
            state.simulation().alpha()
        );
    }

    write_layout(output, &LayoutExport::from_state(&state))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = chart_config(&args);

    if let Some(output) = &args.export_layout {
        return export(&args, output, config);
    }

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([760.0, 560.0]),
        ..Default::default()
    };

    let data_path = args.data.clone();
    eframe::run_native(
        "hotel-bubbles",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::BubbleChartApp::new(
                cc,
                data_path.clone(),
                config.clone(),
            )))
        }),
    )
    .map_err(|error| anyhow!("failed to open chart window: {error}"))
}
