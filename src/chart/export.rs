use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::util::color_hex;

use super::ChartState;

#[derive(Clone, Debug, Serialize)]
pub struct LayoutExport {
    pub source: String,
    pub ticks: u64,
    pub alpha: f32,
    pub settled: bool,
    pub search: String,
    pub circles: Vec<ExportedCircle>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ExportedCircle {
    pub property_name: String,
    pub buyer: String,
    pub year: i32,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub fill: String,
}

impl LayoutExport {
    pub fn from_state(state: &ChartState) -> Self {
        let simulation = state.simulation();
        let circles = state
            .circles()
            .zip(state.records())
            .map(|(circle, record)| ExportedCircle {
                property_name: record.property_name.clone(),
                buyer: record.buyer.clone(),
                year: record.year,
                x: circle.center.x,
                y: circle.center.y,
                radius: circle.radius,
                fill: color_hex(circle.fill),
            })
            .collect();

        Self {
            source: state.dataset().source.clone(),
            ticks: simulation.ticks(),
            alpha: simulation.alpha(),
            settled: simulation.is_settled(),
            search: state.search().to_owned(),
            circles,
        }
    }
}

pub fn write_layout(path: &Path, export: &LayoutExport) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create layout file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, export)
        .with_context(|| format!("failed to write layout JSON to {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("failed to flush {}", path.display()))?;
    log::info!(
        "wrote {} circles to {}",
        export.circles.len(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::chart::ChartEvent;
    use crate::config::ChartConfig;
    use crate::sales::read_sales;

    use super::*;

    const CSV: &str = "PropertyName,PropertyAddress,City,SalePrice,Square_Footage,Units,Price_SF,Price_Unit,SaleDate,Buyer,Seller\n\
        Harbor Inn,12 Pier Rd,Seaside,500000,12000,40,41.67,12500,3/14/2021,Blue Lantern,Harbor Holdings\n\
        Grand Hotel,1 Main St,Metro,90000000,250000,300,360,200000,6/1/2021,Crest Partners,City Trust\n";

    fn settled_state() -> ChartState {
        let dataset = read_sales(CSV.as_bytes(), "inline.csv".to_owned(), 2021).expect("dataset");
        let mut state = ChartState::new(dataset, ChartConfig::default());
        state.handle(ChartEvent::SearchChanged("crest".into()));
        while state.handle(ChartEvent::Tick) {}
        state
    }

    #[test]
    fn export_mirrors_chart_state() {
        let state = settled_state();
        let export = LayoutExport::from_state(&state);

        assert!(export.settled);
        assert_eq!(export.search, "crest");
        assert_eq!(export.circles.len(), 2);
        assert_eq!(export.circles[0].property_name, "Harbor Inn");
        assert_eq!(export.circles[0].fill, "#bdbdbd");
        assert_eq!(export.circles[1].fill, "#00a300");
        assert_eq!(export.ticks, state.simulation().ticks());
    }

    #[test]
    fn writes_pretty_json_to_disk() {
        let state = settled_state();
        let export = LayoutExport::from_state(&state);
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("layout.json");

        write_layout(&path, &export).expect("layout written");

        let written: serde_json::Value =
            serde_json::from_reader(File::open(&path).expect("open layout")).expect("valid JSON");
        assert_eq!(written["circles"][1]["property_name"], "Grand Hotel");
        assert_eq!(written["circles"][1]["year"], 2021);
        assert_eq!(written["settled"], true);
    }
}
