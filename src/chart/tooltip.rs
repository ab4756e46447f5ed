use eframe::egui::{Pos2, Vec2};

use crate::sales::SaleRecord;
use crate::util::format_usd;

#[derive(Clone, Debug, PartialEq)]
pub struct TooltipContent {
    pub title: String,
    pub rows: Vec<(&'static str, String)>,
}

impl TooltipContent {
    pub fn for_record(record: &SaleRecord) -> Self {
        Self {
            title: record.property_name.clone(),
            rows: vec![
                ("Address", record.address.clone()),
                ("City", record.city.clone()),
                ("Sale Price", format_usd(record.sale_price)),
                ("Square Footage", record.square_footage.clone()),
                ("Units", record.units.clone()),
                (
                    "Price per Sq Ft",
                    record.price_per_sf.map_or_else(|| "n/a".to_owned(), format_usd),
                ),
                ("Price per Unit", format_usd(record.price_per_unit)),
                ("Sale Date", record.sale_date.clone()),
                ("Buyer", record.buyer.clone()),
                ("Seller", record.seller.clone()),
            ],
        }
    }
}

/// Which record the overlay describes and where its corner sits.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TooltipState {
    pub record: Option<usize>,
    pub anchor: Pos2,
}

impl TooltipState {
    pub fn show(&mut self, record: usize, pointer: Pos2, offset: Vec2) {
        self.record = Some(record);
        self.follow(pointer, offset);
    }

    pub fn follow(&mut self, pointer: Pos2, offset: Vec2) {
        self.anchor = pointer + offset;
    }

    pub fn hide(&mut self) {
        self.record = None;
    }

    pub fn is_visible(&self) -> bool {
        self.record.is_some()
    }
}
