#[derive(Clone, Debug, PartialEq)]
pub struct SaleRecord {
    pub property_name: String,
    pub address: String,
    pub city: String,
    pub sale_price: f64,
    /// Shown as written in the file.
    pub square_footage: String,
    pub units: String,
    pub price_per_sf: Option<f64>,
    pub price_per_unit: f64,
    pub sale_date: String,
    pub buyer: String,
    pub seller: String,
    pub year: i32,
}

#[derive(Clone, Debug)]
pub struct SalesDataset {
    pub source: String,
    pub records: Vec<SaleRecord>,
    pub skipped: usize,
}

impl SalesDataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Distinct sale years in ascending order.
    pub fn years(&self) -> Vec<i32> {
        let mut years = self.records.iter().map(|record| record.year).collect::<Vec<_>>();
        years.sort_unstable();
        years.dedup();
        years
    }
}
