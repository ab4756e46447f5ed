use serde::Deserialize;

use super::error::RecordError;
use super::record::SaleRecord;

pub(super) const REQUIRED_COLUMNS: [&str; 11] = [
    "PropertyName",
    "PropertyAddress",
    "City",
    "SalePrice",
    "Square_Footage",
    "Units",
    "Price_SF",
    "Price_Unit",
    "SaleDate",
    "Buyer",
    "Seller",
];

#[derive(Clone, Debug, Default, Deserialize)]
pub(super) struct RawSaleRow {
    #[serde(default, rename = "PropertyName")]
    pub(super) property_name: Option<String>,
    #[serde(default, rename = "PropertyAddress")]
    pub(super) address: Option<String>,
    #[serde(default, rename = "City")]
    pub(super) city: Option<String>,
    #[serde(default, rename = "SalePrice")]
    pub(super) sale_price: Option<String>,
    #[serde(default, rename = "Square_Footage")]
    pub(super) square_footage: Option<String>,
    #[serde(default, rename = "Units")]
    pub(super) units: Option<String>,
    #[serde(default, rename = "Price_SF")]
    pub(super) price_per_sf: Option<String>,
    #[serde(default, rename = "Price_Unit")]
    pub(super) price_per_unit: Option<String>,
    #[serde(default, rename = "SaleDate")]
    pub(super) sale_date: Option<String>,
    #[serde(default, rename = "Buyer")]
    pub(super) buyer: Option<String>,
    #[serde(default, rename = "Seller")]
    pub(super) seller: Option<String>,
    #[serde(default)]
    pub(super) year: Option<String>,
}

impl RawSaleRow {
    pub(super) fn into_record(self, default_year: i32) -> Result<SaleRecord, RecordError> {
        let year = match self.year.as_deref().map(str::trim) {
            None | Some("") => default_year,
            Some(value) => parse_year(value)?,
        };

        Ok(SaleRecord {
            sale_price: parse_amount("SalePrice", self.sale_price.as_deref())?,
            price_per_unit: parse_amount("Price_Unit", self.price_per_unit.as_deref())?,
            price_per_sf: parse_amount("Price_SF", self.price_per_sf.as_deref()).ok(),
            square_footage: text(self.square_footage),
            units: text(self.units),
            property_name: text(self.property_name),
            address: text(self.address),
            city: text(self.city),
            sale_date: text(self.sale_date),
            buyer: text(self.buyer),
            seller: text(self.seller),
            year,
        })
    }
}

fn text(value: Option<String>) -> String {
    value.map(|value| value.trim().to_owned()).unwrap_or_default()
}

/// Accepts plain numbers as well as `$1,250,000` style currency cells.
pub(super) fn parse_amount(column: &'static str, raw: Option<&str>) -> Result<f64, RecordError> {
    let trimmed = raw.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Err(RecordError::MissingNumber { column });
    }

    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, trimmed),
    };
    let cleaned = unsigned
        .strip_prefix('$')
        .unwrap_or(unsigned)
        .replace(',', "");

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() && !cleaned.starts_with(['+', '-']) => {
            Ok(if negative { -value } else { value })
        }
        _ => Err(RecordError::InvalidNumber {
            column,
            value: trimmed.to_owned(),
        }),
    }
}

fn parse_year(value: &str) -> Result<i32, RecordError> {
    let invalid = || RecordError::InvalidNumber {
        column: "year",
        value: value.to_owned(),
    };

    if let Ok(year) = value.parse::<i32>() {
        return Ok(year);
    }

    let numeric = value.parse::<f64>().map_err(|_| invalid())?;
    if numeric.is_finite() && numeric.fract() == 0.0 && numeric.abs() <= i32::MAX as f64 {
        Ok(numeric as i32)
    } else {
        Err(invalid())
    }
}
