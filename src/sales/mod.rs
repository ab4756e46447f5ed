mod error;
mod load;
mod parse;
mod record;

pub use error::LoadError;
pub use load::{load_sales, read_sales};
pub use record::{SaleRecord, SalesDataset};
