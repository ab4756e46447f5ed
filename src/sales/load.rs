use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ByteRecord, ReaderBuilder, StringRecord, Trim};

use super::error::LoadError;
use super::parse::{REQUIRED_COLUMNS, RawSaleRow};
use super::record::SalesDataset;

pub fn load_sales(path: &Path, default_year: i32) -> Result<SalesDataset, LoadError> {
    let source = path.display().to_string();
    let file = File::open(path).map_err(|source_error| LoadError::Open {
        path: source.clone(),
        source: source_error,
    })?;

    read_sales(file, source, default_year)
}

/// Reads a header-first CSV. Rows with unusable numbers are skipped and
/// counted, and cells that are not valid UTF-8 are decoded lossily. Only
/// header and structural CSV errors abort the whole load.
pub fn read_sales<R: Read>(
    reader: R,
    source: String,
    default_year: i32,
) -> Result<SalesDataset, LoadError> {
    let csv_error = |error: csv::Error| LoadError::Csv {
        path: source.clone(),
        source: error,
    };

    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(reader);

    let headers = reader.headers().map_err(csv_error)?.clone();
    check_columns(&headers, &source)?;

    let mut records = Vec::new();
    let mut skipped = 0usize;
    let mut bytes = ByteRecord::new();

    loop {
        match reader.read_byte_record(&mut bytes) {
            Ok(true) => {}
            Ok(false) => break,
            Err(error) => return Err(csv_error(error)),
        }

        let line = bytes.position().map(|position| position.line()).unwrap_or(0);
        let row = match StringRecord::from_byte_record(bytes.clone()) {
            Ok(row) => row,
            Err(_) => {
                log::warn!("{source} line {line}: replacing invalid UTF-8 in sale record");
                decode_lossy(&bytes)
            }
        };
        if row.iter().all(|field| field.trim().is_empty()) {
            continue;
        }

        let raw = row
            .deserialize::<RawSaleRow>(Some(&headers))
            .map_err(csv_error)?;

        match raw.into_record(default_year) {
            Ok(record) => records.push(record),
            Err(error) => {
                log::warn!("{source} line {line}: skipping sale record: {error}");
                skipped += 1;
            }
        }
    }

    if records.is_empty() {
        return Err(LoadError::Empty {
            path: source,
            skipped,
        });
    }

    log::info!(
        "loaded {} sale records from {source} ({skipped} skipped)",
        records.len()
    );

    Ok(SalesDataset {
        source,
        records,
        skipped,
    })
}

fn decode_lossy(bytes: &ByteRecord) -> StringRecord {
    bytes
        .iter()
        .map(String::from_utf8_lossy)
        .collect()
}

fn check_columns(headers: &StringRecord, source: &str) -> Result<(), LoadError> {
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|header| header == column) {
            return Err(LoadError::MissingColumn {
                path: source.to_owned(),
                column,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const HEADER: &str = "PropertyName,PropertyAddress,City,SalePrice,Square_Footage,Units,Price_SF,Price_Unit,SaleDate,Buyer,Seller";

    fn read(body: &str) -> Result<SalesDataset, LoadError> {
        read_sales(body.as_bytes(), "inline.csv".to_owned(), 2021)
    }

    #[test]
    fn reads_rows_in_file_order() {
        let csv = format!(
            "{HEADER}\n\
             Harbor Inn,12 Pier Rd,Seaside,500000,12000,40,41.67,12500,3/14/2021,Blue Lantern,Harbor Holdings\n\
             \"Grand Hotel, The\",1 Main St,Metro,\"$90,000,000\",250000,300,360,300000,6/1/2021,Crest Partners,City Trust\n"
        );
        let dataset = read(&csv).expect("dataset loads");

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.skipped, 0);
        assert_eq!(dataset.records[0].property_name, "Harbor Inn");
        assert_eq!(dataset.records[1].property_name, "Grand Hotel, The");
        assert_eq!(dataset.records[1].sale_price, 90_000_000.0);
        assert_eq!(dataset.years(), vec![2021]);
    }

    #[test]
    fn malformed_rows_are_skipped_not_fatal() {
        let csv = format!(
            "{HEADER},year\n\
             Harbor Inn,12 Pier Rd,Seaside,500000,12000,40,41.67,12500,3/14/2021,Blue Lantern,Harbor Holdings,2021\n\
             Broken Lodge,9 Elm,Nowhere,unknown,1000,10,5,100,1/1/2021,Someone,Else,2021\n\
             Old Motel,3 Oak,Town,750000,8000,25,93.75,30000,2/2/2020,Roadside LLC,Family Trust,2020\n"
        );
        let dataset = read(&csv).expect("dataset loads");

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.skipped, 1);
        assert_eq!(dataset.years(), vec![2020, 2021]);
    }

    #[test]
    fn short_rows_default_trailing_text() {
        let csv = format!(
            "{HEADER}\nHarbor Inn,12 Pier Rd,Seaside,500000,12000,40,41.67,12500,3/14/2021\n"
        );
        let dataset = read(&csv).expect("dataset loads");
        assert_eq!(dataset.records[0].buyer, "");
        assert_eq!(dataset.records[0].seller, "");
    }

    #[test]
    fn invalid_utf8_cells_are_decoded_lossily() {
        let mut body = format!(
            "{HEADER}\n\
             Harbor Inn,12 Pier Rd,Seaside,500000,12000,40,41.67,12500,3/14/2021,Blue Lantern,Harbor Holdings\n"
        )
        .into_bytes();
        body.extend_from_slice(
            b"Caf\xe9 Hotel,2 Rue Haute,Lyon,600000,9000,30,66.67,20000,4/4/2021,Buyer Co,Seller Co\n",
        );

        let dataset =
            read_sales(body.as_slice(), "latin1.csv".to_owned(), 2021).expect("dataset loads");
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.skipped, 0);
        assert_eq!(dataset.records[1].property_name, "Caf\u{FFFD} Hotel");
        assert_eq!(dataset.records[1].sale_price, 600_000.0);
    }

    #[test]
    fn blank_detail_cells_keep_the_row() {
        let csv = format!(
            "{HEADER}\n\
             Harbor Inn,12 Pier Rd,Seaside,500000,,,,12500,3/14/2021,Blue Lantern,Harbor Holdings\n\
             Old Motel,3 Oak,Town,750000,\"12,500\",25,93.75,30000,2/2/2021,Roadside LLC,Family Trust\n"
        );
        let dataset = read(&csv).expect("dataset loads");

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.skipped, 0);
        assert_eq!(dataset.records[0].square_footage, "");
        assert_eq!(dataset.records[0].price_per_sf, None);
        assert_eq!(dataset.records[1].square_footage, "12,500");
    }

    #[test]
    fn missing_required_column_is_a_load_error() {
        let csv = "PropertyName,City\nHarbor Inn,Seaside\n";
        match read(csv) {
            Err(LoadError::MissingColumn { column, .. }) => assert_eq!(column, "PropertyAddress"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn all_rows_unusable_is_a_load_error() {
        let csv = format!("{HEADER}\nBroken,1 St,Town,?,?,?,?,?,?,A,B\n");
        assert!(matches!(
            read(&csv),
            Err(LoadError::Empty { skipped: 1, .. })
        ));
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "{HEADER}").expect("write header");
        writeln!(
            file,
            "Harbor Inn,12 Pier Rd,Seaside,500000,12000,40,41.67,12500,3/14/2021,Blue Lantern,Harbor Holdings"
        )
        .expect("write row");

        let dataset = load_sales(file.path(), 2021).expect("dataset loads");
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.source, file.path().display().to_string());
    }

    #[test]
    fn missing_file_is_an_open_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("absent.csv");
        assert!(matches!(
            load_sales(&missing, 2021),
            Err(LoadError::Open { .. })
        ));
    }
}
