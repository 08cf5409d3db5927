//! CSV parser for raw vehicle sale records.

use anyhow::{Context, Result, bail};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::record::{CategoricalField, NumericField, REQUIRED_COLUMNS, RawRecord};

/// Cell contents that mean "no value" in any column.
const MISSING_TOKENS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "NULL", "null", "None", "<NA>", "#N/A",
    "#N/A N/A", "#NA", "1.#IND", "-1.#IND", "1.#QNAN", "-1.#QNAN",
];

/// Reads every record from the CSV file at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened, a required column is
/// absent from the header, or a row is malformed.
#[tracing::instrument(skip(path), fields(path = %path.display()))]
pub fn load_records(path: &Path) -> Result<Vec<RawRecord>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let records =
        parse_records(file).with_context(|| format!("reading {}", path.display()))?;
    info!(rows = records.len(), "Loaded raw dataset");
    Ok(records)
}

/// Parses CSV text with a header row into raw records.
pub fn parse_records<R: Read>(reader: R) -> Result<Vec<RawRecord>> {
    let mut rdr = csv::Reader::from_reader(reader);

    let headers = rdr.headers().context("reading CSV header")?.clone();
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .collect();
    if !missing.is_empty() {
        bail!("CSV missing required column(s): {}", missing.join(", "));
    }
    debug!(columns = headers.len(), "Header validated");

    let mut records = Vec::new();
    for (i, result) in rdr.deserialize().enumerate() {
        let mut record: RawRecord = result.with_context(|| format!("row {}", i + 1))?;
        normalize_missing(&mut record);
        records.push(record);
    }

    Ok(records)
}

fn normalize_missing(record: &mut RawRecord) {
    for field in CategoricalField::ALL {
        let slot = field.slot(record);
        if slot.as_deref().is_some_and(|v| MISSING_TOKENS.contains(&v)) {
            *slot = None;
        }
    }
    for field in NumericField::ALL {
        let slot = field.slot(record);
        if slot.is_some_and(f64::is_nan) {
            *slot = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "year,make,model,trim,body,transmission,vin,state,condition,odometer,color,interior,seller,mmr,sellingprice,saledate";

    #[test]
    fn test_parse_complete_row() {
        let csv = format!(
            "{HEADER}\n2015,Kia,Sorento,LX,SUV,automatic,5xyktca69fg566472,ca,5,16639,white,black,kia motors america inc,20500,21500,Tue Dec 16 2014\n"
        );
        let records = parse_records(csv.as_bytes()).unwrap();

        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.year, Some(2015.0));
        assert_eq!(r.make.as_deref(), Some("Kia"));
        assert_eq!(r.sellingprice, Some(21500.0));
        assert!(r.clone().into_complete().is_some());
    }

    #[test]
    fn test_parse_empty_and_na_cells_are_missing() {
        let csv = format!(
            "{HEADER}\n2015,Kia,Sorento,,NA,automatic,vin1,ca,,abc,—,null,seller,NaN,21500,date\n"
        );
        let records = parse_records(csv.as_bytes()).unwrap();
        let r = &records[0];

        assert_eq!(r.trim, None);
        assert_eq!(r.body, None);
        assert_eq!(r.condition, None);
        assert_eq!(r.odometer, None, "unparseable number is missing");
        assert_eq!(r.color.as_deref(), Some("—"), "sentinel is kept");
        assert_eq!(r.interior, None);
        assert_eq!(r.mmr, None);
    }

    #[test]
    fn test_parse_columns_in_any_order_with_extras() {
        let csv = "saledate,sellingprice,mmr,seller,interior,color,odometer,condition,state,vin,transmission,body,trim,model,make,year,extra\n\
                   d,100,90,s,black,red,10,3.5,ca,v,manual,Sedan,Base,Civic,Honda,2010,x\n";
        let records = parse_records(csv.as_bytes()).unwrap();

        assert_eq!(records[0].model.as_deref(), Some("Civic"));
        assert_eq!(records[0].condition, Some(3.5));
    }

    #[test]
    fn test_parse_missing_column_fails() {
        let csv = "year,make,model\n2015,Kia,Sorento\n";
        let err = parse_records(csv.as_bytes()).unwrap_err();
        let msg = err.to_string();

        assert!(msg.contains("sellingprice"));
        assert!(msg.contains("vin"));
    }

    #[test]
    fn test_parse_ragged_row_fails() {
        let csv = format!("{HEADER}\n2015,Kia\n");
        assert!(parse_records(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_load_records_missing_file() {
        let result = load_records(Path::new("/nonexistent/car_prices.csv"));
        assert!(result.is_err());
    }
}
