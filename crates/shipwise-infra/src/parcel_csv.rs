//! CSV loader for parcel batches
//!
//! Expected header (column order is free, extra columns are ignored):
//! reference,weight_kg,length_cm,width_cm,height_cm

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Serialize;
use shipwise_domain::model::{Dimensions, ParcelSpec};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParcelCsvError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse CSV: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Invalid number format in row {row}, column {column}: {value:?}")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Invalid parcel in row {row}: {reason}")]
    InvalidParcel { row: usize, reason: String },
}

impl From<ParcelCsvError> for shipwise_types::Error {
    fn from(err: ParcelCsvError) -> Self {
        shipwise_types::Error::ParcelFile(err.to_string())
    }
}

/// One validated row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParcelRow {
    pub reference: String,
    pub parcel: ParcelSpec,
}

const COLUMNS: [&str; 5] = ["reference", "weight_kg", "length_cm", "width_cm", "height_cm"];

/// Load parcels from a CSV file
pub fn load_parcels<P: AsRef<Path>>(path: P) -> Result<Vec<ParcelRow>, ParcelCsvError> {
    let mut content = String::new();
    File::open(path)?.read_to_string(&mut content)?;
    parse_parcels(content.as_bytes())
}

/// Parse parcels from any reader
pub fn parse_parcels<R: Read>(reader: R) -> Result<Vec<ParcelRow>, ParcelCsvError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let mut index = [0usize; 5];
    for (slot, col) in index.iter_mut().zip(COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(col))
            .ok_or_else(|| ParcelCsvError::MissingColumn(col.to_string()))?;
    }

    let mut rows = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result?;
        // +2: 0-based index and the header line
        let row = row_idx + 2;

        if record.iter().all(|field| field.is_empty()) {
            continue;
        }

        let reference = record.get(index[0]).unwrap_or("").to_string();
        let weight = parse_f64(&record, index[1], row, COLUMNS[1])?;
        let length = parse_f64(&record, index[2], row, COLUMNS[2])?;
        let width = parse_f64(&record, index[3], row, COLUMNS[3])?;
        let height = parse_f64(&record, index[4], row, COLUMNS[4])?;

        let parcel = ParcelSpec::new(weight, Dimensions::new(length, width, height)).map_err(
            |e| ParcelCsvError::InvalidParcel {
                row,
                reason: e.to_string(),
            },
        )?;

        rows.push(ParcelRow { reference, parcel });
    }

    Ok(rows)
}

fn parse_f64(
    record: &csv::StringRecord,
    idx: usize,
    row: usize,
    column: &str,
) -> Result<f64, ParcelCsvError> {
    let raw = record.get(idx).unwrap_or("");
    raw.parse::<f64>().map_err(|_| ParcelCsvError::InvalidNumber {
        row,
        column: column.to_string(),
        value: raw.to_string(),
    })
}
