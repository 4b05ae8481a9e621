use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::{debug, warn};

use super::model::Series;
use crate::error::{LevelError, RowParseError};

/// Field holding the date string.
pub const DATE_FIELD: usize = 0;
/// Field holding the close price.
pub const VALUE_FIELD: usize = 4;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a price history from a comma-separated file.
///
/// The first row is a header and is always skipped.  Field 4 of every other
/// row is parsed as the value, with `"` characters stripped first.  Rows that
/// don't parse are logged and skipped; they do not consume an index.
pub fn load_file(path: &Path) -> Result<Series, LevelError> {
    let input_err = |source: csv::Error| LevelError::InputAccess {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(|e| input_err(e.into()))?;
    let series = load_reader(file).map_err(input_err)?;

    if series.is_empty() {
        warn!("no valid rows in {}", path.display());
    } else {
        debug!("loaded {} samples from {}", series.len(), path.display());
    }
    Ok(series)
}

/// Same as [`load_file`] over any reader.
pub fn load_reader<R: Read>(rdr: R) -> Result<Series, csv::Error> {
    read_series(reader_builder().from_reader(rdr))
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

/// Rows may have any number of fields; short rows are reported per row.
/// `|` is the quote character so that `"` survives into the field and is
/// stripped by [`parse_value`].
fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .delimiter(b',')
        .quote(b'|')
        .has_headers(true)
        .flexible(true);
    builder
}

fn read_series<R: Read>(mut reader: csv::Reader<R>) -> Result<Series, csv::Error> {
    let mut series = Series::default();

    for (row_no, result) in reader.records().enumerate() {
        // Header is line 1.
        let row = row_no + 2;
        let record = match result {
            Ok(record) => record,
            Err(err) if err.is_io_error() => return Err(err),
            Err(err) => {
                warn!(
                    "{}",
                    RowParseError::Malformed {
                        row,
                        message: err.to_string()
                    }
                );
                continue;
            }
        };

        match parse_value(&record, row) {
            Ok(value) => {
                let date = record.get(DATE_FIELD).unwrap_or("").to_string();
                series.push(date, value);
            }
            Err(err) => warn!("skipping {err}"),
        }
    }

    Ok(series)
}

/// Parse the value field of one record.
pub fn parse_value(record: &csv::StringRecord, row: usize) -> Result<f64, RowParseError> {
    let raw = record
        .get(VALUE_FIELD)
        .ok_or(RowParseError::MissingField {
            row,
            field: VALUE_FIELD,
        })?;

    let cleaned = raw.replace('"', "");
    let value: f64 = cleaned
        .trim()
        .parse()
        .map_err(|_| RowParseError::NotANumber {
            row,
            raw: raw.to_string(),
        })?;

    if !value.is_finite() {
        return Err(RowParseError::NonFinite {
            row,
            raw: raw.to_string(),
        });
    }
    Ok(value)
}
