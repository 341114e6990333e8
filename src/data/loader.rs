use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
    StringArray, UInt32Array,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{AnimalPolicy, Listing, ListingStore};

/// Accepted header names for each required column.
const CITY_COLUMNS: &[&str] = &["city"];
const ROOMS_COLUMNS: &[&str] = &["rooms"];
const AREA_COLUMNS: &[&str] = &["area"];
const RENT_COLUMNS: &[&str] = &["rent amount (R$)", "rent_amount"];
const ANIMAL_COLUMNS: &[&str] = &["animal", "animals"];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a listing dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with `city`, `rooms`, `area`, `rent amount (R$)`,
///   `animal`; any other column is ignored
/// * `.json`    – `[{ "city": ..., "rooms": ..., ... }, ...]`
/// * `.parquet` – the same columns, read through Arrow
pub fn load_file(path: &Path) -> Result<ListingStore> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let listings = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    for (row, listing) in listings.iter().enumerate() {
        check_listing(row, listing)?;
    }
    Ok(ListingStore::new(listings))
}

/// Reject values no dashboard stage can use. Zero area is left to the
/// rent-per-area stage, which reports it.
fn check_listing(row: usize, l: &Listing) -> Result<()> {
    if !l.rent_amount.is_finite() || l.rent_amount < 0.0 {
        bail!("Row {row}: rent amount {} is not a non-negative number", l.rent_amount);
    }
    if l.area.is_nan() || l.area < 0.0 {
        bail!("Row {row}: area {} is negative or missing", l.area);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<Listing>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    reader
        .deserialize::<Listing>()
        .enumerate()
        .map(|(row_no, rec)| rec.with_context(|| format!("CSV row {row_no}")))
        .collect()
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

fn load_json(path: &Path) -> Result<Vec<Listing>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    serde_json::from_str(&text).context("parsing JSON listings")
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one listing per row.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`); integer and float widths are widened.
fn load_parquet(path: &Path) -> Result<Vec<Listing>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut listings = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let city_col = column(&batch, CITY_COLUMNS)?;
        let rooms_col = column(&batch, ROOMS_COLUMNS)?;
        let area_col = column(&batch, AREA_COLUMNS)?;
        let rent_col = column(&batch, RENT_COLUMNS)?;
        let animal_col = column(&batch, ANIMAL_COLUMNS)?;

        for row in 0..batch.num_rows() {
            let at = listings.len();
            listings.push(Listing {
                city: extract_string(city_col, row)
                    .with_context(|| format!("Row {at}: 'city'"))?,
                rooms: extract_u32(rooms_col, row)
                    .with_context(|| format!("Row {at}: 'rooms'"))?,
                area: extract_f64(area_col, row)
                    .with_context(|| format!("Row {at}: 'area'"))?,
                rent_amount: extract_f64(rent_col, row)
                    .with_context(|| format!("Row {at}: rent amount"))?,
                animals: extract_animal(animal_col, row)
                    .with_context(|| format!("Row {at}: 'animal'"))?,
            });
        }
    }

    Ok(listings)
}

// -- Parquet / Arrow helpers --

fn column<'b>(batch: &'b RecordBatch, names: &[&str]) -> Result<&'b Arc<dyn Array>> {
    let schema = batch.schema();
    names
        .iter()
        .find_map(|n| schema.index_of(n).ok())
        .map(|idx| batch.column(idx))
        .with_context(|| format!("Parquet file missing '{}' column", names[0]))
}

fn extract_string(col: &Arc<dyn Array>, row: usize) -> Result<String> {
    if col.is_null(row) {
        bail!("null value");
    }
    match col.data_type() {
        DataType::Utf8 => Ok(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        other => bail!("expected a string column, got {other:?}"),
    }
}

fn extract_f64(col: &Arc<dyn Array>, row: usize) -> Result<f64> {
    if col.is_null(row) {
        bail!("null value");
    }
    let any = col.as_any();
    let value = match col.data_type() {
        DataType::Float64 => any.downcast_ref::<Float64Array>().map(|a| a.value(row)),
        DataType::Float32 => any.downcast_ref::<Float32Array>().map(|a| a.value(row) as f64),
        DataType::Int64 => any.downcast_ref::<Int64Array>().map(|a| a.value(row) as f64),
        DataType::Int32 => any.downcast_ref::<Int32Array>().map(|a| a.value(row) as f64),
        other => bail!("expected a numeric column, got {other:?}"),
    };
    value.context("column type does not match its array")
}

fn extract_u32(col: &Arc<dyn Array>, row: usize) -> Result<u32> {
    if col.is_null(row) {
        bail!("null value");
    }
    let any = col.as_any();
    let value: Option<i64> = match col.data_type() {
        DataType::Int64 => any.downcast_ref::<Int64Array>().map(|a| a.value(row)),
        DataType::Int32 => any.downcast_ref::<Int32Array>().map(|a| a.value(row) as i64),
        DataType::UInt32 => any.downcast_ref::<UInt32Array>().map(|a| a.value(row) as i64),
        other => bail!("expected an integer column, got {other:?}"),
    };
    let value = value.context("column type does not match its array")?;
    u32::try_from(value).with_context(|| format!("{value} is not a valid room count"))
}

fn extract_animal(col: &Arc<dyn Array>, row: usize) -> Result<AnimalPolicy> {
    if col.is_null(row) {
        bail!("null value");
    }
    if let Some(flags) = col.as_any().downcast_ref::<BooleanArray>() {
        return Ok(if flags.value(row) {
            AnimalPolicy::Accepted
        } else {
            AnimalPolicy::NotAccepted
        });
    }
    let text = match col.as_any().downcast_ref::<StringArray>() {
        Some(s) => s.value(row).to_string(),
        None => extract_string(col, row)?,
    };
    AnimalPolicy::parse(&text).with_context(|| format!("unknown animal policy '{text}'"))
}
