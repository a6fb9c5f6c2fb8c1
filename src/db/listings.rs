use csv::StringRecord;
use std::io::{Read, Write};
use std::path::Path;

use crate::error::{AppError, AppResult};
use crate::models::Listing;

/// Reference dataset compiled into the binary
const REFERENCE_CSV: &str = include_str!("../../data/properties.csv");

const REQUIRED_COLUMNS: [&str; 5] = ["id", "name", "area", "cost", "expected_roi"];

/// Immutable collection of listings loaded once at startup
///
/// Shared read-only between requests; nothing mutates it after construction.
#[derive(Debug, Clone, Default)]
pub struct ListingStore {
    listings: Vec<Listing>,
}

impl ListingStore {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self { listings }
    }

    /// Loads listings from any CSV reader
    pub fn from_reader<R: Read>(reader: R) -> AppResult<Self> {
        load_listings(reader).map(Self::new)
    }

    /// Loads listings from a CSV file on disk
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let file = std::fs::File::open(path)?;
        let store = Self::from_reader(file)?;
        tracing::info!(path = %path.display(), listings = store.len(), "Loaded listings from file");
        Ok(store)
    }

    /// Loads the embedded reference dataset
    pub fn reference() -> AppResult<Self> {
        let store = Self::from_reader(REFERENCE_CSV.as_bytes())?;
        tracing::info!(listings = store.len(), "Loaded embedded reference listings");
        Ok(store)
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

/// Positions of the known columns within a header row
struct ColumnIndex {
    id: usize,
    name: usize,
    area: usize,
    cost: usize,
    expected_roi: usize,
    description: Option<usize>,
    address: Option<usize>,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> AppResult<Self> {
        let position = |column: &str| {
            headers
                .iter()
                .position(|header| header.trim().eq_ignore_ascii_case(column))
        };

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|column| position(**column).is_none())
            .map(|column| column.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(AppError::Schema { missing });
        }

        // Presence of every required column was checked above
        let required = |column: &str| position(column).unwrap_or_default();

        Ok(Self {
            id: required("id"),
            name: required("name"),
            area: required("area"),
            cost: required("cost"),
            expected_roi: required("expected_roi"),
            description: position("description"),
            address: position("address"),
        })
    }

    fn parse(&self, row: usize, record: &StringRecord) -> AppResult<Listing> {
        let id = required_cell(record, row, self.id, "id")?;
        let id = id
            .parse::<u64>()
            .map_err(|e| AppError::parse(row, "id", format!("'{}' is not an integer: {}", id, e)))?;

        let cost = parse_number(record, row, self.cost, "cost")?;
        if cost <= 0.0 {
            return Err(AppError::parse(row, "cost", format!("{} is not positive", cost)));
        }

        let expected_roi = parse_number(record, row, self.expected_roi, "expected_roi")?;
        if expected_roi < 0.0 {
            return Err(AppError::parse(
                row,
                "expected_roi",
                format!("{} is negative", expected_roi),
            ));
        }

        Ok(Listing {
            id,
            name: required_cell(record, row, self.name, "name")?.to_string(),
            area: required_cell(record, row, self.area, "area")?.to_string(),
            cost,
            expected_roi,
            description: optional_cell(record, self.description),
            address: optional_cell(record, self.address),
        })
    }
}

fn required_cell<'r>(
    record: &'r StringRecord,
    row: usize,
    index: usize,
    column: &str,
) -> AppResult<&'r str> {
    record
        .get(index)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::parse(row, column, "value is required"))
}

fn optional_cell(record: &StringRecord, index: Option<usize>) -> Option<String> {
    index
        .and_then(|index| record.get(index))
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Parses a finite floating-point cell
fn parse_number(record: &StringRecord, row: usize, index: usize, column: &str) -> AppResult<f64> {
    let value = required_cell(record, row, index, column)?;
    let number = value
        .parse::<f64>()
        .map_err(|e| AppError::parse(row, column, format!("'{}' is not a number: {}", value, e)))?;

    if !number.is_finite() {
        return Err(AppError::parse(row, column, format!("'{}' is not finite", value)));
    }

    Ok(number)
}

/// Parses CSV rows into listings, preserving source order
///
/// Rows are numbered from 1, not counting the header.
pub fn load_listings<R: Read>(reader: R) -> AppResult<Vec<Listing>> {
    // Short rows are allowed; absent trailing cells read as blank
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let columns = ColumnIndex::from_headers(reader.headers()?)?;

    let mut listings = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        listings.push(columns.parse(index + 1, &record)?);
    }

    tracing::debug!(count = listings.len(), "Parsed listing rows");
    Ok(listings)
}

/// Writes listings as CSV with the same columns the loader reads
pub fn write_listings<W: Write>(writer: W, listings: &[Listing]) -> AppResult<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for listing in listings {
        writer.serialize(listing)?;
    }
    writer.flush()?;
    Ok(())
}
