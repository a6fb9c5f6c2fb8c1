use serde::{Deserialize, Serialize};

/// Column order used for both the listing source and recommendation sinks
pub const LISTING_COLUMNS: [&str; 7] = [
    "id",
    "name",
    "area",
    "cost",
    "expected_roi",
    "description",
    "address",
];

/// A real-estate property offered for investment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Listing {
    /// Unique identifier for the listing
    pub id: u64,
    /// Name or title of the property
    pub name: String,
    /// Area where the property is located (e.g. "Business Bay")
    pub area: String,
    /// Total cost in currency units, always positive
    pub cost: f64,
    /// Expected return on investment as a fraction (0.05 for 5%)
    pub expected_roi: f64,
    pub description: Option<String>,
    pub address: Option<String>,
}

impl Listing {
    /// Creates a listing without description or address
    pub fn new(
        id: u64,
        name: impl Into<String>,
        area: impl Into<String>,
        cost: f64,
        expected_roi: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            area: area.into(),
            cost,
            expected_roi,
            description: None,
            address: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_serializes_missing_fields_as_null() {
        let listing = Listing::new(4, "Studio Flat - Business Bay", "Business Bay", 750000.0, 0.08);
        let json = serde_json::to_value(&listing).unwrap();

        assert_eq!(json["id"], 4);
        assert_eq!(json["area"], "Business Bay");
        assert_eq!(json["expected_roi"], 0.08);
        assert!(json["description"].is_null());
        assert!(json["address"].is_null());
    }

    #[test]
    fn test_listing_field_names_match_columns() {
        let listing = Listing::new(1, "Flat", "JLT", 1.0, 0.0)
            .with_description("desc")
            .with_address("addr");
        let json = serde_json::to_value(&listing).unwrap();
        let object = json.as_object().unwrap();

        assert_eq!(object.len(), LISTING_COLUMNS.len());
        for column in LISTING_COLUMNS {
            assert!(object.contains_key(column), "missing field {}", column);
        }
    }
}
