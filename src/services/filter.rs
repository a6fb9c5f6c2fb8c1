use crate::models::{FilterCriteria, Listing};

/// A single constraint derived from one present criteria field
#[derive(Debug, Clone, PartialEq)]
enum Predicate {
    MinRoi(f64),
    /// Holds the lowercased area
    Area(String),
    MaxCost(f64),
}

impl Predicate {
    fn test(&self, listing: &Listing) -> bool {
        match self {
            Predicate::MinRoi(min_roi) => listing.expected_roi >= *min_roi,
            Predicate::Area(area) => listing.area.to_lowercase() == *area,
            Predicate::MaxCost(max_cost) => listing.cost <= *max_cost,
        }
    }
}

/// Compiled form of `FilterCriteria`: the AND of its present fields
#[derive(Debug, Clone, PartialEq)]
pub struct ListingFilter {
    predicates: Vec<Predicate>,
}

impl ListingFilter {
    pub fn new(criteria: &FilterCriteria) -> Self {
        let predicates = [
            criteria.min_roi.map(Predicate::MinRoi),
            criteria
                .area
                .as_ref()
                .map(|area| Predicate::Area(area.to_lowercase())),
            criteria.max_cost.map(Predicate::MaxCost),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self { predicates }
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        self.predicates.iter().all(|predicate| predicate.test(listing))
    }

    /// Returns the matching listings in input order
    pub fn apply(&self, listings: &[Listing]) -> Vec<Listing> {
        listings
            .iter()
            .filter(|listing| self.matches(listing))
            .cloned()
            .collect()
    }
}

/// Returns true when the listing satisfies every present criteria field
pub fn matches(listing: &Listing, criteria: &FilterCriteria) -> bool {
    ListingFilter::new(criteria).matches(listing)
}

/// Returns the subset of `listings` satisfying `criteria`, preserving order
pub fn apply(listings: &[Listing], criteria: &FilterCriteria) -> Vec<Listing> {
    let filter = ListingFilter::new(criteria);
    let matched = filter.apply(listings);

    tracing::debug!(
        total = listings.len(),
        matched = matched.len(),
        predicates = filter.predicates.len(),
        "Applied listing filter"
    );

    matched
}
