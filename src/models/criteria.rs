use serde::{Deserialize, Serialize};

/// Optional constraints applied to a listing collection
///
/// Each field is independent. An absent field does not constrain the result.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FilterCriteria {
    /// Minimum expected ROI, inclusive
    pub min_roi: Option<f64>,
    /// Area, compared case-insensitively
    pub area: Option<String>,
    /// Maximum cost, inclusive
    pub max_cost: Option<f64>,
}

impl FilterCriteria {
    /// Criteria with every field absent
    pub fn any() -> Self {
        Self::default()
    }

    pub fn with_min_roi(mut self, min_roi: f64) -> Self {
        self.min_roi = Some(min_roi);
        self
    }

    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.area = Some(area.into());
        self
    }

    pub fn with_max_cost(mut self, max_cost: f64) -> Self {
        self.max_cost = Some(max_cost);
        self
    }

    /// Returns true when no field constrains the result
    pub fn is_unconstrained(&self) -> bool {
        self.min_roi.is_none() && self.area.is_none() && self.max_cost.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_is_unconstrained() {
        assert!(FilterCriteria::any().is_unconstrained());
    }

    #[test]
    fn test_builder_sets_fields_independently() {
        let criteria = FilterCriteria::any().with_area("JLT");
        assert_eq!(criteria.area.as_deref(), Some("JLT"));
        assert_eq!(criteria.min_roi, None);
        assert_eq!(criteria.max_cost, None);
        assert!(!criteria.is_unconstrained());
    }
}
