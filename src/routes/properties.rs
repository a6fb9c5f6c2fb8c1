use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{FilterCriteria, Listing},
    routes::AppState,
    services::filter,
};

/// Query parameters of `GET /properties/search`
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    /// Minimum expected ROI
    pub roi: Option<f64>,
    pub area: Option<String>,
    /// Maximum cost
    pub cost: Option<f64>,
}

impl SearchQuery {
    /// Validates the parameters and maps them onto filter criteria
    pub fn into_criteria(self, require_all: bool) -> AppResult<FilterCriteria> {
        if require_all {
            let missing = [
                ("roi", self.roi.is_none()),
                ("area", self.area.is_none()),
                ("cost", self.cost.is_none()),
            ]
            .into_iter()
            .find(|(_, absent)| *absent);

            if let Some((field, _)) = missing {
                return Err(AppError::validation(
                    field,
                    format!("missing required query parameter '{}'", field),
                ));
            }
        }

        if let Some(roi) = self.roi {
            if roi.is_nan() || roi < 0.0 {
                return Err(AppError::validation(
                    "roi",
                    format!("roi must be greater than or equal to 0, got {}", roi),
                ));
            }
        }

        if let Some(cost) = self.cost {
            if cost.is_nan() || cost <= 0.0 {
                return Err(AppError::validation(
                    "cost",
                    format!("cost must be greater than 0, got {}", cost),
                ));
            }
        }

        Ok(FilterCriteria {
            min_roi: self.roi,
            area: self.area,
            max_cost: self.cost,
        })
    }
}

/// Handler for property search endpoint
///
/// Every parameter is optional unless the server runs with `require_all_params`.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> AppResult<Json<Vec<Listing>>> {
    let Query(params) = query.map_err(|rejection| AppError::Validation {
        field: None,
        message: rejection.body_text(),
    })?;

    let criteria = params
        .into_criteria(state.require_all_params)
        .inspect_err(|e| {
            tracing::info!(request_id = %request_id, error = %e, "Rejected search");
        })?;

    let found = filter::apply(state.listings.listings(), &criteria);

    tracing::info!(
        request_id = %request_id,
        min_roi = ?criteria.min_roi,
        area = ?criteria.area,
        max_cost = ?criteria.max_cost,
        matches = found.len(),
        "Property search completed"
    );

    Ok(Json(found))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_is_unconstrained() {
        let criteria = SearchQuery::default().into_criteria(false).unwrap();
        assert!(criteria.is_unconstrained());
    }

    #[test]
    fn test_parameters_map_one_to_one() {
        let query = SearchQuery {
            roi: Some(0.07),
            area: Some("Business Bay".to_string()),
            cost: Some(1_500_000.0),
        };

        let criteria = query.into_criteria(false).unwrap();
        assert_eq!(
            criteria,
            FilterCriteria::any()
                .with_min_roi(0.07)
                .with_area("Business Bay")
                .with_max_cost(1_500_000.0)
        );
    }

    #[test]
    fn test_zero_roi_allowed_zero_cost_rejected() {
        let zero_roi = SearchQuery {
            roi: Some(0.0),
            ..Default::default()
        };
        assert!(zero_roi.into_criteria(false).is_ok());

        let zero_cost = SearchQuery {
            cost: Some(0.0),
            ..Default::default()
        };
        assert!(matches!(
            zero_cost.into_criteria(false),
            Err(AppError::Validation { field: Some(field), .. }) if field == "cost"
        ));
    }

    #[test]
    fn test_nan_roi_rejected() {
        let query = SearchQuery {
            roi: Some(f64::NAN),
            ..Default::default()
        };
        assert!(matches!(
            query.into_criteria(false),
            Err(AppError::Validation { field: Some(field), .. }) if field == "roi"
        ));
    }

    #[test]
    fn test_required_params_reports_first_missing() {
        let query = SearchQuery {
            roi: Some(0.05),
            ..Default::default()
        };
        assert!(matches!(
            query.into_criteria(true),
            Err(AppError::Validation { field: Some(field), .. }) if field == "area"
        ));
    }
}
