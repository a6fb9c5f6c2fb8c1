use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// The listing source lacks one or more required columns
    #[error("Schema error: missing required columns: {}", .missing.join(", "))]
    Schema { missing: Vec<String> },

    /// A cell could not be converted to its declared type
    #[error("Parse error at row {row}, column '{column}': {message}")]
    Parse {
        row: usize,
        column: String,
        message: String,
    },

    /// A query parameter failed validation
    #[error("Validation error: {message}")]
    Validation {
        field: Option<String>,
        message: String,
    },

    #[error("No preferences found for user ID {0}")]
    UnknownUser(u64),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Validation {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    pub fn parse(row: usize, column: &str, message: impl Into<String>) -> Self {
        AppError::Parse {
            row,
            column: column.to_string(),
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, field, message) = match self {
            AppError::Validation { field, message } => {
                (StatusCode::UNPROCESSABLE_ENTITY, field, message)
            }
            AppError::UnknownUser(_) => (StatusCode::NOT_FOUND, None, self.to_string()),
            AppError::Schema { .. }
            | AppError::Parse { .. }
            | AppError::Csv(_)
            | AppError::Io(_)
            | AppError::Json(_)
            | AppError::Internal(_) => {
                tracing::error!(error = %self, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, None, self.to_string())
            }
        };

        let body = Json(json!({
            "error": message,
            "field": field,
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_lists_columns() {
        let err = AppError::Schema {
            missing: vec!["cost".to_string(), "expected_roi".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Schema error: missing required columns: cost, expected_roi"
        );
    }

    #[test]
    fn test_parse_error_names_row_and_column() {
        let err = AppError::parse(3, "cost", "invalid float literal");
        assert_eq!(
            err.to_string(),
            "Parse error at row 3, column 'cost': invalid float literal"
        );
    }

    #[test]
    fn test_validation_maps_to_unprocessable_entity() {
        let response = AppError::validation("roi", "roi must be >= 0").into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_unknown_user_maps_to_not_found() {
        let response = AppError::UnknownUser(999).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
