use crate::envelope::ApiResponse;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use database::DbError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Database(DbError::NotFound) | AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(DbError::Validation(_)) | AppError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            AppError::Database(DbError::Conflict(_)) => StatusCode::CONFLICT,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Converts our custom `AppError` into an HTTP response.
///
/// Rejected input is echoed back so an operator knows what to fix. Store
/// failures are logged and replaced by a generic message.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Database(DbError::NotFound) => "Record not found".to_string(),
            AppError::Database(DbError::Validation(e)) => e.to_string(),
            AppError::Database(DbError::Conflict(message)) => message.clone(),
            AppError::InvalidBody(rejection) => rejection.body_text(),
            AppError::Database(db_err) => {
                tracing::error!(error = %db_err, "Database error.");
                "An internal database error occurred".to_string()
            }
            AppError::NotFound(message) => message.clone(),
        };
        (status, Json(ApiResponse::<()>::failure(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::CoreError;

    #[test]
    fn errors_map_to_statuses() {
        assert_eq!(AppError::from(DbError::NotFound).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::from(DbError::Validation(CoreError::invalid("email", "must contain '@'"))).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(DbError::ConnectionError(sqlx::Error::PoolTimedOut)).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::from(DbError::SchemaEvolution {
                table: "news".into(),
                source: sqlx::Error::PoolClosed,
            })
            .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn duplicate_slugs_are_conflicts() {
        let error = AppError::from(DbError::Conflict("slug 'gridcube-215' is already in use".into()));
        assert_eq!(error.status(), StatusCode::CONFLICT);
        assert_eq!(error.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn responses_carry_the_failure_envelope() {
        let response = AppError::NotFound("No page named 'about'".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
