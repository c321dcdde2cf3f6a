//! Sistema de manejo de errores
//!
//! Este módulo define los errores del servicio y su conversión
//! a respuestas HTTP `{"error": "..."}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    DuplicateKey(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("{0}")]
    Validation(String),

    #[error("{}", first_field_message(.0))]
    InvalidFields(#[from] validator::ValidationErrors),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::DuplicateKey(_) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::MissingField(_) => StatusCode::BAD_REQUEST,
            AppError::Validation(_) | AppError::InvalidFields(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match &self {
            AppError::Database(e) => {
                error!("❌ Database error: {}", e);
                "An error occurred while accessing the database".to_string()
            }
            other => {
                warn!("Request rejected ({}): {}", status, other);
                other.to_string()
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Mensaje del primer campo inválido (por nombre), sin el nombre Rust del campo
fn first_field_message(errors: &validator::ValidationErrors) -> String {
    let field_errors = errors.field_errors();
    let mut fields: Vec<_> = field_errors.iter().collect();
    fields.sort_by_key(|(field, _)| **field);

    fields
        .into_iter()
        .find_map(|(field, errors)| {
            errors.first().map(|error| match &error.message {
                Some(message) => message.to_string(),
                None => format!("{} is invalid", field),
            })
        })
        .unwrap_or_else(|| "Invalid request body".to_string())
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

pub fn vehicle_not_found() -> AppError {
    AppError::NotFound("Vehicle not found".to_string())
}

pub fn duplicate_vin() -> AppError {
    AppError::DuplicateKey("Vehicle with this VIN already exists".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(error: AppError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_missing_field_maps_to_bad_request() {
        let (status, body) = body_json(AppError::MissingField("vin")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Missing field: vin" }));
    }

    #[tokio::test]
    async fn test_duplicate_and_not_found_messages() {
        let (status, body) = body_json(duplicate_vin()).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "Vehicle with this VIN already exists");

        let (status, body) = body_json(vehicle_not_found()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Vehicle not found");
    }

    #[tokio::test]
    async fn test_database_error_hides_details() {
        let (status, body) = body_json(AppError::Database(sqlx::Error::RowNotFound)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "An error occurred while accessing the database");
    }

    #[tokio::test]
    async fn test_invalid_fields_show_only_the_message() {
        let mut error = validator::ValidationError::new("length");
        error.message = Some("modelName must not be empty".into());
        let mut errors = validator::ValidationErrors::new();
        errors.add("model_name", error);

        let (status, body) = body_json(AppError::InvalidFields(errors)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body, json!({ "error": "modelName must not be empty" }));
    }

    #[test]
    fn test_validation_is_unprocessable() {
        let err = AppError::Validation("bad type".to_string());
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
