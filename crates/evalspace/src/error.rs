use crate::config::ConfigError;
use crate::evaluations::{CatalogError, ExportError, SubmissionError, ValidationError};
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    NotFound(String),
    Catalog(CatalogError),
    Submission(SubmissionError),
    Export(ExportError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::NotFound(message) => write!(f, "{}", message),
            AppError::Catalog(err) => write!(f, "template catalog error: {}", err),
            AppError::Submission(err) => write!(f, "submission rejected: {}", err),
            AppError::Export(err) => write!(f, "export failed: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::NotFound(_) => None,
            AppError::Catalog(err) => Some(err),
            AppError::Submission(err) => Some(err),
            AppError::Export(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_)
            | AppError::Submission(SubmissionError::Validation(
                ValidationError::UnknownTemplate(_),
            ))
            | AppError::Export(ExportError::UnknownTemplate(_)) => StatusCode::NOT_FOUND,
            AppError::Submission(SubmissionError::Validation(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Submission(SubmissionError::UnknownQuestion { .. }) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Catalog(_)
            | AppError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<CatalogError> for AppError {
    fn from(value: CatalogError) -> Self {
        Self::Catalog(value)
    }
}

impl From<SubmissionError> for AppError {
    fn from(value: SubmissionError) -> Self {
        Self::Submission(value)
    }
}

impl From<ValidationError> for AppError {
    fn from(value: ValidationError) -> Self {
        Self::Submission(SubmissionError::Validation(value))
    }
}

impl From<ExportError> for AppError {
    fn from(value: ExportError) -> Self {
        Self::Export(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluations::{QuestionId, TemplateId};

    #[test]
    fn unknown_question_maps_to_bad_request() {
        let err = AppError::from(SubmissionError::UnknownQuestion {
            question_id: QuestionId::from("q-9"),
            template_id: TemplateId::from("template-001"),
        });

        assert!(err.to_string().contains("q-9"));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn validation_failures_map_to_unprocessable_entity() {
        let err = AppError::from(ValidationError::MissingRating(QuestionId::from("q-2")));
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);

        let err = AppError::from(ValidationError::UnknownTemplate(TemplateId::from("retired")));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn unknown_export_template_maps_to_not_found() {
        let err = AppError::from(ExportError::UnknownTemplate(TemplateId::from("missing")));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }
}
