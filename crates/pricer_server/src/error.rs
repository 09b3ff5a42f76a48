//! API error responses
//!
//! Every failure leaving a handler is an [`ApiError`]. Caller mistakes map to
//! 400, model failures to 500, both with a JSON body:
//!
//! ```json
//! {"error": "invalid_input", "message": "Strike price must be greater than 0"}
//! ```

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use pricer_core::types::PricingError;
use pricer_risk::range::RangeError;

use crate::config::ConfigError;

/// JSON body of an error response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    /// Error kind: `invalid_input`, `calculation_error` or `internal_error`
    pub error: String,
    /// Human-readable description
    pub message: String,
}

/// Errors returned by API handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or out-of-range request data
    #[error("{0}")]
    InvalidInput(String),

    /// Numerical failure inside a model
    #[error("Calculation error in {model}: {message}")]
    Calculation { model: String, message: String },

    /// Failure outside the request and the models
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Calculation { .. } | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Machine-readable error kind
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::InvalidInput(_) => "invalid_input",
            ApiError::Calculation { .. } => "calculation_error",
            ApiError::Internal(_) => "internal_error",
        }
    }
}

impl From<PricingError> for ApiError {
    fn from(err: PricingError) -> Self {
        match err {
            PricingError::InvalidInput(message) => ApiError::InvalidInput(message),
            PricingError::Calculation { model, message } => {
                ApiError::Calculation { model, message }
            }
        }
    }
}

impl From<RangeError> for ApiError {
    fn from(err: RangeError) -> Self {
        match err {
            RangeError::InvalidRange(message) => ApiError::InvalidInput(message),
            RangeError::TooManyPoints { .. } => ApiError::InvalidInput(err.to_string()),
            RangeError::Pricing {
                index,
                value,
                source,
            } => match source {
                PricingError::InvalidInput(message) => ApiError::InvalidInput(format!(
                    "grid point {} (value {}): {}",
                    index, value, message
                )),
                PricingError::Calculation { model, message } => ApiError::Calculation {
                    model,
                    message: format!("grid point {} (value {}): {}", index, value, message),
                },
            },
            RangeError::ThreadPool(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidInput(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidInput(rejection.body_text())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::Internal(format!("valuation task failed: {}", err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(kind = self.kind(), error = %self, "Request failed");
        } else {
            tracing::debug!(kind = self.kind(), error = %self, "Request rejected");
        }

        let body = ErrorBody {
            error: self.kind().to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Errors raised while starting the server
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    WorkerPool(#[from] RangeError),

    #[error("Invalid listen address {addr}: {source}")]
    Address {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_core::types::InputField;

    #[test]
    fn test_pricing_error_mapping() {
        let err = ApiError::from(PricingError::missing_field(InputField::Strike));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.kind(), "invalid_input");

        let err = ApiError::from(PricingError::calculation("binomial", "bad lattice"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Calculation error in binomial: bad lattice");
    }

    #[test]
    fn test_range_error_mapping() {
        let err = ApiError::from(RangeError::InvalidRange("startValue too big".to_string()));
        assert!(matches!(err, ApiError::InvalidInput(_)));

        let err = ApiError::from(RangeError::TooManyPoints { points: 20, max: 10 });
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err = ApiError::from(RangeError::Pricing {
            index: 3,
            value: 0.0,
            source: PricingError::calculation("european", "non-finite price"),
        });
        match err {
            ApiError::Calculation { model, message } => {
                assert_eq!(model, "european");
                assert!(message.contains("grid point 3"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_into_response_body() {
        let response = ApiError::InvalidInput("Increment must be greater than 0".to_string())
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.error, "invalid_input");
        assert_eq!(body.message, "Increment must be greater than 0");
    }
}
