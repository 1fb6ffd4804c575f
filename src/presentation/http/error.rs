use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::application::errors::ServiceError;

/// Body of every failed request.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
    pub status_code: u16,
}

pub type ApiResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Invalid(_) | ServiceError::Duplicate { .. } => StatusCode::BAD_REQUEST,
            ServiceError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ServiceError::Internal(e) => {
                error!(error = ?e, "request_failed");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        let body = ErrorBody {
            success: false,
            message,
            status_code: status.as_u16(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(ServiceError::not_found("Mess").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ServiceError::Duplicate {
                field: "Email",
                value: "x@y.in".into()
            }
            .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ServiceError::unauthorized("no").status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ServiceError::forbidden("no").status(), StatusCode::FORBIDDEN);
        let internal = ServiceError::Internal(anyhow::anyhow!("pool timed out"));
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn internal_details_stay_in_the_log() {
        let resp = ServiceError::Internal(anyhow::anyhow!("connection refused")).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Internal server error");
        assert_eq!(body["statusCode"], 500);
    }
}
