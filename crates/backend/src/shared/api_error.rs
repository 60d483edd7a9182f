use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::shared::api::ErrorResponse;
use sea_orm::DbErr;
use thiserror::Error;

/// Ошибки сервисов каталогов
///
/// Сообщения 4xx показываются пользователю как есть.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{message}")]
    InUse {
        message: String,
        detalles: serde_json::Value,
    },

    #[error(transparent)]
    Db(#[from] DbErr),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::InUse { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Db(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Ошибки валидации из contracts приходят строкой
impl From<String> for ApiError {
    fn from(message: String) -> Self {
        ApiError::BadRequest(message)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(format!("JSON invalido: {}", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        let mut body = ErrorResponse::new(self.to_string());
        if let ApiError::InUse { detalles, .. } = self {
            body.detalles = Some(detalles);
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_variant() {
        assert_eq!(ApiError::bad_request("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Internal(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        let in_use = ApiError::InUse {
            message: "en uso".into(),
            detalles: serde_json::json!({"kits": 1}),
        };
        assert_eq!(in_use.status(), StatusCode::BAD_REQUEST);
        assert_eq!(in_use.to_string(), "en uso");
    }

    #[test]
    fn validation_strings_become_bad_request() {
        let err: ApiError = "Nombre requerido".to_string().into();
        assert!(matches!(err, ApiError::BadRequest(ref m) if m == "Nombre requerido"));
    }
}
