// HTTP error mapping
//
// Client mistakes are 400, store trouble is 503, anything else is 500.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::services::SubmitError;
use crate::templates::TemplateError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    ServiceUnavailable(String),

    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

impl From<SubmitError> for ApiError {
    fn from(e: SubmitError) -> Self {
        match e {
            SubmitError::MissingField(_) => ApiError::BadRequest(e.to_string()),
            SubmitError::Store(_) => ApiError::ServiceUnavailable(e.to_string()),
        }
    }
}

impl From<TemplateError> for ApiError {
    fn from(e: TemplateError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use userform_core::StoreError;

    #[test]
    fn test_status_mapping() {
        let missing: ApiError = SubmitError::MissingField("name").into();
        assert_eq!(missing.status(), StatusCode::BAD_REQUEST);

        let store: ApiError = SubmitError::Store(StoreError::Unavailable("down".into())).into();
        assert_eq!(store.status(), StatusCode::SERVICE_UNAVAILABLE);

        let template: ApiError = TemplateError::NotFound("form.html".into()).into();
        assert_eq!(template.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
