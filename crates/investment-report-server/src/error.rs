use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Report(#[from] investment_report::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Upstream and data failures are all server-side from the caller's view.
        let status = match &self {
            ApiError::Report(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use investment_report::models::Id;

    #[test]
    fn test_report_errors_are_internal_server_errors() {
        let errors = [
            investment_report::Error::source_unavailable("investments", "refused"),
            investment_report::Error::CompanyNotFound(Id::from("c1")),
            investment_report::Error::ProxyUpstreamFailed("refused".to_string()),
        ];
        for err in errors {
            let response = ApiError::from(err).into_response();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}
