use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chamados_core::storage::{repository_error_to_status_code, RepositoryError};
use chamados_core::ticket::ValidationErrors;

/// Handler error type wrapping `anyhow::Error`.
///
/// The status code is picked by downcasting: [`ValidationErrors`] become a
/// 400 with a JSON body, [`RepositoryError`] goes through
/// [`repository_error_to_status_code`], anything else is a 500.
pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Some(errors) = self.0.downcast_ref::<ValidationErrors>() {
            tracing::warn!(error = %errors, "Rejected invalid request");
            return (StatusCode::BAD_REQUEST, Json(errors.clone())).into_response();
        }

        let status_code = match self.0.downcast_ref::<RepositoryError>() {
            Some(repo_error) => StatusCode::from_u16(repository_error_to_status_code(repo_error))
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            None => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status_code.is_server_error() {
            tracing::error!(status = %status_code, error = %self.0, "Request failed");
        } else {
            tracing::warn!(status = %status_code, error = %self.0, "API error");
        }

        (status_code, self.0.to_string()).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

/// Turns an unparseable JSON body into a 400 validation response.
pub fn body_rejection(rejection: JsonRejection) -> AppError {
    ValidationErrors::body(rejection.body_text()).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chamados_core::ticket::TicketError;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_validation_errors_become_400_with_field_list() {
        let mut errors = ValidationErrors::default();
        errors.push("titulo", TicketError::TitleRequired);

        let response = AppError::from(errors).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["errors"][0]["field"], "titulo");
        assert_eq!(json["errors"][0]["message"], "Title is required");
    }

    #[test]
    fn test_not_found_becomes_404() {
        let response = AppError::from(RepositoryError::not_found("Ticket", 9)).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_connection_failure_becomes_503() {
        let error = RepositoryError::ConnectionFailed("database is locked".to_string());
        let response = AppError::from(error).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_unknown_error_becomes_500() {
        let response = AppError::from(anyhow::anyhow!("boom")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
