//! Mapping from repository errors to HTTP status codes.

use super::RepositoryError;

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// - `NotFound` -> 404
/// - `AlreadyExists` -> 409
/// - `ConnectionFailed` -> 503
/// - `QueryFailed`, `Serialization` -> 500
/// - `InvalidData` -> 400
///
/// # Examples
///
/// ```
/// use chamados_core::storage::{RepositoryError, repository_error_to_status_code};
///
/// let error = RepositoryError::not_found("Ticket", 7);
/// assert_eq!(repository_error_to_status_code(&error), 404);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::NotFound { .. } => 404,
        RepositoryError::AlreadyExists { .. } => 409,
        RepositoryError::ConnectionFailed(_) => 503,
        RepositoryError::QueryFailed(_) | RepositoryError::Serialization(_) => 500,
        RepositoryError::InvalidData(_) => 400,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_side_errors() {
        assert_eq!(
            repository_error_to_status_code(&RepositoryError::not_found("Ticket", 7)),
            404
        );
        assert_eq!(
            repository_error_to_status_code(&RepositoryError::already_exists("Priority", 1)),
            409
        );
        assert_eq!(
            repository_error_to_status_code(&RepositoryError::InvalidData(
                "priority_id must be positive".to_string()
            )),
            400
        );
    }

    #[test]
    fn test_server_side_errors() {
        assert_eq!(
            repository_error_to_status_code(&RepositoryError::ConnectionFailed(
                "unable to open database file".to_string()
            )),
            503
        );
        assert_eq!(
            repository_error_to_status_code(&RepositoryError::QueryFailed(
                "syntax error".to_string()
            )),
            500
        );
        assert_eq!(
            repository_error_to_status_code(&RepositoryError::Serialization(
                "invalid timestamp".to_string()
            )),
            500
        );
    }
}
