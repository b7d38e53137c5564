//! Auth errors.

use thiserror::Error;

use crate::{auth::CredentialsError, client::ApiError};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error(transparent)]
    Credentials(#[from] CredentialsError),

    #[error("too many failed attempts, try again in {retry_after_seconds}s")]
    Blocked { retry_after_seconds: i64 },

    #[error("login request failed")]
    Api(#[source] ApiError),
}

impl From<ApiError> for AuthError {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::Unauthenticated | ApiError::Status { status: 400 | 401, .. } => {
                Self::InvalidCredentials
            }
            error => Self::Api(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_logins_are_invalid_credentials() {
        let error = AuthError::from(ApiError::Status {
            status: 400,
            body: "{\"detail\": \"credenciales\"}".to_string(),
        });

        assert!(matches!(error, AuthError::InvalidCredentials));
    }

    #[test]
    fn server_failures_stay_api_errors() {
        let error = AuthError::from(ApiError::Status {
            status: 503,
            body: String::new(),
        });

        assert!(matches!(error, AuthError::Api(ApiError::Status { status: 503, .. })));
    }
}
