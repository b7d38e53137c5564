//! Auth service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use reqwest::Method;
use tracing::{info, warn};

use crate::{
    auth::{AuthError, Credentials, LoginThrottle},
    client::ApiClient,
    session::{Session, SessionContext},
};

const LOGIN_PATH: &str = "/usuarios/login/";

#[derive(Debug, Clone)]
pub struct HttpAuthService {
    client: ApiClient,
}

impl HttpAuthService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthService for HttpAuthService {
    async fn login(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        Ok(self
            .client
            .send(
                Method::POST,
                &SessionContext::anonymous(),
                LOGIN_PATH,
                &credentials.body(),
            )
            .await?)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<Session, AuthError>;
}

/// Validate, throttle and perform a login, storing the result in `session`.
///
/// Every attempt that reaches the backend and fails counts towards the throttle, whether the
/// credentials were rejected or the request itself failed. Local validation failures do not.
///
/// # Errors
///
/// Returns an error if the throttle is blocking, the credentials fail local checks, or the backend
/// refuses the login.
pub async fn sign_in(
    auth: &dyn AuthService,
    throttle: &mut LoginThrottle,
    session: &mut SessionContext,
    credentials: &Credentials,
    now: Timestamp,
) -> Result<(), AuthError> {
    throttle.check(now)?;
    credentials.validate()?;

    match auth.login(credentials).await {
        Ok(issued) => {
            info!(username = %issued.user.username, role = %issued.user.role, "signed in");

            throttle.record_success();
            session.sign_in(issued);

            Ok(())
        }
        Err(error) => {
            throttle.record_failure(now);

            warn!(
                username = credentials.username(),
                failures = throttle.failures(),
                %error,
                "login failed"
            );

            Err(error)
        }
    }
}
