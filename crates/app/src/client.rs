//! REST client for the MIMS backend.

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url, header::AUTHORIZATION};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    config::{ApiConfig, ConfigError},
    session::SessionContext,
};

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("request failed with status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,

        /// Response body, as text
        body: String,
    },

    /// The backend rejected the credentials, or none were available.
    #[error("not signed in")]
    Unauthenticated,

    /// An endpoint path could not be joined to the base URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The client configuration is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// HTTP client bound to one backend base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL or timeout is invalid, or the TLS backend fails to load.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(config.timeout()?).build()?;

        Ok(Self {
            http,
            base_url: config.base_url()?,
        })
    }

    /// Base URL every endpoint is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an endpoint path such as `/pedidos/listar/` below the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if the path cannot be joined.
    pub fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|error| ApiError::InvalidUrl(format!("{path}: {error}")))
    }

    /// Start a request, attaching the bearer token when the session has one.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if the path cannot be joined.
    pub fn request(
        &self,
        method: Method,
        path: &str,
        session: &SessionContext,
    ) -> Result<RequestBuilder, ApiError> {
        let url = self.endpoint(path)?;
        let builder = self.http.request(method, url);

        Ok(match session.token() {
            Some(token) => builder.header(AUTHORIZATION, format!("Bearer {}", token.expose())),
            None => builder,
        })
    }

    /// `GET` a JSON resource.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-2xx status or an unexpected body.
    pub async fn get<T: DeserializeOwned>(
        &self,
        session: &SessionContext,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let request = self.request(Method::GET, path, session)?.query(query);

        decode(execute(&Method::GET, path, request).await?).await
    }

    /// Send a JSON body and decode the JSON answer.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-2xx status or an unexpected body.
    pub async fn send<B, T>(
        &self,
        method: Method,
        session: &SessionContext,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let request = self.request(method.clone(), path, session)?.json(body);

        decode(execute(&method, path, request).await?).await
    }

    /// `DELETE` a resource, ignoring any body.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx status.
    pub async fn delete(&self, session: &SessionContext, path: &str) -> Result<(), ApiError> {
        let request = self.request(Method::DELETE, path, session)?;

        execute(&Method::DELETE, path, request).await?;

        Ok(())
    }
}

async fn execute(
    method: &Method,
    path: &str,
    request: RequestBuilder,
) -> Result<Response, ApiError> {
    let response = request.send().await?;
    let status = response.status();

    debug!(%method, path, status = status.as_u16(), "backend request");

    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::UNAUTHORIZED {
        warn!(%method, path, "backend rejected credentials");
        return Err(ApiError::Unauthenticated);
    }

    let body = response.text().await.unwrap_or_default();

    warn!(%method, path, status = status.as_u16(), "backend request failed");

    Err(ApiError::Status {
        status: status.as_u16(),
        body,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    Ok(response.json().await?)
}
