//! Users service.

use async_trait::async_trait;
use mims::users::{ProfileInput, User, UserId, UserInput};
use mockall::automock;
use reqwest::Method;

use crate::{
    client::{ApiClient, ApiError},
    pagination::Paginated,
    session::SessionContext,
};

const USERS_PATH: &str = "/usuarios/usuarios/";
const PROFILE_PATH: &str = "/usuarios/perfil/";

fn user_path(id: UserId) -> String {
    format!("{USERS_PATH}{id}/")
}

fn profile_edit_path(id: UserId) -> String {
    format!("/usuarios/editar-usuario/{id}/")
}

#[derive(Debug, Clone)]
pub struct HttpUsersService {
    client: ApiClient,
}

impl HttpUsersService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UsersService for HttpUsersService {
    async fn list_users(&self, session: &SessionContext) -> Result<Vec<User>, ApiError> {
        let users: Paginated<User> = self.client.get(session, USERS_PATH, &[]).await?;

        Ok(users.into_items())
    }

    async fn create_user(
        &self,
        session: &SessionContext,
        user: &UserInput,
    ) -> Result<User, ApiError> {
        self.client
            .send(Method::POST, session, USERS_PATH, user)
            .await
    }

    async fn update_user(
        &self,
        session: &SessionContext,
        id: UserId,
        user: &UserInput,
    ) -> Result<User, ApiError> {
        self.client
            .send(Method::PUT, session, &user_path(id), user)
            .await
    }

    async fn delete_user(&self, session: &SessionContext, id: UserId) -> Result<(), ApiError> {
        self.client.delete(session, &user_path(id)).await
    }

    async fn profile(&self, session: &SessionContext) -> Result<User, ApiError> {
        self.client.get(session, PROFILE_PATH, &[]).await
    }

    async fn update_profile(
        &self,
        session: &SessionContext,
        id: UserId,
        profile: &ProfileInput,
    ) -> Result<User, ApiError> {
        self.client
            .send(Method::PUT, session, &profile_edit_path(id), profile)
            .await
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    async fn list_users(&self, session: &SessionContext) -> Result<Vec<User>, ApiError>;

    async fn create_user(
        &self,
        session: &SessionContext,
        user: &UserInput,
    ) -> Result<User, ApiError>;

    async fn update_user(
        &self,
        session: &SessionContext,
        id: UserId,
        user: &UserInput,
    ) -> Result<User, ApiError>;

    async fn delete_user(&self, session: &SessionContext, id: UserId) -> Result<(), ApiError>;

    /// Account of the signed-in user.
    async fn profile(&self, session: &SessionContext) -> Result<User, ApiError>;

    /// Self-service edit of the signed-in user's contact details.
    async fn update_profile(
        &self,
        session: &SessionContext,
        id: UserId,
        profile: &ProfileInput,
    ) -> Result<User, ApiError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::{config::ApiConfig, session::ApiToken};

    #[test]
    fn user_paths() {
        assert_eq!(user_path(UserId(9)), "/usuarios/usuarios/9/");
        assert_eq!(profile_edit_path(UserId(9)), "/usuarios/editar-usuario/9/");
    }

    #[test]
    fn profile_requests_carry_the_token() -> TestResult {
        let client = ApiClient::new(&ApiConfig::default())?;
        let session = SessionContext::with_token(ApiToken::new("tok"));

        let read = client.request(Method::GET, PROFILE_PATH, &session)?.build()?;

        assert_eq!(read.url().as_str(), "http://localhost:8000/api/usuarios/perfil/");
        assert!(read.headers().contains_key(reqwest::header::AUTHORIZATION));

        let profile = ProfileInput {
            email: "ana@mims.co".to_string(),
            full_name: "Ana Gómez".to_string(),
            phone: String::new(),
            address: "Calle 10".to_string(),
        };

        let edit = client
            .request(Method::PUT, &profile_edit_path(UserId(5)), &session)?
            .json(&profile)
            .build()?;

        let body: serde_json::Value = serde_json::from_slice(
            edit.body().and_then(|body| body.as_bytes()).unwrap_or_default(),
        )?;

        assert_eq!(edit.method(), &Method::PUT);
        assert_eq!(
            edit.url().as_str(),
            "http://localhost:8000/api/usuarios/editar-usuario/5/"
        );
        assert_eq!(body["nombre_completo"], "Ana Gómez");
        assert_eq!(body["direccion"], "Calle 10");

        Ok(())
    }
}
