//! Roles service.

use async_trait::async_trait;
use mims::users::{RoleInput, RoleRecord};
use mockall::automock;
use reqwest::Method;
use serde::Serialize;

use crate::{
    client::{ApiClient, ApiError},
    pagination::Paginated,
    session::SessionContext,
};

const ROLES_PATH: &str = "/usuarios/roles/";

fn role_path(id: u64) -> String {
    format!("{ROLES_PATH}{id}/")
}

#[derive(Debug, Serialize)]
struct ActiveUpdate {
    activo: bool,
}

#[derive(Debug, Clone)]
pub struct HttpRolesService {
    client: ApiClient,
}

impl HttpRolesService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RolesService for HttpRolesService {
    async fn list_roles(&self, session: &SessionContext) -> Result<Vec<RoleRecord>, ApiError> {
        let roles: Paginated<RoleRecord> = self.client.get(session, ROLES_PATH, &[]).await?;

        Ok(roles.into_items())
    }

    async fn create_role(
        &self,
        session: &SessionContext,
        role: &RoleInput,
    ) -> Result<RoleRecord, ApiError> {
        self.client
            .send(Method::POST, session, ROLES_PATH, role)
            .await
    }

    async fn update_role(
        &self,
        session: &SessionContext,
        id: u64,
        role: &RoleInput,
    ) -> Result<RoleRecord, ApiError> {
        self.client
            .send(Method::PUT, session, &role_path(id), role)
            .await
    }

    async fn set_active(
        &self,
        session: &SessionContext,
        id: u64,
        active: bool,
    ) -> Result<RoleRecord, ApiError> {
        self.client
            .send(
                Method::PATCH,
                session,
                &role_path(id),
                &ActiveUpdate { activo: active },
            )
            .await
    }
}

#[automock]
#[async_trait]
pub trait RolesService: Send + Sync {
    async fn list_roles(&self, session: &SessionContext) -> Result<Vec<RoleRecord>, ApiError>;

    async fn create_role(
        &self,
        session: &SessionContext,
        role: &RoleInput,
    ) -> Result<RoleRecord, ApiError>;

    async fn update_role(
        &self,
        session: &SessionContext,
        id: u64,
        role: &RoleInput,
    ) -> Result<RoleRecord, ApiError>;

    async fn set_active(
        &self,
        session: &SessionContext,
        id: u64,
        active: bool,
    ) -> Result<RoleRecord, ApiError>;
}
