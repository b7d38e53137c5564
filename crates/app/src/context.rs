//! App Context

use std::sync::Arc;

use crate::{
    auth::{AuthService, HttpAuthService},
    client::{ApiClient, ApiError},
    config::ApiConfig,
    domain::{
        catalog::{CatalogService, HttpCatalogService},
        invoices::{HttpInvoicesService, InvoicesService},
        medicines::{HttpMedicinesService, MedicinesService},
        messages::{HttpMessagesService, MessagesService},
        orders::{HttpOrdersService, OrdersService},
        roles::{HttpRolesService, RolesService},
        users::{HttpUsersService, UsersService},
    },
    session::{ApiToken, SessionContext},
};

#[derive(Clone)]
pub struct AppContext {
    pub auth: Arc<dyn AuthService>,
    pub catalog: Arc<dyn CatalogService>,
    pub medicines: Arc<dyn MedicinesService>,
    pub orders: Arc<dyn OrdersService>,
    pub invoices: Arc<dyn InvoicesService>,
    pub users: Arc<dyn UsersService>,
    pub roles: Arc<dyn RolesService>,
    pub messages: Arc<dyn MessagesService>,
}

impl AppContext {
    /// Build application context against the configured backend.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend URL or timeout is invalid.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = ApiClient::new(config)?;

        Ok(Self {
            auth: Arc::new(HttpAuthService::new(client.clone())),
            catalog: Arc::new(HttpCatalogService::new(client.clone())),
            medicines: Arc::new(HttpMedicinesService::new(client.clone())),
            orders: Arc::new(HttpOrdersService::new(client.clone())),
            invoices: Arc::new(HttpInvoicesService::new(client.clone())),
            users: Arc::new(HttpUsersService::new(client.clone())),
            roles: Arc::new(HttpRolesService::new(client.clone())),
            messages: Arc::new(HttpMessagesService::new(client)),
        })
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}

/// Session for a token given on the command line, if any.
pub fn initial_session(config: &ApiConfig) -> SessionContext {
    config
        .token
        .as_deref()
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map_or_else(SessionContext::anonymous, |token| {
            SessionContext::with_token(ApiToken::new(token))
        })
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn builds_from_default_config() -> TestResult {
        AppContext::from_config(&ApiConfig::default())?;

        Ok(())
    }

    #[test]
    fn command_line_token_becomes_the_session() {
        let config = ApiConfig {
            token: Some(" tok ".to_string()),
            ..ApiConfig::default()
        };

        let session = initial_session(&config);

        assert_eq!(session.token(), Some(&ApiToken::new("tok")));
        assert!(session.user().is_none());
    }

    #[test]
    fn blank_token_is_anonymous() {
        let config = ApiConfig {
            token: Some("  ".to_string()),
            ..ApiConfig::default()
        };

        assert!(!initial_session(&config).is_authenticated());
    }
}
