//! Orders service.

use async_trait::async_trait;
use mims::orders::{NewOrder, Order, OrderStatus, StatusUpdate};
use mockall::automock;
use reqwest::Method;

use crate::{
    client::{ApiClient, ApiError},
    pagination::Paginated,
    session::SessionContext,
};

const LIST_PATH: &str = "/pedidos/listar/";
const CREATE_PATH: &str = "/pedidos/crud/";

fn order_path(id: u64) -> String {
    format!("{CREATE_PATH}{id}/")
}

fn status_path(id: u64) -> String {
    format!("/pedidos/actualizar/{id}/")
}

#[derive(Debug, Clone)]
pub struct HttpOrdersService {
    client: ApiClient,
}

impl HttpOrdersService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OrdersService for HttpOrdersService {
    async fn list_orders(&self, session: &SessionContext) -> Result<Vec<Order>, ApiError> {
        let orders: Paginated<Order> = self.client.get(session, LIST_PATH, &[]).await?;

        Ok(orders.into_items())
    }

    async fn create_order(
        &self,
        session: &SessionContext,
        order: &NewOrder,
    ) -> Result<Order, ApiError> {
        self.client
            .send(Method::POST, session, CREATE_PATH, order)
            .await
    }

    async fn update_order(
        &self,
        session: &SessionContext,
        id: u64,
        order: &NewOrder,
    ) -> Result<Order, ApiError> {
        self.client
            .send(Method::PUT, session, &order_path(id), order)
            .await
    }

    async fn update_status(
        &self,
        session: &SessionContext,
        id: u64,
        status: OrderStatus,
    ) -> Result<Order, ApiError> {
        self.client
            .send(
                Method::PUT,
                session,
                &status_path(id),
                &StatusUpdate { status },
            )
            .await
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    async fn list_orders(&self, session: &SessionContext) -> Result<Vec<Order>, ApiError>;

    async fn create_order(
        &self,
        session: &SessionContext,
        order: &NewOrder,
    ) -> Result<Order, ApiError>;

    /// Replace an order's lines and client.
    async fn update_order(
        &self,
        session: &SessionContext,
        id: u64,
        order: &NewOrder,
    ) -> Result<Order, ApiError>;

    async fn update_status(
        &self,
        session: &SessionContext,
        id: u64,
        status: OrderStatus,
    ) -> Result<Order, ApiError>;
}

#[cfg(test)]
mod tests {
    use mims::{cart::Cart, products::CatalogSnapshot, users::UserId};
    use rusty_money::{Money, iso::COP};
    use testresult::TestResult;

    use super::*;
    use crate::{config::ApiConfig, session::ApiToken};

    #[test]
    fn status_updates_target_the_order() {
        assert_eq!(status_path(42), "/pedidos/actualizar/42/");
    }

    #[test]
    fn order_edits_are_put_to_the_order() -> TestResult {
        let client = ApiClient::new(&ApiConfig::default())?;
        let session = SessionContext::with_token(ApiToken::new("tok"));

        let mut cart = Cart::new(COP);
        cart.add_item(
            &CatalogSnapshot::new(12_u64, "Ibuprofeno", Money::from_minor(150_000, COP)),
            3,
        )?;

        let request = client
            .request(Method::PUT, &order_path(42), &session)?
            .json(&NewOrder::from_cart(UserId(5), &cart))
            .build()?;

        let body: serde_json::Value = serde_json::from_slice(
            request.body().and_then(|body| body.as_bytes()).unwrap_or_default(),
        )?;

        assert_eq!(request.method(), &Method::PUT);
        assert_eq!(
            request.url().as_str(),
            "http://localhost:8000/api/pedidos/crud/42/"
        );
        assert_eq!(body["cliente"], 5);
        assert_eq!(body["total"], "4500.00");

        Ok(())
    }
}
