//! Invoices service.

use async_trait::async_trait;
use mims::invoices::{Invoice, InvoicePayload};
use mockall::automock;
use reqwest::Method;

use crate::{
    client::{ApiClient, ApiError},
    pagination::Paginated,
    session::SessionContext,
};

const INVOICES_PATH: &str = "/facturas/facturas/";
const HISTORY_PATH: &str = "/facturas/cliente/historial/";

fn invoice_path(id: u64) -> String {
    format!("{INVOICES_PATH}{id}/")
}

#[derive(Debug, Clone)]
pub struct HttpInvoicesService {
    client: ApiClient,
}

impl HttpInvoicesService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    async fn list(&self, session: &SessionContext, path: &str) -> Result<Vec<Invoice>, ApiError> {
        let invoices: Paginated<Invoice> = self.client.get(session, path, &[]).await?;

        Ok(invoices.into_items())
    }
}

#[async_trait]
impl InvoicesService for HttpInvoicesService {
    async fn list_invoices(&self, session: &SessionContext) -> Result<Vec<Invoice>, ApiError> {
        self.list(session, INVOICES_PATH).await
    }

    async fn client_history(&self, session: &SessionContext) -> Result<Vec<Invoice>, ApiError> {
        self.list(session, HISTORY_PATH).await
    }

    async fn create_invoice(
        &self,
        session: &SessionContext,
        invoice: &InvoicePayload,
    ) -> Result<Invoice, ApiError> {
        self.client
            .send(Method::POST, session, INVOICES_PATH, invoice)
            .await
    }

    async fn update_invoice(
        &self,
        session: &SessionContext,
        id: u64,
        invoice: &InvoicePayload,
    ) -> Result<Invoice, ApiError> {
        self.client
            .send(Method::PUT, session, &invoice_path(id), invoice)
            .await
    }
}

#[automock]
#[async_trait]
pub trait InvoicesService: Send + Sync {
    async fn list_invoices(&self, session: &SessionContext) -> Result<Vec<Invoice>, ApiError>;

    /// Invoices of the signed-in client.
    async fn client_history(&self, session: &SessionContext) -> Result<Vec<Invoice>, ApiError>;

    async fn create_invoice(
        &self,
        session: &SessionContext,
        invoice: &InvoicePayload,
    ) -> Result<Invoice, ApiError>;

    async fn update_invoice(
        &self,
        session: &SessionContext,
        id: u64,
        invoice: &InvoicePayload,
    ) -> Result<Invoice, ApiError>;
}
