//! Catalog service.

use async_trait::async_trait;
use mockall::automock;
use mims::{
    medicines::{Category, CategoryWithMedicines, Medicine},
    pharmacies::{Pharmacy, Supplier},
};
use rust_decimal::Decimal;

use crate::{
    client::{ApiClient, ApiError},
    pagination::{Paginated, ServerPage},
    session::SessionContext,
};

const CATALOG_PATH: &str = "/inventario/catalogo/";
const CATEGORIES_WITH_MEDICINES_PATH: &str = "/inventario/catalogo/categorias-con-medicamentos/";
const CATEGORIES_PATH: &str = "/inventario/catalogo/categorias/";
const SUPPLIERS_PATH: &str = "/inventario/catalogo/proveedores/";
const PHARMACIES_PATH: &str = "/inventario/catalogo/droguerias/";

/// Storefront page size.
pub const CATALOG_PAGE_SIZE: u32 = 12;

/// Page size of the supplier lookup.
pub const SUPPLIER_PAGE_SIZE: u32 = 10;

/// Search and paging for the supplier lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplierQuery {
    pub search: String,
    pub page: u32,
    pub page_size: u32,
}

impl Default for SupplierQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            page: 1,
            page_size: SUPPLIER_PAGE_SIZE,
        }
    }
}

impl SupplierQuery {
    /// Query string pairs. The search is always sent, empty when unset.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("q", self.search.trim().to_string()),
            ("page", self.page.max(1).to_string()),
            ("page_size", self.page_size.max(1).to_string()),
        ]
    }
}

/// Server-side catalog filters and paging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    pub page: u32,
    pub page_size: u32,
    pub category: Option<u64>,
    pub search: String,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub only_available: bool,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: CATALOG_PAGE_SIZE,
            category: None,
            search: String::new(),
            min_price: None,
            max_price: None,
            only_available: false,
        }
    }
}

impl CatalogQuery {
    /// Query string pairs; unset filters are left out.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("page", self.page.max(1).to_string()),
            ("page_size", self.page_size.max(1).to_string()),
        ];

        if let Some(category) = self.category {
            query.push(("categoria", category.to_string()));
        }

        let search = self.search.trim();

        if !search.is_empty() {
            query.push(("q", search.to_string()));
        }

        if let Some(min) = self.min_price {
            query.push(("precio_min", min.to_string()));
        }

        if let Some(max) = self.max_price {
            query.push(("precio_max", max.to_string()));
        }

        if self.only_available {
            query.push(("disponible", "true".to_string()));
        }

        query
    }
}

#[derive(Debug, Clone)]
pub struct HttpCatalogService {
    client: ApiClient,
}

impl HttpCatalogService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CatalogService for HttpCatalogService {
    async fn list_catalog(
        &self,
        session: &SessionContext,
        query: &CatalogQuery,
    ) -> Result<ServerPage<Medicine>, ApiError> {
        let page: Paginated<Medicine> = self
            .client
            .get(session, CATALOG_PATH, &query.to_query())
            .await?;

        Ok(page.into_page())
    }

    async fn categories_with_medicines(
        &self,
        session: &SessionContext,
    ) -> Result<Vec<CategoryWithMedicines>, ApiError> {
        self.client
            .get(session, CATEGORIES_WITH_MEDICINES_PATH, &[])
            .await
    }

    async fn categories(&self, session: &SessionContext) -> Result<Vec<Category>, ApiError> {
        self.client.get(session, CATEGORIES_PATH, &[]).await
    }

    async fn suppliers(
        &self,
        session: &SessionContext,
        query: &SupplierQuery,
    ) -> Result<ServerPage<Supplier>, ApiError> {
        let page: Paginated<Supplier> = self
            .client
            .get(session, SUPPLIERS_PATH, &query.to_query())
            .await?;

        Ok(page.into_page())
    }

    async fn pharmacies(&self, session: &SessionContext) -> Result<Vec<Pharmacy>, ApiError> {
        let pharmacies: Paginated<Pharmacy> =
            self.client.get(session, PHARMACIES_PATH, &[]).await?;

        Ok(pharmacies.into_items())
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn list_catalog(
        &self,
        session: &SessionContext,
        query: &CatalogQuery,
    ) -> Result<ServerPage<Medicine>, ApiError>;

    async fn categories_with_medicines(
        &self,
        session: &SessionContext,
    ) -> Result<Vec<CategoryWithMedicines>, ApiError>;

    async fn categories(&self, session: &SessionContext) -> Result<Vec<Category>, ApiError>;

    /// Supplier names, searched and paged by the server.
    async fn suppliers(
        &self,
        session: &SessionContext,
        query: &SupplierQuery,
    ) -> Result<ServerPage<Supplier>, ApiError>;

    /// Pharmacy branches.
    async fn pharmacies(&self, session: &SessionContext) -> Result<Vec<Pharmacy>, ApiError>;
}
