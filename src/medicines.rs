//! Medicines

use jiff::civil::Date;
use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use serde::{Deserialize, Serialize};

use crate::{
    listing::{Predicate, contains_ignore_case},
    pricing::{PriceError, money_from_decimal},
    products::{CatalogSnapshot, ProductId},
};

/// Storefront shows "plenty" above this many units.
pub const PLENTY_THRESHOLD: u32 = 10;

fn default_minimum_stock() -> u32 {
    10
}

fn default_true() -> bool {
    true
}

/// Medicine category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category primary key
    pub id: u64,

    /// Category name
    #[serde(rename = "nombre")]
    pub name: String,

    /// Optional description
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,

    /// Whether the category is shown
    #[serde(rename = "activo", default = "default_true")]
    pub active: bool,
}

/// A category together with the medicines filed under it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CategoryWithMedicines {
    /// The category itself
    #[serde(flatten)]
    pub category: Category,

    /// Medicines in the category
    #[serde(rename = "medicamentos", default)]
    pub medicines: Vec<Medicine>,
}

/// Medicine as returned by the inventory and catalog endpoints.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Medicine {
    /// Medicine primary key
    pub id: ProductId,

    /// Display name
    #[serde(rename = "nombre")]
    pub name: String,

    /// Optional description
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,

    /// Category, if any
    #[serde(rename = "categoria", default)]
    pub category: Option<Category>,

    /// Unit sale price as a decimal
    #[serde(rename = "precio_venta")]
    pub sale_price: Decimal,

    /// Units on hand
    #[serde(rename = "stock_actual", default)]
    pub stock_current: u32,

    /// Units held back for pending orders
    #[serde(rename = "stock_reservado", default)]
    pub stock_reserved: u32,

    /// Low-stock threshold
    #[serde(rename = "stock_minimo", default = "default_minimum_stock")]
    pub stock_minimum: u32,

    /// Expiry date
    #[serde(rename = "fecha_vencimiento", default)]
    pub expires_on: Option<Date>,

    /// Whether the medicine is on sale
    #[serde(rename = "estado", default = "default_true")]
    pub active: bool,

    /// Product image
    #[serde(rename = "imagen_url", default)]
    pub image_url: Option<String>,
}

/// Coarse stock indicator shown in the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockLevel {
    /// More than [`PLENTY_THRESHOLD`] units available
    Plenty,

    /// A few units left
    Few,

    /// Nothing available
    Out,
}

impl Medicine {
    /// Units that can still be sold: on hand minus reserved, never below zero.
    pub fn available_stock(&self) -> u32 {
        self.stock_current.saturating_sub(self.stock_reserved)
    }

    /// Checks whether stock is at or below the minimum.
    pub fn is_low_stock(&self) -> bool {
        self.stock_current <= self.stock_minimum
    }

    /// Checks whether the medicine expired before `today`.
    pub fn is_expired(&self, today: Date) -> bool {
        self.expires_on.is_some_and(|expires_on| expires_on < today)
    }

    /// Storefront stock indicator.
    pub fn stock_level(&self) -> StockLevel {
        match self.available_stock() {
            0 => StockLevel::Out,
            n if n > PLENTY_THRESHOLD => StockLevel::Plenty,
            _ => StockLevel::Few,
        }
    }

    /// Snapshot for adding this medicine to a cart, with available stock as the ceiling.
    ///
    /// # Errors
    ///
    /// Returns a [`PriceError`] if the sale price cannot be represented in `currency`.
    pub fn snapshot<'a>(&self, currency: &'a Currency) -> Result<CatalogSnapshot<'a>, PriceError> {
        let price = money_from_decimal(self.sale_price, currency)?;

        Ok(CatalogSnapshot::new(self.id.clone(), self.name.clone(), price)
            .with_stock(self.available_stock()))
    }
}

/// Create or update body for the medicines CRUD endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MedicineInput {
    /// Display name
    #[serde(rename = "nombre")]
    pub name: String,

    /// Optional description
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Category primary key
    #[serde(rename = "categoria_id")]
    pub category: Option<u64>,

    /// Unit sale price
    #[serde(rename = "precio_venta")]
    pub sale_price: Decimal,

    /// Units on hand
    #[serde(rename = "stock_actual")]
    pub stock_current: u32,

    /// Low-stock threshold
    #[serde(rename = "stock_minimo")]
    pub stock_minimum: u32,

    /// Expiry date
    #[serde(rename = "fecha_vencimiento")]
    pub expires_on: Option<Date>,

    /// Whether the medicine is on sale
    #[serde(rename = "estado")]
    pub active: bool,

    /// Product image
    #[serde(rename = "imagen_url", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl From<&Medicine> for MedicineInput {
    fn from(medicine: &Medicine) -> Self {
        Self {
            name: medicine.name.clone(),
            description: medicine.description.clone(),
            category: medicine.category.as_ref().map(|category| category.id),
            sale_price: medicine.sale_price,
            stock_current: medicine.stock_current,
            stock_minimum: medicine.stock_minimum,
            expires_on: medicine.expires_on,
            active: medicine.active,
            image_url: medicine.image_url.clone(),
        }
    }
}

/// Filters for medicine listings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MedicineFilter {
    /// Case-insensitive name search
    pub search: String,

    /// Category primary key
    pub category: Option<u64>,

    /// Only medicines with available stock
    pub only_available: bool,

    /// Lowest sale price, inclusive
    pub min_price: Option<Decimal>,

    /// Highest sale price, inclusive
    pub max_price: Option<Decimal>,
}

impl MedicineFilter {
    /// Number of filters that narrow the listing.
    pub fn active_count(&self) -> usize {
        [
            !self.search.trim().is_empty(),
            self.category.is_some(),
            self.only_available,
            self.min_price.is_some(),
            self.max_price.is_some(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }
}

impl Predicate<Medicine> for MedicineFilter {
    fn matches(&self, medicine: &Medicine) -> bool {
        contains_ignore_case(&medicine.name, self.search.trim())
            && self.category.is_none_or(|category| {
                medicine
                    .category
                    .as_ref()
                    .is_some_and(|own| own.id == category)
            })
            && (!self.only_available || medicine.available_stock() > 0)
            && self.min_price.is_none_or(|min| medicine.sale_price >= min)
            && self.max_price.is_none_or(|max| medicine.sale_price <= max)
    }
}
