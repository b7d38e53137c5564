//! Invoices
//!
//! Read models for persisted invoices and the draft used to create or edit one. A draft is a
//! [`Cart`] without stock ceilings plus the invoice metadata.

use std::cmp::Ordering;

use jiff::civil::Date;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use thiserror::Error;

use crate::{
    cart::{Cart, CartError},
    items::LineItem,
    listing::{Predicate, contains_ignore_case},
    pricing::{PriceError, decimal_from_money, money_from_decimal},
    products::{CatalogSnapshot, ProductId},
    quantity::{Quantity, QuantityError},
    users::UserId,
};

/// Errors raised while building or submitting an invoice draft.
#[derive(Debug, Error, PartialEq)]
pub enum InvoiceDraftError {
    /// No client has been selected.
    #[error("select a client before saving the invoice")]
    MissingClient,

    /// The draft has no lines.
    #[error("add at least one medicine to the invoice")]
    NoLines,

    /// A line could not be added or changed.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// A persisted amount could not be converted.
    #[error(transparent)]
    Price(#[from] PriceError),
}

/// How the invoice was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Cash
    #[default]
    #[serde(rename = "efectivo")]
    Cash,

    /// Card
    #[serde(rename = "tarjeta")]
    Card,

    /// Bank transfer
    #[serde(rename = "transferencia")]
    Transfer,
}

impl PaymentMethod {
    /// Backend name of the method.
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "efectivo",
            PaymentMethod::Card => "tarjeta",
            PaymentMethod::Transfer => "transferencia",
        }
    }
}

/// Accepts both `YYYY-MM-DD` and full timestamps, keeping the calendar date.
fn deserialize_issue_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
    let raw = String::deserialize(deserializer)?;
    let day = raw.get(..10).unwrap_or(&raw);

    day.parse().map_err(D::Error::custom)
}

/// One persisted invoice line.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InvoiceLine {
    /// Primary key
    #[serde(default)]
    pub id: Option<u64>,

    /// Invoiced medicine
    #[serde(rename = "medicamento")]
    pub product: ProductId,

    /// Medicine name at the time of invoicing
    #[serde(rename = "medicamento_nombre", alias = "nombre", default)]
    pub product_name: Option<String>,

    /// Units invoiced
    #[serde(rename = "cantidad")]
    pub quantity: u32,

    /// Unit price at the time of invoicing
    #[serde(rename = "precio_unitario")]
    pub unit_price: Decimal,

    /// Persisted subtotal
    pub subtotal: Decimal,
}

/// Invoice as returned by the backend. The total is shown as persisted, never recomputed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Invoice {
    /// Primary key
    pub id: u64,

    /// Invoiced client
    #[serde(rename = "cliente", default)]
    pub client: Option<UserId>,

    /// Client name, when the backend includes it
    #[serde(rename = "cliente_nombre", default)]
    pub client_name: Option<String>,

    /// Employee who issued the invoice
    #[serde(rename = "empleado", default)]
    pub employee: Option<UserId>,

    /// Payment method
    #[serde(rename = "metodo_pago", default)]
    pub payment_method: PaymentMethod,

    /// Delivery address
    #[serde(rename = "direccion_entrega", default)]
    pub delivery_address: Option<String>,

    /// Free-form notes
    #[serde(rename = "observaciones", default)]
    pub notes: Option<String>,

    /// Issue date
    #[serde(rename = "fecha_emision", deserialize_with = "deserialize_issue_date")]
    pub issued_on: Date,

    /// Whether the invoice was e-mailed to the client
    #[serde(rename = "correo_enviado", default)]
    pub email_sent: bool,

    /// Invoice lines
    #[serde(rename = "detalles", default)]
    pub lines: Vec<InvoiceLine>,

    /// Persisted total
    pub total: Decimal,
}

impl Invoice {
    /// Client name for listings, falling back to the client id.
    pub fn client_label(&self) -> String {
        match (&self.client_name, self.client) {
            (Some(name), _) if !name.trim().is_empty() => name.clone(),
            (_, Some(client)) => client.to_string(),
            _ => String::new(),
        }
    }
}

/// Orders invoices newest first.
pub fn newest_first(a: &Invoice, b: &Invoice) -> Ordering {
    b.issued_on.cmp(&a.issued_on).then_with(|| b.id.cmp(&a.id))
}

/// Sum of persisted totals; `None` if the sum overflows.
pub fn total_spent(invoices: &[Invoice]) -> Option<Decimal> {
    invoices
        .iter()
        .try_fold(Decimal::ZERO, |acc, invoice| acc.checked_add(invoice.total))
}

/// One line of an invoice submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoicePayloadLine {
    /// Invoiced medicine
    #[serde(rename = "medicamento")]
    pub product: ProductId,

    /// Units invoiced
    #[serde(rename = "cantidad")]
    pub quantity: u32,

    /// Unit price
    #[serde(rename = "precio_unitario")]
    pub unit_price: Decimal,

    /// Line subtotal
    pub subtotal: Decimal,
}

/// Invoice create or update body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoicePayload {
    /// Invoiced client
    #[serde(rename = "cliente")]
    pub client: UserId,

    /// Issuing employee
    #[serde(rename = "empleado")]
    pub employee: Option<UserId>,

    /// Payment method
    #[serde(rename = "metodo_pago")]
    pub payment_method: PaymentMethod,

    /// Whether the invoice was e-mailed
    #[serde(rename = "correo_enviado")]
    pub email_sent: bool,

    /// Delivery address
    #[serde(rename = "direccion_entrega")]
    pub delivery_address: String,

    /// Free-form notes
    #[serde(rename = "observaciones")]
    pub notes: String,

    /// Issue date
    #[serde(rename = "fecha_emision")]
    pub issued_on: Date,

    /// Invoice lines
    #[serde(rename = "detalles")]
    pub lines: Vec<InvoicePayloadLine>,

    /// Draft total
    pub total: Decimal,
}

/// An invoice being drafted by an employee.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceDraft<'a> {
    invoice: Option<u64>,
    cart: Cart<'a>,

    /// Invoiced client; required to save
    pub client: Option<UserId>,

    /// Issuing employee
    pub employee: Option<UserId>,

    /// Payment method
    pub payment_method: PaymentMethod,

    /// Whether the invoice was e-mailed
    pub email_sent: bool,

    /// Delivery address
    pub delivery_address: String,

    /// Free-form notes
    pub notes: String,

    /// Issue date
    pub issued_on: Date,
}

impl<'a> InvoiceDraft<'a> {
    /// Create an empty draft issued on `today`.
    pub fn new(currency: &'static Currency, today: Date) -> Self {
        Self {
            invoice: None,
            cart: Cart::new(currency),
            client: None,
            employee: None,
            payment_method: PaymentMethod::default(),
            email_sent: false,
            delivery_address: String::new(),
            notes: String::new(),
            issued_on: today,
        }
    }

    /// Seed a draft from a persisted invoice for editing.
    ///
    /// Lines keep the persisted unit price; subtotals and the total are recomputed by the draft.
    ///
    /// # Errors
    ///
    /// - [`InvoiceDraftError::Price`]: a persisted unit price cannot be represented in `currency`.
    /// - [`InvoiceDraftError::Cart`]: a persisted line has a zero quantity.
    pub fn from_invoice(
        invoice: &Invoice,
        currency: &'static Currency,
    ) -> Result<Self, InvoiceDraftError> {
        let mut draft = Self::new(currency, invoice.issued_on);

        draft.invoice = Some(invoice.id);
        draft.client = invoice.client;
        draft.employee = invoice.employee;
        draft.payment_method = invoice.payment_method;
        draft.email_sent = invoice.email_sent;
        draft.delivery_address = invoice.delivery_address.clone().unwrap_or_default();
        draft.notes = invoice.notes.clone().unwrap_or_default();

        for line in &invoice.lines {
            let name = line
                .product_name
                .clone()
                .unwrap_or_else(|| line.product.to_string());

            let snapshot = CatalogSnapshot::new(
                line.product.clone(),
                name,
                money_from_decimal(line.unit_price, currency)?,
            );

            draft.cart.add_item(&snapshot, line.quantity)?;
        }

        Ok(draft)
    }

    /// Persisted invoice being edited, if any.
    pub fn invoice_id(&self) -> Option<u64> {
        self.invoice
    }

    /// Add `quantity` units of a product. Stock is never enforced on invoices.
    ///
    /// # Errors
    ///
    /// See [`Cart::add_item`]; [`CartError::StockExceeded`] never occurs.
    pub fn add_item(
        &mut self,
        product: &CatalogSnapshot<'a>,
        quantity: u32,
    ) -> Result<LineItem<'a>, CartError> {
        let unbounded = product.clone().without_stock_ceiling();

        self.cart.add_item(&unbounded, quantity)
    }

    /// Remove a product's line.
    ///
    /// # Errors
    ///
    /// See [`Cart::remove_item`].
    pub fn remove_item(&mut self, product: &ProductId) -> Result<Option<LineItem<'a>>, CartError> {
        self.cart.remove_item(product)
    }

    /// Replace a line's quantity; zero removes it.
    ///
    /// # Errors
    ///
    /// See [`Cart::set_quantity`].
    pub fn set_quantity<Q>(&mut self, product: &ProductId, quantity: Q) -> Result<(), CartError>
    where
        Q: TryInto<Quantity, Error = QuantityError>,
    {
        self.cart.set_quantity(product, quantity)
    }

    /// Start over for the same client and employee: no lines, no persisted invoice, default
    /// payment details and an issue date of `today`.
    pub fn clear(&mut self, today: Date) {
        *self = Self {
            client: self.client,
            employee: self.employee,
            ..Self::new(self.cart.currency(), today)
        };
    }

    /// Draft lines.
    pub fn items(&self) -> &[LineItem<'a>] {
        self.cart.items()
    }

    /// Draft total.
    pub fn total(&self) -> Money<'a, Currency> {
        self.cart.total()
    }

    /// Underlying lines and total.
    pub fn cart(&self) -> &Cart<'a> {
        &self.cart
    }

    /// Checks the draft can be saved and returns the client.
    ///
    /// # Errors
    ///
    /// - [`InvoiceDraftError::MissingClient`]: no client selected.
    /// - [`InvoiceDraftError::NoLines`]: the draft is empty.
    pub fn validate(&self) -> Result<UserId, InvoiceDraftError> {
        let client = self.client.ok_or(InvoiceDraftError::MissingClient)?;

        if self.cart.is_empty() {
            return Err(InvoiceDraftError::NoLines);
        }

        Ok(client)
    }

    /// Validate and build the backend body.
    ///
    /// # Errors
    ///
    /// See [`InvoiceDraft::validate`].
    pub fn to_payload(&self) -> Result<InvoicePayload, InvoiceDraftError> {
        let client = self.validate()?;

        Ok(InvoicePayload {
            client,
            employee: self.employee,
            payment_method: self.payment_method,
            email_sent: self.email_sent,
            delivery_address: self.delivery_address.clone(),
            notes: self.notes.clone(),
            issued_on: self.issued_on,
            lines: self
                .cart
                .iter()
                .map(|item| InvoicePayloadLine {
                    product: item.product().clone(),
                    quantity: item.quantity(),
                    unit_price: decimal_from_money(item.unit_price()),
                    subtotal: decimal_from_money(item.subtotal()),
                })
                .collect(),
            total: decimal_from_money(&self.cart.total()),
        })
    }
}

/// Filters for invoice listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvoiceFilter {
    /// Case-insensitive client search
    pub search: String,

    /// Earliest issue date, inclusive
    pub from: Option<Date>,

    /// Latest issue date, inclusive
    pub to: Option<Date>,

    /// Lowest total, inclusive
    pub min_total: Option<Decimal>,

    /// Highest total, inclusive
    pub max_total: Option<Decimal>,
}

impl InvoiceFilter {
    /// Number of filters that narrow the listing.
    pub fn active_count(&self) -> usize {
        [
            !self.search.trim().is_empty(),
            self.from.is_some(),
            self.to.is_some(),
            self.min_total.is_some(),
            self.max_total.is_some(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }
}

impl Predicate<Invoice> for InvoiceFilter {
    fn matches(&self, invoice: &Invoice) -> bool {
        contains_ignore_case(&invoice.client_label(), self.search.trim())
            && self.from.is_none_or(|from| invoice.issued_on >= from)
            && self.to.is_none_or(|to| invoice.issued_on <= to)
            && self.min_total.is_none_or(|min| invoice.total >= min)
            && self.max_total.is_none_or(|max| invoice.total <= max)
    }
}
