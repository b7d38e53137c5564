//! Orders

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    cart::Cart,
    listing::{Predicate, contains_ignore_case},
    medicines::Medicine,
    pricing::decimal_from_money,
    products::ProductId,
    users::UserId,
};

/// Order lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Placed, not yet looked at
    #[default]
    #[serde(rename = "pendiente")]
    Pending,

    /// Accepted by an employee
    #[serde(rename = "confirmado")]
    Confirmed,

    /// Picked and packed
    #[serde(rename = "procesado")]
    Processed,

    /// Handed to delivery
    #[serde(rename = "enviado")]
    Shipped,

    /// Received by the client
    #[serde(rename = "entregado")]
    Delivered,

    /// Cancelled
    #[serde(rename = "cancelado")]
    Cancelled,
}

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Processed,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// Backend name of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pendiente",
            OrderStatus::Confirmed => "confirmado",
            OrderStatus::Processed => "procesado",
            OrderStatus::Shipped => "enviado",
            OrderStatus::Delivered => "entregado",
            OrderStatus::Cancelled => "cancelado",
        }
    }

    /// Checks whether the order can no longer change.
    pub fn is_final(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Client reference on an order; the listing endpoint has returned all three shapes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OrderClient {
    /// Bare primary key
    Id(UserId),

    /// Username as text
    Name(String),

    /// Nested user
    User {
        /// Primary key
        id: UserId,

        /// Login name
        username: String,
    },
}

impl OrderClient {
    /// Name shown in order listings.
    pub fn display_name(&self) -> String {
        match self {
            OrderClient::Id(id) => format!("Cliente {id}"),
            OrderClient::Name(name) => name.clone(),
            OrderClient::User { username, .. } => username.clone(),
        }
    }

    /// Primary key, when the backend sent one.
    pub fn id(&self) -> Option<UserId> {
        match self {
            OrderClient::Id(id) | OrderClient::User { id, .. } => Some(*id),
            OrderClient::Name(_) => None,
        }
    }
}

/// One persisted order line.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderLine {
    /// Primary key
    #[serde(default)]
    pub id: Option<u64>,

    /// Ordered medicine
    #[serde(rename = "medicamento")]
    pub medicine: Medicine,

    /// Units ordered
    #[serde(rename = "cantidad")]
    pub quantity: u32,

    /// Persisted subtotal
    pub subtotal: Decimal,
}

/// Order as returned by the backend. Totals are shown as persisted, never recomputed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Order {
    /// Primary key
    pub id: u64,

    /// Client who placed the order
    #[serde(rename = "cliente")]
    pub client: OrderClient,

    /// Creation time
    #[serde(rename = "fecha_creacion", default)]
    pub created_at: Option<Timestamp>,

    /// Lifecycle state
    #[serde(rename = "estado", default)]
    pub status: OrderStatus,

    /// Persisted total
    pub total: Decimal,

    /// Order lines
    #[serde(rename = "detalles", default)]
    pub lines: Vec<OrderLine>,
}

/// One line of an order submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewOrderLine {
    /// Ordered medicine
    #[serde(rename = "medicamento_id")]
    pub product: ProductId,

    /// Units ordered
    #[serde(rename = "cantidad")]
    pub quantity: u32,

    /// Subtotal computed by the cart
    pub subtotal: Decimal,
}

/// Order submission body built from a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewOrder {
    /// Client placing the order
    #[serde(rename = "cliente")]
    pub client: UserId,

    /// Cart total
    pub total: Decimal,

    /// Order lines
    #[serde(rename = "detalles_data")]
    pub lines: Vec<NewOrderLine>,
}

impl NewOrder {
    /// Snapshot `cart` into a submission for `client`.
    pub fn from_cart(client: UserId, cart: &Cart<'_>) -> Self {
        Self {
            client,
            total: decimal_from_money(&cart.total()),
            lines: cart
                .iter()
                .map(|item| NewOrderLine {
                    product: item.product().clone(),
                    quantity: item.quantity(),
                    subtotal: decimal_from_money(item.subtotal()),
                })
                .collect(),
        }
    }
}

/// Status change body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusUpdate {
    /// New status
    #[serde(rename = "estado")]
    pub status: OrderStatus,
}

/// Filters for order listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
    /// Case-insensitive search over client name, or a fragment of the order number
    pub search: String,

    /// Only orders in this state
    pub status: Option<OrderStatus>,
}

impl OrderFilter {
    /// Number of filters that narrow the listing.
    pub fn active_count(&self) -> usize {
        usize::from(!self.search.trim().is_empty()) + usize::from(self.status.is_some())
    }
}

impl Predicate<Order> for OrderFilter {
    fn matches(&self, order: &Order) -> bool {
        let search = self.search.trim();

        (contains_ignore_case(&order.client.display_name(), search)
            || order.id.to_string().contains(search))
            && self.status.is_none_or(|status| order.status == status)
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::GBP};
    use testresult::TestResult;

    use super::*;
    use crate::products::CatalogSnapshot;

    const ORDER: &str = r#"{
        "id": 42,
        "cliente": {"id": 5, "username": "ana"},
        "fecha_creacion": "2025-06-01T10:00:00Z",
        "estado": "enviado",
        "total": "3000.00",
        "detalles": [
            {
                "id": 1,
                "medicamento": {"id": 12, "nombre": "Ibuprofeno", "precio_venta": "1500.00"},
                "cantidad": 2,
                "subtotal": "3000.00"
            }
        ]
    }"#;

    #[test]
    fn decodes_orders() -> TestResult {
        let order: Order = serde_json::from_str(ORDER)?;

        assert_eq!(order.status, OrderStatus::Shipped);
        assert_eq!(order.client.id(), Some(UserId(5)));
        assert_eq!(order.client.display_name(), "ana");
        assert_eq!(order.lines[0].medicine.id, ProductId::from(12_u64));
        assert_eq!(order.total, Decimal::new(300_000, 2));

        Ok(())
    }

    #[test]
    fn client_may_be_id_or_name() -> TestResult {
        let by_id: OrderClient = serde_json::from_str("5")?;
        let by_name: OrderClient = serde_json::from_str("\"ana\"")?;

        assert_eq!(by_id, OrderClient::Id(UserId(5)));
        assert_eq!(by_id.display_name(), "Cliente 5");
        assert_eq!(by_name.id(), None);

        Ok(())
    }

    #[test]
    fn status_names() -> TestResult {
        for status in OrderStatus::ALL {
            assert_eq!(serde_json::to_string(&status)?, format!("\"{status}\""));
        }

        assert!(OrderStatus::Cancelled.is_final());
        assert!(!OrderStatus::Pending.is_final());

        Ok(())
    }

    #[test]
    fn new_order_mirrors_the_cart() -> TestResult {
        let mut cart = Cart::new(GBP);

        cart.add_item(
            &CatalogSnapshot::new(12_u64, "Ibuprofeno", Money::from_minor(150_000, GBP)),
            2,
        )?;

        let json = serde_json::to_value(NewOrder::from_cart(UserId(5), &cart))?;

        assert_eq!(
            json,
            serde_json::json!({
                "cliente": 5,
                "total": "3000.00",
                "detalles_data": [
                    {"medicamento_id": 12, "cantidad": 2, "subtotal": "3000.00"}
                ]
            })
        );

        Ok(())
    }

    #[test]
    fn filter_by_client_number_and_status() -> TestResult {
        let order: Order = serde_json::from_str(ORDER)?;

        let by_name = OrderFilter {
            search: "AN".to_string(),
            status: Some(OrderStatus::Shipped),
        };
        let by_number = OrderFilter {
            search: "4".to_string(),
            status: None,
        };
        let wrong_status = OrderFilter {
            status: Some(OrderStatus::Pending),
            ..OrderFilter::default()
        };

        assert!(by_name.matches(&order));
        assert!(by_number.matches(&order));
        assert!(!wrong_status.matches(&order));

        Ok(())
    }
}
