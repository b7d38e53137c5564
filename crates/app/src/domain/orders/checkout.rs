//! Checkout
//!
//! Turns the storefront cart into an order. The cart is cleared only once the backend has
//! accepted the order.

use mims::{
    cart::Cart,
    orders::{NewOrder, Order},
};
use thiserror::Error;
use tracing::{info, warn};

use crate::{client::ApiError, domain::orders::OrdersService, session::SessionContext};

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("sign in to place an order")]
    Unauthenticated,

    #[error("the cart is empty")]
    EmptyCart,

    #[error("order submission failed")]
    Api(#[from] ApiError),
}

/// Submit `cart` as an order for the signed-in user.
///
/// # Errors
///
/// Returns an error, leaving the cart untouched, when nobody is signed in, the cart is empty, or
/// the backend rejects the order.
pub async fn checkout(
    cart: &mut Cart<'_>,
    session: &SessionContext,
    orders: &dyn OrdersService,
) -> Result<Order, CheckoutError> {
    let user = session
        .user()
        .filter(|_| session.is_authenticated())
        .ok_or(CheckoutError::Unauthenticated)?;

    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let order = NewOrder::from_cart(user.id, cart);

    match orders.create_order(session, &order).await {
        Ok(created) => {
            info!(
                order = created.id,
                lines = order.lines.len(),
                total = %order.total,
                "order placed"
            );

            cart.clear();

            Ok(created)
        }
        Err(error) => {
            warn!(%error, lines = order.lines.len(), "order submission failed");

            Err(error.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use mims::{
        orders::OrderStatus,
        products::CatalogSnapshot,
        users::UserId,
    };
    use rust_decimal::Decimal;
    use rusty_money::{Money, iso::COP};
    use testresult::TestResult;

    use super::*;
    use crate::{
        domain::orders::MockOrdersService,
        session::{ApiToken, Session},
    };

    fn signed_in() -> Result<SessionContext, serde_json::Error> {
        let session: Session = serde_json::from_value(serde_json::json!({
            "token": "tok",
            "usuario": {"id": 5, "username": "ana"}
        }))?;

        let mut context = SessionContext::anonymous();

        context.sign_in(session);

        Ok(context)
    }

    fn order() -> Result<Order, serde_json::Error> {
        serde_json::from_value(serde_json::json!({
            "id": 77,
            "cliente": 5,
            "estado": "pendiente",
            "total": "3000.00"
        }))
    }

    fn filled_cart() -> Result<Cart<'static>, mims::cart::CartError> {
        let mut cart = Cart::new(COP);

        cart.add_item(
            &CatalogSnapshot::new(12_u64, "Ibuprofeno", Money::from_minor(150_000, COP)),
            2,
        )?;

        Ok(cart)
    }

    #[tokio::test]
    async fn successful_checkout_clears_the_cart() -> TestResult {
        let created = order()?;
        let mut orders = MockOrdersService::new();

        orders
            .expect_create_order()
            .withf(|_, order| {
                order.client == UserId(5)
                    && order.total == Decimal::new(300_000, 2)
                    && order.lines.len() == 1
            })
            .times(1)
            .return_once(move |_, _| Ok(created));

        let mut cart = filled_cart()?;
        let placed = checkout(&mut cart, &signed_in()?, &orders).await?;

        assert_eq!(placed.id, 77);
        assert_eq!(placed.status, OrderStatus::Pending);
        assert!(cart.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn failed_submission_keeps_the_cart() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_create_order().times(1).returning(|_, _| {
            Err(ApiError::Status {
                status: 400,
                body: "stock insuficiente".to_string(),
            })
        });

        let mut cart = filled_cart()?;
        let before = cart.clone();

        let result = checkout(&mut cart, &signed_in()?, &orders).await;

        assert!(matches!(
            result,
            Err(CheckoutError::Api(ApiError::Status { status: 400, .. }))
        ));
        assert_eq!(cart, before);

        Ok(())
    }

    #[tokio::test]
    async fn anonymous_checkout_is_refused() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_create_order().never();

        let mut cart = filled_cart()?;
        let result = checkout(&mut cart, &SessionContext::anonymous(), &orders).await;

        assert!(matches!(result, Err(CheckoutError::Unauthenticated)));
        assert_eq!(cart.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn token_without_a_user_is_refused() -> TestResult {
        let orders = MockOrdersService::new();
        let mut cart = filled_cart()?;

        let result = checkout(
            &mut cart,
            &SessionContext::with_token(ApiToken::new("tok")),
            &orders,
        )
        .await;

        assert!(matches!(result, Err(CheckoutError::Unauthenticated)));

        Ok(())
    }

    #[tokio::test]
    async fn empty_cart_is_refused() -> TestResult {
        let orders = MockOrdersService::new();
        let mut cart = Cart::new(COP);

        let result = checkout(&mut cart, &signed_in()?, &orders).await;

        assert!(matches!(result, Err(CheckoutError::EmptyCart)));

        Ok(())
    }
}
