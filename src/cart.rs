//! Cart
//!
//! In-memory reconciler keeping a cart's line items and total consistent. Every operation is
//! all-or-nothing: a rejected mutation leaves both the items and the total untouched.

use std::num::NonZeroU32;

use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    items::LineItem,
    pricing::{PriceError, total_price},
    products::{CatalogSnapshot, ProductId},
    quantity::{Quantity, QuantityError},
};

/// Errors related to cart mutations.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// The resulting quantity would exceed the tracked stock ceiling.
    #[error("requested quantity {requested} of product {product} exceeds available stock {available}")]
    StockExceeded {
        /// Product that was being changed
        product: ProductId,

        /// Quantity the line would have ended up with
        requested: u32,

        /// Stock ceiling for the product
        available: u32,
    },

    /// Negative, fractional or otherwise unusable quantity.
    #[error(transparent)]
    InvalidQuantity(#[from] QuantityError),

    /// The product is not in the cart.
    #[error("product {0} not found in cart")]
    ItemNotFound(ProductId),

    /// A product's currency differs from the cart currency (product, product currency, cart currency).
    #[error("product {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(ProductId, &'static str, &'static str),

    /// The product has a negative unit price.
    #[error("product {0} has a negative unit price")]
    NegativePrice(ProductId),

    /// Subtotal or total arithmetic failed.
    #[error(transparent)]
    Price(#[from] PriceError),
}

/// Shopping cart or invoice draft lines with a derived total.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart<'a> {
    items: Vec<LineItem<'a>>,
    ceilings: FxHashMap<ProductId, u32>,
    total: Money<'a, Currency>,
    currency: &'static Currency,
}

impl<'a> Cart<'a> {
    /// Create a new, empty cart.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            items: Vec::new(),
            ceilings: FxHashMap::default(),
            total: Money::from_minor(0, currency),
            currency,
        }
    }

    /// Add one unit of a product.
    ///
    /// # Errors
    ///
    /// See [`Cart::add_item`].
    pub fn add_one(&mut self, product: &CatalogSnapshot<'a>) -> Result<LineItem<'a>, CartError> {
        self.add_item(product, 1)
    }

    /// Add `quantity` units of a product, merging into an existing line for the same product.
    /// Returns a copy of the line as committed.
    ///
    /// A merged line keeps the name and unit price copied when it was first inserted. The stock
    /// ceiling tracked for the product is replaced by the one in `product`.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidQuantity`]: `quantity` is zero.
    /// - [`CartError::StockExceeded`]: the resulting quantity exceeds `product.available_stock`.
    /// - [`CartError::CurrencyMismatch`]: the product is priced in another currency.
    /// - [`CartError::NegativePrice`]: the product has a negative unit price.
    /// - [`CartError::Price`]: the subtotal or total overflowed.
    pub fn add_item(
        &mut self,
        product: &CatalogSnapshot<'a>,
        quantity: u32,
    ) -> Result<LineItem<'a>, CartError> {
        let requested = NonZeroU32::new(quantity).ok_or(QuantityError::Zero)?;

        self.check_product(product)?;

        let position = self.position(&product.product_id);
        let existing = position.and_then(|index| self.items.get(index));

        let current = existing.map_or(0, LineItem::quantity);
        let merged = requested
            .checked_add(current)
            .ok_or(QuantityError::TooLarge(format!("{current} + {quantity}")))?;

        if let Some(available) = product.available_stock
            && merged.get() > available
        {
            return Err(CartError::StockExceeded {
                product: product.product_id.clone(),
                requested: merged.get(),
                available,
            });
        }

        let line = if let Some(item) = existing {
            item.with_quantity(merged)?
        } else {
            LineItem::new(
                product.product_id.clone(),
                product.name.clone(),
                product.unit_price,
                merged,
            )?
        };

        let mut next = self.items.clone();

        if let Some(slot) = position.and_then(|index| next.get_mut(index)) {
            *slot = line.clone();
        } else {
            next.push(line.clone());
        }

        self.commit(next)?;

        if let Some(available) = product.available_stock {
            self.ceilings.insert(product.product_id.clone(), available);
        } else {
            self.ceilings.remove(&product.product_id);
        }

        Ok(line)
    }

    /// Remove the line for `product`, returning it. Removing an absent product is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Price`] if the total cannot be recomputed.
    pub fn remove_item(&mut self, product: &ProductId) -> Result<Option<LineItem<'a>>, CartError> {
        let Some(index) = self.position(product) else {
            return Ok(None);
        };

        let mut next = self.items.clone();
        let removed = next.remove(index);

        self.commit(next)?;
        self.ceilings.remove(product);

        Ok(Some(removed))
    }

    /// Replace the quantity of an existing line. A quantity of zero removes the line.
    ///
    /// `quantity` is anything that converts into a [`Quantity`]: a signed integer or the raw
    /// text typed into a quantity field.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidQuantity`]: `quantity` is negative, fractional or not a number.
    /// - [`CartError::ItemNotFound`]: a positive quantity was given for a product not in the cart.
    /// - [`CartError::StockExceeded`]: `quantity` exceeds the tracked stock ceiling.
    /// - [`CartError::Price`]: the subtotal or total overflowed.
    pub fn set_quantity<Q>(&mut self, product: &ProductId, quantity: Q) -> Result<(), CartError>
    where
        Q: TryInto<Quantity, Error = QuantityError>,
    {
        let quantity: Quantity = quantity.try_into()?;

        let Some(quantity) = NonZeroU32::new(quantity.get()) else {
            self.remove_item(product)?;

            return Ok(());
        };

        let index = self
            .position(product)
            .ok_or_else(|| CartError::ItemNotFound(product.clone()))?;

        if let Some(&available) = self.ceilings.get(product)
            && quantity.get() > available
        {
            return Err(CartError::StockExceeded {
                product: product.clone(),
                requested: quantity.get(),
                available,
            });
        }

        let mut next = self.items.clone();

        if let Some(slot) = next.get_mut(index) {
            *slot = slot.with_quantity(quantity)?;
        }

        self.commit(next)
    }

    /// Take one unit off a line, removing it when it reaches zero.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ItemNotFound`] if the product is not in the cart.
    pub fn decrement(&mut self, product: &ProductId) -> Result<(), CartError> {
        let current = self
            .get(product)
            .map(LineItem::quantity)
            .ok_or_else(|| CartError::ItemNotFound(product.clone()))?;

        self.set_quantity(product, i64::from(current) - 1)
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.ceilings.clear();
        self.total = Money::from_minor(0, self.currency);
    }

    /// Get the line for a product.
    pub fn get(&self, product: &ProductId) -> Option<&LineItem<'a>> {
        self.items.iter().find(|item| item.product() == product)
    }

    /// Get the stock ceiling tracked for a product, if any.
    pub fn stock_ceiling(&self, product: &ProductId) -> Option<u32> {
        self.ceilings.get(product).copied()
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[LineItem<'a>] {
        &self.items
    }

    /// Iterate over the lines in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem<'a>> {
        self.items.iter()
    }

    /// Sum of all line subtotals.
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity())).sum()
    }

    /// Get the currency of the cart.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    fn position(&self, product: &ProductId) -> Option<usize> {
        self.items.iter().position(|item| item.product() == product)
    }

    fn check_product(&self, product: &CatalogSnapshot<'a>) -> Result<(), CartError> {
        let product_currency = product.unit_price.currency();

        if product_currency != self.currency {
            return Err(CartError::CurrencyMismatch(
                product.product_id.clone(),
                product_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        if product.unit_price.to_minor_units() < 0 {
            return Err(CartError::NegativePrice(product.product_id.clone()));
        }

        Ok(())
    }

    fn commit(&mut self, items: Vec<LineItem<'a>>) -> Result<(), CartError> {
        let total = total_price(&items, self.currency)?;

        self.items = items;
        self.total = total;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{GBP, USD};
    use testresult::TestResult;

    use super::*;

    fn product(id: &str, price: i64) -> CatalogSnapshot<'static> {
        CatalogSnapshot::new(id, format!("Product {id}"), Money::from_minor(price, GBP))
    }

    #[test]
    fn new_cart_is_empty_with_zero_total() {
        let cart = Cart::new(GBP);

        assert!(cart.is_empty());
        assert_eq!(cart.total(), Money::from_minor(0, GBP));
        assert_eq!(cart.currency(), GBP);
    }

    #[test]
    fn add_inserts_new_line() -> TestResult {
        let mut cart = Cart::new(GBP);

        let line = cart.add_item(&product("A", 500), 2)?;

        assert_eq!(line.quantity(), 2);
        assert_eq!(line.subtotal(), &Money::from_minor(1000, GBP));
        assert_eq!(cart.total(), Money::from_minor(1000, GBP));

        Ok(())
    }

    #[test]
    fn add_same_product_merges() -> TestResult {
        let mut cart = Cart::new(GBP);

        cart.add_item(&product("A", 100), 2)?;
        cart.add_item(&product("A", 100), 3)?;

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(&"A".into()).map(LineItem::quantity), Some(5));
        assert_eq!(cart.total(), Money::from_minor(500, GBP));

        Ok(())
    }

    #[test]
    fn merge_keeps_price_copied_at_first_add() -> TestResult {
        let mut cart = Cart::new(GBP);

        cart.add_one(&product("A", 100))?;
        cart.add_one(&product("A", 999))?;

        assert_eq!(
            cart.get(&"A".into()).map(LineItem::unit_price),
            Some(&Money::from_minor(100, GBP))
        );
        assert_eq!(cart.total(), Money::from_minor(200, GBP));

        Ok(())
    }

    #[test]
    fn add_zero_is_invalid() {
        let mut cart = Cart::new(GBP);

        let result = cart.add_item(&product("A", 100), 0);

        assert_eq!(
            result.err(),
            Some(CartError::InvalidQuantity(QuantityError::Zero))
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn add_beyond_stock_is_rejected() {
        let mut cart = Cart::new(GBP);

        let result = cart.add_item(&product("A", 1000).with_stock(3), 4);

        assert_eq!(
            result.err(),
            Some(CartError::StockExceeded {
                product: "A".into(),
                requested: 4,
                available: 3,
            })
        );
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Money::from_minor(0, GBP));
    }

    #[test]
    fn merge_beyond_stock_leaves_cart_unchanged() -> TestResult {
        let mut cart = Cart::new(GBP);
        let a = product("A", 1000).with_stock(3);

        cart.add_item(&a, 2)?;
        let before = cart.clone();

        let result = cart.add_item(&a, 2);

        assert!(matches!(result, Err(CartError::StockExceeded { .. })));
        assert_eq!(cart, before);

        Ok(())
    }

    #[test]
    fn out_of_stock_product_cannot_be_added() {
        let mut cart = Cart::new(GBP);

        let result = cart.add_one(&product("A", 1000).with_stock(0));

        assert!(matches!(result, Err(CartError::StockExceeded { .. })));
    }

    #[test]
    fn currency_mismatch_is_rejected() {
        let mut cart = Cart::new(GBP);
        let foreign = CatalogSnapshot::new("A", "A", Money::from_minor(100, USD));

        let result = cart.add_one(&foreign);

        assert_eq!(
            result.err(),
            Some(CartError::CurrencyMismatch(
                "A".into(),
                USD.iso_alpha_code,
                GBP.iso_alpha_code
            ))
        );
    }

    #[test]
    fn negative_price_is_rejected() {
        let mut cart = Cart::new(GBP);

        let result = cart.add_one(&product("A", -1));

        assert_eq!(result.err(), Some(CartError::NegativePrice("A".into())));
    }

    #[test]
    fn remove_updates_total() -> TestResult {
        let mut cart = Cart::new(GBP);

        cart.add_item(&product("A", 500), 2)?;
        cart.add_item(&product("B", 1500), 1)?;

        assert_eq!(cart.total(), Money::from_minor(2500, GBP));

        let removed = cart.remove_item(&"A".into())?;

        assert_eq!(removed.map(|item| item.quantity()), Some(2));
        assert_eq!(cart.total(), Money::from_minor(1500, GBP));

        Ok(())
    }

    #[test]
    fn remove_absent_is_noop() -> TestResult {
        let mut cart = Cart::new(GBP);
        cart.add_one(&product("A", 500))?;

        let before = cart.clone();
        let items_ptr = cart.items().as_ptr();

        let removed = cart.remove_item(&"Z".into())?;

        assert!(removed.is_none());
        assert_eq!(cart, before);
        assert!(
            std::ptr::eq(cart.items().as_ptr(), items_ptr),
            "no-op removal must not touch the item storage"
        );

        Ok(())
    }

    #[test]
    fn set_quantity_replaces_quantity() -> TestResult {
        let mut cart = Cart::new(GBP);
        cart.add_one(&product("A", 300))?;

        cart.set_quantity(&"A".into(), 4)?;

        assert_eq!(cart.get(&"A".into()).map(LineItem::quantity), Some(4));
        assert_eq!(cart.total(), Money::from_minor(1200, GBP));

        Ok(())
    }

    #[test]
    fn set_quantity_zero_removes() -> TestResult {
        let mut cart = Cart::new(GBP);
        cart.add_one(&product("A", 300))?;

        cart.set_quantity(&"A".into(), 0)?;

        assert!(cart.is_empty());
        assert_eq!(cart.total(), Money::from_minor(0, GBP));

        Ok(())
    }

    #[test]
    fn set_quantity_zero_on_absent_is_noop() -> TestResult {
        let mut cart = Cart::new(GBP);

        cart.set_quantity(&"A".into(), 0)?;

        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn set_negative_quantity_is_invalid() -> TestResult {
        let mut cart = Cart::new(GBP);
        cart.add_item(&product("A", 300), 2)?;

        let result = cart.set_quantity(&"A".into(), -1);

        assert!(matches!(result, Err(CartError::InvalidQuantity(_))));
        assert_eq!(cart.get(&"A".into()).map(LineItem::quantity), Some(2));

        Ok(())
    }

    #[test]
    fn set_fractional_text_quantity_is_invalid() -> TestResult {
        let mut cart = Cart::new(GBP);
        cart.add_item(&product("A", 300), 2)?;
        let before = cart.clone();

        let result = cart.set_quantity(&"A".into(), "1.5");

        assert!(matches!(
            result,
            Err(CartError::InvalidQuantity(QuantityError::NotInteger(_)))
        ));
        assert_eq!(cart, before);

        cart.set_quantity(&"A".into(), "3")?;

        assert_eq!(cart.get(&"A".into()).map(LineItem::quantity), Some(3));

        Ok(())
    }

    #[test]
    fn set_quantity_respects_tracked_ceiling() -> TestResult {
        let mut cart = Cart::new(GBP);
        cart.add_item(&product("A", 300).with_stock(5), 2)?;

        let result = cart.set_quantity(&"A".into(), 6);

        assert!(matches!(
            result,
            Err(CartError::StockExceeded { available: 5, .. })
        ));
        assert_eq!(cart.get(&"A".into()).map(LineItem::quantity), Some(2));

        cart.set_quantity(&"A".into(), 5)?;

        assert_eq!(cart.get(&"A".into()).map(LineItem::quantity), Some(5));

        Ok(())
    }

    #[test]
    fn set_quantity_for_absent_product_is_not_found() {
        let mut cart = Cart::new(GBP);

        let result = cart.set_quantity(&"A".into(), 2);

        assert_eq!(result, Err(CartError::ItemNotFound("A".into())));
    }

    #[test]
    fn rejected_add_leaves_cart_readable() -> TestResult {
        let mut cart = Cart::new(GBP);
        let a = product("A", 100).with_stock(1);

        let added = cart.add_one(&a)?;
        let rejected = cart.add_one(&a);

        assert!(matches!(rejected, Err(CartError::StockExceeded { .. })));
        assert_eq!(cart.items(), std::slice::from_ref(&added));
        assert_eq!(cart.total(), Money::from_minor(100, GBP));

        Ok(())
    }

    #[test]
    fn re_add_refreshes_stock_ceiling() -> TestResult {
        let mut cart = Cart::new(GBP);

        cart.add_one(&product("A", 300).with_stock(2))?;
        assert_eq!(cart.stock_ceiling(&"A".into()), Some(2));

        cart.add_one(&product("A", 300).with_stock(10))?;
        assert_eq!(cart.stock_ceiling(&"A".into()), Some(10));

        cart.add_one(&product("A", 300))?;
        assert_eq!(cart.stock_ceiling(&"A".into()), None);

        Ok(())
    }

    #[test]
    fn decrement_removes_at_zero() -> TestResult {
        let mut cart = Cart::new(GBP);
        cart.add_item(&product("A", 300), 2)?;

        cart.decrement(&"A".into())?;
        assert_eq!(cart.get(&"A".into()).map(LineItem::quantity), Some(1));

        cart.decrement(&"A".into())?;
        assert!(cart.is_empty());

        assert_eq!(
            cart.decrement(&"A".into()),
            Err(CartError::ItemNotFound("A".into()))
        );

        Ok(())
    }

    #[test]
    fn item_count_sums_quantities() -> TestResult {
        let mut cart = Cart::new(GBP);

        cart.add_item(&product("A", 100), 2)?;
        cart.add_item(&product("B", 100), 3)?;

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.item_count(), 5);

        Ok(())
    }

    #[test]
    fn clear_empties_cart_and_ceilings() -> TestResult {
        let mut cart = Cart::new(GBP);
        cart.add_item(&product("A", 100).with_stock(4), 2)?;

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total(), Money::from_minor(0, GBP));
        assert_eq!(cart.stock_ceiling(&"A".into()), None);

        Ok(())
    }

    #[test]
    fn overflowing_subtotal_is_rejected_without_mutation() -> TestResult {
        let mut cart = Cart::new(GBP);
        cart.add_one(&product("A", i64::MAX / 2))?;
        let before = cart.clone();

        let result = cart.add_item(&product("A", i64::MAX / 2), 2);

        assert_eq!(result.err(), Some(CartError::Price(PriceError::Overflow)));
        assert_eq!(cart, before);

        Ok(())
    }

    #[test]
    fn items_keep_insertion_order() -> TestResult {
        let mut cart = Cart::new(GBP);

        cart.add_one(&product("B", 100))?;
        cart.add_one(&product("A", 100))?;
        cart.add_one(&product("B", 100))?;

        let order: Vec<&str> = cart.iter().map(|item| item.product().as_str()).collect();

        assert_eq!(order, vec!["B", "A"]);

        Ok(())
    }
}
