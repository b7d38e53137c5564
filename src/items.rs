//! Items

use std::num::NonZeroU32;

use rusty_money::{Money, iso::Currency};

use crate::{
    pricing::{PriceError, line_subtotal},
    products::ProductId,
};

/// One product entry within a cart or invoice draft.
///
/// The subtotal is computed on construction and on every quantity change, so it always equals
/// `unit_price * quantity`.
#[derive(Clone, Debug, PartialEq)]
pub struct LineItem<'a> {
    product: ProductId,
    name: String,
    unit_price: Money<'a, Currency>,
    quantity: NonZeroU32,
    subtotal: Money<'a, Currency>,
}

impl<'a> LineItem<'a> {
    /// Creates a new line item.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Overflow`] if the subtotal does not fit into minor units.
    pub fn new(
        product: ProductId,
        name: impl Into<String>,
        unit_price: Money<'a, Currency>,
        quantity: NonZeroU32,
    ) -> Result<Self, PriceError> {
        Ok(Self {
            subtotal: line_subtotal(&unit_price, quantity)?,
            product,
            name: name.into(),
            unit_price,
            quantity,
        })
    }

    /// Returns a copy of this item with a different quantity and a recomputed subtotal.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Overflow`] if the subtotal does not fit into minor units.
    pub fn with_quantity(&self, quantity: NonZeroU32) -> Result<Self, PriceError> {
        Ok(Self {
            subtotal: line_subtotal(&self.unit_price, quantity)?,
            quantity,
            ..self.clone()
        })
    }

    /// Returns the product of the item
    pub fn product(&self) -> &ProductId {
        &self.product
    }

    /// Returns the display name copied at add-time
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the unit price of the item
    pub fn unit_price(&self) -> &Money<'a, Currency> {
        &self.unit_price
    }

    /// Returns the quantity, always at least one
    pub fn quantity(&self) -> u32 {
        self.quantity.get()
    }

    /// Returns `unit_price * quantity`
    pub fn subtotal(&self) -> &Money<'a, Currency> {
        &self.subtotal
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::GBP;
    use testresult::TestResult;

    use super::*;

    fn qty(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap_or(NonZeroU32::MIN)
    }

    #[test]
    fn new_computes_subtotal() -> TestResult {
        let item = LineItem::new(
            ProductId::from("A"),
            "Ibuprofeno 400mg",
            Money::from_minor(1200, GBP),
            qty(3),
        )?;

        assert_eq!(item.subtotal(), &Money::from_minor(3600, GBP));
        assert_eq!(item.quantity(), 3);
        assert_eq!(item.name(), "Ibuprofeno 400mg");

        Ok(())
    }

    #[test]
    fn with_quantity_recomputes_subtotal_and_keeps_price() -> TestResult {
        let item = LineItem::new(ProductId::from("A"), "A", Money::from_minor(250, GBP), qty(1))?;

        let updated = item.with_quantity(qty(4))?;

        assert_eq!(updated.unit_price(), item.unit_price());
        assert_eq!(updated.subtotal(), &Money::from_minor(1000, GBP));
        assert_eq!(item.quantity(), 1, "original item must be untouched");

        Ok(())
    }
}
