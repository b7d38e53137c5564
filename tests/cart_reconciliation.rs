//! Integration test for cart reconciliation.
//!
//! Drives a cart through the storefront scenarios (merge on add, stock rejection, quantity edits,
//! removal) and checks after every step that each subtotal equals `unit_price * quantity` and the
//! total equals the sum of subtotals.

use rusty_money::{Money, iso::COP};
use testresult::TestResult;

use mims::prelude::*;

fn pesos(amount: i64) -> Money<'static, rusty_money::iso::Currency> {
    Money::from_minor(amount * 100, COP)
}

fn product(id: &str, amount: i64) -> CatalogSnapshot<'static> {
    CatalogSnapshot::new(id, format!("Producto {id}"), pesos(amount))
}

fn assert_consistent(cart: &Cart<'_>) {
    let mut sum = 0_i64;

    for item in cart.iter() {
        assert_eq!(
            item.subtotal().to_minor_units(),
            item.unit_price().to_minor_units() * i64::from(item.quantity()),
            "subtotal of {} is out of date",
            item.product()
        );
        assert!(item.quantity() >= 1);

        sum += item.subtotal().to_minor_units();
    }

    assert_eq!(cart.total().to_minor_units(), sum);

    let mut ids: Vec<_> = cart.iter().map(LineItem::product).collect();
    ids.sort();
    ids.dedup();

    assert_eq!(ids.len(), cart.len(), "duplicate product ids");
}

#[test]
fn adding_twice_merges_quantities() -> TestResult {
    let mut cart = Cart::new(COP);

    cart.add_item(&product("A", 1000), 2)?;
    cart.add_item(&product("A", 1000), 3)?;

    assert_eq!(cart.len(), 1);
    assert_eq!(cart.items()[0].quantity(), 5);
    assert_eq!(cart.total(), pesos(5000));
    assert_consistent(&cart);

    Ok(())
}

#[test]
fn adding_beyond_stock_is_rejected_and_cart_stays_empty() {
    let mut cart = Cart::new(COP);

    let result = cart.add_item(&product("A", 1000).with_stock(3), 4);

    assert!(matches!(
        result,
        Err(CartError::StockExceeded {
            requested: 4,
            available: 3,
            ..
        })
    ));
    assert!(cart.is_empty());
    assert_eq!(cart.total(), pesos(0));
}

#[test]
fn setting_quantity_to_zero_removes_the_line() -> TestResult {
    let mut cart = Cart::new(COP);

    cart.add_item(&product("A", 1000), 2)?;
    cart.set_quantity(&"A".into(), 0)?;

    assert!(cart.is_empty());
    assert_eq!(cart.total(), pesos(0));

    Ok(())
}

#[test]
fn negative_quantity_is_rejected_and_previous_quantity_kept() -> TestResult {
    let mut cart = Cart::new(COP);

    cart.add_item(&product("A", 1000), 2)?;

    let result = cart.set_quantity(&"A".into(), -1);

    assert!(matches!(result, Err(CartError::InvalidQuantity(_))));
    assert_eq!(cart.items()[0].quantity(), 2);
    assert_eq!(cart.total(), pesos(2000));

    Ok(())
}

#[test]
fn total_follows_removals() -> TestResult {
    let mut cart = Cart::new(COP);

    cart.add_item(&product("A", 500), 2)?;
    cart.add_item(&product("B", 1500), 1)?;

    assert_eq!(cart.total(), pesos(2500));

    cart.remove_item(&"A".into())?;

    assert_eq!(cart.total(), pesos(1500));
    assert_consistent(&cart);

    Ok(())
}

#[test]
fn removing_an_absent_product_is_a_no_op() -> TestResult {
    let mut cart = Cart::new(COP);

    cart.add_item(&product("A", 500), 1)?;

    let before = cart.clone();
    let removed = cart.remove_item(&"Z".into())?;

    assert_eq!(removed, None);
    assert_eq!(cart, before);

    Ok(())
}

#[test]
fn medicine_snapshots_carry_available_stock() -> TestResult {
    let medicine: Medicine = serde_json::from_str(
        r#"{"id": 3, "nombre": "Loratadina", "precio_venta": "2500.00", "stock_actual": 4, "stock_reservado": 2}"#,
    )?;

    let mut cart = Cart::new(COP);

    cart.add_item(&medicine.snapshot(COP)?, 2)?;

    assert!(cart.add_one(&medicine.snapshot(COP)?).is_err());
    assert_eq!(cart.total(), pesos(5000));

    Ok(())
}

/// Small deterministic generator so the sequence test needs no extra dependency.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self, bound: u64) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        (self.0 >> 33) % bound
    }
}

#[test]
fn invariants_hold_across_mixed_sequences() {
    let catalog = [
        product("A", 500).with_stock(6),
        product("B", 1500),
        product("C", 320).with_stock(2),
        product("D", 9900).with_stock(10),
    ];

    let mut rng = Lcg(7);
    let mut cart = Cart::new(COP);

    for _ in 0..500 {
        let pick = &catalog[usize::try_from(rng.next(4)).unwrap_or(0)];
        let before = cart.clone();

        let outcome = match rng.next(3) {
            0 => cart
                .add_item(pick, u32::try_from(rng.next(4)).unwrap_or(1))
                .map(|_| ()),
            1 => cart.remove_item(&pick.product_id).map(|_| ()),
            _ => cart.set_quantity(&pick.product_id, i64::try_from(rng.next(5)).unwrap_or(0) - 1),
        };

        if outcome.is_err() {
            assert_eq!(cart, before, "rejected mutation changed the cart");
        }

        assert_consistent(&cart);
    }
}
