//! MIMS
//!
//! Domain library for the Droguería MIMS pharmacy storefront: cart and invoice line-item
//! reconciliation, backend read models and list management.

pub mod cart;
pub mod invoices;
pub mod items;
pub mod listing;
pub mod medicines;
pub mod messages;
pub mod orders;
pub mod pharmacies;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod quantity;
pub mod receipt;
pub mod roles;
pub mod users;
