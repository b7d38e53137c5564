//! Network side of the MIMS storefront: REST client, services and session handling.

pub mod auth;
pub mod client;
pub mod config;
pub mod context;
pub mod domain;
pub mod observability;
pub mod pagination;
pub mod session;
