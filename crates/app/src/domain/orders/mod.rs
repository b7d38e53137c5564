//! Orders

mod checkout;
mod service;

pub use checkout::*;
pub use service::*;
