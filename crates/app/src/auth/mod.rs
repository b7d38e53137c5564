//! Authentication

mod credentials;
mod errors;
mod service;
mod throttle;

pub use credentials::*;
pub use errors::*;
pub use service::*;
pub use throttle::*;
