//! Backend resources

pub mod catalog;
pub mod invoices;
pub mod medicines;
pub mod messages;
pub mod orders;
pub mod roles;
pub mod users;
