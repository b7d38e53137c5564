//! MIMS prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError},
    invoices::{
        Invoice, InvoiceDraft, InvoiceDraftError, InvoiceFilter, InvoiceLine, InvoicePayload,
        PaymentMethod, newest_first,
    },
    items::LineItem,
    listing::{Everything, Listing, Page, Predicate, all_of},
    medicines::{Category, CategoryWithMedicines, Medicine, MedicineFilter, MedicineInput, StockLevel},
    messages::{ContactMessage, MessageFilter, NewContactMessage, NewReview, Rating, Review},
    orders::{NewOrder, Order, OrderClient, OrderFilter, OrderStatus, StatusUpdate},
    pharmacies::{Pharmacy, Supplier},
    pricing::{PriceError, decimal_from_money, money_from_decimal},
    products::{CatalogSnapshot, ProductId},
    quantity::{Quantity, QuantityError},
    roles::{Capability, Role},
    users::{
        ProfileInput, RoleFilter, RoleInput, RoleRecord, User, UserFilter, UserId, UserInput,
    },
};
