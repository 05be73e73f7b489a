//! Data models
//!
//! Shared between the pricing engine and the admin UI layer.
//! Monetary fields are `rust_decimal::Decimal`, serialized as JSON numbers.
//! Batch entities carry client-side `Uuid` instance ids (server ids are
//! assigned on creation and never appear here).

pub mod batch;
pub mod condition;
pub mod modifier;
pub mod pricing_method;

// Re-exports
pub use batch::*;
pub use condition::*;
pub use modifier::*;
pub use pricing_method::*;
