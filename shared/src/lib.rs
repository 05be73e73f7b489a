//! Shared types for the storefront pricing core
//!
//! Data models, condition wire parsing, and batch payload types used by the
//! pricing engine and the admin UI layer.

pub mod error;
pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};
