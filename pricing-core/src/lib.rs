//! Pricing core for the storefront admin console
//!
//! The computational heart of service pricing: condition evaluation,
//! modifier resolution with a full audit trace, display formatting,
//! nested batch validation, draft autosave, and the submission gate in
//! front of the external creation API.
//!
//! Everything price-shaped is `rust_decimal::Decimal`; rounding happens
//! only at the formatting boundary, never mid-resolution.

pub mod conditions;
pub mod draft;
pub mod format;
pub mod money;
pub mod resolver;
pub mod submit;
pub mod validate;

// Re-exports
pub use conditions::{Applicability, PricingContext, SkipReason, evaluate};
pub use draft::{DraftAutosave, DraftRecord, DraftStore, DraftStoreError};
pub use format::{format_price, format_price_f64};
pub use resolver::{AppliedStep, Resolution, ResolutionWarning, resolve, resolve_method};
pub use submit::{BatchApi, BatchSubmitter, SubmitError};
pub use validate::{EntityKind, FieldError, FieldPath, ValidationReport, validate_batch};
