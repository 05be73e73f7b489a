//! Condition evaluation
//!
//! Pure predicate: given a modifier's condition slot and the pricing
//! context, decide whether the modifier applies. Malformed conditions fail
//! closed: the modifier is skipped and the skip reason surfaced, never
//! silently applied. A wrongly applied surcharge overcharges a customer;
//! a skipped one merely underquotes.

use rust_decimal::Decimal;
use shared::models::{Condition, ConditionSlot, FieldValue};
use std::collections::HashMap;

/// Context a condition is evaluated against
///
/// `running_price` is the price after previously applied modifiers, not the
/// original base, so price-range gates can react to earlier stacking.
#[derive(Debug, Clone, Default)]
pub struct PricingContext {
    pub running_price: Decimal,
    /// Order quantity; absent outside an order context
    pub quantity: Option<i64>,
    /// Custom field values supplied by the storefront
    pub custom_fields: HashMap<String, FieldValue>,
}

impl PricingContext {
    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.custom_fields.insert(name.into(), value.into());
        self
    }
}

/// Why a condition did not apply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Condition payload did not parse; fail closed
    Malformed { reason: String },
    /// Quantity-gated modifier evaluated outside an order context
    QuantityMissing,
    /// Referenced custom field absent from the context
    FieldMissing { field: String },
    /// Running price or quantity outside the inclusive range
    OutOfRange,
    /// Custom field present but not equal after coercion
    ValueMismatch,
}

/// Outcome of evaluating a condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applicability {
    Applies,
    Skipped(SkipReason),
}

impl Applicability {
    pub fn applies(&self) -> bool {
        matches!(self, Applicability::Applies)
    }
}

/// Evaluate a condition slot against the context.
///
/// Absent condition always applies. Malformed payloads never apply and are
/// reported with a warning for operator visibility.
pub fn evaluate(slot: &ConditionSlot, ctx: &PricingContext) -> Applicability {
    match slot {
        ConditionSlot::None => Applicability::Applies,
        ConditionSlot::Malformed { reason, .. } => {
            tracing::warn!(%reason, "malformed modifier condition, failing closed");
            Applicability::Skipped(SkipReason::Malformed {
                reason: reason.clone(),
            })
        }
        ConditionSlot::Valid(cond) => evaluate_condition(cond, ctx),
    }
}

fn evaluate_condition(cond: &Condition, ctx: &PricingContext) -> Applicability {
    match cond {
        Condition::PriceRange { min, max } => {
            if ctx.running_price >= *min && ctx.running_price <= *max {
                Applicability::Applies
            } else {
                Applicability::Skipped(SkipReason::OutOfRange)
            }
        }
        Condition::QuantityRange { min, max } => match ctx.quantity {
            None => Applicability::Skipped(SkipReason::QuantityMissing),
            Some(q) => {
                if q >= *min && q <= *max {
                    Applicability::Applies
                } else {
                    Applicability::Skipped(SkipReason::OutOfRange)
                }
            }
        },
        Condition::CustomField { field, value } => match ctx.custom_fields.get(field) {
            None => Applicability::Skipped(SkipReason::FieldMissing {
                field: field.clone(),
            }),
            Some(actual) => {
                if actual.loosely_eq(value) {
                    Applicability::Applies
                } else {
                    Applicability::Skipped(SkipReason::ValueMismatch)
                }
            }
        },
    }
}
