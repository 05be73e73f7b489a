//! Modifier resolution engine
//!
//! Applies eligible modifiers to a base price in priority order and returns
//! the final price plus a full ordered trace. The trace feeds the price
//! breakdown UI and the audit tests; nothing is applied without a recorded
//! step.

use crate::conditions::{Applicability, PricingContext, SkipReason, evaluate};
use rust_decimal::Decimal;
use shared::models::{Modifier, ModifierType, PricingMethod};
use uuid::Uuid;

/// One applied modifier in the resolution trace
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedStep {
    pub modifier_id: Uuid,
    pub name: String,
    /// Amount this step added (negative for discounts)
    pub delta: Decimal,
    /// Running price after this step
    pub price_after: Decimal,
}

/// Non-fatal problem encountered during resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionWarning {
    pub modifier_id: Uuid,
    pub name: String,
    /// Parser message for the malformed condition payload
    pub reason: String,
}

/// Result of resolving a base price through a modifier list
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Final price, clamped to >= 0
    pub final_price: Decimal,
    /// Ordered trace of every applied modifier
    pub applied: Vec<AppliedStep>,
    /// Malformed-condition warnings (the affected modifiers were skipped)
    pub warnings: Vec<ResolutionWarning>,
}

/// Resolve the final price for a base price and modifier list.
///
/// Inactive modifiers are dropped first. The rest are stable-sorted by
/// `priority` ascending, ties keeping insertion order. Each condition sees
/// the running price after prior modifiers. The final price is clamped to
/// zero only at the end: intermediate negative running values are legal if
/// a later modifier restores positivity.
///
/// # Panics
///
/// Panics if `base_price` is negative. Validation guarantees a non-negative
/// base before resolution is ever invoked, so a negative base here is a
/// caller bug, not a data-entry mistake.
pub fn resolve(base_price: Decimal, modifiers: &[Modifier], ctx: &PricingContext) -> Resolution {
    assert!(
        base_price >= Decimal::ZERO,
        "base price must be non-negative, got {base_price}"
    );

    let mut ordered: Vec<&Modifier> = modifiers.iter().filter(|m| m.active).collect();
    ordered.sort_by_key(|m| m.priority);

    let mut running = base_price;
    let mut applied = Vec::new();
    let mut warnings = Vec::new();
    let mut step_ctx = ctx.clone();

    for modifier in ordered {
        step_ctx.running_price = running;
        match evaluate(&modifier.condition, &step_ctx) {
            Applicability::Applies => {
                let delta = match modifier.modifier_type {
                    ModifierType::Percentage => running * modifier.value / Decimal::ONE_HUNDRED,
                    ModifierType::Fixed => modifier.value,
                };
                running += delta;
                applied.push(AppliedStep {
                    modifier_id: modifier.id,
                    name: modifier.name.clone(),
                    delta,
                    price_after: running,
                });
            }
            Applicability::Skipped(SkipReason::Malformed { reason }) => {
                warnings.push(ResolutionWarning {
                    modifier_id: modifier.id,
                    name: modifier.name.clone(),
                    reason,
                });
            }
            Applicability::Skipped(_) => {}
        }
    }

    Resolution {
        final_price: running.max(Decimal::ZERO),
        applied,
        warnings,
    }
}

/// Resolve a pricing method's displayed price.
///
/// Service-level modifiers are merged with the method's own into a single
/// collection before resolving; each keeps its own priority, so the two
/// scopes interleave in the stacking sequence rather than one always
/// preceding the other.
pub fn resolve_method(
    method: &PricingMethod,
    service_modifiers: &[Modifier],
    ctx: &PricingContext,
) -> Resolution {
    let mut merged: Vec<Modifier> =
        Vec::with_capacity(service_modifiers.len() + method.modifiers.len());
    merged.extend_from_slice(service_modifiers);
    merged.extend_from_slice(&method.modifiers);
    resolve(method.base_price, &merged, ctx)
}
