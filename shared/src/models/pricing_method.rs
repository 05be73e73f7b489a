//! Pricing methods
//!
//! One way of pricing a service (fixed fee, per-level, per-kill, ...),
//! owning an ordered list of method-level modifiers.

use super::modifier::Modifier;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unit the base price is quoted in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PricingUnit {
    Fixed,
    PerLevel,
    PerKill,
    PerItem,
    PerHour,
}

/// Pricing method entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricingMethod {
    /// Client-side instance id (keys validation error paths)
    pub id: Uuid,
    /// Unique case-insensitively among sibling methods of the same service
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    pub pricing_unit: PricingUnit,
    /// Finite and >= 0 by the time it reaches the resolution engine
    pub base_price: Decimal,
    /// Only meaningful for PER_LEVEL; start < end when both present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_level: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_level: Option<i32>,
    #[serde(default)]
    pub display_order: i32,
    pub active: bool,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
}

impl PricingMethod {
    pub fn new(name: impl Into<String>, pricing_unit: PricingUnit, base_price: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            group_name: None,
            pricing_unit,
            base_price,
            start_level: None,
            end_level: None,
            display_order: 0,
            active: true,
            modifiers: Vec::new(),
        }
    }
}
