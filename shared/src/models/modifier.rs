//! Price modifiers
//!
//! A modifier adjusts a base price by a percentage or fixed amount,
//! optionally gated by a [`super::Condition`]. Service-level and
//! method-level modifiers are the same entity distinguished by
//! [`ModifierOwner`]; the resolution engine merges both scopes by priority,
//! so callers never concatenate lists by hand.

use super::condition::ConditionSlot;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Modifier adjustment kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModifierType {
    Percentage,
    Fixed,
}

/// How the modifier is presented to customers
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DisplayType {
    #[default]
    Normal,
    Upcharge,
    Note,
    Warning,
    Discount,
}

/// Which entity owns the modifier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModifierOwner {
    /// Applies across every pricing method of the owning service
    Service,
    /// Applies to the owning pricing method only
    Method,
}

/// Allowed range for percentage modifier values: [-100, 1000]
pub const PERCENTAGE_MIN: Decimal = Decimal::from_parts(100, 0, 0, true, 0);
pub const PERCENTAGE_MAX: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

/// Price modifier entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Modifier {
    /// Client-side instance id (keys validation error paths)
    pub id: Uuid,
    /// Unique case-insensitively within the owning method or service scope
    pub name: String,
    pub modifier_type: ModifierType,
    /// Percentage: 10 = +10%. Fixed: currency amount, sign unconstrained.
    pub value: Decimal,
    #[serde(default)]
    pub display_type: DisplayType,
    /// Lower applies earlier; ties keep insertion order
    pub priority: i32,
    pub active: bool,
    pub owner: ModifierOwner,
    #[serde(default, skip_serializing_if = "ConditionSlot::is_none")]
    pub condition: ConditionSlot,
}

impl Modifier {
    /// Unconditional active modifier with default display
    pub fn new(
        name: impl Into<String>,
        modifier_type: ModifierType,
        value: Decimal,
        priority: i32,
        owner: ModifierOwner,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            modifier_type,
            value,
            display_type: DisplayType::default(),
            priority,
            active: true,
            owner,
            condition: ConditionSlot::None,
        }
    }

    pub fn with_condition(mut self, condition: impl Into<ConditionSlot>) -> Self {
        self.condition = condition.into();
        self
    }
}
