//! Modifier conditions
//!
//! A condition gates whether a modifier applies. On the wire it travels as a
//! JSON string stored in the modifier record, e.g.
//! `{"type":"price_range","min":10,"max":100}`. Parsing happens exactly once
//! at the system boundary ([`ConditionSlot::from_wire`]); internal code never
//! re-parses raw strings. A payload that fails to parse is captured as
//! [`ConditionSlot::Malformed`] so the engine can fail closed (skip the
//! modifier and surface a warning) rather than raise or silently apply.

use crate::error::ConditionParseError;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Typed value for custom-field comparisons
///
/// Storefront custom fields arrive untyped; comparisons use the coercion
/// rule in [`FieldValue::coerced`] so `"99"` matches `99` and `"true"`
/// matches `true`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Number(Decimal),
    Text(String),
}

impl FieldValue {
    /// Normalize per the coercion rule: numeric strings become numbers,
    /// `"true"`/`"false"` become flags, everything else stays text.
    pub fn coerced(&self) -> FieldValue {
        match self {
            FieldValue::Text(s) => {
                let trimmed = s.trim();
                if let Ok(n) = trimmed.parse::<Decimal>() {
                    FieldValue::Number(n)
                } else if trimmed == "true" {
                    FieldValue::Flag(true)
                } else if trimmed == "false" {
                    FieldValue::Flag(false)
                } else {
                    FieldValue::Text(s.clone())
                }
            }
            other => other.clone(),
        }
    }

    /// Equality after coercion on both sides
    pub fn loosely_eq(&self, other: &FieldValue) -> bool {
        self.coerced() == other.coerced()
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Flag(b)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(Decimal::from(n))
    }
}

/// Condition variants (closed set)
///
/// Range bounds are inclusive on both ends. An absent condition (see
/// [`ConditionSlot::None`]) always applies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    /// Applies if the running price falls in `[min, max]`
    PriceRange { min: Decimal, max: Decimal },
    /// Applies if the context's field equals `value` after coercion
    CustomField { field: String, value: FieldValue },
    /// Applies if the order quantity falls in `[min, max]`
    QuantityRange { min: i64, max: i64 },
}

impl Condition {
    /// Parse a condition from its wire form (a JSON string)
    pub fn parse(raw: &str) -> Result<Condition, ConditionParseError> {
        serde_json::from_str(raw).map_err(|e| ConditionParseError::new(e.to_string()))
    }

    /// Serialize to the wire form stored in the modifier record
    pub fn to_wire(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Parse-once slot for a modifier's condition
///
/// `None` means the modifier is unconditional. `Malformed` keeps the raw
/// payload and parser message so validation can point the operator at the
/// broken field while the engine skips the modifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ConditionSlot {
    #[default]
    None,
    Valid(Condition),
    Malformed { raw: String, reason: String },
}

impl ConditionSlot {
    /// Ingest a condition field from the wire. Never fails: absent or blank
    /// input is `None`, unparsable input is `Malformed`.
    pub fn from_wire(raw: Option<&str>) -> Self {
        match raw {
            None => ConditionSlot::None,
            Some(s) if s.trim().is_empty() => ConditionSlot::None,
            Some(s) => match Condition::parse(s) {
                Ok(cond) => ConditionSlot::Valid(cond),
                Err(err) => ConditionSlot::Malformed {
                    raw: s.to_string(),
                    reason: err.reason,
                },
            },
        }
    }

    /// Wire form of this slot. Malformed payloads round-trip unchanged so a
    /// draft reload does not lose what the operator typed.
    pub fn to_wire(&self) -> Option<String> {
        match self {
            ConditionSlot::None => None,
            ConditionSlot::Valid(cond) => Some(cond.to_wire()),
            ConditionSlot::Malformed { raw, .. } => Some(raw.clone()),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, ConditionSlot::None)
    }
}

impl From<Condition> for ConditionSlot {
    fn from(cond: Condition) -> Self {
        ConditionSlot::Valid(cond)
    }
}

// Serde follows the wire contract: a slot is an optional JSON string.
impl Serialize for ConditionSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_wire().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ConditionSlot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(ConditionSlot::from_wire(raw.as_deref()))
    }
}
