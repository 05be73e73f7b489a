//! Batch creation types
//!
//! A batch is the transient, in-progress collection of category, services,
//! pricing methods, and modifiers created together. It is constructed
//! client-side, optionally autosaved as a draft, validated, submitted once,
//! then discarded. The `*Payload` types are the outbound wire shape for the
//! external creation API: numbers as numbers, empty optionals omitted.

use super::modifier::{DisplayType, Modifier, ModifierType};
use super::pricing_method::{PricingMethod, PricingUnit};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Target category for a batch: an existing record or a new one
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CategoryChoice {
    Existing {
        id: i64,
    },
    New {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        display_order: Option<i32>,
    },
}

/// Service under construction inside a batch
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchService {
    /// Client-side instance id (keys validation error paths)
    pub id: Uuid,
    /// Unique case-insensitively among sibling services in the batch
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    /// Service-level modifiers, applied across every pricing method
    #[serde(default)]
    pub service_modifiers: Vec<Modifier>,
    #[serde(default)]
    pub pricing_methods: Vec<PricingMethod>,
}

impl BatchService {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            emoji: None,
            service_modifiers: Vec::new(),
            pricing_methods: Vec::new(),
        }
    }
}

/// Batch under construction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Batch {
    pub category: CategoryChoice,
    pub services: Vec<BatchService>,
}

impl Batch {
    pub fn new(category: CategoryChoice) -> Self {
        Self {
            category,
            services: Vec::new(),
        }
    }

    pub fn to_payload(&self) -> BatchPayload {
        BatchPayload::from(self)
    }
}

// ============================================================================
// Outbound payload (external creation API)
// ============================================================================

/// Outbound batch creation payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BatchPayload {
    pub category: CategoryPayload,
    pub services: Vec<ServicePayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CategoryPayload {
    Existing {
        id: i64,
    },
    #[serde(rename_all = "camelCase")]
    New {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        display_order: Option<i32>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServicePayload {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub service_modifiers: Vec<ModifierPayload>,
    pub pricing_methods: Vec<MethodPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MethodPayload {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    pub pricing_unit: PricingUnit,
    pub base_price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_level: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_level: Option<i32>,
    pub display_order: i32,
    pub active: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<ModifierPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModifierPayload {
    pub name: String,
    pub modifier_type: ModifierType,
    pub value: Decimal,
    pub display_type: DisplayType,
    pub priority: i32,
    pub active: bool,
    /// Condition wire form (a JSON string); omitted when unconditional
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

impl From<&Modifier> for ModifierPayload {
    fn from(modifier: &Modifier) -> Self {
        Self {
            name: modifier.name.clone(),
            modifier_type: modifier.modifier_type,
            value: modifier.value,
            display_type: modifier.display_type,
            priority: modifier.priority,
            active: modifier.active,
            condition: modifier.condition.to_wire(),
        }
    }
}

impl From<&PricingMethod> for MethodPayload {
    fn from(method: &PricingMethod) -> Self {
        Self {
            name: method.name.clone(),
            group_name: method.group_name.clone(),
            pricing_unit: method.pricing_unit,
            base_price: method.base_price,
            start_level: method.start_level,
            end_level: method.end_level,
            display_order: method.display_order,
            active: method.active,
            modifiers: method.modifiers.iter().map(ModifierPayload::from).collect(),
        }
    }
}

impl From<&BatchService> for ServicePayload {
    fn from(service: &BatchService) -> Self {
        Self {
            name: service.name.clone(),
            emoji: service.emoji.clone(),
            service_modifiers: service
                .service_modifiers
                .iter()
                .map(ModifierPayload::from)
                .collect(),
            pricing_methods: service
                .pricing_methods
                .iter()
                .map(MethodPayload::from)
                .collect(),
        }
    }
}

impl From<&Batch> for BatchPayload {
    fn from(batch: &Batch) -> Self {
        Self {
            category: match &batch.category {
                CategoryChoice::Existing { id } => CategoryPayload::Existing { id: *id },
                CategoryChoice::New {
                    name,
                    display_order,
                } => CategoryPayload::New {
                    name: name.clone(),
                    display_order: *display_order,
                },
            },
            services: batch.services.iter().map(ServicePayload::from).collect(),
        }
    }
}

// ============================================================================
// Creation outcome (returned by the external API)
// ============================================================================

/// Per-entity result of a batch creation call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EntityOutcome {
    pub name: String,
    pub created: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Outcome of a batch creation call, one entry per submitted service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BatchOutcome {
    pub services: Vec<EntityOutcome>,
}

impl BatchOutcome {
    pub fn all_created(&self) -> bool {
        self.services.iter().all(|s| s.created)
    }
}
