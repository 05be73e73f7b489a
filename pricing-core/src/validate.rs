//! Nested batch validation
//!
//! Walks a candidate batch (services, their pricing methods, and modifiers
//! at both scopes) and reports every violation in a single pass so the form
//! can highlight all offending inputs at once. Errors are keyed by a
//! structured [`FieldPath`], never by concatenated string keys: a service
//! and a method with colliding ids can never collide in the report.

use rust_decimal::Decimal;
use shared::models::{
    Batch, CategoryChoice, Condition, ConditionSlot, Modifier, ModifierType, PERCENTAGE_MAX,
    PERCENTAGE_MIN, PricingMethod, PricingUnit,
};
use uuid::Uuid;

/// Maximum allowed base price or fixed modifier magnitude ($1,000,000)
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Which nesting level an error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Batch,
    Service,
    PricingMethod,
    Modifier,
}

/// Structured path identifying exactly which entity/field is invalid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldPath {
    pub kind: EntityKind,
    /// Entity instance id; `None` for the batch singleton itself
    pub id: Option<Uuid>,
    pub field: &'static str,
}

/// One field-level violation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub path: FieldPath,
    pub message: String,
}

/// All violations found in one validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: Vec<FieldError>,
}

impl ValidationReport {
    /// Empty report means the batch is submittable
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// All messages recorded against one entity's field
    pub fn messages_at(&self, kind: EntityKind, id: Option<Uuid>, field: &str) -> Vec<&str> {
        self.errors
            .iter()
            .filter(|e| e.path.kind == kind && e.path.id == id && e.path.field == field)
            .map(|e| e.message.as_str())
            .collect()
    }

    pub fn has_error_at(&self, kind: EntityKind, id: Option<Uuid>, field: &str) -> bool {
        !self.messages_at(kind, id, field).is_empty()
    }

    fn push(
        &mut self,
        kind: EntityKind,
        id: Option<Uuid>,
        field: &'static str,
        message: impl Into<String>,
    ) {
        self.errors.push(FieldError {
            path: FieldPath { kind, id, field },
            message: message.into(),
        });
    }
}

/// Validate a candidate batch. Never fails; returns an empty report iff the
/// batch is submittable.
pub fn validate_batch(batch: &Batch) -> ValidationReport {
    let mut report = ValidationReport::default();

    if let CategoryChoice::New { name, .. } = &batch.category
        && name.trim().is_empty()
    {
        report.push(
            EntityKind::Batch,
            None,
            "category_name",
            "Category name is required",
        );
    }

    if batch.services.is_empty() {
        report.push(
            EntityKind::Batch,
            None,
            "services",
            "At least one service is required",
        );
    }

    let service_names: Vec<(Uuid, String)> = batch
        .services
        .iter()
        .map(|s| (s.id, normalized_name(&s.name)))
        .collect();
    flag_duplicate_names(&service_names, EntityKind::Service, &mut report);

    for service in &batch.services {
        if service.name.trim().is_empty() {
            report.push(
                EntityKind::Service,
                Some(service.id),
                "name",
                "Name is required",
            );
        }

        validate_modifier_scope(&service.service_modifiers, &mut report);

        let method_names: Vec<(Uuid, String)> = service
            .pricing_methods
            .iter()
            .map(|m| (m.id, normalized_name(&m.name)))
            .collect();
        flag_duplicate_names(&method_names, EntityKind::PricingMethod, &mut report);

        for method in &service.pricing_methods {
            validate_method(method, &mut report);
            validate_modifier_scope(&method.modifiers, &mut report);
        }
    }

    report
}

fn normalized_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Flag every entry whose normalized name collides with a sibling's.
/// Both (all) colliding entries get an error, not just the later one.
fn flag_duplicate_names(
    entries: &[(Uuid, String)],
    kind: EntityKind,
    report: &mut ValidationReport,
) {
    for (i, (id, key)) in entries.iter().enumerate() {
        if key.is_empty() {
            continue;
        }
        let collides = entries
            .iter()
            .enumerate()
            .any(|(j, (_, other))| j != i && other == key);
        if collides {
            report.push(kind, Some(*id), "name", "Name must be unique");
        }
    }
}

fn validate_method(method: &PricingMethod, report: &mut ValidationReport) {
    let id = Some(method.id);

    if method.name.trim().is_empty() {
        report.push(EntityKind::PricingMethod, id, "name", "Name is required");
    }

    if method.base_price < Decimal::ZERO {
        report.push(
            EntityKind::PricingMethod,
            id,
            "base_price",
            "Base price must be a non-negative number",
        );
    } else if method.base_price > MAX_PRICE {
        report.push(
            EntityKind::PricingMethod,
            id,
            "base_price",
            format!("Base price exceeds maximum allowed ({MAX_PRICE})"),
        );
    }

    if method.pricing_unit == PricingUnit::PerLevel
        && let (Some(start), Some(end)) = (method.start_level, method.end_level)
        && start >= end
    {
        report.push(
            EntityKind::PricingMethod,
            id,
            "end_level",
            "End must be > Start",
        );
    }
}

/// Validate one modifier scope (a method's own list, or a service's).
/// Uniqueness is per scope: two different methods may each have a
/// "VIP Discount".
fn validate_modifier_scope(modifiers: &[Modifier], report: &mut ValidationReport) {
    let names: Vec<(Uuid, String)> = modifiers
        .iter()
        .map(|m| (m.id, normalized_name(&m.name)))
        .collect();
    flag_duplicate_names(&names, EntityKind::Modifier, report);

    for modifier in modifiers {
        validate_modifier(modifier, report);
    }
}

fn validate_modifier(modifier: &Modifier, report: &mut ValidationReport) {
    let id = Some(modifier.id);

    if modifier.name.trim().is_empty() {
        report.push(EntityKind::Modifier, id, "name", "Name is required");
    }

    match modifier.modifier_type {
        ModifierType::Percentage => {
            if modifier.value < PERCENTAGE_MIN || modifier.value > PERCENTAGE_MAX {
                report.push(
                    EntityKind::Modifier,
                    id,
                    "value",
                    format!(
                        "Percentage must be between {PERCENTAGE_MIN} and {PERCENTAGE_MAX}"
                    ),
                );
            }
        }
        ModifierType::Fixed => {
            if modifier.value.abs() > MAX_PRICE {
                report.push(
                    EntityKind::Modifier,
                    id,
                    "value",
                    format!("Amount exceeds maximum allowed ({MAX_PRICE})"),
                );
            }
        }
    }

    match &modifier.condition {
        ConditionSlot::None => {}
        ConditionSlot::Malformed { reason, .. } => {
            report.push(
                EntityKind::Modifier,
                id,
                "condition",
                format!("Condition is not valid JSON: {reason}"),
            );
        }
        ConditionSlot::Valid(cond) => validate_condition(cond, id, report),
    }
}

fn validate_condition(cond: &Condition, id: Option<Uuid>, report: &mut ValidationReport) {
    match cond {
        Condition::PriceRange { min, max } => {
            if min >= max {
                report.push(
                    EntityKind::Modifier,
                    id,
                    "condition",
                    "Min must be less than Max",
                );
            }
        }
        Condition::QuantityRange { min, max } => {
            if min >= max {
                report.push(
                    EntityKind::Modifier,
                    id,
                    "condition",
                    "Min must be less than Max",
                );
            }
        }
        Condition::CustomField { field, .. } => {
            if field.trim().is_empty() {
                report.push(
                    EntityKind::Modifier,
                    id,
                    "condition",
                    "Field name is required",
                );
            }
        }
    }
}
