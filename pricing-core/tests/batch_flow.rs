//! End-to-end flow: build a batch, price it, validate it, submit it.

use async_trait::async_trait;
use pricing_core::draft::{DraftAutosave, DraftRecord, DraftStore, DraftStoreError};
use pricing_core::{
    BatchApi, BatchSubmitter, PricingContext, SubmitError, format_price, resolve_method,
    validate_batch,
};
use rust_decimal::Decimal;
use shared::models::{
    Batch, BatchOutcome, BatchPayload, BatchService, CategoryChoice, Condition, EntityOutcome,
    Modifier, ModifierOwner, ModifierType, PricingMethod, PricingUnit,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

#[derive(Default)]
struct MemoryStore {
    record: Mutex<Option<DraftRecord>>,
}

#[async_trait]
impl DraftStore for MemoryStore {
    async fn save(&self, record: &DraftRecord) -> Result<(), DraftStoreError> {
        *self.record.lock().await = Some(record.clone());
        Ok(())
    }

    async fn load(&self) -> Result<Option<DraftRecord>, DraftStoreError> {
        Ok(self.record.lock().await.clone())
    }

    async fn clear(&self) -> Result<(), DraftStoreError> {
        *self.record.lock().await = None;
        Ok(())
    }
}

/// Records the payload it received and reports every service created
#[derive(Default)]
struct RecordingApi {
    payload: Mutex<Option<BatchPayload>>,
}

#[async_trait]
impl BatchApi for RecordingApi {
    async fn create_batch(&self, payload: &BatchPayload) -> Result<BatchOutcome, SubmitError> {
        *self.payload.lock().await = Some(payload.clone());
        Ok(BatchOutcome {
            services: payload
                .services
                .iter()
                .map(|s| EntityOutcome {
                    name: s.name.clone(),
                    created: true,
                    error: None,
                })
                .collect(),
        })
    }
}

/// A skilling service priced per level, with a service-wide rush surcharge
/// and a method-level bulk discount gated on quantity.
fn agility_batch() -> Batch {
    let mut method = PricingMethod::new("1-99 Agility", PricingUnit::PerLevel, Decimal::new(54, 6));
    method.start_level = Some(1);
    method.end_level = Some(99);
    method.modifiers.push(
        Modifier::new(
            "Bulk discount",
            ModifierType::Percentage,
            Decimal::from(-10),
            10,
            ModifierOwner::Method,
        )
        .with_condition(Condition::QuantityRange { min: 5, max: 100 }),
    );

    let mut service = BatchService::new("Agility Training");
    service.emoji = Some("🏃".to_string());
    service.service_modifiers.push(Modifier::new(
        "Rush order",
        ModifierType::Percentage,
        Decimal::from(25),
        1,
        ModifierOwner::Service,
    ));
    service.pricing_methods.push(method);

    let mut batch = Batch::new(CategoryChoice::New {
        name: "Skilling".to_string(),
        display_order: Some(3),
    });
    batch.services.push(service);
    batch
}

#[test]
fn prices_resolve_and_format_before_submission() {
    let batch = agility_batch();
    let service = &batch.services[0];
    let method = &service.pricing_methods[0];

    // Outside an order context the quantity-gated discount stays closed:
    // 0.000054 -> +25% = 0.0000675
    let preview = resolve_method(method, &service.service_modifiers, &PricingContext::default());
    assert_eq!(preview.final_price, Decimal::from_str_exact("0.0000675").unwrap());
    assert_eq!(preview.applied.len(), 1);
    assert_eq!(
        format_price(preview.final_price, method.pricing_unit),
        "$0.0000675"
    );

    // With a qualifying quantity both modifiers stack:
    // 0.000054 -> +25% -> -10% = 0.00006075
    let ctx = PricingContext::default().with_quantity(10);
    let quoted = resolve_method(method, &service.service_modifiers, &ctx);
    assert_eq!(quoted.applied.len(), 2);
    assert_eq!(
        quoted.final_price,
        Decimal::from_str_exact("0.00006075").unwrap()
    );
}

#[tokio::test]
async fn full_flow_submits_and_clears_draft() {
    let batch = agility_batch();
    assert!(validate_batch(&batch).is_ok());

    let store = Arc::new(MemoryStore::default());
    let autosave = DraftAutosave::with_debounce(store.clone(), Duration::from_millis(10));
    autosave.flush(&batch).await.unwrap();
    assert!(autosave.restore().await.unwrap().is_some());

    let api = Arc::new(RecordingApi::default());
    let submitter = BatchSubmitter::new(api.clone());

    let outcome = submitter.submit(&batch, store.as_ref()).await.unwrap();
    assert!(outcome.all_created());
    assert_eq!(outcome.services[0].name, "Agility Training");

    // Draft is gone once the creation API succeeded
    assert!(autosave.restore().await.unwrap().is_none());

    // The API saw a payload with conditions in wire form and optionals set
    let payload = api.payload.lock().await.clone().unwrap();
    let json = serde_json::to_value(&payload).unwrap();
    assert_eq!(json["category"]["mode"], "new");
    assert_eq!(json["category"]["displayOrder"], 3);
    let method = &json["services"][0]["pricingMethods"][0];
    assert_eq!(method["pricingUnit"], "PER_LEVEL");
    assert_eq!(method["startLevel"], 1);
    assert!(
        method["modifiers"][0]["condition"]
            .as_str()
            .unwrap()
            .contains("quantity_range")
    );
}

#[tokio::test]
async fn invalid_batch_is_blocked_and_draft_survives() {
    // Duplicate method names (case-insensitive) make the batch unsubmittable
    let mut batch = agility_batch();
    let dup = PricingMethod::new("1-99 AGILITY", PricingUnit::Fixed, Decimal::from(99));
    batch.services[0].pricing_methods.push(dup);

    let store = Arc::new(MemoryStore::default());
    store.save(&DraftRecord::now(batch.clone())).await.unwrap();

    let api = Arc::new(RecordingApi::default());
    let submitter = BatchSubmitter::new(api.clone());

    let err = submitter.submit(&batch, store.as_ref()).await.unwrap_err();
    match err {
        SubmitError::Validation(report) => {
            // Both colliding methods are flagged
            assert_eq!(report.len(), 2);
        }
        other => panic!("expected validation error, got {other:?}"),
    }

    // The API was never called and the draft is intact
    assert!(api.payload.lock().await.is_none());
    assert!(store.load().await.unwrap().is_some());
}
