//! Common test utilities

// The `as Arc<dyn ...>` casts pin `Arc::clone`'s type parameter; removing
// them breaks inference even though rustc labels them trivial.
#![allow(trivial_casts)]

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::Mutex;

use almoner::actions::BulkDispatcher;
use almoner::cache::{CacheConfig, ResultCache};
use almoner::datasource::{DataSource, MemorySource};
use almoner::mail::{MailComposer, MailError, Mailer, RenderedEmail, SendReceipt};
use almoner::model::{Entity, Record};

/// Mailer that records every outgoing message instead of sending it.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<RenderedEmail>>,
}

impl RecordingMailer {
    #[allow(dead_code)] // Test utility for integration tests
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(dead_code)] // Test utility for integration tests
    pub async fn sent(&self) -> Vec<RenderedEmail> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: &RenderedEmail) -> Result<SendReceipt, MailError> {
        let mut sent = self.sent.lock().await;
        sent.push(message.clone());
        Ok(SendReceipt {
            message_id: format!("msg-{}", sent.len()),
        })
    }
}

fn record(entity: Entity, mut value: Value, extra: Value) -> Record {
    if let (Value::Object(base), Value::Object(fields)) = (&mut value, extra) {
        base.extend(fields);
    }
    Record::from_value(entity, value).expect("fixture record should deserialize")
}

/// A family with the given identity; pass extra fields as a JSON object.
#[allow(dead_code)] // Test utility for integration tests
pub fn family(id: &str, last_name: &str, status: &str, created_at: &str, extra: Value) -> Record {
    record(
        Entity::Families,
        json!({
            "id": id,
            "status": status,
            "husband_last_name": last_name,
            "created_at": created_at,
            "updated_at": created_at,
        }),
        extra,
    )
}

#[allow(dead_code)] // Test utility for integration tests
pub fn child(id: &str, family_id: &str, first_name: &str, extra: Value) -> Record {
    record(
        Entity::Children,
        json!({
            "id": id,
            "family_id": family_id,
            "first_name": first_name,
            "created_at": "2024-01-01T09:00:00Z",
            "updated_at": "2024-01-01T09:00:00Z",
        }),
        extra,
    )
}

#[allow(dead_code)] // Test utility for integration tests
pub fn request(
    id: &str,
    family_id: &str,
    status: &str,
    request_date: &str,
    extra: Value,
) -> Record {
    record(
        Entity::SupportRequests,
        json!({
            "id": id,
            "family_id": family_id,
            "status": status,
            "request_date": request_date,
            "created_at": format!("{request_date}T09:00:00Z"),
            "updated_at": format!("{request_date}T09:00:00Z"),
        }),
        extra,
    )
}

#[allow(dead_code)] // Test utility for integration tests
pub fn support(
    id: &str,
    family_id: &str,
    amount: f64,
    status: &str,
    support_date: &str,
    extra: Value,
) -> Record {
    record(
        Entity::Supports,
        json!({
            "id": id,
            "family_id": family_id,
            "amount": amount,
            "status": status,
            "support_date": support_date,
            "created_at": format!("{support_date}T09:00:00Z"),
            "updated_at": format!("{support_date}T09:00:00Z"),
        }),
        extra,
    )
}

#[allow(dead_code)] // Test utility for integration tests
pub fn city(id: &str, name: &str) -> Record {
    record(
        Entity::Cities,
        json!({
            "id": id,
            "name": name,
            "created_at": "2023-01-01T00:00:00Z",
        }),
        json!({}),
    )
}

#[allow(dead_code)] // Test utility for integration tests
pub fn project(id: &str, name: &str, status: &str, budget: f64) -> Record {
    record(
        Entity::Projects,
        json!({
            "id": id,
            "name": name,
            "status": status,
            "budget": budget,
            "created_at": "2023-12-01T00:00:00Z",
            "updated_at": "2023-12-01T00:00:00Z",
        }),
        json!({}),
    )
}

#[allow(dead_code)] // Test utility for integration tests
pub fn support_type(id: &str, name: &str) -> Record {
    record(
        Entity::SupportTypes,
        json!({
            "id": id,
            "name": name,
            "created_at": "2023-01-01T00:00:00Z",
        }),
        json!({}),
    )
}

/// The standard cross-linked dataset the integration tests share.
///
/// Four families (two active, one pending, one inactive), three
/// children, three requests, three supports, two projects and the
/// reference rows they point at. Family creation dates ascend with the
/// numeric suffix, so the default newest-first sort yields
/// fam-4, fam-3, fam-2, fam-1.
#[allow(dead_code)] // Test utility for integration tests
pub fn seed_records() -> Vec<Record> {
    vec![
        city("city-1", "Jerusalem"),
        city("city-2", "Bnei Brak"),
        family(
            "fam-1",
            "Cohen",
            "active",
            "2024-01-10T08:00:00Z",
            json!({
                "husband_first_name": "David",
                "husband_id_number": "012345678",
                "husband_phone": "050-1111111",
                "husband_email": "cohen@example.org",
                "city_id": "city-1",
                "house_number": "12",
            }),
        ),
        family(
            "fam-2",
            "Levi",
            "active",
            "2024-02-10T08:00:00Z",
            json!({
                "wife_first_name": "Rachel",
                "wife_email": "levi@example.org",
                "city_id": "city-2",
            }),
        ),
        family("fam-3", "Mizrahi", "pending", "2024-03-10T08:00:00Z", json!({})),
        family(
            "fam-4",
            "Katz",
            "inactive",
            "2024-04-10T08:00:00Z",
            json!({
                "husband_email": "not-an-address",
                "city_id": "city-1",
            }),
        ),
        child(
            "child-1",
            "fam-1",
            "Moshe",
            json!({ "birth_date": "2015-03-01", "gender": "male", "tuition_fee": 450.0 }),
        ),
        child(
            "child-2",
            "fam-1",
            "Rivka",
            json!({ "birth_date": "2018-06-20", "gender": "female", "tuition_fee": 300.0 }),
        ),
        child(
            "child-3",
            "fam-2",
            "Sara",
            json!({ "birth_date": "2012-09-10", "gender": "female" }),
        ),
        request(
            "req-1",
            "fam-1",
            "new",
            "2024-03-01",
            json!({
                "purpose": "Passover food",
                "requested_amount": 3500.0,
                "submitted_by": "David Cohen",
            }),
        ),
        request(
            "req-2",
            "fam-2",
            "in_review",
            "2024-03-05",
            json!({ "requested_amount": 1200.0 }),
        ),
        request(
            "req-3",
            "fam-3",
            "approved",
            "2024-02-01",
            json!({ "requested_amount": 800.0, "approved_amount": 800.0 }),
        ),
        project("proj-1", "Kimcha DePischa", "active", 10000.0),
        project("proj-2", "Winter Heating", "completed", 5000.0),
        support_type("type-1", "Food baskets"),
        support(
            "sup-1",
            "fam-1",
            1000.0,
            "completed",
            "2024-04-01",
            json!({
                "project_id": "proj-1",
                "support_type_id": "type-1",
                "payment_method": "transfer",
            }),
        ),
        support("sup-2", "fam-2", 700.0, "completed", "2024-04-15", json!({})),
        support(
            "sup-3",
            "fam-3",
            400.0,
            "pending",
            "2024-05-01",
            json!({ "project_id": "proj-1" }),
        ),
    ]
}

/// Memory source loaded with [`seed_records`].
#[allow(dead_code)] // Test utility for integration tests
pub async fn seeded_source() -> Arc<MemorySource> {
    let source = Arc::new(MemorySource::new());
    source.seed(seed_records()).await;
    source
}

#[allow(dead_code)] // Test utility for integration tests
pub fn cache_for(source: &Arc<MemorySource>) -> Arc<ResultCache> {
    let backing: Arc<dyn DataSource> = Arc::clone(source) as Arc<dyn DataSource>;
    Arc::new(ResultCache::new(backing, &CacheConfig::default()))
}

/// Dispatcher wired to a recording mailer; returns the mailer for
/// assertions on what went out.
#[allow(dead_code)] // Test utility for integration tests
pub fn dispatcher_for(
    source: &Arc<MemorySource>,
    cache: &Arc<ResultCache>,
    entity: Entity,
) -> (BulkDispatcher, Arc<RecordingMailer>) {
    let mailer = Arc::new(RecordingMailer::new());
    let composer = Arc::new(MailComposer::new("noreply@example.org", "Tov VaChesed"));
    let dispatcher = BulkDispatcher::new(
        Arc::clone(source) as Arc<dyn DataSource>,
        Arc::clone(cache),
        composer,
        Arc::clone(&mailer) as Arc<dyn Mailer>,
        entity,
    );
    (dispatcher, mailer)
}
