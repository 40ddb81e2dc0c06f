#![allow(clippy::indexing_slicing)]
#![allow(clippy::unwrap_used, clippy::expect_used)]
#![allow(trivial_casts)]

mod common;

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use almoner::actions::{ActionOutcome, BulkAction, BulkDispatcher, Disposition};
use almoner::cache::{CacheConfig, CacheError, ResultCache};
use almoner::controller::PageController;
use almoner::datasource::{DataSource, MemorySource, SourceError};
use almoner::filter::{FilterExpr, QueryState};
use almoner::mail::MailComposer;
use almoner::model::{Entity, Record};
use almoner::registry::SortSpec;
use almoner::selection::SelectionSet;
use common::{seed_records, RecordingMailer};

/// Counts backend fetches; everything else delegates.
struct CountingSource {
    inner: MemorySource,
    fetches: AtomicUsize,
}

impl CountingSource {
    async fn seeded() -> Arc<Self> {
        let inner = MemorySource::new();
        inner.seed(seed_records()).await;
        Arc::new(Self {
            inner,
            fetches: AtomicUsize::new(0),
        })
    }

    fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DataSource for CountingSource {
    async fn fetch(
        &self,
        entity: Entity,
        filter: Option<&FilterExpr>,
        sort: SortSpec,
    ) -> Result<Vec<Record>, SourceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch(entity, filter, sort).await
    }

    async fn get(&self, entity: Entity, id: &str) -> Result<Option<Record>, SourceError> {
        self.inner.get(entity, id).await
    }

    async fn insert(&self, record: Record) -> Result<String, SourceError> {
        self.inner.insert(record).await
    }

    async fn update_many(
        &self,
        entity: Entity,
        ids: &[String],
        patch: &Value,
    ) -> Result<usize, SourceError> {
        self.inner.update_many(entity, ids, patch).await
    }

    async fn delete_many(&self, entity: Entity, ids: &[String]) -> Result<usize, SourceError> {
        self.inner.delete_many(entity, ids).await
    }
}

/// Fails the first fetch, then behaves like the inner source.
struct FlakySource {
    inner: MemorySource,
    failed_once: AtomicBool,
}

#[async_trait]
impl DataSource for FlakySource {
    async fn fetch(
        &self,
        entity: Entity,
        filter: Option<&FilterExpr>,
        sort: SortSpec,
    ) -> Result<Vec<Record>, SourceError> {
        if !self.failed_once.swap(true, Ordering::SeqCst) {
            return Err(SourceError::Backend("connection reset".to_string()));
        }
        self.inner.fetch(entity, filter, sort).await
    }

    async fn get(&self, entity: Entity, id: &str) -> Result<Option<Record>, SourceError> {
        self.inner.get(entity, id).await
    }

    async fn insert(&self, record: Record) -> Result<String, SourceError> {
        self.inner.insert(record).await
    }

    async fn update_many(
        &self,
        entity: Entity,
        ids: &[String],
        patch: &Value,
    ) -> Result<usize, SourceError> {
        self.inner.update_many(entity, ids, patch).await
    }

    async fn delete_many(&self, entity: Entity, ids: &[String]) -> Result<usize, SourceError> {
        self.inner.delete_many(entity, ids).await
    }
}

#[tokio::test]
async fn test_pages_sharing_a_cache_share_fetches() {
    let source = CountingSource::seeded().await;
    let cache = Arc::new(ResultCache::new(
        Arc::clone(&source) as Arc<dyn DataSource>,
        &CacheConfig::default(),
    ));
    let query = QueryState::default();
    // Two views of the same page, one backend fetch
    let first = cache.rows(Entity::Families, &query).await.unwrap();
    let second = cache.rows(Entity::Families, &query).await.unwrap();
    assert_eq!(first.len(), 4);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(source.fetch_count(), 1);
}

#[tokio::test]
async fn test_dispatcher_mutation_refreshes_only_its_entity() {
    let source = CountingSource::seeded().await;
    let cache = Arc::new(ResultCache::new(
        Arc::clone(&source) as Arc<dyn DataSource>,
        &CacheConfig::default(),
    ));
    let composer = Arc::new(MailComposer::new("noreply@example.org", "Tov VaChesed"));
    let mut dispatcher = BulkDispatcher::new(
        Arc::clone(&source) as Arc<dyn DataSource>,
        Arc::clone(&cache),
        composer,
        Arc::new(RecordingMailer::new()),
        Entity::Families,
    );

    let query = QueryState::default();
    let families = cache.rows(Entity::Families, &query).await.unwrap();
    cache.rows(Entity::Children, &query).await.unwrap();
    assert_eq!(source.fetch_count(), 2);

    let mut selection = SelectionSet::new();
    selection.toggle("fam-3", true);
    let disposition = dispatcher
        .request(
            BulkAction::StatusChange {
                status: "active".to_string(),
            },
            &mut selection,
            &families,
        )
        .await
        .unwrap();
    assert_eq!(
        disposition,
        Disposition::Executed(ActionOutcome::Mutated { affected: 1 })
    );

    // Families re-fetches, children stays served from cache
    cache.rows(Entity::Families, &query).await.unwrap();
    assert_eq!(source.fetch_count(), 3);
    cache.rows(Entity::Children, &query).await.unwrap();
    assert_eq!(source.fetch_count(), 3);
}

#[tokio::test]
async fn test_freshness_window_expires_entries() {
    let source = CountingSource::seeded().await;
    let config = CacheConfig {
        freshness: Duration::from_millis(50),
        max_entries: 16,
    };
    let cache = ResultCache::new(Arc::clone(&source) as Arc<dyn DataSource>, &config);
    let query = QueryState::default();
    cache.rows(Entity::Families, &query).await.unwrap();
    cache.rows(Entity::Families, &query).await.unwrap();
    assert_eq!(source.fetch_count(), 1);
    tokio::time::sleep(Duration::from_millis(80)).await;
    cache.rows(Entity::Families, &query).await.unwrap();
    assert_eq!(source.fetch_count(), 2);
}

#[tokio::test]
async fn test_fetch_error_is_not_sticky() {
    let inner = MemorySource::new();
    inner.seed(seed_records()).await;
    let flaky = Arc::new(FlakySource {
        inner,
        failed_once: AtomicBool::new(false),
    });
    let cache = ResultCache::new(
        Arc::clone(&flaky) as Arc<dyn DataSource>,
        &CacheConfig::default(),
    );
    let query = QueryState::default();
    let err = cache.rows(Entity::Families, &query).await.unwrap_err();
    assert!(matches!(err, CacheError::Fetch(_)));
    // The failure was not cached; the retry goes back to the source
    let rows = cache.rows(Entity::Families, &query).await.unwrap();
    assert_eq!(rows.len(), 4);
}

#[tokio::test]
async fn test_controller_rows_ride_the_shared_cache() {
    let source = CountingSource::seeded().await;
    let cache = Arc::new(ResultCache::new(
        Arc::clone(&source) as Arc<dyn DataSource>,
        &CacheConfig::default(),
    ));
    let composer = Arc::new(MailComposer::new("noreply@example.org", "Tov VaChesed"));
    let make_page = || {
        let dispatcher = BulkDispatcher::new(
            Arc::clone(&source) as Arc<dyn DataSource>,
            Arc::clone(&cache),
            Arc::clone(&composer),
            Arc::new(RecordingMailer::new()),
            Entity::Families,
        );
        PageController::new(Entity::Families, Arc::clone(&cache), dispatcher)
    };
    let mut first = make_page();
    let mut second = make_page();
    first.rows().await.unwrap();
    second.rows().await.unwrap();
    assert_eq!(source.fetch_count(), 1);
    first.set_search_term("cohen");
    first.rows().await.unwrap();
    assert_eq!(source.fetch_count(), 2);
}
