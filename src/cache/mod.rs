//! Read-through result cache keyed by entity, query fingerprint and
//! generation.
//!
//! Every list page funnels its reads through here. Identical queries
//! issued concurrently are coalesced into a single backend fetch, and
//! mutations invalidate by bumping the entity's generation so stale
//! keys can never be hit again. Entries age out on their own after the
//! configured freshness window.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::datasource::{DataSource, SourceError};
use crate::filter::{compile, QueryState};
use crate::model::{Entity, Record};
use crate::registry::entity_def;
use crate::utils::compute_hash;

/// Tuning knobs for the result cache.
#[derive(Debug, Clone, Copy)]
pub struct CacheConfig {
    /// How long a cached result stays servable.
    pub freshness: Duration,
    /// Maximum number of cached result sets.
    pub max_entries: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            freshness: Duration::from_secs(300),
            max_entries: 256,
        }
    }
}

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("failed to fingerprint query: {0}")]
    Key(#[from] serde_json::Error),
    #[error("fetch failed: {0}")]
    Fetch(Arc<SourceError>),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct FetchKey {
    entity: Entity,
    fingerprint: String,
    generation: u64,
}

/// Caching facade over a [`DataSource`].
pub struct ResultCache {
    source: Arc<dyn DataSource>,
    inner: Cache<FetchKey, Arc<Vec<Record>>>,
    generations: Mutex<HashMap<Entity, u64>>,
}

impl ResultCache {
    #[must_use]
    pub fn new(source: Arc<dyn DataSource>, config: &CacheConfig) -> Self {
        Self {
            source,
            inner: Cache::builder()
                .max_capacity(config.max_entries)
                .time_to_live(config.freshness)
                .build(),
            generations: Mutex::new(HashMap::new()),
        }
    }

    /// Fetch the rows for a query, hitting the backend only on a miss.
    ///
    /// Concurrent callers with the same entity and query share one
    /// in-flight fetch. Backend errors are returned to every waiter
    /// and nothing is cached for them.
    pub async fn rows(
        &self,
        entity: Entity,
        query: &QueryState,
    ) -> Result<Arc<Vec<Record>>, CacheError> {
        let serialized = serde_json::to_string(query)?;
        let key = FetchKey {
            entity,
            fingerprint: compute_hash(&serialized),
            generation: self.generation(entity).await,
        };
        let def = entity_def(entity);
        let filter = compile(query, def);
        self.inner
            .try_get_with(key, async {
                self.source
                    .fetch(entity, filter.as_ref(), def.default_sort)
                    .await
                    .map(Arc::new)
            })
            .await
            .map_err(CacheError::Fetch)
    }

    /// Drop every cached result set for an entity.
    pub async fn invalidate(&self, entity: Entity) {
        let mut generations = self.generations.lock().await;
        let slot = generations.entry(entity).or_insert(0);
        *slot = slot.saturating_add(1);
    }

    async fn generation(&self, entity: Entity) -> u64 {
        let generations = self.generations.lock().await;
        generations.get(&entity).copied().unwrap_or(0)
    }
}
