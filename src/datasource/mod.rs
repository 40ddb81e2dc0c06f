//! Persistence abstraction the cache, dispatcher and importer talk to.
//!
//! [`DataSource`] is the uniform surface; [`MemorySource`] is the
//! in-crate engine backing tests and offline use. Fetches return
//! hydrated records: related-entity references and derived counts are
//! filled in before filtering, so filters can reach through them.

mod memory;
mod patch;

pub use memory::MemorySource;
pub use patch::apply_patch;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::filter::FilterExpr;
use crate::model::{Entity, Record};
use crate::registry::SortSpec;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("invalid patch: {0}")]
    InvalidPatch(String),

    #[error("backend error: {0}")]
    Backend(String),
}

/// Uniform persistence surface for entity records.
///
/// Implementations must hydrate on read and treat multi-record
/// mutations as all-or-nothing: a patch that fails validation for any
/// targeted record mutates none of them.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch records of one entity, hydrated, filtered and sorted.
    async fn fetch(
        &self,
        entity: Entity,
        filter: Option<&FilterExpr>,
        sort: SortSpec,
    ) -> Result<Vec<Record>, SourceError>;

    /// Fetch one record by identifier, hydrated.
    async fn get(&self, entity: Entity, id: &str) -> Result<Option<Record>, SourceError>;

    /// Insert a record, assigning a fresh identifier and creation
    /// stamps. Returns the assigned identifier.
    async fn insert(&self, record: Record) -> Result<String, SourceError>;

    /// Apply one merge patch to every listed record. Returns how many
    /// records were updated.
    async fn update_many(
        &self,
        entity: Entity,
        ids: &[String],
        patch: &Value,
    ) -> Result<usize, SourceError>;

    /// Delete the listed records. Returns how many existed.
    async fn delete_many(&self, entity: Entity, ids: &[String]) -> Result<usize, SourceError>;
}
