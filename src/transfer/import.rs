use std::sync::Arc;

use csv::StringRecord;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::info;

use super::columns::{
    child_gender, family_status, ColumnAlias, CHILD_BIRTH_DATE, CHILD_COLUMNS, CHILD_FAMILY_ID,
    CHILD_GENDER, CHILD_TUITION, FAMILY_COLUMNS, FAMILY_STATUS,
};
use crate::cache::ResultCache;
use crate::datasource::DataSource;
use crate::model::{Entity, Record};
use crate::utils::parse_date;

/// Rows shown in the preview plan.
const SAMPLE_ROWS: usize = 5;

/// What a file may be imported as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    Families,
    Children,
}

impl ImportKind {
    #[must_use]
    pub const fn entity(self) -> Entity {
        match self {
            Self::Families => Entity::Families,
            Self::Children => Entity::Children,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Families => "families",
            Self::Children => "children",
        }
    }
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("csv parse error: {0}")]
    Csv(#[from] csv::Error),
}

/// Parsed batch shown to the operator before committing.
#[derive(Debug, Clone)]
pub struct ImportPlan {
    pub total_rows: usize,
    /// Up to the first five mappable records.
    pub sample: Vec<Record>,
}

#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    pub inserted: usize,
    /// One `"row N: message"` string per failed row, N being the
    /// 1-based data-row number.
    pub errors: Vec<String>,
}

struct RowOutcome {
    row: usize,
    result: Result<Record, String>,
}

/// Two-phase spreadsheet import: `preview` the plan, then `commit` the
/// inserts. Failed rows never abort the batch.
pub struct Importer {
    source: Arc<dyn DataSource>,
    cache: Arc<ResultCache>,
}

impl Importer {
    #[must_use]
    pub fn new(source: Arc<dyn DataSource>, cache: Arc<ResultCache>) -> Self {
        Self { source, cache }
    }

    /// Parse without inserting anything.
    pub fn preview(&self, kind: ImportKind, csv_text: &str) -> Result<ImportPlan, ImportError> {
        let outcomes = parse_rows(kind, csv_text)?;
        let total_rows = outcomes.len();
        let sample = outcomes
            .into_iter()
            .filter_map(|outcome| outcome.result.ok())
            .take(SAMPLE_ROWS)
            .collect();
        Ok(ImportPlan { total_rows, sample })
    }

    /// Insert every mappable row, then invalidate the caches the new
    /// rows can show up in.
    pub async fn commit(
        &self,
        kind: ImportKind,
        csv_text: &str,
    ) -> Result<ImportReport, ImportError> {
        let outcomes = parse_rows(kind, csv_text)?;
        let mut report = ImportReport::default();
        for outcome in outcomes {
            match outcome.result {
                Ok(record) => match self.source.insert(record).await {
                    Ok(_) => report.inserted = report.inserted.saturating_add(1),
                    Err(error) => report.errors.push(format!("row {}: {error}", outcome.row)),
                },
                Err(message) => report.errors.push(format!("row {}: {message}", outcome.row)),
            }
        }
        for entity in [Entity::Families, Entity::Children, Entity::Supports] {
            self.cache.invalidate(entity).await;
        }
        info!(
            kind = kind.as_str(),
            inserted = report.inserted,
            errors = report.errors.len(),
            "import committed"
        );
        Ok(report)
    }
}

fn parse_rows(kind: ImportKind, csv_text: &str) -> Result<Vec<RowOutcome>, ImportError> {
    let mut reader = csv::Reader::from_reader(csv_text.as_bytes());
    let headers = reader.headers()?.clone();
    let mut outcomes = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let result = match row {
            Ok(cells) => map_row(kind, &headers, &cells),
            Err(error) => Err(error.to_string()),
        };
        outcomes.push(RowOutcome {
            row: index.saturating_add(1),
            result,
        });
    }
    Ok(outcomes)
}

fn map_row(kind: ImportKind, headers: &StringRecord, row: &StringRecord) -> Result<Record, String> {
    match kind {
        ImportKind::Families => map_family(headers, row),
        ImportKind::Children => map_child(headers, row),
    }
}

fn map_family(headers: &StringRecord, row: &StringRecord) -> Result<Record, String> {
    let mut fields = stamped_fields();
    for column in &FAMILY_COLUMNS {
        if let Some(value) = cell(headers, row, column) {
            fields.insert(column.field.to_string(), Value::String(value.to_string()));
        }
    }
    let status = cell(headers, row, &FAMILY_STATUS).map_or("pending", family_status);
    fields.insert("status".to_string(), Value::String(status.to_string()));
    Record::from_value(Entity::Families, Value::Object(fields)).map_err(|error| error.to_string())
}

fn map_child(headers: &StringRecord, row: &StringRecord) -> Result<Record, String> {
    let family_id =
        cell(headers, row, &CHILD_FAMILY_ID).ok_or_else(|| "missing family id".to_string())?;
    let mut fields = stamped_fields();
    fields.insert(
        "family_id".to_string(),
        Value::String(family_id.to_string()),
    );
    for column in &CHILD_COLUMNS {
        if let Some(value) = cell(headers, row, column) {
            fields.insert(column.field.to_string(), Value::String(value.to_string()));
        }
    }
    if let Some(value) = cell(headers, row, &CHILD_BIRTH_DATE) {
        let date = parse_date(value).ok_or_else(|| format!("invalid birth date `{value}`"))?;
        fields.insert("birth_date".to_string(), Value::String(date.to_string()));
    }
    if let Some(value) = cell(headers, row, &CHILD_GENDER) {
        if let Some(gender) = child_gender(value) {
            fields.insert("gender".to_string(), Value::String(gender.to_string()));
        }
    }
    if let Some(value) = cell(headers, row, &CHILD_TUITION) {
        // Unparseable fees fall back to zero, matching the legacy sheets
        let fee = value.parse::<f64>().unwrap_or(0.0);
        if fee.is_finite() {
            fields.insert("tuition_fee".to_string(), Value::from(fee));
        }
    }
    Record::from_value(Entity::Children, Value::Object(fields)).map_err(|error| error.to_string())
}

/// Placeholder identity and stamps; `insert` replaces them.
fn stamped_fields() -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert("id".to_string(), Value::String(String::new()));
    fields.insert("created_at".to_string(), Value::String(String::new()));
    fields.insert("updated_at".to_string(), Value::String(String::new()));
    fields
}

/// The trimmed, non-empty cell under either spelling of the header.
fn cell<'a>(headers: &StringRecord, row: &'a StringRecord, column: &ColumnAlias) -> Option<&'a str> {
    headers
        .iter()
        .position(|header| {
            let name = header.trim();
            name == column.spaced || name == column.underscored
        })
        .and_then(|index| row.get(index))
        .map(str::trim)
        .filter(|value| !value.is_empty())
}
