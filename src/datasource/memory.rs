use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::patch::apply_patch;
use super::{DataSource, SourceError};
use crate::filter::{evaluate, FilterExpr, Scalar};
use crate::model::{CityRef, Entity, FamilyRef, NameRef, Record, SupportStatus};
use crate::registry::{SortDirection, SortSpec};
use crate::utils::now_iso;

/// In-memory data source with full hydration.
///
/// Used by tests and offline tooling; the production backend sits
/// behind the same trait.
#[derive(Default)]
pub struct MemorySource {
    tables: RwLock<HashMap<Entity, Vec<Record>>>,
}

impl MemorySource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load records verbatim, keeping their identifiers and stamps.
    pub async fn seed(&self, records: Vec<Record>) {
        let mut tables = self.tables.write().await;
        for record in records {
            tables.entry(record.entity()).or_default().push(record);
        }
    }
}

#[async_trait]
impl DataSource for MemorySource {
    async fn fetch(
        &self,
        entity: Entity,
        filter: Option<&FilterExpr>,
        sort: SortSpec,
    ) -> Result<Vec<Record>, SourceError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<Record> = tables.get(&entity).map_or_else(Vec::new, |records| {
            records.iter().map(|r| hydrate(r, &tables)).collect()
        });
        drop(tables);
        if let Some(filter) = filter {
            rows.retain(|record| evaluate(filter, record));
        }
        sort_records(&mut rows, sort);
        Ok(rows)
    }

    async fn get(&self, entity: Entity, id: &str) -> Result<Option<Record>, SourceError> {
        let tables = self.tables.read().await;
        let found = tables
            .get(&entity)
            .and_then(|records| records.iter().find(|r| r.id() == id))
            .map(|r| hydrate(r, &tables));
        Ok(found)
    }

    async fn insert(&self, record: Record) -> Result<String, SourceError> {
        let mut record = record;
        let id = uuid::Uuid::new_v4().to_string();
        record.stamp_new(id.clone(), &now_iso());
        let mut tables = self.tables.write().await;
        tables.entry(record.entity()).or_default().push(record);
        Ok(id)
    }

    async fn update_many(
        &self,
        entity: Entity,
        ids: &[String],
        patch: &Value,
    ) -> Result<usize, SourceError> {
        let now = now_iso();
        let mut tables = self.tables.write().await;
        let Some(records) = tables.get_mut(&entity) else {
            return Ok(0);
        };
        // Validate every patch before committing any of them
        let mut updated: Vec<(usize, Record)> = Vec::new();
        for (index, record) in records.iter().enumerate() {
            if ids.iter().any(|id| id == record.id()) {
                let mut patched = apply_patch(record, patch)?;
                patched.touch(&now);
                updated.push((index, patched));
            }
        }
        let affected = updated.len();
        for (index, patched) in updated {
            if let Some(slot) = records.get_mut(index) {
                *slot = patched;
            }
        }
        Ok(affected)
    }

    async fn delete_many(&self, entity: Entity, ids: &[String]) -> Result<usize, SourceError> {
        let mut tables = self.tables.write().await;
        let Some(records) = tables.get_mut(&entity) else {
            return Ok(0);
        };
        let before = records.len();
        records.retain(|record| !ids.iter().any(|id| id == record.id()));
        Ok(before.saturating_sub(records.len()))
    }
}

/// Fill hydrated fields from the current table contents.
fn hydrate(record: &Record, tables: &HashMap<Entity, Vec<Record>>) -> Record {
    match record {
        Record::Family(family) => {
            let mut hydrated = family.clone();
            hydrated.city = hydrated
                .city_id
                .as_deref()
                .and_then(|city_id| find_city(tables, city_id));
            hydrated.children_count = count_children(tables, &hydrated.id);
            Record::Family(hydrated)
        }
        Record::SupportRequest(request) => {
            let mut hydrated = request.clone();
            hydrated.family = find_family_ref(tables, &hydrated.family_id);
            Record::SupportRequest(hydrated)
        }
        Record::Support(support) => {
            let mut hydrated = support.clone();
            hydrated.family = find_family_ref(tables, &hydrated.family_id);
            hydrated.support_type = hydrated
                .support_type_id
                .as_deref()
                .and_then(|type_id| find_support_type_ref(tables, type_id));
            hydrated.project = hydrated
                .project_id
                .as_deref()
                .and_then(|project_id| find_project_ref(tables, project_id));
            Record::Support(hydrated)
        }
        Record::Project(project) => {
            let mut hydrated = project.clone();
            hydrated.spent = completed_support_total(tables, &hydrated.id);
            Record::Project(hydrated)
        }
        Record::Child(_)
        | Record::FinancialStatus(_)
        | Record::Note(_)
        | Record::City(_)
        | Record::Street(_)
        | Record::Community(_)
        | Record::SupportType(_)
        | Record::Donor(_)
        | Record::User(_) => record.clone(),
    }
}

fn find_city(tables: &HashMap<Entity, Vec<Record>>, city_id: &str) -> Option<CityRef> {
    tables.get(&Entity::Cities)?.iter().find_map(|record| {
        if let Record::City(city) = record {
            if city.id == city_id {
                return Some(CityRef {
                    id: city.id.clone(),
                    name: city.name.clone(),
                });
            }
        }
        None
    })
}

fn find_family_ref(tables: &HashMap<Entity, Vec<Record>>, family_id: &str) -> Option<FamilyRef> {
    tables.get(&Entity::Families)?.iter().find_map(|record| {
        if let Record::Family(family) = record {
            if family.id == family_id {
                return Some(FamilyRef::from(family.as_ref()));
            }
        }
        None
    })
}

fn find_support_type_ref(tables: &HashMap<Entity, Vec<Record>>, type_id: &str) -> Option<NameRef> {
    tables.get(&Entity::SupportTypes)?.iter().find_map(|record| {
        if let Record::SupportType(support_type) = record {
            if support_type.id == type_id {
                return Some(NameRef {
                    id: support_type.id.clone(),
                    name: support_type.name.clone(),
                });
            }
        }
        None
    })
}

fn find_project_ref(tables: &HashMap<Entity, Vec<Record>>, project_id: &str) -> Option<NameRef> {
    tables.get(&Entity::Projects)?.iter().find_map(|record| {
        if let Record::Project(project) = record {
            if project.id == project_id {
                return Some(NameRef {
                    id: project.id.clone(),
                    name: project.name.clone(),
                });
            }
        }
        None
    })
}

fn count_children(tables: &HashMap<Entity, Vec<Record>>, family_id: &str) -> u32 {
    let count = tables.get(&Entity::Children).map_or(0, |records| {
        records
            .iter()
            .filter(|record| matches!(record, Record::Child(child) if child.family_id == family_id))
            .count()
    });
    u32::try_from(count).unwrap_or(u32::MAX)
}

fn completed_support_total(tables: &HashMap<Entity, Vec<Record>>, project_id: &str) -> f64 {
    tables.get(&Entity::Supports).map_or(0.0, |records| {
        records
            .iter()
            .filter_map(|record| {
                if let Record::Support(support) = record {
                    if support.project_id.as_deref() == Some(project_id)
                        && support.status == SupportStatus::Completed
                    {
                        return Some(support.amount);
                    }
                }
                None
            })
            .sum()
    })
}

fn sort_records(rows: &mut [Record], sort: SortSpec) {
    rows.sort_by(|a, b| {
        let ordering = compare_values(a.field_value(sort.field), b.field_value(sort.field));
        match sort.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

/// Absent values sort after present ones on ascending order. Mixed
/// kinds compare equal, which keeps the stable input order.
fn compare_values(a: Option<Scalar>, b: Option<Scalar>) -> Ordering {
    match (a, b) {
        (Some(Scalar::Text(x)), Some(Scalar::Text(y))) => {
            x.to_lowercase().cmp(&y.to_lowercase())
        }
        (Some(Scalar::Number(x)), Some(Scalar::Number(y))) => x.total_cmp(&y),
        (Some(Scalar::Date(x)), Some(Scalar::Date(y))) => x.cmp(&y),
        (Some(Scalar::Bool(x)), Some(Scalar::Bool(y))) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) | (Some(_), Some(_)) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::CmpOp;
    use crate::model::{City, Family, FamilyStatus, Project, Support};
    use crate::registry::entity_def;
    use serde_json::json;

    fn family(id: &str, last_name: &str, city_id: Option<&str>) -> Record {
        Record::Family(Box::new(
            serde_json::from_value::<Family>(json!({
                "id": id,
                "status": "active",
                "husband_last_name": last_name,
                "city_id": city_id,
                "created_at": format!("2024-01-{:02}T10:00:00Z", id.len()),
                "updated_at": "2024-01-01T10:00:00Z"
            }))
            .unwrap(),
        ))
    }

    fn city(id: &str, name: &str) -> Record {
        Record::City(Box::new(City {
            id: id.to_string(),
            name: name.to_string(),
            name_en: None,
            created_at: "2024-01-01T00:00:00Z".to_string(),
        }))
    }

    fn child(id: &str, family_id: &str) -> Record {
        Record::Child(Box::new(
            serde_json::from_value(json!({
                "id": id,
                "family_id": family_id,
                "first_name": "x",
                "created_at": "2024-02-01T08:00:00Z",
                "updated_at": "2024-02-01T08:00:00Z"
            }))
            .unwrap(),
        ))
    }

    fn support(id: &str, project_id: &str, amount: f64, status: &str) -> Record {
        Record::Support(Box::new(
            serde_json::from_value::<Support>(json!({
                "id": id,
                "family_id": "fam-1",
                "amount": amount,
                "support_date": "2024-05-20",
                "status": status,
                "project_id": project_id,
                "created_at": "2024-05-20T07:45:00Z",
                "updated_at": "2024-05-20T07:45:00Z"
            }))
            .unwrap(),
        ))
    }

    fn project(id: &str, name: &str) -> Record {
        Record::Project(Box::new(
            serde_json::from_value::<Project>(json!({
                "id": id,
                "name": name,
                "status": "active",
                "budget": 10000.0,
                "created_at": "2024-02-15T11:00:00Z",
                "updated_at": "2024-02-15T11:00:00Z"
            }))
            .unwrap(),
        ))
    }

    #[tokio::test]
    async fn test_fetch_hydrates_city_and_children_count() {
        let source = MemorySource::new();
        source
            .seed(vec![
                city("city-1", "Bnei Brak"),
                family("fam-1", "Cohen", Some("city-1")),
                child("child-1", "fam-1"),
                child("child-2", "fam-1"),
            ])
            .await;
        let rows = source
            .fetch(
                Entity::Families,
                None,
                entity_def(Entity::Families).default_sort,
            )
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        match &rows[0] {
            Record::Family(family) => {
                assert_eq!(family.city.as_ref().unwrap().name, "Bnei Brak");
                assert_eq!(family.children_count, 2);
            }
            _ => panic!("wrong entity"),
        }
    }

    #[tokio::test]
    async fn test_fetch_applies_filter_to_hydrated_fields() {
        let source = MemorySource::new();
        source
            .seed(vec![
                city("city-1", "Bnei Brak"),
                family("fam-1", "Cohen", Some("city-1")),
                family("fam-2", "Levi", None),
            ])
            .await;
        let filter = FilterExpr::cmp("city", CmpOp::Contains, Scalar::Text("bnei".to_string()));
        let rows = source
            .fetch(
                Entity::Families,
                Some(&filter),
                entity_def(Entity::Families).default_sort,
            )
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id(), "fam-1");
    }

    #[tokio::test]
    async fn test_fetch_sorts_by_spec() {
        let source = MemorySource::new();
        source
            .seed(vec![
                family("fam-1", "Levi", None),
                family("fam-2", "cohen", None),
                family("fam-3", "Avraham", None),
            ])
            .await;
        let sort = SortSpec {
            field: "husband_last_name",
            direction: SortDirection::Asc,
        };
        let rows = source.fetch(Entity::Families, None, sort).await.unwrap();
        let names: Vec<&str> = rows.iter().map(Record::id).collect();
        assert_eq!(names, vec!["fam-3", "fam-2", "fam-1"]);
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_stamps() {
        let source = MemorySource::new();
        let record = family("placeholder", "Cohen", None);
        let id = source.insert(record).await.unwrap();
        assert_ne!(id, "placeholder");
        let fetched = source.get(Entity::Families, &id).await.unwrap().unwrap();
        match fetched {
            Record::Family(family) => {
                assert_eq!(family.id, id);
                assert_ne!(family.created_at, "2024-01-01T10:00:00Z");
                assert_eq!(family.created_at, family.updated_at);
            }
            _ => panic!("wrong entity"),
        }
    }

    #[tokio::test]
    async fn test_update_many_patches_and_touches() {
        let source = MemorySource::new();
        source
            .seed(vec![family("fam-1", "Cohen", None), family("fam-2", "Levi", None)])
            .await;
        let affected = source
            .update_many(
                Entity::Families,
                &["fam-1".to_string(), "fam-2".to_string()],
                &json!({"status": "inactive"}),
            )
            .await
            .unwrap();
        assert_eq!(affected, 2);
        let fetched = source.get(Entity::Families, "fam-1").await.unwrap().unwrap();
        match fetched {
            Record::Family(family) => {
                assert_eq!(family.status, FamilyStatus::Inactive);
                assert_ne!(family.updated_at, "2024-01-01T10:00:00Z");
            }
            _ => panic!("wrong entity"),
        }
    }

    #[tokio::test]
    async fn test_update_many_is_atomic_on_invalid_patch() {
        let source = MemorySource::new();
        source.seed(vec![family("fam-1", "Cohen", None)]).await;
        let err = source
            .update_many(
                Entity::Families,
                &["fam-1".to_string()],
                &json!({"status": "vanished"}),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::InvalidPatch(_)));
        let fetched = source.get(Entity::Families, "fam-1").await.unwrap().unwrap();
        match fetched {
            Record::Family(family) => assert_eq!(family.status, FamilyStatus::Active),
            _ => panic!("wrong entity"),
        }
    }

    #[tokio::test]
    async fn test_update_many_skips_missing_ids() {
        let source = MemorySource::new();
        source.seed(vec![family("fam-1", "Cohen", None)]).await;
        let affected = source
            .update_many(
                Entity::Families,
                &["fam-1".to_string(), "ghost".to_string()],
                &json!({"status": "pending"}),
            )
            .await
            .unwrap();
        assert_eq!(affected, 1);
    }

    #[tokio::test]
    async fn test_delete_many_returns_existing_count() {
        let source = MemorySource::new();
        source
            .seed(vec![family("fam-1", "Cohen", None), family("fam-2", "Levi", None)])
            .await;
        let deleted = source
            .delete_many(
                Entity::Families,
                &["fam-1".to_string(), "ghost".to_string()],
            )
            .await
            .unwrap();
        assert_eq!(deleted, 1);
        let rows = source
            .fetch(
                Entity::Families,
                None,
                entity_def(Entity::Families).default_sort,
            )
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn test_project_spent_sums_completed_supports_only() {
        let source = MemorySource::new();
        source
            .seed(vec![
                project("proj-1", "Passover"),
                support("sup-1", "proj-1", 1000.0, "completed"),
                support("sup-2", "proj-1", 500.0, "completed"),
                support("sup-3", "proj-1", 900.0, "pending"),
                support("sup-4", "proj-1", 800.0, "cancelled"),
            ])
            .await;
        let fetched = source.get(Entity::Projects, "proj-1").await.unwrap().unwrap();
        match fetched {
            Record::Project(project) => assert_eq!(project.spent, 1500.0),
            _ => panic!("wrong entity"),
        }
    }

    #[tokio::test]
    async fn test_support_hydrates_family_and_names() {
        let source = MemorySource::new();
        source
            .seed(vec![
                family("fam-1", "Cohen", None),
                project("proj-1", "Passover"),
                support("sup-1", "proj-1", 1000.0, "completed"),
            ])
            .await;
        let fetched = source.get(Entity::Supports, "sup-1").await.unwrap().unwrap();
        match fetched {
            Record::Support(support) => {
                assert_eq!(support.family.as_ref().unwrap().husband_last_name, "Cohen");
                assert_eq!(support.project.as_ref().unwrap().name, "Passover");
                assert_eq!(support.support_type, None);
            }
            _ => panic!("wrong entity"),
        }
    }

    #[tokio::test]
    async fn test_absent_values_sort_last_ascending() {
        let source = MemorySource::new();
        source
            .seed(vec![
                city("city-1", "Jerusalem"),
                family("fam-1", "Cohen", None),
                family("fam-2", "Levi", Some("city-1")),
            ])
            .await;
        let sort = SortSpec {
            field: "city",
            direction: SortDirection::Asc,
        };
        let rows = source.fetch(Entity::Families, None, sort).await.unwrap();
        assert_eq!(rows[0].id(), "fam-2");
        assert_eq!(rows[1].id(), "fam-1");
    }
}
