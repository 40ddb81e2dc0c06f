//! Aggregate figures for the dashboard and supports overview.

use std::collections::HashMap;

use serde::Serialize;

use crate::datasource::{DataSource, SourceError};
use crate::model::{Entity, FamilyStatus, ProjectStatus, Record, RequestStatus, SupportStatus};
use crate::registry::entity_def;

/// Headline numbers shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_families: usize,
    pub active_families: usize,
    pub total_requests: usize,
    /// Requests still awaiting a decision (new or in review).
    pub pending_requests: usize,
    pub completed_support_amount: f64,
    pub active_projects: usize,
}

/// Totals for the supports overview page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupportsSummary {
    pub total_amount: f64,
    pub completed_amount: f64,
    pub pending_amount: f64,
    pub count: usize,
}

pub async fn dashboard_summary(source: &dyn DataSource) -> Result<DashboardSummary, SourceError> {
    let families = fetch_all(source, Entity::Families).await?;
    let requests = fetch_all(source, Entity::SupportRequests).await?;
    let supports = fetch_all(source, Entity::Supports).await?;
    let projects = fetch_all(source, Entity::Projects).await?;
    Ok(DashboardSummary {
        total_families: families.len(),
        active_families: families
            .iter()
            .filter(|record| {
                matches!(record, Record::Family(family) if family.status == FamilyStatus::Active)
            })
            .count(),
        total_requests: requests.len(),
        pending_requests: requests
            .iter()
            .filter(|record| {
                matches!(
                    record,
                    Record::SupportRequest(request)
                        if request.status == RequestStatus::New
                            || request.status == RequestStatus::InReview
                )
            })
            .count(),
        completed_support_amount: support_amounts(&supports, Some(SupportStatus::Completed))
            .sum::<f64>(),
        active_projects: projects
            .iter()
            .filter(|record| {
                matches!(record, Record::Project(project) if project.status == ProjectStatus::Active)
            })
            .count(),
    })
}

pub async fn supports_summary(source: &dyn DataSource) -> Result<SupportsSummary, SourceError> {
    let supports = fetch_all(source, Entity::Supports).await?;
    Ok(SupportsSummary {
        total_amount: support_amounts(&supports, None).sum::<f64>(),
        completed_amount: support_amounts(&supports, Some(SupportStatus::Completed)).sum::<f64>(),
        pending_amount: support_amounts(&supports, Some(SupportStatus::Pending)).sum::<f64>(),
        count: supports.len(),
    })
}

/// Completed-support totals keyed by project identifier.
pub async fn spent_by_project(
    source: &dyn DataSource,
) -> Result<HashMap<String, f64>, SourceError> {
    let supports = fetch_all(source, Entity::Supports).await?;
    let mut buckets: HashMap<String, Vec<f64>> = HashMap::new();
    for record in &supports {
        if let Record::Support(support) = record {
            if support.status == SupportStatus::Completed {
                if let Some(project_id) = &support.project_id {
                    buckets.entry(project_id.clone()).or_default().push(support.amount);
                }
            }
        }
    }
    Ok(buckets
        .into_iter()
        .map(|(project_id, amounts)| (project_id, amounts.into_iter().sum::<f64>()))
        .collect())
}

async fn fetch_all(source: &dyn DataSource, entity: Entity) -> Result<Vec<Record>, SourceError> {
    source
        .fetch(entity, None, entity_def(entity).default_sort)
        .await
}

fn support_amounts(
    rows: &[Record],
    status: Option<SupportStatus>,
) -> impl Iterator<Item = f64> + '_ {
    rows.iter().filter_map(move |record| {
        if let Record::Support(support) = record {
            if status.is_none() || status == Some(support.status) {
                return Some(support.amount);
            }
        }
        None
    })
}
