use thiserror::Error;

use super::columns::{
    CHILD_EXPORT_HEADERS, FAMILY_EXPORT_HEADERS, REQUEST_EXPORT_HEADERS, SUPPORT_EXPORT_HEADERS,
};
use crate::model::{Entity, FamilyRef, Record};
use crate::utils::{parse_date, today};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("export is not supported for {0}")]
    Unsupported(Entity),
    #[error("csv write error: {0}")]
    Csv(#[from] csv::Error),
    #[error("csv write error: {0}")]
    Io(#[from] std::io::Error),
    #[error("exported csv is not valid utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// A finished export, ready to hand to the download layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    /// `<entity>_<date>.csv`
    pub file_name: String,
    pub content: String,
}

type CellsFn = fn(&Record) -> Option<Vec<String>>;

/// Render the given rows, usually a filtered fetch, as a CSV file.
///
/// Rows of the wrong entity are skipped rather than rejected, so a
/// caller can pass a mixed slice without pre-sorting it.
pub fn export_rows(entity: Entity, rows: &[Record]) -> Result<CsvExport, ExportError> {
    let (headers, cells) = layout(entity)?;
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(headers)?;
    for record in rows {
        if let Some(row) = cells(record) {
            writer.write_record(&row)?;
        }
    }
    let bytes = writer
        .into_inner()
        .map_err(|error| ExportError::Io(error.into_error()))?;
    let content = String::from_utf8(bytes)?;
    Ok(CsvExport {
        file_name: format!("{}_{}.csv", entity.as_str(), today()),
        content,
    })
}

fn layout(entity: Entity) -> Result<(&'static [&'static str], CellsFn), ExportError> {
    match entity {
        Entity::Families => Ok((FAMILY_EXPORT_HEADERS.as_slice(), family_cells)),
        Entity::Children => Ok((CHILD_EXPORT_HEADERS.as_slice(), child_cells)),
        Entity::Supports => Ok((SUPPORT_EXPORT_HEADERS.as_slice(), support_cells)),
        Entity::SupportRequests => Ok((REQUEST_EXPORT_HEADERS.as_slice(), request_cells)),
        Entity::FinancialStatus
        | Entity::Notes
        | Entity::Cities
        | Entity::Streets
        | Entity::Communities
        | Entity::SupportTypes
        | Entity::Projects
        | Entity::Donors
        | Entity::Users => Err(ExportError::Unsupported(entity)),
    }
}

fn family_cells(record: &Record) -> Option<Vec<String>> {
    let Record::Family(family) = record else {
        return None;
    };
    Some(vec![
        family.id.clone(),
        family.husband_last_name.clone(),
        opt(&family.husband_first_name),
        opt(&family.husband_id_number),
        opt(&family.husband_phone),
        opt(&family.wife_first_name),
        opt(&family.wife_id_number),
        opt(&family.wife_phone),
        opt(&family.home_phone),
        family
            .city
            .as_ref()
            .map_or_else(String::new, |city| city.name.clone()),
        opt(&family.house_number),
        family.status.as_str().to_string(),
        iso_date(&family.created_at),
    ])
}

fn child_cells(record: &Record) -> Option<Vec<String>> {
    let Record::Child(child) = record else {
        return None;
    };
    Some(vec![
        child.id.clone(),
        child.family_id.clone(),
        child.first_name.clone(),
        opt(&child.last_name),
        opt(&child.id_number),
        child
            .birth_date
            .map_or_else(String::new, |date| date.to_string()),
        child
            .gender
            .map_or_else(String::new, |gender| gender.as_str().to_string()),
        opt(&child.school),
        child.tuition_fee.to_string(),
    ])
}

fn support_cells(record: &Record) -> Option<Vec<String>> {
    let Record::Support(support) = record else {
        return None;
    };
    Some(vec![
        support.id.clone(),
        support
            .family
            .as_ref()
            .map_or_else(String::new, FamilyRef::display_name),
        support
            .support_type
            .as_ref()
            .map_or_else(String::new, |kind| kind.name.clone()),
        support
            .project
            .as_ref()
            .map_or_else(String::new, |project| project.name.clone()),
        support.amount.to_string(),
        support.support_date.to_string(),
        support
            .payment_method
            .map_or_else(String::new, |method| method.as_str().to_string()),
        support.status.as_str().to_string(),
        opt(&support.description),
    ])
}

fn request_cells(record: &Record) -> Option<Vec<String>> {
    let Record::SupportRequest(request) = record else {
        return None;
    };
    Some(vec![
        request.id.clone(),
        request
            .family
            .as_ref()
            .map_or_else(String::new, FamilyRef::display_name),
        request.request_date.to_string(),
        opt(&request.purpose),
        request
            .requested_amount
            .map_or_else(String::new, |amount| amount.to_string()),
        request.status.as_str().to_string(),
    ])
}

fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// Date portion of a timestamp string; the raw value when it does not parse.
fn iso_date(stamp: &str) -> String {
    parse_date(stamp).map_or_else(|| stamp.to_string(), |date| date.to_string())
}
