use serde_json::Value;

use super::SourceError;
use crate::model::Record;

/// Fields no patch may touch; the data source owns them.
const PROTECTED_FIELDS: [&str; 3] = ["id", "created_at", "updated_at"];

/// Apply an RFC 7386 merge patch to a record and revalidate the result
/// through the entity's typed schema.
///
/// A `null` value clears an optional field. Unknown fields, protected
/// fields and wrongly typed values are rejected; the input record is
/// never modified.
pub fn apply_patch(record: &Record, patch: &Value) -> Result<Record, SourceError> {
    let Some(fields) = patch.as_object() else {
        return Err(SourceError::InvalidPatch(
            "patch must be a JSON object".to_string(),
        ));
    };
    for field in PROTECTED_FIELDS {
        if fields.contains_key(field) {
            return Err(SourceError::InvalidPatch(format!(
                "field `{field}` cannot be patched"
            )));
        }
    }
    let mut doc = record
        .to_value()
        .map_err(|e| SourceError::Backend(e.to_string()))?;
    json_patch::merge(&mut doc, patch);
    Record::from_value(record.entity(), doc)
        .map_err(|e| SourceError::InvalidPatch(e.to_string()))
}
