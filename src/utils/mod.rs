use chrono::NaiveDate;
use sha2::{Digest, Sha256};

/// Get current timestamp in ISO 8601 format
#[must_use]
pub fn now_iso() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Get today's calendar date (UTC)
#[must_use]
pub fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

/// Parse a calendar date from a plain date or an ISO timestamp
/// (e.g. "2024-01-15" or "2024-01-15T10:30:00Z").
#[must_use]
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let date_part = value.split('T').next().unwrap_or(value);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Compute SHA-256 hash of a string
#[must_use]
pub fn compute_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}
