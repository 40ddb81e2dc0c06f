//! Column vocabulary shared by the spreadsheet import and export.
//!
//! Legacy files carry Hebrew headers, in both spaced and underscored
//! spellings; the records keep the English field names.

/// One import column: target field plus the accepted header spellings.
pub(super) struct ColumnAlias {
    pub field: &'static str,
    pub spaced: &'static str,
    pub underscored: &'static str,
}

const fn alias(
    field: &'static str,
    spaced: &'static str,
    underscored: &'static str,
) -> ColumnAlias {
    ColumnAlias {
        field,
        spaced,
        underscored,
    }
}

/// Plain-text family columns. Status is translated separately.
#[allow(clippy::non_ascii_literal)]
pub(super) const FAMILY_COLUMNS: [ColumnAlias; 9] = [
    alias("husband_last_name", "שם משפחה", "שם_משפחה"),
    alias("husband_first_name", "שם פרטי בעל", "שם_פרטי_בעל"),
    alias("husband_id_number", "ת.ז. בעל", "תז_בעל"),
    alias("husband_phone", "טלפון בעל", "טלפון_בעל"),
    alias("wife_first_name", "שם פרטי אשה", "שם_פרטי_אשה"),
    alias("wife_id_number", "ת.ז. אשה", "תז_אשה"),
    alias("wife_phone", "טלפון אשה", "טלפון_אשה"),
    alias("home_phone", "טלפון בית", "טלפון_בית"),
    alias("house_number", "מספר בית", "מספר_בית"),
];

#[allow(clippy::non_ascii_literal)]
pub(super) const FAMILY_STATUS: ColumnAlias = alias("status", "סטטוס", "סטטוס");

/// Plain-text child columns. Family id, birth date, gender and tuition
/// get dedicated handling.
#[allow(clippy::non_ascii_literal)]
pub(super) const CHILD_COLUMNS: [ColumnAlias; 4] = [
    alias("first_name", "שם פרטי", "שם_פרטי"),
    alias("last_name", "שם משפחה", "שם_משפחה"),
    alias("id_number", "ת.ז.", "תז"),
    alias("school", "מוסד לימודים", "מוסד_לימודים"),
];

#[allow(clippy::non_ascii_literal)]
pub(super) const CHILD_FAMILY_ID: ColumnAlias = alias("family_id", "מזהה משפחה", "מזהה_משפחה");

#[allow(clippy::non_ascii_literal)]
pub(super) const CHILD_BIRTH_DATE: ColumnAlias = alias("birth_date", "תאריך לידה", "תאריך_לידה");

#[allow(clippy::non_ascii_literal)]
pub(super) const CHILD_GENDER: ColumnAlias = alias("gender", "מגדר", "מגדר");

#[allow(clippy::non_ascii_literal)]
pub(super) const CHILD_TUITION: ColumnAlias = alias("tuition_fee", "שכ\"ל חודשי", "שכל_חודשי");

/// Legacy files carry Hebrew status words.
#[allow(clippy::non_ascii_literal)]
pub(super) fn family_status(value: &str) -> &'static str {
    match value {
        "פעיל" => "active",
        "לא פעיל" => "inactive",
        _ => "pending",
    }
}

#[allow(clippy::non_ascii_literal)]
pub(super) fn child_gender(value: &str) -> Option<&'static str> {
    match value {
        "זכר" => Some("male"),
        "נקבה" => Some("female"),
        _ => None,
    }
}

#[allow(clippy::non_ascii_literal)]
pub(super) const FAMILY_EXPORT_HEADERS: [&str; 13] = [
    "מזהה",
    "שם משפחה",
    "שם פרטי בעל",
    "ת.ז. בעל",
    "טלפון בעל",
    "שם פרטי אשה",
    "ת.ז. אשה",
    "טלפון אשה",
    "טלפון בית",
    "עיר",
    "מספר בית",
    "סטטוס",
    "תאריך יצירה",
];

#[allow(clippy::non_ascii_literal)]
pub(super) const CHILD_EXPORT_HEADERS: [&str; 9] = [
    "מזהה",
    "מזהה משפחה",
    "שם פרטי",
    "שם משפחה",
    "ת.ז.",
    "תאריך לידה",
    "מגדר",
    "מוסד לימודים",
    "שכ\"ל חודשי",
];

#[allow(clippy::non_ascii_literal)]
pub(super) const SUPPORT_EXPORT_HEADERS: [&str; 9] = [
    "מזהה",
    "משפחה",
    "סוג תמיכה",
    "פרויקט",
    "סכום",
    "תאריך",
    "אופן מתן",
    "סטטוס",
    "תיאור",
];

#[allow(clippy::non_ascii_literal)]
pub(super) const REQUEST_EXPORT_HEADERS: [&str; 6] = [
    "מזהה",
    "משפחה",
    "תאריך בקשה",
    "מטרה",
    "סכום מבוקש",
    "סטטוס",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_status_words() {
        assert_eq!(family_status("פעיל"), "active");
        assert_eq!(family_status("לא פעיל"), "inactive");
        assert_eq!(family_status("משהו אחר"), "pending");
        assert_eq!(family_status(""), "pending");
    }

    #[test]
    fn test_child_gender_words() {
        assert_eq!(child_gender("זכר"), Some("male"));
        assert_eq!(child_gender("נקבה"), Some("female"));
        assert_eq!(child_gender("לא ידוע"), None);
    }

    #[test]
    fn test_alias_spellings_differ_only_in_separator() {
        for column in &FAMILY_COLUMNS {
            assert_eq!(
                column.spaced.replace(['.', ' '], ""),
                column.underscored.replace('_', ""),
                "alias spellings for {} should agree",
                column.field
            );
        }
    }
}
