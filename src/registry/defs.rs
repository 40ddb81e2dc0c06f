//! Static field tables for every entity.

use super::{EntityDef, FieldDef, FieldKind, SortDirection, SortSpec};
use crate::model::Entity;

const FAMILY_STATUSES: &[&str] = &["active", "inactive", "pending"];
const REQUEST_STATUSES: &[&str] = &[
    "new",
    "in_review",
    "approved",
    "rejected",
    "completed",
    "cancelled",
];
const SUPPORT_STATUSES: &[&str] = &["pending", "completed", "cancelled"];
const PROJECT_STATUSES: &[&str] = &["planned", "active", "completed", "cancelled"];
const USER_STATUSES: &[&str] = &["active", "pending", "suspended"];

static FAMILY_FIELDS: [FieldDef; 13] = [
    FieldDef {
        name: "status",
        kind: FieldKind::Select,
        options: FAMILY_STATUSES,
    },
    FieldDef {
        name: "husband_last_name",
        kind: FieldKind::Text,
        options: &[],
    },
    FieldDef {
        name: "husband_first_name",
        kind: FieldKind::Text,
        options: &[],
    },
    FieldDef {
        name: "husband_id_number",
        kind: FieldKind::Text,
        options: &[],
    },
    FieldDef {
        name: "husband_phone",
        kind: FieldKind::Text,
        options: &[],
    },
    FieldDef {
        name: "husband_email",
        kind: FieldKind::Text,
        options: &[],
    },
    FieldDef {
        name: "wife_first_name",
        kind: FieldKind::Text,
        options: &[],
    },
    FieldDef {
        name: "wife_phone",
        kind: FieldKind::Text,
        options: &[],
    },
    FieldDef {
        name: "wife_email",
        kind: FieldKind::Text,
        options: &[],
    },
    FieldDef {
        name: "synagogue",
        kind: FieldKind::Text,
        options: &[],
    },
    FieldDef {
        name: "city",
        kind: FieldKind::Text,
        options: &[],
    },
    FieldDef {
        name: "children_count",
        kind: FieldKind::Number,
        options: &[],
    },
    FieldDef {
        name: "created_at",
        kind: FieldKind::Date,
        options: &[],
    },
];

static FAMILIES: EntityDef = EntityDef {
    entity: Entity::Families,
    fields: &FAMILY_FIELDS,
    search_fields: &[
        "husband_last_name",
        "husband_first_name",
        "wife_first_name",
        "husband_id_number",
        "husband_phone",
    ],
    statuses: FAMILY_STATUSES,
    contact_fields: &["husband_email", "wife_email"],
    default_sort: SortSpec {
        field: "created_at",
        direction: SortDirection::Desc,
    },
};

static CHILD_FIELDS: [FieldDef; 10] = [
    FieldDef {
        name: "family_id",
        kind: FieldKind::Text,
        options: &[],
    },
    FieldDef {
        name: "first_name",
        kind: FieldKind::Text,
        options: &[],
    },
    FieldDef {
        name: "last_name",
        kind: FieldKind::Text,
        options: &[],
    },
    FieldDef {
        name: "id_number",
        kind: FieldKind::Text,
        options: &[],
    },
    FieldDef {
        name: "birth_date",
        kind: FieldKind::Date,
        options: &[],
    },
    FieldDef {
        name: "gender",
        kind: FieldKind::Select,
        options: &["male", "female"],
    },
    FieldDef {
        name: "school",
        kind: FieldKind::Text,
        options: &[],
    },
    FieldDef {
        name: "tuition_fee",
        kind: FieldKind::Number,
        options: &[],
    },
    FieldDef {
        name: "is_married",
        kind: FieldKind::Bool,
        options: &[],
    },
    FieldDef {
        name: "created_at",
        kind: FieldKind::Date,
        options: &[],
    },
];

static CHILDREN: EntityDef = EntityDef {
    entity: Entity::Children,
    fields: &CHILD_FIELDS,
    search_fields: &["first_name", "last_name", "id_number"],
    statuses: &[],
    contact_fields: &[],
    default_sort: SortSpec {
        field: "created_at",
        direction: SortDirection::Desc,
    },
};

static FINANCIAL_FIELDS: [FieldDef; 10] = [
    FieldDef {
        name: "family_id",
        kind: FieldKind::Text,
        options: &[],
    },
    FieldDef {
        name: "year",
        kind: FieldKind::Number,
        options: &[],
    },
    FieldDef {
        name: "record_date",
        kind: FieldKind::Date,
        options: &[],
    },
    FieldDef {
        name: "husband_occupation",
        kind: FieldKind::Select,
        options: &["kollel", "employed", "self_employed", "unemployed"],
    },
    FieldDef {
        name: "wife_occupation",
        kind: FieldKind::Select,
        options: &["employed", "self_employed", "housewife"],
    },
    FieldDef {
        name: "total_monthly_income",
        kind: FieldKind::Number,
        options: &[],
    },
    FieldDef {
        name: "total_monthly_expenses",
        kind: FieldKind::Number,
        options: &[],
    },
    FieldDef {
        name: "owns_home",
        kind: FieldKind::Bool,
        options: &[],
    },
    FieldDef {
        name: "has_vehicle",
        kind: FieldKind::Bool,
        options: &[],
    },
    FieldDef {
        name: "created_at",
        kind: FieldKind::Date,
        options: &[],
    },
];

static FINANCIAL_STATUS: EntityDef = EntityDef {
    entity: Entity::FinancialStatus,
    fields: &FINANCIAL_FIELDS,
    search_fields: &[],
    statuses: &[],
    contact_fields: &[],
    default_sort: SortSpec {
        field: "record_date",
        direction: SortDirection::Desc,
    },
};

static REQUEST_FIELDS: [FieldDef; 15] = [
    FieldDef {
        name: "status",
        kind: FieldKind::Select,
        options: REQUEST_STATUSES,
    },
    FieldDef {
        name: "request_date",
        kind: FieldKind::Date,
        options: &[],
    },
    FieldDef {
        name: "purpose",
        kind: FieldKind::Text,
        options: &[],
    },
    FieldDef {
        name: "requested_amount",
        kind: FieldKind::Number,
        options: &[],
    },
    FieldDef {
        name: "approved_amount",
        kind: FieldKind::Number,
        options: &[],
    },
    FieldDef {
        name: "approval_date",
        kind: FieldKind::Date,
        options: &[],
    },
    FieldDef {
        name: "submitted_by",
        kind: FieldKind::Text,
        options: &[],
    },
    FieldDef {
        name: "is_self_request",
        kind: FieldKind::Bool,
        options: &[],
    },
    FieldDef {
        name: "needs_rights_assistance",
        kind: FieldKind::Bool,
        options: &[],
    },
    FieldDef {
        name: "needs_financial_coaching",
        kind: FieldKind::Bool,
        options: &[],
    },
    FieldDef {
        name: "family.husband_last_name",
        kind: FieldKind::Text,
        options: &[],
    },
    FieldDef {
        name: "family.husband_first_name",
        kind: FieldKind::Text,
        options: &[],
    },
    FieldDef {
        name: "family.husband_email",
        kind: FieldKind::Text,
        options: &[],
    },
    FieldDef {
        name: "family.wife_email",
        kind: FieldKind::Text,
        options: &[],
    },
    FieldDef {
        name: "created_at",
        kind: FieldKind::Date,
        options: &[],
    },
];

static SUPPORT_REQUESTS: EntityDef = EntityDef {
    entity: Entity::SupportRequests,
    fields: &REQUEST_FIELDS,
    search_fields: &[
        "family.husband_last_name",
        "family.husband_first_name",
        "purpose",
        "submitted_by",
    ],
    statuses: REQUEST_STATUSES,
    contact_fields: &["family.husband_email", "family.wife_email"],
    default_sort: SortSpec {
        field: "created_at",
        direction: SortDirection::Desc,
    },
};

static SUPPORT_FIELDS: [FieldDef; 12] = [
    FieldDef {
        name: "status",
        kind: FieldKind::Select,
        options: SUPPORT_STATUSES,
    },
    FieldDef {
        name: "amount",
        kind: FieldKind::Number,
        options: &[],
    },
    FieldDef {
        name: "support_date",
        kind: FieldKind::Date,
        options: &[],
    },
    FieldDef {
        name: "payment_method",
        kind: FieldKind::Select,
        options: &["transfer", "check", "cash", "voucher", "other"],
    },
    FieldDef {
        name: "support_type",
        kind: FieldKind::Text,
        options: &[],
    },
    FieldDef {
        name: "project",
        kind: FieldKind::Text,
        options: &[],
    },
    FieldDef {
        name: "description",
        kind: FieldKind::Text,
        options: &[],
    },
    FieldDef {
        name: "family.husband_last_name",
        kind: FieldKind::Text,
        options: &[],
    },
    FieldDef {
        name: "family.husband_first_name",
        kind: FieldKind::Text,
        options: &[],
    },
    FieldDef {
        name: "family.husband_email",
        kind: FieldKind::Text,
        options: &[],
    },
    FieldDef {
        name: "family.wife_email",
        kind: FieldKind::Text,
        options: &[],
    },
    FieldDef {
        name: "created_at",
        kind: FieldKind::Date,
        options: &[],
    },
];

static SUPPORTS: EntityDef = EntityDef {
    entity: Entity::Supports,
    fields: &SUPPORT_FIELDS,
    search_fields: &[
        "family.husband_last_name",
        "family.husband_first_name",
        "description",
    ],
    statuses: SUPPORT_STATUSES,
    contact_fields: &["family.husband_email", "family.wife_email"],
    default_sort: SortSpec {
        field: "support_date",
        direction: SortDirection::Desc,
    },
};

static NOTE_FIELDS: [FieldDef; 4] = [
    FieldDef {
        name: "family_id",
        kind: FieldKind::Text,
        options: &[],
    },
    FieldDef {
        name: "content",
        kind: FieldKind::Text,
        options: &[],
    },
    FieldDef {
        name: "created_by",
        kind: FieldKind::Text,
        options: &[],
    },
    FieldDef {
        name: "created_at",
        kind: FieldKind::Date,
        options: &[],
    },
];

static NOTES: EntityDef = EntityDef {
    entity: Entity::Notes,
    fields: &NOTE_FIELDS,
    search_fields: &["content"],
    statuses: &[],
    contact_fields: &[],
    default_sort: SortSpec {
        field: "created_at",
        direction: SortDirection::Desc,
    },
};

static CITY_FIELDS: [FieldDef; 2] = [
    FieldDef {
        name: "name",
        kind: FieldKind::Text,
        options: &[],
    },
    FieldDef {
        name: "name_en",
        kind: FieldKind::Text,
        options: &[],
    },
];

static CITIES: EntityDef = EntityDef {
    entity: Entity::Cities,
    fields: &CITY_FIELDS,
    search_fields: &["name", "name_en"],
    statuses: &[],
    contact_fields: &[],
    default_sort: SortSpec {
        field: "name",
        direction: SortDirection::Asc,
    },
};

static STREET_FIELDS: [FieldDef; 1] = [FieldDef {
    name: "name",
    kind: FieldKind::Text,
    options: &[],
}];

static STREETS: EntityDef = EntityDef {
    entity: Entity::Streets,
    fields: &STREET_FIELDS,
    search_fields: &["name"],
    statuses: &[],
    contact_fields: &[],
    default_sort: SortSpec {
        field: "name",
        direction: SortDirection::Asc,
    },
};

static COMMUNITY_FIELDS: [FieldDef; 1] = [FieldDef {
    name: "name",
    kind: FieldKind::Text,
    options: &[],
}];

static COMMUNITIES: EntityDef = EntityDef {
    entity: Entity::Communities,
    fields: &COMMUNITY_FIELDS,
    search_fields: &["name"],
    statuses: &[],
    contact_fields: &[],
    default_sort: SortSpec {
        field: "name",
        direction: SortDirection::Asc,
    },
};

static SUPPORT_TYPE_FIELDS: [FieldDef; 2] = [
    FieldDef {
        name: "name",
        kind: FieldKind::Text,
        options: &[],
    },
    FieldDef {
        name: "description",
        kind: FieldKind::Text,
        options: &[],
    },
];

static SUPPORT_TYPES: EntityDef = EntityDef {
    entity: Entity::SupportTypes,
    fields: &SUPPORT_TYPE_FIELDS,
    search_fields: &["name"],
    statuses: &[],
    contact_fields: &[],
    default_sort: SortSpec {
        field: "name",
        direction: SortDirection::Asc,
    },
};

static PROJECT_FIELDS: [FieldDef; 7] = [
    FieldDef {
        name: "name",
        kind: FieldKind::Text,
        options: &[],
    },
    FieldDef {
        name: "status",
        kind: FieldKind::Select,
        options: PROJECT_STATUSES,
    },
    FieldDef {
        name: "budget",
        kind: FieldKind::Number,
        options: &[],
    },
    FieldDef {
        name: "spent",
        kind: FieldKind::Number,
        options: &[],
    },
    FieldDef {
        name: "start_date",
        kind: FieldKind::Date,
        options: &[],
    },
    FieldDef {
        name: "end_date",
        kind: FieldKind::Date,
        options: &[],
    },
    FieldDef {
        name: "created_at",
        kind: FieldKind::Date,
        options: &[],
    },
];

static PROJECTS: EntityDef = EntityDef {
    entity: Entity::Projects,
    fields: &PROJECT_FIELDS,
    search_fields: &["name"],
    statuses: PROJECT_STATUSES,
    contact_fields: &[],
    default_sort: SortSpec {
        field: "created_at",
        direction: SortDirection::Desc,
    },
};

static DONOR_FIELDS: [FieldDef; 5] = [
    FieldDef {
        name: "name",
        kind: FieldKind::Text,
        options: &[],
    },
    FieldDef {
        name: "phone",
        kind: FieldKind::Text,
        options: &[],
    },
    FieldDef {
        name: "email",
        kind: FieldKind::Text,
        options: &[],
    },
    FieldDef {
        name: "address",
        kind: FieldKind::Text,
        options: &[],
    },
    FieldDef {
        name: "created_at",
        kind: FieldKind::Date,
        options: &[],
    },
];

static DONORS: EntityDef = EntityDef {
    entity: Entity::Donors,
    fields: &DONOR_FIELDS,
    search_fields: &["name", "phone", "email"],
    statuses: &[],
    contact_fields: &["email"],
    default_sort: SortSpec {
        field: "name",
        direction: SortDirection::Asc,
    },
};

static USER_FIELDS: [FieldDef; 5] = [
    FieldDef {
        name: "email",
        kind: FieldKind::Text,
        options: &[],
    },
    FieldDef {
        name: "full_name",
        kind: FieldKind::Text,
        options: &[],
    },
    FieldDef {
        name: "role",
        kind: FieldKind::Select,
        options: &["admin", "manager", "user", "viewer"],
    },
    FieldDef {
        name: "status",
        kind: FieldKind::Select,
        options: USER_STATUSES,
    },
    FieldDef {
        name: "created_at",
        kind: FieldKind::Date,
        options: &[],
    },
];

static USERS: EntityDef = EntityDef {
    entity: Entity::Users,
    fields: &USER_FIELDS,
    search_fields: &["email", "full_name"],
    statuses: USER_STATUSES,
    contact_fields: &["email"],
    default_sort: SortSpec {
        field: "created_at",
        direction: SortDirection::Desc,
    },
};

pub(super) fn lookup(entity: Entity) -> &'static EntityDef {
    match entity {
        Entity::Families => &FAMILIES,
        Entity::Children => &CHILDREN,
        Entity::FinancialStatus => &FINANCIAL_STATUS,
        Entity::SupportRequests => &SUPPORT_REQUESTS,
        Entity::Supports => &SUPPORTS,
        Entity::Notes => &NOTES,
        Entity::Cities => &CITIES,
        Entity::Streets => &STREETS,
        Entity::Communities => &COMMUNITIES,
        Entity::SupportTypes => &SUPPORT_TYPES,
        Entity::Projects => &PROJECTS,
        Entity::Donors => &DONORS,
        Entity::Users => &USERS,
    }
}
