use std::fmt;

use serde::{Deserialize, Serialize};

use super::ast::Scalar;
use super::FilterError;
use crate::registry::{EntityDef, FieldKind};

/// Operators the filter rows offer, before compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOperator {
    Contains,
    NotContains,
    Equals,
    StartsWith,
    EndsWith,
    GreaterThan,
    LessThan,
    GreaterEqual,
    LessEqual,
    Between,
    After,
    Before,
    IsEmpty,
    IsNotEmpty,
}

impl FilterOperator {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Contains => "contains",
            Self::NotContains => "not_contains",
            Self::Equals => "equals",
            Self::StartsWith => "starts_with",
            Self::EndsWith => "ends_with",
            Self::GreaterThan => "greater_than",
            Self::LessThan => "less_than",
            Self::GreaterEqual => "greater_equal",
            Self::LessEqual => "less_equal",
            Self::Between => "between",
            Self::After => "after",
            Self::Before => "before",
            Self::IsEmpty => "is_empty",
            Self::IsNotEmpty => "is_not_empty",
        }
    }

    /// Emptiness tests take no value; everything else needs one.
    #[must_use]
    pub const fn needs_value(self) -> bool {
        !matches!(self, Self::IsEmpty | Self::IsNotEmpty)
    }

    /// Only `between` takes a second value.
    #[must_use]
    pub const fn needs_second_value(self) -> bool {
        matches!(self, Self::Between)
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The operator menu for a field kind. Order matters: the first entry
/// is the default after a field change.
#[must_use]
pub const fn operators_for(kind: FieldKind) -> &'static [FilterOperator] {
    match kind {
        FieldKind::Text => &[
            FilterOperator::Contains,
            FilterOperator::NotContains,
            FilterOperator::Equals,
            FilterOperator::StartsWith,
            FilterOperator::EndsWith,
            FilterOperator::IsEmpty,
            FilterOperator::IsNotEmpty,
        ],
        FieldKind::Number => &[
            FilterOperator::Equals,
            FilterOperator::GreaterThan,
            FilterOperator::LessThan,
            FilterOperator::GreaterEqual,
            FilterOperator::LessEqual,
            FilterOperator::Between,
            FilterOperator::IsEmpty,
            FilterOperator::IsNotEmpty,
        ],
        FieldKind::Date => &[
            FilterOperator::Equals,
            FilterOperator::After,
            FilterOperator::Before,
            FilterOperator::Between,
            FilterOperator::IsEmpty,
            FilterOperator::IsNotEmpty,
        ],
        FieldKind::Select | FieldKind::Bool => &[
            FilterOperator::Equals,
            FilterOperator::IsEmpty,
            FilterOperator::IsNotEmpty,
        ],
    }
}

/// The default operator for a field kind, the first menu entry.
#[must_use]
pub const fn default_operator(kind: FieldKind) -> FilterOperator {
    match kind {
        FieldKind::Text => FilterOperator::Contains,
        FieldKind::Number | FieldKind::Date | FieldKind::Select | FieldKind::Bool => {
            FilterOperator::Equals
        }
    }
}

/// One filter row the operator builds up interactively.
///
/// Fields are private so every mutation path revalidates against the
/// entity's registry definition; a predicate can never name an
/// undeclared field or pair an operator with the wrong field kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterPredicate {
    field: String,
    kind: FieldKind,
    operator: FilterOperator,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value2: Option<Scalar>,
}

impl FilterPredicate {
    /// Create a predicate on a declared field, with the kind's default
    /// operator and no value yet.
    pub fn new(def: &EntityDef, field: &str) -> Result<Self, FilterError> {
        let field_def = def.field(field).ok_or_else(|| FilterError::UnknownField {
            entity: def.entity,
            field: field.to_string(),
        })?;
        Ok(Self {
            field: field_def.name.to_string(),
            kind: field_def.kind,
            operator: default_operator(field_def.kind),
            value: None,
            value2: None,
        })
    }

    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        self.kind
    }

    #[must_use]
    pub const fn operator(&self) -> FilterOperator {
        self.operator
    }

    #[must_use]
    pub const fn value(&self) -> Option<&Scalar> {
        self.value.as_ref()
    }

    #[must_use]
    pub const fn value2(&self) -> Option<&Scalar> {
        self.value2.as_ref()
    }

    /// Repoint the predicate at another declared field. The operator
    /// resets to the new kind's default and both values are cleared.
    pub fn set_field(&mut self, def: &EntityDef, field: &str) -> Result<(), FilterError> {
        let field_def = def.field(field).ok_or_else(|| FilterError::UnknownField {
            entity: def.entity,
            field: field.to_string(),
        })?;
        self.field = field_def.name.to_string();
        self.kind = field_def.kind;
        self.operator = default_operator(field_def.kind);
        self.value = None;
        self.value2 = None;
        Ok(())
    }

    /// Switch the operator within the field kind's menu. Values are
    /// cleared because the old ones may no longer apply.
    pub fn set_operator(&mut self, operator: FilterOperator) -> Result<(), FilterError> {
        if !operators_for(self.kind).contains(&operator) {
            return Err(FilterError::OperatorMismatch {
                operator,
                kind: self.kind,
            });
        }
        self.operator = operator;
        self.value = None;
        self.value2 = None;
        Ok(())
    }

    pub fn set_value(&mut self, value: Option<Scalar>) -> Result<(), FilterError> {
        if let Some(v) = &value {
            if !v.matches_kind(self.kind) {
                return Err(FilterError::ValueMismatch {
                    field: self.field.clone(),
                    kind: self.kind,
                });
            }
        }
        self.value = value;
        Ok(())
    }

    pub fn set_value2(&mut self, value2: Option<Scalar>) -> Result<(), FilterError> {
        if let Some(v) = &value2 {
            if !v.matches_kind(self.kind) {
                return Err(FilterError::ValueMismatch {
                    field: self.field.clone(),
                    kind: self.kind,
                });
            }
        }
        self.value2 = value2;
        Ok(())
    }

    /// Whether the predicate participates in compilation.
    ///
    /// Emptiness tests are always active. `between` needs both values.
    /// A blank text value (empty or whitespace) leaves the row
    /// inactive; the number zero and `false` are real values.
    #[must_use]
    pub fn is_active(&self) -> bool {
        if !self.operator.needs_value() {
            return true;
        }
        let Some(value) = &self.value else {
            return false;
        };
        if is_blank(value) {
            return false;
        }
        if self.operator.needs_second_value() {
            match &self.value2 {
                Some(value2) => !is_blank(value2),
                None => false,
            }
        } else {
            true
        }
    }
}

fn is_blank(value: &Scalar) -> bool {
    match value {
        Scalar::Text(s) => s.trim().is_empty(),
        Scalar::Number(_) | Scalar::Date(_) | Scalar::Bool(_) => false,
    }
}
