//! Yearly financial status questionnaires.

use serde::{Deserialize, Serialize};

use crate::filter::Scalar;
use crate::utils::parse_date;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HusbandOccupation {
    Kollel,
    Employed,
    SelfEmployed,
    Unemployed,
}

impl HusbandOccupation {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Kollel => "kollel",
            Self::Employed => "employed",
            Self::SelfEmployed => "self_employed",
            Self::Unemployed => "unemployed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WifeOccupation {
    Employed,
    SelfEmployed,
    Housewife,
}

impl WifeOccupation {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Employed => "employed",
            Self::SelfEmployed => "self_employed",
            Self::Housewife => "housewife",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KollelType {
    FullDay,
    HalfDay,
}

impl KollelType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FullDay => "full_day",
            Self::HalfDay => "half_day",
        }
    }
}

/// One family's financial questionnaire for a given year.
///
/// Monetary amounts are monthly shekel figures and default to zero when
/// the questionnaire leaves them blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
#[allow(clippy::struct_excessive_bools)]
pub struct FinancialStatus {
    pub id: String,
    pub family_id: String,
    pub year: i32,
    pub record_date: chrono::NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub husband_occupation: Option<HusbandOccupation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub husband_workplace: Option<String>,
    #[serde(default)]
    pub husband_income: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kollel_type: Option<KollelType>,
    #[serde(default)]
    pub kollel_two_sessions: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kollel_name: Option<String>,
    #[serde(default)]
    pub kollel_stipend: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kollel_name_2: Option<String>,
    #[serde(default)]
    pub kollel_stipend_2: f64,
    #[serde(default)]
    pub other_kollel_income: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wife_occupation: Option<WifeOccupation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wife_workplace: Option<String>,
    #[serde(default)]
    pub wife_income: f64,
    #[serde(default)]
    pub child_allowance: f64,
    #[serde(default)]
    pub income_support: f64,
    #[serde(default)]
    pub rent_assistance: f64,
    #[serde(default)]
    pub disability_allowance: f64,
    #[serde(default)]
    pub unemployment: f64,
    #[serde(default)]
    pub alimony: f64,
    #[serde(default)]
    pub survivors: f64,
    #[serde(default)]
    pub senior_allowance: f64,
    #[serde(default)]
    pub other_allowance: f64,
    #[serde(default)]
    pub rental_income: f64,
    #[serde(default)]
    pub scholarship_income: f64,
    #[serde(default)]
    pub food_vouchers: f64,
    #[serde(default)]
    pub charity_support: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charity_support_name: Option<String>,
    #[serde(default)]
    pub family_support: f64,
    #[serde(default)]
    pub other_income: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_income_description: Option<String>,
    #[serde(default)]
    pub owns_home: bool,
    #[serde(default)]
    pub rent_amount: f64,
    #[serde(default)]
    pub mortgage_amount: f64,
    #[serde(default)]
    pub has_additional_property: bool,
    #[serde(default)]
    pub additional_property_mortgage: f64,
    #[serde(default)]
    pub additional_property_income: f64,
    #[serde(default)]
    pub bank_debts: f64,
    #[serde(default)]
    pub bank_monthly_payment: f64,
    #[serde(default)]
    pub gmach_debts: f64,
    #[serde(default)]
    pub gmach_monthly_payment: f64,
    #[serde(default)]
    pub private_debts: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debt_reason: Option<String>,
    #[serde(default)]
    pub medical_expenses: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medical_details: Option<String>,
    #[serde(default)]
    pub has_vehicle: bool,
    #[serde(default)]
    pub has_savings: bool,
    #[serde(default)]
    pub savings_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub savings_details: Option<String>,
    #[serde(default)]
    pub total_monthly_income: f64,
    #[serde(default)]
    pub total_monthly_expenses: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl FinancialStatus {
    #[must_use]
    pub fn field_value(&self, field: &str) -> Option<Scalar> {
        match field {
            "family_id" => Some(Scalar::Text(self.family_id.clone())),
            "year" => Some(Scalar::Number(f64::from(self.year))),
            "record_date" => Some(Scalar::Date(self.record_date)),
            "husband_occupation" => self
                .husband_occupation
                .map(|o| Scalar::Text(o.as_str().to_string())),
            "wife_occupation" => self
                .wife_occupation
                .map(|o| Scalar::Text(o.as_str().to_string())),
            "total_monthly_income" => Some(Scalar::Number(self.total_monthly_income)),
            "total_monthly_expenses" => Some(Scalar::Number(self.total_monthly_expenses)),
            "owns_home" => Some(Scalar::Bool(self.owns_home)),
            "has_vehicle" => Some(Scalar::Bool(self.has_vehicle)),
            "created_at" => parse_date(&self.created_at).map(Scalar::Date),
            _ => None,
        }
    }
}
