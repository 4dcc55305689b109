use chrono::Datelike;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Rate};

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

/// Retirement philosophy; selects the corpus model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RetirementMode {
    #[default]
    Traditional,
    Fire,
    #[serde(alias = "fat_fire")]
    FatFire,
    Coast,
    Barista,
}

// ---------------------------------------------------------------------------
// Household
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub age: u32,
    pub retirement_age: u32,
}

/// Macroeconomic assumptions. Every field is optional; missing values are
/// filled in by [`crate::plan::resolve`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Assumptions {
    pub inflation: Option<Rate>,
    pub pre_retirement_return: Option<Rate>,
    pub post_retirement_return: Option<Rate>,
    /// Safe withdrawal rate (FIRE modes)
    pub swr: Option<Rate>,
    pub buffer: Option<Rate>,
    pub step_up_sip: Option<Rate>,
    pub salary_growth: Option<Rate>,
    /// Overrides the household retirement age when set.
    pub fi_age: Option<u32>,
    /// Barista FIRE: age at which part-time work stops.
    pub full_retirement_age: Option<u32>,
}

// ---------------------------------------------------------------------------
// Assets
// ---------------------------------------------------------------------------

/// Asset class presets with their default expected returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetCategory {
    Epf,
    Ppf,
    Nps,
    MfEquity,
    MfDebt,
    MfHybrid,
    Stocks,
    Fd,
    Cash,
    Gold,
    RealEstate,
    Other,
}

impl AssetCategory {
    pub fn default_return(self) -> Rate {
        match self {
            AssetCategory::Epf => dec!(0.081),
            AssetCategory::Ppf => dec!(0.071),
            AssetCategory::Nps => dec!(0.10),
            AssetCategory::MfEquity => dec!(0.12),
            AssetCategory::MfDebt => dec!(0.07),
            AssetCategory::MfHybrid => dec!(0.10),
            AssetCategory::Stocks => dec!(0.12),
            AssetCategory::Fd => dec!(0.065),
            AssetCategory::Cash => dec!(0.04),
            AssetCategory::Gold => dec!(0.08),
            AssetCategory::RealEstate => dec!(0.08),
            AssetCategory::Other => dec!(0.08),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub current_value: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<AssetCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_override: Option<Rate>,
    /// Absent means liquid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_liquid: Option<bool>,
}

impl Asset {
    /// Only liquid, positive holdings can fund the corpus.
    pub fn participates(&self) -> bool {
        self.is_liquid != Some(false) && self.current_value > Decimal::ZERO
    }
}

// ---------------------------------------------------------------------------
// Expenses and goals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpenseKind {
    #[serde(rename = "monthly_living", alias = "monthly")]
    MonthlyLiving,
    #[serde(rename = "onetime", alias = "one-time")]
    OneTime,
    #[serde(rename = "yearly")]
    Yearly,
}

/// Whether an amount is stated in today's money or is already future-valued.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmountMode {
    #[default]
    Today,
    Future,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: ExpenseKind,
    pub amount: Money,
    #[serde(default)]
    pub amount_mode: AmountMode,
    /// Annual growth of a recurring goal; inflation when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escalation: Option<Rate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_year: Option<i32>,
}

// ---------------------------------------------------------------------------
// Income
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncomeKind {
    #[serde(alias = "part_time")]
    Parttime,
    Pension,
    Rental,
    Other,
}

/// Post-retirement income; `amount` is monthly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeStream {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: IncomeKind,
    pub amount: Money,
    pub start_age: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_age: Option<u32>,
}

// ---------------------------------------------------------------------------
// Plan
// ---------------------------------------------------------------------------

fn default_life_expectancy() -> u32 {
    85
}

fn default_current_year() -> i32 {
    chrono::Utc::now().year()
}

/// Everything the engine needs for one calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetirementPlanInput {
    #[serde(default)]
    pub mode: RetirementMode,
    pub person_a: Person,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_b: Option<Person>,
    #[serde(default = "default_life_expectancy")]
    pub life_expectancy: u32,
    /// Calendar year goal years are measured from.
    #[serde(default = "default_current_year")]
    pub current_year: i32,
    #[serde(default)]
    pub assumptions: Assumptions,
    #[serde(default)]
    pub assets: Vec<Asset>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub income_streams: Vec<IncomeStream>,
    /// Current monthly contribution.
    #[serde(default)]
    pub existing_sip: Money,
}
