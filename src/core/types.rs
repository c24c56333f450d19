use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures the calculation functions can report. The tool boundary converts
/// these into structured replies; they are never allowed to escape as panics.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("unsupported strategy: {0}")]
    UnsupportedStrategy(String),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaritalStatus {
    Single,
    Married,
}

impl MaritalStatus {
    pub fn label(self) -> &'static str {
        match self {
            MaritalStatus::Single => "single",
            MaritalStatus::Married => "married",
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTolerance {
    Conservative,
    Moderate,
    Aggressive,
}

impl RiskTolerance {
    /// Nominal annual return assumed when no explicit allocation is on file.
    pub fn expected_annual_return(self) -> f64 {
        match self {
            RiskTolerance::Conservative => 0.05,
            RiskTolerance::Moderate => 0.07,
            RiskTolerance::Aggressive => 0.09,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskTolerance::Conservative => "conservative",
            RiskTolerance::Moderate => "moderate",
            RiskTolerance::Aggressive => "aggressive",
        }
    }
}

/// Percentages across the four asset classes; valid when they sum to 100
/// within a small tolerance and no component is negative.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetAllocation {
    pub us_stocks: f64,
    pub international_stocks: f64,
    pub bonds: f64,
    pub cash: f64,
}

impl AssetAllocation {
    pub fn total(&self) -> f64 {
        self.us_stocks + self.international_stocks + self.bonds + self.cash
    }

    pub fn stock_percentage(&self) -> f64 {
        self.us_stocks + self.international_stocks
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeFlowKind {
    SocialSecurity,
    Pension,
    Annuity,
    PartTimeWork,
    Other,
}

impl IncomeFlowKind {
    pub fn label(self) -> &'static str {
        match self {
            IncomeFlowKind::SocialSecurity => "Social Security",
            IncomeFlowKind::Pension => "pension",
            IncomeFlowKind::Annuity => "annuity",
            IncomeFlowKind::PartTimeWork => "part-time work",
            IncomeFlowKind::Other => "other income",
        }
    }
}

/// A guaranteed income stream. `start_age` is inclusive, `end_age` exclusive;
/// an absent end means the flow pays for life.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeFlow {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: IncomeFlowKind,
    pub monthly_amount: f64,
    pub start_age: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_age: Option<u32>,
    pub inflation_adjusted: bool,
}

impl IncomeFlow {
    pub fn pays_at(&self, age: u32) -> bool {
        age >= self.start_age && self.end_age.is_none_or(|end| age < end)
    }
}

/// The single persisted record. Owned by the profile store; the engine only
/// ever sees a snapshot passed into a calculation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub age: u32,
    pub target_retirement_age: u32,
    pub marital_status: MaritalStatus,
    pub current_savings: f64,
    pub monthly_contribution: f64,
    pub risk_tolerance: RiskTolerance,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_allocation: Option<AssetAllocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_monthly_expenses: Option<f64>,
    #[serde(default)]
    pub income_flows: Vec<IncomeFlow>,
    /// Stamped by the store on every write; caller-supplied values are
    /// discarded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl UserProfile {
    pub fn years_to_retirement(&self) -> u32 {
        self.target_retirement_age.saturating_sub(self.age)
    }
}

/// Guardrails tuning. Convention (not enforced): floor > initial > ceiling,
/// all in (0, 1).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GuardrailsConfig {
    pub initial_rate: f64,
    pub floor_guardrail: f64,
    pub ceiling_guardrail: f64,
    pub adjustment_percent: f64,
}

impl Default for GuardrailsConfig {
    fn default() -> Self {
        Self {
            initial_rate: 0.05,
            floor_guardrail: 0.06,
            ceiling_guardrail: 0.04,
            adjustment_percent: 0.10,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WithdrawalStrategy {
    ConstantDollar,
    ConstantPercentage,
    Guardrails,
    /// Described to users but has no year-by-year simulation.
    Bucket,
}

impl WithdrawalStrategy {
    pub fn label(self) -> &'static str {
        match self {
            WithdrawalStrategy::ConstantDollar => "constant dollar",
            WithdrawalStrategy::ConstantPercentage => "constant percentage",
            WithdrawalStrategy::Guardrails => "guardrails",
            WithdrawalStrategy::Bucket => "bucket",
        }
    }
}

#[derive(Copy, Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyWithdrawal {
    pub year: u32,
    pub starting_balance: f64,
    pub withdrawal: f64,
    pub ending_balance: f64,
    pub withdrawal_rate: f64,
}

/// Derived value recomputed on demand; never persisted.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategySimulationResult {
    pub strategy: WithdrawalStrategy,
    pub initial_portfolio: f64,
    pub years: u32,
    pub annual_return: f64,
    pub yearly_withdrawals: Vec<YearlyWithdrawal>,
    pub total_withdrawn: f64,
    pub final_balance: f64,
    pub average_withdrawal: f64,
    pub min_withdrawal: f64,
    pub max_withdrawal: f64,
    pub ran_out_of_money: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depletion_year: Option<u32>,
}

#[derive(Copy, Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthProjection {
    pub future_value: f64,
    pub total_contributions: f64,
    pub total_growth: f64,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalRateSuggestion {
    pub standard_rate: f64,
    pub conservative_rate: f64,
    pub description: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowLifetimeValue {
    pub name: String,
    pub monthly_amount: f64,
    pub lifetime_value: f64,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeFlowSummary {
    pub total_monthly_income: f64,
    pub total_lifetime_value: f64,
    pub savings_reduction: f64,
    pub breakdown: Vec<FlowLifetimeValue>,
}
