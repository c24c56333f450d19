//! The tool-invocation boundary: named operations with flat, typed arguments
//! dispatched onto the calculation engine. Every reply carries a structured
//! payload plus a display-ready summary string, and failures always come back
//! as structured replies rather than panics.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{
    AssetAllocation, DEFAULT_INFLATION_RATE, DEFAULT_LIFE_EXPECTANCY, DEFAULT_MAX_RETIREMENT_AGE,
    DEFAULT_PERCENTAGE_RATE, EngineError, FlowLifetimeValue, GrowthProjection, GuardrailsConfig,
    IncomeFlow, IncomeFlowKind, IncomeFlowSummary, MaritalStatus, RiskTolerance,
    StrategySimulationResult, UserProfile, WithdrawalRateSuggestion, WithdrawalStrategy,
    adjust_for_inflation, calculate_compound_growth, calculate_retirement_target,
    calculate_retirement_target_at_rate, compare_strategies, describe_allocation_style,
    expected_return, flow_lifetime_value, income_flow_summary, monthly_income_at_age,
    profile_expected_return, project_retirement_age, simulate_constant_dollar,
    simulate_constant_percentage, simulate_guardrails, suggest_allocation,
    suggest_withdrawal_rate, validate_allocation,
};
use crate::store::ProfileStore;

/// Operation catalog, one entry per request variant.
pub const TOOL_NAMES: [&str; 21] = [
    "calculate-compound-growth",
    "adjust-for-inflation",
    "calculate-retirement-target",
    "calculate-retirement-target-at-rate",
    "suggest-withdrawal-rate",
    "project-retirement-age",
    "validate-allocation",
    "calculate-expected-return",
    "describe-allocation-style",
    "suggest-allocation",
    "monthly-income-at-age",
    "income-flow-lifetime-value",
    "income-flow-summary",
    "simulate-withdrawal-strategy",
    "compare-strategies",
    "get-profile",
    "save-profile",
    "delete-profile",
    "add-income-flow",
    "remove-income-flow",
    "set-asset-allocation",
];

#[derive(Debug, Deserialize)]
#[serde(tag = "tool", rename_all = "kebab-case")]
pub enum ToolRequest {
    #[serde(rename_all = "camelCase")]
    CalculateCompoundGrowth {
        principal: f64,
        monthly_contribution: f64,
        annual_rate: f64,
        years: u32,
    },
    #[serde(rename_all = "camelCase")]
    AdjustForInflation {
        amount: f64,
        years: u32,
        inflation_rate: Option<f64>,
    },
    #[serde(rename_all = "camelCase")]
    CalculateRetirementTarget { monthly_expenses: f64 },
    #[serde(rename_all = "camelCase")]
    CalculateRetirementTargetAtRate {
        monthly_expenses: f64,
        withdrawal_rate: f64,
    },
    #[serde(rename_all = "camelCase")]
    SuggestWithdrawalRate { retirement_years: u32 },
    #[serde(rename_all = "camelCase")]
    ProjectRetirementAge {
        current_age: u32,
        current_savings: f64,
        monthly_contribution: f64,
        target_amount: f64,
        annual_rate: f64,
        max_age: Option<u32>,
    },
    ValidateAllocation {
        #[serde(flatten)]
        allocation: AssetAllocation,
    },
    CalculateExpectedReturn {
        #[serde(flatten)]
        allocation: AssetAllocation,
    },
    DescribeAllocationStyle {
        #[serde(flatten)]
        allocation: AssetAllocation,
    },
    #[serde(rename_all = "camelCase")]
    SuggestAllocation { years_to_retirement: u32 },
    #[serde(rename_all = "camelCase")]
    MonthlyIncomeAtAge { age: Option<u32> },
    #[serde(rename_all = "camelCase")]
    IncomeFlowLifetimeValue {
        id: String,
        retirement_age: Option<u32>,
        life_expectancy: Option<u32>,
        inflation_rate: Option<f64>,
    },
    #[serde(rename_all = "camelCase")]
    IncomeFlowSummary {
        retirement_age: Option<u32>,
        life_expectancy: Option<u32>,
        inflation_rate: Option<f64>,
    },
    #[serde(rename_all = "camelCase")]
    SimulateWithdrawalStrategy {
        strategy: WithdrawalStrategy,
        initial_portfolio: f64,
        years: u32,
        annual_return: f64,
        annual_withdrawal: Option<f64>,
        withdrawal_rate: Option<f64>,
        inflation_rate: Option<f64>,
        initial_rate: Option<f64>,
        floor_guardrail: Option<f64>,
        ceiling_guardrail: Option<f64>,
        adjustment_percent: Option<f64>,
    },
    #[serde(rename_all = "camelCase")]
    CompareStrategies {
        initial_portfolio: f64,
        years: u32,
        annual_return: f64,
        monthly_expenses: f64,
    },
    GetProfile,
    #[serde(rename_all = "camelCase")]
    SaveProfile {
        age: u32,
        target_retirement_age: u32,
        marital_status: MaritalStatus,
        current_savings: f64,
        monthly_contribution: f64,
        risk_tolerance: RiskTolerance,
        expected_monthly_expenses: Option<f64>,
    },
    DeleteProfile,
    #[serde(rename_all = "camelCase")]
    AddIncomeFlow {
        name: String,
        #[serde(rename = "type")]
        kind: IncomeFlowKind,
        monthly_amount: f64,
        start_age: u32,
        end_age: Option<u32>,
        #[serde(default)]
        inflation_adjusted: bool,
    },
    RemoveIncomeFlow {
        id: String,
    },
    SetAssetAllocation {
        #[serde(flatten)]
        allocation: AssetAllocation,
    },
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ToolData {
    Growth(GrowthProjection),
    Amount {
        amount: f64,
    },
    RateSuggestion(WithdrawalRateSuggestion),
    #[serde(rename_all = "camelCase")]
    RetirementAge {
        reachable: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        age: Option<u32>,
    },
    #[serde(rename_all = "camelCase")]
    AllocationCheck {
        valid: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    ExpectedReturn {
        expected_return: f64,
    },
    Style {
        style: String,
    },
    Allocation(AssetAllocation),
    #[serde(rename_all = "camelCase")]
    MonthlyIncome {
        age: u32,
        monthly_income: f64,
    },
    LifetimeValue(FlowLifetimeValue),
    IncomeSummary(IncomeFlowSummary),
    Simulation(StrategySimulationResult),
    Comparison(Vec<StrategySimulationResult>),
    Profile(UserProfile),
    #[serde(rename_all = "camelCase")]
    SavedProfile {
        location: String,
        profile: UserProfile,
    },
    Flow(IncomeFlow),
    Deleted {
        deleted: bool,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolReply {
    pub success: bool,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ToolData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn ok(summary: String, data: ToolData) -> ToolReply {
    ToolReply {
        success: true,
        summary,
        data: Some(data),
        error: None,
    }
}

fn fail(message: String) -> ToolReply {
    ToolReply {
        success: false,
        summary: message.clone(),
        data: None,
        error: Some(message),
    }
}

/// Ordinary negative outcome: nothing found, nothing wrong.
fn not_found(summary: &str) -> ToolReply {
    ToolReply {
        success: false,
        summary: summary.to_string(),
        data: None,
        error: None,
    }
}

const NO_PROFILE_SUMMARY: &str = "No saved profile yet. Save a profile first.";

fn require_profile(store: &ProfileStore) -> Result<UserProfile, ToolReply> {
    match store.load() {
        Ok(Some(profile)) => Ok(profile),
        Ok(None) => Err(not_found(NO_PROFILE_SUMMARY)),
        Err(err) => Err(fail(err.to_string())),
    }
}

/// Executes one named operation. Deterministic: the reply is a function of
/// the request plus, for profile operations, a single store read.
pub fn invoke(store: &ProfileStore, request: ToolRequest) -> ToolReply {
    tracing::debug!(?request, "invoking tool");
    match request {
        ToolRequest::CalculateCompoundGrowth {
            principal,
            monthly_contribution,
            annual_rate,
            years,
        } => {
            let projection =
                calculate_compound_growth(principal, monthly_contribution, annual_rate, years);
            let summary = format!(
                "Starting from {} with {}/month at {}, the portfolio reaches {} in {} years ({} contributed, {} growth).",
                format_money(principal),
                format_money(monthly_contribution),
                format_percent(annual_rate),
                format_money(projection.future_value),
                years,
                format_money(projection.total_contributions),
                format_money(projection.total_growth),
            );
            ok(summary, ToolData::Growth(projection))
        }

        ToolRequest::AdjustForInflation {
            amount,
            years,
            inflation_rate,
        } => {
            let rate = inflation_rate.unwrap_or(DEFAULT_INFLATION_RATE);
            let adjusted = adjust_for_inflation(amount, years, rate);
            let summary = format!(
                "{} in {} years buys what {} does today (assuming {} inflation).",
                format_money(amount),
                years,
                format_money(adjusted),
                format_percent(rate),
            );
            ok(summary, ToolData::Amount { amount: adjusted })
        }

        ToolRequest::CalculateRetirementTarget { monthly_expenses } => {
            let target = calculate_retirement_target(monthly_expenses);
            let summary = format!(
                "Covering {}/month takes a nest egg of about {} (25x annual expenses).",
                format_money(monthly_expenses),
                format_money(target),
            );
            ok(summary, ToolData::Amount { amount: target })
        }

        ToolRequest::CalculateRetirementTargetAtRate {
            monthly_expenses,
            withdrawal_rate,
        } => match calculate_retirement_target_at_rate(monthly_expenses, withdrawal_rate) {
            Ok(target) => {
                let summary = format!(
                    "At a {} withdrawal rate, covering {}/month takes about {}.",
                    format_percent(withdrawal_rate),
                    format_money(monthly_expenses),
                    format_money(target),
                );
                ok(summary, ToolData::Amount { amount: target })
            }
            Err(err) => fail(err.to_string()),
        },

        ToolRequest::SuggestWithdrawalRate { retirement_years } => {
            let suggestion = suggest_withdrawal_rate(retirement_years);
            let summary = format!(
                "{} Standard rate {}, conservative {}.",
                suggestion.description,
                format_percent(suggestion.standard_rate),
                format_percent(suggestion.conservative_rate),
            );
            ok(summary, ToolData::RateSuggestion(suggestion))
        }

        ToolRequest::ProjectRetirementAge {
            current_age,
            current_savings,
            monthly_contribution,
            target_amount,
            annual_rate,
            max_age,
        } => {
            let max_age = max_age.unwrap_or(DEFAULT_MAX_RETIREMENT_AGE);
            match project_retirement_age(
                current_age,
                current_savings,
                monthly_contribution,
                target_amount,
                annual_rate,
                max_age,
            ) {
                Some(age) => ok(
                    format!(
                        "Reaching {} looks possible at age {age}.",
                        format_money(target_amount)
                    ),
                    ToolData::RetirementAge {
                        reachable: true,
                        age: Some(age),
                    },
                ),
                None => ok(
                    format!(
                        "{} is not reachable by age {max_age} at this savings rate.",
                        format_money(target_amount)
                    ),
                    ToolData::RetirementAge {
                        reachable: false,
                        age: None,
                    },
                ),
            }
        }

        ToolRequest::ValidateAllocation { allocation } => {
            match validate_allocation(&allocation) {
                Ok(()) => ok(
                    "The allocation is valid: the four classes sum to 100%.".to_string(),
                    ToolData::AllocationCheck {
                        valid: true,
                        reason: None,
                    },
                ),
                Err(reason) => ok(
                    reason.clone(),
                    ToolData::AllocationCheck {
                        valid: false,
                        reason: Some(reason),
                    },
                ),
            }
        }

        ToolRequest::CalculateExpectedReturn { allocation } => match expected_return(&allocation) {
            Ok(value) => ok(
                format!(
                    "This mix has an expected nominal return of about {} per year.",
                    format_percent(value)
                ),
                ToolData::ExpectedReturn {
                    expected_return: value,
                },
            ),
            Err(err) => fail(err.to_string()),
        },

        ToolRequest::DescribeAllocationStyle { allocation } => {
            let style = describe_allocation_style(&allocation);
            ok(
                format!(
                    "This is a {style} allocation ({:.0}% stocks).",
                    allocation.stock_percentage()
                ),
                ToolData::Style {
                    style: style.to_string(),
                },
            )
        }

        ToolRequest::SuggestAllocation {
            years_to_retirement,
        } => {
            let suggested = suggest_allocation(years_to_retirement);
            let style = describe_allocation_style(&suggested);
            let summary = format!(
                "With {} years to retirement: {:.0}% US stocks, {:.0}% international stocks, {:.0}% bonds, {:.0}% cash ({style}).",
                years_to_retirement,
                suggested.us_stocks,
                suggested.international_stocks,
                suggested.bonds,
                suggested.cash,
            );
            ok(summary, ToolData::Allocation(suggested))
        }

        ToolRequest::MonthlyIncomeAtAge { age } => {
            let profile = match require_profile(store) {
                Ok(profile) => profile,
                Err(reply) => return reply,
            };
            let age = age.unwrap_or(profile.target_retirement_age);
            let monthly_income = monthly_income_at_age(&profile.income_flows, age);
            ok(
                format!(
                    "Guaranteed income at age {age} totals {}/month.",
                    format_money(monthly_income)
                ),
                ToolData::MonthlyIncome {
                    age,
                    monthly_income,
                },
            )
        }

        ToolRequest::IncomeFlowLifetimeValue {
            id,
            retirement_age,
            life_expectancy,
            inflation_rate,
        } => {
            let profile = match require_profile(store) {
                Ok(profile) => profile,
                Err(reply) => return reply,
            };
            let Some(flow) = profile.income_flows.iter().find(|flow| flow.id == id) else {
                return not_found(&format!("No income flow with id {id}."));
            };
            let retirement_age = retirement_age.unwrap_or(profile.target_retirement_age);
            let value = flow_lifetime_value(
                flow,
                retirement_age,
                life_expectancy.unwrap_or(DEFAULT_LIFE_EXPECTANCY),
                inflation_rate.unwrap_or(DEFAULT_INFLATION_RATE),
            );
            ok(
                format!(
                    "{} is worth about {} across the plan horizon.",
                    flow.name,
                    format_money(value)
                ),
                ToolData::LifetimeValue(FlowLifetimeValue {
                    name: flow.name.clone(),
                    monthly_amount: flow.monthly_amount,
                    lifetime_value: value,
                }),
            )
        }

        ToolRequest::IncomeFlowSummary {
            retirement_age,
            life_expectancy,
            inflation_rate,
        } => {
            let profile = match require_profile(store) {
                Ok(profile) => profile,
                Err(reply) => return reply,
            };
            let retirement_age = retirement_age.unwrap_or(profile.target_retirement_age);
            let summary_data = income_flow_summary(
                &profile.income_flows,
                retirement_age,
                life_expectancy.unwrap_or(DEFAULT_LIFE_EXPECTANCY),
                inflation_rate.unwrap_or(DEFAULT_INFLATION_RATE),
            );
            let summary = income_summary_text(&summary_data, retirement_age);
            ok(summary, ToolData::IncomeSummary(summary_data))
        }

        ToolRequest::SimulateWithdrawalStrategy {
            strategy,
            initial_portfolio,
            years,
            annual_return,
            annual_withdrawal,
            withdrawal_rate,
            inflation_rate,
            initial_rate,
            floor_guardrail,
            ceiling_guardrail,
            adjustment_percent,
        } => {
            let result = match strategy {
                WithdrawalStrategy::ConstantDollar => {
                    let Some(first_year_withdrawal) = annual_withdrawal else {
                        return fail(
                            "annualWithdrawal is required for the constant_dollar strategy"
                                .to_string(),
                        );
                    };
                    simulate_constant_dollar(
                        initial_portfolio,
                        first_year_withdrawal,
                        years,
                        annual_return,
                        inflation_rate.unwrap_or(DEFAULT_INFLATION_RATE),
                    )
                }
                WithdrawalStrategy::ConstantPercentage => simulate_constant_percentage(
                    initial_portfolio,
                    withdrawal_rate.unwrap_or(DEFAULT_PERCENTAGE_RATE),
                    years,
                    annual_return,
                ),
                WithdrawalStrategy::Guardrails => {
                    let defaults = GuardrailsConfig::default();
                    let config = GuardrailsConfig {
                        initial_rate: initial_rate.unwrap_or(defaults.initial_rate),
                        floor_guardrail: floor_guardrail.unwrap_or(defaults.floor_guardrail),
                        ceiling_guardrail: ceiling_guardrail.unwrap_or(defaults.ceiling_guardrail),
                        adjustment_percent: adjustment_percent
                            .unwrap_or(defaults.adjustment_percent),
                    };
                    simulate_guardrails(initial_portfolio, &config, years, annual_return)
                }
                WithdrawalStrategy::Bucket => {
                    return fail(
                        EngineError::UnsupportedStrategy(
                            "bucket has no year-by-year simulation".to_string(),
                        )
                        .to_string(),
                    );
                }
            };
            let summary = simulation_summary(&result);
            ok(summary, ToolData::Simulation(result))
        }

        ToolRequest::CompareStrategies {
            initial_portfolio,
            years,
            annual_return,
            monthly_expenses,
        } => {
            let results =
                compare_strategies(initial_portfolio, years, annual_return, monthly_expenses);
            let mut lines = vec![format!(
                "Comparing withdrawal strategies for {} over {} years at {}:",
                format_money(initial_portfolio),
                years,
                format_percent(annual_return),
            )];
            for result in &results {
                let depletion = match result.depletion_year {
                    Some(year) => format!(", ran out in year {year}"),
                    None => String::new(),
                };
                lines.push(format!(
                    "  {}: withdrew {}, final balance {}{}",
                    result.strategy.label(),
                    format_money(result.total_withdrawn),
                    format_money(result.final_balance),
                    depletion,
                ));
            }
            ok(lines.join("\n"), ToolData::Comparison(results))
        }

        ToolRequest::GetProfile => {
            let profile = match require_profile(store) {
                Ok(profile) => profile,
                Err(reply) => return reply,
            };
            ok(profile_summary(&profile), ToolData::Profile(profile))
        }

        ToolRequest::SaveProfile {
            age,
            target_retirement_age,
            marital_status,
            current_savings,
            monthly_contribution,
            risk_tolerance,
            expected_monthly_expenses,
        } => {
            if target_retirement_age < age {
                return fail(format!(
                    "targetRetirementAge ({target_retirement_age}) must be at least age ({age})"
                ));
            }
            for (label, value) in [
                ("currentSavings", current_savings),
                ("monthlyContribution", monthly_contribution),
                (
                    "expectedMonthlyExpenses",
                    expected_monthly_expenses.unwrap_or(0.0),
                ),
            ] {
                if !value.is_finite() || value < 0.0 {
                    return fail(format!("{label} must be a non-negative amount"));
                }
            }

            // Flows and allocation have their own operations; carry them over
            // from any existing record.
            let existing = match store.load() {
                Ok(existing) => existing,
                Err(err) => return fail(err.to_string()),
            };
            let (asset_allocation, income_flows) = existing
                .map(|previous| (previous.asset_allocation, previous.income_flows))
                .unwrap_or((None, Vec::new()));

            let profile = UserProfile {
                age,
                target_retirement_age,
                marital_status,
                current_savings,
                monthly_contribution,
                risk_tolerance,
                asset_allocation,
                expected_monthly_expenses,
                income_flows,
                saved_at: None,
            };
            match store.save(&profile) {
                Ok(saved) => {
                    let summary = format!(
                        "Profile saved.\n{}",
                        profile_summary(&saved)
                    );
                    ok(
                        summary,
                        ToolData::SavedProfile {
                            location: store.path().display().to_string(),
                            profile: saved,
                        },
                    )
                }
                Err(err) => fail(err.to_string()),
            }
        }

        ToolRequest::DeleteProfile => match store.delete() {
            Ok(true) => ok(
                "Profile deleted.".to_string(),
                ToolData::Deleted { deleted: true },
            ),
            Ok(false) => not_found("No saved profile to delete."),
            Err(err) => fail(err.to_string()),
        },

        ToolRequest::AddIncomeFlow {
            name,
            kind,
            monthly_amount,
            start_age,
            end_age,
            inflation_adjusted,
        } => {
            if !monthly_amount.is_finite() || monthly_amount < 0.0 {
                return fail("monthlyAmount must be a non-negative amount".to_string());
            }
            if let Some(end_age) = end_age {
                if end_age <= start_age {
                    return fail(format!(
                        "endAge ({end_age}) must be greater than startAge ({start_age})"
                    ));
                }
            }
            let mut profile = match require_profile(store) {
                Ok(profile) => profile,
                Err(reply) => return reply,
            };

            let flow = IncomeFlow {
                id: Uuid::new_v4().to_string(),
                name,
                kind,
                monthly_amount,
                start_age,
                end_age,
                inflation_adjusted,
            };
            profile.income_flows.push(flow.clone());
            if let Err(err) = store.save(&profile) {
                return fail(err.to_string());
            }

            let window = match flow.end_age {
                Some(end_age) => format!("from age {} to {}", flow.start_age, end_age),
                None => format!("from age {} for life", flow.start_age),
            };
            let cola = if flow.inflation_adjusted {
                ", inflation adjusted"
            } else {
                ""
            };
            ok(
                format!(
                    "Added {} ({}): {}/month {window}{cola}.",
                    flow.name,
                    flow.kind.label(),
                    format_money(flow.monthly_amount),
                ),
                ToolData::Flow(flow),
            )
        }

        ToolRequest::RemoveIncomeFlow { id } => {
            let mut profile = match require_profile(store) {
                Ok(profile) => profile,
                Err(reply) => return reply,
            };
            let Some(index) = profile.income_flows.iter().position(|flow| flow.id == id) else {
                return not_found(&format!("No income flow with id {id}."));
            };
            let removed = profile.income_flows.remove(index);
            if let Err(err) = store.save(&profile) {
                return fail(err.to_string());
            }
            ok(
                format!("Removed {} from the profile.", removed.name),
                ToolData::Flow(removed),
            )
        }

        ToolRequest::SetAssetAllocation { allocation } => {
            // Revalidated here so an invalid mix never reaches the store.
            let rate = match expected_return(&allocation) {
                Ok(rate) => rate,
                Err(err) => return fail(err.to_string()),
            };
            let mut profile = match require_profile(store) {
                Ok(profile) => profile,
                Err(reply) => return reply,
            };
            profile.asset_allocation = Some(allocation);
            if let Err(err) = store.save(&profile) {
                return fail(err.to_string());
            }
            ok(
                format!(
                    "Allocation saved: {:.0}% US stocks, {:.0}% international stocks, {:.0}% bonds, {:.0}% cash ({}, ~{} expected return).",
                    allocation.us_stocks,
                    allocation.international_stocks,
                    allocation.bonds,
                    allocation.cash,
                    describe_allocation_style(&allocation),
                    format_percent(rate),
                ),
                ToolData::Allocation(allocation),
            )
        }
    }
}

fn simulation_summary(result: &StrategySimulationResult) -> String {
    let mut summary = format!(
        "The {} strategy withdrew {} over {} years (average {}/year), ending at {}.",
        result.strategy.label(),
        format_money(result.total_withdrawn),
        result.years,
        format_money(result.average_withdrawal),
        format_money(result.final_balance),
    );
    if result.ran_out_of_money {
        if let Some(year) = result.depletion_year {
            summary.push_str(&format!(" The portfolio ran out of money in year {year}."));
        }
    }
    summary
}

fn income_summary_text(summary: &IncomeFlowSummary, retirement_age: u32) -> String {
    let mut lines = vec![format!(
        "Income flows provide {}/month at age {retirement_age}.",
        format_money(summary.total_monthly_income)
    )];
    for entry in &summary.breakdown {
        lines.push(format!(
            "  {}: {}/month, lifetime value {}",
            entry.name,
            format_money(entry.monthly_amount),
            format_money(entry.lifetime_value),
        ));
    }
    lines.push(format!(
        "Total lifetime value {}; this offsets about {} of required savings.",
        format_money(summary.total_lifetime_value),
        format_money(summary.savings_reduction),
    ));
    lines.join("\n")
}

fn profile_summary(profile: &UserProfile) -> String {
    let mut lines = vec![
        format!(
            "Age {}, {}, planning to retire at {} ({} years away).",
            profile.age,
            profile.marital_status.label(),
            profile.target_retirement_age,
            profile.years_to_retirement(),
        ),
        format!(
            "{} saved, contributing {}/month ({} risk tolerance, ~{} assumed return).",
            format_money(profile.current_savings),
            format_money(profile.monthly_contribution),
            profile.risk_tolerance.label(),
            format_percent(profile_expected_return(profile)),
        ),
    ];
    if let Some(expenses) = profile.expected_monthly_expenses {
        lines.push(format!(
            "Expected retirement spending {}/month.",
            format_money(expenses)
        ));
    }
    if let Some(allocation) = &profile.asset_allocation {
        lines.push(format!(
            "Asset allocation on file: {}.",
            describe_allocation_style(allocation)
        ));
    }
    if !profile.income_flows.is_empty() {
        lines.push(format!(
            "{} income flow(s) on file.",
            profile.income_flows.len()
        ));
    }
    lines.join("\n")
}

fn format_money(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

fn format_percent(rate: f64) -> String {
    let percent = rate * 100.0;
    if (percent - percent.round()).abs() < 1e-9 {
        format!("{percent:.0}%")
    } else {
        format!("{percent:.1}%")
    }
}
