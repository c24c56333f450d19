mod allocation;
mod growth;
mod income;
mod simulator;
mod types;

pub use allocation::{
    describe_allocation_style, expected_return, profile_expected_return, suggest_allocation,
    validate_allocation,
};
pub use growth::{
    DEFAULT_INFLATION_RATE, DEFAULT_MAX_RETIREMENT_AGE, SAVINGS_MULTIPLE, adjust_for_inflation,
    calculate_compound_growth, calculate_retirement_target, calculate_retirement_target_at_rate,
    project_retirement_age, suggest_withdrawal_rate,
};
pub use income::{
    DEFAULT_LIFE_EXPECTANCY, flow_lifetime_value, income_flow_summary, monthly_income_at_age,
};
pub use simulator::{
    DEFAULT_PERCENTAGE_RATE, compare_strategies, simulate_constant_dollar,
    simulate_constant_percentage, simulate_guardrails,
};
pub use types::{
    AssetAllocation, EngineError, FlowLifetimeValue, GrowthProjection, GuardrailsConfig,
    IncomeFlow, IncomeFlowKind, IncomeFlowSummary, MaritalStatus, RiskTolerance,
    StrategySimulationResult, UserProfile, WithdrawalRateSuggestion, WithdrawalStrategy,
    YearlyWithdrawal,
};
