use super::growth::SAVINGS_MULTIPLE;
use super::types::{FlowLifetimeValue, IncomeFlow, IncomeFlowSummary};

pub const DEFAULT_LIFE_EXPECTANCY: u32 = 95;

/// Total monthly income from every flow paying at the given age.
pub fn monthly_income_at_age(flows: &[IncomeFlow], age: u32) -> f64 {
    flows
        .iter()
        .filter(|flow| flow.pays_at(age))
        .map(|flow| flow.monthly_amount)
        .sum()
}

/// Value of a single flow across the retirement horizon, in today's dollars.
///
/// Inflation-adjusted flows keep their purchasing power, so the nominal sum
/// stands in for lifetime value with no discounting. Fixed flows erode: each
/// year's payment is discounted back by the inflation rate, a discrete
/// present-value sum rather than a closed-form annuity.
pub fn flow_lifetime_value(
    flow: &IncomeFlow,
    retirement_age: u32,
    life_expectancy: u32,
    inflation_rate: f64,
) -> f64 {
    let effective_start = flow.start_age.max(retirement_age);
    let effective_end = flow.end_age.unwrap_or(life_expectancy);
    if effective_start >= effective_end {
        return 0.0;
    }

    let years = effective_end - effective_start;
    let annual_amount = flow.monthly_amount * 12.0;
    if flow.inflation_adjusted {
        return (annual_amount * years as f64).round();
    }

    let mut value = 0.0;
    for offset in 0..years {
        value += annual_amount / (1.0 + inflation_rate).powi(offset as i32);
    }
    value.round()
}

/// Aggregates every flow into monthly income at retirement, total lifetime
/// value, and the savings-target offset implied by the 4% rule (guaranteed
/// income replaces savings at a 25x multiple).
pub fn income_flow_summary(
    flows: &[IncomeFlow],
    retirement_age: u32,
    life_expectancy: u32,
    inflation_rate: f64,
) -> IncomeFlowSummary {
    let total_monthly_income = monthly_income_at_age(flows, retirement_age);
    let breakdown: Vec<FlowLifetimeValue> = flows
        .iter()
        .map(|flow| FlowLifetimeValue {
            name: flow.name.clone(),
            monthly_amount: flow.monthly_amount,
            lifetime_value: flow_lifetime_value(flow, retirement_age, life_expectancy, inflation_rate),
        })
        .collect();
    let total_lifetime_value = breakdown.iter().map(|entry| entry.lifetime_value).sum();

    IncomeFlowSummary {
        total_monthly_income,
        total_lifetime_value,
        savings_reduction: (total_monthly_income * 12.0 * SAVINGS_MULTIPLE).round(),
        breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::IncomeFlowKind;

    const EPS: f64 = 1e-9;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn flow(
        name: &str,
        monthly_amount: f64,
        start_age: u32,
        end_age: Option<u32>,
        inflation_adjusted: bool,
    ) -> IncomeFlow {
        IncomeFlow {
            id: format!("flow-{name}"),
            name: name.to_string(),
            kind: IncomeFlowKind::Other,
            monthly_amount,
            start_age,
            end_age,
            inflation_adjusted,
        }
    }

    #[test]
    fn monthly_income_respects_age_windows() {
        let flows = vec![
            flow("social security", 2_200.0, 67, None, true),
            flow("consulting", 1_000.0, 62, Some(70), false),
            flow("pension", 800.0, 65, None, false),
        ];

        assert_approx(monthly_income_at_age(&flows, 60), 0.0);
        assert_approx(monthly_income_at_age(&flows, 62), 1_000.0);
        assert_approx(monthly_income_at_age(&flows, 67), 4_000.0);
        // End age is exclusive: the consulting flow stops paying at 70.
        assert_approx(monthly_income_at_age(&flows, 70), 3_000.0);
        assert_approx(monthly_income_at_age(&flows, 94), 3_000.0);
    }

    #[test]
    fn cola_flow_is_the_plain_nominal_sum() {
        let f = flow("social security", 1_000.0, 65, None, true);
        // 30 years from 65 to the default life expectancy of 95.
        assert_approx(flow_lifetime_value(&f, 65, 95, 0.03), 360_000.0);
    }

    #[test]
    fn fixed_flow_erodes_against_inflation() {
        let adjusted = flow("cola", 1_000.0, 65, None, true);
        let fixed = flow("fixed", 1_000.0, 65, None, false);
        let adjusted_value = flow_lifetime_value(&adjusted, 65, 95, 0.03);
        let fixed_value = flow_lifetime_value(&fixed, 65, 95, 0.03);
        assert!(fixed_value < adjusted_value);
        assert!(fixed_value > 0.0);
    }

    #[test]
    fn zero_inflation_makes_fixed_and_cola_flows_equal() {
        let adjusted = flow("cola", 1_000.0, 65, None, true);
        let fixed = flow("fixed", 1_000.0, 65, None, false);
        assert_approx(
            flow_lifetime_value(&fixed, 65, 95, 0.0),
            flow_lifetime_value(&adjusted, 65, 95, 0.0),
        );
    }

    #[test]
    fn flow_starting_before_retirement_is_clipped() {
        let early = flow("early pension", 500.0, 55, None, true);
        // Valued from retirement at 65, not from 55.
        assert_approx(flow_lifetime_value(&early, 65, 95, 0.03), 180_000.0);
    }

    #[test]
    fn flow_outside_the_horizon_is_worthless() {
        let ended = flow("bridge", 900.0, 55, Some(60), true);
        assert_approx(flow_lifetime_value(&ended, 65, 95, 0.03), 0.0);

        let late = flow("late", 900.0, 95, None, true);
        assert_approx(flow_lifetime_value(&late, 65, 95, 0.03), 0.0);
    }

    #[test]
    fn empty_flow_list_summarizes_to_zero() {
        let summary = income_flow_summary(&[], 65, 95, 0.03);
        assert_approx(summary.total_monthly_income, 0.0);
        assert_approx(summary.total_lifetime_value, 0.0);
        assert_approx(summary.savings_reduction, 0.0);
        assert!(summary.breakdown.is_empty());
    }

    #[test]
    fn summary_totals_and_offset() {
        let flows = vec![
            flow("social security", 2_000.0, 65, None, true),
            flow("annuity", 500.0, 65, None, false),
        ];
        let summary = income_flow_summary(&flows, 65, 95, 0.03);

        assert_approx(summary.total_monthly_income, 2_500.0);
        assert_eq!(summary.breakdown.len(), 2);
        assert_approx(summary.breakdown[0].lifetime_value, 1_800_000.0);
        assert_approx(
            summary.total_lifetime_value,
            summary.breakdown[0].lifetime_value + summary.breakdown[1].lifetime_value,
        );
        // $2,500/month offsets 2_500 * 12 * 25 of required savings.
        assert_approx(summary.savings_reduction, 750_000.0);
    }
}
