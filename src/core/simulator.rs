use super::growth::DEFAULT_INFLATION_RATE;
use super::types::{
    GuardrailsConfig, StrategySimulationResult, WithdrawalStrategy, YearlyWithdrawal,
};

/// Fixed fraction used by the comparison driver's constant-percentage run.
pub const DEFAULT_PERCENTAGE_RATE: f64 = 0.04;

/// Per-run accumulator: records each simulated year and folds the aggregates
/// once the loop has run its full course. Depletion never shortens the loop;
/// it only zeroes later withdrawals.
struct SimulationLedger {
    strategy: WithdrawalStrategy,
    initial_portfolio: f64,
    years: u32,
    annual_return: f64,
    yearly_withdrawals: Vec<YearlyWithdrawal>,
    total_withdrawn: f64,
    min_withdrawal: f64,
    max_withdrawal: f64,
}

impl SimulationLedger {
    fn new(
        strategy: WithdrawalStrategy,
        initial_portfolio: f64,
        years: u32,
        annual_return: f64,
    ) -> Self {
        Self {
            strategy,
            initial_portfolio,
            years,
            annual_return,
            yearly_withdrawals: Vec::with_capacity(years as usize),
            total_withdrawn: 0.0,
            min_withdrawal: f64::INFINITY,
            max_withdrawal: 0.0,
        }
    }

    /// Applies one simulated year: subtract the withdrawal, grow the
    /// remainder, round, and record. Returns the balance carried into the
    /// next year.
    fn record_year(&mut self, year: u32, starting_balance: f64, withdrawal: f64) -> f64 {
        let ending_balance = ((starting_balance - withdrawal) * (1.0 + self.annual_return)).round();
        let withdrawal_rate = if starting_balance > 0.0 {
            withdrawal / starting_balance
        } else {
            0.0
        };
        self.yearly_withdrawals.push(YearlyWithdrawal {
            year,
            starting_balance,
            withdrawal,
            ending_balance,
            withdrawal_rate,
        });
        self.total_withdrawn += withdrawal;
        self.min_withdrawal = self.min_withdrawal.min(withdrawal);
        self.max_withdrawal = self.max_withdrawal.max(withdrawal);
        ending_balance
    }

    fn finish(
        self,
        final_balance: f64,
        ran_out_of_money: bool,
        depletion_year: Option<u32>,
    ) -> StrategySimulationResult {
        let average_withdrawal = if self.years > 0 {
            (self.total_withdrawn / self.years as f64).round()
        } else {
            0.0
        };
        let min_withdrawal = if self.yearly_withdrawals.is_empty() {
            0.0
        } else {
            self.min_withdrawal
        };

        StrategySimulationResult {
            strategy: self.strategy,
            initial_portfolio: self.initial_portfolio,
            years: self.years,
            annual_return: self.annual_return,
            yearly_withdrawals: self.yearly_withdrawals,
            total_withdrawn: self.total_withdrawn,
            final_balance,
            average_withdrawal,
            min_withdrawal,
            max_withdrawal: self.max_withdrawal,
            ran_out_of_money,
            depletion_year,
        }
    }
}

/// Withdraws a fixed fraction of whatever the balance is each year. A
/// fraction of a non-negative balance can never exhaust it, so this strategy
/// never reports depletion.
pub fn simulate_constant_percentage(
    initial_portfolio: f64,
    withdrawal_rate: f64,
    years: u32,
    annual_return: f64,
) -> StrategySimulationResult {
    let mut ledger = SimulationLedger::new(
        WithdrawalStrategy::ConstantPercentage,
        initial_portfolio,
        years,
        annual_return,
    );

    let mut balance = initial_portfolio;
    for year in 1..=years {
        let withdrawal = (balance * withdrawal_rate).round();
        balance = ledger.record_year(year, balance, withdrawal);
    }
    ledger.finish(balance, false, None)
}

/// Withdraws a fixed dollar amount escalated by inflation each subsequent
/// year. When the balance can no longer cover the target, the withdrawal is
/// clamped to what remains, the run is flagged as having run out of money,
/// and the first year that happens is recorded.
pub fn simulate_constant_dollar(
    initial_portfolio: f64,
    first_year_withdrawal: f64,
    years: u32,
    annual_return: f64,
    inflation_rate: f64,
) -> StrategySimulationResult {
    let mut ledger = SimulationLedger::new(
        WithdrawalStrategy::ConstantDollar,
        initial_portfolio,
        years,
        annual_return,
    );

    let mut balance = initial_portfolio;
    let mut target = first_year_withdrawal.round();
    let mut ran_out_of_money = false;
    let mut depletion_year = None;

    for year in 1..=years {
        if year > 1 {
            target = (target * (1.0 + inflation_rate)).round();
        }
        let withdrawal = if balance < target {
            ran_out_of_money = true;
            if depletion_year.is_none() {
                depletion_year = Some(year);
            }
            balance
        } else {
            target
        };
        balance = ledger.record_year(year, balance, withdrawal);
    }
    ledger.finish(balance, ran_out_of_money, depletion_year)
}

/// Guardrails: the year's withdrawal happens first (with the same clamping
/// and depletion tracking as constant dollar), the remainder grows, and only
/// then is next year's target decided from the rate just realized. A rate
/// above the floor guardrail cuts spending, a rate below the ceiling
/// guardrail raises it, anything between leaves it alone.
pub fn simulate_guardrails(
    initial_portfolio: f64,
    config: &GuardrailsConfig,
    years: u32,
    annual_return: f64,
) -> StrategySimulationResult {
    let mut ledger = SimulationLedger::new(
        WithdrawalStrategy::Guardrails,
        initial_portfolio,
        years,
        annual_return,
    );

    let mut balance = initial_portfolio;
    let mut target = (initial_portfolio * config.initial_rate).round();
    let mut ran_out_of_money = false;
    let mut depletion_year = None;

    for year in 1..=years {
        let starting_balance = balance;
        let withdrawal = if starting_balance < target {
            ran_out_of_money = true;
            if depletion_year.is_none() {
                depletion_year = Some(year);
            }
            starting_balance
        } else {
            target
        };

        balance = ledger.record_year(year, starting_balance, withdrawal);

        // Decide next year's target from this year's realized rate, not from
        // the balance the growth step just produced.
        let realized_rate = if starting_balance > 0.0 {
            withdrawal / starting_balance
        } else {
            0.0
        };
        if realized_rate > config.floor_guardrail {
            target = (withdrawal * (1.0 - config.adjustment_percent)).round();
        } else if realized_rate < config.ceiling_guardrail {
            target = (withdrawal * (1.0 + config.adjustment_percent)).round();
        } else {
            target = withdrawal;
        }
    }
    ledger.finish(balance, ran_out_of_money, depletion_year)
}

/// Runs all three supported strategies against the same portfolio for a
/// side-by-side comparison: constant dollar seeded with a year of expenses,
/// constant percentage at the fixed default rate, and guardrails with the
/// default configuration.
pub fn compare_strategies(
    initial_portfolio: f64,
    years: u32,
    annual_return: f64,
    monthly_expenses: f64,
) -> Vec<StrategySimulationResult> {
    vec![
        simulate_constant_dollar(
            initial_portfolio,
            monthly_expenses * 12.0,
            years,
            annual_return,
            DEFAULT_INFLATION_RATE,
        ),
        simulate_constant_percentage(
            initial_portfolio,
            DEFAULT_PERCENTAGE_RATE,
            years,
            annual_return,
        ),
        simulate_guardrails(
            initial_portfolio,
            &GuardrailsConfig::default(),
            years,
            annual_return,
        ),
    ]
}
