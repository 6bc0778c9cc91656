use serde::{Deserialize, Serialize};

use super::present::{StatCard, currency, months_label, whole_dollars};
use super::{Calculator, FieldSpec};
use crate::core::compounding::{GrowthParams, PeriodContribution, YearSnapshot, project};

const MAX_MONTHS: u32 = 100 * 12;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoalInput {
    pub goal: f64,
    pub current_savings: f64,
    pub monthly_deposit: f64,
    pub annual_rate: f64,
    pub target_years: u32,
}

impl Default for SavingsGoalInput {
    fn default() -> Self {
        Self {
            goal: 50_000.0,
            current_savings: 5_000.0,
            monthly_deposit: 500.0,
            annual_rate: 4.5,
            target_years: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoalResult {
    /// `None` when the current plan never gets there within a century.
    pub months_to_goal: Option<u32>,
    pub required_monthly: f64,
    pub balance_at_target: f64,
    pub yearly: Vec<YearSnapshot>,
}

/// Months of end-of-month deposits until the balance first reaches `goal`.
pub fn months_to_goal(goal: f64, start: f64, deposit: f64, annual_rate_pct: f64) -> Option<u32> {
    let r = annual_rate_pct / 100.0 / 12.0;
    let mut balance = start.max(0.0);
    if balance >= goal {
        return Some(0);
    }
    for month in 1..=MAX_MONTHS {
        balance = balance * (1.0 + r) + deposit.max(0.0);
        if balance + 1e-6 >= goal {
            return Some(month);
        }
    }
    None
}

/// Level end-of-month deposit that grows `start` to `goal` in `months`.
pub fn required_monthly_deposit(goal: f64, start: f64, annual_rate_pct: f64, months: u32) -> f64 {
    if months == 0 {
        return (goal - start).max(0.0);
    }
    let r = annual_rate_pct / 100.0 / 12.0;
    let n = months as f64;
    let (grown_start, annuity_factor) = if r.abs() < 1e-12 {
        (start, n)
    } else {
        let growth = (1.0 + r).powf(n);
        (start * growth, (growth - 1.0) / r)
    };
    ((goal - grown_start) / annuity_factor).max(0.0)
}

pub struct SavingsGoal;

impl Calculator for SavingsGoal {
    const SLUG: &'static str = "savings-goal";
    const TITLE: &'static str = "Savings Goal Calculator";

    type Input = SavingsGoalInput;
    type Output = SavingsGoalResult;

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::number("goal", "Savings goal", 0.0, 100_000_000.0, 500.0),
            FieldSpec::number("currentSavings", "Saved so far", 0.0, 100_000_000.0, 100.0),
            FieldSpec::number("monthlyDeposit", "Monthly deposit", 0.0, 1_000_000.0, 25.0),
            FieldSpec::number("annualRate", "Interest rate (%)", 0.0, 20.0, 0.05),
            FieldSpec::integer("targetYears", "Reach it in (years)", 1, 50),
        ]
    }

    fn compute(input: &SavingsGoalInput) -> Option<SavingsGoalResult> {
        let goal = input.goal.max(0.0);
        if goal <= 0.0 {
            return None;
        }
        let start = input.current_savings.max(0.0);
        let deposit = input.monthly_deposit.max(0.0);
        let params = GrowthParams {
            starting_balance: start,
            annual_rate_pct: input.annual_rate,
            periods_per_year: 12,
            years: input.target_years,
        };
        let yearly = project(&params, |_| PeriodContribution::own(deposit));

        Some(SavingsGoalResult {
            months_to_goal: months_to_goal(goal, start, deposit, input.annual_rate),
            required_monthly: required_monthly_deposit(
                goal,
                start,
                input.annual_rate,
                input.target_years * 12,
            ),
            balance_at_target: yearly.last().map_or(start, |s| s.balance),
            yearly,
        })
    }

    fn cards(input: &SavingsGoalInput, out: &SavingsGoalResult) -> Vec<StatCard> {
        vec![
            StatCard::new(
                "Time to goal",
                match out.months_to_goal {
                    Some(months) => months_label(months),
                    None => "Not reachable".to_string(),
                },
            ),
            StatCard::money("Monthly deposit needed", out.required_monthly),
            StatCard::dollars("Balance at target date", out.balance_at_target),
            StatCard::dollars("Goal", input.goal),
        ]
    }

    fn share_text(input: &SavingsGoalInput, out: &SavingsGoalResult) -> String {
        format!(
            "To save {} in {} years I need to put away {} a month.",
            whole_dollars(input.goal),
            input.target_years,
            currency(out.required_monthly)
        )
    }
}
