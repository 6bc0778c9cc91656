use serde::{Deserialize, Serialize};

use super::present::{StatCard, whole_dollars};
use super::{Calculator, FieldSpec};
use crate::core::compounding::{
    AgeSnapshot, GrowthParams, PeriodContribution, final_balance, project, with_ages,
};

pub const ELECTIVE_DEFERRAL_LIMIT: f64 = 23_000.0;
pub const CATCH_UP_LIMIT: f64 = 7_500.0;
pub const CATCH_UP_AGE: u32 = 50;
const SAFE_WITHDRAWAL_RATE: f64 = 0.04;

/// Employee deferral for a year, capped at the IRS limit when requested.
pub fn employee_deferral(salary: f64, contribution_pct: f64, age: u32, apply_limit: bool) -> f64 {
    let wanted = salary.max(0.0) * contribution_pct.max(0.0) / 100.0;
    if !apply_limit {
        return wanted;
    }
    let limit = if age >= CATCH_UP_AGE {
        ELECTIVE_DEFERRAL_LIMIT + CATCH_UP_LIMIT
    } else {
        ELECTIVE_DEFERRAL_LIMIT
    };
    wanted.min(limit)
}

/// Employer match on what was actually deferred: `match_pct` of the
/// employee's deferral, counting deferrals only up to `limit_pct` of salary.
pub fn employer_match(salary: f64, deferred: f64, limit_pct: f64, match_pct: f64) -> f64 {
    if salary <= 0.0 {
        return 0.0;
    }
    let deferred_pct = deferred.max(0.0) / salary * 100.0;
    let matched_pct = deferred_pct.min(limit_pct.max(0.0));
    salary * matched_pct / 100.0 * match_pct.max(0.0) / 100.0
}

pub fn salary_in_year(salary: f64, growth_pct: f64, year: u32) -> f64 {
    salary.max(0.0) * (1.0 + growth_pct / 100.0).powi(year as i32)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan401kInput {
    pub current_age: u32,
    pub retirement_age: u32,
    pub annual_salary: f64,
    pub current_balance: f64,
    pub contribution_pct: f64,
    pub employer_match_pct: f64,
    pub match_limit_pct: f64,
    pub salary_growth_pct: f64,
    pub annual_return: f64,
    pub apply_irs_limit: bool,
}

impl Default for Plan401kInput {
    fn default() -> Self {
        Self {
            current_age: 30,
            retirement_age: 65,
            annual_salary: 75_000.0,
            current_balance: 20_000.0,
            contribution_pct: 10.0,
            employer_match_pct: 50.0,
            match_limit_pct: 6.0,
            salary_growth_pct: 3.0,
            annual_return: 7.0,
            apply_irs_limit: true,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan401kResult {
    pub final_balance: f64,
    pub employee_contributions: f64,
    pub employer_contributions: f64,
    pub investment_growth: f64,
    pub first_year_employee: f64,
    pub first_year_employer: f64,
    pub monthly_income_at_four_percent: f64,
    pub yearly: Vec<AgeSnapshot>,
}

pub struct Plan401k;

impl Calculator for Plan401k {
    const SLUG: &'static str = "401k";
    const TITLE: &'static str = "401(k) Calculator";

    type Input = Plan401kInput;
    type Output = Plan401kResult;

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::integer("currentAge", "Current age", 16, 80),
            FieldSpec::integer("retirementAge", "Retirement age", 40, 80),
            FieldSpec::number("annualSalary", "Annual salary", 0.0, 2_000_000.0, 1_000.0),
            FieldSpec::number(
                "currentBalance",
                "Current 401(k) balance",
                0.0,
                10_000_000.0,
                1_000.0,
            ),
            FieldSpec::number(
                "contributionPct",
                "Your contribution (% of salary)",
                0.0,
                100.0,
                0.5,
            ),
            FieldSpec::number(
                "employerMatchPct",
                "Employer match (% of your contribution)",
                0.0,
                200.0,
                5.0,
            ),
            FieldSpec::number("matchLimitPct", "Match limit (% of salary)", 0.0, 100.0, 0.5),
            FieldSpec::number("salaryGrowthPct", "Annual salary increase (%)", 0.0, 15.0, 0.1),
            FieldSpec::number("annualReturn", "Expected annual return (%)", 0.0, 15.0, 0.1),
            FieldSpec::toggle("applyIrsLimit", "Cap at IRS contribution limit"),
        ]
    }

    fn compute(input: &Plan401kInput) -> Option<Plan401kResult> {
        let years = input.retirement_age.saturating_sub(input.current_age);
        let params = GrowthParams {
            starting_balance: input.current_balance.max(0.0),
            annual_rate_pct: input.annual_return,
            periods_per_year: 12,
            years,
        };

        let contribution_for_year = |year: u32| {
            let salary = salary_in_year(input.annual_salary, input.salary_growth_pct, year);
            let own = employee_deferral(
                salary,
                input.contribution_pct,
                input.current_age + year,
                input.apply_irs_limit,
            );
            let employer =
                employer_match(salary, own, input.match_limit_pct, input.employer_match_pct);
            PeriodContribution {
                own: own / 12.0,
                employer: employer / 12.0,
            }
        };
        let first_year = contribution_for_year(0);
        let snapshots = project(&params, contribution_for_year);

        let balance = final_balance(&snapshots, params.starting_balance);
        let (employee, employer, growth) = snapshots
            .last()
            .map(|s| (s.own_contributions, s.employer_contributions, s.growth))
            .unwrap_or((0.0, 0.0, 0.0));

        Some(Plan401kResult {
            final_balance: balance,
            employee_contributions: employee,
            employer_contributions: employer,
            investment_growth: growth,
            first_year_employee: first_year.own * 12.0,
            first_year_employer: first_year.employer * 12.0,
            monthly_income_at_four_percent: balance * SAFE_WITHDRAWAL_RATE / 12.0,
            yearly: with_ages(&snapshots, input.current_age),
        })
    }

    fn cards(_input: &Plan401kInput, out: &Plan401kResult) -> Vec<StatCard> {
        vec![
            StatCard::dollars("Balance at retirement", out.final_balance),
            StatCard::dollars("Your contributions", out.employee_contributions),
            StatCard::dollars("Employer match", out.employer_contributions),
            StatCard::dollars("Investment growth", out.investment_growth),
            StatCard::dollars("Monthly income (4% rule)", out.monthly_income_at_four_percent),
        ]
    }

    fn share_text(input: &Plan401kInput, out: &Plan401kResult) -> String {
        format!(
            "Saving {}% of a {} salary with a {}% match could grow my 401(k) to {} by {}.",
            input.contribution_pct,
            whole_dollars(input.annual_salary),
            input.employer_match_pct,
            whole_dollars(out.final_balance),
            input.retirement_age
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn match_is_capped_at_limit_percent() {
        // 10% contributed, match 50% of the first 6% -> 3% of salary.
        let out = Plan401k::compute(&Plan401kInput::default()).expect("result");
        assert_approx(out.first_year_employee, 7_500.0);
        assert_approx(out.first_year_employer, 2_250.0);
    }

    #[test]
    fn irs_limit_caps_employee_deferral_with_catch_up() {
        assert_approx(employee_deferral(300_000.0, 20.0, 40, true), 23_000.0);
        assert_approx(employee_deferral(300_000.0, 20.0, 55, true), 30_500.0);
        assert_approx(employee_deferral(300_000.0, 20.0, 40, false), 60_000.0);
    }

    #[test]
    fn match_follows_the_capped_deferral() {
        // 10% of 400k wants 40k; the limit leaves 23k, i.e. 5.75% of pay.
        let input = Plan401kInput {
            annual_salary: 400_000.0,
            ..Plan401kInput::default()
        };
        let out = Plan401k::compute(&input).expect("result");
        assert_approx(out.first_year_employee, 23_000.0);
        assert_approx(out.first_year_employer, 11_500.0);
    }

    #[test]
    fn match_without_limit_uses_requested_percent() {
        let input = Plan401kInput {
            annual_salary: 400_000.0,
            apply_irs_limit: false,
            ..Plan401kInput::default()
        };
        let out = Plan401k::compute(&input).expect("result");
        assert_approx(out.first_year_employee, 40_000.0);
        assert_approx(out.first_year_employer, 12_000.0);
    }

    #[test]
    fn employer_match_is_zero_without_salary() {
        assert_approx(employer_match(0.0, 0.0, 6.0, 50.0), 0.0);
        assert_approx(employer_match(50_000.0, 1_000.0, 6.0, 100.0), 1_000.0);
    }

    #[test]
    fn retirement_age_at_or_below_current_age_returns_current_balance() {
        let input = Plan401kInput {
            current_age: 65,
            retirement_age: 60,
            ..Plan401kInput::default()
        };
        let out = Plan401k::compute(&input).expect("result");
        assert_approx(out.final_balance, 20_000.0);
        assert!(out.yearly.is_empty());
    }

    #[test]
    fn yearly_rows_are_labelled_with_age() {
        let out = Plan401k::compute(&Plan401kInput::default()).expect("result");
        assert_eq!(out.yearly.len(), 35);
        assert_eq!(out.yearly[0].age, 31);
        assert_eq!(out.yearly[34].age, 65);
    }

    #[test]
    fn zero_return_balance_is_sum_of_contributions() {
        let input = Plan401kInput {
            annual_return: 0.0,
            salary_growth_pct: 0.0,
            current_age: 30,
            retirement_age: 32,
            ..Plan401kInput::default()
        };
        let out = Plan401k::compute(&input).expect("result");
        assert_approx(out.final_balance, 20_000.0 + 2.0 * (7_500.0 + 2_250.0));
        assert_approx(out.investment_growth, 0.0);
    }
}
