use serde::{Deserialize, Serialize};

use super::present::{StatCard, whole_dollars};
use super::{Calculator, FieldSpec};
use crate::core::compounding::{
    AgeSnapshot, GrowthParams, PeriodContribution, annuity_due_present_value, drawdown,
    final_balance, project, with_ages,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementInput {
    pub current_age: u32,
    pub retirement_age: u32,
    pub life_expectancy: u32,
    pub current_savings: f64,
    pub monthly_contribution: f64,
    pub pre_retirement_return: f64,
    pub post_retirement_return: f64,
    pub inflation_pct: f64,
    pub desired_income: f64,
    pub other_income: f64,
}

impl Default for RetirementInput {
    fn default() -> Self {
        Self {
            current_age: 35,
            retirement_age: 65,
            life_expectancy: 90,
            current_savings: 50_000.0,
            monthly_contribution: 800.0,
            pre_retirement_return: 7.0,
            post_retirement_return: 5.0,
            inflation_pct: 2.5,
            desired_income: 60_000.0,
            other_income: 20_000.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementYear {
    pub age: u32,
    pub withdrawal: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementResult {
    pub projected_savings: f64,
    pub first_year_need: f64,
    pub required_savings: f64,
    pub shortfall: f64,
    pub on_track: bool,
    /// Age in which savings first fail to cover the year's need.
    pub runs_out_at_age: Option<u32>,
    pub accumulation: Vec<AgeSnapshot>,
    pub retirement: Vec<RetirementYear>,
}

fn real_rate_pct(nominal_pct: f64, inflation_pct: f64) -> f64 {
    ((1.0 + nominal_pct / 100.0) / (1.0 + inflation_pct / 100.0) - 1.0) * 100.0
}

pub struct Retirement;

impl Calculator for Retirement {
    const SLUG: &'static str = "retirement";
    const TITLE: &'static str = "Retirement Calculator";

    type Input = RetirementInput;
    type Output = RetirementResult;

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::integer("currentAge", "Current age", 18, 90),
            FieldSpec::integer("retirementAge", "Retirement age", 30, 90),
            FieldSpec::integer("lifeExpectancy", "Plan until age", 50, 110),
            FieldSpec::number("currentSavings", "Current savings", 0.0, 20_000_000.0, 1_000.0),
            FieldSpec::number("monthlyContribution", "Monthly contribution", 0.0, 100_000.0, 50.0),
            FieldSpec::number(
                "preRetirementReturn",
                "Return before retirement (%)",
                0.0,
                15.0,
                0.1,
            ),
            FieldSpec::number("postRetirementReturn", "Return in retirement (%)", 0.0, 15.0, 0.1),
            FieldSpec::number("inflationPct", "Inflation (%)", 0.0, 10.0, 0.1),
            FieldSpec::number(
                "desiredIncome",
                "Desired yearly income (today's dollars)",
                0.0,
                1_000_000.0,
                1_000.0,
            ),
            FieldSpec::number(
                "otherIncome",
                "Social Security & pensions (today's dollars)",
                0.0,
                500_000.0,
                500.0,
            ),
        ]
    }

    fn compute(input: &RetirementInput) -> Option<RetirementResult> {
        let saving_years = input.retirement_age.saturating_sub(input.current_age);
        let retired_years = input.life_expectancy.saturating_sub(input.retirement_age);
        let params = GrowthParams {
            starting_balance: input.current_savings.max(0.0),
            annual_rate_pct: input.pre_retirement_return,
            periods_per_year: 12,
            years: saving_years,
        };
        let monthly = input.monthly_contribution.max(0.0);
        let snapshots = project(&params, |_| PeriodContribution::own(monthly));
        let projected_savings = final_balance(&snapshots, params.starting_balance);

        let inflation = 1.0 + input.inflation_pct / 100.0;
        let gap_today = (input.desired_income - input.other_income).max(0.0);
        let first_year_need = gap_today * inflation.powi(saving_years as i32);
        let required_savings = annuity_due_present_value(
            first_year_need,
            real_rate_pct(input.post_retirement_return, input.inflation_pct),
            retired_years,
        );

        let plan = drawdown(
            projected_savings,
            input.post_retirement_return,
            retired_years,
            |year| first_year_need * inflation.powi(year as i32),
        );
        let runs_out_at_age = plan
            .exhausted_in_year
            .map(|year| input.retirement_age + year - 1);
        let retirement = plan
            .years
            .iter()
            .map(|row| RetirementYear {
                age: input.retirement_age + row.year - 1,
                withdrawal: row.withdrawal,
                balance: row.balance,
            })
            .collect();

        let shortfall = (required_savings - projected_savings).max(0.0);
        Some(RetirementResult {
            projected_savings,
            first_year_need,
            required_savings,
            shortfall,
            on_track: shortfall <= 0.0,
            runs_out_at_age,
            accumulation: with_ages(&snapshots, input.current_age),
            retirement,
        })
    }

    fn cards(input: &RetirementInput, out: &RetirementResult) -> Vec<StatCard> {
        let mut cards = vec![
            StatCard::dollars("Projected savings at retirement", out.projected_savings),
            StatCard::dollars("Savings needed", out.required_savings),
            StatCard::dollars("First-year withdrawal", out.first_year_need),
        ];
        if out.on_track {
            cards.push(StatCard::new("Status", "On track"));
        } else {
            cards.push(StatCard::dollars("Shortfall", out.shortfall));
        }
        cards.push(StatCard::new(
            "Money lasts",
            match out.runs_out_at_age {
                Some(age) => format!("until age {age}"),
                None => format!("past age {}", input.life_expectancy),
            },
        ));
        cards
    }

    fn share_text(input: &RetirementInput, out: &RetirementResult) -> String {
        if out.on_track {
            format!(
                "I'm on track to retire at {} with {} saved.",
                input.retirement_age,
                whole_dollars(out.projected_savings)
            )
        } else {
            format!(
                "To retire at {} I need {} but am on pace for {}.",
                input.retirement_age,
                whole_dollars(out.required_savings),
                whole_dollars(out.projected_savings)
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_real_return_needs_years_times_income() {
        let input = RetirementInput {
            post_retirement_return: 0.0,
            inflation_pct: 0.0,
            desired_income: 50_000.0,
            other_income: 10_000.0,
            retirement_age: 65,
            life_expectancy: 90,
            ..RetirementInput::default()
        };
        let out = Retirement::compute(&input).expect("result");
        assert!((out.first_year_need - 40_000.0).abs() < 1e-9);
        assert!((out.required_savings - 1_000_000.0).abs() < 1e-6);
    }

    #[test]
    fn funding_the_requirement_lasts_through_life_expectancy() {
        let input = RetirementInput {
            current_age: 65,
            retirement_age: 65,
            monthly_contribution: 0.0,
            ..RetirementInput::default()
        };
        let needed = Retirement::compute(&input).expect("needed").required_savings;
        let funded = Retirement::compute(&RetirementInput {
            current_savings: needed + 1.0,
            ..input
        })
        .expect("funded");
        assert!(funded.on_track);
        assert_eq!(funded.runs_out_at_age, None);
        assert_eq!(funded.retirement.len(), 25);
    }

    #[test]
    fn underfunded_plan_reports_depletion_age() {
        let input = RetirementInput {
            current_age: 60,
            retirement_age: 60,
            current_savings: 100_000.0,
            monthly_contribution: 0.0,
            post_retirement_return: 0.0,
            inflation_pct: 0.0,
            desired_income: 45_000.0,
            other_income: 20_000.0,
            ..RetirementInput::default()
        };
        let out = Retirement::compute(&input).expect("result");
        // 100k covers four full years of 25k; age 64 is the first short year.
        assert_eq!(out.runs_out_at_age, Some(64));
        assert!(!out.on_track);
        assert!((out.shortfall - (25_000.0 * 30.0 - 100_000.0)).abs() < 1e-6);
    }
}
