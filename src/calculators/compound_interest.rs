use serde::{Deserialize, Serialize};

use super::present::{StatCard, currency, whole_dollars};
use super::{Calculator, FieldSpec};
use crate::core::compounding::{
    GrowthParams, PeriodContribution, YearSnapshot, final_balance, project,
};

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Compounding {
    Annually,
    Quarterly,
    #[default]
    Monthly,
    Daily,
}

impl Compounding {
    const OPTIONS: &'static [&'static str] = &["annually", "quarterly", "monthly", "daily"];

    pub fn periods_per_year(self) -> u32 {
        match self {
            Compounding::Annually => 1,
            Compounding::Quarterly => 4,
            Compounding::Monthly => 12,
            Compounding::Daily => 365,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompoundInterestInput {
    pub initial_deposit: f64,
    pub monthly_contribution: f64,
    pub annual_rate: f64,
    pub years: u32,
    pub compounding: Compounding,
}

impl Default for CompoundInterestInput {
    fn default() -> Self {
        Self {
            initial_deposit: 10_000.0,
            monthly_contribution: 250.0,
            annual_rate: 7.0,
            years: 20,
            compounding: Compounding::Monthly,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompoundInterestResult {
    pub final_balance: f64,
    pub total_contributions: f64,
    pub total_interest: f64,
    pub yearly: Vec<YearSnapshot>,
}

pub struct CompoundInterest;

impl Calculator for CompoundInterest {
    const SLUG: &'static str = "compound-interest";
    const TITLE: &'static str = "Compound Interest Calculator";

    type Input = CompoundInterestInput;
    type Output = CompoundInterestResult;

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::number("initialDeposit", "Initial deposit", 0.0, 10_000_000.0, 100.0),
            FieldSpec::number("monthlyContribution", "Monthly contribution", 0.0, 100_000.0, 10.0),
            FieldSpec::number("annualRate", "Annual interest rate (%)", 0.0, 30.0, 0.1),
            FieldSpec::integer("years", "Years", 1, 60),
            FieldSpec::choice("compounding", "Compounding", Compounding::OPTIONS),
        ]
    }

    fn compute(input: &CompoundInterestInput) -> Option<CompoundInterestResult> {
        let periods = input.compounding.periods_per_year();
        let params = GrowthParams {
            starting_balance: input.initial_deposit.max(0.0),
            annual_rate_pct: input.annual_rate,
            periods_per_year: periods,
            years: input.years,
        };
        // Monthly deposits are spread evenly across the compounding periods.
        let per_period = input.monthly_contribution.max(0.0) * 12.0 / periods as f64;
        let yearly = project(&params, |_| PeriodContribution::own(per_period));

        let balance = final_balance(&yearly, params.starting_balance);
        let total_contributions = yearly
            .last()
            .map(|s| s.principal)
            .unwrap_or(params.starting_balance);

        Some(CompoundInterestResult {
            final_balance: balance,
            total_contributions,
            total_interest: (balance - total_contributions).max(0.0),
            yearly,
        })
    }

    fn cards(_input: &CompoundInterestInput, out: &CompoundInterestResult) -> Vec<StatCard> {
        vec![
            StatCard::money("Future value", out.final_balance),
            StatCard::money("Total contributions", out.total_contributions),
            StatCard::money("Interest earned", out.total_interest),
        ]
    }

    fn share_text(input: &CompoundInterestInput, out: &CompoundInterestResult) -> String {
        format!(
            "{} plus {}/month at {}% grows to {} in {} years.",
            whole_dollars(input.initial_deposit),
            currency(input.monthly_contribution),
            input.annual_rate,
            whole_dollars(out.final_balance),
            input.years
        )
    }
}
