use serde::{Deserialize, Serialize};

use super::present::{StatCard, currency, percent, whole_dollars};
use super::{Calculator, FieldSpec};
use crate::core::tax::{FilingStatus, federal_income_tax};

const PAYCHECKS_PER_YEAR: f64 = 26.0;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RaiseKind {
    #[default]
    Percent,
    Amount,
}

impl RaiseKind {
    const OPTIONS: &'static [&'static str] = &["percent", "amount"];
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaiseInput {
    pub current_salary: f64,
    pub raise_kind: RaiseKind,
    pub raise_value: f64,
    pub filing_status: FilingStatus,
    pub pre_tax_pct: f64,
}

impl Default for RaiseInput {
    fn default() -> Self {
        Self {
            current_salary: 70_000.0,
            raise_kind: RaiseKind::Percent,
            raise_value: 5.0,
            filing_status: FilingStatus::Single,
            pre_tax_pct: 5.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaySide {
    pub gross: f64,
    pub federal_tax: f64,
    pub fica: f64,
    pub take_home: f64,
    pub marginal_rate: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RaiseResult {
    pub before: PaySide,
    pub after: PaySide,
    pub gross_increase: f64,
    pub raise_pct: f64,
    pub net_increase: f64,
    pub net_increase_monthly: f64,
    pub net_increase_per_paycheck: f64,
    pub kept_pct: f64,
}

fn pay_side(gross: f64, input: &RaiseInput) -> PaySide {
    let pre_tax = gross * input.pre_tax_pct.max(0.0) / 100.0;
    let tax = federal_income_tax(gross, input.filing_status, pre_tax, 0.0, 0.0);
    PaySide {
        gross,
        federal_tax: tax.tax_after_credits,
        fica: tax.fica.total(),
        take_home: tax.take_home,
        marginal_rate: tax.income_tax.marginal_rate,
    }
}

pub struct Raise;

impl Calculator for Raise {
    const SLUG: &'static str = "raise";
    const TITLE: &'static str = "Raise Calculator";

    type Input = RaiseInput;
    type Output = RaiseResult;

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::number("currentSalary", "Current salary", 0.0, 5_000_000.0, 500.0),
            FieldSpec::choice("raiseKind", "Raise as", RaiseKind::OPTIONS),
            FieldSpec::number("raiseValue", "Raise (% or $)", 0.0, 1_000_000.0, 0.5),
            FieldSpec::choice("filingStatus", "Filing status", FilingStatus::OPTIONS),
            FieldSpec::number("preTaxPct", "Pre-tax retirement contribution (%)", 0.0, 75.0, 0.5),
        ]
    }

    fn compute(input: &RaiseInput) -> Option<RaiseResult> {
        let current = input.current_salary.max(0.0);
        if current <= 0.0 {
            return None;
        }
        let gross_increase = match input.raise_kind {
            RaiseKind::Percent => current * input.raise_value.max(0.0) / 100.0,
            RaiseKind::Amount => input.raise_value.max(0.0),
        };

        let before = pay_side(current, input);
        let after = pay_side(current + gross_increase, input);
        let net_increase = after.take_home - before.take_home;

        Some(RaiseResult {
            before,
            after,
            gross_increase,
            raise_pct: gross_increase / current * 100.0,
            net_increase,
            net_increase_monthly: net_increase / 12.0,
            net_increase_per_paycheck: net_increase / PAYCHECKS_PER_YEAR,
            kept_pct: if gross_increase > 0.0 {
                net_increase / gross_increase * 100.0
            } else {
                0.0
            },
        })
    }

    fn cards(_input: &RaiseInput, out: &RaiseResult) -> Vec<StatCard> {
        vec![
            StatCard::dollars("New salary", out.after.gross),
            StatCard::dollars("Raise before taxes", out.gross_increase),
            StatCard::dollars("Raise after taxes", out.net_increase),
            StatCard::money("Extra per paycheck", out.net_increase_per_paycheck),
            StatCard::percent("Share of raise kept", out.kept_pct),
            StatCard::percent("New marginal rate", out.after.marginal_rate * 100.0),
        ]
    }

    fn share_text(_input: &RaiseInput, out: &RaiseResult) -> String {
        format!(
            "A {} raise ({}) puts {} more in my pocket each paycheck.",
            whole_dollars(out.gross_increase),
            percent(out.raise_pct),
            currency(out.net_increase_per_paycheck)
        )
    }
}
