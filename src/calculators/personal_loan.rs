use serde::{Deserialize, Serialize};

use super::loan::{LoanResult, loan_result};
use super::present::{StatCard, currency, percent};
use super::{Calculator, FieldSpec};
use crate::core::amortization::monthly_payment;

const APR_SEARCH_MAX: f64 = 200.0;
const APR_TOLERANCE: f64 = 1e-9;
const APR_MAX_ITERATIONS: u32 = 200;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalLoanInput {
    pub amount: f64,
    pub annual_rate: f64,
    pub term_months: u32,
    pub origination_fee_pct: f64,
}

impl Default for PersonalLoanInput {
    fn default() -> Self {
        Self {
            amount: 15_000.0,
            annual_rate: 11.0,
            term_months: 36,
            origination_fee_pct: 3.0,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalLoanResult {
    pub origination_fee: f64,
    pub net_proceeds: f64,
    pub apr: f64,
    pub total_cost: f64,
    pub loan: LoanResult,
}

/// Annual rate at which `net_proceeds` would be repaid by `payment` over
/// `months`. The fee raises the payment relative to what was received, so
/// the search runs upward from zero.
pub fn effective_apr(net_proceeds: f64, payment: f64, months: u32) -> Option<f64> {
    if net_proceeds <= 0.0 || payment <= 0.0 || months == 0 {
        return None;
    }
    let payment_at = |rate: f64| monthly_payment(net_proceeds, rate, months).unwrap_or(0.0);
    if payment_at(0.0) >= payment {
        return Some(0.0);
    }
    if payment_at(APR_SEARCH_MAX) < payment {
        return None;
    }

    let mut lo = 0.0;
    let mut hi = APR_SEARCH_MAX;
    for _ in 0..APR_MAX_ITERATIONS {
        let mid = (lo + hi) * 0.5;
        if payment_at(mid) < payment {
            lo = mid;
        } else {
            hi = mid;
        }
        if hi - lo <= APR_TOLERANCE {
            break;
        }
    }
    Some((lo + hi) * 0.5)
}

pub struct PersonalLoan;

impl Calculator for PersonalLoan {
    const SLUG: &'static str = "personal-loan";
    const TITLE: &'static str = "Personal Loan Calculator";

    type Input = PersonalLoanInput;
    type Output = PersonalLoanResult;

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::number("amount", "Loan amount", 0.0, 200_000.0, 100.0),
            FieldSpec::number("annualRate", "Interest rate (%)", 0.0, 36.0, 0.05),
            FieldSpec::integer("termMonths", "Term (months)", 6, 120),
            FieldSpec::number("originationFeePct", "Origination fee (%)", 0.0, 12.0, 0.25),
        ]
    }

    fn compute(input: &PersonalLoanInput) -> Option<PersonalLoanResult> {
        let loan = loan_result(input.amount, input.annual_rate, input.term_months, 0.0)?;
        let origination_fee = input.amount * input.origination_fee_pct.max(0.0) / 100.0;
        let net_proceeds = input.amount - origination_fee;
        let apr = effective_apr(net_proceeds, loan.monthly_payment, input.term_months)?;

        Some(PersonalLoanResult {
            origination_fee,
            net_proceeds,
            apr,
            total_cost: loan.total_interest + origination_fee,
            loan,
        })
    }

    fn cards(_input: &PersonalLoanInput, out: &PersonalLoanResult) -> Vec<StatCard> {
        vec![
            StatCard::money("Monthly payment", out.loan.monthly_payment),
            StatCard::percent("APR", out.apr),
            StatCard::money("Origination fee", out.origination_fee),
            StatCard::money("You receive", out.net_proceeds),
            StatCard::money("Total cost of borrowing", out.total_cost),
        ]
    }

    fn share_text(input: &PersonalLoanInput, out: &PersonalLoanResult) -> String {
        format!(
            "Borrowing {} at {}% with a {}% fee is really {} APR ({}/month).",
            currency(input.amount),
            input.annual_rate,
            input.origination_fee_pct,
            percent(out.apr),
            currency(out.loan.monthly_payment)
        )
    }
}
