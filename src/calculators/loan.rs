use serde::{Deserialize, Serialize};

use super::present::{StatCard, currency, months_label};
use super::{Calculator, FieldSpec};
use crate::core::amortization::{AmortizationYear, Schedule, amortize, yearly_totals};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanInput {
    pub principal: f64,
    pub annual_rate: f64,
    pub term_months: u32,
    pub extra_monthly: f64,
}

impl Default for LoanInput {
    fn default() -> Self {
        Self {
            principal: 25_000.0,
            annual_rate: 7.5,
            term_months: 60,
            extra_monthly: 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanResult {
    pub monthly_payment: f64,
    pub total_interest: f64,
    pub total_paid: f64,
    pub months_to_payoff: u32,
    pub interest_saved: f64,
    pub months_saved: u32,
    pub yearly: Vec<AmortizationYear>,
}

/// Shared by every fixed-payment calculator: amortizes with and without the
/// extra payment so the savings can be reported.
pub fn loan_result(
    principal: f64,
    annual_rate: f64,
    term_months: u32,
    extra_monthly: f64,
) -> Option<LoanResult> {
    loan_schedule(principal, annual_rate, term_months, extra_monthly).map(|(loan, _)| loan)
}

/// Like [`loan_result`], also handing back the month-by-month schedule that
/// was actually paid, for callers that walk the rows themselves.
pub fn loan_schedule(
    principal: f64,
    annual_rate: f64,
    term_months: u32,
    extra_monthly: f64,
) -> Option<(LoanResult, Schedule)> {
    let baseline = amortize(principal, annual_rate, term_months, 0.0)?;
    let schedule = if extra_monthly > 0.0 {
        amortize(principal, annual_rate, term_months, extra_monthly)?
    } else {
        baseline.clone()
    };

    let loan = LoanResult {
        monthly_payment: schedule.scheduled_payment,
        total_interest: schedule.total_interest,
        total_paid: schedule.total_paid,
        months_to_payoff: schedule.months_to_payoff(),
        interest_saved: (baseline.total_interest - schedule.total_interest).max(0.0),
        months_saved: baseline
            .months_to_payoff()
            .saturating_sub(schedule.months_to_payoff()),
        yearly: yearly_totals(&schedule),
    };
    Some((loan, schedule))
}

pub struct Loan;

impl Calculator for Loan {
    const SLUG: &'static str = "loan";
    const TITLE: &'static str = "Loan Calculator";

    type Input = LoanInput;
    type Output = LoanResult;

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::number("principal", "Loan amount", 0.0, 10_000_000.0, 100.0),
            FieldSpec::number("annualRate", "Interest rate (%)", 0.0, 36.0, 0.05),
            FieldSpec::integer("termMonths", "Term (months)", 1, 480),
            FieldSpec::number("extraMonthly", "Extra monthly payment", 0.0, 100_000.0, 10.0),
        ]
    }

    fn compute(input: &LoanInput) -> Option<LoanResult> {
        loan_result(
            input.principal,
            input.annual_rate,
            input.term_months,
            input.extra_monthly,
        )
    }

    fn cards(input: &LoanInput, out: &LoanResult) -> Vec<StatCard> {
        let mut cards = vec![
            StatCard::money("Monthly payment", out.monthly_payment),
            StatCard::money("Total interest", out.total_interest),
            StatCard::money("Total paid", out.total_paid),
            StatCard::new("Payoff", months_label(out.months_to_payoff)),
        ];
        if input.extra_monthly > 0.0 {
            cards.push(StatCard::money("Interest saved", out.interest_saved));
        }
        cards
    }

    fn share_text(input: &LoanInput, out: &LoanResult) -> String {
        format!(
            "A {} loan at {}% over {} costs {}/month and {} in interest.",
            currency(input.principal),
            input.annual_rate,
            months_label(input.term_months),
            currency(out.monthly_payment),
            currency(out.total_interest)
        )
    }
}
