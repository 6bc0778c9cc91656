use serde::{Deserialize, Serialize};

use super::loan::{LoanResult, loan_result};
use super::present::{StatCard, currency, whole_dollars};
use super::{Calculator, FieldSpec};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoLoanInput {
    pub vehicle_price: f64,
    pub down_payment: f64,
    pub trade_in_value: f64,
    pub sales_tax_pct: f64,
    pub fees: f64,
    pub finance_taxes_and_fees: bool,
    pub annual_rate: f64,
    pub term_months: u32,
}

impl Default for AutoLoanInput {
    fn default() -> Self {
        Self {
            vehicle_price: 32_000.0,
            down_payment: 4_000.0,
            trade_in_value: 0.0,
            sales_tax_pct: 7.0,
            fees: 650.0,
            finance_taxes_and_fees: true,
            annual_rate: 6.5,
            term_months: 60,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoLoanResult {
    pub sales_tax: f64,
    pub amount_financed: f64,
    pub upfront_cash: f64,
    pub total_cost: f64,
    pub loan: LoanResult,
}

pub struct AutoLoan;

impl Calculator for AutoLoan {
    const SLUG: &'static str = "auto-loan";
    const TITLE: &'static str = "Auto Loan Calculator";

    type Input = AutoLoanInput;
    type Output = AutoLoanResult;

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::number("vehiclePrice", "Vehicle price", 0.0, 500_000.0, 100.0),
            FieldSpec::number("downPayment", "Down payment", 0.0, 500_000.0, 100.0),
            FieldSpec::number("tradeInValue", "Trade-in value", 0.0, 500_000.0, 100.0),
            FieldSpec::number("salesTaxPct", "Sales tax (%)", 0.0, 15.0, 0.05),
            FieldSpec::number("fees", "Title, registration & fees", 0.0, 20_000.0, 10.0),
            FieldSpec::toggle("financeTaxesAndFees", "Include taxes and fees in loan"),
            FieldSpec::number("annualRate", "Interest rate (%)", 0.0, 30.0, 0.05),
            FieldSpec::integer("termMonths", "Term (months)", 12, 96),
        ]
    }

    fn compute(input: &AutoLoanInput) -> Option<AutoLoanResult> {
        let price = input.vehicle_price.max(0.0);
        // Most states tax the price net of the trade-in.
        let taxable = (price - input.trade_in_value.max(0.0)).max(0.0);
        let sales_tax = taxable * input.sales_tax_pct.max(0.0) / 100.0;
        let fees = input.fees.max(0.0);

        let mut amount_financed =
            price - input.down_payment.max(0.0) - input.trade_in_value.max(0.0);
        let mut upfront_cash = input.down_payment.max(0.0);
        if input.finance_taxes_and_fees {
            amount_financed += sales_tax + fees;
        } else {
            upfront_cash += sales_tax + fees;
        }

        let loan = loan_result(amount_financed, input.annual_rate, input.term_months, 0.0)?;
        let total_cost = upfront_cash + input.trade_in_value.max(0.0) + loan.total_paid;

        Some(AutoLoanResult {
            sales_tax,
            amount_financed,
            upfront_cash,
            total_cost,
            loan,
        })
    }

    fn cards(_input: &AutoLoanInput, out: &AutoLoanResult) -> Vec<StatCard> {
        vec![
            StatCard::money("Monthly payment", out.loan.monthly_payment),
            StatCard::money("Amount financed", out.amount_financed),
            StatCard::money("Sales tax", out.sales_tax),
            StatCard::money("Total interest", out.loan.total_interest),
            StatCard::money("Upfront cash", out.upfront_cash),
            StatCard::money("Total cost", out.total_cost),
        ]
    }

    fn share_text(input: &AutoLoanInput, out: &AutoLoanResult) -> String {
        format!(
            "Financing {} for a {} car over {} months: {}/month.",
            currency(out.amount_financed),
            whole_dollars(input.vehicle_price),
            input.term_months,
            currency(out.loan.monthly_payment)
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
    fn rolled_in_taxes_and_fees_are_financed() {
        // 32000 - 4000 + 2240 + 650 = 30890
        let out = AutoLoan::compute(&AutoLoanInput::default()).expect("result");
        assert_approx(out.sales_tax, 2_240.0);
        assert_approx(out.amount_financed, 30_890.0);
        assert_approx(out.upfront_cash, 4_000.0);
    }

    #[test]
    fn reference_amount_financed_payment() {
        let input = AutoLoanInput {
            vehicle_price: 28_890.0,
            down_payment: 0.0,
            sales_tax_pct: 0.0,
            fees: 0.0,
            ..AutoLoanInput::default()
        };
        let out = AutoLoan::compute(&input).expect("result");
        assert!(out.loan.monthly_payment > 565.0 && out.loan.monthly_payment < 566.0);
        assert_approx(
            out.loan.total_interest,
            out.loan.monthly_payment * 60.0 - 28_890.0,
        );
    }

    #[test]
    fn trade_in_reduces_taxable_price_and_loan() {
        let input = AutoLoanInput {
            trade_in_value: 10_000.0,
            finance_taxes_and_fees: false,
            ..AutoLoanInput::default()
        };
        let out = AutoLoan::compute(&input).expect("result");
        assert_approx(out.sales_tax, 22_000.0 * 0.07);
        assert_approx(out.amount_financed, 18_000.0);
        assert_approx(out.upfront_cash, 4_000.0 + 1_540.0 + 650.0);
    }

    #[test]
    fn down_payment_covering_price_shows_nothing() {
        let input = AutoLoanInput {
            down_payment: 40_000.0,
            finance_taxes_and_fees: false,
            ..AutoLoanInput::default()
        };
        assert!(AutoLoan::compute(&input).is_none());
    }
}
