use serde::{Deserialize, Serialize};

use super::loan::{LoanResult, loan_schedule};
use super::present::{StatCard, currency, months_label, whole_dollars};
use super::{Calculator, FieldSpec};

const PMI_LTV_LIMIT: f64 = 0.80;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MortgageInput {
    pub home_price: f64,
    pub down_payment_pct: f64,
    pub annual_rate: f64,
    pub term_years: u32,
    pub property_tax_pct: f64,
    pub insurance_annual: f64,
    pub hoa_monthly: f64,
    pub pmi_pct: f64,
    pub extra_monthly: f64,
}

impl Default for MortgageInput {
    fn default() -> Self {
        Self {
            home_price: 400_000.0,
            down_payment_pct: 20.0,
            annual_rate: 6.75,
            term_years: 30,
            property_tax_pct: 1.1,
            insurance_annual: 1_500.0,
            hoa_monthly: 0.0,
            pmi_pct: 0.5,
            extra_monthly: 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MortgageResult {
    pub loan_amount: f64,
    pub down_payment: f64,
    pub principal_and_interest: f64,
    pub property_tax_monthly: f64,
    pub insurance_monthly: f64,
    pub hoa_monthly: f64,
    pub pmi_monthly: f64,
    pub pmi_months: u32,
    pub total_monthly: f64,
    pub loan: LoanResult,
}

pub struct Mortgage;

impl Calculator for Mortgage {
    const SLUG: &'static str = "mortgage";
    const TITLE: &'static str = "Mortgage Calculator";

    type Input = MortgageInput;
    type Output = MortgageResult;

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::number("homePrice", "Home price", 0.0, 20_000_000.0, 1_000.0),
            FieldSpec::number("downPaymentPct", "Down payment (%)", 0.0, 100.0, 0.5),
            FieldSpec::number("annualRate", "Interest rate (%)", 0.0, 20.0, 0.05),
            FieldSpec::integer("termYears", "Term (years)", 1, 40),
            FieldSpec::number(
                "propertyTaxPct",
                "Property tax (% of price per year)",
                0.0,
                5.0,
                0.05,
            ),
            FieldSpec::number("insuranceAnnual", "Home insurance per year", 0.0, 50_000.0, 50.0),
            FieldSpec::number("hoaMonthly", "HOA per month", 0.0, 5_000.0, 10.0),
            FieldSpec::number("pmiPct", "PMI (% of loan per year)", 0.0, 3.0, 0.05),
            FieldSpec::number("extraMonthly", "Extra principal per month", 0.0, 50_000.0, 25.0),
        ]
    }

    fn compute(input: &MortgageInput) -> Option<MortgageResult> {
        let home_price = input.home_price.max(0.0);
        let down_payment = home_price * input.down_payment_pct.clamp(0.0, 100.0) / 100.0;
        let loan_amount = home_price - down_payment;
        let months = input.term_years * 12;

        let (loan, schedule) =
            loan_schedule(loan_amount, input.annual_rate, months, input.extra_monthly)?;

        // PMI is charged while the balance at the start of the month is above
        // 80% of the purchase price.
        let pmi_limit = home_price * PMI_LTV_LIMIT;
        let mut start_balance = loan_amount;
        let mut pmi_months = 0;
        for row in &schedule.rows {
            if start_balance <= pmi_limit {
                break;
            }
            pmi_months += 1;
            start_balance = row.balance;
        }
        let pmi_monthly = if pmi_months > 0 {
            loan_amount * input.pmi_pct.max(0.0) / 100.0 / 12.0
        } else {
            0.0
        };

        let property_tax_monthly = home_price * input.property_tax_pct.max(0.0) / 100.0 / 12.0;
        let insurance_monthly = input.insurance_annual.max(0.0) / 12.0;
        let hoa_monthly = input.hoa_monthly.max(0.0);
        let total_monthly = loan.monthly_payment
            + property_tax_monthly
            + insurance_monthly
            + hoa_monthly
            + pmi_monthly;

        Some(MortgageResult {
            loan_amount,
            down_payment,
            principal_and_interest: loan.monthly_payment,
            property_tax_monthly,
            insurance_monthly,
            hoa_monthly,
            pmi_monthly,
            pmi_months,
            total_monthly,
            loan,
        })
    }

    fn cards(_input: &MortgageInput, out: &MortgageResult) -> Vec<StatCard> {
        let mut cards = vec![
            StatCard::money("Total monthly payment", out.total_monthly),
            StatCard::money("Principal & interest", out.principal_and_interest),
            StatCard::money("Property tax", out.property_tax_monthly),
            StatCard::money("Insurance", out.insurance_monthly),
        ];
        if out.hoa_monthly > 0.0 {
            cards.push(StatCard::money("HOA", out.hoa_monthly));
        }
        if out.pmi_monthly > 0.0 {
            cards.push(StatCard::new(
                "PMI",
                format!("{} for {}", currency(out.pmi_monthly), months_label(out.pmi_months)),
            ));
        }
        cards.push(StatCard::dollars("Loan amount", out.loan_amount));
        cards.push(StatCard::dollars("Total interest", out.loan.total_interest));
        cards
    }

    fn share_text(input: &MortgageInput, out: &MortgageResult) -> String {
        format!(
            "A {} home with {}% down at {}% for {} years: {}/month all-in.",
            whole_dollars(input.home_price),
            input.down_payment_pct,
            input.annual_rate,
            input.term_years,
            currency(out.total_monthly)
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
    fn twenty_percent_down_has_no_pmi() {
        let out = Mortgage::compute(&MortgageInput::default()).expect("result");
        assert_approx(out.loan_amount, 320_000.0);
        assert_approx(out.pmi_monthly, 0.0);
        assert_eq!(out.pmi_months, 0);
    }

    #[test]
    fn low_down_payment_adds_pmi_until_eighty_percent_ltv() {
        let input = MortgageInput {
            down_payment_pct: 5.0,
            ..MortgageInput::default()
        };
        let out = Mortgage::compute(&input).expect("result");
        assert_approx(out.pmi_monthly, 380_000.0 * 0.005 / 12.0);
        assert!(out.pmi_months > 0 && out.pmi_months < 360);
    }

    #[test]
    fn extra_principal_ends_pmi_sooner() {
        let base = MortgageInput {
            down_payment_pct: 5.0,
            ..MortgageInput::default()
        };
        let plain = Mortgage::compute(&base).expect("plain");
        let extra = Mortgage::compute(&MortgageInput {
            extra_monthly: 500.0,
            ..base
        })
        .expect("extra");
        assert!(extra.pmi_months < plain.pmi_months);
        assert!(extra.loan.months_to_payoff < 360);
        assert!(extra.loan.months_saved > 0);
    }

    #[test]
    fn total_adds_every_component() {
        let input = MortgageInput {
            hoa_monthly: 250.0,
            ..MortgageInput::default()
        };
        let out = Mortgage::compute(&input).expect("result");
        assert_approx(out.property_tax_monthly, 400_000.0 * 0.011 / 12.0);
        assert_approx(out.insurance_monthly, 125.0);
        assert_approx(
            out.total_monthly,
            out.principal_and_interest + out.property_tax_monthly + 125.0 + 250.0,
        );
    }

    #[test]
    fn full_down_payment_has_nothing_to_finance() {
        let input = MortgageInput {
            down_payment_pct: 100.0,
            ..MortgageInput::default()
        };
        assert!(Mortgage::compute(&input).is_none());
    }
}
