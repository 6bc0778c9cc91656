use serde::{Deserialize, Serialize};

use super::present::{StatCard, percent, whole_dollars};
use super::{Calculator, FieldSpec};
use crate::core::tax::{FilingStatus, IncomeTax, federal_income_tax};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FederalTaxInput {
    pub gross_income: f64,
    pub filing_status: FilingStatus,
    pub pre_tax_contributions: f64,
    pub itemized_deductions: f64,
    pub tax_credits: f64,
}

impl Default for FederalTaxInput {
    fn default() -> Self {
        Self {
            gross_income: 85_000.0,
            filing_status: FilingStatus::Single,
            pre_tax_contributions: 6_000.0,
            itemized_deductions: 0.0,
            tax_credits: 0.0,
        }
    }
}

pub struct FederalTax;

impl Calculator for FederalTax {
    const SLUG: &'static str = "federal-tax";
    const TITLE: &'static str = "Federal Income Tax Calculator";

    type Input = FederalTaxInput;
    type Output = IncomeTax;

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::number("grossIncome", "Gross wages", 0.0, 10_000_000.0, 500.0),
            FieldSpec::choice("filingStatus", "Filing status", FilingStatus::OPTIONS),
            FieldSpec::number(
                "preTaxContributions",
                "Pre-tax 401(k)/HSA contributions",
                0.0,
                100_000.0,
                100.0,
            ),
            FieldSpec::number("itemizedDeductions", "Itemized deductions", 0.0, 1_000_000.0, 100.0),
            FieldSpec::number("taxCredits", "Tax credits", 0.0, 100_000.0, 100.0),
        ]
    }

    fn compute(input: &FederalTaxInput) -> Option<IncomeTax> {
        Some(federal_income_tax(
            input.gross_income,
            input.filing_status,
            input.pre_tax_contributions,
            input.itemized_deductions,
            input.tax_credits,
        ))
    }

    fn cards(_input: &FederalTaxInput, out: &IncomeTax) -> Vec<StatCard> {
        vec![
            StatCard::dollars("Federal income tax", out.tax_after_credits),
            StatCard::percent("Marginal rate", out.income_tax.marginal_rate * 100.0),
            StatCard::percent("Effective rate", out.income_tax.effective_rate * 100.0),
            StatCard::dollars("Taxable income", out.taxable_income),
            StatCard::dollars("FICA", out.fica.total()),
            StatCard::dollars("Take-home pay", out.take_home),
        ]
    }

    fn share_text(input: &FederalTaxInput, out: &IncomeTax) -> String {
        format!(
            "On {} filing {}, federal tax is {} ({} marginal, {} effective).",
            whole_dollars(input.gross_income),
            input.filing_status.label(),
            whole_dollars(out.tax_after_credits),
            percent(out.income_tax.marginal_rate * 100.0),
            percent(out.income_tax.effective_rate * 100.0)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_single_filer() {
        // 85000 - 6000 - 14600 = 64400 taxable
        let out = FederalTax::compute(&FederalTaxInput::default()).expect("result");
        assert!((out.taxable_income - 64_400.0).abs() < 1e-9);
        // 1160 + 4266 + (64400-47150)*0.22 = 9221
        assert!((out.tax_after_credits - 9_221.0).abs() < 1e-6);
        assert!((out.income_tax.marginal_rate - 0.22).abs() < 1e-12);
    }

    #[test]
    fn joint_filers_pay_less_on_same_income() {
        let single = FederalTax::compute(&FederalTaxInput::default()).expect("single");
        let joint = FederalTax::compute(&FederalTaxInput {
            filing_status: FilingStatus::MarriedJoint,
            ..FederalTaxInput::default()
        })
        .expect("joint");
        assert!(joint.tax_after_credits < single.tax_after_credits);
    }

    #[test]
    fn share_text_names_filing_status() {
        let input = FederalTaxInput {
            filing_status: FilingStatus::HeadOfHousehold,
            ..FederalTaxInput::default()
        };
        let out = FederalTax::compute(&input).expect("result");
        assert!(FederalTax::share_text(&input, &out).contains("head of household"));
    }
}
