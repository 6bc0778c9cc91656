use serde::{Deserialize, Serialize};

use super::present::{StatCard, percent};
use super::{Calculator, FieldSpec};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxEquivalentYieldInput {
    pub tax_free_yield: f64,
    pub federal_rate: f64,
    pub state_rate: f64,
    /// Municipal bonds from the investor's own state also skip state tax.
    pub state_exempt: bool,
}

impl Default for TaxEquivalentYieldInput {
    fn default() -> Self {
        Self {
            tax_free_yield: 3.5,
            federal_rate: 24.0,
            state_rate: 5.0,
            state_exempt: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxEquivalentYieldResult {
    pub combined_rate: f64,
    pub tax_equivalent_yield: f64,
}

/// Combined marginal rate in percent; both taxes apply to the same dollar.
pub fn combined_rate_pct(federal_pct: f64, state_pct: f64) -> f64 {
    let federal = federal_pct.clamp(0.0, 100.0) / 100.0;
    let state = state_pct.clamp(0.0, 100.0) / 100.0;
    (1.0 - (1.0 - federal) * (1.0 - state)) * 100.0
}

pub struct TaxEquivalentYield;

impl Calculator for TaxEquivalentYield {
    const SLUG: &'static str = "tax-equivalent-yield";
    const TITLE: &'static str = "Tax-Equivalent Yield Calculator";

    type Input = TaxEquivalentYieldInput;
    type Output = TaxEquivalentYieldResult;

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::number("taxFreeYield", "Tax-free yield (%)", 0.0, 20.0, 0.01),
            FieldSpec::number("federalRate", "Federal tax bracket (%)", 0.0, 37.0, 1.0),
            FieldSpec::number("stateRate", "State tax rate (%)", 0.0, 15.0, 0.1),
            FieldSpec::toggle("stateExempt", "Exempt from state tax"),
        ]
    }

    fn compute(input: &TaxEquivalentYieldInput) -> Option<TaxEquivalentYieldResult> {
        if input.tax_free_yield <= 0.0 {
            return None;
        }
        let state = if input.state_exempt { input.state_rate } else { 0.0 };
        let combined_rate = combined_rate_pct(input.federal_rate, state);
        if combined_rate >= 100.0 {
            return None;
        }
        Some(TaxEquivalentYieldResult {
            combined_rate,
            tax_equivalent_yield: input.tax_free_yield / (1.0 - combined_rate / 100.0),
        })
    }

    fn cards(input: &TaxEquivalentYieldInput, out: &TaxEquivalentYieldResult) -> Vec<StatCard> {
        vec![
            StatCard::percent("Tax-equivalent yield", out.tax_equivalent_yield),
            StatCard::percent("Tax-free yield", input.tax_free_yield),
            StatCard::percent("Combined tax rate", out.combined_rate),
        ]
    }

    fn share_text(input: &TaxEquivalentYieldInput, out: &TaxEquivalentYieldResult) -> String {
        format!(
            "A {} tax-free yield is worth {} in a taxable account at my {} combined rate.",
            percent(input.tax_free_yield),
            percent(out.tax_equivalent_yield),
            percent(out.combined_rate)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn federal_only() {
        let out = TaxEquivalentYield::compute(&TaxEquivalentYieldInput {
            tax_free_yield: 3.0,
            federal_rate: 25.0,
            state_rate: 5.0,
            state_exempt: false,
        })
        .expect("result");
        assert_approx(out.combined_rate, 25.0);
        assert_approx(out.tax_equivalent_yield, 4.0);
    }

    #[test]
    fn state_exemption_raises_equivalent_yield() {
        // 1 - 0.76 * 0.95 = 0.278
        let out = TaxEquivalentYield::compute(&TaxEquivalentYieldInput::default()).expect("result");
        assert_approx(out.combined_rate, 27.8);
        assert_approx(out.tax_equivalent_yield, 3.5 / 0.722);
    }

    #[test]
    fn zero_yield_shows_nothing() {
        assert!(
            TaxEquivalentYield::compute(&TaxEquivalentYieldInput {
                tax_free_yield: 0.0,
                ..TaxEquivalentYieldInput::default()
            })
            .is_none()
        );
    }
}
