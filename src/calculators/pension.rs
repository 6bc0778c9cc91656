use serde::{Deserialize, Serialize};

use super::present::{StatCard, currency, whole_dollars};
use super::{Calculator, FieldSpec};
use crate::core::compounding::annuity_due_present_value;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SurvivorOption {
    #[default]
    None,
    Partial,
    Full,
}

impl SurvivorOption {
    const OPTIONS: &'static [&'static str] = &["none", "partial", "full"];

    /// Share of the unreduced annuity the retiree keeps.
    pub fn retiree_factor(self) -> f64 {
        match self {
            SurvivorOption::None => 1.0,
            SurvivorOption::Partial => 0.95,
            SurvivorOption::Full => 0.90,
        }
    }

    /// Share of the unreduced annuity paid to the survivor.
    pub fn survivor_share(self) -> f64 {
        match self {
            SurvivorOption::None => 0.0,
            SurvivorOption::Partial => 0.25,
            SurvivorOption::Full => 0.50,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PensionInput {
    pub final_average_salary: f64,
    pub years_of_service: f64,
    pub multiplier_pct: f64,
    pub retirement_age: u32,
    pub life_expectancy: u32,
    pub cola_pct: f64,
    pub survivor_option: SurvivorOption,
    pub discount_rate: f64,
}

impl Default for PensionInput {
    fn default() -> Self {
        Self {
            final_average_salary: 90_000.0,
            years_of_service: 25.0,
            multiplier_pct: 1.5,
            retirement_age: 62,
            life_expectancy: 88,
            cola_pct: 2.0,
            survivor_option: SurvivorOption::None,
            discount_rate: 5.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PensionYear {
    pub age: u32,
    pub benefit: f64,
    pub cumulative: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PensionResult {
    pub unreduced_annual: f64,
    pub annual_benefit: f64,
    pub monthly_benefit: f64,
    pub survivor_annual: f64,
    pub replacement_rate: f64,
    pub lifetime_total: f64,
    pub lump_sum_value: f64,
    pub yearly: Vec<PensionYear>,
}

pub struct Pension;

impl Calculator for Pension {
    const SLUG: &'static str = "pension";
    const TITLE: &'static str = "Pension Calculator";

    type Input = PensionInput;
    type Output = PensionResult;

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::number(
                "finalAverageSalary",
                "Final average salary",
                0.0,
                1_000_000.0,
                500.0,
            ),
            FieldSpec::number("yearsOfService", "Years of service", 0.0, 50.0, 0.5),
            FieldSpec::number("multiplierPct", "Benefit multiplier (%)", 0.0, 5.0, 0.05),
            FieldSpec::integer("retirementAge", "Retirement age", 40, 80),
            FieldSpec::integer("lifeExpectancy", "Life expectancy", 50, 110),
            FieldSpec::number("colaPct", "Cost-of-living adjustment (%)", 0.0, 6.0, 0.1),
            FieldSpec::choice("survivorOption", "Survivor benefit", SurvivorOption::OPTIONS),
            FieldSpec::number("discountRate", "Discount rate for lump sum (%)", 0.0, 12.0, 0.1),
        ]
    }

    fn compute(input: &PensionInput) -> Option<PensionResult> {
        let salary = input.final_average_salary.max(0.0);
        let unreduced_annual =
            salary * input.years_of_service.max(0.0) * input.multiplier_pct.max(0.0) / 100.0;
        if unreduced_annual <= 0.0 {
            return None;
        }
        let annual_benefit = unreduced_annual * input.survivor_option.retiree_factor();
        let years = input.life_expectancy.saturating_sub(input.retirement_age);

        let cola = 1.0 + input.cola_pct / 100.0;
        let mut benefit = annual_benefit;
        let mut cumulative = 0.0;
        let mut yearly = Vec::with_capacity(years as usize);
        for year in 0..years {
            if year > 0 {
                benefit *= cola;
            }
            cumulative += benefit;
            yearly.push(PensionYear {
                age: input.retirement_age + year,
                benefit,
                cumulative,
            });
        }

        let real_discount = ((1.0 + input.discount_rate / 100.0) / cola - 1.0) * 100.0;
        Some(PensionResult {
            unreduced_annual,
            annual_benefit,
            monthly_benefit: annual_benefit / 12.0,
            survivor_annual: unreduced_annual * input.survivor_option.survivor_share(),
            replacement_rate: if salary > 0.0 {
                annual_benefit / salary * 100.0
            } else {
                0.0
            },
            lifetime_total: cumulative,
            lump_sum_value: annuity_due_present_value(annual_benefit, real_discount, years),
            yearly,
        })
    }

    fn cards(input: &PensionInput, out: &PensionResult) -> Vec<StatCard> {
        let mut cards = vec![
            StatCard::money("Monthly pension", out.monthly_benefit),
            StatCard::dollars("Annual pension", out.annual_benefit),
            StatCard::percent("Income replacement", out.replacement_rate),
            StatCard::dollars("Lifetime payments", out.lifetime_total),
            StatCard::dollars("Lump-sum equivalent", out.lump_sum_value),
        ];
        if input.survivor_option != SurvivorOption::None {
            cards.push(StatCard::dollars("Survivor annuity", out.survivor_annual));
        }
        cards
    }

    fn share_text(input: &PensionInput, out: &PensionResult) -> String {
        format!(
            "{} years of service at {}% pays {}/month from age {}, worth {} as a lump sum.",
            input.years_of_service,
            input.multiplier_pct,
            currency(out.monthly_benefit),
            input.retirement_age,
            whole_dollars(out.lump_sum_value)
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
    fn benefit_is_salary_times_service_times_multiplier() {
        // 90000 * 25 * 1.5% = 33750
        let out = Pension::compute(&PensionInput::default()).expect("result");
        assert_approx(out.unreduced_annual, 33_750.0);
        assert_approx(out.monthly_benefit, 2_812.5);
        assert_approx(out.replacement_rate, 37.5);
    }

    #[test]
    fn survivor_option_reduces_retiree_benefit() {
        let out = Pension::compute(&PensionInput {
            survivor_option: SurvivorOption::Full,
            ..PensionInput::default()
        })
        .expect("result");
        assert_approx(out.annual_benefit, 33_750.0 * 0.9);
        assert_approx(out.survivor_annual, 33_750.0 * 0.5);
    }

    #[test]
    fn cola_compounds_once_per_year() {
        let out = Pension::compute(&PensionInput::default()).expect("result");
        assert_eq!(out.yearly.len(), 26);
        assert_approx(out.yearly[0].benefit, 33_750.0);
        assert_approx(out.yearly[1].benefit, 33_750.0 * 1.02);
        assert_approx(out.yearly[25].cumulative, out.lifetime_total);
    }

    #[test]
    fn zero_discount_and_cola_values_lump_sum_at_lifetime_total() {
        let out = Pension::compute(&PensionInput {
            cola_pct: 0.0,
            discount_rate: 0.0,
            ..PensionInput::default()
        })
        .expect("result");
        assert_approx(out.lump_sum_value, out.lifetime_total);
    }

    #[test]
    fn no_service_shows_nothing() {
        assert!(
            Pension::compute(&PensionInput {
                years_of_service: 0.0,
                ..PensionInput::default()
            })
            .is_none()
        );
    }
}
