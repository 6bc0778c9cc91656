use serde::{Deserialize, Serialize};

use super::present::{StatCard, currency};
use super::{Calculator, FieldSpec};
use crate::core::social_security::{
    CumulativePoint, clamp_claim_months, crossover_age, cumulative_benefits,
    full_retirement_age_months, monthly_benefit, pia,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialSecurityInput {
    pub birth_year: u32,
    pub aime: f64,
    pub claim_age_years: u32,
    pub claim_age_months: u32,
    pub cola_pct: f64,
    pub through_age: u32,
}

impl Default for SocialSecurityInput {
    fn default() -> Self {
        Self {
            birth_year: 1965,
            aime: 6_000.0,
            claim_age_years: 67,
            claim_age_months: 0,
            cola_pct: 2.5,
            through_age: 90,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimScenario {
    pub claim_months: u32,
    pub monthly: f64,
    pub cumulative: Vec<CumulativePoint>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialSecurityResult {
    pub pia: f64,
    pub full_retirement_age_months: u32,
    pub at_62: ClaimScenario,
    pub at_full_retirement_age: ClaimScenario,
    pub at_70: ClaimScenario,
    pub chosen: ClaimScenario,
    pub breakeven_70_vs_62: Option<u32>,
    pub breakeven_fra_vs_62: Option<u32>,
    pub breakeven_chosen_vs_62: Option<u32>,
}

pub fn age_label(months: u32) -> String {
    match months % 12 {
        0 => format!("{}", months / 12),
        m => format!("{} and {m} months", months / 12),
    }
}

fn scenario(base: f64, fra: u32, claim_months: u32, input: &SocialSecurityInput) -> ClaimScenario {
    let claim_months = clamp_claim_months(claim_months);
    let monthly = monthly_benefit(base, fra, claim_months);
    ClaimScenario {
        claim_months,
        monthly,
        cumulative: cumulative_benefits(monthly, claim_months, input.cola_pct, input.through_age),
    }
}

pub struct SocialSecurity;

impl Calculator for SocialSecurity {
    const SLUG: &'static str = "social-security";
    const TITLE: &'static str = "Social Security Calculator";

    type Input = SocialSecurityInput;
    type Output = SocialSecurityResult;

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::integer("birthYear", "Birth year", 1930, 2010),
            FieldSpec::number("aime", "Average indexed monthly earnings", 0.0, 15_000.0, 50.0),
            FieldSpec::integer("claimAgeYears", "Claim at age", 62, 70),
            FieldSpec::integer("claimAgeMonths", "and months", 0, 11),
            FieldSpec::number("colaPct", "Yearly COLA (%)", 0.0, 8.0, 0.1),
            FieldSpec::integer("throughAge", "Compare through age", 70, 105),
        ]
    }

    fn compute(input: &SocialSecurityInput) -> Option<SocialSecurityResult> {
        let base = pia(input.aime);
        if base <= 0.0 {
            return None;
        }
        let fra = full_retirement_age_months(input.birth_year);
        let at_62 = scenario(base, fra, 62 * 12, input);
        let at_full_retirement_age = scenario(base, fra, fra, input);
        let at_70 = scenario(base, fra, 70 * 12, input);
        let chosen = scenario(
            base,
            fra,
            input.claim_age_years * 12 + input.claim_age_months.min(11),
            input,
        );

        Some(SocialSecurityResult {
            pia: base,
            full_retirement_age_months: fra,
            breakeven_70_vs_62: crossover_age(&at_62.cumulative, &at_70.cumulative),
            breakeven_fra_vs_62: crossover_age(
                &at_62.cumulative,
                &at_full_retirement_age.cumulative,
            ),
            breakeven_chosen_vs_62: crossover_age(&at_62.cumulative, &chosen.cumulative),
            at_62,
            at_full_retirement_age,
            at_70,
            chosen,
        })
    }

    fn cards(_input: &SocialSecurityInput, out: &SocialSecurityResult) -> Vec<StatCard> {
        let mut cards = vec![
            StatCard::money("Benefit at your claim age", out.chosen.monthly),
            StatCard::money("PIA (benefit at full retirement age)", out.pia),
            StatCard::new("Full retirement age", age_label(out.full_retirement_age_months)),
            StatCard::money("At 62", out.at_62.monthly),
            StatCard::money("At 70", out.at_70.monthly),
        ];
        if let Some(age) = out.breakeven_70_vs_62 {
            cards.push(StatCard::new("Waiting to 70 pays off at", format!("age {age}")));
        }
        cards
    }

    fn share_text(_input: &SocialSecurityInput, out: &SocialSecurityResult) -> String {
        format!(
            "Claiming Social Security at {} pays {}/month (vs {} at 62 and {} at 70).",
            age_label(out.chosen.claim_months),
            currency(out.chosen.monthly),
            currency(out.at_62.monthly),
            currency(out.at_70.monthly)
        )
    }
}
