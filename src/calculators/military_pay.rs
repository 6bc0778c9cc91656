use serde::{Deserialize, Serialize};

use super::present::{StatCard, currency, whole_dollars};
use super::{Calculator, FieldSpec};
use crate::reference;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MilitaryPayInput {
    pub grade: String,
    pub years_of_service: u32,
    pub include_bas: bool,
}

impl Default for MilitaryPayInput {
    fn default() -> Self {
        Self {
            grade: "e-5".to_string(),
            years_of_service: 6,
            include_bas: true,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LongevityRaise {
    pub at_years: u32,
    pub monthly_basic_pay: f64,
    pub increase: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MilitaryPayResult {
    pub table_year: u32,
    pub grade_label: String,
    pub monthly_basic_pay: f64,
    pub annual_basic_pay: f64,
    pub monthly_bas: f64,
    pub monthly_total: f64,
    pub annual_total: f64,
    pub next_raise: Option<LongevityRaise>,
}

fn grade_keys() -> Vec<&'static str> {
    match reference::military_pay() {
        Ok(table) => table.grades.iter().map(|g| g.key.as_str()).collect(),
        Err(err) => {
            tracing::error!("military pay grades unavailable: {err}");
            Vec::new()
        }
    }
}

pub struct MilitaryPay;

impl Calculator for MilitaryPay {
    const SLUG: &'static str = "military-pay";
    const TITLE: &'static str = "Military Pay Calculator";

    type Input = MilitaryPayInput;
    type Output = MilitaryPayResult;

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::choice("grade", "Pay grade", &grade_keys()),
            FieldSpec::integer("yearsOfService", "Years of service", 0, 40),
            FieldSpec::toggle("includeBas", "Include BAS"),
        ]
    }

    /// `None` for an unknown grade or when the grade is not yet reachable at
    /// the given years of service.
    fn compute(input: &MilitaryPayInput) -> Option<MilitaryPayResult> {
        let table = reference::military_pay()
            .map_err(|err| tracing::error!("{err}"))
            .ok()?;
        let grade = table.grade(&input.grade)?;
        let (_, monthly_basic_pay) = grade.bracket(input.years_of_service)?;

        let monthly_bas = match (input.include_bas, grade.officer) {
            (false, _) => 0.0,
            (true, true) => table.bas.officer,
            (true, false) => table.bas.enlisted,
        };
        let monthly_total = monthly_basic_pay + monthly_bas;

        Some(MilitaryPayResult {
            table_year: table.year,
            grade_label: grade.label.clone(),
            monthly_basic_pay,
            annual_basic_pay: monthly_basic_pay * 12.0,
            monthly_bas,
            monthly_total,
            annual_total: monthly_total * 12.0,
            next_raise: grade
                .next_bracket(input.years_of_service)
                .map(|(at_years, pay)| LongevityRaise {
                    at_years,
                    monthly_basic_pay: pay,
                    increase: pay - monthly_basic_pay,
                }),
        })
    }

    fn cards(_input: &MilitaryPayInput, out: &MilitaryPayResult) -> Vec<StatCard> {
        let mut cards = vec![
            StatCard::money("Monthly basic pay", out.monthly_basic_pay),
            StatCard::dollars("Annual basic pay", out.annual_basic_pay),
        ];
        if out.monthly_bas > 0.0 {
            cards.push(StatCard::money("BAS", out.monthly_bas));
            cards.push(StatCard::money("Monthly total", out.monthly_total));
        }
        if let Some(raise) = &out.next_raise {
            cards.push(StatCard::new(
                "Next longevity raise",
                format!("{} at {} years", currency(raise.increase), raise.at_years),
            ));
        }
        cards
    }

    fn share_text(input: &MilitaryPayInput, out: &MilitaryPayResult) -> String {
        format!(
            "An {} with {} years of service earns {} a month in basic pay ({} a year, {} rates).",
            out.grade_label,
            input.years_of_service,
            currency(out.monthly_basic_pay),
            whole_dollars(out.annual_basic_pay),
            out.table_year
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_e5_with_bas() {
        let out = MilitaryPay::compute(&MilitaryPayInput::default()).expect("result");
        assert_eq!(out.monthly_basic_pay, 3_603.30);
        assert_eq!(out.monthly_bas, 460.25);
        assert!((out.annual_total - (3_603.30 + 460.25) * 12.0).abs() < 1e-9);
        let raise = out.next_raise.expect("next raise");
        assert_eq!(raise.at_years, 8);
        assert!((raise.increase - (3_850.80 - 3_603.30)).abs() < 1e-9);
    }

    #[test]
    fn officers_receive_officer_bas() {
        let out = MilitaryPay::compute(&MilitaryPayInput {
            grade: "o-3".to_string(),
            years_of_service: 4,
            include_bas: true,
        })
        .expect("result");
        assert_eq!(out.monthly_bas, 316.98);
        assert_eq!(out.monthly_basic_pay, 6_825.00);
    }

    #[test]
    fn bas_can_be_left_out() {
        let out = MilitaryPay::compute(&MilitaryPayInput {
            include_bas: false,
            ..MilitaryPayInput::default()
        })
        .expect("result");
        assert_eq!(out.monthly_bas, 0.0);
        assert_eq!(out.monthly_total, out.monthly_basic_pay);
    }

    #[test]
    fn senior_grade_before_eligibility_shows_nothing() {
        assert!(
            MilitaryPay::compute(&MilitaryPayInput {
                grade: "e-9".to_string(),
                years_of_service: 3,
                include_bas: true,
            })
            .is_none()
        );
    }
}
