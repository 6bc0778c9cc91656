use serde::{Deserialize, Serialize};

use super::present::{StatCard, currency, percent, whole_dollars};
use super::{Calculator, FieldSpec};
use crate::reference::{self, GS_GRADES, GS_STEPS, GsPayTable};

const PAY_PERIODS_PER_YEAR: f64 = 26.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GsPayInput {
    pub grade: u32,
    pub step: u32,
    pub locality: String,
}

impl Default for GsPayInput {
    fn default() -> Self {
        Self {
            grade: 12,
            step: 1,
            locality: "rest-of-us".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepPay {
    pub step: u32,
    pub base: f64,
    pub adjusted: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GsPayResult {
    pub table_year: u32,
    pub locality_name: String,
    pub locality_pct: f64,
    pub base_annual: f64,
    pub annual: f64,
    pub monthly: f64,
    pub biweekly: f64,
    pub hourly: f64,
    /// Locality pay was cut back to the statutory cap.
    pub capped: bool,
    pub steps: Vec<StepPay>,
}

fn adjusted(table: &GsPayTable, base: f64, locality_pct: f64) -> (f64, bool) {
    let raw = (base * (1.0 + locality_pct / 100.0)).round();
    if raw > table.pay_cap {
        (table.pay_cap, true)
    } else {
        (raw, false)
    }
}

fn locality_keys() -> Vec<&'static str> {
    match reference::gs_pay() {
        Ok(table) => table.localities.iter().map(|l| l.key.as_str()).collect(),
        Err(err) => {
            tracing::error!("GS localities unavailable: {err}");
            Vec::new()
        }
    }
}

pub struct GsPay;

impl Calculator for GsPay {
    const SLUG: &'static str = "gs-pay";
    const TITLE: &'static str = "GS Pay Calculator";

    type Input = GsPayInput;
    type Output = GsPayResult;

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::integer("grade", "Grade (GS-)", 1, GS_GRADES as i64),
            FieldSpec::integer("step", "Step", 1, GS_STEPS as i64),
            FieldSpec::choice("locality", "Locality", &locality_keys()),
        ]
    }

    fn compute(input: &GsPayInput) -> Option<GsPayResult> {
        let table = reference::gs_pay()
            .map_err(|err| tracing::error!("{err}"))
            .ok()?;
        let locality = table.locality(&input.locality)?;
        let base_annual = table.base_pay(input.grade, input.step)?;
        let (annual, capped) = adjusted(table, base_annual, locality.pct);

        let steps = (1..=GS_STEPS as u32)
            .filter_map(|step| {
                let base = table.base_pay(input.grade, step)?;
                Some(StepPay {
                    step,
                    base,
                    adjusted: adjusted(table, base, locality.pct).0,
                })
            })
            .collect();

        Some(GsPayResult {
            table_year: table.year,
            locality_name: locality.name.clone(),
            locality_pct: locality.pct,
            base_annual,
            annual,
            monthly: annual / 12.0,
            biweekly: annual / PAY_PERIODS_PER_YEAR,
            hourly: annual / table.hours_per_year,
            capped,
            steps,
        })
    }

    fn cards(_input: &GsPayInput, out: &GsPayResult) -> Vec<StatCard> {
        let mut cards = vec![
            StatCard::dollars("Annual salary", out.annual),
            StatCard::money("Monthly", out.monthly),
            StatCard::money("Biweekly paycheck", out.biweekly),
            StatCard::money("Hourly", out.hourly),
            StatCard::dollars("Base pay", out.base_annual),
            StatCard::percent("Locality adjustment", out.locality_pct),
        ];
        if out.capped {
            cards.push(StatCard::new("Note", "Limited by the pay cap"));
        }
        cards
    }

    fn share_text(input: &GsPayInput, out: &GsPayResult) -> String {
        format!(
            "GS-{} step {} in {} pays {} a year ({} an hour) in {} with {} locality pay.",
            input.grade,
            input.step,
            out.locality_name,
            whole_dollars(out.annual),
            currency(out.hourly),
            out.table_year,
            percent(out.locality_pct)
        )
    }
}
