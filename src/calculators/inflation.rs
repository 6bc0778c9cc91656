use serde::{Deserialize, Serialize};

use super::present::{StatCard, whole_dollars};
use super::{Calculator, FieldSpec};
use crate::core::compounding::future_value;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InflationInput {
    pub amount: f64,
    pub inflation_pct: f64,
    pub years: u32,
}

impl Default for InflationInput {
    fn default() -> Self {
        Self {
            amount: 10_000.0,
            inflation_pct: 3.0,
            years: 20,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InflationYear {
    pub year: u32,
    pub future_cost: f64,
    pub purchasing_power: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InflationResult {
    /// What today's amount will cost after `years`.
    pub future_cost: f64,
    /// What today's amount will buy after `years`, in today's dollars.
    pub purchasing_power: f64,
    pub cumulative_inflation_pct: f64,
    pub yearly: Vec<InflationYear>,
}

pub struct Inflation;

impl Calculator for Inflation {
    const SLUG: &'static str = "inflation";
    const TITLE: &'static str = "Inflation Calculator";

    type Input = InflationInput;
    type Output = InflationResult;

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::number("amount", "Amount today", 0.0, 100_000_000.0, 100.0),
            FieldSpec::number("inflationPct", "Yearly inflation (%)", 0.0, 20.0, 0.1),
            FieldSpec::integer("years", "Years", 1, 100),
        ]
    }

    fn compute(input: &InflationInput) -> Option<InflationResult> {
        let amount = input.amount.max(0.0);
        if amount <= 0.0 {
            return None;
        }
        let yearly = (1..=input.years)
            .map(|year| {
                let factor = future_value(1.0, input.inflation_pct, 1, year as f64);
                InflationYear {
                    year,
                    future_cost: amount * factor,
                    purchasing_power: amount / factor,
                }
            })
            .collect();
        let factor = future_value(1.0, input.inflation_pct, 1, input.years as f64);

        Some(InflationResult {
            future_cost: amount * factor,
            purchasing_power: amount / factor,
            cumulative_inflation_pct: (factor - 1.0) * 100.0,
            yearly,
        })
    }

    fn cards(input: &InflationInput, out: &InflationResult) -> Vec<StatCard> {
        vec![
            StatCard::new("Years", input.years.to_string()),
            StatCard::dollars("Future cost", out.future_cost),
            StatCard::dollars("Purchasing power", out.purchasing_power),
            StatCard::percent("Total price increase", out.cumulative_inflation_pct),
        ]
    }

    fn share_text(input: &InflationInput, out: &InflationResult) -> String {
        format!(
            "At {}% inflation, {} today costs {} in {} years.",
            input.inflation_pct,
            whole_dollars(input.amount),
            whole_dollars(out.future_cost),
            input.years
        )
    }
}
