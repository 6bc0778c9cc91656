use serde::{Deserialize, Serialize};

use super::present::{StatCard, currency, percent};
use super::{Calculator, FieldSpec};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TipInput {
    pub bill: f64,
    pub tip_pct: f64,
    pub people: u32,
    pub round_up: bool,
}

impl Default for TipInput {
    fn default() -> Self {
        Self {
            bill: 84.50,
            tip_pct: 18.0,
            people: 2,
            round_up: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TipResult {
    pub tip: f64,
    pub total: f64,
    pub per_person: f64,
    pub tip_per_person: f64,
    /// Tip as a share of the bill after any rounding.
    pub effective_tip_pct: f64,
}

pub struct Tip;

impl Calculator for Tip {
    const SLUG: &'static str = "tip";
    const TITLE: &'static str = "Tip Calculator";

    type Input = TipInput;
    type Output = TipResult;

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::number("bill", "Bill amount", 0.0, 100_000.0, 0.01),
            FieldSpec::number("tipPct", "Tip (%)", 0.0, 100.0, 0.5),
            FieldSpec::integer("people", "Split between", 1, 50),
            FieldSpec::toggle("roundUp", "Round each share up to the dollar"),
        ]
    }

    fn compute(input: &TipInput) -> Option<TipResult> {
        let bill = input.bill.max(0.0);
        if bill <= 0.0 {
            return None;
        }
        let people = input.people.max(1) as f64;
        let mut per_person = bill * (1.0 + input.tip_pct.max(0.0) / 100.0) / people;
        if input.round_up {
            per_person = (per_person - 1e-9).ceil();
        }
        let total = per_person * people;
        let tip = total - bill;

        Some(TipResult {
            tip,
            total,
            per_person,
            tip_per_person: tip / people,
            effective_tip_pct: tip / bill * 100.0,
        })
    }

    fn cards(input: &TipInput, out: &TipResult) -> Vec<StatCard> {
        let mut cards = vec![
            StatCard::money("Tip", out.tip),
            StatCard::money("Total", out.total),
        ];
        if input.people > 1 {
            cards.push(StatCard::money("Each person pays", out.per_person));
        }
        if input.round_up {
            cards.push(StatCard::percent("Effective tip", out.effective_tip_pct));
        }
        cards
    }

    fn share_text(input: &TipInput, out: &TipResult) -> String {
        if input.people > 1 {
            format!(
                "A {} tip on {} comes to {} each for {} people.",
                percent(out.effective_tip_pct),
                currency(input.bill),
                currency(out.per_person),
                input.people
            )
        } else {
            format!(
                "A {} tip on {} is {} for a total of {}.",
                percent(out.effective_tip_pct),
                currency(input.bill),
                currency(out.tip),
                currency(out.total)
            )
        }
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
    fn splits_tip_and_total() {
        let out = Tip::compute(&TipInput {
            bill: 100.0,
            tip_pct: 20.0,
            people: 4,
            round_up: false,
        })
        .expect("result");
        assert_approx(out.tip, 20.0);
        assert_approx(out.total, 120.0);
        assert_approx(out.per_person, 30.0);
        assert_approx(out.tip_per_person, 5.0);
    }

    #[test]
    fn round_up_raises_each_share_to_whole_dollars() {
        // 84.50 * 1.18 / 2 = 49.855
        let out = Tip::compute(&TipInput {
            round_up: true,
            ..TipInput::default()
        })
        .expect("result");
        assert_approx(out.per_person, 50.0);
        assert_approx(out.total, 100.0);
        assert!(out.effective_tip_pct > 18.0);
    }

    #[test]
    fn exact_dollar_shares_are_not_rounded_further() {
        let out = Tip::compute(&TipInput {
            bill: 50.0,
            tip_pct: 20.0,
            people: 2,
            round_up: true,
        })
        .expect("result");
        assert_approx(out.per_person, 30.0);
    }

    #[test]
    fn empty_bill_shows_nothing() {
        assert!(
            Tip::compute(&TipInput {
                bill: 0.0,
                ..TipInput::default()
            })
            .is_none()
        );
    }
}
