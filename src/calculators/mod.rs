mod auto_loan;
mod compound_interest;
mod cost_of_living;
mod federal_tax;
pub mod fields;
mod gs_pay;
mod inflation;
mod loan;
mod military_pay;
mod mortgage;
mod pension;
mod personal_loan;
mod plan_401k;
pub mod present;
mod raise;
mod retirement;
mod savings_goal;
pub mod share;
mod social_security;
mod tax_equivalent_yield;
mod tip;
mod tsp;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::CalcError;

pub use auto_loan::AutoLoan;
pub use compound_interest::CompoundInterest;
pub use cost_of_living::CostOfLiving;
pub use federal_tax::FederalTax;
pub use fields::{FieldKind, FieldSpec};
pub use gs_pay::GsPay;
pub use inflation::Inflation;
pub use loan::Loan;
pub use military_pay::MilitaryPay;
pub use mortgage::Mortgage;
pub use pension::Pension;
pub use personal_loan::PersonalLoan;
pub use plan_401k::Plan401k;
pub use present::StatCard;
pub use raise::Raise;
pub use retirement::Retirement;
pub use savings_goal::SavingsGoal;
pub use social_security::SocialSecurity;
pub use tax_equivalent_yield::TaxEquivalentYield;
pub use tip::Tip;
pub use tsp::Tsp;

/// One widget: a flat input record, a pure projection and its presentation.
pub trait Calculator {
    const SLUG: &'static str;
    const TITLE: &'static str;

    type Input: Serialize + DeserializeOwned + Default;
    type Output: Serialize;

    fn fields() -> Vec<FieldSpec>;

    /// `None` suppresses the results panel.
    fn compute(input: &Self::Input) -> Option<Self::Output>;

    fn cards(input: &Self::Input, output: &Self::Output) -> Vec<StatCard>;

    fn share_text(input: &Self::Input, output: &Self::Output) -> String;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub calculator: &'static str,
    pub input: Value,
    pub result: Option<Value>,
    pub cards: Vec<StatCard>,
    pub share_text: Option<String>,
    pub share_query: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub slug: &'static str,
    pub title: &'static str,
    pub fields: Vec<FieldSpec>,
    pub defaults: Value,
}

pub fn parse_input<C: Calculator>(raw: &Map<String, Value>) -> Result<C::Input, CalcError> {
    let defaults = serde_json::to_value(C::Input::default())?;
    let merged = fields::normalize(&C::fields(), defaults, raw)?;
    Ok(serde_json::from_value(merged)?)
}

pub fn evaluate<C: Calculator>(raw: &Map<String, Value>) -> Result<Evaluation, CalcError> {
    let input = parse_input::<C>(raw)?;
    let share_query = share::encode::<C>(&input)?;

    let (result, cards, share_text) = match C::compute(&input) {
        Some(output) => (
            Some(serde_json::to_value(&output)?),
            C::cards(&input, &output),
            Some(C::share_text(&input, &output)),
        ),
        None => (None, Vec::new(), None),
    };

    Ok(Evaluation {
        calculator: C::SLUG,
        input: serde_json::to_value(&input)?,
        result,
        cards,
        share_text,
        share_query,
    })
}

fn describe<C: Calculator>() -> Result<CatalogEntry, CalcError> {
    Ok(CatalogEntry {
        slug: C::SLUG,
        title: C::TITLE,
        fields: C::fields(),
        defaults: serde_json::to_value(C::Input::default())?,
    })
}

type EvaluateFn = fn(&Map<String, Value>) -> Result<Evaluation, CalcError>;
type DescribeFn = fn() -> Result<CatalogEntry, CalcError>;

#[derive(Clone, Copy)]
pub struct Entry {
    pub slug: &'static str,
    pub title: &'static str,
    evaluate: EvaluateFn,
    describe: DescribeFn,
}

impl Entry {
    pub fn evaluate(&self, raw: &Map<String, Value>) -> Result<Evaluation, CalcError> {
        (self.evaluate)(raw)
    }

    pub fn describe(&self) -> Result<CatalogEntry, CalcError> {
        (self.describe)()
    }
}

const fn entry<C: Calculator>() -> Entry {
    Entry {
        slug: C::SLUG,
        title: C::TITLE,
        evaluate: evaluate::<C>,
        describe: describe::<C>,
    }
}

static REGISTRY: [Entry; 19] = [
    entry::<Loan>(),
    entry::<Mortgage>(),
    entry::<AutoLoan>(),
    entry::<PersonalLoan>(),
    entry::<CompoundInterest>(),
    entry::<Plan401k>(),
    entry::<Tsp>(),
    entry::<Retirement>(),
    entry::<Pension>(),
    entry::<FederalTax>(),
    entry::<Raise>(),
    entry::<SocialSecurity>(),
    entry::<Tip>(),
    entry::<Inflation>(),
    entry::<SavingsGoal>(),
    entry::<TaxEquivalentYield>(),
    entry::<CostOfLiving>(),
    entry::<GsPay>(),
    entry::<MilitaryPay>(),
];

pub fn registry() -> &'static [Entry] {
    &REGISTRY
}

pub fn find(slug: &str) -> Option<&'static Entry> {
    REGISTRY.iter().find(|e| e.slug == slug)
}

pub fn evaluate_slug(slug: &str, raw: &Map<String, Value>) -> Result<Evaluation, CalcError> {
    find(slug)
        .ok_or_else(|| CalcError::UnknownCalculator(slug.to_string()))?
        .evaluate(raw)
}

pub fn catalog() -> Result<Vec<CatalogEntry>, CalcError> {
    REGISTRY.iter().map(Entry::describe).collect()
}
