use serde::{Deserialize, Serialize};

use super::present::{StatCard, percent, whole_dollars};
use super::{Calculator, FieldSpec};
use crate::reference::{self, CityIndex};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostOfLivingInput {
    pub salary: f64,
    pub from_city: String,
    pub to_city: String,
}

impl Default for CostOfLivingInput {
    fn default() -> Self {
        Self {
            salary: 75_000.0,
            from_city: "austin-tx".to_string(),
            to_city: "seattle-wa".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryComparison {
    pub category: &'static str,
    pub from_index: f64,
    pub to_index: f64,
    pub difference_pct: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostOfLivingResult {
    pub from_name: String,
    pub to_name: String,
    pub equivalent_salary: f64,
    pub salary_change: f64,
    pub cost_difference_pct: f64,
    pub categories: Vec<CategoryComparison>,
}

fn category_indices(city: &CityIndex) -> [(&'static str, f64); 5] {
    [
        ("Housing", city.housing),
        ("Groceries", city.groceries),
        ("Utilities", city.utilities),
        ("Transportation", city.transportation),
        ("Healthcare", city.healthcare),
    ]
}

fn city_keys() -> Vec<&'static str> {
    match reference::cost_of_living() {
        Ok(table) => table.cities.iter().map(|c| c.key.as_str()).collect(),
        Err(err) => {
            tracing::error!("cost of living cities unavailable: {err}");
            Vec::new()
        }
    }
}

pub struct CostOfLiving;

impl Calculator for CostOfLiving {
    const SLUG: &'static str = "cost-of-living";
    const TITLE: &'static str = "Cost of Living Calculator";

    type Input = CostOfLivingInput;
    type Output = CostOfLivingResult;

    fn fields() -> Vec<FieldSpec> {
        let cities = city_keys();
        vec![
            FieldSpec::number("salary", "Current salary", 0.0, 10_000_000.0, 1_000.0),
            FieldSpec::choice("fromCity", "Moving from", &cities),
            FieldSpec::choice("toCity", "Moving to", &cities),
        ]
    }

    fn compute(input: &CostOfLivingInput) -> Option<CostOfLivingResult> {
        let salary = input.salary.max(0.0);
        if salary <= 0.0 {
            return None;
        }
        let table = reference::cost_of_living()
            .map_err(|err| tracing::error!("{err}"))
            .ok()?;
        let from = table.city(&input.from_city)?;
        let to = table.city(&input.to_city)?;

        let ratio = to.composite / from.composite;
        let equivalent_salary = salary * ratio;
        let categories = category_indices(from)
            .into_iter()
            .zip(category_indices(to))
            .map(|((category, from_index), (_, to_index))| CategoryComparison {
                category,
                from_index,
                to_index,
                difference_pct: (to_index / from_index - 1.0) * 100.0,
            })
            .collect();

        Some(CostOfLivingResult {
            from_name: from.name.clone(),
            to_name: to.name.clone(),
            equivalent_salary,
            salary_change: equivalent_salary - salary,
            cost_difference_pct: (ratio - 1.0) * 100.0,
            categories,
        })
    }

    fn cards(_input: &CostOfLivingInput, out: &CostOfLivingResult) -> Vec<StatCard> {
        let mut cards = vec![
            StatCard::dollars("Equivalent salary", out.equivalent_salary),
            StatCard::dollars("Difference", out.salary_change),
            StatCard::percent("Overall cost difference", out.cost_difference_pct),
        ];
        if let Some(housing) = out.categories.first() {
            cards.push(StatCard::percent("Housing difference", housing.difference_pct));
        }
        cards
    }

    fn share_text(input: &CostOfLivingInput, out: &CostOfLivingResult) -> String {
        let mut text = format!(
            "{} in {} is like earning {} in {}.",
            whole_dollars(input.salary),
            out.from_name,
            whole_dollars(out.equivalent_salary),
            out.to_name
        );
        if out.cost_difference_pct.abs() > 0.005 {
            text.push_str(&format!(
                " Living costs differ by {}.",
                percent(out.cost_difference_pct)
            ));
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salary_scales_by_composite_ratio() {
        let out = CostOfLiving::compute(&CostOfLivingInput {
            salary: 100_000.0,
            from_city: "national-average".to_string(),
            to_city: "chicago-il".to_string(),
        })
        .expect("result");
        assert!((out.equivalent_salary - 118_000.0).abs() < 1e-6);
        assert!((out.cost_difference_pct - 18.0).abs() < 1e-9);
        assert_eq!(out.categories.len(), 5);
        assert_eq!(out.categories[0].category, "Housing");
    }

    #[test]
    fn same_city_changes_nothing() {
        let out = CostOfLiving::compute(&CostOfLivingInput {
            to_city: "austin-tx".to_string(),
            ..CostOfLivingInput::default()
        })
        .expect("result");
        assert!((out.equivalent_salary - 75_000.0).abs() < 1e-9);
        assert!(out.categories.iter().all(|c| c.difference_pct.abs() < 1e-12));
        assert!(!CostOfLiving::share_text(&CostOfLivingInput::default(), &out).contains("differ"));
    }

    #[test]
    fn default_cities_are_offered_as_choices() {
        let fields = CostOfLiving::fields();
        let defaults = CostOfLivingInput::default();
        let crate::calculators::FieldKind::Choice { options } = &fields[1].kind else {
            panic!("fromCity should be a choice");
        };
        assert!(options.contains(&defaults.from_city.as_str()));
        assert!(options.contains(&defaults.to_city.as_str()));
    }

    #[test]
    fn unknown_city_shows_nothing() {
        assert!(
            CostOfLiving::compute(&CostOfLivingInput {
                from_city: "atlantis".to_string(),
                ..CostOfLivingInput::default()
            })
            .is_none()
        );
    }
}
