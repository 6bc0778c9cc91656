//! Reference tables compiled into the binary and parsed on first use.

use std::sync::OnceLock;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::CalcError;

const COST_OF_LIVING_JSON: &str = include_str!("../data/cost_of_living.json");
const GS_PAY_JSON: &str = include_str!("../data/gs_pay_2024.json");
const MILITARY_PAY_JSON: &str = include_str!("../data/military_pay_2024.json");

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityIndex {
    pub key: String,
    pub name: String,
    pub composite: f64,
    pub housing: f64,
    pub groceries: f64,
    pub utilities: f64,
    pub transportation: f64,
    pub healthcare: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostOfLivingTable {
    pub baseline: String,
    pub cities: Vec<CityIndex>,
}

impl CostOfLivingTable {
    pub fn city(&self, key: &str) -> Option<&CityIndex> {
        self.cities.iter().find(|c| c.key == key)
    }

    fn validate(self) -> Result<Self, String> {
        if self.cities.is_empty() {
            return Err("no cities".to_string());
        }
        match self.cities.iter().find(|c| c.composite <= 0.0) {
            Some(city) => Err(format!("{} has a non-positive composite index", city.key)),
            None => Ok(self),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Locality {
    pub key: String,
    pub name: String,
    pub pct: f64,
}

pub const GS_GRADES: usize = 15;
pub const GS_STEPS: usize = 10;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GsPayTable {
    pub year: u32,
    pub hours_per_year: f64,
    pub pay_cap: f64,
    /// Annual base pay indexed by `[grade - 1][step - 1]`.
    pub base: Vec<Vec<f64>>,
    pub localities: Vec<Locality>,
}

impl GsPayTable {
    pub fn base_pay(&self, grade: u32, step: u32) -> Option<f64> {
        let row = self.base.get((grade as usize).checked_sub(1)?)?;
        row.get((step as usize).checked_sub(1)?).copied()
    }

    pub fn locality(&self, key: &str) -> Option<&Locality> {
        self.localities.iter().find(|l| l.key == key)
    }

    fn validate(self) -> Result<Self, String> {
        if self.base.len() != GS_GRADES {
            return Err(format!("expected {GS_GRADES} grades, found {}", self.base.len()));
        }
        if let Some(grade) = self.base.iter().position(|row| row.len() != GS_STEPS) {
            return Err(format!("GS-{} does not have {GS_STEPS} steps", grade + 1));
        }
        if self.localities.is_empty() || self.hours_per_year <= 0.0 {
            return Err("missing localities or hours per year".to_string());
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SubsistenceAllowance {
    pub enlisted: f64,
    pub officer: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MilitaryGrade {
    pub key: String,
    pub label: String,
    pub officer: bool,
    /// `(minimum years of service, monthly basic pay)` ascending by years.
    pub pay: Vec<(u32, f64)>,
}

impl MilitaryGrade {
    /// Pay bracket in effect at `years` of service, `None` before the grade
    /// is normally reachable.
    pub fn bracket(&self, years: u32) -> Option<(u32, f64)> {
        self.pay.iter().rev().find(|(min, _)| *min <= years).copied()
    }

    /// Next longevity raise after `years`.
    pub fn next_bracket(&self, years: u32) -> Option<(u32, f64)> {
        self.pay.iter().find(|(min, _)| *min > years).copied()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MilitaryPayTable {
    pub year: u32,
    pub bas: SubsistenceAllowance,
    pub grades: Vec<MilitaryGrade>,
}

impl MilitaryPayTable {
    pub fn grade(&self, key: &str) -> Option<&MilitaryGrade> {
        self.grades.iter().find(|g| g.key == key)
    }

    fn validate(self) -> Result<Self, String> {
        for grade in &self.grades {
            if grade.pay.is_empty() {
                return Err(format!("{} has no pay brackets", grade.key));
            }
            if grade.pay.windows(2).any(|w| w[0].0 >= w[1].0) {
                return Err(format!("{} brackets are not ascending", grade.key));
            }
        }
        Ok(self)
    }
}

type Loaded<T> = OnceLock<Result<T, String>>;

static COST_OF_LIVING: Loaded<CostOfLivingTable> = OnceLock::new();
static GS_PAY: Loaded<GsPayTable> = OnceLock::new();
static MILITARY_PAY: Loaded<MilitaryPayTable> = OnceLock::new();

fn load<T: DeserializeOwned>(
    cell: &'static Loaded<T>,
    table: &'static str,
    raw: &str,
    validate: fn(T) -> Result<T, String>,
) -> Result<&'static T, CalcError> {
    cell.get_or_init(|| {
        serde_json::from_str::<T>(raw)
            .map_err(|e| e.to_string())
            .and_then(validate)
    })
    .as_ref()
    .map_err(|reason| CalcError::Reference {
        table,
        reason: reason.clone(),
    })
}

pub fn cost_of_living() -> Result<&'static CostOfLivingTable, CalcError> {
    load(
        &COST_OF_LIVING,
        "cost_of_living",
        COST_OF_LIVING_JSON,
        CostOfLivingTable::validate,
    )
}

pub fn gs_pay() -> Result<&'static GsPayTable, CalcError> {
    load(&GS_PAY, "gs_pay", GS_PAY_JSON, GsPayTable::validate)
}

pub fn military_pay() -> Result<&'static MilitaryPayTable, CalcError> {
    load(
        &MILITARY_PAY,
        "military_pay",
        MILITARY_PAY_JSON,
        MilitaryPayTable::validate,
    )
}

/// Parses every table so a broken build fails at startup rather than on the
/// first request.
pub fn preload() -> Result<(), CalcError> {
    cost_of_living()?;
    gs_pay()?;
    military_pay()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_table_parses() {
        preload().expect("reference tables");
    }

    #[test]
    fn national_average_is_the_baseline() {
        let table = cost_of_living().expect("cost of living");
        let avg = table.city("national-average").expect("national average");
        assert_eq!(avg.composite, 100.0);
        assert!(table.city("atlantis").is_none());
    }

    #[test]
    fn gs_lookup_is_one_based() {
        let table = gs_pay().expect("gs pay");
        assert_eq!(table.base_pay(1, 1), Some(22_360.0));
        assert_eq!(table.base_pay(15, 10), Some(162_672.0));
        assert_eq!(table.base_pay(0, 1), None);
        assert_eq!(table.base_pay(16, 1), None);
        assert_eq!(table.base_pay(12, 11), None);
    }

    #[test]
    fn gs_steps_increase_within_each_grade() {
        let table = gs_pay().expect("gs pay");
        for row in &table.base {
            assert!(row.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn military_brackets_follow_years_of_service() {
        let table = military_pay().expect("military pay");
        let e5 = table.grade("e-5").expect("e-5");
        assert_eq!(e5.bracket(0), Some((0, 2_872.50)));
        assert_eq!(e5.bracket(5), Some((4, 3_366.90)));
        assert_eq!(e5.bracket(30), Some((12, 4_078.20)));
        assert_eq!(e5.next_bracket(5), Some((6, 3_603.30)));
        assert_eq!(e5.next_bracket(12), None);

        let e9 = table.grade("e-9").expect("e-9");
        assert_eq!(e9.bracket(4), None);
    }
}
