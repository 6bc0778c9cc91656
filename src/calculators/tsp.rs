use serde::{Deserialize, Serialize};

use super::plan_401k::{employee_deferral, salary_in_year};
use super::present::{StatCard, percent, whole_dollars};
use super::{Calculator, FieldSpec};
use crate::core::compounding::{
    AgeSnapshot, GrowthParams, PeriodContribution, final_balance, project, with_ages,
};

const AUTOMATIC_CONTRIBUTION_PCT: f64 = 1.0;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TspFund {
    G,
    F,
    C,
    S,
    I,
    #[default]
    L2050,
}

impl TspFund {
    const OPTIONS: &'static [&'static str] = &["g", "f", "c", "s", "i", "l2050"];

    /// Long-run annual return assumption, in percent.
    pub fn assumed_return(self) -> f64 {
        match self {
            TspFund::G => 2.9,
            TspFund::F => 3.5,
            TspFund::C => 10.5,
            TspFund::S => 8.9,
            TspFund::I => 5.3,
            TspFund::L2050 => 7.6,
        }
    }

    fn name(self) -> &'static str {
        match self {
            TspFund::G => "G Fund",
            TspFund::F => "F Fund",
            TspFund::C => "C Fund",
            TspFund::S => "S Fund",
            TspFund::I => "I Fund",
            TspFund::L2050 => "L 2050",
        }
    }
}

/// Agency automatic 1% plus the match: dollar for dollar on the first 3%,
/// fifty cents on the dollar for the next 2%. Percentages of salary.
pub fn agency_contribution_pct(employee_pct: f64) -> f64 {
    let employee_pct = employee_pct.max(0.0);
    let full_match = employee_pct.min(3.0);
    let half_match = (employee_pct - 3.0).clamp(0.0, 2.0) * 0.5;
    AUTOMATIC_CONTRIBUTION_PCT + full_match + half_match
}

/// Agency dollars for a year, matched on the employee deferral that actually
/// went in. The automatic 1% is paid on full salary regardless.
pub fn agency_contribution(salary: f64, deferred: f64) -> f64 {
    if salary <= 0.0 {
        return 0.0;
    }
    let deferred_pct = deferred.max(0.0) / salary * 100.0;
    salary * agency_contribution_pct(deferred_pct) / 100.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TspInput {
    pub current_age: u32,
    pub retirement_age: u32,
    pub annual_salary: f64,
    pub current_balance: f64,
    pub contribution_pct: f64,
    pub salary_growth_pct: f64,
    pub fund: TspFund,
    pub agency_contributions: bool,
}

impl Default for TspInput {
    fn default() -> Self {
        Self {
            current_age: 35,
            retirement_age: 62,
            annual_salary: 85_000.0,
            current_balance: 40_000.0,
            contribution_pct: 5.0,
            salary_growth_pct: 2.0,
            fund: TspFund::L2050,
            agency_contributions: true,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TspResult {
    pub assumed_return: f64,
    pub agency_pct: f64,
    pub final_balance: f64,
    pub employee_contributions: f64,
    pub agency_contributions: f64,
    pub investment_growth: f64,
    pub yearly: Vec<AgeSnapshot>,
}

pub struct Tsp;

impl Calculator for Tsp {
    const SLUG: &'static str = "tsp";
    const TITLE: &'static str = "TSP Calculator";

    type Input = TspInput;
    type Output = TspResult;

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::integer("currentAge", "Current age", 18, 80),
            FieldSpec::integer("retirementAge", "Retirement age", 50, 80),
            FieldSpec::number("annualSalary", "Annual basic pay", 0.0, 500_000.0, 500.0),
            FieldSpec::number(
                "currentBalance",
                "Current TSP balance",
                0.0,
                10_000_000.0,
                1_000.0,
            ),
            FieldSpec::number(
                "contributionPct",
                "Your contribution (% of pay)",
                0.0,
                100.0,
                0.5,
            ),
            FieldSpec::number("salaryGrowthPct", "Annual pay increase (%)", 0.0, 10.0, 0.1),
            FieldSpec::choice("fund", "Fund", TspFund::OPTIONS),
            FieldSpec::toggle("agencyContributions", "FERS agency contributions"),
        ]
    }

    fn compute(input: &TspInput) -> Option<TspResult> {
        let assumed_return = input.fund.assumed_return();
        let params = GrowthParams {
            starting_balance: input.current_balance.max(0.0),
            annual_rate_pct: assumed_return,
            periods_per_year: 12,
            years: input.retirement_age.saturating_sub(input.current_age),
        };

        let contribution_for_year = |year: u32| {
            let salary = salary_in_year(input.annual_salary, input.salary_growth_pct, year);
            let age = input.current_age + year;
            let own = employee_deferral(salary, input.contribution_pct, age, true);
            let agency = if input.agency_contributions {
                agency_contribution(salary, own)
            } else {
                0.0
            };
            PeriodContribution {
                own: own / 12.0,
                employer: agency / 12.0,
            }
        };
        let first_year_salary = salary_in_year(input.annual_salary, input.salary_growth_pct, 0);
        let first_year = contribution_for_year(0);
        let agency_pct = if first_year_salary > 0.0 {
            first_year.employer * 12.0 / first_year_salary * 100.0
        } else {
            0.0
        };
        let snapshots = project(&params, contribution_for_year);

        let balance = final_balance(&snapshots, params.starting_balance);
        let (employee, agency, growth) = snapshots
            .last()
            .map(|s| (s.own_contributions, s.employer_contributions, s.growth))
            .unwrap_or((0.0, 0.0, 0.0));

        Some(TspResult {
            assumed_return,
            agency_pct,
            final_balance: balance,
            employee_contributions: employee,
            agency_contributions: agency,
            investment_growth: growth,
            yearly: with_ages(&snapshots, input.current_age),
        })
    }

    fn cards(_input: &TspInput, out: &TspResult) -> Vec<StatCard> {
        vec![
            StatCard::dollars("TSP balance at retirement", out.final_balance),
            StatCard::dollars("Your contributions", out.employee_contributions),
            StatCard::dollars("Agency contributions", out.agency_contributions),
            StatCard::dollars("Investment growth", out.investment_growth),
            StatCard::percent("Agency contribution rate", out.agency_pct),
            StatCard::percent("Assumed return", out.assumed_return),
        ]
    }

    fn share_text(input: &TspInput, out: &TspResult) -> String {
        format!(
            "Putting {} of pay into the {} could grow my TSP to {} by age {}.",
            percent(input.contribution_pct),
            input.fund.name(),
            whole_dollars(out.final_balance),
            input.retirement_age
        )
    }
}
