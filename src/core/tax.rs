use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilingStatus {
    #[default]
    Single,
    MarriedJoint,
    MarriedSeparate,
    HeadOfHousehold,
}

impl FilingStatus {
    pub const OPTIONS: &'static [&'static str] = &[
        "single",
        "married-joint",
        "married-separate",
        "head-of-household",
    ];

    pub fn label(self) -> &'static str {
        match self {
            FilingStatus::Single => "single",
            FilingStatus::MarriedJoint => "married filing jointly",
            FilingStatus::MarriedSeparate => "married filing separately",
            FilingStatus::HeadOfHousehold => "head of household",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    pub min: f64,
    pub max: Option<f64>,
    pub rate: f64,
}

const fn bracket(min: f64, max: f64, rate: f64) -> Bracket {
    Bracket {
        min,
        max: Some(max),
        rate,
    }
}

const fn top(min: f64, rate: f64) -> Bracket {
    Bracket {
        min,
        max: None,
        rate,
    }
}

const SINGLE_2024: [Bracket; 7] = [
    bracket(0.0, 11_600.0, 0.10),
    bracket(11_600.0, 47_150.0, 0.12),
    bracket(47_150.0, 100_525.0, 0.22),
    bracket(100_525.0, 191_950.0, 0.24),
    bracket(191_950.0, 243_725.0, 0.32),
    bracket(243_725.0, 609_350.0, 0.35),
    top(609_350.0, 0.37),
];

const MARRIED_JOINT_2024: [Bracket; 7] = [
    bracket(0.0, 23_200.0, 0.10),
    bracket(23_200.0, 94_300.0, 0.12),
    bracket(94_300.0, 201_050.0, 0.22),
    bracket(201_050.0, 383_900.0, 0.24),
    bracket(383_900.0, 487_450.0, 0.32),
    bracket(487_450.0, 731_200.0, 0.35),
    top(731_200.0, 0.37),
];

const MARRIED_SEPARATE_2024: [Bracket; 7] = [
    bracket(0.0, 11_600.0, 0.10),
    bracket(11_600.0, 47_150.0, 0.12),
    bracket(47_150.0, 100_525.0, 0.22),
    bracket(100_525.0, 191_950.0, 0.24),
    bracket(191_950.0, 243_725.0, 0.32),
    bracket(243_725.0, 365_600.0, 0.35),
    top(365_600.0, 0.37),
];

const HEAD_OF_HOUSEHOLD_2024: [Bracket; 7] = [
    bracket(0.0, 16_550.0, 0.10),
    bracket(16_550.0, 63_100.0, 0.12),
    bracket(63_100.0, 100_500.0, 0.22),
    bracket(100_500.0, 191_950.0, 0.24),
    bracket(191_950.0, 243_700.0, 0.32),
    bracket(243_700.0, 609_350.0, 0.35),
    top(609_350.0, 0.37),
];

const SOCIAL_SECURITY_RATE: f64 = 0.062;
const SOCIAL_SECURITY_WAGE_BASE: f64 = 168_600.0;
const MEDICARE_RATE: f64 = 0.0145;
const ADDITIONAL_MEDICARE_RATE: f64 = 0.009;

pub fn federal_brackets(status: FilingStatus) -> &'static [Bracket] {
    match status {
        FilingStatus::Single => &SINGLE_2024,
        FilingStatus::MarriedJoint => &MARRIED_JOINT_2024,
        FilingStatus::MarriedSeparate => &MARRIED_SEPARATE_2024,
        FilingStatus::HeadOfHousehold => &HEAD_OF_HOUSEHOLD_2024,
    }
}

pub fn standard_deduction(status: FilingStatus) -> f64 {
    match status {
        FilingStatus::Single | FilingStatus::MarriedSeparate => 14_600.0,
        FilingStatus::MarriedJoint => 29_200.0,
        FilingStatus::HeadOfHousehold => 21_900.0,
    }
}

fn additional_medicare_threshold(status: FilingStatus) -> f64 {
    match status {
        FilingStatus::MarriedJoint => 250_000.0,
        FilingStatus::MarriedSeparate => 125_000.0,
        FilingStatus::Single | FilingStatus::HeadOfHousehold => 200_000.0,
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BracketSlice {
    pub rate: f64,
    pub taxable: f64,
    pub tax: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BracketTax {
    pub total: f64,
    pub marginal_rate: f64,
    pub effective_rate: f64,
    pub slices: Vec<BracketSlice>,
}

/// Walks ascending brackets and taxes the slice of `income` that falls in
/// each one.
pub fn walk_brackets(income: f64, brackets: &[Bracket]) -> BracketTax {
    let income = if income.is_finite() { income.max(0.0) } else { 0.0 };
    let mut total = 0.0;
    let mut marginal_rate = 0.0;
    let mut slices = Vec::new();

    for bracket in brackets {
        if income <= bracket.min {
            break;
        }
        let upper = bracket.max.map_or(income, |max| income.min(max));
        let taxable = upper - bracket.min;
        let tax = taxable * bracket.rate;
        total += tax;
        marginal_rate = bracket.rate;
        slices.push(BracketSlice {
            rate: bracket.rate,
            taxable,
            tax,
        });
    }

    BracketTax {
        total,
        marginal_rate,
        effective_rate: if income > 0.0 { total / income } else { 0.0 },
        slices,
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Fica {
    pub social_security: f64,
    pub medicare: f64,
    pub additional_medicare: f64,
}

impl Fica {
    pub fn total(&self) -> f64 {
        self.social_security + self.medicare + self.additional_medicare
    }
}

pub fn fica(wages: f64, status: FilingStatus) -> Fica {
    let wages = wages.max(0.0);
    Fica {
        social_security: wages.min(SOCIAL_SECURITY_WAGE_BASE) * SOCIAL_SECURITY_RATE,
        medicare: wages * MEDICARE_RATE,
        additional_medicare: (wages - additional_medicare_threshold(status)).max(0.0)
            * ADDITIONAL_MEDICARE_RATE,
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeTax {
    pub gross_income: f64,
    pub pre_tax_deductions: f64,
    pub deduction: f64,
    pub taxable_income: f64,
    pub income_tax: BracketTax,
    pub tax_after_credits: f64,
    pub fica: Fica,
    pub take_home: f64,
}

/// Federal income tax plus FICA on wages. Pre-tax deductions reduce income
/// tax but not FICA wages.
pub fn federal_income_tax(
    gross_income: f64,
    status: FilingStatus,
    pre_tax_deductions: f64,
    itemized_deductions: f64,
    credits: f64,
) -> IncomeTax {
    let gross_income = gross_income.max(0.0);
    let pre_tax_deductions = pre_tax_deductions.clamp(0.0, gross_income);
    let deduction = standard_deduction(status).max(itemized_deductions.max(0.0));
    let taxable_income = (gross_income - pre_tax_deductions - deduction).max(0.0);
    let income_tax = walk_brackets(taxable_income, federal_brackets(status));
    let tax_after_credits = (income_tax.total - credits.max(0.0)).max(0.0);
    let fica = fica(gross_income, status);
    let take_home = gross_income - pre_tax_deductions - tax_after_credits - fica.total();

    IncomeTax {
        gross_income,
        pre_tax_deductions,
        deduction,
        taxable_income,
        income_tax,
        tax_after_credits,
        fica,
        take_home,
    }
}
