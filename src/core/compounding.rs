use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PeriodContribution {
    pub own: f64,
    pub employer: f64,
}

impl PeriodContribution {
    pub fn own(amount: f64) -> Self {
        Self {
            own: amount,
            employer: 0.0,
        }
    }

    fn total(self) -> f64 {
        self.own.max(0.0) + self.employer.max(0.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearSnapshot {
    pub year: u32,
    pub balance: f64,
    pub own_contributions: f64,
    pub employer_contributions: f64,
    pub principal: f64,
    pub growth: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct GrowthParams {
    pub starting_balance: f64,
    pub annual_rate_pct: f64,
    pub periods_per_year: u32,
    pub years: u32,
}

impl GrowthParams {
    pub fn periodic_rate(&self) -> f64 {
        self.annual_rate_pct / 100.0 / self.periods_per_year.max(1) as f64
    }
}

/// Compounds `starting_balance` period by period. `contribution_for_year`
/// receives the zero-based year index and returns the deposit made at the
/// end of every period in that year.
pub fn project<F>(params: &GrowthParams, mut contribution_for_year: F) -> Vec<YearSnapshot>
where
    F: FnMut(u32) -> PeriodContribution,
{
    let periods = params.periods_per_year.max(1);
    let rate = params.periodic_rate();
    let mut balance = params.starting_balance.max(0.0);
    let mut own_total = 0.0;
    let mut employer_total = 0.0;
    let mut snapshots = Vec::with_capacity(params.years as usize);

    for year in 0..params.years {
        let deposit = contribution_for_year(year);
        for _ in 0..periods {
            balance = balance * (1.0 + rate) + deposit.total();
            own_total += deposit.own.max(0.0);
            employer_total += deposit.employer.max(0.0);
        }
        balance = balance.max(0.0);

        let principal = params.starting_balance.max(0.0) + own_total + employer_total;
        snapshots.push(YearSnapshot {
            year: year + 1,
            balance,
            own_contributions: own_total,
            employer_contributions: employer_total,
            principal,
            growth: (balance - principal).max(0.0),
        });
    }

    snapshots
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeSnapshot {
    pub age: u32,
    #[serde(flatten)]
    pub snapshot: YearSnapshot,
}

/// Labels yearly snapshots with the age reached at the end of each year.
pub fn with_ages(snapshots: &[YearSnapshot], start_age: u32) -> Vec<AgeSnapshot> {
    snapshots
        .iter()
        .map(|s| AgeSnapshot {
            age: start_age + s.year,
            snapshot: *s,
        })
        .collect()
}

pub fn final_balance(snapshots: &[YearSnapshot], starting_balance: f64) -> f64 {
    snapshots
        .last()
        .map(|s| s.balance)
        .unwrap_or_else(|| starting_balance.max(0.0))
}

pub fn future_value(
    principal: f64,
    annual_rate_pct: f64,
    periods_per_year: u32,
    years: f64,
) -> f64 {
    let m = periods_per_year.max(1) as f64;
    principal * (1.0 + annual_rate_pct / 100.0 / m).powf(m * years.max(0.0))
}

/// Present value of `years` level annual payments received at the start of
/// each year, discounted at `annual_rate_pct`.
pub fn annuity_due_present_value(payment: f64, annual_rate_pct: f64, years: u32) -> f64 {
    let r = annual_rate_pct / 100.0;
    let n = years as f64;
    if r.abs() < 1e-12 {
        return payment * n;
    }
    payment * (1.0 - (1.0 + r).powf(-n)) / r * (1.0 + r)
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawdownYear {
    pub year: u32,
    pub withdrawal: f64,
    pub balance: f64,
}

#[derive(Debug, Clone)]
pub struct Drawdown {
    pub years: Vec<DrawdownYear>,
    /// First year (1-based) that could not be funded in full.
    pub exhausted_in_year: Option<u32>,
}

/// Takes each year's withdrawal at the start of the year, then grows what is
/// left.
pub fn drawdown<F>(
    starting_balance: f64,
    annual_rate_pct: f64,
    years: u32,
    mut withdrawal_for_year: F,
) -> Drawdown
where
    F: FnMut(u32) -> f64,
{
    let r = annual_rate_pct / 100.0;
    let mut balance = starting_balance.max(0.0);
    let mut exhausted_in_year = None;
    let mut rows = Vec::with_capacity(years as usize);

    for year in 0..years {
        let wanted = withdrawal_for_year(year).max(0.0);
        let withdrawal = wanted.min(balance);
        if withdrawal + 1e-9 < wanted && exhausted_in_year.is_none() {
            exhausted_in_year = Some(year + 1);
        }
        balance = ((balance - withdrawal) * (1.0 + r)).max(0.0);
        rows.push(DrawdownYear {
            year: year + 1,
            withdrawal,
            balance,
        });
    }

    Drawdown {
        years: rows,
        exhausted_in_year,
    }
}
