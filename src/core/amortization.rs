use serde::Serialize;

const PAYOFF_EPS: f64 = 1e-9;

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationRow {
    pub month: u32,
    pub payment: f64,
    pub principal: f64,
    pub interest: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationYear {
    pub year: u32,
    pub principal: f64,
    pub interest: f64,
    pub balance: f64,
}

#[derive(Debug, Clone)]
pub struct Schedule {
    pub scheduled_payment: f64,
    pub rows: Vec<AmortizationRow>,
    pub total_interest: f64,
    pub total_paid: f64,
}

impl Schedule {
    pub fn months_to_payoff(&self) -> u32 {
        self.rows.len() as u32
    }
}

pub fn monthly_rate(annual_rate_pct: f64) -> f64 {
    annual_rate_pct / 100.0 / 12.0
}

/// Fixed payment that retires `principal` over `months` at the given annual
/// rate. `None` when there is nothing to amortize.
pub fn monthly_payment(principal: f64, annual_rate_pct: f64, months: u32) -> Option<f64> {
    if !principal.is_finite() || !annual_rate_pct.is_finite() {
        return None;
    }
    if principal <= 0.0 || months == 0 {
        return None;
    }

    let r = monthly_rate(annual_rate_pct);
    let n = months as f64;
    if r.abs() < 1e-12 {
        return Some(principal / n);
    }

    let growth = (1.0 + r).powf(n);
    Some(principal * r * growth / (growth - 1.0))
}

pub fn amortize(
    principal: f64,
    annual_rate_pct: f64,
    months: u32,
    extra_monthly: f64,
) -> Option<Schedule> {
    let scheduled_payment = monthly_payment(principal, annual_rate_pct, months)?;
    let r = monthly_rate(annual_rate_pct);
    let extra = extra_monthly.max(0.0);

    let mut rows = Vec::with_capacity(months as usize);
    let mut balance = principal;
    let mut total_interest = 0.0;
    let mut total_paid = 0.0;

    for month in 1..=months {
        let interest = balance * r;
        let mut principal_part = (scheduled_payment - interest + extra).max(0.0);
        if principal_part > balance || month == months {
            principal_part = balance;
        }
        let payment = principal_part + interest;
        balance = (balance - principal_part).max(0.0);

        total_interest += interest;
        total_paid += payment;
        rows.push(AmortizationRow {
            month,
            payment,
            principal: principal_part,
            interest,
            balance,
        });

        if balance <= PAYOFF_EPS {
            break;
        }
    }

    Some(Schedule {
        scheduled_payment,
        rows,
        total_interest,
        total_paid,
    })
}

pub fn yearly_totals(schedule: &Schedule) -> Vec<AmortizationYear> {
    let mut years: Vec<AmortizationYear> = Vec::new();
    for row in &schedule.rows {
        let year = (row.month - 1) / 12 + 1;
        match years.last_mut() {
            Some(last) if last.year == year => {
                last.principal += row.principal;
                last.interest += row.interest;
                last.balance = row.balance;
            }
            _ => years.push(AmortizationYear {
                year,
                principal: row.principal,
                interest: row.interest,
                balance: row.balance,
            }),
        }
    }
    years
}
