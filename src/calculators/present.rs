use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatCard {
    pub label: &'static str,
    pub value: String,
}

impl StatCard {
    pub fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }

    pub fn money(label: &'static str, amount: f64) -> Self {
        Self::new(label, currency(amount))
    }

    pub fn dollars(label: &'static str, amount: f64) -> Self {
        Self::new(label, whole_dollars(amount))
    }

    pub fn percent(label: &'static str, pct: f64) -> Self {
        Self::new(label, percent(pct))
    }
}

pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn signed(value: f64, body: String) -> String {
    if value < 0.0 && body.chars().any(|c| c.is_ascii_digit() && c != '0') {
        format!("-{body}")
    } else {
        body
    }
}

/// `$1,234.57`
pub fn currency(amount: f64) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let cents = (amount.abs() * 100.0).round() as u64;
    let body = format!("${}.{:02}", group_thousands(&(cents / 100).to_string()), cents % 100);
    signed(amount, body)
}

/// `$1,235`
pub fn whole_dollars(amount: f64) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let dollars = amount.abs().round() as u64;
    signed(amount, format!("${}", group_thousands(&dollars.to_string())))
}

/// Takes a 0-100 percentage: `6.50%`
pub fn percent(pct: f64) -> String {
    let pct = if pct.is_finite() { pct } else { 0.0 };
    format!("{:.2}%", round_to(pct, 2))
}

pub fn months_label(months: u32) -> String {
    let years = months / 12;
    let rest = months % 12;
    match (years, rest) {
        (0, m) => format!("{m} mo"),
        (y, 0) => format!("{y} yr"),
        (y, m) => format!("{y} yr {m} mo"),
    }
}
