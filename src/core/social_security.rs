use serde::Serialize;

pub const FIRST_BEND_POINT: f64 = 1_174.0;
pub const SECOND_BEND_POINT: f64 = 7_078.0;

pub const EARLIEST_CLAIM_MONTHS: u32 = 62 * 12;
pub const LATEST_CLAIM_MONTHS: u32 = 70 * 12;

/// Primary Insurance Amount from AIME, rounded down to the dime.
pub fn pia(aime: f64) -> f64 {
    let aime = if aime.is_finite() { aime.max(0.0) } else { 0.0 };
    let first = aime.min(FIRST_BEND_POINT);
    let second = (aime.min(SECOND_BEND_POINT) - FIRST_BEND_POINT).max(0.0);
    let third = (aime - SECOND_BEND_POINT).max(0.0);
    let raw = 0.90 * first + 0.32 * second + 0.15 * third;
    (raw * 10.0 + 1e-9).floor() / 10.0
}

/// Full retirement age in months for a birth year.
pub fn full_retirement_age_months(birth_year: u32) -> u32 {
    match birth_year {
        0..=1937 => 65 * 12,
        1938..=1942 => 65 * 12 + (birth_year - 1937) * 2,
        1943..=1954 => 66 * 12,
        1955..=1959 => 66 * 12 + (birth_year - 1954) * 2,
        _ => 67 * 12,
    }
}

pub fn clamp_claim_months(claim_months: u32) -> u32 {
    claim_months.clamp(EARLIEST_CLAIM_MONTHS, LATEST_CLAIM_MONTHS)
}

/// Multiplier applied to the PIA when claiming at `claim_months` of age.
pub fn claim_adjustment(fra_months: u32, claim_months: u32) -> f64 {
    let claim = clamp_claim_months(claim_months);
    if claim < fra_months {
        let early = (fra_months - claim) as f64;
        let first = early.min(36.0);
        let beyond = (early - 36.0).max(0.0);
        1.0 - first * 5.0 / 9.0 / 100.0 - beyond * 5.0 / 12.0 / 100.0
    } else {
        let delayed = (claim - fra_months) as f64;
        1.0 + delayed * 2.0 / 3.0 / 100.0
    }
}

pub fn monthly_benefit(pia: f64, fra_months: u32, claim_months: u32) -> f64 {
    pia.max(0.0) * claim_adjustment(fra_months, claim_months)
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CumulativePoint {
    pub age: u32,
    pub annual: f64,
    pub cumulative: f64,
}

/// Running total of benefits received by the end of each age from 62 to
/// `through_age`. The COLA indexes the benefit every year from 62 whether or
/// not payments have started.
pub fn cumulative_benefits(
    monthly: f64,
    claim_months: u32,
    cola_pct: f64,
    through_age: u32,
) -> Vec<CumulativePoint> {
    let claim = clamp_claim_months(claim_months);
    let first_age = EARLIEST_CLAIM_MONTHS / 12;
    let mut benefit = monthly.max(0.0);
    let mut cumulative = 0.0;
    let mut points = Vec::new();

    for age in first_age..=through_age {
        if age > first_age {
            benefit *= 1.0 + cola_pct / 100.0;
        }
        let year_start = age * 12;
        let year_end = year_start + 12;
        let months_paid = year_end.saturating_sub(claim.max(year_start));

        let annual = benefit * months_paid as f64;
        cumulative += annual;
        points.push(CumulativePoint {
            age,
            annual,
            cumulative,
        });
    }

    points
}

/// First age at which `challenger` has received more in total than
/// `incumbent`, counting only ages where the incumbent was ahead before.
pub fn crossover_age(incumbent: &[CumulativePoint], challenger: &[CumulativePoint]) -> Option<u32> {
    let mut incumbent_led = false;
    for (a, b) in incumbent.iter().zip(challenger) {
        if a.cumulative > b.cumulative {
            incumbent_led = true;
        } else if incumbent_led && b.cumulative > a.cumulative {
            return Some(b.age);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn pia_applies_bend_points() {
        assert_approx(pia(1_000.0), 900.0);
        // 0.9*1174 + 0.32*(5000-1174) = 1056.6 + 1224.32 = 2280.92 -> 2280.9
        assert_approx(pia(5_000.0), 2_280.9);
        // 1056.6 + 0.32*5904 + 0.15*2922 = 1056.6 + 1889.28 + 438.3 = 3384.18 -> 3384.1
        assert_approx(pia(10_000.0), 3_384.1);
        assert_approx(pia(-10.0), 0.0);
    }

    #[test]
    fn full_retirement_age_follows_birth_year_schedule() {
        assert_eq!(full_retirement_age_months(1937), 65 * 12);
        assert_eq!(full_retirement_age_months(1940), 65 * 12 + 6);
        assert_eq!(full_retirement_age_months(1950), 66 * 12);
        assert_eq!(full_retirement_age_months(1957), 66 * 12 + 6);
        assert_eq!(full_retirement_age_months(1960), 67 * 12);
        assert_eq!(full_retirement_age_months(1990), 67 * 12);
    }

    #[test]
    fn claiming_at_62_with_fra_67_pays_seventy_percent() {
        assert_approx(claim_adjustment(67 * 12, 62 * 12), 0.70);
        assert_approx(claim_adjustment(67 * 12, 70 * 12), 1.24);
        assert_approx(claim_adjustment(66 * 12, 62 * 12), 0.75);
    }

    #[test]
    fn claim_age_is_clamped_to_the_allowed_window() {
        assert_approx(claim_adjustment(67 * 12, 55 * 12), 0.70);
        assert_approx(claim_adjustment(67 * 12, 75 * 12), 1.24);
    }

    #[test]
    fn cumulative_series_starts_paying_at_claim_age() {
        let points = cumulative_benefits(1_000.0, 65 * 12 + 6, 0.0, 67);
        assert_eq!(points[0].age, 62);
        assert_approx(points[2].cumulative, 0.0);
        assert_approx(points[3].annual, 6_000.0);
        assert_approx(points[4].annual, 12_000.0);
        assert_approx(points[5].cumulative, 30_000.0);
    }

    #[test]
    fn cola_indexes_benefit_every_year() {
        let points = cumulative_benefits(1_000.0, 62 * 12, 10.0, 63);
        assert_approx(points[0].annual, 12_000.0);
        assert_approx(points[1].annual, 13_200.0);
    }

    #[test]
    fn claiming_at_70_overtakes_claiming_at_62() {
        let fra = full_retirement_age_months(1962);
        let base = pia(4_000.0);
        let early = cumulative_benefits(monthly_benefit(base, fra, 62 * 12), 62 * 12, 0.0, 90);
        let late = cumulative_benefits(monthly_benefit(base, fra, 70 * 12), 70 * 12, 0.0, 90);
        // 0.70*12*(a-61) = 1.24*12*(a-69) crosses between 79 and 80.
        assert_eq!(crossover_age(&early, &late), Some(80));
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(128))]

        #[test]
        fn prop_fra_benefit_equals_pia_and_bounds_hold(
            aime in 1.0f64..15_000.0,
            birth_year in 1943u32..2010,
        ) {
            let base = pia(aime);
            let fra = full_retirement_age_months(birth_year);
            prop_assert_eq!(monthly_benefit(base, fra, fra), base);
            if base > 0.0 {
                prop_assert!(monthly_benefit(base, fra, 62 * 12) < base);
                prop_assert!(monthly_benefit(base, fra, 70 * 12) > base);
            }
        }

        #[test]
        fn prop_claim_at_70_overtakes_62_by_age_90(
            aime in 500.0f64..12_000.0,
            birth_year in 1955u32..2000,
            cola in 0.0f64..4.0,
        ) {
            let base = pia(aime);
            let fra = full_retirement_age_months(birth_year);
            let early = cumulative_benefits(monthly_benefit(base, fra, 62 * 12), 62 * 12, cola, 90);
            let late = cumulative_benefits(monthly_benefit(base, fra, 70 * 12), 70 * 12, cola, 90);
            let crossover = crossover_age(&early, &late);
            prop_assert!(crossover.is_some());
            prop_assert!(crossover.unwrap_or(0) <= 90);
        }
    }
}
