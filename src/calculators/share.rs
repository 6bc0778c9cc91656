use serde_json::{Map, Value};

use super::Calculator;
use crate::error::CalcError;

pub const CALC_KEY: &str = "calc";

/// `calc=<slug>&key=value&...` for the normalized input.
pub fn encode<C: Calculator>(input: &C::Input) -> Result<String, CalcError> {
    let fields = serde_urlencoded::to_string(input)?;
    let slug = serde_urlencoded::to_string(vec![(CALC_KEY, C::SLUG)])?;
    if fields.is_empty() {
        Ok(slug)
    } else {
        Ok(format!("{slug}&{fields}"))
    }
}

/// Splits a share query back into the calculator slug and its raw fields.
pub fn decode(query: &str) -> Result<(String, Map<String, Value>), CalcError> {
    let query = query.trim_start_matches('?');
    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query)?;

    let mut slug = None;
    let mut raw = Map::new();
    for (key, value) in pairs {
        if key == CALC_KEY {
            slug = Some(value);
        } else {
            raw.insert(key, Value::String(value));
        }
    }

    let slug = slug.ok_or_else(|| CalcError::invalid_field(CALC_KEY, "missing calculator"))?;
    Ok((slug, raw))
}

pub fn query_to_raw(query: &str) -> Result<Map<String, Value>, CalcError> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query.trim_start_matches('?'))?;
    Ok(pairs
        .into_iter()
        .map(|(k, v)| (k, Value::String(v)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculators::{Loan, parse_input};

    #[test]
    fn encode_puts_the_slug_first() {
        let input = parse_input::<Loan>(&Map::new()).expect("defaults");
        let query = encode::<Loan>(&input).expect("encode");
        assert!(query.starts_with("calc=loan&"));
        assert!(query.contains("principal="));
    }

    #[test]
    fn decode_requires_a_slug() {
        let err = decode("principal=1000").expect_err("missing slug");
        assert!(err.to_string().contains("calc"));
    }

    #[test]
    fn decode_accepts_leading_question_mark() {
        let (slug, raw) = decode("?calc=tip&bill=42.5").expect("decode");
        assert_eq!(slug, "tip");
        assert_eq!(raw["bill"], Value::String("42.5".to_string()));
    }

    #[test]
    fn query_to_raw_unescapes_values() {
        let raw = query_to_raw("city=New%20York&amount=1%2C000").expect("raw");
        assert_eq!(raw["city"], Value::String("New York".to_string()));
        assert_eq!(raw["amount"], Value::String("1,000".to_string()));
    }
}
