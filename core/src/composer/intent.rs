use serde::{Deserialize, Serialize, Serializer};

// Largest magnitude below which every whole f64 is an exact integer.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    #[serde(serialize_with = "serialize_amount")]
    pub amount_usd: f64,
}

/// Whole amounts go on the wire as integers (`250000`, not `250000.0`).
/// Non-finite amounts are written as `null` by the JSON serializer.
fn serialize_amount<S: Serializer>(amount: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if amount.is_finite() && amount.fract() == 0.0 && amount.abs() <= MAX_EXACT_INTEGER {
        serializer.serialize_i64(*amount as i64)
    } else {
        serializer.serialize_f64(*amount)
    }
}

impl Intent {
    pub fn new(amount_usd: f64) -> Self {
        Self { amount_usd }
    }
}

/// Numeric-field semantics: blank input is zero, anything unparseable is NaN.
pub fn parse_amount_input(raw: &str) -> f64 {
    let t = raw.trim();
    if t.is_empty() {
        return 0.0;
    }
    t.parse::<f64>().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_input_parsing() {
        assert_eq!(parse_amount_input(" 250000 "), 250_000.0);
        assert_eq!(parse_amount_input("-1.5"), -1.5);
        assert_eq!(parse_amount_input(""), 0.0);
        assert!(parse_amount_input("12abc").is_nan());
        assert!(parse_amount_input("inf").is_infinite());
    }

    #[test]
    fn whole_amounts_serialize_as_integers() {
        let wire = |amount: f64| serde_json::to_string(&Intent::new(amount)).unwrap();
        assert_eq!(wire(250_000.0), r#"{"amountUsd":250000}"#);
        assert_eq!(wire(-0.0), r#"{"amountUsd":0}"#);
        assert_eq!(wire(10.5), r#"{"amountUsd":10.5}"#);
        assert_eq!(wire(f64::NAN), r#"{"amountUsd":null}"#);
        assert_eq!(wire(f64::INFINITY), r#"{"amountUsd":null}"#);
    }
}
