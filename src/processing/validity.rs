//! Validity checking and null-tolerant statistics over raw JSON values

use serde_json::Value;
use statrs::statistics::Statistics;

/// Interpret a raw value as a usable reading.
///
/// Numbers and numeric strings are accepted when finite. Absent, `null`,
/// booleans, arrays, objects and unparsable strings are rejected.
pub fn numeric_value(value: Option<&Value>) -> Option<f64> {
    let v = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => return None,
    };
    v.is_finite().then_some(v)
}

/// Whether a raw value is present, numeric and finite.
pub fn is_valid(value: Option<&Value>) -> bool {
    numeric_value(value).is_some()
}

/// Mean of the valid entries, or `None` when no entry is valid.
pub fn safe_mean<'a, I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<&'a Value>>,
{
    let valid: Vec<f64> = values.into_iter().filter_map(numeric_value).collect();
    mean_of(&valid)
}

/// Mean of already-parsed numbers, skipping non-finite ones.
pub fn mean_of(values: &[f64]) -> Option<f64> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return None;
    }
    Some(finite.iter().mean())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_numbers_and_numeric_strings() {
        assert!(is_valid(Some(&json!(0))));
        assert!(is_valid(Some(&json!(-12.75))));
        assert!(is_valid(Some(&json!("42.5"))));
        assert!(is_valid(Some(&json!(" 7 "))));
        assert_eq!(numeric_value(Some(&json!("1e2"))), Some(100.0));
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(!is_valid(None));
        assert!(!is_valid(Some(&Value::Null)));
        assert!(!is_valid(Some(&json!("abc"))));
        assert!(!is_valid(Some(&json!(""))));
        assert!(!is_valid(Some(&json!("NaN"))));
        assert!(!is_valid(Some(&json!("inf"))));
        assert!(!is_valid(Some(&json!("-infinity"))));
        assert!(!is_valid(Some(&json!(true))));
        assert!(!is_valid(Some(&json!([1.0]))));
        assert!(!is_valid(Some(&json!({"v": 1.0}))));
    }

    #[test]
    fn test_safe_mean_empty_is_none() {
        assert_eq!(safe_mean(std::iter::empty()), None);
    }

    #[test]
    fn test_safe_mean_all_invalid_is_none() {
        let values = [Value::Null, json!("abc")];
        assert_eq!(safe_mean(values.iter().map(Some)), None);
    }

    #[test]
    fn test_safe_mean_counts_only_valid_entries() {
        let values = [json!(10), json!("skip"), json!(20)];
        assert_eq!(safe_mean(values.iter().map(Some)), Some(15.0));

        let with_gap = [Some(&values[0]), None, Some(&values[2])];
        assert_eq!(safe_mean(with_gap), Some(15.0));
    }

    #[test]
    fn test_zero_mean_is_distinct_from_no_value() {
        let values = [json!(-1.0), json!(1.0)];
        assert_eq!(safe_mean(values.iter().map(Some)), Some(0.0));
    }

    #[test]
    fn test_mean_of_skips_non_finite() {
        assert_eq!(mean_of(&[1.0, f64::NAN, 3.0]), Some(2.0));
        assert_eq!(mean_of(&[f64::INFINITY]), None);
        assert_eq!(mean_of(&[]), None);
    }
}
