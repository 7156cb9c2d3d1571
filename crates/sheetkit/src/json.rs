//! Conversion between cell values and JSON

use serde_json::{Map, Value};
use sheetkit_core::CellValue;

use crate::record::Record;

/// Largest magnitude below which every integer is exact in an `f64`
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

fn as_safe_integer(n: f64) -> Option<i64> {
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        Some(n as i64)
    } else {
        None
    }
}

/// JSON form of a cell value
///
/// Integral numbers become JSON integers, dates ISO-8601 strings in UTC
/// notation, and empty cells `null`. Non-finite numbers have no JSON form
/// and also become `null`.
pub fn cell_to_json(value: &CellValue) -> Value {
    match value {
        CellValue::Empty => Value::Null,
        CellValue::Boolean(b) => Value::Bool(*b),
        CellValue::Number(n) => match as_safe_integer(*n) {
            Some(i) => Value::from(i),
            None => serde_json::Number::from_f64(*n).map_or(Value::Null, Value::Number),
        },
        CellValue::String(s) => Value::String(s.as_str().to_string()),
        CellValue::DateTime(dt) => Value::String(dt.format(DATE_FORMAT).to_string()),
    }
}

/// Text of a cell value, as used for header names
pub fn cell_to_text(value: &CellValue) -> String {
    match value {
        CellValue::Empty => String::new(),
        CellValue::Boolean(b) => b.to_string(),
        CellValue::Number(n) => match as_safe_integer(*n) {
            Some(i) => i.to_string(),
            None => n.to_string(),
        },
        CellValue::String(s) => s.as_str().to_string(),
        CellValue::DateTime(dt) => dt.format(DATE_FORMAT).to_string(),
    }
}

/// Cell value for a JSON value
///
/// Arrays and objects are stored as their JSON text.
pub fn json_to_cell(value: &Value) -> CellValue {
    match value {
        Value::Null => CellValue::Empty,
        Value::Bool(b) => CellValue::Boolean(*b),
        Value::Number(n) => n.as_f64().map_or(CellValue::Empty, CellValue::Number),
        Value::String(s) => CellValue::string(s.as_str()),
        Value::Array(_) | Value::Object(_) => CellValue::string(value.to_string()),
    }
}

/// Record from a JSON object, keeping key order
pub fn record_from_json(object: &Map<String, Value>) -> Record {
    object
        .iter()
        .map(|(key, value)| (key.clone(), json_to_cell(value)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn test_numbers_to_json() {
        assert_eq!(cell_to_json(&CellValue::Number(42.0)), json!(42));
        assert_eq!(cell_to_json(&CellValue::Number(-3.0)), json!(-3));
        assert_eq!(cell_to_json(&CellValue::Number(2.5)), json!(2.5));
        assert_eq!(cell_to_json(&CellValue::Number(1e300)), json!(1e300));
        assert_eq!(cell_to_json(&CellValue::Number(f64::NAN)), Value::Null);
        assert_eq!(cell_to_json(&CellValue::Number(f64::INFINITY)), Value::Null);
    }

    #[test]
    fn test_other_kinds_to_json() {
        let dt = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_milli_opt(14, 7, 9, 250)
            .unwrap();
        assert_eq!(
            cell_to_json(&CellValue::DateTime(dt)),
            json!("2024-03-05T14:07:09.250Z")
        );
        assert_eq!(cell_to_json(&CellValue::Empty), Value::Null);
        assert_eq!(cell_to_json(&CellValue::Boolean(true)), json!(true));
        assert_eq!(cell_to_json(&CellValue::string("x")), json!("x"));
    }

    #[test]
    fn test_cell_to_text() {
        assert_eq!(cell_to_text(&CellValue::Number(7.0)), "7");
        assert_eq!(cell_to_text(&CellValue::Number(0.1)), "0.1");
        assert_eq!(cell_to_text(&CellValue::Boolean(false)), "false");
        assert_eq!(cell_to_text(&CellValue::string("Qty")), "Qty");
    }

    #[test]
    fn test_json_to_cell() {
        assert_eq!(json_to_cell(&json!(null)), CellValue::Empty);
        assert_eq!(json_to_cell(&json!(false)), CellValue::Boolean(false));
        assert_eq!(json_to_cell(&json!(12)), CellValue::Number(12.0));
        assert_eq!(json_to_cell(&json!(0.5)), CellValue::Number(0.5));
        assert_eq!(json_to_cell(&json!("2024-01-01")), CellValue::string("2024-01-01"));
        assert_eq!(json_to_cell(&json!([1, 2])), CellValue::string("[1,2]"));
        assert_eq!(json_to_cell(&json!({"a": 1})), CellValue::string("{\"a\":1}"));
    }

    #[test]
    fn test_record_from_json_keeps_order() {
        let object = json!({"Qty": 3, "Name": "Bolt", "Note": null});
        let record = record_from_json(object.as_object().unwrap());
        let keys: Vec<&str> = record.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Qty", "Name", "Note"]);
        assert_eq!(record.get("Note"), Some(&CellValue::Empty));
    }
}
