// src/settings/value.rs

use rusqlite::types::{ToSql, ToSqlOutput, Value};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The type a setting was declared with. Never changes for a given name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SettingKind {
    Bool,
    Int,
}

impl fmt::Display for SettingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingKind::Bool => f.pad("boolean"),
            SettingKind::Int => f.pad("integer"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
}

impl SettingValue {
    pub fn kind(&self) -> SettingKind {
        match self {
            SettingValue::Bool(_) => SettingKind::Bool,
            SettingValue::Int(_) => SettingKind::Int,
        }
    }

    /// Integer form written to the `Value` column. Booleans become 1/0.
    pub fn to_stored(self) -> i64 {
        match self {
            SettingValue::Bool(b) => i64::from(b),
            SettingValue::Int(i) => i,
        }
    }

    /// Convert `other` into this value's kind.
    pub fn coerce(&self, other: SettingValue) -> SettingValue {
        match (self, other) {
            (SettingValue::Bool(_), SettingValue::Int(i)) => SettingValue::Bool(i != 0),
            (SettingValue::Int(_), SettingValue::Bool(b)) => SettingValue::Int(i64::from(b)),
            (_, same_kind) => same_kind,
        }
    }

    /// Interpret a raw SQLite cell as a value of this setting's kind.
    /// Returns `None` when the cell cannot be coerced (NULL, blobs, junk text,
    /// fractional reals); the caller keeps the default in that case.
    pub fn coerce_stored(&self, raw: &Value) -> Option<SettingValue> {
        let parsed = match raw {
            Value::Integer(i) => SettingValue::Int(*i),
            Value::Real(f) if f.is_finite() && f.fract() == 0.0 => {
                // i64::MAX rounds up to 2^63 as f64, which is already out of range.
                if *f < i64::MIN as f64 || *f >= i64::MAX as f64 {
                    return None;
                }
                SettingValue::Int(*f as i64)
            }
            Value::Text(text) => parse_literal(text)?,
            _ => return None,
        };
        Some(self.coerce(parsed))
    }

    /// Parse user text (CLI input) into this setting's kind.
    pub fn parse_as(&self, text: &str) -> Option<SettingValue> {
        parse_literal(text).map(|parsed| self.coerce(parsed))
    }
}

fn parse_literal(text: &str) -> Option<SettingValue> {
    let trimmed = text.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        return Some(SettingValue::Bool(true));
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return Some(SettingValue::Bool(false));
    }
    trimmed.parse::<i64>().ok().map(SettingValue::Int)
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Bool(b) => f.pad(&b.to_string()),
            SettingValue::Int(i) => f.pad(&i.to_string()),
        }
    }
}

impl From<bool> for SettingValue {
    fn from(b: bool) -> Self {
        SettingValue::Bool(b)
    }
}

impl From<i64> for SettingValue {
    fn from(i: i64) -> Self {
        SettingValue::Int(i)
    }
}

impl ToSql for SettingValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.to_stored()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nonzero_integer_is_true_for_bool_setting() {
        let default = SettingValue::Bool(false);
        assert_eq!(default.coerce_stored(&Value::Integer(5)), Some(SettingValue::Bool(true)));
        assert_eq!(default.coerce_stored(&Value::Integer(-1)), Some(SettingValue::Bool(true)));
        assert_eq!(default.coerce_stored(&Value::Integer(0)), Some(SettingValue::Bool(false)));
    }

    #[test]
    fn test_bool_coerces_to_one_or_zero_for_int_setting() {
        let default = SettingValue::Int(7);
        assert_eq!(default.coerce(SettingValue::Bool(true)), SettingValue::Int(1));
        assert_eq!(default.coerce(SettingValue::Bool(false)), SettingValue::Int(0));
    }

    #[test]
    fn test_text_cells() {
        let int_default = SettingValue::Int(0);
        assert_eq!(int_default.coerce_stored(&Value::Text(" 42 ".into())), Some(SettingValue::Int(42)));
        assert_eq!(int_default.coerce_stored(&Value::Text("TRUE".into())), Some(SettingValue::Int(1)));
        assert_eq!(int_default.coerce_stored(&Value::Text("abc".into())), None);

        let bool_default = SettingValue::Bool(true);
        assert_eq!(bool_default.coerce_stored(&Value::Text("false".into())), Some(SettingValue::Bool(false)));
        assert_eq!(bool_default.coerce_stored(&Value::Text("0".into())), Some(SettingValue::Bool(false)));
    }

    #[test]
    fn test_unusable_cells_are_rejected() {
        let default = SettingValue::Int(3);
        assert_eq!(default.coerce_stored(&Value::Null), None);
        assert_eq!(default.coerce_stored(&Value::Blob(vec![1, 2])), None);
        assert_eq!(default.coerce_stored(&Value::Real(1.5)), None);
        assert_eq!(default.coerce_stored(&Value::Real(f64::NAN)), None);
        assert_eq!(default.coerce_stored(&Value::Real(12.0)), Some(SettingValue::Int(12)));
    }

    #[test]
    fn test_real_cells_outside_i64_are_rejected() {
        let default = SettingValue::Int(3);
        assert_eq!(default.coerce_stored(&Value::Real(9_223_372_036_854_775_808.0)), None);
        assert_eq!(default.coerce_stored(&Value::Real(1e19)), None);
        assert_eq!(default.coerce_stored(&Value::Real(-1e19)), None);
        assert_eq!(
            default.coerce_stored(&Value::Real(-9_223_372_036_854_775_808.0)),
            Some(SettingValue::Int(i64::MIN))
        );
        assert_eq!(
            default.coerce_stored(&Value::Real(4_611_686_018_427_387_904.0)),
            Some(SettingValue::Int(1 << 62))
        );
    }

    #[test]
    fn test_stored_form() {
        assert_eq!(SettingValue::Bool(true).to_stored(), 1);
        assert_eq!(SettingValue::Bool(false).to_stored(), 0);
        assert_eq!(SettingValue::Int(-12).to_stored(), -12);
    }

    #[test]
    fn test_parse_as_keeps_kind() {
        assert_eq!(SettingValue::Bool(false).parse_as("1"), Some(SettingValue::Bool(true)));
        assert_eq!(SettingValue::Int(0).parse_as("-8"), Some(SettingValue::Int(-8)));
        assert_eq!(SettingValue::Int(0).parse_as("eight"), None);
    }

    #[test]
    fn test_untagged_json() {
        let json = serde_json::to_string(&vec![SettingValue::Bool(true), SettingValue::Int(12)]).unwrap();
        assert_eq!(json, "[true,12]");
    }
}
