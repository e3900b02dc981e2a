//! Typed per-field override values.
//!
//! Each override carries an explicit data type tag; parsing and formatting
//! are total per type instead of ad hoc string switches.

use crate::error::LegacyError;
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A typed override value with explicit parse/format per data type.
#[derive(Debug, Clone, PartialEq)]
pub enum OverrideValue {
    Str(String),
    Int(i64),
    Bool(bool),
    Json(Value),
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
}

impl OverrideValue {
    /// The data type tag stored next to the raw value.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::Int(_) => "integer",
            Self::Bool(_) => "boolean",
            Self::Json(_) => "json",
            Self::Date(_) => "date",
            Self::DateTime(_) => "datetime",
        }
    }

    /// Parses a raw stored string under the given data type tag.
    ///
    /// # Errors
    /// Returns [`LegacyError::InvalidOverride`] if the tag is unknown or the
    /// raw value does not parse as that type.
    pub fn parse(kind: &str, raw: &str) -> Result<Self, LegacyError> {
        match kind {
            "string" => Ok(Self::Str(raw.to_owned())),
            "integer" => raw
                .parse::<i64>()
                .map(Self::Int)
                .map_err(|e| invalid(format!("'{raw}' is not an integer: {e}"))),
            "boolean" => match raw {
                "true" | "1" => Ok(Self::Bool(true)),
                "false" | "0" => Ok(Self::Bool(false)),
                _ => Err(invalid(format!("'{raw}' is not a boolean"))),
            },
            "json" => serde_json::from_str(raw)
                .map(Self::Json)
                .map_err(|e| invalid(format!("'{raw}' is not valid JSON: {e}"))),
            "date" => NaiveDate::parse_from_str(raw, DATE_FORMAT)
                .map(Self::Date)
                .map_err(|e| invalid(format!("'{raw}' is not a date: {e}"))),
            "datetime" => raw
                .parse::<DateTime<Utc>>()
                .map(Self::DateTime)
                .map_err(|e| invalid(format!("'{raw}' is not a datetime: {e}"))),
            other => Err(invalid(format!("unknown override data type '{other}'"))),
        }
    }

    /// Formats the value back into its raw stored form. `parse(kind(),
    /// format())` reproduces the value.
    #[must_use]
    pub fn format(&self) -> String {
        match self {
            Self::Str(s) => s.clone(),
            Self::Int(i) => i.to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Json(v) => v.to_string(),
            Self::Date(d) => d.format(DATE_FORMAT).to_string(),
            Self::DateTime(dt) => dt.to_rfc3339(),
        }
    }
}

fn invalid(message: String) -> LegacyError {
    LegacyError::InvalidOverride { message: message.into() }
}

/// A per-field value substitution on top of a legacy mapping. At most one
/// override is active per field name per mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldOverride {
    pub id: String,
    pub mapping_id: String,
    pub field_name: String,
    pub value: OverrideValue,
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_and_format_roundtrip() {
        let cases = [
            OverrideValue::Str("hello".to_owned()),
            OverrideValue::Int(-42),
            OverrideValue::Bool(true),
            OverrideValue::Json(json!({ "a": [1, 2] })),
            OverrideValue::Date(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()),
        ];
        for value in cases {
            let parsed = OverrideValue::parse(value.kind(), &value.format()).unwrap();
            assert_eq!(parsed, value);
        }
    }

    #[test]
    fn datetime_roundtrip_keeps_instant() {
        let dt = "2024-03-15T08:30:00Z".parse::<DateTime<Utc>>().unwrap();
        let value = OverrideValue::DateTime(dt);
        let parsed = OverrideValue::parse("datetime", &value.format()).unwrap();
        assert_eq!(parsed, OverrideValue::DateTime(dt));
    }

    #[test]
    fn malformed_values_are_rejected() {
        assert!(OverrideValue::parse("integer", "abc").is_err());
        assert!(OverrideValue::parse("boolean", "yes").is_err());
        assert!(OverrideValue::parse("json", "{broken").is_err());
        assert!(OverrideValue::parse("date", "15.03.2024").is_err());
        assert!(OverrideValue::parse("datetime", "today").is_err());
        assert!(OverrideValue::parse("decimal", "1.5").is_err());
    }

    #[test]
    fn boolean_accepts_numeric_forms() {
        assert_eq!(OverrideValue::parse("boolean", "1").unwrap(), OverrideValue::Bool(true));
        assert_eq!(OverrideValue::parse("boolean", "0").unwrap(), OverrideValue::Bool(false));
    }
}
