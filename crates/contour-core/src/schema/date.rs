//! Date schema
//!
//! JSON carries dates as strings or epoch milliseconds. Validation accepts
//! anything that converts to a real instant; transformation rewrites the
//! value into its canonical form, an RFC 3339 UTC timestamp with
//! millisecond precision such as `2024-05-01T12:00:00.000Z`.
//!
//! Copyright (c) 2025 Contour Team
//! Licensed under the Apache-2.0 license

use super::rules::{Configure, Rules};
use super::Schema;
use crate::context::{TransformationContext, ValidationContext};
use crate::error::{Error, Result};
use crate::issue::{Issue, Validation};
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde_json::Value;

/// Default message for a value that is not a date
pub const DATE_MESSAGE: &str = "Invalid date";

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Schema accepting date strings and epoch milliseconds
#[derive(Debug, Clone)]
pub struct DateSchema {
    rules: Rules,
    invalid_message: Option<String>,
}

impl DateSchema {
    pub fn new() -> Self {
        Self {
            rules: Rules::new("date"),
            invalid_message: None,
        }
    }

    /// Message reported for a value that is not a date
    pub fn invalid_message(mut self, message: impl Into<String>) -> Result<Self> {
        if self.invalid_message.is_some() {
            return Err(Error::duplicate("date", "invalid_message"));
        }
        self.invalid_message = Some(message.into());
        Ok(self)
    }
}

impl Default for DateSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl Configure for DateSchema {
    fn rules_mut(&mut self) -> &mut Rules {
        &mut self.rules
    }
}

impl Schema for DateSchema {
    fn kind(&self) -> &'static str {
        "date"
    }

    fn validate(&self, value: Option<&Value>, _ctx: &ValidationContext) -> Validation {
        let Some(value) = self.rules.require(value)? else {
            return Ok(());
        };
        match to_instant(value) {
            Some(_) => Ok(()),
            None => Err(Issue::message(
                self.invalid_message.as_deref().unwrap_or(DATE_MESSAGE),
            )),
        }
    }

    fn transform(&self, value: Option<Value>, _ctx: &TransformationContext) -> Option<Value> {
        let value = value.map(|raw| match to_instant(&raw) {
            Some(instant) => Value::String(instant.to_rfc3339_opts(SecondsFormat::Millis, true)),
            None => raw,
        });
        self.rules.finish(value)
    }
}

/// Convert a JSON value into an instant, if it denotes one
pub fn to_instant(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(text) => parse_text(text.trim()),
        Value::Number(n) => {
            let millis = n.as_f64()?;
            if !millis.is_finite() {
                return None;
            }
            DateTime::from_timestamp_millis(millis.trunc() as i64)
        }
        _ => None,
    }
}

fn parse_text(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Some(instant.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validate(schema: &DateSchema, value: Value) -> Validation {
        schema.validate(Some(&value), &ValidationContext::default())
    }

    #[test]
    fn test_accepts_date_shapes() {
        let schema = DateSchema::new();
        assert_eq!(validate(&schema, json!("2024-05-01T12:00:00Z")), Ok(()));
        assert_eq!(validate(&schema, json!("2024-05-01T12:00:00+02:00")), Ok(()));
        assert_eq!(validate(&schema, json!("2024-05-01")), Ok(()));
        assert_eq!(validate(&schema, json!("2024-05-01 08:30:00")), Ok(()));
        assert_eq!(validate(&schema, json!(0)), Ok(()));
    }

    #[test]
    fn test_rejects_non_dates() -> Result<()> {
        let schema = DateSchema::new();
        assert_eq!(validate(&schema, json!("not a date")), Err(Issue::message(DATE_MESSAGE)));
        assert_eq!(validate(&schema, json!("2024-02-30")), Err(Issue::message(DATE_MESSAGE)));
        assert_eq!(validate(&schema, json!(true)), Err(Issue::message(DATE_MESSAGE)));

        let custom = DateSchema::new().invalid_message("Bad date")?;
        assert_eq!(validate(&custom, json!({})), Err(Issue::message("Bad date")));
        Ok(())
    }

    #[test]
    fn test_transform_canonicalizes() {
        let schema = DateSchema::new();
        let ctx = TransformationContext::default();
        assert_eq!(
            schema.transform(Some(json!("2024-05-01T14:00:00+02:00")), &ctx),
            Some(json!("2024-05-01T12:00:00.000Z"))
        );
        assert_eq!(
            schema.transform(Some(json!("2024-05-01")), &ctx),
            Some(json!("2024-05-01T00:00:00.000Z"))
        );
        assert_eq!(
            schema.transform(Some(json!(86_400_000)), &ctx),
            Some(json!("1970-01-02T00:00:00.000Z"))
        );
    }
}
