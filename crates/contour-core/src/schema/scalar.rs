//! Boolean and literal-value schemas
//!
//! Copyright (c) 2025 Contour Team
//! Licensed under the Apache-2.0 license

use super::rules::{Configure, Rules};
use super::Schema;
use crate::context::{TransformationContext, ValidationContext};
use crate::issue::{Issue, Validation};
use serde_json::Value;

/// Type failure message
pub const BOOLEAN_MESSAGE: &str = "Must be boolean";

/// Schema accepting `true` and `false`
#[derive(Debug, Clone)]
pub struct BooleanSchema {
    rules: Rules,
}

impl BooleanSchema {
    pub fn new() -> Self {
        Self {
            rules: Rules::new("boolean"),
        }
    }
}

impl Default for BooleanSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl Configure for BooleanSchema {
    fn rules_mut(&mut self) -> &mut Rules {
        &mut self.rules
    }
}

impl Schema for BooleanSchema {
    fn kind(&self) -> &'static str {
        "boolean"
    }

    fn validate(&self, value: Option<&Value>, _ctx: &ValidationContext) -> Validation {
        match self.rules.require(value)? {
            Some(Value::Bool(_)) | None => Ok(()),
            Some(_) => Err(Issue::message(BOOLEAN_MESSAGE)),
        }
    }

    fn transform(&self, value: Option<Value>, _ctx: &TransformationContext) -> Option<Value> {
        self.rules.finish(value)
    }
}

/// Schema accepting exactly one literal value
///
/// A mismatch reports the required message.
#[derive(Debug, Clone)]
pub struct ValueSchema {
    rules: Rules,
    literal: Value,
}

impl ValueSchema {
    pub fn new(literal: impl Into<Value>) -> Self {
        Self {
            rules: Rules::new("value"),
            literal: literal.into(),
        }
    }

    /// The accepted literal
    pub fn literal(&self) -> &Value {
        &self.literal
    }
}

impl Configure for ValueSchema {
    fn rules_mut(&mut self) -> &mut Rules {
        &mut self.rules
    }
}

impl Schema for ValueSchema {
    fn kind(&self) -> &'static str {
        "value"
    }

    fn validate(&self, value: Option<&Value>, _ctx: &ValidationContext) -> Validation {
        let Some(value) = self.rules.require(value)? else {
            return Ok(());
        };
        if strict_equals(value, &self.literal) {
            Ok(())
        } else {
            Err(Issue::message(self.rules.required_message()))
        }
    }

    fn transform(&self, value: Option<Value>, _ctx: &TransformationContext) -> Option<Value> {
        self.rules.finish(value)
    }
}

/// Equality where numbers compare by value, so `1` equals `1.0`
pub(crate) fn strict_equals(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => a == b,
        },
        _ => left == right,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use serde_json::json;

    #[test]
    fn test_boolean() {
        let schema = BooleanSchema::new();
        let ctx = ValidationContext::default();
        assert_eq!(schema.validate(Some(&json!(false)), &ctx), Ok(()));
        assert_eq!(
            schema.validate(Some(&json!(0)), &ctx),
            Err(Issue::message(BOOLEAN_MESSAGE))
        );
        assert_eq!(
            schema.validate(Some(&json!("true")), &ctx),
            Err(Issue::message(BOOLEAN_MESSAGE))
        );
    }

    #[test]
    fn test_literal_match() -> Result<()> {
        let schema = ValueSchema::new("admin").required_message("Must be admin")?;
        let ctx = ValidationContext::default();
        assert_eq!(schema.validate(Some(&json!("admin")), &ctx), Ok(()));
        assert_eq!(
            schema.validate(Some(&json!("user")), &ctx),
            Err(Issue::message("Must be admin"))
        );
        assert_eq!(schema.validate(None, &ctx), Err(Issue::message("Must be admin")));
        Ok(())
    }

    #[test]
    fn test_strict_equals() {
        assert!(strict_equals(&json!(1), &json!(1.0)));
        assert!(!strict_equals(&json!(1), &json!("1")));
        assert!(strict_equals(&json!({"a": [1]}), &json!({"a": [1]})));
        assert!(!strict_equals(&json!(true), &json!(1)));
    }
}
