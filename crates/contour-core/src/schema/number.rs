//! Number schema
//!
//! Integers are required unless [`NumberSchema::float`] is called. Bounds
//! apply to the value itself.
//!
//! Copyright (c) 2025 Contour Team
//! Licensed under the Apache-2.0 license

use super::bounds::{Bounded, Bounds};
use super::rules::{Configure, Rules};
use super::Schema;
use crate::context::{TransformationContext, ValidationContext};
use crate::error::{Error, Result};
use crate::issue::{Issue, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Type failure message
pub const NUMBER_MESSAGE: &str = "Must be number";

/// Default message for a fractional value when floats are not allowed
pub const INTEGER_MESSAGE: &str = "Must be integer";

/// Rounding applied on transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rounding {
    Ceil,
    Floor,
    Round,
}

impl Rounding {
    /// Apply this rounding mode
    pub fn apply(self, n: f64) -> f64 {
        match self {
            Rounding::Ceil => n.ceil(),
            Rounding::Floor => n.floor(),
            // half-way cases go towards +infinity
            Rounding::Round => {
                let floor = n.floor();
                if n - floor >= 0.5 {
                    floor + 1.0
                } else {
                    floor
                }
            }
        }
    }
}

/// Schema accepting JSON numbers
#[derive(Debug, Clone)]
pub struct NumberSchema {
    rules: Rules,
    bounds: Bounds,
    float: bool,
    integer_message: Option<String>,
    rounding: Option<Rounding>,
}

impl NumberSchema {
    /// Create an integer-only number schema
    pub fn new() -> Self {
        Self {
            rules: Rules::new("number"),
            bounds: Bounds::default(),
            float: false,
            integer_message: None,
            rounding: None,
        }
    }

    /// Accept fractional values
    pub fn float(mut self) -> Result<Self> {
        if self.float {
            return Err(Error::duplicate("number", "float"));
        }
        self.float = true;
        Ok(self)
    }

    /// Message reported for a fractional value
    pub fn integer_message(mut self, message: impl Into<String>) -> Result<Self> {
        if self.integer_message.is_some() {
            return Err(Error::duplicate("number", "integer_message"));
        }
        self.integer_message = Some(message.into());
        Ok(self)
    }

    /// Round on transform
    pub fn round(mut self, rounding: Rounding) -> Result<Self> {
        if self.rounding.is_some() {
            return Err(Error::duplicate("number", "round"));
        }
        self.rounding = Some(rounding);
        Ok(self)
    }
}

impl Default for NumberSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl Configure for NumberSchema {
    fn rules_mut(&mut self) -> &mut Rules {
        &mut self.rules
    }
}

impl Bounded for NumberSchema {
    fn bounds_mut(&mut self) -> &mut Bounds {
        &mut self.bounds
    }
}

impl Schema for NumberSchema {
    fn kind(&self) -> &'static str {
        "number"
    }

    fn validate(&self, value: Option<&Value>, _ctx: &ValidationContext) -> Validation {
        let Some(value) = self.rules.require(value)? else {
            return Ok(());
        };
        let Some(n) = value.as_f64() else {
            return Err(Issue::message(NUMBER_MESSAGE));
        };

        if !self.float && n.fract() != 0.0 {
            return Err(Issue::message(
                self.integer_message.as_deref().unwrap_or(INTEGER_MESSAGE),
            ));
        }

        self.bounds.check(n)
    }

    fn transform(&self, value: Option<Value>, _ctx: &TransformationContext) -> Option<Value> {
        let value = match (self.rounding, value) {
            // integers are already rounded and may not survive an f64 trip
            (Some(rounding), Some(Value::Number(n))) if !(n.is_i64() || n.is_u64()) => {
                Some(match n.as_f64() {
                    Some(f) => number_value(rounding.apply(f)),
                    None => Value::Number(n),
                })
            }
            (_, value) => value,
        };
        self.rules.finish(value)
    }
}

/// JSON number for `n`, as an integer when it is integral and fits
pub(crate) fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 {
        Value::Number(Number::from(n as i64))
    } else {
        Number::from_f64(n).map_or(Value::Null, Value::Number)
    }
}
