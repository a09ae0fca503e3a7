//! Min/max bounds shared by strings, numbers and arrays
//!
//! The measured quantity depends on the schema: character count for
//! strings, element count for arrays, the value itself for numbers.
//!
//! Copyright (c) 2025 Contour Team
//! Licensed under the Apache-2.0 license

use super::rules::Configure;
use crate::error::{Error, Result};
use crate::issue::Issue;

/// Default failure message for a bound on `schema`
///
/// ```
/// use contour_core::schema::bounds::default_message;
///
/// assert_eq!(default_message("string", "least", 3.0), "Must have at least 3 characters");
/// assert_eq!(default_message("number", "most", 2.5), "Must be at most 2.5");
/// ```
pub fn default_message(schema: &str, side: &str, limit: f64) -> String {
    match schema {
        "string" => format!("Must have at {} {} characters", side, limit),
        "array" => format!("Must have at {} {} items", side, limit),
        _ => format!("Must be at {} {}", side, limit),
    }
}

/// A single bound with its failure message
#[derive(Debug, Clone, PartialEq)]
pub struct Bound {
    pub limit: f64,
    pub message: String,
}

/// Optional lower and upper bound
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bounds {
    min: Option<Bound>,
    max: Option<Bound>,
}

impl Bounds {
    /// Lower bound, if set
    pub fn min(&self) -> Option<&Bound> {
        self.min.as_ref()
    }

    /// Upper bound, if set
    pub fn max(&self) -> Option<&Bound> {
        self.max.as_ref()
    }

    pub(crate) fn set_min(&mut self, schema: &'static str, limit: f64, message: String) -> Result<()> {
        if self.min.is_some() {
            return Err(Error::duplicate(schema, "min"));
        }
        self.min = Some(Bound { limit, message });
        Ok(())
    }

    pub(crate) fn set_max(&mut self, schema: &'static str, limit: f64, message: String) -> Result<()> {
        if self.max.is_some() {
            return Err(Error::duplicate(schema, "max"));
        }
        self.max = Some(Bound { limit, message });
        Ok(())
    }

    /// Check a measured size against both bounds
    pub fn check(&self, size: f64) -> std::result::Result<(), Issue> {
        if let Some(min) = &self.min {
            if size < min.limit {
                return Err(Issue::message(&min.message));
            }
        }
        if let Some(max) = &self.max {
            if size > max.limit {
                return Err(Issue::message(&max.message));
            }
        }
        Ok(())
    }
}

/// Builder methods for schemas with size bounds
pub trait Bounded: Configure {
    /// Access the bounds of this schema
    fn bounds_mut(&mut self) -> &mut Bounds;

    /// Reject sizes below `limit`
    fn min(mut self, limit: impl Into<f64>, message: impl Into<String>) -> Result<Self> {
        let schema = self.rules_mut().schema();
        self.bounds_mut().set_min(schema, limit.into(), message.into())?;
        Ok(self)
    }

    /// Reject sizes above `limit`
    fn max(mut self, limit: impl Into<f64>, message: impl Into<String>) -> Result<Self> {
        let schema = self.rules_mut().schema();
        self.bounds_mut().set_max(schema, limit.into(), message.into())?;
        Ok(self)
    }

    /// [`Bounded::min`] with the default message
    fn min_value(mut self, limit: impl Into<f64>) -> Result<Self> {
        let limit = limit.into();
        let message = default_message(self.rules_mut().schema(), "least", limit);
        self.min(limit, message)
    }

    /// [`Bounded::max`] with the default message
    fn max_value(mut self, limit: impl Into<f64>) -> Result<Self> {
        let limit = limit.into();
        let message = default_message(self.rules_mut().schema(), "most", limit);
        self.max(limit, message)
    }
}
