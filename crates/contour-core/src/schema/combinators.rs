//! Union, intersection and custom-predicate schemas
//!
//! Copyright (c) 2025 Contour Team
//! Licensed under the Apache-2.0 license

use super::rules::{Configure, Rules};
use super::{Schema, SchemaRef};
use crate::context::{TransformationContext, ValidationContext};
use crate::error::{Error, Result};
use crate::issue::Validation;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

fn at_least_two(combinator: &'static str, schemas: &[SchemaRef]) -> Result<()> {
    if schemas.len() < 2 {
        return Err(Error::TooFewBranches {
            combinator,
            found: schemas.len(),
        });
    }
    Ok(())
}

/// Union: valid when any branch is valid
///
/// Branches are tried in order. When all of them fail, the issue of the
/// last branch tried is reported.
#[derive(Debug, Clone)]
pub struct OrSchema {
    rules: Rules,
    branches: Vec<SchemaRef>,
}

impl OrSchema {
    /// Union of at least two schemas
    pub fn new(branches: Vec<SchemaRef>) -> Result<Self> {
        at_least_two("or", &branches)?;
        Ok(Self::from_branches(branches))
    }

    pub(crate) fn from_pair(first: SchemaRef, second: SchemaRef) -> Self {
        Self::from_branches(vec![first, second])
    }

    fn from_branches(branches: Vec<SchemaRef>) -> Self {
        Self {
            rules: Rules::new("or"),
            branches,
        }
    }

    /// Branches in trial order
    pub fn branches(&self) -> &[SchemaRef] {
        &self.branches
    }
}

impl Configure for OrSchema {
    fn rules_mut(&mut self) -> &mut Rules {
        &mut self.rules
    }
}

impl Schema for OrSchema {
    fn kind(&self) -> &'static str {
        "or"
    }

    fn validate(&self, value: Option<&Value>, ctx: &ValidationContext) -> Validation {
        let Some(value) = self.rules.require(value)? else {
            return Ok(());
        };

        let mut last = Ok(());
        for branch in &self.branches {
            last = branch.validate(Some(value), ctx);
            if last.is_ok() {
                return Ok(());
            }
        }
        last
    }

    fn transform(&self, value: Option<Value>, ctx: &TransformationContext) -> Option<Value> {
        let probe = ValidationContext::default();
        let matched = self
            .branches
            .iter()
            .find(|branch| branch.validate(value.as_ref(), &probe).is_ok());

        let value = match matched {
            Some(branch) => branch.transform(value, ctx),
            None => {
                tracing::debug!("no union branch matched, value left untransformed");
                value
            }
        };
        self.rules.finish(value)
    }
}

/// Intersection: valid only when every part is valid
///
/// Validation reports the first failing part. Transformation threads the
/// value through every part in order.
#[derive(Debug, Clone)]
pub struct AndSchema {
    rules: Rules,
    parts: Vec<SchemaRef>,
}

impl AndSchema {
    /// Intersection of at least two schemas
    pub fn new(parts: Vec<SchemaRef>) -> Result<Self> {
        at_least_two("and", &parts)?;
        Ok(Self::from_parts(parts))
    }

    pub(crate) fn from_pair(first: SchemaRef, second: SchemaRef) -> Self {
        Self::from_parts(vec![first, second])
    }

    fn from_parts(parts: Vec<SchemaRef>) -> Self {
        Self {
            rules: Rules::new("and"),
            parts,
        }
    }

    /// Parts in application order
    pub fn parts(&self) -> &[SchemaRef] {
        &self.parts
    }
}

impl Configure for AndSchema {
    fn rules_mut(&mut self) -> &mut Rules {
        &mut self.rules
    }
}

impl Schema for AndSchema {
    fn kind(&self) -> &'static str {
        "and"
    }

    fn validate(&self, value: Option<&Value>, ctx: &ValidationContext) -> Validation {
        let Some(value) = self.rules.require(value)? else {
            return Ok(());
        };
        self.parts
            .iter()
            .try_for_each(|part| part.validate(Some(value), ctx))
    }

    fn transform(&self, value: Option<Value>, ctx: &TransformationContext) -> Option<Value> {
        let value = self
            .parts
            .iter()
            .fold(value, |current, part| part.transform(current, ctx));
        self.rules.finish(value)
    }
}

/// Caller-supplied validation function
pub type Predicate = Arc<dyn Fn(Option<&Value>, &ValidationContext) -> Validation + Send + Sync>;

/// Schema that delegates validation to a caller-supplied function
///
/// The function sees the raw value, absent and `null` included; no
/// presence check runs first.
#[derive(Clone)]
pub struct CustomSchema {
    rules: Rules,
    predicate: Predicate,
}

impl CustomSchema {
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(Option<&Value>, &ValidationContext) -> Validation + Send + Sync + 'static,
    {
        Self {
            rules: Rules::new("custom"),
            predicate: Arc::new(predicate),
        }
    }
}

impl fmt::Debug for CustomSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomSchema")
            .field("rules", &self.rules)
            .finish_non_exhaustive()
    }
}

impl Configure for CustomSchema {
    fn rules_mut(&mut self) -> &mut Rules {
        &mut self.rules
    }
}

impl Schema for CustomSchema {
    fn kind(&self) -> &'static str {
        "custom"
    }

    fn validate(&self, value: Option<&Value>, ctx: &ValidationContext) -> Validation {
        (self.predicate)(value, ctx)
    }

    fn transform(&self, value: Option<Value>, _ctx: &TransformationContext) -> Option<Value> {
        self.rules.finish(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::Issue;
    use crate::schema::{Bounded, NumberSchema, SchemaExt, StringSchema};
    use serde_json::json;

    #[test]
    fn test_or_reports_last_branch_issue() -> Result<()> {
        let schema = OrSchema::new(vec![
            StringSchema::new().min(10, "string too short")?.boxed(),
            NumberSchema::new().boxed(),
        ])?;
        assert_eq!(schema.check(&json!("short")), Err(Issue::message("Must be number")));
        assert_eq!(schema.check(&json!(3)), Ok(()));
        assert_eq!(schema.check(&json!("long enough!")), Ok(()));
        Ok(())
    }

    #[test]
    fn test_or_needs_two_branches() {
        let err = OrSchema::new(vec![StringSchema::new().boxed()]).unwrap_err();
        assert!(matches!(err, Error::TooFewBranches { combinator: "or", found: 1 }));
    }

    #[test]
    fn test_or_transforms_with_first_matching_branch() -> Result<()> {
        let schema = StringSchema::new()
            .case(crate::schema::Casing::Upper)?
            .or(NumberSchema::new().float()?.round(crate::schema::Rounding::Floor)?);
        assert_eq!(schema.normalize(json!(" abc ")), json!("ABC"));
        assert_eq!(schema.normalize(json!(2.7)), json!(2));
        // nothing matches: passed through
        assert_eq!(schema.normalize(json!([1])), json!([1]));
        Ok(())
    }

    #[test]
    fn test_and_reports_first_failure() -> Result<()> {
        let schema = AndSchema::new(vec![
            StringSchema::new().min(2, "first")?.boxed(),
            StringSchema::new().max(1, "second")?.boxed(),
        ])?;
        assert_eq!(schema.check(&json!("x")), Err(Issue::message("first")));
        assert_eq!(schema.check(&json!("xyz")), Err(Issue::message("second")));
        Ok(())
    }

    #[test]
    fn test_and_threads_transforms() -> Result<()> {
        let schema = StringSchema::new()
            .do_custom(|v| v.map(|v| json!(format!("{}!", v.as_str().unwrap_or_default()))))?
            .and(StringSchema::new().case(crate::schema::Casing::Upper)?);
        assert_eq!(schema.normalize(json!("hey")), json!("HEY!"));
        Ok(())
    }

    #[test]
    fn test_custom_sees_absent_values() {
        let schema = CustomSchema::new(|value, _ctx| match value {
            None => Err(Issue::message("custom required")),
            Some(v) if v.is_null() => Ok(()),
            Some(_) => Ok(()),
        });
        let ctx = ValidationContext::default();
        assert_eq!(schema.validate(None, &ctx), Err(Issue::message("custom required")));
        assert_eq!(schema.validate(Some(&Value::Null), &ctx), Ok(()));
    }
}
