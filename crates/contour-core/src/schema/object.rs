//! Object schemas
//!
//! A fixed-field object checks its declared fields in declaration order and
//! rebuilds the value from those fields alone: keys the schema does not
//! declare never survive `transform`. An open object only checks that the
//! value is an object.
//!
//! Copyright (c) 2025 Contour Team
//! Licensed under the Apache-2.0 license

use super::rules::{Configure, Rules};
use super::{Schema, SchemaRef};
use crate::context::{TransformationContext, ValidationContext};
use crate::issue::{Issue, IssueMap, Validation};
use serde_json::{Map, Value};

/// Type failure message
pub const OBJECT_MESSAGE: &str = "Must be object";

#[derive(Debug, Clone)]
enum Shape {
    Fixed(Vec<(String, SchemaRef)>),
    Open,
}

/// Schema accepting JSON objects
#[derive(Debug, Clone)]
pub struct ObjectSchema {
    rules: Rules,
    shape: Shape,
}

impl ObjectSchema {
    /// Object with the given fields, checked in iteration order
    pub fn fixed<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, SchemaRef)>,
        K: Into<String>,
    {
        Self {
            rules: Rules::new("object"),
            shape: Shape::Fixed(
                fields
                    .into_iter()
                    .map(|(name, schema)| (name.into(), schema))
                    .collect(),
            ),
        }
    }

    /// Object of any shape
    pub fn open() -> Self {
        Self {
            rules: Rules::new("object"),
            shape: Shape::Open,
        }
    }

    /// Declared field names in check order; empty for an open object
    pub fn field_names(&self) -> Vec<&str> {
        match &self.shape {
            Shape::Fixed(fields) => fields.iter().map(|(name, _)| name.as_str()).collect(),
            Shape::Open => Vec::new(),
        }
    }
}

impl Configure for ObjectSchema {
    fn rules_mut(&mut self) -> &mut Rules {
        &mut self.rules
    }
}

impl Schema for ObjectSchema {
    fn kind(&self) -> &'static str {
        "object"
    }

    fn validate(&self, value: Option<&Value>, ctx: &ValidationContext) -> Validation {
        let Some(value) = self.rules.require(value)? else {
            return Ok(());
        };
        let Some(object) = value.as_object() else {
            return Err(Issue::message(OBJECT_MESSAGE));
        };
        let Shape::Fixed(fields) = &self.shape else {
            return Ok(());
        };

        let mut issues = IssueMap::new();
        for (name, schema) in fields {
            if let Err(issue) = schema.validate(object.get(name), ctx) {
                issues.insert(name.as_str().into(), issue);
                if ctx.abort_early {
                    break;
                }
            }
        }

        match Issue::from_map(issues) {
            Some(issue) => Err(issue),
            None => Ok(()),
        }
    }

    fn transform(&self, value: Option<Value>, ctx: &TransformationContext) -> Option<Value> {
        let value = match (&self.shape, value) {
            (Shape::Fixed(fields), Some(Value::Object(mut input))) => {
                let mut output = Map::new();
                for (name, schema) in fields {
                    if let Some(field) = schema.transform(input.remove(name), ctx) {
                        output.insert(name.clone(), field);
                    }
                }
                Some(Value::Object(output))
            }
            (_, value) => value,
        };
        self.rules.finish(value)
    }
}
