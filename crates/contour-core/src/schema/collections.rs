//! Array, tuple and dictionary schemas
//!
//! Copyright (c) 2025 Contour Team
//! Licensed under the Apache-2.0 license

use super::bounds::{Bounded, Bounds};
use super::object::OBJECT_MESSAGE;
use super::rules::{Configure, Rules};
use super::{Schema, SchemaRef};
use crate::context::{TransformationContext, ValidationContext};
use crate::error::{Error, Result};
use crate::issue::{Issue, IssueMap, Validation};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Type failure message
pub const ARRAY_MESSAGE: &str = "Must be array";

/// Default message for a dictionary key rejected by the key schema
pub const KEY_MESSAGE: &str = "does not match possible values";

fn into_validation(issues: IssueMap) -> Validation {
    match Issue::from_map(issues) {
        Some(issue) => Err(issue),
        None => Ok(()),
    }
}

/// Schema accepting arrays whose elements all match one item schema
#[derive(Debug, Clone)]
pub struct ArraySchema {
    rules: Rules,
    bounds: Bounds,
    item: SchemaRef,
}

impl ArraySchema {
    pub fn new(item: impl Schema + 'static) -> Self {
        Self {
            rules: Rules::new("array"),
            bounds: Bounds::default(),
            item: Arc::new(item),
        }
    }
}

impl Configure for ArraySchema {
    fn rules_mut(&mut self) -> &mut Rules {
        &mut self.rules
    }
}

impl Bounded for ArraySchema {
    fn bounds_mut(&mut self) -> &mut Bounds {
        &mut self.bounds
    }
}

impl Schema for ArraySchema {
    fn kind(&self) -> &'static str {
        "array"
    }

    fn validate(&self, value: Option<&Value>, ctx: &ValidationContext) -> Validation {
        let Some(value) = self.rules.require(value)? else {
            return Ok(());
        };
        let Some(items) = value.as_array() else {
            return Err(Issue::message(ARRAY_MESSAGE));
        };

        self.bounds.check(items.len() as f64)?;

        let mut issues = IssueMap::new();
        for (index, item) in items.iter().enumerate() {
            if let Err(issue) = self.item.validate(Some(item), ctx) {
                issues.insert(index.into(), issue);
                if ctx.abort_early {
                    break;
                }
            }
        }
        into_validation(issues)
    }

    fn transform(&self, value: Option<Value>, ctx: &TransformationContext) -> Option<Value> {
        let value = match value {
            Some(Value::Array(items)) => Some(Value::Array(
                items
                    .into_iter()
                    .map(|item| self.item.transform(Some(item), ctx).unwrap_or(Value::Null))
                    .collect(),
            )),
            other => other,
        };
        self.rules.finish(value)
    }
}

/// Schema accepting arrays with one schema per position
///
/// Arrays longer than the declared positions are rejected. Shorter arrays
/// are not rejected as such: each missing position is checked as an absent
/// value, so it fails unless that position's schema is optional.
#[derive(Debug, Clone)]
pub struct TupleSchema {
    rules: Rules,
    items: Vec<SchemaRef>,
}

impl TupleSchema {
    pub fn new(items: Vec<SchemaRef>) -> Self {
        Self {
            rules: Rules::new("tuple"),
            items,
        }
    }

    fn length_message(&self) -> String {
        format!("Must have at most {} items", self.items.len())
    }
}

impl Configure for TupleSchema {
    fn rules_mut(&mut self) -> &mut Rules {
        &mut self.rules
    }
}

impl Schema for TupleSchema {
    fn kind(&self) -> &'static str {
        "tuple"
    }

    fn validate(&self, value: Option<&Value>, ctx: &ValidationContext) -> Validation {
        let Some(value) = self.rules.require(value)? else {
            return Ok(());
        };
        let Some(items) = value.as_array() else {
            return Err(Issue::message(ARRAY_MESSAGE));
        };
        if items.len() > self.items.len() {
            return Err(Issue::message(self.length_message()));
        }

        let mut issues = IssueMap::new();
        for (index, schema) in self.items.iter().enumerate() {
            if let Err(issue) = schema.validate(items.get(index), ctx) {
                issues.insert(index.into(), issue);
                if ctx.abort_early {
                    break;
                }
            }
        }
        into_validation(issues)
    }

    fn transform(&self, value: Option<Value>, ctx: &TransformationContext) -> Option<Value> {
        let value = match value {
            Some(Value::Array(items)) => {
                let mut items = items.into_iter();
                Some(Value::Array(
                    self.items
                        .iter()
                        .map(|schema| schema.transform(items.next(), ctx).unwrap_or(Value::Null))
                        .collect(),
                ))
            }
            other => other,
        };
        self.rules.finish(value)
    }
}

/// Schema accepting objects with arbitrary keys
///
/// Every key is checked against the key schema and every value against the
/// value schema.
#[derive(Debug, Clone)]
pub struct DictionarySchema {
    rules: Rules,
    key: SchemaRef,
    value: SchemaRef,
    key_message: Option<String>,
}

impl DictionarySchema {
    pub fn new(key: impl Schema + 'static, value: impl Schema + 'static) -> Self {
        Self {
            rules: Rules::new("mapped"),
            key: Arc::new(key),
            value: Arc::new(value),
            key_message: None,
        }
    }

    /// Message reported at a key the key schema rejects
    pub fn key_message(mut self, message: impl Into<String>) -> Result<Self> {
        if self.key_message.is_some() {
            return Err(Error::duplicate("mapped", "key_message"));
        }
        self.key_message = Some(message.into());
        Ok(self)
    }
}

impl Configure for DictionarySchema {
    fn rules_mut(&mut self) -> &mut Rules {
        &mut self.rules
    }
}

impl Schema for DictionarySchema {
    fn kind(&self) -> &'static str {
        "mapped"
    }

    fn validate(&self, value: Option<&Value>, ctx: &ValidationContext) -> Validation {
        let Some(value) = self.rules.require(value)? else {
            return Ok(());
        };
        let Some(entries) = value.as_object() else {
            return Err(Issue::message(OBJECT_MESSAGE));
        };

        let mut issues = IssueMap::new();
        for (key, entry) in entries {
            let key_value = Value::String(key.clone());
            let outcome = match self.key.validate(Some(&key_value), ctx) {
                Ok(()) => self.value.validate(Some(entry), ctx),
                Err(_) => Err(Issue::message(
                    self.key_message.as_deref().unwrap_or(KEY_MESSAGE),
                )),
            };
            if let Err(issue) = outcome {
                issues.insert(key.as_str().into(), issue);
                if ctx.abort_early {
                    break;
                }
            }
        }
        into_validation(issues)
    }

    /// Keys that transform to the same string collapse into one entry
    /// holding the value that came last in the input.
    fn transform(&self, value: Option<Value>, ctx: &TransformationContext) -> Option<Value> {
        let value = match value {
            Some(Value::Object(entries)) => {
                let mut output = Map::new();
                for (key, entry) in entries {
                    let key = match self.key.transform(Some(Value::String(key.clone())), ctx) {
                        Some(Value::String(transformed)) => transformed,
                        _ => key,
                    };
                    if let Some(entry) = self.value.transform(Some(entry), ctx) {
                        output.insert(key, entry);
                    }
                }
                Some(Value::Object(output))
            }
            other => other,
        };
        self.rules.finish(value)
    }
}
