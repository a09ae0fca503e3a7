//! Declarative schema descriptions
//!
//! A [`SchemaDescriptor`] is plain data, so a schema tree can live in a JSON
//! or YAML file and be turned into a live schema at runtime. Building goes
//! through the same factories and builder methods as hand-written code, so
//! a descriptor that repeats a setting or names an invalid pattern fails
//! with the same [`Error`] the builder would return.
//!
//! Custom predicates and transform closures have no descriptor form.
//!
//! ```yaml
//! type: object
//! fields:
//!   - name: email
//!     type: email
//!   - name: age
//!     type: number
//!     optional: true
//!     min: { value: 18, message: Too young }
//! ```
//!
//! Copyright (c) 2025 Contour Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::factory;
use crate::schema::{Bounded, Casing, Configure, Rounding, SchemaExt, SchemaRef};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;

/// Settings every schema variant understands
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Common {
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub null_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when_empty: Option<Value>,
}

impl Common {
    fn apply<S: Configure>(&self, mut schema: S) -> Result<S> {
        if self.optional {
            schema = schema.optional()?;
        }
        if self.nullable {
            schema = schema.nullable()?;
        }
        if let Some(message) = &self.required_message {
            schema = schema.required_message(message.as_str())?;
        }
        if let Some(message) = &self.null_message {
            schema = schema.null_message(message.as_str())?;
        }
        if let Some(value) = &self.when_empty {
            schema = schema.do_set_when_empty(value.clone())?;
        }
        Ok(schema)
    }
}

/// A size limit with its failure message
///
/// Without a message the bound reports its default one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Limit {
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A regular expression with its failure message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternDescriptor {
    pub regex: String,
    pub message: String,
}

/// One named field of an object descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(flatten)]
    pub schema: SchemaDescriptor,
}

/// Serializable description of a schema tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SchemaDescriptor {
    String {
        #[serde(flatten)]
        common: Common,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<Limit>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<Limit>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pattern: Option<PatternDescriptor>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trim: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        case: Option<Casing>,
    },
    Email {
        #[serde(flatten)]
        common: Common,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        case: Option<Casing>,
    },
    Number {
        #[serde(flatten)]
        common: Common,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<Limit>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<Limit>,
        #[serde(default)]
        float: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        integer_message: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        round: Option<Rounding>,
    },
    Boolean {
        #[serde(flatten)]
        common: Common,
    },
    Value {
        #[serde(flatten)]
        common: Common,
        literal: Value,
    },
    Date {
        #[serde(flatten)]
        common: Common,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        invalid_message: Option<String>,
    },
    /// Without `fields` the object accepts any shape
    Object {
        #[serde(flatten)]
        common: Common,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fields: Option<Vec<FieldDescriptor>>,
    },
    Array {
        #[serde(flatten)]
        common: Common,
        items: Box<SchemaDescriptor>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<Limit>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<Limit>,
    },
    Tuple {
        #[serde(flatten)]
        common: Common,
        items: Vec<SchemaDescriptor>,
    },
    Or {
        #[serde(flatten)]
        common: Common,
        branches: Vec<SchemaDescriptor>,
    },
    And {
        #[serde(flatten)]
        common: Common,
        parts: Vec<SchemaDescriptor>,
    },
    Mapped {
        #[serde(flatten)]
        common: Common,
        key: Box<SchemaDescriptor>,
        value: Box<SchemaDescriptor>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        key_message: Option<String>,
    },
}

fn bounded<S: Bounded>(mut schema: S, min: &Option<Limit>, max: &Option<Limit>) -> Result<S> {
    if let Some(limit) = min {
        schema = match &limit.message {
            Some(message) => schema.min(limit.value, message.as_str())?,
            None => schema.min_value(limit.value)?,
        };
    }
    if let Some(limit) = max {
        schema = match &limit.message {
            Some(message) => schema.max(limit.value, message.as_str())?,
            None => schema.max_value(limit.value)?,
        };
    }
    Ok(schema)
}

fn build_all(descriptors: &[SchemaDescriptor]) -> Result<Vec<SchemaRef>> {
    descriptors.iter().map(SchemaDescriptor::build).collect()
}

impl SchemaDescriptor {
    /// Parse a descriptor from JSON text
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Parse a descriptor from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load a descriptor file, picking the format from its extension
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);

        tracing::debug!(path = %path.display(), "loading schema descriptor");
        let content = std::fs::read_to_string(path)?;

        match extension.as_deref() {
            Some("json") => Self::from_json_str(&content),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content),
            _ => Err(Error::descriptor(format!(
                "unsupported file format for '{}', expected .json, .yaml or .yml",
                path.display()
            ))),
        }
    }

    /// Variant name, matching the `type` tag
    pub fn kind(&self) -> &'static str {
        match self {
            SchemaDescriptor::String { .. } => "string",
            SchemaDescriptor::Email { .. } => "email",
            SchemaDescriptor::Number { .. } => "number",
            SchemaDescriptor::Boolean { .. } => "boolean",
            SchemaDescriptor::Value { .. } => "value",
            SchemaDescriptor::Date { .. } => "date",
            SchemaDescriptor::Object { .. } => "object",
            SchemaDescriptor::Array { .. } => "array",
            SchemaDescriptor::Tuple { .. } => "tuple",
            SchemaDescriptor::Or { .. } => "or",
            SchemaDescriptor::And { .. } => "and",
            SchemaDescriptor::Mapped { .. } => "mapped",
        }
    }

    /// Build the live schema this descriptor describes
    pub fn build(&self) -> Result<SchemaRef> {
        let schema = match self {
            SchemaDescriptor::String {
                common,
                min,
                max,
                pattern,
                trim,
                case,
            } => {
                let mut schema = bounded(factory::string(), min, max)?;
                if let Some(pattern) = pattern {
                    schema = schema.pattern(&pattern.regex, pattern.message.as_str())?;
                }
                if let Some(trim) = trim {
                    schema = schema.trim(*trim)?;
                }
                if let Some(casing) = case {
                    schema = schema.case(*casing)?;
                }
                common.apply(schema)?.boxed()
            }
            SchemaDescriptor::Email {
                common,
                message,
                case,
            } => {
                let mut schema = match message {
                    Some(message) => factory::email_with_message(message.as_str()),
                    None => factory::email(),
                };
                if let Some(casing) = case {
                    schema = schema.case(*casing)?;
                }
                common.apply(schema)?.boxed()
            }
            SchemaDescriptor::Number {
                common,
                min,
                max,
                float,
                integer_message,
                round,
            } => {
                let mut schema = bounded(factory::number(), min, max)?;
                if *float {
                    schema = schema.float()?;
                }
                if let Some(message) = integer_message {
                    schema = schema.integer_message(message.as_str())?;
                }
                if let Some(rounding) = round {
                    schema = schema.round(*rounding)?;
                }
                common.apply(schema)?.boxed()
            }
            SchemaDescriptor::Boolean { common } => common.apply(factory::boolean())?.boxed(),
            SchemaDescriptor::Value { common, literal } => {
                common.apply(factory::value(literal.clone()))?.boxed()
            }
            SchemaDescriptor::Date {
                common,
                invalid_message,
            } => {
                let mut schema = factory::date();
                if let Some(message) = invalid_message {
                    schema = schema.invalid_message(message.as_str())?;
                }
                common.apply(schema)?.boxed()
            }
            SchemaDescriptor::Object { common, fields } => {
                let schema = match fields {
                    Some(fields) => {
                        let mut seen = HashSet::new();
                        let mut built = Vec::with_capacity(fields.len());
                        for field in fields {
                            if !seen.insert(field.name.as_str()) {
                                return Err(Error::descriptor(format!(
                                    "field '{}' is declared more than once",
                                    field.name
                                )));
                            }
                            built.push((field.name.clone(), field.schema.build()?));
                        }
                        factory::object(built)
                    }
                    None => factory::open_object(),
                };
                common.apply(schema)?.boxed()
            }
            SchemaDescriptor::Array {
                common,
                items,
                min,
                max,
            } => {
                let schema = bounded(factory::array(items.build()?), min, max)?;
                common.apply(schema)?.boxed()
            }
            SchemaDescriptor::Tuple { common, items } => {
                common.apply(factory::tuple(build_all(items)?))?.boxed()
            }
            SchemaDescriptor::Or { common, branches } => {
                common.apply(factory::or(build_all(branches)?)?)?.boxed()
            }
            SchemaDescriptor::And { common, parts } => {
                common.apply(factory::and(build_all(parts)?)?)?.boxed()
            }
            SchemaDescriptor::Mapped {
                common,
                key,
                value,
                key_message,
            } => {
                let mut schema = factory::mapped(key.build()?, value.build()?);
                if let Some(message) = key_message {
                    schema = schema.key_message(message.as_str())?;
                }
                common.apply(schema)?.boxed()
            }
        };
        Ok(schema)
    }
}

/// Load a descriptor file and build its schema
pub fn load_schema(path: impl AsRef<Path>) -> Result<SchemaRef> {
    SchemaDescriptor::from_path(path)?.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::Issue;
    use crate::schema::Schema;
    use crate::context::ValidationContext;
    use serde_json::json;

    #[test]
    fn test_yaml_object_keeps_field_order() -> Result<()> {
        let descriptor = SchemaDescriptor::from_yaml_str(
            r#"
type: object
fields:
  - name: zeta
    type: string
  - name: alpha
    type: number
"#,
        )?;
        let SchemaDescriptor::Object { fields: Some(fields), .. } = &descriptor else {
            panic!("expected an object descriptor");
        };
        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);

        // abort-early stops at the first declared field, not the first sorted key
        let schema = descriptor.build()?;
        let issue = schema
            .validate(Some(&json!({"zeta": 1, "alpha": "x"})), &ValidationContext::default())
            .unwrap_err();
        assert!(issue.get("zeta").is_some());
        assert!(issue.get("alpha").is_none());
        Ok(())
    }

    #[test]
    fn test_json_options_reach_the_builders() -> Result<()> {
        let schema = SchemaDescriptor::from_json_str(
            r#"{
                "type": "string",
                "optional": true,
                "min": {"value": 2, "message": "Too short"},
                "case": "upper"
            }"#,
        )?
        .build()?;
        assert_eq!(schema.check(&json!("a")), Err(Issue::message("Too short")));
        assert_eq!(schema.validate(None, &ValidationContext::default()), Ok(()));
        assert_eq!(schema.normalize(json!(" ab ")), json!("AB"));
        Ok(())
    }

    #[test]
    fn test_limit_message_is_optional() -> Result<()> {
        let schema = SchemaDescriptor::from_yaml_str(
            "type: array\nitems: { type: number }\nmax: { value: 2 }\n",
        )?
        .build()?;
        assert_eq!(
            schema.check(&json!([1, 2, 3])),
            Err(Issue::message("Must have at most 2 items"))
        );
        Ok(())
    }

    #[test]
    fn test_combinator_arity_is_checked() {
        let descriptor = SchemaDescriptor::from_json_str(
            r#"{"type": "or", "branches": [{"type": "string"}]}"#,
        )
        .unwrap();
        assert!(matches!(
            descriptor.build(),
            Err(Error::TooFewBranches { combinator: "or", found: 1 })
        ));
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let descriptor = SchemaDescriptor::from_json_str(
            r#"{"type": "object", "fields": [
                {"name": "a", "type": "string"},
                {"name": "a", "type": "number"}
            ]}"#,
        )
        .unwrap();
        assert!(matches!(descriptor.build(), Err(Error::Descriptor { .. })));
    }

    #[test]
    fn test_invalid_pattern_surfaces() {
        let descriptor = SchemaDescriptor::from_json_str(
            r#"{"type": "string", "pattern": {"regex": "(", "message": "x"}}"#,
        )
        .unwrap();
        assert!(matches!(descriptor.build(), Err(Error::InvalidPattern { .. })));
    }

    #[test]
    fn test_unknown_type_tag() {
        let err = SchemaDescriptor::from_json_str(r#"{"type": "uuid"}"#).unwrap_err();
        assert!(matches!(err, Error::Json { .. }));
    }

    #[test]
    fn test_kind_matches_tag() -> Result<()> {
        let descriptor = SchemaDescriptor::from_json_str(
            r#"{"type": "mapped", "key": {"type": "string"}, "value": {"type": "boolean"}}"#,
        )?;
        assert_eq!(descriptor.kind(), "mapped");
        assert_eq!(descriptor.build()?.kind(), "mapped");
        Ok(())
    }
}
