//! Constructor functions, one per schema variant
//!
//! These are the entry points applications use to declare schemas; the
//! returned builders are then refined with the [`Configure`] and
//! [`Bounded`] methods.
//!
//! [`Configure`]: crate::schema::Configure
//! [`Bounded`]: crate::schema::Bounded
//!
//! Copyright (c) 2025 Contour Team
//! Licensed under the Apache-2.0 license

use crate::context::ValidationContext;
use crate::error::Result;
use crate::issue::Validation;
use crate::schema::{
    AndSchema, ArraySchema, BooleanSchema, CustomSchema, DateSchema, DictionarySchema,
    NumberSchema, ObjectSchema, OrSchema, Schema, SchemaRef, StringSchema, TupleSchema,
    ValueSchema,
};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Pattern used by [`email`]
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Default message used by [`email`]
pub const EMAIL_MESSAGE: &str = "Invalid email";

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

/// String schema
pub fn string() -> StringSchema {
    StringSchema::new()
}

/// Integer schema; call `float()` to accept fractions
pub fn number() -> NumberSchema {
    NumberSchema::new()
}

/// Boolean schema
pub fn boolean() -> BooleanSchema {
    BooleanSchema::new()
}

/// Schema accepting exactly `literal`
pub fn value(literal: impl Into<Value>) -> ValueSchema {
    ValueSchema::new(literal)
}

/// Date schema
pub fn date() -> DateSchema {
    DateSchema::new()
}

/// Object with fixed fields, checked in the given order
pub fn object<I, K>(fields: I) -> ObjectSchema
where
    I: IntoIterator<Item = (K, SchemaRef)>,
    K: Into<String>,
{
    ObjectSchema::fixed(fields)
}

/// Object of any shape
pub fn open_object() -> ObjectSchema {
    ObjectSchema::open()
}

/// Array whose elements all match `item`
pub fn array(item: impl Schema + 'static) -> ArraySchema {
    ArraySchema::new(item)
}

/// Array with one schema per position
pub fn tuple(items: Vec<SchemaRef>) -> TupleSchema {
    TupleSchema::new(items)
}

/// Union of at least two schemas
pub fn or(branches: Vec<SchemaRef>) -> Result<OrSchema> {
    OrSchema::new(branches)
}

/// Intersection of at least two schemas
pub fn and(parts: Vec<SchemaRef>) -> Result<AndSchema> {
    AndSchema::new(parts)
}

/// Object with arbitrary keys matching `key` and values matching `value`
pub fn mapped(key: impl Schema + 'static, value: impl Schema + 'static) -> DictionarySchema {
    DictionarySchema::new(key, value)
}

/// Schema validated entirely by `predicate`
pub fn custom<F>(predicate: F) -> CustomSchema
where
    F: Fn(Option<&Value>, &ValidationContext) -> Validation + Send + Sync + 'static,
{
    CustomSchema::new(predicate)
}

/// String schema preconfigured to accept e-mail addresses
pub fn email() -> StringSchema {
    email_with_message(EMAIL_MESSAGE)
}

/// [`email`] with a custom failure message
pub fn email_with_message(message: impl Into<String>) -> StringSchema {
    let regex = EMAIL_REGEX
        .get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"))
        .clone();
    StringSchema::new().with_compiled_pattern(regex, message)
}
