//! Schema combinator engine
//!
//! Every schema variant implements the [`Schema`] contract: `validate`
//! decides whether an untrusted value conforms, `transform` normalizes a
//! value that already passed validation. Composite schemas own their
//! children as [`SchemaRef`]s and recurse into them.
//!
//! # Module Organization
//!
//! - [`rules`] - State and behaviour shared by every schema (presence
//!   checks, one-time transform hooks)
//! - [`bounds`] - Min/max bounds shared by strings, numbers and arrays
//! - [`string`], [`number`], [`scalar`], [`date`] - Leaf schemas
//! - [`object`], [`collections`], [`combinators`] - Composite schemas
//!
//! # Example
//!
//! ```
//! use contour_core::prelude::*;
//! use serde_json::json;
//!
//! # fn main() -> contour_core::Result<()> {
//! let user = object([
//!     ("name", string().min(2, "Too short")?.boxed()),
//!     ("age", number().optional()?.boxed()),
//! ]);
//!
//! assert!(user.check(&json!({"name": "Ada"})).is_ok());
//! assert!(user.check(&json!({"name": "A"})).is_err());
//! # Ok(())
//! # }
//! ```
//!
//! Copyright (c) 2025 Contour Team
//! Licensed under the Apache-2.0 license

pub mod bounds;
pub mod collections;
pub mod combinators;
pub mod date;
pub mod number;
pub mod object;
pub mod rules;
pub mod scalar;
pub mod string;


use crate::context::{TransformationContext, ValidationContext};
use crate::error::ParseError;
use crate::issue::Validation;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

pub use bounds::{Bounded, Bounds};
pub use collections::{ArraySchema, DictionarySchema, TupleSchema};
pub use combinators::{AndSchema, CustomSchema, OrSchema};
pub use date::DateSchema;
pub use number::{NumberSchema, Rounding};
pub use object::ObjectSchema;
pub use rules::{Configure, Rules};
pub use scalar::{BooleanSchema, ValueSchema};
pub use string::{Casing, StringSchema};

/// A shared, immutable schema node
pub type SchemaRef = Arc<dyn Schema>;

/// Contract implemented by every schema variant
///
/// `None` stands for an absent value (a missing field or position); it is
/// distinct from an explicit JSON `null`.
pub trait Schema: fmt::Debug + Send + Sync {
    /// Short name of the variant, used in diagnostics
    fn kind(&self) -> &'static str;

    /// Check a value; `Ok(())` means valid
    ///
    /// Never fails for malformed input: any value produces either `Ok` or a
    /// structured [`Issue`](crate::Issue).
    fn validate(&self, value: Option<&Value>, ctx: &ValidationContext) -> Validation;

    /// Normalize a value that passed [`Schema::validate`]
    fn transform(&self, value: Option<Value>, ctx: &TransformationContext) -> Option<Value>;
}

impl<S: Schema + ?Sized> Schema for Arc<S> {
    fn kind(&self) -> &'static str {
        (**self).kind()
    }

    fn validate(&self, value: Option<&Value>, ctx: &ValidationContext) -> Validation {
        (**self).validate(value, ctx)
    }

    fn transform(&self, value: Option<Value>, ctx: &TransformationContext) -> Option<Value> {
        (**self).transform(value, ctx)
    }
}

/// Convenience methods available on every concrete schema
pub trait SchemaExt: Schema + Sized + 'static {
    /// Freeze this schema into a shareable node
    fn boxed(self) -> SchemaRef {
        Arc::new(self)
    }

    /// Union of `self` and `other`, tried in that order
    fn or(self, other: impl Schema + 'static) -> OrSchema {
        OrSchema::from_pair(self.boxed(), Arc::new(other))
    }

    /// Intersection of `self` and `other`, applied in that order
    fn and(self, other: impl Schema + 'static) -> AndSchema {
        AndSchema::from_pair(self.boxed(), Arc::new(other))
    }

    /// Validate a present value with the default context
    fn check(&self, value: &Value) -> Validation {
        self.validate(Some(value), &ValidationContext::default())
    }

    /// Transform a present value with the default context
    ///
    /// An absent result is reported as `null`.
    fn normalize(&self, value: Value) -> Value {
        self.transform(Some(value), &TransformationContext::default())
            .unwrap_or(Value::Null)
    }

    /// Validate, transform and deserialize into a concrete type
    fn parse<T: DeserializeOwned>(&self, value: Value) -> std::result::Result<T, ParseError> {
        self.check(&value).map_err(ParseError::Invalid)?;
        let normalized = self.normalize(value);
        Ok(serde_json::from_value(normalized)?)
    }
}

impl<S: Schema + Sized + 'static> SchemaExt for S {}
