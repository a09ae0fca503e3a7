//! State and behaviour shared by every schema
//!
//! [`Rules`] is embedded by each schema variant. It holds the presence
//! flags with their messages and the optional transform hooks, and it
//! implements the two steps every variant shares: the presence check that
//! opens `validate` and the hook pass that closes `transform`.
//!
//! Copyright (c) 2025 Contour Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::issue::Issue;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Message used when a required value is absent
pub const DEFAULT_REQUIRED_MESSAGE: &str = "Required";

/// Message used when a non-nullable value is `null`
pub const DEFAULT_NULL_MESSAGE: &str = "Must not be null";

/// Caller-supplied transform applied before the built-in hooks
pub type Transformer = Arc<dyn Fn(Option<Value>) -> Option<Value> + Send + Sync>;

/// Constructor fed with the fields of a transformed object
pub type Hydrator = Arc<dyn Fn(Map<String, Value>) -> Value + Send + Sync>;

/// Shared per-schema configuration
#[derive(Clone)]
pub struct Rules {
    schema: &'static str,
    optional: bool,
    nullable: bool,
    required_message: Option<String>,
    null_message: Option<String>,
    custom: Option<Transformer>,
    when_empty: Option<Value>,
    hydrator: Option<Hydrator>,
}

impl fmt::Debug for Rules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rules")
            .field("schema", &self.schema)
            .field("optional", &self.optional)
            .field("nullable", &self.nullable)
            .field("required_message", &self.required_message)
            .field("null_message", &self.null_message)
            .field("custom", &self.custom.is_some())
            .field("when_empty", &self.when_empty)
            .field("hydrator", &self.hydrator.is_some())
            .finish()
    }
}

impl Rules {
    /// Fresh rules for a schema of the given kind
    pub fn new(schema: &'static str) -> Self {
        Self {
            schema,
            optional: false,
            nullable: false,
            required_message: None,
            null_message: None,
            custom: None,
            when_empty: None,
            hydrator: None,
        }
    }

    /// Kind of the owning schema
    pub fn schema(&self) -> &'static str {
        self.schema
    }

    /// Whether an absent value is accepted
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Whether `null` is accepted
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Message reported for an absent value, also used by literal mismatches
    pub fn required_message(&self) -> &str {
        self.required_message
            .as_deref()
            .unwrap_or(DEFAULT_REQUIRED_MESSAGE)
    }

    /// Message reported for an unexpected `null`
    pub fn null_message(&self) -> &str {
        self.null_message.as_deref().unwrap_or(DEFAULT_NULL_MESSAGE)
    }

    pub(crate) fn set_optional(&mut self) -> Result<()> {
        if self.optional {
            return Err(Error::duplicate(self.schema, "optional"));
        }
        self.optional = true;
        Ok(())
    }

    pub(crate) fn set_nullable(&mut self) -> Result<()> {
        if self.nullable {
            return Err(Error::duplicate(self.schema, "nullable"));
        }
        self.nullable = true;
        Ok(())
    }

    pub(crate) fn set_required_message(&mut self, message: String) -> Result<()> {
        set_once(&mut self.required_message, message, self.schema, "required_message")
    }

    pub(crate) fn set_null_message(&mut self, message: String) -> Result<()> {
        set_once(&mut self.null_message, message, self.schema, "null_message")
    }

    pub(crate) fn set_custom(&mut self, transformer: Transformer) -> Result<()> {
        set_once(&mut self.custom, transformer, self.schema, "custom")
    }

    pub(crate) fn set_when_empty(&mut self, value: Value) -> Result<()> {
        set_once(&mut self.when_empty, value, self.schema, "when_empty")
    }

    pub(crate) fn set_hydrator(&mut self, hydrator: Hydrator) -> Result<()> {
        set_once(&mut self.hydrator, hydrator, self.schema, "hydrator")
    }

    /// Presence check that opens every built-in `validate`
    ///
    /// Returns `Ok(Some(value))` when type-specific checks should run,
    /// `Ok(None)` when the value is an accepted absence or `null`, and the
    /// configured message otherwise.
    pub fn require<'v>(&self, value: Option<&'v Value>) -> std::result::Result<Option<&'v Value>, Issue> {
        match value {
            None if self.optional => Ok(None),
            None => Err(Issue::message(self.required_message())),
            Some(Value::Null) if self.nullable => Ok(None),
            Some(Value::Null) => Err(Issue::message(self.null_message())),
            Some(value) => Ok(Some(value)),
        }
    }

    /// Hook pass that closes every built-in `transform`
    ///
    /// Order: custom transformer, empty-value substitution, hydration.
    pub fn finish(&self, value: Option<Value>) -> Option<Value> {
        let mut value = match &self.custom {
            Some(custom) => custom(value),
            None => value,
        };

        if let Some(fallback) = &self.when_empty {
            if is_empty(value.as_ref()) {
                value = Some(fallback.clone());
            }
        }

        match (&self.hydrator, value) {
            (Some(hydrate), Some(Value::Object(fields))) => {
                tracing::trace!(schema = self.schema, "hydrating transformed object");
                Some(hydrate(fields))
            }
            (_, value) => value,
        }
    }
}

fn set_once<T>(slot: &mut Option<T>, value: T, schema: &'static str, setting: &'static str) -> Result<()> {
    if slot.is_some() {
        return Err(Error::duplicate(schema, setting));
    }
    *slot = Some(value);
    Ok(())
}

/// Falsy in the sense used by empty-value substitution
pub fn is_empty(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => true,
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Builder methods available on every schema
///
/// Each setting may be applied once; a second attempt fails with
/// [`Error::DuplicateConfiguration`].
pub trait Configure: Sized {
    /// Access the shared rules of this schema
    fn rules_mut(&mut self) -> &mut Rules;

    /// Accept an absent value
    fn optional(mut self) -> Result<Self> {
        self.rules_mut().set_optional()?;
        Ok(self)
    }

    /// Accept `null`
    fn nullable(mut self) -> Result<Self> {
        self.rules_mut().set_nullable()?;
        Ok(self)
    }

    /// Message reported when a required value is absent
    fn required_message(mut self, message: impl Into<String>) -> Result<Self> {
        self.rules_mut().set_required_message(message.into())?;
        Ok(self)
    }

    /// Message reported when `null` is not accepted
    fn null_message(mut self, message: impl Into<String>) -> Result<Self> {
        self.rules_mut().set_null_message(message.into())?;
        Ok(self)
    }

    /// Register a custom transform, run before the other hooks
    fn do_custom<F>(mut self, transformer: F) -> Result<Self>
    where
        F: Fn(Option<Value>) -> Option<Value> + Send + Sync + 'static,
    {
        self.rules_mut().set_custom(Arc::new(transformer))?;
        Ok(self)
    }

    /// Substitute `value` when the transformed value is empty
    fn do_set_when_empty(mut self, value: impl Into<Value>) -> Result<Self> {
        self.rules_mut().set_when_empty(value.into())?;
        Ok(self)
    }

    /// Build the final value of a transformed object with `constructor`
    fn do_hydrate<F>(mut self, constructor: F) -> Result<Self>
    where
        F: Fn(Map<String, Value>) -> Value + Send + Sync + 'static,
    {
        self.rules_mut().set_hydrator(Arc::new(constructor))?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_require_matrix() {
        let rules = Rules::new("test");
        assert_eq!(rules.require(None), Err(Issue::message("Required")));
        assert_eq!(
            rules.require(Some(&Value::Null)),
            Err(Issue::message("Must not be null"))
        );
        assert_eq!(rules.require(Some(&json!(1))), Ok(Some(&json!(1))));

        let mut lenient = Rules::new("test");
        lenient.set_optional().unwrap();
        lenient.set_nullable().unwrap();
        assert_eq!(lenient.require(None), Ok(None));
        assert_eq!(lenient.require(Some(&Value::Null)), Ok(None));
    }

    #[test]
    fn test_settings_apply_once() {
        let mut rules = Rules::new("test");
        rules.set_when_empty(json!("x")).unwrap();
        assert!(matches!(
            rules.set_when_empty(json!("y")),
            Err(Error::DuplicateConfiguration { setting: "when_empty", .. })
        ));
        rules.set_optional().unwrap();
        assert!(rules.set_optional().is_err());
    }

    #[test]
    fn test_is_empty() {
        assert!(is_empty(None));
        assert!(is_empty(Some(&json!(null))));
        assert!(is_empty(Some(&json!(false))));
        assert!(is_empty(Some(&json!(0))));
        assert!(is_empty(Some(&json!(0.0))));
        assert!(is_empty(Some(&json!(""))));
        assert!(!is_empty(Some(&json!(" "))));
        assert!(!is_empty(Some(&json!([]))));
        assert!(!is_empty(Some(&json!({}))));
    }

    #[test]
    fn test_finish_hook_order() {
        let mut rules = Rules::new("test");
        rules
            .set_custom(Arc::new(|_| Some(json!(""))))
            .unwrap();
        rules.set_when_empty(json!({"filled": true})).unwrap();
        rules
            .set_hydrator(Arc::new(|mut fields| {
                fields.insert("hydrated".to_string(), json!(true));
                Value::Object(fields)
            }))
            .unwrap();

        assert_eq!(
            rules.finish(Some(json!("anything"))),
            Some(json!({"filled": true, "hydrated": true}))
        );
    }
}
