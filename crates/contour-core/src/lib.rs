//! Contour Core - Composable schemas for untrusted JSON values
//!
//! This crate declares, composes and applies schemas to values of unknown
//! shape. A schema answers two questions about a value: is it valid, and if
//! so, what is its normalized form.
//!
//! # Main Components
//!
//! - **Schemas**: leaf and composite schema variants behind the [`Schema`] trait
//! - **Issues**: structured, nestable validation results ([`Issue`])
//! - **Contexts**: per-call policies for validation and transformation
//! - **Descriptors**: schema trees loaded from JSON or YAML files
//! - **Error Handling**: configuration errors using `thiserror`
//!
//! # Example
//!
//! ```
//! use contour_core::prelude::*;
//! use serde_json::json;
//!
//! # fn main() -> contour_core::Result<()> {
//! let signup = object([
//!     ("email", email().boxed()),
//!     ("name", string().case(Casing::Capitalize)?.boxed()),
//!     ("tags", array(string()).optional()?.boxed()),
//! ]);
//!
//! let input = json!({"email": "ada@example.com", "name": " ada ", "admin": true});
//! assert!(signup.check(&input).is_ok());
//! assert_eq!(
//!     signup.normalize(input),
//!     json!({"email": "ada@example.com", "name": "Ada"})
//! );
//! # Ok(())
//! # }
//! ```
//!
//! Copyright (c) 2025 Contour Team
//! Licensed under the Apache-2.0 license

pub mod context;
pub mod descriptor;
pub mod error;
pub mod factory;
pub mod issue;
pub mod schema;

// Re-export main types for convenience
pub use context::{TransformationContext, ValidationContext};
pub use descriptor::{load_schema, SchemaDescriptor};
pub use error::{Error, ParseError, Result};
pub use issue::{Issue, IssueKey, IssueMap, Validation};
pub use schema::{
    // Contract
    Schema, SchemaExt, SchemaRef,

    // Builder traits
    Bounded, Configure,

    // Leaf schemas
    BooleanSchema, DateSchema, NumberSchema, StringSchema, ValueSchema,

    // Composite schemas
    AndSchema, ArraySchema, CustomSchema, DictionarySchema, ObjectSchema, OrSchema,
    TupleSchema,

    // Options
    Casing, Rounding,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Everything needed to declare and apply schemas
pub mod prelude {
    pub use crate::context::{TransformationContext, ValidationContext};
    pub use crate::factory::{
        and, array, boolean, custom, date, email, email_with_message, mapped, number, object,
        open_object, or, string, tuple, value,
    };
    pub use crate::issue::{Issue, Validation};
    pub use crate::schema::{
        Bounded, Casing, Configure, Rounding, Schema, SchemaExt, SchemaRef,
    };
}
