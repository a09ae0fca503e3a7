//! Runtime knobs for validation and transformation
//!
//! Copyright (c) 2025 Contour Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};

/// Options for a `validate` call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationContext {
    /// Stop composite validation at the first failing child
    pub abort_early: bool,
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self { abort_early: true }
    }
}

impl ValidationContext {
    /// Context that reports every failing child instead of the first one
    pub fn collect_all() -> Self {
        Self { abort_early: false }
    }

    /// Set the abort-early flag
    pub fn abort_early(mut self, abort_early: bool) -> Self {
        self.abort_early = abort_early;
        self
    }
}

/// Options for a `transform` call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformationContext {
    /// Trim strings unless the string schema says otherwise
    pub trim_strings: bool,
}

impl Default for TransformationContext {
    fn default() -> Self {
        Self { trim_strings: true }
    }
}

impl TransformationContext {
    /// Set the default trimming behaviour
    pub fn trim_strings(mut self, trim_strings: bool) -> Self {
        self.trim_strings = trim_strings;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert!(ValidationContext::default().abort_early);
        assert!(!ValidationContext::collect_all().abort_early);
        assert!(TransformationContext::default().trim_strings);
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let ctx: ValidationContext = serde_json::from_str("{}").unwrap();
        assert_eq!(ctx, ValidationContext::default());

        let ctx: TransformationContext =
            serde_json::from_str(r#"{"trim_strings": false}"#).unwrap();
        assert!(!ctx.trim_strings);
    }
}
