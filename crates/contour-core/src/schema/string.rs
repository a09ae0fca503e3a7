//! String schema
//!
//! Copyright (c) 2025 Contour Team
//! Licensed under the Apache-2.0 license

use super::bounds::{Bounded, Bounds};
use super::rules::{Configure, Rules};
use super::Schema;
use crate::context::{TransformationContext, ValidationContext};
use crate::error::{Error, Result};
use crate::issue::{Issue, Validation};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Type failure message
pub const STRING_MESSAGE: &str = "Must be string";

/// Casing applied by [`StringSchema::case`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Casing {
    /// `Hello World` -> `hello world`
    Lower,
    /// `Hello World` -> `HELLO WORLD`
    Upper,
    /// `hELLO wORLD` -> `Hello world`
    Capitalize,
    /// `helloWorld Again` -> `hello-World-Again`
    KebabCase,
    /// `helloWorld Again` -> `hello-world-again`
    KebabLowerCase,
}

impl Casing {
    /// Apply this casing to `input`
    pub fn apply(self, input: &str) -> String {
        match self {
            Casing::Lower => input.to_lowercase(),
            Casing::Upper => input.to_uppercase(),
            Casing::Capitalize => {
                let mut chars = input.chars();
                match chars.next() {
                    Some(first) => {
                        let rest = chars.as_str().to_lowercase();
                        first.to_uppercase().chain(rest.chars()).collect()
                    }
                    None => String::new(),
                }
            }
            Casing::KebabCase => words(input).join("-"),
            Casing::KebabLowerCase => words(input)
                .iter()
                .map(|word| word.to_lowercase())
                .collect::<Vec<_>>()
                .join("-"),
        }
    }
}

/// Split on non-alphanumerics and on lower-to-upper case changes
fn words(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).map_or(false, |n| n.is_lowercase());
            // "fooBar" splits before 'B', "HTMLParser" splits before 'P'
            if prev.is_lowercase() || prev.is_numeric() || (prev.is_uppercase() && next_is_lower) {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

#[derive(Debug, Clone)]
struct Pattern {
    regex: Regex,
    message: String,
}

/// Schema accepting JSON strings
#[derive(Debug, Clone)]
pub struct StringSchema {
    rules: Rules,
    bounds: Bounds,
    pattern: Option<Pattern>,
    trim: Option<bool>,
    casing: Option<Casing>,
}

impl StringSchema {
    /// Create an unconstrained string schema
    pub fn new() -> Self {
        Self {
            rules: Rules::new("string"),
            bounds: Bounds::default(),
            pattern: None,
            trim: None,
            casing: None,
        }
    }

    /// Require the whole string to match `pattern`
    ///
    /// The pattern is searched, not anchored; add `^...$` for a full match.
    pub fn pattern(mut self, pattern: &str, message: impl Into<String>) -> Result<Self> {
        if self.pattern.is_some() {
            return Err(Error::duplicate("string", "pattern"));
        }
        let regex = Regex::new(pattern).map_err(|source| Error::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        self.pattern = Some(Pattern {
            regex,
            message: message.into(),
        });
        Ok(self)
    }

    pub(crate) fn with_compiled_pattern(mut self, regex: Regex, message: impl Into<String>) -> Self {
        self.pattern = Some(Pattern {
            regex,
            message: message.into(),
        });
        self
    }

    /// Override the context's trimming default for this schema
    pub fn trim(mut self, trim: bool) -> Result<Self> {
        if self.trim.is_some() {
            return Err(Error::duplicate("string", "trim"));
        }
        self.trim = Some(trim);
        Ok(self)
    }

    /// Apply a casing transform
    pub fn case(mut self, casing: Casing) -> Result<Self> {
        if self.casing.is_some() {
            return Err(Error::duplicate("string", "case"));
        }
        self.casing = Some(casing);
        Ok(self)
    }
}

impl Default for StringSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl Configure for StringSchema {
    fn rules_mut(&mut self) -> &mut Rules {
        &mut self.rules
    }
}

impl Bounded for StringSchema {
    fn bounds_mut(&mut self) -> &mut Bounds {
        &mut self.bounds
    }
}

impl Schema for StringSchema {
    fn kind(&self) -> &'static str {
        "string"
    }

    fn validate(&self, value: Option<&Value>, _ctx: &ValidationContext) -> Validation {
        let Some(value) = self.rules.require(value)? else {
            return Ok(());
        };
        let Some(text) = value.as_str() else {
            return Err(Issue::message(STRING_MESSAGE));
        };

        self.bounds.check(text.chars().count() as f64)?;

        if let Some(pattern) = &self.pattern {
            if !pattern.regex.is_match(text) {
                return Err(Issue::message(&pattern.message));
            }
        }
        Ok(())
    }

    fn transform(&self, value: Option<Value>, ctx: &TransformationContext) -> Option<Value> {
        let value = match value {
            Some(Value::String(text)) => {
                let trimmed = if self.trim.unwrap_or(ctx.trim_strings) {
                    text.trim().to_string()
                } else {
                    text
                };
                let cased = match self.casing {
                    Some(casing) => casing.apply(&trimmed),
                    None => trimmed,
                };
                Some(Value::String(cased))
            }
            other => other,
        };
        self.rules.finish(value)
    }
}
