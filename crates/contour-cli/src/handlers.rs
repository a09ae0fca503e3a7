//! Command handlers for CLI subcommands
//!
//! Each subcommand lives in its own module; this module holds the document
//! and schema loading they share.

mod completions;
mod config;
mod transform;
mod validate;

pub use completions::handle_completions;
pub use config::handle_config;
pub use transform::handle_transform;
pub use validate::handle_validate;

use crate::error::{Error, Result};
use crate::logging::redaction;
use contour_core::{SchemaDescriptor, SchemaRef};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, trace};

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s.eq_ignore_ascii_case("yaml") || s.eq_ignore_ascii_case("yml"))
        .unwrap_or(false)
}

/// Load a schema descriptor file and build the schema it describes
pub fn load_schema(path: &Path) -> Result<SchemaRef> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let descriptor = SchemaDescriptor::from_path(path)?;
    debug!(kind = descriptor.kind(), "Schema descriptor loaded");
    Ok(descriptor.build()?)
}

/// Read a data document, JSON or YAML by extension
pub fn read_document(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    debug!("Read {} bytes from {}", content.len(), path.display());

    let document: Value = if is_yaml(path) {
        serde_yaml::from_str(&content).map_err(|_| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "YAML".to_string(),
        })?
    } else {
        serde_json::from_str(&content).map_err(|_| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "JSON".to_string(),
        })?
    };

    if tracing::enabled!(tracing::Level::TRACE) {
        let mut redacted = document.clone();
        redaction::redact_json_value(&mut redacted);
        trace!(document = %redacted, "Document parsed");
    }

    Ok(document)
}
