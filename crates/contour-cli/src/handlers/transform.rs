//! Transformation command handler

use super::{load_schema, read_document};
use crate::cli::{OutputFormat, TransformArgs};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::{OutputFormatter, OutputWriter, ValidationReport};
use contour_core::Schema;
use serde_json::Value;
use std::fs;
use tracing::{debug, info, instrument};

/// Handle the transform command
#[instrument(skip(config, output), fields(schema = %args.schema.display(), data = %args.data.display()))]
pub fn handle_transform(args: TransformArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details("transform_command", &format!("data: {}", args.data.display()));

    let schema = load_schema(&args.schema)?;
    let document = read_document(&args.data)?;

    if args.skip_validation {
        debug!("Skipping validation");
    } else {
        let result = schema.validate(Some(&document), &config.validation);
        if let Err(issue) = &result {
            output.report(&ValidationReport::from_result(&result))?;
            return Err(Error::ValidationFailed {
                violations: issue.leaf_count(),
            });
        }
    }

    let mut ctx = config.transformation;
    if args.no_trim {
        ctx = ctx.trim_strings(false);
    }

    let transformed = {
        let _transform_timer = Timer::new("schema_transform");
        schema.transform(Some(document), &ctx).unwrap_or(Value::Null)
    };
    info!("Document transformed");
    output.data(&transformed)?;

    if let Some(path) = args.save_to {
        let format = match output.format() {
            OutputFormat::Yaml => OutputFormat::Yaml,
            _ => OutputFormat::JsonPretty,
        };
        fs::write(&path, format.format(&transformed)?)?;
        output.success(&format!("✓ Output saved to {}", path.display()))?;
    }

    Ok(())
}
