//! Validation command handler

use super::{load_schema, read_document};
use crate::cli::ValidateArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::{OutputWriter, ValidationReport};
use contour_core::{Schema, ValidationContext};
use tracing::{info, instrument, warn};

/// Handle the validate command
#[instrument(skip(config, output), fields(schema = %args.schema.display(), data = %args.data.display()))]
pub fn handle_validate(args: ValidateArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details("validate_command", &format!("data: {}", args.data.display()));
    output.info(&format!(
        "Validating {} against {}",
        args.data.display(),
        args.schema.display()
    ))?;

    let schema = load_schema(&args.schema)?;
    let document = read_document(&args.data)?;

    let ctx = if args.collect_all {
        ValidationContext::collect_all()
    } else {
        config.validation
    };

    let result = {
        let _validation_timer = Timer::new("schema_validation");
        schema.validate(Some(&document), &ctx)
    };
    output.report(&ValidationReport::from_result(&result))?;

    match result {
        Ok(()) => {
            info!("Document is valid");
            Ok(())
        }
        Err(issue) => {
            let violations = issue.leaf_count();
            warn!(violations, "Document is invalid");
            Err(Error::ValidationFailed { violations })
        }
    }
}
