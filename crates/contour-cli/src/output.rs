//! Output formatting and writing utilities
//!
//! This module formats command results as JSON, YAML or human-readable
//! text, with specialized support for validation reports.

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::logging::redaction;
use colored::Colorize;
use contour_core::Issue;
use serde::Serialize;
use std::io::{self, Write};
use tracing::{debug, trace};

/// Outcome of validating one document
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport<'a> {
    /// Whether the document conforms
    pub valid: bool,
    /// The issue tree, when invalid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issues: Option<&'a Issue>,
}

impl<'a> ValidationReport<'a> {
    pub fn from_result(result: &'a std::result::Result<(), Issue>) -> Self {
        Self {
            valid: result.is_ok(),
            issues: result.as_ref().err(),
        }
    }
}

/// Trait for formatting output with specialized support for common types
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format a validation report
    fn format_report(&self, report: &ValidationReport<'_>) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            // Human format falls back to pretty JSON for plain data
            OutputFormat::Human => Ok(serde_json::to_string_pretty(value)?),
        }
    }

    fn format_report(&self, report: &ValidationReport<'_>) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_report_human(report)),
            _ => self.format(report),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer on stdout
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self::with_writer(format, use_color, quiet, Box::new(io::stdout()))
    }

    /// Create an output writer with a custom writer
    pub fn with_writer(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        writer: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            quiet,
            writer,
        }
    }

    /// Get the output format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Write raw output
    pub fn write(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        debug!("Output info: {}", message);

        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write a warning message
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.yellow().to_string())
        } else {
            self.writeln(&format!("WARNING: {}", message))
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        // Only a redacted copy ever reaches the log
        if tracing::enabled!(tracing::Level::TRACE) {
            let mut value_json = serde_json::to_value(value)?;
            redaction::redact_json_value(&mut value_json);
            trace!(data = %value_json, "Outputting data");
        }

        let formatted = self.format.format(value)?;
        self.emit(&formatted)
    }

    /// Write a validation report
    ///
    /// Reports are printed even in quiet mode: they are the command result.
    pub fn report(&mut self, report: &ValidationReport<'_>) -> Result<()> {
        let formatted = self.format.format_report(report)?;
        let formatted = if self.use_color && self.format == OutputFormat::Human {
            if report.valid {
                formatted.green().to_string()
            } else {
                formatted.red().to_string()
            }
        } else {
            formatted
        };
        self.emit(&formatted)
    }

    fn emit(&mut self, formatted: &str) -> Result<()> {
        // serde_yaml already ends its output with a newline
        if formatted.ends_with('\n') {
            self.write(formatted)
        } else {
            self.writeln(formatted)
        }
    }
}

/// Format a validation report for human reading
fn format_report_human(report: &ValidationReport<'_>) -> String {
    let Some(issues) = report.issues else {
        return "✓ Document is valid".to_string();
    };

    let leaves = issues.flatten();
    let mut output = format!("✗ Document is invalid - {} issue(s)", leaves.len());
    for (path, message) in leaves {
        output.push_str(&format!("\n  {}: {}", path, message));
    }
    output
}

#[cfg(test)]
mod tests {
    include!("output/tests.rs");
}
