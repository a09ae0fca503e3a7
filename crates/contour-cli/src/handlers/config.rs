//! Configuration command handlers

use crate::cli::{ConfigAction, ConfigArgs, ConfigFormat, ConfigInitArgs, ConfigShowArgs};
use crate::config::{Config, PROJECT_CONFIG_FILE};
use crate::error::{Error, Result};
use crate::output::OutputWriter;
use std::path::Path;

/// Handle the config command
pub fn handle_config(args: ConfigArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    match args.action {
        ConfigAction::Show(show_args) => handle_config_show(show_args, config, output),
        ConfigAction::Init(init_args) => {
            handle_config_init(init_args, Path::new(PROJECT_CONFIG_FILE), output)
        }
        ConfigAction::Paths => handle_config_paths(output),
    }
}

/// Render a configuration in the requested format
fn render(config: &Config, format: ConfigFormat) -> Result<String> {
    match format {
        ConfigFormat::Toml => config.to_toml(),
        ConfigFormat::Json => serde_json::to_string_pretty(config)
            .map_err(|e| Error::config(format!("Failed to serialize as JSON: {}", e))),
        ConfigFormat::Yaml => serde_yaml::to_string(config)
            .map_err(|e| Error::config(format!("Failed to serialize as YAML: {}", e))),
    }
}

/// Handle config show subcommand
fn handle_config_show(args: ConfigShowArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let content = render(config, args.format)?;
    output.write(&content)?;
    if !content.ends_with('\n') {
        output.writeln("")?;
    }
    Ok(())
}

/// Handle config init subcommand
fn handle_config_init(args: ConfigInitArgs, path: &Path, output: &mut OutputWriter) -> Result<()> {
    if path.exists() && !args.force {
        return Err(Error::config(format!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        )));
    }

    Config::default().save(path)?;
    output.success(&format!("✓ Created config at {}", path.display()))?;
    output.info("Edit it to customize validation, transformation and output defaults.")?;
    Ok(())
}

/// Handle config paths subcommand
fn handle_config_paths(output: &mut OutputWriter) -> Result<()> {
    for path in Config::default_config_paths() {
        let marker = if path.exists() { "*" } else { " " };
        output.writeln(&format!("{} {}", marker, path.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use crate::handlers::test_support::writer;
    use tempfile::TempDir;

    #[test]
    fn test_show_formats_parse_back() {
        let config = Config::default();
        let toml_text = render(&config, ConfigFormat::Toml).unwrap();
        assert_eq!(toml::from_str::<Config>(&toml_text).unwrap(), config);

        let json_text = render(&config, ConfigFormat::Json).unwrap();
        assert_eq!(serde_json::from_str::<Config>(&json_text).unwrap(), config);

        let yaml_text = render(&config, ConfigFormat::Yaml).unwrap();
        assert_eq!(serde_yaml::from_str::<Config>(&yaml_text).unwrap(), config);
    }

    #[test]
    fn test_show_writes_config() {
        let (mut out, captured) = writer(OutputFormat::Human);
        handle_config_show(
            ConfigShowArgs {
                format: ConfigFormat::Toml,
            },
            &Config::default(),
            &mut out,
        )
        .unwrap();
        let text = captured.text();
        assert!(text.contains("[validation]"));
        assert!(text.contains("abort_early = true"));
    }

    #[test]
    fn test_init_respects_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".contour.toml");
        let (mut out, captured) = writer(OutputFormat::Human);

        handle_config_init(ConfigInitArgs { force: false }, &path, &mut out).unwrap();
        assert_eq!(Config::from_file(&path).unwrap(), Config::default());

        std::fs::write(&path, "[validation]\nabort_early = false\n").unwrap();
        let err = handle_config_init(ConfigInitArgs { force: false }, &path, &mut out).unwrap_err();
        assert!(matches!(err, Error::Config(ref message) if message.contains("already exists")));
        assert_eq!(err.exit_code(), 6);
        assert!(!Config::from_file(&path).unwrap().validation.abort_early);

        handle_config_init(ConfigInitArgs { force: true }, &path, &mut out).unwrap();
        assert!(Config::from_file(&path).unwrap().validation.abort_early);
        assert!(captured.text().contains("Created config"));
    }

    #[test]
    fn test_init_refusal_fails_in_machine_formats() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".contour.toml");
        std::fs::write(&path, "").unwrap();

        let (mut out, captured) = writer(OutputFormat::Json);
        let result = handle_config_init(ConfigInitArgs { force: false }, &path, &mut out);
        assert!(matches!(result, Err(Error::Config(_))));
        assert!(captured.text().is_empty());
    }
}
