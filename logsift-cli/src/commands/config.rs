//! `logsift config` command handler

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::cli::{ConfigAction, ConfigArgs};
use crate::commands::{config_source, load_config};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `config` command.
pub fn execute(
    args: ConfigArgs,
    config_path: Option<&Path>,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    match args.action {
        ConfigAction::Validate => {
            let report = validate(config_path);
            writer.render(&report)?;
            if !report.valid {
                return Err(CliError::Config("configuration is invalid".to_owned()));
            }
            Ok(())
        }
        ConfigAction::Show { section } => {
            let report = show(config_path, section.as_deref())?;
            writer.render(&report)
        }
    }
}

/// Load and validate the configuration, collecting the error instead of failing.
pub fn validate(config_path: Option<&Path>) -> ConfigValidationReport {
    let source = config_source(config_path);
    info!(source = %source, "validating configuration");

    match load_config(config_path) {
        Ok(_) => ConfigValidationReport {
            source,
            valid: true,
            errors: Vec::new(),
        },
        Err(e) => ConfigValidationReport {
            source,
            valid: false,
            errors: vec![e.to_string()],
        },
    }
}

/// Build the effective configuration report (file + env overrides + defaults).
///
/// # Errors
///
/// Returns `CliError::Core` if loading fails or `CliError::Command` if the
/// section name is unknown.
pub fn show(config_path: Option<&Path>, section: Option<&str>) -> Result<ConfigReport, CliError> {
    let source = config_source(config_path);
    info!(source = %source, "loading configuration");

    let config = load_config(config_path)?;

    let config_toml = match section {
        None => toml::to_string_pretty(&config),
        Some("general") => toml::to_string_pretty(&config.general),
        Some("analysis") => toml::to_string_pretty(&config.analysis),
        Some(other) => {
            return Err(CliError::Command(format!(
                "unknown section: {} (expected: general, analysis)",
                other
            )));
        }
    }
    .map_err(|e| CliError::Command(format!("failed to serialize configuration: {}", e)))?;

    Ok(ConfigReport {
        source,
        section: section.map(str::to_owned),
        config_toml,
    })
}

/// Configuration display report.
///
/// The `config_toml` field is skipped during JSON serialization (only used for text rendering).
#[derive(Serialize)]
pub struct ConfigReport {
    /// Configuration source
    pub source: String,
    /// Optional section name (None = full config)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Serialized TOML configuration
    #[serde(skip)]
    pub config_toml: String,
}

impl Render for ConfigReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        if let Some(ref section) = self.section {
            let section_label = format!("[{}]", section);
            writeln!(
                w,
                "Configuration {} (source: {})",
                section_label.bold(),
                self.source
            )?;
        } else {
            writeln!(w, "Configuration (source: {})", self.source.bold())?;
        }

        writeln!(w)?;
        write!(w, "{}", self.config_toml)?;

        Ok(())
    }
}

/// Configuration validation report.
#[derive(Serialize)]
pub struct ConfigValidationReport {
    /// Configuration source
    pub source: String,
    /// Whether the configuration is valid
    pub valid: bool,
    /// Validation error messages (empty if valid)
    pub errors: Vec<String>,
}

impl Render for ConfigValidationReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Config Validation: {}", self.source.bold())?;

        if self.valid {
            writeln!(w, "  Result: {}", "VALID".green().bold())?;
        } else {
            writeln!(w, "  Result: {}", "INVALID".red().bold())?;
            for err in &self.errors {
                writeln!(w, "  Error: {}", err.red())?;
            }
        }

        Ok(())
    }
}
