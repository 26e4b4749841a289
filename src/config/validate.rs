// src/config/validate.rs

use crate::command::template::{CommandTemplate, KNOWN_VARIABLES};
use crate::config::model::{EngineSection, LauncherConfig, RawLauncherConfig};
use crate::errors::{LauncherError, Result, TemplateError};

impl TryFrom<RawLauncherConfig> for LauncherConfig {
    type Error = LauncherError;

    fn try_from(raw: RawLauncherConfig) -> std::result::Result<Self, Self::Error> {
        validate_engine(&raw.engine)?;
        let template = CommandTemplate::parse(&raw.engine.command_template)?;
        validate_template_variables(&template)?;
        Ok(LauncherConfig::new_unchecked(raw.engine, template))
    }
}

fn validate_engine(engine: &EngineSection) -> Result<()> {
    for (key, value) in [
        ("prefix", &engine.prefix),
        ("java", &engine.java),
        ("entry_point", &engine.entry_point),
    ] {
        if value.trim().is_empty() {
            return Err(LauncherError::Config(format!(
                "[engine].{key} must not be empty"
            )));
        }
    }

    if engine.prefix.chars().any(char::is_whitespace) {
        return Err(LauncherError::Config(format!(
            "[engine].prefix must not contain whitespace (got '{}')",
            engine.prefix
        )));
    }

    Ok(())
}

/// Reject templates naming variables the assembler never provides, so a typo
/// fails at startup rather than halfway through a launch.
fn validate_template_variables(template: &CommandTemplate) -> Result<()> {
    for var in template.variables() {
        if !KNOWN_VARIABLES.contains(&var) {
            return Err(TemplateError::MissingVariable(var.to_string()).into());
        }
    }
    Ok(())
}
