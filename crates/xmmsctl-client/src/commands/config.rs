//! Configuration commands.

use std::io::Write;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Dump the current configuration.
pub fn dump(config: &ClientConfig, out: &mut impl Write) -> ClientResult<()> {
    let toml_str = toml::to_string_pretty(config)
        .map_err(|e| ClientError::Config(format!("failed to serialize config: {}", e)))?;
    writeln!(out, "# config.toml ({})", ClientConfig::default_path().display())?;
    writeln!(out, "{}", toml_str)?;

    Ok(())
}

/// Validate the configuration.
pub fn validate(config: &ClientConfig, out: &mut impl Write) -> ClientResult<()> {
    config.validate().map_err(ClientError::Config)?;
    writeln!(out, "Configuration is valid.")?;
    Ok(())
}

/// Show the configuration file path.
pub fn path(out: &mut impl Write) -> ClientResult<()> {
    writeln!(out, "config: {}", ClientConfig::default_path().display())?;
    Ok(())
}
