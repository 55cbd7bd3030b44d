//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/xmmsctl/config.toml` by default. Every section is optional.
//!
//! ```toml
//! [session]
//! number = 0
//! library = "/usr/lib/libxmms.so.1"
//!
//! [export]
//! m3u_path = "playlist.m3u"
//! pls_path = "playlist.pls"
//!
//! [sweep]
//! steps = 41
//! interval_ms = 100
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use xmmsctl_core::{PlaylistFormat, SWEEP_INTERVAL, SWEEP_STEPS, SweepPlan};

/// Configuration for the xmmsctl client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Debug mode.
    pub debug: bool,

    /// Which daemon to talk to.
    pub session: SessionSettings,

    /// Playlist export defaults.
    pub export: ExportSettings,

    /// Equalizer sweep settings.
    pub sweep: SweepSettings,
}

/// Session settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// XMMS session number.
    pub number: i32,

    /// Client library to open instead of the default.
    pub library: Option<PathBuf>,
}

/// Playlist export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Default M3U output file.
    pub m3u_path: PathBuf,

    /// Default PLS output file.
    pub pls_path: PathBuf,

    /// Default XML output file; stdout when unset.
    pub xml_path: Option<PathBuf>,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            m3u_path: PathBuf::from(PlaylistFormat::M3u.default_path()),
            pls_path: PathBuf::from(PlaylistFormat::Pls.default_path()),
            xml_path: None,
        }
    }
}

impl ExportSettings {
    /// Default destination for `format`, `None` meaning stdout.
    pub fn destination(&self, format: PlaylistFormat) -> Option<PathBuf> {
        match format {
            PlaylistFormat::M3u => Some(self.m3u_path.clone()),
            PlaylistFormat::Pls => Some(self.pls_path.clone()),
            PlaylistFormat::Xml => self.xml_path.clone(),
        }
    }
}

/// Equalizer sweep settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepSettings {
    /// Number of pushes.
    pub steps: u32,

    /// Pause between pushes in milliseconds.
    pub interval_ms: u64,
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self {
            steps: SWEEP_STEPS,
            interval_ms: SWEEP_INTERVAL.as_millis() as u64,
        }
    }
}

impl SweepSettings {
    /// Builds a sweep plan, letting command-line values win.
    pub fn plan(&self, steps: Option<u32>, interval_ms: Option<u64>) -> SweepPlan {
        SweepPlan::default()
            .with_steps(steps.unwrap_or(self.steps))
            .with_interval(Duration::from_millis(interval_ms.unwrap_or(self.interval_ms)))
    }
}

impl ClientConfig {
    /// Loads configuration from the default path.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("failed to read config: {}", e))?;
        Self::parse(&content)
    }

    /// Parses configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| format!("failed to parse config: {}", e))
    }

    /// Checks values that parse but make no sense.
    pub fn validate(&self) -> Result<(), String> {
        if self.session.number < 0 {
            return Err(format!(
                "session number must not be negative (got {})",
                self.session.number
            ));
        }
        if self.sweep.steps == 0 {
            return Err("sweep steps must be at least 1".to_string());
        }
        if self.export.m3u_path.as_os_str().is_empty() || self.export.pls_path.as_os_str().is_empty()
        {
            return Err("export paths must not be empty".to_string());
        }
        Ok(())
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("xmmsctl")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.session.number, 0);
        assert!(config.session.library.is_none());
        assert_eq!(config.export.m3u_path, PathBuf::from("playlist.m3u"));
        assert_eq!(config.export.pls_path, PathBuf::from("playlist.pls"));
        assert_eq!(config.sweep.steps, 41);
        assert_eq!(config.sweep.interval_ms, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ClientConfig::parse(
            r#"
            [session]
            number = 2

            [export]
            xml_path = "/tmp/playlist.xml"
            "#,
        )
        .unwrap();

        assert_eq!(config.session.number, 2);
        assert_eq!(config.export.m3u_path, PathBuf::from("playlist.m3u"));
        assert_eq!(
            config.export.destination(PlaylistFormat::Xml),
            Some(PathBuf::from("/tmp/playlist.xml"))
        );
        assert_eq!(config.sweep.steps, 41);
    }

    #[test]
    fn xml_defaults_to_stdout() {
        let export = ExportSettings::default();
        assert_eq!(export.destination(PlaylistFormat::Xml), None);
        assert_eq!(
            export.destination(PlaylistFormat::Pls),
            Some(PathBuf::from("playlist.pls"))
        );
    }

    #[test]
    fn invalid_toml_is_reported() {
        let err = ClientConfig::parse("[session\nnumber = 1").unwrap_err();
        assert!(err.starts_with("failed to parse config"));
    }

    #[test]
    fn validate_rejects_nonsense() {
        let mut config = ClientConfig::default();
        config.session.number = -1;
        assert!(config.validate().is_err());

        let mut config = ClientConfig::default();
        config.sweep.steps = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn sweep_plan_prefers_flags() {
        let settings = SweepSettings::default();
        let plan = settings.plan(None, None);
        assert_eq!(plan.steps, 41);
        assert_eq!(plan.interval, Duration::from_millis(100));

        let plan = settings.plan(Some(5), Some(0));
        assert_eq!(plan.steps, 5);
        assert_eq!(plan.interval, Duration::ZERO);
    }

    #[test]
    fn roundtrips_through_toml() {
        let config = ClientConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed = ClientConfig::parse(&text).unwrap();
        assert_eq!(parsed.export.pls_path, config.export.pls_path);
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[sweep]\ninterval_ms = 5\n").unwrap();
        let config = ClientConfig::load_from(&path).unwrap();
        assert_eq!(config.sweep.interval_ms, 5);

        assert!(ClientConfig::load_from(&dir.path().join("missing.toml")).is_err());
    }
}
