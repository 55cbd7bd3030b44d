//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use xmmsctl_core::{PlaylistFormat, TracingOutputFormat};
use xmmsctl_remote::{ConnectOptions, Window};

use crate::config::ClientConfig;

/// xmmsctl - control a running XMMS from the command line
#[derive(Debug, Parser)]
#[command(name = "xmmsctl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "XMMSCTL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    /// Log output format
    #[arg(long, env = "XMMSCTL_LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    /// XMMS session number (0 for the first running player)
    #[arg(long, short, env = "XMMSCTL_SESSION")]
    pub session: Option<i32>,

    /// Path to the XMMS client library
    #[arg(long, env = "XMMSCTL_LIBRARY")]
    pub library: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Connection options: flags first, then the configuration file.
    pub fn connect_options(&self, config: &ClientConfig) -> ConnectOptions {
        ConnectOptions {
            session: self.session.unwrap_or(config.session.number),
            library: self
                .library
                .clone()
                .or_else(|| config.session.library.clone()),
        }
    }
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Save the playlist as xml, m3u or pls
    Export {
        /// Output format
        format: PlaylistFormat,

        /// Output file (xml defaults to stdout)
        path: Option<PathBuf>,
    },

    /// Start playback
    Play,
    /// Pause playback
    Pause,
    /// Toggle between playing and paused
    PlayPause,
    /// Stop playback
    Stop,
    /// Skip to the next song
    Next,
    /// Go back to the previous song
    Prev,
    /// Open the file dialog
    Eject,
    /// Quit XMMS
    Quit,

    /// Show player status
    Status {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// List the playlist
    Playlist {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Show one playlist entry (0-based)
    Entry { index: usize },

    /// Add files to the playlist
    Add {
        /// Replace the playlist instead of appending
        #[arg(long)]
        replace: bool,

        #[arg(required = true)]
        files: Vec<String>,
    },

    /// Append a URL to the playlist
    AddUrl { url: String },

    /// Insert a URL before the given entry
    InsertUrl { url: String, index: usize },

    /// Remove a playlist entry
    Delete { index: usize },

    /// Clear the playlist
    Clear,

    /// Make the given entry current
    Jump { index: usize },

    /// Seek within the current song (milliseconds)
    Seek { ms: i32 },

    /// Show or set the main volume
    Volume {
        #[arg(value_parser = clap::value_parser!(i32).range(0..=100))]
        value: Option<i32>,
    },

    /// Show or set the balance (-100 left, 100 right)
    Balance {
        #[arg(allow_negative_numbers = true, value_parser = clap::value_parser!(i32).range(-100..=100))]
        value: Option<i32>,
    },

    /// Show or hide a window
    Window { window: Window, state: Visibility },

    /// Show or load the skin
    Skin { path: Option<String> },

    /// Open the preferences dialog
    Prefs,

    /// Keep the player above other windows
    AlwaysOnTop { state: Switch },

    /// Toggle repeat mode
    Repeat,

    /// Toggle shuffle mode
    Shuffle,

    /// Equalizer commands
    #[command(name = "eq", alias = "equalizer")]
    Equalizer {
        #[command(subcommand)]
        action: EqAction,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Log line layout on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormat> for TracingOutputFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
            LogFormat::Json => Self::Json,
        }
    }
}

/// Window state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Visibility {
    Show,
    Hide,
}

/// On/off switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Switch {
    On,
    Off,
}

/// Equalizer actions.
#[derive(Debug, Subcommand)]
pub enum EqAction {
    /// Show preamp and band gains
    Show {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Set preamp and all ten bands
    Set {
        #[arg(allow_negative_numbers = true)]
        preamp: f32,

        #[arg(num_args = 10, allow_negative_numbers = true)]
        bands: Vec<f32>,
    },

    /// Show or set the preamp
    Preamp {
        #[arg(allow_negative_numbers = true)]
        value: Option<f32>,
    },

    /// Show or set one band (0-9)
    Band {
        band: usize,

        #[arg(allow_negative_numbers = true)]
        value: Option<f32>,
    },

    /// Ripple a sine wave across the bands, then restore the settings
    Sweep {
        /// Number of pushes
        #[arg(long)]
        steps: Option<u32>,

        /// Pause between pushes in milliseconds
        #[arg(long)]
        interval_ms: Option<u64>,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn export_takes_optional_path() {
        let cli = Cli::try_parse_from(["xmmsctl", "export", "m3u"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Export {
                format: PlaylistFormat::M3u,
                path: None
            }
        ));

        let cli = Cli::try_parse_from(["xmmsctl", "export", "pls", "/tmp/out.pls"]).unwrap();
        match cli.command {
            Command::Export { format, path } => {
                assert_eq!(format, PlaylistFormat::Pls);
                assert_eq!(path, Some(PathBuf::from("/tmp/out.pls")));
            }
            other => panic!("unexpected command: {other:?}"),
        }

        assert!(Cli::try_parse_from(["xmmsctl", "export", "wpl"]).is_err());
    }

    #[test]
    fn eq_set_requires_ten_bands() {
        let args = [
            "xmmsctl", "eq", "set", "-1.5", "0", "1", "2", "3", "4", "5", "6", "7", "8", "-9",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Command::Equalizer {
                action: EqAction::Set { preamp, bands },
            } => {
                assert_eq!(preamp, -1.5);
                assert_eq!(bands.len(), 10);
                assert_eq!(bands[9], -9.0);
            }
            other => panic!("unexpected command: {other:?}"),
        }

        assert!(Cli::try_parse_from(["xmmsctl", "eq", "set", "0", "1", "2"]).is_err());
    }

    #[test]
    fn volume_is_range_checked() {
        assert!(Cli::try_parse_from(["xmmsctl", "volume", "80"]).is_ok());
        assert!(Cli::try_parse_from(["xmmsctl", "volume", "101"]).is_err());
        assert!(Cli::try_parse_from(["xmmsctl", "balance", "-40"]).is_ok());
    }

    #[test]
    fn flags_override_config() {
        let mut config = ClientConfig::default();
        config.session.number = 3;
        config.session.library = Some(PathBuf::from("/usr/lib/libxmms.so.1"));

        let cli = Cli::try_parse_from(["xmmsctl", "play"]).unwrap();
        let options = cli.connect_options(&config);
        assert_eq!(options.session, 3);
        assert_eq!(options.library, config.session.library);

        let cli = Cli::try_parse_from(["xmmsctl", "--session", "1", "--library", "/x.so", "play"])
            .unwrap();
        let options = cli.connect_options(&config);
        assert_eq!(options.session, 1);
        assert_eq!(options.library, Some(PathBuf::from("/x.so")));
    }

    #[test]
    fn log_format_selects_tracing_output() {
        let cli = Cli::try_parse_from(["xmmsctl", "play"]).unwrap();
        assert_eq!(
            TracingOutputFormat::from(cli.log_format),
            TracingOutputFormat::Compact
        );

        let cli = Cli::try_parse_from(["xmmsctl", "--log-format", "json", "play"]).unwrap();
        assert_eq!(TracingOutputFormat::from(cli.log_format), TracingOutputFormat::Json);

        assert!(Cli::try_parse_from(["xmmsctl", "--log-format", "xml", "play"]).is_err());
    }

    #[test]
    fn window_accepts_short_names() {
        let cli = Cli::try_parse_from(["xmmsctl", "window", "eq", "show"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Window {
                window: Window::Equalizer,
                state: Visibility::Show
            }
        ));
        assert!(Cli::try_parse_from(["xmmsctl", "window", "tray", "show"]).is_err());
    }
}
