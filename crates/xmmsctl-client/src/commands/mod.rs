//! Command implementations.
//!
//! Every command works against a [`Remote`] and writes its output to a
//! [`Write`] sink, so the same code drives the daemon and the tests.

pub mod config;
pub mod equalizer;
pub mod export;
pub mod interface;
pub mod mixer;
pub mod player;
pub mod playlist;
pub mod status;

use std::io::Write;

use xmmsctl_remote::Remote;

use crate::cli::{Command, ConfigAction, EqAction, Switch, Visibility};
use crate::config::ClientConfig;
use crate::error::ClientResult;
use player::Transport;

/// Runs a configuration command. These never touch the daemon.
pub fn run_config(
    action: &ConfigAction,
    config: &ClientConfig,
    out: &mut impl Write,
) -> ClientResult<()> {
    match action {
        ConfigAction::Dump => config::dump(config, out),
        ConfigAction::Validate => config::validate(config, out),
        ConfigAction::Path => config::path(out),
    }
}

/// Runs a daemon command against `remote`.
pub fn run<R: Remote>(
    remote: &mut R,
    command: &Command,
    config: &ClientConfig,
    out: &mut impl Write,
) -> ClientResult<()> {
    match command {
        Command::Export { format, path } => {
            let dest = path.clone().or_else(|| config.export.destination(*format));
            export::export(&*remote, *format, dest.as_deref(), out)
        }

        Command::Play => player::transport(remote, Transport::Play, out),
        Command::Pause => player::transport(remote, Transport::Pause, out),
        Command::PlayPause => player::transport(remote, Transport::PlayPause, out),
        Command::Stop => player::transport(remote, Transport::Stop, out),
        Command::Next => player::transport(remote, Transport::Next, out),
        Command::Prev => player::transport(remote, Transport::Prev, out),
        Command::Eject => player::transport(remote, Transport::Eject, out),
        Command::Quit => player::transport(remote, Transport::Quit, out),

        Command::Status { json } => status::status(&*remote, *json, out),

        Command::Playlist { json } => playlist::list(&*remote, *json, out),
        Command::Entry { index } => playlist::entry(&*remote, *index, out),
        Command::Add { replace, files } => playlist::add(remote, files, !replace),
        Command::AddUrl { url } => playlist::add_url(remote, url),
        Command::InsertUrl { url, index } => playlist::insert_url(remote, url, *index),
        Command::Delete { index } => playlist::delete(remote, *index),
        Command::Clear => playlist::clear(remote),
        Command::Jump { index } => playlist::jump(remote, *index),
        Command::Seek { ms } => playlist::seek(remote, *ms),

        Command::Volume { value } => mixer::volume(remote, *value, out),
        Command::Balance { value } => mixer::balance(remote, *value, out),

        Command::Window { window, state } => {
            interface::window(remote, *window, *state == Visibility::Show)
        }
        Command::Skin { path } => interface::skin(remote, path.as_deref(), out),
        Command::Prefs => interface::preferences(remote),
        Command::AlwaysOnTop { state } => interface::always_on_top(remote, *state == Switch::On),
        Command::Repeat => interface::repeat(remote, out),
        Command::Shuffle => interface::shuffle(remote, out),

        Command::Equalizer { action } => match action {
            EqAction::Show { json } => equalizer::show(&*remote, *json, out),
            EqAction::Set { preamp, bands } => equalizer::set(remote, *preamp, bands),
            EqAction::Preamp { value } => equalizer::preamp(remote, *value, out),
            EqAction::Band { band, value } => equalizer::band(remote, *band, *value, out),
            EqAction::Sweep { steps, interval_ms } => {
                equalizer::sweep(remote, &config.sweep.plan(*steps, *interval_ms))
            }
        },

        Command::Config { action } => run_config(action, config, out),
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use xmmsctl_core::{Equalizer, PlaylistEntry};
    use xmmsctl_remote::MemoryRemote;

    use super::*;
    use crate::cli::Cli;

    fn run_args(
        remote: &mut MemoryRemote,
        config: &ClientConfig,
        args: &[&str],
    ) -> ClientResult<String> {
        let cli = Cli::try_parse_from(std::iter::once("xmmsctl").chain(args.iter().copied()))
            .map_err(|e| crate::error::ClientError::InvalidArgument(e.to_string()))?;
        let mut out = Vec::new();
        run(remote, &cli.command, config, &mut out)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    #[test]
    fn export_uses_configured_destination() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ClientConfig::default();
        config.export.pls_path = dir.path().join("configured.pls");
        let mut remote =
            MemoryRemote::new().with_playlist(vec![PlaylistEntry::new("A", "/a.mp3", 1000)]);

        let out = run_args(&mut remote, &config, &["export", "pls"]).unwrap();

        assert!(out.starts_with("Saving playlist to"));
        assert_eq!(
            std::fs::read_to_string(dir.path().join("configured.pls")).unwrap(),
            "[playlist]\nNumberOfEntries=1\nFile1=/a.mp3\n"
        );
    }

    #[test]
    fn sweep_uses_configured_plan() {
        let mut config = ClientConfig::default();
        config.sweep.interval_ms = 0;
        config.sweep.steps = 7;
        let mut remote = MemoryRemote::new();

        run_args(&mut remote, &config, &["eq", "sweep"]).unwrap();
        assert_eq!(remote.equalizer_history().len(), 8);

        run_args(&mut remote, &config, &["eq", "sweep", "--steps", "2"]).unwrap();
        assert_eq!(remote.equalizer_history().len(), 8 + 3);
    }

    #[test]
    fn eq_set_then_show() {
        let config = ClientConfig::default();
        let mut remote = MemoryRemote::new();
        run_args(
            &mut remote,
            &config,
            &["eq", "set", "1", "0", "1", "2", "3", "4", "5", "6", "7", "8", "9"],
        )
        .unwrap();
        assert_eq!(
            remote.equalizer().unwrap(),
            Equalizer::new(1.0, [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0])
        );
    }

    #[test]
    fn add_appends_unless_replace() {
        let config = ClientConfig::default();
        let mut remote =
            MemoryRemote::new().with_playlist(vec![PlaylistEntry::new("A", "/a.mp3", 1000)]);

        run_args(&mut remote, &config, &["add", "/b.mp3"]).unwrap();
        assert_eq!(remote.playlist_len().unwrap(), 2);

        run_args(&mut remote, &config, &["add", "--replace", "/c.mp3"]).unwrap();
        assert_eq!(remote.playlist_len().unwrap(), 1);
    }

    #[test]
    fn window_and_mode_switches() {
        let config = ClientConfig::default();
        let mut remote = MemoryRemote::new();

        run_args(&mut remote, &config, &["window", "playlist", "show"]).unwrap();
        run_args(&mut remote, &config, &["always-on-top", "on"]).unwrap();
        assert!(remote.is_window_visible(xmmsctl_remote::Window::Playlist).unwrap());
        assert_eq!(
            remote.calls(),
            ["set_window_visible playlist true", "set_always_on_top true"]
        );
    }
}
