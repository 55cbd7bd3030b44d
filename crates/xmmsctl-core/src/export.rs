//! Playlist export formats.
//!
//! Three fixed text formats are supported:
//! - **XML**: a minimal `<XmmsPlaylist>` document, no DTD
//! - **M3U**: the `#EXTM3U` / `#EXTINF` subset understood by most players
//! - **PLS**: the `[playlist]` INI subset; only `File<n>` keys are written
//!
//! # Example
//!
//! ```rust
//! use xmmsctl_core::{render, PlaylistEntry, PlaylistFormat};
//!
//! let entries = vec![PlaylistEntry::new("Song A", "/a.mp3", 185_000)];
//! let m3u = render(PlaylistFormat::M3u, &entries);
//! assert_eq!(m3u, "#EXTM3U\n#EXTINF:185,Song A\n/a.mp3");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::playlist::PlaylistEntry;

/// Escapes the characters that would break XML text content.
///
/// `&` is replaced first so existing entities are not produced twice.
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// A playlist file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaylistFormat {
    /// Minimal XML document.
    Xml,
    /// Extended M3U.
    M3u,
    /// PLS.
    Pls,
}

/// Error returned when parsing an unknown format name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown playlist format '{0}' (expected xml, m3u or pls)")]
pub struct FormatParseError(pub String);

impl PlaylistFormat {
    /// All supported formats.
    pub const ALL: [Self; 3] = [Self::Xml, Self::M3u, Self::Pls];

    /// File extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Xml => "xml",
            Self::M3u => "m3u",
            Self::Pls => "pls",
        }
    }

    /// Default output file name.
    pub fn default_path(&self) -> &'static str {
        match self {
            Self::Xml => "playlist.xml",
            Self::M3u => "playlist.m3u",
            Self::Pls => "playlist.pls",
        }
    }
}

impl fmt::Display for PlaylistFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for PlaylistFormat {
    type Err = FormatParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xml" => Ok(Self::Xml),
            "m3u" => Ok(Self::M3u),
            "pls" => Ok(Self::Pls),
            other => Err(FormatParseError(other.to_string())),
        }
    }
}

/// Renders entries in the given format.
pub fn render(format: PlaylistFormat, entries: &[PlaylistEntry]) -> String {
    match format {
        PlaylistFormat::Xml => to_xml(entries),
        PlaylistFormat::M3u => to_m3u(entries),
        PlaylistFormat::Pls => to_pls(entries),
    }
}

/// XML document with one `<entry>` per playlist item.
pub fn to_xml(entries: &[PlaylistEntry]) -> String {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    if entries.is_empty() {
        out.push_str("<XmmsPlaylist></XmmsPlaylist>\n");
        return out;
    }

    out.push_str("<XmmsPlaylist>\n");
    for entry in entries {
        out.push_str("  <entry>\n");
        out.push_str(&format!("    <title>{}</title>\n", escape_xml(&entry.title)));
        out.push_str(&format!(
            "    <filename>{}</filename>\n",
            escape_xml(&entry.file)
        ));
        out.push_str(&format!("    <duration>{}</duration>\n", entry.duration_ms));
        out.push_str("  </entry>\n");
    }
    out.push_str("</XmmsPlaylist>\n");
    out
}

/// Extended M3U. The last entry is not followed by a newline.
pub fn to_m3u(entries: &[PlaylistEntry]) -> String {
    let body = entries
        .iter()
        .map(|entry| {
            format!(
                "#EXTINF:{},{}\n{}",
                entry.duration_secs(),
                entry.title,
                entry.file
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!("#EXTM3U\n{body}")
}

/// PLS with `File<n>` keys only.
pub fn to_pls(entries: &[PlaylistEntry]) -> String {
    let mut out = format!("[playlist]\nNumberOfEntries={}\n", entries.len());
    for (i, entry) in entries.iter().enumerate() {
        out.push_str(&format!("File{}={}\n", i + 1, entry.file));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_songs() -> Vec<PlaylistEntry> {
        vec![
            PlaylistEntry::new("S1", "/1.mp3", 1000),
            PlaylistEntry::new("S2", "/2.mp3", 2000),
        ]
    }

    #[test]
    fn escape_xml_replaces_markup() {
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml("<tag>"), "&lt;tag&gt;");
        assert_eq!(escape_xml("&lt;"), "&amp;lt;");
        assert_eq!(escape_xml("plain"), "plain");
    }

    #[test]
    fn xml_has_no_raw_markup_in_values() {
        let entries = vec![PlaylistEntry::new(
            "Tom & Jerry <live>",
            "/music/a&b/<c>.mp3",
            1000,
        )];
        let xml = to_xml(&entries);

        assert!(xml.contains("<title>Tom &amp; Jerry &lt;live&gt;</title>"));
        assert!(xml.contains("<filename>/music/a&amp;b/&lt;c&gt;.mp3</filename>"));

        for line in xml.lines().filter(|l| l.contains("<title>") || l.contains("<filename>")) {
            let inner = &line[line.find('>').unwrap() + 1..line.rfind('<').unwrap()];
            assert!(!inner.contains('<') && !inner.contains('>'), "{line}");
            for (i, _) in inner.match_indices('&') {
                let rest = &inner[i..];
                assert!(
                    rest.starts_with("&amp;") || rest.starts_with("&lt;") || rest.starts_with("&gt;"),
                    "{line}"
                );
            }
        }
    }

    #[test]
    fn xml_document() {
        let xml = to_xml(&[PlaylistEntry::new("Song A", "/a.mp3", 185_000)]);
        insta::assert_snapshot!(xml, @r#"
        <?xml version="1.0" encoding="UTF-8"?>
        <XmmsPlaylist>
          <entry>
            <title>Song A</title>
            <filename>/a.mp3</filename>
            <duration>185000</duration>
          </entry>
        </XmmsPlaylist>
        "#);
    }

    #[test]
    fn xml_empty_playlist() {
        assert_eq!(
            to_xml(&[]),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<XmmsPlaylist></XmmsPlaylist>\n"
        );
    }

    #[test]
    fn m3u_single_entry() {
        let entries = vec![PlaylistEntry::new("Song A", "/a.mp3", 185_000)];
        assert_eq!(to_m3u(&entries), "#EXTM3U\n#EXTINF:185,Song A\n/a.mp3");
    }

    #[test]
    fn m3u_multiple_entries() {
        assert_eq!(
            to_m3u(&two_songs()),
            "#EXTM3U\n#EXTINF:1,S1\n/1.mp3\n#EXTINF:2,S2\n/2.mp3"
        );
    }

    #[test]
    fn m3u_unknown_length() {
        let entries = vec![PlaylistEntry::new("Radio", "http://radio/", -1)];
        assert_eq!(to_m3u(&entries), "#EXTM3U\n#EXTINF:-1,Radio\nhttp://radio/");
    }

    #[test]
    fn m3u_empty_playlist() {
        assert_eq!(to_m3u(&[]), "#EXTM3U\n");
    }

    #[test]
    fn pls_two_entries() {
        assert_eq!(
            to_pls(&two_songs()),
            "[playlist]\nNumberOfEntries=2\nFile1=/1.mp3\nFile2=/2.mp3\n"
        );
    }

    #[test]
    fn pls_empty_playlist() {
        assert_eq!(to_pls(&[]), "[playlist]\nNumberOfEntries=0\n");
    }

    #[test]
    fn render_dispatches_on_format() {
        let entries = two_songs();
        assert_eq!(render(PlaylistFormat::Pls, &entries), to_pls(&entries));
        assert_eq!(render(PlaylistFormat::M3u, &entries), to_m3u(&entries));
        assert_eq!(render(PlaylistFormat::Xml, &entries), to_xml(&entries));
    }

    #[test]
    fn format_names() {
        assert_eq!("M3U".parse::<PlaylistFormat>(), Ok(PlaylistFormat::M3u));
        assert_eq!("pls".parse::<PlaylistFormat>(), Ok(PlaylistFormat::Pls));
        assert_eq!("xml".parse::<PlaylistFormat>(), Ok(PlaylistFormat::Xml));
        assert!("wpl".parse::<PlaylistFormat>().is_err());

        for format in PlaylistFormat::ALL {
            assert_eq!(format.to_string().parse::<PlaylistFormat>(), Ok(format));
            assert!(format.default_path().ends_with(format.extension()));
        }
    }
}
