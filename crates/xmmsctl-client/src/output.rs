//! Atomic file output.
//!
//! Contents are written to a temporary file next to the destination and
//! renamed over it once complete. A failed write leaves the destination as it
//! was.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{ClientError, ClientResult};

/// Writes `contents` to `path`, adding a final newline when missing.
///
/// A symlinked destination is written through: the link stays in place and
/// its target receives the new contents.
pub fn write_atomic(path: &Path, contents: &str) -> ClientResult<()> {
    let write_err = |source| ClientError::Write {
        path: path.to_path_buf(),
        source,
    };

    let target = resolve_target(path).map_err(write_err)?;
    let dir = parent_dir(&target);
    let existing = std::fs::metadata(&target).ok();

    let mut builder = tempfile::Builder::new();
    builder.prefix(".xmmsctl").suffix(".tmp");
    // New files get 0o666 filtered through the umask, like a plain create.
    #[cfg(unix)]
    if existing.is_none() {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    let mut tmp: NamedTempFile = builder.tempfile_in(&dir).map_err(write_err)?;
    debug!(tmp = %tmp.path().display(), dest = %target.display(), "writing");

    tmp.write_all(contents.as_bytes()).map_err(write_err)?;
    if !contents.ends_with('\n') {
        tmp.write_all(b"\n").map_err(write_err)?;
    }
    tmp.as_file().sync_all().map_err(write_err)?;

    if let Some(meta) = existing {
        tmp.as_file()
            .set_permissions(meta.permissions())
            .map_err(write_err)?;
    }

    tmp.persist(&target).map_err(|e| write_err(e.error))?;
    Ok(())
}

/// Follows `path` when it is a symlink, dangling links included.
fn resolve_target(path: &Path) -> std::io::Result<PathBuf> {
    match std::fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => match std::fs::canonicalize(path) {
            Ok(target) => Ok(target),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let link = std::fs::read_link(path)?;
                Ok(parent_dir(path).join(link))
            }
            Err(e) => Err(e),
        },
        _ => Ok(path.to_path_buf()),
    }
}

/// Directory holding `path`; a bare file name lives in `.`.
fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
