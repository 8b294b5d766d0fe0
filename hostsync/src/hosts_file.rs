// Hosts file writer
//!
//! Replaces the output file in one step: content goes to a temporary file in
//! the same directory, which is then renamed over the destination. Readers see
//! either the previous file or the new one, never a partial write.

use crate::error::{Error, Result};
use std::fs;
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use tempfile::NamedTempFile;

/// Mode of the written file (owner rw, world readable)
pub const HOSTS_FILE_MODE: u32 = 0o644;

/// Atomically replace `path` with `content`
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let write_error = |source: std::io::Error| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    // Temp file must live on the destination's filesystem for rename to be atomic
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_error)?;
    tmp.as_file()
        .set_permissions(fs::Permissions::from_mode(HOSTS_FILE_MODE))
        .map_err(write_error)?;
    tmp.write_all(content.as_bytes()).map_err(write_error)?;
    tmp.as_file().sync_all().map_err(write_error)?;

    tmp.persist(path).map_err(|e| write_error(e.error))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_atomic_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hosts");

        write_atomic(&path, "10.0.0.5 host host\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "10.0.0.5 host host\n");
    }

    #[test]
    fn test_write_atomic_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hosts");
        fs::write(&path, "old content that is much longer than the new one\n").unwrap();

        write_atomic(&path, "new\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new\n");
    }

    #[test]
    fn test_write_atomic_sets_mode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hosts");

        write_atomic(&path, "x\n").unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, HOSTS_FILE_MODE);
    }

    #[test]
    fn test_write_atomic_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hosts");

        write_atomic(&path, "a\n").unwrap();
        write_atomic(&path, "b\n").unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_write_atomic_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("hosts");

        let err = write_atomic(&path, "x\n").unwrap_err();
        assert!(matches!(err, Error::Write { .. }));
    }
}
