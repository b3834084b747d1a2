use crate::editcount_core::error::{EditCountError, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::Builder;

/// Mode for newly created output files, before the umask applies.
#[cfg(unix)]
const OUTPUT_MODE: u32 = 0o644;

/// Write `contents` to `path` through a temp file in the same directory, so the
/// destination is either left untouched or fully replaced.
///
/// An existing destination keeps its permissions; a new one gets the usual
/// world-readable mode instead of the temp file's owner-only default.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(OUTPUT_MODE));
    }

    let mut file = builder.tempfile_in(dir).map_err(|e| EditCountError::io(dir, e))?;

    if let Ok(existing) = fs::metadata(path) {
        fs::set_permissions(file.path(), existing.permissions())
            .map_err(|e| EditCountError::io(file.path(), e))?;
    }

    file.write_all(contents)
        .and_then(|_| file.flush())
        .map_err(|e| EditCountError::io(file.path(), e))?;

    file.persist(path).map_err(|source| EditCountError::Persist {
        path: path.to_path_buf(),
        source,
    })?;

    log::debug!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_atomic_replaces_existing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("counts.json");
        fs::write(&path, "old contents that are longer").unwrap();

        write_atomic(&path, b"{}").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
        // No stray temp files left behind
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_atomic_missing_dir_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("no/such/dir/out.js");
        assert!(write_atomic(&path, b"[]").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_write_atomic_new_file_is_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let path = temp.path().join("photo_data.js");

        write_atomic(&path, b"var data=[];").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        // Others can read it unless the umask strips that
        assert_eq!(mode & 0o600, 0o600);
        assert_eq!(mode & 0o044, 0o644 & 0o044 & !current_umask());
    }

    #[cfg(unix)]
    #[test]
    fn test_write_atomic_keeps_existing_mode() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let path = temp.path().join("counts.json");
        fs::write(&path, "{}").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();

        write_atomic(&path, br#"{"2023":{}}"#).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);
    }

    /// Umask in effect, read back from a file created with mode 0o777.
    #[cfg(unix)]
    fn current_umask() -> u32 {
        use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

        let temp = TempDir::new().unwrap();
        let path = temp.path().join("umask");
        fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .mode(0o777)
            .open(&path)
            .unwrap();
        !fs::metadata(&path).unwrap().permissions().mode() & 0o777
    }
}
