//! Reading and atomically replacing the dump file on disk.
//!
//! The vault core never touches the filesystem; these helpers are what
//! the CLI uses to persist whatever `Vault::dump` produced.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::errors::Result;

/// What is currently stored at a dump path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredDump {
    /// No file at the path.
    Missing,
    /// A file that is empty or whitespace only.
    Empty,
    /// The file's text, exactly as written.
    Present(String),
}

/// Read the dump at `path`.
pub fn read_dump(path: &Path) -> Result<StoredDump> {
    if !path.exists() {
        return Ok(StoredDump::Missing);
    }

    let text = fs::read_to_string(path)?;
    if text.trim().is_empty() {
        return Ok(StoredDump::Empty);
    }

    Ok(StoredDump::Present(text))
}

/// Write `representation` to `path` **atomically**.
///
/// 1. Write to a temp file in the same directory.
/// 2. Flush it to disk.
/// 3. Rename the temp file over the target path.
/// 4. On Unix, flush the parent directory so the rename itself is durable.
///
/// If any step fails the previous file is left untouched.
pub fn write_dump(path: &Path, representation: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp_path = temp_path(path);
    let result = write_and_rename(&tmp_path, path, representation);
    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result?;

    tracing::debug!(path = %path.display(), bytes = representation.len(), "wrote vault dump");
    Ok(())
}

fn write_and_rename(tmp_path: &Path, path: &Path, representation: &str) -> Result<()> {
    let mut file = fs::File::create(tmp_path)?;

    // Owner-only read/write on Unix.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }

    file.write_all(representation.as_bytes())?;
    file.sync_all()?;
    drop(file);

    fs::rename(tmp_path, path)?;
    sync_parent(path)?;
    Ok(())
}

#[cfg(unix)]
fn sync_parent(path: &Path) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::File::open(parent)?.sync_all()?;
    Ok(())
}

#[cfg(not(unix))]
fn sync_parent(_path: &Path) -> Result<()> {
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let parent = path.parent().unwrap_or(Path::new("."));
    parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ))
}
