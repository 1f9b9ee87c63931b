use crate::error::UpkeepError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Write `value` as two-space indented JSON, creating parent directories.
pub fn write_json_report<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut body = serde_json::to_string_pretty(value)?;
    body.push('\n');
    std::fs::write(path, body)?;
    tracing::info!(path = %path.display(), "wrote report");
    Ok(())
}

pub fn load_report<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    if !path.exists() {
        return Err(UpkeepError::ReportMissing(path.to_path_buf()).into());
    }
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Returns true when the file was written. Identical content leaves bytes and mtime untouched.
pub fn write_if_changed(path: &Path, original: &str, updated: &str) -> anyhow::Result<bool> {
    if original == updated {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, updated)?;
    tracing::info!(path = %path.display(), "updated file");
    Ok(true)
}

/// Copy `src` over `dst` and carry the source modification time across.
pub fn copy_preserving_mtime(src: &Path, dst: &Path) -> anyhow::Result<()> {
    if let Some(parent) = dst.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::copy(src, dst)?;
    let meta = std::fs::metadata(src)?;
    let mtime = filetime::FileTime::from_last_modification_time(&meta);
    filetime::set_file_mtime(dst, mtime)?;
    Ok(())
}
