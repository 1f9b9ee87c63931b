use crate::domain::config::{MoveRule, OrganizeConfig};
use crate::domain::constants::BACKUP_SUFFIX;
use crate::domain::models::{MoveEntry, MoveStatus, OrganizeReport, RunMode};
use crate::services::settings::Workspace;
use crate::services::storage::copy_preserving_mtime;
use std::path::{Path, PathBuf};

/// `docs/readme.md` -> `docs/readme.md.backup`.
pub fn backup_path(dst: &Path) -> PathBuf {
    let mut name = dst.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(BACKUP_SUFFIX);
    dst.with_file_name(name)
}

/// True when `dst` exists with different bytes, so moving onto it would lose data.
fn needs_backup(src: &Path, dst: &Path) -> anyhow::Result<bool> {
    if !dst.is_file() {
        return Ok(false);
    }
    Ok(std::fs::read(src)? != std::fs::read(dst)?)
}

/// Rename, falling back to copy + delete when the rename crosses filesystems.
fn move_file(src: &Path, dst: &Path) -> anyhow::Result<()> {
    if std::fs::rename(src, dst).is_ok() {
        return Ok(());
    }
    copy_preserving_mtime(src, dst)?;
    std::fs::remove_file(src)?;
    Ok(())
}

fn move_one(root: &Path, rule: &MoveRule, execute: bool) -> MoveEntry {
    let mut entry = MoveEntry {
        from: rule.from.clone(),
        to: rule.to.clone(),
        status: MoveStatus::Skipped,
        backup: None,
        message: None,
    };
    let src = root.join(&rule.from);
    let dst = root.join(&rule.to);
    if !src.is_file() {
        entry.message = Some("source not found".to_string());
        return entry;
    }
    if dst.is_dir() {
        entry.status = MoveStatus::Error;
        entry.message = Some("destination is a directory".to_string());
        return entry;
    }

    let result = needs_backup(&src, &dst).and_then(|backup| {
        let backup = backup.then(|| backup_path(&dst));
        entry.backup = backup.as_ref().map(|b| {
            b.strip_prefix(root)
                .unwrap_or(b.as_path())
                .to_string_lossy()
                .replace('\\', "/")
        });
        if !execute {
            return Ok(MoveStatus::WouldMove);
        }
        if let Some(parent) = dst.parent() {
            std::fs::create_dir_all(parent)?;
        }
        if let Some(backup) = &backup {
            copy_preserving_mtime(&dst, backup)?;
            tracing::info!(backup = %backup.display(), "backed up differing destination");
        }
        move_file(&src, &dst)?;
        tracing::info!(from = %rule.from, to = %rule.to, "moved file");
        Ok(MoveStatus::Moved)
    });

    match result {
        Ok(status) => entry.status = status,
        Err(e) => {
            tracing::warn!(from = %rule.from, error = %e, "move failed");
            entry.status = MoveStatus::Error;
            entry.message = Some(format!("{:#}", e));
        }
    }
    entry
}

/// Move each configured file under `root`. Without `execute` nothing is touched.
pub fn organize_in(root: &Path, config: &OrganizeConfig, execute: bool) -> OrganizeReport {
    let mut report = OrganizeReport {
        mode: if execute { RunMode::Executed } else { RunMode::DryRun },
        entries: Vec::with_capacity(config.moves.len()),
        moved: 0,
        skipped: 0,
        errors: 0,
    };
    for rule in &config.moves {
        let entry = move_one(root, rule, execute);
        match entry.status {
            MoveStatus::Moved | MoveStatus::WouldMove => report.moved += 1,
            MoveStatus::Skipped => report.skipped += 1,
            MoveStatus::Error => report.errors += 1,
        }
        report.entries.push(entry);
    }
    report
}

pub fn organize(ws: &Workspace, execute: bool) -> OrganizeReport {
    organize_in(&ws.root, &ws.config.organize, execute)
}

pub fn move_row(e: &MoveEntry) -> String {
    let tag = match e.status {
        MoveStatus::Moved => "moved",
        MoveStatus::WouldMove => "would move",
        MoveStatus::Skipped => "skipped",
        MoveStatus::Error => "error",
    };
    let mut row = format!("{:<11} {} -> {}", tag, e.from, e.to);
    if let Some(b) = &e.backup {
        row.push_str(&format!(" (backup {})", b));
    }
    if let Some(m) = &e.message {
        row.push_str(&format!(" ({})", m));
    }
    row
}
