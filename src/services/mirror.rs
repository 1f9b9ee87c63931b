use crate::domain::config::MirrorConfig;
use crate::domain::models::{MirrorEntry, MirrorReport, MirrorStatus};
use crate::services::settings::Workspace;
use crate::services::storage::copy_preserving_mtime;
use std::path::Path;

fn mtime(path: &Path) -> anyhow::Result<filetime::FileTime> {
    let meta = std::fs::metadata(path)?;
    Ok(filetime::FileTime::from_last_modification_time(&meta))
}

fn sync_one(src: &Path, dst: &Path) -> anyhow::Result<MirrorStatus> {
    if !dst.exists() {
        copy_preserving_mtime(src, dst)?;
        return Ok(MirrorStatus::New);
    }
    if mtime(src)? > mtime(dst)? {
        copy_preserving_mtime(src, dst)?;
        return Ok(MirrorStatus::Updated);
    }
    Ok(MirrorStatus::UpToDate)
}

/// Copy each listed note into `destination/<folder>/<file name>` when the source is newer.
pub fn mirror_notes(source: &Path, destination: &Path, config: &MirrorConfig) -> MirrorReport {
    let mut report = MirrorReport::default();
    for group in &config.groups {
        for file in &group.files {
            let src = source.join(file);
            let name = Path::new(file)
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| file.clone());
            let dst = destination.join(&group.folder).join(&name);
            let target = format!("{}/{}", group.folder, name);
            let (status, message) = if !src.exists() {
                tracing::warn!(file = %file, "mirror source missing");
                (MirrorStatus::Missing, None)
            } else {
                match sync_one(&src, &dst) {
                    Ok(status) => (status, None),
                    Err(e) => {
                        tracing::warn!(file = %file, error = %e, "mirror copy failed");
                        (MirrorStatus::Error, Some(format!("{:#}", e)))
                    }
                }
            };
            match status {
                MirrorStatus::New => report.new += 1,
                MirrorStatus::Updated => report.updated += 1,
                MirrorStatus::UpToDate => report.up_to_date += 1,
                MirrorStatus::Missing => report.missing += 1,
                MirrorStatus::Error => report.errors += 1,
            }
            report.entries.push(MirrorEntry {
                file: file.clone(),
                destination: target,
                status,
                message,
            });
        }
    }
    report
}

pub fn mirror(ws: &Workspace) -> MirrorReport {
    let config = &ws.config.mirror;
    let source = match &config.source {
        Some(s) => ws.path(s),
        None => ws.notes_dir(),
    };
    mirror_notes(&source, &ws.path(&config.destination), config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::MirrorGroup;
    use filetime::FileTime;
    use tempfile::TempDir;

    fn config() -> MirrorConfig {
        MirrorConfig {
            source: None,
            destination: "NotebookLM".into(),
            groups: vec![MirrorGroup {
                folder: "01-Fundamentals".into(),
                files: vec![
                    "Project-Overview.md".into(),
                    "Agentes/Orchestrator.md".into(),
                    "Gone.md".into(),
                ],
            }],
        }
    }

    fn set(path: &Path, secs: i64) {
        filetime::set_file_mtime(path, FileTime::from_unix_time(secs, 0)).unwrap();
    }

    #[test]
    fn copies_new_then_reports_up_to_date() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("notes");
        let dst = tmp.path().join("NotebookLM");
        std::fs::create_dir_all(src.join("Agentes")).unwrap();
        std::fs::write(src.join("Project-Overview.md"), "overview").unwrap();
        std::fs::write(src.join("Agentes/Orchestrator.md"), "orch").unwrap();

        let first = mirror_notes(&src, &dst, &config());
        assert_eq!(first.new, 2);
        assert_eq!(first.missing, 1);
        assert_eq!(
            std::fs::read_to_string(dst.join("01-Fundamentals/Orchestrator.md")).unwrap(),
            "orch"
        );
        assert_eq!(first.entries[1].destination, "01-Fundamentals/Orchestrator.md");

        let second = mirror_notes(&src, &dst, &config());
        assert_eq!(second.up_to_date, 2);
        assert_eq!(second.new + second.updated, 0);
    }

    #[test]
    fn newer_source_is_copied_older_source_is_not() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("notes");
        let dst = tmp.path().join("NotebookLM/01-Fundamentals");
        std::fs::create_dir_all(&src).unwrap();
        std::fs::create_dir_all(&dst).unwrap();
        std::fs::write(src.join("Project-Overview.md"), "fresh").unwrap();
        std::fs::write(dst.join("Project-Overview.md"), "stale").unwrap();
        set(&src.join("Project-Overview.md"), 2_000);
        set(&dst.join("Project-Overview.md"), 1_000);

        let report = mirror_notes(&src, &tmp.path().join("NotebookLM"), &config());
        assert_eq!(report.updated, 1);
        assert_eq!(
            std::fs::read_to_string(dst.join("Project-Overview.md")).unwrap(),
            "fresh"
        );

        std::fs::write(dst.join("Project-Overview.md"), "edited in mirror").unwrap();
        set(&src.join("Project-Overview.md"), 1_000);
        set(&dst.join("Project-Overview.md"), 1_000);
        let report = mirror_notes(&src, &tmp.path().join("NotebookLM"), &config());
        assert_eq!(report.up_to_date, 1);
        assert_eq!(
            std::fs::read_to_string(dst.join("Project-Overview.md")).unwrap(),
            "edited in mirror"
        );
    }

    #[test]
    fn newer_destination_is_left_alone_until_source_moves_past_it() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("notes");
        let mirror = tmp.path().join("NotebookLM");
        let dst = mirror.join("01-Fundamentals/Project-Overview.md");
        std::fs::create_dir_all(&src).unwrap();
        std::fs::create_dir_all(dst.parent().unwrap()).unwrap();
        std::fs::write(src.join("Project-Overview.md"), "source v1").unwrap();
        std::fs::write(&dst, "mirror copy").unwrap();
        set(&src.join("Project-Overview.md"), 10_000);
        set(&dst, 10_001);

        let report = mirror_notes(&src, &mirror, &config());
        assert_eq!(report.up_to_date, 1);
        assert_eq!(report.updated, 0);
        assert_eq!(std::fs::read_to_string(&dst).unwrap(), "mirror copy");
        let meta = std::fs::metadata(&dst).unwrap();
        assert_eq!(FileTime::from_last_modification_time(&meta).unix_seconds(), 10_001);

        std::fs::write(src.join("Project-Overview.md"), "source v2").unwrap();
        set(&src.join("Project-Overview.md"), 10_002);
        let report = mirror_notes(&src, &mirror, &config());
        assert_eq!(report.updated, 1);
        assert_eq!(std::fs::read_to_string(&dst).unwrap(), "source v2");
        let meta = std::fs::metadata(&dst).unwrap();
        assert_eq!(FileTime::from_last_modification_time(&meta).unix_seconds(), 10_002);
    }
}
