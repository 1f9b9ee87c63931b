use crate::domain::models::{EditStatus, EditSummary, FileEdit};
use crate::services::storage::write_if_changed;
use regex::{NoExpand, Regex};
use std::path::Path;

/// One pattern and its literal replacement text.
#[derive(Debug, Clone)]
pub struct Substitution {
    pub regex: Regex,
    pub replacement: String,
}

impl Substitution {
    /// `pattern` is a regex compiled in multi-line mode, so `^` anchors each line.
    pub fn pattern(pattern: &str, replacement: &str) -> anyhow::Result<Self> {
        Ok(Self {
            regex: Regex::new(&format!("(?m){}", pattern))?,
            replacement: replacement.to_string(),
        })
    }

    pub fn literal(from: &str, to: &str) -> anyhow::Result<Self> {
        Ok(Self {
            regex: Regex::new(&regex::escape(from))?,
            replacement: to.to_string(),
        })
    }
}

/// Apply every substitution in order; returns the new text and the hit count.
pub fn apply_all(text: &str, subs: &[Substitution]) -> (String, usize) {
    let mut out = text.to_string();
    let mut hits = 0;
    for sub in subs {
        let n = sub.regex.find_iter(&out).count();
        if n == 0 {
            continue;
        }
        hits += n;
        out = sub
            .regex
            .replace_all(&out, NoExpand(&sub.replacement))
            .into_owned();
    }
    (out, hits)
}

pub fn edit_file(path: &Path, label: &str, subs: &[Substitution], dry_run: bool) -> FileEdit {
    let edit = |status, replacements, message: Option<String>| FileEdit {
        path: label.to_string(),
        status,
        replacements,
        message,
    };
    if !path.exists() {
        tracing::warn!(file = label, "file not found, skipping");
        return edit(EditStatus::Missing, 0, None);
    }
    let original = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(file = label, error = %e, "read failed");
            return edit(EditStatus::Error, 0, Some(e.to_string()));
        }
    };
    let (updated, hits) = apply_all(&original, subs);
    if updated == original {
        return edit(EditStatus::Unchanged, 0, None);
    }
    if dry_run {
        return edit(EditStatus::WouldChange, hits, None);
    }
    match write_if_changed(path, &original, &updated) {
        Ok(_) => edit(EditStatus::Changed, hits, None),
        Err(e) => {
            tracing::warn!(file = label, error = %e, "write failed");
            edit(EditStatus::Error, hits, Some(e.to_string()))
        }
    }
}

/// Edit each listed file under `root`; one failure never stops the rest.
pub fn edit_files(
    root: &Path,
    files: &[String],
    subs: &[Substitution],
    dry_run: bool,
) -> EditSummary {
    let mut summary = EditSummary::default();
    for file in files {
        summary.push(edit_file(&root.join(file), file, subs, dry_run));
    }
    summary
}

pub fn edit_row(e: &FileEdit) -> String {
    let tag = match e.status {
        EditStatus::Changed => "changed",
        EditStatus::WouldChange => "would change",
        EditStatus::Unchanged => "unchanged",
        EditStatus::Missing => "missing",
        EditStatus::Error => "error",
    };
    match &e.message {
        Some(m) => format!("{:<13} {} ({})", tag, e.path, m),
        None if e.replacements > 0 => {
            format!("{:<13} {} ({} replacements)", tag, e.path, e.replacements)
        }
        None => format!("{:<13} {}", tag, e.path),
    }
}

pub fn summary_line(s: &EditSummary) -> String {
    format!(
        "{} changed, {} unchanged, {} missing, {} errors",
        s.changed, s.unchanged, s.missing, s.errors
    )
}
