use crate::domain::config::{LinkRename, LinksConfig};
use crate::domain::models::{
    BrokenLink, EditStatus, EditSummary, FileEdit, LinkCheckReport, LinkFixReport,
};
use crate::services::settings::Workspace;
use crate::services::storage::write_if_changed;
use regex::{Captures, Regex};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A compiled `old -> new` link rename. Matches `[[old]]`, `[[old|alias]]` and `[[old#heading]]`.
struct LinkRewrite {
    regex: Regex,
    to: String,
}

impl LinkRewrite {
    fn new(rule: &LinkRename) -> anyhow::Result<Self> {
        Ok(Self {
            regex: Regex::new(&format!(r"\[\[{}([#|][^\]]*)?\]\]", regex::escape(&rule.from)))?,
            to: rule.to.clone(),
        })
    }
}

fn rewrite_links(text: &str, rewrites: &[LinkRewrite]) -> (String, usize) {
    let mut out = text.to_string();
    let mut hits = 0;
    for rw in rewrites {
        let n = rw.regex.find_iter(&out).count();
        if n == 0 {
            continue;
        }
        hits += n;
        out = rw
            .regex
            .replace_all(&out, |c: &Captures| {
                let rest = c.get(1).map(|m| m.as_str()).unwrap_or("");
                format!("[[{}{}]]", rw.to, rest)
            })
            .into_owned();
    }
    (out, hits)
}

/// Every `*.md` under `dir`, sorted, skipping hidden directories.
pub fn markdown_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().map(|x| x == "md").unwrap_or(false))
        .collect();
    files.sort();
    files
}

fn relative(dir: &Path, path: &Path) -> String {
    path.strip_prefix(dir)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

fn fix_note(path: &Path, label: String, rewrites: &[LinkRewrite], dry_run: bool) -> FileEdit {
    let mut edit = FileEdit {
        path: label,
        status: EditStatus::Unchanged,
        replacements: 0,
        message: None,
    };
    let original = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(file = %edit.path, error = %e, "read failed");
            edit.status = EditStatus::Error;
            edit.message = Some(e.to_string());
            return edit;
        }
    };
    let (updated, hits) = rewrite_links(&original, rewrites);
    if hits == 0 {
        return edit;
    }
    edit.replacements = hits;
    if dry_run {
        edit.status = EditStatus::WouldChange;
        return edit;
    }
    match write_if_changed(path, &original, &updated) {
        Ok(_) => edit.status = EditStatus::Changed,
        Err(e) => {
            edit.status = EditStatus::Error;
            edit.message = Some(e.to_string());
        }
    }
    edit
}

pub fn fix_links_in(notes: &Path, config: &LinksConfig, dry_run: bool) -> anyhow::Result<LinkFixReport> {
    let rewrites = config
        .renames
        .iter()
        .map(LinkRewrite::new)
        .collect::<anyhow::Result<Vec<_>>>()?;
    let mut edits = EditSummary::default();
    for path in markdown_files(notes) {
        edits.push(fix_note(&path, relative(notes, &path), &rewrites, dry_run));
    }

    let mut created = vec![];
    for seed in &config.create {
        let path = notes.join(&seed.path);
        if path.exists() {
            continue;
        }
        if !dry_run {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, &seed.content)?;
            tracing::info!(note = %seed.path, "created missing note");
        }
        created.push(seed.path.clone());
    }

    Ok(LinkFixReport {
        notes_dir: notes.to_string_lossy().to_string(),
        edits,
        created,
    })
}

pub fn fix_links(ws: &Workspace, dry_run: bool) -> anyhow::Result<LinkFixReport> {
    fix_links_in(&ws.notes_dir(), &ws.config.links, dry_run)
}

fn link_targets(re: &Regex, text: &str) -> Vec<String> {
    re.captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().trim().trim_end_matches(".md").to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

pub fn check_links_in(notes: &Path, config: &LinksConfig) -> anyhow::Result<LinkCheckReport> {
    let link = Regex::new(r"\[\[([^\]|#]*)(?:[#|][^\]]*)?\]\]")?;
    let files = markdown_files(notes);
    let stems: HashSet<String> = files
        .iter()
        .filter_map(|p| p.file_stem())
        .map(|s| s.to_string_lossy().to_string())
        .collect();
    let renames: BTreeMap<&str, &str> = config
        .renames
        .iter()
        .map(|r| (r.from.as_str(), r.to.as_str()))
        .collect();

    let mut links_checked = 0;
    let mut broken = vec![];
    for path in &files {
        let text = match std::fs::read_to_string(path) {
            Ok(t) => t,
            Err(e) => {
                tracing::warn!(file = %path.display(), error = %e, "read failed");
                continue;
            }
        };
        for target in link_targets(&link, &text) {
            links_checked += 1;
            let direct = notes.join(format!("{}.md", target));
            let stem = target.rsplit('/').next().unwrap_or(&target);
            if direct.exists() || stems.contains(stem) {
                continue;
            }
            broken.push(BrokenLink {
                file: relative(notes, path),
                suggestion: renames.get(target.as_str()).map(|s| s.to_string()),
                target,
            });
        }
    }
    Ok(LinkCheckReport {
        notes_scanned: files.len(),
        links_checked,
        broken,
    })
}

pub fn check_links(ws: &Workspace) -> anyhow::Result<LinkCheckReport> {
    check_links_in(&ws.notes_dir(), &ws.config.links)
}
