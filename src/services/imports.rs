use crate::domain::config::ImportsConfig;
use crate::domain::models::EditSummary;
use crate::services::settings::Workspace;
use crate::services::text_edit::{edit_files, Substitution};

pub fn import_substitutions(config: &ImportsConfig) -> anyhow::Result<Vec<Substitution>> {
    config
        .rules
        .iter()
        .map(|r| Substitution::pattern(&r.pattern, &r.replacement))
        .collect()
}

pub fn fix_imports(ws: &Workspace, dry_run: bool) -> anyhow::Result<EditSummary> {
    let subs = import_substitutions(&ws.config.imports)?;
    tracing::debug!(rules = subs.len(), files = ws.config.imports.files.len(), "fixing imports");
    Ok(edit_files(&ws.root, &ws.config.imports.files, &subs, dry_run))
}
