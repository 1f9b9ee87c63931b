use crate::domain::config::RenameConfig;
use crate::domain::models::EditSummary;
use crate::services::settings::Workspace;
use crate::services::text_edit::{edit_file, Substitution};
use std::collections::BTreeMap;

#[derive(Debug, Default, Clone)]
pub struct RenameOverrides {
    pub name: Option<String>,
    pub short_name: Option<String>,
    pub description: Option<String>,
}

fn expand(template: &str, config: &RenameConfig, o: &RenameOverrides) -> String {
    let name = o.name.as_deref().unwrap_or(&config.name);
    let short = o.short_name.as_deref().unwrap_or(&config.short_name);
    let desc = o.description.as_deref().unwrap_or(&config.description);
    template
        .replace("{name}", name)
        .replace("{short_name}", short)
        .replace("{description}", desc)
}

/// Literal replacements grouped per file, keeping the configured order.
pub fn rename_plan(
    config: &RenameConfig,
    overrides: &RenameOverrides,
) -> anyhow::Result<Vec<(String, Vec<Substitution>)>> {
    let mut order: Vec<String> = vec![];
    let mut per_file: BTreeMap<String, Vec<Substitution>> = BTreeMap::new();
    for r in &config.replacements {
        if !per_file.contains_key(&r.file) {
            order.push(r.file.clone());
        }
        per_file
            .entry(r.file.clone())
            .or_default()
            .push(Substitution::literal(&r.from, &expand(&r.to, config, overrides))?);
    }
    Ok(order
        .into_iter()
        .map(|f| {
            let subs = per_file.remove(&f).unwrap_or_default();
            (f, subs)
        })
        .collect())
}

pub fn rename_project(
    ws: &Workspace,
    overrides: &RenameOverrides,
    dry_run: bool,
) -> anyhow::Result<EditSummary> {
    let mut summary = EditSummary::default();
    for (file, subs) in rename_plan(&ws.config.rename, overrides)? {
        summary.push(edit_file(&ws.path(&file), &file, &subs, dry_run));
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::Config;
    use crate::domain::models::EditStatus;
    use tempfile::TempDir;

    #[test]
    fn placeholders_and_overrides_apply_per_file() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("README.md"),
            "# MCP Agent System - Orchestrator\nclone IA-test\n",
        )
        .unwrap();
        let ws = Workspace {
            root: tmp.path().to_path_buf(),
            config: Config::default(),
        };
        let overrides = RenameOverrides {
            short_name: Some("orbit".into()),
            ..Default::default()
        };
        let summary = rename_project(&ws, &overrides, false).unwrap();

        let readme = std::fs::read_to_string(tmp.path().join("README.md")).unwrap();
        assert_eq!(readme, "# MCP Orchestrator\nclone orbit\n");
        assert_eq!(summary.files[0].status, EditStatus::Changed);
        assert!(summary.files[1..]
            .iter()
            .all(|f| f.status == EditStatus::Missing));

        let again = rename_project(&ws, &overrides, false).unwrap();
        assert_eq!(again.files[0].status, EditStatus::Unchanged);
    }
}
