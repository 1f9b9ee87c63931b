use crate::domain::config::McpConfig;
use crate::domain::models::{McpAnalysis, McpCleanReport, McpCleanupReport, McpServerState, RunMode};
use crate::services::settings::Workspace;
use crate::services::storage::{load_report, write_json_report};
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::path::Path;
use walkdir::WalkDir;

const EDITOR_SERVERS_KEY: &str = "mcpServers";

fn read_json(path: &Path) -> anyhow::Result<Option<Value>> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = std::fs::read_to_string(path)?;
    Ok(Some(serde_json::from_str(&raw)?))
}

fn server_states(map: &Map<String, Value>, source: &str) -> Vec<McpServerState> {
    map.iter()
        .map(|(name, settings)| McpServerState {
            name: name.clone(),
            enabled: settings
                .get("enabled")
                .and_then(Value::as_bool)
                .unwrap_or(true),
            source: source.to_string(),
        })
        .collect()
}

/// Servers from both configuration files. Malformed files are reported and skipped.
pub fn configured_servers(ws: &Workspace) -> (Vec<McpServerState>, Vec<String>) {
    let config = &ws.config.mcp;
    let mut servers = vec![];
    let mut errors = vec![];
    for (file, nested) in [(&config.servers_file, false), (&config.editor_file, true)] {
        match read_json(&ws.path(file)) {
            Ok(None) => tracing::debug!(file = %file, "config file not present"),
            Ok(Some(doc)) => {
                let map = if nested {
                    doc.get(EDITOR_SERVERS_KEY).and_then(Value::as_object)
                } else {
                    doc.as_object()
                };
                if let Some(map) = map {
                    servers.extend(server_states(map, file));
                }
            }
            Err(e) => {
                tracing::warn!(file = %file, error = %e, "unreadable MCP config");
                errors.push(format!("{}: {}", file, e));
            }
        }
    }
    (servers, errors)
}

fn is_skipped_dir(name: &str) -> bool {
    name.starts_with('.') || name == "target"
}

/// Every capture group of every pattern, across source files with the configured extensions.
pub fn referenced_servers(root: &Path, config: &McpConfig) -> anyhow::Result<BTreeSet<String>> {
    let patterns = config
        .reference_patterns
        .iter()
        .map(|p| Regex::new(p))
        .collect::<Result<Vec<_>, _>>()?;
    let mut found = BTreeSet::new();
    let walker = WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_skipped_dir(&e.file_name().to_string_lossy()));
    for entry in walker.filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        let ext_ok = entry
            .path()
            .extension()
            .map(|x| config.extensions.iter().any(|e| x == e.as_str()))
            .unwrap_or(false);
        if !ext_ok {
            continue;
        }
        let Ok(text) = std::fs::read_to_string(entry.path()) else {
            continue;
        };
        for re in &patterns {
            for caps in re.captures_iter(&text) {
                for m in caps.iter().skip(1).flatten() {
                    if !m.as_str().is_empty() {
                        found.insert(m.as_str().to_string());
                    }
                }
            }
        }
    }
    Ok(found)
}

pub fn analyze(ws: &Workspace) -> anyhow::Result<McpAnalysis> {
    let config = &ws.config.mcp;
    let (servers, errors) = configured_servers(ws);
    let configured: BTreeSet<String> = servers.iter().map(|s| s.name.clone()).collect();
    let referenced = referenced_servers(&ws.root, config)?;
    let unused: Vec<String> = configured.difference(&referenced).cloned().collect();
    let report = McpCleanupReport {
        total_configured: configured.len(),
        total_referenced: referenced.len(),
        total_unused: unused.len(),
        servers_to_remove: unused,
        essential: config.essential.clone(),
    };
    let path = ws.notes_dir().join(&config.report_file);
    write_json_report(&path, &report)?;
    Ok(McpAnalysis {
        path: ws.display(&path),
        servers,
        referenced: referenced.into_iter().collect(),
        report,
        errors,
    })
}

fn remove_keys(map: &mut Map<String, Value>, names: &[String]) -> Vec<String> {
    names
        .iter()
        .filter(|n| map.shift_remove(n.as_str()).is_some())
        .cloned()
        .collect()
}

fn disable_optional(map: &mut Map<String, Value>, optional: &[String]) -> Vec<String> {
    let mut disabled = vec![];
    for name in optional {
        if let Some(Value::Object(settings)) = map.get_mut(name) {
            let enabled = settings
                .get("enabled")
                .and_then(Value::as_bool)
                .unwrap_or(true);
            if enabled {
                settings.insert("enabled".to_string(), Value::Bool(false));
                disabled.push(name.clone());
            }
        }
    }
    disabled
}

fn push_unique(into: &mut Vec<String>, items: Vec<String>) {
    for i in items {
        if !into.contains(&i) {
            into.push(i);
        }
    }
}

/// Remove unused servers and/or disable optional ones. Neither flag means both.
pub fn clean(
    ws: &Workspace,
    remove: bool,
    disable: bool,
    execute: bool,
    confirm: impl FnOnce() -> anyhow::Result<()>,
) -> anyhow::Result<McpCleanReport> {
    let config = &ws.config.mcp;
    let (remove, disable) = if remove || disable {
        (remove, disable)
    } else {
        (true, true)
    };
    let report: McpCleanupReport = load_report(&ws.notes_dir().join(&config.report_file))?;
    let mut out = McpCleanReport {
        mode: if execute { RunMode::Executed } else { RunMode::DryRun },
        removed: vec![],
        disabled: vec![],
        files_written: vec![],
        errors: vec![],
    };
    let mut pending: Vec<(String, Value)> = vec![];

    for (file, nested) in [(&config.servers_file, false), (&config.editor_file, true)] {
        let mut doc = match read_json(&ws.path(file)) {
            Ok(Some(doc)) => doc,
            Ok(None) => continue,
            Err(e) => {
                out.errors.push(format!("{}: {}", file, e));
                continue;
            }
        };
        let map = if nested {
            doc.get_mut(EDITOR_SERVERS_KEY).and_then(Value::as_object_mut)
        } else {
            doc.as_object_mut()
        };
        let Some(map) = map else { continue };
        let mut touched = false;
        if remove {
            let removed = remove_keys(map, &report.servers_to_remove);
            touched |= !removed.is_empty();
            push_unique(&mut out.removed, removed);
        }
        if disable && !nested {
            let disabled = disable_optional(map, &config.optional);
            touched |= !disabled.is_empty();
            push_unique(&mut out.disabled, disabled);
        }
        if touched {
            pending.push((file.clone(), doc));
        }
    }

    if !execute || pending.is_empty() {
        return Ok(out);
    }
    confirm()?;
    for (file, doc) in pending {
        write_json_report(&ws.path(&file), &doc)?;
        out.files_written.push(file);
    }
    Ok(out)
}
