use crate::domain::config::{EnvAssign, EnvConfig};
use crate::domain::models::{EnvCheckItem, EnvCheckReport, EnvKeyReport, EnvKeyStatus, EnvReport};
use crate::error::UpkeepError;
use crate::services::settings::Workspace;
use crate::services::storage::write_if_changed;
use regex::Regex;
use std::collections::HashMap;

const SECRET_MARKERS: &[&str] = &["KEY", "URI", "PASSWORD", "SECRET", "TOKEN"];
const MASK_PREFIX: usize = 10;

pub fn mask_value(key: &str, value: &str) -> String {
    let upper = key.to_uppercase();
    if value.is_empty() || !SECRET_MARKERS.iter().any(|m| upper.contains(m)) {
        return value.to_string();
    }
    if value.chars().count() > MASK_PREFIX {
        format!("{}...", value.chars().take(MASK_PREFIX).collect::<String>())
    } else {
        "***".to_string()
    }
}

fn key_line(key: &str) -> anyhow::Result<Regex> {
    Ok(Regex::new(&format!(r"^\s*{}\s*=", regex::escape(key)))?)
}

/// Rewrite `KEY=value` lines in place, append missing keys, comment out `comment_keys`.
pub fn apply_assignments(
    text: &str,
    assignments: &[(String, String)],
    comment_keys: &[String],
) -> anyhow::Result<(String, Vec<EnvKeyReport>)> {
    let had_trailing = text.ends_with('\n');
    let mut lines: Vec<String> = text.split_terminator('\n').map(String::from).collect();
    let mut reports = vec![];
    let mut appended: Vec<String> = vec![];

    for (key, value) in assignments {
        let re = key_line(key)?;
        let mut found = false;
        for line in lines.iter_mut().filter(|l| re.is_match(l.as_str())) {
            *line = format!("{}={}", key, value);
            found = true;
        }
        if !found {
            appended.push(format!("{}={}", key, value));
        }
        reports.push(EnvKeyReport {
            key: key.clone(),
            status: if found {
                EnvKeyStatus::Updated
            } else {
                EnvKeyStatus::Appended
            },
            display: mask_value(key, value),
        });
    }

    for key in comment_keys {
        let re = key_line(key)?;
        let mut found = false;
        for line in lines.iter_mut().filter(|l| re.is_match(l.as_str())) {
            *line = format!("#{}", line);
            found = true;
        }
        reports.push(EnvKeyReport {
            key: key.clone(),
            status: if found {
                EnvKeyStatus::Commented
            } else {
                EnvKeyStatus::NotFound
            },
            display: String::new(),
        });
    }

    let mut out = lines.join("\n");
    if had_trailing {
        out.push('\n');
    }
    for line in appended {
        if !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(&line);
        out.push('\n');
    }
    Ok((out, reports))
}

pub fn parse_assignment(arg: &str) -> anyhow::Result<(String, String)> {
    match arg.split_once('=') {
        Some((k, v)) if !k.trim().is_empty() => Ok((k.trim().to_string(), v.to_string())),
        _ => Err(UpkeepError::InvalidAssignment(arg.to_string()).into()),
    }
}

fn resolve_assign(a: &EnvAssign) -> String {
    if let Some(v) = &a.value {
        return v.clone();
    }
    a.from_env
        .as_deref()
        .and_then(|var| std::env::var(var).ok())
        .filter(|v| !v.is_empty())
        .or_else(|| a.default.clone())
        .unwrap_or_default()
}

pub fn configured_assignments(config: &EnvConfig) -> Vec<(String, String)> {
    config
        .assign
        .iter()
        .map(|a| (a.key.clone(), resolve_assign(a)))
        .collect()
}

/// Current env file content, seeded from the template when the file does not exist yet.
fn current_content(ws: &Workspace) -> anyhow::Result<String> {
    let path = ws.path(&ws.config.env.file);
    if path.exists() {
        return Ok(std::fs::read_to_string(&path)?);
    }
    if let Some(template) = &ws.config.env.template {
        let template = ws.path(template);
        if template.exists() {
            tracing::info!(template = %template.display(), "seeding env file from template");
            return Ok(std::fs::read_to_string(&template)?);
        }
    }
    Ok(String::new())
}

pub fn write_env(
    ws: &Workspace,
    assignments: &[(String, String)],
    comment_keys: &[String],
) -> anyhow::Result<EnvReport> {
    let path = ws.path(&ws.config.env.file);
    let original = if path.exists() {
        std::fs::read_to_string(&path)?
    } else {
        String::new()
    };
    let base = current_content(ws)?;
    let (updated, keys) = apply_assignments(&base, assignments, comment_keys)?;
    let changed = if path.exists() {
        write_if_changed(&path, &original, &updated)?
    } else {
        std::fs::write(&path, &updated)?;
        true
    };
    Ok(EnvReport {
        file: ws.config.env.file.clone(),
        changed,
        keys,
    })
}

pub fn env_apply(ws: &Workspace) -> anyhow::Result<EnvReport> {
    let assignments = configured_assignments(&ws.config.env);
    write_env(ws, &assignments, &ws.config.env.comment)
}

pub fn env_set(ws: &Workspace, args: &[String], comment: &[String]) -> anyhow::Result<EnvReport> {
    let assignments = args
        .iter()
        .map(|a| parse_assignment(a))
        .collect::<anyhow::Result<Vec<_>>>()?;
    write_env(ws, &assignments, comment)
}

/// `KEY=value` pairs of an env file; comments skipped, surrounding quotes stripped.
pub fn parse_env(text: &str) -> HashMap<String, String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .filter_map(|l| l.split_once('='))
        .map(|(k, v)| {
            let v = v.trim();
            let v = v
                .strip_prefix('"')
                .and_then(|s| s.strip_suffix('"'))
                .or_else(|| v.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))
                .unwrap_or(v);
            (k.trim().to_string(), v.to_string())
        })
        .collect()
}

pub fn is_configured(value: &str, placeholder_prefixes: &[String]) -> bool {
    !value.is_empty()
        && value != "password"
        && !placeholder_prefixes
            .iter()
            .any(|p| value.starts_with(p.as_str()))
}

pub fn check_env_with(
    config: &EnvConfig,
    file_values: &HashMap<String, String>,
    lookup: impl Fn(&str) -> Option<String>,
) -> EnvCheckReport {
    let items: Vec<EnvCheckItem> = config
        .required
        .iter()
        .map(|req| {
            let value = lookup(&req.name)
                .filter(|v| !v.is_empty())
                .or_else(|| file_values.get(&req.name).cloned())
                .unwrap_or_default();
            EnvCheckItem {
                name: req.name.clone(),
                group: req.group.clone(),
                description: req.description.clone(),
                configured: is_configured(&value, &config.placeholder_prefixes),
                display: mask_value(&req.name, &value),
                required_for: req.required_for.clone(),
            }
        })
        .collect();
    let total = items.len();
    let configured = items.iter().filter(|i| i.configured).count();
    let percent = if total == 0 {
        0.0
    } else {
        (configured as f64 * 1000.0 / total as f64).round() / 10.0
    };
    EnvCheckReport {
        items,
        total,
        configured,
        missing: total - configured,
        percent,
    }
}

pub fn env_check(ws: &Workspace) -> anyhow::Result<EnvCheckReport> {
    let path = ws.path(&ws.config.env.file);
    let file_values = if path.exists() {
        parse_env(&std::fs::read_to_string(&path)?)
    } else {
        tracing::warn!(file = %ws.config.env.file, "env file not found");
        HashMap::new()
    };
    Ok(check_env_with(&ws.config.env, &file_values, |k| {
        std::env::var(k).ok()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::{Config, RequiredKey};
    use tempfile::TempDir;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn updates_in_place_and_appends_missing_keys() {
        let (out, keys) = apply_assignments(
            "KEY_A=old",
            &pairs(&[("KEY_A", "new"), ("KEY_B", "also_new")]),
            &[],
        )
        .unwrap();
        assert_eq!(out, "KEY_A=new\nKEY_B=also_new\n");
        assert_eq!(keys[0].status, EnvKeyStatus::Updated);
        assert_eq!(keys[1].status, EnvKeyStatus::Appended);
    }

    #[test]
    fn preserves_comments_blank_lines_and_order() {
        let text = "# header\n\nLLM=gpt-4\n#MONGODB_URI=old\nOTHER=1\n";
        let (out, _) = apply_assignments(text, &pairs(&[("LLM", "gemini-pro")]), &[]).unwrap();
        assert_eq!(out, "# header\n\nLLM=gemini-pro\n#MONGODB_URI=old\nOTHER=1\n");
    }

    #[test]
    fn commented_lines_are_not_assignments() {
        let (out, keys) =
            apply_assignments("#MONGODB_URI=old\n", &pairs(&[("MONGODB_URI", "x")]), &[]).unwrap();
        assert_eq!(out, "#MONGODB_URI=old\nMONGODB_URI=x\n");
        assert_eq!(keys[0].status, EnvKeyStatus::Appended);
    }

    #[test]
    fn comment_keys_are_prefixed_once() {
        let text = "NEON_DATABASE_URL=postgres://x\n";
        let comment = vec!["NEON_DATABASE_URL".to_string()];
        let (once, keys) = apply_assignments(text, &[], &comment).unwrap();
        assert_eq!(once, "#NEON_DATABASE_URL=postgres://x\n");
        assert_eq!(keys[0].status, EnvKeyStatus::Commented);
        let (twice, keys) = apply_assignments(&once, &[], &comment).unwrap();
        assert_eq!(twice, once);
        assert_eq!(keys[0].status, EnvKeyStatus::NotFound);
    }

    #[test]
    fn masks_secret_looking_keys() {
        assert_eq!(mask_value("GOOGLE_API_KEY", "abcdefghijklmnop"), "abcdefghij...");
        assert_eq!(mask_value("NEO4J_PASSWORD", "short"), "***");
        assert_eq!(mask_value("LLM", "gemini-pro-long-name"), "gemini-pro-long-name");
    }

    #[test]
    fn bad_assignment_is_rejected() {
        let err = parse_assignment("NOEQUALS").unwrap_err();
        assert_eq!(crate::error::error_code(&err), "INVALID_ARGUMENT");
        assert!(parse_assignment("=v").is_err());
        assert_eq!(
            parse_assignment("A=b=c").unwrap(),
            ("A".to_string(), "b=c".to_string())
        );
    }

    #[test]
    fn unchanged_env_file_is_not_rewritten() {
        let tmp = TempDir::new().unwrap();
        let ws = Workspace {
            root: tmp.path().to_path_buf(),
            config: Config::default(),
        };
        std::fs::write(tmp.path().join(".env"), "A=1\n").unwrap();
        let report = env_set(&ws, &["A=1".to_string()], &[]).unwrap();
        assert!(!report.changed);
        let report = env_set(&ws, &["A=2".to_string()], &[]).unwrap();
        assert!(report.changed);
        assert_eq!(std::fs::read_to_string(tmp.path().join(".env")).unwrap(), "A=2\n");
    }

    #[test]
    fn new_env_file_is_seeded_from_template() {
        let tmp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.env.assign = vec![EnvAssign {
            key: "LLM".into(),
            value: Some("gemini-pro".into()),
            from_env: None,
            default: None,
        }];
        std::fs::create_dir_all(tmp.path().join("config")).unwrap();
        std::fs::write(tmp.path().join("config/env.example"), "# sample\nLLM=gpt-4\n").unwrap();
        let ws = Workspace {
            root: tmp.path().to_path_buf(),
            config,
        };
        let report = env_apply(&ws).unwrap();
        assert!(report.changed);
        assert_eq!(
            std::fs::read_to_string(tmp.path().join(".env")).unwrap(),
            "# sample\nLLM=gemini-pro\n"
        );
    }

    #[test]
    fn check_treats_placeholders_as_missing() {
        let mut config = EnvConfig::default();
        config.required = ["NEO4J_URI", "NEO4J_PASSWORD", "LLM", "OPENAI_API_KEY"]
            .iter()
            .map(|n| RequiredKey {
                name: n.to_string(),
                description: String::new(),
                group: "critical".into(),
                required_for: vec![],
            })
            .collect();
        let file = parse_env(
            "NEO4J_URI=\"neo4j+s://abc.databases.neo4j.io\"\nNEO4J_PASSWORD=password\nOPENAI_API_KEY=your_key\n",
        );
        let report = check_env_with(&config, &file, |k| {
            (k == "LLM").then(|| "gpt-4".to_string())
        });
        assert_eq!(report.total, 4);
        assert_eq!(report.configured, 2);
        assert_eq!(report.missing, 2);
        assert_eq!(report.percent, 50.0);
        assert_eq!(report.items[0].display, "neo4j+s://...");
    }
}
