use crate::domain::config::ProviderConfig;
use crate::domain::models::{ProviderReport, ProviderStatus};
use crate::error::UpkeepError;
use crate::services::settings::Workspace;
use crate::services::storage::write_if_changed;
use std::path::Path;

/// Insert `line` after the first line containing one of `anchors` (tried in order).
fn insert_after_line(text: &str, anchors: &[String], line: &str) -> Option<String> {
    for anchor in anchors {
        let mut offset = 0;
        for l in text.split_inclusive('\n') {
            offset += l.len();
            if l.contains(anchor.as_str()) {
                let mut out = String::with_capacity(text.len() + line.len() + 2);
                out.push_str(&text[..offset]);
                if !l.ends_with('\n') {
                    out.push('\n');
                }
                out.push_str(line);
                out.push('\n');
                out.push_str(&text[offset..]);
                return Some(out);
            }
        }
    }
    None
}

fn insert_before(text: &str, anchors: &[String], block: &str) -> Option<String> {
    anchors.iter().find_map(|anchor| {
        text.find(anchor.as_str()).map(|idx| {
            let mut out = String::with_capacity(text.len() + block.len());
            out.push_str(&text[..idx]);
            out.push_str(block);
            out.push_str(&text[idx..]);
            out
        })
    })
}

/// Returns the patched text and whether the import line went in.
pub fn patch_provider(
    text: &str,
    config: &ProviderConfig,
    path: &Path,
) -> anyhow::Result<Option<(String, bool)>> {
    let lowered = text.to_lowercase();
    if config
        .markers
        .iter()
        .any(|m| lowered.contains(&m.to_lowercase()))
    {
        return Ok(None);
    }
    let (with_import, import_inserted) =
        match insert_after_line(text, &config.import_anchors, &config.import_line) {
            Some(t) => (t, true),
            None => {
                tracing::warn!("no import anchor found, import line not inserted");
                (text.to_string(), false)
            }
        };
    let patched = insert_before(&with_import, &config.block_anchors, &config.block)
        .ok_or_else(|| UpkeepError::InsertionPointMissing(path.to_path_buf()))?;
    Ok(Some((patched, import_inserted)))
}

pub fn add_provider(ws: &Workspace, dry_run: bool) -> anyhow::Result<ProviderReport> {
    let config = &ws.config.provider;
    let path = ws.path(&config.file);
    let mut report = ProviderReport {
        file: config.file.clone(),
        status: ProviderStatus::Missing,
        import_inserted: false,
        hints: config.hints.clone(),
    };
    if !path.exists() {
        tracing::warn!(file = %config.file, "provider file not found");
        return Ok(report);
    }
    let original = std::fs::read_to_string(&path)?;
    match patch_provider(&original, config, &path)? {
        None => report.status = ProviderStatus::Present,
        Some((patched, import_inserted)) => {
            report.import_inserted = import_inserted;
            if dry_run {
                report.status = ProviderStatus::WouldAdd;
            } else {
                write_if_changed(&path, &original, &patched)?;
                report.status = ProviderStatus::Added;
            }
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::Config;
    use tempfile::TempDir;

    const CHAINS: &str = "from langchain_aws import ChatBedrock\nimport os\n\ndef load_llm(llm_name):\n    if llm_name == \"gpt-4\":\n        return 1\n    elif len(llm_name):\n        return 2\n";

    fn workspace(tmp: &TempDir) -> Workspace {
        Workspace {
            root: tmp.path().to_path_buf(),
            config: Config::default(),
        }
    }

    #[test]
    fn inserts_import_and_block_once() {
        let tmp = TempDir::new().unwrap();
        let ws = workspace(&tmp);
        let path = ws.path(&ws.config.provider.file);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, CHAINS).unwrap();

        let report = add_provider(&ws, false).unwrap();
        assert_eq!(report.status, ProviderStatus::Added);
        assert!(report.import_inserted);

        let patched = std::fs::read_to_string(&path).unwrap();
        assert!(patched.starts_with(
            "from langchain_aws import ChatBedrock\nfrom langchain_google_genai import ChatGoogleGenerativeAI\n"
        ));
        let block_at = patched.find("    elif llm_name in [\"gemini\"").unwrap();
        let anchor_at = patched.find("    elif len(llm_name):").unwrap();
        assert!(block_at < anchor_at);

        let again = add_provider(&ws, false).unwrap();
        assert_eq!(again.status, ProviderStatus::Present);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), patched);
    }

    #[test]
    fn missing_block_anchor_is_an_error_and_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let ws = workspace(&tmp);
        let path = ws.path(&ws.config.provider.file);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "print('hi')\n").unwrap();

        let err = add_provider(&ws, false).unwrap_err();
        assert_eq!(crate::error::error_code(&err), "INSERTION_POINT_MISSING");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "print('hi')\n");
    }

    #[test]
    fn missing_file_reports_missing() {
        let tmp = TempDir::new().unwrap();
        let report = add_provider(&workspace(&tmp), true).unwrap();
        assert_eq!(report.status, ProviderStatus::Missing);
    }
}
