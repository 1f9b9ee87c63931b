use crate::domain::config::{DepsConfig, PackageGroup};
use crate::domain::models::{InstallReport, InstallResult};
use crate::error::UpkeepError;
use crate::services::process::ToolRunner;

pub fn select_groups<'a>(config: &'a DepsConfig, names: &[String]) -> anyhow::Result<Vec<&'a PackageGroup>> {
    if names.is_empty() {
        return Ok(config.groups.iter().collect());
    }
    names
        .iter()
        .map(|n| {
            config
                .groups
                .iter()
                .find(|g| &g.name == n)
                .ok_or_else(|| UpkeepError::UnknownGroup(n.clone()).into())
        })
        .collect()
}

fn step(runner: &dyn ToolRunner, python: &str, group: &str, label: String, args: &[&str]) -> InstallResult {
    let (ok, message) = match runner.run(python, args) {
        Ok(out) if out.success() => (true, None),
        Ok(out) => {
            let last = out
                .stderr
                .lines()
                .rev()
                .find(|l| !l.trim().is_empty())
                .unwrap_or("non-zero exit")
                .to_string();
            (false, Some(last))
        }
        Err(e) => (false, Some(format!("{:#}", e))),
    };
    if !ok {
        tracing::warn!(group, step = %label, "install step failed");
    }
    InstallResult {
        group: group.to_string(),
        step: label,
        ok,
        message,
    }
}

/// `pip install` each package one by one, then the group's post steps. Failures do not stop the run.
pub fn install(
    runner: &dyn ToolRunner,
    python: &str,
    config: &DepsConfig,
    names: &[String],
) -> anyhow::Result<InstallReport> {
    let mut report = InstallReport::default();
    for group in select_groups(config, names)? {
        for package in &group.packages {
            let result = step(
                runner,
                python,
                &group.name,
                package.clone(),
                &["-m", "pip", "install", package.as_str()],
            );
            report.results.push(result);
        }
        for post in &group.post {
            let args: Vec<&str> = post.iter().map(String::as_str).collect();
            report
                .results
                .push(step(runner, python, &group.name, post.join(" "), &args));
        }
    }
    report.installed = report.results.iter().filter(|r| r.ok).count();
    report.failed = report.results.len() - report.installed;
    Ok(report)
}
