use crate::domain::config::GitConfig;
use crate::domain::models::{GitSyncReport, GitSyncStatus};
use crate::services::process::{run_checked, tool_failure, ToolRunner};

const PUSH_HINT: &str = "check your credentials (gh auth login or a personal access token)";

/// `https://github.com/org/repo` for the first http(s) github remote.
pub fn github_web_url(remotes: &str) -> Option<String> {
    remotes
        .lines()
        .filter_map(|l| l.split_whitespace().nth(1))
        .find(|url| url.starts_with("http") && url.contains("github.com"))
        .map(|url| url.trim_end_matches(".git").to_string())
}

pub fn sync(
    runner: &dyn ToolRunner,
    git: &str,
    config: &GitConfig,
    message: Option<&str>,
) -> anyhow::Result<GitSyncReport> {
    let status = run_checked(runner, git, &["status", "--short"])?;
    let changes: Vec<String> = status
        .stdout
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.to_string())
        .collect();
    if changes.is_empty() {
        return Ok(GitSyncReport {
            status: GitSyncStatus::Clean,
            changes,
            committed: false,
            branch: None,
            remotes: vec![],
            web_url: None,
        });
    }
    tracing::info!(count = changes.len(), "staging changes");
    run_checked(runner, git, &["add", "-A"])?;

    let message = message.unwrap_or(&config.commit_message);
    let commit = runner.run(git, &["commit", "-m", message])?;
    let committed = if commit.success() {
        true
    } else if commit.combined().to_lowercase().contains("nothing to commit") {
        tracing::info!("nothing to commit");
        false
    } else {
        return Err(tool_failure(git, "commit", &commit));
    };

    let current = run_checked(runner, git, &["branch", "--show-current"])?;
    let branch = match current.stdout.trim() {
        "" => config.default_branch.clone(),
        b => b.to_string(),
    };

    let push = runner.run(git, &["push", config.remote.as_str(), branch.as_str()])?;
    if !push.success() && !push.combined().to_lowercase().contains("everything up-to-date") {
        return Err(tool_failure(git, "push", &push).context(PUSH_HINT));
    }

    let remotes_out = run_checked(runner, git, &["remote", "-v"])?;
    let remotes: Vec<String> = remotes_out
        .stdout
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.to_string())
        .collect();

    Ok(GitSyncReport {
        status: GitSyncStatus::Pushed,
        changes,
        committed,
        branch: Some(branch),
        web_url: github_web_url(&remotes_out.stdout),
        remotes,
    })
}
