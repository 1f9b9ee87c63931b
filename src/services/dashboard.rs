use crate::domain::config::DashboardConfig;
use crate::domain::models::DashboardStatus;
use crate::error::UpkeepError;
use std::process::{Command, ExitStatus};
use std::time::Duration;

const CHECK_TIMEOUT: Duration = Duration::from_secs(2);
const OPENERS: &[&str] = &["xdg-open", "open"];

pub fn dashboard_url(config: &DashboardConfig) -> String {
    format!("http://localhost:{}", config.port)
}

pub fn streamlit_args(config: &DashboardConfig) -> Vec<String> {
    vec![
        "-m".to_string(),
        "streamlit".to_string(),
        "run".to_string(),
        config.script.clone(),
        format!("--server.port={}", config.port),
        format!("--server.address={}", config.address),
    ]
}

pub fn is_up(url: &str) -> bool {
    let client = match reqwest::blocking::Client::builder()
        .timeout(CHECK_TIMEOUT)
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(error = %e, "http client unavailable");
            return false;
        }
    };
    match client.get(url).send() {
        Ok(resp) => resp.status().is_success(),
        Err(e) => {
            tracing::debug!(url, error = %e, "dashboard not reachable");
            false
        }
    }
}

/// Open `url` with the first platform opener found on PATH.
pub fn open_in_browser(url: &str) -> bool {
    let Some(opener) = OPENERS.iter().find_map(|o| which::which(o).ok()) else {
        tracing::warn!("no browser opener found on PATH");
        return false;
    };
    match Command::new(&opener).arg(url).spawn() {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!(opener = %opener.display(), error = %e, "failed to launch opener");
            false
        }
    }
}

pub fn open(config: &DashboardConfig) -> DashboardStatus {
    let url = dashboard_url(config);
    let running = is_up(&url);
    let opened = open_in_browser(&url);
    DashboardStatus {
        url,
        running,
        opened,
    }
}

fn check_exit(python: &str, status: ExitStatus) -> anyhow::Result<()> {
    if status.success() {
        return Ok(());
    }
    Err(UpkeepError::ToolFailed {
        tool: python.to_string(),
        action: "streamlit".to_string(),
        stderr: format!("dashboard exited with {}", status),
    }
    .into())
}

/// Run the dashboard in the foreground; with `open_browser` the page is opened once it starts.
pub fn run(
    root: &std::path::Path,
    python: &str,
    config: &DashboardConfig,
    open_browser: bool,
) -> anyhow::Result<()> {
    let mut cmd = Command::new(python);
    cmd.args(streamlit_args(config)).current_dir(root);
    tracing::debug!(python, script = %config.script, "starting dashboard");
    let spawn_err = |e: std::io::Error| -> anyhow::Error {
        if e.kind() == std::io::ErrorKind::NotFound {
            UpkeepError::ToolMissing(python.to_string()).into()
        } else {
            e.into()
        }
    };
    if !open_browser {
        let status = cmd.status().map_err(spawn_err)?;
        return check_exit(python, status);
    }
    let mut child = cmd.spawn().map_err(spawn_err)?;
    std::thread::sleep(Duration::from_secs(config.startup_wait_secs));
    let url = dashboard_url(config);
    if !is_up(&url) {
        tracing::warn!(url = %url, "dashboard not answering yet");
    }
    if !open_in_browser(&url) {
        eprintln!("open {} in your browser", url);
    }
    let status = child.wait()?;
    check_exit(python, status)
}
