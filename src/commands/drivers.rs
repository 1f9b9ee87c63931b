use crate::services::containers::{self, Removal};
use crate::services::storage::write_json_report;
use crate::services::{dashboard, deps, git};
use crate::*;

fn runner(ws: &Workspace) -> SystemRunner {
    SystemRunner {
        cwd: Some(ws.root.clone()),
    }
}

pub fn handle_git_commands(cli: &Cli, ws: &Workspace) -> anyhow::Result<bool> {
    let Commands::Git { command } = &cli.command else {
        return Ok(false);
    };

    match command {
        GitCommands::Sync { message } => {
            let report = git::sync(
                &runner(ws),
                &ws.tool(Tool::Git),
                &ws.config.git,
                message.as_deref(),
            )?;
            print_one(cli.json, report, |r| match r.status {
                GitSyncStatus::Clean => "nothing to commit, working tree clean".to_string(),
                GitSyncStatus::Pushed => {
                    let mut out: Vec<String> = r.changes.iter().map(|c| format!("  {}", c)).collect();
                    out.push(format!(
                        "pushed {} to {}",
                        r.branch.as_deref().unwrap_or_default(),
                        ws.config.git.remote
                    ));
                    out.extend(r.remotes.iter().cloned());
                    if let Some(url) = &r.web_url {
                        out.push(format!("web: {}", url));
                    }
                    out.join("\n")
                }
            })?;
        }
    }

    Ok(true)
}

fn cleanup_lines(r: &CleanupReport) -> String {
    let mut out: Vec<String> = r.actions.iter().map(containers::action_row).collect();
    out.push(match r.mode {
        RunMode::DryRun if r.candidates > 0 => format!(
            "{} candidate(s); dry run, re-run with --execute to remove",
            r.candidates
        ),
        RunMode::DryRun => "no candidates".to_string(),
        RunMode::Executed => format!("removed {}/{}", r.removed, r.candidates),
    });
    out.join("\n")
}

fn confirm_removal(ws: &Workspace, count: usize) -> impl FnOnce() -> anyhow::Result<()> + '_ {
    move || {
        confirm_stdin(
            &ws.config.containers.confirm_phrase,
            &format!("About to remove {} container(s).", count),
        )
    }
}

pub fn handle_containers_commands(cli: &Cli, ws: &Workspace) -> anyhow::Result<bool> {
    let Commands::Containers { command } = &cli.command else {
        return Ok(false);
    };

    let runner = runner(ws);
    let docker = ws.tool(Tool::Docker);
    let config = &ws.config.containers;
    let records = containers::list_containers(&runner, &docker)?;

    match command {
        ContainersCommands::Stats => {
            let stats = containers::container_stats(&records, config);
            print_one(cli.json, stats, |s| {
                format!(
                    "total {}  running {}  exited {}\nproject {}  stopped {}  other {}\norphan candidates {}",
                    s.total, s.running, s.exited, s.project, s.stopped, s.other, s.orphan_candidates
                )
            })?;
        }
        ContainersCommands::Clean { execute } => {
            let candidates: Vec<_> = containers::orphan_candidates(&records, config)
                .into_iter()
                .map(|r| {
                    let detail = format!("{} ({})", r.image, r.status);
                    (r, detail)
                })
                .collect();
            let count = candidates.len();
            let report = containers::run_cleanup(
                &runner,
                &docker,
                candidates,
                Removal::StopThenRemove,
                *execute,
                confirm_removal(ws, count),
            )?;
            print_one(cli.json, report, cleanup_lines)?;
        }
        ContainersCommands::Prune {
            older_than_days,
            execute,
        } => {
            let candidates =
                containers::prune_candidates(&records, config, *older_than_days, chrono::Utc::now())?;
            let count = candidates.len();
            let report = containers::run_cleanup(
                &runner,
                &docker,
                candidates,
                Removal::Remove,
                *execute,
                confirm_removal(ws, count),
            )?;
            print_one(cli.json, report, cleanup_lines)?;
        }
        ContainersCommands::Migrate {
            remove_services,
            execute,
        } => {
            let candidates: Vec<_> = containers::migrate_candidates(&records, &config.migrate)
                .into_iter()
                .map(|r| {
                    let detail = format!("{} ({})", r.image, r.state);
                    (r, detail)
                })
                .collect();
            let count = candidates.len();
            let mut report = containers::run_cleanup(
                &runner,
                &docker,
                candidates,
                Removal::Force,
                *execute,
                confirm_removal(ws, count),
            )?;
            if *remove_services {
                let executed = report.mode == RunMode::Executed;
                if executed && count == 0 {
                    confirm_stdin(
                        &config.confirm_phrase,
                        "About to remove the legacy swarm services.",
                    )?;
                }
                report.actions.extend(containers::remove_services(
                    &runner,
                    &docker,
                    &config.migrate.services,
                    executed,
                ));
            }
            print_one(cli.json, report, cleanup_lines)?;
        }
        ContainersCommands::Report => {
            let report = containers::build_report(&records, config, chrono::Utc::now());
            let path = ws.notes_dir().join(&config.report_file);
            write_json_report(&path, &report)?;
            let written = ReportWritten {
                path: ws.display(&path),
                report,
            };
            print_one(cli.json, written, |w| {
                format!(
                    "{} containers, {} orphan candidate(s); report saved to {}",
                    w.report.stats.total,
                    w.report.orphan_candidates.len(),
                    w.path
                )
            })?;
        }
    }

    Ok(true)
}

pub fn handle_deps_commands(cli: &Cli, ws: &Workspace) -> anyhow::Result<bool> {
    let Commands::Deps { command } = &cli.command else {
        return Ok(false);
    };

    match command {
        DepsCommands::Install { groups } => {
            let report = deps::install(&runner(ws), &ws.tool(Tool::Python), &ws.config.deps, groups)?;
            let failed = report.failed;
            print_with_status(cli.json, failed == 0, report, |r| {
                let mut out: Vec<String> = r
                    .results
                    .iter()
                    .map(|i| match (i.ok, &i.message) {
                        (true, _) => format!("ok      [{}] {}", i.group, i.step),
                        (false, Some(m)) => format!("FAILED  [{}] {}: {}", i.group, i.step, m),
                        (false, None) => format!("FAILED  [{}] {}", i.group, i.step),
                    })
                    .collect();
                out.push(format!("{} installed, {} failed", r.installed, r.failed));
                out.join("\n")
            })?;
            if failed > 0 {
                return Err(UpkeepError::StepsFailed(failed).into());
            }
        }
    }

    Ok(true)
}

pub fn handle_dashboard_commands(cli: &Cli, ws: &Workspace) -> anyhow::Result<bool> {
    let Commands::Dashboard { command } = &cli.command else {
        return Ok(false);
    };

    match command {
        DashboardCommands::Run { open } => {
            dashboard::run(&ws.root, &ws.tool(Tool::Python), &ws.config.dashboard, *open)?;
        }
        DashboardCommands::Open => {
            let status = dashboard::open(&ws.config.dashboard);
            print_one(cli.json, status, |s| {
                let state = if s.running { "running" } else { "not responding" };
                if s.opened {
                    format!("{} ({}), opened in browser", s.url, state)
                } else {
                    format!("{} ({}); open it manually", s.url, state)
                }
            })?;
        }
    }

    Ok(true)
}
