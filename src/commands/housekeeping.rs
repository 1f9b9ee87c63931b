use crate::services::{mcp, mirror, organize};
use crate::*;

pub fn handle_mirror_command(cli: &Cli, ws: &Workspace) -> anyhow::Result<bool> {
    let Commands::Mirror = &cli.command else {
        return Ok(false);
    };

    let report = mirror::mirror(ws);
    print_one(cli.json, report, |r| {
        let mut out: Vec<String> = r
            .entries
            .iter()
            .map(|e| {
                let tag = match e.status {
                    MirrorStatus::New => "new",
                    MirrorStatus::Updated => "updated",
                    MirrorStatus::UpToDate => "up to date",
                    MirrorStatus::Missing => "missing",
                    MirrorStatus::Error => "error",
                };
                match &e.message {
                    Some(m) => format!("{:<10} {} ({})", tag, e.destination, m),
                    None => format!("{:<10} {}", tag, e.destination),
                }
            })
            .collect();
        out.push(format!(
            "{} new, {} updated, {} up to date, {} missing, {} errors",
            r.new, r.updated, r.up_to_date, r.missing, r.errors
        ));
        out.join("\n")
    })?;
    Ok(true)
}

pub fn handle_organize_command(cli: &Cli, ws: &Workspace) -> anyhow::Result<bool> {
    let Commands::Organize { execute } = &cli.command else {
        return Ok(false);
    };

    let report = organize::organize(ws, *execute);
    print_one(cli.json, report, |r| {
        let mut out: Vec<String> = r.entries.iter().map(organize::move_row).collect();
        out.push(format!(
            "{} moved, {} skipped, {} errors",
            r.moved, r.skipped, r.errors
        ));
        if r.mode == RunMode::DryRun {
            out.push("dry run, re-run with --execute to move the files".to_string());
        }
        out.join("\n")
    })?;
    Ok(true)
}

fn analysis_lines(a: &McpAnalysis) -> String {
    let mut out = vec![format!("configured servers: {}", a.report.total_configured)];
    out.extend(a.servers.iter().map(|s| {
        let state = if s.enabled { "enabled" } else { "disabled" };
        format!("  {:<20} {:<9} {}", s.name, state, s.source)
    }));
    out.push(format!("referenced in code: {}", a.report.total_referenced));
    out.extend(a.referenced.iter().map(|r| format!("  {}", r)));
    if a.report.servers_to_remove.is_empty() {
        out.push("no unused servers".to_string());
    } else {
        out.push(format!("unused ({}):", a.report.total_unused));
        out.extend(a.report.servers_to_remove.iter().map(|s| format!("  {}", s)));
    }
    out.extend(a.errors.iter().map(|e| format!("error: {}", e)));
    out.push(format!("report saved to {}", a.path));
    out.join("\n")
}

fn clean_lines(r: &McpCleanReport) -> String {
    let dry = r.mode == RunMode::DryRun;
    let (rm, off) = if dry {
        ("would remove", "would disable")
    } else {
        ("removed", "disabled")
    };
    let mut out: Vec<String> = r.removed.iter().map(|s| format!("{:<13} {}", rm, s)).collect();
    out.extend(r.disabled.iter().map(|s| format!("{:<13} {}", off, s)));
    out.extend(r.errors.iter().map(|e| format!("error: {}", e)));
    if dry {
        out.push("dry run, re-run with --execute to write the changes".to_string());
    } else if r.files_written.is_empty() {
        out.push("nothing to change".to_string());
    } else {
        out.push(format!("wrote {}", r.files_written.join(", ")));
    }
    out.join("\n")
}

pub fn handle_mcp_commands(cli: &Cli, ws: &Workspace) -> anyhow::Result<bool> {
    let Commands::Mcp { command } = &cli.command else {
        return Ok(false);
    };

    match command {
        McpCommands::Analyze => {
            let analysis = mcp::analyze(ws)?;
            print_one(cli.json, analysis, analysis_lines)?;
        }
        McpCommands::Clean {
            remove,
            disable,
            execute,
        } => {
            let report = mcp::clean(ws, *remove, *disable, *execute, || {
                confirm_stdin(
                    &ws.config.containers.confirm_phrase,
                    "About to rewrite the MCP configuration files.",
                )
            })?;
            print_one(cli.json, report, clean_lines)?;
        }
    }

    Ok(true)
}
