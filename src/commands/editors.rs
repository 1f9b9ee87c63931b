use crate::services::{envfile, imports, links, provider, rename};
use crate::*;

fn edit_lines(s: &EditSummary) -> String {
    let mut lines: Vec<String> = s.files.iter().map(edit_row).collect();
    lines.push(summary_line(s));
    lines.join("\n")
}

pub fn handle_imports_commands(cli: &Cli, ws: &Workspace) -> anyhow::Result<bool> {
    let Commands::Imports { command } = &cli.command else {
        return Ok(false);
    };

    match command {
        ImportsCommands::Fix { dry_run } => {
            let summary = imports::fix_imports(ws, *dry_run)?;
            print_one(cli.json, summary, edit_lines)?;
        }
    }

    Ok(true)
}

pub fn handle_links_commands(cli: &Cli, ws: &Workspace) -> anyhow::Result<bool> {
    let Commands::Links { command } = &cli.command else {
        return Ok(false);
    };

    match command {
        LinksCommands::Fix { dry_run } => {
            let report = links::fix_links(ws, *dry_run)?;
            let verb = if *dry_run { "would create" } else { "created" };
            print_one(cli.json, report, |r| {
                let mut out = vec![edit_lines(&r.edits)];
                out.extend(r.created.iter().map(|c| format!("{:<13} {}", verb, c)));
                out.join("\n")
            })?;
        }
        LinksCommands::Check => {
            let report = links::check_links(ws)?;
            print_one(cli.json, report, |r| {
                let mut out: Vec<String> = r
                    .broken
                    .iter()
                    .map(|b| match &b.suggestion {
                        Some(s) => format!("{}: [[{}]] -> [[{}]]", b.file, b.target, s),
                        None => format!("{}: [[{}]]", b.file, b.target),
                    })
                    .collect();
                out.push(format!(
                    "{} notes, {} links, {} broken",
                    r.notes_scanned,
                    r.links_checked,
                    r.broken.len()
                ));
                out.join("\n")
            })?;
        }
    }

    Ok(true)
}

pub fn handle_rename_command(cli: &Cli, ws: &Workspace) -> anyhow::Result<bool> {
    let Commands::Rename {
        name,
        short_name,
        description,
        dry_run,
    } = &cli.command
    else {
        return Ok(false);
    };

    let overrides = rename::RenameOverrides {
        name: name.clone(),
        short_name: short_name.clone(),
        description: description.clone(),
    };
    let summary = rename::rename_project(ws, &overrides, *dry_run)?;
    print_one(cli.json, summary, edit_lines)?;
    Ok(true)
}

pub fn handle_provider_commands(cli: &Cli, ws: &Workspace) -> anyhow::Result<bool> {
    let Commands::Provider { command } = &cli.command else {
        return Ok(false);
    };

    match command {
        ProviderCommands::Add { dry_run } => {
            let report = provider::add_provider(ws, *dry_run)?;
            print_one(cli.json, report, |r| {
                let head = match r.status {
                    ProviderStatus::Missing => format!("{} not found, nothing to do", r.file),
                    ProviderStatus::Present => format!("{} already registers the provider", r.file),
                    ProviderStatus::Added => format!("provider added to {}", r.file),
                    ProviderStatus::WouldAdd => format!("would add provider to {}", r.file),
                };
                if matches!(r.status, ProviderStatus::Added | ProviderStatus::WouldAdd) {
                    let mut out = vec![head, "add to your env file:".to_string()];
                    out.extend(r.hints.iter().map(|h| format!("  {}", h)));
                    out.join("\n")
                } else {
                    head
                }
            })?;
        }
    }

    Ok(true)
}

fn env_report_lines(r: &EnvReport) -> String {
    let mut out: Vec<String> = r
        .keys
        .iter()
        .map(|k| match k.status {
            EnvKeyStatus::Updated => format!("updated    {}={}", k.key, k.display),
            EnvKeyStatus::Appended => format!("appended   {}={}", k.key, k.display),
            EnvKeyStatus::Commented => format!("commented  {}", k.key),
            EnvKeyStatus::NotFound => format!("not found  {}", k.key),
        })
        .collect();
    out.push(if r.changed {
        format!("{} written", r.file)
    } else {
        format!("{} unchanged", r.file)
    });
    out.join("\n")
}

fn env_check_lines(r: &EnvCheckReport) -> String {
    let mut out = vec![];
    let mut group = "";
    for item in &r.items {
        if item.group != group {
            group = item.group.as_str();
            out.push(format!("[{}]", group));
        }
        if item.configured {
            out.push(format!("  ok       {} = {}", item.name, item.display));
        } else {
            out.push(format!(
                "  missing  {} ({}) needed by: {}",
                item.name,
                item.description,
                item.required_for.join(", ")
            ));
        }
    }
    out.push(format!(
        "{}/{} configured ({:.1}%), {} missing",
        r.configured, r.total, r.percent, r.missing
    ));
    out.join("\n")
}

pub fn handle_env_commands(cli: &Cli, ws: &Workspace) -> anyhow::Result<bool> {
    let Commands::Env { command } = &cli.command else {
        return Ok(false);
    };

    match command {
        EnvCommands::Apply => {
            let report = envfile::env_apply(ws)?;
            print_one(cli.json, report, env_report_lines)?;
        }
        EnvCommands::Set {
            assignments,
            comment,
        } => {
            let report = envfile::env_set(ws, assignments, comment)?;
            print_one(cli.json, report, env_report_lines)?;
        }
        EnvCommands::Check => {
            let report = envfile::env_check(ws)?;
            print_one(cli.json, report, env_check_lines)?;
        }
    }

    Ok(true)
}
