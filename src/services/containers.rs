use crate::domain::config::{ContainersConfig, MigrateConfig};
use crate::domain::models::{
    ActionStatus, CleanupReport, ContainerAction, ContainerRecord, ContainerReportFile,
    ContainerStats, RunMode,
};
use crate::error::UpkeepError;
use crate::services::process::{run_checked, tool_failure, ToolRunner};
use chrono::{DateTime, Duration, FixedOffset, Utc};

/// One JSON object per line; unparsable lines are skipped.
pub fn parse_records(stdout: &str) -> Vec<ContainerRecord> {
    stdout
        .lines()
        .filter(|l| !l.trim().is_empty())
        .filter_map(|l| match serde_json::from_str::<ContainerRecord>(l) {
            Ok(r) => Some(r),
            Err(e) => {
                tracing::warn!(error = %e, line = l, "skipping unparsable container line");
                None
            }
        })
        .collect()
}

pub fn list_containers(runner: &dyn ToolRunner, docker: &str) -> anyhow::Result<Vec<ContainerRecord>> {
    let out = run_checked(runner, docker, &["ps", "-a", "--format", "{{json .}}"])?;
    Ok(parse_records(&out.stdout))
}

pub fn is_important(name: &str, important: &[String]) -> bool {
    let lower = name.to_lowercase();
    important
        .iter()
        .any(|token| lower.contains(&token.to_lowercase()))
}

/// Random helper names look like `adjective_surname`: two purely alphabetic tokens.
pub fn is_orphan_candidate(name: &str, config: &ContainersConfig) -> bool {
    if is_important(name, &config.important) {
        return false;
    }
    let lower = name.to_lowercase();
    let tokens: Vec<&str> = lower.split('_').collect();
    tokens.len() == 2
        && tokens.iter().all(|t| {
            t.chars().count() >= config.min_token_len && t.chars().all(|c| c.is_ascii_alphabetic())
        })
}

pub fn orphan_candidates(records: &[ContainerRecord], config: &ContainersConfig) -> Vec<ContainerRecord> {
    records
        .iter()
        .filter(|r| is_orphan_candidate(&r.name, config))
        .cloned()
        .collect()
}

pub fn container_stats(records: &[ContainerRecord], config: &ContainersConfig) -> ContainerStats {
    let mut stats = ContainerStats {
        total: records.len(),
        ..Default::default()
    };
    for r in records {
        if r.is_running() {
            stats.running += 1;
        }
        if r.state == "exited" {
            stats.exited += 1;
        }
        let lower = r.name.to_lowercase();
        if config
            .project
            .iter()
            .any(|p| lower.contains(&p.to_lowercase()))
        {
            stats.project += 1;
        } else if r.status.starts_with("Exited") || r.status.starts_with("Created") {
            stats.stopped += 1;
        } else {
            stats.other += 1;
        }
        if is_orphan_candidate(&r.name, config) {
            stats.orphan_candidates += 1;
        }
    }
    stats
}

/// Parses docker's `2024-01-15 10:30:00 +0000 UTC`.
pub fn parse_created_at(raw: &str) -> Option<DateTime<FixedOffset>> {
    let head: Vec<&str> = raw.split_whitespace().take(3).collect();
    if head.len() < 3 {
        return None;
    }
    DateTime::parse_from_str(&head.join(" "), "%Y-%m-%d %H:%M:%S %z").ok()
}

pub fn prune_candidates(
    records: &[ContainerRecord],
    config: &ContainersConfig,
    older_than_days: i64,
    now: DateTime<Utc>,
) -> anyhow::Result<Vec<(ContainerRecord, String)>> {
    let cutoff = (older_than_days >= 0)
        .then(|| Duration::try_days(older_than_days))
        .flatten()
        .and_then(|age| now.checked_sub_signed(age))
        .ok_or_else(|| {
            UpkeepError::InvalidArgument(format!(
                "--older-than-days {} is out of range",
                older_than_days
            ))
        })?;
    let picked = records
        .iter()
        .filter(|r| !is_important(&r.name, &config.important))
        .filter_map(|r| {
            if r.is_stopped() {
                return Some((r.clone(), format!("stopped ({})", r.status)));
            }
            match parse_created_at(&r.created_at) {
                Some(created) if created.with_timezone(&Utc) < cutoff => Some((
                    r.clone(),
                    format!("older than {} days ({})", older_than_days, r.created_at),
                )),
                Some(_) => None,
                None => {
                    tracing::debug!(name = %r.name, created = %r.created_at, "unparsable CreatedAt");
                    None
                }
            }
        })
        .collect();
    Ok(picked)
}

pub fn is_migration_candidate(r: &ContainerRecord, config: &MigrateConfig) -> bool {
    let lower = r.name.to_lowercase();
    let has = |token: &String| lower.contains(&token.to_lowercase());
    if !config.legacy.iter().any(has) || has(&config.keep) {
        return false;
    }
    if config
        .swarm_prefixes
        .iter()
        .any(|p| lower.starts_with(&p.to_lowercase()))
    {
        return false;
    }
    let stopped_only = config.stopped_only.iter().any(has);
    !(stopped_only && r.is_running())
}

pub fn migrate_candidates(records: &[ContainerRecord], config: &MigrateConfig) -> Vec<ContainerRecord> {
    records
        .iter()
        .filter(|r| is_migration_candidate(r, config))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// `stop` when running, then `rm`.
    StopThenRemove,
    Remove,
    /// `stop` when running (best effort), then `rm -f`.
    Force,
}

fn action(r: &ContainerRecord, detail: String, status: ActionStatus, message: Option<String>) -> ContainerAction {
    ContainerAction {
        id: r.id.clone(),
        name: r.name.clone(),
        detail,
        status,
        message,
    }
}

fn remove_one(
    runner: &dyn ToolRunner,
    docker: &str,
    r: &ContainerRecord,
    removal: Removal,
) -> anyhow::Result<()> {
    if r.is_running() && removal != Removal::Remove {
        let out = runner.run(docker, &["stop", r.id.as_str()])?;
        if !out.success() {
            if removal == Removal::StopThenRemove {
                return Err(tool_failure(docker, "stop", &out));
            }
            tracing::warn!(name = %r.name, "stop failed, forcing removal");
        }
    }
    let args: Vec<&str> = match removal {
        Removal::Force => vec!["rm", "-f", r.id.as_str()],
        _ => vec!["rm", r.id.as_str()],
    };
    run_checked(runner, docker, &args)?;
    Ok(())
}

/// Dry run lists the plan; execute asks `confirm` once, then removes each candidate.
pub fn run_cleanup(
    runner: &dyn ToolRunner,
    docker: &str,
    candidates: Vec<(ContainerRecord, String)>,
    removal: Removal,
    execute: bool,
    confirm: impl FnOnce() -> anyhow::Result<()>,
) -> anyhow::Result<CleanupReport> {
    let total = candidates.len();
    if !execute || candidates.is_empty() {
        return Ok(CleanupReport {
            mode: if execute { RunMode::Executed } else { RunMode::DryRun },
            candidates: total,
            removed: 0,
            actions: candidates
                .into_iter()
                .map(|(r, d)| action(&r, d, ActionStatus::Planned, None))
                .collect(),
        });
    }
    confirm()?;
    let mut actions = Vec::with_capacity(total);
    let mut removed = 0;
    for (r, detail) in candidates {
        match remove_one(runner, docker, &r, removal) {
            Ok(()) => {
                removed += 1;
                tracing::info!(name = %r.name, "removed container");
                actions.push(action(&r, detail, ActionStatus::Removed, None));
            }
            Err(e) => {
                tracing::warn!(name = %r.name, error = %e, "removal failed");
                actions.push(action(&r, detail, ActionStatus::Failed, Some(format!("{:#}", e))));
            }
        }
    }
    Ok(CleanupReport {
        mode: RunMode::Executed,
        candidates: total,
        removed,
        actions,
    })
}

/// `docker service rm` for each configured legacy service; failures are recorded.
pub fn remove_services(
    runner: &dyn ToolRunner,
    docker: &str,
    services: &[String],
    execute: bool,
) -> Vec<ContainerAction> {
    services
        .iter()
        .map(|svc| {
            let base = ContainerRecord {
                id: svc.clone(),
                name: svc.clone(),
                ..Default::default()
            };
            if !execute {
                return action(&base, "service".into(), ActionStatus::Planned, None);
            }
            match run_checked(runner, docker, &["service", "rm", svc.as_str()]) {
                Ok(_) => action(&base, "service".into(), ActionStatus::Removed, None),
                Err(e) => action(
                    &base,
                    "service".into(),
                    ActionStatus::Failed,
                    Some(format!("{:#}", e)),
                ),
            }
        })
        .collect()
}

pub fn build_report(records: &[ContainerRecord], config: &ContainersConfig, now: DateTime<Utc>) -> ContainerReportFile {
    ContainerReportFile {
        generated_at: now.to_rfc3339(),
        stats: container_stats(records, config),
        orphan_candidates: orphan_candidates(records, config),
    }
}

pub fn action_row(a: &ContainerAction) -> String {
    let tag = match a.status {
        ActionStatus::Planned => "would remove",
        ActionStatus::Removed => "removed",
        ActionStatus::Failed => "FAILED",
    };
    match &a.message {
        Some(m) => format!("{:<12} {} [{}] {} ({})", tag, a.name, a.id, a.detail, m),
        None => format!("{:<12} {} [{}] {}", tag, a.name, a.id, a.detail),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::process::fake::FakeRunner;
    use chrono::TimeZone;

    fn rec(id: &str, name: &str, state: &str, status: &str, created: &str) -> ContainerRecord {
        ContainerRecord {
            id: id.into(),
            name: name.into(),
            image: "img".into(),
            status: status.into(),
            state: state.into(),
            created_at: created.into(),
        }
    }

    #[test]
    fn orphan_classification_matches_two_word_names() {
        let config = ContainersConfig::default();
        assert!(is_orphan_candidate("cool_chaplygin", &config));
        assert!(is_orphan_candidate("sad_beaver", &config));
        assert!(!is_orphan_candidate("ia-test-api", &config));
        assert!(!is_orphan_candidate("n8n_worker", &config));
        assert!(!is_orphan_candidate("ab_beaver", &config));
        assert!(!is_orphan_candidate("one_two_three", &config));
    }

    #[test]
    fn allowlisted_tokens_are_never_selected() {
        let config = ContainersConfig::default();
        for token in &config.important {
            for name in [
                format!("{}_beaver", token),
                format!("happy_{}", token),
                format!("x{}y_zzz", token.to_uppercase()),
            ] {
                assert!(!is_orphan_candidate(&name, &config), "{}", name);
            }
        }
    }

    #[test]
    fn parses_ps_lines_and_skips_garbage() {
        let out = "{\"ID\":\"a1\",\"Names\":\"cool_chaplygin\",\"Image\":\"alpine\",\"State\":\"exited\",\"Status\":\"Exited (0) 2 days ago\",\"CreatedAt\":\"2024-01-15 10:30:00 +0000 UTC\"}\nnot json\n";
        let records = parse_records(out);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "cool_chaplygin");
        assert!(records[0].is_stopped());
    }

    #[test]
    fn stats_categorise_project_stopped_other() {
        let config = ContainersConfig::default();
        let records = vec![
            rec("1", "ia-test-api", "running", "Up 2 hours", ""),
            rec("2", "cool_chaplygin", "exited", "Exited (0) 1 day ago", ""),
            rec("3", "grafana", "running", "Up 1 hour", ""),
        ];
        let stats = container_stats(&records, &config);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.running, 2);
        assert_eq!(stats.exited, 1);
        assert_eq!(stats.project, 1);
        assert_eq!(stats.stopped, 1);
        assert_eq!(stats.other, 1);
        assert_eq!(stats.orphan_candidates, 1);
    }

    #[test]
    fn prune_selects_stopped_and_old_but_not_important() {
        let config = ContainersConfig::default();
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let records = vec![
            rec("1", "grafana", "running", "Up", "2024-01-01 00:00:00 +0000 UTC"),
            rec("2", "fresh", "running", "Up", "2024-02-28 00:00:00 +0000 UTC"),
            rec("3", "postgres", "exited", "Exited", "2023-01-01 00:00:00 +0000 UTC"),
            rec("4", "leftover", "created", "Created", "2024-02-29 00:00:00 +0000 UTC"),
        ];
        let picked: Vec<String> = prune_candidates(&records, &config, 7, now)
            .unwrap()
            .into_iter()
            .map(|(r, _)| r.name)
            .collect();
        assert_eq!(picked, vec!["grafana", "leftover"]);
    }

    #[test]
    fn prune_rejects_negative_and_overflowing_ages() {
        let config = ContainersConfig::default();
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let records = vec![rec("1", "grafana", "running", "Up", "2024-02-29 23:00:00 +0000 UTC")];

        for days in [-1, 100_000_000, i64::MAX] {
            let err = prune_candidates(&records, &config, days, now).unwrap_err();
            assert_eq!(crate::error::error_code(&err), "INVALID_ARGUMENT", "{}", days);
        }
        assert!(prune_candidates(&records, &config, 0, now).unwrap().len() == 1);
    }

    #[test]
    fn configured_tokens_match_case_insensitively() {
        let config = ContainersConfig {
            project: vec!["IA-Test".into()],
            ..Default::default()
        };
        let stats = container_stats(&[rec("1", "ia-test-api", "running", "Up", "")], &config);
        assert_eq!(stats.project, 1);

        let migrate = MigrateConfig {
            legacy: vec!["IAImplementation-N8N".into()],
            keep: "Consolidated".into(),
            swarm_prefixes: vec!["Dokploy.1.".into()],
            stopped_only: vec![],
            services: vec![],
        };
        let records = vec![
            rec("1", "iaimplementation-n8n-1", "running", "Up", ""),
            rec("2", "iaimplementation-n8n-consolidated", "running", "Up", ""),
        ];
        let picked: Vec<String> = migrate_candidates(&records, &migrate)
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(picked, vec!["iaimplementation-n8n-1"]);
    }

    #[test]
    fn migration_respects_keep_swarm_and_stopped_only() {
        let config = MigrateConfig::default();
        let records = vec![
            rec("1", "iaimplementation-n8n-1", "running", "Up", ""),
            rec("2", "iaimplementation-n8n-consolidated", "running", "Up", ""),
            rec("3", "dokploy.1.xyz", "exited", "Exited", ""),
            rec("4", "dokploy-postgres", "running", "Up", ""),
            rec("5", "dokploy-redis", "exited", "Exited", ""),
        ];
        let picked: Vec<String> = migrate_candidates(&records, &config)
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(picked, vec!["iaimplementation-n8n-1", "dokploy-redis"]);
    }

    #[test]
    fn dry_run_never_touches_the_runtime() {
        let runner = FakeRunner::new();
        let candidates = vec![(rec("a", "cool_chaplygin", "running", "Up", ""), "x".to_string())];
        let report = run_cleanup(&runner, "docker", candidates, Removal::StopThenRemove, false, || {
            panic!("dry run must not prompt")
        })
        .unwrap();
        assert_eq!(report.mode, RunMode::DryRun);
        assert_eq!(report.actions[0].status, ActionStatus::Planned);
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn execute_stops_running_then_removes_and_continues_on_failure() {
        let runner = FakeRunner::new();
        runner.ok("").ok("").push(1, "", "no such container").ok("");
        let candidates = vec![
            (rec("a", "cool_chaplygin", "running", "Up", ""), String::new()),
            (rec("b", "sad_beaver", "exited", "Exited", ""), String::new()),
            (rec("c", "odd_pascal", "exited", "Exited", ""), String::new()),
        ];
        let report =
            run_cleanup(&runner, "docker", candidates, Removal::StopThenRemove, true, || Ok(())).unwrap();
        assert_eq!(report.removed, 2);
        assert_eq!(report.actions[1].status, ActionStatus::Failed);
        assert_eq!(
            runner.calls(),
            vec!["docker stop a", "docker rm a", "docker rm b", "docker rm c"]
        );
    }

    #[test]
    fn cancelled_confirmation_removes_nothing() {
        let runner = FakeRunner::new();
        let candidates = vec![(rec("a", "cool_chaplygin", "exited", "Exited", ""), String::new())];
        let err = run_cleanup(&runner, "docker", candidates, Removal::Remove, true, || {
            Err(crate::error::UpkeepError::Cancelled.into())
        })
        .unwrap_err();
        assert_eq!(crate::error::error_code(&err), "CANCELLED");
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn force_removal_uses_rm_f() {
        let runner = FakeRunner::new();
        let candidates = vec![(rec("d", "dokploy-redis", "exited", "Exited", ""), String::new())];
        run_cleanup(&runner, "docker", candidates, Removal::Force, true, || Ok(())).unwrap();
        assert_eq!(runner.calls(), vec!["docker rm -f d"]);
    }
}
