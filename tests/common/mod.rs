#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Isolated project root with helpers to drive the binary against it.
pub struct TestEnv {
    _tmp: TempDir,
    pub root: PathBuf,
    pub bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let root = tmp.path().join("project");
        let bin = tmp.path().join("bin");
        fs::create_dir_all(&root).expect("create project root");
        fs::create_dir_all(&bin).expect("create bin dir");
        Self {
            _tmp: tmp,
            root,
            bin,
        }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("upkeep");
        cmd.current_dir(&self.root)
            .env("UPKEEP_ROOT", &self.root)
            .env_remove("UPKEEP_CONFIG")
            .env_remove("UPKEEP_DOCKER")
            .env_remove("UPKEEP_GIT")
            .env_remove("UPKEEP_PYTHON")
            .env_remove("UPKEEP_LOG");
        cmd
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let mut cmd = self.cmd();
        let out = cmd
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    /// Runs with `--json`, expects exit 1, returns the envelope.
    pub fn run_json_failure(&self, args: &[&str]) -> Value {
        let mut cmd = self.cmd();
        let out = cmd
            .arg("--json")
            .args(args)
            .assert()
            .failure()
            .code(1)
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn write(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dir");
        }
        fs::write(&path, content).expect("write fixture file");
        path
    }

    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.root.join(rel)).expect("read project file")
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }
}

/// A stand-in `docker` that logs its argv and serves `ps` from a fixture file.
#[cfg(unix)]
pub struct FakeDocker {
    pub script: PathBuf,
    pub log: PathBuf,
    pub ps: PathBuf,
}

#[cfg(unix)]
impl FakeDocker {
    pub fn install(env: &TestEnv, ps_lines: &[Value]) -> Self {
        use std::os::unix::fs::PermissionsExt;

        let script = env.bin.join("docker");
        let log = env.bin.join("docker.log");
        let ps = env.bin.join("ps.jsonl");
        let body: Vec<String> = ps_lines.iter().map(|v| v.to_string()).collect();
        fs::write(&ps, format!("{}\n", body.join("\n"))).expect("write ps fixture");
        fs::write(
            &script,
            format!(
                "#!/bin/sh\necho \"$*\" >> '{}'\nif [ \"$1\" = \"ps\" ]; then cat '{}'; fi\nexit 0\n",
                log.display(),
                ps.display()
            ),
        )
        .expect("write fake docker");
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).expect("chmod fake docker");
        Self { script, log, ps }
    }

    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(&self.log)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    pub fn apply(&self, cmd: &mut Command) {
        cmd.env("UPKEEP_DOCKER", &self.script);
    }
}

/// One `docker ps --format {{json .}}` line.
pub fn ps_line(id: &str, name: &str, state: &str, status: &str) -> Value {
    serde_json::json!({
        "ID": id,
        "Names": name,
        "Image": "alpine:3",
        "State": state,
        "Status": status,
        "CreatedAt": "2024-01-15 10:30:00 +0000 UTC"
    })
}
