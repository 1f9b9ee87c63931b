use crate::error::UpkeepError;
use std::io::BufRead;
use std::process::Command;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.code == 0
    }

    /// stdout and stderr together, for matching tool messages that may land on either.
    pub fn combined(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Seam for every external tool call.
pub trait ToolRunner {
    fn run(&self, program: &str, args: &[&str]) -> anyhow::Result<ToolOutput>;
}

pub struct SystemRunner {
    pub cwd: Option<std::path::PathBuf>,
}

impl ToolRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> anyhow::Result<ToolOutput> {
        tracing::debug!(program, ?args, "running tool");
        let mut cmd = Command::new(program);
        cmd.args(args);
        if let Some(cwd) = &self.cwd {
            cmd.current_dir(cwd);
        }
        let out = cmd.output().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::Error::from(UpkeepError::ToolMissing(program.to_string()))
            } else {
                anyhow::Error::from(e).context(format!("failed to spawn {}", program))
            }
        })?;
        Ok(ToolOutput {
            code: out.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&out.stdout).to_string(),
            stderr: String::from_utf8_lossy(&out.stderr).to_string(),
        })
    }
}

/// Run and turn a non-zero exit into `ToolFailed`.
pub fn run_checked(
    runner: &dyn ToolRunner,
    program: &str,
    args: &[&str],
) -> anyhow::Result<ToolOutput> {
    let out = runner.run(program, args)?;
    if !out.success() {
        return Err(UpkeepError::ToolFailed {
            tool: program.to_string(),
            action: args.first().copied().unwrap_or_default().to_string(),
            stderr: out.stderr.trim().to_string(),
        }
        .into());
    }
    Ok(out)
}

pub fn tool_failure(program: &str, action: &str, out: &ToolOutput) -> anyhow::Error {
    let detail = if out.stderr.trim().is_empty() {
        out.stdout.trim()
    } else {
        out.stderr.trim()
    };
    UpkeepError::ToolFailed {
        tool: program.to_string(),
        action: action.to_string(),
        stderr: detail.to_string(),
    }
    .into()
}

/// Read one line and require it to match `phrase` exactly (after trimming).
pub fn confirm(phrase: &str, prompt: &str, input: &mut dyn BufRead) -> anyhow::Result<()> {
    eprint!("{} Type {} to continue: ", prompt, phrase);
    let mut line = String::new();
    input.read_line(&mut line)?;
    if line.trim() == phrase {
        Ok(())
    } else {
        tracing::warn!("confirmation phrase mismatch, aborting");
        Err(UpkeepError::Cancelled.into())
    }
}

pub fn confirm_stdin(phrase: &str, prompt: &str) -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    let mut lock = stdin.lock();
    confirm(phrase, prompt, &mut lock)
}


#[cfg(test)]
mod tests {
    use super::fake::FakeRunner;
    use super::*;

    #[test]
    fn confirm_accepts_exact_phrase_only() {
        let mut yes = "  YES \n".as_bytes();
        assert!(confirm("YES", "Remove?", &mut yes).is_ok());
        let mut no = "yes\n".as_bytes();
        let err = confirm("YES", "Remove?", &mut no).unwrap_err();
        assert_eq!(crate::error::error_code(&err), "CANCELLED");
        let mut empty = "".as_bytes();
        assert!(confirm("YES", "Remove?", &mut empty).is_err());
    }

    #[test]
    fn run_checked_maps_nonzero_exit() {
        let runner = FakeRunner::new();
        runner.push(1, "", "permission denied");
        let err = run_checked(&runner, "docker", &["rm", "abc"]).unwrap_err();
        assert_eq!(crate::error::error_code(&err), "TOOL_FAILED");
        assert!(err.to_string().contains("permission denied"));
    }

    #[test]
    fn missing_binary_is_tool_missing() {
        let runner = SystemRunner { cwd: None };
        let err = runner
            .run("upkeep-definitely-not-a-real-binary", &[])
            .unwrap_err();
        assert_eq!(crate::error::error_code(&err), "TOOL_MISSING");
    }
}
