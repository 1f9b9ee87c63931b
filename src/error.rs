use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum UpkeepError {
    #[error("{tool} {action} failed: {stderr}")]
    ToolFailed {
        tool: String,
        action: String,
        stderr: String,
    },
    #[error("tool not found on PATH: {0}")]
    ToolMissing(String),
    #[error("operation cancelled: confirmation phrase did not match")]
    Cancelled,
    #[error("invalid assignment `{0}` (expected KEY=VALUE)")]
    InvalidAssignment(String),
    #[error("no insertion point found in {}", .0.display())]
    InsertionPointMissing(PathBuf),
    #[error("report not found: {} (run the analyze command first)", .0.display())]
    ReportMissing(PathBuf),
    #[error("invalid config {}: {1}", .0.display())]
    Config(PathBuf, String),
    #[error("unknown package group: {0}")]
    UnknownGroup(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The report was already printed; only the exit status is left to set.
    #[error("{0} step(s) failed")]
    StepsFailed(usize),
}

impl UpkeepError {
    pub fn code(&self) -> &'static str {
        match self {
            UpkeepError::ToolFailed { .. } => "TOOL_FAILED",
            UpkeepError::ToolMissing(_) => "TOOL_MISSING",
            UpkeepError::Cancelled => "CANCELLED",
            UpkeepError::InvalidAssignment(_)
            | UpkeepError::UnknownGroup(_)
            | UpkeepError::InvalidArgument(_) => "INVALID_ARGUMENT",
            UpkeepError::InsertionPointMissing(_) => "INSERTION_POINT_MISSING",
            UpkeepError::ReportMissing(_) => "REPORT_MISSING",
            UpkeepError::Config(..) => "CONFIG_INVALID",
            UpkeepError::StepsFailed(_) => "STEPS_FAILED",
        }
    }
}

/// True when the command already printed its own failing envelope.
pub fn already_reported(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<UpkeepError>(),
        Some(UpkeepError::StepsFailed(_))
    )
}

/// Machine code for any error bubbling out of a command.
pub fn error_code(err: &anyhow::Error) -> &'static str {
    err.downcast_ref::<UpkeepError>()
        .map(UpkeepError::code)
        .unwrap_or("ERROR")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_survive_anyhow_wrapping() {
        let err: anyhow::Error = UpkeepError::Cancelled.into();
        assert_eq!(error_code(&err), "CANCELLED");
        let plain = anyhow::anyhow!("boom");
        assert_eq!(error_code(&plain), "ERROR");
    }
}
