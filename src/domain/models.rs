use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

#[derive(Serialize)]
pub struct JsonError {
    pub ok: bool,
    pub error: ErrorBody,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EditStatus {
    Changed,
    WouldChange,
    Unchanged,
    Missing,
    Error,
}

#[derive(Serialize, Clone, Debug)]
pub struct FileEdit {
    pub path: String,
    pub status: EditStatus,
    pub replacements: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Serialize, Default, Debug)]
pub struct EditSummary {
    pub files: Vec<FileEdit>,
    pub changed: usize,
    pub unchanged: usize,
    pub missing: usize,
    pub errors: usize,
}

impl EditSummary {
    pub fn push(&mut self, edit: FileEdit) {
        match edit.status {
            EditStatus::Changed | EditStatus::WouldChange => self.changed += 1,
            EditStatus::Unchanged => self.unchanged += 1,
            EditStatus::Missing => self.missing += 1,
            EditStatus::Error => self.errors += 1,
        }
        self.files.push(edit);
    }
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MoveStatus {
    Moved,
    WouldMove,
    Skipped,
    Error,
}

#[derive(Serialize, Debug, Clone)]
pub struct MoveEntry {
    pub from: String,
    pub to: String,
    pub status: MoveStatus,
    /// Set when a differing destination was (or would be) backed up first.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct OrganizeReport {
    pub mode: RunMode,
    pub entries: Vec<MoveEntry>,
    pub moved: usize,
    pub skipped: usize,
    pub errors: usize,
}

#[derive(Serialize, Debug)]
pub struct LinkFixReport {
    pub notes_dir: String,
    pub edits: EditSummary,
    pub created: Vec<String>,
}

#[derive(Serialize, Debug, Clone)]
pub struct BrokenLink {
    pub file: String,
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct LinkCheckReport {
    pub notes_scanned: usize,
    pub links_checked: usize,
    pub broken: Vec<BrokenLink>,
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProviderStatus {
    Missing,
    Present,
    Added,
    WouldAdd,
}

#[derive(Serialize, Debug)]
pub struct ProviderReport {
    pub file: String,
    pub status: ProviderStatus,
    pub import_inserted: bool,
    pub hints: Vec<String>,
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EnvKeyStatus {
    Updated,
    Appended,
    Commented,
    NotFound,
}

#[derive(Serialize, Debug, Clone)]
pub struct EnvKeyReport {
    pub key: String,
    pub status: EnvKeyStatus,
    /// Masked for secret-looking keys.
    pub display: String,
}

#[derive(Serialize, Debug)]
pub struct EnvReport {
    pub file: String,
    pub changed: bool,
    pub keys: Vec<EnvKeyReport>,
}

#[derive(Serialize, Debug)]
pub struct EnvCheckItem {
    pub name: String,
    pub group: String,
    pub description: String,
    pub configured: bool,
    pub display: String,
    pub required_for: Vec<String>,
}

#[derive(Serialize, Debug)]
pub struct EnvCheckReport {
    pub items: Vec<EnvCheckItem>,
    pub total: usize,
    pub configured: usize,
    pub missing: usize,
    pub percent: f64,
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GitSyncStatus {
    Clean,
    Pushed,
}

#[derive(Serialize, Debug)]
pub struct GitSyncReport {
    pub status: GitSyncStatus,
    pub changes: Vec<String>,
    pub committed: bool,
    pub branch: Option<String>,
    pub remotes: Vec<String>,
    pub web_url: Option<String>,
}

/// One line of `docker ps --format {{json .}}`.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ContainerRecord {
    #[serde(rename = "ID", default)]
    pub id: String,
    #[serde(rename = "Names", default)]
    pub name: String,
    #[serde(rename = "Image", default)]
    pub image: String,
    #[serde(rename = "Status", default)]
    pub status: String,
    #[serde(rename = "State", default)]
    pub state: String,
    #[serde(rename = "CreatedAt", default)]
    pub created_at: String,
}

impl ContainerRecord {
    pub fn is_running(&self) -> bool {
        self.state == "running"
    }

    pub fn is_stopped(&self) -> bool {
        self.state == "exited" || self.state == "created"
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ContainerStats {
    pub total: usize,
    pub running: usize,
    pub exited: usize,
    pub project: usize,
    pub stopped: usize,
    pub other: usize,
    pub orphan_candidates: usize,
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    DryRun,
    Executed,
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    Planned,
    Removed,
    Failed,
}

#[derive(Serialize, Debug, Clone)]
pub struct ContainerAction {
    pub id: String,
    pub name: String,
    pub detail: String,
    pub status: ActionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct CleanupReport {
    pub mode: RunMode,
    pub candidates: usize,
    pub removed: usize,
    pub actions: Vec<ContainerAction>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ContainerReportFile {
    pub generated_at: String,
    pub stats: ContainerStats,
    pub orphan_candidates: Vec<ContainerRecord>,
}

#[derive(Serialize, Debug)]
pub struct ReportWritten<T: Serialize> {
    pub path: String,
    pub report: T,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct McpCleanupReport {
    pub total_configured: usize,
    pub total_referenced: usize,
    pub total_unused: usize,
    pub servers_to_remove: Vec<String>,
    pub essential: Vec<String>,
}

#[derive(Serialize, Debug, Clone)]
pub struct McpServerState {
    pub name: String,
    pub enabled: bool,
    pub source: String,
}

#[derive(Serialize, Debug)]
pub struct McpAnalysis {
    pub path: String,
    pub servers: Vec<McpServerState>,
    pub referenced: Vec<String>,
    pub report: McpCleanupReport,
    pub errors: Vec<String>,
}

#[derive(Serialize, Debug)]
pub struct McpCleanReport {
    pub mode: RunMode,
    pub removed: Vec<String>,
    pub disabled: Vec<String>,
    pub files_written: Vec<String>,
    pub errors: Vec<String>,
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MirrorStatus {
    New,
    Updated,
    UpToDate,
    Missing,
    Error,
}

#[derive(Serialize, Debug, Clone)]
pub struct MirrorEntry {
    pub file: String,
    pub destination: String,
    pub status: MirrorStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Serialize, Debug, Default)]
pub struct MirrorReport {
    pub entries: Vec<MirrorEntry>,
    pub new: usize,
    pub updated: usize,
    pub up_to_date: usize,
    pub missing: usize,
    pub errors: usize,
}

#[derive(Serialize, Debug, Clone)]
pub struct InstallResult {
    pub group: String,
    pub step: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Serialize, Debug, Default)]
pub struct InstallReport {
    pub results: Vec<InstallResult>,
    pub installed: usize,
    pub failed: usize,
}

#[derive(Serialize, Debug)]
pub struct DashboardStatus {
    pub url: String,
    pub running: bool,
    pub opened: bool,
}
