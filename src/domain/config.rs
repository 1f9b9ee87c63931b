use crate::domain::constants::*;
use serde::Deserialize;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Contents of `upkeep.toml`. Every section falls back to the stock tables.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    pub notes_dir: String,
    pub tools: ToolsConfig,
    pub organize: OrganizeConfig,
    pub imports: ImportsConfig,
    pub links: LinksConfig,
    pub rename: RenameConfig,
    pub provider: ProviderConfig,
    pub env: EnvConfig,
    pub git: GitConfig,
    pub containers: ContainersConfig,
    pub mcp: McpConfig,
    pub mirror: MirrorConfig,
    pub deps: DepsConfig,
    pub dashboard: DashboardConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            notes_dir: DEFAULT_NOTES_DIR.to_string(),
            tools: ToolsConfig::default(),
            organize: OrganizeConfig::default(),
            imports: ImportsConfig::default(),
            links: LinksConfig::default(),
            rename: RenameConfig::default(),
            provider: ProviderConfig::default(),
            env: EnvConfig::default(),
            git: GitConfig::default(),
            containers: ContainersConfig::default(),
            mcp: McpConfig::default(),
            mirror: MirrorConfig::default(),
            deps: DepsConfig::default(),
            dashboard: DashboardConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields, default)]
pub struct ToolsConfig {
    pub git: String,
    pub docker: String,
    pub python: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            git: "git".to_string(),
            docker: "docker".to_string(),
            python: "python3".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct MoveRule {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields, default)]
pub struct OrganizeConfig {
    pub moves: Vec<MoveRule>,
}

impl Default for OrganizeConfig {
    fn default() -> Self {
        Self {
            moves: ORGANIZE_MOVES
                .iter()
                .map(|(from, to)| MoveRule {
                    from: from.to_string(),
                    to: to.to_string(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ImportRule {
    pub pattern: String,
    pub replacement: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields, default)]
pub struct ImportsConfig {
    pub files: Vec<String>,
    pub rules: Vec<ImportRule>,
}

impl Default for ImportsConfig {
    fn default() -> Self {
        let agents = MOVED_AGENT_MODULES.iter().map(|m| (m, "src.agents"));
        let apps = MOVED_APP_MODULES.iter().map(|m| (m, "src.apps"));
        let rules = agents
            .chain(apps)
            .map(|(module, package)| ImportRule {
                pattern: format!(r"^from {} import", regex::escape(module)),
                replacement: format!("from {}.{} import", package, module),
            })
            .collect();
        Self {
            files: strings(IMPORT_FILES),
            rules,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct LinkRename {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct NoteSeed {
    pub path: String,
    pub content: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields, default)]
pub struct LinksConfig {
    pub renames: Vec<LinkRename>,
    pub create: Vec<NoteSeed>,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            renames: LINK_RENAMES
                .iter()
                .map(|(from, to)| LinkRename {
                    from: from.to_string(),
                    to: to.to_string(),
                })
                .collect(),
            create: SEED_NOTES
                .iter()
                .map(|(path, content)| NoteSeed {
                    path: path.to_string(),
                    content: content.to_string(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct TextReplacement {
    pub file: String,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields, default)]
pub struct RenameConfig {
    pub name: String,
    pub short_name: String,
    pub description: String,
    pub replacements: Vec<TextReplacement>,
}

impl Default for RenameConfig {
    fn default() -> Self {
        Self {
            name: PROJECT_NAME.to_string(),
            short_name: PROJECT_SHORT_NAME.to_string(),
            description: PROJECT_DESCRIPTION.to_string(),
            replacements: RENAME_REPLACEMENTS
                .iter()
                .map(|(file, from, to)| TextReplacement {
                    file: file.to_string(),
                    from: from.to_string(),
                    to: to.to_string(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields, default)]
pub struct ProviderConfig {
    pub file: String,
    pub markers: Vec<String>,
    pub import_line: String,
    pub import_anchors: Vec<String>,
    pub block: String,
    pub block_anchors: Vec<String>,
    pub hints: Vec<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            file: PROVIDER_FILE.to_string(),
            markers: strings(PROVIDER_MARKERS),
            import_line: PROVIDER_IMPORT_LINE.to_string(),
            import_anchors: strings(PROVIDER_IMPORT_ANCHORS),
            block: PROVIDER_BLOCK.to_string(),
            block_anchors: strings(PROVIDER_BLOCK_ANCHORS),
            hints: strings(PROVIDER_HINTS),
        }
    }
}

/// One `KEY=value` the env editor should write. Exactly one of `value` /
/// `from_env` is expected; `from_env` falls back to `default`.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct EnvAssign {
    pub key: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub from_env: Option<String>,
    #[serde(default)]
    pub default: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct RequiredKey {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub required_for: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields, default)]
pub struct EnvConfig {
    pub file: String,
    pub template: Option<String>,
    pub assign: Vec<EnvAssign>,
    pub comment: Vec<String>,
    pub required: Vec<RequiredKey>,
    pub placeholder_prefixes: Vec<String>,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            file: ENV_FILE.to_string(),
            template: Some(ENV_TEMPLATE.to_string()),
            assign: ENV_ASSIGNMENTS
                .iter()
                .map(|(key, default)| EnvAssign {
                    key: key.to_string(),
                    value: None,
                    from_env: Some(key.to_string()),
                    default: Some(default.to_string()),
                })
                .collect(),
            comment: vec![],
            required: ENV_REQUIRED
                .iter()
                .map(|(group, name, description, required_for)| RequiredKey {
                    name: name.to_string(),
                    description: description.to_string(),
                    group: group.to_string(),
                    required_for: strings(required_for),
                })
                .collect(),
            placeholder_prefixes: strings(ENV_PLACEHOLDER_PREFIXES),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields, default)]
pub struct GitConfig {
    pub remote: String,
    pub default_branch: String,
    pub commit_message: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            remote: GIT_REMOTE.to_string(),
            default_branch: GIT_DEFAULT_BRANCH.to_string(),
            commit_message: GIT_COMMIT_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields, default)]
pub struct MigrateConfig {
    pub legacy: Vec<String>,
    pub keep: String,
    pub swarm_prefixes: Vec<String>,
    pub stopped_only: Vec<String>,
    pub services: Vec<String>,
}

impl Default for MigrateConfig {
    fn default() -> Self {
        Self {
            legacy: strings(MIGRATE_LEGACY),
            keep: MIGRATE_KEEP.to_string(),
            swarm_prefixes: strings(MIGRATE_SWARM_PREFIXES),
            stopped_only: strings(MIGRATE_STOPPED_ONLY),
            services: strings(MIGRATE_SERVICES),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields, default)]
pub struct ContainersConfig {
    pub important: Vec<String>,
    pub project: Vec<String>,
    pub min_token_len: usize,
    pub confirm_phrase: String,
    pub report_file: String,
    pub migrate: MigrateConfig,
}

impl Default for ContainersConfig {
    fn default() -> Self {
        Self {
            important: strings(IMPORTANT_CONTAINERS),
            project: strings(PROJECT_CONTAINERS),
            min_token_len: ORPHAN_MIN_TOKEN_LEN,
            confirm_phrase: CONFIRM_PHRASE.to_string(),
            report_file: CONTAINER_REPORT_FILE.to_string(),
            migrate: MigrateConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields, default)]
pub struct McpConfig {
    pub servers_file: String,
    pub editor_file: String,
    pub report_file: String,
    pub extensions: Vec<String>,
    pub reference_patterns: Vec<String>,
    pub essential: Vec<String>,
    pub optional: Vec<String>,
}

impl Default for McpConfig {
    fn default() -> Self {
        Self {
            servers_file: MCP_SERVERS_FILE.to_string(),
            editor_file: MCP_EDITOR_FILE.to_string(),
            report_file: MCP_REPORT_FILE.to_string(),
            extensions: strings(MCP_EXTENSIONS),
            reference_patterns: strings(MCP_REFERENCE_PATTERNS),
            essential: strings(MCP_ESSENTIAL),
            optional: strings(MCP_OPTIONAL),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct MirrorGroup {
    pub folder: String,
    pub files: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields, default)]
pub struct MirrorConfig {
    /// Defaults to `notes_dir` when unset.
    pub source: Option<String>,
    pub destination: String,
    pub groups: Vec<MirrorGroup>,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            source: None,
            destination: MIRROR_DESTINATION.to_string(),
            groups: MIRROR_GROUPS
                .iter()
                .map(|(folder, files)| MirrorGroup {
                    folder: folder.to_string(),
                    files: strings(files),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct PackageGroup {
    pub name: String,
    pub packages: Vec<String>,
    /// Extra argument vectors run with the python interpreter after the packages.
    #[serde(default)]
    pub post: Vec<Vec<String>>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields, default)]
pub struct DepsConfig {
    pub groups: Vec<PackageGroup>,
}

impl Default for DepsConfig {
    fn default() -> Self {
        Self {
            groups: DEPS_GROUPS
                .iter()
                .map(|(name, packages)| PackageGroup {
                    name: name.to_string(),
                    packages: strings(packages),
                    post: if *name == "playwright" {
                        vec![strings(PLAYWRIGHT_POST_INSTALL)]
                    } else {
                        vec![]
                    },
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields, default)]
pub struct DashboardConfig {
    pub script: String,
    pub port: u16,
    pub address: String,
    pub startup_wait_secs: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            script: DASHBOARD_SCRIPT.to_string(),
            port: DASHBOARD_PORT,
            address: DASHBOARD_ADDRESS.to_string(),
            startup_wait_secs: DASHBOARD_STARTUP_WAIT_SECS,
        }
    }
}
