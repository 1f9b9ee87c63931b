use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "upkeep",
    version,
    about = "Maintenance toolbox for the orchestrator project"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        env = "UPKEEP_ROOT",
        help = "Project root (defaults to the current directory)"
    )]
    pub root: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        env = "UPKEEP_CONFIG",
        help = "Config file (defaults to <root>/upkeep.toml when present)"
    )]
    pub config: Option<PathBuf>,
    #[arg(short, long, global = true, help = "Enable debug logging on stderr")]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rewrite import prefixes after a directory move.
    Imports {
        #[command(subcommand)]
        command: ImportsCommands,
    },
    /// Fix or check `[[target]]` links in the notes vault.
    Links {
        #[command(subcommand)]
        command: LinksCommands,
    },
    /// Replace the project name across the documentation files.
    Rename {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        short_name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
    /// Register a model provider in the chains configuration file.
    Provider {
        #[command(subcommand)]
        command: ProviderCommands,
    },
    /// Edit or inspect the `.env` file.
    Env {
        #[command(subcommand)]
        command: EnvCommands,
    },
    /// Stage, commit and push through git.
    Git {
        #[command(subcommand)]
        command: GitCommands,
    },
    /// Inspect and clean up docker containers.
    Containers {
        #[command(subcommand)]
        command: ContainersCommands,
    },
    /// Analyze and clean MCP server configuration files.
    Mcp {
        #[command(subcommand)]
        command: McpCommands,
    },
    /// Copy curated notes into the mirror folder when the source is newer.
    Mirror,
    /// Move root-level files into the layered project tree.
    Organize {
        #[arg(long, default_value_t = false)]
        execute: bool,
    },
    /// Install python packages.
    Deps {
        #[command(subcommand)]
        command: DepsCommands,
    },
    /// Run or open the agent dashboard.
    Dashboard {
        #[command(subcommand)]
        command: DashboardCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ImportsCommands {
    Fix {
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum LinksCommands {
    Fix {
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
    Check,
}

#[derive(Subcommand, Debug)]
pub enum ProviderCommands {
    Add {
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum EnvCommands {
    /// Write the configured assignments.
    Apply,
    /// Write KEY=VALUE pairs given on the command line.
    Set {
        #[arg(required = true)]
        assignments: Vec<String>,
        #[arg(long = "comment")]
        comment: Vec<String>,
    },
    /// Report which required keys are configured.
    Check,
}

#[derive(Subcommand, Debug)]
pub enum GitCommands {
    Sync {
        #[arg(long, short)]
        message: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ContainersCommands {
    Stats,
    /// Remove orphaned helper containers (two-word random names).
    Clean {
        #[arg(long, default_value_t = false)]
        execute: bool,
    },
    /// Remove stopped and old containers.
    Prune {
        #[arg(long, default_value_t = 7, value_parser = clap::value_parser!(i64).range(0..=36500))]
        older_than_days: i64,
        #[arg(long, default_value_t = false)]
        execute: bool,
    },
    /// Remove legacy containers replaced by the consolidated stack.
    Migrate {
        #[arg(long, default_value_t = false)]
        remove_services: bool,
        #[arg(long, default_value_t = false)]
        execute: bool,
    },
    /// Write a JSON report into the notes directory.
    Report,
}

#[derive(Subcommand, Debug)]
pub enum McpCommands {
    Analyze,
    Clean {
        #[arg(long, default_value_t = false)]
        remove: bool,
        #[arg(long, default_value_t = false)]
        disable: bool,
        #[arg(long, default_value_t = false)]
        execute: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum DepsCommands {
    Install {
        /// Package groups to install (all when omitted).
        groups: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum DashboardCommands {
    Run {
        #[arg(long, default_value_t = false)]
        open: bool,
    },
    Open,
}
