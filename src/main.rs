use clap::Parser;

mod cli;
mod commands;
mod domain;
mod error;
mod services;

pub use cli::*;
pub use commands::*;
pub use domain::config::*;
pub use domain::models::*;
pub use error::*;
pub use services::*;

type Handler = fn(&Cli, &Workspace) -> anyhow::Result<bool>;

const HANDLERS: &[Handler] = &[
    handle_imports_commands,
    handle_links_commands,
    handle_rename_command,
    handle_provider_commands,
    handle_env_commands,
    handle_git_commands,
    handle_containers_commands,
    handle_mcp_commands,
    handle_mirror_command,
    handle_organize_command,
    handle_deps_commands,
    handle_dashboard_commands,
];

fn run(cli: &Cli) -> anyhow::Result<()> {
    let ws = Workspace::load(cli.root.as_deref(), cli.config.as_deref())?;
    tracing::debug!(root = %ws.root.display(), "workspace loaded");
    for handler in HANDLERS {
        if handler(cli, &ws)? {
            return Ok(());
        }
    }
    anyhow::bail!("unhandled command")
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(&cli) {
        if !(cli.json && already_reported(&err)) {
            print_error(cli.json, &err);
        }
        std::process::exit(1);
    }
}
