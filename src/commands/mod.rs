//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `editors.rs`: imports/links/rename/provider/env (file editors).
//! - `drivers.rs`: git/containers/deps/dashboard (external tool drivers).
//! - `housekeeping.rs`: mirror, organize and MCP config cleanup.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate business logic to `services/*`.
//! - Keep behavior and output schema stable.

pub mod drivers;
pub mod editors;
pub mod housekeeping;

pub use drivers::{
    handle_containers_commands, handle_dashboard_commands, handle_deps_commands,
    handle_git_commands,
};
pub use editors::{
    handle_env_commands, handle_imports_commands, handle_links_commands, handle_provider_commands,
    handle_rename_command,
};
pub use housekeeping::{handle_mcp_commands, handle_mirror_command, handle_organize_command};
