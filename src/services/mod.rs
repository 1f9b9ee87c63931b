//! Service layer containing business logic and side-effect helpers.
//!
//! ## Service map
//! - `settings.rs`: project root + `upkeep.toml` loading, tool binary overrides.
//! - `logging.rs`: tracing subscriber setup (stderr, `UPKEEP_LOG`).
//! - `output.rs`: JSON/text output helpers and the error envelope.
//! - `storage.rs`: report persistence, write-if-changed, mtime-preserving copy.
//! - `process.rs`: `ToolRunner` seam for external tools + confirmation prompt.
//! - `text_edit.rs`: regex/literal substitution engine shared by the editors.
//! - `imports.rs`: import prefix rewriter.
//! - `links.rs`: `[[target]]` link fixer and checker for the notes vault.
//! - `rename.rs`: project rename across documentation files.
//! - `provider.rs`: model provider registration in the chains file.
//! - `envfile.rs`: `.env` editor and required-key checker.
//! - `git.rs`: stage/commit/push driver.
//! - `containers.rs`: docker listing, classification and cleanup flows.
//! - `mcp.rs`: MCP server config analysis and cleanup.
//! - `mirror.rs`: curated notes mirror.
//! - `organize.rs`: root file layout mover with `.backup` of clobbered files.
//! - `deps.rs`: pip installer driver.
//! - `dashboard.rs`: streamlit runner and browser opener.
//!
//! ## Conventions
//! - Prefer pure helpers where possible; tests drive them directly.
//! - Side effects should be explicit and localized.
//! - External tools only go through `ToolRunner`.
//! - Keep command handlers thin; delegate to services.

pub mod containers;
pub mod dashboard;
pub mod deps;
pub mod envfile;
pub mod git;
pub mod imports;
pub mod links;
pub mod logging;
pub mod mcp;
pub mod mirror;
pub mod organize;
pub mod output;
pub mod process;
pub mod provider;
pub mod rename;
pub mod settings;
pub mod storage;
pub mod text_edit;

pub use logging::init_logging;
pub use output::{print_error, print_one, print_with_status};
pub use process::{confirm_stdin, SystemRunner, ToolRunner};
pub use settings::{Tool, Workspace};
pub use text_edit::{edit_row, summary_line};
