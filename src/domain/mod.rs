//! Shared data model layer (structs/constants only).
//!
//! ## Files
//! - `config.rs`: `upkeep.toml` sections with stock defaults.
//! - `models.rs`: report and output structs.
//! - `constants.rs`: stock tables (allowlists, mappings, package groups).
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem/process side effects.
//!
//! ## Compatibility note
//! Report structs are the `--json` output and the on-disk JSON reports.
//! Keep schema-impacting changes synchronized with `docs/contracts/*`.

pub mod config;
pub mod constants;
pub mod models;
