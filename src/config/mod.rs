//! Configuration management for planboard.
//!
//! ## config.kdl - User preferences
//!
//! Located at:
//! - System: `~/.config/planboard/config.kdl` (or `$PB_CONFIG_DIR/config.kdl`)
//! - Session: `<store dir>/config.kdl`
//!
//! Contains:
//! - `output-format` - "json" or "human"
//! - `author` - Fallback comment author
//! - `action-log` - Whether commands are appended to the action log
//!
//! ## Precedence
//!
//! CLI flag > session config > system config > defaults
//!
//! Use the [`resolver`] module for precedence resolution.

pub mod resolver;
pub mod schema;

pub use resolver::{
    ConfigOverrides, Resolved, ResolvedConfig, ValueSource, resolve_config, resolve_layers,
};
pub use schema::{CONFIG_KEYS, OutputFormat, PlanboardConfig};
