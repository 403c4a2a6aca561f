//! Precedence resolution for configuration.
//!
//! ## Config Precedence (highest to lowest)
//!
//! 1. CLI flags (passed at runtime)
//! 2. Session config.kdl (`~/.local/share/planboard/<path-hash>/config.kdl`)
//! 3. System config.kdl (`~/.config/planboard/config.kdl`)
//! 4. Built-in defaults

use crate::Result;
use crate::config::{OutputFormat, PlanboardConfig};
use crate::storage::Storage;
use serde::Serialize;

/// Tracks where a resolved value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSource {
    /// Value from session-level config
    Session,
    /// Value from system-level config
    System,
    /// Value from CLI flag
    CliFlag,
    /// Built-in default value
    Default,
}

impl std::fmt::Display for ValueSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueSource::Session => write!(f, "session"),
            ValueSource::System => write!(f, "system"),
            ValueSource::CliFlag => write!(f, "cli"),
            ValueSource::Default => write!(f, "default"),
        }
    }
}

impl Serialize for ValueSource {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A resolved value with its source.
#[derive(Debug, Clone, Serialize)]
pub struct Resolved<T> {
    /// The resolved value
    pub value: T,
    /// Where the value came from
    pub source: ValueSource,
}

impl<T> Resolved<T> {
    /// Create a new resolved value.
    pub fn new(value: T, source: ValueSource) -> Self {
        Self { value, source }
    }
}

/// Fully resolved configuration with source tracking.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Output format preference
    pub output_format: Resolved<OutputFormat>,
    /// Fallback comment author
    pub author: Option<Resolved<String>>,
    /// Whether the action log is written
    pub action_log: Resolved<bool>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            output_format: Resolved::new(OutputFormat::Json, ValueSource::Default),
            author: None,
            action_log: Resolved::new(true, ValueSource::Default),
        }
    }
}

impl ResolvedConfig {
    /// Get the output format value.
    pub fn output_format(&self) -> &OutputFormat {
        &self.output_format.value
    }

    /// Get the author value, if set.
    pub fn author(&self) -> Option<&str> {
        self.author.as_ref().map(|r| r.value.as_str())
    }

    /// Whether the action log is enabled.
    pub fn action_log_enabled(&self) -> bool {
        self.action_log.value
    }

    /// Value and source for a KDL key, rendered as strings.
    pub fn lookup(&self, key: &str) -> Option<(String, ValueSource)> {
        match key {
            "output-format" => Some((
                self.output_format.value.to_string(),
                self.output_format.source.clone(),
            )),
            "author" => self
                .author
                .as_ref()
                .map(|r| (r.value.clone(), r.source.clone())),
            "action-log" => Some((
                self.action_log.value.to_string(),
                self.action_log.source.clone(),
            )),
            _ => None,
        }
    }
}

/// CLI overrides for configuration resolution.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Output format override from CLI flag
    pub output_format: Option<OutputFormat>,
    /// Author override from CLI flag
    pub author: Option<String>,
}

impl ConfigOverrides {
    /// Create empty overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set output format override.
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = Some(format);
        self
    }

    /// Set author override.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }
}

/// Resolve configuration with full precedence chain.
///
/// Precedence (highest to lowest):
/// 1. CLI flags (from `overrides`)
/// 2. Session config.kdl
/// 3. System config.kdl
/// 4. Built-in defaults
pub fn resolve_config(storage: &Storage, overrides: &ConfigOverrides) -> Result<ResolvedConfig> {
    let system_config = Storage::read_system_planboard_config()?;
    let session_config = storage.read_planboard_config()?;
    Ok(resolve_layers(&session_config, &system_config, overrides))
}

/// Resolve already-loaded config layers.
pub fn resolve_layers(
    session: &PlanboardConfig,
    system: &PlanboardConfig,
    overrides: &ConfigOverrides,
) -> ResolvedConfig {
    let mut result = ResolvedConfig::default();

    if let Some(ref format) = overrides.output_format {
        result.output_format = Resolved::new(format.clone(), ValueSource::CliFlag);
    } else if let Some(ref format) = session.output_format {
        result.output_format = Resolved::new(format.clone(), ValueSource::Session);
    } else if let Some(ref format) = system.output_format {
        result.output_format = Resolved::new(format.clone(), ValueSource::System);
    }

    if let Some(ref author) = overrides.author {
        result.author = Some(Resolved::new(author.clone(), ValueSource::CliFlag));
    } else if let Some(ref author) = session.author {
        result.author = Some(Resolved::new(author.clone(), ValueSource::Session));
    } else if let Some(ref author) = system.author {
        result.author = Some(Resolved::new(author.clone(), ValueSource::System));
    }

    if let Some(enabled) = session.action_log {
        result.action_log = Resolved::new(enabled, ValueSource::Session);
    } else if let Some(enabled) = system.action_log {
        result.action_log = Resolved::new(enabled, ValueSource::System);
    }

    result
}
