//! KDL schema for config.kdl.
//!
//! This module provides:
//! - The Rust struct representing the KDL schema
//! - Serialization/deserialization to/from KDL format
//! - Reading and writing config files

use crate::{Error, Result};
use kdl::{KdlDocument, KdlEntry, KdlNode, KdlValue};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Output format preference for CLI commands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON output (default, machine-readable)
    #[default]
    Json,
    /// Human-readable output
    Human,
}

impl OutputFormat {
    /// Parse from string, case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "human" => Some(OutputFormat::Human),
            _ => None,
        }
    }

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Human => "human",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Known config keys, in file order.
pub const CONFIG_KEYS: &[&str] = &["output-format", "author", "action-log"];

/// User preferences stored in config.kdl.
///
/// # KDL Schema
///
/// ```kdl
/// output-format "human"  // or "json"
/// author "Ana"
/// action-log #false
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanboardConfig {
    /// Default output format for CLI commands
    pub output_format: Option<OutputFormat>,

    /// Comment author used when none has been remembered yet
    pub author: Option<String>,

    /// Whether commands are appended to the action log
    pub action_log: Option<bool>,
}

impl PlanboardConfig {
    /// Create an empty config with no values set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse config from a KDL document. Unknown or mistyped nodes are ignored.
    pub fn from_kdl(doc: &KdlDocument) -> Self {
        let mut config = Self::new();

        if let Some(s) = first_string(doc, "output-format") {
            config.output_format = OutputFormat::parse(&s);
        }

        if let Some(s) = first_string(doc, "author") {
            config.author = Some(s);
        }

        if let Some(node) = doc.get("action-log") {
            if let Some(entry) = node.entries().first() {
                config.action_log = entry.value().as_bool();
            }
        }

        config
    }

    /// Convert config to a KDL document.
    pub fn to_kdl(&self) -> KdlDocument {
        let mut doc = KdlDocument::new();

        if let Some(ref format) = self.output_format {
            let mut node = KdlNode::new("output-format");
            node.push(KdlEntry::new(KdlValue::String(format.as_str().to_string())));
            doc.nodes_mut().push(node);
        }

        if let Some(ref author) = self.author {
            let mut node = KdlNode::new("author");
            node.push(KdlEntry::new(KdlValue::String(author.clone())));
            doc.nodes_mut().push(node);
        }

        if let Some(enabled) = self.action_log {
            let mut node = KdlNode::new("action-log");
            node.push(KdlEntry::new(KdlValue::Bool(enabled)));
            doc.nodes_mut().push(node);
        }

        doc
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` if they are Some.
    pub fn merge(&mut self, other: &PlanboardConfig) {
        if other.output_format.is_some() {
            self.output_format = other.output_format.clone();
        }
        if other.author.is_some() {
            self.author = other.author.clone();
        }
        if other.action_log.is_some() {
            self.action_log = other.action_log;
        }
    }

    /// Set a value by its KDL key, validating the raw string.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "output-format" => {
                let format = OutputFormat::parse(value).ok_or_else(|| {
                    Error::InvalidInput(format!(
                        "output-format must be 'json' or 'human', got '{}'",
                        value
                    ))
                })?;
                self.output_format = Some(format);
            }
            "author" => {
                let author = value.trim();
                self.author = (!author.is_empty()).then(|| author.to_string());
            }
            "action-log" => {
                let enabled = parse_bool(value).ok_or_else(|| {
                    Error::InvalidInput(format!("action-log must be true or false, got '{}'", value))
                })?;
                self.action_log = Some(enabled);
            }
            _ => {
                return Err(Error::InvalidInput(format!(
                    "Unknown config key '{}' (expected one of: {})",
                    key,
                    CONFIG_KEYS.join(", ")
                )));
            }
        }
        Ok(())
    }

    /// Get a value by its KDL key, rendered as a string.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "output-format" => self.output_format.as_ref().map(|f| f.as_str().to_string()),
            "author" => self.author.clone(),
            "action-log" => self.action_log.map(|b| b.to_string()),
            _ => None,
        }
    }

    /// Read a config file. A missing file is an empty config.
    pub fn read(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let content = fs::read_to_string(path)?;
        let doc: KdlDocument = content
            .parse()
            .map_err(|e| Error::Other(format!("Failed to parse {}: {}", path.display(), e)))?;
        Ok(Self::from_kdl(&doc))
    }

    /// Write this config to `path`, creating parent directories.
    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_kdl().to_string())?;
        Ok(())
    }
}

fn first_string(doc: &KdlDocument, name: &str) -> Option<String> {
    let node = doc.get(name)?;
    let entry = node.entries().first()?;
    entry.value().as_string().map(str::to_string)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}
