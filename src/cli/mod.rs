//! CLI argument definitions for planboard.
//!
//! Collection indices are 0-based throughout.

use crate::edit::document::EXPORT_FILE_NAME;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

/// Planboard - view and edit a project migration plan.
///
/// Start with `pb show` for the header stats, then `pb progress` and `pb timeline`.
#[derive(Parser, Debug)]
#[command(name = "pb")]
#[command(author, version, about = "View and edit a project migration plan", long_about = None)]
pub struct Cli {
    /// Output in human-readable format instead of JSON
    #[arg(short = 'H', long = "human", global = true)]
    pub human_readable: bool,

    /// Use <dir> as the store directory instead of the one derived from the
    /// current directory. Can also be set via PB_STORE environment variable.
    #[arg(long = "store", global = true, env = "PB_STORE")]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level commands
#[derive(Subcommand, Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Commands {
    /// Show header stats: brand, title, phases, tasks, timeline and progress (default)
    Show,

    /// Show resolved theme colors
    Theme,

    /// Show the week-by-week timeline grid
    Timeline,

    /// Show overall and per-phase progress
    Progress,

    /// Export the plan as pretty-printed JSON
    Export {
        /// Write to FILE instead of stdout (plan.json when given without a value)
        #[arg(short = 'o', long = "output", num_args = 0..=1, default_missing_value = EXPORT_FILE_NAME)]
        output: Option<PathBuf>,
    },

    /// Replace the plan with a JSON file
    ///
    /// Completed tasks and comments are kept. A file that is not valid JSON
    /// leaves the current plan untouched.
    Import {
        /// JSON file to import
        file: PathBuf,
    },

    /// Restore the default plan and clear progress and comments
    Reset {
        /// Confirm discarding the current plan
        #[arg(long)]
        yes: bool,
    },

    /// Header fields and theme colors
    Meta {
        #[command(subcommand)]
        command: MetaCommands,
    },

    /// Overview summary
    Overview {
        #[command(subcommand)]
        command: OverviewCommands,
    },

    /// Overview goals
    Goal {
        #[command(subcommand)]
        command: GoalCommands,
    },

    /// Phase management commands
    Phase {
        #[command(subcommand)]
        command: PhaseCommands,
    },

    /// Task management commands
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },

    /// Content section commands
    Section {
        #[command(subcommand)]
        command: SectionCommands,
    },

    /// Section field commands
    Field {
        #[command(subcommand)]
        command: FieldCommands,
    },

    /// Tech stack commands
    Tech {
        #[command(subcommand)]
        command: TechCommands,
    },

    /// Risk register commands
    Risk {
        #[command(subcommand)]
        command: RiskCommands,
    },

    /// Comment commands
    Comment {
        #[command(subcommand)]
        command: CommentCommands,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// System information
    System {
        #[command(subcommand)]
        command: SystemCommands,
    },
}

impl Commands {
    /// Command name used in the action log (e.g. "task toggle").
    pub fn name(&self) -> String {
        let (group, sub) = match self {
            Commands::Show => ("show", None),
            Commands::Theme => ("theme", None),
            Commands::Timeline => ("timeline", None),
            Commands::Progress => ("progress", None),
            Commands::Export { .. } => ("export", None),
            Commands::Import { .. } => ("import", None),
            Commands::Reset { .. } => ("reset", None),
            Commands::Meta { command } => ("meta", Some(command.name())),
            Commands::Overview { command } => ("overview", Some(command.name())),
            Commands::Goal { command } => ("goal", Some(command.name())),
            Commands::Phase { command } => ("phase", Some(command.name())),
            Commands::Task { command } => ("task", Some(command.name())),
            Commands::Section { command } => ("section", Some(command.name())),
            Commands::Field { command } => ("field", Some(command.name())),
            Commands::Tech { command } => ("tech", Some(command.name())),
            Commands::Risk { command } => ("risk", Some(command.name())),
            Commands::Comment { command } => ("comment", Some(command.name())),
            Commands::Config { command } => ("config", Some(command.name())),
            Commands::System { command } => ("system", Some(command.name())),
        };
        match sub {
            Some(sub) => format!("{} {}", group, sub),
            None => group.to_string(),
        }
    }
}

/// Meta subcommands
#[derive(Subcommand, Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MetaCommands {
    /// Set a header field
    Set {
        /// Field name (title, subtitle, brand-name)
        field: String,
        /// New value
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Set a theme color
    Color {
        /// Color role (primary, dark, light, accent, surface, border)
        role: String,
        /// Hex color, e.g. #0055A4
        hex: String,
    },
}

impl MetaCommands {
    fn name(&self) -> &'static str {
        match self {
            MetaCommands::Set { .. } => "set",
            MetaCommands::Color { .. } => "color",
        }
    }
}

/// Overview subcommands
#[derive(Subcommand, Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverviewCommands {
    /// Show the summary and goals
    Show,

    /// Replace the summary text
    SetSummary {
        /// New summary
        #[arg(allow_hyphen_values = true)]
        summary: String,
    },
}

impl OverviewCommands {
    fn name(&self) -> &'static str {
        match self {
            OverviewCommands::Show => "show",
            OverviewCommands::SetSummary { .. } => "set-summary",
        }
    }
}

/// Goal subcommands
#[derive(Subcommand, Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GoalCommands {
    /// Append an empty goal
    Add,

    /// Remove a goal
    Rm {
        /// Goal index
        index: usize,
    },

    /// Set a goal field
    Set {
        /// Goal index
        index: usize,
        /// Field name (goal, desc)
        field: String,
        /// New value
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// List goals
    List,
}

impl GoalCommands {
    fn name(&self) -> &'static str {
        match self {
            GoalCommands::Add => "add",
            GoalCommands::Rm { .. } => "rm",
            GoalCommands::Set { .. } => "set",
            GoalCommands::List => "list",
        }
    }
}

/// Phase subcommands
#[derive(Subcommand, Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PhaseCommands {
    /// Append a new phase (id one past the current maximum)
    Add,

    /// Remove a phase and its tasks
    Rm {
        /// Phase index
        index: usize,
    },

    /// Set a phase field
    Set {
        /// Phase index
        index: usize,
        /// Field name (title, weeks, icon, summary)
        field: String,
        /// New value
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// List phases with progress
    List,
}

impl PhaseCommands {
    fn name(&self) -> &'static str {
        match self {
            PhaseCommands::Add => "add",
            PhaseCommands::Rm { .. } => "rm",
            PhaseCommands::Set { .. } => "set",
            PhaseCommands::List => "list",
        }
    }
}

/// Task subcommands
#[derive(Subcommand, Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskCommands {
    /// Append an empty task to a phase
    Add {
        /// Phase index
        phase: usize,
    },

    /// Remove a task
    Rm {
        /// Phase index
        phase: usize,
        /// Task index within the phase
        task: usize,
    },

    /// Set a task field
    Set {
        /// Phase index
        phase: usize,
        /// Task index within the phase
        task: usize,
        /// Field name (task, detail)
        field: String,
        /// New value
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Mark a task done, or undone if it already is
    Toggle {
        /// Task id (e.g., 1-2)
        id: String,
    },

    /// List tasks with completion state
    List {
        /// Only list tasks of this phase index
        #[arg(long)]
        phase: Option<usize>,
    },
}

impl TaskCommands {
    fn name(&self) -> &'static str {
        match self {
            TaskCommands::Add { .. } => "add",
            TaskCommands::Rm { .. } => "rm",
            TaskCommands::Set { .. } => "set",
            TaskCommands::Toggle { .. } => "toggle",
            TaskCommands::List { .. } => "list",
        }
    }
}

/// Section subcommands
#[derive(Subcommand, Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionCommands {
    /// Append a new section
    Add,

    /// Remove a section and its fields
    Rm {
        /// Section index
        index: usize,
    },

    /// Set a section field
    Set {
        /// Section index
        index: usize,
        /// Field name (name, layout, color)
        field: String,
        /// New value
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// List sections with their fields
    List,
}

impl SectionCommands {
    fn name(&self) -> &'static str {
        match self {
            SectionCommands::Add => "add",
            SectionCommands::Rm { .. } => "rm",
            SectionCommands::Set { .. } => "set",
            SectionCommands::List => "list",
        }
    }
}

/// Field subcommands
#[derive(Subcommand, Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldCommands {
    /// Append a Text field to a section
    Add {
        /// Section index
        section: usize,
    },

    /// Remove a field
    Rm {
        /// Section index
        section: usize,
        /// Field index within the section
        index: usize,
    },

    /// Set a field attribute
    Set {
        /// Section index
        section: usize,
        /// Field index within the section
        index: usize,
        /// Attribute (name, type)
        field: String,
        /// New value; types are Text, Textarea, Rich Text, Image, Link, Date, Repeater
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
}

impl FieldCommands {
    fn name(&self) -> &'static str {
        match self {
            FieldCommands::Add { .. } => "add",
            FieldCommands::Rm { .. } => "rm",
            FieldCommands::Set { .. } => "set",
        }
    }
}

/// Tech stack subcommands
#[derive(Subcommand, Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TechCommands {
    /// Add an empty category (name is lowercased, spaces become underscores)
    AddCategory {
        /// Category name
        name: String,
    },

    /// Append an empty item to a category
    Add {
        /// Category key
        category: String,
    },

    /// Remove an item
    Rm {
        /// Category key
        category: String,
        /// Item index within the category
        index: usize,
    },

    /// Set an item field
    Set {
        /// Category key
        category: String,
        /// Item index within the category
        index: usize,
        /// Field name (name, purpose, cost, note, details)
        field: String,
        /// New value
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// List categories and items
    List,
}

impl TechCommands {
    fn name(&self) -> &'static str {
        match self {
            TechCommands::AddCategory { .. } => "add-category",
            TechCommands::Add { .. } => "add",
            TechCommands::Rm { .. } => "rm",
            TechCommands::Set { .. } => "set",
            TechCommands::List => "list",
        }
    }
}

/// Risk subcommands
#[derive(Subcommand, Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskCommands {
    /// Append a new Medium risk
    Add,

    /// Remove a risk
    Rm {
        /// Risk index
        index: usize,
    },

    /// Set a risk field
    Set {
        /// Risk index
        index: usize,
        /// Field name (risk, impact, mitigation)
        field: String,
        /// New value; impact is Low, Medium or High
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// List risks
    List,
}

impl RiskCommands {
    fn name(&self) -> &'static str {
        match self {
            RiskCommands::Add => "add",
            RiskCommands::Rm { .. } => "rm",
            RiskCommands::Set { .. } => "set",
            RiskCommands::List => "list",
        }
    }
}

/// Comment subcommands
#[derive(Subcommand, Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommentCommands {
    /// Add a comment to a section
    ///
    /// Section ids: overview-summary, phase-<id>, section-<layout>, tech-<n>, risk-<n>.
    Add {
        /// Section id the comment is attached to
        section: String,
        /// Comment text
        #[arg(allow_hyphen_values = true)]
        text: String,
        /// Author name (remembered for later comments)
        #[arg(short = 'a', long)]
        author: Option<String>,
    },

    /// Delete a comment
    Rm {
        /// Comment id
        id: String,
    },

    /// List comments
    List {
        /// Only list comments for this section id
        #[arg(long)]
        section: Option<String>,
    },
}

impl CommentCommands {
    fn name(&self) -> &'static str {
        match self {
            CommentCommands::Add { .. } => "add",
            CommentCommands::Rm { .. } => "rm",
            CommentCommands::List { .. } => "list",
        }
    }
}

/// Config subcommands
#[derive(Subcommand, Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConfigCommands {
    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
        /// Write the system config instead of this store's session config
        #[arg(long)]
        system: bool,
    },

    /// List all configuration values
    List,
}

impl ConfigCommands {
    fn name(&self) -> &'static str {
        match self {
            ConfigCommands::Get { .. } => "get",
            ConfigCommands::Set { .. } => "set",
            ConfigCommands::List => "list",
        }
    }
}

/// System subcommands
#[derive(Subcommand, Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SystemCommands {
    /// Show version, build and store locations
    Info,
}

impl SystemCommands {
    fn name(&self) -> &'static str {
        match self {
            SystemCommands::Info => "info",
        }
    }
}
