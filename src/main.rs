//! Planboard CLI - view and edit a project migration plan.

use clap::Parser;
use planboard::action_log::{self, ActionLog};
use planboard::cli::{
    Cli, CommentCommands, Commands, ConfigCommands, FieldCommands, GoalCommands, MetaCommands,
    OverviewCommands, PhaseCommands, RiskCommands, SectionCommands, SystemCommands, TaskCommands,
    TechCommands,
};
use planboard::commands::{self, Output};
use planboard::config::{ConfigOverrides, OutputFormat, ResolvedConfig, resolve_config};
use planboard::logging;
use planboard::storage::{Storage, get_store_dir};
use std::env;
use std::path::PathBuf;
use std::process;
use std::time::Instant;

fn main() {
    logging::init();
    let cli = Cli::parse();

    let store_dir = match resolve_store_dir(cli.store) {
        Ok(dir) => dir,
        Err(e) => exit_with_error(&e, cli.human_readable),
    };
    let mut storage = match Storage::open(&store_dir) {
        Ok(storage) => storage,
        Err(e) => exit_with_error(&e, cli.human_readable),
    };

    let mut overrides = ConfigOverrides::new();
    if cli.human_readable {
        overrides = overrides.with_output_format(OutputFormat::Human);
    }
    let config = resolve_config(&storage, &overrides).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "falling back to default config");
        ResolvedConfig::default()
    });
    let human = *config.output_format() == OutputFormat::Human;

    let command = cli.command.unwrap_or(Commands::Show);
    let cmd_name = command.name();
    let args_json = serde_json::to_value(&command).unwrap_or_default();

    let start = Instant::now();
    let result = run_command(command, &mut storage, &config, human);
    let duration = start.elapsed().as_millis() as u64;

    if config.action_log_enabled() {
        let error = result.as_ref().err().map(|e| e.to_string());
        action_log::log_action(&ActionLog::new(
            &store_dir, &cmd_name, args_json, error, duration,
        ));
    }

    if let Err(e) = result {
        exit_with_error(&e, human);
    }
}

/// Store directory: --store flag or PB_STORE env var, else derived from the
/// current working directory.
fn resolve_store_dir(explicit: Option<PathBuf>) -> planboard::Result<PathBuf> {
    match explicit {
        Some(dir) => Ok(dir),
        None => {
            let cwd = env::current_dir()?;
            get_store_dir(&cwd)
        }
    }
}

fn exit_with_error(e: &planboard::Error, human: bool) -> ! {
    if human {
        eprintln!("Error: {}", e);
    } else {
        eprintln!("{}", serde_json::json!({ "error": e.to_string() }));
    }
    process::exit(1);
}

fn run_command(
    command: Commands,
    storage: &mut Storage,
    config: &ResolvedConfig,
    human: bool,
) -> Result<(), planboard::Error> {
    match command {
        Commands::Show => output(&commands::show(storage)?, human),
        Commands::Theme => output(&commands::theme(storage)?, human),
        Commands::Timeline => output(&commands::timeline(storage)?, human),
        Commands::Progress => output(&commands::progress(storage)?, human),

        Commands::Export { output: path } => {
            output(&commands::export(storage, path.as_deref())?, human)
        }
        Commands::Import { file } => output(&commands::import(storage, &file)?, human),
        Commands::Reset { yes } => output(&commands::reset(storage, yes)?, human),

        Commands::Meta { command } => match command {
            MetaCommands::Set { field, value } => {
                output(&commands::meta_set(storage, &field, &value)?, human)
            }
            MetaCommands::Color { role, hex } => {
                output(&commands::meta_color(storage, &role, &hex)?, human)
            }
        },

        Commands::Overview { command } => match command {
            OverviewCommands::Show => output(&commands::overview_show(storage)?, human),
            OverviewCommands::SetSummary { summary } => {
                output(&commands::overview_set_summary(storage, &summary)?, human)
            }
        },

        Commands::Goal { command } => match command {
            GoalCommands::Add => output(&commands::goal_add(storage)?, human),
            GoalCommands::Rm { index } => output(&commands::goal_remove(storage, index)?, human),
            GoalCommands::Set {
                index,
                field,
                value,
            } => output(&commands::goal_set(storage, index, &field, &value)?, human),
            GoalCommands::List => output(&commands::goal_list(storage)?, human),
        },

        Commands::Phase { command } => match command {
            PhaseCommands::Add => output(&commands::phase_add(storage)?, human),
            PhaseCommands::Rm { index } => output(&commands::phase_remove(storage, index)?, human),
            PhaseCommands::Set {
                index,
                field,
                value,
            } => output(&commands::phase_set(storage, index, &field, &value)?, human),
            PhaseCommands::List => output(&commands::phase_list(storage)?, human),
        },

        Commands::Task { command } => match command {
            TaskCommands::Add { phase } => output(&commands::task_add(storage, phase)?, human),
            TaskCommands::Rm { phase, task } => {
                output(&commands::task_remove(storage, phase, task)?, human)
            }
            TaskCommands::Set {
                phase,
                task,
                field,
                value,
            } => output(
                &commands::task_set(storage, phase, task, &field, &value)?,
                human,
            ),
            TaskCommands::Toggle { id } => output(&commands::task_toggle(storage, &id)?, human),
            TaskCommands::List { phase } => output(&commands::task_list(storage, phase)?, human),
        },

        Commands::Section { command } => match command {
            SectionCommands::Add => output(&commands::section_add(storage)?, human),
            SectionCommands::Rm { index } => {
                output(&commands::section_remove(storage, index)?, human)
            }
            SectionCommands::Set {
                index,
                field,
                value,
            } => output(&commands::section_set(storage, index, &field, &value)?, human),
            SectionCommands::List => output(&commands::section_list(storage)?, human),
        },

        Commands::Field { command } => match command {
            FieldCommands::Add { section } => output(&commands::field_add(storage, section)?, human),
            FieldCommands::Rm { section, index } => {
                output(&commands::field_remove(storage, section, index)?, human)
            }
            FieldCommands::Set {
                section,
                index,
                field,
                value,
            } => output(
                &commands::field_set(storage, section, index, &field, &value)?,
                human,
            ),
        },

        Commands::Tech { command } => match command {
            TechCommands::AddCategory { name } => {
                output(&commands::tech_add_category(storage, &name)?, human)
            }
            TechCommands::Add { category } => output(&commands::tech_add(storage, &category)?, human),
            TechCommands::Rm { category, index } => {
                output(&commands::tech_remove(storage, &category, index)?, human)
            }
            TechCommands::Set {
                category,
                index,
                field,
                value,
            } => output(
                &commands::tech_set(storage, &category, index, &field, &value)?,
                human,
            ),
            TechCommands::List => output(&commands::tech_list(storage)?, human),
        },

        Commands::Risk { command } => match command {
            RiskCommands::Add => output(&commands::risk_add(storage)?, human),
            RiskCommands::Rm { index } => output(&commands::risk_remove(storage, index)?, human),
            RiskCommands::Set {
                index,
                field,
                value,
            } => output(&commands::risk_set(storage, index, &field, &value)?, human),
            RiskCommands::List => output(&commands::risk_list(storage)?, human),
        },

        Commands::Comment { command } => match command {
            CommentCommands::Add {
                section,
                text,
                author,
            } => output(
                &commands::comment_add(
                    storage,
                    &section,
                    &text,
                    author.as_deref(),
                    config.author(),
                )?,
                human,
            ),
            CommentCommands::Rm { id } => output(&commands::comment_remove(storage, &id)?, human),
            CommentCommands::List { section } => {
                output(&commands::comment_list(storage, section.as_deref())?, human)
            }
        },

        Commands::Config { command } => match command {
            ConfigCommands::Get { key } => output(&commands::config_get(config, &key)?, human),
            ConfigCommands::Set { key, value, system } => {
                output(&commands::config_set(storage, &key, &value, system)?, human)
            }
            ConfigCommands::List => output(&commands::config_list(config), human),
        },

        Commands::System { command } => match command {
            SystemCommands::Info => output(&commands::system_info(storage, config), human),
        },
    }

    Ok(())
}

/// Print output in JSON or human-readable format.
fn output<T: Output>(result: &T, human: bool) {
    if human {
        println!("{}", result.to_human());
    } else {
        println!("{}", result.to_json());
    }
}
