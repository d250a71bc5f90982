//! Command-line front-end for DevTasks.
//!
//! # Responsibility
//! - Play the UI layer: parse commands, call the core, render the list.
//! - Back confirmation and title prompts with terminal input.

mod prompt;
mod render;

use clap::{Parser, Subcommand, ValueEnum};
use devtasks_core::{
    init_logging, open_task_store, AppConfig, ClearOutcome, ConfigError, DefaultTaskStore,
    EditOutcome, MonotonicIdGenerator, Priority, SqliteKvStore, StorageError, SystemClock,
    TaskFilter, TaskId, TaskService, Theme,
};
use log::warn;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

#[derive(Parser, Debug)]
#[command(name = "devtasks", version, about = "Local to-do list manager")]
struct Cli {
    /// SQLite file holding tasks and preferences.
    #[arg(long, env = "DEVTASKS_DB", default_value = devtasks_core::config::DEFAULT_DB_FILE_NAME)]
    db: PathBuf,

    /// Absolute directory for log files; logging is off when unset.
    #[arg(long, env = "DEVTASKS_LOG_DIR")]
    log_dir: Option<PathBuf>,

    #[arg(long, env = "DEVTASKS_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a task at the top of the list.
    Add {
        title: String,
        #[arg(long, value_enum)]
        priority: Option<PriorityArg>,
    },
    /// Show tasks, optionally filtered and searched.
    List {
        #[arg(long, default_value = "all", value_parser = TaskFilter::from_str)]
        filter: TaskFilter,
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Flip a task between pending and done.
    Toggle { id: u64 },
    /// Delete a task.
    Delete { id: u64 },
    /// Change a task title; prompts when `--title` is omitted.
    Edit {
        id: u64,
        #[arg(long)]
        title: Option<String>,
    },
    /// Remove every completed task after confirmation.
    ClearCompleted {
        #[arg(long)]
        yes: bool,
    },
    /// Print the task counter.
    Summary,
    /// Show or change the theme preference.
    Theme {
        #[arg(value_enum, default_value_t = ThemeArg::Show)]
        action: ThemeArg,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PriorityArg {
    Low,
    Medium,
    High,
}

impl From<PriorityArg> for Priority {
    fn from(value: PriorityArg) -> Self {
        match value {
            PriorityArg::Low => Priority::Low,
            PriorityArg::Medium => Priority::Medium,
            PriorityArg::High => Priority::High,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ThemeArg {
    Show,
    Toggle,
    Light,
    Dark,
}

#[derive(Debug)]
enum CliError {
    Config(ConfigError),
    Logging(String),
    Storage(StorageError),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid configuration: {err}"),
            Self::Logging(message) => write!(f, "logging setup failed: {message}"),
            Self::Storage(err) => write!(f, "cannot open task store: {err}"),
        }
    }
}

impl std::error::Error for CliError {}

type CliService = TaskService<SqliteKvStore, SystemClock, MonotonicIdGenerator>;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("devtasks: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = AppConfig::new(cli.db);
    if let Some(dir) = cli.log_dir {
        config = config.with_log_dir(dir);
    }
    if let Some(level) = cli.log_level {
        config = config.with_log_level(level);
    }
    let config = config.validate().map_err(CliError::Config)?;

    if let Some(dir) = &config.log_dir {
        init_logging(&config.log_level, dir).map_err(CliError::Logging)?;
    }

    let kv = SqliteKvStore::open(&config.data_path).map_err(CliError::Storage)?;
    let store: DefaultTaskStore<SqliteKvStore> = open_task_store(kv);
    let mut service: CliService = TaskService::new(store);

    execute(&mut service, cli.command);

    if let Some(err) = service.store().last_persist_error() {
        warn!("event=cli_command module=cli status=degraded error={err}");
        eprintln!("warning: changes kept for this run but not saved: {err}");
    }
    Ok(())
}

fn execute(service: &mut CliService, command: Command) {
    match command {
        Command::Add { title, priority } => {
            match service.store_mut().add(&title, priority.map(Priority::from)) {
                Some(task) => println!("added #{} {}", task.id, task.title),
                None => println!("nothing added: title is empty"),
            }
        }
        Command::List { filter, search } => {
            service.set_filter(filter);
            service.set_search(search);
            print!("{}", render::task_list(&service.visible_tasks()));
            println!("{}", service.summary().label());
        }
        Command::Toggle { id } => {
            let id = TaskId::new(id);
            if service.store_mut().toggle_done(id) {
                let done = service.store().get(id).is_some_and(|task| task.done);
                println!("#{id} is now {}", if done { "done" } else { "pending" });
            } else {
                println!("no task #{id}");
            }
        }
        Command::Delete { id } => {
            let id = TaskId::new(id);
            if service.store_mut().delete(id) {
                println!("deleted #{id}");
            } else {
                println!("no task #{id}");
            }
        }
        Command::Edit { id, title } => {
            let id = TaskId::new(id);
            let outcome = match title {
                Some(title) => {
                    if service.store().get(id).is_none() {
                        EditOutcome::NotFound
                    } else if service.store_mut().edit_title(id, &title) {
                        EditOutcome::Applied
                    } else {
                        EditOutcome::Rejected
                    }
                }
                None => service.edit_title_with(id, &mut prompt::StdinTextInput),
            };
            match outcome {
                EditOutcome::Applied => println!("renamed #{id}"),
                EditOutcome::NotFound => println!("no task #{id}"),
                EditOutcome::Cancelled => println!("edit cancelled"),
                EditOutcome::Rejected => println!("title unchanged: new title is empty"),
            }
        }
        Command::ClearCompleted { yes } => {
            let outcome = if yes {
                service.clear_completed_with(&mut prompt::AlwaysConfirm)
            } else {
                service.clear_completed_with(&mut prompt::StdinConfirmation)
            };
            match outcome {
                ClearOutcome::Cleared(count) => println!("removed {count} completed task(s)"),
                ClearOutcome::Declined => println!("nothing removed"),
                ClearOutcome::NothingToClear => println!("no completed tasks"),
            }
        }
        Command::Summary => println!("{}", service.summary().label()),
        Command::Theme { action } => run_theme(service, action),
    }
}

fn run_theme(service: &mut CliService, action: ThemeArg) {
    let gateway = service.store_mut().gateway_mut();
    let result = match action {
        ThemeArg::Show => Ok(gateway.load_theme_preference()),
        ThemeArg::Toggle => gateway.toggle_theme(),
        ThemeArg::Light => gateway.save_theme_preference(Theme::Light).map(|()| Theme::Light),
        ThemeArg::Dark => gateway.save_theme_preference(Theme::Dark).map(|()| Theme::Dark),
    };
    match result {
        Ok(theme) => println!("theme: {theme}"),
        Err(err) => {
            warn!("event=theme_save module=cli status=error error={err}");
            eprintln!("warning: theme not saved: {err}");
        }
    }
}
