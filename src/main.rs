use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use taskflow::auth::{LocalIdentity, Route};
use taskflow::board::TaskBoard;
use taskflow::config::{load_config, session_path, Config};
use taskflow::logging::init_file_logging;
use taskflow::project::aggregate;
use taskflow::store::{seed_demo_tasks, JsonFileStore, MemoryStore, TaskStore};
use taskflow::ui::run_app;
use taskflow::{filter_tasks, Choice, FilterCriteria, Priority, TaskStatus};

#[derive(Parser)]
#[command(name = "taskflow", version, about = "Task manager with per-category projects")]
struct Cli {
    /// Task file (overrides config)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Keep tasks in memory only
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive board (default)
    Ui {
        /// Open a project's detail view after sign-in
        #[arg(long)]
        project: Option<String>,
    },
    /// Print tasks matching the filters
    List {
        #[arg(long, value_parser = parse_status)]
        status: Option<TaskStatus>,
        #[arg(long, value_parser = parse_priority)]
        priority: Option<Priority>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        json: bool,
    },
    /// Print per-category project statistics
    Projects {
        #[arg(long)]
        json: bool,
    },
}

fn parse_status(s: &str) -> Result<TaskStatus, String> {
    TaskStatus::parse(s).ok_or_else(|| format!("unknown status \"{s}\""))
}

fn parse_priority(s: &str) -> Result<Priority, String> {
    Priority::parse(s).ok_or_else(|| format!("unknown priority \"{s}\""))
}

fn choice<T>(value: Option<T>) -> Choice<T> {
    value.map_or(Choice::All, Choice::Only)
}

async fn open_store(
    config: &Config,
    data: Option<PathBuf>,
    ephemeral: bool,
) -> Result<Arc<dyn TaskStore>, Box<dyn std::error::Error>> {
    if ephemeral {
        let store = MemoryStore::new();
        seed_demo_tasks(&store, None).await?;
        return Ok(Arc::new(store));
    }
    let path = data.unwrap_or_else(|| config.data_file());
    let store = JsonFileStore::new(path).with_page_limit(config.page_limit);
    if !store.exists().await {
        let seeded = seed_demo_tasks(&store, None).await?;
        info!(path = %store.path().display(), seeded, "created task file");
    }
    Ok(Arc::new(store))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut config = load_config()?;
    init_file_logging(&config.log_file())?;

    let store = open_store(&config, cli.data, cli.ephemeral).await?;

    match cli.command.unwrap_or(Command::Ui { project: None }) {
        Command::List {
            status,
            priority,
            category,
            search,
            json,
        } => {
            let criteria = FilterCriteria {
                status: choice(status),
                priority: choice(priority),
                category: choice(category),
                search_text: search,
            };
            let tasks = filter_tasks(&store.list(&[]).await?, &criteria);
            if json {
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else {
                for t in &tasks {
                    let check = if t.is_completed() { "x" } else { " " };
                    println!(
                        "[{}] {}  {}  {}  {}  (Due: {})",
                        check, t.title, t.category, t.priority, t.status, t.due_date
                    );
                }
            }
        }
        Command::Projects { json } => {
            let projects = aggregate(&store.list_all(&[]).await?);
            if json {
                println!("{}", serde_json::to_string_pretty(&projects)?);
            } else {
                for p in &projects {
                    println!(
                        "{:<12} {:>3}%  {} tasks ({} not started, {} in progress, {} completed)",
                        p.name,
                        p.completion_percentage(),
                        p.task_count,
                        p.status_counts.not_started,
                        p.status_counts.in_progress,
                        p.status_counts.completed
                    );
                }
            }
        }
        Command::Ui { project } => {
            let mut board = TaskBoard::new(store);
            board.dark_mode = config.theme.dark_mode;
            let identity = LocalIdentity::new(session_path());

            // Terminal setup
            enable_raw_mode()?;
            let mut stdout = io::stdout();
            execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
            let backend = CrosstermBackend::new(stdout);
            let mut terminal = Terminal::new(backend)?;

            let result = run_app(
                &mut terminal,
                &mut board,
                &identity,
                &mut config,
                project.map(Route::ProjectDetail),
            )
            .await;

            // Restore terminal
            disable_raw_mode()?;
            execute!(
                terminal.backend_mut(),
                LeaveAlternateScreen,
                DisableMouseCapture
            )?;
            terminal.show_cursor()?;

            if let Err(err) = result {
                eprintln!("{:?}", err);
            }
        }
    }
    Ok(())
}
