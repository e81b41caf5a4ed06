mod app;
mod bootstrap;
mod cli;
mod config;
mod dev_data;
mod logging;
mod notifier;
mod runtime;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use cli::{Cli, Commands};
use config::TodoConfig;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use notifier::TerminalNotifier;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use time::{OffsetDateTime, UtcOffset};
use todo_client::{HttpTodoApi, InMemoryTodoApi, ReminderScheduler, TaskStore, TodoApi};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // The local offset can only be read while the process is single-threaded.
    let local = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);

    match cli.command.unwrap_or(Commands::Run) {
        Commands::ConfigPath => print_config_path(),
        command => {
            logging::init_tracing(cli.verbose)?;
            let dev = matches!(command, Commands::Dev);
            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .context("Failed to start tokio runtime")?
                .block_on(run(dev, local))
        }
    }
}

fn print_config_path() -> Result<()> {
    let path = TodoConfig::config_path()?;
    if !path.exists() {
        TodoConfig::default().save()?;
        println!("Created default config at {}", path.display());
    }
    println!("{}", path.display());
    Ok(())
}

async fn run(dev: bool, local: UtcOffset) -> Result<()> {
    let config = TodoConfig::load()?;

    let (api, backend_label): (Arc<dyn TodoApi>, String) = if dev {
        let seeded = dev_data::seed_tasks(OffsetDateTime::now_utc());
        (
            Arc::new(InMemoryTodoApi::with_tasks(seeded)),
            "dev backend".to_string(),
        )
    } else {
        let api = HttpTodoApi::new(&config.api_url)
            .with_context(|| format!("Invalid api_url {:?}", config.api_url))?;
        (Arc::new(api), config.api_url.clone())
    };
    tracing::info!(backend = %backend_label, dev, "Starting todo-tui");

    let (notifier, mut notices) = TerminalNotifier::new(config.reminders.enabled);
    let scheduler = ReminderScheduler::new(Arc::new(notifier), config.reminders.settings(local));
    let store = TaskStore::new(api, scheduler);
    let mut app = App::new(store, local, backend_label);

    bootstrap::initialize_app_state(&mut app).await;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = runtime::run_app(&mut terminal, &mut app, &mut notices).await;
    app.store.shutdown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "UI loop failed");
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
