use anyhow::{Context, Result as AnyhowResult};
use clap::Parser;
use crossterm::event::{poll as event_poll, read as event_read, Event as CrosstermEvent};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use explorer::app::input::{self, Action};
use explorer::app::Explorer;
use explorer::config::Config;
use explorer::model::environment::ProcessEnvironment;
use explorer::model::filesystem::StdFileSystem;
use explorer::services::notifier::QueuedNotifier;
use explorer::services::{log_dirs, tracing_setup};
use explorer::view::listing::DirectoryListing;
use ratatui::Terminal;
use std::{
    io::{self, stdout},
    path::PathBuf,
    sync::Arc,
    time::Duration,
};

/// A lightweight terminal file explorer
#[derive(Parser, Debug)]
#[command(name = "file-explorer")]
#[command(about = "Browse drives and folders from the terminal", long_about = None)]
#[command(version)]
struct Args {
    /// Directory to open (environment placeholders such as %TEMP% or ~ are expanded)
    #[arg(value_name = "PATH")]
    path: Option<String>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Path to log file for diagnostics (default: state directory)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,
}

type ExplorerTerminal = Terminal<ratatui::backend::CrosstermBackend<io::Stdout>>;

fn load_config(args: &Args) -> AnyhowResult<Config> {
    match &args.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(Config::default_path()
            .map(Config::load_or_default)
            .unwrap_or_default()),
    }
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(stdout(), LeaveAlternateScreen);
}

fn setup_terminal() -> AnyhowResult<ExplorerTerminal> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    execute!(stdout(), EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        restore_terminal();
        original_hook(panic);
    }));

    let backend = ratatui::backend::CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
    terminal.clear()?;
    Ok(terminal)
}

fn run_event_loop(
    terminal: &mut ExplorerTerminal,
    explorer: &mut Explorer<DirectoryListing>,
    notifier: &QueuedNotifier,
    config: &Config,
) -> AnyhowResult<()> {
    loop {
        let notification = notifier.current();
        terminal.draw(|frame| {
            explorer::ui::draw(
                frame,
                explorer,
                config.tree.width_percent,
                notification.as_ref(),
            )
        })?;

        if !event_poll(Duration::from_millis(250))? {
            continue;
        }

        let CrosstermEvent::Key(key) = event_read()? else {
            continue;
        };

        let Some(action) = input::map_key(key, explorer.focus(), notification.is_some()) else {
            continue;
        };

        match action {
            Action::Quit => return Ok(()),
            Action::Dismiss => {
                notifier.dismiss();
            }
            action => {
                // Toolbar, borders and status bar take six rows
                let page = terminal.size()?.height.saturating_sub(6) as usize;
                input::apply(explorer, action, page);
            }
        }
    }
}

fn main() -> AnyhowResult<()> {
    let args = Args::parse();

    let config = load_config(&args)?;

    if args.dump_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    let log_file = args.log_file.clone().unwrap_or_else(log_dirs::main_log_path);
    if !tracing_setup::init_global(&log_file) {
        eprintln!("Warning: could not open log file {}", log_file.display());
    }
    log_dirs::cleanup_stale_logs();
    tracing::info!("File explorer starting");

    let fs = Arc::new(StdFileSystem);
    let notifier = Arc::new(QueuedNotifier::new());
    let listing = DirectoryListing::new(fs.clone()).with_show_hidden(config.show_hidden);
    let mut explorer = Explorer::new(
        fs,
        Arc::new(ProcessEnvironment),
        notifier.clone(),
        listing,
        &config,
    );

    let start = args.path.clone().or_else(|| config.start_directory.clone());
    explorer.start(start.as_deref());

    let mut terminal = setup_terminal()?;
    let result = run_event_loop(&mut terminal, &mut explorer, &notifier, &config);
    restore_terminal();
    terminal.show_cursor()?;

    tracing::info!("File explorer exiting");
    result
}
