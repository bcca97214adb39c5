use std::fs::{self, File};
use std::io::{self, IsTerminal, Read, Stderr, Write, stderr};
use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use tracing::{debug, error, info};
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, layer::SubscriberExt};

use tablefy::controller::Controller;
use tablefy::domain::{TVError, TableConfig};
use tablefy::model::{Model, Status};
use tablefy::parser;
use tablefy::ui::{TableUI, render_plain};

const LOG_ENV_VAR: &str = "TABLEFY_LOG";

/// Page through tabular command output (kubectl, docker, ps, helm, ...)
/// and pick out rows and columns.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Read the table from FILE instead of stdin
    file: Option<String>,
    /// Widen the focused column when its cells are truncated
    #[arg(short, long)]
    auto_expand: bool,
    /// Print the table fitted to the terminal and exit
    #[arg(short, long)]
    print: bool,
    /// Write logs to this file (level via TABLEFY_LOG, default info)
    #[arg(long)]
    log_file: Option<String>,
    /// Milliseconds to wait for terminal events between redraws
    #[arg(long, default_value_t = 100)]
    poll_ms: u64,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Err(e) => {
            error!("Exiting with error: {e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::SUCCESS,
    }
}

fn run(args: Args) -> Result<(), TVError> {
    init_logging(args.log_file.as_deref())?;

    let cfg = TableConfig::default()
        .with_auto_expand(args.auto_expand)
        .with_event_poll_time(args.poll_ms);

    let input = read_input(args.file.as_deref())?;
    let table = parser::parse_table(&input);
    if table.is_empty() {
        println!("No data found to format");
        return Ok(());
    }

    let (width, height) = terminal_size(&cfg);
    if args.print {
        println!("{}", render_plain(&table, width));
        return Ok(());
    }

    let model = run_session(Model::init(table, &cfg, width, height), &cfg)?;
    if model.status == Status::Exporting
        && let Some(text) = model.export_text()
    {
        info!("Exporting {} bytes", text.len());
        let mut out = io::stdout().lock();
        writeln!(out, "{text}")?;
    }
    Ok(())
}

fn init_logging(log_file: Option<&str>) -> Result<(), TVError> {
    let file_layer = match log_file {
        Some(path) => {
            let path = shellexpand::full(path)?;
            let file = File::create(path.as_ref())?;
            let filter =
                EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info"));
            Some(
                fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_filter(filter),
            )
        }
        None => None,
    };

    let subscriber = Registry::default()
        .with(file_layer)
        .with(ErrorLayer::default());
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| TVError::LoggingSetup(e.to_string()))
}

fn read_input(file: Option<&str>) -> Result<String, TVError> {
    match file {
        Some(path) => {
            let path = shellexpand::full(path)?;
            debug!("Reading table from {path}");
            Ok(fs::read_to_string(path.as_ref())?)
        }
        None => {
            let mut stdin = io::stdin();
            if stdin.is_terminal() {
                return Err(TVError::NoInput);
            }
            let mut input = String::new();
            stdin.read_to_string(&mut input)?;
            debug!("Read {} bytes from stdin", input.len());
            Ok(input)
        }
    }
}

fn terminal_size(cfg: &TableConfig) -> (usize, usize) {
    match ratatui::crossterm::terminal::size() {
        Ok((width, height)) if width > 0 && height > 0 => (width as usize, height as usize),
        _ => {
            debug!("Terminal size unknown, using {:?}", cfg.fallback_size);
            cfg.fallback_size
        }
    }
}

/// Runs the interactive loop on stderr so stdout stays free for the export.
fn run_session(model: Model, cfg: &TableConfig) -> Result<Model, TVError> {
    let mut terminal = setup_terminal()?;
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        hook(info);
    }));

    let result = event_loop(&mut terminal, model, cfg);

    restore_terminal()?;
    terminal.show_cursor()?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    mut model: Model,
    cfg: &TableConfig,
) -> Result<Model, TVError> {
    let controller = Controller::new(cfg);
    let ui = TableUI::default();

    while model.status == Status::Running {
        // Render the current view
        terminal.draw(|f| ui.draw(&model, f))?;

        // Handle events and map to a Message
        if let Some(message) = controller.handle_event(&model)? {
            model = model.update(message);
        }
    }
    debug!("Session ended with {:?}", model.status);
    Ok(model)
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stderr>>, TVError> {
    enable_raw_mode()?;
    execute!(stderr(), EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stderr()))?)
}

fn restore_terminal() -> Result<(), TVError> {
    disable_raw_mode()?;
    execute!(stderr(), LeaveAlternateScreen)?;
    Ok(())
}
