// ABOUTME: Main entry point for the Pointer Toasts terminal playground

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    Terminal,
};
use std::{
    io,
    path::PathBuf,
    time::{Duration, Instant},
};

use pointer_toasts::app::{App, EventHandler};
use pointer_toasts::components::LayoutComponent;
use pointer_toasts::config::NotificationConfig;
use pointer_toasts::notify::Scheduler;

#[derive(Debug, Parser)]
#[command(name = "pointer-toasts", about = "Toast notification playground")]
struct Cli {
    /// Path to a notifications.toml overriding the defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the maximum number of live toasts
    #[arg(long)]
    capacity: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging();
    setup_panic_handler();

    let mut config = match &cli.config {
        Some(path) => NotificationConfig::load(path)?,
        None => NotificationConfig::load_default()?,
    };
    if let Some(capacity) = cli.capacity {
        config.max_toasts = capacity;
        config.validate()?;
    }

    let scheduler = Scheduler::current().context("Timer scheduler unavailable")?;
    let mut app = App::new(config, scheduler);
    let mut layout = LayoutComponent::new();

    let result = run_tui(&mut app, &mut layout);
    app.shutdown();
    result
}

fn run_tui(app: &mut App, layout: &mut LayoutComponent) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    app.on_resize(size.width, size.height);

    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        if app.needs_ui_refresh() || last_tick.elapsed() >= tick_rate {
            terminal.draw(|frame| {
                layout.render(frame, &app.state);
            })?;
            last_tick = Instant::now();
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0))
            .min(Duration::from_millis(50));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key_event) => {
                    if let Some(app_event) = EventHandler::handle_key_event(key_event, &app.state) {
                        EventHandler::process_event(app_event, &mut app.state);
                    }
                }
                Event::Mouse(mouse) => {
                    if matches!(mouse.kind, MouseEventKind::Moved | MouseEventKind::Drag(_)) {
                        app.on_pointer_moved(mouse.column, mouse.row);
                    }
                }
                Event::Resize(width, height) => app.on_resize(width, height),
                Event::FocusGained | Event::FocusLost | Event::Paste(_) => {}
            }
        }

        if app.state.should_quit {
            break;
        }
    }

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}

fn setup_logging() {
    use std::fs::OpenOptions;
    use tracing_subscriber::prelude::*;

    let log_dir = dirs::home_dir()
        .map(|home| home.join(".pointer-toasts").join("logs"))
        .unwrap_or_else(|| PathBuf::from(".pointer-toasts/logs"));

    let _ = std::fs::create_dir_all(&log_dir);

    let log_file = log_dir.join(format!(
        "pointer-toasts-{}.log",
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    ));

    // Logging must never stop the UI from starting
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_file) else {
        eprintln!("Could not open log file {}, logging disabled", log_file.display());
        return;
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(file)
                .with_ansi(false) // No ANSI colors in log file
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pointer_toasts=info".into())
        )
        .init();
}

fn setup_panic_handler() {
    use tracing::error;

    std::panic::set_hook(Box::new(|panic_info| {
        // Ensure terminal is restored before logging the panic
        let _ = disable_raw_mode();
        let _ = execute!(
            std::io::stderr(),
            LeaveAlternateScreen,
            DisableMouseCapture
        );

        error!("Application panicked: {}", panic_info);
        eprintln!("Application panicked: {}", panic_info);
        eprintln!("Please check the logs for more details.");
    }));
}
