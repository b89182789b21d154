//! Roamy - discover travel destinations from the terminal
//!
//! A terminal UI for browsing, filtering and mapping locations served by the
//! locations REST API.

use std::io;
use std::panic;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use roamy::app::App;
use roamy::cache::ResponseCache;
use roamy::cli::{Cli, StartupAction, StartupConfig};
use roamy::config::Config;
use roamy::data::{HttpClient, LocationService, NewLocation};
use roamy::{logging, ui};

/// Tick interval of the event loop; also the debounce resolution
const TICK: Duration = Duration::from_millis(100);

/// Sets up a panic hook that restores the terminal before printing the panic message.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

/// Submits a new location and prints the stored record
async fn create(
    service: &LocationService,
    new_location: NewLocation,
) -> Result<(), Box<dyn std::error::Error>> {
    let created = service.create_location(&new_location).await.map_err(|err| {
        tracing::error!(error = %err, "failed to create location");
        err
    })?;
    println!("{}", serde_json::to_string_pretty(&created)?);
    Ok(())
}

async fn run_ui(
    service: LocationService,
    config: &Config,
    action: StartupAction,
) -> Result<(), Box<dyn std::error::Error>> {
    setup_panic_hook();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(service, config);
    app.start(action);

    let result = loop {
        if let Err(err) = terminal.draw(|f| ui::render(f, &app)) {
            break Err(err);
        }

        match event::poll(TICK) {
            Ok(true) => match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key, Instant::now());
                }
                Ok(_) => {}
                Err(err) => break Err(err),
            },
            Ok(false) => {}
            Err(err) => break Err(err),
        }

        app.drain_messages();
        app.tick(Instant::now());

        if app.should_quit {
            break Ok(());
        }
    };

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    result.map_err(Into::into)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = Config::resolve(cli.config.as_deref(), cli.api_url.clone())?;

    let log_path = config.log_path();
    let guard = logging::init(&config.logging, log_path.as_deref())?;

    let startup = match StartupConfig::from_cli(&cli) {
        Ok(startup) => startup,
        Err(err) => {
            tracing::error!(error = %err, "invalid arguments");
            eprintln!("Error: {}", err);
            drop(guard);
            std::process::exit(2);
        }
    };

    let client = HttpClient::with_timeout(&config.api_url, config.request_timeout())?;
    let cache = ResponseCache::new(config.cache_ttl(), config.cache_capacity);
    let service = LocationService::new(Arc::new(client), cache);
    tracing::info!(api_url = %config.api_url, "starting roamy");

    match startup.action {
        StartupAction::Create(new_location) => create(&service, new_location).await,
        action => run_ui(service, &config, action).await,
    }
}
