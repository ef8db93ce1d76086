//! `campus` — terminal UI for the campus management API.
//!
//! # Usage
//!
//! ```
//! campus --url http://localhost:8080
//! campus --config ~/.config/campus/config.toml
//! ```

mod app;
mod bind;
mod screens;
mod ui;

use std::{io, path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use app::{App, Route};
use campus_client::{ApiClient, ApiConfig, SessionHandle};
use campus_core::session::SessionStore;
use clap::Parser;
use crossterm::{
  event::{self, Event},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use serde::Deserialize;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "campus", about = "Terminal UI for the campus management API")]
struct Args {
  /// Path to a TOML config file (url, session_file, log_file).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the campus server (default: http://localhost:8080).
  #[arg(long, env = "CAMPUS_URL")]
  url: Option<String>,

  /// Where to persist the signed-in session between runs. Omit to keep
  /// the session in memory only.
  #[arg(long, env = "CAMPUS_SESSION_FILE", value_name = "FILE")]
  session_file: Option<PathBuf>,

  /// Append logs to this file; the terminal itself is owned by the UI.
  #[arg(long, env = "CAMPUS_LOG_FILE", value_name = "FILE")]
  log_file: Option<PathBuf>,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url:          String,
  #[serde(default)]
  session_file: Option<PathBuf>,
  #[serde(default)]
  log_file:     Option<PathBuf>,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  // Load config file if provided.
  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let base_url = args
    .url
    .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
    .unwrap_or_else(|| "http://localhost:8080".to_string());
  let session_file = args.session_file.or(file_cfg.session_file);
  let log_file = args.log_file.or(file_cfg.log_file);

  init_logging(log_file.as_deref())?;

  let store = match session_file {
    Some(path) => SessionStore::open(path).context("opening session file")?,
    None => SessionStore::in_memory(),
  };
  let session = SessionHandle::new(store);
  let client = ApiClient::new(ApiConfig { base_url }, session)
    .context("building API client")?;
  let mut app = App::new(client);

  // A persisted session skips the login screen; the backend will reject
  // the token on first use if it has expired.
  let landing = match app.client.session().role() {
    Some(role) => Route::home_for(role),
    None => Route::Home,
  };

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  let load_result = app.navigate(landing).await;

  // Run the event loop; restore terminal even on error.
  let run_result = if load_result.is_ok() {
    run_event_loop(&mut terminal, &mut app).await
  } else {
    load_result
  };

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

/// Route tracing to a file (or discard it): stdout belongs to ratatui.
fn init_logging(log_file: Option<&std::path::Path>) -> Result<()> {
  use tracing_subscriber::EnvFilter;

  let filter = EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| EnvFilter::new("campus=info,campus_client=info"));

  match log_file {
    Some(path) => {
      let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
      tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Arc::new(file))
        .with_ansi(false)
        .init();
    }
    None => {
      tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::sink)
        .init();
    }
  }
  Ok(())
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
) -> Result<()> {
  loop {
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    if let Some(evt) = maybe_event {
      match evt {
        Event::Key(key) => {
          let cont = app.handle_key(key).await?;
          if !cont {
            break;
          }
        }
        Event::Resize(_, _) => {
          // Redraws on the next iteration.
        }
        _ => {}
      }
    }
  }
  Ok(())
}
