//! Application entry point — fingerspelling session over JSON lines.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Load the bigram and trigram tables; the session does not start until
//!    both loads have finished (failures degrade to empty tables).
//! 4. Spawn the [`SessionRunner`] and a task printing every view to stdout.
//! 5. Read [`HostEvent`](fingerspell::host::HostEvent) lines from stdin until
//!    EOF, then shut the runner down.

use std::sync::{Arc, PoisonError};

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;

use fingerspell::{
    config::{AppConfig, AppPaths},
    host::{HostDecoder, HostInput},
    pipeline::{frame_channel, new_shared_state, Session, SessionCommand, SessionRunner, SessionView},
    suggest::{load_tables, source_for, SuggestionEngine},
};

// ---------------------------------------------------------------------------
// Suggestion engine
// ---------------------------------------------------------------------------

async fn build_engine(config: &AppConfig, paths: &AppPaths) -> SuggestionEngine {
    let alphabet = config.alphabet.alphabet();
    if !config.suggest.enabled {
        log::info!("suggest: disabled in settings");
        return SuggestionEngine::disabled(alphabet);
    }

    let timeout = config.suggest.timeout();
    let bigram = source_for(&config.suggest.bigram_location(paths), timeout);
    let trigram = source_for(&config.suggest.trigram_location(paths), timeout);
    let tables = load_tables(bigram.as_ref(), trigram.as_ref()).await;

    SuggestionEngine::new(tables, alphabet).with_max_suggestions(config.suggest.max_suggestions)
}

// ---------------------------------------------------------------------------
// View printer
// ---------------------------------------------------------------------------

async fn print_views(mut views: mpsc::Receiver<SessionView>) -> Result<()> {
    let mut stdout = tokio::io::stdout();
    while let Some(view) = views.recv().await {
        let mut line = serde_json::to_string(&view).context("serialising view")?;
        line.push('\n');
        stdout.write_all(line.as_bytes()).await?;
        stdout.flush().await?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("fingerspell starting up");

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e:#}); using defaults");
        AppConfig::default()
    });
    let paths = AppPaths::new();

    // 3. N-gram tables
    let engine = build_engine(&config, &paths).await;
    if config.suggest.enabled && !engine.is_available() {
        log::warn!("suggest: no n-gram table loaded; suggestions disabled");
    }
    let state = new_shared_state();

    // 4. Session runner + view printer
    let (feed, frames_rx) = frame_channel();
    let (commands_tx, commands_rx) = mpsc::channel::<SessionCommand>(16);
    let (views_tx, views_rx) = mpsc::channel::<SessionView>(64);

    let runner = SessionRunner::new(Session::new(&config.session, engine), Arc::clone(&state))
        .with_updates(views_tx);
    let runner_task = tokio::spawn(runner.run(frames_rx, commands_rx));
    let printer_task = tokio::spawn(print_views(views_rx));

    // 5. Host events
    let decoder = HostDecoder::new(config.alphabet.alphabet(), config.alphabet.min_confidence);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut line_no = 0u64;

    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        line_no += 1;
        match decoder.parse_line(&line) {
            Ok(Some(HostInput::Frame(frame))) => {
                // Recorded input: wait for the slot instead of skipping.
                if !feed.send(frame).await {
                    break;
                }
            }
            Ok(Some(HostInput::Command(command))) => {
                if commands_tx.send(command).await.is_err() {
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => log::warn!("host: skipping line {line_no}: {e}"),
        }
    }

    log::info!("host: end of input after {line_no} lines, dropped {} frames", feed.dropped());
    // The runner may already be gone if a send above failed.
    let _ = commands_tx.send(SessionCommand::Shutdown).await;
    runner_task.await.context("session runner panicked")?;
    printer_task.await.context("view printer panicked")??;

    let frames = state
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .frames_processed;
    log::info!("fingerspell stopped after {frames} frames");

    Ok(())
}
