//! Terminal 2048 runner (default binary).
//!
//! Settings come from `TUI2048_*` environment variables (see `GameConfig::from_env`).
//! Set `TUI2048_LOG_PATH` to write engine logs to a file; `RUST_LOG` filters them.

use std::fs::OpenOptions;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tui_2048::core::{GameConfig, GameSnapshot, GameState, TileSpawner};
use tui_2048::input::{handle_key_event, should_quit};
use tui_2048::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_2048::types::{SLIDE_FRAMES, SLIDE_FRAME_MS, START_TILES};

fn main() -> Result<()> {
    init_logging()?;
    let config = GameConfig::from_env();
    info!(?config, "starting");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    let game = result?;

    info!(score = game.score(), "exiting");
    println!("{}", serde_json::to_string_pretty(&game.snapshot())?);
    Ok(())
}

fn init_logging() -> Result<()> {
    let Some(path) = std::env::var("TUI2048_LOG_PATH")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
    else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open log file {path}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, config: &GameConfig) -> Result<GameState> {
    let mut game = GameState::with_config(config);
    let mut spawner = TileSpawner::with_four_percent(config.seed, config.four_percent);
    spawn_start_tiles(&mut game, &mut spawner)?;

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);

    loop {
        draw(term, &view, &game.snapshot(), 1.0, &mut fb)?;

        let key = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => key,
            Event::Resize(..) => {
                term.invalidate();
                continue;
            }
            _ => continue,
        };

        if should_quit(key) {
            return Ok(game);
        }
        let Some(action) = handle_key_event(key) else {
            continue;
        };

        let outcome = match game.apply_action(action) {
            Ok(outcome) => outcome,
            Err(err) => {
                // The game is left as it was before the action.
                warn!(code = err.code(), %err, "action rejected");
                continue;
            }
        };

        match outcome {
            Some(outcome) if outcome.moved => {
                let snap = game.snapshot();
                for frame in 1..SLIDE_FRAMES {
                    draw(term, &view, &snap, frame as f32 / SLIDE_FRAMES as f32, &mut fb)?;
                    thread::sleep(Duration::from_millis(SLIDE_FRAME_MS as u64));
                }
                spawner.spawn(game.board_mut())?;
                if game.game_over() {
                    info!(score = game.score(), won = game.max_tile_exists(), "game over");
                }
            }
            Some(_) => {}
            None => spawn_start_tiles(&mut game, &mut spawner)?,
        }
    }
}

fn spawn_start_tiles(game: &mut GameState, spawner: &mut TileSpawner) -> Result<()> {
    for _ in 0..START_TILES {
        spawner.spawn(game.board_mut())?;
    }
    Ok(())
}

fn draw(
    term: &mut TerminalRenderer,
    view: &GameView,
    snap: &GameSnapshot,
    progress: f32,
    fb: &mut FrameBuffer,
) -> Result<()> {
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    view.render_frame_into(snap, progress, Viewport::new(w, h), fb);
    term.draw(fb)
}
