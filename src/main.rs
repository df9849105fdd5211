//! Terminal Tone Puzzle runner (default binary).
//!
//! Uses crossterm for input and the framebuffer-based renderer from
//! `tone_puzzle::term`. The game is turn-based, so the loop blocks on input
//! and redraws after every event.

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::info;

use tone_puzzle::config::Config;
use tone_puzzle::core::{GameSnapshot, GameState};
use tone_puzzle::input::{handle_key_event, should_quit};
use tone_puzzle::scores::ScoreKeeper;
use tone_puzzle::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

fn main() -> Result<()> {
    let config = Config::load();
    init_logging(&config)?;

    let seed = config.resolve_seed();
    info!(seed, scores = %config.scores_path.display(), "starting tone puzzle");

    let mut scores = ScoreKeeper::open(&config.scores_path);

    let mut term = TerminalRenderer::new();
    let mut game_state = GameState::new(seed);

    let result = term
        .enter()
        .and_then(|()| run(&mut term, &mut game_state, &mut scores));

    // Always try to restore terminal state.
    let _ = term.exit();

    scores.finish(&game_state);
    // The total is read back from the store, so it only counts saved episodes.
    match scores.total() {
        Some(total) => println!("Score: {}  (total {})", game_state.score(), total),
        None => println!("Score: {}", game_state.score()),
    }
    result
}

fn init_logging(config: &Config) -> Result<()> {
    let Some(path) = &config.log_path else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(config.log_level)
        .init();
    Ok(())
}

fn run(
    term: &mut TerminalRenderer,
    game_state: &mut GameState,
    scores: &mut ScoreKeeper,
) -> Result<()> {
    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game_state.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    return Ok(());
                }
                if let Some(action) = handle_key_event(key) {
                    scores.apply_action(game_state, action);
                }
            }
            Event::Resize(_, _) => term.invalidate(),
            _ => {}
        }
    }
}
