//! Terminal Emoji Guess runner (default binary).
//!
//! Uses crossterm for input and a custom framebuffer-based renderer
//! (no widget/layout library). Configuration comes from `EMOJI_GUESS_*`
//! environment variables, see `emoji_guess::store::config`.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use emoji_guess::core::{GameSnapshot, GameState, KeyValueStore};
use emoji_guess::input::{should_quit, InputHandler};
use emoji_guess::store::{init_tracing, AppConfig, JsonFileStore, JsonPuzzleSource};
use emoji_guess::term::{FrameBuffer, GameView, RenderThrottle, TerminalRenderer, Viewport};
use emoji_guess::types::{GameAction, FRAME_MS};

/// Redraw interval when nothing on screen changed.
const STATIC_REDRAW_MS: u64 = 1000;

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    let logging = init_tracing(config.log_path.as_deref());

    let source = JsonPuzzleSource::new(&config.puzzles_path);
    let store = JsonFileStore::open(&config.state_path);
    let game = GameState::from_source(&source, config.seed, store);
    tracing::info!(
        seed = config.seed,
        puzzles = game.queue().len(),
        logging,
        "emoji guess ready"
    );

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, game);

    // Leave raw mode even when the loop failed.
    let _ = term.exit();
    if let Err(err) = &result {
        tracing::error!(%err, "terminal loop failed");
    }
    result
}

fn run<S: KeyValueStore>(term: &mut TerminalRenderer, mut game: GameState<S>) -> Result<()> {
    let view = GameView::default();
    let mut input = InputHandler::new();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut throttle = RenderThrottle::new(STATIC_REDRAW_MS);

    let started = Instant::now();
    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(FRAME_MS as u64);
    let mut shown = (0u32, 0u32);

    loop {
        game.snapshot_into(&mut snap);

        // A new puzzle (or a new game) starts with an empty field.
        if shown != (snap.game_id, snap.round_id) {
            shown = (snap.game_id, snap.round_id);
            input.clear();
        }

        // Draw when the throttle allows.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let now_ms = started.elapsed().as_millis() as u64;
        let resized = (w, h) != (fb.width(), fb.height());
        if throttle.should_render(now_ms, fingerprint(&snap, input.guess()), resized) {
            view.render_into(&snap, input.guess(), Viewport::new(w, h), &mut fb);
            term.draw_swap(&mut fb)?;
        }

        // Wait for a key at most until the next tick is due.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        tracing::info!(score = game.score(), "quit");
                        return Ok(());
                    }

                    match input.handle_key_press(key, snap.controls.guess) {
                        Some(GameAction::Submit) => {
                            let guess = input.take_guess();
                            game.submit_guess(&guess);
                        }
                        Some(action) => {
                            game.apply_action(action);
                        }
                        None => {}
                    }
                }
                Event::Resize(..) => {
                    term.invalidate();
                    throttle.reset();
                }
                _ => {}
            }
        }

        // Advance game time.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            game.tick(FRAME_MS);
        }
    }
}

fn fingerprint(snap: &GameSnapshot, guess: &str) -> u64 {
    let mut h = DefaultHasher::new();
    snap.hash(&mut h);
    guess.hash(&mut h);
    h.finish()
}
