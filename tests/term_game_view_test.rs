use std::path::PathBuf;

use emoji_guess::core::{GameSnapshot, GameState, MemoryStore};
use emoji_guess::store::parse_puzzles;
use emoji_guess::term::{str_width, AnchorY, FrameBuffer, GameView, Viewport, FRAME_HEIGHT};
use emoji_guess::types::{Difficulty, Phase, ROUND_ADVANCE_DELAY_MS};

fn screen_text(fb: &FrameBuffer) -> String {
    let mut all = String::new();
    for y in 0..fb.height() {
        for x in 0..fb.width() {
            all.push_str(fb.get(x, y).unwrap().symbol());
        }
        all.push('\n');
    }
    all
}

#[test]
fn term_view_renders_border_corners() {
    let snap = GameState::with_fallback(1).snapshot();
    let view = GameView::new(40).with_anchor_y(AnchorY::Top);
    let fb = view.render(&snap, "", Viewport::new(40, 30));

    let bottom = FRAME_HEIGHT - 1;
    assert_eq!(fb.get(0, 0).unwrap().ch(), '┌');
    assert_eq!(fb.get(39, 0).unwrap().ch(), '┐');
    assert_eq!(fb.get(0, bottom).unwrap().ch(), '└');
    assert_eq!(fb.get(39, bottom).unwrap().ch(), '┘');
}

#[test]
fn term_view_centers_frame_on_tall_viewports() {
    let snap = GameState::with_fallback(1).snapshot();
    let view = GameView::new(40);
    let fb = view.render(&snap, "", Viewport::new(40, FRAME_HEIGHT + 10));
    assert_eq!(fb.get(0, 5).unwrap().ch(), '┌');
}

#[test]
fn idle_screen_prompts_for_start() {
    let snap = GameState::with_fallback(1).snapshot();
    let fb = GameView::default().render(&snap, "", Viewport::new(80, 24));
    let text = screen_text(&fb);

    assert!(text.contains("EMOJI GUESS"));
    assert!(text.contains("Press F5 to start"));
    assert!(text.contains("TIME 60s"));
    assert!(text.contains("F5 Start"));
}

#[test]
fn running_screen_shows_puzzle_guess_and_stats() {
    let mut gs = GameState::with_fallback(9);
    gs.start();
    gs.submit_guess("wrong");
    let snap = gs.snapshot();

    let fb = GameView::default().render(&snap, "piz", Viewport::new(80, 24));
    let text = screen_text(&fb);

    assert!(text.contains(&snap.emojis));
    assert!(text.contains("Guess piz"));
    assert!(text.contains("Try again (attempts: 1/3)"));
    assert!(text.contains("SCORE 0"));
    assert!(text.contains("ATTEMPTS 1/3"));
    assert!(text.contains("TIME 57s"));
    assert!(text.contains("F5 Restart"));
}

#[test]
fn emoji_occupy_two_columns() {
    let mut gs = GameState::with_fallback(2);
    gs.start();
    let snap = gs.snapshot();
    let fb = GameView::default().render(&snap, "", Viewport::new(80, 24));

    let first = snap.emojis.chars().next().unwrap();
    let (x, y) = (0..fb.height())
        .flat_map(|y| (0..fb.width()).map(move |x| (x, y)))
        .find(|&(x, y)| fb.get(x, y).unwrap().ch() == first)
        .unwrap();
    assert!(fb.get(x + 1, y).unwrap().is_continuation());
}

#[test]
fn game_over_screen_dims_round_controls() {
    let mut gs = GameState::with_fallback(3);
    gs.select_difficulty(Difficulty::Hard);
    gs.start();
    gs.tick(31_000);
    let snap = gs.snapshot();
    assert_eq!(snap.phase, Phase::GameOver);

    let fb = GameView::default().render(&snap, "", Viewport::new(80, 24));
    let text = screen_text(&fb);
    assert!(text.contains("GAME OVER"));
    assert!(text.contains("Score: 0"));

    let row = text.lines().position(|l| l.contains("Enter guess")).unwrap() as u16;
    let line: String = text.lines().nth(row as usize).unwrap().to_string();
    let col = line.chars().position(|c| c == 'E').unwrap() as u16;
    assert!(fb.get(col, row).unwrap().style.dim);
    let f5 = line.find("F5").unwrap();
    let f5_col = line[..f5].chars().count() as u16;
    assert!(!fb.get(f5_col, row).unwrap().style.dim);
}

#[test]
fn selected_difficulty_is_highlighted() {
    let mut gs = GameState::with_fallback(1);
    gs.select_difficulty(Difficulty::Medium);
    let snap = gs.snapshot();
    let fb = GameView::default().render(&snap, "", Viewport::new(80, 24));
    let text = screen_text(&fb);

    let row = text.lines().position(|l| l.contains("LEVEL")).unwrap();
    let line = text.lines().nth(row).unwrap();
    let medium = line[..line.find("F2").unwrap()].chars().count() as u16;
    let easy = line[..line.find("F1").unwrap()].chars().count() as u16;
    assert!(fb.get(medium, row as u16).unwrap().style.bold);
    assert!(!fb.get(easy, row as u16).unwrap().style.bold);
}

/// Render on an 80x24 screen and check the frame's right edge is intact on
/// every row, which fails if any cluster was laid out at the wrong width.
fn assert_frame_intact(snap: &GameSnapshot) -> String {
    let view = GameView::default();
    let fb = view.render(snap, "", Viewport::new(80, 24));
    let (x0, y0, right) = (12, (24 - FRAME_HEIGHT) / 2, 12 + 56 - 1);
    assert_eq!(fb.get(x0, y0).unwrap().ch(), '┌');
    assert_eq!(fb.get(right, y0).unwrap().ch(), '┐');
    for y in y0 + 1..y0 + FRAME_HEIGHT - 1 {
        assert_eq!(fb.get(right, y).unwrap().ch(), '│', "row {y} of {:?}", snap.message);
    }
    screen_text(&fb)
}

#[test]
fn every_message_kind_keeps_its_glyphs_and_the_frame() {
    let mut gs = GameState::with_fallback(6);
    gs.start();
    let mut messages = Vec::new();

    gs.hint();
    messages.push(gs.snapshot());
    gs.submit_guess("wrong");
    messages.push(gs.snapshot());
    gs.submit_guess("wrong");
    gs.submit_guess("wrong");
    messages.push(gs.snapshot());
    gs.tick(ROUND_ADVANCE_DELAY_MS);

    let a = gs.current_puzzle().unwrap().answer.clone();
    gs.submit_guess(&a);
    messages.push(gs.snapshot());
    gs.tick(ROUND_ADVANCE_DELAY_MS);

    gs.skip();
    messages.push(gs.snapshot());
    gs.tick(120_000);
    messages.push(gs.snapshot());
    assert_eq!(gs.phase(), Phase::GameOver);

    let prefixes = ["💡", "❌", "☠\u{FE0F}", "✅", "⏭\u{FE0F}", "🕹\u{FE0F}"];
    for (snap, prefix) in messages.iter().zip(prefixes) {
        assert!(snap.message.starts_with(prefix), "{:?}", snap.message);
        let text = assert_frame_intact(snap);
        assert!(text.contains(&snap.message), "{:?} lost glyphs", snap.message);
    }
}

#[test]
fn bundled_puzzles_render_at_their_measured_width() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/puzzles.json");
    let records = parse_puzzles(&std::fs::read_to_string(path).unwrap()).unwrap();

    for record in records {
        let emojis = record.emojis.clone();
        assert_eq!(str_width(&emojis), 4, "{emojis}");

        let mut gs = GameState::new(vec![record], 1, MemoryStore::new());
        gs.start();
        let text = assert_frame_intact(&gs.snapshot());
        assert!(text.contains(&emojis), "{emojis} lost glyphs");
    }
}
