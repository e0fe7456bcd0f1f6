//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! Drawing only touches the framebuffer handed in.

use crate::core::GameSnapshot;
use crate::fb::{cluster_width, clusters, str_width, Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{Difficulty, Phase};

/// Size of the terminal area the view may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Frame rows, border included.
pub const FRAME_HEIGHT: u16 = 16;

const TITLE: &str = " EMOJI GUESS ";
const PANEL_BG: Rgb = Rgb::new(24, 24, 34);

// Row offsets inside the frame.
const ROW_EMOJI: u16 = 2;
const ROW_GUESS: u16 = 4;
const ROW_MESSAGE: u16 = 6;
const ROW_RULE_TOP: u16 = 8;
const ROW_STATS: u16 = 9;
const ROW_TIMER: u16 = 10;
const ROW_DIFFICULTY: u16 = 11;
const ROW_RULE_BOTTOM: u16 = 12;
const ROW_KEYS: u16 = 13;

/// A lightweight terminal renderer for the guessing game.
pub struct GameView {
    /// Preferred frame width in columns; shrinks to fit narrow terminals.
    frame_w: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            frame_w: 56,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(frame_w: u16) -> Self {
        Self {
            frame_w,
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render a snapshot plus the current guess text into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames; it is only resized
    /// when the terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, guess: &str, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let frame_w = self.frame_w.min(viewport.width);
        let frame_h = FRAME_HEIGHT.min(viewport.height);
        if frame_w < 4 || frame_h < 4 {
            return;
        }

        let x0 = viewport.width.saturating_sub(frame_w) / 2;
        let y0 = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        let inner_w = frame_w - 2;

        let base = CellStyle {
            fg: Rgb::new(220, 220, 220),
            bg: PANEL_BG,
            bold: false,
            dim: false,
        };
        let border = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };

        fb.fill_rect(x0 + 1, y0 + 1, inner_w, frame_h - 2, ' ', base);
        draw_border(fb, x0, y0, frame_w, frame_h, border);
        put_centered(fb, x0, y0, frame_w, TITLE, border.bold());

        let row = |r: u16| {
            let y = y0 + r;
            (y < y0 + frame_h - 1).then_some(y)
        };
        let left = x0 + 2;

        // Puzzle.
        if let Some(y) = row(ROW_EMOJI) {
            match snap.phase {
                Phase::GameOver => {
                    let over = CellStyle::fg(Rgb::new(255, 90, 90)).bold();
                    put_centered(fb, x0, y, frame_w, "GAME OVER", CellStyle { bg: PANEL_BG, ..over });
                }
                Phase::Idle => {
                    let idle = CellStyle { dim: true, ..base };
                    put_centered(fb, x0, y, frame_w, "Press F5 to start", idle);
                }
                Phase::Active | Phase::BetweenRounds => {
                    put_centered(fb, x0, y, frame_w, &snap.emojis, base.bold());
                }
            }
        }

        // Guess field.
        if let Some(y) = row(ROW_GUESS) {
            let enabled = snap.controls.guess;
            let label = CellStyle { dim: !enabled, ..base.bold() };
            let field = CellStyle {
                fg: Rgb::new(255, 255, 255),
                bg: Rgb::new(45, 45, 60),
                bold: false,
                dim: !enabled,
            };
            let fx = fb.put_str(left, y, "Guess ", label);
            let fw = (x0 + frame_w - 2).saturating_sub(fx);
            fb.fill_rect(fx, y, fw, 1, ' ', field);
            let end = fb.put_str(fx, y, tail_fitting(guess, fw.saturating_sub(1)), field);
            if enabled {
                fb.put_char(end, y, '▏', field);
            }
        }

        // Feedback.
        if let Some(y) = row(ROW_MESSAGE) {
            let style = CellStyle {
                fg: message_color(&snap.message),
                ..base
            };
            put_centered(fb, x0, y, frame_w, &snap.message, style);
        }

        for r in [ROW_RULE_TOP, ROW_RULE_BOTTOM] {
            if let Some(y) = row(r) {
                let rule = CellStyle { dim: true, ..base };
                fb.fill_rect(x0 + 1, y, inner_w, 1, '─', rule);
            }
        }

        let label = CellStyle {
            fg: Rgb::new(150, 150, 170),
            ..base
        };
        let value = base.bold();

        if let Some(y) = row(ROW_STATS) {
            let mut x = fb.put_str(left, y, "SCORE ", label);
            x = fb.put_u32(x, y, snap.score, value);
            x = fb.put_str(x + 3, y, "STREAK ", label);
            x = fb.put_u32(x, y, snap.streak, value);
            x = fb.put_str(x + 3, y, "ATTEMPTS ", label);
            x = fb.put_u32(x, y, snap.attempts_used, value);
            x = fb.put_str(x, y, "/", label);
            fb.put_u32(x, y, snap.max_attempts, value);
        }

        if let Some(y) = row(ROW_TIMER) {
            let low = snap.remaining_secs <= 10 && snap.phase.is_running();
            let time_style = if low {
                CellStyle { fg: Rgb::new(255, 90, 90), ..value }
            } else {
                value
            };
            let mut x = fb.put_str(left, y, "TIME ", label);
            x = fb.put_u32(x, y, snap.remaining_secs, time_style);
            x = fb.put_str(x, y, "s ", time_style);
            let bar_x = x + 1;
            let bar_w = (x0 + frame_w - 2).saturating_sub(bar_x);
            draw_timer_bar(fb, bar_x, y, bar_w, snap.remaining_secs, snap.max_secs, time_style);
        }

        if let Some(y) = row(ROW_DIFFICULTY) {
            let mut x = fb.put_str(left, y, "LEVEL ", label);
            for (i, d) in Difficulty::ALL.iter().enumerate() {
                let selected = *d == snap.difficulty;
                let style = if selected {
                    CellStyle {
                        fg: Rgb::new(20, 20, 28),
                        bg: Rgb::new(240, 200, 90),
                        bold: true,
                        dim: false,
                    }
                } else {
                    label
                };
                x = fb.put_str(x, y, "F", style);
                x = fb.put_u32(x, y, (i as u32) + 1, style);
                x = fb.put_str(x, y, " ", style);
                x = fb.put_str(x, y, difficulty_label(*d), style);
                x += 2;
            }
        }

        if let Some(y) = row(ROW_KEYS) {
            let c = snap.controls;
            let key = CellStyle { fg: Rgb::new(130, 200, 255), ..base };
            let mut x = left;
            for (enabled, k, what) in [
                (c.guess, "Enter", "guess"),
                (c.hint, "^T", "hint"),
                (c.skip, "Tab", "skip"),
                (c.start, "F5", snap.start_label),
                (true, "Esc", "quit"),
            ] {
                x = fb.put_str(x, y, k, CellStyle { dim: !enabled, ..key });
                x = fb.put_str(x + 1, y, what, CellStyle { dim: !enabled, ..label });
                x += 2;
            }
        }
    }

    /// Render into a freshly allocated framebuffer.
    pub fn render(&self, snap: &GameSnapshot, guess: &str, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, guess, viewport, &mut fb);
        fb
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn draw_timer_bar(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, remaining: u32, max: u32, style: CellStyle) {
    if w == 0 {
        return;
    }
    let filled = if max == 0 {
        0
    } else {
        ((remaining.min(max) as u64 * w as u64) / max as u64) as u16
    };
    fb.fill_rect(x, y, filled, 1, '█', CellStyle { bold: false, ..style });
    fb.fill_rect(x + filled, y, w - filled, 1, '░', CellStyle { dim: true, bold: false, ..style });
}

/// Center `text` within `[x, x + w)`, clipped to the inner area.
fn put_centered(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, text: &str, style: CellStyle) {
    let inner = w.saturating_sub(4);
    let text = head_fitting(text, inner);
    let tw = str_width(text);
    let cx = x + 2 + inner.saturating_sub(tw) / 2;
    fb.put_str(cx, y, text, style);
}

/// Longest prefix of `s` that fits in `cols` columns.
fn head_fitting(s: &str, cols: u16) -> &str {
    let mut used = 0u16;
    let mut end = 0;
    for cluster in clusters(s) {
        used = used.saturating_add(cluster_width(cluster));
        if used > cols {
            break;
        }
        end += cluster.len();
    }
    &s[..end]
}

/// Longest suffix of `s` that fits in `cols` columns (keeps the caret visible).
fn tail_fitting(s: &str, cols: u16) -> &str {
    let mut excess = str_width(s).saturating_sub(cols);
    let mut start = 0;
    for cluster in clusters(s) {
        if excess == 0 {
            break;
        }
        excess = excess.saturating_sub(cluster_width(cluster));
        start += cluster.len();
    }
    &s[start..]
}

fn difficulty_label(d: Difficulty) -> &'static str {
    match d {
        Difficulty::Easy => "Easy",
        Difficulty::Medium => "Medium",
        Difficulty::Hard => "Hard",
    }
}

fn message_color(message: &str) -> Rgb {
    match message.chars().next() {
        Some('✅') => Rgb::new(110, 220, 120),
        Some('❌') | Some('☠') => Rgb::new(255, 110, 110),
        Some('💡') => Rgb::new(240, 200, 90),
        _ => Rgb::new(220, 220, 220),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fitting_respects_wide_glyphs() {
        assert_eq!(head_fitting("🍕🍝x", 3), "🍕");
        assert_eq!(head_fitting("abc", 10), "abc");
        assert_eq!(head_fitting("⏭\u{FE0F} x", 2), "⏭\u{FE0F}");
        assert_eq!(tail_fitting("hello", 3), "llo");
        assert_eq!(tail_fitting("a🍕", 2), "🍕");
    }

    #[test]
    fn timer_bar_scales_with_remaining() {
        let mut fb = FrameBuffer::new(10, 1);
        draw_timer_bar(&mut fb, 0, 0, 10, 60, 120, CellStyle::default());
        let filled = fb.cells().iter().filter(|c| c.ch() == '█').count();
        assert_eq!(filled, 5);
    }

    #[test]
    fn narrow_viewport_does_not_panic() {
        let view = GameView::default();
        for (w, h) in [(0, 0), (3, 3), (10, 5), (20, 40)] {
            let fb = view.render(&GameSnapshot::default(), "guess", Viewport::new(w, h));
            assert_eq!((fb.width(), fb.height()), (w, h));
        }
    }
}
