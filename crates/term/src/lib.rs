//! Terminal rendering for the guessing game.
//!
//! Renders into a plain framebuffer that is then flushed to the terminal
//! backend, without any widget/layout library.
//!
//! - `core` stays deterministic and testable; this crate only reads snapshots
//! - emoji are laid out as two-column clusters, selectors included
//! - frames are diffed so only changed cells are written

pub mod fb;
pub mod game_view;
pub mod render_throttle;
pub mod renderer;

pub use emoji_guess_core as core;
pub use emoji_guess_types as types;

pub use fb::{cluster_width, clusters, str_width, Cell, CellStyle, FrameBuffer, Rgb, Symbol};
pub use game_view::{AnchorY, GameView, Viewport, FRAME_HEIGHT};
pub use render_throttle::RenderThrottle;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
