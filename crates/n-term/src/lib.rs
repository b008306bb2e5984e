// SPDX-License-Identifier: MIT
//
// n-term — Terminal engine for n-view.
//
// Everything between the viewer and the tty: the raw-mode guard that owns
// the line discipline, the window-size query, the byte source and the
// escape-sequence decoder that turns raw stdin into keys, the handful of
// ANSI sequences the viewer emits, and the output buffer that sends each
// frame in a single write.
//
// No TUI framework (ratatui, crossterm): raw termios and plain escape
// sequences. Every byte sent to the terminal is accounted for.

pub mod ansi;
pub mod error;
pub mod event_loop;
pub mod input;
pub mod output;
pub mod reader;
pub mod terminal;

pub use error::TermError;
