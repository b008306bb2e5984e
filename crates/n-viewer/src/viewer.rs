//! Viewer — the session state and its key bindings.
//!
//! A `Viewer` owns everything one viewing session needs: the loaded
//! [`Buffer`], the [`Cursor`], the scroll [`View`] and the transient
//! [`StatusMessage`]. It plugs into n-term's event loop through the
//! [`App`] trait:
//!
//! - [`paint`](App::paint) scrolls, then composes the frame.
//! - [`on_key`](App::on_key) dispatches one decoded key.
//!
//! # Key bindings
//!
//! | Key               | Effect                                           |
//! |-------------------|--------------------------------------------------|
//! | `Ctrl-Q`          | quit                                             |
//! | arrows            | move, wrapping across line ends horizontally     |
//! | `Home` / `End`    | start / end of the current line                  |
//! | `PageUp`          | to the top of the window, then one screen up     |
//! | `PageDown`        | to the bottom of the window, then one screen down|
//!
//! Everything else is ignored.

use std::io::Write;
use std::time::Instant;

use n_term::event_loop::{Action, App};
use n_term::input::{ctrl, Key};
use n_term::output::OutputBuffer;
use n_term::terminal::Size;

use crate::buffer::Buffer;
use crate::cursor::Cursor;
use crate::options::{ViewerOptions, HELP_MESSAGE};
use crate::screen;
use crate::status::StatusMessage;
use crate::view::View;

/// Rows taken by the status bar and the message line.
const BAR_ROWS: usize = 2;

/// Quit key: `Ctrl-Q`.
pub const QUIT: u8 = ctrl(b'q');

/// One viewing session.
#[derive(Debug)]
pub struct Viewer {
    buffer: Buffer,
    cursor: Cursor,
    view: View,
    status: StatusMessage,
    options: ViewerOptions,
}

impl Viewer {
    /// A session over `buffer` with an explicit text-area size.
    ///
    /// Starts at the top-left with the help message showing.
    #[must_use]
    pub fn new(buffer: Buffer, view: View, options: ViewerOptions) -> Self {
        let mut status = StatusMessage::new();
        status.set(HELP_MESSAGE);
        Self {
            buffer,
            cursor: Cursor::new(),
            view,
            status,
            options,
        }
    }

    /// A session filling a terminal of `size`, minus the two bar rows.
    #[must_use]
    pub fn for_terminal(buffer: Buffer, size: Size, options: ViewerOptions) -> Self {
        let view = View::new(
            usize::from(size.rows).saturating_sub(BAR_ROWS),
            usize::from(size.cols),
        );
        tracing::debug!(
            screenrows = view.screenrows,
            screencols = view.screencols,
            "text area"
        );
        Self::new(buffer, view, options)
    }

    // -- Accessors ----------------------------------------------------------

    /// The loaded rows.
    #[inline]
    #[must_use]
    pub const fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// The cursor.
    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// The scroll window.
    #[inline]
    #[must_use]
    pub const fn view(&self) -> &View {
        &self.view
    }

    /// The status message.
    #[inline]
    #[must_use]
    pub const fn status(&self) -> &StatusMessage {
        &self.status
    }

    /// Replace the status message.
    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status.set(text);
    }

    // -- Frame --------------------------------------------------------------

    /// Scroll and compose one frame as of `now`.
    ///
    /// # Errors
    ///
    /// Propagates write errors from `w`.
    pub fn draw(&mut self, w: &mut impl Write, now: Instant) -> std::io::Result<()> {
        self.view.scroll(&self.buffer, &self.cursor);

        let message = self
            .status
            .visible_at(now, self.options.message_timeout)
            .then(|| self.status.text());

        screen::draw_frame(w, &self.buffer, &self.cursor, &self.view, message)
    }

    // -- Input --------------------------------------------------------------

    /// Apply one key. Returns [`Action::Quit`] for `Ctrl-Q`.
    pub fn process_key(&mut self, key: Key) -> Action {
        let buf = &self.buffer;
        let cur = &mut self.cursor;

        match key {
            Key::Byte(QUIT) => return Action::Quit,

            Key::Home => cur.home(),
            Key::End => cur.end(buf),

            Key::PageUp => {
                cur.cy = self.view.rowoff;
                for _ in 0..self.view.screenrows {
                    cur.move_up(buf);
                }
                cur.clamp(buf);
            }
            Key::PageDown => {
                cur.cy = (self.view.rowoff + self.view.screenrows.saturating_sub(1))
                    .min(buf.num_rows());
                for _ in 0..self.view.screenrows {
                    cur.move_down(buf);
                }
                cur.clamp(buf);
            }

            Key::ArrowLeft => cur.move_left(buf),
            Key::ArrowRight => cur.move_right(buf),
            Key::ArrowUp => cur.move_up(buf),
            Key::ArrowDown => cur.move_down(buf),

            Key::Byte(_) | Key::Delete | Key::Escape => {}
        }

        Action::Continue
    }
}

impl App for Viewer {
    fn paint(&mut self, out: &mut OutputBuffer) {
        if let Err(err) = self.draw(out, Instant::now()) {
            tracing::error!(%err, "frame composition failed");
        }
    }

    fn on_key(&mut self, key: Key) -> Action {
        self.process_key(key)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
