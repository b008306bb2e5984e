//! Screen compositor — one frame of output, built in memory.
//!
//! [`draw_frame`] writes a complete redraw into any [`Write`] sink, in a
//! fixed order:
//!
//! ```text
//! ESC[?25l ESC[H                       hide cursor, home
//! <row 0>   ESC[K \r\n                 text area: screenrows lines
//! ...
//! <row n-1> ESC[K \r\n
//! ESC[7m <status bar> ESC[m \r\n       inverted, exactly screencols wide
//! ESC[K <message>                      only while the message is fresh
//! ESC[<y>;<x>H ESC[?25h                place and show the cursor
//! ```
//!
//! Each text line is erased to the right with `ESC[K` instead of clearing
//! the whole screen up front, so nothing flashes between frames. The sink is
//! normally the event loop's output buffer, which reaches the terminal in a
//! single write.
//!
//! The compositor only reads. Scrolling must already have happened, so the
//! view's `rx` and offsets are current.

use std::io::{self, Write};

use n_term::ansi;

use crate::buffer::Buffer;
use crate::cursor::Cursor;
use crate::view::View;

/// Banner shown a third of the way down when no file is loaded.
pub const WELCOME: &str = concat!("n-view -- version ", env!("CARGO_PKG_VERSION"));

/// Status bar label for a buffer without a file.
pub const NO_NAME: &str = "[No Name]";

/// Longest file name shown in the status bar, in chars.
const FILENAME_WIDTH: usize = 20;

/// Write a complete frame.
///
/// `message` is the status message to show, already filtered for age by the
/// caller; `None` leaves the message line blank.
///
/// # Errors
///
/// Returns whatever error `w` reports. An [`OutputBuffer`] never fails.
///
/// [`OutputBuffer`]: n_term::output::OutputBuffer
pub fn draw_frame(
    w: &mut impl Write,
    buf: &Buffer,
    cursor: &Cursor,
    view: &View,
    message: Option<&str>,
) -> io::Result<()> {
    ansi::cursor_hide(w)?;
    ansi::cursor_home(w)?;

    draw_rows(w, buf, view)?;
    draw_status_bar(w, buf, cursor, view)?;
    draw_message_bar(w, view, message)?;

    ansi::cursor_to(
        w,
        view.rx.saturating_sub(view.coloff),
        cursor.cy.saturating_sub(view.rowoff),
    )?;
    ansi::cursor_show(w)
}

// ---------------------------------------------------------------------------
// Text area
// ---------------------------------------------------------------------------

/// The `screenrows` text lines, each ending in `ESC[K\r\n`.
///
/// # Errors
///
/// Propagates write errors from `w`.
pub fn draw_rows(w: &mut impl Write, buf: &Buffer, view: &View) -> io::Result<()> {
    for y in 0..view.screenrows {
        let filerow = y + view.rowoff;
        match buf.row(filerow) {
            Some(row) => {
                let render = row.render();
                let start = view.coloff.min(render.len());
                let end = (start + view.screencols).min(render.len());
                w.write_all(&render[start..end])?;
            }
            None if buf.is_empty() && y == view.screenrows / 3 => {
                draw_welcome(w, view.screencols)?;
            }
            None => w.write_all(b"~")?,
        }

        ansi::clear_line(w)?;
        w.write_all(b"\r\n")?;
    }
    Ok(())
}

/// The centered banner, with the `~` marker kept in column 0.
fn draw_welcome(w: &mut impl Write, screencols: usize) -> io::Result<()> {
    let len = WELCOME.len().min(screencols);
    let mut padding = (screencols - len) / 2;
    if padding > 0 {
        w.write_all(b"~")?;
        padding -= 1;
    }
    for _ in 0..padding {
        w.write_all(b" ")?;
    }
    w.write_all(&WELCOME.as_bytes()[..len])
}

// ---------------------------------------------------------------------------
// Status and message bars
// ---------------------------------------------------------------------------

/// The inverted status bar: file name and line count on the left, cursor
/// line over line count on the right, padded to exactly `screencols`.
///
/// The right part only appears if it fits after the left part.
///
/// # Errors
///
/// Propagates write errors from `w`.
pub fn draw_status_bar(
    w: &mut impl Write,
    buf: &Buffer,
    cursor: &Cursor,
    view: &View,
) -> io::Result<()> {
    let name = buf.filename().unwrap_or(NO_NAME);
    let left = format!(
        "{name:.FILENAME_WIDTH$} - {} lines",
        buf.num_rows()
    );
    let right = format!("{}/{}", cursor.cy + 1, buf.num_rows());

    ansi::inverse(w)?;

    let cols = view.screencols;
    let mut len = left.len().min(cols);
    w.write_all(&left.as_bytes()[..len])?;
    while len < cols {
        if cols - len == right.len() {
            w.write_all(right.as_bytes())?;
            break;
        }
        w.write_all(b" ")?;
        len += 1;
    }

    ansi::reset(w)?;
    w.write_all(b"\r\n")
}

/// The message line: cleared, then the message cut to `screencols` bytes.
///
/// # Errors
///
/// Propagates write errors from `w`.
pub fn draw_message_bar(w: &mut impl Write, view: &View, message: Option<&str>) -> io::Result<()> {
    ansi::clear_line(w)?;
    if let Some(msg) = message {
        let len = msg.len().min(view.screencols);
        w.write_all(&msg.as_bytes()[..len])?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
