//! View — the scroll window over the buffer.
//!
//! A `View` holds the text-area dimensions, fixed when the session starts,
//! and the offsets of its top-left corner:
//!
//! - `rowoff` — index of the first visible row
//! - `coloff` — first visible render column
//!
//! [`View::scroll`] runs once per frame, before compositing. It recomputes
//! the cursor's render column `rx` and moves the offsets by the least amount
//! that brings the cursor back on screen. It never scrolls when the cursor
//! is already visible.

use crate::buffer::Buffer;
use crate::cursor::Cursor;

/// Scroll state plus the text-area size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct View {
    /// First visible row.
    pub rowoff: usize,
    /// First visible render column.
    pub coloff: usize,
    /// Cursor column in render coordinates, refreshed by [`scroll`](View::scroll).
    pub rx: usize,
    /// Height of the text area in rows.
    pub screenrows: usize,
    /// Width of the text area in columns.
    pub screencols: usize,
}

impl View {
    /// A view at the top-left of a `screencols` × `screenrows` text area.
    #[must_use]
    pub const fn new(screenrows: usize, screencols: usize) -> Self {
        Self {
            rowoff: 0,
            coloff: 0,
            rx: 0,
            screenrows,
            screencols,
        }
    }

    /// Recompute `rx` and adjust the offsets so the cursor is visible.
    pub fn scroll(&mut self, buf: &Buffer, cursor: &Cursor) {
        self.rx = buf.row(cursor.cy).map_or(0, |row| row.cx_to_rx(cursor.cx));

        if cursor.cy < self.rowoff {
            self.rowoff = cursor.cy;
        }
        if cursor.cy >= self.rowoff + self.screenrows {
            self.rowoff = (cursor.cy + 1).saturating_sub(self.screenrows);
        }

        if self.rx < self.coloff {
            self.coloff = self.rx;
        }
        if self.rx >= self.coloff + self.screencols {
            self.coloff = (self.rx + 1).saturating_sub(self.screencols);
        }
    }

    /// Whether the cursor lies inside the window. Meaningful after `scroll`.
    #[must_use]
    pub const fn contains(&self, cursor: &Cursor) -> bool {
        cursor.cy >= self.rowoff
            && cursor.cy < self.rowoff + self.screenrows
            && self.rx >= self.coloff
            && self.rx < self.coloff + self.screencols
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
