//! Cursor — position in source coordinates with boundary-aware movement.
//!
//! `cx` is a byte column into the row's `chars`, `cy` a row index. The row
//! index may equal the row count: that is the virtual empty line after the
//! last row, where the cursor lands when it walks off the end of the file.
//!
//! Every movement keeps two invariants:
//!
//! - `cy <= buffer.num_rows()`
//! - `cx <= buffer.row_len(cy)` (0 on the virtual line)
//!
//! Horizontal movement wraps across line boundaries. After any movement the
//! column is clamped to the new row, so moving down from a long line onto a
//! short one snaps to its end.

use crate::buffer::Buffer;

/// The cursor position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    /// Byte column in the current row.
    pub cx: usize,
    /// Row index, `0..=num_rows`.
    pub cy: usize,
}

impl Cursor {
    /// A cursor at the top-left corner.
    #[must_use]
    pub const fn new() -> Self {
        Self { cx: 0, cy: 0 }
    }

    /// A cursor at a specific position. Not clamped.
    #[must_use]
    pub const fn at(cx: usize, cy: usize) -> Self {
        Self { cx, cy }
    }

    // -- Movement -----------------------------------------------------------

    /// One column left; at column 0, to the end of the previous row.
    pub fn move_left(&mut self, buf: &Buffer) {
        if self.cx > 0 {
            self.cx -= 1;
        } else if self.cy > 0 {
            self.cy -= 1;
            self.cx = buf.row_len(self.cy);
        }
        self.clamp(buf);
    }

    /// One column right; at the end of a row, to the start of the next.
    ///
    /// Does nothing on the virtual line past the end.
    pub fn move_right(&mut self, buf: &Buffer) {
        if let Some(row) = buf.row(self.cy) {
            if self.cx < row.len() {
                self.cx += 1;
            } else {
                self.cy += 1;
                self.cx = 0;
            }
        }
        self.clamp(buf);
    }

    /// One row up, stopping at the first row.
    pub fn move_up(&mut self, buf: &Buffer) {
        self.cy = self.cy.saturating_sub(1);
        self.clamp(buf);
    }

    /// One row down, stopping at the virtual line past the end.
    pub fn move_down(&mut self, buf: &Buffer) {
        if self.cy < buf.num_rows() {
            self.cy += 1;
        }
        self.clamp(buf);
    }

    /// Column 0.
    pub const fn home(&mut self) {
        self.cx = 0;
    }

    /// Past the last byte of the current row (0 on the virtual line).
    pub fn end(&mut self, buf: &Buffer) {
        self.cx = buf.row_len(self.cy);
    }

    /// Pull the cursor back inside the buffer.
    pub fn clamp(&mut self, buf: &Buffer) {
        self.cy = self.cy.min(buf.num_rows());
        self.cx = self.cx.min(buf.row_len(self.cy));
    }

    /// Whether the cursor satisfies the position invariants for `buf`.
    #[must_use]
    pub fn is_valid(&self, buf: &Buffer) -> bool {
        self.cy <= buf.num_rows() && self.cx <= buf.row_len(self.cy)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
