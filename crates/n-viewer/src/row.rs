//! Row — one line of the loaded file.
//!
//! A row stores two byte strings:
//!
//! - **`chars`** — the line exactly as it was read, newline stripped.
//!   Cursor columns (`cx`) index into this.
//! - **`render`** — what actually goes on screen: every tab replaced by
//!   spaces up to the next tab stop. Render columns (`rx`) index into this.
//!
//! `render` is derived. It is rebuilt from `chars` by [`Row::update_render`]
//! and never touched otherwise, so the two can't drift apart.
//!
//! Columns are bytes. A multi-byte UTF-8 character counts as several
//! columns; no display-width handling happens here.

/// A single line: source bytes plus their tab-expanded rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    chars: Vec<u8>,
    render: Vec<u8>,
    tab_stop: usize,
}

impl Row {
    /// Build a row from raw line bytes and compute its rendering.
    ///
    /// `bytes` must not contain the line terminator. A `tab_stop` of 0 is
    /// treated as 1.
    #[must_use]
    pub fn new(bytes: impl Into<Vec<u8>>, tab_stop: usize) -> Self {
        let mut row = Self {
            chars: bytes.into(),
            render: Vec::new(),
            tab_stop: tab_stop.max(1),
        };
        row.update_render();
        row
    }

    /// The source bytes.
    #[inline]
    #[must_use]
    pub fn chars(&self) -> &[u8] {
        &self.chars
    }

    /// The tab-expanded bytes.
    #[inline]
    #[must_use]
    pub fn render(&self) -> &[u8] {
        &self.render
    }

    /// Length of the source bytes, the upper bound for `cx`.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Whether the row has no bytes.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Width of the rendered line.
    #[inline]
    #[must_use]
    pub fn render_len(&self) -> usize {
        self.render.len()
    }

    /// Rebuild `render` from `chars`.
    ///
    /// A tab becomes one space followed by more spaces until the column is
    /// a multiple of the tab stop. Every other byte is copied.
    pub fn update_render(&mut self) {
        let tabs = self.chars.iter().filter(|&&b| b == b'\t').count();
        let mut render = Vec::with_capacity(self.chars.len() + tabs * (self.tab_stop - 1));

        for &b in &self.chars {
            if b == b'\t' {
                render.push(b' ');
                while render.len() % self.tab_stop != 0 {
                    render.push(b' ');
                }
            } else {
                render.push(b);
            }
        }

        self.render = render;
    }

    /// Convert a source column to a render column.
    ///
    /// Walks `chars[..cx]`; a tab advances to the next tab stop, any other
    /// byte advances by one. `cx` past the end is clamped.
    #[must_use]
    pub fn cx_to_rx(&self, cx: usize) -> usize {
        let mut rx = 0;
        for &b in self.chars.iter().take(cx) {
            if b == b'\t' {
                rx += (self.tab_stop - 1) - (rx % self.tab_stop);
            }
            rx += 1;
        }
        rx
    }

    /// Convert a render column back to a source column.
    ///
    /// Returns the index of the byte whose rendering covers `rx`, or the row
    /// length when `rx` lies past the end.
    #[must_use]
    pub fn rx_to_cx(&self, rx: usize) -> usize {
        let mut cur_rx = 0;
        for (cx, &b) in self.chars.iter().enumerate() {
            if b == b'\t' {
                cur_rx += (self.tab_stop - 1) - (cur_rx % self.tab_stop);
            }
            cur_rx += 1;
            if cur_rx > rx {
                return cx;
            }
        }
        self.chars.len()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    // -- Rendering ----------------------------------------------------------

    #[test]
    fn plain_row_renders_verbatim() {
        let row = Row::new("hello", 8);
        assert_eq!(row.render(), b"hello");
        assert_eq!(row.len(), 5);
        assert_eq!(row.render_len(), 5);
    }

    #[test]
    fn tab_expands_to_next_stop() {
        let row = Row::new("a\tb", 8);
        assert_eq!(row.render(), b"a       b");
    }

    #[test]
    fn tab_at_stop_boundary_is_full_width() {
        let row = Row::new("12345678\tx", 8);
        assert_eq!(row.render(), b"12345678        x");
    }

    #[test]
    fn leading_tab_custom_stop() {
        let row = Row::new("\tx", 4);
        assert_eq!(row.render(), b"    x");
    }

    #[test]
    fn consecutive_tabs() {
        let row = Row::new("\t\t", 4);
        assert_eq!(row.render(), b"        ");
    }

    #[test]
    fn empty_row() {
        let row = Row::new(Vec::new(), 8);
        assert!(row.is_empty());
        assert!(row.render().is_empty());
        assert_eq!(row.cx_to_rx(0), 0);
    }

    #[test]
    fn zero_tab_stop_behaves_as_one() {
        let row = Row::new("a\tb", 0);
        assert_eq!(row.render(), b"a b");
    }

    #[test]
    fn non_utf8_bytes_are_kept() {
        let row = Row::new(vec![0xff, b'\t', 0xfe], 4);
        assert_eq!(row.render(), &[0xff, b' ', b' ', b' ', 0xfe]);
    }

    // -- Column mapping -----------------------------------------------------

    #[test]
    fn cx_to_rx_after_tab() {
        let row = Row::new("a\tb", 8);
        assert_eq!(row.cx_to_rx(0), 0);
        assert_eq!(row.cx_to_rx(1), 1);
        assert_eq!(row.cx_to_rx(2), 8);
        assert_eq!(row.cx_to_rx(3), 9);
    }

    #[test]
    fn cx_to_rx_clamps_past_end() {
        let row = Row::new("ab", 8);
        assert_eq!(row.cx_to_rx(10), 2);
    }

    #[test]
    fn rx_to_cx_inside_tab() {
        let row = Row::new("a\tb", 8);
        assert_eq!(row.rx_to_cx(0), 0);
        assert_eq!(row.rx_to_cx(1), 1);
        assert_eq!(row.rx_to_cx(5), 1);
        assert_eq!(row.rx_to_cx(7), 1);
        assert_eq!(row.rx_to_cx(8), 2);
        assert_eq!(row.rx_to_cx(50), 3);
    }

    // -- Properties ---------------------------------------------------------

    proptest! {
        #[test]
        fn cx_to_rx_is_identity_without_tabs(
            bytes in proptest::collection::vec(any::<u8>().prop_filter("no tab", |b| *b != b'\t'), 0..64),
        ) {
            let row = Row::new(bytes.clone(), 8);
            for cx in 0..=bytes.len() {
                prop_assert_eq!(row.cx_to_rx(cx), cx);
            }
            prop_assert_eq!(row.render(), bytes.as_slice());
        }

        #[test]
        fn render_never_shrinks_and_is_idempotent(
            bytes in proptest::collection::vec(prop_oneof![Just(b'\t'), any::<u8>()], 0..64),
            tab_stop in 1usize..12,
        ) {
            let mut row = Row::new(bytes, tab_stop);
            prop_assert!(row.render_len() >= row.len());

            let before = row.render().to_vec();
            row.update_render();
            prop_assert_eq!(row.render(), before.as_slice());
        }

        #[test]
        fn cx_to_rx_matches_render_width(
            bytes in proptest::collection::vec(prop_oneof![Just(b'\t'), Just(b'x')], 0..48),
            tab_stop in 1usize..12,
        ) {
            let row = Row::new(bytes, tab_stop);
            prop_assert_eq!(row.cx_to_rx(row.len()), row.render_len());
        }

        #[test]
        fn rx_to_cx_inverts_cx_to_rx(
            bytes in proptest::collection::vec(prop_oneof![Just(b'\t'), Just(b'x')], 0..48),
            tab_stop in 1usize..12,
        ) {
            let row = Row::new(bytes, tab_stop);
            for cx in 0..=row.len() {
                prop_assert_eq!(row.rx_to_cx(row.cx_to_rx(cx)), cx);
            }
        }
    }
}
