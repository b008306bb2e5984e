//! Row store — the loaded file as an ordered list of rows.
//!
//! A `Buffer` is append-only: rows are added while a file is read and never
//! change afterwards. Each row computes its tab-expanded rendering as it is
//! appended, so the compositor only ever reads.
//!
//! Files are read as bytes. Lines are split on `\n`, and any trailing
//! `\r`/`\n` bytes are stripped, so CRLF files display cleanly. Invalid
//! UTF-8 is kept as-is.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::error::ViewerError;
use crate::options::TAB_STOP;
use crate::row::Row;

/// The rows of the file being viewed, plus its display name.
#[derive(Debug, Clone)]
pub struct Buffer {
    rows: Vec<Row>,
    filename: Option<String>,
    tab_stop: usize,
}

impl Buffer {
    /// An empty buffer with no file name, using the default tab stop.
    #[must_use]
    pub fn new() -> Self {
        Self::with_tab_stop(TAB_STOP)
    }

    /// An empty buffer with no file name.
    #[must_use]
    pub fn with_tab_stop(tab_stop: usize) -> Self {
        Self {
            rows: Vec::new(),
            filename: None,
            tab_stop: tab_stop.max(1),
        }
    }

    /// Load every line of `reader`.
    ///
    /// # Errors
    ///
    /// Returns the first I/O error from `reader`.
    pub fn from_reader(reader: impl BufRead, tab_stop: usize) -> io::Result<Self> {
        let mut buf = Self::with_tab_stop(tab_stop);
        buf.read_lines(reader)?;
        Ok(buf)
    }

    /// Load the file at `path` and remember its name for the status bar.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Open`] if the file cannot be opened or read.
    pub fn from_file(path: impl AsRef<Path>, tab_stop: usize) -> Result<Self, ViewerError> {
        let path = path.as_ref();
        let open_err = |source| ViewerError::Open {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(open_err)?;
        let mut buf = Self::from_reader(BufReader::new(file), tab_stop).map_err(open_err)?;
        buf.filename = Some(path.display().to_string());

        tracing::info!(path = %path.display(), rows = buf.num_rows(), "file loaded");
        Ok(buf)
    }

    fn read_lines(&mut self, mut reader: impl BufRead) -> io::Result<()> {
        let mut line = Vec::new();
        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line)? == 0 {
                return Ok(());
            }
            while matches!(line.last(), Some(b'\n' | b'\r')) {
                line.pop();
            }
            self.append_row(line.as_slice());
        }
    }

    /// Append a row. `bytes` must already have its line terminator removed.
    pub fn append_row(&mut self, bytes: impl Into<Vec<u8>>) {
        self.rows.push(Row::new(bytes, self.tab_stop));
    }

    /// Number of rows.
    #[inline]
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Whether the buffer holds no rows at all.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The row at `index`, or `None` past the end.
    #[inline]
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// All rows, in order.
    #[inline]
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Length of the row at `index`; 0 for the virtual line past the end.
    #[inline]
    #[must_use]
    pub fn row_len(&self, index: usize) -> usize {
        self.rows.get(index).map_or(0, Row::len)
    }

    /// The name shown in the status bar, if the buffer came from a file.
    #[inline]
    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// Set the display name.
    pub fn set_filename(&mut self, name: impl Into<String>) {
        self.filename = Some(name.into());
    }

    /// Tab stop used for every row.
    #[inline]
    #[must_use]
    pub const fn tab_stop(&self) -> usize {
        self.tab_stop
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
