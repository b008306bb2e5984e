// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Output buffering — one frame, one write.
//
// OutputBuffer accumulates all ANSI bytes of a frame in memory so the whole
// frame reaches the terminal in a single write() syscall. Many small writes
// let the terminal paint half-updated screens; one write per frame removes
// the tearing entirely.
//
// Rust's `io::stdout()` is line buffered and would split a frame at its
// first "\r\n", so the stdout flush goes straight to fd 1 instead.

use std::io::{self, Write};

use crate::error::TermError;

/// One frame of terminal output, collected before it is sent.
///
/// Starts at 16 KB, which holds a full screen of text without growing.
#[derive(Debug)]
pub struct OutputBuffer {
    buf: Vec<u8>,
}

const DEFAULT_CAPACITY: usize = 16_384;

impl OutputBuffer {
    /// An empty frame buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(DEFAULT_CAPACITY),
        }
    }

    /// Bytes collected so far.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether nothing has been collected.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The collected bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Append raw bytes.
    #[inline]
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Append a single byte.
    #[inline]
    pub fn push(&mut self, byte: u8) {
        self.buf.push(byte);
    }

    /// Drop the contents, keeping the allocation for the next frame.
    #[inline]
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Write accumulated output to the terminal and clear the buffer.
    ///
    /// # Errors
    ///
    /// Returns [`TermError::Write`] if the write to fd 1 fails.
    pub fn flush_stdout(&mut self) -> Result<(), TermError> {
        if !self.buf.is_empty() {
            write_fd_all(&self.buf).map_err(TermError::Write)?;
            self.buf.clear();
        }
        Ok(())
    }

    /// Send the frame to `w` instead of the terminal, then empty the buffer.
    ///
    /// # Errors
    ///
    /// Propagates the writer's error; the buffer is left intact.
    pub fn flush_to(&mut self, w: &mut impl Write) -> io::Result<()> {
        if !self.buf.is_empty() {
            w.write_all(&self.buf)?;
            w.flush()?;
            self.buf.clear();
        }
        Ok(())
    }
}

impl Write for OutputBuffer {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        // Nothing to do: bytes leave only through flush_stdout() / flush_to().
        Ok(())
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Write all of `bytes` to fd 1.
///
/// A terminal accepts a whole frame in one `write`; the loop only matters
/// for pipes and pseudo-terminals under pressure.
#[cfg(unix)]
pub(crate) fn write_fd_all(mut bytes: &[u8]) -> io::Result<()> {
    while !bytes.is_empty() {
        let n = unsafe {
            libc::write(
                libc::STDOUT_FILENO,
                bytes.as_ptr().cast::<libc::c_void>(),
                bytes.len(),
            )
        };
        if n < 0 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                continue;
            }
            return Err(err);
        }
        if n == 0 {
            return Err(io::Error::from(io::ErrorKind::WriteZero));
        }
        #[allow(clippy::cast_sign_loss)] // n > 0 checked above.
        let written = n as usize;
        bytes = &bytes[written..];
    }
    Ok(())
}

#[cfg(not(unix))]
pub(crate) fn write_fd_all(bytes: &[u8]) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(bytes)?;
    stdout.flush()
}

// ─── Tests ───────────────────────────────────────────────────────────────────
