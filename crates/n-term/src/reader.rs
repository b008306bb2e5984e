// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Stdin byte source — one byte per read, bounded by the raw-mode timeout.
//
// Raw mode sets VMIN=0 / VTIME=1, so a `read()` of one byte returns after
// at most ~100ms with either that byte or nothing. "Nothing" is the normal
// polling rhythm, not an error: the decoder uses it to tell a lone Escape
// keypress apart from the start of an escape sequence, and the caller simply
// reads again.
//
// The source is a trait so the decoder and the size probe can be driven by
// scripted bytes in tests without a terminal.

use std::io;

use crate::error::TermError;

/// Something that yields terminal input one byte at a time.
pub trait ByteSource {
    /// Read a single byte.
    ///
    /// Returns `Ok(None)` when the read timed out with no data.
    ///
    /// # Errors
    ///
    /// Returns [`TermError::Read`] for any failure other than a timeout.
    fn read_byte(&mut self) -> Result<Option<u8>, TermError>;
}

/// Reads stdin through `read(2)` under the raw-mode timeout.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinSource;

impl StdinSource {
    /// Create a stdin source.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ByteSource for StdinSource {
    #[cfg(unix)]
    fn read_byte(&mut self) -> Result<Option<u8>, TermError> {
        let mut byte = 0u8;
        let n = unsafe { libc::read(libc::STDIN_FILENO, (&raw mut byte).cast(), 1) };

        match n {
            1 => Ok(Some(byte)),
            0 => Ok(None),
            _ => {
                let err = io::Error::last_os_error();
                if is_timeout(&err) {
                    Ok(None)
                } else {
                    Err(TermError::Read(err))
                }
            }
        }
    }

    #[cfg(not(unix))]
    fn read_byte(&mut self) -> Result<Option<u8>, TermError> {
        use std::io::Read;

        let mut byte = [0u8; 1];
        match io::stdin().lock().read(&mut byte) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(byte[0])),
            Err(err) if is_timeout(&err) => Ok(None),
            Err(err) => Err(TermError::Read(err)),
        }
    }
}

/// Errors that just mean "no byte this time": `EAGAIN` (Cygwin reports the
/// raw-mode timeout this way) and `EINTR`.
fn is_timeout(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
    )
}

// ─── Scripted source (tests) ─────────────────────────────────────────────────

/// Replays a fixed sequence of reads; `None` entries are timeouts.
///
/// Running off the end is reported as a read error so a test that expects
/// more input than it scripted fails instead of spinning.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct Scripted {
    reads: std::collections::VecDeque<Option<u8>>,
}

#[cfg(test)]
impl Scripted {
    /// Every byte arrives immediately, no timeouts.
    pub(crate) fn bytes(data: &[u8]) -> Self {
        Self {
            reads: data.iter().copied().map(Some).collect(),
        }
    }

    /// Explicit reads, including timeouts.
    pub(crate) fn reads(reads: &[Option<u8>]) -> Self {
        Self {
            reads: reads.iter().copied().collect(),
        }
    }

    pub(crate) fn remaining(&self) -> usize {
        self.reads.len()
    }
}

#[cfg(test)]
impl ByteSource for Scripted {
    fn read_byte(&mut self) -> Result<Option<u8>, TermError> {
        self.reads
            .pop_front()
            .ok_or_else(|| TermError::Read(io::Error::from(io::ErrorKind::UnexpectedEof)))
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
