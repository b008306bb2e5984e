// SPDX-License-Identifier: MIT
//
// Error type for everything that talks to the terminal.
//
// Every variant here is fatal to the session: the binary clears the screen,
// restores the line discipline and exits non-zero. Malformed escape
// sequences are deliberately absent; the decoder degrades those to a plain
// Escape key and never reports them.

use std::io;

use thiserror::Error;

/// Failure while driving the controlling terminal.
#[derive(Debug, Error)]
pub enum TermError {
    /// `tcgetattr` failed while capturing the original attributes.
    #[error("tcgetattr: {0}")]
    GetAttr(#[source] io::Error),

    /// `tcsetattr` failed while installing raw mode or restoring the original.
    #[error("tcsetattr: {0}")]
    SetAttr(#[source] io::Error),

    /// `read` on stdin failed with something other than a timeout.
    #[error("read: {0}")]
    Read(#[source] io::Error),

    /// Writing a frame or control sequence to stdout failed.
    #[error("write: {0}")]
    Write(#[source] io::Error),

    /// Neither `TIOCGWINSZ` nor the cursor-position probe produced a size.
    #[error("getWindowSize: terminal size unavailable")]
    WindowSize,
}
