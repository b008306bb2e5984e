// SPDX-License-Identifier: MIT
//
// Terminal control — raw mode guard, window size, and RAII cleanup.
//
// Safety: This module necessarily uses `unsafe` for termios (tcgetattr,
// tcsetattr), ioctl (TIOCGWINSZ), isatty, and raw fd writes. These are
// the standard POSIX interfaces for terminal control — there is no safe
// alternative. Each unsafe block is minimal.
#![allow(unsafe_code)]
//
// `RawMode` owns the terminal's line discipline for the whole session. It
// captures the original termios, installs raw mode (no canonical input, no
// echo, no signal keys, no CR/NL translation, no flow control, 100ms read
// timeout) and puts the original back when released — explicitly through
// `disable()`, implicitly on drop, and from the panic hook if the viewer
// panics mid-frame.
//
// The panic hook bypasses Rust's stdout lock entirely, writing a pre-built
// restore sequence directly to fd 1. This prevents deadlock if the panic
// happened while holding the stdout lock. One raw write, everything
// restored, then the original panic handler prints its message to a
// working terminal.

use std::io::Write;
use std::sync::{Mutex, Once};

use crate::ansi;
use crate::error::TermError;
use crate::output::{write_fd_all, OutputBuffer};
use crate::reader::ByteSource;

// ─── Size ───────────────────────────────────────────────────────────────────

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    /// Number of columns (width in character cells).
    pub cols: u16,
    /// Number of rows (height in character cells).
    pub rows: u16,
}

// ─── Terminal Queries ───────────────────────────────────────────────────────

/// Query the current terminal size via `ioctl(TIOCGWINSZ)`.
///
/// Returns `None` if stdout is not a terminal, the query fails, or the
/// terminal reports zero columns.
#[cfg(unix)]
#[must_use]
pub fn get_size() -> Option<Size> {
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
    let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut ws) };

    if result == 0 && ws.ws_col > 0 && ws.ws_row > 0 {
        Some(Size {
            cols: ws.ws_col,
            rows: ws.ws_row,
        })
    } else {
        None
    }
}

#[cfg(not(unix))]
#[must_use]
pub fn get_size() -> Option<Size> {
    None
}

/// Check whether stdin is connected to a terminal (TTY).
#[cfg(unix)]
#[must_use]
pub fn is_tty() -> bool {
    unsafe { libc::isatty(libc::STDIN_FILENO) != 0 }
}

#[cfg(not(unix))]
#[must_use]
pub fn is_tty() -> bool {
    false
}

/// Longest cursor position report we are willing to read.
const REPORT_MAX: usize = 31;

/// Determine the window size, once, at startup.
///
/// Tries `TIOCGWINSZ` first. When that is unavailable, pushes the cursor
/// into the bottom-right corner, asks the terminal where it ended up, and
/// reads the answer through `source`. Raw mode must already be active so
/// the reply is not echoed or line-buffered.
///
/// # Errors
///
/// [`TermError::Write`] if the probe cannot be sent, [`TermError::Read`] if
/// stdin fails, [`TermError::WindowSize`] if the reply is missing or
/// malformed.
pub fn window_size(source: &mut impl ByteSource) -> Result<Size, TermError> {
    if let Some(size) = get_size() {
        tracing::debug!(cols = size.cols, rows = size.rows, "window size from ioctl");
        return Ok(size);
    }

    tracing::debug!("TIOCGWINSZ unavailable, probing cursor position");
    let mut out = OutputBuffer::new();
    ansi::cursor_to_far_corner(&mut out).map_err(TermError::Write)?;
    ansi::request_cursor_position(&mut out).map_err(TermError::Write)?;
    out.flush_stdout()?;

    let size = probe_size(source)?;
    tracing::debug!(cols = size.cols, rows = size.rows, "window size from cursor report");
    Ok(size)
}

/// Read a cursor position report from `source` and parse it.
fn probe_size(source: &mut impl ByteSource) -> Result<Size, TermError> {
    let mut reply = Vec::with_capacity(REPORT_MAX);
    while reply.len() < REPORT_MAX {
        match source.read_byte()? {
            Some(b'R') | None => break,
            Some(b) => reply.push(b),
        }
    }
    parse_cursor_report(&reply).ok_or(TermError::WindowSize)
}

/// Parse the body of a cursor position report: `ESC [ rows ; cols`
/// (the terminating `R` already stripped).
#[must_use]
pub fn parse_cursor_report(reply: &[u8]) -> Option<Size> {
    let body = reply.strip_prefix(b"\x1b[")?;
    let sep = body.iter().position(|&b| b == b';')?;
    let rows = parse_u16(&body[..sep])?;
    let cols = parse_u16(&body[sep + 1..])?;
    (rows > 0 && cols > 0).then_some(Size { cols, rows })
}

/// Parse a non-empty run of ASCII digits.
fn parse_u16(digits: &[u8]) -> Option<u16> {
    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }
    digits.iter().try_fold(0u16, |acc, &d| {
        acc.checked_mul(10)?.checked_add(u16::from(d - b'0'))
    })
}

/// Clear the screen and home the cursor, ignoring failures.
///
/// Used on the way out — after quit, and before printing a fatal error.
pub fn clear_screen_best_effort() {
    let mut out = OutputBuffer::new();
    let _ = ansi::clear_screen(&mut out);
    let _ = ansi::cursor_home(&mut out);
    let _ = out.flush_stdout();
}

// ─── Panic-Safe Terminal Restore ────────────────────────────────────────────

/// Global backup of original termios for panic recovery.
///
/// The [`RawMode`] guard owns its own copy, but the panic hook can't
/// access it. This global backup — behind a [`Mutex`], not `static mut` —
/// lets the hook restore the line discipline without the guard.
#[cfg(unix)]
static TERMIOS_BACKUP: Mutex<Option<libc::termios>> = Mutex::new(None);

/// Restore termios from the global backup. Best-effort, ignores errors.
#[cfg(unix)]
fn restore_termios_from_backup() {
    if let Ok(guard) = TERMIOS_BACKUP.lock() {
        if let Some(ref original) = *guard {
            unsafe {
                let _ = libc::tcsetattr(libc::STDIN_FILENO, libc::TCSAFLUSH, original);
            }
        }
    }
}

/// Terminal restore sequence for emergency use: reset attributes, show the
/// cursor, clear the screen, home the cursor.
const EMERGENCY_RESTORE: &[u8] = b"\x1b[m\x1b[?25h\x1b[2J\x1b[H";

/// Panic hook guard — ensures the hook is installed at most once per process.
static PANIC_HOOK_INSTALLED: Once = Once::new();

/// Install a panic hook that restores the terminal before printing the error.
///
/// Without this, a panic in raw mode leaves the user's terminal broken:
/// no echo, no line editing, no way to read the error message.
fn install_panic_hook() {
    PANIC_HOOK_INSTALLED.call_once(|| {
        let original = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = write_fd_all(EMERGENCY_RESTORE);

            #[cfg(unix)]
            restore_termios_from_backup();

            original(info);
        }));
    });
}

// ─── Raw mode ───────────────────────────────────────────────────────────────

/// Apply the raw-mode transform to a captured termios.
///
/// - input: no break-to-SIGINT, no CR→NL, no parity check, no 8th-bit
///   strip, no XON/XOFF flow control
/// - output: no post-processing (`\n` is not turned into `\r\n`)
/// - control: 8-bit characters
/// - local: no echo, no canonical mode, no `Ctrl-V`, no signal keys
/// - `read()` returns after 0 bytes or 100ms, whichever comes first
#[cfg(unix)]
pub fn make_raw(termios: &mut libc::termios) {
    termios.c_iflag &= !(libc::BRKINT | libc::ICRNL | libc::INPCK | libc::ISTRIP | libc::IXON);
    termios.c_oflag &= !libc::OPOST;
    termios.c_cflag |= libc::CS8;
    termios.c_lflag &= !(libc::ECHO | libc::ICANON | libc::IEXTEN | libc::ISIG);
    termios.c_cc[libc::VMIN] = 0;
    termios.c_cc[libc::VTIME] = 1;
}

/// Scoped raw mode.
///
/// Acquire with [`enable`](Self::enable) before anything else touches the
/// terminal; the original attributes come back when the guard is
/// [`disable`](Self::disable)d or dropped — even on panic.
///
/// # Example
///
/// ```no_run
/// use n_term::terminal::RawMode;
///
/// let raw = RawMode::enable()?;
/// // ... read keys, write frames ...
/// raw.disable()?;
/// # Ok::<(), n_term::TermError>(())
/// ```
#[derive(Debug)]
pub struct RawMode {
    /// Original termios saved before entering raw mode. `None` once restored.
    #[cfg(unix)]
    original: Option<libc::termios>,
}

impl RawMode {
    /// Capture the current attributes of stdin and switch to raw mode.
    ///
    /// # Errors
    ///
    /// [`TermError::GetAttr`] if the attributes cannot be read (for example
    /// stdin is not a terminal), [`TermError::SetAttr`] if raw mode cannot be
    /// installed.
    #[cfg(unix)]
    pub fn enable() -> Result<Self, TermError> {
        install_panic_hook();

        let mut termios: libc::termios = unsafe { std::mem::zeroed() };
        if unsafe { libc::tcgetattr(libc::STDIN_FILENO, &raw mut termios) } != 0 {
            return Err(TermError::GetAttr(std::io::Error::last_os_error()));
        }

        let original = termios;
        if let Ok(mut guard) = TERMIOS_BACKUP.lock() {
            *guard = Some(original);
        }

        make_raw(&mut termios);
        if unsafe { libc::tcsetattr(libc::STDIN_FILENO, libc::TCSAFLUSH, &raw const termios) }
            != 0
        {
            return Err(TermError::SetAttr(std::io::Error::last_os_error()));
        }

        tracing::info!("raw mode enabled");
        Ok(Self {
            original: Some(original),
        })
    }

    #[cfg(not(unix))]
    pub fn enable() -> Result<Self, TermError> {
        install_panic_hook();
        Ok(Self {})
    }

    /// Restore the original attributes.
    ///
    /// # Errors
    ///
    /// [`TermError::SetAttr`] if `tcsetattr` fails.
    pub fn disable(mut self) -> Result<(), TermError> {
        self.restore()
    }

    #[cfg(unix)]
    fn restore(&mut self) -> Result<(), TermError> {
        let Some(original) = self.original.take() else {
            return Ok(());
        };

        if unsafe { libc::tcsetattr(libc::STDIN_FILENO, libc::TCSAFLUSH, &raw const original) }
            != 0
        {
            return Err(TermError::SetAttr(std::io::Error::last_os_error()));
        }

        // Restored — the panic hook has nothing left to do.
        if let Ok(mut guard) = TERMIOS_BACKUP.lock() {
            *guard = None;
        }

        tracing::info!("raw mode disabled");
        Ok(())
    }

    #[cfg(not(unix))]
    #[allow(clippy::unused_self, clippy::unnecessary_wraps)]
    fn restore(&mut self) -> Result<(), TermError> {
        Ok(())
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            tracing::error!(%err, "failed to restore terminal attributes");
            let _ = std::io::stderr().write_all(format!("n-view: {err}\r\n").as_bytes());
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
