// SPDX-License-Identifier: MIT
//
// Event loop — the heartbeat of the viewer.
//
// One logical loop, one thread, no concurrency anywhere:
//
//   paint → one write → read one key → handle it → repeat
//
// The only blocking call is the single-byte read inside the key reader,
// bounded by the raw-mode timeout, so the loop never hangs indefinitely.
//
// The loop owns the raw-mode guard for the session. Whatever way `run`
// ends — quit key, read failure, write failure — it clears the screen,
// homes the cursor and then releases the guard, reporting a restore
// failure if there is one. A panic is covered by the guard's panic hook.

use crate::error::TermError;
use crate::input::{Key, KeyReader};
use crate::output::OutputBuffer;
use crate::reader::ByteSource;
use crate::terminal::{self, RawMode};

// ─── App Trait ───────────────────────────────────────────────────────────────

/// What the application tells the event loop to do after handling a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Continue running.
    Continue,
    /// Leave the loop: clear the screen and restore the terminal.
    Quit,
}

/// Application interface for the event loop.
///
/// The loop calls [`paint`](App::paint) once per iteration, flushes the
/// buffer with a single write, then hands the next decoded key to
/// [`on_key`](App::on_key).
pub trait App {
    /// Build one complete frame into `out`.
    ///
    /// The buffer is empty on entry. Everything written here reaches the
    /// terminal in one `write()`.
    fn paint(&mut self, out: &mut OutputBuffer);

    /// Handle one decoded key.
    ///
    /// Return [`Action::Quit`] to exit the event loop.
    fn on_key(&mut self, key: Key) -> Action;
}

// ─── EventLoop ───────────────────────────────────────────────────────────────

/// The single-threaded terminal loop.
///
/// # Example
///
/// ```no_run
/// use n_term::event_loop::{Action, App, EventLoop};
/// use n_term::input::Key;
/// use n_term::output::OutputBuffer;
/// use n_term::reader::StdinSource;
/// use n_term::terminal::RawMode;
///
/// struct Quitter;
///
/// impl App for Quitter {
///     fn paint(&mut self, out: &mut OutputBuffer) {
///         out.push_bytes(b"press q");
///     }
///
///     fn on_key(&mut self, key: Key) -> Action {
///         if key == Key::Byte(b'q') { Action::Quit } else { Action::Continue }
///     }
/// }
///
/// let raw = RawMode::enable()?;
/// EventLoop::new(raw, StdinSource::new()).run(&mut Quitter)?;
/// # Ok::<(), n_term::TermError>(())
/// ```
#[derive(Debug)]
pub struct EventLoop<S: ByteSource> {
    raw: RawMode,
    source: S,
    keys: KeyReader,
    out: OutputBuffer,
}

impl<S: ByteSource> EventLoop<S> {
    /// Take ownership of the raw-mode guard and the input source.
    #[must_use]
    pub fn new(raw: RawMode, source: S) -> Self {
        Self {
            raw,
            source,
            keys: KeyReader::new(),
            out: OutputBuffer::new(),
        }
    }

    /// Run until the application returns [`Action::Quit`] or an I/O error
    /// occurs, then restore the terminal.
    ///
    /// # Errors
    ///
    /// Returns the read/write error that stopped the loop, or
    /// [`TermError::SetAttr`] if the original attributes cannot be restored.
    pub fn run(self, app: &mut impl App) -> Result<(), TermError> {
        let Self {
            raw,
            mut source,
            mut keys,
            mut out,
        } = self;

        let result = run_frames(app, &mut source, &mut keys, &mut out);

        terminal::clear_screen_best_effort();
        let restored = raw.disable();

        result.and(restored)
    }
}

/// The inner loop, separated so cleanup runs regardless of outcome.
fn run_frames(
    app: &mut impl App,
    source: &mut impl ByteSource,
    keys: &mut KeyReader,
    out: &mut OutputBuffer,
) -> Result<(), TermError> {
    loop {
        out.clear();
        app.paint(out);
        out.flush_stdout()?;

        let key = keys.read_key(source)?;
        if app.on_key(key) == Action::Quit {
            tracing::info!("quit requested");
            return Ok(());
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::Scripted;
    use pretty_assertions::assert_eq;

    /// Records what the loop asked of it. Paints nothing, so no bytes reach
    /// the real stdout during tests.
    #[derive(Default)]
    struct Recorder {
        paints: usize,
        keys: Vec<Key>,
        quit_on: Option<Key>,
    }

    impl App for Recorder {
        fn paint(&mut self, out: &mut OutputBuffer) {
            assert!(out.is_empty(), "paint must start from an empty buffer");
            self.paints += 1;
        }

        fn on_key(&mut self, key: Key) -> Action {
            self.keys.push(key);
            if Some(key) == self.quit_on {
                Action::Quit
            } else {
                Action::Continue
            }
        }
    }

    #[test]
    fn action_equality() {
        assert_eq!(Action::Continue, Action::Continue);
        assert_ne!(Action::Continue, Action::Quit);
    }

    #[test]
    fn paints_before_every_key_and_stops_on_quit() {
        let mut app = Recorder {
            quit_on: Some(Key::Byte(b'q')),
            ..Recorder::default()
        };
        let mut src = Scripted::bytes(b"\x1b[Bxq");
        let mut keys = KeyReader::new();
        let mut out = OutputBuffer::new();

        run_frames(&mut app, &mut src, &mut keys, &mut out).unwrap();

        assert_eq!(app.keys, vec![Key::ArrowDown, Key::Byte(b'x'), Key::Byte(b'q')]);
        assert_eq!(app.paints, 3);
        assert_eq!(src.remaining(), 0);
    }

    #[test]
    fn timeouts_do_not_trigger_extra_frames() {
        let mut app = Recorder {
            quit_on: Some(Key::Byte(b'q')),
            ..Recorder::default()
        };
        let mut src = Scripted::reads(&[None, None, Some(b'q')]);

        run_frames(&mut app, &mut src, &mut KeyReader::new(), &mut OutputBuffer::new()).unwrap();

        assert_eq!(app.paints, 1);
    }

    #[test]
    fn read_error_ends_the_loop() {
        let mut app = Recorder::default();
        let mut src = Scripted::bytes(b"ab");

        let result = run_frames(&mut app, &mut src, &mut KeyReader::new(), &mut OutputBuffer::new());

        assert!(matches!(result, Err(TermError::Read(_))));
        assert_eq!(app.keys.len(), 2);
    }
}
