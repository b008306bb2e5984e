// SPDX-License-Identifier: MIT
//
// Key decoder.
//
// Turns raw stdin bytes into a closed set of logical keys. Plain bytes pass
// through as `Key::Byte`; the VT100 escape sequences for arrows, Home/End,
// Delete and paging become named keys.
//
// # Design
//
// The decoder is an explicit finite-state machine. `Decoder::advance` is a
// pure function of (state, next read) → (new state, maybe a key); it never
// touches the terminal, so every transition is tested with plain bytes.
// A read is `Some(byte)` or `None` for "the raw-mode timeout expired with
// nothing to read".
//
//   Idle ──ESC──▶ EscSeen ──'['──▶ BracketSeen ──digit──▶ BracketDigitSeen
//                    │                  │                      │
//                    │'0'/'O'           └─A B C D H F          └─'~'
//                    ▼
//               LegacySeen ──H F
//
// Anything unexpected, and any timeout after ESC, degrades to a literal
// Escape key and resets to Idle. Malformed sequences are never an error.
//
// `KeyReader` pulls bytes from a `ByteSource` until exactly one key is
// complete. No state survives between calls: a key never starts in one
// call and finishes in the next.

use crate::error::TermError;
use crate::reader::ByteSource;

/// The escape byte, `ESC` / `0x1B`.
pub const ESC: u8 = 0x1B;

/// The byte produced by `Ctrl` + `key` in raw mode (the low five bits).
#[inline]
#[must_use]
pub const fn ctrl(key: u8) -> u8 {
    key & 0x1F
}

// ─── Key ────────────────────────────────────────────────────────────────────

/// A decoded keypress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Any single byte that did not start an escape sequence, including
    /// control bytes such as `Ctrl-Q` (0x11), CR and DEL.
    Byte(u8),
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    /// A lone ESC, or an escape sequence the decoder did not recognize.
    Escape,
}

// ─── Decoder ────────────────────────────────────────────────────────────────

/// Decoder state between reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeState {
    /// Waiting for the first byte of a key.
    #[default]
    Idle,
    /// Saw `ESC`.
    EscSeen,
    /// Saw `ESC [`.
    BracketSeen,
    /// Saw `ESC [ <digit>`, waiting for `~`.
    BracketDigitSeen(u8),
    /// Saw `ESC 0` or `ESC O` — legacy Home/End encoding.
    LegacySeen,
}

/// The escape-sequence state machine.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decoder {
    state: DecodeState,
}

impl Decoder {
    /// A decoder in the `Idle` state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: DecodeState::Idle,
        }
    }

    /// Current state.
    #[inline]
    #[must_use]
    pub const fn state(&self) -> DecodeState {
        self.state
    }

    /// Whether a sequence is partially decoded.
    #[inline]
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.state != DecodeState::Idle
    }

    /// Feed one read result and return the key it completes, if any.
    ///
    /// `None` means the read timed out. In `Idle` that is a no-op; mid
    /// sequence it resolves to [`Key::Escape`].
    pub fn advance(&mut self, read: Option<u8>) -> Option<Key> {
        let (next, key) = step(self.state, read);
        self.state = next;
        key
    }
}

/// The transition function.
const fn step(state: DecodeState, read: Option<u8>) -> (DecodeState, Option<Key>) {
    use DecodeState::{BracketDigitSeen, BracketSeen, EscSeen, Idle, LegacySeen};

    let Some(byte) = read else {
        return match state {
            Idle => (Idle, None),
            _ => (Idle, Some(Key::Escape)),
        };
    };

    match state {
        Idle => match byte {
            ESC => (EscSeen, None),
            b => (Idle, Some(Key::Byte(b))),
        },
        EscSeen => match byte {
            b'[' => (BracketSeen, None),
            b'0' | b'O' => (LegacySeen, None),
            _ => (Idle, Some(Key::Escape)),
        },
        BracketSeen => match byte {
            d @ b'0'..=b'9' => (BracketDigitSeen(d), None),
            b'A' => (Idle, Some(Key::ArrowUp)),
            b'B' => (Idle, Some(Key::ArrowDown)),
            b'C' => (Idle, Some(Key::ArrowRight)),
            b'D' => (Idle, Some(Key::ArrowLeft)),
            b'H' => (Idle, Some(Key::Home)),
            b'F' => (Idle, Some(Key::End)),
            _ => (Idle, Some(Key::Escape)),
        },
        BracketDigitSeen(digit) => {
            if byte != b'~' {
                return (Idle, Some(Key::Escape));
            }
            let key = match digit {
                b'1' | b'7' => Key::Home,
                b'3' => Key::Delete,
                b'4' | b'8' => Key::End,
                b'5' => Key::PageUp,
                b'6' => Key::PageDown,
                _ => Key::Escape,
            };
            (Idle, Some(key))
        }
        LegacySeen => match byte {
            b'H' => (Idle, Some(Key::Home)),
            b'F' => (Idle, Some(Key::End)),
            _ => (Idle, Some(Key::Escape)),
        },
    }
}

// ─── KeyReader ──────────────────────────────────────────────────────────────

/// Blocking key reader: drives a [`Decoder`] from a [`ByteSource`].
#[derive(Debug, Default)]
pub struct KeyReader {
    decoder: Decoder,
}

impl KeyReader {
    /// Create a reader with a fresh decoder.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            decoder: Decoder::new(),
        }
    }

    /// Block until one complete key is available and return it.
    ///
    /// Timeouts while idle are retried; timeouts mid-sequence resolve the
    /// sequence to [`Key::Escape`].
    ///
    /// # Errors
    ///
    /// Propagates [`TermError::Read`] from the source. The decoder is reset
    /// so a later call starts cleanly.
    pub fn read_key(&mut self, source: &mut impl ByteSource) -> Result<Key, TermError> {
        loop {
            let read = match source.read_byte() {
                Ok(read) => read,
                Err(err) => {
                    self.decoder = Decoder::new();
                    return Err(err);
                }
            };
            if let Some(key) = self.decoder.advance(read) {
                tracing::trace!(?key, "key decoded");
                return Ok(key);
            }
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::Scripted;
    use pretty_assertions::assert_eq;

    /// Helper: decode exactly one key from immediately-available bytes and
    /// assert every byte was consumed.
    fn decode(data: &[u8]) -> Key {
        let mut src = Scripted::bytes(data);
        let key = KeyReader::new().read_key(&mut src).unwrap();
        assert_eq!(src.remaining(), 0, "decoder left bytes unread for {data:?}");
        key
    }

    /// Helper: decode one key from explicit reads (with timeouts).
    fn decode_reads(reads: &[Option<u8>]) -> Key {
        KeyReader::new()
            .read_key(&mut Scripted::reads(reads))
            .unwrap()
    }

    // ── Literal bytes ───────────────────────────────────────────────────

    #[test]
    fn printable_byte() {
        assert_eq!(decode(b"a"), Key::Byte(b'a'));
    }

    #[test]
    fn control_byte() {
        assert_eq!(decode(&[ctrl(b'q')]), Key::Byte(0x11));
    }

    #[test]
    fn carriage_return_is_literal() {
        assert_eq!(decode(b"\r"), Key::Byte(b'\r'));
    }

    #[test]
    fn high_byte_is_literal() {
        assert_eq!(decode(&[0xFF]), Key::Byte(0xFF));
    }

    #[test]
    fn ctrl_masks_low_five_bits() {
        assert_eq!(ctrl(b'q'), 0x11);
        assert_eq!(ctrl(b'Q'), 0x11);
        assert_eq!(ctrl(b'a'), 0x01);
    }

    // ── Arrows and CSI letters ──────────────────────────────────────────

    #[test]
    fn arrow_up() {
        assert_eq!(decode(&[0x1B, 0x5B, 0x41]), Key::ArrowUp);
    }

    #[test]
    fn arrows() {
        assert_eq!(decode(b"\x1b[B"), Key::ArrowDown);
        assert_eq!(decode(b"\x1b[C"), Key::ArrowRight);
        assert_eq!(decode(b"\x1b[D"), Key::ArrowLeft);
    }

    #[test]
    fn home_end_letters() {
        assert_eq!(decode(b"\x1b[H"), Key::Home);
        assert_eq!(decode(b"\x1b[F"), Key::End);
    }

    #[test]
    fn unknown_csi_letter_is_escape() {
        assert_eq!(decode(b"\x1b[Z"), Key::Escape);
    }

    // ── Tilde sequences ─────────────────────────────────────────────────

    #[test]
    fn delete() {
        assert_eq!(decode(&[0x1B, 0x5B, 0x33, 0x7E]), Key::Delete);
    }

    #[test]
    fn tilde_home_end_variants() {
        assert_eq!(decode(b"\x1b[1~"), Key::Home);
        assert_eq!(decode(b"\x1b[7~"), Key::Home);
        assert_eq!(decode(b"\x1b[4~"), Key::End);
        assert_eq!(decode(b"\x1b[8~"), Key::End);
    }

    #[test]
    fn paging() {
        assert_eq!(decode(b"\x1b[5~"), Key::PageUp);
        assert_eq!(decode(b"\x1b[6~"), Key::PageDown);
    }

    #[test]
    fn unmapped_digit_is_escape() {
        assert_eq!(decode(b"\x1b[2~"), Key::Escape);
        assert_eq!(decode(b"\x1b[9~"), Key::Escape);
    }

    #[test]
    fn digit_without_tilde_is_escape() {
        // The terminator slot is consumed and discarded.
        assert_eq!(decode(b"\x1b[5x"), Key::Escape);
    }

    // ── Legacy route ────────────────────────────────────────────────────

    #[test]
    fn legacy_zero_home_end() {
        assert_eq!(decode(b"\x1b0H"), Key::Home);
        assert_eq!(decode(b"\x1b0F"), Key::End);
    }

    #[test]
    fn ss3_home_end() {
        assert_eq!(decode(b"\x1bOH"), Key::Home);
        assert_eq!(decode(b"\x1bOF"), Key::End);
    }

    #[test]
    fn legacy_unknown_is_escape() {
        assert_eq!(decode(b"\x1bOP"), Key::Escape);
    }

    // ── Escape and timeouts ─────────────────────────────────────────────

    #[test]
    fn lone_escape_then_timeout() {
        assert_eq!(decode_reads(&[Some(ESC), None]), Key::Escape);
    }

    #[test]
    fn timeout_after_bracket_is_escape() {
        assert_eq!(decode_reads(&[Some(ESC), Some(b'['), None]), Key::Escape);
    }

    #[test]
    fn timeout_after_digit_is_escape() {
        assert_eq!(
            decode_reads(&[Some(ESC), Some(b'['), Some(b'5'), None]),
            Key::Escape
        );
    }

    #[test]
    fn idle_timeouts_are_retried() {
        assert_eq!(decode_reads(&[None, None, None, Some(b'x')]), Key::Byte(b'x'));
    }

    #[test]
    fn escape_followed_by_other_byte_discards_it() {
        let mut src = Scripted::bytes(b"\x1bxy");
        let mut reader = KeyReader::new();
        assert_eq!(reader.read_key(&mut src).unwrap(), Key::Escape);
        // 'x' was the malformed slot and is gone; 'y' is the next key.
        assert_eq!(reader.read_key(&mut src).unwrap(), Key::Byte(b'y'));
    }

    #[test]
    fn escape_escape_is_one_escape_each_slot() {
        // Second ESC lands in the EscSeen slot and is discarded with it.
        assert_eq!(decode(b"\x1b\x1b"), Key::Escape);
    }

    // ── Reader behavior ─────────────────────────────────────────────────

    #[test]
    fn consecutive_keys() {
        let mut src = Scripted::bytes(b"\x1b[Aq\x1b[6~");
        let mut reader = KeyReader::new();
        assert_eq!(reader.read_key(&mut src).unwrap(), Key::ArrowUp);
        assert_eq!(reader.read_key(&mut src).unwrap(), Key::Byte(b'q'));
        assert_eq!(reader.read_key(&mut src).unwrap(), Key::PageDown);
        assert_eq!(src.remaining(), 0);
    }

    #[test]
    fn read_error_propagates_and_resets() {
        let mut reader = KeyReader::new();
        let mut src = Scripted::bytes(b"\x1b[");
        assert!(matches!(reader.read_key(&mut src), Err(TermError::Read(_))));
        assert!(!reader.decoder.is_pending());
    }

    // ── Decoder transitions ─────────────────────────────────────────────

    #[test]
    fn decoder_states_walk() {
        let mut d = Decoder::new();
        assert_eq!(d.state(), DecodeState::Idle);
        assert_eq!(d.advance(Some(ESC)), None);
        assert_eq!(d.state(), DecodeState::EscSeen);
        assert_eq!(d.advance(Some(b'[')), None);
        assert_eq!(d.state(), DecodeState::BracketSeen);
        assert_eq!(d.advance(Some(b'3')), None);
        assert_eq!(d.state(), DecodeState::BracketDigitSeen(b'3'));
        assert_eq!(d.advance(Some(b'~')), Some(Key::Delete));
        assert_eq!(d.state(), DecodeState::Idle);
    }

    #[test]
    fn decoder_idle_timeout_is_noop() {
        let mut d = Decoder::new();
        assert_eq!(d.advance(None), None);
        assert!(!d.is_pending());
    }

    #[test]
    fn every_non_escape_byte_is_literal_from_idle() {
        for b in 0..=u8::MAX {
            if b == ESC {
                continue;
            }
            let mut d = Decoder::new();
            assert_eq!(d.advance(Some(b)), Some(Key::Byte(b)));
            assert!(!d.is_pending());
        }
    }

    #[test]
    fn malformed_always_returns_to_idle() {
        for b in 0..=u8::MAX {
            let mut d = Decoder::new();
            d.advance(Some(ESC));
            d.advance(Some(b'['));
            let key = d.advance(Some(b));
            if b.is_ascii_digit() {
                assert_eq!(key, None);
                assert_eq!(d.advance(Some(b'!')), Some(Key::Escape));
            } else {
                assert!(key.is_some());
            }
            assert!(!d.is_pending());
        }
    }
}
