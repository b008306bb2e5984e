//! Status message — a short note shown on the bottom line for a few seconds.

use std::time::{Duration, Instant};

/// Longest message kept, in bytes.
pub const MAX_LEN: usize = 79;

/// A transient message and the moment it was set.
#[derive(Debug, Clone, Default)]
pub struct StatusMessage {
    text: String,
    set_at: Option<Instant>,
}

impl StatusMessage {
    /// No message.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            text: String::new(),
            set_at: None,
        }
    }

    /// Replace the message, stamped with the current time.
    pub fn set(&mut self, text: impl Into<String>) {
        self.set_at_time(text, Instant::now());
    }

    /// Replace the message with an explicit timestamp.
    ///
    /// Text longer than [`MAX_LEN`] bytes is cut at the last char boundary
    /// that fits.
    pub fn set_at_time(&mut self, text: impl Into<String>, at: Instant) {
        let mut text = text.into();
        if text.len() > MAX_LEN {
            let mut end = MAX_LEN;
            while !text.is_char_boundary(end) {
                end -= 1;
            }
            text.truncate(end);
        }
        self.text = text;
        self.set_at = Some(at);
    }

    /// The message text, whether or not it has expired.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the message should still be shown at `now`.
    #[must_use]
    pub fn visible_at(&self, now: Instant, timeout: Duration) -> bool {
        !self.text.is_empty()
            && self
                .set_at
                .is_some_and(|at| now.saturating_duration_since(at) < timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FIVE: Duration = Duration::from_secs(5);

    #[test]
    fn empty_is_never_visible() {
        let msg = StatusMessage::new();
        assert!(!msg.visible_at(Instant::now(), FIVE));
    }

    #[test]
    fn visible_within_timeout() {
        let t0 = Instant::now();
        let mut msg = StatusMessage::new();
        msg.set_at_time("HELP: Ctrl-Q = quit", t0);

        assert!(msg.visible_at(t0, FIVE));
        assert!(msg.visible_at(t0 + Duration::from_millis(4_999), FIVE));
        assert!(!msg.visible_at(t0 + FIVE, FIVE));
        assert!(!msg.visible_at(t0 + Duration::from_secs(60), FIVE));
    }

    #[test]
    fn set_uses_now() {
        let mut msg = StatusMessage::new();
        msg.set(format!("{} lines", 42));
        assert_eq!(msg.text(), "42 lines");
        assert!(msg.visible_at(Instant::now(), FIVE));
    }

    #[test]
    fn long_text_truncated() {
        let mut msg = StatusMessage::new();
        msg.set("x".repeat(200));
        assert_eq!(msg.text().len(), MAX_LEN);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let mut msg = StatusMessage::new();
        // 78 ASCII bytes then a 2-byte char straddling the limit.
        msg.set(format!("{}é", "a".repeat(78)));
        assert_eq!(msg.text().len(), 78);
    }

    #[test]
    fn replacing_restarts_the_clock() {
        let t0 = Instant::now();
        let mut msg = StatusMessage::new();
        msg.set_at_time("first", t0);
        msg.set_at_time("second", t0 + Duration::from_secs(10));

        assert_eq!(msg.text(), "second");
        assert!(msg.visible_at(t0 + Duration::from_secs(12), FIVE));
    }
}
