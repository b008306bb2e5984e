//! Viewer options.
//!
//! The handful of knobs the viewer exposes. Values come from the command
//! line; everything else about the display is fixed.
//!
//! | Option            | Default | Meaning                                   |
//! |-------------------|---------|-------------------------------------------|
//! | `tab_stop`        | 8       | Tab stop width used by render expansion   |
//! | `message_timeout` | 5 s     | How long a status message stays on screen |

use std::time::Duration;

/// Default tab stop width.
pub const TAB_STOP: usize = 8;

/// Default lifetime of a status message.
pub const MESSAGE_TIMEOUT: Duration = Duration::from_secs(5);

/// Message shown when a session starts.
pub const HELP_MESSAGE: &str = "HELP: Ctrl-Q = quit";

/// Display settings for one viewing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewerOptions {
    /// Tab stop width. Always at least 1.
    pub tab_stop: usize,
    /// How long a status message stays visible after it is set.
    pub message_timeout: Duration,
}

impl ViewerOptions {
    /// Options with the given tab stop (0 is raised to 1).
    #[must_use]
    pub fn with_tab_stop(tab_stop: usize) -> Self {
        Self {
            tab_stop: tab_stop.max(1),
            ..Self::default()
        }
    }
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            tab_stop: TAB_STOP,
            message_timeout: MESSAGE_TIMEOUT,
        }
    }
}
