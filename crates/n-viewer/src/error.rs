//! Viewer errors.

use std::io;
use std::path::PathBuf;

use n_term::TermError;
use thiserror::Error;

/// Failure while loading or showing a file.
#[derive(Debug, Error)]
pub enum ViewerError {
    /// The file could not be opened or read.
    #[error("fopen {}: {source}", path.display())]
    Open {
        /// The path that was requested.
        path: PathBuf,
        /// The underlying OS error.
        #[source]
        source: io::Error,
    },

    /// The terminal failed underneath the viewer.
    #[error(transparent)]
    Terminal(#[from] TermError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_message_names_the_path() {
        let err = ViewerError::Open {
            path: PathBuf::from("missing.txt"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("fopen missing.txt: "), "got {msg}");
    }

    #[test]
    fn terminal_errors_pass_through() {
        let err = ViewerError::from(TermError::WindowSize);
        assert_eq!(err.to_string(), "getWindowSize: terminal size unavailable");
    }
}
