//! # n-viewer — Viewer core for n-view
//!
//! Everything between a file on disk and a frame of terminal output:
//!
//! - **[`row`]** — `Row`: source bytes plus their tab-expanded rendering
//! - **[`buffer`]** — `Buffer`: the ordered, append-only row store and file loading
//! - **[`cursor`]** — `Cursor`: source-coordinate position with wrapping movement
//! - **[`view`]** — `View`: the scroll window and minimal-scroll logic
//! - **[`status`]** — `StatusMessage`: a transient note with a timestamp
//! - **[`screen`]** — the compositor that writes one frame
//! - **[`viewer`]** — `Viewer`: the session, bound to n-term's event loop
//! - **[`options`]** — tab stop and message timeout
//!
//! Terminal handling (raw mode, key decoding, output) lives in n-term.

pub mod buffer;
pub mod cursor;
pub mod error;
pub mod options;
pub mod row;
pub mod screen;
pub mod status;
pub mod view;
pub mod viewer;

pub use buffer::Buffer;
pub use error::ViewerError;
pub use options::ViewerOptions;
pub use viewer::Viewer;
