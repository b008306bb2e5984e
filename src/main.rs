// SPDX-License-Identifier: MIT
//
// n-view — a minimal full-screen terminal file viewer.
//
// This is the binary that wires the two crates together:
//
//   n-term   → raw mode, window size, key decoding, output, event loop
//   n-viewer → rows, cursor, scrolling, screen composition, key bindings
//
// Startup order matters: raw mode first (the size probe needs it), then the
// window size, then the file, then the viewer. The event loop owns the
// raw-mode guard from there on and restores the terminal when it returns.
//
// Layout:
//
//   ┌──────────────────────────────┐
//   │ text area                    │  ← rows - 2 (View)
//   ├──────────────────────────────┤
//   │ status bar (inverse)         │  ← 1 row
//   ├──────────────────────────────┤
//   │ message line                 │  ← 1 row
//   └──────────────────────────────┘

mod logging;

use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;

use n_term::event_loop::EventLoop;
use n_term::reader::StdinSource;
use n_term::terminal::{self, RawMode};
use n_viewer::{Buffer, Viewer, ViewerOptions};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "n-view")]
#[command(about = "A minimal full-screen terminal file viewer", long_about = None)]
#[command(version)]
struct Args {
    /// File to view. Without one, an empty buffer is shown.
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Tab stop width used when rendering tabs
    #[arg(long, value_name = "N", default_value_t = 8, value_parser = clap::value_parser!(u8).range(1..))]
    tab_stop: u8,

    /// Write diagnostics to this file
    #[arg(long, value_name = "PATH")]
    log: Option<PathBuf>,
}

fn run(args: &Args) -> anyhow::Result<()> {
    if let Some(path) = &args.log {
        logging::init(path).with_context(|| format!("log file {}", path.display()))?;
    }

    let raw = RawMode::enable()?;
    let mut source = StdinSource::new();
    let size = terminal::window_size(&mut source)?;

    let options = ViewerOptions::with_tab_stop(usize::from(args.tab_stop));
    let buffer = match &args.file {
        Some(path) => Buffer::from_file(path, options.tab_stop)?,
        None => Buffer::with_tab_stop(options.tab_stop),
    };

    let mut viewer = Viewer::for_terminal(buffer, size, options);
    EventLoop::new(raw, source).run(&mut viewer)?;

    tracing::info!("session ended");
    Ok(())
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(&args) {
        terminal::clear_screen_best_effort();
        eprintln!("n-view: {e:#}");
        process::exit(1);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
