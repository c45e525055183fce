//! Console progress for mirror jobs.
//!
//! Presentation-only: turns engine events into the per-file progress lines
//! (`Downloading: "<path>"`, `\tProblem downloading <path>`). On a terminal
//! the lines scroll above an indicatif spinner that shows running counts;
//! otherwise they are written as plain lines.

use std::cell::{Cell, RefCell};
use std::io::{self, IsTerminal, Write};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use sftpmirror_core::{MirrorEvent, MirrorEventEmitterPort};

/// Progress emitter that automatically selects terminal or plain output.
pub struct ConsoleEmitter {
    inner: ProgressRender,
}

enum ProgressRender {
    Fancy(FancyProgress),
    Plain(PlainProgress),
}

impl ConsoleEmitter {
    /// Create an emitter for stdout, auto-detecting terminal capability.
    pub fn new() -> Self {
        if io::stdout().is_terminal() {
            Self {
                inner: ProgressRender::Fancy(FancyProgress::new()),
            }
        } else {
            Self::plain(Box::new(io::stdout()))
        }
    }

    /// Create a line-oriented emitter writing to `out`.
    pub fn plain(out: Box<dyn Write>) -> Self {
        Self {
            inner: ProgressRender::Plain(PlainProgress {
                out: RefCell::new(out),
            }),
        }
    }
}

impl Default for ConsoleEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl MirrorEventEmitterPort for ConsoleEmitter {
    fn emit(&self, event: MirrorEvent) {
        match &self.inner {
            ProgressRender::Fancy(inner) => inner.handle(&event),
            ProgressRender::Plain(inner) => inner.handle(&event),
        }
    }
}

/// The line printed for an event, if it gets one.
pub fn progress_line(event: &MirrorEvent) -> Option<String> {
    match event {
        MirrorEvent::DownloadStarted { path } => Some(format!("Downloading: \"{path}\"")),
        MirrorEvent::DownloadFailed { path } | MirrorEvent::EntrySkipped { path } => {
            Some(format!("\tProblem downloading {path}"))
        }
        _ => None,
    }
}

// ============================================================================
// Fancy Terminal Progress (indicatif)
// ============================================================================

struct FancyProgress {
    bar: ProgressBar,
    downloaded: Cell<u64>,
    failed: Cell<u64>,
}

impl FancyProgress {
    fn new() -> Self {
        let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::stdout());
        bar.set_style(Self::spinner_style());
        bar.set_message("Connecting".to_string());
        bar.enable_steady_tick(Duration::from_millis(120));
        Self {
            bar,
            downloaded: Cell::new(0),
            failed: Cell::new(0),
        }
    }

    fn handle(&self, event: &MirrorEvent) {
        if let Some(line) = progress_line(event) {
            self.bar.println(line);
        }
        match event {
            MirrorEvent::Started { remote_root, .. } => {
                self.bar.set_message(format!("Mirroring {remote_root}"));
            }
            MirrorEvent::DirectoryEntered { path, .. } => {
                self.bar.set_message(format!("{path}/ {}", self.counts()));
            }
            MirrorEvent::DownloadCompleted { .. } => {
                self.downloaded.set(self.downloaded.get() + 1);
                self.bar.set_message(self.counts());
            }
            MirrorEvent::DownloadFailed { .. } | MirrorEvent::EntrySkipped { .. } => {
                self.failed.set(self.failed.get() + 1);
                self.bar.set_message(self.counts());
            }
            MirrorEvent::Finished { .. } => self.bar.finish_and_clear(),
            MirrorEvent::DownloadStarted { .. } => {}
        }
    }

    fn counts(&self) -> String {
        format!(
            "({} downloaded, {} failed)",
            self.downloaded.get(),
            self.failed.get()
        )
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {elapsed_precise} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
    }
}

// ============================================================================
// Plain Progress (non-terminal)
// ============================================================================

struct PlainProgress {
    out: RefCell<Box<dyn Write>>,
}

impl PlainProgress {
    fn handle(&self, event: &MirrorEvent) {
        let Some(line) = progress_line(event) else {
            return;
        };
        let mut out = self.out.borrow_mut();
        // A closed stdout must not abort the job.
        let _ = writeln!(out, "{line}");
        let _ = out.flush();
    }
}
