//! Progress reporting for pipeline phases.
//!
//! How a run reports progress depends on where its output goes: an
//! interactive run gets an indicatif bar, a run whose stderr is tailed
//! from a file gets plain lines at a fixed interval, and tests stay
//! silent. The mode is a plain value threaded from the CLI into the
//! pipeline rather than process-global state, so callers pick per run.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

/// How a pipeline run reports progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressMode {
    /// Interactive indicatif bar.
    Bar,
    /// No bar; a plain stderr line every N items (tail-friendly).
    LogEvery(u64),
    /// No progress output at all.
    Silent,
}

impl ProgressMode {
    /// Line interval used by `--log-only` runs.
    pub const LOG_INTERVAL: u64 = 1000;

    pub fn from_log_only(log_only: bool) -> Self {
        if log_only {
            ProgressMode::LogEvery(Self::LOG_INTERVAL)
        } else {
            ProgressMode::Bar
        }
    }
}

/// One counted phase of work, reported according to the mode.
pub struct Progress {
    bar: ProgressBar,
    mode: ProgressMode,
    label: String,
    total: u64,
    seen: u64,
}

impl Progress {
    pub fn start(mode: ProgressMode, total: u64, label: &str) -> Self {
        let bar = ProgressBar::new(total);
        match mode {
            ProgressMode::Bar => {
                bar.set_style(
                    ProgressStyle::default_bar()
                        .template("{msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec}, ETA: {eta})")
                        .unwrap()
                        .progress_chars("=> "),
                );
                bar.set_message(label.to_string());
            }
            ProgressMode::LogEvery(_) | ProgressMode::Silent => {
                bar.set_draw_target(ProgressDrawTarget::hidden());
            }
        }
        Self {
            bar,
            mode,
            label: label.to_string(),
            total,
            seen: 0,
        }
    }

    /// Record one finished item.
    pub fn tick(&mut self) {
        self.seen += 1;
        self.bar.inc(1);
        if let ProgressMode::LogEvery(interval) = self.mode {
            if self.seen % interval == 0 || self.seen == self.total {
                let pct = 100.0 * self.seen as f64 / self.total.max(1) as f64;
                eprintln!("[{}] {}/{} ({:.1}%)", self.label, self.seen, self.total, pct);
            }
        }
    }

    /// Items recorded so far.
    pub fn seen(&self) -> u64 {
        self.seen
    }

    /// Close out the phase with a summary line.
    pub fn finish(self, msg: &str) {
        match self.mode {
            ProgressMode::Bar => self.bar.finish_with_message(msg.to_string()),
            ProgressMode::LogEvery(_) => eprintln!("[{}] {}", self.label, msg),
            ProgressMode::Silent => self.bar.finish_and_clear(),
        }
    }
}

/// Format duration in human-readable form.
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs >= 60.0 {
        format!("{:.1}m", secs / 60.0)
    } else {
        format!("{:.1}s", secs)
    }
}
