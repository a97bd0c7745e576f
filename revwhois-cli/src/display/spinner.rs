use std::borrow::Cow;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

const TICK: Duration = Duration::from_millis(100);

/// Stderr spinner shown while a reverse WHOIS request is in flight.
/// Cleared on drop, so an early return never leaves it on screen.
pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self::with_target(ProgressDrawTarget::stderr(), message)
    }

    fn with_target(target: ProgressDrawTarget, message: impl Into<Cow<'static, str>>) -> Self {
        let bar = ProgressBar::with_draw_target(None, target);
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg} {elapsed:.dim}") {
            bar.set_style(style.tick_chars("◐◓◑◒ "));
        }
        bar.set_message(message);
        bar.enable_steady_tick(TICK);

        Self { bar }
    }

    /// Announce the page about to be requested (1-based).
    pub fn page(&self, number: usize) {
        self.bar.set_message(format!("Fetching page {}...", number));
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}
