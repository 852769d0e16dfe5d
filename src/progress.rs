//! Cosmetic per-stage progress indicator.
//!
//! The spinner only animates while a stage's command runs. Nothing else depends on it, so the
//! runner takes any [`ProgressReporter`] and tests pass [`NoProgress`].

use indicatif::{ProgressBar, ProgressStyle};
use parking_lot::Mutex;
use std::time::Duration;

pub trait ProgressReporter: Send + Sync {
    fn start(&self, stage: &str);
    fn stop(&self, stage: &str, ok: bool);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn start(&self, _stage: &str) {}
    fn stop(&self, _stage: &str, _ok: bool) {}
}

/// Terminal spinner driven by indicatif's steady tick thread.
#[derive(Default)]
pub struct SpinnerProgress {
    current: Mutex<Option<ProgressBar>>,
}

impl SpinnerProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressReporter for SpinnerProgress {
    fn start(&self, stage: &str) {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("[{prefix}] {msg} {spinner}") {
            pb.set_style(style.tick_chars("|/-\\ "));
        }
        pb.set_prefix(stage.to_string());
        pb.set_message("Working...");
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Some(old) = self.current.lock().replace(pb) {
            old.finish_and_clear();
        }
    }

    fn stop(&self, stage: &str, ok: bool) {
        if let Some(pb) = self.current.lock().take() {
            let msg = if ok { "Done!" } else { "Failed" };
            pb.set_prefix(stage.to_string());
            pb.finish_with_message(msg);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_start_stop() {
        let p = SpinnerProgress::new();
        p.start("Subfinder");
        assert!(p.current.lock().is_some());
        p.stop("Subfinder", true);
        assert!(p.current.lock().is_none());
        // stopping twice is harmless
        p.stop("Subfinder", false);
    }
}
