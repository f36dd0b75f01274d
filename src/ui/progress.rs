use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

/// Spinner counting finished file tasks while a tree is processed.
///
/// The total is unknown up front because tasks are spawned as the walk
/// discovers files.
pub struct Bar {
    bar: ProgressBar,
}

impl Bar {
    pub fn new(description: &str) -> Result<Self> {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.green} {msg} {pos} file(s) done ({elapsed})")?;

        bar.set_style(style);
        bar.set_message(description.to_owned());
        bar.enable_steady_tick(Duration::from_millis(120));

        Ok(Self { bar })
    }

    pub fn add(&self, delta: u64) {
        self.bar.inc(delta);
    }

    /// Runs `f` with the spinner hidden so printed lines do not interleave with it.
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        self.bar.suspend(f)
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Drop for Bar {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}
