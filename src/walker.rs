//! Directory fan-out.
//!
//! Walks a tree, spawns one task per regular file and joins them all before
//! returning. There is no pool or cap: a tree of N files has N tasks in
//! flight, each holding one whole file in memory.

use std::path::Path;

use tokio::task::JoinSet;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{TransformError, WalkError};
use crate::transform::{Outcome, Transformer};
use crate::types::Options;

/// Tally of a finished walk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub succeeded: usize,
    pub failed: usize,
    /// Bytes written across all successful tasks.
    pub bytes: u64,
}

impl Summary {
    #[inline]
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Ok(report) => {
                self.succeeded += 1;
                self.bytes += report.bytes;
            }
            Err(_) => self.failed += 1,
        }
    }
}

/// Transforms every regular file under `root` concurrently.
///
/// `on_done` sees each outcome as its task finishes, in completion order.
/// A traversal error stops spawning new tasks; the ones already running are
/// still joined before the error is returned.
pub async fn walk<F>(root: &Path, transformer: &Transformer, options: Options, mut on_done: F) -> Result<Summary, WalkError>
where
    F: FnMut(&Outcome),
{
    let mut tasks = JoinSet::new();
    let mut traversal = Ok(());

    // Sorting makes walkdir read each directory in full before yielding its
    // entries, so artifacts written by running tasks are never enqueued.
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(source) => {
                warn!(root = %root.display(), error = %source, "walk aborted");
                traversal = Err(WalkError::Traversal { root: root.to_path_buf(), source });
                break;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        debug!(path = %entry.path().display(), "spawning file task");
        let task = options.task(entry.into_path());
        let transformer = transformer.clone();
        tasks.spawn(async move { transformer.transform(task).await });
    }

    let mut summary = Summary::default();

    while let Some(joined) = tasks.join_next().await {
        let outcome = joined.unwrap_or_else(|e| Err(TransformError::Task(e.to_string())));
        summary.record(&outcome);
        on_done(&outcome);
    }

    traversal.map(|()| summary)
}
