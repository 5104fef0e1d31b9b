use std::path::{Path, PathBuf};
use std::thread;

use crossbeam::channel;
use log::debug;
use tapels_runtime::{ALWAYS_USE_MAX_WORKERS, max_workers};

use crate::classify::{self, Oracle};
use crate::error::ListError;
use crate::meta;
use crate::record::FileRecord;

/// Pool size for a batch of `batch` paths under a ceiling of `max`.
/// Small batches deliberately under-allocate (half the batch plus one)
/// rather than spinning up the full ceiling for a five-file directory.
pub fn worker_count(batch: usize, max: usize, always_max: bool) -> usize {
    if always_max {
        return max;
    }
    if batch < max { batch / 2 + 1 } else { max }
}

/// Stat one path and, when it is an eligible plain file, classify it.
/// Directories and symlinks keep `StorageState::Unknown` unconditionally.
pub(crate) fn stat_one(
    path: &Path,
    eligible: bool,
    oracle: &dyn Oracle,
) -> Result<FileRecord, ListError> {
    let mut record = meta::extract(path)?;
    if eligible && !record.is_dir && !record.is_symlink {
        record.state = classify::classify(oracle, path);
    }
    Ok(record)
}

/// Fan a directory's worth of sibling paths out to a bounded worker pool
/// and gather one record per path. Result order is unspecified; the
/// listing aggregate sorts afterwards. Any worker error aborts the whole
/// batch with no partial results.
pub fn stat_batch(
    paths: Vec<PathBuf>,
    eligible: bool,
    oracle: &dyn Oracle,
) -> Result<Vec<FileRecord>, ListError> {
    if paths.is_empty() {
        return Ok(Vec::new());
    }

    let ceiling = max_workers();
    let workers = worker_count(paths.len(), ceiling, ALWAYS_USE_MAX_WORKERS);
    debug!(
        "launching {workers} stat workers (ceiling {ceiling}, batch {})",
        paths.len()
    );

    let (work_tx, work_rx) = channel::bounded::<PathBuf>(paths.len());
    let (result_tx, result_rx) = channel::bounded::<Result<FileRecord, ListError>>(paths.len());

    for path in paths {
        debug!("queueing {}", path.display());
        // The queue is sized to the batch, so this never blocks.
        work_tx.send(path).expect("work queue sized to batch");
    }
    drop(work_tx);

    thread::scope(|s| {
        for n in 0..workers {
            let work_rx = work_rx.clone();
            let result_tx = result_tx.clone();
            s.spawn(move || {
                debug!("stat worker {n} up");
                for path in work_rx {
                    let _ = result_tx.send(stat_one(&path, eligible, oracle));
                }
            });
        }
    });

    // The scope exit is the completion barrier: every worker has finished
    // and dropped its sender, so draining the result channel below runs
    // to exhaustion without racing a close signal.
    drop(result_tx);

    let mut records = Vec::new();
    for res in result_rx {
        records.push(res?);
    }
    debug!("gather complete: {} records", records.len());
    Ok(records)
}

#[cfg(test)]
#[path = "sched_tests.rs"]
mod tests;
