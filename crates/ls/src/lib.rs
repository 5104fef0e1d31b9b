mod classify;
mod error;
mod listing;
mod meta;
mod record;
mod sched;

pub use classify::{CommandOracle, Oracle, StorageState, classify};
pub use error::ListError;
pub use listing::{DirectoryGroup, ListFlags, Listing, eligibility_map, is_eligible};
pub use meta::{MTIME_FORMAT, bytes_to_gb, extract, humanize_size, mode_string};
pub use record::FileRecord;
pub use sched::{stat_batch, worker_count};
