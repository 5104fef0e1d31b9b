use std::path::PathBuf;

use crate::classify::StorageState;

/// One directory entry, fully resolved and render-ready.
#[derive(Debug, Clone)]
pub struct FileRecord {
    /// Absolute path the record was statted at. Kept for symlink target
    /// resolution at presentation time.
    pub path: PathBuf,
    /// Display name: the leaf component, or the synthesized `.` / `..`.
    pub name: String,
    pub is_dir: bool,
    pub is_symlink: bool,
    /// 10-character ls-style permission column, e.g. `-rw-r--r--`.
    pub mode: String,
    pub owner: String,
    pub group: String,
    pub size: u64,
    /// Modification time, pre-formatted with `MTIME_FORMAT`.
    pub mtime: String,
    /// Tape-migration state. Stays `Unknown` for directories, symlinks
    /// and anything outside the configured storage roots.
    pub state: StorageState,
    /// True when the file is too large for the archive layer to ever
    /// migrate. Takes rendering priority over `state`.
    pub oversize: bool,
}

impl FileRecord {
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }
}
