use std::fs;
use std::os::unix::fs::MetadataExt;
use std::path::Path;

use chrono::{DateTime, Local};
use log::debug;
use tapels_runtime::{DISABLE_SIZE_CHECK, MAX_MIGRATABLE_GB};
use uzers::{get_group_by_gid, get_user_by_uid};

use crate::classify::StorageState;
use crate::error::ListError;
use crate::record::FileRecord;

/// Display (and re-parse, for time sorting) format for mtimes.
pub const MTIME_FORMAT: &str = "%b %d %H:%M %Y";

// File type and special-permission masks from <sys/stat.h>.
const S_IFMT: u32 = 0o170000;
const S_IFSOCK: u32 = 0o140000;
const S_IFLNK: u32 = 0o120000;
const S_IFBLK: u32 = 0o060000;
const S_IFDIR: u32 = 0o040000;
const S_IFCHR: u32 = 0o020000;
const S_IFIFO: u32 = 0o010000;
const S_ISUID: u32 = 0o4000;
const S_ISGID: u32 = 0o2000;
const S_ISVTX: u32 = 0o1000;

/// Stat one path without following symlinks and build its record.
/// The storage state is left at `Unknown`; classification is a separate
/// concern layered on by the scheduler.
pub fn extract(path: &Path) -> Result<FileRecord, ListError> {
    let meta = fs::symlink_metadata(path).map_err(|source| ListError::Stat {
        path: path.to_path_buf(),
        source,
    })?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned());

    let owner = get_user_by_uid(meta.uid())
        .map(|u| u.name().to_string_lossy().into_owned())
        .ok_or(ListError::UnknownUser(meta.uid()))?;
    let group = get_group_by_gid(meta.gid())
        .map(|g| g.name().to_string_lossy().into_owned())
        .ok_or(ListError::UnknownGroup(meta.gid()))?;

    let modified = meta.modified().map_err(|source| ListError::Stat {
        path: path.to_path_buf(),
        source,
    })?;
    let mtime = DateTime::<Local>::from(modified).format(MTIME_FORMAT).to_string();

    let mode = meta.mode();
    let kind = mode & S_IFMT;
    let size = meta.len();

    let record = FileRecord {
        path: path.to_path_buf(),
        name,
        is_dir: kind == S_IFDIR,
        is_symlink: kind == S_IFLNK,
        mode: mode_string(mode),
        owner,
        group,
        size,
        mtime,
        state: StorageState::default(),
        oversize: !DISABLE_SIZE_CHECK && bytes_to_gb(size) > MAX_MIGRATABLE_GB,
    };
    debug!(
        "stat {}: {} {} {} {} {}",
        path.display(),
        record.mode,
        record.owner,
        record.group,
        record.size,
        record.mtime
    );
    Ok(record)
}

/// 10-character ls-style mode column. Starts from the plain `rwx`
/// triplets, then stacks the type and special-bit overrides; a setuid
/// directory ends up with both its `d` and its `s`.
pub fn mode_string(mode: u32) -> String {
    const BITS: [(u32, u8); 9] = [
        (0o400, b'r'),
        (0o200, b'w'),
        (0o100, b'x'),
        (0o040, b'r'),
        (0o020, b'w'),
        (0o010, b'x'),
        (0o004, b'r'),
        (0o002, b'w'),
        (0o001, b'x'),
    ];

    let mut m = [b'-'; 10];
    for (i, (bit, ch)) in BITS.iter().enumerate() {
        if mode & bit != 0 {
            m[i + 1] = *ch;
        }
    }

    let kind = mode & S_IFMT;
    if kind == S_IFDIR {
        m[0] = b'd';
    }
    if mode & S_ISGID != 0 {
        m[6] = b's';
    }
    if mode & S_ISUID != 0 {
        m[3] = b's';
    }
    if mode & S_ISVTX != 0 {
        m[9] = b't';
    }
    if kind == S_IFLNK {
        m[0] = b'l';
    }
    if kind == S_IFBLK {
        m[0] = b'b';
    }
    if kind == S_IFCHR {
        m[0] = b'c';
    }
    if kind == S_IFIFO {
        m[0] = b'p';
    }
    if kind == S_IFSOCK {
        m[0] = b's';
    }

    m.iter().map(|&b| b as char).collect()
}

/// Base-1000 humanizer for the -h flag: largest unit keeping the scaled
/// value under 1000, one decimal place, whole bytes for the byte unit.
pub fn humanize_size(bytes: u64) -> String {
    const UNIT: u64 = 1000;
    if bytes < UNIT {
        return format!("{bytes} B");
    }
    let mut div = UNIT;
    let mut exp = 0;
    let mut n = bytes / UNIT;
    while n >= UNIT {
        div *= UNIT;
        exp += 1;
        n /= UNIT;
    }
    format!("{:.1} {}B", bytes as f64 / div as f64, ['k', 'M', 'G', 'T', 'P', 'E'][exp])
}

/// Truncating base-1024 byte-to-GB conversion used by the migratability
/// threshold. Deliberately not unified with `humanize_size`'s base-1000
/// scaling; the threshold has always been binary GB.
pub fn bytes_to_gb(bytes: u64) -> u64 {
    bytes / 1024 / 1024 / 1024
}

#[cfg(test)]
#[path = "meta_tests.rs"]
mod tests;
