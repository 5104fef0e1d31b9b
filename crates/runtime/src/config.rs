use std::path::PathBuf;

pub const PROGRAM_NAME: &str = "tapels";
pub const PROGRAM_LOG_LEVEL: &str = "TAPELS_LOG_LEVEL";

/// Root paths of the mounted storage filesystems whose files carry
/// tape-migration state. Paths outside these roots are never classified.
pub const STORAGE_ROOTS: &[&str] = &["/gpfs/themis", "/nl/themis"];

/// Largest individual file (in GB) that the archive layer will migrate
/// to tape. Anything above this renders as "too large to migrate".
pub const MAX_MIGRATABLE_GB: u64 = 19450;

/// Disables comparing file sizes against `MAX_MIGRATABLE_GB` entirely.
pub const DISABLE_SIZE_CHECK: bool = false;

/// Always launch the full worker ceiling when statting a directory,
/// instead of shrinking the pool for small batches.
pub const ALWAYS_USE_MAX_WORKERS: bool = false;

/// Hide the debug flags from `--help` output.
pub const HIDE_DEBUG_FLAGS: bool = true;

/// Print failure reasons without the internal error chain.
pub const SUPPRESS_BACKTRACE: bool = true;

/// Environment variable that overrides the attr-check helper program.
pub const ATTR_CHECK_PROGRAM_ENV: &str = "TAPELS_ATTR_CHECK";
const DEFAULT_ATTR_CHECK_PROGRAM: &str = "attr_check";

// Display strings for the three oracle return codes. If a non-default
// attr-check helper is installed, adjust these to match its codes.
// The labels are used in place of color when --no-color is present.
pub const RESIDENT_LABEL: &str = "Resident";
pub const PREMIGRATED_LABEL: &str = "Premigrated";
pub const MIGRATED_LABEL: &str = "Migrated";

// Legend text for -H/--hints.
pub const DIRECTORY_HINT: &str = "Indicates a directory";
pub const SYMLINK_HINT: &str = "Indicates a symbolic link";
pub const RESIDENT_HINT: &str = "Indicates a file that is resident on disk";
pub const PREMIGRATED_HINT: &str =
    "Indicates a file that has been premigrated (e.g. resident on both tape and disk)";
pub const MIGRATED_HINT: &str = "Indicates a file that has been migrated to tape";
pub const OVERSIZE_HINT: &str =
    "Indicates a file resident on disk that will never be able to migrate to tape because it is too large";

/// Helper program invoked per file to read its tape-migration attribute.
pub fn attr_check_program() -> PathBuf {
    std::env::var_os(ATTR_CHECK_PROGRAM_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ATTR_CHECK_PROGRAM))
}

/// Ceiling on stat workers per directory batch: half the available
/// processing units, rounded up, never less than one.
pub fn max_workers() -> usize {
    num_cpus::get().div_ceil(2).max(1)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
