mod config;
pub mod logging;

pub use config::{
    ALWAYS_USE_MAX_WORKERS, DIRECTORY_HINT, DISABLE_SIZE_CHECK, HIDE_DEBUG_FLAGS,
    MAX_MIGRATABLE_GB, MIGRATED_HINT, MIGRATED_LABEL, OVERSIZE_HINT, PREMIGRATED_HINT,
    PREMIGRATED_LABEL, PROGRAM_NAME, RESIDENT_HINT, RESIDENT_LABEL, STORAGE_ROOTS,
    SUPPRESS_BACKTRACE, SYMLINK_HINT, attr_check_program, max_workers,
};
