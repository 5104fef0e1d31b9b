use std::path::{Path, PathBuf};
use std::process::Command;

use log::{debug, warn};
use tapels_columnize::Color;
use tapels_runtime::{MIGRATED_LABEL, PREMIGRATED_LABEL, RESIDENT_LABEL, attr_check_program};

/// Tape-migration state of a regular file, as reported by the external
/// attribute oracle. `Unknown` is the initial value and is terminal for
/// directories, symlinks and files outside the storage roots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StorageState {
    #[default]
    Unknown,
    Resident,
    Premigrated,
    Migrated,
}

impl StorageState {
    /// Fold a raw oracle return code into a state. Codes other than
    /// 0/1/2 are the oracle's problem, not ours: they classify as
    /// `Unknown` instead of aborting the listing.
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => StorageState::Resident,
            1 => StorageState::Premigrated,
            2 => StorageState::Migrated,
            _ => StorageState::Unknown,
        }
    }

    /// Text shown in place of color when --no-color is set. `Unknown`
    /// has no annotation at all.
    pub fn label(self) -> Option<&'static str> {
        match self {
            StorageState::Unknown => None,
            StorageState::Resident => Some(RESIDENT_LABEL),
            StorageState::Premigrated => Some(PREMIGRATED_LABEL),
            StorageState::Migrated => Some(MIGRATED_LABEL),
        }
    }

    pub fn color(self) -> Color {
        match self {
            StorageState::Unknown => Color::None,
            StorageState::Resident => Color::Green,
            StorageState::Premigrated => Color::Yellow,
            StorageState::Migrated => Color::Red,
        }
    }
}

/// The external attribute oracle: called at most once per eligible
/// regular file, returns the raw tri-state code. Implementations must be
/// safe to call concurrently for distinct paths; nothing else is assumed
/// about their latency or behavior.
pub trait Oracle: Send + Sync {
    fn check_attr(&self, path: &Path) -> i32;
}

/// Production oracle: runs the site-installed attr-check helper once per
/// file and reports its exit code. A helper that cannot be spawned or
/// that dies on a signal yields an out-of-range code, which classifies
/// as `Unknown`.
pub struct CommandOracle {
    program: PathBuf,
}

impl CommandOracle {
    pub fn new() -> Self {
        CommandOracle {
            program: attr_check_program(),
        }
    }
}

impl Default for CommandOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl Oracle for CommandOracle {
    fn check_attr(&self, path: &Path) -> i32 {
        match Command::new(&self.program).arg(path).output() {
            Ok(out) => out.status.code().unwrap_or(-1),
            Err(err) => {
                warn!(
                    "attr-check helper {} failed for {}: {err}",
                    self.program.display(),
                    path.display()
                );
                -1
            }
        }
    }
}

/// Ask the oracle about `path` and map its answer.
pub fn classify(oracle: &dyn Oracle, path: &Path) -> StorageState {
    let code = oracle.check_attr(path);
    let state = StorageState::from_code(code);
    debug!("attr check {}: code {code} -> {state:?}", path.display());
    state
}

#[cfg(test)]
#[path = "classify_tests.rs"]
mod tests;
