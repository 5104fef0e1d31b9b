use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use log::debug;
use tapels_columnize::{Color, Columnizer};
use tapels_runtime::STORAGE_ROOTS;

use crate::classify::Oracle;
use crate::error::ListError;
use crate::meta::{self, MTIME_FORMAT};
use crate::record::FileRecord;
use crate::sched;

/// Presentation flags for one invocation, set once from the CLI before
/// any statting happens.
#[derive(Debug, Clone, Default)]
pub struct ListFlags {
    pub long: bool,
    pub human: bool,
    pub all: bool,
    pub sort_by_time: bool,
    pub no_color: bool,
    /// Input path -> whether its files live under a storage root and
    /// should be classified.
    pub eligible: HashMap<PathBuf, bool>,
}

/// True when `path` equals or sits under one of the configured storage
/// roots. Files elsewhere have no tape-migration state, so the oracle
/// is never consulted for them.
pub fn is_eligible(path: &Path) -> bool {
    let p = path.to_string_lossy();
    STORAGE_ROOTS.iter().any(|root| p.contains(root))
}

/// Per-input-path eligibility, ready for `ListFlags::eligible`.
pub fn eligibility_map(paths: &[PathBuf]) -> HashMap<PathBuf, bool> {
    paths
        .iter()
        .map(|p| (p.clone(), is_eligible(p)))
        .collect()
}

/// One base directory and its (eventually sorted) records.
#[derive(Debug)]
pub struct DirectoryGroup {
    pub base: PathBuf,
    pub records: Vec<FileRecord>,
}

/// The whole listing: every input path expanded, statted, classified and
/// grouped by base directory. Groups keep the insertion order of the
/// input paths; records within a group are ordered by `sort`.
pub struct Listing {
    paths: Vec<PathBuf>,
    groups: Vec<DirectoryGroup>,
    flags: ListFlags,
}

impl Listing {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Listing {
            paths,
            groups: Vec::new(),
            flags: ListFlags::default(),
        }
    }

    pub fn set_flags(&mut self, flags: ListFlags) {
        self.flags = flags;
    }

    pub fn groups(&self) -> &[DirectoryGroup] {
        &self.groups
    }

    fn group_mut(&mut self, base: &Path) -> &mut DirectoryGroup {
        let idx = match self.groups.iter().position(|g| g.base == base) {
            Some(i) => i,
            None => {
                self.groups.push(DirectoryGroup {
                    base: base.to_path_buf(),
                    records: Vec::new(),
                });
                self.groups.len() - 1
            }
        };
        &mut self.groups[idx]
    }

    /// Expand every input path and collect its records: a lone record
    /// for files and symlinks, a full scheduled batch for directories.
    pub fn stat_all(&mut self, oracle: &dyn Oracle) -> Result<(), ListError> {
        for path in self.paths.clone() {
            let eligible = self.flags.eligible.get(&path).copied().unwrap_or(false);
            let record = sched::stat_one(&path, eligible, oracle)?;

            if !record.is_dir {
                let base = path.parent().unwrap_or(Path::new("/")).to_path_buf();
                self.group_mut(&base).records.push(record);
                continue;
            }

            let mut entries = Vec::new();
            if self.flags.all {
                // Synthesize `.` and `..` ahead of the children; both
                // still take part in the later sort.
                let mut current = sched::stat_one(&path.join("."), eligible, oracle)?;
                current.name = ".".to_owned();
                let mut parent = sched::stat_one(&path.join(".."), eligible, oracle)?;
                parent.name = "..".to_owned();
                entries.push(current);
                entries.push(parent);
            }

            let children = read_children(&path, self.flags.all)?;
            entries.extend(sched::stat_batch(children, eligible, oracle)?);
            self.group_mut(&path).records = entries;
        }
        Ok(())
    }

    /// Order each group's records: lexicographic by name, or ascending
    /// by modification time under -t. Time keys are parsed up front so a
    /// bad timestamp aborts instead of being silently mis-sorted.
    pub fn sort(&mut self) -> Result<(), ListError> {
        debug!("starting sort");
        for group in &mut self.groups {
            if self.flags.sort_by_time {
                let records = std::mem::take(&mut group.records);
                let mut keyed = Vec::with_capacity(records.len());
                for rec in records {
                    let key = NaiveDateTime::parse_from_str(&rec.mtime, MTIME_FORMAT).map_err(
                        |source| ListError::TimeParse {
                            value: rec.mtime.clone(),
                            source,
                        },
                    )?;
                    keyed.push((key, rec));
                }
                keyed.sort_by(|a, b| a.0.cmp(&b.0));
                group.records = keyed.into_iter().map(|(_, rec)| rec).collect();
            } else {
                group.records.sort_by(|a, b| a.name.cmp(&b.name));
            }
        }
        debug!("sort finished");
        Ok(())
    }

    /// Render every group to `out`, one scoped columnizer per group,
    /// flushed before moving on. Hidden entries are suppressed here
    /// again even though enumeration already filtered them.
    pub fn print<W: Write>(&self, out: &mut W) -> Result<(), ListError> {
        debug!("printing to screen");
        for (i, group) in self.groups.iter().enumerate() {
            if self.groups.len() > 1 {
                if i > 0 {
                    writeln!(out)?;
                }
                writeln!(out, "{}:", group.base.display())?;
            }

            // Resolve all presentation decisions first; symlink
            // resolution can fail and nothing should be emitted then.
            let mut rows = Vec::new();
            for rec in &group.records {
                if rec.is_hidden() && !self.flags.all {
                    continue;
                }
                let (name, color) = self.presentation(rec, &group.base)?;
                let mut cells = if self.flags.long {
                    self.long_cells(rec)
                } else {
                    Vec::new()
                };
                cells.push(name);
                rows.push((cells, color));
            }

            let mut table = Columnizer::align_right(&mut *out);
            for (cells, color) in rows {
                let highlight = cells.len() - 1;
                table.emit_highlighted(cells, highlight, color);
            }
            table.flush()?;
        }
        Ok(())
    }

    /// Pick the display name and color tag for one record. Priority:
    /// directory, symlink, oversize override, then storage state.
    fn presentation(&self, rec: &FileRecord, base: &Path) -> Result<(String, Color), ListError> {
        if rec.is_dir {
            let color = if self.flags.no_color {
                Color::None
            } else {
                Color::Blue
            };
            return Ok((rec.name.clone(), color));
        }

        if rec.is_symlink {
            let color = if self.flags.no_color {
                Color::None
            } else {
                Color::LightBlue
            };
            return Ok((self.symlink_text(rec, base)?, color));
        }

        if rec.oversize {
            // A file the archive layer can never move wins over whatever
            // state the oracle reported for it.
            return Ok(if self.flags.no_color {
                (format!("(TOO LARGE TO MIGRATE) {}", rec.name), Color::None)
            } else {
                (rec.name.clone(), Color::BlinkingRedBackground)
            });
        }

        match rec.state.label() {
            Some(label) if self.flags.no_color => {
                Ok((format!("({label}) {}", rec.name), Color::None))
            }
            Some(_) => Ok((rec.name.clone(), rec.state.color())),
            None => Ok((rec.name.clone(), Color::None)),
        }
    }

    /// Resolve a symlink's target. Absolute targets under the base
    /// directory are shown `./`-relative (unless the base is the
    /// filesystem root); long format appends the ` -> target` arrow.
    fn symlink_text(&self, rec: &FileRecord, base: &Path) -> Result<String, ListError> {
        // Resolution happens even when the target is not shown, so a
        // dangling link aborts the listing in short format too.
        let target = fs::canonicalize(&rec.path).map_err(|source| ListError::Symlink {
            path: rec.path.clone(),
            source,
        })?;
        if !self.flags.long {
            return Ok(rec.name.clone());
        }
        let shown = if base != Path::new("/") {
            match target.strip_prefix(base) {
                Ok(rest) => Path::new(".").join(rest),
                Err(_) => target,
            }
        } else {
            target
        };
        Ok(format!("{} -> {}", rec.name, shown.display()))
    }

    fn long_cells(&self, rec: &FileRecord) -> Vec<String> {
        let size = if self.flags.human {
            meta::humanize_size(rec.size)
        } else {
            rec.size.to_string()
        };
        vec![
            rec.mode.clone(),
            rec.owner.clone(),
            rec.group.clone(),
            size,
            rec.mtime.clone(),
        ]
    }
}

/// Immediate children of `dir`, hidden names filtered out unless `all`.
/// No recursion; this lists, it does not walk.
fn read_children(dir: &Path, all: bool) -> Result<Vec<PathBuf>, ListError> {
    let rd = fs::read_dir(dir).map_err(|source| ListError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut children = Vec::new();
    for entry in rd {
        let entry = entry.map_err(|source| ListError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;
        if !all && entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        children.push(entry.path());
    }
    Ok(children)
}

#[cfg(test)]
#[path = "listing_tests.rs"]
mod tests;
