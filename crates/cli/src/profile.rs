use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::debug;
use pprof::protos::Message;

/// CPU profiler covering the span of one listing run. Started before
/// any statting happens and finished after printing; the profile is
/// written in pprof protobuf form to the configured path.
pub struct Profiler {
    guard: pprof::ProfilerGuard<'static>,
    path: PathBuf,
}

impl Profiler {
    pub fn start(path: &Path) -> Result<Self> {
        debug!("profiling CPU usage to {}", path.display());
        let guard = pprof::ProfilerGuard::new(100).context("cannot start CPU profiler")?;
        Ok(Profiler {
            guard,
            path: path.to_path_buf(),
        })
    }

    pub fn finish(self) -> Result<()> {
        let report = self
            .guard
            .report()
            .build()
            .context("cannot build CPU profile")?;
        let profile = report.pprof().context("cannot encode CPU profile")?;
        let mut body = Vec::new();
        profile
            .write_to_vec(&mut body)
            .context("cannot encode CPU profile")?;

        let mut file = File::create(&self.path)
            .with_context(|| format!("cannot create {}", self.path.display()))?;
        file.write_all(&body)
            .with_context(|| format!("cannot write {}", self.path.display()))?;
        debug!("CPU profile written to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
#[path = "profile_tests.rs"]
mod tests;
