//! Output workspace management.
//!
//! Ensures the output directory exists and reclaims stale artifacts from a
//! prior run of the same source, so re-runs never leave orphaned segments
//! behind. Artifacts belonging to other base names in a shared directory are
//! never touched.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::job::TranscodeJob;

/// A prepared output directory for one packaging run.
pub struct OutputWorkspace {
    dir: PathBuf,
}

impl OutputWorkspace {
    /// Create the output directory (recursively) if absent, then delete every
    /// stale artifact the job would own.
    ///
    /// Directory creation failure is fatal -- nothing can be written without
    /// it. Cleanup failures are tolerated: a stale file is preferable to
    /// aborting the run, but each one is surfaced as a warning. Calling this
    /// on an empty or already-clean directory is a no-op.
    pub fn prepare(job: &TranscodeJob) -> Result<Self> {
        std::fs::create_dir_all(&job.output_dir).map_err(|e| {
            Error::Workspace(format!(
                "failed to create output dir {}: {e}",
                job.output_dir.display()
            ))
        })?;

        let workspace = Self {
            dir: job.output_dir.clone(),
        };
        workspace.clean_stale(job);
        Ok(workspace)
    }

    /// The output directory path.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn clean_stale(&self, job: &TranscodeJob) {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(
                    "skipping stale-artifact cleanup, cannot scan {}: {e}",
                    self.dir.display()
                );
                return;
            }
        };

        let mut removed = 0usize;
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("skipping unreadable directory entry: {e}");
                    continue;
                }
            };
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            if !job.owns_artifact(name) {
                continue;
            }
            match std::fs::remove_file(entry.path()) {
                Ok(()) => removed += 1,
                Err(e) => {
                    tracing::warn!("failed to remove stale artifact {name}: {e}");
                }
            }
        }

        if removed > 0 {
            tracing::info!(
                "removed {removed} stale artifact(s) for {} from {}",
                job.base_name,
                self.dir.display()
            );
        }
    }
}
