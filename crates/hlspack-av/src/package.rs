//! The packaging pipeline: one source file in, one HLS package out.

use std::path::PathBuf;

use tokio_util::sync::CancellationToken;

use crate::actions::run_transcode;
use crate::error::{Error, Result};
use crate::job::TranscodeJob;
use crate::playlist::write_master_playlist;
use crate::probe::probe_source;
use crate::tools::ToolRegistry;
use crate::workspace::OutputWorkspace;

/// Run the full pipeline for one job: prepare the output workspace, transcode
/// every rendition in a single engine pass, then publish the master playlist.
///
/// Returns the master playlist path on success. Every stage fails fast; the
/// master playlist is written only after the engine reports success, so a
/// manifest never references unverified segments. Segments from a failed run
/// are left in place for diagnosis and reclaimed by the next run's cleanup.
///
/// Jobs for different sources may run concurrently as long as they do not
/// share a `base_name` within one output directory; no cross-job locking is
/// provided here.
pub async fn package(
    tools: &ToolRegistry,
    job: &TranscodeJob,
    cancel: Option<CancellationToken>,
) -> Result<PathBuf> {
    if job.ladder.is_empty() {
        return Err(Error::InvalidJob(
            "rendition ladder is empty; nothing to package".to_string(),
        ));
    }
    if !job.input.is_file() {
        return Err(Error::file_not_found(&job.input));
    }

    let workspace = OutputWorkspace::prepare(job)?;
    tracing::debug!("output workspace ready at {}", workspace.dir().display());

    // Best-effort advisory probe; packaging itself only needs ffmpeg.
    match probe_source(tools, &job.input).await {
        Ok(info) => {
            if let Some(video) = &info.video {
                tracing::info!(
                    "source: {} {}x{} ({})",
                    video.codec,
                    video.width,
                    video.height,
                    info.container
                );
            }
            if !info.has_audio {
                tracing::warn!(
                    "source has no audio track; advertised bandwidth still includes the {}k audio bitrate",
                    job.audio_bitrate_kbps
                );
            }
        }
        Err(e) => tracing::debug!("source probe skipped: {e}"),
    }

    run_transcode(tools, job, cancel).await?;

    let master = write_master_playlist(job)?;
    tracing::info!("master playlist written to {}", master.display());
    Ok(master)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ladder::RenditionLadder;

    #[tokio::test]
    async fn empty_ladder_short_circuits() {
        let tools = ToolRegistry::discover(&Default::default());
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("clip.mp4");
        std::fs::write(&input, b"not really video").unwrap();

        let job = TranscodeJob::new(&input, tmp.path(), RenditionLadder::new(Vec::new()))
            .unwrap();
        let result = package(&tools, &job, None).await;
        assert!(matches!(result, Err(Error::InvalidJob(_))));
    }

    #[tokio::test]
    async fn missing_input_is_rejected_before_any_work() {
        let tools = ToolRegistry::discover(&Default::default());
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("out");

        let job = TranscodeJob::new(
            tmp.path().join("absent.mp4"),
            &out,
            RenditionLadder::default(),
        )
        .unwrap();
        let result = package(&tools, &job, None).await;
        assert!(matches!(result, Err(Error::FileNotFound { .. })));
        // The workspace is not created for a job that cannot start.
        assert!(!out.exists());
    }
}
