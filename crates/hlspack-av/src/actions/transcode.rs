//! Single-invocation ladder transcode using ffmpeg.
//!
//! One engine invocation decodes the source once and produces every
//! rendition's segments and media playlist. Decode is the expensive,
//! non-parallelizable shared cost, so per-rendition invocations are
//! deliberately not an option here.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::command::EngineCommand;
use crate::error::{Error, Result};
use crate::filter::{scale_filter_graph, stream_label};
use crate::job::TranscodeJob;
use crate::tools::ToolRegistry;

/// Maximum encode duration before the engine is killed.
const TRANSCODE_TIMEOUT: Duration = Duration::from_secs(86400); // 24 hours

/// Build the complete argument list for one engine invocation.
///
/// Per rendition: map its scaled stream and the source audio (as optional --
/// `0:a?` -- so audio-less sources do not abort the run), apply codec and
/// bitrate settings, and configure segmented VOD output scoped by rendition
/// label and base name.
///
/// # Errors
///
/// Returns [`Error::InvalidJob`] for an empty ladder -- an empty filter graph
/// is not valid engine input.
pub fn build_transcode_args(job: &TranscodeJob) -> Result<Vec<String>> {
    if job.ladder.is_empty() {
        return Err(Error::InvalidJob(
            "rendition ladder is empty; nothing to transcode".to_string(),
        ));
    }

    let mut args: Vec<String> = vec![
        "-y".to_string(),
        "-i".to_string(),
        job.input.to_string_lossy().to_string(),
        "-filter_complex".to_string(),
        scale_filter_graph(&job.ladder),
    ];

    for (index, rendition) in job.ladder.iter().enumerate() {
        args.extend([
            "-map".to_string(),
            format!("[{}]", stream_label(index)),
            // '?' makes the audio map optional; sources without an audio
            // track still produce video-only renditions.
            "-map".to_string(),
            "0:a?".to_string(),
        ]);

        args.extend([
            "-c:v".to_string(),
            "libx264".to_string(),
            "-b:v".to_string(),
            format!("{}k", rendition.video_bitrate_kbps),
            "-preset".to_string(),
            job.video_preset.clone(),
        ]);

        args.extend([
            "-c:a".to_string(),
            "aac".to_string(),
            "-b:a".to_string(),
            format!("{}k", job.audio_bitrate_kbps),
        ]);

        // Segmented VOD output: every segment retained (-hls_list_size 0).
        args.extend([
            "-f".to_string(),
            "hls".to_string(),
            "-hls_time".to_string(),
            job.segment_duration_secs.to_string(),
            "-hls_list_size".to_string(),
            "0".to_string(),
            "-hls_segment_filename".to_string(),
            job.segment_template_path(rendition).to_string_lossy().to_string(),
        ]);

        args.push(job.rendition_playlist_path(rendition).to_string_lossy().to_string());
    }

    Ok(args)
}

/// Run the ladder transcode to completion.
pub async fn run_transcode(
    tools: &ToolRegistry,
    job: &TranscodeJob,
    cancel: Option<CancellationToken>,
) -> Result<()> {
    let ffmpeg = tools.require("ffmpeg")?;
    let args = build_transcode_args(job)?;

    tracing::info!(
        "transcoding {} into {} rendition(s) under {}",
        job.input.display(),
        job.ladder.len(),
        job.output_dir.display()
    );

    let mut cmd = EngineCommand::new(ffmpeg.path.clone());
    cmd.timeout(TRANSCODE_TIMEOUT);
    cmd.args(args);
    cmd.run(cancel).await
}
