//! Transcode job description and deterministic artifact naming.
//!
//! Every artifact a job writes is scoped by the rendition label and the job's
//! `base_name` (the input filename without extension), so multiple sources can
//! share one output directory without collision. Filenames are recomputed from
//! the job rather than tracked -- the filesystem is the source of truth.

use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::ladder::{Rendition, RenditionLadder, DEFAULT_AUDIO_BITRATE_KBPS};

/// Fixed segment duration unless overridden (seconds).
pub const DEFAULT_SEGMENT_DURATION_SECS: u32 = 5;

/// Default x264 preset for the encode.
pub const DEFAULT_VIDEO_PRESET: &str = "veryfast";

/// A single packaging run: one source file, one output directory, one ladder.
///
/// Owned exclusively by the pipeline run and discarded afterwards.
#[derive(Debug, Clone)]
pub struct TranscodeJob {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub base_name: String,
    pub audio_bitrate_kbps: u32,
    pub segment_duration_secs: u32,
    pub video_preset: String,
    pub ladder: RenditionLadder,
}

impl TranscodeJob {
    /// Create a job for `input`, writing into `output_dir`.
    ///
    /// The base name is derived from the input filename; inputs with no
    /// derivable stem (e.g. a bare `..`) are rejected.
    pub fn new(
        input: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        ladder: RenditionLadder,
    ) -> Result<Self> {
        let input = input.into();
        let base_name = input
            .file_stem()
            .and_then(|stem| stem.to_str())
            .map(str::to_owned)
            .ok_or_else(|| {
                Error::InvalidJob(format!(
                    "cannot derive base name from input path {}",
                    input.display()
                ))
            })?;

        Ok(Self {
            input,
            output_dir: output_dir.into(),
            base_name,
            audio_bitrate_kbps: DEFAULT_AUDIO_BITRATE_KBPS,
            segment_duration_secs: DEFAULT_SEGMENT_DURATION_SECS,
            video_preset: DEFAULT_VIDEO_PRESET.to_string(),
            ladder,
        })
    }

    pub fn with_audio_bitrate_kbps(mut self, kbps: u32) -> Self {
        self.audio_bitrate_kbps = kbps;
        self
    }

    pub fn with_segment_duration_secs(mut self, secs: u32) -> Self {
        self.segment_duration_secs = secs;
        self
    }

    pub fn with_video_preset(mut self, preset: impl Into<String>) -> Self {
        self.video_preset = preset.into();
        self
    }

    /// Filename of a rendition's media playlist: `{label}-{base}.m3u8`.
    pub fn rendition_playlist_name(&self, rendition: &Rendition) -> String {
        format!("{}-{}.m3u8", rendition.label, self.base_name)
    }

    pub fn rendition_playlist_path(&self, rendition: &Rendition) -> PathBuf {
        self.output_dir.join(self.rendition_playlist_name(rendition))
    }

    /// Prefix shared by every segment of a rendition: `{label}-{base}_`.
    pub fn segment_prefix(&self, rendition: &Rendition) -> String {
        format!("{}-{}_", rendition.label, self.base_name)
    }

    /// Engine-side segment filename template: `{label}-{base}_%03d.ts`.
    pub fn segment_template(&self, rendition: &Rendition) -> String {
        format!("{}%03d.ts", self.segment_prefix(rendition))
    }

    pub fn segment_template_path(&self, rendition: &Rendition) -> PathBuf {
        self.output_dir.join(self.segment_template(rendition))
    }

    /// Filename of the master playlist: `master_{base}.m3u8`.
    pub fn master_playlist_name(&self) -> String {
        format!("master_{}.m3u8", self.base_name)
    }

    pub fn master_playlist_path(&self) -> PathBuf {
        self.output_dir.join(self.master_playlist_name())
    }

    /// Whether `file_name` is an artifact this job would produce.
    ///
    /// Playlists and the master manifest match by exact derived name; segment
    /// files match their rendition's prefix followed by a numeric sequence and
    /// the `.ts` extension. Deriving the set from the job (rather than
    /// pattern-scanning the directory) keeps cleanup from ever touching a
    /// different job's artifacts, including base names that prefix each other
    /// (`clip` vs `clip_a`).
    pub fn owns_artifact(&self, file_name: &str) -> bool {
        if file_name == self.master_playlist_name() {
            return true;
        }
        self.ladder.iter().any(|rendition| {
            file_name == self.rendition_playlist_name(rendition)
                || is_segment_of(&self.segment_prefix(rendition), file_name)
        })
    }
}

fn is_segment_of(prefix: &str, file_name: &str) -> bool {
    file_name
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_suffix(".ts"))
        .is_some_and(|seq| !seq.is_empty() && seq.bytes().all(|b| b.is_ascii_digit()))
}
