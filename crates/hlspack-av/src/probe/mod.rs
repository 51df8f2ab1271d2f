//! Source media probing via ffprobe.

mod ffprobe;

pub use ffprobe::probe_source;

use serde::Serialize;

/// What the packager needs to know about a source file.
#[derive(Debug, Clone, Serialize)]
pub struct SourceInfo {
    /// Container format name as reported by the prober.
    pub container: String,
    /// Total duration in seconds, when the container declares one.
    pub duration_secs: Option<f64>,
    /// Primary video stream, if any.
    pub video: Option<VideoStream>,
    /// Whether the source carries at least one audio track. Sources without
    /// one are common and must still package cleanly.
    pub has_audio: bool,
}

/// The primary video stream of a source.
#[derive(Debug, Clone, Serialize)]
pub struct VideoStream {
    pub codec: String,
    pub width: u32,
    pub height: u32,
}
