use serde::{Deserialize, Serialize};

use hlspack_av::{
    Rendition, RenditionLadder, ToolOverrides, DEFAULT_AUDIO_BITRATE_KBPS,
    DEFAULT_SEGMENT_DURATION_SECS, DEFAULT_VIDEO_PRESET,
};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub tools: ToolOverrides,

    #[serde(default)]
    pub packaging: PackagingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PackagingConfig {
    /// Segment duration in seconds
    #[serde(default = "default_segment_duration")]
    pub segment_duration_secs: u32,

    /// Audio bitrate shared by every rendition (kbps)
    #[serde(default = "default_audio_bitrate")]
    pub audio_bitrate_kbps: u32,

    /// x264 preset for all renditions
    #[serde(default = "default_video_preset")]
    pub video_preset: String,

    /// Rendition ladder, ascending quality
    #[serde(default = "default_renditions")]
    pub renditions: Vec<Rendition>,
}

impl PackagingConfig {
    pub fn ladder(&self) -> RenditionLadder {
        RenditionLadder::new(self.renditions.clone())
    }
}

impl Default for PackagingConfig {
    fn default() -> Self {
        Self {
            segment_duration_secs: default_segment_duration(),
            audio_bitrate_kbps: default_audio_bitrate(),
            video_preset: default_video_preset(),
            renditions: default_renditions(),
        }
    }
}

fn default_segment_duration() -> u32 {
    DEFAULT_SEGMENT_DURATION_SECS
}

fn default_audio_bitrate() -> u32 {
    DEFAULT_AUDIO_BITRATE_KBPS
}

fn default_video_preset() -> String {
    DEFAULT_VIDEO_PRESET.to_string()
}

fn default_renditions() -> Vec<Rendition> {
    RenditionLadder::default().renditions().to_vec()
}
