//! The rendition ladder: the ordered set of quality variants a package offers.

use serde::{Deserialize, Serialize};

/// Audio bitrate shared by every rendition unless overridden (kbps).
pub const DEFAULT_AUDIO_BITRATE_KBPS: u32 = 128;

/// One quality/bitrate variant of the source video.
///
/// `label` conventionally names the height ("720p" for height 720) and is
/// embedded in every artifact filename the rendition produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rendition {
    pub label: String,
    pub width: u32,
    pub height: u32,
    pub video_bitrate_kbps: u32,
}

impl Rendition {
    pub fn new(label: impl Into<String>, width: u32, height: u32, video_bitrate_kbps: u32) -> Self {
        Self {
            label: label.into(),
            width,
            height,
            video_bitrate_kbps,
        }
    }

    /// Target resolution as advertised in the master playlist (`WxH`).
    pub fn resolution(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }

    /// Advertised peak bandwidth in bits/sec: video plus the shared audio
    /// bitrate. For audio-less sources this slightly overstates -- an accepted
    /// approximation, not a defect.
    pub fn bandwidth_bits(&self, audio_bitrate_kbps: u32) -> u64 {
        (u64::from(self.video_bitrate_kbps) + u64::from(audio_bitrate_kbps)) * 1000
    }
}

/// Immutable, ordered list of target renditions (ascending quality).
///
/// Ships with a four-tier default mirroring common ABR practice; callers may
/// supply their own via configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenditionLadder {
    renditions: Vec<Rendition>,
}

impl RenditionLadder {
    pub fn new(renditions: Vec<Rendition>) -> Self {
        Self { renditions }
    }

    pub fn renditions(&self) -> &[Rendition] {
        &self.renditions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rendition> {
        self.renditions.iter()
    }

    pub fn len(&self) -> usize {
        self.renditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renditions.is_empty()
    }

    /// Whether video bitrates strictly increase in ladder order.
    ///
    /// A correct ladder satisfies this, but it is advisory: `validate`
    /// surfaces a warning rather than rejecting the configuration.
    pub fn is_monotonic(&self) -> bool {
        self.renditions
            .windows(2)
            .all(|pair| pair[0].video_bitrate_kbps < pair[1].video_bitrate_kbps)
    }
}

impl Default for RenditionLadder {
    fn default() -> Self {
        Self::new(vec![
            Rendition::new("360p", 640, 360, 800),
            Rendition::new("480p", 854, 480, 1400),
            Rendition::new("720p", 1280, 720, 2800),
            Rendition::new("1080p", 1920, 1080, 5000),
        ])
    }
}

impl<'a> IntoIterator for &'a RenditionLadder {
    type Item = &'a Rendition;
    type IntoIter = std::slice::Iter<'a, Rendition>;

    fn into_iter(self) -> Self::IntoIter {
        self.renditions.iter()
    }
}
