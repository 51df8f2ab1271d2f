//! FFprobe-based media probing.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use super::{SourceInfo, VideoStream};
use crate::command::EngineCommand;
use crate::error::{Error, Result};
use crate::tools::ToolRegistry;

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    format: FfprobeFormat,
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    format_name: String,
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    codec_type: String,
    codec_name: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
}

/// Probe a source file with ffprobe.
pub async fn probe_source(tools: &ToolRegistry, path: &Path) -> Result<SourceInfo> {
    let ffprobe = tools.require("ffprobe")?;

    let mut cmd = EngineCommand::new(ffprobe.path.clone());
    cmd.timeout(Duration::from_secs(60));
    cmd.args([
        "-v",
        "quiet",
        "-print_format",
        "json",
        "-show_format",
        "-show_streams",
    ]);
    cmd.arg(path.to_string_lossy());

    let output = cmd.capture().await?;
    if !output.status.success() {
        return Err(Error::Probe(format!(
            "ffprobe failed on {}: {}",
            path.display(),
            output.stderr.trim()
        )));
    }

    let parsed: FfprobeOutput = serde_json::from_str(&output.stdout)?;
    Ok(to_source_info(parsed))
}

fn to_source_info(output: FfprobeOutput) -> SourceInfo {
    let duration_secs = output
        .format
        .duration
        .and_then(|s| s.parse::<f64>().ok());

    let video = output
        .streams
        .iter()
        .find(|stream| stream.codec_type == "video")
        .map(|stream| VideoStream {
            codec: stream.codec_name.clone().unwrap_or_default(),
            width: stream.width.unwrap_or(0),
            height: stream.height.unwrap_or(0),
        });

    let has_audio = output
        .streams
        .iter()
        .any(|stream| stream.codec_type == "audio");

    SourceInfo {
        container: output.format.format_name,
        duration_secs,
        video,
        has_audio,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> SourceInfo {
        to_source_info(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn parses_video_and_audio_streams() {
        let info = parse(
            r#"{
                "format": {"format_name": "mov,mp4,m4a", "duration": "12.500000"},
                "streams": [
                    {"codec_type": "video", "codec_name": "h264", "width": 1920, "height": 1080},
                    {"codec_type": "audio", "codec_name": "aac"}
                ]
            }"#,
        );
        assert_eq!(info.container, "mov,mp4,m4a");
        assert_eq!(info.duration_secs, Some(12.5));
        let video = info.video.unwrap();
        assert_eq!((video.width, video.height), (1920, 1080));
        assert!(info.has_audio);
    }

    #[test]
    fn detects_missing_audio() {
        let info = parse(
            r#"{
                "format": {"format_name": "mov,mp4,m4a"},
                "streams": [
                    {"codec_type": "video", "codec_name": "h264", "width": 640, "height": 360}
                ]
            }"#,
        );
        assert!(!info.has_audio);
        assert!(info.duration_secs.is_none());
    }

    #[test]
    fn tolerates_streamless_output() {
        let info = parse(r#"{"format": {"format_name": "mp3"}}"#);
        assert!(info.video.is_none());
        assert!(!info.has_audio);
    }
}
