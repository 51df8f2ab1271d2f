//! Master playlist generation.
//!
//! The master manifest enumerates every rendition playlist, in ladder order,
//! with its advertised bandwidth and resolution so players can switch
//! deterministically. It is written only after the engine reports success --
//! a manifest referencing segments that were never produced is a correctness
//! violation, not a recoverable state.

use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::job::TranscodeJob;

/// Render the master playlist text for a job.
///
/// Depends only on the job's configuration, never on encode timing, so two
/// runs with the same config produce byte-identical output.
pub fn master_playlist(job: &TranscodeJob) -> String {
    let mut master = String::from("#EXTM3U\n#EXT-X-VERSION:3\n");
    for rendition in &job.ladder {
        master.push_str(&format!(
            "#EXT-X-STREAM-INF:BANDWIDTH={},RESOLUTION={}\n",
            rendition.bandwidth_bits(job.audio_bitrate_kbps),
            rendition.resolution()
        ));
        master.push_str(&job.rendition_playlist_name(rendition));
        master.push('\n');
    }
    master
}

/// Write the master playlist into the job's output directory.
///
/// # Errors
///
/// Returns [`Error::ManifestWrite`] if persisting fails -- fatal, since the
/// segments then exist without a usable manifest; the caller must report the
/// path so an operator can regenerate it or rerun the job.
pub fn write_master_playlist(job: &TranscodeJob) -> Result<PathBuf> {
    let path = job.master_playlist_path();
    std::fs::write(&path, master_playlist(job)).map_err(|source| Error::ManifestWrite {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ladder::RenditionLadder;

    fn job() -> TranscodeJob {
        TranscodeJob::new("/in/clip.mp4", "/out", RenditionLadder::default()).unwrap()
    }

    #[test]
    fn default_ladder_master_text() {
        let expected = "#EXTM3U\n\
                        #EXT-X-VERSION:3\n\
                        #EXT-X-STREAM-INF:BANDWIDTH=928000,RESOLUTION=640x360\n\
                        360p-clip.m3u8\n\
                        #EXT-X-STREAM-INF:BANDWIDTH=1528000,RESOLUTION=854x480\n\
                        480p-clip.m3u8\n\
                        #EXT-X-STREAM-INF:BANDWIDTH=2928000,RESOLUTION=1280x720\n\
                        720p-clip.m3u8\n\
                        #EXT-X-STREAM-INF:BANDWIDTH=5128000,RESOLUTION=1920x1080\n\
                        1080p-clip.m3u8\n";
        assert_eq!(master_playlist(&job()), expected);
    }

    #[test]
    fn rendition_order_matches_ladder_order() {
        let text = master_playlist(&job());
        let p360 = text.find("360p-clip.m3u8").unwrap();
        let p480 = text.find("480p-clip.m3u8").unwrap();
        let p720 = text.find("720p-clip.m3u8").unwrap();
        let p1080 = text.find("1080p-clip.m3u8").unwrap();
        assert!(p360 < p480 && p480 < p720 && p720 < p1080);
    }

    #[test]
    fn rendering_is_deterministic() {
        let job = job();
        assert_eq!(master_playlist(&job), master_playlist(&job));
    }

    #[test]
    fn write_places_manifest_in_output_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let job = TranscodeJob::new("/in/clip.mp4", tmp.path(), RenditionLadder::default())
            .unwrap();
        let path = write_master_playlist(&job).unwrap();
        assert_eq!(path, tmp.path().join("master_clip.m3u8"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), master_playlist(&job));
    }

    #[test]
    fn write_fails_without_output_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("does-not-exist");
        let job = TranscodeJob::new("/in/clip.mp4", missing, RenditionLadder::default()).unwrap();
        assert!(matches!(
            write_master_playlist(&job),
            Err(Error::ManifestWrite { .. })
        ));
    }
}
