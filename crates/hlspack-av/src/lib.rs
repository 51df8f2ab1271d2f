//! # hlspack-av
//!
//! Rendition-ladder HLS packaging, driving ffmpeg as an opaque subprocess.
//!
//! This crate provides:
//!
//! - **The rendition ladder** ([`RenditionLadder`]) -- the ordered quality
//!   variants a package offers, with a configurable four-tier default.
//! - **Filter-graph construction** ([`filter`]) -- one scaled stream per
//!   rendition from a single decode, aspect-preserving, even dimensions.
//! - **Job description** ([`TranscodeJob`]) -- deterministic, base-name-scoped
//!   artifact naming for segments and playlists.
//! - **Tool discovery** ([`ToolRegistry`]) -- find and cache paths to ffmpeg
//!   and ffprobe.
//! - **Command execution** ([`EngineCommand`]) -- async subprocess builder
//!   with timeout, cancellation, and typed exit-status mapping.
//! - **Workspace management** ([`OutputWorkspace`]) -- output directory
//!   creation and stale-artifact reclamation for idempotent re-runs.
//! - **Master playlist generation** ([`playlist`]) -- the top-level manifest
//!   players load for adaptive switching.
//! - **The pipeline** ([`package`]) -- cleanup, single-pass transcode, and
//!   manifest publication as one fail-fast sequence.
//!
//! ## Example
//!
//! ```no_run
//! use hlspack_av::{package, RenditionLadder, ToolRegistry, TranscodeJob};
//!
//! # async fn example() -> hlspack_av::Result<()> {
//! let tools = ToolRegistry::discover(&Default::default());
//! let job = TranscodeJob::new("in/clip.mp4", "out/", RenditionLadder::default())?;
//! let master = package(&tools, &job, None).await?;
//! println!("{}", master.display());
//! # Ok(())
//! # }
//! ```

mod error;

pub mod actions;
pub mod command;
pub mod filter;
pub mod job;
pub mod ladder;
pub mod package;
pub mod playlist;
pub mod probe;
pub mod tools;
pub mod workspace;

// ---- Re-exports for convenience ----

pub use actions::{build_transcode_args, run_transcode};
pub use command::{EngineCommand, EngineOutput};
pub use error::{Error, Result};
pub use job::{TranscodeJob, DEFAULT_SEGMENT_DURATION_SECS, DEFAULT_VIDEO_PRESET};
pub use ladder::{Rendition, RenditionLadder, DEFAULT_AUDIO_BITRATE_KBPS};
pub use package::package;
pub use playlist::{master_playlist, write_master_playlist};
pub use probe::{probe_source, SourceInfo, VideoStream};
pub use tools::{ToolInfo, ToolOverrides, ToolRegistry};
pub use workspace::OutputWorkspace;
