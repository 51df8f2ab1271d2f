//! Packaging actions: single-pass ladder transcode.

mod transcode;

pub use transcode::{build_transcode_args, run_transcode};
