//! hlspack application library.
//!
//! The packaging pipeline itself lives in [`hlspack_av`]; this crate adds the
//! configuration layer and the CLI binary.

pub mod config;
