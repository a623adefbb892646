//! **gwkit** - a reusable Rust library for the Gamewave console's asset formats.
//!
//! # Supported formats
//! | Module | Format |
//! |--------|--------|
//! | [`formats::cheese`] | cheese - directory of named files embedded in console binaries |
//! | [`formats::zbc`]    | ZBC - packed bytecode container |
//! | [`formats::zbm`]    | ZBM - bit-packed 3-3-6-4 YCbCr+alpha texture |
//! | [`formats::zwf`]    | ZWF - 16-bit PCM audio at 22050 Hz |
//!
//! Decoded results land in the raw buffer types of [`buffer`]; writing
//! them out as PNG/JPEG/WAV (and walking directory trees to find inputs)
//! is left to the caller. [`registry`] offers an explicit codec table for
//! callers that dispatch on format identifiers or file extensions.

pub mod buffer;
pub mod compression;
pub mod error;
pub mod formats;
pub mod registry;
pub mod utils;

pub use error::{Error, Result};
