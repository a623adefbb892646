//! Compression and decompression helpers.
//!
//! Every Gamewave asset format wraps its payload in a single zlib stream,
//! so unlike multi-algorithm libraries there is exactly one submodule and
//! it is always compiled in - the codecs in [`crate::formats`] cannot
//! function without it.
//!
//! ## Choosing the right function
//!
//! * **Whole-buffer payloads** (textures, audio, bytecode) - the payload
//!   runs from a known offset to the end of the file; hand the positioned
//!   reader to [`zlib::inflate`].
//! * **Producing payloads** - [`zlib::deflate`] compresses at the maximum
//!   level, matching the compression settings of the console's own
//!   tooling, and is deterministic for identical input.

pub mod zlib;
