//! Codecs for the Gamewave console's asset formats.
//!
//! Each submodule targets one format. All codecs follow the same
//! conventions:
//!
//! * **Generic over** [`std::io::Read`] (plus [`std::io::Seek`] where the
//!   format needs random access) - pass a [`std::fs::File`], a
//!   [`std::io::Cursor`], a memory-mapped region, or anything else that
//!   implements the traits.
//! * **Whole-buffer transforms** - every decode call materializes the
//!   full decompressed payload in memory and returns a finished value;
//!   there is no streaming or partial decode.
//! * **Pure functions** - codecs keep no state between calls and touch
//!   nothing shared, so independent decodes are safe from any number of
//!   threads.
//! * **Compression is shared** - all four formats frame their payload as
//!   a single zlib stream and go through [`crate::compression::zlib`].
//!
//! ## Format overview
//!
//! | Module     | Format | Description |
//! |------------|--------|-------------|
//! | [`cheese`] | cheese | Directory of named files appended to console `.bin` binaries |
//! | [`zbc`]    | ZBC    | Bytecode container; fixed signature over one opaque zlib payload |
//! | [`zbm`]    | ZBM    | Texture; bit-packed 3-3-6-4 YCbCr+alpha pixels |
//! | [`zwf`]    | ZWF    | Audio; 16-bit PCM at a fixed 22050 Hz |

pub mod cheese;
pub mod zbc;
pub mod zbm;
pub mod zwf;
