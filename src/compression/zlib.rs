//! zlib stream compression, the framing shared by all Gamewave formats.
//!
//! Payloads are complete zlib streams (RFC 1950: 2-byte header, deflate
//! body, Adler-32 trailer). Decompression always runs to the end-of-stream
//! marker; the formats record the expected decompressed length in their
//! headers and validate it themselves after inflation.

use std::io::{Read, Write};

use flate2::Compression;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;

use crate::{Error, Result};

/// Decompress a complete zlib stream from `r`.
///
/// Reads until the end-of-stream marker and verifies the Adler-32
/// checksum. Returns [`Error::Zlib`] if the data is not zlib-framed or is
/// truncated.
pub fn inflate<R: Read>(r: R) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    ZlibDecoder::new(r)
        .read_to_end(&mut out)
        .map_err(|_| Error::Zlib)?;
    Ok(out)
}

/// Compress `data` into a complete zlib stream at the maximum level.
///
/// Output is deterministic for identical input.
pub fn deflate(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(data)?;
    encoder.finish().map_err(Into::into)
}
