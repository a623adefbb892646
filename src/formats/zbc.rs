//! ZBC - packed bytecode container.
//!
//! The console's script bytecode ships either bare or "packed": a fixed
//! 16-byte signature followed by one zlib stream holding the bare file.
//! The payload is opaque to this codec - unpacking returns the raw bytes
//! verbatim, with no further interpretation.
//!
//! ## Layout
//! ```text
//! [0x00] Packed signature   (16 bytes, compared byte-for-byte)
//! [0x10] zlib stream        (remainder of the file)
//! ```

use std::io::{Read, Seek, SeekFrom};

use crate::compression::zlib;
use crate::utils::bytesa;
use crate::{Error, Result};

/// The 16-byte signature marking a packed bytecode file.
pub const PACKED_SIGNATURE: [u8; 16] = [
    0x02, 0xBC, 0x90, 0x7C, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// Whether the stream begins with [`PACKED_SIGNATURE`].
///
/// Reads the first 16 bytes and restores the stream position afterwards.
/// Fails only on read/seek failure; a mismatched signature is `false`,
/// not an error.
pub fn is_packed<R: Read + Seek>(r: &mut R) -> Result<bool> {
    let saved = r.stream_position()?;
    r.seek(SeekFrom::Start(0))?;
    let header = bytesa::<16>(r)?;
    r.seek(SeekFrom::Start(saved))?;
    Ok(header == PACKED_SIGNATURE)
}

/// Unpack a packed bytecode file, returning the raw uncompressed bytes.
///
/// Returns [`Error::NotPacked`] when the signature is absent; callers
/// that treat bare files as already unpacked should probe with
/// [`is_packed`] first.
pub fn unpack<R: Read + Seek>(r: &mut R) -> Result<Vec<u8>> {
    if !is_packed(r)? {
        return Err(Error::NotPacked);
    }
    r.seek(SeekFrom::Start(0x10))?;
    zlib::inflate(r)
}
