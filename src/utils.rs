//! Low-level I/O primitives shared by all codecs.
//!
//! Each function reads or writes exactly the bytes it promises or returns
//! an error - there is no partial-transfer ambiguity.

use std::io::{Read, Seek, SeekFrom, Write};

use crate::Result;

/// Read a little-endian `u32`.
#[inline]
pub(crate) fn le_u32<R: Read>(r: &mut R) -> Result<u32> {
    let mut b = [0u8; 4];
    r.read_exact(&mut b)?;
    Ok(u32::from_le_bytes(b))
}

/// Read a big-endian `u32`.
#[inline]
pub(crate) fn be_u32<R: Read>(r: &mut R) -> Result<u32> {
    let mut b = [0u8; 4];
    r.read_exact(&mut b)?;
    Ok(u32::from_be_bytes(b))
}

/// Seek to `offset` and read a little-endian `u32`.
#[inline]
pub(crate) fn le_u32_at<R: Read + Seek>(r: &mut R, offset: u64) -> Result<u32> {
    r.seek(SeekFrom::Start(offset))?;
    le_u32(r)
}

/// Seek to `offset` and read a big-endian `u32`.
#[inline]
pub(crate) fn be_u32_at<R: Read + Seek>(r: &mut R, offset: u64) -> Result<u32> {
    r.seek(SeekFrom::Start(offset))?;
    be_u32(r)
}

/// Write a little-endian `u32` at the current position.
#[inline]
pub(crate) fn write_le_u32<W: Write>(w: &mut W, value: u32) -> Result<()> {
    w.write_all(&value.to_le_bytes())?;
    Ok(())
}

/// Write a big-endian `u16` at the current position.
#[inline]
pub(crate) fn write_be_u16<W: Write>(w: &mut W, value: u16) -> Result<()> {
    w.write_all(&value.to_be_bytes())?;
    Ok(())
}

/// Read exactly `N` bytes into a fixed-size array.
#[inline]
pub(crate) fn bytesa<const N: usize>(r: &mut impl Read) -> Result<[u8; N]> {
    let mut b = [0u8; N];
    r.read_exact(&mut b)?;
    Ok(b)
}

/// Read exactly `len` bytes into a `Vec`.
#[inline]
pub(crate) fn bytesv<R: Read>(r: &mut R, len: usize) -> Result<Vec<u8>> {
    let mut b = vec![0u8; len];
    r.read_exact(&mut b)?;
    Ok(b)
}

/// Read `len` bytes at an absolute `offset`, then restore the stream to
/// where it was before the call.
///
/// The restore seek runs even when the body read fails, so a caller in
/// the middle of a sequential table walk can propagate the error without
/// losing its cursor.
pub(crate) fn read_region<R: Read + Seek>(r: &mut R, offset: u64, len: usize) -> Result<Vec<u8>> {
    let saved = r.stream_position()?;
    let body = r
        .seek(SeekFrom::Start(offset))
        .map_err(Into::into)
        .and_then(|_| bytesv(r, len));
    r.seek(SeekFrom::Start(saved))?;
    body
}

/// Decode a fixed-width name field: UTF-8 up to the first null byte, or
/// the whole field when no null is present.
#[inline]
pub(crate) fn padded_string(field: &[u8]) -> String {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..end]).into_owned()
}
