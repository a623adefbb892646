//! ZBM - bit-packed texture format.
//!
//! Textures store one 16-bit word per pixel, in a 3-3-6-4 YCbCr+alpha
//! packing, behind a 48-byte header and a zlib stream. The color
//! conversion is lossy in both directions: luma keeps 6 of 8 bits,
//! each chroma channel 3, alpha 4.
//!
//! ## Layout
//! ```text
//! [0x00] Header        (12 × u32 LE, 48 bytes)
//! [0x30] zlib stream   (remainder of the file)
//! ```
//!
//! ## Header (each field u32 LE)
//! ```text
//! [0x00] Opaque                  (4 fields; the console's packer writes 1, 1, 4, 2)
//! [0x10] Width                   (pixels, nonzero)
//! [0x14] Height                  (pixels, nonzero)
//! [0x18] Opaque                  (3 fields; the packer writes 0, 0, 1)
//! [0x24] PackedSize              (compressed payload bytes)
//! [0x28] UnpackedSize            (decompressed bytes, == Width×Height×2)
//! [0x2C] Opaque                  (the packer writes 0)
//! ```
//!
//! ## Pixel word
//! ```text
//! bit 15..12  alpha   (4 bits, ×17 to 8-bit)
//! bit 11..6   luma    (6 bits, ×4 to 8-bit)
//! bit  5..3   chromaB (3 bits, ×32 to 8-bit)
//! bit  2..0   chromaR (3 bits, ×32 to 8-bit)
//! ```
//!
//! Words are big-endian on the wire and stored in transposed pairs: the
//! word at even index `i` holds pixel `i+1` and vice versa. A trailing
//! unpaired word (odd pixel count) is stored in place.

use std::io::{Read, Write};

use log::debug;

use crate::buffer::ImageBuffer;
use crate::compression::zlib;
use crate::utils::{le_u32, write_be_u16, write_le_u32};
use crate::{Error, Result};

/// Values the console's own packer writes into the opaque header fields.
/// Their semantics are unknown; they are emitted as-is for compatibility.
const OPAQUE_HEAD: [u32; 4] = [1, 1, 4, 2];
const OPAQUE_MID: [u32; 3] = [0, 0, 1];
const OPAQUE_TAIL: u32 = 0;

/// Parsed 48-byte texture header.
///
/// A plain value: built by [`ZbmHeader::parse`], never written afterwards.
/// The opaque fields are retained exactly as read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZbmHeader {
    /// Four leading fields with unknown semantics.
    pub opaque_head: [u32; 4],
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Three fields with unknown semantics.
    pub opaque_mid: [u32; 3],
    /// Compressed payload length in bytes.
    pub packed_size: u32,
    /// Decompressed payload length in bytes.
    pub unpacked_size: u32,
    /// Trailing field with unknown semantics.
    pub opaque_tail: u32,
}

impl ZbmHeader {
    /// Parse the header from `r`, leaving the stream positioned at the
    /// start of the compressed payload.
    ///
    /// Zero dimensions are rejected with [`Error::UnsupportedSize`]
    /// before any payload work happens, so callers can probe a texture's
    /// geometry without decoding it.
    pub fn parse<R: Read>(r: &mut R) -> Result<Self> {
        let opaque_head = [le_u32(r)?, le_u32(r)?, le_u32(r)?, le_u32(r)?];
        let width = le_u32(r)?;
        let height = le_u32(r)?;
        let opaque_mid = [le_u32(r)?, le_u32(r)?, le_u32(r)?];
        let packed_size = le_u32(r)?;
        let unpacked_size = le_u32(r)?;
        let opaque_tail = le_u32(r)?;

        if width == 0 || height == 0 {
            return Err(Error::UnsupportedSize { width, height });
        }

        Ok(Self {
            opaque_head,
            width,
            height,
            opaque_mid,
            packed_size,
            unpacked_size,
            opaque_tail,
        })
    }
}

/// Decode a texture into an RGBA8 image.
///
/// Inflates the payload, validates its length against both the header's
/// `unpacked_size` and `width × height × 2`, un-transposes the word
/// pairs, and converts every pixel out of the packed YCbCr encoding.
pub fn decode<R: Read>(r: &mut R) -> Result<ImageBuffer> {
    let header = ZbmHeader::parse(r)?;
    debug!("decoding {}x{} texture", header.width, header.height);

    let payload = zlib::inflate(r)?;
    if payload.len() != header.unpacked_size as usize {
        return Err(Error::SizeMismatch {
            got: payload.len(),
            expected: header.unpacked_size as usize,
        });
    }
    let pixel_count = header.width as usize * header.height as usize;
    if payload.len() != pixel_count * 2 {
        return Err(Error::SizeMismatch {
            got: payload.len(),
            expected: pixel_count * 2,
        });
    }

    let mut words: Vec<u16> = payload
        .chunks_exact(2)
        .map(|c| u16::from_be_bytes([c[0], c[1]]))
        .collect();
    untranspose(&mut words);

    let mut pixels = Vec::with_capacity(pixel_count * 4);
    for &word in &words {
        pixels.extend_from_slice(&unpack_pixel(word));
    }
    ImageBuffer::new(header.width, header.height, pixels)
}

/// Encode an RGBA8 image as a texture.
///
/// Quantizes every pixel into the packed YCbCr encoding (lossy),
/// re-transposes the word pairs, compresses at the maximum level, and
/// writes the header with the packer's fixed opaque values.
pub fn encode<W: Write>(w: &mut W, image: &ImageBuffer) -> Result<()> {
    if image.width == 0 || image.height == 0 {
        return Err(Error::UnsupportedSize {
            width: image.width,
            height: image.height,
        });
    }
    let pixel_count = image.width as usize * image.height as usize;
    if image.pixels.len() != pixel_count * 4 {
        return Err(Error::Parse("pixel buffer length does not match dimensions"));
    }

    let mut words: Vec<u16> = image
        .pixels
        .chunks_exact(4)
        .map(|p| pack_pixel([p[0], p[1], p[2], p[3]]))
        .collect();
    untranspose(&mut words);

    let mut raw = Vec::with_capacity(words.len() * 2);
    for &word in &words {
        write_be_u16(&mut raw, word)?;
    }
    let packed = zlib::deflate(&raw)?;

    for value in OPAQUE_HEAD {
        write_le_u32(w, value)?;
    }
    write_le_u32(w, image.width)?;
    write_le_u32(w, image.height)?;
    for value in OPAQUE_MID {
        write_le_u32(w, value)?;
    }
    write_le_u32(w, packed.len() as u32)?;
    write_le_u32(w, raw.len() as u32)?;
    write_le_u32(w, OPAQUE_TAIL)?;

    w.write_all(&packed)?;
    Ok(())
}

/// Swap each complete word pair in place.
///
/// The transposition is its own inverse, so the same walk serves both
/// decode and encode. A trailing unpaired word stays where it is.
fn untranspose(words: &mut [u16]) {
    for pair in words.chunks_exact_mut(2) {
        pair.swap(0, 1);
    }
}

/// Expand one packed word to an RGBA quad.
fn unpack_pixel(word: u16) -> [u8; 4] {
    let cr = i32::from(word & 0x7) << 5;
    let cb = i32::from((word >> 3) & 0x7) << 5;
    let y = i32::from((word >> 6) & 0x3F) << 2;
    let a = ((word >> 12) & 0xF) * 17;

    let cb1 = cb - 128;
    let cr1 = cr - 128;
    let r = clamp8(y + 45 * cr1 / 32);
    let g = clamp8(y - (11 * cb1 + 23 * cr1) / 32);
    let b = clamp8(y + 113 * cb1 / 64);
    [r, g, b, a as u8]
}

/// Quantize one RGBA quad to a packed word (lossy).
fn pack_pixel([r, g, b, a]: [u8; 4]) -> u16 {
    let (y, cb, cr) = rgb_to_ycbcr(r, g, b);
    let y6 = (u32::from(y) * 63 + 127) / 255;
    let cb3 = (u32::from(cb) * 7 + 127) / 255;
    let cr3 = (u32::from(cr) * 7 + 127) / 255;
    let a4 = (u32::from(a) * 15 + 127) / 255;
    (a4 << 12 | y6 << 6 | cb3 << 3 | cr3) as u16
}

/// Full-range BT.601 RGB → YCbCr, 16.16 fixed point.
fn rgb_to_ycbcr(r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    let r = i32::from(r);
    let g = i32::from(g);
    let b = i32::from(b);
    let y = (19595 * r + 38470 * g + 7471 * b + (1 << 15)) >> 16;
    let cb = ((-11056 * r - 21712 * g + 32768 * b + (1 << 15)) >> 16) + 128;
    let cr = ((32768 * r - 27440 * g - 5328 * b + (1 << 15)) >> 16) + 128;
    (y as u8, clamp8(cb), clamp8(cr))
}

fn clamp8(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn header_bytes(width: u32, height: u32, packed: u32, unpacked: u32) -> Vec<u8> {
        let fields = [1, 1, 4, 2, width, height, 0, 0, 1, packed, unpacked, 0];
        fields.iter().flat_map(|f| f.to_le_bytes()).collect()
    }

    /// A texture file whose payload is the given words, pair-transposed
    /// the way the console stores them.
    fn texture_bytes(width: u32, height: u32, words: &[u16]) -> Vec<u8> {
        let mut wire = words.to_vec();
        untranspose(&mut wire);
        let raw: Vec<u8> = wire.iter().flat_map(|w| w.to_be_bytes()).collect();
        let packed = zlib::deflate(&raw).unwrap();
        let mut file = header_bytes(width, height, packed.len() as u32, raw.len() as u32);
        file.extend_from_slice(&packed);
        file
    }

    #[test]
    fn header_round_trips_opaque_fields() {
        let fields: [u32; 12] = [9, 8, 7, 6, 2, 2, 5, 4, 3, 100, 8, 77];
        let bytes: Vec<u8> = fields.iter().flat_map(|f| f.to_le_bytes()).collect();
        let header = ZbmHeader::parse(&mut Cursor::new(bytes)).unwrap();
        assert_eq!(header.opaque_head, [9, 8, 7, 6]);
        assert_eq!((header.width, header.height), (2, 2));
        assert_eq!(header.opaque_mid, [5, 4, 3]);
        assert_eq!((header.packed_size, header.unpacked_size), (100, 8));
        assert_eq!(header.opaque_tail, 77);
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        for (w, h) in [(0, 4), (4, 0), (0, 0)] {
            let bytes = header_bytes(w, h, 10, 10);
            assert!(matches!(
                ZbmHeader::parse(&mut Cursor::new(bytes)),
                Err(Error::UnsupportedSize { .. })
            ));
        }
    }

    #[test]
    fn payload_length_must_match_the_header() {
        // Header promises 8 bytes, payload inflates to 6.
        let raw = [0u8; 6];
        let packed = zlib::deflate(&raw).unwrap();
        let mut file = header_bytes(2, 2, packed.len() as u32, 8);
        file.extend_from_slice(&packed);
        match decode(&mut Cursor::new(file)) {
            Err(Error::SizeMismatch { got, expected }) => {
                assert_eq!((got, expected), (6, 8));
            }
            other => panic!("expected size mismatch, got {other:?}"),
        }
    }

    #[test]
    fn payload_length_must_match_the_dimensions() {
        // Internally consistent header, but 3 words for a 2x2 texture.
        let raw = [0u8; 6];
        let packed = zlib::deflate(&raw).unwrap();
        let mut file = header_bytes(2, 2, packed.len() as u32, 6);
        file.extend_from_slice(&packed);
        match decode(&mut Cursor::new(file)) {
            Err(Error::SizeMismatch { got, expected }) => {
                assert_eq!((got, expected), (6, 8));
            }
            other => panic!("expected size mismatch, got {other:?}"),
        }
    }

    #[test]
    fn unpack_pixel_reference_values() {
        // Neutral chroma, mid luma: a plain gray.
        assert_eq!(unpack_pixel(0xF824), [128, 128, 128, 255]);
        // Saturated blue corner: cb=7, cr=0 at mid luma.
        assert_eq!(unpack_pixel(0xF838), [0, 187, 255, 255]);
        // Transparent black.
        assert_eq!(unpack_pixel(0x0024), [0, 0, 0, 0]);
    }

    #[test]
    fn pack_pixel_inverts_representable_values() {
        // Words whose luma/chroma/alpha land exactly on quantizer steps
        // survive a decode → encode cycle unchanged.
        for word in [0xF824u16, 0xF024, 0x5424, 0xF814] {
            assert_eq!(pack_pixel(unpack_pixel(word)), word, "word {word:#06x}");
        }
    }

    #[test]
    fn words_are_stored_in_transposed_pairs() {
        let gray = 0xF824u16; // [128,128,128,255]
        let black = 0xF024u16; // [0,0,0,255]
        let file = texture_bytes(2, 1, &[gray, black]);

        // On the wire the pair is swapped...
        let payload = zlib::inflate(&file[48..]).unwrap();
        assert_eq!(payload, [0xF0, 0x24, 0xF8, 0x24]);

        // ...and decode restores pixel order.
        let img = decode(&mut Cursor::new(file)).unwrap();
        assert_eq!(img.rgba(0, 0), [128, 128, 128, 255]);
        assert_eq!(img.rgba(1, 0), [0, 0, 0, 255]);
    }

    #[test]
    fn trailing_unpaired_word_passes_through() {
        let words = [0xF824u16, 0xF024, 0x5424];
        let img = decode(&mut Cursor::new(texture_bytes(3, 1, &words))).unwrap();
        assert_eq!(img.rgba(2, 0), unpack_pixel(0x5424));
    }

    #[test]
    fn encode_writes_the_packer_header() {
        let img = ImageBuffer::new(2, 1, vec![128, 128, 128, 255, 0, 0, 0, 255]).unwrap();
        let mut out = Vec::new();
        encode(&mut out, &img).unwrap();

        let header = ZbmHeader::parse(&mut Cursor::new(&out)).unwrap();
        assert_eq!(header.opaque_head, [1, 1, 4, 2]);
        assert_eq!((header.width, header.height), (2, 1));
        assert_eq!(header.opaque_mid, [0, 0, 1]);
        assert_eq!(header.unpacked_size, 4);
        assert_eq!(header.packed_size as usize, out.len() - 48);
        assert_eq!(header.opaque_tail, 0);
    }

    #[test]
    fn decode_encode_decode_is_stable_once_quantized() {
        // 16x1 texture of neutral-chroma grays; every word is exactly
        // representable, so one decode/encode cycle must be the identity.
        let words: Vec<u16> = (0..16u16).map(|i| 0xF000 | (i * 2) << 6 | 4 << 3 | 4).collect();
        let file = texture_bytes(16, 1, &words);

        let first = decode(&mut Cursor::new(&file)).unwrap();
        let mut reencoded = Vec::new();
        encode(&mut reencoded, &first).unwrap();
        let second = decode(&mut Cursor::new(&reencoded)).unwrap();

        assert_eq!(first, second);
        // The re-encoded payload carries the identical word values.
        let payload = zlib::inflate(&reencoded[48..]).unwrap();
        let mut wire = words.clone();
        untranspose(&mut wire);
        let expected: Vec<u8> = wire.iter().flat_map(|w| w.to_be_bytes()).collect();
        assert_eq!(payload, expected);
    }
}
