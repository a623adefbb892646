//! ZWF - compressed PCM audio.
//!
//! Sound effects and music ship as raw 16-bit PCM behind a small header
//! and one zlib stream. The console plays everything as stereo at
//! 22050 Hz; the format stores no rate or channel fields, only the total
//! interleaved sample count.
//!
//! ## Layout
//! ```text
//! [0x00] Magic 02 EE 90 7C    (4 bytes; written on encode, not checked on decode)
//! [0x04] SampleCount          (u32 LE, total across channels)
//! [0x08] Constant 01 00 00 00 (4 bytes, semantics unknown)
//! [0x0C] PackedSize           (u32 LE)
//! [0x10] UnpackedSize         (u32 LE, == SampleCount × 2)
//! [0x14] zlib stream          (remainder of the file)
//! ```
//!
//! Samples inside the payload are big-endian `u16`, channel-interleaved.

use std::borrow::Cow;
use std::io::{Read, Seek, SeekFrom, Write};

use crate::buffer::AudioBuffer;
use crate::compression::zlib;
use crate::utils::{le_u32_at, write_be_u16, write_le_u32};
use crate::{Error, Result};

/// File magic, emitted on encode.
pub const MAGIC: [u8; 4] = [0x02, 0xEE, 0x90, 0x7C];

/// The console's fixed playback rate.
pub const SAMPLE_RATE: u32 = 22050;

/// Channel count of every encoded file.
pub const CHANNELS: u16 = 2;

/// Bits per sample.
pub const BIT_DEPTH: u16 = 16;

/// Constant header field at 0x08; semantics unknown, emitted as-is.
const CONSTANT_FIELD: [u8; 4] = [0x01, 0x00, 0x00, 0x00];

/// Absolute offset of the zlib payload.
const PAYLOAD_OFFSET: u64 = 0x14;

/// Decode an audio file into a stereo 22050 Hz buffer.
///
/// The decompressed payload must hold exactly `sample_count` 16-bit
/// samples; a shorter or longer payload is [`Error::SizeMismatch`],
/// never a silently truncated buffer.
pub fn decode<R: Read + Seek>(r: &mut R) -> Result<AudioBuffer> {
    let sample_count = le_u32_at(r, 4)? as usize;

    r.seek(SeekFrom::Start(PAYLOAD_OFFSET))?;
    let payload = zlib::inflate(r)?;
    if payload.len() != sample_count * 2 {
        return Err(Error::SizeMismatch {
            got: payload.len(),
            expected: sample_count * 2,
        });
    }

    let samples = payload
        .chunks_exact(2)
        .map(|c| u16::from_be_bytes([c[0], c[1]]))
        .collect();
    AudioBuffer::new(CHANNELS, SAMPLE_RATE, BIT_DEPTH, samples)
}

/// Encode an audio buffer.
///
/// The buffer must already be at the console's rate
/// ([`Error::UnsupportedSampleRate`] otherwise) and mono or stereo
/// ([`Error::UnsupportedChannels`] otherwise). Mono input is widened by
/// duplicating each sample into both channel slots; no resampling or
/// requantization happens here.
pub fn encode<W: Write>(w: &mut W, audio: &AudioBuffer) -> Result<()> {
    if audio.sample_rate != SAMPLE_RATE {
        return Err(Error::UnsupportedSampleRate(audio.sample_rate));
    }
    let samples: Cow<'_, [u16]> = match audio.channels {
        1 => Cow::Owned(audio.samples.iter().flat_map(|&s| [s, s]).collect()),
        2 => Cow::Borrowed(audio.samples.as_slice()),
        n => return Err(Error::UnsupportedChannels(n)),
    };

    let mut raw = Vec::with_capacity(samples.len() * 2);
    for &sample in samples.iter() {
        write_be_u16(&mut raw, sample)?;
    }
    let packed = zlib::deflate(&raw)?;

    w.write_all(&MAGIC)?;
    write_le_u32(w, samples.len() as u32)?;
    w.write_all(&CONSTANT_FIELD)?;
    write_le_u32(w, packed.len() as u32)?;
    write_le_u32(w, raw.len() as u32)?;
    w.write_all(&packed)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn stereo(samples: Vec<u16>) -> AudioBuffer {
        AudioBuffer::new(2, SAMPLE_RATE, BIT_DEPTH, samples).unwrap()
    }

    #[test]
    fn encode_layout() {
        let mut out = Vec::new();
        encode(&mut out, &stereo(vec![0x0102, 0x0304])).unwrap();

        assert_eq!(&out[0..4], &MAGIC);
        assert_eq!(&out[4..8], &2u32.to_le_bytes());
        assert_eq!(&out[8..12], &[0x01, 0x00, 0x00, 0x00]);
        let packed_size = u32::from_le_bytes(out[12..16].try_into().unwrap());
        assert_eq!(packed_size as usize, out.len() - 0x14);
        assert_eq!(&out[16..20], &4u32.to_le_bytes());
        // Samples are big-endian on the wire.
        assert_eq!(zlib::inflate(&out[0x14..]).unwrap(), [1, 2, 3, 4]);
    }

    #[test]
    fn encode_then_decode_round_trips() {
        let original = stereo((0..2048u16).map(|i| i.wrapping_mul(31)).collect());
        let mut file = Vec::new();
        encode(&mut file, &original).unwrap();

        let decoded = decode(&mut Cursor::new(file)).unwrap();
        assert_eq!(decoded, original);
        assert_eq!(decoded.channels, 2);
        assert_eq!(decoded.sample_rate, 22050);
        assert_eq!(decoded.bit_depth, 16);
    }

    #[test]
    fn mono_is_widened_to_stereo() {
        let mono = AudioBuffer::new(1, SAMPLE_RATE, BIT_DEPTH, vec![100, 200]).unwrap();
        let mut file = Vec::new();
        encode(&mut file, &mono).unwrap();

        let decoded = decode(&mut Cursor::new(file)).unwrap();
        assert_eq!(decoded.samples, [100, 100, 200, 200]);
        assert_eq!(decoded.channels, 2);
    }

    #[test]
    fn decode_ignores_the_magic() {
        let mut file = Vec::new();
        encode(&mut file, &stereo(vec![7, 7])).unwrap();
        file[0..4].copy_from_slice(b"????");
        assert!(decode(&mut Cursor::new(file)).is_ok());
    }

    #[test]
    fn truncated_payload_is_rejected() {
        // Header claims 4 samples; payload holds 3.
        let raw = [0u8; 6];
        let packed = zlib::deflate(&raw).unwrap();
        let mut file = Vec::new();
        file.extend_from_slice(&MAGIC);
        file.extend_from_slice(&4u32.to_le_bytes());
        file.extend_from_slice(&CONSTANT_FIELD);
        file.extend_from_slice(&(packed.len() as u32).to_le_bytes());
        file.extend_from_slice(&6u32.to_le_bytes());
        file.extend_from_slice(&packed);

        match decode(&mut Cursor::new(file)) {
            Err(Error::SizeMismatch { got, expected }) => {
                assert_eq!((got, expected), (6, 8));
            }
            other => panic!("expected size mismatch, got {other:?}"),
        }
    }

    #[test]
    fn unsupported_parameters_are_rejected() {
        let wrong_rate = AudioBuffer::new(2, 44100, BIT_DEPTH, vec![0, 0]).unwrap();
        assert!(matches!(
            encode(&mut Vec::new(), &wrong_rate),
            Err(Error::UnsupportedSampleRate(44100))
        ));

        let quad = AudioBuffer::new(4, SAMPLE_RATE, BIT_DEPTH, vec![0; 8]).unwrap();
        assert!(matches!(
            encode(&mut Vec::new(), &quad),
            Err(Error::UnsupportedChannels(4))
        ));
    }
}
