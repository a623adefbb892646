//! Library-wide error and result types.

use std::fmt;
use std::io;

/// Result alias used throughout gwkit.
pub type Result<T> = std::result::Result<T, Error>;

/// All errors the library can produce.
///
/// Three broad classes: stream failures ([`Error::Io`]), malformed input
/// ([`Error::Zlib`], [`Error::NotPacked`], [`Error::UnsupportedSize`],
/// [`Error::SizeMismatch`], [`Error::Parse`]), and inputs the encoders
/// refuse to represent ([`Error::UnsupportedChannels`],
/// [`Error::UnsupportedSampleRate`]). Error messages are kept
/// intentionally terse; callers that need richer context should wrap
/// `Error` in their own type.
#[derive(Debug)]
pub enum Error {
    /// An underlying I/O operation failed (including short reads / EOF).
    Io(io::Error),
    /// A payload was not a valid zlib stream, or the stream was truncated.
    Zlib,
    /// A bytecode file does not carry the packed-format signature.
    NotPacked,
    /// A texture header declares a zero dimension.
    UnsupportedSize {
        /// Declared width in pixels.
        width: u32,
        /// Declared height in pixels.
        height: u32,
    },
    /// A decompressed payload does not have the length the header declares.
    SizeMismatch {
        /// Actual decompressed length in bytes.
        got: usize,
        /// Length the header promised.
        expected: usize,
    },
    /// An audio buffer has a channel count the format cannot carry.
    UnsupportedChannels(u16),
    /// An audio buffer has a sample rate other than the console's fixed rate.
    UnsupportedSampleRate(u32),
    /// A structural constraint was violated (message describes which one).
    Parse(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {e}"),
            Error::Zlib => write!(f, "invalid zlib stream"),
            Error::NotPacked => write!(f, "file is not packed"),
            Error::UnsupportedSize { width, height } => {
                write!(f, "unsupported size: {width}x{height}")
            }
            Error::SizeMismatch { got, expected } => {
                write!(f, "unpacked size mismatch: got {got}, expected {expected}")
            }
            Error::UnsupportedChannels(n) => {
                write!(f, "expected mono or stereo sound, got {n} channels")
            }
            Error::UnsupportedSampleRate(hz) => {
                write!(f, "expected 22050Hz sound, got {hz}Hz")
            }
            Error::Parse(s) => write!(f, "parse error: {s}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        if let Error::Io(e) = self {
            Some(e)
        } else {
            None
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}
