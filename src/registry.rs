//! Explicit codec registry.
//!
//! Rather than wiring format detection into a process-wide table
//! populated as a load-time side effect, the registry is an ordinary
//! value: the caller builds one, queries it, and drops it. Construction is side-effect-free and idempotent - building
//! two registries, or registering the same codec twice, changes nothing
//! observable - and lookups touch no shared state, so a registry can be
//! shared freely across threads.
//!
//! Each [`Codec`] entry pairs a format identifier with plain decode and
//! (where the format supports it) encode functions over in-memory
//! buffers. The archive and bytecode formats are decode-only.

use std::io::Cursor;

use crate::buffer::{AudioBuffer, ImageBuffer};
use crate::formats::{cheese, zbc, zbm, zwf};
use crate::{Error, Result};

/// Any value a Gamewave codec can decode to.
#[derive(Debug)]
pub enum Asset {
    /// A decoded texture.
    Image(ImageBuffer),
    /// A decoded sound.
    Audio(AudioBuffer),
    /// Unpacked, uninterpreted bytecode.
    Bytecode(Vec<u8>),
    /// An extracted file directory.
    Archive(cheese::Cheese),
}

/// One format's identifier, file extensions, and codec functions.
#[derive(Clone, Copy)]
pub struct Codec {
    /// Short format identifier, e.g. `"zbm"`.
    pub id: &'static str,
    /// Lower-case file extensions the format is known by.
    pub extensions: &'static [&'static str],
    /// Decode a whole file buffer into an [`Asset`].
    pub decode: fn(&[u8]) -> Result<Asset>,
    /// Encode an [`Asset`] back into file bytes, if the format has an
    /// encoder.
    pub encode: Option<fn(&Asset) -> Result<Vec<u8>>>,
}

/// The texture codec.
pub const TEXTURE: Codec = Codec {
    id: "zbm",
    extensions: &["zbm"],
    decode: decode_texture,
    encode: Some(encode_texture),
};

/// The audio codec.
pub const AUDIO: Codec = Codec {
    id: "zwf",
    extensions: &["zwf"],
    decode: decode_audio,
    encode: Some(encode_audio),
};

/// The bytecode codec (decode-only).
pub const BYTECODE: Codec = Codec {
    id: "zbc",
    extensions: &["zbc"],
    decode: decode_bytecode,
    encode: None,
};

/// The embedded-directory codec (decode-only).
pub const ARCHIVE: Codec = Codec {
    id: "cheese",
    extensions: &["bin"],
    decode: decode_archive,
    encode: None,
};

/// A caller-owned table of codecs, looked up by id or file extension.
#[derive(Default)]
pub struct Registry {
    codecs: Vec<Codec>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry loaded with all four console codecs.
    pub fn with_console_codecs() -> Self {
        let mut registry = Self::new();
        for codec in [TEXTURE, AUDIO, BYTECODE, ARCHIVE] {
            registry.register(codec);
        }
        registry
    }

    /// Add `codec`, replacing any entry with the same id.
    pub fn register(&mut self, codec: Codec) {
        match self.codecs.iter_mut().find(|c| c.id == codec.id) {
            Some(existing) => *existing = codec,
            None => self.codecs.push(codec),
        }
    }

    /// Look up a codec by identifier.
    pub fn get(&self, id: &str) -> Option<&Codec> {
        self.codecs.iter().find(|c| c.id == id)
    }

    /// Look up a codec by file extension (case-insensitive, without the
    /// leading dot).
    pub fn by_extension(&self, ext: &str) -> Option<&Codec> {
        let ext = ext.to_ascii_lowercase();
        self.codecs
            .iter()
            .find(|c| c.extensions.contains(&ext.as_str()))
    }

    /// All registered codecs, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Codec> {
        self.codecs.iter()
    }
}

fn decode_texture(data: &[u8]) -> Result<Asset> {
    zbm::decode(&mut Cursor::new(data)).map(Asset::Image)
}

fn encode_texture(asset: &Asset) -> Result<Vec<u8>> {
    let Asset::Image(image) = asset else {
        return Err(Error::Parse("texture codec expects an image asset"));
    };
    let mut out = Vec::new();
    zbm::encode(&mut out, image)?;
    Ok(out)
}

fn decode_audio(data: &[u8]) -> Result<Asset> {
    zwf::decode(&mut Cursor::new(data)).map(Asset::Audio)
}

fn encode_audio(asset: &Asset) -> Result<Vec<u8>> {
    let Asset::Audio(audio) = asset else {
        return Err(Error::Parse("audio codec expects an audio asset"));
    };
    let mut out = Vec::new();
    zwf::encode(&mut out, audio)?;
    Ok(out)
}

fn decode_bytecode(data: &[u8]) -> Result<Asset> {
    zbc::unpack(&mut Cursor::new(data)).map(Asset::Bytecode)
}

fn decode_archive(data: &[u8]) -> Result<Asset> {
    let offset = cheese::find_magic(data).ok_or(Error::Parse("no directory magic in file"))?;
    cheese::Cheese::parse(&mut Cursor::new(data), offset as u64).map(Asset::Archive)
}
