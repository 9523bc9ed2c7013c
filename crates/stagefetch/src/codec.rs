//! Decoder selection.
//!
//! The decoder is chosen from the trailing characters of the URL path, not
//! from the response content. The test is a plain suffix match, so a path
//! ending in `"zgz"` selects gzip just like one ending in `".gz"`.

use std::fmt;
use std::io::{self, Cursor, Read};

use crate::error::{FetchError, Result};

const XZ_MAGIC: &[u8] = &[0xFD, 0x37, 0x7A, 0x58, 0x5A, 0x00];
/// Magic, two stream-flag bytes, CRC32 of the flags.
const XZ_HEADER_LEN: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Codec {
    /// Body is written unchanged.
    #[default]
    Identity,
    Gzip,
    Bzip2,
    Xz,
}

impl Codec {
    /// Picks a codec from a URL path. Case-sensitive; checked in the order
    /// `gz`, `bz2`, `xz`.
    pub fn from_url_path(path: &str) -> Self {
        if path.ends_with("gz") {
            Codec::Gzip
        } else if path.ends_with("bz2") {
            Codec::Bzip2
        } else if path.ends_with("xz") {
            Codec::Xz
        } else {
            Codec::Identity
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Codec::Identity => "identity",
            Codec::Gzip => "gzip",
            Codec::Bzip2 => "bzip2",
            Codec::Xz => "xz",
        }
    }

    /// Wraps `reader` in the matching decompressing reader.
    ///
    /// The full gzip header and the xz stream header are checked here and
    /// fail with [`FetchError::DecompressionInit`]; a bad bzip2 header only surfaces
    /// on the first read. Concatenated members/streams are decoded in
    /// sequence for every codec.
    pub fn decoder<'a, R: Read + 'a>(self, reader: R) -> Result<Box<dyn Read + 'a>> {
        match self {
            Codec::Identity => Ok(Box::new(reader)),
            Codec::Gzip => {
                // The first member header is parsed on construction.
                let decoder = flate2::read::MultiGzDecoder::new(reader);
                if decoder.header().is_none() {
                    return Err(init_error(self, io::ErrorKind::InvalidData, "invalid header"));
                }
                Ok(Box::new(decoder))
            }
            Codec::Bzip2 => Ok(Box::new(bzip2::read::MultiBzDecoder::new(reader))),
            Codec::Xz => {
                let reader = expect_xz_header(reader)?;
                Ok(Box::new(xz2::read::XzDecoder::new_multi_decoder(reader)))
            }
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

fn init_error(codec: Codec, kind: io::ErrorKind, msg: &'static str) -> FetchError {
    FetchError::DecompressionInit {
        codec,
        source: io::Error::new(kind, msg),
    }
}

/// Reads and checks the xz stream header, then hands back a reader that
/// replays it ahead of the rest of the stream.
fn expect_xz_header<R: Read>(mut reader: R) -> Result<io::Chain<Cursor<Vec<u8>>, R>> {
    let codec = Codec::Xz;
    let mut head = Vec::with_capacity(XZ_HEADER_LEN);
    reader
        .by_ref()
        .take(XZ_HEADER_LEN as u64)
        .read_to_end(&mut head)
        .map_err(|source| FetchError::DecompressionInit { codec, source })?;

    if head.len() < XZ_HEADER_LEN {
        return Err(init_error(codec, io::ErrorKind::UnexpectedEof, "stream ended inside the header"));
    }
    if &head[..6] != XZ_MAGIC {
        return Err(init_error(codec, io::ErrorKind::InvalidData, "invalid header"));
    }
    // First flag byte is reserved; the second holds the check type in its low nibble.
    if head[6] != 0 || head[7] & 0xF0 != 0 {
        return Err(init_error(codec, io::ErrorKind::InvalidData, "unsupported stream flags"));
    }
    let mut crc = flate2::Crc::new();
    crc.update(&head[6..8]);
    if crc.sum() != u32::from_le_bytes([head[8], head[9], head[10], head[11]]) {
        return Err(init_error(codec, io::ErrorKind::InvalidData, "stream header checksum mismatch"));
    }

    Ok(Cursor::new(head).chain(reader))
}
