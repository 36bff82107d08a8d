//! The parser operates over a stream of `char`s produced by some flavour of iterator.
//! For byte-backed inputs that iterator is a decoder taking a stream of bytes from an
//! underlying source and converting it into a stream of `char`s; the [Encoding] selects
//! which decoder gets instantiated.  (Currently only ASCII and UTF-8 are supported).
use chisel_decoders::{ascii::AsciiDecoder, utf8::Utf8Decoder};
use std::io::BufRead;

/// Enumeration of different supported encoding types
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Encoding {
    Utf8,
    Ascii,
}

impl Default for Encoding {
    /// Utf-8 unless the `default_utf8_encoding` feature has been switched off
    fn default() -> Self {
        if cfg!(feature = "default_utf8_encoding") {
            Self::Utf8
        } else {
            Self::Ascii
        }
    }
}

impl Encoding {
    /// Create a new `char` iterator over the contents of `buffer`, decoding per the
    /// selected encoding
    pub fn decoder<'a, Buffer: BufRead>(
        &self,
        buffer: &'a mut Buffer,
    ) -> Box<dyn Iterator<Item = char> + 'a> {
        match self {
            Encoding::Utf8 => Box::new(Utf8Decoder::new(buffer)),
            Encoding::Ascii => Box::new(AsciiDecoder::new(buffer)),
        }
    }
}
