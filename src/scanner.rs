//! Scanner implementation over a fully decoded input buffer.  The parser runs a single
//! forward pass with no backtracking, so the scanner does no token recognition at all: it
//! owns the character buffer and provides the position-based primitives that the parsing
//! functions use to step through it.
use crate::coords::Coords;
use crate::errors::{ParserError, ParserErrorDetails, ParserResult};
use crate::parser_error;

/// The fixed set of characters treated as insignificant between tokens
const WHITESPACE: [char; 4] = ['\r', '\n', '\t', ' '];

/// Buffer holding the complete decoded input, addressed by character index
pub struct Scanner {
    buffer: Vec<char>,
}

impl Scanner {
    /// Drain `chars` into a new scanner
    pub fn new(chars: &mut impl Iterator<Item = char>) -> Self {
        Self {
            buffer: chars.collect(),
        }
    }

    /// Number of characters in the input
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// True once `index` has passed the final character of the input
    pub fn is_exhausted(&self, index: usize) -> bool {
        index >= self.buffer.len()
    }

    /// The character at `index`, provided the index is within the buffer
    pub fn char_at(&self, index: usize) -> Option<char> {
        self.buffer.get(index).copied()
    }

    /// Check that `index` has not run off the end of the buffer
    pub fn ensure_bounds(&self, index: usize) -> ParserResult<()> {
        if index < self.buffer.len() {
            Ok(())
        } else {
            parser_error!(ParserErrorDetails::UnexpectedEnd, self.coords_of(index))
        }
    }

    /// Index of the first significant character at or after `from`, or the buffer
    /// length if only whitespace remains
    pub fn skip_whitespace(&self, from: usize) -> usize {
        let mut index = from;
        while index < self.buffer.len() && WHITESPACE.contains(&self.buffer[index]) {
            index += 1;
        }
        index
    }

    /// Collect the text between `start` (inclusive) and `end` (exclusive)
    pub fn text_between(&self, start: usize, end: usize) -> String {
        self.buffer[start..end].iter().collect()
    }

    /// Compute the full [Coords] for a character index.  Walks the buffer from the top,
    /// so this is only ever called when constructing an error
    pub fn coords_of(&self, index: usize) -> Coords {
        let mut line = 1;
        let mut column = 1;
        for ch in self.buffer.iter().take(index) {
            if *ch == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        Coords {
            absolute: index,
            line,
            column,
        }
    }
}
