//! Glyph alphabet.

use rand::{Rng, seq::SliceRandom};

/// First code point of the katakana block used for the rain.
pub const MATRIX_BASE: u32 = 0x30a0;

/// Number of katakana code points in the alphabet.
pub const MATRIX_GLYPHS: u32 = 96;

/// Ordered set of glyph characters. `None` entries are blanks, which bias
/// random picks toward empty cells. Indices are stable for the lifetime of
/// the alphabet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    entries: Vec<Option<char>>,
}

impl Alphabet {
    /// Build an alphabet from `chars` followed by `blanks` blank entries.
    pub fn new(chars: impl IntoIterator<Item = char>, blanks: usize) -> Self {
        let entries = chars
            .into_iter()
            .map(Some)
            .chain(std::iter::repeat_n(None, blanks))
            .collect();
        Self { entries }
    }

    /// The katakana rain alphabet, U+30A0 through U+30FF.
    pub fn matrix(blanks: usize) -> Self {
        Self::new(
            (MATRIX_BASE..MATRIX_BASE + MATRIX_GLYPHS).filter_map(char::from_u32),
            blanks,
        )
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Option<char>] {
        &self.entries
    }

    /// Non-blank characters, in order.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.entries.iter().flatten().copied()
    }

    pub fn contains(&self, entry: Option<char>) -> bool {
        self.entries.contains(&entry)
    }

    /// Uniform pick over all entries, blanks included.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<char> {
        self.entries.choose(rng).copied().flatten()
    }
}
