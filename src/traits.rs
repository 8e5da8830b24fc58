//! Standard trait implementations for [`VisitedSet`].

use core::{
    fmt,
    hash::{Hash, Hasher},
};

use crate::{DEFAULT_CAPACITY, Iter, VisitedSet};

/// Error type for decoding a token with [`VisitedSet::try_parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseTokenError {
    /// A character that is neither a base-36 digit nor the separator.
    InvalidDigit {
        /// The invalid character found
        ch: char,
        /// Byte offset of the character in the trimmed token
        pos: usize,
    },

    /// Two separators with nothing between them, or a separator at either
    /// end of the token.
    EmptyGroup {
        /// Index of the empty group
        group: usize,
    },

    /// The token has more groups than the capacity needs.
    TooManyGroups {
        /// Number of groups in the token
        found: usize,
        /// Number of groups the capacity needs
        max: usize,
    },

    /// A group literal sets bits beyond its group, or beyond the capacity.
    GroupOverflow {
        /// Index of the offending group
        group: usize,
    },
}

impl fmt::Display for ParseTokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDigit { ch, pos } => {
                write!(f, "invalid character {ch:?} at position {pos} in token")
            }
            Self::EmptyGroup { group } => write!(f, "group {group} of token is empty"),
            Self::TooManyGroups { found, max } => {
                write!(f, "token has {found} groups but at most {max} are allowed")
            }
            Self::GroupOverflow { group } => {
                write!(f, "group {group} of token marks ids beyond the capacity")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseTokenError {}

impl Default for VisitedSet {
    /// An empty set over the [`DEFAULT_CAPACITY`] catalogue.
    fn default() -> Self {
        Self::empty(DEFAULT_CAPACITY)
    }
}

impl fmt::Debug for VisitedSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut w = f.debug_set();
        for id in self {
            w.entry(&id);
        }
        w.finish()
    }
}

/// Writes the token, as [`VisitedSet::serialize`] does.
impl fmt::Display for VisitedSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

impl PartialEq for VisitedSet {
    fn eq(&self, other: &Self) -> bool {
        self.capacity == other.capacity && self.words.as_slice() == other.words.as_slice()
    }
}

impl Eq for VisitedSet {}

impl Hash for VisitedSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.capacity.hash(state);
        self.words.as_slice().hash(state);
    }
}

/// Marks every id yielded, ignoring out-of-range ids.
impl Extend<usize> for VisitedSet {
    fn extend<T: IntoIterator<Item = usize>>(&mut self, iter: T) {
        for id in iter {
            self.mark(id);
        }
    }
}

impl<'a> Extend<&'a usize> for VisitedSet {
    fn extend<T: IntoIterator<Item = &'a usize>>(&mut self, iter: T) {
        self.extend(iter.into_iter().copied());
    }
}

impl<'a> IntoIterator for &'a VisitedSet {
    type Item = usize;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<&VisitedSet> for alloc::string::String {
    fn from(visited: &VisitedSet) -> Self {
        visited.serialize()
    }
}
