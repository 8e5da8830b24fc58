//! `VisitedSet` struct and core implementation.

use alloc::string::String;

use crate::{
    ParseTokenError,
    iter::Iter,
    macros::id_bit,
    storage::Words,
    token,
};

/// Number of summits in the catalogue this crate was built for.
pub const DEFAULT_CAPACITY: usize = 112;

/// A set of visited ids drawn from `1..=capacity`.
///
/// The capacity is fixed at construction. Ids outside the range are ignored
/// by every mutator and reported as unmarked by every query, so no sequence
/// of calls can put the set into a state its token cannot represent.
///
/// The set converts to and from a short token (see [`crate::token`]) that can
/// be placed verbatim into a URL query value or a local key-value store.
///
/// # Examples
///
/// ```
/// use summit_stamp::VisitedSet;
///
/// let mut visited = VisitedSet::empty(112);
/// visited.mark(1);
/// visited.mark(50);
/// visited.mark(112);
/// assert_eq!(visited.count(), 3);
///
/// let token = visited.serialize();
/// let restored = VisitedSet::parse(Some(&token), 112);
/// assert_eq!(restored, visited);
/// ```
#[derive(Clone)]
pub struct VisitedSet {
    pub(crate) capacity: usize,
    pub(crate) words: Words,
}

impl VisitedSet {
    /// Creates a set with no ids marked.
    ///
    /// Capacities of up to 128 ids are stored inline without allocating.
    ///
    /// # Examples
    ///
    /// ```
    /// # use summit_stamp::VisitedSet;
    /// let visited = VisitedSet::empty(112);
    /// assert_eq!(visited.count(), 0);
    /// assert_eq!(visited.capacity(), 112);
    /// ```
    #[must_use]
    pub fn empty(capacity: usize) -> Self {
        Self {
            capacity,
            words: Words::with_capacity(capacity),
        }
    }

    /// Decodes a token, degrading to the empty set on any malformed input.
    ///
    /// A missing token and the empty string both yield the empty set. This
    /// never fails; use [`try_parse`](Self::try_parse) to find out why a
    /// token was rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// # use summit_stamp::VisitedSet;
    /// assert_eq!(VisitedSet::parse(None, 112).count(), 0);
    /// assert_eq!(VisitedSet::parse(Some("!!!garbage!!!"), 112).count(), 0);
    /// assert_eq!(VisitedSet::parse(Some("3"), 112).count(), 2);
    /// ```
    #[must_use]
    pub fn parse(token: Option<&str>, capacity: usize) -> Self {
        let Some(token) = token else {
            return Self::empty(capacity);
        };
        Self::try_parse(token, capacity).unwrap_or_else(|err| {
            tracing::debug!(%err, capacity, "discarding malformed visited token");
            Self::empty(capacity)
        })
    }

    /// Decodes a token, reporting why it was rejected.
    ///
    /// Surrounding ASCII whitespace is ignored and digits are read without
    /// regard to case. The empty token decodes to the empty set.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseTokenError`] if the token has more groups than
    /// `capacity` needs, an empty group, a character that is not a base-36
    /// digit, or a group literal with bits beyond the capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// # use summit_stamp::{ParseTokenError, VisitedSet};
    /// let visited = VisitedSet::try_parse("1.0.1", 112)?;
    /// assert!(visited.is_marked(1));
    /// assert!(visited.is_marked(77));
    ///
    /// assert!(VisitedSet::try_parse("1.2.3.4", 112).is_err());
    /// # Ok::<(), ParseTokenError>(())
    /// ```
    pub fn try_parse(token: &str, capacity: usize) -> Result<Self, ParseTokenError> {
        Ok(Self {
            capacity,
            words: token::decode(token, capacity)?,
        })
    }

    /// Returns the number of ids this set can hold.
    #[must_use]
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Marks `id` as visited. Ids outside `1..=capacity` are ignored.
    ///
    /// Returns `true` if the set changed.
    #[inline]
    pub fn mark(&mut self, id: usize) -> bool {
        self.set(id, true)
    }

    /// Removes the visited mark from `id`. Ids outside `1..=capacity` are
    /// ignored.
    ///
    /// Returns `true` if the set changed.
    #[inline]
    pub fn unmark(&mut self, id: usize) -> bool {
        self.set(id, false)
    }

    /// Sets the membership of `id` to `visited`.
    ///
    /// Returns `true` if the set changed. Out-of-range ids never change the
    /// set.
    ///
    /// # Examples
    ///
    /// ```
    /// # use summit_stamp::VisitedSet;
    /// let mut visited = VisitedSet::empty(112);
    /// assert!(visited.set(7, true));
    /// assert!(!visited.set(7, true));
    /// assert!(!visited.set(0, true));
    /// assert!(!visited.set(113, true));
    /// assert_eq!(visited.count(), 1);
    /// ```
    pub fn set(&mut self, id: usize, visited: bool) -> bool {
        match id_bit!(id, self.capacity) {
            Some(bit) => self.words.replace(bit, visited) != visited,
            None => false,
        }
    }

    /// Returns `true` if `id` is marked. Out-of-range ids are never marked.
    #[must_use]
    #[inline]
    pub fn is_marked(&self, id: usize) -> bool {
        id_bit!(id, self.capacity).is_some_and(|bit| self.words.get(bit))
    }

    /// Returns the number of marked ids.
    #[must_use]
    #[inline]
    pub fn count(&self) -> usize {
        self.words.count_ones()
    }

    /// Returns `true` if no id is marked.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.as_slice().iter().all(|&w| w == 0)
    }

    /// Unmarks every id.
    pub fn clear(&mut self) {
        self.words.clear();
    }

    /// Returns an iterator over the marked ids in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use summit_stamp::VisitedSet;
    /// let mut visited = VisitedSet::empty(112);
    /// visited.mark(90);
    /// visited.mark(3);
    /// assert_eq!(visited.iter().collect::<Vec<_>>(), vec![3, 90]);
    /// ```
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self.words.as_slice())
    }

    /// Encodes the set as a URL-safe token.
    ///
    /// Sets with equal membership always produce the same token, whatever
    /// order their ids were marked in.
    ///
    /// # Examples
    ///
    /// ```
    /// # use summit_stamp::VisitedSet;
    /// let mut visited = VisitedSet::empty(112);
    /// assert_eq!(visited.serialize(), "");
    ///
    /// visited.mark(1);
    /// visited.mark(112);
    /// assert_eq!(visited.serialize(), "1.0.fs8wfsw");
    /// ```
    #[must_use]
    pub fn serialize(&self) -> String {
        token::encode(&self.words, self.capacity)
    }

    /// Formats the visited counter as `"{count}/{capacity}"`.
    ///
    /// ```
    /// # use summit_stamp::VisitedSet;
    /// let mut visited = VisitedSet::empty(112);
    /// visited.mark(12);
    /// assert_eq!(visited.visited_label(), "1/112");
    /// ```
    #[must_use]
    pub fn visited_label(&self) -> String {
        alloc::format!("{}/{}", self.count(), self.capacity)
    }

    /// Returns `true` if the set keeps its words on the heap.
    #[must_use]
    #[inline]
    pub const fn is_spilled(&self) -> bool {
        self.words.is_spilled()
    }
}
