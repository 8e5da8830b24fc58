//! Internal word storage for [`VisitedSet`](crate::VisitedSet).

use alloc::{boxed::Box, vec};

use crate::macros::bitpos;

/// Number of 64-bit words that can be stored inline
pub(crate) const WORDS_INLINE: usize = 2;
pub(crate) const BITS_INLINE: usize = 64 * WORDS_INLINE;

pub(crate) type ArrayBitmap = [u64; WORDS_INLINE];

/// Fixed-capacity bit storage.
///
/// The word count is decided once from the capacity and never changes
/// afterwards, so there is no promotion between modes: small catalogues stay
/// inline for their whole lifetime and large ones allocate exactly once.
#[derive(Clone)]
pub(crate) enum Words {
    /// Capacity fits in [`BITS_INLINE`] bits
    Inline(ArrayBitmap),
    /// Heap storage of `capacity.div_ceil(64)` words
    External(Box<[u64]>),
}

impl Words {
    pub(crate) fn with_capacity(bits: usize) -> Self {
        if bits <= BITS_INLINE {
            Self::Inline([0; WORDS_INLINE])
        } else {
            Self::External(vec![0; bits.div_ceil(64)].into_boxed_slice())
        }
    }

    #[inline]
    pub(crate) fn as_slice(&self) -> &[u64] {
        match self {
            Self::Inline(array) => array,
            Self::External(words) => words,
        }
    }

    #[inline]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [u64] {
        match self {
            Self::Inline(array) => array,
            Self::External(words) => words,
        }
    }

    /// Returns `true` if the storage lives on the heap.
    #[inline]
    pub(crate) const fn is_spilled(&self) -> bool {
        matches!(self, Self::External(_))
    }

    #[inline]
    pub(crate) fn get(&self, bit: usize) -> bool {
        let (wi, bi) = bitpos!(bit);
        self.as_slice()
            .get(wi)
            .is_some_and(|word| (word >> bi) & 1 != 0)
    }

    /// Sets `bit` to `value`, returning the previous value. Bits past the
    /// allocated words are ignored.
    #[inline]
    pub(crate) fn replace(&mut self, bit: usize, value: bool) -> bool {
        let (wi, bi) = bitpos!(bit);
        let Some(word) = self.as_mut_slice().get_mut(wi) else {
            return false;
        };
        let mask = 1u64 << bi;
        let prev = *word & mask != 0;
        if value {
            *word |= mask;
        } else {
            *word &= !mask;
        }
        prev
    }

    /// Extracts bits `[beg, end)` (at most 64 of them) as an integer, with
    /// bit `beg` in the least significant position.
    pub(crate) fn get_range(&self, beg: usize, end: usize) -> u64 {
        debug_assert!(beg <= end, "beg must be <= end");

        let len = (end - beg).min(64);
        if len == 0 {
            return 0;
        }

        let slice = self.as_slice();
        let (w0, b0) = bitpos!(beg);
        if w0 >= slice.len() {
            return 0;
        }

        if b0 + len <= 64 {
            let mask = (!0u64 >> (64 - len)) << b0;
            (slice[w0] & mask) >> b0
        } else {
            let lo_bits = 64 - b0;
            let hi_bits = len - lo_bits;
            let lo = (slice[w0] >> b0) & ((1u64 << lo_bits) - 1);
            let hi = if w0 + 1 < slice.len() {
                slice[w0 + 1] & ((1u64 << hi_bits) - 1)
            } else {
                0
            };
            lo | (hi << lo_bits)
        }
    }

    /// Overwrites bits `[beg, end)` with the low bits of `value`. Higher bits
    /// of `value` are discarded.
    pub(crate) fn put_range(&mut self, beg: usize, end: usize, value: u64) {
        debug_assert!(beg <= end, "beg must be <= end");

        let len = (end - beg).min(64);
        if len == 0 {
            return;
        }

        let slice = self.as_mut_slice();
        let (w0, b0) = bitpos!(beg);
        if w0 >= slice.len() {
            return;
        }

        let value = value & (!0u64 >> (64 - len));
        if b0 + len <= 64 {
            let mask = (!0u64 >> (64 - len)) << b0;
            slice[w0] = (slice[w0] & !mask) | (value << b0);
        } else {
            let lo_bits = 64 - b0;
            let hi_bits = len - lo_bits;
            let lo_mask = !0u64 << b0;
            slice[w0] = (slice[w0] & !lo_mask) | (value << b0);
            if let Some(next) = slice.get_mut(w0 + 1) {
                let hi_mask = (1u64 << hi_bits) - 1;
                *next = (*next & !hi_mask) | (value >> lo_bits);
            }
        }
    }

    #[inline]
    pub(crate) fn count_ones(&self) -> usize {
        self.as_slice()
            .iter()
            .map(|w| w.count_ones() as usize)
            .sum()
    }

    pub(crate) fn clear(&mut self) {
        self.as_mut_slice().fill(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_up_to_128_bits() {
        assert!(!Words::with_capacity(112).is_spilled());
        assert!(!Words::with_capacity(BITS_INLINE).is_spilled());
        assert!(Words::with_capacity(BITS_INLINE + 1).is_spilled());
        assert_eq!(Words::with_capacity(200).as_slice().len(), 4);
    }

    #[test]
    fn test_replace_reports_previous() {
        let mut words = Words::with_capacity(112);
        assert!(!words.replace(5, true));
        assert!(words.replace(5, true));
        assert!(words.get(5));
        assert!(words.replace(5, false));
        assert!(!words.get(5));
        assert_eq!(words.count_ones(), 0);
    }

    #[test]
    fn test_replace_past_end_is_ignored() {
        let mut words = Words::with_capacity(64);
        assert!(!words.replace(500, true));
        assert!(!words.get(500));
        assert_eq!(words.count_ones(), 0);
    }

    #[test]
    fn test_get_range_across_words() {
        let mut words = Words::with_capacity(128);
        words.replace(60, true);
        words.replace(63, true);
        words.replace(64, true);
        words.replace(70, true);

        assert_eq!(words.get_range(60, 71), 0b100_0001_1001);
        assert_eq!(words.get_range(0, 38), 0);
        assert_eq!(words.get_range(38, 76), (1 << 22) | (1 << 25) | (1 << 26) | (1 << 32));
    }

    #[test]
    fn test_put_range_across_words() {
        let mut words = Words::with_capacity(128);
        words.replace(0, true);
        words.replace(100, true);

        words.put_range(38, 76, (1 << 37) | 1);
        assert!(words.get(0));
        assert!(words.get(38));
        assert!(words.get(75));
        assert!(words.get(100));
        assert_eq!(words.count_ones(), 4);

        words.put_range(38, 76, 0);
        assert_eq!(words.count_ones(), 2);
    }

    #[test]
    fn test_put_range_masks_value() {
        let mut words = Words::with_capacity(128);
        words.put_range(0, 4, u64::MAX);
        assert_eq!(words.get_range(0, 64), 0b1111);
    }
}
