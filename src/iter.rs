//! Iterator over the marked ids of a [`VisitedSet`](crate::VisitedSet).

use core::iter::FusedIterator;

use crate::macros::bitpos;

/// An iterator over marked ids in ascending order.
///
/// Created by [`VisitedSet::iter`](crate::VisitedSet::iter). Zero words are
/// skipped without visiting their bits.
#[derive(Clone)]
pub struct Iter<'a> {
    words: &'a [u64],
    pos: usize, // next bit position to inspect
}

impl<'a> Iter<'a> {
    pub(crate) const fn new(words: &'a [u64]) -> Self {
        Self { words, pos: 0 }
    }
}

impl Iterator for Iter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        let (mut wi, bi) = bitpos!(self.pos);
        let mut word = self.words.get(wi)? >> bi;

        // Skip consecutive zero words efficiently
        while word == 0 {
            wi += 1;
            word = *self.words.get(wi)?;
            self.pos = wi * 64;
        }

        let bit = self.pos + word.trailing_zeros() as usize;
        self.pos = bit + 1;
        // ids are 1-based
        Some(bit + 1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len();
        (n, Some(n))
    }
}

impl ExactSizeIterator for Iter<'_> {
    fn len(&self) -> usize {
        let (wi, bi) = bitpos!(self.pos);
        self.words
            .iter()
            .skip(wi)
            .enumerate()
            .map(|(i, &w)| {
                let w = if i == 0 { w >> bi } else { w };
                w.count_ones() as usize
            })
            .sum()
    }
}

impl FusedIterator for Iter<'_> {}
