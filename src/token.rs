//! The token codec.
//!
//! A token splits the id range into fixed groups of [`GROUP_BITS`] ids. Each
//! group's membership mask is written as a base-[`RADIX`] literal and the
//! literals are joined with [`SEPARATOR`]:
//!
//! ```text
//! ids   1 ..= 38 | 39 ..= 76 | 77 ..= 112
//! bits  0 ..  38 | 38 ..  76 | 76 ..  112
//! token   "1"    .   "0"     .  "fs8wfsw"
//! ```
//!
//! The example marks ids 1 and 112.
//!
//! Trailing empty groups are omitted, so the empty set is the empty token.
//! Every character is ASCII alphanumeric or the separator, which keeps the
//! token valid verbatim in a URL query value.

use alloc::string::String;

use crate::{ParseTokenError, storage::Words};

/// Number of ids packed into one base-36 literal.
pub const GROUP_BITS: usize = 38;

/// Numeral radix of each group literal.
pub const RADIX: u32 = 36;

/// Delimiter between group literals.
pub const SEPARATOR: char = '.';

const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Number of groups needed to cover `capacity` ids.
#[inline]
pub(crate) const fn group_count(capacity: usize) -> usize {
    capacity.div_ceil(GROUP_BITS)
}

/// Bit range `[beg, end)` covered by group `group`.
#[inline]
pub(crate) fn group_bounds(group: usize, capacity: usize) -> (usize, usize) {
    let beg = group * GROUP_BITS;
    (beg, (beg + GROUP_BITS).min(capacity))
}

/// Appends `value` in lowercase base 36 without leading zeros.
fn push_literal(out: &mut String, mut value: u64) {
    // u64::MAX needs 13 base-36 digits
    let mut buf = [0u8; 13];
    let mut pos = buf.len();
    loop {
        pos -= 1;
        buf[pos] = DIGITS[(value % u64::from(RADIX)) as usize];
        value /= u64::from(RADIX);
        if value == 0 {
            break;
        }
    }
    for &b in &buf[pos..] {
        out.push(char::from(b));
    }
}

pub(crate) fn encode(words: &Words, capacity: usize) -> String {
    let groups = group_count(capacity);
    let used = (0..groups)
        .rposition(|g| {
            let (beg, end) = group_bounds(g, capacity);
            words.get_range(beg, end) != 0
        })
        .map_or(0, |last| last + 1);

    let mut out = String::with_capacity(used * 9);
    for g in 0..used {
        if g != 0 {
            out.push(SEPARATOR);
        }
        let (beg, end) = group_bounds(g, capacity);
        push_literal(&mut out, words.get_range(beg, end));
    }
    out
}

pub(crate) fn decode(token: &str, capacity: usize) -> Result<Words, ParseTokenError> {
    let mut words = Words::with_capacity(capacity);
    let token = token.trim_ascii();
    if token.is_empty() {
        return Ok(words);
    }

    let max = group_count(capacity);
    let found = token.split(SEPARATOR).count();
    if found > max {
        return Err(ParseTokenError::TooManyGroups { found, max });
    }

    let mut offset = 0;
    for (group, literal) in token.split(SEPARATOR).enumerate() {
        if literal.is_empty() {
            return Err(ParseTokenError::EmptyGroup { group });
        }

        let (beg, end) = group_bounds(group, capacity);
        let mut value: u64 = 0;
        for (i, ch) in literal.char_indices() {
            let Some(digit) = ch.to_digit(RADIX) else {
                return Err(ParseTokenError::InvalidDigit {
                    ch,
                    pos: offset + i,
                });
            };
            value = value
                .checked_mul(u64::from(RADIX))
                .and_then(|v| v.checked_add(u64::from(digit)))
                .ok_or(ParseTokenError::GroupOverflow { group })?;
        }
        if value >> (end - beg) != 0 {
            return Err(ParseTokenError::GroupOverflow { group });
        }

        words.put_range(beg, end, value);
        offset += literal.len() + SEPARATOR.len_utf8();
    }

    Ok(words)
}
