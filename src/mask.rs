/*
    skimsel

    Copyright 2024 The skimsel Authors

    Permission is hereby granted, free of charge, to any person obtaining a
    copy of this software and associated documentation files (the “Software”),
    to deal in the Software without restriction, including without limitation
    the rights to use, copy, modify, merge, publish, distribute, sublicense,
    and/or sell copies of the Software, and to permit persons to whom the
    Software is furnished to do so, subject to the following conditions:

    The above copyright notice and this permission notice shall be included in
    all copies or substantial portions of the Software.

    THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
    IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
    FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
    AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
    LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
    FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
    DEALINGS IN THE SOFTWARE.

    --------------------------------------------------------------------------

    src/mask.rs

    A fixed-width 128-bit selection mask, stored as two 64-bit words.
*/

use std::{
    fmt::{self, Display, Formatter},
    ops::BitOr,
};

use crate::SELECTION_MASK_BITS;

const WORD_BITS: usize = 64;

/// The set of triggers that fired for a bunch-crossing range. Bit `n` lives in word `n / 64`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectionMask {
    words: [u64; 2],
}

impl SelectionMask {
    pub const EMPTY: SelectionMask = SelectionMask { words: [0; 2] };

    pub fn from_words(words: [u64; 2]) -> Self {
        SelectionMask { words }
    }

    pub fn words(&self) -> [u64; 2] {
        self.words
    }

    /// Set `bit`. Bits beyond the mask width are ignored.
    pub fn set(&mut self, bit: usize) {
        if bit < SELECTION_MASK_BITS {
            self.words[bit / WORD_BITS] |= 1u64 << (bit % WORD_BITS);
        }
    }

    pub fn clear(&mut self) {
        self.words = [0; 2];
    }

    /// Test `bit`. Bits beyond the mask width always test false.
    pub fn test(&self, bit: usize) -> bool {
        bit < SELECTION_MASK_BITS && (self.words[bit / WORD_BITS] >> (bit % WORD_BITS)) & 1 != 0
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| *w == 0)
    }

    pub fn count_ones(&self) -> u32 {
        self.words.iter().map(|w| w.count_ones()).sum()
    }

    /// Iterate over the set bits in ascending order.
    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        (0..SELECTION_MASK_BITS).filter(move |bit| self.test(*bit))
    }
}

impl BitOr for SelectionMask {
    type Output = SelectionMask;

    fn bitor(self, rhs: Self) -> Self::Output {
        SelectionMask {
            words: [self.words[0] | rhs.words[0], self.words[1] | rhs.words[1]],
        }
    }
}

impl Display for SelectionMask {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:016x}{:016x}", self.words[1], self.words[0])
    }
}
