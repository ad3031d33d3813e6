//! Bits Codec Module
//!
//! Fixed-width bit patterns to and from multiprecision numbers.
//!
//! ## Overview
//!
//! A bit pattern of `width` bits is held as a sequence of machine words, most
//! significant first, each carrying `bits_per_word` bits (`BITS_RADIX =
//! 2^bits_per_word`). Export repeatedly divides by `BITS_RADIX` collecting the
//! remainders; import multiplies by `BITS_RADIX` and adds each word. Both use
//! the O(N) digit-scale kernels.
//!
//! Values outside `[0, 2^width)`, non-integral values and words not below
//! `BITS_RADIX` are range errors.

use entities_multiprecision::{
    add, divrem_digit, from_i64, mul_digit, round_copy, Arena, MpDigit, MpError, MpNumber,
    MpResult, Temp,
};
use tracing::trace;

/// Bits per word used when none is configured
pub const DEFAULT_BITS_PER_WORD: u32 = 23;

/// Largest word size the digit-scale kernels accept
pub const MAX_BITS_PER_WORD: u32 = 36;

/// Bits in one radix digit, rounded down
const BITS_PER_RADIX_DIGIT: usize = 23;

/// Bit-pattern codec
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitsCodec {
    bits_per_word: u32,
}

impl BitsCodec {
    /// Codec with `bits_per_word` bits in each word
    ///
    /// # Errors
    ///
    /// * `OutOfRange` - `bits_per_word` is zero or above [`MAX_BITS_PER_WORD`]
    pub fn new(bits_per_word: u32) -> MpResult<Self> {
        if !(1..=MAX_BITS_PER_WORD).contains(&bits_per_word) {
            return Err(MpError::OutOfRange {
                target: "bits per word",
            });
        }
        Ok(Self { bits_per_word })
    }

    pub fn bits_per_word(&self) -> u32 {
        self.bits_per_word
    }

    /// `2^bits_per_word`
    pub fn bits_radix(&self) -> MpDigit {
        1 << self.bits_per_word
    }

    /// Words needed for a `width`-bit pattern
    pub fn words_for(&self, width: usize) -> usize {
        width.div_ceil(self.bits_per_word as usize).max(1)
    }

    /// Exclusive bound of the leading word of a `width`-bit pattern
    fn top_bound(&self, width: usize) -> MpDigit {
        let used = width - (self.words_for(width) - 1) * self.bits_per_word as usize;
        1 << used.min(self.bits_per_word as usize)
    }

    /// Radix digits that hold every `width`-bit integer exactly
    fn exact_digits(width: usize) -> usize {
        width / BITS_PER_RADIX_DIGIT + 2
    }

    /// Export the integer `x` as `words_for(width)` words, most significant first
    ///
    /// # Errors
    ///
    /// * `OutOfRange` - `x` is negative, not integral, or needs more than `width` bits
    pub fn to_words(
        &self,
        arena: &Arena,
        x: &MpNumber,
        width: usize,
        n: usize,
    ) -> MpResult<Vec<MpDigit>> {
        if x.is_negative() || !x.is_integral() {
            return Err(MpError::OutOfRange { target: "bits" });
        }
        let words = self.words_for(width);
        let whole = usize::try_from(x.exponent()).map_or(1, |e| e + 1);
        let p = n.max(whole);
        let mut rest: Temp<'_> = arena.copy(x);
        let mut out = Vec::with_capacity(words);
        for _ in 0..words {
            let (quotient, remainder) = divrem_digit(arena, &rest, self.bits_radix(), p)?;
            out.push(remainder);
            rest = quotient;
        }
        out.reverse();
        if !rest.is_zero() || out[0] >= self.top_bound(width) {
            return Err(MpError::OutOfRange { target: "bits" });
        }
        trace!(width, words, "exported bit pattern");
        Ok(out)
    }

    /// Import a bit pattern, most significant word first, at precision `n`
    ///
    /// # Errors
    ///
    /// * `OutOfRange` - a word is not below `bits_radix()`, or the pattern
    ///   does not fit `width` bits
    pub fn from_words<'a>(
        &self,
        arena: &'a Arena,
        words: &[MpDigit],
        width: usize,
        n: usize,
    ) -> MpResult<Temp<'a>> {
        let radix = self.bits_radix();
        if words.iter().any(|w| !(0..radix).contains(w)) {
            return Err(MpError::OutOfRange { target: "bit word" });
        }
        let expected = self.words_for(width);
        let leading = words.len().saturating_sub(expected);
        if words[..leading].iter().any(|&w| w != 0) {
            return Err(MpError::OutOfRange { target: "bits" });
        }
        let significant = &words[leading..];
        if significant.len() == expected && significant[0] >= self.top_bound(width) {
            return Err(MpError::OutOfRange { target: "bits" });
        }
        let p = Self::exact_digits(width).max(n);
        let mut acc = arena.alloc(p);
        for &w in significant {
            let shifted = mul_digit(arena, &acc, radix, p)?;
            let word = from_i64(arena, w, 2);
            acc = add(arena, &shifted, &word, p)?;
        }
        round_copy(arena, &acc, n)
    }
}

impl Default for BitsCodec {
    fn default() -> Self {
        Self {
            bits_per_word: DEFAULT_BITS_PER_WORD,
        }
    }
}
