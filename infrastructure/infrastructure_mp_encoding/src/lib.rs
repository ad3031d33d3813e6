//! Infrastructure Layer: Multiprecision Encoding
//!
//! Provides text and bit-pattern codecs for multiprecision numbers.
//!
//! ## Overview
//!
//! The `infrastructure_mp_encoding` crate is part of the infrastructure layer.
//! It moves values across the library boundary: decimal numerals typed by a user
//! or printed back, and fixed-width bit patterns exchanged with machine words.
//!
//! ## Codecs
//!
//! - **[`string_codec`](string_codec/index.html)**: Decimal numerals, exact and
//!   rounded (fixed and scientific) rendering.
//!
//! - **[`bits_codec`](bits_codec/index.html)**: Fixed-width bit patterns split into
//!   words of a configurable bit radix.
//!
//! ## See Also
//!
//! - [`entities_multiprecision`](../entities_multiprecision/index.html): MpNumber and its kernels

mod common;

pub mod bits_codec;
pub mod string_codec;

pub use bits_codec::{BitsCodec, DEFAULT_BITS_PER_WORD, MAX_BITS_PER_WORD};
pub use string_codec::StringCodec;
