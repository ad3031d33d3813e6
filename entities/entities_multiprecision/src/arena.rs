//! Digit Arena
//!
//! Scratch storage for multiprecision temporaries.
//!
//! ## Overview
//!
//! Every kernel allocates its intermediate values from an [`Arena`]. The arena
//! keeps a pool of digit vectors for reuse and a cursor counting the digits
//! currently handed out. Handles ([`Temp`] for values, [`Buffer`] for raw digit
//! runs) give their storage back when dropped, so the cursor returns to its
//! previous position on every exit path of a kernel, including `?` returns.
//!
//! The arena uses interior mutability and is deliberately not `Sync`: one arena
//! serves one call chain. Give each thread of arithmetic its own arena.
//!
//! ## Examples
//!
//! ```rust
//! use entities_multiprecision::Arena;
//!
//! let arena = Arena::new();
//! let mark = arena.mark();
//! {
//!     let scratch = arena.alloc(8);
//!     assert!(scratch.is_zero());
//!     assert!(!arena.is_released(mark));
//! }
//! assert!(arena.is_released(mark));
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::mem;
use std::ops::{Deref, DerefMut};

use tracing::error;

use crate::mp_number::{MpDigit, MpNumber};

/// Default cap on simultaneously allocated digits
pub const DEFAULT_ARENA_LIMIT: usize = 1 << 24;

/// Digit vectors kept for reuse
const MAX_POOLED_BUFFERS: usize = 256;

/// Arena cursor recorded by [`Arena::mark`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Mark(usize);

impl Mark {
    /// Digits in use when the mark was taken
    pub fn digits(self) -> usize {
        self.0
    }
}

/// Scratch digit arena
pub struct Arena {
    pool: RefCell<Vec<Vec<MpDigit>>>,
    in_use: Cell<usize>,
    high_water: Cell<usize>,
    limit: usize,
}

impl Arena {
    /// Create an arena with [`DEFAULT_ARENA_LIMIT`]
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_ARENA_LIMIT)
    }

    /// Create an arena holding at most `limit` digits at once
    pub fn with_limit(limit: usize) -> Self {
        Self {
            pool: RefCell::new(Vec::new()),
            in_use: Cell::new(0),
            high_water: Cell::new(0),
            limit,
        }
    }

    /// Current cursor
    pub fn mark(&self) -> Mark {
        Mark(self.in_use.get())
    }

    /// Whether everything allocated after `mark` has been given back
    pub fn is_released(&self, mark: Mark) -> bool {
        self.in_use.get() == mark.0
    }

    /// Digits currently handed out
    pub fn in_use(&self) -> usize {
        self.in_use.get()
    }

    /// Largest number of digits handed out at once
    pub fn high_water(&self) -> usize {
        self.high_water.get()
    }

    /// Configured limit in digits
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Canonical zero at precision `n`
    pub fn alloc(&self, n: usize) -> Temp<'_> {
        let n = n.max(1);
        let digits = self.take(n);
        Temp {
            arena: self,
            value: MpNumber {
                negative: false,
                exponent: 0,
                digits,
            },
            accounted: n,
        }
    }

    /// Zero-filled raw digit run of `len` digits
    pub fn buffer(&self, len: usize) -> Buffer<'_> {
        Buffer {
            arena: self,
            storage: self.take(len),
            accounted: len,
        }
    }

    /// Copy `x` into the arena, keeping its precision
    pub fn copy(&self, x: &MpNumber) -> Temp<'_> {
        let mut t = self.alloc(x.digits.len());
        t.value.digits.copy_from_slice(&x.digits);
        t.value.exponent = x.exponent;
        t.value.negative = x.negative;
        t
    }

    /// Account for an owned value, making it a temporary of this arena
    pub fn adopt(&self, value: MpNumber) -> Temp<'_> {
        let accounted = value.digits.len();
        self.reserve(accounted);
        Temp {
            arena: self,
            value,
            accounted,
        }
    }

    fn reserve(&self, len: usize) {
        let in_use = self.in_use.get() + len;
        if in_use > self.limit {
            error!(
                requested = len,
                in_use = self.in_use.get(),
                limit = self.limit,
                "multiprecision arena exhausted"
            );
            panic!(
                "multiprecision arena exhausted: {} digits requested, {} of {} in use",
                len,
                self.in_use.get(),
                self.limit
            );
        }
        self.in_use.set(in_use);
        if in_use > self.high_water.get() {
            self.high_water.set(in_use);
        }
    }

    fn take(&self, len: usize) -> Vec<MpDigit> {
        self.reserve(len);
        let mut storage = self.pool.borrow_mut().pop().unwrap_or_default();
        storage.clear();
        storage.resize(len, 0);
        storage
    }

    fn give_back(&self, accounted: usize, storage: Vec<MpDigit>) {
        self.in_use.set(self.in_use.get() - accounted);
        if storage.capacity() == 0 {
            return;
        }
        let mut pool = self.pool.borrow_mut();
        if pool.len() < MAX_POOLED_BUFFERS {
            pool.push(storage);
        }
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Arena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("in_use", &self.in_use.get())
            .field("high_water", &self.high_water.get())
            .field("limit", &self.limit)
            .finish()
    }
}

/// Multiprecision value whose digits belong to an [`Arena`]
pub struct Temp<'a> {
    arena: &'a Arena,
    value: MpNumber,
    accounted: usize,
}

impl<'a> Temp<'a> {
    /// The arena owning this value
    pub fn arena(&self) -> &'a Arena {
        self.arena
    }

    /// Detach the value from the arena
    pub fn into_owned(mut self) -> MpNumber {
        let value = mem::replace(&mut self.value, MpNumber::detached());
        self.arena.in_use.set(self.arena.in_use.get() - self.accounted);
        self.accounted = 0;
        value
    }
}

impl Deref for Temp<'_> {
    type Target = MpNumber;

    fn deref(&self) -> &MpNumber {
        &self.value
    }
}

impl DerefMut for Temp<'_> {
    fn deref_mut(&mut self) -> &mut MpNumber {
        &mut self.value
    }
}

impl Clone for Temp<'_> {
    fn clone(&self) -> Self {
        self.arena.copy(&self.value)
    }
}

impl Drop for Temp<'_> {
    fn drop(&mut self) {
        let storage = mem::take(&mut self.value.digits);
        self.arena.give_back(self.accounted, storage);
    }
}

impl fmt::Debug for Temp<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.value, f)
    }
}

impl fmt::Display for Temp<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}

/// Raw digit run borrowed from an [`Arena`]
pub struct Buffer<'a> {
    arena: &'a Arena,
    storage: Vec<MpDigit>,
    accounted: usize,
}

impl Deref for Buffer<'_> {
    type Target = [MpDigit];

    fn deref(&self) -> &[MpDigit] {
        &self.storage
    }
}

impl DerefMut for Buffer<'_> {
    fn deref_mut(&mut self) -> &mut [MpDigit] {
        &mut self.storage
    }
}

impl Drop for Buffer<'_> {
    fn drop(&mut self) {
        let storage = mem::take(&mut self.storage);
        self.arena.give_back(self.accounted, storage);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_and_release() {
        let arena = Arena::new();
        let mark = arena.mark();
        let a = arena.alloc(10);
        let b = arena.buffer(4);
        assert_eq!(arena.in_use(), 14);
        assert_eq!(a.precision(), 10);
        assert_eq!(b.len(), 4);
        drop(a);
        assert_eq!(arena.in_use(), 4);
        drop(b);
        assert!(arena.is_released(mark));
        assert_eq!(arena.high_water(), 14);
    }

    #[test]
    fn test_reused_storage_is_zeroed() {
        let arena = Arena::new();
        {
            let mut buf = arena.buffer(6);
            buf.iter_mut().for_each(|d| *d = 9);
        }
        let buf = arena.buffer(6);
        assert!(buf.iter().all(|&d| d == 0));
    }

    #[test]
    fn test_into_owned_detaches() {
        let arena = Arena::new();
        let mark = arena.mark();
        let mut t = arena.alloc(3);
        t.digits[0] = 7;
        let owned = t.into_owned();
        assert!(arena.is_released(mark));
        assert_eq!(owned.digit(0), 7);
    }

    #[test]
    fn test_adopt_and_clone_account() {
        let arena = Arena::new();
        let t = arena.adopt(MpNumber::zero(5));
        let u = t.clone();
        assert_eq!(arena.in_use(), 10);
        drop(t);
        drop(u);
        assert_eq!(arena.in_use(), 0);
    }

    #[test]
    #[should_panic(expected = "arena exhausted")]
    fn test_limit_is_fatal() {
        let arena = Arena::with_limit(8);
        let _a = arena.alloc(5);
        let _b = arena.alloc(5);
    }
}
