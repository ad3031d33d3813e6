//! Evaluation Context
//!
//! The arena and the cached constants shared by one call chain.
//!
//! ## Overview
//!
//! π, `ln(MP_RADIX)` and `ln(10)` are expensive, so each is kept in a single
//! slot tagged with the precision it was computed for. A request at or below
//! that precision rounds the cached value; a larger request recomputes the
//! constant and replaces the slot. Like the arena, the cache is neither `Sync`
//! nor shared: one context serves one thread of arithmetic.

use std::cell::RefCell;

use entities_multiprecision::{fun_digits, round_copy, Arena, MpNumber, MpResult, Temp};
use tracing::debug;

/// Constants kept by [`ConstantCache`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constant {
    Pi,
    LnRadix,
    LnTen,
}

/// Cached value together with the precision it is accurate to
#[derive(Debug, Clone)]
struct Slot {
    digits: usize,
    value: MpNumber,
}

/// Precision-tagged constant slots
#[derive(Debug, Default)]
pub struct ConstantCache {
    pi: RefCell<Option<Slot>>,
    ln_radix: RefCell<Option<Slot>>,
    ln_ten: RefCell<Option<Slot>>,
}

impl ConstantCache {
    fn slot(&self, which: Constant) -> &RefCell<Option<Slot>> {
        match which {
            Constant::Pi => &self.pi,
            Constant::LnRadix => &self.ln_radix,
            Constant::LnTen => &self.ln_ten,
        }
    }

    /// Precision the constant is currently cached at, if any
    pub fn cached_digits(&self, which: Constant) -> Option<usize> {
        self.slot(which).borrow().as_ref().map(|s| s.digits)
    }

    /// Drop every cached value
    pub fn clear(&self) {
        for which in [Constant::Pi, Constant::LnRadix, Constant::LnTen] {
            self.slot(which).borrow_mut().take();
        }
    }
}

/// Arena plus constant caches for one thread of arithmetic
#[derive(Debug, Default)]
pub struct Context {
    arena: Arena,
    constants: ConstantCache,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context whose arena holds at most `limit` digits at once
    pub fn with_arena_limit(limit: usize) -> Self {
        Self {
            arena: Arena::with_limit(limit),
            constants: ConstantCache::default(),
        }
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn constants(&self) -> &ConstantCache {
        &self.constants
    }

    /// Constant `which` at precision `n`, computing it with `compute` on a miss
    ///
    /// `compute` receives the working precision to produce the value at.
    pub(crate) fn constant<'a, F>(&'a self, which: Constant, n: usize, compute: F) -> MpResult<Temp<'a>>
    where
        F: FnOnce(usize) -> MpResult<Temp<'a>>,
    {
        let arena = &self.arena;
        if let Some(slot) = self.constants.slot(which).borrow().as_ref() {
            if slot.digits >= n {
                return round_copy(arena, &slot.value, n);
            }
        }
        let g = fun_digits(n);
        let fresh = compute(g)?;
        debug!(constant = ?which, digits = n, working = g, "refreshed constant cache");
        let result = round_copy(arena, &fresh, n)?;
        *self.constants.slot(which).borrow_mut() = Some(Slot {
            digits: n,
            value: fresh.into_owned(),
        });
        Ok(result)
    }
}
