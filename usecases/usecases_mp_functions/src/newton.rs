//! Precision schedule for Newton iterations.
//!
//! A seed from a host float is good to about two radix digits, and each Newton
//! step doubles the number of correct digits, so the working precision of step
//! `i` only needs to be a little more than twice that of step `i - 1`.

/// Precision of the first step, the accuracy of an `f64` seed
const SEED_DIGITS: usize = 2;

/// Working precisions for successive Newton steps reaching `target`
///
/// The schedule is increasing, starts at the seed precision, and repeats the
/// target once so the last step runs with fully converged input.
pub fn precision_ladder(target: usize) -> Vec<usize> {
    let target = target.max(SEED_DIGITS);
    let mut ladder = vec![target];
    let mut p = target;
    while p > SEED_DIGITS {
        p = (p / 2 + 1).max(SEED_DIGITS);
        ladder.push(p);
    }
    ladder.reverse();
    ladder.push(target);
    ladder
}
