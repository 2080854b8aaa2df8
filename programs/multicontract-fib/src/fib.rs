//! Fibonacci arithmetic shared by both halves.
//!
//! The sequence starts at F(0) = 0, F(1) = 1. Values are computed iteratively so
//! that the cost stays linear in `n` regardless of which half is the entry point.

/// Largest input whose Fibonacci number still fits in a `u64`.
pub const MAX_INPUT: u64 = 93;

/// Outcome of one calculation as seen from the entry half.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub value: u64,
    /// `true` when F(n - 1) and F(n - 2) had to be asked of the peer half.
    pub delegated: bool,
}

/// Returns F(n), or `None` if it does not fit in a `u64`.
pub fn fibonacci(n: u64) -> Option<u64> {
    if n > MAX_INPUT {
        return None;
    }
    if n < 2 {
        return Some(n);
    }

    let (mut prev, mut curr) = (0u64, 1u64);
    for _ in 1..n {
        let next = prev.checked_add(curr)?;
        prev = curr;
        curr = next;
    }
    Some(curr)
}

pub fn evaluate(n: u64) -> Option<Evaluation> {
    Some(Evaluation {
        value: fibonacci(n)?,
        delegated: n >= 2,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_cases_are_not_delegated() {
        assert_eq!(
            evaluate(0),
            Some(Evaluation {
                value: 0,
                delegated: false
            })
        );
        assert_eq!(
            evaluate(1),
            Some(Evaluation {
                value: 1,
                delegated: false
            })
        );
    }

    #[test]
    fn small_values() {
        let first: Vec<u64> = (0..12).map(|n| fibonacci(n).unwrap()).collect();
        assert_eq!(first, [0, 1, 1, 2, 3, 5, 8, 13, 21, 34, 55, 89]);
        assert!(evaluate(2).unwrap().delegated);
    }

    #[test]
    fn largest_representable_input() {
        assert_eq!(fibonacci(MAX_INPUT), Some(12_200_160_415_121_876_738));
        assert_eq!(fibonacci(MAX_INPUT + 1), None);
        assert_eq!(evaluate(u64::MAX), None);
    }
}
