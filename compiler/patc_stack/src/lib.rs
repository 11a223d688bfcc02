//! Stack growth guard for recursive walks over pattern trees.
//!
//! Patterns nest arbitrarily (`A(B(C(...)))`, `[[[...]]]`), and resolution,
//! normalization-time checks and branch compilation all recurse on that
//! nesting. Wrap each recursive step in [`ensure_sufficient_stack`].

/// Grow when less than this remains.
const RED_ZONE: usize = 64 * 1024;

/// Size of each new stack segment.
const GROW_BY: usize = 1024 * 1024;

/// Run `f`, first switching to a fresh stack segment if the current one is
/// nearly exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, GROW_BY, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    enum Nested {
        Leaf,
        Wrap(Box<Nested>),
    }

    fn depth(n: &Nested) -> usize {
        ensure_sufficient_stack(|| match n {
            Nested::Leaf => 0,
            Nested::Wrap(inner) => depth(inner) + 1,
        })
    }

    #[test]
    fn passes_result_through() {
        assert_eq!(ensure_sufficient_stack(|| 7), 7);
    }

    #[test]
    fn deep_nesting_does_not_overflow() {
        let mut tree = Nested::Leaf;
        for _ in 0..50_000 {
            tree = Nested::Wrap(Box::new(tree));
        }
        assert_eq!(depth(&tree), 50_000);

        // Iterative drop; the default recursive drop would overflow.
        while let Nested::Wrap(inner) = tree {
            tree = *inner;
        }
    }
}
