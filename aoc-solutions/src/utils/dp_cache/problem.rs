//! Trait-based DP problem definition.

/// Dependency structure and combine step of a memoised computation.
///
/// # Type Parameters
///
/// - `I`: Index type for the DP cache
/// - `K`: Value type stored in the cache
///
/// # Example
///
/// ```rust
/// use aoc_solutions::utils::dp_cache::{DpCache, DpProblem, VecBackend};
///
/// struct Fibonacci;
///
/// impl DpProblem<usize, u64> for Fibonacci {
///     fn deps(&self, n: &usize) -> Vec<usize> {
///         if *n <= 1 { vec![] } else { vec![n - 1, n - 2] }
///     }
///
///     fn compute(&self, n: &usize, deps: Vec<u64>) -> u64 {
///         if *n <= 1 { *n as u64 } else { deps[0] + deps[1] }
///     }
/// }
///
/// let cache = DpCache::builder()
///     .backend(VecBackend::new())
///     .problem(Fibonacci)
///     .build();
/// assert_eq!(cache.get(&10).unwrap(), 55);
/// ```
pub trait DpProblem<I, K> {
    /// Indices that `index` depends on; empty for base cases.
    fn deps(&self, index: &I) -> Vec<I>;

    /// Value of `index` given the values of `deps(index)`, in the same order.
    fn compute(&self, index: &I, deps: Vec<K>) -> K;
}

/// Adapts a pair of closures to [`DpProblem`].
///
/// ```rust
/// use aoc_solutions::utils::dp_cache::{ClosureProblem, DpCache, VecBackend};
///
/// let factorial = ClosureProblem::new(
///     |n: &usize| if *n == 0 { vec![] } else { vec![n - 1] },
///     |n: &usize, deps: Vec<u64>| if *n == 0 { 1 } else { *n as u64 * deps[0] },
/// );
///
/// let cache = DpCache::builder()
///     .backend(VecBackend::new())
///     .problem(factorial)
///     .build();
/// assert_eq!(cache.get(&5).unwrap(), 120);
/// ```
pub struct ClosureProblem<D, C> {
    dep_fn: D,
    compute_fn: C,
}

impl<D, C> ClosureProblem<D, C> {
    pub fn new(dep_fn: D, compute_fn: C) -> Self {
        Self { dep_fn, compute_fn }
    }
}

impl<I, K, D, C> DpProblem<I, K> for ClosureProblem<D, C>
where
    D: Fn(&I) -> Vec<I>,
    C: Fn(&I, Vec<K>) -> K,
{
    fn deps(&self, index: &I) -> Vec<I> {
        (self.dep_fn)(index)
    }

    fn compute(&self, index: &I, deps: Vec<K>) -> K {
        (self.compute_fn)(index, deps)
    }
}
