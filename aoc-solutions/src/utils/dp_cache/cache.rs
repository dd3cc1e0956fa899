//! Single-threaded DP cache implementation.

use std::cell::RefCell;
use std::marker::PhantomData;

use thiserror::Error;

use super::backend::Backend;
use super::problem::DpProblem;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DpError<I> {
    /// `index` was requested again while its own dependencies were resolving.
    #[error("dependency cycle through {0:?}")]
    Cycle(I),
}

/// Memoising evaluator for values that depend on other values.
///
/// Dependencies are resolved recursively and each value is computed once.
/// A dependency cycle is reported as [`DpError::Cycle`] instead of recursing
/// forever; recursion depth is the longest dependency chain.
///
/// Interior mutability (`RefCell`) lets `get` take `&self`, so `compute`
/// never sees the cache and the cache can be shared by reference.
pub struct DpCache<I, K, B, P> {
    backend: RefCell<B>,
    problem: P,
    resolving: RefCell<Vec<I>>,
    _phantom: PhantomData<K>,
}

impl DpCache<(), (), (), ()> {
    /// Start building a cache; both a backend and a problem are required.
    pub fn builder() -> DpCacheBuilder<(), ()> {
        DpCacheBuilder {
            backend: (),
            problem: (),
        }
    }
}

impl<I, K, B, P> DpCache<I, K, B, P>
where
    I: Clone + PartialEq,
    K: Clone,
    B: Backend<I, K>,
    P: DpProblem<I, K>,
{
    pub fn with_problem(backend: B, problem: P) -> Self {
        Self {
            backend: RefCell::new(backend),
            problem,
            resolving: RefCell::new(Vec::new()),
            _phantom: PhantomData,
        }
    }

    /// Value for `index`, computing it and its dependencies if needed.
    pub fn get(&self, index: &I) -> Result<K, DpError<I>> {
        if let Some(value) = self.backend.borrow().get(index) {
            return Ok(value.clone());
        }

        if self.resolving.borrow().contains(index) {
            return Err(DpError::Cycle(index.clone()));
        }

        self.resolving.borrow_mut().push(index.clone());
        let deps = self
            .problem
            .deps(index)
            .iter()
            .map(|dep| self.get(dep))
            .collect::<Result<Vec<K>, _>>();
        self.resolving.borrow_mut().pop();

        let value = self.problem.compute(index, deps?);
        self.backend.borrow_mut().insert(index.clone(), value.clone());
        Ok(value)
    }

    pub fn is_cached(&self, index: &I) -> bool {
        self.backend.borrow().get(index).is_some()
    }

    /// Number of values computed so far.
    pub fn len(&self) -> usize {
        self.backend.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.backend.borrow().is_empty()
    }

    pub fn problem(&self) -> &P {
        &self.problem
    }
}

/// Builder returned by [`DpCache::builder`].
pub struct DpCacheBuilder<B, P> {
    backend: B,
    problem: P,
}

impl<B, P> DpCacheBuilder<B, P> {
    pub fn backend<B2>(self, backend: B2) -> DpCacheBuilder<B2, P> {
        DpCacheBuilder {
            backend,
            problem: self.problem,
        }
    }

    pub fn problem<P2>(self, problem: P2) -> DpCacheBuilder<B, P2> {
        DpCacheBuilder {
            backend: self.backend,
            problem,
        }
    }

    pub fn build<I, K>(self) -> DpCache<I, K, B, P>
    where
        I: Clone + PartialEq,
        K: Clone,
        B: Backend<I, K>,
        P: DpProblem<I, K>,
    {
        DpCache::with_problem(self.backend, self.problem)
    }
}
