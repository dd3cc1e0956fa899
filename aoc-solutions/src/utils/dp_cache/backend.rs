//! Storage backends for the DP cache.

use std::collections::HashMap;
use std::hash::Hash;

/// Where computed values live.
///
/// `insert` is only called for indices whose `get` returned `None`.
pub trait Backend<I, K> {
    fn get(&self, index: &I) -> Option<&K>;

    fn insert(&mut self, index: I, value: K);

    /// Number of stored values.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Dense storage for `usize` indices starting at 0; grows on insert.
#[derive(Debug)]
pub struct VecBackend<K> {
    data: Vec<Option<K>>,
    filled: usize,
}

impl<K> VecBackend<K> {
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            filled: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            filled: 0,
        }
    }
}

impl<K> Default for VecBackend<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Backend<usize, K> for VecBackend<K> {
    fn get(&self, index: &usize) -> Option<&K> {
        self.data.get(*index)?.as_ref()
    }

    fn insert(&mut self, index: usize, value: K) {
        if index >= self.data.len() {
            self.data.resize_with(index + 1, || None);
        }
        if self.data[index].replace(value).is_none() {
            self.filled += 1;
        }
    }

    fn len(&self) -> usize {
        self.filled
    }
}

/// Sparse storage for any hashable index.
#[derive(Debug)]
pub struct HashMapBackend<I, K> {
    data: HashMap<I, K>,
}

impl<I, K> HashMapBackend<I, K> {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: HashMap::with_capacity(capacity),
        }
    }
}

impl<I, K> Default for HashMapBackend<I, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Hash + Eq, K> Backend<I, K> for HashMapBackend<I, K> {
    fn get(&self, index: &I) -> Option<&K> {
        self.data.get(index)
    }

    fn insert(&mut self, index: I, value: K) {
        self.data.insert(index, value);
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}
