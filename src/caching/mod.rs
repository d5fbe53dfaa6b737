//! # Caching Module
//!
//! Memoizes penalty evaluations by chromosome content. Elites are carried into
//! every generation unchanged and a converging population holds many identical
//! chromosomes, so the same gene vector is scored over and over.
//!
//! A cache lives only as long as the evaluator it wraps, which the evolution loop
//! creates per run; breakdowns from one catalog are never reused for another.
//! Each cache holds at most its capacity ([`DEFAULT_CACHE_CAPACITY`] unless set)
//! and is emptied when an insert would exceed it.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::chromosome::Chromosome;
use crate::fitness::{Evaluator, PenaltyBreakdown};

/// Entries a cache keeps before it is emptied.
pub const DEFAULT_CACHE_CAPACITY: usize = 4096;

fn insert_bounded(
    cache: &mut HashMap<Chromosome, PenaltyBreakdown>,
    capacity: usize,
    key: Chromosome,
    value: PenaltyBreakdown,
) {
    if cache.len() >= capacity && !cache.contains_key(&key) {
        cache.clear();
    }
    cache.insert(key, value);
}

/// An evaluator wrapper with one mutex-protected cache shared by all threads.
#[derive(Debug, Clone)]
pub struct CachedEvaluator<E>
where
    E: Evaluator,
{
    evaluator: E,
    cache: Arc<Mutex<HashMap<Chromosome, PenaltyBreakdown>>>,
    capacity: usize,
}

impl<E> CachedEvaluator<E>
where
    E: Evaluator,
{
    pub fn new(evaluator: E) -> Self {
        Self::with_capacity(evaluator, DEFAULT_CACHE_CAPACITY)
    }

    /// Wraps `evaluator` with a cache of at most `capacity` entries (at least one).
    pub fn with_capacity(evaluator: E, capacity: usize) -> Self {
        Self {
            evaluator,
            cache: Arc::new(Mutex::new(HashMap::new())),
            capacity: capacity.max(1),
        }
    }

    /// Returns a reference to the wrapped evaluator.
    pub fn inner(&self) -> &E {
        &self.evaluator
    }

    /// Returns the number of cached evaluations.
    pub fn cache_size(&self) -> usize {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn clear_cache(&self) {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl<E> Evaluator for CachedEvaluator<E>
where
    E: Evaluator,
{
    fn evaluate(&self, chromosome: &Chromosome) -> PenaltyBreakdown {
        if let Some(hit) = self
            .cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(chromosome)
        {
            return *hit;
        }

        // evaluated outside the lock so other workers are not serialized behind it
        let breakdown = self.evaluator.evaluate(chromosome);
        insert_bounded(
            &mut self.cache.lock().unwrap_or_else(PoisonError::into_inner),
            self.capacity,
            chromosome.clone(),
            breakdown,
        );
        breakdown
    }
}

/// A per-thread cache of evaluations.
///
/// Each rayon worker fills its own map, so there is no lock contention at the cost
/// of recomputing entries another thread already holds.
#[derive(Debug)]
pub struct ThreadLocalCache {
    cache: thread_local::ThreadLocal<RefCell<HashMap<Chromosome, PenaltyBreakdown>>>,
    capacity: usize,
}

impl Default for ThreadLocalCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ThreadLocalCache {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }

    /// A cache holding at most `capacity` entries (at least one) per thread.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cache: thread_local::ThreadLocal::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn get(&self, key: &Chromosome) -> Option<PenaltyBreakdown> {
        self.cache
            .get()
            .and_then(|cell| cell.try_borrow().ok())
            .and_then(|cache| cache.get(key).copied())
    }

    pub fn insert(&self, key: Chromosome, value: PenaltyBreakdown) {
        let cell = self.cache.get_or(|| RefCell::new(HashMap::new()));
        if let Ok(mut cache) = cell.try_borrow_mut() {
            insert_bounded(&mut cache, self.capacity, key, value);
        }
    }

    /// Clears the cache for the current thread.
    pub fn clear(&self) {
        if let Some(cell) = self.cache.get() {
            if let Ok(mut cache) = cell.try_borrow_mut() {
                cache.clear();
            }
        }
    }

    /// Returns the number of cached evaluations for the current thread.
    pub fn len(&self) -> usize {
        self.cache
            .get()
            .and_then(|cell| cell.try_borrow().ok())
            .map_or(0, |cache| cache.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An evaluator wrapper backed by a [`ThreadLocalCache`].
#[derive(Debug, Clone)]
pub struct ThreadLocalCachedEvaluator<E>
where
    E: Evaluator,
{
    evaluator: E,
    cache: Arc<ThreadLocalCache>,
}

impl<E> ThreadLocalCachedEvaluator<E>
where
    E: Evaluator,
{
    pub fn new(evaluator: E) -> Self {
        Self::with_capacity(evaluator, DEFAULT_CACHE_CAPACITY)
    }

    /// Wraps `evaluator` with per-thread caches of at most `capacity` entries.
    pub fn with_capacity(evaluator: E, capacity: usize) -> Self {
        Self {
            evaluator,
            cache: Arc::new(ThreadLocalCache::with_capacity(capacity)),
        }
    }

    pub fn inner(&self) -> &E {
        &self.evaluator
    }

    /// Returns the number of cached evaluations for the current thread.
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

impl<E> Evaluator for ThreadLocalCachedEvaluator<E>
where
    E: Evaluator,
{
    fn evaluate(&self, chromosome: &Chromosome) -> PenaltyBreakdown {
        if let Some(hit) = self.cache.get(chromosome) {
            return hit;
        }
        let breakdown = self.evaluator.evaluate(chromosome);
        self.cache.insert(chromosome.clone(), breakdown);
        breakdown
    }
}
