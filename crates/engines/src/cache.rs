//! Bounded LRU cache of computed field solutions.
//!
//! Keys are the exact evaluator input tuple (resolution, theta, speed,
//! geometry, mirror range, tolerance, sentinel), with float components
//! compared by their bit patterns, so a hit means the inputs were identical,
//! not merely close. The cache belongs to the caller (the animation loop);
//! the evaluator itself stays pure and cache-free.

use cornerfield_core::error::FieldError;
use cornerfield_unfold::{solve, FieldSolution, UnfoldParams};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

/// Default number of retained solutions. A full theta sweep at the default
/// step (0.1 rad) is 63 distinct frames, so a sweep-sized cache makes a
/// wrapped-around animation fully hit.
pub const DEFAULT_CACHE_CAPACITY: usize = 64;

/// Exact-match cache key for one evaluator invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldKey {
    resolution: usize,
    theta: u64,
    speed: u64,
    outer_width: u64,
    outer_height: u64,
    logo_width: u64,
    logo_height: u64,
    mirror_range: usize,
    tolerance: u64,
    sentinel: u64,
}

impl FieldKey {
    /// Builds the key for `(resolution, params)`.
    pub fn new(resolution: usize, params: &UnfoldParams) -> Self {
        Self {
            resolution,
            theta: params.theta.to_bits(),
            speed: params.speed.to_bits(),
            outer_width: params.rectangle.outer_width.to_bits(),
            outer_height: params.rectangle.outer_height.to_bits(),
            logo_width: params.rectangle.logo_width.to_bits(),
            logo_height: params.rectangle.logo_height.to_bits(),
            mirror_range: params.mirror_range,
            tolerance: params.tolerance.to_bits(),
            sentinel: params.sentinel.to_bits(),
        }
    }
}

/// Bounded least-recently-used cache of `FieldKey -> Arc<FieldSolution>`.
///
/// Hits are O(1) and allocation-free (the stored `Arc` is cloned); the
/// recency list is a `VecDeque` scanned on promotion, which is fine at the
/// tens-of-entries capacities this cache runs at.
pub struct FieldCache {
    capacity: usize,
    map: HashMap<FieldKey, Arc<FieldSolution>>,
    /// Recency order, least recently used at the front.
    order: VecDeque<FieldKey>,
}

impl FieldCache {
    /// Creates a cache retaining at most `capacity` solutions (minimum 1).
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            map: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    /// Number of cached solutions.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// True when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Looks up a solution, promoting it to most recently used on a hit.
    pub fn get(&mut self, key: &FieldKey) -> Option<Arc<FieldSolution>> {
        let solution = self.map.get(key)?.clone();
        self.promote(key);
        Some(solution)
    }

    /// Inserts a solution, evicting the least recently used entry if full.
    pub fn insert(&mut self, key: FieldKey, solution: Arc<FieldSolution>) {
        if self.map.insert(key, solution).is_some() {
            self.promote(&key);
            return;
        }
        self.order.push_back(key);
        while self.map.len() > self.capacity {
            if let Some(evicted) = self.order.pop_front() {
                self.map.remove(&evicted);
            }
        }
    }

    /// Returns the cached solution for `(resolution, params)`, computing and
    /// caching it on a miss. At most one computation happens per distinct key
    /// while the entry stays resident.
    pub fn get_or_solve(
        &mut self,
        resolution: usize,
        params: &UnfoldParams,
    ) -> Result<Arc<FieldSolution>, FieldError> {
        let key = FieldKey::new(resolution, params);
        if let Some(hit) = self.get(&key) {
            return Ok(hit);
        }
        let solution = Arc::new(solve(resolution, params)?);
        self.insert(key, solution.clone());
        Ok(solution)
    }

    /// Moves `key` to the most-recently-used position.
    fn promote(&mut self, key: &FieldKey) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            self.order.remove(pos);
            self.order.push_back(*key);
        }
    }
}
