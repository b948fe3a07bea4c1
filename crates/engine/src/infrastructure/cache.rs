//! Bounded per-world queues of pre-vetted teleport locations.
//!
//! Entries remember when they were vetted; consumers decide whether an entry
//! is still fresh enough to use. Push and pop lock only the world's own queue.

use std::collections::VecDeque;
use std::time::Duration;

use dashmap::DashMap;
use tokio::time::Instant;
use wildwarp_domain::{BlockPos, WorldName};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CachedLocation {
    pub pos: BlockPos,
    pub cached_at: Instant,
}

impl CachedLocation {
    pub fn age(&self) -> Duration {
        self.cached_at.elapsed()
    }
}

pub struct LocationCache {
    queues: DashMap<WorldName, VecDeque<CachedLocation>>,
    capacity: usize,
}

impl LocationCache {
    /// Capacity used when nothing else is configured.
    pub const DEFAULT_CAPACITY: usize = 10;

    pub fn new(capacity: usize) -> Self {
        Self {
            queues: DashMap::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Appends a vetted location. Returns `false` when the queue is full.
    pub fn push(&self, world: &WorldName, pos: BlockPos) -> bool {
        self.push_at(world, pos, Instant::now())
    }

    fn push_at(&self, world: &WorldName, pos: BlockPos, cached_at: Instant) -> bool {
        let mut queue = self.queues.entry(world.clone()).or_default();
        if queue.len() >= self.capacity {
            return false;
        }
        queue.push_back(CachedLocation { pos, cached_at });
        true
    }

    /// Takes the oldest entry of the world's queue.
    pub fn pop(&self, world: &WorldName) -> Option<CachedLocation> {
        self.queues.get_mut(world)?.pop_front()
    }

    pub fn len(&self, world: &WorldName) -> usize {
        self.queues.get(world).map_or(0, |q| q.len())
    }

    pub fn is_full(&self, world: &WorldName) -> bool {
        self.len(world) >= self.capacity
    }

    /// Drops the queues of worlds for which `keep` is false.
    pub fn retain_worlds(&self, keep: impl Fn(&WorldName) -> bool) {
        self.queues.retain(|world, _| keep(world));
    }
}

impl Default for LocationCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
