//! Recycler for short-lived entities
//!
//! Each entity kind gets its own `Pool<T>`, so bullets and enemies can never
//! end up in each other's free list. A pool only keeps *dead* instances; live
//! ones belong to the registry.

/// Which pool an instance belongs to (for logs and stats)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Bullet,
    Enemy,
}

/// An entity that can be recycled through a [`Pool`]
pub trait Poolable {
    const KIND: EntityKind;

    /// Build a brand new instance (pool was empty)
    fn create() -> Self;

    /// Clear state that must not survive into the next life.
    ///
    /// Only visual/bookkeeping state is reset here; spawners still overwrite
    /// position, direction and health before the instance goes live.
    fn reset(&mut self);

    fn set_alive(&mut self, alive: bool);
}

/// Pool usage counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Instances built because the pool was empty
    pub created: u64,
    /// Instances handed out again from the free list
    pub recycled: u64,
    /// Released instances dropped because the pool was full
    pub discarded: u64,
}

#[derive(Debug)]
pub struct Pool<T: Poolable> {
    free: Vec<T>,
    capacity: usize,
    stats: PoolStats,
}

impl<T: Poolable> Pool<T> {
    /// Create a pool retaining at most `capacity` dead instances
    pub fn new(capacity: usize) -> Self {
        Self {
            free: Vec::with_capacity(capacity),
            capacity,
            stats: PoolStats::default(),
        }
    }

    /// Take a recycled instance, or build one when none are free
    pub fn acquire(&mut self) -> T {
        let mut item = match self.free.pop() {
            Some(mut item) => {
                self.stats.recycled += 1;
                item.reset();
                item
            }
            None => {
                self.stats.created += 1;
                T::create()
            }
        };
        item.set_alive(true);
        item
    }

    /// Return a dead instance. Returns false when the pool is full and the
    /// instance was dropped instead.
    pub fn release(&mut self, mut item: T) -> bool {
        item.set_alive(false);
        if self.free.len() < self.capacity {
            self.free.push(item);
            true
        } else {
            self.stats.discarded += 1;
            log::debug!("{:?} pool full ({}), discarding instance", T::KIND, self.capacity);
            false
        }
    }

    /// Number of dead instances ready for reuse
    #[inline]
    pub fn available(&self) -> usize {
        self.free.len()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn stats(&self) -> PoolStats {
        self.stats
    }
}
