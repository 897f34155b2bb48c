//! Core pool engine and the lease guard

use crate::config::PoolConfig;
use crate::errors::{PoolError, PoolResult};
use crate::registry::RegistryInner;
use crate::resource::{Poolable, ResourceStats};

use crossbeam::queue::SegQueue;
use parking_lot::Mutex;
use std::any::TypeId;
use std::ops::{Deref, DerefMut};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tracing::{debug, info, warn};

/// State shared between a pool handle, its clones, and outstanding leases.
pub(crate) struct PoolShared<R: Poolable> {
    /// Live resources in FIFO reuse order. Pushes and pops are individually
    /// atomic; the queue is deliberately unbounded because `max_capacity` is
    /// a soft target enforced on return, not by the queue itself.
    queue: SegQueue<(R, ResourceStats)>,
    config: PoolConfig,
    /// Reserved duplication source, `Some` iff `cloning` is enabled.
    /// Never queued and never leased.
    prototype: Mutex<Option<R>>,
    /// Registry that created this pool, if any; used by `destroy` to
    /// deregister.
    registry: Weak<RegistryInner>,
}

impl<R: Poolable> PoolShared<R> {
    fn size(&self) -> usize {
        self.queue.len()
    }

    fn is_full(&self) -> bool {
        self.config.max_capacity != 0 && self.size() as i64 >= self.config.max_capacity
    }

    /// Build a new resource, via prototype duplication when cloning is
    /// enabled. After `destroy` the prototype slot is empty and cloning
    /// pools fall back to full construction.
    fn create_resource(&self) -> R {
        if self.config.cloning
            && let Some(prototype) = self.prototype.lock().as_ref()
        {
            return prototype.duplicate();
        }
        R::create()
    }

    fn cleanup_resource(&self, resource: &mut R, stats: &ResourceStats) {
        if R::HAS_CLEANUP {
            resource.clean_up(stats);
        }
    }

    fn expired_by_reuse(&self, stats: &ResourceStats) -> bool {
        let expired = self.config.max_reusable != 0 && stats.count >= self.config.max_reusable;
        if expired {
            debug!(
                pool = R::label(),
                count = stats.count,
                "resource expired by usage count"
            );
        }
        expired
    }

    fn expired_by_age(&self, stats: &ResourceStats) -> bool {
        let expired = self.config.expire_secs != 0
            && stats.created_at.elapsed() > Duration::from_secs(self.config.expire_secs);
        if expired {
            debug!(
                pool = R::label(),
                age_secs = stats.created_at.elapsed().as_secs(),
                "resource expired by age"
            );
        }
        expired
    }

    /// Validation checkpoint shared by the pre-check (borrow) and post-check
    /// (return) paths. Updates the stats, then either keeps the instance or
    /// retires it and builds a replacement.
    fn revalidate(&self, resource: R, mut stats: ResourceStats) -> (R, ResourceStats) {
        stats.mark_used();

        let invalid_custom = R::HAS_VALIDITY_CHECK && resource.is_invalid(&stats);
        let invalid_internal = self.expired_by_reuse(&stats) || self.expired_by_age(&stats);

        if invalid_custom || invalid_internal {
            let mut retired = resource;
            self.cleanup_resource(&mut retired, &stats);
            drop(retired);
            (self.create_resource(), ResourceStats::recycled())
        } else {
            (resource, stats)
        }
    }

    /// Borrow path: pop the front pair, validating when configured. An empty
    /// queue never blocks; a brand-new resource is synthesized instead and
    /// bypasses validation entirely.
    fn take_resource(&self) -> (R, ResourceStats) {
        match self.queue.pop() {
            Some((resource, stats)) => {
                if self.config.pre_check {
                    self.revalidate(resource, stats)
                } else {
                    (resource, stats)
                }
            }
            None => (self.create_resource(), ResourceStats::fresh()),
        }
    }

    /// Return path: re-queue when there is room, validating when configured;
    /// discard-and-clean-up when the pool is full. An overflow resource is
    /// never validated.
    fn give_back(&self, resource: R, stats: ResourceStats) {
        if self.is_full() {
            debug!(pool = R::label(), "pool full, discarding returned resource");
            let mut discarded = resource;
            self.cleanup_resource(&mut discarded, &stats);
        } else {
            let (resource, stats) = if self.config.post_check {
                self.revalidate(resource, stats)
            } else {
                (resource, stats)
            };
            self.queue.push((resource, stats));
        }
    }
}

/// A singleton engine managing one resource type's reusable instances.
///
/// The pool owns a thread-safe FIFO of `(resource, stats)` pairs and all
/// lifecycle policy: eager or lazy construction, two validation checkpoints,
/// reuse-count and age expiry, soft capacity, and cleanup. Handles are cheap
/// to clone and share the same underlying pool.
///
/// `max_capacity` is advisory: compound check-then-act sequences are not
/// atomic as a whole, so concurrent returns can transiently exceed it and
/// concurrent borrows against an emptying queue can each construct a new
/// resource. That trade keeps every operation non-blocking.
///
/// # Examples
///
/// ```
/// use repool::{ObjectPool, PoolConfig, Poolable};
///
/// struct Session;
///
/// impl Poolable for Session {
///     fn create() -> Self {
///         Session
///     }
/// }
///
/// let pool = ObjectPool::<Session>::new(PoolConfig::default()).unwrap();
/// assert_eq!(pool.size(), 3);
///
/// {
///     let lease = pool.acquire();
///     assert_eq!(lease.stats().count, 0);
///     // returned to the pool when `lease` goes out of scope
/// }
///
/// assert_eq!(pool.size(), 3);
/// ```
pub struct ObjectPool<R: Poolable> {
    shared: Arc<PoolShared<R>>,
}

impl<R: Poolable> std::fmt::Debug for ObjectPool<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectPool")
            .field("size", &self.shared.size())
            .finish_non_exhaustive()
    }
}

impl<R: Poolable> Clone for ObjectPool<R> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<R: Poolable> ObjectPool<R> {
    /// Create a standalone pool, not registered anywhere.
    ///
    /// # Errors
    ///
    /// - [`PoolError::InvalidResourceType`] if `R::label()` is empty.
    /// - [`PoolError::InvalidMinInitCapacity`] if `min_init <= 0` with
    ///   `lazy` disabled.
    /// - [`PoolError::InvalidMaxCapacity`] if `max_capacity` is negative.
    pub fn new(config: PoolConfig) -> PoolResult<Self> {
        Self::with_registry(config, Weak::new())
    }

    pub(crate) fn with_registry(
        config: PoolConfig,
        registry: Weak<RegistryInner>,
    ) -> PoolResult<Self> {
        let name = R::label();
        if name.is_empty() {
            return Err(PoolError::InvalidResourceType {
                type_name: name.to_string(),
            });
        }

        if config.min_init <= 0 && !config.lazy {
            return Err(PoolError::InvalidMinInitCapacity {
                pool_name: name.to_string(),
            });
        }

        if config.max_capacity < 0 {
            return Err(PoolError::InvalidMaxCapacity {
                pool_name: name.to_string(),
            });
        }

        if config.max_capacity == 0 {
            info!(pool = name, "pool capacity is unbounded");
        }

        if config.expire_secs == 0 {
            info!(pool = name, "resources never expire");
        }

        if !R::HAS_CLEANUP {
            warn!(
                pool = name,
                "resource type has no cleanup capability; discarded resources \
                 will leak external state"
            );
        }

        // The prototype is built before anything else so that even lazy
        // pools pay the construction cost exactly once.
        let prototype = if config.cloning {
            Mutex::new(Some(R::create()))
        } else {
            Mutex::new(None)
        };

        let shared = PoolShared {
            queue: SegQueue::new(),
            config,
            prototype,
            registry,
        };

        if shared.config.lazy {
            info!(pool = name, "lazy pool, resources are created on borrow");
        } else {
            for _ in 0..shared.config.min_init {
                let resource = shared.create_resource();
                shared.queue.push((resource, ResourceStats::fresh()));
            }
        }

        info!(pool = name, size = shared.size(), "pool created");

        Ok(Self {
            shared: Arc::new(shared),
        })
    }

    pub(crate) fn from_shared(shared: Arc<PoolShared<R>>) -> Self {
        Self { shared }
    }

    pub(crate) fn shared(&self) -> &Arc<PoolShared<R>> {
        &self.shared
    }

    /// Current queue length. Under concurrent access this is a transient
    /// snapshot, not a stable count.
    pub fn size(&self) -> usize {
        self.shared.size()
    }

    /// Whether the queue has reached `max_capacity`. Always false for
    /// unbounded pools.
    pub fn is_full(&self) -> bool {
        self.shared.is_full()
    }

    /// Borrow a resource, wrapped in a [`Lease`] that returns it on drop.
    ///
    /// Never blocks and never fails: when the queue is empty a brand-new
    /// resource is constructed for the caller. With `pre_check` enabled a
    /// queued resource is validated (and possibly replaced) before it is
    /// handed out.
    pub fn acquire(&self) -> Lease<R> {
        let (resource, stats) = self.shared.take_resource();
        Lease {
            shared: Arc::clone(&self.shared),
            entry: Some((resource, stats)),
        }
    }

    /// Drain the pool, cleaning up every queued resource and the cloning
    /// prototype, then deregister from the owning registry.
    ///
    /// Outstanding leases are unaffected; their resources go through the
    /// normal return path when dropped. A pool handle used after `destroy`
    /// behaves like an empty pool and rebuilds resources on demand.
    pub fn destroy(&self) {
        let mut drained = 0usize;
        while let Some((mut resource, stats)) = self.shared.queue.pop() {
            self.shared.cleanup_resource(&mut resource, &stats);
            drained += 1;
        }

        if let Some(mut prototype) = self.shared.prototype.lock().take() {
            let stats = ResourceStats::fresh();
            self.shared.cleanup_resource(&mut prototype, &stats);
        }

        if let Some(registry) = self.shared.registry.upgrade() {
            registry.deregister(TypeId::of::<R>());
        }

        info!(pool = R::label(), drained, "pool destroyed");
    }
}

/// A scoped borrow of one pooled resource.
///
/// Dereferences to the resource and exposes its [`ResourceStats`]. Dropping
/// the lease returns the resource to the pool unconditionally, whether the
/// scope ended normally, returned early, or panicked. All return-side policy
/// (soft capacity, post-check validation) lives in the pool; the lease
/// performs none itself.
pub struct Lease<R: Poolable> {
    shared: Arc<PoolShared<R>>,
    entry: Option<(R, ResourceStats)>,
}

impl<R: Poolable> Lease<R> {
    /// Usage statistics for the borrowed resource.
    pub fn stats(&self) -> &ResourceStats {
        &self.entry.as_ref().expect("lease already released").1
    }
}

impl<R: Poolable> Deref for Lease<R> {
    type Target = R;

    fn deref(&self) -> &Self::Target {
        &self.entry.as_ref().expect("lease already released").0
    }
}

impl<R: Poolable> DerefMut for Lease<R> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.entry.as_mut().expect("lease already released").0
    }
}

impl<R: Poolable> Drop for Lease<R> {
    fn drop(&mut self) {
        if let Some((resource, stats)) = self.entry.take() {
            self.shared.give_back(resource, stats);
        }
    }
}
