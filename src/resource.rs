//! The resource-type contract and per-resource usage statistics

use std::time::Instant;

/// Contract a resource type must satisfy to be managed by a pool.
///
/// Only [`create`](Poolable::create) is required. The validity check and
/// cleanup hooks are optional capabilities: a type advertises them through
/// the associated consts, and the pool consults those flags once instead of
/// probing methods on every call. Leaving [`HAS_CLEANUP`](Poolable::HAS_CLEANUP)
/// unset is tolerated but logged as a degraded configuration, since discarded
/// resources then leak whatever external state they hold.
///
/// # Examples
///
/// ```
/// use repool::{Poolable, ResourceStats};
///
/// struct Connection {
///     endpoint: String,
/// }
///
/// impl Poolable for Connection {
///     const HAS_CLEANUP: bool = true;
///
///     fn create() -> Self {
///         Connection { endpoint: "localhost:5432".into() }
///     }
///
///     fn clean_up(&mut self, _stats: &ResourceStats) {
///         // close sockets, terminate sessions, ...
///     }
/// }
/// ```
pub trait Poolable: Send + Sized + 'static {
    /// Whether [`is_invalid`](Poolable::is_invalid) is meaningful for this type.
    const HAS_VALIDITY_CHECK: bool = false;

    /// Whether [`clean_up`](Poolable::clean_up) is meaningful for this type.
    const HAS_CLEANUP: bool = false;

    /// Construct one live resource instance.
    fn create() -> Self;

    /// Stable display identity for this resource type, used in errors and
    /// log events. An empty label is rejected at pool construction.
    fn label() -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Custom validity check, consulted during pre/post validation when
    /// [`HAS_VALIDITY_CHECK`](Poolable::HAS_VALIDITY_CHECK) is set.
    /// Returning `true` means "this instance must be retired now".
    fn is_invalid(&self, _stats: &ResourceStats) -> bool {
        false
    }

    /// Release external state held by this instance (close a connection,
    /// terminate a session). Called when the instance is retired, discarded
    /// on overflow, or drained by [`ObjectPool::destroy`](crate::ObjectPool::destroy),
    /// provided [`HAS_CLEANUP`](Poolable::HAS_CLEANUP) is set.
    fn clean_up(&mut self, _stats: &ResourceStats) {}

    /// Produce an independent duplicate of this instance.
    ///
    /// Consumed only when the pool is configured with `cloning`; the default
    /// falls back to fresh construction. Types that enable cloning should
    /// override this with a cheap copy of the prototype.
    fn duplicate(&self) -> Self {
        Self::create()
    }
}

/// Usage statistics attached 1:1 to a live resource, while queued and while
/// leased.
#[derive(Debug, Clone)]
pub struct ResourceStats {
    /// Number of completed reuse cycles; 0 at creation.
    pub count: u64,

    /// True only immediately after first construction; false after any
    /// reuse or replacement.
    pub is_new: bool,

    /// When the instance was constructed. Age expiry is measured from here.
    pub created_at: Instant,

    /// When the instance last went through a validation checkpoint.
    pub last_used: Instant,
}

impl ResourceStats {
    /// Stats for a freshly constructed resource.
    pub fn fresh() -> Self {
        Self::with_novelty(true)
    }

    /// Stats for a replacement built after an instance was retired.
    pub fn recycled() -> Self {
        Self::with_novelty(false)
    }

    fn with_novelty(is_new: bool) -> Self {
        let now = Instant::now();
        Self {
            count: 0,
            is_new,
            created_at: now,
            last_used: now,
        }
    }

    /// Record one use: bump the reuse count, clear novelty, refresh
    /// `last_used`.
    pub(crate) fn mark_used(&mut self) {
        self.count += 1;
        self.is_new = false;
        self.last_used = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_stats_start_new_and_unused() {
        let stats = ResourceStats::fresh();
        assert_eq!(stats.count, 0);
        assert!(stats.is_new);
    }

    #[test]
    fn recycled_stats_are_not_new() {
        let stats = ResourceStats::recycled();
        assert_eq!(stats.count, 0);
        assert!(!stats.is_new);
    }

    #[test]
    fn mark_used_updates_count_and_novelty() {
        let mut stats = ResourceStats::fresh();
        stats.mark_used();
        stats.mark_used();
        assert_eq!(stats.count, 2);
        assert!(!stats.is_new);
        assert!(stats.last_used >= stats.created_at);
    }
}
