//! Per-type singleton pool registry

use crate::config::PoolConfig;
use crate::errors::PoolResult;
use crate::pool::{ObjectPool, PoolShared};
use crate::resource::Poolable;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::any::{Any, TypeId};
use std::sync::{Arc, OnceLock};
use tracing::debug;

/// Registry state shared with the pools it creates, so `destroy` can
/// deregister through a weak back-reference.
pub(crate) struct RegistryInner {
    pools: DashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl RegistryInner {
    pub(crate) fn deregister(&self, type_id: TypeId) {
        self.pools.remove(&type_id);
    }
}

/// A mapping from resource-type identity to its singleton [`ObjectPool`].
///
/// At most one pool per resource type exists in a registry at any time.
/// Most callers use the process-wide [`PoolRegistry::global`] instance;
/// separate registries are occasionally useful in tests or when two
/// subsystems must not share pools.
///
/// # Examples
///
/// ```
/// use repool::{PoolConfig, PoolRegistry, Poolable};
///
/// struct Session;
/// impl Poolable for Session {
///     fn create() -> Self {
///         Session
///     }
/// }
///
/// let registry = PoolRegistry::new();
/// assert!(!registry.exists::<Session>());
///
/// let pool = registry.get_or_create::<Session>(PoolConfig::default()).unwrap();
/// assert!(registry.exists::<Session>());
/// assert_eq!(pool.size(), 3);
///
/// pool.destroy();
/// assert!(!registry.exists::<Session>());
/// ```
pub struct PoolRegistry {
    inner: Arc<RegistryInner>,
}

static GLOBAL: OnceLock<PoolRegistry> = OnceLock::new();

impl PoolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RegistryInner {
                pools: DashMap::new(),
            }),
        }
    }

    /// The process-wide registry.
    pub fn global() -> &'static PoolRegistry {
        GLOBAL.get_or_init(PoolRegistry::new)
    }

    /// Return the pool registered for `R`, creating it with `config` on the
    /// first call.
    ///
    /// When a pool for `R` already exists it is returned unchanged and the
    /// supplied configuration is ignored; reconfiguring a live pool is not
    /// supported. Construction errors propagate unchanged and leave nothing
    /// registered.
    ///
    /// Concurrent first calls for the same type are serialized on the map
    /// entry, so exactly one pool is ever created per type.
    pub fn get_or_create<R: Poolable>(&self, config: PoolConfig) -> PoolResult<ObjectPool<R>> {
        match self.inner.pools.entry(TypeId::of::<R>()) {
            Entry::Occupied(entry) => {
                debug!(
                    pool = R::label(),
                    "pool already registered, supplied configuration ignored"
                );
                let Ok(shared) = Arc::clone(entry.get()).downcast::<PoolShared<R>>() else {
                    unreachable!("registry entry does not match its TypeId key");
                };
                Ok(ObjectPool::from_shared(shared))
            }
            Entry::Vacant(slot) => {
                let pool = ObjectPool::<R>::with_registry(config, Arc::downgrade(&self.inner))?;
                slot.insert(Arc::clone(pool.shared()) as Arc<dyn Any + Send + Sync>);
                Ok(pool)
            }
        }
    }

    /// Whether a pool for `R` is currently registered.
    pub fn exists<R: Poolable>(&self) -> bool {
        self.inner.pools.contains_key(&TypeId::of::<R>())
    }

    /// Unregister the pool for `R`, if any.
    ///
    /// Only removes the registry entry; queued resources are not cleaned up.
    /// Use [`ObjectPool::destroy`] to drain and deregister in one step.
    pub fn remove<R: Poolable>(&self) {
        self.inner.pools.remove(&TypeId::of::<R>());
    }
}

impl Default for PoolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
