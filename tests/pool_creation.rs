//! Construction-time behavior: defaults, validation errors, laziness,
//! cloning eagerness.

use repool::{ObjectPool, PoolConfig, PoolError, Poolable, PoolRegistry, ResourceStats};
use std::sync::atomic::{AtomicUsize, Ordering};

struct Browser;

impl Poolable for Browser {
    fn create() -> Self {
        Browser
    }
}

#[test]
fn default_configuration_builds_min_init_resources() {
    let pool = ObjectPool::<Browser>::new(PoolConfig::default()).unwrap();
    assert_eq!(pool.size(), 3);
    assert!(!pool.is_full());
}

#[test]
fn lazy_pool_defers_all_construction() {
    static CREATED: AtomicUsize = AtomicUsize::new(0);

    struct LazyBrowser;
    impl Poolable for LazyBrowser {
        fn create() -> Self {
            CREATED.fetch_add(1, Ordering::SeqCst);
            LazyBrowser
        }
    }

    let pool = ObjectPool::<LazyBrowser>::new(PoolConfig::new().with_lazy(true)).unwrap();
    assert_eq!(pool.size(), 0);
    assert_eq!(CREATED.load(Ordering::SeqCst), 0);

    let lease = pool.acquire();
    assert!(lease.stats().is_new);
    assert_eq!(CREATED.load(Ordering::SeqCst), 1);
}

#[test]
fn min_init_of_zero_without_lazy_fails() {
    let err = ObjectPool::<Browser>::new(PoolConfig::new().with_min_init(0)).unwrap_err();
    assert!(matches!(err, PoolError::InvalidMinInitCapacity { .. }));
}

#[test]
fn negative_min_init_without_lazy_fails() {
    let err = ObjectPool::<Browser>::new(PoolConfig::new().with_min_init(-3)).unwrap_err();
    assert!(matches!(err, PoolError::InvalidMinInitCapacity { .. }));
}

#[test]
fn min_init_of_zero_with_lazy_is_accepted() {
    let pool = ObjectPool::<Browser>::new(
        PoolConfig::new().with_min_init(0).with_lazy(true),
    )
    .unwrap();
    assert_eq!(pool.size(), 0);
}

#[test]
fn negative_max_capacity_fails() {
    let err = ObjectPool::<Browser>::new(PoolConfig::new().with_max_capacity(-1)).unwrap_err();
    assert!(matches!(err, PoolError::InvalidMaxCapacity { .. }));
}

#[test]
fn zero_max_capacity_means_unbounded() {
    let pool = ObjectPool::<Browser>::new(
        PoolConfig::new().with_min_init(3).with_max_capacity(0),
    )
    .unwrap();
    assert_eq!(pool.size(), 3);
    assert!(!pool.is_full());
}

#[test]
fn unnamed_resource_type_fails() {
    struct Anonymous;
    impl Poolable for Anonymous {
        fn create() -> Self {
            Anonymous
        }
        fn label() -> &'static str {
            ""
        }
    }

    let err = ObjectPool::<Anonymous>::new(PoolConfig::default()).unwrap_err();
    assert!(matches!(err, PoolError::InvalidResourceType { .. }));
}

#[test]
fn missing_cleanup_capability_is_tolerated() {
    // Degraded configuration: construction succeeds, only a warning is
    // logged.
    let pool = ObjectPool::<Browser>::new(PoolConfig::new().with_min_init(1)).unwrap();
    let lease = pool.acquire();
    drop(lease);
    assert_eq!(pool.size(), 1);
}

#[test]
fn cloning_builds_prototype_even_when_lazy() {
    static CREATED: AtomicUsize = AtomicUsize::new(0);
    static DUPLICATED: AtomicUsize = AtomicUsize::new(0);

    struct Template;
    impl Poolable for Template {
        fn create() -> Self {
            CREATED.fetch_add(1, Ordering::SeqCst);
            Template
        }
        fn duplicate(&self) -> Self {
            DUPLICATED.fetch_add(1, Ordering::SeqCst);
            Template
        }
    }

    let pool = ObjectPool::<Template>::new(
        PoolConfig::new().with_lazy(true).with_cloning(true),
    )
    .unwrap();

    // Only the prototype was constructed; the pool itself is empty.
    assert_eq!(pool.size(), 0);
    assert_eq!(CREATED.load(Ordering::SeqCst), 1);
    assert_eq!(DUPLICATED.load(Ordering::SeqCst), 0);

    // First borrow duplicates the prototype instead of full construction.
    let lease = pool.acquire();
    assert_eq!(CREATED.load(Ordering::SeqCst), 1);
    assert_eq!(DUPLICATED.load(Ordering::SeqCst), 1);
    drop(lease);
}

#[test]
fn destroy_cleans_up_cloning_prototype() {
    static PROTO_CLEANED: AtomicUsize = AtomicUsize::new(0);

    struct Template;
    impl Poolable for Template {
        const HAS_CLEANUP: bool = true;
        fn create() -> Self {
            Template
        }
        fn duplicate(&self) -> Self {
            Template
        }
        fn clean_up(&mut self, _stats: &ResourceStats) {
            PROTO_CLEANED.fetch_add(1, Ordering::SeqCst);
        }
    }

    let pool = ObjectPool::<Template>::new(
        PoolConfig::new().with_lazy(true).with_cloning(true),
    )
    .unwrap();
    pool.destroy();

    // Queue was empty, so the single cleanup is the prototype's.
    assert_eq!(PROTO_CLEANED.load(Ordering::SeqCst), 1);
}

#[test]
fn registry_propagates_construction_errors() {
    struct Flawed;
    impl Poolable for Flawed {
        fn create() -> Self {
            Flawed
        }
    }

    let registry = PoolRegistry::new();
    let err = registry
        .get_or_create::<Flawed>(PoolConfig::new().with_max_capacity(-5))
        .unwrap_err();

    assert!(matches!(err, PoolError::InvalidMaxCapacity { .. }));
    assert!(!registry.exists::<Flawed>());
}
