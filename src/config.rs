//! Pool configuration options

/// Configuration for pool behavior.
///
/// Capacity fields are signed so that invalid (negative) configurations are
/// representable; they are rejected at pool construction with
/// [`PoolError::InvalidMaxCapacity`](crate::PoolError::InvalidMaxCapacity) or
/// [`PoolError::InvalidMinInitCapacity`](crate::PoolError::InvalidMinInitCapacity).
/// Configuration is immutable once a pool has been constructed.
///
/// # Examples
///
/// ```
/// use repool::PoolConfig;
///
/// let config = PoolConfig::new()
///     .with_max_capacity(50)
///     .with_min_init(5)
///     .with_expire_secs(300)
///     .with_pre_check(true);
///
/// assert_eq!(config.max_capacity, 50);
/// assert_eq!(config.min_init, 5);
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Soft ceiling for the queue size; 0 means unbounded.
    ///
    /// The ceiling is advisory: a borrow against an empty pool always
    /// succeeds by constructing a new resource, and a return against a full
    /// pool discards instead of blocking.
    pub max_capacity: i64,

    /// Number of resources pre-built at construction, unless `lazy` is set.
    pub min_init: i64,

    /// Retire a resource after this many completed reuse cycles; 0 means
    /// unlimited reuse.
    pub max_reusable: u64,

    /// Retire a resource after this many seconds of age; 0 means resources
    /// never expire.
    pub expire_secs: u64,

    /// Skip eager construction of `min_init` resources.
    pub lazy: bool,

    /// Validate (and possibly replace) a resource when it is borrowed.
    pub pre_check: bool,

    /// Validate (and possibly replace) a resource when it is returned.
    pub post_check: bool,

    /// Build new resources by duplicating a reserved prototype instead of
    /// full construction.
    pub cloning: bool,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_capacity: 20,
            min_init: 3,
            max_reusable: 20,
            expire_secs: 600,
            lazy: false,
            pre_check: false,
            post_check: true,
            cloning: false,
        }
    }
}

impl PoolConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the soft capacity ceiling (0 = unbounded).
    pub fn with_max_capacity(mut self, max_capacity: i64) -> Self {
        self.max_capacity = max_capacity;
        self
    }

    /// Set the number of resources built eagerly at construction.
    pub fn with_min_init(mut self, min_init: i64) -> Self {
        self.min_init = min_init;
        self
    }

    /// Set the reuse-count retirement threshold (0 = unlimited).
    pub fn with_max_reusable(mut self, max_reusable: u64) -> Self {
        self.max_reusable = max_reusable;
        self
    }

    /// Set the age-expiry threshold in seconds (0 = never expires).
    pub fn with_expire_secs(mut self, expire_secs: u64) -> Self {
        self.expire_secs = expire_secs;
        self
    }

    /// Defer resource construction until first borrow.
    pub fn with_lazy(mut self, lazy: bool) -> Self {
        self.lazy = lazy;
        self
    }

    /// Enable or disable validation on borrow.
    pub fn with_pre_check(mut self, pre_check: bool) -> Self {
        self.pre_check = pre_check;
        self
    }

    /// Enable or disable validation on return.
    pub fn with_post_check(mut self, post_check: bool) -> Self {
        self.post_check = post_check;
        self
    }

    /// Build replacement resources by duplicating a reserved prototype.
    ///
    /// The prototype is constructed eagerly at pool creation, even when
    /// `lazy` is set, and is never itself handed out.
    pub fn with_cloning(mut self, cloning: bool) -> Self {
        self.cloning = cloning;
        self
    }
}
