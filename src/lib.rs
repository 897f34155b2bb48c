//! # repool
//!
//! Thread-safe, per-type singleton object pool for resources that are
//! expensive to construct: connections, browser sessions, handles.
//!
//! ## Features
//!
//! - One pool per resource type, managed through a [`PoolRegistry`]
//! - Lease-scoped borrowing with guaranteed return via RAII ([`Lease`])
//! - Non-blocking by design: an empty pool builds a new resource instead of
//!   making the caller wait, and `max_capacity` is a soft ceiling
//! - Two validation checkpoints (on borrow and on return) with transparent
//!   retire-and-replace
//! - Retirement by reuse count, wall-clock age, or a custom validity check
//! - Optional prototype cloning for cheap resource construction
//! - Structured logging through `tracing`
//!
//! ## Quick Start
//!
//! ```rust
//! use repool::{PoolConfig, PoolRegistry, Poolable};
//!
//! struct Connection {
//!     endpoint: String,
//! }
//!
//! impl Poolable for Connection {
//!     fn create() -> Self {
//!         Connection { endpoint: "localhost:5432".into() }
//!     }
//! }
//!
//! let pool = PoolRegistry::global()
//!     .get_or_create::<Connection>(PoolConfig::default())
//!     .unwrap();
//!
//! {
//!     let conn = pool.acquire();
//!     assert_eq!(conn.endpoint, "localhost:5432");
//!     // returned to the pool when `conn` goes out of scope
//! }
//! ```

mod config;
mod errors;
mod pool;
mod registry;
mod resource;

pub use config::PoolConfig;
pub use errors::{PoolError, PoolResult};
pub use pool::{Lease, ObjectPool};
pub use registry::PoolRegistry;
pub use resource::{Poolable, ResourceStats};
