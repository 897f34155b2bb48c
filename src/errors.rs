//! Error types for pool construction

use thiserror::Error;

/// Configuration errors raised while building a pool.
///
/// All variants are raised synchronously from pool construction (directly or
/// through the registry), never from acquire/release. Resource-level problems
/// such as a failed validity check or an expired instance are handled
/// internally by replacement and are not surfaced as errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    #[error("{pool_name}: min_init must be greater than 0 when lazy is disabled")]
    InvalidMinInitCapacity { pool_name: String },

    #[error("{pool_name}: max_capacity must not be negative")]
    InvalidMaxCapacity { pool_name: String },

    #[error("{type_name:?} is not a usable resource type")]
    InvalidResourceType { type_name: String },
}

pub type PoolResult<T> = Result<T, PoolError>;
