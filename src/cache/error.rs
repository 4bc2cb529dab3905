//! Error taxonomy for the metadata cache.

use std::fmt;

use crate::vfs::NfsError;

/// Errors produced by the metadata cache core.
///
/// Distinct from [`NfsError`] because the cache needs to distinguish a few
/// conditions (collision overflow, internal conflicts, shutdown) that have
/// no single corresponding wire status; each variant still maps onto one
/// via [`From<MdCacheError> for NfsError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MdCacheError {
    /// The entry or handle no longer refers to a live backend object.
    Stale,
    /// Lookup miss that the cache can answer authoritatively.
    NotFound,
    /// Dirent insertion exhausted the quadratic probe bound.
    TooManyCollisions,
    /// A rename/create raced with a concurrent upcall; caller may retry.
    Conflict,
    /// Pass-through of a sub-backend error.
    Backend(NfsError),
    /// The cache has begun or completed shutdown.
    Shutdown,
}

impl fmt::Display for MdCacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MdCacheError::Stale => write!(f, "cache entry is stale"),
            MdCacheError::NotFound => write!(f, "no such cached entry"),
            MdCacheError::TooManyCollisions => write!(f, "dirent index probe bound exceeded"),
            MdCacheError::Conflict => write!(f, "conflicting concurrent modification"),
            MdCacheError::Backend(err) => write!(f, "backend error: {err:?}"),
            MdCacheError::Shutdown => write!(f, "cache is shutting down"),
        }
    }
}

impl std::error::Error for MdCacheError {}

impl From<MdCacheError> for NfsError {
    fn from(err: MdCacheError) -> Self {
        match err {
            MdCacheError::Stale => NfsError::Stale,
            MdCacheError::NotFound => NfsError::NoEnt,
            MdCacheError::TooManyCollisions => NfsError::NoEnt,
            MdCacheError::Conflict => NfsError::Jukebox,
            MdCacheError::Backend(inner) => inner,
            MdCacheError::Shutdown => NfsError::ServerFault,
        }
    }
}

impl From<NfsError> for MdCacheError {
    fn from(err: NfsError) -> Self {
        MdCacheError::Backend(err)
    }
}
