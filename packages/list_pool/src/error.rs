use std::collections::TryReserveError;

use thiserror::Error;

/// Errors that can occur when operating on a [`ListPool`][crate::ListPool].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A handle was used where it does not refer to a node of the pool.
    ///
    /// Operations that accept the head of a possibly empty list raise this only when the handle
    /// lies beyond the end of the node store. Operations that require a real node also raise this
    /// for the sentinel handle.
    #[error("invalid handle {handle} for a pool of {size} nodes: {problem}")]
    InvalidHandle {
        /// The raw index of the offending handle.
        handle: usize,

        /// The number of nodes in the pool at the time of the call.
        size: usize,

        /// A human-readable description of the problem.
        problem: &'static str,
    },

    /// The node store could not grow to the requested number of nodes, either because memory
    /// could not be allocated or because the handle index type cannot address that many nodes.
    #[error("cannot grow the pool to {requested} nodes")]
    ResourceExhausted {
        /// The total number of nodes the pool attempted to make room for.
        requested: usize,

        /// The allocation failure, if the limit was imposed by the allocator.
        #[source]
        source: Option<TryReserveError>,
    },
}

impl Error {
    pub(crate) fn sentinel_handle(size: usize) -> Self {
        Self::InvalidHandle {
            handle: 0,
            size,
            problem: "the sentinel does not refer to a node",
        }
    }

    pub(crate) fn handle_out_of_range(handle: usize, size: usize) -> Self {
        Self::InvalidHandle {
            handle,
            size,
            problem: "the handle is beyond the end of the node store",
        }
    }

    pub(crate) fn allocation_failed(requested: usize, source: TryReserveError) -> Self {
        Self::ResourceExhausted {
            requested,
            source: Some(source),
        }
    }

    pub(crate) fn handle_space_exhausted(requested: usize) -> Self {
        Self::ResourceExhausted {
            requested,
            source: None,
        }
    }
}

/// A specialized `Result` type for list pool operations, returning the crate's
/// [`Error`] type as the error value.
pub type Result<T> = std::result::Result<T, Error>;
