#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! An arena of singly linked lists whose nodes are addressed by integer handles.
//!
//! This crate provides [`ListPool`], a single growable node store that hosts any number of
//! independent singly linked lists. A list is identified by a [`Handle`] to its head node rather
//! than by a pointer, which gives linked list semantics (O(1) insertion and removal at the head,
//! splicing of whole lists) without a heap allocation per node and without references that are
//! invalidated when the storage grows.
//!
//! This is part of the [Folo project](https://github.com/folo-rs/folo) that provides mechanisms for
//! high-performance hardware-aware programming in Rust.
//!
//! # Key Features
//!
//! - **One store, many lists**: every node of every list lives in the same contiguous storage
//! - **Stable handles**: handles are positions, so they survive reallocation of the storage
//! - **Node recycling**: freed nodes are threaded onto a free chain and reused before the
//!   storage grows again
//! - **Whole-list release**: [`ListPool::free_list()`] returns an entire list to the free chain
//!   in a single splice
//! - **Configurable handle width**: the index type behind [`Handle`] can be any unsigned integer,
//!   trading the maximum number of nodes for a smaller node size
//! - **Fail-fast validation**: handles that do not refer to a node are reported as
//!   [`Error::InvalidHandle`] instead of being silently treated as empty lists
//!
//! # The sentinel
//!
//! [`Handle::SENTINEL`] (index zero) never refers to a node. It is at the same time the empty
//! list, the end of every list and the marker for an empty free chain inside the pool.
//!
//! # Example
//!
//! ```
//! use list_pool::ListPool;
//!
//! let mut pool = ListPool::<&str>::new();
//!
//! let todo = pool.new_list();
//! let todo = pool.push_back("write", todo).unwrap();
//! let todo = pool.push_back("test", todo).unwrap();
//! let todo = pool.push_front("design", todo).unwrap();
//!
//! assert_eq!(
//!     pool.cursor(todo).copied().collect::<Vec<_>>(),
//!     ["design", "write", "test"]
//! );
//!
//! // Done with the first item.
//! let todo = pool.free(todo).unwrap();
//! assert_eq!(*pool.value(todo).unwrap(), "write");
//!
//! // Done with everything. The nodes are reused by the next insertions.
//! let todo = pool.free_list(todo).unwrap();
//! assert!(pool.is_empty(todo));
//! ```
//!
//! # Thread safety
//!
//! The pool has no internal synchronization. All mutation requires exclusive access, so to use a
//! pool from multiple threads it must be wrapped in a lock or each thread must use its own pool.
//! Handles are only meaningful relative to the pool that produced them.

mod builder;
mod cursor;
mod error;
mod handle;
mod node;
mod pool;

pub use builder::*;
pub use cursor::*;
pub use error::*;
pub use handle::*;
pub(crate) use node::*;
pub use pool::*;
