use std::fmt::Debug;
use std::hash::Hash;

use num_traits::{ConstZero, PrimInt, Unsigned};

/// An unsigned integer type that can be used as the index behind a [`Handle`].
///
/// This is implemented for every primitive unsigned integer. A narrower index type makes every
/// node in the pool smaller but limits how many nodes the pool can ever hold: a pool indexed by
/// `u8` can hold at most 255 nodes because index zero is reserved for [`Handle::SENTINEL`].
pub trait HandleIndex: PrimInt + Unsigned + ConstZero + Hash + Debug {}

impl<I> HandleIndex for I where I: PrimInt + Unsigned + ConstZero + Hash + Debug {}

/// Identifies a node in a [`ListPool`][crate::ListPool], which is also the head of the list that
/// continues from that node.
///
/// A handle is a 1-based position in the pool's node store, not an address, so it remains valid
/// when the store grows and relocates its storage. Handles do not own anything and may be freely
/// copied; any number of handles may refer to the same list.
///
/// The reserved value [`Handle::SENTINEL`] (index zero) never refers to a node. It plays three
/// roles at once: the empty list, the end of a list and the empty free chain inside the pool.
///
/// A handle is only meaningful relative to the pool that produced it. After the node it refers to
/// has been freed, the handle is dangling and may silently refer to an unrelated value once the
/// pool recycles the node.
///
/// # Example
///
/// ```rust
/// use list_pool::{Handle, ListPool};
///
/// let mut pool = ListPool::<&str>::new();
///
/// let list = pool.new_list();
/// assert_eq!(list, Handle::SENTINEL);
///
/// let list = pool.push_front("hello", list).unwrap();
/// assert_eq!(list.index(), 1);
/// assert_eq!(list, Handle::from_index(1));
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Handle<I = usize> {
    index: I,
}

impl<I: HandleIndex> Handle<I> {
    /// The handle that refers to no node: the empty list and the end of every list.
    pub const SENTINEL: Self = Self { index: I::ZERO };

    /// Creates a handle from a raw index previously obtained via [`index()`][Self::index].
    ///
    /// This never fails. Whether the handle refers to a node is checked by the pool when the
    /// handle is used.
    #[must_use]
    pub const fn from_index(index: I) -> Self {
        Self { index }
    }

    /// The raw index of the handle. Zero for the sentinel, otherwise the 1-based position of the
    /// node in the pool.
    #[must_use]
    pub fn index(self) -> I {
        self.index
    }

    /// Whether this is the [sentinel][Self::SENTINEL], i.e. an empty list or the end of a list.
    #[must_use]
    pub fn is_sentinel(self) -> bool {
        self.index == I::ZERO
    }

    /// The 1-based position in the node store.
    ///
    /// An index that does not fit in `usize` can never be within the store, so it saturates to
    /// `usize::MAX`, which is out of range for any store that can exist.
    #[must_use]
    pub(crate) fn position(self) -> usize {
        self.index.to_usize().unwrap_or(usize::MAX)
    }

    /// The handle for a 1-based position in the node store, if the position fits into `I`.
    #[must_use]
    pub(crate) fn from_position(position: usize) -> Option<Self> {
        num_traits::cast::<usize, I>(position).map(Self::from_index)
    }
}

impl<I: HandleIndex> Default for Handle<I> {
    fn default() -> Self {
        Self::SENTINEL
    }
}
