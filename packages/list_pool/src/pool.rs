use std::any::type_name;
use std::fmt;
use std::mem;

use tracing::{debug, trace};

use crate::{Cursor, CursorMut, Error, Handle, HandleIndex, ListPoolBuilder, Node, Result};

/// A pool of nodes that hosts any number of independent singly linked lists.
///
/// All nodes of all lists live in one growable node store owned by the pool. A list has no
/// object identity of its own: it is whatever chain of nodes is reachable from a [`Handle`]
/// by following `next` links until [`Handle::SENTINEL`] is reached.
///
/// Lists support:
///
/// * [`push_front()`][1] and [`free()`][2] - insert or remove the head of a list in O(1).
/// * [`push_back()`][3] - append to the tail of a list; this walks the list to find the tail.
/// * [`free_list()`][4] - release a whole list by splicing it onto the free chain at once.
///
/// # Handles instead of pointers
///
/// Handles are positions in the node store, not addresses. The store may relocate when it grows
/// but every handle stays valid. Values are only reachable through the pool, so there is no way to
/// create a dangling reference from a stale handle. A stale handle is still a caller error: once a
/// node has been freed and recycled by a later insertion, the old handle silently refers to the
/// new value.
///
/// # Resource usage
///
/// The node store never shrinks. Freed nodes go onto an internal free chain and are recycled by
/// subsequent insertions before the store grows again. The value of a freed node is not dropped
/// when the node is freed; it stays alive until the node is recycled (at which point it is dropped
/// and replaced) or until the pool itself is dropped.
///
/// # Example
///
/// ```rust
/// use list_pool::ListPool;
///
/// let mut pool = ListPool::<u32>::new();
///
/// let evens = pool.new_list();
/// let evens = pool.push_back(2, evens).unwrap();
/// let evens = pool.push_back(4, evens).unwrap();
///
/// let odds = pool.new_list();
/// let odds = pool.push_front(3, odds).unwrap();
/// let odds = pool.push_front(1, odds).unwrap();
///
/// assert_eq!(pool.cursor(evens).copied().collect::<Vec<_>>(), [2, 4]);
/// assert_eq!(pool.cursor(odds).copied().collect::<Vec<_>>(), [1, 3]);
///
/// let odds = pool.free_list(odds).unwrap();
/// assert!(pool.is_empty(odds));
/// ```
///
/// [1]: Self::push_front
/// [2]: Self::free
/// [3]: Self::push_back
/// [4]: Self::free_list
#[derive(Clone)]
pub struct ListPool<T, I = usize> {
    /// Node at handle `n` is stored at `nodes[n - 1]`; position zero is the sentinel and has no
    /// storage. Only ever grows.
    nodes: Vec<Node<T, I>>,

    /// Head of the chain of freed nodes, threaded through their `next` fields.
    free_node_list: Handle<I>,
}

impl<T, I: HandleIndex> ListPool<T, I> {
    /// Creates an empty pool. This does not allocate.
    ///
    /// # Example
    ///
    /// ```rust
    /// use list_pool::ListPool;
    ///
    /// let pool = ListPool::<String>::new();
    ///
    /// assert_eq!(pool.size(), 0);
    /// assert_eq!(pool.capacity(), 0);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free_node_list: Handle::SENTINEL,
        }
    }

    /// Creates an empty pool with room for at least `capacity` nodes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResourceExhausted`] if the memory cannot be allocated.
    ///
    /// # Example
    ///
    /// ```rust
    /// use list_pool::ListPool;
    ///
    /// let pool = ListPool::<u64>::with_capacity(100).unwrap();
    ///
    /// assert!(pool.capacity() >= 100);
    /// assert_eq!(pool.size(), 0);
    /// ```
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::builder().capacity(capacity).build()
    }

    /// Starts building a new [`ListPool`].
    ///
    /// Use this when you want to customize the pool configuration beyond the defaults.
    pub fn builder() -> ListPoolBuilder<T, I> {
        ListPoolBuilder::new()
    }

    /// Ensures that the node store has room for at least `capacity` nodes in total.
    ///
    /// Does nothing if the capacity is already sufficient.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResourceExhausted`] if the memory cannot be allocated. The pool is
    /// unchanged in that case.
    ///
    /// # Example
    ///
    /// ```rust
    /// use list_pool::ListPool;
    ///
    /// let mut pool = ListPool::<u32>::new();
    ///
    /// pool.reserve(10).unwrap();
    /// assert!(pool.capacity() >= 10);
    /// assert_eq!(pool.size(), 0);
    /// ```
    #[cfg_attr(test, mutants::skip)] // Only affects capacity, which may exceed the request anyway.
    pub fn reserve(&mut self, capacity: usize) -> Result<()> {
        let additional = capacity.saturating_sub(self.nodes.len());

        self.nodes
            .try_reserve(additional)
            .map_err(|e| Error::allocation_failed(capacity, e))?;

        debug!(
            requested = capacity,
            capacity = self.nodes.capacity(),
            "reserved node store capacity"
        );

        Ok(())
    }

    /// The number of nodes the node store can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// The number of nodes in the node store, counting both nodes in lists and freed nodes
    /// awaiting reuse.
    ///
    /// This never decreases. It grows by one whenever an insertion finds no freed node to reuse.
    #[must_use]
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    /// Returns a new empty list, which is always [`Handle::SENTINEL`].
    #[must_use]
    #[allow(
        clippy::unused_self,
        reason = "list operations live on the pool, which gives meaning to the handles"
    )]
    pub fn new_list(&self) -> Handle<I> {
        Handle::SENTINEL
    }

    /// Returns the handle that marks the end of every list, which is always
    /// [`Handle::SENTINEL`].
    #[must_use]
    #[allow(
        clippy::unused_self,
        reason = "list operations live on the pool, which gives meaning to the handles"
    )]
    pub fn end(&self) -> Handle<I> {
        Handle::SENTINEL
    }

    /// Whether the list headed by `head` is empty.
    ///
    /// This only compares against the sentinel and never fails, even for handles that do not
    /// belong to the pool.
    #[must_use]
    #[allow(
        clippy::unused_self,
        reason = "list operations live on the pool, which gives meaning to the handles"
    )]
    pub fn is_empty(&self, head: Handle<I>) -> bool {
        head.is_sentinel()
    }

    /// The value stored in the node identified by `handle`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHandle`] if `handle` is the sentinel or beyond the end of the
    /// node store.
    ///
    /// # Example
    ///
    /// ```rust
    /// use list_pool::ListPool;
    ///
    /// let mut pool = ListPool::<&str>::new();
    /// let list = pool.push_front("first", pool.new_list()).unwrap();
    ///
    /// assert_eq!(*pool.value(list).unwrap(), "first");
    /// assert!(pool.value(pool.end()).is_err());
    /// ```
    pub fn value(&self, handle: Handle<I>) -> Result<&T> {
        Ok(&self.node(handle)?.value)
    }

    /// Exclusive access to the value stored in the node identified by `handle`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHandle`] if `handle` is the sentinel or beyond the end of the
    /// node store.
    pub fn value_mut(&mut self, handle: Handle<I>) -> Result<&mut T> {
        Ok(&mut self.node_mut(handle)?.value)
    }

    /// The handle of the node that follows the node identified by `handle`, or the sentinel if
    /// `handle` is the tail of its list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHandle`] if `handle` is the sentinel or beyond the end of the
    /// node store.
    pub fn next(&self, handle: Handle<I>) -> Result<Handle<I>> {
        Ok(self.node(handle)?.next)
    }

    /// Relinks the node identified by `handle` so that it is followed by `next`.
    ///
    /// This is a low-level operation. The pool does not check that the result is still a well
    /// formed list: creating a cycle makes traversal of the affected list unbounded and linking
    /// to a freed node corrupts the free chain.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHandle`] if `handle` is the sentinel or beyond the end of the
    /// node store, or if `next` is beyond the end of the node store.
    pub fn set_next(&mut self, handle: Handle<I>, next: Handle<I>) -> Result<()> {
        self.check_head(next)?;
        self.node_mut(handle)?.next = next;
        Ok(())
    }

    /// Inserts `value` as the new head of the list headed by `head` and returns the new head.
    ///
    /// `head` may be the sentinel, in which case a single-node list is created. A freed node is
    /// reused if one is available; its previous value is dropped at this point. Otherwise the
    /// node store grows by one node.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHandle`] if `head` is beyond the end of the node store and
    /// [`Error::ResourceExhausted`] if the node store cannot grow. The pool is unchanged if an
    /// error is returned.
    ///
    /// # Example
    ///
    /// ```rust
    /// use list_pool::ListPool;
    ///
    /// let mut pool = ListPool::<char>::new();
    ///
    /// let list = pool.new_list();
    /// let list = pool.push_front('b', list).unwrap();
    /// let list = pool.push_front('a', list).unwrap();
    ///
    /// assert_eq!(pool.cursor(list).collect::<String>(), "ab");
    /// ```
    pub fn push_front(&mut self, value: T, head: Handle<I>) -> Result<Handle<I>> {
        self.check_head(head)?;
        self.allocate(value, head)
    }

    /// Appends `value` to the tail of the list headed by `head` and returns the head of the list.
    ///
    /// The head only changes if the list was empty, in which case this is the same as
    /// [`push_front()`][Self::push_front]. Otherwise the list is walked to find its tail, so the
    /// cost is proportional to the length of the list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHandle`] if `head` is beyond the end of the node store and
    /// [`Error::ResourceExhausted`] if the node store cannot grow. The pool is unchanged if an
    /// error is returned.
    ///
    /// # Example
    ///
    /// ```rust
    /// use list_pool::ListPool;
    ///
    /// let mut pool = ListPool::<u8>::new();
    ///
    /// let list = pool.push_back(10, pool.new_list()).unwrap();
    /// let same = pool.push_back(20, list).unwrap();
    /// assert_eq!(list, same);
    ///
    /// assert_eq!(pool.cursor(list).copied().collect::<Vec<_>>(), [10, 20]);
    /// ```
    pub fn push_back(&mut self, value: T, head: Handle<I>) -> Result<Handle<I>> {
        if head.is_sentinel() {
            return self.push_front(value, head);
        }

        let tail = self.tail(head)?;
        let new_tail = self.allocate(value, Handle::SENTINEL)?;
        self.node_mut(tail)?.next = new_tail;

        Ok(head)
    }

    /// Removes the head node of the list headed by `head` and returns the new head, which is
    /// the sentinel if the list had only one node.
    ///
    /// Does nothing and returns `head` if the list is empty. The removed node goes onto the free
    /// chain; its value is not dropped until the node is reused or the pool is dropped. `head`
    /// is dangling after this call.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHandle`] if `head` is beyond the end of the node store.
    ///
    /// # Example
    ///
    /// ```rust
    /// use list_pool::ListPool;
    ///
    /// let mut pool = ListPool::<i32>::new();
    ///
    /// let list = pool.push_front(1, pool.new_list()).unwrap();
    /// let list = pool.push_front(0, list).unwrap();
    ///
    /// let list = pool.free(list).unwrap();
    /// assert_eq!(*pool.value(list).unwrap(), 1);
    ///
    /// let list = pool.free(list).unwrap();
    /// assert!(pool.is_empty(list));
    /// ```
    pub fn free(&mut self, head: Handle<I>) -> Result<Handle<I>> {
        if head.is_sentinel() {
            return Ok(head);
        }

        let free_node_list = self.free_node_list;
        let node = self.node_mut(head)?;
        let next = mem::replace(&mut node.next, free_node_list);
        self.free_node_list = head;

        trace!(node = head.position(), "released node");

        Ok(next)
    }

    /// Releases every node of the list headed by `head` and returns a new empty list.
    ///
    /// The list is walked once to find its tail and then spliced onto the free chain as a whole.
    /// Does nothing if the list is already empty. `head` and every handle that was reachable from
    /// it are dangling after this call.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHandle`] if `head` is beyond the end of the node store.
    pub fn free_list(&mut self, head: Handle<I>) -> Result<Handle<I>> {
        if head.is_sentinel() {
            return Ok(head);
        }

        let tail = self.tail(head)?;
        let free_node_list = self.free_node_list;
        self.node_mut(tail)?.next = free_node_list;
        self.free_node_list = head;

        trace!(
            head = head.position(),
            tail = tail.position(),
            "released list"
        );

        Ok(self.new_list())
    }

    /// A read-only cursor positioned at the head of the list headed by `head`.
    ///
    /// The cursor is also an iterator over references to the values of the list.
    ///
    /// # Example
    ///
    /// ```rust
    /// use list_pool::ListPool;
    ///
    /// let mut pool = ListPool::<u32>::new();
    /// let list = pool.push_front(5, pool.new_list()).unwrap();
    ///
    /// let mut cursor = pool.cursor(list);
    /// assert_eq!(cursor.get(), Some(&5));
    ///
    /// cursor.move_next();
    /// assert_eq!(cursor, pool.end_cursor());
    /// ```
    #[must_use]
    pub fn cursor(&self, head: Handle<I>) -> Cursor<'_, T, I> {
        Cursor::new(self, head)
    }

    /// A read-only cursor positioned at the end of every list.
    #[must_use]
    pub fn end_cursor(&self) -> Cursor<'_, T, I> {
        Cursor::new(self, Handle::SENTINEL)
    }

    /// A cursor positioned at the head of the list headed by `head` that permits in-place
    /// modification of the values in the list.
    ///
    /// # Example
    ///
    /// ```rust
    /// use list_pool::ListPool;
    ///
    /// let mut pool = ListPool::<u32>::new();
    /// let list = pool.push_back(1, pool.new_list()).unwrap();
    /// let list = pool.push_back(2, list).unwrap();
    ///
    /// let mut cursor = pool.cursor_mut(list);
    /// while let Some(value) = cursor.get_mut() {
    ///     *value *= 10;
    ///     cursor.move_next();
    /// }
    ///
    /// assert_eq!(pool.cursor(list).copied().collect::<Vec<_>>(), [10, 20]);
    /// ```
    #[must_use]
    pub fn cursor_mut(&mut self, head: Handle<I>) -> CursorMut<'_, T, I> {
        CursorMut::new(self, head)
    }

    /// Resolves a handle to its slot in the node store. Shared by all accessors so that read-only
    /// and exclusive access apply the same validation.
    fn slot(&self, handle: Handle<I>) -> Result<usize> {
        let size = self.size();

        let slot = handle
            .position()
            .checked_sub(1)
            .ok_or_else(|| Error::sentinel_handle(size))?;

        if slot >= size {
            return Err(Error::handle_out_of_range(handle.position(), size));
        }

        Ok(slot)
    }

    #[expect(
        clippy::indexing_slicing,
        reason = "slot() only returns indexes within the node store"
    )]
    pub(crate) fn node(&self, handle: Handle<I>) -> Result<&Node<T, I>> {
        let slot = self.slot(handle)?;
        Ok(&self.nodes[slot])
    }

    #[expect(
        clippy::indexing_slicing,
        reason = "slot() only returns indexes within the node store"
    )]
    pub(crate) fn node_mut(&mut self, handle: Handle<I>) -> Result<&mut Node<T, I>> {
        let slot = self.slot(handle)?;
        Ok(&mut self.nodes[slot])
    }

    /// Validates a handle that is used as the head of a possibly empty list.
    fn check_head(&self, head: Handle<I>) -> Result<()> {
        let size = self.size();

        if head.position() > size {
            return Err(Error::handle_out_of_range(head.position(), size));
        }

        Ok(())
    }

    /// Finds the last node of the non-empty list headed by `head`.
    ///
    /// Does not terminate if the list contains a cycle.
    fn tail(&self, head: Handle<I>) -> Result<Handle<I>> {
        let mut current = head;

        loop {
            let next = self.node(current)?.next;

            if next.is_sentinel() {
                return Ok(current);
            }

            current = next;
        }
    }

    /// Places `value` into a node followed by `next`, reusing the head of the free chain if there
    /// is one and growing the node store otherwise.
    fn allocate(&mut self, value: T, next: Handle<I>) -> Result<Handle<I>> {
        if self.free_node_list.is_sentinel() {
            return self.append(value, next);
        }

        // Pop the node off the free chain before touching it. Dropping the old value may panic,
        // in which case the node is leaked instead of remaining on the free chain.
        let handle = self.free_node_list;
        self.free_node_list = self.node(handle)?.next;

        let node = self.node_mut(handle)?;
        node.next = next;
        node.value = value;

        trace!(node = handle.position(), "recycled freed node");

        Ok(handle)
    }

    fn append(&mut self, value: T, next: Handle<I>) -> Result<Handle<I>> {
        let size = self.size();

        let requested = size
            .checked_add(1)
            .ok_or_else(|| Error::handle_space_exhausted(size))?;

        let handle = Handle::from_position(requested)
            .ok_or_else(|| Error::handle_space_exhausted(requested))?;

        self.nodes
            .try_reserve(1)
            .map_err(|e| Error::allocation_failed(requested, e))?;

        self.nodes.push(Node::new(value, next));

        trace!(node = requested, "appended new node");

        Ok(handle)
    }
}

impl<T, I: HandleIndex> Default for ListPool<T, I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, I: HandleIndex> fmt::Debug for ListPool<T, I> {
    #[cfg_attr(test, mutants::skip)] // No API contract to test.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListPool")
            .field("item_type", &format_args!("{}", type_name::<T>()))
            .field("size", &self.nodes.len())
            .field("capacity", &self.nodes.capacity())
            .field("free_node_list", &self.free_node_list)
            .finish_non_exhaustive()
    }
}
