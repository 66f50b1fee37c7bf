use std::fmt;
use std::iter::FusedIterator;
use std::ptr;

use crate::{Handle, HandleIndex, ListPool};

/// A read-only cursor over one list in a [`ListPool`].
///
/// Created by [`ListPool::cursor()`] and [`ListPool::end_cursor()`]. The cursor only moves
/// forward and reaching the end of the list is final: moving past the end does nothing.
///
/// The cursor is also an [`Iterator`] over references to the values of the list, starting with
/// the value under the cursor.
///
/// Two cursors are equal if they are bound to the same pool instance and positioned at the same
/// handle.
///
/// If the cursor reaches a handle that does not refer to a node of the pool, it behaves as if it
/// were at the end of the list: [`is_end()`][Self::is_end] is true and no more values are
/// yielded. It still keeps that handle, so it does not compare equal to an end cursor. If the
/// list contains a cycle, iteration does not end.
pub struct Cursor<'p, T, I = usize> {
    pool: &'p ListPool<T, I>,
    current: Handle<I>,
}

impl<'p, T, I: HandleIndex> Cursor<'p, T, I> {
    pub(crate) fn new(pool: &'p ListPool<T, I>, current: Handle<I>) -> Self {
        Self { pool, current }
    }

    /// The handle the cursor is positioned at. This is the head of the remainder of the list.
    #[must_use]
    pub fn handle(&self) -> Handle<I> {
        self.current
    }

    /// Whether the cursor is at the end of the list, i.e. there is no value under the cursor.
    ///
    /// This is also true for a cursor at a handle that does not refer to a node of the pool,
    /// even though such a cursor does not compare equal to [`ListPool::end_cursor()`].
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.pool.node(self.current).is_err()
    }

    /// The value under the cursor, or `None` at the end of the list.
    #[must_use]
    pub fn get(&self) -> Option<&'p T> {
        self.pool.node(self.current).ok().map(|node| &node.value)
    }

    /// Moves the cursor to the next node of the list. Does nothing at the end of the list.
    pub fn move_next(&mut self) {
        if let Ok(node) = self.pool.node(self.current) {
            self.current = node.next;
        }
    }
}

impl<'p, T, I: HandleIndex> Iterator for Cursor<'p, T, I> {
    type Item = &'p T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.pool.node(self.current).ok()?;
        self.current = node.next;
        Some(&node.value)
    }
}

impl<T, I: HandleIndex> FusedIterator for Cursor<'_, T, I> {}

// Derived implementations would require `T: Clone`.
impl<T, I: HandleIndex> Clone for Cursor<'_, T, I> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool,
            current: self.current,
        }
    }
}

impl<T, I: HandleIndex> PartialEq for Cursor<'_, T, I> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.pool, other.pool) && self.current == other.current
    }
}

impl<T, I: HandleIndex> Eq for Cursor<'_, T, I> {}

impl<T, I: HandleIndex> fmt::Debug for Cursor<'_, T, I> {
    #[cfg_attr(test, mutants::skip)] // No API contract to test.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("pool", &ptr::from_ref(self.pool))
            .field("current", &self.current)
            .finish()
    }
}

/// A cursor over one list in a [`ListPool`] that permits in-place modification of the values.
///
/// Created by [`ListPool::cursor_mut()`]. The cursor only moves forward and reaching the end of
/// the list is final: moving past the end does nothing.
///
/// Values are lent out by [`get_mut()`][Self::get_mut] for as long as the cursor itself is
/// borrowed, so at most one value of the pool is exclusively borrowed at any time.
///
/// If the cursor reaches a handle that does not refer to a node of the pool, it behaves as if it
/// were at the end of the list: [`is_end()`][Self::is_end] is true and no value is lent out.
pub struct CursorMut<'p, T, I = usize> {
    pool: &'p mut ListPool<T, I>,
    current: Handle<I>,
}

impl<'p, T, I: HandleIndex> CursorMut<'p, T, I> {
    pub(crate) fn new(pool: &'p mut ListPool<T, I>, current: Handle<I>) -> Self {
        Self { pool, current }
    }

    /// The handle the cursor is positioned at. This is the head of the remainder of the list.
    #[must_use]
    pub fn handle(&self) -> Handle<I> {
        self.current
    }

    /// Whether the cursor is at the end of the list, i.e. there is no value under the cursor.
    ///
    /// This is also true for a cursor at a handle that does not refer to a node of the pool,
    /// even though such a cursor does not compare equal to [`ListPool::end_cursor()`].
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.pool.node(self.current).is_err()
    }

    /// The value under the cursor, or `None` at the end of the list.
    #[must_use]
    pub fn get(&self) -> Option<&T> {
        self.pool.node(self.current).ok().map(|node| &node.value)
    }

    /// Exclusive access to the value under the cursor, or `None` at the end of the list.
    #[must_use]
    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.pool
            .node_mut(self.current)
            .ok()
            .map(|node| &mut node.value)
    }

    /// Moves the cursor to the next node of the list. Does nothing at the end of the list.
    pub fn move_next(&mut self) {
        if let Ok(node) = self.pool.node(self.current) {
            self.current = node.next;
        }
    }

    /// A read-only cursor at the same position, borrowing from this one.
    #[must_use]
    pub fn as_cursor(&self) -> Cursor<'_, T, I> {
        Cursor::new(self.pool, self.current)
    }
}

impl<T, I: HandleIndex> PartialEq for CursorMut<'_, T, I> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(&*self.pool, &*other.pool) && self.current == other.current
    }
}

impl<T, I: HandleIndex> Eq for CursorMut<'_, T, I> {}

impl<T, I: HandleIndex> fmt::Debug for CursorMut<'_, T, I> {
    #[cfg_attr(test, mutants::skip)] // No API contract to test.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut")
            .field("pool", &ptr::from_ref(&*self.pool))
            .field("current", &self.current)
            .finish()
    }
}
