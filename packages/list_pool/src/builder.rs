use std::marker::PhantomData;

use tracing::debug;

use crate::{HandleIndex, ListPool, Result};

/// Builder for creating an instance of [`ListPool`].
///
/// You only need to use this builder if you want to customize the pool configuration.
/// The default configuration used by [`ListPool::new()`][1] is sufficient for most use cases.
///
/// # Examples
///
/// ```
/// use list_pool::ListPool;
///
/// let pool = ListPool::<u32>::builder().capacity(64).build().unwrap();
///
/// assert!(pool.capacity() >= 64);
/// ```
///
/// [1]: ListPool::new
#[must_use]
pub struct ListPoolBuilder<T, I> {
    capacity: usize,

    _item: PhantomData<fn() -> (T, I)>,
}

impl<T, I> std::fmt::Debug for ListPoolBuilder<T, I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListPoolBuilder")
            .field(
                "item_type",
                &std::format_args!("{}", std::any::type_name::<T>()),
            )
            .field(
                "index_type",
                &std::format_args!("{}", std::any::type_name::<I>()),
            )
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl<T, I: HandleIndex> ListPoolBuilder<T, I> {
    pub(crate) fn new() -> Self {
        Self {
            capacity: 0,
            _item: PhantomData,
        }
    }

    /// Sets the number of nodes to reserve room for when the pool is built.
    ///
    /// The pool still grows beyond this as needed. Defaults to zero, in which case building the
    /// pool does not allocate.
    ///
    /// # Examples
    ///
    /// ```
    /// use list_pool::ListPool;
    ///
    /// let pool = ListPool::<String, u32>::builder()
    ///     .capacity(1000)
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(pool.size(), 0);
    /// ```
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Builds the list pool with the specified configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResourceExhausted`][crate::Error::ResourceExhausted] if the requested
    /// capacity cannot be allocated.
    pub fn build(self) -> Result<ListPool<T, I>> {
        let mut pool = ListPool::new();

        if self.capacity > 0 {
            pool.reserve(self.capacity)?;
        }

        debug!(
            item_type = std::any::type_name::<T>(),
            capacity = pool.capacity(),
            "created list pool"
        );

        Ok(pool)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn default_builder_does_not_allocate() {
        let pool = ListPool::<u32>::builder().build().unwrap();

        assert_eq!(pool.capacity(), 0);
        assert_eq!(pool.size(), 0);
    }

    #[test]
    fn capacity_is_reserved() {
        let pool = ListPool::<u32, u16>::builder().capacity(10).build().unwrap();

        assert!(pool.capacity() >= 10);
        assert_eq!(pool.size(), 0);
    }

    #[test]
    fn impossible_capacity_fails() {
        let result = ListPool::<u64>::builder().capacity(usize::MAX).build();

        assert!(matches!(result, Err(Error::ResourceExhausted { .. })));
    }

    #[test]
    fn debug_names_types() {
        let output = format!("{:?}", ListPool::<u8, u16>::builder().capacity(3));

        assert!(output.contains("u8"));
        assert!(output.contains("u16"));
        assert!(output.contains('3'));
    }
}
