use crate::Handle;

/// One entry of the node store. A node is either part of some list reachable from a live handle
/// or a member of the free chain; the `next` field serves both roles.
///
/// The value of a node on the free chain is left in place until the node is recycled.
#[derive(Clone, Debug)]
pub(crate) struct Node<T, I> {
    pub(crate) value: T,
    pub(crate) next: Handle<I>,
}

impl<T, I> Node<T, I> {
    pub(crate) fn new(value: T, next: Handle<I>) -> Self {
        Self { value, next }
    }
}
