//! Tests of the documented list behavior, separate from the main crate
//! just to prove that this does not depend on accessing any private APIs.

use std::sync::{Arc, Mutex};
use std::thread;

use list_pool::{Error, Handle, ListPool};

fn collect<T: Clone>(pool: &ListPool<T>, head: Handle) -> Vec<T> {
    pool.cursor(head).cloned().collect()
}

#[test]
fn new_list_is_empty_sentinel() {
    let pool = ListPool::<u32>::new();

    assert!(pool.is_empty(pool.new_list()));
    assert_eq!(pool.new_list(), pool.end());
    assert_eq!(pool.new_list(), Handle::SENTINEL);
}

#[test]
fn push_back_keeps_insertion_order() {
    let mut pool = ListPool::<String>::new();
    let values = ["a", "b", "c", "d"].map(str::to_string);

    let mut head = pool.new_list();
    for value in values.clone() {
        head = pool.push_back(value, head).unwrap();
    }

    assert_eq!(collect(&pool, head), values);
}

#[test]
fn push_front_reverses_insertion_order() {
    let mut pool = ListPool::<u32>::new();

    let head = pool.push_front(1, pool.new_list()).unwrap();
    let head = pool.push_front(2, head).unwrap();

    assert_eq!(collect(&pool, head), [2, 1]);
}

#[test]
fn lists_share_one_store() {
    let mut pool = ListPool::<u32, u32>::new();

    let mut lists = vec![pool.new_list(); 4];
    for round in 0..5 {
        for (index, list) in lists.iter_mut().enumerate() {
            let value = u32::try_from(index).unwrap() * 100 + round;
            *list = pool.push_back(value, *list).unwrap();
        }
    }

    assert_eq!(pool.size(), 20);
    for (index, list) in lists.iter().enumerate() {
        let base = u32::try_from(index).unwrap() * 100;
        assert_eq!(
            pool.cursor(*list).copied().collect::<Vec<_>>(),
            (0..5).map(|round| base + round).collect::<Vec<_>>()
        );
    }
}

#[test]
fn documented_scenario() {
    let mut pool = ListPool::<u32>::new();

    let head = pool.push_back(10, Handle::from_index(0)).unwrap();
    assert_eq!(head, Handle::from_index(1));

    let head = pool.push_back(20, head).unwrap();
    assert_eq!(head, Handle::from_index(1));
    assert_eq!(pool.next(head).unwrap(), Handle::from_index(2));
    assert_eq!(*pool.value(Handle::from_index(2)).unwrap(), 20);
    assert_eq!(collect(&pool, head), [10, 20]);

    let head = pool.free(head).unwrap();
    assert_eq!(head, Handle::from_index(2));
    assert!(!pool.is_empty(head));
    assert_eq!(collect(&pool, head), [20]);
}

#[test]
fn free_list_then_push_reuses_slot() {
    let mut pool = ListPool::<u32>::new();

    let mut head = pool.new_list();
    for value in [1, 2, 3] {
        head = pool.push_front(value, head).unwrap();
    }
    let size_before = pool.size();

    let head = pool.free_list(head).unwrap();
    assert!(pool.is_empty(head));

    let reused = pool.push_front(99, pool.new_list()).unwrap();
    assert_eq!(pool.size(), size_before);
    assert_eq!(*pool.value(reused).unwrap(), 99);
    assert_eq!(pool.next(reused).unwrap(), Handle::SENTINEL);

    // Two more freed nodes remain before the store must grow.
    _ = pool.push_front(100, pool.new_list()).unwrap();
    _ = pool.push_front(101, pool.new_list()).unwrap();
    assert_eq!(pool.size(), size_before);

    _ = pool.push_front(102, pool.new_list()).unwrap();
    assert_eq!(pool.size(), size_before + 1);
}

#[test]
fn sentinel_and_out_of_range_access_fails() {
    let mut pool = ListPool::<u32>::new();
    let head = pool.push_front(1, pool.new_list()).unwrap();
    let beyond = Handle::from_index(pool.size() + 1);

    for handle in [Handle::SENTINEL, beyond] {
        assert!(matches!(
            pool.value(handle),
            Err(Error::InvalidHandle { .. })
        ));
        assert!(matches!(
            pool.next(handle),
            Err(Error::InvalidHandle { .. })
        ));
    }

    assert!(matches!(
        pool.free(beyond),
        Err(Error::InvalidHandle { .. })
    ));
    assert_eq!(collect(&pool, head), [1]);
}

#[test]
fn stale_handle_aliases_recycled_node() {
    let mut pool = ListPool::<&str>::new();

    let old = pool.push_front("old", pool.new_list()).unwrap();
    _ = pool.free(old).unwrap();
    let new = pool.push_front("new", pool.new_list()).unwrap();

    // Not detected: the stale handle now refers to the recycled node.
    assert_eq!(old, new);
    assert_eq!(*pool.value(old).unwrap(), "new");
}

#[test]
fn error_messages_are_descriptive() {
    let pool = ListPool::<u32>::new();

    let error = pool.value(Handle::SENTINEL).unwrap_err();

    assert!(error.to_string().contains("sentinel"));
}

#[test]
fn multithreaded_via_mutex() {
    let shared_pool = Arc::new(Mutex::new(ListPool::<u32>::new()));

    let head = {
        let mut pool = shared_pool.lock().unwrap();
        let head = pool.push_back(1, Handle::SENTINEL).unwrap();
        pool.push_back(2, head).unwrap()
    };

    thread::spawn({
        let shared_pool = Arc::clone(&shared_pool);
        move || {
            let mut pool = shared_pool.lock().unwrap();
            _ = pool.push_back(3, head).unwrap();
        }
    })
    .join()
    .unwrap();

    let pool = shared_pool.lock().unwrap();
    assert_eq!(pool.cursor(head).copied().collect::<Vec<_>>(), [1, 2, 3]);
}
