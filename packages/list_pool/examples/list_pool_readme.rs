//! Keeps per-bucket chains of colliding keys in one shared list pool, the way a
//! separately chained hash table would, without allocating per entry.
#![allow(
    missing_docs,
    reason = "No need for API documentation in example code"
)]

use list_pool::{Handle, ListPool};

const BUCKET_COUNT: usize = 4;

fn main() {
    let mut pool = ListPool::<&str, u32>::with_capacity(16).unwrap();
    let mut buckets = [Handle::<u32>::SENTINEL; BUCKET_COUNT];

    for word in ["apple", "banana", "cherry", "date", "elderberry", "fig", "grape"] {
        let bucket = buckets
            .get_mut(word.len() % BUCKET_COUNT)
            .expect("remainder is always a valid bucket index");

        *bucket = pool.push_front(word, *bucket).unwrap();
    }

    for (index, head) in buckets.iter().enumerate() {
        let words = pool.cursor(*head).copied().collect::<Vec<_>>();
        println!("bucket {index}: {words:?}");
    }

    let bucket = buckets
        .get_mut(1)
        .expect("bucket 1 exists because BUCKET_COUNT is 4");

    // Clearing a bucket returns all its nodes to the pool at once.
    *bucket = pool.free_list(*bucket).unwrap();

    // New words reuse the freed nodes instead of growing the pool.
    let size = pool.size();
    *bucket = pool.push_front("kiwi", *bucket).unwrap();
    assert_eq!(pool.size(), size);

    println!(
        "bucket 1 after reuse: {:?}",
        pool.cursor(*bucket).collect::<Vec<_>>()
    );
    println!("{pool:?}");
}
