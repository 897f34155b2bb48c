//! Basic usage of a standalone pool

use repool::{ObjectPool, PoolConfig, Poolable, ResourceStats};
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_ID: AtomicUsize = AtomicUsize::new(1);

struct Connection {
    id: usize,
}

impl Poolable for Connection {
    const HAS_CLEANUP: bool = true;

    fn create() -> Self {
        Connection {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
        }
    }

    fn clean_up(&mut self, stats: &ResourceStats) {
        println!("   closing connection #{} after {} uses", self.id, stats.count);
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== repool - Basic Examples ===\n");

    simple_pool();
    reuse_retirement();
    soft_capacity();
}

fn simple_pool() {
    println!("1. Simple Pool:");
    let pool = ObjectPool::<Connection>::new(PoolConfig::default()).unwrap();

    {
        let conn = pool.acquire();
        println!("   Borrowed connection #{}", conn.id);
        // Returned automatically when dropped
    }

    println!("   Pool size after return: {}\n", pool.size());
}

fn reuse_retirement() {
    println!("2. Reuse Retirement:");

    let config = PoolConfig::new()
        .with_min_init(1)
        .with_max_capacity(1)
        .with_max_reusable(2)
        .with_expire_secs(0);

    let pool = ObjectPool::<Connection>::new(config).unwrap();

    for cycle in 1..=3 {
        let conn = pool.acquire();
        println!("   Cycle {}: connection #{}", cycle, conn.id);
    }

    println!();
}

fn soft_capacity() {
    println!("3. Soft Capacity:");

    let config = PoolConfig::new()
        .with_min_init(1)
        .with_max_capacity(1)
        .with_post_check(false);

    let pool = ObjectPool::<Connection>::new(config).unwrap();

    // Two concurrent borrows against a capacity-1 pool: neither blocks.
    let first = pool.acquire();
    let second = pool.acquire();
    println!("   Outstanding: #{} and #{}", first.id, second.id);

    drop(first);
    drop(second); // pool is full, this one is cleaned up and discarded

    println!("   Pool size after both returns: {}", pool.size());
}
