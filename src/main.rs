// This is just a binary wrapper - the actual library is in lib.rs
// Run examples with: cargo run --example basic

use repool::{ObjectPool, PoolConfig, Poolable};

struct Connection {
    endpoint: String,
}

impl Poolable for Connection {
    fn create() -> Self {
        Connection {
            endpoint: "localhost:5432".into(),
        }
    }
}

fn main() {
    println!("=== repool ===");
    println!("See demos/ directory for usage examples");
    println!("Run: cargo run --example basic");
    println!();

    // Quick demo
    println!("Quick Demo:");
    let pool = ObjectPool::<Connection>::new(PoolConfig::default()).unwrap();

    {
        let conn = pool.acquire();
        println!("  Borrowed connection to: {}", conn.endpoint);
    }

    println!("  Pool size after return: {}", pool.size());
}
