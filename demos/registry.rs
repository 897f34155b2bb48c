//! Per-type singleton pools through the process-wide registry

use repool::{PoolConfig, PoolRegistry, Poolable};

struct HttpClient;

impl Poolable for HttpClient {
    fn create() -> Self {
        HttpClient
    }
}

struct DbSession;

impl Poolable for DbSession {
    fn create() -> Self {
        DbSession
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== repool - Registry Examples ===\n");

    let registry = PoolRegistry::global();

    let http = registry
        .get_or_create::<HttpClient>(PoolConfig::new().with_min_init(2))
        .unwrap();
    let db = registry
        .get_or_create::<DbSession>(PoolConfig::new().with_min_init(4))
        .unwrap();

    println!("HttpClient pool size: {}", http.size());
    println!("DbSession pool size:  {}", db.size());

    // A second request for the same type returns the existing pool; the
    // configuration argument is ignored.
    let http_again = registry
        .get_or_create::<HttpClient>(PoolConfig::new().with_min_init(10))
        .unwrap();
    println!("HttpClient pool size on second lookup: {}", http_again.size());

    http.destroy();
    println!(
        "HttpClient registered after destroy: {}",
        registry.exists::<HttpClient>()
    );

    db.destroy();
}
