use std::sync::Arc;

use pubsub_core::{Backend, HashBackend, MemoryBackend};
use pubsub_proxy::ProxyBackend;

/// TCP port this process listens on. Required; there is no default, the
/// same as the original service's wiring scripts.
pub fn load_port() -> u16 {
    std::env::var("PORT")
        .expect("PORT must be set")
        .parse()
        .expect("PORT must be a valid u16")
}

/// Builds this process's backend handle from the environment, per
/// spec.md §4.7 / §6:
///
/// - `NUM_BACKENDS` unset -> single-node mode: a fresh `MemoryBackend`.
/// - `NUM_BACKENDS = N` set -> clustered mode: reads `BACKEND{i}_PORT` for
///   `i` in `[0, N)`, takes the authority after `//` from each, and wraps
///   the resulting `ProxyBackend`s in a `HashBackend`.
pub fn load_backend() -> Arc<dyn Backend> {
    match std::env::var("NUM_BACKENDS") {
        Err(_) => Arc::new(MemoryBackend::new()),
        Ok(n) => {
            let n: usize = n.parse().expect("NUM_BACKENDS must be a valid usize");
            let backends: Vec<Arc<dyn Backend>> = (0..n)
                .map(|i| {
                    let key = format!("BACKEND{i}_PORT");
                    let value = std::env::var(&key).unwrap_or_else(|_| panic!("{key} must be set"));
                    let authority = authority_of(&value);
                    Arc::new(ProxyBackend::new(authority)) as Arc<dyn Backend>
                })
                .collect();
            Arc::new(HashBackend::new(backends))
        }
    }
}

/// Extracts the authority (`host:port`) from a `scheme://host:port` value,
/// per spec.md §6: "the part after `//` is used verbatim as the authority
/// for the i-th ProxyBackend".
fn authority_of(url_like: &str) -> &str {
    url_like
        .split_once("//")
        .map(|(_, rest)| rest)
        .unwrap_or(url_like)
}
