//! Shared setup for integration tests
//!
//! Installs a tracing subscriber once per test binary. Filter with
//! `RUST_LOG`, e.g. `RUST_LOG=tephra_sim_core=debug cargo test`.

use ctor::ctor;

#[ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
