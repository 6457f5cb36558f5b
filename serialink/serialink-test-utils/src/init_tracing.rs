use test_log::tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Install a subscriber for tests that spawn their own threads, where `#[test_log::test]`
/// only covers the test's main thread.
///
/// Honours `RUST_LOG`. Events carry the name of the emitting thread, so interleaved
/// index population from several threads can be told apart.
pub fn init_test_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_thread_names(true)
        .with_test_writer()
        .try_init();
}
