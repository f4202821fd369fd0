/// Initialize the tracing subscriber for binaries and tests embedding
/// the pipeline. Safe to call more than once.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();
}
