/// Installs the global `tracing` subscriber.
///
/// Verbosity comes from `RUST_LOG`. Output goes to stderr so that stdout carries only
/// what the CLI prints for the customer.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
