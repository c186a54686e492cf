/// Configure tracing once at startup for the entire process.
///
/// Verbosity follows `RUST_LOG` and defaults to `info`:
///
/// ```bash
/// RUST_LOG=debug inventory_desk orders
/// RUST_LOG=inventory_desk::gateway=debug,info inventory_desk submit --item 7:3
/// ```
pub fn setup_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
