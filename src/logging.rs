use std::sync::Once;
use tracing_subscriber::EnvFilter;

fn env_filter() -> EnvFilter {
    for key in ["BLML_LOG", "RUST_LOG"] {
        if let Ok(spec) = std::env::var(key) {
            if let Ok(filter) = EnvFilter::try_new(&spec) {
                return filter;
            }
            eprintln!("[log] ignoring unparsable {key}={spec:?}");
        }
    }
    EnvFilter::new("info")
}

/// Install the stderr subscriber once; later calls are no-ops.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
