use std::sync::Once;

use tracing_subscriber::{
    fmt::format::Format, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

static INIT: Once = Once::new();

/// Initialize tracing with a compact console format.
///
/// Structured fields stay on the events; the console format keeps startup
/// and request logs readable. Idempotent so tests can call it freely.
pub fn init_telemetry() {
    INIT.call_once(|| {
        let console_fmt = tracing_subscriber::fmt::layer().event_format(
            Format::default()
                .compact()
                .with_target(false)
                .without_time(),
        );
        tracing_subscriber::registry()
            .with(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "parlo=debug,tower_http=debug".into()),
            )
            .with(console_fmt)
            .init();
    });
}
