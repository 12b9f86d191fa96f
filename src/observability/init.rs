//! Subscriber setup: `tracing` → OpenTelemetry → OTLP/JSON file.

use super::export::{tracer_provider, SCOPE};
use crate::infrastructure::paths::get_data_dir;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File the spans are appended to, inside the plugin data directory.
pub const TRACE_FILE: &str = "zexplorer-otlp.json";

/// Installs the global subscriber.
///
/// The filter comes from `trace_level` (default `info`). Does nothing if the
/// data directory cannot be created or a subscriber is already installed, so
/// the plugin and its worker may both call it.
pub fn init_tracing(config: &Config) {
    let filter = config.trace_level.as_deref().unwrap_or("info");

    let data_dir = get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![
        KeyValue::new("service.name", SCOPE),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let provider = tracer_provider(data_dir.join(TRACE_FILE), resource);

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(filter))
        .with(OpenTelemetryLayer::new(provider.tracer(SCOPE)))
        .try_init();
}
