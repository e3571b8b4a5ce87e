//! Subscriber setup: `EnvFilter` plus an OpenTelemetry layer.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::tracer;
use crate::Config;

/// Service name attached to every exported span.
pub const SERVICE_NAME: &str = "Zroster";

/// Trace file inside the plugin data directory.
pub const TRACE_FILE_NAME: &str = "zroster-otlp.json";

/// Filter directive used when `trace_level` is unset.
pub const DEFAULT_TRACE_LEVEL: &str = "info";

/// Installs the global subscriber.
///
/// Spans pass through an `EnvFilter` built from `config.trace_level` and are
/// exported to `<data dir>/zroster-otlp.json`. Tracing is optional: when the
/// data directory cannot be created, or a subscriber is already installed,
/// this returns without doing anything.
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or(DEFAULT_TRACE_LEVEL);
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_TRACE_LEVEL));

    let data_dir = crate::infrastructure::paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![
        KeyValue::new("service.name", SERVICE_NAME),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let provider = tracer::create_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let _ = tracing_subscriber::registry().with(filter).with(otel_layer).try_init();
}
