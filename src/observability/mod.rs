//! OpenTelemetry tracing with file-based export.
//!
//! ```text
//! tracing → tracing-opentelemetry → opentelemetry_sdk → OtlpFileExporter → zroster-otlp.json
//! ```
//!
//! The trace file lives in the plugin data directory and rotates at 10 MB,
//! keeping three backups. The filter comes from the `trace_level` plugin
//! option and defaults to `info`.
//!
//! - [`init`]: subscriber setup
//! - [`tracer`]: provider and span exporter
//! - [`span_formatter`]: OTLP JSON encoding
//! - [`file_writer`]: rotating line writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, DEFAULT_TRACE_LEVEL, SERVICE_NAME, TRACE_FILE_NAME};
