//! Tracer provider that exports spans to a local file.
//!
//! Plugins run inside the Zellij sandbox with no collector to talk to, so
//! finished spans are encoded as OTLP JSON and appended to a rotating file.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;

use super::file_writer::FileWriter;
use super::span_formatter::SpanFormatter;

/// Span exporter that appends OTLP JSON batches to a rotating file.
///
/// Each exported batch becomes one line holding a full `resourceSpans`
/// document, so the file can be replayed line by line into a collector.
struct OtlpFileExporter {
    /// Rotating trace file.
    writer: FileWriter,
    /// Encodes batches with the plugin's resource attributes.
    formatter: SpanFormatter,
    /// Set by `shutdown`; later exports fail.
    stopped: AtomicBool,
}

impl OtlpFileExporter {
    /// Creates an exporter writing to `file_path`.
    ///
    /// # Parameters
    ///
    /// * `file_path` - Trace file, rotated by [`FileWriter`]
    /// * `resource` - Resource attributes stamped on every batch
    const fn new(file_path: PathBuf, resource: Resource) -> Self {
        Self {
            writer: FileWriter::new(file_path),
            formatter: SpanFormatter::new(resource),
            stopped: AtomicBool::new(false),
        }
    }

    /// Encodes `batch` and appends it as one line.
    ///
    /// # Returns
    ///
    /// - `Ok(())` once the line is written
    /// - `Err(TraceError)` after shutdown or when the write fails
    fn write_batch(&self, batch: &[SpanData]) -> ExportResult {
        if self.stopped.load(Ordering::SeqCst) {
            return Err(TraceError::from("file exporter is shut down"));
        }

        let line = self.formatter.format_batch(batch).to_string();
        self.writer.write_line(&line).map_err(|e| TraceError::from(e.to_string()))
    }
}

impl SpanExporter for OtlpFileExporter {
    /// Writes the whole batch as one JSON line.
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = self.write_batch(&batch);
        Box::pin(std::future::ready(result))
    }

    /// Stops accepting batches. The file handle closes when the writer drops.
    fn shutdown(&mut self) {
        self.stopped.store(true, Ordering::SeqCst);
    }
}

impl std::fmt::Debug for OtlpFileExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OtlpFileExporter")
            .field("writer", &self.writer)
            .field("stopped", &self.stopped)
            .finish_non_exhaustive()
    }
}

/// Builds a provider that exports every span synchronously to `file_path`.
///
/// # Parameters
///
/// * `file_path` - Trace file location, usually `<data dir>/zroster-otlp.json`
/// * `resource` - Service attributes shared by the exporter and provider
///
/// # Returns
///
/// A provider ready to back a `tracing_opentelemetry` layer.
///
/// The simple exporter is used because the plugin has no async runtime to
/// drive a batch processor.
pub fn create_tracer_provider(file_path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = OtlpFileExporter::new(file_path, resource.clone());

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::KeyValue;

    #[test]
    fn writes_one_line_per_batch_until_shutdown() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let mut exporter =
            OtlpFileExporter::new(path.clone(), Resource::new(vec![KeyValue::new("service.name", "Zroster")]));

        exporter.write_batch(&[]).unwrap();
        exporter.write_batch(&[]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap().lines().count(), 2);

        exporter.shutdown();
        assert!(exporter.write_batch(&[]).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap().lines().count(), 2);
    }
}
