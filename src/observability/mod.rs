//! OpenTelemetry-based observability with file-based trace export.
//!
//! ```text
//! tracing → tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → JSON lines
//! ```
//!
//! Traces are written as OTLP JSON, one batch per line, to
//! `<data dir>/contactbook-otlp.json` unless `trace_file` is configured. The
//! file rotates at 10 MB and keeps three backups. The level comes from the
//! `trace_level` option and defaults to `"info"`.
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`navigation`]: Navigation snapshot dump
//! - `tracer`: Tracer provider with the file exporter
//! - `span_formatter`: OTLP JSON encoding
//! - `file_writer`: Rotating trace file

mod file_writer;
pub mod init;
pub mod navigation;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, trace_file_path};
