//! Tracing initialization and subscriber setup.

use super::tracer;
use crate::domain::error::Result;
use crate::infrastructure::paths;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use std::path::PathBuf;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const SERVICE_NAME: &str = "contactbook";

/// Trace file location for `config`: `trace_file` if set, otherwise
/// [`paths::TRACE_FILE_NAME`] inside the data directory.
#[must_use]
pub fn trace_file_path(config: &Config) -> PathBuf {
    config.trace_file.as_deref().map_or_else(
        || paths::get_data_dir(config.data_dir.as_deref()).join(paths::TRACE_FILE_NAME),
        paths::expand_tilde,
    )
}

/// Installs the global subscriber: an `EnvFilter` at `config.trace_level`
/// (default `"info"`) feeding an OpenTelemetry layer that exports to the
/// trace file.
///
/// Returns the trace file path. Calling it again after a subscriber is
/// installed leaves the first one in place.
///
/// # Errors
///
/// Returns [`crate::ContactsError::Io`] if the trace file's directory cannot
/// be created.
///
/// # Example
///
/// ```rust,no_run
/// use contactbook::observability::init_tracing;
/// use contactbook::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
/// let trace_file = init_tracing(&config)?;
/// tracing::debug!(path = %trace_file.display(), "tracing is now active");
/// # Ok::<(), contactbook::ContactsError>(())
/// ```
pub fn init_tracing(config: &Config) -> Result<PathBuf> {
    let level = config.trace_level.as_deref().unwrap_or("info");

    let trace_file = trace_file_path(config);
    if let Some(parent) = trace_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let resource = Resource::new(vec![
        opentelemetry::KeyValue::new("service.name", SERVICE_NAME),
        opentelemetry::KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let provider = tracer::create_tracer_provider(trace_file.clone(), resource, SERVICE_NAME);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let installed = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(otel_layer)
        .try_init()
        .is_ok();

    tracing::debug!(installed, level, trace_file = %trace_file.display(), "tracing initialized");
    Ok(trace_file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn explicit_trace_file_is_used_verbatim() {
        let config = Config {
            trace_file: Some(PathBuf::from("/tmp/contactbook/trace.json")),
            ..Config::default()
        };
        assert_eq!(trace_file_path(&config), PathBuf::from("/tmp/contactbook/trace.json"));
    }

    #[test]
    fn default_trace_file_lives_in_data_dir() {
        let config = Config {
            data_dir: Some(PathBuf::from("/var/lib/contactbook")),
            ..Config::default()
        };
        assert_eq!(
            trace_file_path(&config),
            Path::new("/var/lib/contactbook").join(paths::TRACE_FILE_NAME)
        );
    }
}
