use error_stack::ResultExt;
use opentelemetry::KeyValue;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::trace as sdktrace;
use opentelemetry_sdk::Resource;
use thiserror::Error;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Registry};

use crate::adapters::config::app_config::TelemetryConfig;
use crate::prettyprint::PrettyFormatter;

#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to create log file")]
    LogFile,
    #[error("Failed to install OTLP tracer")]
    Otlp,
    #[error("Failed to install tracing subscriber")]
    Subscriber,
}

/// Installs the global subscriber: pretty stderr output, a plain log file and,
/// when an endpoint is configured, OTLP span export.
///
/// `service_name` doubles as the crate target whose events are kept at TRACE.
pub fn setup_tracing(
    config: &TelemetryConfig,
    service_name: &'static str,
) -> error_stack::Result<(), TelemetryError> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(PrettyFormatter::new(true))
        .with_writer(std::io::stderr);

    let log_file = std::fs::File::create(&config.log_file)
        .change_context(TelemetryError::LogFile)
        .attach_printable_lazy(|| format!("Log file: {}", config.log_file.display()))?;

    let log_file_layer = tracing_subscriber::fmt::layer()
        .event_format(PrettyFormatter::new(false))
        .with_writer(log_file)
        .with_ansi(false);

    let otel_layer = match &config.otlp_endpoint {
        Some(endpoint) => {
            let exporter = opentelemetry_otlp::new_exporter()
                .tonic()
                .with_endpoint(endpoint);

            let tracer = opentelemetry_otlp::new_pipeline()
                .tracing()
                .with_exporter(exporter)
                .with_trace_config(sdktrace::config().with_resource(Resource::new(vec![
                    KeyValue::new("service.name", service_name),
                ])))
                .install_batch(opentelemetry_sdk::runtime::Tokio)
                .change_context(TelemetryError::Otlp)
                .attach_printable_lazy(|| format!("OTLP endpoint: {}", endpoint))?;

            Some(OpenTelemetryLayer::new(tracer))
        }
        None => None,
    };

    Registry::default()
        .with(
            tracing_subscriber::filter::Targets::new()
                .with_target(service_name, tracing::Level::TRACE)
                .with_target("staff_biodata_core", tracing::Level::TRACE)
                .with_default(tracing::Level::WARN),
        )
        .with(otel_layer)
        .with(log_file_layer)
        .with(stderr_layer)
        .try_init()
        .change_context(TelemetryError::Subscriber)
}

pub fn setup_panic_hook() {
    tracing::trace!("Setting panic hook");
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("panic: {info}");
        opentelemetry::global::shutdown_tracer_provider();
    }));
}

pub fn shutdown() {
    opentelemetry::global::shutdown_tracer_provider();
}
