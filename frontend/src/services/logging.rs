use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

pub type SharedError = Arc<dyn StdError + Send + Sync + 'static>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
        };
        f.write_str(name)
    }
}

/// A failure handed to the host application for routing
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub severity: Severity,
    /// Component that observed the failure, e.g. "NewBill"
    pub source: String,
    pub message: String,
    /// The original error, untouched
    pub cause: Option<SharedError>,
}

impl ErrorReport {
    pub fn new(severity: Severity, source: &str, message: impl Into<String>) -> Self {
        Self {
            severity,
            source: source.to_string(),
            message: message.into(),
            cause: None,
        }
    }

    /// Build an error-level report whose message is the cause's own message
    pub fn from_error<E>(source: &str, cause: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            severity: Severity::Error,
            source: source.to_string(),
            message: cause.to_string(),
            cause: Some(Arc::new(cause)),
        }
    }

    /// Like `from_error`, for a cause the caller also hands on elsewhere
    pub fn from_shared(source: &str, cause: SharedError) -> Self {
        Self {
            severity: Severity::Error,
            source: source.to_string(),
            message: cause.to_string(),
            cause: Some(cause),
        }
    }
}

/// Operator-facing diagnostic channel
///
/// Hosts route reports wherever they want (console, telemetry, ...). The
/// default implementation forwards them to `tracing`.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, report: ErrorReport);
}

/// Reporter that emits each report as a `tracing` event
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, report: ErrorReport) {
        let cause = report
            .cause
            .as_ref()
            .map(|c| format!("{:?}", c))
            .unwrap_or_default();
        match report.severity {
            Severity::Debug => debug!(source = %report.source, cause = %cause, "{}", report.message),
            Severity::Info => info!(source = %report.source, cause = %cause, "{}", report.message),
            Severity::Warn => warn!(source = %report.source, cause = %cause, "{}", report.message),
            Severity::Error => error!(source = %report.source, cause = %cause, "{}", report.message),
        }
    }
}

/// Component-tagged log helpers
pub struct Logger;

impl Logger {
    pub fn debug_with_component(component: &str, message: &str) {
        debug!("[{}] {}", component, message);
    }

    pub fn info_with_component(component: &str, message: &str) {
        info!("[{}] {}", component, message);
    }

    pub fn warn_with_component(component: &str, message: &str) {
        warn!("[{}] {}", component, message);
    }
}

/// Install a global `tracing` subscriber filtered by `RUST_LOG` (default `info`)
///
/// Returns an error when a global subscriber is already set.
pub fn init_logging() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}
