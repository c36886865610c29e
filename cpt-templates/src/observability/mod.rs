//! Observability (logging and tracing)
//!
//! Structured logging through `tracing`. Library code logs registrations at
//! `info` and template decisions at `debug`/`trace`.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber
///
/// Sets up:
/// - Structured logging with JSON formatting (release) or pretty formatting (debug)
/// - Environment-based log level filtering via `RUST_LOG`
///
/// # Example
///
/// ```rust,no_run
/// use cpt_templates::observability;
///
/// # fn main() -> anyhow::Result<()> {
/// observability::init()?;
/// tracing::info!("Site starting");
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns error if a global subscriber is already installed.
pub fn init() -> anyhow::Result<()> {
    init_with(&ObservabilityConfig::default())
}

/// Initialize the tracing subscriber with explicit settings
///
/// # Errors
///
/// Returns error if a global subscriber is already installed.
pub fn init_with(config: &ObservabilityConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_filter()));

    if config.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init()?;
    }

    tracing::debug!(service = %config.service_name, "Tracing initialized");
    Ok(())
}

/// Observability configuration
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Service name recorded on startup
    pub service_name: String,

    /// Emit JSON lines instead of pretty output
    pub json: bool,

    /// Verbose default filter when `RUST_LOG` is unset
    pub verbose: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            service_name: "cpt-templates".to_string(),
            json: !cfg!(debug_assertions),
            verbose: cfg!(debug_assertions),
        }
    }
}

impl ObservabilityConfig {
    /// Create new observability config
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            ..Default::default()
        }
    }

    /// Emit JSON lines
    #[must_use]
    pub const fn with_json(mut self) -> Self {
        self.json = true;
        self
    }

    /// Use the verbose default filter
    #[must_use]
    pub const fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Filter directive used when `RUST_LOG` is unset
    #[must_use]
    pub const fn default_filter(&self) -> &'static str {
        if self.verbose {
            "debug,cpt_templates=trace"
        } else {
            "warn"
        }
    }
}
