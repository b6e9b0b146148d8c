//! Batch client configuration.
//!
//! Everything here is handed to the batching client untouched; the
//! translator itself never reads it.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use error_stack::Report;
use error_stack::ResultExt;
use serde::Deserialize;
use utils::version::LIBRARY_NAME;
use utils::AgentIdentifier;
use utils::VersionError;
use utils::VersionLookup;

use crate::error::ConfigError;
use crate::error::ConfigResult;

/// Name of the instrumentation library in version lookups.
const INSTRUMENTATION_COMPONENT: &str = "metrics-core";

/// Version of this crate, as recorded at build time.
pub fn library_version() -> VersionLookup {
    VersionLookup::from_option(LIBRARY_NAME, option_env!("CARGO_PKG_VERSION"))
}

/// Unit of the configured network timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Nanoseconds,
    Microseconds,
    Milliseconds,
    #[default]
    Seconds,
    Minutes,
    Hours,
}

impl TimeUnit {
    pub fn to_duration(self, value: u64) -> Duration {
        match self {
            TimeUnit::Nanoseconds => Duration::from_nanos(value),
            TimeUnit::Microseconds => Duration::from_micros(value),
            TimeUnit::Milliseconds => Duration::from_millis(value),
            TimeUnit::Seconds => Duration::from_secs(value),
            TimeUnit::Minutes => Duration::from_secs(value.saturating_mul(60)),
            TimeUnit::Hours => Duration::from_secs(value.saturating_mul(3600)),
        }
    }
}

/// Metric-name sanitizer passed through to the batching client.
#[derive(Clone)]
pub struct Sanitizer(Arc<dyn Fn(&str) -> String + Send + Sync>);

impl Sanitizer {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Leaves names as they are.
    pub fn identity() -> Self {
        Self::new(str::to_string)
    }

    pub fn apply(&self, name: &str) -> String {
        (self.0)(name)
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Debug for Sanitizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Sanitizer(..)")
    }
}

/// Batch settings as read from a configuration file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BatchSettings {
    /// Maximum measurements per posted batch
    pub post_batch_size: usize,
    /// Network timeout, in `timeout_unit`
    pub timeout: u64,
    pub timeout_unit: TimeUnit,
    /// Default source for multi-sample records
    pub source: Option<String>,
    /// Instrumentation library version, if known up front
    pub instrumentation_version: Option<String>,
    /// Properties file with a `version=` entry for the instrumentation library
    pub instrumentation_version_file: Option<PathBuf>,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            post_batch_size: 300,
            timeout: 10,
            timeout_unit: TimeUnit::Seconds,
            source: None,
            instrumentation_version: None,
            instrumentation_version_file: None,
        }
    }
}

impl BatchSettings {
    pub fn from_yaml_str(text: &str) -> ConfigResult<Self> {
        let settings: Self = serde_yaml::from_str(text).change_context(ConfigError::Parse)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.post_batch_size == 0 {
            return Err(Report::new(ConfigError::invalid(
                "postBatchSize",
                "must be greater than zero",
            )));
        }
        if self.timeout == 0 {
            return Err(Report::new(ConfigError::invalid(
                "timeout",
                "must be greater than zero",
            ))
            .attach_printable(format!("timeout unit: {:?}", self.timeout_unit)));
        }
        if matches!(&self.source, Some(source) if source.trim().is_empty()) {
            return Err(Report::new(ConfigError::invalid("source", "must not be blank")));
        }
        Ok(())
    }

    pub fn timeout_duration(&self) -> Duration {
        self.timeout_unit.to_duration(self.timeout)
    }

    /// Explicit version wins over the properties file; with neither the
    /// lookup degrades to the placeholder.
    pub fn instrumentation_version(&self) -> VersionLookup {
        match (&self.instrumentation_version, &self.instrumentation_version_file) {
            (Some(version), _) => {
                VersionLookup::from_option(INSTRUMENTATION_COMPONENT, Some(version.as_str()))
            }
            (None, Some(path)) => {
                VersionLookup::from_properties_file(INSTRUMENTATION_COMPONENT, path)
            }
            (None, None) => {
                VersionLookup::resolve(INSTRUMENTATION_COMPONENT, || Err(VersionError::MissingKey))
            }
        }
    }

    pub fn agent_identifier(&self) -> AgentIdentifier {
        AgentIdentifier::new(library_version(), self.instrumentation_version())
    }
}

/// Construction parameters of the batching client.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub post_batch_size: usize,
    pub sanitizer: Sanitizer,
    pub timeout: Duration,
    pub agent_identifier: String,
    pub source: Option<String>,
}

impl BatchConfig {
    pub fn new(
        post_batch_size: usize,
        sanitizer: Sanitizer,
        timeout: u64,
        timeout_unit: TimeUnit,
        agent_identifier: &AgentIdentifier,
    ) -> Self {
        Self {
            post_batch_size,
            sanitizer,
            timeout: timeout_unit.to_duration(timeout),
            agent_identifier: agent_identifier.to_string(),
            source: None,
        }
    }

    pub fn from_settings(settings: &BatchSettings, sanitizer: Sanitizer) -> ConfigResult<Self> {
        settings.validate()?;
        let identifier = settings.agent_identifier();
        tracing::info!(
            msg = "Batch configuration loaded",
            post_batch_size = settings.post_batch_size,
            timeout = ?settings.timeout_duration(),
            agent_identifier = %identifier,
        );
        Ok(Self {
            source: settings.source.clone(),
            ..Self::new(
                settings.post_batch_size,
                sanitizer,
                settings.timeout,
                settings.timeout_unit,
                &identifier,
            )
        })
    }

    pub fn with_source(mut self, source: Option<String>) -> Self {
        self.source = source;
        self
    }
}
