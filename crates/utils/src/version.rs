//! Version metadata lookup and the agent identifier sent with every batch.

use std::fmt;
use std::path::Path;
use std::path::PathBuf;

use thiserror::Error;

/// Placeholder used whenever a version cannot be determined.
pub const UNKNOWN_VERSION: &str = "unknown";

/// Name the remote service knows this client library by.
pub const LIBRARY_NAME: &str = "metrics-librato";

#[derive(Error, Debug)]
pub enum VersionError {
    #[error("Failed to read version metadata from `{path}`")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No `version` entry in version metadata")]
    MissingKey,

    #[error("`version` entry in version metadata is empty")]
    EmptyValue,
}

/// Outcome of looking up a component version.
///
/// A failed lookup degrades to [`UNKNOWN_VERSION`] and keeps the reason so
/// callers can inspect both branches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionLookup {
    Resolved(String),
    Unavailable { reason: String },
}

impl VersionLookup {
    pub fn resolved(version: impl Into<String>) -> Self {
        VersionLookup::Resolved(version.into())
    }

    /// Run `resolver`, logging and absorbing any failure.
    pub fn resolve<F>(component: &str, resolver: F) -> Self
    where
        F: FnOnce() -> Result<String, VersionError>,
    {
        match resolver() {
            Ok(version) => VersionLookup::Resolved(version),
            Err(err) => {
                tracing::warn!(
                    msg = "Failure reading package version, using placeholder",
                    component,
                    error = %err,
                );
                VersionLookup::Unavailable {
                    reason: err.to_string(),
                }
            }
        }
    }

    /// Lookup from an optional compile-time or configured value.
    pub fn from_option(component: &str, version: Option<&str>) -> Self {
        Self::resolve(component, || match version.map(str::trim) {
            Some("") => Err(VersionError::EmptyValue),
            Some(version) => Ok(version.to_string()),
            None => Err(VersionError::MissingKey),
        })
    }

    /// Lookup from a properties file carrying a `version=` line.
    pub fn from_properties_file(component: &str, path: impl AsRef<Path>) -> Self {
        Self::resolve(component, || read_properties_version(path))
    }

    pub fn version(&self) -> &str {
        match self {
            VersionLookup::Resolved(version) => version,
            VersionLookup::Unavailable { .. } => UNKNOWN_VERSION,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, VersionLookup::Resolved(_))
    }
}

/// Read the `version` entry of a properties file.
pub fn read_properties_version(path: impl AsRef<Path>) -> Result<String, VersionError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| VersionError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_properties_version(&text)
}

/// Extract the first `version=<value>` entry, skipping comments.
pub fn parse_properties_version(text: &str) -> Result<String, VersionError> {
    let value = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('#') && !line.starts_with('!'))
        .filter_map(|line| line.split_once('='))
        .find(|(key, _)| key.trim() == "version")
        .map(|(_, value)| value.trim())
        .ok_or(VersionError::MissingKey)?;

    if value.is_empty() {
        return Err(VersionError::EmptyValue);
    }
    Ok(value.to_string())
}

/// Client identifier in the form
/// `metrics-librato/<library-version> metrics/<instrumentation-version>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentIdentifier {
    library: VersionLookup,
    instrumentation: VersionLookup,
}

impl AgentIdentifier {
    pub fn new(library: VersionLookup, instrumentation: VersionLookup) -> Self {
        Self {
            library,
            instrumentation,
        }
    }

    pub fn library(&self) -> &VersionLookup {
        &self.library
    }

    pub fn instrumentation(&self) -> &VersionLookup {
        &self.instrumentation
    }
}

impl fmt::Display for AgentIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{LIBRARY_NAME}/{} metrics/{}",
            self.library.version(),
            self.instrumentation.version()
        )
    }
}
