//! Ambient helpers shared by the metrics-librato crates: logging setup and
//! version metadata for the agent identifier.

pub mod logging;
pub mod version;

pub use version::AgentIdentifier;
pub use version::VersionError;
pub use version::VersionLookup;
