//! Snapshot-to-measurement translation for two instrumentation library versions.
//!
//! The [`Translator`] decomposes named instrumentation sources into
//! [`Measurement`] records and forwards each to a [`MeasurementSink`], the
//! batching client that posts them to the remote metrics service.
//!
//! # Overview
//!
//! - [`source`] defines one capability trait per statistical shape
//!   (percentiles, rates, sum/mean/max/min, scalar values).
//! - [`legacy`] and [`modern`] adapt each library version's native types to
//!   those traits and describe how their metrics decompose.
//! - [`variant`] holds the marker types selecting version-specific behaviour:
//!   the modern translator adds a summary record to sampled metrics and
//!   publishes meter counts as counters, the legacy translator derives
//!   summary counts from `sum / mean`.
//! - [`Reporter`] runs one reporting pass over a registry snapshot.
//! - [`config`] carries the pass-through construction parameters of the
//!   batching client, including the agent identifier.
//!
//! # Examples
//!
//! ```
//! use metrics_librato::modern;
//! use metrics_librato::CollectingSink;
//! use metrics_librato::Modern;
//! use metrics_librato::Translator;
//!
//! let sink = CollectingSink::new();
//! let translator = Translator::<_, Modern>::new(&sink);
//! translator.translate_gauge("queue.depth", &modern::Gauge::from(12_i64));
//! assert_eq!(sink.len(), 1);
//! ```

pub mod config;
pub mod error;
pub mod legacy;
pub mod modern;
pub mod reporter;
pub mod source;
pub mod translator;
pub mod variant;

pub use config::BatchConfig;
pub use config::BatchSettings;
pub use config::Sanitizer;
pub use config::TimeUnit;
pub use error::ConfigError;
pub use error::ConfigResult;
pub use measurement_types::CollectingSink;
pub use measurement_types::Measurement;
pub use measurement_types::MeasurementSink;
pub use reporter::ReportSummary;
pub use reporter::Reportable;
pub use reporter::Reporter;
pub use translator::derive_count;
pub use translator::Translator;
pub use variant::Legacy;
pub use variant::Modern;
pub use variant::Variant;
