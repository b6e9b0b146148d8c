//! Shared measurement type definitions
//!
//! This crate contains the records handed from the snapshot translator to the
//! batching client, and the sink contract the batching client implements.

pub mod sink;

use serde::Deserialize;
use serde::Serialize;

pub use sink::CollectingSink;
pub use sink::FnSink;
pub use sink::MeasurementSink;

/// A single named value destined for the remote metrics service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Measurement {
    /// One scalar at one point in time.
    SingleValueGauge { name: String, value: f64 },
    /// A count that the remote service may treat as monotonic.
    Counter { name: String, value: i64 },
    /// Statistical summary of `count` samples.
    MultiSampleGauge {
        name: String,
        count: u64,
        sum: f64,
        max: f64,
        min: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        source: Option<String>,
    },
}

impl Measurement {
    pub fn gauge(name: impl Into<String>, value: f64) -> Self {
        Measurement::SingleValueGauge {
            name: name.into(),
            value,
        }
    }

    pub fn counter(name: impl Into<String>, value: i64) -> Self {
        Measurement::Counter {
            name: name.into(),
            value,
        }
    }

    pub fn multi_sample(name: impl Into<String>, summary: SampleStats) -> Self {
        Measurement::MultiSampleGauge {
            name: name.into(),
            count: summary.count,
            sum: summary.sum,
            max: summary.max,
            min: summary.min,
            source: None,
        }
    }

    /// Attach a source to a multi-sample record; other kinds are returned unchanged.
    pub fn with_source(mut self, new_source: Option<String>) -> Self {
        if let Measurement::MultiSampleGauge { source, .. } = &mut self {
            *source = new_source;
        }
        self
    }

    pub fn name(&self) -> &str {
        match self {
            Measurement::SingleValueGauge { name, .. }
            | Measurement::Counter { name, .. }
            | Measurement::MultiSampleGauge { name, .. } => name,
        }
    }

    pub fn kind(&self) -> MeasurementKind {
        match self {
            Measurement::SingleValueGauge { .. } => MeasurementKind::SingleValueGauge,
            Measurement::Counter { .. } => MeasurementKind::Counter,
            Measurement::MultiSampleGauge { .. } => MeasurementKind::MultiSampleGauge,
        }
    }
}

/// Discriminant of [`Measurement`], handy for sinks that route by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeasurementKind {
    SingleValueGauge,
    Counter,
    MultiSampleGauge,
}

impl std::fmt::Display for MeasurementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Count, sum and extremes of a group of samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleStats {
    pub count: u64,
    pub sum: f64,
    pub max: f64,
    pub min: f64,
}
