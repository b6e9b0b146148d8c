//! Sink contract consumed by the translator.

use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::sync::Mutex;

use crate::Measurement;

/// Accepts measurements one at a time.
///
/// Implementors own batching, transport and ordering. Within a single
/// translator call measurements arrive in emission order and must not be
/// reordered relative to each other.
pub trait MeasurementSink {
    fn accept(&self, measurement: Measurement);
}

impl<T: MeasurementSink + ?Sized> MeasurementSink for &T {
    fn accept(&self, measurement: Measurement) {
        (**self).accept(measurement)
    }
}

impl<T: MeasurementSink + ?Sized> MeasurementSink for Arc<T> {
    fn accept(&self, measurement: Measurement) {
        (**self).accept(measurement)
    }
}

impl<T: MeasurementSink + ?Sized> MeasurementSink for Box<T> {
    fn accept(&self, measurement: Measurement) {
        (**self).accept(measurement)
    }
}

/// Adapts a closure into a sink.
pub struct FnSink<F>(pub F);

impl<F> MeasurementSink for FnSink<F>
where
    F: Fn(Measurement),
{
    fn accept(&self, measurement: Measurement) {
        (self.0)(measurement)
    }
}

/// Forwards into a channel. A closed receiver drops the measurement.
impl MeasurementSink for Sender<Measurement> {
    fn accept(&self, measurement: Measurement) {
        if self.send(measurement).is_err() {
            tracing::debug!(msg = "Measurement receiver closed, dropping record");
        }
    }
}

/// Thread-safe in-memory sink, keeps records in arrival order.
#[derive(Debug, Default)]
pub struct CollectingSink {
    measurements: Mutex<Vec<Measurement>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything collected so far.
    pub fn snapshot(&self) -> Vec<Measurement> {
        self.measurements.lock().expect("poisoned").clone()
    }

    /// Take everything collected so far, leaving the sink empty.
    pub fn drain(&self) -> Vec<Measurement> {
        std::mem::take(&mut *self.measurements.lock().expect("poisoned"))
    }

    pub fn len(&self) -> usize {
        self.measurements.lock().expect("poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MeasurementSink for CollectingSink {
    fn accept(&self, measurement: Measurement) {
        self.measurements
            .lock()
            .expect("poisoned")
            .push(measurement);
    }
}
