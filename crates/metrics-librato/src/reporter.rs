//! One reporting pass over a set of named metrics.

use std::cell::Cell;
use std::marker::PhantomData;

use measurement_types::Measurement;
use measurement_types::MeasurementSink;

use crate::translator::Translator;
use crate::variant::Variant;

/// A metric that knows how to decompose itself through a translator of
/// library version `V`.
pub trait Reportable<V: Variant> {
    fn report_to<K: MeasurementSink>(&self, name: &str, translator: &Translator<K, V>);
}

/// Predicate deciding by name whether a metric is reported.
pub type MetricFilter = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// Totals of a reporting pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReportSummary {
    /// Metrics handed to the translator.
    pub metrics: usize,
    /// Measurements forwarded to the sink.
    pub measurements: usize,
}

struct CountingSink<'a, K> {
    inner: &'a K,
    forwarded: Cell<usize>,
}

impl<K: MeasurementSink> MeasurementSink for CountingSink<'_, K> {
    fn accept(&self, measurement: Measurement) {
        self.forwarded.set(self.forwarded.get() + 1);
        self.inner.accept(measurement);
    }
}

/// Walks a registry snapshot once per call and forwards every metric.
pub struct Reporter<K, V> {
    sink: K,
    source: Option<String>,
    filter: Option<MetricFilter>,
    _variant: PhantomData<fn() -> V>,
}

impl<K, V> Reporter<K, V>
where
    K: MeasurementSink,
    V: Variant,
{
    pub fn new(sink: K) -> Self {
        Self {
            sink,
            source: None,
            filter: None,
            _variant: PhantomData,
        }
    }

    /// Source attached to every multi-sample record.
    pub fn with_source(mut self, source: Option<String>) -> Self {
        self.source = source;
        self
    }

    /// Only report metrics whose name passes `filter`.
    pub fn with_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Box::new(filter));
        self
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn report<'a, M, I>(&self, metrics: I) -> ReportSummary
    where
        M: Reportable<V> + 'a,
        I: IntoIterator<Item = (&'a str, &'a M)>,
    {
        let counting = CountingSink {
            inner: &self.sink,
            forwarded: Cell::new(0),
        };
        let translator = Translator::<_, V>::new(&counting).with_source(self.source.clone());

        let mut reported = 0;
        for (name, metric) in metrics {
            if let Some(filter) = &self.filter {
                if !filter(name) {
                    tracing::trace!(msg = "Metric filtered out", name);
                    continue;
                }
            }
            metric.report_to(name, &translator);
            reported += 1;
        }

        let summary = ReportSummary {
            metrics: reported,
            measurements: counting.forwarded.get(),
        };
        tracing::debug!(
            msg = "Reporting pass complete",
            variant = V::NAME,
            metrics = summary.metrics,
            measurements = summary.measurements,
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use measurement_types::CollectingSink;
    use similar_asserts::assert_eq;
    use test_log::test;

    use super::*;
    use crate::legacy;
    use crate::modern;
    use crate::variant::Legacy;
    use crate::variant::Modern;

    #[test]
    fn modern_pass_counts_metrics_and_measurements() {
        let mut registry = BTreeMap::new();
        registry.insert("a.gauge".to_string(), modern::Metric::Gauge(modern::Gauge::from(1.0_f64)));
        registry.insert(
            "b.meter".to_string(),
            modern::Metric::Meter(modern::Meter::default()),
        );
        registry.insert(
            "c.timer".to_string(),
            modern::Metric::Timer(modern::Timer::default()),
        );

        let sink = CollectingSink::new();
        let reporter = Reporter::<_, Modern>::new(&sink);
        let summary = reporter.report(registry.iter().map(|(k, v)| (k.as_str(), v)));

        assert_eq!(summary, ReportSummary {
            metrics: 3,
            measurements: 1 + 5 + 12,
        });
        assert_eq!(sink.len(), 18);
        assert_eq!(sink.snapshot()[0], Measurement::gauge("a.gauge", 1.0));
    }

    #[test]
    fn filter_skips_metrics() {
        let metrics = [
            ("keep.counter", legacy::Metric::Counter(legacy::Counter { count: 1 })),
            ("drop.counter", legacy::Metric::Counter(legacy::Counter { count: 2 })),
        ];

        let sink = CollectingSink::new();
        let reporter =
            Reporter::<_, Legacy>::new(&sink).with_filter(|name| name.starts_with("keep."));
        let summary = reporter.report(metrics.iter().map(|(k, v)| (*k, v)));

        assert_eq!(summary.metrics, 1);
        assert_eq!(sink.drain(), vec![Measurement::gauge("keep.counter", 1.0)]);
    }

    #[test]
    fn suppressed_summaries_are_not_counted() {
        let metrics = [(
            "idle",
            legacy::Metric::Histogram(legacy::Histogram::default()),
        )];

        let sink = CollectingSink::new();
        let summary = Reporter::<_, Legacy>::new(&sink).report(metrics.iter().map(|(k, v)| (*k, v)));

        assert_eq!(summary.measurements, 6);
    }

    #[test]
    fn source_reaches_summary_records() {
        let metrics = [(
            "h",
            modern::Metric::Histogram(modern::Histogram::default()),
        )];

        let sink = CollectingSink::new();
        Reporter::<_, Modern>::new(&sink)
            .with_source(Some("host-a".to_string()))
            .report(metrics.iter().map(|(k, v)| (*k, v)));

        match sink.drain().pop() {
            Some(Measurement::MultiSampleGauge { source, .. }) => {
                assert_eq!(source.as_deref(), Some("host-a"))
            }
            other => panic!("Expected MultiSampleGauge, got {other:?}"),
        }
    }
}
