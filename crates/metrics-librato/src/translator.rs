//! Snapshot-to-measurement translation.
//!
//! A [`Translator`] decomposes one named instrumentation source into an ordered
//! run of [`Measurement`]s and hands each to its sink as soon as it is built.
//! It owns no state besides the sink and an optional source override, so
//! concurrent use is safe whenever the sink is.

use std::marker::PhantomData;

use measurement_types::Measurement;
use measurement_types::MeasurementSink;
use measurement_types::SampleStats;

use crate::source::HasCount;
use crate::source::HasPercentiles;
use crate::source::HasRate;
use crate::source::HasSampleSummary;
use crate::source::HasScalarValue;
use crate::source::HasSumMeanMaxMin;
use crate::source::PERCENTILE_SUFFIXES;
use crate::source::RATE_SUFFIXES;
use crate::variant::CountKind;
use crate::variant::Legacy;
use crate::variant::Modern;
use crate::variant::Variant;

/// Reconstruct a sample count from `sum / mean`.
///
/// Returns `None` when the ratio is NaN or infinite (any zero mean) or when
/// the rounded count is not positive; the remote service rejects such
/// records. Rounding is `f64::round`, half away from zero, so `0.5` gives `1`
/// and `2.5` gives `3`.
pub fn derive_count(sum: f64, mean: f64) -> Option<u64> {
    let count_calculation = sum / mean;
    if !count_calculation.is_finite() {
        return None;
    }

    let count_value = count_calculation.round();
    if count_value <= 0.0 {
        return None;
    }
    // Saturates above u64::MAX.
    Some(count_value as u64)
}

/// Translator for one library version `V`, forwarding into sink `K`.
pub struct Translator<K, V> {
    sink: K,
    source: Option<String>,
    _variant: PhantomData<fn() -> V>,
}

impl<K, V> Translator<K, V>
where
    K: MeasurementSink,
    V: Variant,
{
    pub fn new(sink: K) -> Self {
        Self {
            sink,
            source: None,
            _variant: PhantomData,
        }
    }

    /// Set the source attached to every multi-sample record.
    pub fn with_source(mut self, source: Option<String>) -> Self {
        self.source = source;
        self
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn into_sink(self) -> K {
        self.sink
    }

    /// `.count` followed by the four rates.
    ///
    /// The count is a [`Measurement::Counter`] only when the variant
    /// guarantees it never decreases; otherwise it is published as a gauge.
    pub fn translate_metered<M>(&self, name: &str, meter: &M)
    where
        M: HasRate + ?Sized,
    {
        let count_name = format!("{name}.count");
        let count = meter.count();
        match V::METER_COUNT {
            CountKind::Monotonic => self.emit(Measurement::counter(count_name, count)),
            CountKind::PointInTime => self.emit(Measurement::gauge(count_name, count as f64)),
        }

        for (suffix, rate) in RATE_SUFFIXES.iter().zip(meter.rates()) {
            self.emit(Measurement::gauge(format!("{name}{suffix}"), rate));
        }
    }

    /// Current value of a counter, published as a gauge since counters can
    /// be decremented.
    pub fn translate_counter<C>(&self, name: &str, counter: &C)
    where
        C: HasCount + ?Sized,
    {
        self.emit(Measurement::gauge(name, counter.count() as f64));
    }

    fn translate_percentiles<S>(&self, name: &str, snapshot: &S)
    where
        S: HasPercentiles + ?Sized,
    {
        for (suffix, value) in PERCENTILE_SUFFIXES.iter().zip(snapshot.percentiles()) {
            self.emit(Measurement::gauge(format!("{name}{suffix}"), value));
        }
    }

    fn emit_summary(&self, name: &str, stats: SampleStats) {
        self.emit(Measurement::multi_sample(name, stats).with_source(self.source.clone()));
    }

    fn emit(&self, measurement: Measurement) {
        self.sink.accept(measurement);
    }
}

impl<K> Translator<K, Modern>
where
    K: MeasurementSink,
{
    pub fn translate_gauge<G>(&self, name: &str, gauge: &G)
    where
        G: HasScalarValue + ?Sized,
    {
        self.emit(Measurement::gauge(name, gauge.value()));
    }

    /// Six percentile gauges, then a summary whose sum is rebuilt as
    /// `size * mean` because the snapshot keeps no raw sum.
    pub fn translate_sampling<S>(&self, name: &str, snapshot: &S)
    where
        S: HasPercentiles + HasSampleSummary + ?Sized,
    {
        self.translate_percentiles(name, snapshot);

        let size = snapshot.size();
        self.emit_summary(name, SampleStats {
            count: size,
            sum: size as f64 * HasSampleSummary::mean(snapshot),
            max: HasSampleSummary::max(snapshot),
            min: HasSampleSummary::min(snapshot),
        });
    }
}

impl<K> Translator<K, Legacy>
where
    K: MeasurementSink,
{
    /// Six percentile gauges; the summary comes from
    /// [`Translator::translate_summarizable`] instead.
    pub fn translate_sampling<S>(&self, name: &str, snapshot: &S)
    where
        S: HasPercentiles + ?Sized,
    {
        self.translate_percentiles(name, snapshot);
    }

    /// One summary record with a count derived from `sum / mean`, or nothing
    /// when [`derive_count`] finds no usable count.
    pub fn translate_summarizable<S>(&self, name: &str, summarizable: &S)
    where
        S: HasSumMeanMaxMin + ?Sized,
    {
        let sum = summarizable.sum();
        let Some(count) = derive_count(sum, HasSumMeanMaxMin::mean(summarizable)) else {
            return;
        };

        self.emit_summary(name, SampleStats {
            count,
            sum,
            max: HasSumMeanMaxMin::max(summarizable),
            min: HasSumMeanMaxMin::min(summarizable),
        });
    }
}

#[cfg(test)]
mod tests {
    use measurement_types::CollectingSink;
    use similar_asserts::assert_eq;
    use test_log::test;

    use super::*;

    struct Percentiles;

    impl HasPercentiles for Percentiles {
        fn median(&self) -> f64 {
            1.0
        }
        fn p75(&self) -> f64 {
            2.0
        }
        fn p95(&self) -> f64 {
            3.0
        }
        fn p98(&self) -> f64 {
            4.0
        }
        fn p99(&self) -> f64 {
            5.0
        }
        fn p999(&self) -> f64 {
            6.0
        }
    }

    impl HasSampleSummary for Percentiles {
        fn size(&self) -> u64 {
            500
        }
        fn mean(&self) -> f64 {
            2.5
        }
        fn max(&self) -> f64 {
            9.0
        }
        fn min(&self) -> f64 {
            0.5
        }
    }

    struct Rates;

    impl HasRate for Rates {
        fn count(&self) -> i64 {
            42
        }
        fn mean_rate(&self) -> f64 {
            0.1
        }
        fn one_minute_rate(&self) -> f64 {
            0.2
        }
        fn five_minute_rate(&self) -> f64 {
            0.3
        }
        fn fifteen_minute_rate(&self) -> f64 {
            0.4
        }
    }

    struct Summarizable {
        sum: f64,
        mean: f64,
    }

    impl HasSumMeanMaxMin for Summarizable {
        fn sum(&self) -> f64 {
            self.sum
        }
        fn mean(&self) -> f64 {
            self.mean
        }
        fn max(&self) -> f64 {
            30.0
        }
        fn min(&self) -> f64 {
            -1.0
        }
    }

    fn percentile_gauges(name: &str) -> Vec<Measurement> {
        vec![
            Measurement::gauge(format!("{name}.median"), 1.0),
            Measurement::gauge(format!("{name}.75th"), 2.0),
            Measurement::gauge(format!("{name}.95th"), 3.0),
            Measurement::gauge(format!("{name}.98th"), 4.0),
            Measurement::gauge(format!("{name}.99th"), 5.0),
            Measurement::gauge(format!("{name}.999th"), 6.0),
        ]
    }

    fn summarize(sum: f64, mean: f64) -> Vec<Measurement> {
        let sink = CollectingSink::new();
        Translator::<_, Legacy>::new(&sink).translate_summarizable("h", &Summarizable { sum, mean });
        sink.drain()
    }

    #[test]
    fn derive_count_examples() {
        assert_eq!(derive_count(100.0, 25.0), Some(4));
        assert_eq!(derive_count(0.0, 0.0), None);
        assert_eq!(derive_count(-10.0, 5.0), None);
        assert_eq!(derive_count(10.0, 0.0), None);
        assert_eq!(derive_count(-10.0, 0.0), None);
        assert_eq!(derive_count(f64::NAN, 1.0), None);
        assert_eq!(derive_count(f64::INFINITY, 1.0), None);
        assert_eq!(derive_count(0.0, 5.0), None);
    }

    #[test]
    fn derive_count_rounds_half_away_from_zero() {
        assert_eq!(derive_count(0.5, 1.0), Some(1));
        assert_eq!(derive_count(2.5, 1.0), Some(3));
        assert_eq!(derive_count(3.5, 1.0), Some(4));
        assert_eq!(derive_count(2.49, 1.0), Some(2));
        assert_eq!(derive_count(0.49, 1.0), None);
        assert_eq!(derive_count(-0.5, 1.0), None);
    }

    #[test]
    fn derive_count_negative_over_negative_is_positive() {
        assert_eq!(derive_count(-12.0, -3.0), Some(4));
    }

    #[test]
    fn modern_sampling_emits_percentiles_then_summary() {
        let sink = CollectingSink::new();
        Translator::<_, Modern>::new(&sink).translate_sampling("latency", &Percentiles);

        let mut expected = percentile_gauges("latency");
        expected.push(Measurement::MultiSampleGauge {
            name: "latency".to_string(),
            count: 500,
            sum: 1250.0,
            max: 9.0,
            min: 0.5,
            source: None,
        });
        assert_eq!(sink.drain(), expected);
    }

    #[test]
    fn legacy_sampling_emits_only_percentiles() {
        let sink = CollectingSink::new();
        Translator::<_, Legacy>::new(&sink).translate_sampling("latency", &Percentiles);
        assert_eq!(sink.drain(), percentile_gauges("latency"));
    }

    #[test]
    fn modern_metered_count_is_counter() {
        let sink = CollectingSink::new();
        Translator::<_, Modern>::new(&sink).translate_metered("requests", &Rates);
        assert_eq!(sink.drain(), vec![
            Measurement::counter("requests.count", 42),
            Measurement::gauge("requests.meanRate", 0.1),
            Measurement::gauge("requests.1MinuteRate", 0.2),
            Measurement::gauge("requests.5MinuteRate", 0.3),
            Measurement::gauge("requests.15MinuteRate", 0.4),
        ]);
    }

    #[test]
    fn legacy_metered_count_is_gauge() {
        let sink = CollectingSink::new();
        Translator::<_, Legacy>::new(&sink).translate_metered("requests", &Rates);
        let emitted = sink.drain();
        assert_eq!(emitted.len(), 5);
        assert_eq!(emitted[0], Measurement::gauge("requests.count", 42.0));
        assert_eq!(emitted[4], Measurement::gauge("requests.15MinuteRate", 0.4));
    }

    #[test]
    fn gauge_and_counter_pass_through() {
        let sink = CollectingSink::new();
        let translator = Translator::<_, Modern>::new(&sink);
        translator.translate_gauge("queue.depth", &7.5_f64);
        translator.translate_counter("jobs", &-3_i64);
        assert_eq!(sink.drain(), vec![
            Measurement::gauge("queue.depth", 7.5),
            Measurement::gauge("jobs", -3.0),
        ]);
    }

    #[test]
    fn summarizable_emits_derived_count() {
        assert_eq!(summarize(100.0, 25.0), vec![Measurement::MultiSampleGauge {
            name: "h".to_string(),
            count: 4,
            sum: 100.0,
            max: 30.0,
            min: -1.0,
            source: None,
        }]);
    }

    #[test]
    fn summarizable_suppresses_nan_and_infinite() {
        assert!(summarize(0.0, 0.0).is_empty());
        assert!(summarize(7.0, 0.0).is_empty());
        assert!(summarize(f64::NAN, 2.0).is_empty());
    }

    #[test]
    fn summarizable_suppresses_non_positive_count() {
        assert!(summarize(-10.0, 5.0).is_empty());
        assert!(summarize(0.0, 5.0).is_empty());
        assert!(summarize(0.4, 1.0).is_empty());
    }

    #[test]
    fn source_override_applies_to_summaries_only() {
        let sink = CollectingSink::new();
        let translator = Translator::<_, Legacy>::new(&sink).with_source(Some("web-1".to_string()));
        translator.translate_summarizable("h", &Summarizable { sum: 9.0, mean: 3.0 });
        translator.translate_counter("c", &1_i64);

        let emitted = sink.drain();
        match &emitted[0] {
            Measurement::MultiSampleGauge { count, source, .. } => {
                assert_eq!(*count, 3);
                assert_eq!(source.as_deref(), Some("web-1"));
            }
            other => panic!("Expected MultiSampleGauge, got {other:?}"),
        }
        assert_eq!(emitted[1], Measurement::gauge("c", 1.0));
    }

    #[test]
    fn translator_does_not_mutate_inputs() {
        let sink = CollectingSink::new();
        let input = Summarizable { sum: 100.0, mean: 25.0 };
        let translator = Translator::<_, Legacy>::new(&sink);
        translator.translate_summarizable("h", &input);
        translator.translate_summarizable("h", &input);
        let emitted = sink.drain();
        assert_eq!(emitted.len(), 2);
        assert_eq!(emitted[0], emitted[1]);
    }
}
