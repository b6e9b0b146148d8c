//! Adapter for the older instrumentation library.
//!
//! Its snapshots hold percentiles only. Histograms and timers expose sum,
//! mean, max and min instead, so the summary record carries a count derived
//! from `sum / mean`. Meter counts are not guaranteed monotonic here and are
//! published as gauges. Gauges of this library hold arbitrary values and
//! are not translated.

use measurement_types::MeasurementSink;

use crate::reporter::Reportable;
use crate::source::HasCount;
use crate::source::HasPercentiles;
use crate::source::HasRate;
use crate::source::HasSumMeanMaxMin;
use crate::translator::Translator;
use crate::variant::Legacy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counter {
    pub count: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Snapshot {
    pub median: f64,
    pub p75: f64,
    pub p95: f64,
    pub p98: f64,
    pub p99: f64,
    pub p999: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Meter {
    pub count: i64,
    pub mean_rate: f64,
    pub one_minute_rate: f64,
    pub five_minute_rate: f64,
    pub fifteen_minute_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Histogram {
    pub snapshot: Snapshot,
    pub sum: f64,
    pub mean: f64,
    pub max: f64,
    pub min: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Timer {
    pub meter: Meter,
    pub snapshot: Snapshot,
    pub sum: f64,
    pub mean: f64,
    pub max: f64,
    pub min: f64,
}

/// Metrics of the older library that have a translation.
#[derive(Debug, Clone, PartialEq)]
pub enum Metric {
    Counter(Counter),
    Histogram(Histogram),
    Meter(Meter),
    Timer(Timer),
}

impl HasCount for Counter {
    fn count(&self) -> i64 {
        self.count
    }
}

impl HasPercentiles for Snapshot {
    fn median(&self) -> f64 {
        self.median
    }

    fn p75(&self) -> f64 {
        self.p75
    }

    fn p95(&self) -> f64 {
        self.p95
    }

    fn p98(&self) -> f64 {
        self.p98
    }

    fn p99(&self) -> f64 {
        self.p99
    }

    fn p999(&self) -> f64 {
        self.p999
    }
}

impl HasRate for Meter {
    fn count(&self) -> i64 {
        self.count
    }

    fn mean_rate(&self) -> f64 {
        self.mean_rate
    }

    fn one_minute_rate(&self) -> f64 {
        self.one_minute_rate
    }

    fn five_minute_rate(&self) -> f64 {
        self.five_minute_rate
    }

    fn fifteen_minute_rate(&self) -> f64 {
        self.fifteen_minute_rate
    }
}

impl HasSumMeanMaxMin for Histogram {
    fn sum(&self) -> f64 {
        self.sum
    }

    fn mean(&self) -> f64 {
        self.mean
    }

    fn max(&self) -> f64 {
        self.max
    }

    fn min(&self) -> f64 {
        self.min
    }
}

impl HasSumMeanMaxMin for Timer {
    fn sum(&self) -> f64 {
        self.sum
    }

    fn mean(&self) -> f64 {
        self.mean
    }

    fn max(&self) -> f64 {
        self.max
    }

    fn min(&self) -> f64 {
        self.min
    }
}

impl Reportable<Legacy> for Metric {
    fn report_to<K: MeasurementSink>(&self, name: &str, translator: &Translator<K, Legacy>) {
        match self {
            Metric::Counter(counter) => translator.translate_counter(name, counter),
            Metric::Histogram(histogram) => {
                translator.translate_summarizable(name, histogram);
                translator.translate_sampling(name, &histogram.snapshot);
            }
            Metric::Meter(meter) => translator.translate_metered(name, meter),
            Metric::Timer(timer) => {
                translator.translate_metered(name, &timer.meter);
                translator.translate_summarizable(name, timer);
                translator.translate_sampling(name, &timer.snapshot);
            }
        }
    }
}
