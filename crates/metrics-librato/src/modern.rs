//! Adapter for the current instrumentation library.
//!
//! Snapshots carry their own size, mean and extremes, so sampled metrics get
//! their summary straight from the snapshot and meter counts are published
//! as monotonic counters.

use measurement_types::MeasurementSink;

use crate::reporter::Reportable;
use crate::source::HasCount;
use crate::source::HasPercentiles;
use crate::source::HasRate;
use crate::source::HasSampleSummary;
use crate::source::HasScalarValue;
use crate::translator::Translator;
use crate::variant::Modern;

/// Point-in-time numeric gauge reading.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Gauge {
    pub value: f64,
}

impl From<f64> for Gauge {
    fn from(value: f64) -> Self {
        Self { value }
    }
}

impl From<i64> for Gauge {
    fn from(value: i64) -> Self {
        Self {
            value: value as f64,
        }
    }
}

impl From<u64> for Gauge {
    fn from(value: u64) -> Self {
        Self {
            value: value as f64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counter {
    pub count: i64,
}

/// Statistical snapshot of a histogram or timer reservoir.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Snapshot {
    pub size: u64,
    pub median: f64,
    pub p75: f64,
    pub p95: f64,
    pub p98: f64,
    pub p99: f64,
    pub p999: f64,
    pub mean: f64,
    pub max: f64,
    pub min: f64,
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
    pub count: i64,
    pub snapshot: Snapshot,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Timer {
    pub meter: Meter,
    pub snapshot: Snapshot,
}

/// Any metric the current library registry can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum Metric {
    Gauge(Gauge),
    Counter(Counter),
    Histogram(Histogram),
    Meter(Meter),
    Timer(Timer),
}

impl HasScalarValue for Gauge {
    fn value(&self) -> f64 {
        self.value
    }
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

impl HasSampleSummary for Snapshot {
    fn size(&self) -> u64 {
        self.size
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

impl HasRate for Timer {
    fn count(&self) -> i64 {
        self.meter.count
    }

    fn mean_rate(&self) -> f64 {
        self.meter.mean_rate
    }

    fn one_minute_rate(&self) -> f64 {
        self.meter.one_minute_rate
    }

    fn five_minute_rate(&self) -> f64 {
        self.meter.five_minute_rate
    }

    fn fifteen_minute_rate(&self) -> f64 {
        self.meter.fifteen_minute_rate
    }
}

impl Reportable<Modern> for Metric {
    fn report_to<K: MeasurementSink>(&self, name: &str, translator: &Translator<K, Modern>) {
        match self {
            Metric::Gauge(gauge) => translator.translate_gauge(name, gauge),
            Metric::Counter(counter) => translator.translate_counter(name, counter),
            Metric::Histogram(histogram) => translator.translate_sampling(name, &histogram.snapshot),
            Metric::Meter(meter) => translator.translate_metered(name, meter),
            Metric::Timer(timer) => {
                translator.translate_metered(name, timer);
                translator.translate_sampling(name, &timer.snapshot);
            }
        }
    }
}
