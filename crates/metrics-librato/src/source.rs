//! Capability traits describing the statistical shape of an instrumentation
//! source. Each library-version adapter implements these on its native types.

/// Suffixes appended to the metric name for each percentile, in emission order.
pub const PERCENTILE_SUFFIXES: [&str; 6] = [".median", ".75th", ".95th", ".98th", ".99th", ".999th"];

/// Suffixes for the rate figures of a metered source, in emission order.
pub const RATE_SUFFIXES: [&str; 4] = [".meanRate", ".1MinuteRate", ".5MinuteRate", ".15MinuteRate"];

/// A single point-in-time value.
pub trait HasScalarValue {
    fn value(&self) -> f64;
}

/// A current count that may go up or down.
pub trait HasCount {
    fn count(&self) -> i64;
}

/// Precomputed percentiles of a sample set.
pub trait HasPercentiles {
    fn median(&self) -> f64;
    fn p75(&self) -> f64;
    fn p95(&self) -> f64;
    fn p98(&self) -> f64;
    fn p99(&self) -> f64;
    fn p999(&self) -> f64;

    /// All six values in the order of [`PERCENTILE_SUFFIXES`].
    fn percentiles(&self) -> [f64; 6] {
        [
            self.median(),
            self.p75(),
            self.p95(),
            self.p98(),
            self.p99(),
            self.p999(),
        ]
    }
}

/// Size and moments of a snapshot that knows how many samples it holds.
pub trait HasSampleSummary {
    fn size(&self) -> u64;
    fn mean(&self) -> f64;
    fn max(&self) -> f64;
    fn min(&self) -> f64;
}

/// Cumulative event count plus exponentially weighted rates.
pub trait HasRate {
    fn count(&self) -> i64;
    fn mean_rate(&self) -> f64;
    fn one_minute_rate(&self) -> f64;
    fn five_minute_rate(&self) -> f64;
    fn fifteen_minute_rate(&self) -> f64;

    /// The four rates in the order of [`RATE_SUFFIXES`].
    fn rates(&self) -> [f64; 4] {
        [
            self.mean_rate(),
            self.one_minute_rate(),
            self.five_minute_rate(),
            self.fifteen_minute_rate(),
        ]
    }
}

/// Sum, mean and extremes with no explicit sample count.
pub trait HasSumMeanMaxMin {
    fn sum(&self) -> f64;
    fn mean(&self) -> f64;
    fn max(&self) -> f64;
    fn min(&self) -> f64;
}

impl HasScalarValue for f64 {
    fn value(&self) -> f64 {
        *self
    }
}

impl HasCount for i64 {
    fn count(&self) -> i64 {
        *self
    }
}
