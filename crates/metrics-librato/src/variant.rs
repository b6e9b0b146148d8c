//! Marker types for the two supported instrumentation-library versions.

mod private {
    pub trait Sealed {}
}

/// How the `.count` field of a metered source is published.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountKind {
    /// Published as a counter; the remote service may assume it only grows.
    Monotonic,
    /// Published as a plain gauge value.
    PointInTime,
}

/// Behaviour that differs between library versions.
pub trait Variant: private::Sealed {
    const NAME: &'static str;
    const METER_COUNT: CountKind;
}

/// The older library: no gauge translation, snapshots without a sample
/// count, summaries derived from sum and mean.
#[derive(Debug, Clone, Copy)]
pub enum Legacy {}

/// The current library: snapshots carry size, mean and extremes.
#[derive(Debug, Clone, Copy)]
pub enum Modern {}

impl private::Sealed for Legacy {}
impl private::Sealed for Modern {}

impl Variant for Legacy {
    const NAME: &'static str = "legacy";
    const METER_COUNT: CountKind = CountKind::PointInTime;
}

impl Variant for Modern {
    const NAME: &'static str = "modern";
    const METER_COUNT: CountKind = CountKind::Monotonic;
}
