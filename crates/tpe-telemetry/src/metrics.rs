// SPDX-License-Identifier: Apache-2.0

//! Metrics registration and sample forwarding.

use serde_json::Value;

/// Identifies an operator's position within its pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OperatorIndex(pub usize);

/// Identifies a metric, scoped to the operator that registered it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MetricId(pub u64);

/// Receives metric registrations and samples from operators.
///
/// `register` is called once per distinct `(operator, metric)` pair before
/// any `record` call for that pair; `record` may be called any number of
/// times afterward.
pub trait MetricsSink: 'static {
    /// Registers a metric's schema ahead of recording samples for it.
    fn register(&self, operator: OperatorIndex, metric: MetricId, schema: Value);

    /// Records one sample for a previously registered metric.
    fn record(&self, operator: OperatorIndex, metric: MetricId, sample: Value);
}

/// A [`MetricsSink`] that discards everything. Useful in tests and as a
/// default when metrics collection is not wired up.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMetricsSink;

impl MetricsSink for NoopMetricsSink {
    fn register(&self, _operator: OperatorIndex, _metric: MetricId, _schema: Value) {}
    fn record(&self, _operator: OperatorIndex, _metric: MetricId, _sample: Value) {}
}
