//! The polling-adapter capability trait.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::ScalerResult;
use crate::metric::{MetricSpec, MetricValue};
use crate::selector::LabelSelector;

/// Capability interface every polling adapter implements.
///
/// The host controller owns the polling cadence and invokes these methods on
/// its own schedule, and may invoke them concurrently on one instance within
/// a poll cycle. Implementations hold no mutable state beyond their immutable
/// descriptor, take `&self`, and open whatever resources a poll needs for
/// exactly the duration of that poll.
///
/// Every method taking a [`CancellationToken`] must return promptly with
/// [`ProbeError::Cancelled`](crate::ProbeError::Cancelled) when the token is
/// cancelled, including before the poll begins.
#[async_trait]
pub trait Scaler: Send + Sync {
    /// Whether the backing data source currently has work to do.
    async fn is_active(&self, ctx: &CancellationToken) -> ScalerResult<bool>;

    /// Static metric declaration for this scaling target.
    ///
    /// Must not perform I/O and must return an identical spec on every call.
    fn metric_spec(&self) -> MetricSpec;

    /// Sample the live metric under `metric_name`.
    ///
    /// `selector` carries the host's label requirements; adapters whose
    /// metric is not label-partitioned may ignore it. On failure the error
    /// is authoritative; callers must never substitute a default sample.
    async fn fetch_metrics(
        &self,
        ctx: &CancellationToken,
        metric_name: &str,
        selector: &LabelSelector,
    ) -> ScalerResult<Vec<MetricValue>>;

    /// Release any resources held for the adapter's lifetime.
    async fn close(&self) -> ScalerResult<()>;
}
