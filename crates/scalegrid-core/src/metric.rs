//! Metric specification and sample types exchanged with the host.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Static declaration of the metric an adapter scales on.
///
/// Returned by [`Scaler::metric_spec`](crate::Scaler::metric_spec); tells the
/// host controller what one unit of desired scale looks like. Never derived
/// from live data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MetricSpec {
    /// Fixed, adapter-chosen metric name.
    pub metric_name: String,
    /// Target average value the controller sizes replicas against.
    pub target_average_value: u64,
}

impl MetricSpec {
    /// Create a spec for the given metric name and target.
    pub fn new(metric_name: impl Into<String>, target_average_value: u64) -> Self {
        Self {
            metric_name: metric_name.into(),
            target_average_value,
        }
    }
}

/// One timestamped sample of the live measured quantity.
///
/// Produced once per poll and handed straight to the host; nothing is
/// persisted between polls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MetricValue {
    /// Name the host requested the metric under.
    pub name: String,
    /// Measured value.
    pub value: i64,
    /// Unix timestamp (seconds) when the sample was taken.
    pub timestamp: u64,
}

impl MetricValue {
    /// Create a sample stamped with the current time.
    pub fn sampled_now(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value,
            timestamp: epoch_secs(),
        }
    }
}

fn epoch_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
