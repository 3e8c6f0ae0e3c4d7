//! MySQL scaler facade — the adapter surface the host controller drives.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use scalegrid_core::{
    ConfigError, LabelSelector, MetricSpec, MetricValue, Scaler, ScalerResult,
};

use crate::config::MySqlMetadata;
use crate::probe::{CountProbe, MySqlProbe};

/// Metric name this scaler reports under.
pub const RECORD_COUNT_METRIC: &str = "RecordCount";

/// Polling adapter that scales on a MySQL record count.
///
/// Holds only the immutable descriptor and the probe. Every poll opens and
/// releases its own connection, so one instance is safe to drive
/// concurrently within a poll cycle.
pub struct MySqlScaler {
    metadata: MySqlMetadata,
    probe: Box<dyn CountProbe>,
}

impl MySqlScaler {
    /// Construct from the host handoff maps.
    ///
    /// Fails fast with a [`ConfigError`] before any connection attempt when
    /// the metadata does not resolve; no adapter exists on that path.
    pub fn new(
        resolved_env: &HashMap<String, String>,
        metadata: &HashMap<String, String>,
        auth_params: &HashMap<String, String>,
    ) -> Result<Self, ConfigError> {
        let metadata = MySqlMetadata::parse(resolved_env, metadata, auth_params)?;
        Ok(Self {
            metadata,
            probe: Box::new(MySqlProbe),
        })
    }

    /// Construct with a custom probe (for testing).
    pub fn with_probe(metadata: MySqlMetadata, probe: Box<dyn CountProbe>) -> Self {
        Self { metadata, probe }
    }

    /// The resolved descriptor this scaler polls with.
    pub fn metadata(&self) -> &MySqlMetadata {
        &self.metadata
    }
}

impl std::fmt::Debug for MySqlScaler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlScaler")
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Scaler for MySqlScaler {
    async fn is_active(&self, ctx: &CancellationToken) -> ScalerResult<bool> {
        let count = self.probe.sample(ctx, &self.metadata).await?;
        Ok(count > 0)
    }

    fn metric_spec(&self) -> MetricSpec {
        MetricSpec::new(RECORD_COUNT_METRIC, self.metadata.target_count)
    }

    async fn fetch_metrics(
        &self,
        ctx: &CancellationToken,
        metric_name: &str,
        _selector: &LabelSelector,
    ) -> ScalerResult<Vec<MetricValue>> {
        let count = self.probe.sample(ctx, &self.metadata).await?;
        Ok(vec![MetricValue::sampled_now(metric_name, count)])
    }

    async fn close(&self) -> ScalerResult<()> {
        // Connections are per-poll; nothing outlives a sample.
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scalegrid_core::{ProbeError, ScalerError};

    /// Probe stub returning a fixed count.
    struct FixedCount(i64);

    #[async_trait]
    impl CountProbe for FixedCount {
        async fn sample(
            &self,
            _ctx: &CancellationToken,
            _meta: &MySqlMetadata,
        ) -> Result<i64, ProbeError> {
            Ok(self.0)
        }
    }

    /// Probe stub that always fails.
    struct FailingProbe;

    #[async_trait]
    impl CountProbe for FailingProbe {
        async fn sample(
            &self,
            _ctx: &CancellationToken,
            _meta: &MySqlMetadata,
        ) -> Result<i64, ProbeError> {
            Err(ProbeError::ConnectionFailed("connect: refused".to_string()))
        }
    }

    /// Probe stub that panics if sampled at all.
    struct PanickingProbe;

    #[async_trait]
    impl CountProbe for PanickingProbe {
        async fn sample(
            &self,
            _ctx: &CancellationToken,
            _meta: &MySqlMetadata,
        ) -> Result<i64, ProbeError> {
            panic!("probe must not be sampled here");
        }
    }

    fn test_metadata() -> MySqlMetadata {
        MySqlMetadata {
            target_count: 10,
            host: "h".to_string(),
            port: "3306".to_string(),
            user: "root".to_string(),
            password: "p".to_string(),
            database: "d".to_string(),
            query: "SELECT count(*) from users".to_string(),
        }
    }

    fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn active_when_count_positive() {
        let scaler = MySqlScaler::with_probe(test_metadata(), Box::new(FixedCount(5)));
        let ctx = CancellationToken::new();
        assert!(scaler.is_active(&ctx).await.unwrap());
    }

    #[tokio::test]
    async fn inactive_when_count_zero() {
        let scaler = MySqlScaler::with_probe(test_metadata(), Box::new(FixedCount(0)));
        let ctx = CancellationToken::new();
        assert!(!scaler.is_active(&ctx).await.unwrap());
    }

    #[tokio::test]
    async fn activity_and_metrics_agree_on_the_count() {
        let scaler = MySqlScaler::with_probe(test_metadata(), Box::new(FixedCount(5)));
        let ctx = CancellationToken::new();

        assert!(scaler.is_active(&ctx).await.unwrap());

        let values = scaler
            .fetch_metrics(&ctx, RECORD_COUNT_METRIC, &LabelSelector::empty())
            .await
            .unwrap();
        assert_eq!(values.len(), 1);
        assert_eq!(values[0].value, 5);
        assert_eq!(values[0].name, RECORD_COUNT_METRIC);
    }

    #[tokio::test]
    async fn metric_value_is_named_after_the_request() {
        let scaler = MySqlScaler::with_probe(test_metadata(), Box::new(FixedCount(3)));
        let ctx = CancellationToken::new();

        let values = scaler
            .fetch_metrics(&ctx, "s0-mysql-users", &LabelSelector::empty())
            .await
            .unwrap();
        assert_eq!(values[0].name, "s0-mysql-users");
    }

    #[test]
    fn metric_spec_is_static_and_offline() {
        // A probe that panics on sample proves the spec never polls.
        let scaler = MySqlScaler::with_probe(test_metadata(), Box::new(PanickingProbe));

        let first = scaler.metric_spec();
        let second = scaler.metric_spec();
        assert_eq!(first, second);
        assert_eq!(first.metric_name, RECORD_COUNT_METRIC);
        assert_eq!(first.target_average_value, 10);
    }

    #[tokio::test]
    async fn probe_errors_propagate_unchanged() {
        let scaler = MySqlScaler::with_probe(test_metadata(), Box::new(FailingProbe));
        let ctx = CancellationToken::new();

        let err = scaler.is_active(&ctx).await.unwrap_err();
        assert!(matches!(
            err,
            ScalerError::Probe(ProbeError::ConnectionFailed(_))
        ));

        let err = scaler
            .fetch_metrics(&ctx, RECORD_COUNT_METRIC, &LabelSelector::empty())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ScalerError::Probe(ProbeError::ConnectionFailed(_))
        ));
    }

    #[tokio::test]
    async fn concurrent_polls_on_one_instance() {
        let scaler = MySqlScaler::with_probe(test_metadata(), Box::new(FixedCount(7)));
        let ctx = CancellationToken::new();

        let selector = LabelSelector::empty();
        let (active, values) = tokio::join!(
            scaler.is_active(&ctx),
            scaler.fetch_metrics(&ctx, RECORD_COUNT_METRIC, &selector),
        );
        assert!(active.unwrap());
        assert_eq!(values.unwrap()[0].value, 7);
    }

    #[tokio::test]
    async fn close_always_succeeds() {
        let scaler = MySqlScaler::with_probe(test_metadata(), Box::new(FixedCount(0)));
        scaler.close().await.unwrap();
    }

    #[test]
    fn constructs_from_host_handoff_maps() {
        let metadata = map(&[
            ("host", "h"),
            ("port", "3306"),
            ("user", "root"),
            ("password", "p"),
            ("database", "d"),
            ("query", "SELECT count(*) from users"),
            ("count", "10"),
        ]);

        let scaler = MySqlScaler::new(&map(&[]), &metadata, &map(&[])).unwrap();
        assert_eq!(scaler.metric_spec().target_average_value, 10);
        assert_eq!(scaler.metadata().host, "h");
    }

    #[test]
    fn construction_fails_without_database() {
        let metadata = map(&[
            ("query", "SELECT count(*) from users"),
            ("count", "10"),
        ]);

        let err = MySqlScaler::new(&map(&[]), &metadata, &map(&[])).unwrap_err();
        assert_eq!(err, ConfigError::MissingField("database"));
    }
}
