//! Record-count probe — opens one connection per poll and samples a single
//! scalar from the configured query.

use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::{Connection, Row};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use scalegrid_core::ProbeError;

use crate::config::MySqlMetadata;

/// Samples the scalar record count from the backing data source.
///
/// The seam between the facade and the wire: tests substitute a stub, the
/// real implementation is [`MySqlProbe`].
#[async_trait]
pub trait CountProbe: Send + Sync {
    /// Execute one poll. Exactly one connection is opened and released per
    /// call, regardless of outcome; there is no retry inside the probe.
    async fn sample(
        &self,
        ctx: &CancellationToken,
        meta: &MySqlMetadata,
    ) -> Result<i64, ProbeError>;
}

/// [`CountProbe`] backed by a real MySQL connection.
#[derive(Debug, Default)]
pub struct MySqlProbe;

#[async_trait]
impl CountProbe for MySqlProbe {
    async fn sample(
        &self,
        ctx: &CancellationToken,
        meta: &MySqlMetadata,
    ) -> Result<i64, ProbeError> {
        // A context cancelled before the poll begins never touches the network.
        if ctx.is_cancelled() {
            return Err(ProbeError::Cancelled);
        }

        tokio::select! {
            _ = ctx.cancelled() => Err(ProbeError::Cancelled),
            result = sample_once(meta) => result,
        }
    }
}

/// Connect, ping, query, scan, close — the body of a single poll.
async fn sample_once(meta: &MySqlMetadata) -> Result<i64, ProbeError> {
    let options = connect_options(meta)?;

    let mut conn = MySqlConnection::connect_with(&options)
        .await
        .map_err(|e| ProbeError::ConnectionFailed(format!("connect: {e}")))?;

    // Verify liveness before trusting the connection with the query.
    if let Err(e) = conn.ping().await {
        release(conn).await;
        return Err(ProbeError::ConnectionFailed(format!("ping: {e}")));
    }

    let result = record_count(&mut conn, &meta.query).await;
    release(conn).await;
    result
}

/// Build connect options from the descriptor.
///
/// The port stays textual in the descriptor; a value that does not parse as
/// a port number surfaces here as a connection failure.
fn connect_options(meta: &MySqlMetadata) -> Result<MySqlConnectOptions, ProbeError> {
    let port: u16 = meta
        .port
        .parse()
        .map_err(|_| ProbeError::ConnectionFailed(format!("invalid port {:?}", meta.port)))?;

    Ok(MySqlConnectOptions::new()
        .host(&meta.host)
        .port(port)
        .username(&meta.user)
        .password(&meta.password)
        .database(&meta.database))
}

/// Execute the configured query verbatim and scan the scalar result.
async fn record_count(conn: &mut MySqlConnection, query: &str) -> Result<i64, ProbeError> {
    let rows = sqlx::query(query)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| ProbeError::QueryFailed(format!("execute: {e}")))?;

    // A COUNT-style query yields a single row; should the query return more,
    // the last row's scalar is the one retained.
    let mut count: i64 = 0;
    for row in &rows {
        count = row
            .try_get::<i64, _>(0)
            .map_err(|e| ProbeError::QueryFailed(format!("scan: {e}")))?;
    }

    debug!(count, "sampled record count");
    Ok(count)
}

/// Graceful close; a failed close must not mask the poll result.
async fn release(conn: MySqlConnection) {
    if let Err(e) = conn.close().await {
        debug!(error = %e, "connection close failed");
    }
}
