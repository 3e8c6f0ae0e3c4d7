//! Metadata resolution for the MySQL scaler.
//!
//! Turns the raw string maps handed over by the host (trigger metadata and
//! auth params) into a validated [`MySqlMetadata`]. Purely textual — no
//! connection is attempted here, so misconfiguration surfaces to the
//! operator before any scaling decision.

use std::collections::HashMap;

use scalegrid_core::ConfigError;

/// Fallback connection coordinates when the trigger metadata leaves them out.
/// Deployments should override `user` in anything non-trivial.
const DEFAULT_HOST: &str = "dbserver.default.svc.cluster.local";
const DEFAULT_PORT: &str = "3306";
const DEFAULT_USER: &str = "root";

/// Validated connection and query settings for one scaling target.
///
/// Resolved once at adapter construction and immutable afterwards; every
/// poll reads the same descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MySqlMetadata {
    /// Record-count threshold the controller sizes replicas against.
    pub target_count: u64,
    pub host: String,
    /// Kept textual; parsed to a port number when the probe builds its
    /// connect options.
    pub port: String,
    pub user: String,
    pub password: String,
    pub database: String,
    /// Operator-authored query, executed verbatim.
    pub query: String,
}

impl MySqlMetadata {
    /// Resolve raw trigger metadata and auth params into a descriptor.
    ///
    /// `resolved_env` is part of the host handoff but carries nothing this
    /// adapter reads; env indirection happens host-side.
    pub fn parse(
        _resolved_env: &HashMap<String, String>,
        metadata: &HashMap<String, String>,
        auth_params: &HashMap<String, String>,
    ) -> Result<Self, ConfigError> {
        let host = resolve_or(metadata, "host", DEFAULT_HOST);
        let port = resolve_or(metadata, "port", DEFAULT_PORT);
        let user = resolve_or(metadata, "user", DEFAULT_USER);

        // The auth-parameter store wins over inline metadata, even when it
        // supplies an empty password.
        let password = match auth_params.get("password") {
            Some(value) => value.clone(),
            None => metadata
                .get("password")
                .filter(|value| !value.is_empty())
                .cloned()
                .unwrap_or_default(),
        };

        let database = metadata
            .get("database")
            .cloned()
            .ok_or(ConfigError::MissingField("database"))?;

        let query = metadata
            .get("query")
            .cloned()
            .ok_or(ConfigError::MissingField("query"))?;

        let target_count = metadata
            .get("count")
            .ok_or(ConfigError::MissingField("count"))?
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidValue {
                field: "count",
                cause: e.to_string(),
            })?;

        Ok(Self {
            target_count,
            host,
            port,
            user,
            password,
            database,
            query,
        })
    }
}

/// Metadata value if present and non-empty, else the fixed default.
fn resolve_or(metadata: &HashMap<String, String>, key: &str, default: &str) -> String {
    metadata
        .get(key)
        .filter(|value| !value.is_empty())
        .cloned()
        .unwrap_or_else(|| default.to_string())
}
