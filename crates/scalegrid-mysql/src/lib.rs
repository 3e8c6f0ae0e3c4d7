//! scalegrid-mysql — MySQL record-count scaler.
//!
//! Polls a MySQL database with an operator-supplied `COUNT`-style query and
//! reports the scalar result to the host controller through the
//! [`scalegrid_core::Scaler`] contract: a positive count means the target
//! has work to do, and the count itself is the external metric the
//! controller sizes replicas against.
//!
//! # Architecture
//!
//! ```text
//! MySqlScaler (implements Scaler)
//!   ├── MySqlMetadata — resolved once at construction, immutable
//!   └── CountProbe — one connection per poll
//!         └── MySqlProbe: connect → ping → query → scan → close
//! ```
//!
//! No connection outlives a single poll; the host's polling cadence is low
//! enough that per-poll churn beats pooling.

pub mod config;
pub mod probe;
pub mod scaler;

pub use config::MySqlMetadata;
pub use probe::{CountProbe, MySqlProbe};
pub use scaler::{MySqlScaler, RECORD_COUNT_METRIC};
