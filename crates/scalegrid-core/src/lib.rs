//! scalegrid-core — the polling-adapter contract between scalers and the
//! host autoscaling controller.
//!
//! The host owns the polling cadence and the replica math; adapters own
//! nothing but the answer to "how much work is there right now". This crate
//! pins down the seam between the two:
//!
//! - [`Scaler`] — the capability trait every adapter implements
//! - [`MetricSpec`] / [`MetricValue`] — the static declaration and the live
//!   samples exchanged across it
//! - [`LabelSelector`] — the host's label requirements on metric retrieval
//! - [`ConfigError`] / [`ProbeError`] / [`ScalerError`] — the error taxonomy
//!
//! Adapters for different backing stores live in sibling crates and are held
//! by the host as `Box<dyn Scaler>`.

pub mod error;
pub mod metric;
pub mod scaler;
pub mod selector;

pub use error::{ConfigError, ProbeError, ScalerError, ScalerResult};
pub use metric::{MetricSpec, MetricValue};
pub use scaler::Scaler;
pub use selector::LabelSelector;
