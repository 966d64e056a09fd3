//! Core reader for GeoLife trajectory logs.
//!
//! Per-user PLT files are discovered in chronological order, streamed record
//! by record across file boundaries, and folded into spatial and temporal
//! bounds.

pub mod analysis;
pub mod dataset;
pub mod plt;
pub mod prelude;
pub mod telemetry;
pub mod trajectory;

#[cfg(test)]
pub(crate) mod test_support;

pub use dataset::Dataset;
pub use prelude::{HeaderMode, TrajectoryError, TrajectoryResult};
