//! Snapshot selection and assembly.
//!
//! Consumes the pipeline's ranked inclusion set, decides which articles fit
//! the target medium, and writes the snapshot directory (selected bodies,
//! build manifest, full score table).

pub mod assembler;
pub mod selection;

pub use assembler::{SnapshotOptions, SnapshotResult, assemble, validate_snapshot};
pub use selection::{Selection, rank, select};
