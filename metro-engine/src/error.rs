//! Engine error kinds.
//!
//! Every error here is a deterministic function of the inputs; there are no
//! transient or retryable failures in the engine (no I/O, no external
//! calls). The engine returns structured kinds and leaves user-facing
//! presentation to its callers.

use crate::topology::{LineName, Station};

/// Errors surfaced by graph building and the read/query operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// Requested line name is not in the topology
    #[error("unknown line: {0}")]
    UnknownLine(LineName),

    /// A query was made before any successful graph build
    #[error("graph has not been built")]
    GraphNotBuilt,

    /// Station is absent from the currently built graph
    #[error("unknown station: {0}")]
    UnknownStation(Station),

    /// Fewer than two stations exist in the graph
    #[error("fewer than two stations in the graph")]
    InsufficientStations,

    /// No connected component has two or more stations
    #[error("no connected component with two or more stations")]
    NoComponent,
}
