//! Shortest-route engine for a metro network.
//!
//! Routes are scored by stops *and* line changes: each hop costs one unit,
//! and changing lines adds a transfer penalty, so the cheapest route is
//! rarely just the fewest stops. The engine models loop lines (the last
//! station connects back to the first) and Y-junction trunk/branch pairs,
//! where a trunk is split into virtual front/rear segments around the
//! junction and a through-running trunk-to-branch continuation is free.
//!
//! The pieces, leaf first: [`topology`] holds the immutable line
//! definitions and detected Y-junctions; [`graph`] derives a per-selection
//! station graph with virtual line labels; [`cost`] prices label changes
//! in exact decimal arithmetic; [`search`] runs Dijkstra over
//! (station, label) states and enumerates every tied optimal route;
//! [`analyzer`] assigns optimal labels to an already-fixed sequence; and
//! [`validator`] checks submitted sequences structurally. [`network`]
//! wraps it all behind one facade.

pub mod analyzer;
pub mod cost;
pub mod error;
pub mod graph;
pub mod network;
pub mod search;
pub mod topology;
pub mod validator;
