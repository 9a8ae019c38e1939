//! The metro network facade.
//!
//! [`MetroNetwork`] ties the components together behind the operation set
//! the transport layer calls: build a graph over a line selection, then
//! query it. Building takes `&mut self` and replaces the stored graph
//! wholesale, so concurrent callers either serialize a build-and-query
//! sequence or hold one `MetroNetwork` per request; the [`Topology`] is
//! immutable and freely shareable either way.

use std::collections::BTreeSet;

use rand::Rng;

use crate::analyzer::{AnalyzedPath, PathAnalyzer};
use crate::cost::TransferPenalties;
use crate::error::EngineError;
use crate::graph::Graph;
use crate::search::{self, ShortestPaths};
use crate::topology::{LineName, Station, Topology};
use crate::validator::{self, PathViolation};

/// Routing engine for one metro network.
///
/// # Examples
///
/// ```
/// use metro_engine::network::MetroNetwork;
/// use metro_engine::topology::{Station, Topology};
///
/// let topology = Topology::from_json(
///     r#"{"1": ["A", "B", "C"], "2": ["B", "D", "E"]}"#,
/// )
/// .unwrap();
/// let mut network = MetroNetwork::new(topology);
///
/// let lines = network.all_lines();
/// network.build_graph(&lines).unwrap();
///
/// let result = network
///     .find_all_shortest_paths(&Station::new("A"), &Station::new("E"))
///     .unwrap();
/// assert_eq!(result.cost.to_string(), "5.5");
/// assert_eq!(result.paths.len(), 1);
/// ```
#[derive(Debug)]
pub struct MetroNetwork {
    topology: Topology,
    penalties: TransferPenalties,
    graph: Option<Graph>,
}

impl MetroNetwork {
    /// Create an engine over a topology with the default penalties.
    pub fn new(topology: Topology) -> Self {
        MetroNetwork::with_penalties(topology, TransferPenalties::default())
    }

    /// Create an engine with explicit penalty constants.
    pub fn with_penalties(topology: Topology, penalties: TransferPenalties) -> Self {
        MetroNetwork {
            topology,
            penalties,
            graph: None,
        }
    }

    /// The underlying topology.
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// The currently built graph.
    pub fn graph(&self) -> Result<&Graph, EngineError> {
        self.graph.as_ref().ok_or(EngineError::GraphNotBuilt)
    }

    /// Build the graph for a line selection, replacing any prior graph.
    ///
    /// A selected Y-junction trunk pulls in its paired branch. On failure
    /// the previous graph is kept.
    pub fn build_graph(&mut self, line_names: &[LineName]) -> Result<(), EngineError> {
        let graph = Graph::build(&self.topology, line_names, self.penalties)?;
        self.graph = Some(graph);
        Ok(())
    }

    /// Names of every known line, independent of any build.
    pub fn all_lines(&self) -> Vec<LineName> {
        self.topology.all_lines()
    }

    /// Stop sequence of a line, independent of any build.
    pub fn line_stations(&self, name: &LineName) -> Result<&[Station], EngineError> {
        self.topology
            .line_stations(name)
            .ok_or_else(|| EngineError::UnknownLine(name.clone()))
    }

    /// Every station in the built graph.
    pub fn all_stations(&self) -> Result<&BTreeSet<Station>, EngineError> {
        Ok(self.graph()?.all_stations())
    }

    /// Whether `end` can be reached from `start` in the built graph.
    pub fn is_reachable(&self, start: &Station, end: &Station) -> Result<bool, EngineError> {
        self.graph()?.is_reachable(start, end)
    }

    /// Stations reachable from `start`, excluding `start` itself.
    pub fn reachable_stations(&self, start: &Station) -> Result<BTreeSet<Station>, EngineError> {
        self.graph()?.reachable_stations(start)
    }

    /// Pick two distinct, mutually reachable stations at random.
    pub fn pick_random_pair(&self) -> Result<(Station, Station), EngineError> {
        self.pick_random_pair_with(&mut rand::thread_rng())
    }

    /// As [`Self::pick_random_pair`], with a caller-supplied generator.
    pub fn pick_random_pair_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<(Station, Station), EngineError> {
        self.graph()?.pick_random_pair(rng)
    }

    /// Minimum cost between two stations and every optimal station
    /// sequence.
    pub fn find_all_shortest_paths(
        &self,
        start: &Station,
        end: &Station,
    ) -> Result<ShortestPaths, EngineError> {
        search::find_all_shortest_paths(self.graph()?, start, end)
    }

    /// A memoizing analyzer over the built graph.
    ///
    /// Use this when the same sequences will be analysed repeatedly, e.g.
    /// once for costing and again for transfer annotation.
    pub fn analyzer(&self) -> Result<PathAnalyzer<'_>, EngineError> {
        Ok(PathAnalyzer::new(self.graph()?))
    }

    /// Optimal label assignment and cost for a fixed station sequence.
    pub fn analyze_fixed_path(&self, stations: &[Station]) -> Result<AnalyzedPath, EngineError> {
        Ok(self.analyzer()?.analyze(stations))
    }

    /// Structural legality verdict for a submitted path.
    ///
    /// The outer error is `GraphNotBuilt`; the inner result is the
    /// verdict with its reason code.
    pub fn validate_path(
        &self,
        path: &[Station],
        start: &Station,
        end: &Station,
    ) -> Result<Result<(), PathViolation>, EngineError> {
        Ok(validator::validate_path(self.graph()?, path, start, end))
    }
}
