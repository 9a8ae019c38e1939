//! Graph builder and derived-graph queries.
//!
//! A [`Graph`] is a value derived from a [`Topology`] and a selected subset
//! of lines. Builds always produce a fresh instance; nothing shared is
//! mutated, so one topology can back many graphs concurrently.

use std::collections::{BTreeSet, HashMap, HashSet};

use rand::Rng;
use rand::seq::SliceRandom;
use rust_decimal::Decimal;

use crate::cost::{TransferModel, TransferPenalties};
use crate::error::EngineError;
use crate::topology::{Label, Line, LineName, Station, Topology};

/// Undirected station graph for one line selection.
///
/// Adjacency is symmetric. Every edge corresponds to two stations that are
/// consecutive on some selected line, or to a loop line's wraparound edge.
/// Stations carry the virtual line labels they belong to, and each edge
/// records the labels under which its endpoints are adjacent.
#[derive(Debug, Clone)]
pub struct Graph {
    stations: BTreeSet<Station>,
    adjacency: HashMap<Station, BTreeSet<Station>>,
    labels: HashMap<Station, BTreeSet<Label>>,
    edge_labels: HashMap<(Station, Station), BTreeSet<Label>>,
    transfers: TransferModel,
    lines: Vec<LineName>,
}

impl Graph {
    /// Build a graph over the selected lines.
    ///
    /// Fails with [`EngineError::UnknownLine`] if any name is not in the
    /// topology. If a selected line is a Y-junction trunk, its paired
    /// branch is included automatically: the physical track cannot be
    /// split along the junction.
    pub fn build(
        topology: &Topology,
        line_names: &[LineName],
        penalties: TransferPenalties,
    ) -> Result<Graph, EngineError> {
        for name in line_names {
            if topology.line(name).is_none() {
                return Err(EngineError::UnknownLine(name.clone()));
            }
        }

        // Expand the selection with paired branches, preserving request order.
        let mut selection: Vec<LineName> = Vec::new();
        let mut seen: HashSet<LineName> = HashSet::new();
        for name in line_names {
            if seen.insert(name.clone()) {
                selection.push(name.clone());
            }
            if let Some(y) = topology.junction_for(name) {
                if y.trunk() == name && topology.line(y.branch()).is_some() {
                    if seen.insert(y.branch().clone()) {
                        selection.push(y.branch().clone());
                    }
                }
            }
        }

        let mut graph = Graph {
            stations: BTreeSet::new(),
            adjacency: HashMap::new(),
            labels: HashMap::new(),
            edge_labels: HashMap::new(),
            transfers: TransferModel::new(
                penalties,
                selection
                    .iter()
                    .filter_map(|name| topology.junction_for(name))
                    .cloned()
                    .collect::<BTreeSet<_>>()
                    .into_iter()
                    .collect::<Vec<_>>(),
            ),
            lines: selection.clone(),
        };

        for name in &selection {
            let line = topology.line(name).expect("validated above");
            graph.add_line(topology, line);
        }

        tracing::debug!(
            lines = graph.lines.len(),
            stations = graph.stations.len(),
            edges = graph.edge_labels.len() / 2,
            "graph built"
        );

        Ok(graph)
    }

    /// Per-station labels contributed by one line.
    ///
    /// A Y-junction trunk is split around the junction: the declared-start
    /// side keeps the bare label, the far side takes the rear label, and
    /// the junction itself carries both. Every other line labels all of its
    /// stations with its bare name.
    fn line_labels(topology: &Topology, line: &Line) -> Vec<Vec<Label>> {
        let split = topology
            .junction_for(line.name())
            .filter(|y| y.trunk() == line.name());

        match split {
            None => {
                let label = Label::whole(line.name().clone());
                line.stations().iter().map(|_| vec![label.clone()]).collect()
            }
            Some(y) => {
                let junction_idx = line
                    .position(y.junction())
                    .expect("junction lies on the trunk");
                let start_idx = line.start_index();
                let front = Label::whole(line.name().clone());
                let rear = Label::rear(line.name().clone());

                (0..line.stations().len())
                    .map(|i| {
                        if i == junction_idx {
                            vec![front.clone(), rear.clone()]
                        } else {
                            let on_start_side = if start_idx < junction_idx {
                                i < junction_idx
                            } else if start_idx > junction_idx {
                                i > junction_idx
                            } else {
                                false
                            };
                            if on_start_side {
                                vec![front.clone()]
                            } else {
                                vec![rear.clone()]
                            }
                        }
                    })
                    .collect()
            }
        }
    }

    fn add_line(&mut self, topology: &Topology, line: &Line) {
        let per_station = Graph::line_labels(topology, line);
        let stations = line.stations();

        for (station, labels) in stations.iter().zip(&per_station) {
            self.stations.insert(station.clone());
            self.adjacency.entry(station.clone()).or_default();
            self.labels
                .entry(station.clone())
                .or_default()
                .extend(labels.iter().cloned());
        }

        let mut edges: Vec<(usize, usize)> = (1..stations.len()).map(|i| (i - 1, i)).collect();
        if line.is_loop() && stations.len() >= 2 {
            edges.push((stations.len() - 1, 0));
        }

        for (i, j) in edges {
            let (a, b) = (&stations[i], &stations[j]);
            if a == b {
                continue;
            }
            self.adjacency
                .get_mut(a)
                .expect("inserted above")
                .insert(b.clone());
            self.adjacency
                .get_mut(b)
                .expect("inserted above")
                .insert(a.clone());

            // An edge is usable under a label only when the label covers
            // both endpoints; at a junction this picks the correct segment.
            let common: Vec<Label> = per_station[i]
                .iter()
                .filter(|l| per_station[j].contains(l))
                .cloned()
                .collect();
            self.edge_labels
                .entry((a.clone(), b.clone()))
                .or_default()
                .extend(common.iter().cloned());
            self.edge_labels
                .entry((b.clone(), a.clone()))
                .or_default()
                .extend(common);
        }
    }

    /// The expanded line selection this graph was built from.
    pub fn lines(&self) -> &[LineName] {
        &self.lines
    }

    /// Every station in the graph, including isolated ones.
    pub fn all_stations(&self) -> &BTreeSet<Station> {
        &self.stations
    }

    /// True if the station is in the graph.
    pub fn contains(&self, station: &Station) -> bool {
        self.stations.contains(station)
    }

    /// Neighbours of a station. Empty for unknown stations: absence from
    /// the adjacency map means "no edges", not a lookup bug.
    pub fn neighbors(&self, station: &Station) -> impl Iterator<Item = &Station> {
        self.adjacency.get(station).into_iter().flatten()
    }

    /// True if the two stations share a graph edge.
    pub fn adjacent(&self, a: &Station, b: &Station) -> bool {
        self.adjacency.get(a).is_some_and(|nbs| nbs.contains(b))
    }

    /// The virtual line labels a station belongs to.
    pub fn labels_at(&self, station: &Station) -> Option<&BTreeSet<Label>> {
        self.labels.get(station)
    }

    /// Labels under which `a` and `b` are adjacent. Empty when the edge is
    /// absent, or present but not covered by any single label.
    pub fn edge_labels(&self, a: &Station, b: &Station) -> impl Iterator<Item = &Label> {
        self.edge_labels
            .get(&(a.clone(), b.clone()))
            .into_iter()
            .flatten()
    }

    /// The transfer cost model for this graph.
    pub fn transfers(&self) -> &TransferModel {
        &self.transfers
    }

    /// Cost of continuing from `from` onto `to` at `station`.
    pub fn transfer_cost(&self, station: &Station, from: Option<&Label>, to: &Label) -> Decimal {
        self.transfers.transfer_cost(station, from, to)
    }

    /// Whether `end` can be reached from `start`.
    pub fn is_reachable(&self, start: &Station, end: &Station) -> Result<bool, EngineError> {
        for s in [start, end] {
            if !self.contains(s) {
                return Err(EngineError::UnknownStation(s.clone()));
            }
        }

        let mut stack = vec![start];
        let mut visited: HashSet<&Station> = HashSet::from([start]);
        while let Some(u) = stack.pop() {
            if u == end {
                return Ok(true);
            }
            for nb in self.neighbors(u) {
                if visited.insert(nb) {
                    stack.push(nb);
                }
            }
        }
        Ok(false)
    }

    /// All stations in `start`'s connected component, excluding `start`.
    pub fn reachable_stations(&self, start: &Station) -> Result<BTreeSet<Station>, EngineError> {
        if !self.contains(start) {
            return Err(EngineError::UnknownStation(start.clone()));
        }

        let mut stack = vec![start];
        let mut visited: HashSet<&Station> = HashSet::from([start]);
        while let Some(u) = stack.pop() {
            for nb in self.neighbors(u) {
                if visited.insert(nb) {
                    stack.push(nb);
                }
            }
        }
        visited.remove(start);
        Ok(visited.into_iter().cloned().collect())
    }

    /// Connected components, in station order.
    fn components(&self) -> Vec<Vec<Station>> {
        let mut components = Vec::new();
        let mut visited: HashSet<&Station> = HashSet::new();
        for s in &self.stations {
            if visited.contains(s) {
                continue;
            }
            let mut component = Vec::new();
            let mut stack = vec![s];
            visited.insert(s);
            while let Some(u) = stack.pop() {
                component.push(u.clone());
                for nb in self.neighbors(u) {
                    if visited.insert(nb) {
                        stack.push(nb);
                    }
                }
            }
            components.push(component);
        }
        components
    }

    /// Pick two distinct, mutually reachable stations at random.
    ///
    /// A connected component with at least two stations is chosen uniformly
    /// among qualifying components, then two distinct stations uniformly
    /// within it.
    pub fn pick_random_pair<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<(Station, Station), EngineError> {
        if self.stations.len() < 2 {
            return Err(EngineError::InsufficientStations);
        }

        let components: Vec<Vec<Station>> = self
            .components()
            .into_iter()
            .filter(|c| c.len() >= 2)
            .collect();
        let component = components.choose(rng).ok_or(EngineError::NoComponent)?;

        let picked: Vec<&Station> = component.choose_multiple(rng, 2).collect();
        Ok((picked[0].clone(), picked[1].clone()))
    }
}
