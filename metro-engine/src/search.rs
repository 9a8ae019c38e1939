//! Augmented-state shortest-path search.
//!
//! Dijkstra over (station, current label) states. Tracking the label in the
//! state is what prices transfers correctly: reaching a station cheaply on
//! the "wrong" line is not the same as reaching it on the line the rest of
//! the route needs. Ties retain every predecessor so that enumeration can
//! recover all optimal station sequences, not just one.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use rust_decimal::Decimal;

use crate::cost::{HOP_COST, PathCost};
use crate::error::EngineError;
use crate::graph::Graph;
use crate::topology::{Label, Station};

/// The line the traveller is currently riding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Ride {
    /// At the origin, not yet on any line.
    Start,
    /// Riding under a specific virtual line label.
    On(Label),
}

impl Ride {
    fn label(&self) -> Option<&Label> {
        match self {
            Ride::Start => None,
            Ride::On(label) => Some(label),
        }
    }
}

type State = (Station, Ride);

/// The minimum cost between two stations and every station sequence
/// achieving it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPaths {
    /// Minimum total cost, or [`PathCost::Infinite`] when unreachable.
    pub cost: PathCost,
    /// All tied optimal station sequences, sorted, without duplicates.
    pub paths: Vec<Vec<Station>>,
}

impl ShortestPaths {
    fn unreachable() -> Self {
        ShortestPaths {
            cost: PathCost::Infinite,
            paths: Vec::new(),
        }
    }
}

/// Find the minimum cost from `start` to `end` and enumerate every
/// station sequence achieving it.
///
/// Each hop costs one unit plus the transfer cost of the label change at
/// the departing station. A hop may only use a label under which both of
/// its endpoints are adjacent. Enumeration is exponential in the worst
/// case when many routes tie; callers needing bounded latency must cap or
/// time-limit externally.
pub fn find_all_shortest_paths(
    graph: &Graph,
    start: &Station,
    end: &Station,
) -> Result<ShortestPaths, EngineError> {
    for s in [start, end] {
        if !graph.contains(s) {
            return Err(EngineError::UnknownStation(s.clone()));
        }
    }

    let mut dist: HashMap<State, Decimal> = HashMap::new();
    let mut parents: HashMap<State, Vec<State>> = HashMap::new();
    let mut heap: BinaryHeap<Reverse<(Decimal, State)>> = BinaryHeap::new();

    let origin: State = (start.clone(), Ride::Start);
    dist.insert(origin.clone(), Decimal::ZERO);
    heap.push(Reverse((Decimal::ZERO, origin.clone())));

    let mut settled = 0usize;
    while let Some(Reverse((cost, state))) = heap.pop() {
        if dist.get(&state) != Some(&cost) {
            continue; // stale heap entry
        }
        settled += 1;

        let (u, ride) = &state;
        for v in graph.neighbors(u) {
            for label in graph.edge_labels(u, v) {
                let next_cost = cost + HOP_COST + graph.transfer_cost(u, ride.label(), label);
                let next: State = (v.clone(), Ride::On(label.clone()));

                match dist.get(&next) {
                    Some(&best) if next_cost > best => {}
                    Some(&best) if next_cost == best => {
                        parents
                            .get_mut(&next)
                            .expect("every settled distance has a parent list")
                            .push(state.clone());
                    }
                    _ => {
                        dist.insert(next.clone(), next_cost);
                        parents.insert(next.clone(), vec![state.clone()]);
                        heap.push(Reverse((next_cost, next)));
                    }
                }
            }
        }
    }

    // Minimum over all states that sit at the destination.
    let mut best_cost: Option<Decimal> = None;
    for (state, cost) in &dist {
        if &state.0 == end && best_cost.is_none_or(|b| *cost < b) {
            best_cost = Some(*cost);
        }
    }
    let Some(best_cost) = best_cost else {
        return Ok(ShortestPaths::unreachable());
    };

    let mut seeds: Vec<State> = Vec::new();
    for (state, cost) in &dist {
        if &state.0 == end && *cost == best_cost {
            seeds.push(state.clone());
        }
    }
    seeds.sort();

    // Walk the retained-predecessor lists back to the origin with an
    // explicit work stack; recursion depth would otherwise grow with the
    // tie structure.
    let mut paths: Vec<Vec<Station>> = Vec::new();
    let mut stack: Vec<(State, Vec<Station>)> =
        seeds.into_iter().map(|s| (s, Vec::new())).collect();
    while let Some((state, mut suffix)) = stack.pop() {
        suffix.push(state.0.clone());
        if state == origin {
            suffix.reverse();
            paths.push(suffix);
            continue;
        }
        if let Some(preds) = parents.get(&state) {
            for pred in preds {
                stack.push((pred.clone(), suffix.clone()));
            }
        }
    }

    // Distinct label states can yield the same station sequence.
    paths.sort();
    paths.dedup();

    tracing::debug!(
        settled,
        %best_cost,
        paths = paths.len(),
        "shortest-path search finished"
    );

    Ok(ShortestPaths {
        cost: PathCost::Finite(best_cost),
        paths,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::TransferPenalties;
    use crate::topology::{Line, LineName, Topology};
    use rust_decimal_macros::dec;

    fn topo(defs: &[(&str, &[&str])]) -> Topology {
        let lines = defs
            .iter()
            .map(|(name, stations)| {
                Line::new(
                    LineName::new(name),
                    stations.iter().map(|s| Station::new(s)).collect(),
                    false,
                    None,
                )
                .unwrap()
            })
            .collect();
        Topology::new(lines).unwrap()
    }

    fn build(topology: &Topology, names: &[&str]) -> Graph {
        let names: Vec<LineName> = names.iter().map(|n| LineName::new(n)).collect();
        Graph::build(topology, &names, TransferPenalties::default()).unwrap()
    }

    fn path(stations: &[&str]) -> Vec<Station> {
        stations.iter().map(|s| Station::new(s)).collect()
    }

    #[test]
    fn single_line_costs_one_per_hop() {
        let topology = topo(&[("1", &["A", "B", "C"])]);
        let graph = build(&topology, &["1"]);

        let result =
            find_all_shortest_paths(&graph, &Station::new("A"), &Station::new("C")).unwrap();
        assert_eq!(result.cost, PathCost::Finite(dec!(2)));
        assert_eq!(result.paths, vec![path(&["A", "B", "C"])]);
    }

    #[test]
    fn worked_example_transfer_pricing() {
        // 1 = [A,B,C], 2 = [B,D,E]: A->E is 1 + (1 + 2.5) + 1 = 5.5 via
        // [A,B,D,E], and that path is unique.
        let topology = topo(&[("1", &["A", "B", "C"]), ("2", &["B", "D", "E"])]);
        let graph = build(&topology, &["1", "2"]);

        let result =
            find_all_shortest_paths(&graph, &Station::new("A"), &Station::new("E")).unwrap();
        assert_eq!(result.cost, PathCost::Finite(dec!(5.5)));
        assert_eq!(result.paths, vec![path(&["A", "B", "D", "E"])]);
    }

    #[test]
    fn ties_are_all_enumerated() {
        let topology = topo(&[("1", &["A", "B", "C"]), ("2", &["A", "D", "C"])]);
        let graph = build(&topology, &["1", "2"]);

        let result =
            find_all_shortest_paths(&graph, &Station::new("A"), &Station::new("C")).unwrap();
        assert_eq!(result.cost, PathCost::Finite(dec!(2)));
        assert_eq!(
            result.paths,
            vec![path(&["A", "B", "C"]), path(&["A", "D", "C"])]
        );
    }

    #[test]
    fn continuation_through_junction_is_free() {
        let topology = topo(&[("5", &["P", "J", "Q"]), ("5+", &["J", "R"])]);
        let graph = build(&topology, &["5"]);

        let result =
            find_all_shortest_paths(&graph, &Station::new("P"), &Station::new("R")).unwrap();
        assert_eq!(result.cost, PathCost::Finite(dec!(2)));
        assert_eq!(result.paths, vec![path(&["P", "J", "R"])]);
    }

    #[test]
    fn rear_segment_to_branch_pays_reverse_penalty() {
        let topology = topo(&[("5", &["P", "J", "Q"]), ("5+", &["J", "R"])]);
        let graph = build(&topology, &["5"]);

        let result =
            find_all_shortest_paths(&graph, &Station::new("Q"), &Station::new("R")).unwrap();
        assert_eq!(result.cost, PathCost::Finite(dec!(3.5)));
        assert_eq!(result.paths, vec![path(&["Q", "J", "R"])]);
    }

    #[test]
    fn unreachable_gives_infinite_cost_and_no_paths() {
        let topology = topo(&[("1", &["A", "B"]), ("2", &["C", "D"])]);
        let graph = build(&topology, &["1", "2"]);

        let result =
            find_all_shortest_paths(&graph, &Station::new("A"), &Station::new("C")).unwrap();
        assert_eq!(result.cost, PathCost::Infinite);
        assert!(result.paths.is_empty());
    }

    #[test]
    fn unknown_station_is_an_error() {
        let topology = topo(&[("1", &["A", "B"])]);
        let graph = build(&topology, &["1"]);

        let err =
            find_all_shortest_paths(&graph, &Station::new("A"), &Station::new("Z")).unwrap_err();
        assert_eq!(err, EngineError::UnknownStation(Station::new("Z")));
    }

    #[test]
    fn start_equals_end() {
        let topology = topo(&[("1", &["A", "B"])]);
        let graph = build(&topology, &["1"]);

        let result =
            find_all_shortest_paths(&graph, &Station::new("A"), &Station::new("A")).unwrap();
        assert_eq!(result.cost, PathCost::ZERO);
        assert_eq!(result.paths, vec![path(&["A"])]);
    }

    #[test]
    fn fewer_stops_do_not_beat_fewer_transfers() {
        // Direct on one line in 4 hops vs 3 hops with a transfer:
        // 4 < 3 + 2.5, so the longer single-line route wins.
        let topology = topo(&[
            ("1", &["A", "B", "C", "D", "E"]),
            ("2", &["B", "X", "E"]),
        ]);
        let graph = build(&topology, &["1", "2"]);

        let result =
            find_all_shortest_paths(&graph, &Station::new("A"), &Station::new("E")).unwrap();
        assert_eq!(result.cost, PathCost::Finite(dec!(4)));
        assert_eq!(result.paths, vec![path(&["A", "B", "C", "D", "E"])]);
    }
}
