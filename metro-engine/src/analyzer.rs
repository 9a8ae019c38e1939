//! Fixed-path line-sequence analysis.
//!
//! Given a station sequence that is already fixed, find the label
//! assignment minimising total cost under the same transfer model the
//! search uses, and report where the label changes. A forward dynamic
//! program over (position, label) does the assignment; results are
//! memoized per exact input sequence for the analyzer's lifetime, since a
//! sequence is typically costed once and then re-used for display.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;

use crate::cost::{HOP_COST, PathCost};
use crate::graph::Graph;
use crate::topology::{Label, Station};

/// A station where the assigned label changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferPoint {
    /// Position of the station in the analysed sequence.
    pub index: usize,
    /// The station where the change happens.
    pub station: Station,
    /// Label ridden into the station.
    pub from: Label,
    /// Label ridden out of the station.
    pub to: Label,
}

/// Optimal label assignment for one fixed station sequence.
///
/// `labels[i]` is the label ridden into station `i`; entry 0 repeats entry
/// 1 (the label ridden out of the origin). For an infeasible sequence the
/// cost is infinite and `labels` is empty; sequences shorter than two
/// stations cost zero and carry no labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzedPath {
    /// Minimum cost over all label assignments.
    pub cost: PathCost,
    /// The assignment achieving it, one label per station.
    pub labels: Vec<Label>,
}

impl AnalyzedPath {
    fn infeasible() -> Self {
        AnalyzedPath {
            cost: PathCost::Infinite,
            labels: Vec::new(),
        }
    }

    /// True when some label assignment realises the sequence.
    pub fn is_feasible(&self) -> bool {
        self.cost.is_finite()
    }

    /// The stations of the analysed sequence where the label changes,
    /// with the labels on either side.
    pub fn transfer_points(&self, stations: &[Station]) -> Vec<TransferPoint> {
        let mut points = Vec::new();
        for i in 1..self.labels.len() {
            if self.labels[i] != self.labels[i - 1] {
                points.push(TransferPoint {
                    index: i - 1,
                    station: stations[i - 1].clone(),
                    from: self.labels[i - 1].clone(),
                    to: self.labels[i].clone(),
                });
            }
        }
        points
    }
}

/// Assigns optimal labels to fixed station sequences over one graph.
pub struct PathAnalyzer<'g> {
    graph: &'g Graph,
    cache: HashMap<Vec<Station>, AnalyzedPath>,
}

impl<'g> PathAnalyzer<'g> {
    /// Create an analyzer over a built graph.
    pub fn new(graph: &'g Graph) -> Self {
        PathAnalyzer {
            graph,
            cache: HashMap::new(),
        }
    }

    /// Analyse a fixed station sequence.
    ///
    /// Each hop may only use a label under which its endpoints are
    /// adjacent; if some hop has no such label the sequence is infeasible.
    /// Exact ties are broken deterministically: a transition prefers
    /// staying on the incoming label, then the smallest label; the final
    /// label is the smallest among those tied for minimum cost.
    pub fn analyze(&mut self, stations: &[Station]) -> AnalyzedPath {
        if let Some(hit) = self.cache.get(stations) {
            return hit.clone();
        }
        let result = self.run_dp(stations);
        self.cache.insert(stations.to_vec(), result.clone());
        result
    }

    fn run_dp(&self, stations: &[Station]) -> AnalyzedPath {
        if stations.len() <= 1 {
            return AnalyzedPath {
                cost: PathCost::ZERO,
                labels: Vec::new(),
            };
        }

        // reaching[label] = (cost into the current station under label,
        // label used for the previous hop). BTreeMap keeps the tie-break
        // scan order deterministic.
        let mut reaching: BTreeMap<Label, (Decimal, Option<Label>)> = BTreeMap::new();
        let mut back: Vec<BTreeMap<Label, Option<Label>>> = Vec::with_capacity(stations.len());

        for i in 1..stations.len() {
            let (u, v) = (&stations[i - 1], &stations[i]);
            let mut next: BTreeMap<Label, (Decimal, Option<Label>)> = BTreeMap::new();

            for label in self.graph.edge_labels(u, v) {
                let best = if i == 1 {
                    // Trip start: boarding is free.
                    Some((HOP_COST, None))
                } else {
                    reaching
                        .iter()
                        .map(|(prev_label, &(prev_cost, _))| {
                            let cost = prev_cost
                                + HOP_COST
                                + self.graph.transfer_cost(u, Some(prev_label), label);
                            (cost, prev_label)
                        })
                        // Prefer cheaper, then staying on the same label,
                        // then the smallest previous label.
                        .min_by_key(|&(cost, prev_label)| {
                            (cost, prev_label != label, prev_label.clone())
                        })
                        .map(|(cost, prev_label)| (cost, Some(prev_label.clone())))
                };
                if let Some((cost, choice)) = best {
                    next.insert(label.clone(), (cost, choice));
                }
            }

            if next.is_empty() {
                return AnalyzedPath::infeasible();
            }
            back.push(next.iter().map(|(l, (_, c))| (l.clone(), c.clone())).collect());
            reaching = next;
        }

        // Smallest label among exact ties at the final station.
        let (final_label, &(total, _)) = reaching
            .iter()
            .min_by_key(|(label, (cost, _))| (*cost, (*label).clone()))
            .expect("at least one hop was recorded");

        let mut labels = vec![final_label.clone(); stations.len()];
        let mut current = final_label.clone();
        for i in (1..stations.len()).rev() {
            labels[i] = current.clone();
            match &back[i - 1][&current] {
                Some(prev) => current = prev.clone(),
                None => break, // first hop
            }
        }
        labels[0] = labels[1].clone();

        AnalyzedPath {
            cost: PathCost::Finite(total),
            labels,
        }
    }
}
