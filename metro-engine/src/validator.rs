//! Structural path legality checks.
//!
//! Purely structural: a submitted sequence is checked against the built
//! graph without consulting cost. Costing a legal sequence is the
//! analyzer's job.

use crate::graph::Graph;
use crate::topology::Station;

/// Why a submitted path is not legal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathViolation {
    /// The sequence is empty
    #[error("path is empty")]
    EmptyPath,

    /// The sequence does not begin at the required start
    #[error("path starts at {actual}, expected {expected}")]
    WrongStart { expected: Station, actual: Station },

    /// The sequence does not finish at the required end
    #[error("path ends at {actual}, expected {expected}")]
    WrongEnd { expected: Station, actual: Station },

    /// A station is absent from the built graph
    #[error("station {0} is not in the graph")]
    UnknownStation(Station),

    /// Two consecutive stations share no graph edge
    #[error("stations {0} and {1} are not adjacent")]
    NonAdjacent(Station, Station),

    /// A station appears more than once
    #[error("station {0} appears more than once")]
    DuplicateStation(Station),
}

/// Check that `path` is a legal simple route from `start` to `end`.
///
/// The sequence must be non-empty, begin at `start`, finish at `end`,
/// stay within the graph, hop only between adjacent stations, and visit
/// no station twice.
pub fn validate_path(
    graph: &Graph,
    path: &[Station],
    start: &Station,
    end: &Station,
) -> Result<(), PathViolation> {
    let (Some(first), Some(last)) = (path.first(), path.last()) else {
        return Err(PathViolation::EmptyPath);
    };
    if first != start {
        return Err(PathViolation::WrongStart {
            expected: start.clone(),
            actual: first.clone(),
        });
    }
    if last != end {
        return Err(PathViolation::WrongEnd {
            expected: end.clone(),
            actual: last.clone(),
        });
    }

    for station in path {
        if !graph.contains(station) {
            return Err(PathViolation::UnknownStation(station.clone()));
        }
    }

    for pair in path.windows(2) {
        if !graph.adjacent(&pair[0], &pair[1]) {
            return Err(PathViolation::NonAdjacent(pair[0].clone(), pair[1].clone()));
        }
    }

    let mut seen = std::collections::HashSet::new();
    for station in path {
        if !seen.insert(station) {
            return Err(PathViolation::DuplicateStation(station.clone()));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::TransferPenalties;
    use crate::topology::{Line, LineName, Topology};

    fn graph() -> Graph {
        let lines = vec![
            Line::new(
                LineName::new("1"),
                vec![
                    Station::new("A"),
                    Station::new("B"),
                    Station::new("C"),
                    Station::new("D"),
                ],
                false,
                None,
            )
            .unwrap(),
            Line::new(
                LineName::new("2"),
                vec![Station::new("B"), Station::new("E")],
                false,
                None,
            )
            .unwrap(),
        ];
        let topology = Topology::new(lines).unwrap();
        Graph::build(
            &topology,
            &[LineName::new("1"), LineName::new("2")],
            TransferPenalties::default(),
        )
        .unwrap()
    }

    fn path(stations: &[&str]) -> Vec<Station> {
        stations.iter().map(|s| Station::new(s)).collect()
    }

    #[test]
    fn valid_path_passes() {
        let g = graph();
        assert_eq!(
            validate_path(&g, &path(&["A", "B", "E"]), &Station::new("A"), &Station::new("E")),
            Ok(())
        );
    }

    #[test]
    fn empty_path() {
        let g = graph();
        assert_eq!(
            validate_path(&g, &[], &Station::new("A"), &Station::new("E")),
            Err(PathViolation::EmptyPath)
        );
    }

    #[test]
    fn wrong_start() {
        let g = graph();
        let err = validate_path(&g, &path(&["B", "E"]), &Station::new("A"), &Station::new("E"))
            .unwrap_err();
        assert_eq!(
            err,
            PathViolation::WrongStart {
                expected: Station::new("A"),
                actual: Station::new("B"),
            }
        );
    }

    #[test]
    fn wrong_end() {
        let g = graph();
        let err = validate_path(&g, &path(&["A", "B"]), &Station::new("A"), &Station::new("E"))
            .unwrap_err();
        assert_eq!(
            err,
            PathViolation::WrongEnd {
                expected: Station::new("E"),
                actual: Station::new("B"),
            }
        );
    }

    #[test]
    fn unknown_station() {
        let g = graph();
        let err = validate_path(
            &g,
            &path(&["A", "Z", "E"]),
            &Station::new("A"),
            &Station::new("E"),
        )
        .unwrap_err();
        assert_eq!(err, PathViolation::UnknownStation(Station::new("Z")));
    }

    #[test]
    fn non_adjacent_pair() {
        let g = graph();
        let err = validate_path(
            &g,
            &path(&["A", "C", "B", "E"]),
            &Station::new("A"),
            &Station::new("E"),
        )
        .unwrap_err();
        assert_eq!(
            err,
            PathViolation::NonAdjacent(Station::new("A"), Station::new("C"))
        );
    }

    #[test]
    fn duplicate_station() {
        let g = graph();
        let err = validate_path(
            &g,
            &path(&["A", "B", "A", "B", "E"]),
            &Station::new("A"),
            &Station::new("E"),
        )
        .unwrap_err();
        assert_eq!(err, PathViolation::DuplicateStation(Station::new("A")));
    }

    #[test]
    fn single_station_path() {
        let g = graph();
        assert_eq!(
            validate_path(&g, &path(&["A"]), &Station::new("A"), &Station::new("A")),
            Ok(())
        );
    }
}
