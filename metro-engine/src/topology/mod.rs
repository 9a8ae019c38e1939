//! Immutable network topology: line definitions plus Y-junction metadata.
//!
//! A [`Topology`] is loaded once per supported network and never mutated.
//! It owns the line definitions and the structurally-detected Y-junction
//! pairs; graphs are derived from it per line selection (see [`crate::graph`]).

mod junction;
mod line;
mod station;

use std::collections::BTreeMap;
use std::collections::HashMap;

pub use junction::{Label, REAR_MARKER, YJunction, YRole};
pub use line::{InvalidLine, Line, LineConfig};
pub use station::{LineName, Station};

/// Errors raised while loading a topology.
#[derive(Debug, thiserror::Error)]
pub enum TopologyError {
    /// Configuration is not valid JSON in the expected shape
    #[error("cannot parse line configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// A line definition failed its structural checks
    #[error(transparent)]
    InvalidLine(#[from] InvalidLine),

    /// The same line name appears twice
    #[error("duplicate line name: {0}")]
    DuplicateLine(LineName),
}

/// The full set of known lines for one network, with Y-junctions detected.
#[derive(Debug, Clone)]
pub struct Topology {
    lines: Vec<Line>,
    by_name: HashMap<LineName, usize>,
    junctions: Vec<YJunction>,
    /// Both the trunk's and the branch's name resolve to their Y-system.
    junction_by_line: HashMap<LineName, usize>,
}

impl Topology {
    /// Build a topology from line definitions.
    ///
    /// Y-junctions are detected here: for every pair of lines where one
    /// name extends the other, the pair is checked structurally (exactly
    /// one shared station, sitting at an endpoint of the branch). Each line
    /// joins at most one Y-system; pairs are scanned in the given line
    /// order, so detection is deterministic.
    pub fn new(lines: Vec<Line>) -> Result<Self, TopologyError> {
        let mut by_name = HashMap::with_capacity(lines.len());
        for (idx, line) in lines.iter().enumerate() {
            if by_name.insert(line.name().clone(), idx).is_some() {
                return Err(TopologyError::DuplicateLine(line.name().clone()));
            }
        }

        let mut junctions: Vec<YJunction> = Vec::new();
        let mut junction_by_line: HashMap<LineName, usize> = HashMap::new();
        for trunk in &lines {
            if junction_by_line.contains_key(trunk.name()) {
                continue;
            }
            for branch in &lines {
                if junction_by_line.contains_key(branch.name()) {
                    continue;
                }
                if let Some(y) = YJunction::detect(trunk, branch) {
                    let idx = junctions.len();
                    junction_by_line.insert(y.trunk().clone(), idx);
                    junction_by_line.insert(y.branch().clone(), idx);
                    junctions.push(y);
                    break;
                }
            }
        }

        tracing::debug!(
            lines = lines.len(),
            junctions = junctions.len(),
            "topology loaded"
        );

        Ok(Topology {
            lines,
            by_name,
            junctions,
            junction_by_line,
        })
    }

    /// Load a topology from its JSON configuration.
    ///
    /// The input maps line names to either a bare station array or an
    /// object with `stations`, optional `loop`, and optional `start` keys.
    /// Lines are kept in name order so repeated loads agree.
    ///
    /// # Examples
    ///
    /// ```
    /// use metro_engine::topology::Topology;
    ///
    /// let topo = Topology::from_json(
    ///     r#"{
    ///         "1": ["A", "B", "C"],
    ///         "2": {"stations": ["X", "Y", "Z"], "loop": true}
    ///     }"#,
    /// )
    /// .unwrap();
    /// assert_eq!(topo.all_lines().len(), 2);
    /// ```
    pub fn from_json(input: &str) -> Result<Self, TopologyError> {
        let config: BTreeMap<LineName, LineConfig> = serde_json::from_str(input)?;
        let lines = config
            .into_iter()
            .map(|(name, cfg)| cfg.into_line(name))
            .collect::<Result<Vec<_>, _>>()?;
        Topology::new(lines)
    }

    /// Names of every known line, in definition order.
    pub fn all_lines(&self) -> Vec<LineName> {
        self.lines.iter().map(|l| l.name().clone()).collect()
    }

    /// Look up a line by name.
    pub fn line(&self, name: &LineName) -> Option<&Line> {
        self.by_name.get(name).map(|&idx| &self.lines[idx])
    }

    /// The stop sequence of a line, if known.
    pub fn line_stations(&self, name: &LineName) -> Option<&[Station]> {
        self.line(name).map(|l| l.stations())
    }

    /// The Y-system a line participates in, if any.
    pub fn junction_for(&self, line: &LineName) -> Option<&YJunction> {
        self.junction_by_line
            .get(line)
            .map(|&idx| &self.junctions[idx])
    }

    /// All detected Y-junction pairs.
    pub fn junctions(&self) -> &[YJunction] {
        &self.junctions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(name: &str, stations: &[&str]) -> Line {
        Line::new(
            LineName::new(name),
            stations.iter().map(|s| Station::new(s)).collect(),
            false,
            None,
        )
        .unwrap()
    }

    #[test]
    fn duplicate_line_names_rejected() {
        let err = Topology::new(vec![line("1", &["A", "B"]), line("1", &["C", "D"])]).unwrap_err();
        assert!(matches!(err, TopologyError::DuplicateLine(_)));
    }

    #[test]
    fn junction_detected_on_load() {
        let topo = Topology::new(vec![
            line("5", &["P", "J", "Q"]),
            line("5+", &["J", "R"]),
            line("6", &["A", "B"]),
        ])
        .unwrap();

        assert_eq!(topo.junctions().len(), 1);
        let y = topo.junction_for(&LineName::new("5")).unwrap();
        assert_eq!(y.junction(), &Station::new("J"));
        assert_eq!(
            topo.junction_for(&LineName::new("5+")).unwrap().trunk(),
            &LineName::new("5")
        );
        assert!(topo.junction_for(&LineName::new("6")).is_none());
    }

    #[test]
    fn interchange_is_not_a_junction() {
        // Lines crossing at one station do not form a Y-system unless the
        // naming convention ties them together.
        let topo = Topology::new(vec![line("1", &["A", "B", "C"]), line("2", &["B", "D"])]) //
            .unwrap();
        assert!(topo.junctions().is_empty());
    }

    #[test]
    fn from_json_mixed_forms() {
        let topo = Topology::from_json(
            r#"{
                "1": ["A", "B"],
                "2": {"stations": ["C", "D", "E"], "loop": true, "start": "D"}
            }"#,
        )
        .unwrap();
        let two = topo.line(&LineName::new("2")).unwrap();
        assert!(two.is_loop());
        assert_eq!(two.start(), &Station::new("D"));
        assert_eq!(
            topo.line_stations(&LineName::new("1")).unwrap().len(),
            2
        );
        assert!(topo.line_stations(&LineName::new("9")).is_none());
    }

    #[test]
    fn from_json_bad_shape_fails() {
        assert!(Topology::from_json(r#"{"1": 42}"#).is_err());
        assert!(Topology::from_json("not json").is_err());
    }
}
