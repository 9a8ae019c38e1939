//! Line definitions and their configuration format.

use serde::Deserialize;

use super::station::{LineName, Station};

/// An ordered sequence of stations operated as one service.
#[derive(Debug, Clone)]
pub struct Line {
    name: LineName,
    stations: Vec<Station>,
    is_loop: bool,
    /// Station that orients the line for branch-segment detection.
    start: Station,
}

impl Line {
    /// Create a line from its name and stop sequence.
    ///
    /// `start` defaults to the first station when `None`.
    pub fn new(
        name: LineName,
        stations: Vec<Station>,
        is_loop: bool,
        start: Option<Station>,
    ) -> Result<Self, InvalidLine> {
        let Some(first) = stations.first() else {
            return Err(InvalidLine::Empty { line: name });
        };
        let start = start.unwrap_or_else(|| first.clone());
        if !stations.contains(&start) {
            return Err(InvalidLine::StartNotOnLine {
                line: name,
                start,
            });
        }
        Ok(Line {
            name,
            stations,
            is_loop,
            start,
        })
    }

    /// The line's name.
    pub fn name(&self) -> &LineName {
        &self.name
    }

    /// The ordered stop sequence.
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// True if the last station connects back to the first.
    pub fn is_loop(&self) -> bool {
        self.is_loop
    }

    /// The declared start station.
    pub fn start(&self) -> &Station {
        &self.start
    }

    /// Index of the declared start in the stop sequence.
    pub(crate) fn start_index(&self) -> usize {
        // Membership is checked at construction.
        self.stations.iter().position(|s| s == &self.start).unwrap()
    }

    /// Position of a station on this line, if present.
    pub fn position(&self, station: &Station) -> Option<usize> {
        self.stations.iter().position(|s| s == station)
    }
}

/// A line definition that fails its structural checks.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidLine {
    /// The stop sequence is empty
    #[error("line {line} has no stations")]
    Empty { line: LineName },

    /// The declared start station is not on the line
    #[error("start station {start} is not on line {line}")]
    StartNotOnLine { line: LineName, start: Station },
}

/// One line entry in the topology configuration.
///
/// Accepts either a bare station array or an object form:
///
/// ```json
/// { "stations": ["A", "B", "C"], "loop": true, "start": "B" }
/// ```
///
/// `loop` defaults to false and `start` to the first station.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LineConfig {
    /// Bare ordered station list.
    Stations(Vec<Station>),
    /// Object form with optional loop flag and start station.
    Detailed {
        stations: Vec<Station>,
        #[serde(default, rename = "loop")]
        is_loop: bool,
        #[serde(default)]
        start: Option<Station>,
    },
}

impl LineConfig {
    /// Resolve this entry into a [`Line`] named `name`.
    pub fn into_line(self, name: LineName) -> Result<Line, InvalidLine> {
        match self {
            LineConfig::Stations(stations) => Line::new(name, stations, false, None),
            LineConfig::Detailed {
                stations,
                is_loop,
                start,
            } => Line::new(name, stations, is_loop, start),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn st(names: &[&str]) -> Vec<Station> {
        names.iter().map(|n| Station::new(n)).collect()
    }

    #[test]
    fn start_defaults_to_first_station() {
        let line = Line::new(LineName::new("1"), st(&["A", "B", "C"]), false, None).unwrap();
        assert_eq!(line.start(), &Station::new("A"));
        assert_eq!(line.start_index(), 0);
    }

    #[test]
    fn declared_start_is_respected() {
        let line = Line::new(
            LineName::new("1"),
            st(&["A", "B", "C"]),
            false,
            Some(Station::new("C")),
        )
        .unwrap();
        assert_eq!(line.start_index(), 2);
    }

    #[test]
    fn empty_line_rejected() {
        let err = Line::new(LineName::new("1"), vec![], false, None).unwrap_err();
        assert!(matches!(err, InvalidLine::Empty { .. }));
    }

    #[test]
    fn start_off_line_rejected() {
        let err = Line::new(
            LineName::new("1"),
            st(&["A", "B"]),
            false,
            Some(Station::new("Z")),
        )
        .unwrap_err();
        assert!(matches!(err, InvalidLine::StartNotOnLine { .. }));
    }

    #[test]
    fn config_bare_list() {
        let cfg: LineConfig = serde_json::from_str(r#"["A", "B", "C"]"#).unwrap();
        let line = cfg.into_line(LineName::new("1")).unwrap();
        assert_eq!(line.stations().len(), 3);
        assert!(!line.is_loop());
    }

    #[test]
    fn config_object_form() {
        let cfg: LineConfig =
            serde_json::from_str(r#"{"stations": ["A", "B", "C"], "loop": true, "start": "B"}"#)
                .unwrap();
        let line = cfg.into_line(LineName::new("1")).unwrap();
        assert!(line.is_loop());
        assert_eq!(line.start(), &Station::new("B"));
    }

    #[test]
    fn config_object_defaults() {
        let cfg: LineConfig = serde_json::from_str(r#"{"stations": ["A", "B"]}"#).unwrap();
        let line = cfg.into_line(LineName::new("1")).unwrap();
        assert!(!line.is_loop());
        assert_eq!(line.start(), &Station::new("A"));
    }
}
