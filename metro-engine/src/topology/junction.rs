//! Y-junction metadata and virtual line labels.

use std::fmt;

use super::line::Line;
use super::station::{LineName, Station};

/// Marker appended when displaying a trunk's rear (B) segment label.
pub const REAR_MARKER: &str = "-B";

/// The virtual line label used for adjacency and cost lookups.
///
/// For a line with no Y-junction this is just the line name. A Y-junction
/// trunk is split into two labels: the front segment (declared start up to
/// the junction) keeps the bare name, the rear segment carries the B marker.
/// A branch line's label is its own bare name.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label {
    line: LineName,
    rear: bool,
}

impl Label {
    /// Label for a whole line, a trunk's front (A) segment, or a branch.
    pub fn whole(line: LineName) -> Self {
        Label { line, rear: false }
    }

    /// Label for a trunk's rear (B) segment.
    pub fn rear(line: LineName) -> Self {
        Label { line, rear: true }
    }

    /// The underlying line name.
    pub fn line(&self) -> &LineName {
        &self.line
    }

    /// True for the rear (B) segment of a Y-junction trunk.
    pub fn is_rear(&self) -> bool {
        self.rear
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rear {
            write!(f, "{}{}", self.line, REAR_MARKER)
        } else {
            self.line.fmt(f)
        }
    }
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Label({})", self)
    }
}

/// A trunk/branch pair sharing exactly one station, the junction.
///
/// The junction is an endpoint of the branch's stop sequence. Detection is
/// structural; candidate pairs are limited to lines whose names extend the
/// trunk's name (e.g. `5号线` and `5号线+`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct YJunction {
    trunk: LineName,
    branch: LineName,
    junction: Station,
}

impl YJunction {
    /// Structurally detect a Y-junction between `trunk` and `branch`.
    ///
    /// Returns `None` unless the branch's name extends the trunk's, the two
    /// lines share exactly one station, and that station is the first or
    /// last stop of the branch.
    pub fn detect(trunk: &Line, branch: &Line) -> Option<YJunction> {
        if !branch.name().extends(trunk.name()) {
            return None;
        }

        let mut shared = branch
            .stations()
            .iter()
            .filter(|s| trunk.position(s).is_some());
        let junction = shared.next()?.clone();
        if shared.next().is_some() {
            return None;
        }

        let endpoint = branch.stations().first() == Some(&junction)
            || branch.stations().last() == Some(&junction);
        if !endpoint {
            return None;
        }

        Some(YJunction {
            trunk: trunk.name().clone(),
            branch: branch.name().clone(),
            junction,
        })
    }

    /// The trunk line's name.
    pub fn trunk(&self) -> &LineName {
        &self.trunk
    }

    /// The branch line's name.
    pub fn branch(&self) -> &LineName {
        &self.branch
    }

    /// The shared station where the branch splits off.
    pub fn junction(&self) -> &Station {
        &self.junction
    }

    /// Classify a label's role within this Y-system, if it belongs to it.
    pub fn role(&self, label: &Label) -> Option<YRole> {
        if label.line() == &self.trunk {
            Some(if label.is_rear() {
                YRole::RearSegment
            } else {
                YRole::FrontSegment
            })
        } else if label.line() == &self.branch && !label.is_rear() {
            Some(YRole::Branch)
        } else {
            None
        }
    }
}

/// Which leg of a Y-system a label denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YRole {
    /// Trunk segment from the declared start to the junction.
    FrontSegment,
    /// Trunk segment from the junction to the far end.
    RearSegment,
    /// The branch line.
    Branch,
}
