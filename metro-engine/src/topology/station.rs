//! Station and line name types.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer};

/// A station, identified by its unique name.
///
/// Stations are compared, hashed, and ordered by name. The name is stored
/// behind an `Arc` so that paths and adjacency structures can clone freely.
///
/// # Examples
///
/// ```
/// use metro_engine::topology::Station;
///
/// let a = Station::new("车公庙");
/// let b = Station::new("车公庙");
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "车公庙");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Station(Arc<str>);

impl Station {
    /// Create a station from its name.
    pub fn new(name: impl AsRef<str>) -> Self {
        Station(Arc::from(name.as_ref()))
    }

    /// Returns the station name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Station({})", self.as_str())
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Station {
    fn from(s: &str) -> Self {
        Station::new(s)
    }
}

impl<'de> Deserialize<'de> for Station {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Station::new)
    }
}

/// The name of a line, e.g. `"5号线"` or its branch `"5号线+"`.
///
/// Branch lines extend their trunk's name with a distinguishing suffix;
/// Y-junction detection relies on that convention (see the topology module).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineName(Arc<str>);

impl LineName {
    /// Create a line name.
    pub fn new(name: impl AsRef<str>) -> Self {
        LineName(Arc::from(name.as_ref()))
    }

    /// Returns the line name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if `self` names a branch of `trunk`: the name strictly extends
    /// the trunk's name.
    pub fn extends(&self, trunk: &LineName) -> bool {
        self != trunk && self.as_str().starts_with(trunk.as_str())
    }
}

impl fmt::Debug for LineName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LineName({})", self.as_str())
    }
}

impl fmt::Display for LineName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for LineName {
    fn from(s: &str) -> Self {
        LineName::new(s)
    }
}

impl<'de> Deserialize<'de> for LineName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(LineName::new)
    }
}
