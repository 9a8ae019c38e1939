//! Transfer cost model.
//!
//! All costs are exact decimals: totals are sums of one-unit hops and the
//! penalty constants, and tie detection compares them for exact equality.
//! Binary floating point would corrupt that comparison, so `Decimal` is
//! used throughout.

use std::collections::HashMap;
use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::topology::{Label, LineName, Station, YJunction, YRole};

/// Cost of one hop between adjacent stations.
pub const HOP_COST: Decimal = Decimal::ONE;

/// The penalty constants applied when the virtual line label changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferPenalties {
    /// Charged for a change between unrelated labels.
    pub standard: Decimal,
    /// Charged when crossing a Y-junction's rear-segment/branch boundary
    /// at the junction itself. Lower than `standard`.
    pub reverse: Decimal,
}

impl Default for TransferPenalties {
    fn default() -> Self {
        TransferPenalties {
            standard: dec!(2.5),
            reverse: dec!(1.5),
        }
    }
}

/// Resolves label changes to cost deltas.
///
/// Owns the Y-junction metadata relevant to one built graph, indexed by
/// both the trunk's and the branch's line name.
#[derive(Debug, Clone)]
pub struct TransferModel {
    penalties: TransferPenalties,
    junctions: HashMap<LineName, YJunction>,
}

impl TransferModel {
    /// Build a model over the given Y-systems.
    pub fn new(penalties: TransferPenalties, junctions: impl IntoIterator<Item = YJunction>) -> Self {
        let mut by_line = HashMap::new();
        for y in junctions {
            by_line.insert(y.trunk().clone(), y.clone());
            by_line.insert(y.branch().clone(), y);
        }
        TransferModel {
            penalties,
            junctions: by_line,
        }
    }

    /// The penalty constants in force.
    pub fn penalties(&self) -> &TransferPenalties {
        &self.penalties
    }

    /// Cost of continuing from `from` onto `to` at `station`.
    ///
    /// Zero at trip start (`from` is `None`) and when the label does not
    /// change. Within one Y-system, a front-segment/branch change is a free
    /// continuation (the same physical vehicle runs through the junction),
    /// and a rear-segment/branch change at the junction station costs the
    /// reverse penalty. Every other change costs the standard penalty.
    pub fn transfer_cost(&self, station: &Station, from: Option<&Label>, to: &Label) -> Decimal {
        let Some(from) = from else {
            return Decimal::ZERO;
        };
        if from == to {
            return Decimal::ZERO;
        }

        if let (Some(sys_from), Some(sys_to)) = (
            self.junctions.get(from.line()),
            self.junctions.get(to.line()),
        ) {
            if sys_from == sys_to {
                if let (Some(role_from), Some(role_to)) = (sys_from.role(from), sys_from.role(to)) {
                    match (role_from, role_to) {
                        (YRole::FrontSegment, YRole::Branch)
                        | (YRole::Branch, YRole::FrontSegment) => return Decimal::ZERO,
                        (YRole::RearSegment, YRole::Branch) | (YRole::Branch, YRole::RearSegment)
                            if station == sys_from.junction() =>
                        {
                            return self.penalties.reverse;
                        }
                        _ => {}
                    }
                }
            }
        }

        self.penalties.standard
    }
}

/// Total cost of a path, finite or unreachable.
///
/// `Infinite` compares greater than every finite cost, so minimisation can
/// use the ordinary `Ord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PathCost {
    /// An exact, reachable total.
    Finite(Decimal),
    /// No path exists (or no label sequence can realise one).
    Infinite,
}

impl PathCost {
    /// Zero cost.
    pub const ZERO: PathCost = PathCost::Finite(Decimal::ZERO);

    /// The finite value, if any.
    pub fn as_finite(&self) -> Option<Decimal> {
        match self {
            PathCost::Finite(d) => Some(*d),
            PathCost::Infinite => None,
        }
    }

    /// True unless the cost is infinite.
    pub fn is_finite(&self) -> bool {
        matches!(self, PathCost::Finite(_))
    }
}

impl fmt::Display for PathCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathCost::Finite(d) => d.fmt(f),
            PathCost::Infinite => f.write_str("inf"),
        }
    }
}
