//! Cell type conversion graph
//!
//! A fixed, directed graph over [`CellType`]s describing which retypes are possible.
//! Only real edges are listed; a missing edge means [`Compatibility::None`]. The edge
//! list is compiled once into a dense table so lookups are a single index.

use once_cell::sync::Lazy;

use crate::cell::CellType;
use crate::cell::CellType::*;

/// How safe it is to retype a column from one cell type to another
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Compatibility {
    /// Never convertible
    None,
    /// Always safe, existing values need not be inspected
    Independent,
    /// Safe only if every existing value validates against the target type
    Dependent,
}

/// Mode of a stored edge. There is deliberately no `None` mode to store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeMode {
    Independent,
    Dependent,
}

/// A directed conversion edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionEdge {
    pub from: CellType,
    pub to: CellType,
    pub mode: EdgeMode,
    /// Explanation attached to reports of conversions that pass but can surprise users.
    /// Only dependent edges carry one.
    pub warning: Option<&'static str>,
}

const fn independent(from: CellType, to: CellType) -> ConversionEdge {
    ConversionEdge {
        from,
        to,
        mode: EdgeMode::Independent,
        warning: None,
    }
}

const fn dependent(from: CellType, to: CellType) -> ConversionEdge {
    ConversionEdge {
        from,
        to,
        mode: EdgeMode::Dependent,
        warning: None,
    }
}

const fn dependent_warned(from: CellType, to: CellType, warning: &'static str) -> ConversionEdge {
    ConversionEdge {
        from,
        to,
        mode: EdgeMode::Dependent,
        warning: Some(warning),
    }
}

/// Every conversion the grid supports. `Complex` has no edges.
pub static EDGES: &[ConversionEdge] = &[
    // to text, always
    independent(Number, String),
    independent(Percentage, String),
    independent(Currency, String),
    independent(Boolean, String),
    independent(Date, String),
    independent(DateTime, String),
    independent(Time, String),
    independent(Avatar, String),
    independent(Link, String),
    independent(Email, String),
    independent(Select, String),
    independent(MultiSelect, String),
    // numeric
    dependent(Number, Currency),
    independent(Percentage, Number),
    independent(Currency, Number),
    independent(Boolean, Number),
    dependent(Number, Percentage),
    dependent(Number, Boolean),
    // temporal
    independent(Date, DateTime),
    dependent(DateTime, Date),
    // web
    dependent(Avatar, Link),
    dependent_warned(
        Link,
        Avatar,
        "links that do not point at an image will show as broken avatars",
    ),
    // options
    independent(Select, MultiSelect),
    dependent(MultiSelect, Select),
    // from text, value by value
    dependent(String, Number),
    dependent(String, Percentage),
    dependent(String, Currency),
    dependent(String, Boolean),
    dependent(String, Date),
    dependent(String, DateTime),
    dependent(String, Time),
    dependent(String, Avatar),
    dependent(String, Link),
    dependent(String, Email),
    dependent(String, Select),
    dependent_warned(
        String,
        MultiSelect,
        "comma separated text will be split into several options",
    ),
];

type Table = [[Option<&'static ConversionEdge>; CellType::COUNT]; CellType::COUNT];

static TABLE: Lazy<Table> = Lazy::new(|| {
    let mut table: Table = [[None; CellType::COUNT]; CellType::COUNT];
    for edge in EDGES {
        table[edge.from.ordinal()][edge.to.ordinal()] = Some(edge);
    }
    table
});

/// Look up the edge from one cell type to another, if there is one
pub fn edge(from: CellType, to: CellType) -> Option<&'static ConversionEdge> {
    TABLE[from.ordinal()][to.ordinal()]
}

/// How safe it is to retype `from` into `to`
pub fn compatibility(from: CellType, to: CellType) -> Compatibility {
    match edge(from, to) {
        Some(ConversionEdge {
            mode: EdgeMode::Independent,
            ..
        }) => Compatibility::Independent,
        Some(ConversionEdge {
            mode: EdgeMode::Dependent,
            ..
        }) => Compatibility::Dependent,
        None => Compatibility::None,
    }
}

/// Warning attached to the conversion from `from` to `to`, if any
pub fn warning(from: CellType, to: CellType) -> Option<&'static str> {
    edge(from, to).and_then(|e| e.warning)
}
