//! Column descriptors
//!
//! A [`ColumnDescriptor`] pairs a column's [`CellType`] (what its values are) with
//! its [`ColumnKind`] (what role it plays in the view). The kind wins over the cell
//! type when choosing a formatter; the cell type governs validation and storage.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cell::CellType;
use crate::registry;

/// Structural role of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Regular data column
    #[default]
    Standard,
    /// Reference to a row of another table
    Link,
    /// Value pulled through a link column
    Lookup,
    /// Row display order
    Index,
    /// Row identity
    Identity,
    /// Raw key backing a link column
    ForeignKey,
}

impl ColumnKind {
    /// Kinds that are never shown to clients as columns
    pub fn is_always_internal(self) -> bool {
        matches!(
            self,
            ColumnKind::Index | ColumnKind::Identity | ColumnKind::ForeignKey
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnKind::Standard => "standard",
            ColumnKind::Link => "link",
            ColumnKind::Lookup => "lookup",
            ColumnKind::Index => "index",
            ColumnKind::Identity => "identity",
            ColumnKind::ForeignKey => "foreign_key",
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Column metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Stable column identifier
    pub id: String,
    /// Key of this column's values in a row
    pub key: String,
    /// Display name
    pub name: String,
    pub cell_type: CellType,
    #[serde(default)]
    pub kind: ColumnKind,
    /// Stored editability; see [`resolve_column_behavior`] for the effective value
    #[serde(default = "default_true")]
    pub editable: bool,
    #[serde(default)]
    pub internal: bool,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default = "default_true")]
    pub sortable: bool,
    #[serde(default = "default_true")]
    pub resizable: bool,
    /// Position in the column list
    #[serde(default)]
    pub index: usize,
}

fn default_true() -> bool {
    true
}

impl ColumnDescriptor {
    /// Create a standard column whose id, key and name are all `key`
    pub fn new<S: Into<String>>(key: S, cell_type: CellType) -> Self {
        let key = key.into();
        Self {
            id: key.clone(),
            name: key.clone(),
            key,
            cell_type,
            kind: ColumnKind::Standard,
            editable: true,
            internal: false,
            hidden: false,
            sortable: true,
            resizable: true,
            index: 0,
        }
    }

    /// Set the column id
    pub fn with_id<S: Into<String>>(mut self, id: S) -> Self {
        self.id = id.into();
        self
    }

    /// Set the display name
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// Set the kind; kinds that are always internal also mark the column internal
    pub fn with_kind(mut self, kind: ColumnKind) -> Self {
        self.kind = kind;
        if kind.is_always_internal() {
            self.internal = true;
        }
        self
    }

    pub fn with_editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    pub fn with_internal(mut self, internal: bool) -> Self {
        self.internal = internal;
        self
    }

    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    /// Whether the column must be kept from clients.
    ///
    /// Index, identity and foreign key columns are internal whatever their flag says.
    pub fn is_internal(&self) -> bool {
        self.internal || self.kind.is_always_internal()
    }
}

/// How a column's cells are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Formatter {
    /// Rendered by the cell type's own formatter
    Cell(CellType),
    /// Link to another table's row
    Reference,
    /// Read-through value of a link
    Lookup,
    /// Row number
    RowIndex,
}

/// Effective behavior of a column, derived from its descriptor and the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnBehavior {
    pub editable: bool,
    pub formatter: Formatter,
}

/// Resolve a column's effective behavior.
///
/// A column is editable only if its stored flag allows it, it is not the row index,
/// and its cell type has an editor. Link and lookup kinds override the cell type's
/// formatter.
pub fn resolve_column_behavior(column: &ColumnDescriptor) -> ColumnBehavior {
    let editable = column.editable
        && column.kind != ColumnKind::Index
        && registry::has_editor(column.cell_type);

    let formatter = match column.kind {
        ColumnKind::Link => Formatter::Reference,
        ColumnKind::Lookup => Formatter::Lookup,
        ColumnKind::Index => Formatter::RowIndex,
        ColumnKind::Standard | ColumnKind::Identity | ColumnKind::ForeignKey => {
            Formatter::Cell(column.cell_type)
        }
    };

    ColumnBehavior {
        editable,
        formatter,
    }
}

/// A client-facing column together with its resolved behavior
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedColumn {
    #[serde(flatten)]
    pub descriptor: ColumnDescriptor,
    pub behavior: ColumnBehavior,
}

impl ResolvedColumn {
    pub fn resolve(descriptor: ColumnDescriptor) -> Self {
        let behavior = resolve_column_behavior(&descriptor);
        Self {
            descriptor,
            behavior,
        }
    }

    pub fn key(&self) -> &str {
        &self.descriptor.key
    }

    pub fn cell_type(&self) -> CellType {
        self.descriptor.cell_type
    }
}
