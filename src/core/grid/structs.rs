//! Record types shared by the warehouse, grid builder and transitions

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::utils::error::GridError;

/// Table section a row belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Section {
    Header,
    #[default]
    Body,
    Footer,
}

impl Section {
    /// Markup tag name of the row group (`thead`, `tbody`, `tfoot`)
    pub fn tag(&self) -> &'static str {
        match self {
            Section::Header => "thead",
            Section::Body => "tbody",
            Section::Footer => "tfoot",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Section {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "header" | "thead" => Ok(Section::Header),
            "body" | "tbody" => Ok(Section::Body),
            "footer" | "tfoot" => Ok(Section::Footer),
            other => Err(GridError::UnknownSection {
                name: other.to_string(),
            }),
        }
    }
}

/// A single input cell with its declared spans
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cell<T> {
    /// Element handle owned by the caller
    pub element: T,
    /// Number of rows this cell spans
    pub rowspan: usize,
    /// Number of columns this cell spans
    pub colspan: usize,
    /// Caller-supplied new/locked marker
    pub is_new: bool,
}

impl<T> Cell<T> {
    /// Create a 1x1 cell
    pub fn new(element: T) -> Self {
        Cell {
            element,
            rowspan: 1,
            colspan: 1,
            is_new: false,
        }
    }

    /// Create a cell with explicit spans
    pub fn with_spans(element: T, rowspan: usize, colspan: usize) -> Self {
        Cell {
            element,
            rowspan,
            colspan,
            is_new: false,
        }
    }

    /// Mark the cell as newly created by the caller
    pub fn marked_new(mut self) -> Self {
        self.is_new = true;
        self
    }
}

/// An input row: ordered cells plus the section it lives in
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Row<T> {
    pub cells: Vec<Cell<T>>,
    pub section: Section,
}

impl<T> Row<T> {
    pub fn new(cells: Vec<Cell<T>>, section: Section) -> Self {
        Row { cells, section }
    }

    /// Create a body row
    pub fn body(cells: Vec<Cell<T>>) -> Self {
        Row::new(cells, Section::Body)
    }
}

/// Logical extent of a table after spans are accounted for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Grid {
    pub rows: usize,
    pub columns: usize,
}

impl Grid {
    pub fn new(rows: usize, columns: usize) -> Self {
        Grid { rows, columns }
    }

    /// Number of coordinates in the extent
    pub fn area(&self) -> usize {
        self.rows * self.columns
    }

    pub fn contains(&self, row: usize, column: usize) -> bool {
        row < self.rows && column < self.columns
    }
}

/// A zero-based grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Address {
    pub row: usize,
    pub column: usize,
}

impl Address {
    pub fn new(row: usize, column: usize) -> Self {
        Address { row, column }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Rectangular extent resolved by the grid builder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Span {
    pub rowspan: usize,
    pub colspan: usize,
}

impl Span {
    pub fn new(rowspan: usize, colspan: usize) -> Self {
        Span { rowspan, colspan }
    }

    pub fn single() -> Self {
        Span::new(1, 1)
    }
}

/// A cell as placed by the warehouse: effective spans plus anchor
#[derive(Debug, PartialEq, Eq)]
pub struct DetailExt<'a, T> {
    pub element: &'a T,
    /// Effective rowspan after clipping
    pub rowspan: usize,
    /// Effective colspan after clipping
    pub colspan: usize,
    /// Marker carried over from the input cell
    pub is_new: bool,
    /// Top-left coordinate of the span
    pub anchor: Address,
}

// Manual impls: deriving would demand `T: Clone`/`T: Copy` for a shared borrow.
impl<T> Clone for DetailExt<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for DetailExt<'_, T> {}

impl<T> DetailExt<'_, T> {
    pub fn span(&self) -> Span {
        Span::new(self.rowspan, self.colspan)
    }

    /// Whether the coordinate lies inside this cell's span
    pub fn covers(&self, row: usize, column: usize) -> bool {
        row >= self.anchor.row
            && row < self.anchor.row + self.rowspan
            && column >= self.anchor.column
            && column < self.anchor.column + self.colspan
    }
}

/// Placed cells of one input row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowData<'a, T> {
    pub cells: Vec<DetailExt<'a, T>>,
    pub section: Section,
}

/// One dense-grid entry
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ElementNew<T> {
    pub element: T,
    pub is_new: bool,
}

impl<T> ElementNew<T> {
    pub fn new(element: T, is_new: bool) -> Self {
        ElementNew { element, is_new }
    }
}

/// One dense-grid row
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RowCells<T> {
    pub cells: Vec<ElementNew<T>>,
    pub section: Section,
}

impl<T> RowCells<T> {
    pub fn new(cells: Vec<ElementNew<T>>, section: Section) -> Self {
        RowCells { cells, section }
    }
}

/// Gap-filled grid, one entry per coordinate
pub type DenseGrid<T> = Vec<RowCells<T>>;

/// A coalesced cell emitted at its anchor with its effective span
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DetailNew<T> {
    pub element: T,
    pub rowspan: usize,
    pub colspan: usize,
    pub is_new: bool,
}

impl<T> DetailNew<T> {
    pub fn new(element: T, rowspan: usize, colspan: usize, is_new: bool) -> Self {
        DetailNew {
            element,
            rowspan,
            colspan,
            is_new,
        }
    }

    pub fn span(&self) -> Span {
        Span::new(self.rowspan, self.colspan)
    }
}

/// Details emitted for one row, ready for re-serialization
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RowDetails<T> {
    pub details: Vec<DetailNew<T>>,
    pub section: Section,
}

impl<T> RowDetails<T> {
    pub fn new(details: Vec<DetailNew<T>>, section: Section) -> Self {
        RowDetails { details, section }
    }
}
