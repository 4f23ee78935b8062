//! Strongly-typed report tables.
//!
//! Every aggregation in this crate produces a [`Table`]: explicit ordered row
//! labels, explicit ordered columns, and a dense `f64` cell matrix. Columns may
//! carry a group label (the weekday), which the report writer renders as an
//! extra header row spanning the columns of each weekday.
//!
//! Cells are pre-allocated and zeroed at construction; a key with no samples
//! stays 0 without any special casing in the fill loops.

/// One table column: a label plus an optional group label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub label: String,
    pub group: Option<String>,
}

impl Column {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            group: None,
        }
    }

    pub fn grouped(label: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            group: Some(group.into()),
        }
    }
}

/// A named table of `f64` cells with labeled rows and columns.
#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    row_labels: Vec<String>,
    columns: Vec<Column>,
    cells: Vec<f64>,
}

impl Table {
    pub fn new(name: impl Into<String>, row_labels: Vec<String>, columns: Vec<Column>) -> Self {
        let cells = vec![0.0; row_labels.len() * columns.len()];
        Self {
            name: name.into(),
            row_labels,
            columns,
            cells,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn n_rows(&self) -> usize {
        self.row_labels.len()
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// Whether any column carries a group label (drives the extra header row).
    pub fn has_groups(&self) -> bool {
        self.columns.iter().any(|c| c.group.is_some())
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        let idx = self.index(row, col);
        self.cells[idx] = value;
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.cells[self.index(row, col)]
    }

    /// One row of cells, in column order.
    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.columns.len();
        &self.cells[start..start + self.columns.len()]
    }

    fn index(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.row_labels.len() && col < self.columns.len());
        row * self.columns.len() + col
    }
}
