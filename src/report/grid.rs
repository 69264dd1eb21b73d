//! Rendered 2-D grid of strings: row 0 holds column headers, column 0 holds
//! row labels, the top-left corner stays blank, missing cells render blank.

/// One rendered report grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Vec<String>>,
}

impl Grid {
    pub fn new(cells: Vec<Vec<String>>) -> Self {
        Self { cells }
    }

    /// All grid rows, header row first.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.cells
    }

    /// Number of populated interior cells (headers and row labels excluded).
    pub fn populated_cells(&self) -> usize {
        self.cells
            .iter()
            .skip(1)
            .flat_map(|row| row.iter().skip(1))
            .filter(|cell| !cell.is_empty())
            .count()
    }

    /// Render the grid as plain text, one line per row, cells joined
    /// with " | ".
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for row in &self.cells {
            out.push_str(&row.join(" | "));
            out.push('\n');
        }
        out
    }
}
