//! Page-oriented tabular report accumulator.
//!
//! A `ReportBook` collects named pages. Within a page, callers declare rows
//! with `add_row` and attach `(column, value)` cells to the current row with
//! `add_cell`; free-form lines go to the page transcript with `log`. Row
//! order is declaration order, column order is first-discovery order.
//! `flush` renders the accumulated table into a `Grid` and clears the
//! row/column state so the page can hold further tables; `save_all` writes
//! one plain-text transcript per page, one CSV grid file per page that has
//! populated cells, and echoes the rendered grids (or the raw transcript)
//! to the book's primary sink.
//!
//! The book owns its text sink explicitly; nothing here touches process
//! stdout.

pub mod grid;
pub mod records;

pub use grid::Grid;

use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

use crate::core::{Error, Result};
use crate::io::ensure_dir;

/// A finished report page: transcript plus zero or more rendered grids.
#[derive(Debug, Clone)]
pub struct Page {
    pub name: String,
    pub transcript: String,
    pub grids: Vec<Grid>,
}

impl Page {
    /// Whether any grid on this page carries at least one populated cell.
    /// Pages without cells are skipped for grid export but keep their
    /// transcript.
    pub fn has_cells(&self) -> bool {
        self.grids.iter().any(|g| g.populated_cells() > 0)
    }
}

struct Column {
    name: String,
    cells: Vec<(usize, String)>,
}

struct PageState {
    page: Page,
    row_names: Vec<String>,
    columns: Vec<Column>,
    column_index: HashMap<String, usize>,
}

impl PageState {
    fn new(name: &str) -> Self {
        Self {
            page: Page {
                name: name.to_string(),
                transcript: String::new(),
                grids: Vec::new(),
            },
            row_names: Vec::new(),
            columns: Vec::new(),
            column_index: HashMap::new(),
        }
    }

    fn add_cell(&mut self, column: &str, value: String) -> Result<()> {
        if self.row_names.is_empty() {
            return Err(Error::CellBeforeRow(column.to_string()));
        }
        let row = self.row_names.len() - 1;
        let idx = match self.column_index.get(column) {
            Some(&idx) => idx,
            None => {
                self.columns.push(Column {
                    name: column.to_string(),
                    cells: Vec::new(),
                });
                let idx = self.columns.len() - 1;
                self.column_index.insert(column.to_string(), idx);
                idx
            }
        };
        self.columns[idx].cells.push((row, value));
        Ok(())
    }

    fn flush(&mut self) {
        if self.row_names.is_empty() {
            return;
        }
        let mut cells =
            vec![vec![String::new(); self.columns.len() + 1]; self.row_names.len() + 1];
        for (c, column) in self.columns.iter().enumerate() {
            cells[0][c + 1] = column.name.clone();
        }
        for (r, name) in self.row_names.iter().enumerate() {
            cells[r + 1][0] = name.clone();
        }
        // Per column, a later cell for the same row wins.
        for (c, column) in self.columns.iter().enumerate() {
            for (row, value) in &column.cells {
                cells[row + 1][c + 1] = value.clone();
            }
        }
        self.page.grids.push(Grid::new(cells));
        self.row_names.clear();
        self.columns.clear();
        self.column_index.clear();
    }
}

/// Accumulates report pages and renders them into a primary text sink plus
/// per-page files.
pub struct ReportBook<W: Write> {
    sink: W,
    pages: Vec<Page>,
    current: Option<PageState>,
}

impl<W: Write> ReportBook<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            pages: Vec::new(),
            current: None,
        }
    }

    /// Flush and finalize the current page, then start a fresh named one.
    pub fn new_page(&mut self, name: &str) {
        if let Some(mut state) = self.current.take() {
            state.flush();
            self.pages.push(state.page);
        }
        self.current = Some(PageState::new(name));
    }

    /// Append one line to the current page's transcript.
    pub fn log(&mut self, line: impl AsRef<str>) -> Result<()> {
        let state = self.current.as_mut().ok_or(Error::NoActivePage)?;
        state.page.transcript.push_str(line.as_ref());
        state.page.transcript.push('\n');
        Ok(())
    }

    /// Declare a new row; subsequent cells attach to it. The first call on a
    /// page establishes row index 0.
    pub fn add_row(&mut self, name: impl Into<String>) -> Result<()> {
        let state = self.current.as_mut().ok_or(Error::NoActivePage)?;
        state.row_names.push(name.into());
        Ok(())
    }

    /// Attach a value to the named column at the current row. A column seen
    /// for the first time is appended to the column order.
    pub fn add_cell(&mut self, column: &str, value: impl Into<String>) -> Result<()> {
        let state = self.current.as_mut().ok_or(Error::NoActivePage)?;
        state.add_cell(column, value.into())
    }

    /// Attach a run of (column, value) pairs to the current row.
    pub fn add_cells<I, C, V>(&mut self, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = (C, V)>,
        C: AsRef<str>,
        V: Into<String>,
    {
        for (column, value) in pairs {
            self.add_cell(column.as_ref(), value)?;
        }
        Ok(())
    }

    /// Render the accumulated rows/columns into a grid on the current page
    /// and clear the row/column state. A call with no declared rows is a
    /// no-op.
    pub fn flush(&mut self) -> Result<()> {
        let state = self.current.as_mut().ok_or(Error::NoActivePage)?;
        state.flush();
        Ok(())
    }

    /// Finalize every page and serialize: `<dir>/<page>.txt` transcripts,
    /// `<dir>/<page>.csv` grids for pages with populated cells, grid text
    /// (or the raw transcript for cell-less pages) echoed to the sink.
    pub fn save_all(&mut self, dir: &Path) -> Result<()> {
        if let Some(mut state) = self.current.take() {
            state.flush();
            self.pages.push(state.page);
        }
        ensure_dir(dir)?;
        for page in &self.pages {
            std::fs::write(dir.join(format!("{}.txt", page.name)), &page.transcript)?;
            if page.has_cells() {
                write_grids_csv(&dir.join(format!("{}.csv", page.name)), &page.grids)?;
                for grid in &page.grids {
                    self.sink.write_all(grid.to_text().as_bytes())?;
                }
            } else {
                self.sink.write_all(page.transcript.as_bytes())?;
            }
        }
        self.sink.flush()?;
        log::info!("saved {} report pages to {}", self.pages.len(), dir.display());
        Ok(())
    }

    /// Finalized pages, in creation order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Consume the book and hand back its primary sink.
    pub fn into_sink(self) -> W {
        self.sink
    }
}

fn write_grids_csv(path: &Path, grids: &[Grid]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().flexible(true).from_path(path)?;
    for (i, grid) in grids.iter().enumerate() {
        if i > 0 {
            writer.write_record([""])?;
        }
        for row in grid.rows() {
            writer.write_record(row)?;
        }
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book() -> ReportBook<Vec<u8>> {
        ReportBook::new(Vec::new())
    }

    #[test]
    fn first_row_establishes_index_zero() {
        let mut report = book();
        report.new_page("p");
        report.add_row("first").unwrap();
        report.add_cell("col", "v").unwrap();
        report.flush().unwrap();
        report.new_page("end");

        let grid = &report.pages()[0].grids[0];
        assert_eq!(grid.rows()[1][0], "first");
        assert_eq!(grid.rows()[1][1], "v");
    }

    #[test]
    fn column_order_is_first_discovery() {
        let mut report = book();
        report.new_page("p");
        report.add_row("r1").unwrap();
        report.add_cell("beta", "1").unwrap();
        report.add_cell("alpha", "2").unwrap();
        report.add_row("r2").unwrap();
        report.add_cell("alpha", "3").unwrap();
        report.add_cell("gamma", "4").unwrap();
        report.flush().unwrap();
        report.new_page("end");

        let grid = &report.pages()[0].grids[0];
        assert_eq!(grid.rows()[0], vec!["", "beta", "alpha", "gamma"]);
        assert_eq!(grid.rows()[1], vec!["r1", "1", "2", ""]);
        assert_eq!(grid.rows()[2], vec!["r2", "", "3", "4"]);
    }

    #[test]
    fn round_trip_matrix() {
        let rows = ["R1", "R2", "R3"];
        let cols = ["C1", "C2"];
        let matrix = [["a", "b"], ["c", "d"], ["e", "f"]];

        let mut report = book();
        report.new_page("p");
        for (r, row) in rows.iter().enumerate() {
            report.add_row(*row).unwrap();
            for (c, col) in cols.iter().enumerate() {
                report.add_cell(col, matrix[r][c]).unwrap();
            }
        }
        report.flush().unwrap();
        report.new_page("end");

        let grid = &report.pages()[0].grids[0];
        for (r, row) in matrix.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                assert_eq!(grid.rows()[r + 1][c + 1], *value);
            }
        }
    }

    #[test]
    fn later_write_to_same_cell_wins_at_render() {
        let mut report = book();
        report.new_page("p");
        report.add_row("r").unwrap();
        report.add_cell("c", "old").unwrap();
        report.add_cell("c", "new").unwrap();
        report.flush().unwrap();
        report.new_page("end");

        let grid = &report.pages()[0].grids[0];
        assert_eq!(grid.rows()[1][1], "new");
    }

    #[test]
    fn flush_clears_state_between_tables() {
        let mut report = book();
        report.new_page("p");
        report.add_row("r1").unwrap();
        report.add_cell("c1", "1").unwrap();
        report.flush().unwrap();
        report.add_row("r2").unwrap();
        report.add_cell("c2", "2").unwrap();
        report.flush().unwrap();
        report.new_page("end");

        let page = &report.pages()[0];
        assert_eq!(page.grids.len(), 2);
        assert_eq!(page.grids[0].rows()[0], vec!["", "c1"]);
        assert_eq!(page.grids[1].rows()[0], vec!["", "c2"]);
        assert_eq!(page.grids[1].rows()[1], vec!["r2", "2"]);
    }

    #[test]
    fn flush_without_rows_is_a_no_op() {
        let mut report = book();
        report.new_page("p");
        report.flush().unwrap();
        report.new_page("end");

        assert!(report.pages()[0].grids.is_empty());
        assert!(report.pages()[0].transcript.is_empty());
    }

    #[test]
    fn cell_before_row_fails_fast() {
        let mut report = book();
        report.new_page("p");
        let err = report.add_cell("c", "v").unwrap_err();
        assert!(matches!(err, Error::CellBeforeRow(_)));
    }

    #[test]
    fn writes_before_any_page_fail_fast() {
        let mut report = book();
        assert!(matches!(report.log("x"), Err(Error::NoActivePage)));
        assert!(matches!(report.add_row("r"), Err(Error::NoActivePage)));
        assert!(matches!(
            report.add_cell("c", "v"),
            Err(Error::NoActivePage)
        ));
    }

    #[test]
    fn new_page_flushes_pending_rows_of_prior_page() {
        let mut report = book();
        report.new_page("first");
        report.add_row("r").unwrap();
        report.add_cell("c", "v").unwrap();
        report.new_page("second");
        report.add_row("other").unwrap();

        assert_eq!(report.pages().len(), 1);
        let first = &report.pages()[0];
        assert_eq!(first.name, "first");
        assert_eq!(first.grids.len(), 1);
        assert_eq!(first.grids[0].rows()[1], vec!["r", "v"]);
    }

    #[test]
    fn transcript_keeps_log_lines_in_order() {
        let mut report = book();
        report.new_page("p");
        report.log("one").unwrap();
        report.log("two").unwrap();
        report.new_page("end");

        assert_eq!(report.pages()[0].transcript, "one\ntwo\n");
    }

    #[test]
    fn rows_without_cells_do_not_count_as_populated() {
        let mut report = book();
        report.new_page("p");
        report.add_row("r").unwrap();
        report.flush().unwrap();
        report.new_page("end");

        let page = &report.pages()[0];
        assert_eq!(page.grids.len(), 1);
        assert!(!page.has_cells());
    }
}
