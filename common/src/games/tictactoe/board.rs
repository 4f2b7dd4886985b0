use std::fmt;

use super::types::CellValue;

/// Square grid stored row-major. The cell count is fixed at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    grid_size: usize,
    cells: Vec<CellValue>,
}

impl Board {
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            cells: vec![None; grid_size * grid_size],
        }
    }

    /// Builds a board from explicit cell contents. Returns `None` unless the
    /// cell count is a perfect square of `grid_size`.
    pub fn from_cells(grid_size: usize, cells: Vec<CellValue>) -> Option<Self> {
        if cells.len() != grid_size * grid_size {
            return None;
        }
        Some(Self { grid_size, cells })
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn get(&self, index: usize) -> CellValue {
        self.cells.get(index).copied().flatten()
    }

    pub fn contains(&self, index: usize) -> bool {
        index < self.cells.len()
    }

    pub fn is_empty_cell(&self, index: usize) -> bool {
        self.contains(index) && self.cells[index].is_none()
    }

    pub(crate) fn set(&mut self, index: usize, value: CellValue) {
        self.cells[index] = value;
    }

    pub fn empty_cells(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(index, _)| index)
            .collect()
    }

    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_none()).count()
    }

    /// Exact center; only odd grids have one.
    pub fn center(&self) -> Option<usize> {
        if self.grid_size % 2 == 1 {
            let mid = self.grid_size / 2;
            Some(mid * self.grid_size + mid)
        } else {
            None
        }
    }

    pub fn corners(&self) -> [usize; 4] {
        let n = self.grid_size;
        let last = n.saturating_sub(1);
        [0, last, n * last, (n * n).saturating_sub(1)]
    }

    pub fn index_of(&self, row: usize, col: usize) -> usize {
        row * self.grid_size + col
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.cell_count().saturating_sub(1).to_string().len();
        for row in 0..self.grid_size {
            let line: Vec<String> = (0..self.grid_size)
                .map(|col| {
                    let index = self.index_of(row, col);
                    match self.cells[index] {
                        Some(player) => format!("{:>width$}", player.to_string()),
                        None => format!("{:>width$}", index),
                    }
                })
                .collect();
            writeln!(f, "{}", line.join(" | "))?;
        }
        Ok(())
    }
}
