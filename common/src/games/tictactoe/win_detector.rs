use super::board::Board;
use super::types::{LineKind, Player, WinningLine};

pub fn check_win(board: &Board) -> Option<Player> {
    check_win_with_line(board).map(|line| line.player)
}

/// Scans rows, then columns, then the main and anti diagonals. A line wins
/// when all `grid_size` cells hold the same player.
pub fn check_win_with_line(board: &Board) -> Option<WinningLine> {
    let n = board.grid_size();
    if n == 0 {
        return None;
    }

    let candidates = (0..n)
        .map(LineKind::Row)
        .chain((0..n).map(LineKind::Column))
        .chain([LineKind::MainDiagonal, LineKind::AntiDiagonal]);

    for kind in candidates {
        let cells = line_cells(n, kind);
        if let Some(player) = line_owner(board, &cells) {
            return Some(WinningLine::new(player, kind, cells));
        }
    }

    None
}

pub fn line_cells(grid_size: usize, kind: LineKind) -> Vec<usize> {
    let n = grid_size;
    match kind {
        LineKind::Row(row) => (0..n).map(|col| row * n + col).collect(),
        LineKind::Column(col) => (0..n).map(|row| row * n + col).collect(),
        LineKind::MainDiagonal => (0..n).map(|i| i * n + i).collect(),
        LineKind::AntiDiagonal => (0..n).map(|i| i * n + (n - 1 - i)).collect(),
    }
}

fn line_owner(board: &Board, cells: &[usize]) -> Option<Player> {
    let first = board.get(*cells.first()?)?;
    cells
        .iter()
        .all(|&index| board.get(index) == Some(first))
        .then_some(first)
}
