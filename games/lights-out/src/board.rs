use hexlights::{HexGrid, HexIndex};
use thiserror::Error;

/// Default board: a rounded hexagon of 14 lights (rows of 3, 5, 5 and 1).
/// `1` = lit, `0` = unlit, `-1` = hole.
pub const DEFAULT_LAYOUT: [[i8; 5]; 4] = [
    [-1, 1, 1, 1, -1],
    [1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1],
    [-1, -1, 1, -1, -1],
];

/// State of one grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    On,
    Off,
    /// No cell here. Holes are terrain: never toggled, drawn or counted.
    Absent,
}

impl Cell {
    /// Decode the numeric layout format.
    pub fn from_code(code: i8) -> Option<Self> {
        match code {
            1 => Some(Cell::On),
            0 => Some(Cell::Off),
            -1 => Some(Cell::Absent),
            _ => None,
        }
    }

    pub fn is_present(self) -> bool {
        self != Cell::Absent
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board layout has no playable cells")]
    Empty,
    #[error("layout row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown cell code {code} at column {i}, row {j}")]
    UnknownCode { code: i8, i: usize, j: usize },
}

/// Light states over a fixed `width × height` index rectangle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleBoard {
    width: usize,
    height: usize,
    /// Column-major: index = i * height + j.
    cells: Vec<Cell>,
}

impl PuzzleBoard {
    /// Build a board from rows of cells (`rows[j][i]`). Every row must have the same
    /// length and at least one cell must be present.
    pub fn new(rows: Vec<Vec<Cell>>) -> Result<Self, BoardError> {
        let width = rows.first().map_or(0, Vec::len);
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(BoardError::Ragged {
                row,
                expected: width,
                found: r.len(),
            });
        }
        if !rows.iter().flatten().any(|c| c.is_present()) {
            return Err(BoardError::Empty);
        }

        Ok(Self::build(width, rows.len(), |i, j| rows[j][i]))
    }

    /// Build a board from the numeric layout format (`1`, `0`, `-1`).
    pub fn from_codes<R: AsRef<[i8]>>(rows: &[R]) -> Result<Self, BoardError> {
        let rows = rows
            .iter()
            .enumerate()
            .map(|(j, row)| {
                row.as_ref()
                    .iter()
                    .enumerate()
                    .map(|(i, &code)| Cell::from_code(code).ok_or(BoardError::UnknownCode { code, i, j }))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(rows)
    }

    fn build(width: usize, height: usize, cell_at: impl Fn(usize, usize) -> Cell) -> Self {
        let mut cells = Vec::with_capacity(width * height);
        for i in 0..width {
            for j in 0..height {
                cells.push(cell_at(i, j));
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    fn slot(&self, index: HexIndex) -> Option<usize> {
        let i = usize::try_from(index.i).ok().filter(|&i| i < self.width)?;
        let j = usize::try_from(index.j).ok().filter(|&j| j < self.height)?;
        Some(i * self.height + j)
    }

    /// Cell at `index`, or `None` outside the index rectangle.
    pub fn get(&self, index: HexIndex) -> Option<Cell> {
        self.slot(index).map(|s| self.cells[s])
    }

    /// True iff `index` is in range and not a hole.
    pub fn is_inside(&self, index: HexIndex) -> bool {
        self.get(index).is_some_and(Cell::is_present)
    }

    /// Flip the light at exactly `index`.
    ///
    /// Callers must check `is_inside` first; toggling a hole or an out-of-range index
    /// trips a debug assertion and is otherwise ignored.
    pub fn toggle(&mut self, index: HexIndex) {
        debug_assert!(self.is_inside(index), "toggle outside the board: {:?}", index);
        if let Some(s) = self.slot(index) {
            self.cells[s] = match self.cells[s] {
                Cell::On => Cell::Off,
                Cell::Off => Cell::On,
                Cell::Absent => Cell::Absent,
            };
        }
    }

    /// Toggle `index` and every present neighbour. Clicks on holes or outside the board
    /// do nothing. Returns whether the move was applied.
    pub fn apply_move(&mut self, grid: &HexGrid, index: HexIndex) -> bool {
        if !self.is_inside(index) {
            return false;
        }
        self.toggle(index);
        for neighbor in grid.neighbors(index) {
            if self.is_inside(neighbor) {
                self.toggle(neighbor);
            }
        }
        true
    }

    /// True iff no light is on.
    pub fn is_win(&self) -> bool {
        !self.cells.contains(&Cell::On)
    }

    /// Switch every unlit cell back on. Holes stay holes.
    pub fn reset(&mut self) {
        for cell in self.cells.iter_mut().filter(|c| **c == Cell::Off) {
            *cell = Cell::On;
        }
    }

    pub fn lit_count(&self) -> usize {
        self.cells.iter().filter(|c| **c == Cell::On).count()
    }

    /// Number of playable (non-hole) cells.
    pub fn active_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_present()).count()
    }

    /// Present cells in paint order (row by row, left to right).
    pub fn cells(&self) -> impl Iterator<Item = (HexIndex, Cell)> + '_ {
        (0..self.height).flat_map(move |j| {
            (0..self.width).filter_map(move |i| {
                let cell = self.cells[i * self.height + j];
                cell.is_present()
                    .then(|| (HexIndex::new(i as i32, j as i32), cell))
            })
        })
    }
}

impl Default for PuzzleBoard {
    fn default() -> Self {
        Self::build(DEFAULT_LAYOUT[0].len(), DEFAULT_LAYOUT.len(), |i, j| {
            Cell::from_code(DEFAULT_LAYOUT[j][i]).unwrap_or(Cell::Absent)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> HexGrid {
        HexGrid::new(50.0).unwrap()
    }

    fn idx(i: i32, j: i32) -> HexIndex {
        HexIndex::new(i, j)
    }

    #[test]
    fn default_layout_shape() {
        let board = PuzzleBoard::default();
        assert_eq!((board.width(), board.height()), (5, 4));
        assert_eq!(board.active_count(), 14);
        assert_eq!(board.lit_count(), 14);
        assert!(!board.is_win());
        assert_eq!(board, PuzzleBoard::from_codes(&DEFAULT_LAYOUT).unwrap());
    }

    #[test]
    fn rejects_bad_layouts() {
        assert_eq!(PuzzleBoard::new(vec![]), Err(BoardError::Empty));
        assert_eq!(
            PuzzleBoard::from_codes(&[[-1i8, -1], [-1, -1]]),
            Err(BoardError::Empty)
        );
        assert_eq!(
            PuzzleBoard::from_codes(&[vec![1i8, 1, 1], vec![1, 1]]),
            Err(BoardError::Ragged { row: 1, expected: 3, found: 2 })
        );
        assert_eq!(
            PuzzleBoard::from_codes(&[[1i8, 2]]),
            Err(BoardError::UnknownCode { code: 2, i: 1, j: 0 })
        );
    }

    #[test]
    fn is_inside_excludes_holes_and_out_of_range() {
        let board = PuzzleBoard::default();
        assert!(board.is_inside(idx(2, 1)));
        assert!(!board.is_inside(idx(0, 0)));
        assert!(!board.is_inside(idx(4, 3)));
        assert!(!board.is_inside(idx(-1, 1)));
        assert!(!board.is_inside(idx(5, 1)));
        assert!(!board.is_inside(idx(1, 4)));
    }

    #[test]
    fn toggle_is_an_involution() {
        let mut board = PuzzleBoard::default();
        board.toggle(idx(1, 0));
        assert_eq!(board.get(idx(1, 0)), Some(Cell::Off));
        assert_eq!(board.lit_count(), 13);
        board.toggle(idx(1, 0));
        assert_eq!(board, PuzzleBoard::default());
    }

    #[test]
    fn interior_move_flips_seven_cells() {
        let g = grid();
        let mut board = PuzzleBoard::default();
        assert!(board.apply_move(&g, idx(2, 1)));
        assert_eq!(board.lit_count(), 7);
        for n in g.neighbors(idx(2, 1)).into_iter().chain([idx(2, 1)]) {
            assert_eq!(board.get(n), Some(Cell::Off), "{:?}", n);
        }
        assert!(!board.is_win());

        assert!(board.apply_move(&g, idx(2, 1)));
        assert_eq!(board, PuzzleBoard::default());
    }

    #[test]
    fn edge_move_skips_missing_neighbors() {
        let g = grid();
        let mut board = PuzzleBoard::default();
        // Bottom cell: only the one above and the two upper diagonals exist.
        assert!(board.apply_move(&g, idx(2, 3)));
        let off: Vec<_> = board
            .cells()
            .filter(|(_, c)| *c == Cell::Off)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(off, vec![idx(1, 2), idx(2, 2), idx(3, 2), idx(2, 3)]);
    }

    #[test]
    fn moves_on_holes_are_ignored() {
        let g = grid();
        let mut board = PuzzleBoard::default();
        assert!(!board.apply_move(&g, idx(0, 0)));
        assert!(!board.apply_move(&g, idx(-3, 7)));
        assert_eq!(board, PuzzleBoard::default());
    }

    #[test]
    fn win_and_reset() {
        let g = grid();
        let mut board = PuzzleBoard::from_codes(&[[1i8, 1]]).unwrap();
        board.apply_move(&g, idx(0, 0));
        assert!(board.is_win());

        board.reset();
        assert!(!board.is_win());
        assert_eq!(board.lit_count(), 2);
    }

    #[test]
    fn reset_turns_off_cells_on_and_keeps_holes() {
        let g = grid();
        let mut board = PuzzleBoard::default();
        for (i, j) in [(2, 1), (0, 1), (3, 2), (2, 3)] {
            board.apply_move(&g, idx(i, j));
        }
        board.reset();
        assert_eq!(board, PuzzleBoard::default());
        assert!(!board.is_win());
    }

    #[test]
    fn reset_lights_cells_that_started_off() {
        let mut board = PuzzleBoard::from_codes(&[[0i8, 1, -1]]).unwrap();
        assert_eq!(board.lit_count(), 1);
        board.reset();
        assert_eq!(board.lit_count(), 2);
        assert_eq!(board.get(idx(2, 0)), Some(Cell::Absent));
    }

    #[test]
    fn cells_iterates_rows_and_skips_holes() {
        let board = PuzzleBoard::default();
        let first: Vec<_> = board.cells().take(4).map(|(i, _)| i).collect();
        assert_eq!(first, vec![idx(1, 0), idx(2, 0), idx(3, 0), idx(0, 1)]);
        assert_eq!(board.cells().count(), 14);
    }
}
