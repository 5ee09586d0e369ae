//! Offset-column hexagon geometry.
//!
//! Cells are flat-topped hexagons arranged in vertical columns. Odd columns sit half a
//! cell lower than even ones, so a cell's row neighbours depend on the parity of its
//! column. Every query is a pure function of `(i, j)` and the radius.
//!
//! ```text
//!   col:   0       1       2
//!        ____            ____
//!       /    \  ____    /    \
//!       \____/ /    \   \____/
//!       /    \ \____/   /    \
//! ```

use glam::Vec2;

use crate::error::GridError;

/// Number of corners (and neighbours) of a hexagon.
pub const HEX_CORNERS: usize = 6;

/// Column delta for each neighbour direction, clockwise from straight up.
const NEIGHBORS_DI: [i32; HEX_CORNERS] = [0, 1, 1, 0, -1, -1];

/// Row delta for each neighbour direction, keyed by the source column's parity.
const NEIGHBORS_DJ: [[i32; HEX_CORNERS]; 2] = [
    [-1, -1, 0, 1, 0, -1], // even columns
    [-1, 0, 1, 1, 1, 0],   // odd columns
];

/// Integer address of a cell: `i` is the column, `j` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HexIndex {
    pub i: i32,
    pub j: i32,
}

impl HexIndex {
    pub const fn new(i: i32, j: i32) -> Self {
        Self { i, j }
    }

    /// 0 for even columns, 1 for odd ones (negative columns included).
    pub const fn parity(&self) -> usize {
        self.i.rem_euclid(2) as usize
    }
}

impl From<(i32, i32)> for HexIndex {
    fn from((i, j): (i32, i32)) -> Self {
        Self::new(i, j)
    }
}

/// Geometry of a flat-topped hexagon of a fixed circumradius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexGrid {
    radius: f32,
    /// Vertical extent of one cell, `radius * sqrt(3)`.
    height: f32,
    /// Horizontal distance between adjacent column anchors, `1.5 * radius`.
    side: f32,
    corners_dx: [f32; HEX_CORNERS],
    corners_dy: [f32; HEX_CORNERS],
}

impl HexGrid {
    /// Build the geometry for `radius`. The radius must be finite and strictly positive.
    pub fn new(radius: f32) -> Result<Self, GridError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(GridError::InvalidRadius(radius));
        }

        let height = radius * 3f32.sqrt();
        let side = radius * 1.5;
        let width = radius * 2.0;

        Ok(Self {
            radius,
            height,
            side,
            corners_dx: [radius / 2.0, side, width, side, radius / 2.0, 0.0],
            corners_dy: [0.0, 0.0, height / 2.0, height, height, height / 2.0],
        })
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Horizontal extent of one cell.
    pub fn cell_width(&self) -> f32 {
        self.radius * 2.0
    }

    /// Vertical extent of one cell.
    pub fn cell_height(&self) -> f32 {
        self.height
    }

    /// Horizontal spacing between adjacent columns.
    pub fn side(&self) -> f32 {
        self.side
    }

    /// Top-left corner of the cell's bounding box.
    pub fn place(&self, index: HexIndex) -> Vec2 {
        let x = index.i as f32 * self.side;
        let y = self.height * (index.j as f32 + index.parity() as f32 / 2.0);
        Vec2::new(x, y)
    }

    /// Center of the cell.
    pub fn center(&self, index: HexIndex) -> Vec2 {
        self.place(index) + Vec2::new(self.radius, self.height / 2.0)
    }

    /// The six polygon vertices, starting at the left end of the top edge and winding
    /// clockwise (in y-down screen space).
    pub fn corners(&self, index: HexIndex) -> [Vec2; HEX_CORNERS] {
        let anchor = self.place(index);
        std::array::from_fn(|k| anchor + Vec2::new(self.corners_dx[k], self.corners_dy[k]))
    }

    /// Index of the neighbour in direction `k` (0 = up, then clockwise). Not bounds checked;
    /// indices wrap at the ends of the `i32` range.
    ///
    /// # Panics
    /// Panics if `k >= 6`.
    pub fn neighbor(&self, index: HexIndex, k: usize) -> HexIndex {
        HexIndex::new(
            index.i.wrapping_add(NEIGHBORS_DI[k]),
            index.j.wrapping_add(NEIGHBORS_DJ[index.parity()][k]),
        )
    }

    /// All six neighbours in direction order.
    pub fn neighbors(&self, index: HexIndex) -> [HexIndex; HEX_CORNERS] {
        std::array::from_fn(|k| self.neighbor(index, k))
    }

    /// Resolve a pixel point to the cell containing it.
    ///
    /// The point is first placed in a rectangular column/row band. Points left of the
    /// band's slanted edge belong to the hexagon one column to the left, whose right
    /// corner reaches into this band. Points beyond the `i32` range clamp to its ends.
    pub fn pick(&self, point: Vec2) -> HexIndex {
        let ci = (point.x / self.side).floor() as i32;
        let cx = point.x - self.side * ci as f32;
        let parity = ci.rem_euclid(2);

        let ty = point.y - parity as f32 * self.height / 2.0;
        let cj = (ty / self.height).floor() as i32;
        let cy = ty - self.height * cj as f32;

        if cx > (self.radius / 2.0 - self.radius * cy / self.height).abs() {
            HexIndex::new(ci, cj)
        } else {
            let upper_half = if cy < self.height / 2.0 { 1 } else { 0 };
            HexIndex::new(ci.saturating_sub(1), cj.saturating_add(parity - upper_half))
        }
    }

    /// Pixel extent of a `columns × rows` index rectangle anchored at the origin.
    pub fn board_size(&self, columns: usize, rows: usize) -> Vec2 {
        if columns == 0 || rows == 0 {
            return Vec2::ZERO;
        }
        let width = (columns - 1) as f32 * self.side + self.cell_width();
        let stagger = if columns > 1 { self.height / 2.0 } else { 0.0 };
        Vec2::new(width, rows as f32 * self.height + stagger)
    }
}
