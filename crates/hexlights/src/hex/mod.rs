pub mod grid;

pub use grid::{HexGrid, HexIndex, HEX_CORNERS};
