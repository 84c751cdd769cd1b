//! Nori Terminal Core
//!
//! The platform-independent screen model: a rectangular grid of styled cells
//! with a cursor, supporting character placement with deferred auto-wrap,
//! scroll-on-overflow, and resizing that preserves the bottom of the screen.
//!
//! This crate has no I/O and no dependency on the parser; a renderer reads
//! the grid between input events, and the terminal glue writes into it.

pub mod cell;
pub mod grid;
pub mod row;

pub use cell::{Attrs, Cell, DEFAULT_BG, DEFAULT_FG};
pub use grid::Grid;
pub use row::Row;
