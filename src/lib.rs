//! Inspection and grid tiling of SVG drawings.
//!
//! Parsing and the document model live in `svg_dom`, resolution of
//! transforms and styles in `svg_draw`. This crate adds the grid engine.

#[macro_use] extern crate log;

pub use svg_dom as dom;
pub use svg_draw as draw;

pub mod grid;

pub use grid::{GridError, GridLayout, Cell, tile, move_tile, swap_tiles};
