//! A library for tile pyramid calculations
//!
//! ## Predefined pyramids
//!
//! ```rust
//! use tile_matrix::{Bounds, TilePyramid};
//!
//! let tp = TilePyramid::geodetic();
//! assert_eq!(
//!     tp.tile_bounds(0, 0, 0, 0).unwrap(),
//!     Bounds::new(-180.0, -90.0, 0.0, 90.0)
//! );
//! ```
//!
//! ## Tile iterators
//!
//! ```rust
//! use tile_matrix::{Bounds, TilePyramid};
//!
//! let tp = TilePyramid::mercator();
//! for tile in tp.tiles_from_bounds(tp.bounds(), 2) {
//!     println!("Tile {:?}", tile.index());
//! }
//! ```
//!
//! ## Custom pyramids
//!
//! ```rust
//! use tile_matrix::{Bounds, GridDefinition, Shape, Srs, TilePyramid};
//!
//! let grid = GridDefinition::new(
//!     Shape::new(3, 2),
//!     Bounds::new(2420000.0, 1030000.0, 2900000.0, 1350000.0),
//!     Srs::Epsg(2056),
//!     false,
//! )
//! .unwrap();
//! let tp = TilePyramid::new(grid, 256, 1).unwrap();
//! assert_eq!(
//!     tp.tile_bounds(0, 0, 0, 0).unwrap(),
//!     Bounds::new(2420000.0, 1190000.0, 2580000.0, 1350000.0)
//! );
//! ```

#[macro_use]
extern crate log;

mod error;
mod grid;
mod gridcfg;
mod pyramid;
mod tile;
mod tile_iterator;
#[cfg(test)]
mod grid_test;
#[cfg(test)]
mod gridcfg_test;
#[cfg(test)]
mod tile_test;

pub use error::{Result, TileMatrixError};
pub use grid::{Bounds, GridDefinition, Shape, Srs, TileIndex, DELTA};
pub use gridcfg::{BoundsCfg, GridCfg, UserGridCfg};
pub use pyramid::{validate_pixelbuffer, OnEdge, TilePyramid, MAX_METATILING};
pub use tile::{Connectedness, Tile};
pub use tile_iterator::{BatchBy, TileBatch, TileBatches, TileIterator};
