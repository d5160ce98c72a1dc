//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Error types

use thiserror::Error;

/// Errors raised by grid, pyramid and tile operations.
///
/// All operations are pure functions of their inputs; every error is a
/// synchronous failure local to the call that produced it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TileMatrixError {
    /// Malformed or inconsistent grid definition. Raised at construction.
    #[error("invalid grid definition: {0}")]
    InvalidGrid(String),
    /// Tile row/col outside of the tile matrix at the given zoom level.
    #[error("tile index out of range: {0}")]
    TileIndex(String),
    /// Point passed to `tile_from_xy` lies outside of the grid bounds.
    #[error("point ({x}, {y}) is outside of grid bounds")]
    PointOutsideGrid { x: f64, y: f64 },
    /// Unsupported geometry kind passed to a tile selection function.
    #[error("unsupported geometry type: {0}")]
    GeometryType(String),
    /// Negative or otherwise unusable pixel buffer value.
    #[error("invalid pixelbuffer: {0}")]
    Pixelbuffer(String),
}

pub type Result<T> = std::result::Result<T, TileMatrixError>;
