//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Source grid definitions

use crate::error::{Result, TileMatrixError};
use geo_types::{Coord, LineString, Polygon};
use serde::Deserialize;
use std::hash::{Hash, Hasher};

/// Tolerated difference between grid shape ratio and bounds ratio.
/// Absorbs floating point rounding, not real distortion.
pub const DELTA: f64 = 1e-6;

/// Geographic extent in grid CRS units.
///
/// Must fulfill `left < right` and `bottom < top`.
#[derive(PartialEq, Clone, Copy, Debug, Deserialize)]
pub struct Bounds {
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
    pub top: f64,
}

impl Bounds {
    pub fn new(left: f64, bottom: f64, right: f64, top: f64) -> Bounds {
        Bounds {
            left,
            bottom,
            right,
            top,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    /// Rectangle polygon with vertices ordered clockwise, starting top left.
    pub fn to_polygon(&self) -> Polygon<f64> {
        Polygon::new(
            LineString(vec![
                Coord {
                    x: self.left,
                    y: self.top,
                },
                Coord {
                    x: self.right,
                    y: self.top,
                },
                Coord {
                    x: self.right,
                    y: self.bottom,
                },
                Coord {
                    x: self.left,
                    y: self.bottom,
                },
                Coord {
                    x: self.left,
                    y: self.top,
                },
            ]),
            Vec::new(),
        )
    }
}

impl Eq for Bounds {}

impl Hash for Bounds {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.left.to_bits().hash(state);
        self.bottom.to_bits().hash(state);
        self.right.to_bits().hash(state);
        self.top.to_bits().hash(state);
    }
}

/// Grid or tile dimensions, in tiles resp. pixels.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Deserialize)]
pub struct Shape {
    pub width: u32,
    pub height: u32,
}

impl Shape {
    pub fn new(width: u32, height: u32) -> Shape {
        Shape { width, height }
    }
}

/// Tile address within a pyramid.
///
/// Orderable and hashable, usable as a map key.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
pub struct TileIndex {
    pub zoom: u8,
    pub row: u32,
    pub col: u32,
}

impl TileIndex {
    pub fn new(zoom: u8, row: u32, col: u32) -> TileIndex {
        TileIndex { zoom, row, col }
    }
}

/// Spatial reference system identity: either an EPSG registry code or a
/// raw proj definition string.
#[derive(PartialEq, Eq, Hash, Clone, Debug, Deserialize)]
pub enum Srs {
    Epsg(u32),
    Proj(String),
}

/// Immutable description of the source grid of a tile pyramid: number of
/// tiles at zoom level 0, spatial bounds, reference system and whether the
/// grid covers the full extent of its reference system (enabling
/// antimeridian wraparound).
#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub struct GridDefinition {
    pub shape: Shape,
    pub bounds: Bounds,
    pub srs: Srs,
    pub is_global: bool,
}

impl GridDefinition {
    /// Global geodetic grid (WGS84 lat/lon, two tiles wide at zoom 0)
    pub fn geodetic() -> GridDefinition {
        GridDefinition {
            shape: Shape::new(2, 1),
            bounds: Bounds::new(-180.0, -90.0, 180.0, 90.0),
            srs: Srs::Epsg(4326),
            is_global: true,
        }
    }

    /// Global spherical mercator grid (Google maps compatible)
    pub fn mercator() -> GridDefinition {
        GridDefinition {
            shape: Shape::new(1, 1),
            bounds: Bounds::new(
                -20037508.3427892,
                -20037508.3427892,
                20037508.3427892,
                20037508.3427892,
            ),
            srs: Srs::Epsg(3857),
            is_global: true,
        }
    }

    /// Custom grid. The aspect ratio of `shape` must equal the aspect
    /// ratio of `bounds` within `DELTA`.
    pub fn new(shape: Shape, bounds: Bounds, srs: Srs, is_global: bool) -> Result<GridDefinition> {
        if shape.width < 1 || shape.height < 1 {
            return Err(TileMatrixError::InvalidGrid(format!(
                "shape dimensions must be at least 1, got {}x{}",
                shape.width, shape.height
            )));
        }
        if bounds.left >= bounds.right || bounds.bottom >= bounds.top {
            return Err(TileMatrixError::InvalidGrid(format!(
                "bounds must fulfill left < right and bottom < top: {:?}",
                bounds
            )));
        }
        let shape_ratio = shape.width as f64 / shape.height as f64;
        let bounds_ratio = bounds.width() / bounds.height();
        if (shape_ratio - bounds_ratio).abs() > DELTA {
            return Err(TileMatrixError::InvalidGrid(format!(
                "shape ratio ({}) must equal bounds ratio ({})",
                shape_ratio, bounds_ratio
            )));
        }
        Ok(GridDefinition {
            shape,
            bounds,
            srs,
            is_global,
        })
    }
}
