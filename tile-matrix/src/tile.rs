//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Single tile handles

use crate::error::Result;
use crate::grid::{Bounds, Shape, TileIndex};
use crate::pyramid::{tile_intersecting_pyramid, TilePyramid};
use geo::AffineTransform;
use geo_types::Polygon;
use std::fmt;

/// Neighborhood of a tile: edge neighbors only, or edge and corner
/// neighbors.
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum Connectedness {
    Four,
    Eight,
}

/// A single tile of a pyramid. Borrows its pyramid, so tiles are cheap
/// `Copy` handles; all metrics are derived on demand.
#[derive(PartialEq, Eq, Hash, Clone, Copy)]
pub struct Tile<'a> {
    pyramid: &'a TilePyramid,
    pub zoom: u8,
    pub row: u32,
    pub col: u32,
}

impl<'a> fmt::Debug for Tile<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Tile({}, {}, {})", self.zoom, self.row, self.col)
    }
}

impl<'a> Tile<'a> {
    /// Caller must guarantee row/col lie within the tile matrix.
    /// Range checked construction goes through `TilePyramid::tile`.
    pub(crate) fn new(pyramid: &'a TilePyramid, zoom: u8, row: u32, col: u32) -> Tile<'a> {
        Tile {
            pyramid,
            zoom,
            row,
            col,
        }
    }

    pub fn pyramid(&self) -> &'a TilePyramid {
        self.pyramid
    }

    pub fn index(&self) -> TileIndex {
        TileIndex::new(self.zoom, self.row, self.col)
    }

    /// Boundaries in map units, expanded by `pixelbuffer` pixels on each
    /// side
    pub fn bounds(&self, pixelbuffer: u32) -> Bounds {
        self.pyramid
            .tile_bounds_unchecked(self.zoom, self.row, self.col, pixelbuffer)
    }

    /// Bounding box as rectangle polygon, vertices ordered clockwise
    /// starting top left
    pub fn bbox(&self, pixelbuffer: u32) -> Polygon<f64> {
        self.bounds(pixelbuffer).to_polygon()
    }

    pub fn left(&self) -> f64 {
        self.bounds(0).left
    }
    pub fn bottom(&self) -> f64 {
        self.bounds(0).bottom
    }
    pub fn right(&self) -> f64 {
        self.bounds(0).right
    }
    pub fn top(&self) -> f64 {
        self.bounds(0).top
    }

    /// Actual tile width in map units (edge tiles can be narrower than
    /// the nominal tile width)
    pub fn x_size(&self) -> f64 {
        self.bounds(0).width()
    }

    /// Actual tile height in map units
    pub fn y_size(&self) -> f64 {
        self.bounds(0).height()
    }

    pub fn pixel_x_size(&self) -> f64 {
        self.pyramid.pixel_x_size(self.zoom)
    }

    pub fn pixel_y_size(&self) -> f64 {
        self.pyramid.pixel_y_size(self.zoom)
    }

    /// Raster dimensions in pixels, including the pixel buffer. On
    /// global pyramids the buffer is clamped at the pyramid top and
    /// bottom, so first and last row tiles are shorter.
    pub fn shape(&self, pixelbuffer: u32) -> Shape {
        let bounds = self.bounds(0);
        let base_width = (bounds.width() / self.pixel_x_size()).round() as u32;
        let base_height = (bounds.height() / self.pixel_y_size()).round() as u32;
        if pixelbuffer == 0 {
            return Shape::new(base_width, base_height);
        }
        let width = base_width + 2 * pixelbuffer;
        let mut height = base_height + 2 * pixelbuffer;
        if self.pyramid.is_global() {
            let matrix_height = self.pyramid.matrix_height(self.zoom);
            if matrix_height == 1 {
                height = base_height;
            } else if self.row == 0 || self.row == matrix_height - 1 {
                height = base_height + pixelbuffer;
            }
        }
        Shape::new(width, height)
    }

    /// Affine transform mapping pixel coordinates of the (buffered)
    /// raster to map coordinates
    pub fn affine(&self, pixelbuffer: u32) -> AffineTransform<f64> {
        let bounds = self.bounds(pixelbuffer);
        AffineTransform::new(
            self.pixel_x_size(),
            0.0,
            bounds.left,
            0.0,
            -self.pixel_y_size(),
            bounds.top,
        )
    }

    /// Tile address lies within the tile matrix of its pyramid. Holds
    /// for every tile obtained through the range checked constructors.
    pub fn is_valid(&self) -> bool {
        self.row < self.pyramid.matrix_height(self.zoom)
            && self.col < self.pyramid.matrix_width(self.zoom)
    }

    /// Tile containing this tile at the next lower zoom level, `None` at
    /// zoom 0
    pub fn get_parent(&self) -> Option<Tile<'a>> {
        if self.zoom == 0 {
            return None;
        }
        Some(Tile::new(
            self.pyramid,
            self.zoom - 1,
            self.row / 2,
            self.col / 2,
        ))
    }

    /// Tiles contained in this tile at the next higher zoom level (up to
    /// four, fewer on grid edges)
    pub fn get_children(&self) -> Vec<Tile<'a>> {
        let zoom = match self.zoom.checked_add(1) {
            Some(zoom) => zoom,
            None => return Vec::new(),
        };
        let matrix_width = self.pyramid.matrix_width(zoom) as u64;
        let matrix_height = self.pyramid.matrix_height(zoom) as u64;
        let mut children = Vec::with_capacity(4);
        // u64 keeps extreme zoom levels from overflowing the index math
        for &(row_offset, col_offset) in &[(0u64, 0u64), (0, 1), (1, 0), (1, 1)] {
            let row = 2 * self.row as u64 + row_offset;
            let col = 2 * self.col as u64 + col_offset;
            if row < matrix_height && col < matrix_width {
                children.push(Tile::new(self.pyramid, zoom, row as u32, col as u32));
            }
        }
        children
    }

    /// Adjacent tiles at the same zoom level. Columns wrap around the
    /// antimeridian on global pyramids; duplicates and the tile itself
    /// are never included.
    pub fn get_neighbors(&self, connectedness: Connectedness) -> Vec<Tile<'a>> {
        let offsets: &[(i64, i64)] = match connectedness {
            Connectedness::Four => &[(-1, 0), (0, 1), (1, 0), (0, -1)],
            Connectedness::Eight => &[
                (-1, 0),
                (0, 1),
                (1, 0),
                (0, -1),
                (-1, 1),
                (1, 1),
                (1, -1),
                (-1, -1),
            ],
        };
        let matrix_width = self.pyramid.matrix_width(self.zoom) as i64;
        let matrix_height = self.pyramid.matrix_height(self.zoom) as i64;
        let mut neighbors: Vec<Tile<'a>> = Vec::with_capacity(offsets.len());
        for &(row_offset, col_offset) in offsets {
            let row = self.row as i64 + row_offset;
            if row < 0 || row >= matrix_height {
                continue;
            }
            let mut col = self.col as i64 + col_offset;
            if col < 0 || col >= matrix_width {
                if self.pyramid.is_global() {
                    col = col.rem_euclid(matrix_width);
                } else {
                    continue;
                }
            }
            let (row, col) = (row as u32, col as u32);
            if row == self.row && col == self.col {
                continue;
            }
            if neighbors.iter().any(|t| t.row == row && t.col == col) {
                continue;
            }
            neighbors.push(Tile::new(self.pyramid, self.zoom, row, col));
        }
        neighbors
    }

    /// All tiles of another pyramid (same source grid, possibly
    /// different metatiling) overlapping this tile with nonzero area
    pub fn intersecting<'b>(&self, pyramid: &'b TilePyramid) -> Result<Vec<Tile<'b>>> {
        tile_intersecting_pyramid(self, pyramid)
    }
}
