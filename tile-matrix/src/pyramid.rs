//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Tile pyramids

use crate::error::{Result, TileMatrixError};
use crate::grid::{Bounds, GridDefinition};
use crate::tile::Tile;
use crate::tile_iterator::{BatchBy, Cover, GeomFilter, TileBatches, TileIterator};
use geo::{BooleanOps, BoundingRect, Translate};
use geo_types::{Geometry, GeometryCollection, MultiLineString, MultiPoint, MultiPolygon, Polygon};
use std::ops::RangeInclusive;
use std::sync::Arc;

/// Maximum metatiling factor
pub const MAX_METATILING: u32 = 512;

/// Tie-break rule for a point lying exactly on a tile boundary: picks
/// which of the up to four adjoining tiles owns the point.
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum OnEdge {
    RightBottom,
    RightTop,
    LeftTop,
    LeftBottom,
}

impl Default for OnEdge {
    fn default() -> OnEdge {
        OnEdge::RightBottom
    }
}

impl OnEdge {
    /// Point on a vertical tile edge belongs to the tile left of the edge
    fn uses_left(self) -> bool {
        matches!(self, OnEdge::LeftBottom | OnEdge::LeftTop)
    }
    /// Point on a horizontal tile edge belongs to the tile above the edge
    fn uses_top(self) -> bool {
        matches!(self, OnEdge::RightTop | OnEdge::LeftTop)
    }
}

/// Validate an untyped pixel buffer value entering from a CLI or
/// configuration boundary.
pub fn validate_pixelbuffer(value: i64) -> Result<u32> {
    if value < 0 {
        Err(TileMatrixError::Pixelbuffer(format!(
            "must not be negative: {}",
            value
        )))
    } else if value > u32::MAX as i64 {
        Err(TileMatrixError::Pixelbuffer(format!("too large: {}", value)))
    } else {
        Ok(value as u32)
    }
}

/// `2^zoom`, saturating for out-of-range zoom levels
fn zoom_factor(zoom: u8) -> u64 {
    1u64.checked_shl(u32::from(zoom)).unwrap_or(u64::MAX)
}

/// A tile pyramid is the set of tile matrices of a source grid over all
/// zoom levels. Each zoom level halves the tile size of the previous one;
/// the matrix at zoom `z` is `shape * 2^z` base tiles, grouped into
/// metatiles of `metatiling x metatiling` base tiles.
///
/// Immutable after construction; cheap to clone and safe to share
/// between threads.
#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub struct TilePyramid {
    grid: GridDefinition,
    /// Width and height of a base tile, in pixels
    tile_size: u32,
    /// Number of base tiles per metatile axis (power of two)
    metatiling: u32,
}

impl TilePyramid {
    pub fn new(grid: GridDefinition, tile_size: u32, metatiling: u32) -> Result<TilePyramid> {
        if tile_size < 1 {
            return Err(TileMatrixError::InvalidGrid(
                "tile_size must be a positive integer".to_string(),
            ));
        }
        if metatiling < 1 || metatiling > MAX_METATILING || !metatiling.is_power_of_two() {
            return Err(TileMatrixError::InvalidGrid(format!(
                "metatiling must be a power of two between 1 and {}, got {}",
                MAX_METATILING, metatiling
            )));
        }
        debug!(
            "TilePyramid for grid {:?}, tile_size {}, metatiling {}",
            grid.srs, tile_size, metatiling
        );
        Ok(TilePyramid {
            grid,
            tile_size,
            metatiling,
        })
    }

    /// Global geodetic pyramid with default tile size
    pub fn geodetic() -> TilePyramid {
        TilePyramid {
            grid: GridDefinition::geodetic(),
            tile_size: 256,
            metatiling: 1,
        }
    }

    /// Global mercator pyramid with default tile size
    pub fn mercator() -> TilePyramid {
        TilePyramid {
            grid: GridDefinition::mercator(),
            tile_size: 256,
            metatiling: 1,
        }
    }

    pub fn grid(&self) -> &GridDefinition {
        &self.grid
    }
    pub fn bounds(&self) -> Bounds {
        self.grid.bounds
    }
    pub fn left(&self) -> f64 {
        self.grid.bounds.left
    }
    pub fn bottom(&self) -> f64 {
        self.grid.bounds.bottom
    }
    pub fn right(&self) -> f64 {
        self.grid.bounds.right
    }
    pub fn top(&self) -> f64 {
        self.grid.bounds.top
    }
    /// Grid width in map units
    pub fn x_size(&self) -> f64 {
        self.grid.bounds.width()
    }
    /// Grid height in map units
    pub fn y_size(&self) -> f64 {
        self.grid.bounds.height()
    }
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }
    pub fn metatiling(&self) -> u32 {
        self.metatiling
    }
    pub fn is_global(&self) -> bool {
        self.grid.is_global
    }

    /// Tile of this pyramid, range checked against the tile matrix
    pub fn tile(&self, zoom: u8, row: u32, col: u32) -> Result<Tile<'_>> {
        let cols = self.matrix_width(zoom);
        let rows = self.matrix_height(zoom);
        if col >= cols {
            return Err(TileMatrixError::TileIndex(format!(
                "col ({}) exceeds matrix width ({})",
                col, cols
            )));
        }
        if row >= rows {
            return Err(TileMatrixError::TileIndex(format!(
                "row ({}) exceeds matrix height ({})",
                row, rows
            )));
        }
        Ok(Tile::new(self, zoom, row, col))
    }

    /// Number of metatile columns at zoom level
    pub fn matrix_width(&self, zoom: u8) -> u32 {
        matrix_dim(self.grid.shape.width, self.metatiling, zoom)
    }

    /// Number of metatile rows at zoom level
    pub fn matrix_height(&self, zoom: u8) -> u32 {
        matrix_dim(self.grid.shape.height, self.metatiling, zoom)
    }

    /// Nominal (unclipped) tile width in map units at zoom level.
    /// Edge tiles can be narrower, this is the indexing step size.
    pub fn tile_x_size(&self, zoom: u8) -> f64 {
        self.pixel_x_size(zoom) * (self.tile_size * self.metatiling) as f64
    }

    /// Nominal (unclipped) tile height in map units at zoom level
    pub fn tile_y_size(&self, zoom: u8) -> f64 {
        self.pixel_y_size(zoom) * (self.tile_size * self.metatiling) as f64
    }

    /// Width of a pixel in map units at zoom level
    pub fn pixel_x_size(&self, zoom: u8) -> f64 {
        self.x_size()
            / (self.grid.shape.width as f64 * zoom_factor(zoom) as f64 * self.tile_size as f64)
    }

    /// Height of a pixel in map units at zoom level
    pub fn pixel_y_size(&self, zoom: u8) -> f64 {
        self.y_size()
            / (self.grid.shape.height as f64 * zoom_factor(zoom) as f64 * self.tile_size as f64)
    }

    /// Boundaries of a tile, expanded by `pixelbuffer` pixels on each side.
    ///
    /// Edge tiles are clipped to the grid bounds before the buffer is
    /// applied, so a buffered edge tile can extend beyond the grid bounds.
    /// Global pyramids clamp the buffered top and bottom at the pyramid
    /// bounds (there is no vertical wraparound).
    pub fn tile_bounds(&self, zoom: u8, row: u32, col: u32, pixelbuffer: u32) -> Result<Bounds> {
        self.tile(zoom, row, col)?;
        Ok(self.tile_bounds_unchecked(zoom, row, col, pixelbuffer))
    }

    pub(crate) fn tile_bounds_unchecked(
        &self,
        zoom: u8,
        row: u32,
        col: u32,
        pixelbuffer: u32,
    ) -> Bounds {
        let tile_w = self.tile_x_size(zoom);
        let tile_h = self.tile_y_size(zoom);
        let mut top = self.top() - row as f64 * tile_h;
        let mut left = self.left() + col as f64 * tile_w;
        let mut bottom = (top - tile_h).max(self.bottom());
        let mut right = (left + tile_w).min(self.right());
        if pixelbuffer > 0 {
            let x_offset = self.pixel_x_size(zoom) * pixelbuffer as f64;
            let y_offset = self.pixel_y_size(zoom) * pixelbuffer as f64;
            left -= x_offset;
            bottom -= y_offset;
            right += x_offset;
            top += y_offset;
        }
        if self.is_global() {
            top = top.min(self.top());
            bottom = bottom.max(self.bottom());
        }
        Bounds::new(left, bottom, right, top)
    }

    /// Bounding box of a tile as rectangle polygon, vertices ordered
    /// clockwise starting top left
    pub fn tile_bbox(&self, zoom: u8, row: u32, col: u32, pixelbuffer: u32) -> Result<Polygon<f64>> {
        Ok(self.tile_bounds(zoom, row, col, pixelbuffer)?.to_polygon())
    }

    /// Tile covering the point (x, y). `on_edge` picks the owning tile
    /// for points lying exactly on a tile boundary. Columns wrap around
    /// the antimeridian on global pyramids.
    pub fn tile_from_xy(&self, x: f64, y: f64, zoom: u8, on_edge: OnEdge) -> Result<Tile<'_>> {
        if x < self.left() || x > self.right() || y < self.bottom() || y > self.top() {
            return Err(TileMatrixError::PointOutsideGrid { x, y });
        }
        let tile_h = self.tile_y_size(zoom);
        let mut row = ((self.top() - y) / tile_h).floor() as i64;
        if on_edge.uses_top() && (self.top() - y) % tile_h == 0.0 {
            row -= 1;
        }
        let tile_w = self.tile_x_size(zoom);
        let mut col = ((x - self.left()) / tile_w).floor() as i64;
        if on_edge.uses_left() && (x - self.left()) % tile_w == 0.0 {
            col -= 1;
        }
        let matrix_width = self.matrix_width(zoom) as i64;
        if self.is_global() {
            if col == -1 {
                col = matrix_width - 1;
            } else if col >= matrix_width {
                col %= matrix_width;
            }
        }
        if row < 0 || col < 0 {
            return Err(TileMatrixError::TileIndex(format!(
                "point on grid edge with {:?} tie-break has no owning tile ({}, {})",
                on_edge, row, col
            )));
        }
        self.tile(zoom, row as u32, col as u32)
    }

    /// All tiles whose bounds overlap the query rectangle with nonzero
    /// area, each yielded exactly once. A tile owns its left and top
    /// edge, so query edges on tile boundaries never select tiles that
    /// only touch. On global pyramids query bounds may extend across the
    /// antimeridian; matching tiles from the opposite side of the grid
    /// are included. Degenerate or fully outside bounds yield an empty
    /// sequence.
    pub fn tiles_from_bounds(&self, bounds: Bounds, zoom: u8) -> TileIterator<'_> {
        let cover = self.cover_from_bounds(bounds, zoom, false);
        TileIterator::new(self, zoom, cover, None)
    }

    /// Like `tiles_from_bounds`, but yielding one batch of tiles per row
    /// or column, in ascending order
    pub fn tiles_from_bounds_batched(
        &self,
        bounds: Bounds,
        zoom: u8,
        batch_by: BatchBy,
    ) -> TileBatches<'_> {
        let cover = self.cover_from_bounds(bounds, zoom, false);
        TileBatches::new(self, zoom, cover, batch_by, None)
    }

    /// All tiles intersecting with the bounding box of a geometry
    pub fn tiles_from_bbox(&self, geometry: &Geometry<f64>, zoom: u8) -> Result<TileIterator<'_>> {
        check_geometry_kind(geometry)?;
        let cover = self.cover_from_geometry_bounds(geometry, zoom);
        Ok(TileIterator::new(self, zoom, cover, None))
    }

    /// All tiles touched by a geometry at a zoom level.
    ///
    /// With `exact == false` this is bounding box only selection: every
    /// tile within the geometry's (antimeridian aware) bounding box is
    /// yielded. With `exact == true` candidates are kept only if their
    /// bounding box intersects the geometry itself with interiors
    /// overlapping, i.e. zero area touches are excluded.
    ///
    /// Accepts points, lines, polygons, their multipart variants and
    /// geometry collections; empty geometries yield an empty sequence.
    pub fn tiles_from_geom(
        &self,
        geometry: &Geometry<f64>,
        zoom: u8,
        exact: bool,
    ) -> Result<TileIterator<'_>> {
        check_geometry_kind(geometry)?;
        if let Geometry::Point(p) = geometry {
            let tile = self.tile_from_xy(p.x(), p.y(), zoom, OnEdge::default())?;
            return Ok(TileIterator::single(tile));
        }
        let cover = self.cover_from_geometry_bounds(geometry, zoom);
        let filter = self.exact_filter(geometry, exact)?;
        Ok(TileIterator::new(self, zoom, cover, filter))
    }

    /// Like `tiles_from_geom`, but yielding one batch of tiles per row
    /// or column
    pub fn tiles_from_geom_batched(
        &self,
        geometry: &Geometry<f64>,
        zoom: u8,
        batch_by: BatchBy,
        exact: bool,
    ) -> Result<TileBatches<'_>> {
        check_geometry_kind(geometry)?;
        if let Geometry::Point(p) = geometry {
            let tile = self.tile_from_xy(p.x(), p.y(), zoom, OnEdge::default())?;
            return Ok(TileBatches::single(tile, batch_by));
        }
        let cover = self.cover_from_geometry_bounds(geometry, zoom);
        let filter = self.exact_filter(geometry, exact)?;
        Ok(TileBatches::new(self, zoom, cover, batch_by, filter))
    }

    fn exact_filter(&self, geometry: &Geometry<f64>, exact: bool) -> Result<Option<Arc<GeomFilter>>> {
        if !exact {
            return Ok(None);
        }
        let pieces = self.clip_geometry_multipart(geometry)?;
        Ok(Some(Arc::new(GeomFilter::new(pieces))))
    }

    fn cover_from_geometry_bounds(&self, geometry: &Geometry<f64>, zoom: u8) -> Cover {
        match geometry.bounding_rect() {
            Some(rect) => {
                let bounds = Bounds::new(rect.min().x, rect.min().y, rect.max().x, rect.max().y);
                self.cover_from_bounds(bounds, zoom, true)
            }
            None => Cover::empty(),
        }
    }

    /// Candidate row/column ranges for a query rectangle. Geometry
    /// derived bounds may be degenerate (e.g. a vertical line); plain
    /// rectangle queries require nonzero area.
    fn cover_from_bounds(&self, bounds: Bounds, zoom: u8, allow_degenerate: bool) -> Cover {
        if bounds.left > bounds.right || bounds.bottom > bounds.top {
            return Cover::empty();
        }
        if !allow_degenerate && (bounds.left == bounds.right || bounds.bottom == bounds.top) {
            return Cover::empty();
        }
        // no vertical wraparound: clamp to pyramid top and bottom
        let top = bounds.top.min(self.top());
        let bottom = bounds.bottom.max(self.bottom());
        if top < bottom || (top == bottom && bounds.top != bounds.bottom) {
            return Cover::empty();
        }
        let rows = match self.row_range(bottom, top, zoom) {
            Some(range) => range,
            None => return Cover::empty(),
        };
        let (gl, gr) = (self.left(), self.right());
        let mut pieces: Vec<(f64, f64)> = Vec::new();
        if self.is_global() && (bounds.left < gl || bounds.right > gr) {
            let world = self.x_size();
            if bounds.width() >= world {
                pieces.push((gl, gr));
            } else {
                // shift the left edge into the grid range, keeping the
                // query width; split at the antimeridian if necessary
                let left = gl + (bounds.left - gl).rem_euclid(world);
                let right = left + bounds.width();
                if right > gr {
                    pieces.push((left, gr));
                    pieces.push((gl, right - world));
                } else {
                    pieces.push((left, right));
                }
            }
        } else {
            let left = bounds.left.max(gl);
            let right = bounds.right.min(gr);
            if left > right || (left == right && bounds.left != bounds.right) {
                return Cover::empty();
            }
            pieces.push((left, right));
        }
        let mut col_ranges = Vec::new();
        for (left, right) in pieces {
            if let Some(range) = self.col_range(left, right, zoom) {
                col_ranges.push(range);
            }
        }
        Cover::new(rows, col_ranges)
    }

    fn col_range(&self, left: f64, right: f64, zoom: u8) -> Option<RangeInclusive<u32>> {
        let size = self.tile_x_size(zoom);
        let matrix_width = self.matrix_width(zoom) as i64;
        let gl = self.left();
        if left == right {
            // degenerate query: column owning the coordinate
            let mut col = ((left - gl) / size).floor() as i64;
            if col >= matrix_width {
                if self.is_global() {
                    col %= matrix_width;
                } else {
                    return None;
                }
            }
            if col < 0 {
                return None;
            }
            return Some(col as u32..=col as u32);
        }
        let first = (((left - gl) / size).floor() as i64).max(0);
        let mut last = ((right - gl) / size).floor() as i64;
        if (right - gl) % size == 0.0 {
            last -= 1;
        }
        let last = last.min(matrix_width - 1);
        if first > last {
            None
        } else {
            Some(first as u32..=last as u32)
        }
    }

    fn row_range(&self, bottom: f64, top: f64, zoom: u8) -> Option<RangeInclusive<u32>> {
        let size = self.tile_y_size(zoom);
        let matrix_height = self.matrix_height(zoom) as i64;
        let gt = self.top();
        if top == bottom {
            let row = ((gt - top) / size).floor() as i64;
            if row < 0 || row >= matrix_height {
                return None;
            }
            return Some(row as u32..=row as u32);
        }
        let first = (((gt - top) / size).floor() as i64).max(0);
        let mut last = ((gt - bottom) / size).floor() as i64;
        if (gt - bottom) % size == 0.0 {
            last -= 1;
        }
        let last = last.min(matrix_height - 1);
        if first > last {
            None
        } else {
            Some(first as u32..=last as u32)
        }
    }

    /// Clip a geometry to the grid bounds. On global pyramids a geometry
    /// extending over the antimeridian is split, and the outside parts
    /// are shifted by a full grid width so that all parts lie within the
    /// grid bounds. Returns a geometry collection if the input was split.
    pub fn clip_geometry_to_srs_bounds(&self, geometry: &Geometry<f64>) -> Result<Geometry<f64>> {
        let mut parts = self.clip_geometry_multipart(geometry)?;
        if parts.len() == 1 {
            Ok(parts.remove(0))
        } else {
            Ok(Geometry::GeometryCollection(GeometryCollection(parts)))
        }
    }

    pub(crate) fn clip_geometry_multipart(
        &self,
        geometry: &Geometry<f64>,
    ) -> Result<Vec<Geometry<f64>>> {
        check_geometry_kind(geometry)?;
        let rect = match geometry.bounding_rect() {
            Some(rect) => rect,
            None => return Ok(Vec::new()),
        };
        let b = self.bounds();
        let within = rect.min().x >= b.left
            && rect.max().x <= b.right
            && rect.min().y >= b.bottom
            && rect.max().y <= b.top;
        if !self.is_global() || within {
            return Ok(vec![geometry.clone()]);
        }
        let clip_poly = MultiPolygon(vec![b.to_polygon()]);
        let mut parts: Vec<Geometry<f64>> = Vec::new();
        match geometry {
            Geometry::Polygon(poly) => {
                self.clip_polygons(&MultiPolygon(vec![poly.clone()]), &clip_poly, &mut parts);
            }
            Geometry::MultiPolygon(mpoly) => {
                self.clip_polygons(mpoly, &clip_poly, &mut parts);
            }
            Geometry::LineString(line) => {
                self.clip_lines(&MultiLineString(vec![line.clone()]), &clip_poly, &mut parts);
            }
            Geometry::MultiLineString(mline) => {
                self.clip_lines(mline, &clip_poly, &mut parts);
            }
            Geometry::Point(point) => {
                parts.push(self.shift_into_bounds(Geometry::Point(*point)));
            }
            Geometry::MultiPoint(mpoint) => {
                self.clip_points(mpoint, &mut parts);
            }
            Geometry::GeometryCollection(collection) => {
                for geom in &collection.0 {
                    parts.extend(self.clip_geometry_multipart(geom)?);
                }
            }
            other => {
                return Err(TileMatrixError::GeometryType(geometry_kind(other)));
            }
        }
        Ok(parts)
    }

    fn clip_polygons(
        &self,
        mpoly: &MultiPolygon<f64>,
        clip_poly: &MultiPolygon<f64>,
        parts: &mut Vec<Geometry<f64>>,
    ) {
        let inside = clip_poly.intersection(mpoly);
        if !inside.0.is_empty() {
            parts.push(Geometry::MultiPolygon(inside));
        }
        for poly in mpoly.difference(clip_poly) {
            parts.push(self.shift_into_bounds(Geometry::Polygon(poly)));
        }
    }

    fn clip_lines(
        &self,
        mline: &MultiLineString<f64>,
        clip_poly: &MultiPolygon<f64>,
        parts: &mut Vec<Geometry<f64>>,
    ) {
        let inside = clip_poly.clip(mline, false);
        if !inside.0.is_empty() {
            parts.push(Geometry::MultiLineString(inside));
        }
        for line in clip_poly.clip(mline, true) {
            if line.0.is_empty() {
                continue;
            }
            parts.push(self.shift_into_bounds(Geometry::LineString(line)));
        }
    }

    fn clip_points(&self, mpoint: &MultiPoint<f64>, parts: &mut Vec<Geometry<f64>>) {
        let b = self.bounds();
        let (inside, outside): (Vec<_>, Vec<_>) = mpoint
            .0
            .iter()
            .cloned()
            .partition(|p| p.x() >= b.left && p.x() <= b.right);
        if !inside.is_empty() {
            parts.push(Geometry::MultiPoint(MultiPoint(inside)));
        }
        for point in outside {
            parts.push(self.shift_into_bounds(Geometry::Point(point)));
        }
    }

    /// Shift a geometry lying beyond the left or right grid edge by a
    /// full grid width onto the opposite side
    fn shift_into_bounds(&self, geometry: Geometry<f64>) -> Geometry<f64> {
        let rect = match geometry.bounding_rect() {
            Some(rect) => rect,
            None => return geometry,
        };
        if rect.min().x < self.left() {
            geometry.translate(self.x_size(), 0.0)
        } else if rect.max().x > self.right() {
            geometry.translate(-self.x_size(), 0.0)
        } else {
            geometry
        }
    }

    /// Round bounds outward to the closest enclosing union of (buffered)
    /// tile boundaries at a zoom level. Idempotent.
    pub fn snap_bounds(&self, bounds: Bounds, zoom: u8, pixelbuffer: u32) -> Result<Bounds> {
        let lb = self.tile_from_xy(bounds.left, bounds.bottom, zoom, OnEdge::RightTop)?;
        let rt = self.tile_from_xy(bounds.right, bounds.top, zoom, OnEdge::LeftBottom)?;
        let lb_bounds = lb.bounds(pixelbuffer);
        let rt_bounds = rt.bounds(pixelbuffer);
        Ok(Bounds::new(
            lb_bounds.left,
            lb_bounds.bottom,
            rt_bounds.right,
            rt_bounds.top,
        ))
    }

    /// All tiles of this pyramid whose bounding box overlaps the given
    /// tile (from a pyramid with a different metatiling setting) with
    /// nonzero area. Translates tile sets between pyramids sharing the
    /// same source grid.
    pub fn intersecting<'a>(&'a self, tile: &Tile<'_>) -> Result<Vec<Tile<'a>>> {
        tile_intersecting_pyramid(tile, self)
    }
}

fn matrix_dim(base: u32, metatiling: u32, zoom: u8) -> u32 {
    let tiles = (base as u64).saturating_mul(zoom_factor(zoom));
    let dim = tiles.saturating_add(metatiling as u64 - 1) / metatiling as u64;
    dim.max(1).min(u32::MAX as u64) as u32
}

pub(crate) fn tile_intersecting_pyramid<'a>(
    tile: &Tile<'_>,
    pyramid: &'a TilePyramid,
) -> Result<Vec<Tile<'a>>> {
    if tile.pyramid().grid() != pyramid.grid() {
        return Err(TileMatrixError::InvalidGrid(
            "tile and pyramid source grids must be the same".to_string(),
        ));
    }
    let tile_metatiling = tile.pyramid().metatiling() as u64;
    let pyramid_metatiling = pyramid.metatiling() as u64;
    let mut tiles = Vec::new();
    if tile_metatiling > pyramid_metatiling {
        let multiplier = tile_metatiling / pyramid_metatiling;
        let matrix_width = pyramid.matrix_width(tile.zoom) as u64;
        let matrix_height = pyramid.matrix_height(tile.zoom) as u64;
        for row_offset in 0..multiplier {
            for col_offset in 0..multiplier {
                // u64 keeps extreme zoom levels from overflowing the index math
                let row = multiplier * tile.row as u64 + row_offset;
                let col = multiplier * tile.col as u64 + col_offset;
                if row < matrix_height && col < matrix_width {
                    tiles.push(pyramid.tile(tile.zoom, row as u32, col as u32)?);
                }
            }
        }
    } else if tile_metatiling < pyramid_metatiling {
        let row = (tile.row as u64 * tile_metatiling / pyramid_metatiling) as u32;
        let col = (tile.col as u64 * tile_metatiling / pyramid_metatiling) as u32;
        tiles.push(pyramid.tile(tile.zoom, row, col)?);
    } else {
        tiles.push(pyramid.tile(tile.zoom, tile.row, tile.col)?);
    }
    Ok(tiles)
}

fn check_geometry_kind(geometry: &Geometry<f64>) -> Result<()> {
    match geometry {
        Geometry::Point(_)
        | Geometry::MultiPoint(_)
        | Geometry::LineString(_)
        | Geometry::MultiLineString(_)
        | Geometry::Polygon(_)
        | Geometry::MultiPolygon(_) => Ok(()),
        Geometry::GeometryCollection(collection) => {
            for geom in &collection.0 {
                check_geometry_kind(geom)?;
            }
            Ok(())
        }
        other => Err(TileMatrixError::GeometryType(geometry_kind(other))),
    }
}

fn geometry_kind(geometry: &Geometry<f64>) -> String {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
    .to_string()
}
