//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Tile selection iterators

use crate::pyramid::TilePyramid;
use crate::tile::Tile;
use geo::coordinate_position::CoordPos;
use geo::dimensions::Dimensions;
use geo::Relate;
use geo_types::{Geometry, Polygon};
use std::ops::RangeInclusive;
use std::sync::Arc;

/// Batch axis for batched tile selection
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum BatchBy {
    Row,
    Column,
}

/// Candidate tile ranges of a selection: one row range and one or more
/// disjoint column ranges (two when a query wraps around the
/// antimeridian).
#[derive(Clone, Debug)]
pub(crate) struct Cover {
    pub rows: Option<RangeInclusive<u32>>,
    pub cols: Vec<RangeInclusive<u32>>,
}

impl Cover {
    pub fn empty() -> Cover {
        Cover {
            rows: None,
            cols: Vec::new(),
        }
    }

    /// Sorts column ranges by start and merges adjacent or overlapping
    /// ones, so every column is covered at most once
    pub fn new(rows: RangeInclusive<u32>, mut cols: Vec<RangeInclusive<u32>>) -> Cover {
        if cols.is_empty() {
            return Cover::empty();
        }
        cols.sort_by_key(|range| *range.start());
        let mut merged: Vec<RangeInclusive<u32>> = Vec::with_capacity(cols.len());
        for range in cols {
            match merged.last_mut() {
                Some(last) if *range.start() as u64 <= *last.end() as u64 + 1 => {
                    if range.end() > last.end() {
                        *last = *last.start()..=*range.end();
                    }
                }
                _ => merged.push(range),
            }
        }
        Cover {
            rows: Some(rows),
            cols: merged,
        }
    }

    fn single(row: u32, col: u32) -> Cover {
        Cover {
            rows: Some(row..=row),
            cols: vec![col..=col],
        }
    }

    fn is_empty(&self) -> bool {
        self.rows.is_none() || self.cols.is_empty()
    }
}

/// Exact selection predicate: the clipped parts of the query geometry.
/// A tile is kept if its bounding box overlaps at least one part with
/// interiors intersecting, so tiles only touched by the geometry with
/// zero area are dropped.
#[derive(Debug)]
pub(crate) struct GeomFilter {
    pieces: Vec<Geometry<f64>>,
}

impl GeomFilter {
    pub fn new(pieces: Vec<Geometry<f64>>) -> GeomFilter {
        GeomFilter { pieces }
    }

    pub fn keep(&self, tile_bbox: &Polygon<f64>) -> bool {
        let tile_geom = Geometry::Polygon(tile_bbox.clone());
        self.pieces.iter().any(|piece| {
            let im = piece.relate(&tile_geom);
            im.get(CoordPos::Inside, CoordPos::Inside) != Dimensions::Empty
        })
    }
}

/// Iterator over the tiles of a selection, row-major with ascending
/// rows and columns.
pub struct TileIterator<'a> {
    pyramid: &'a TilePyramid,
    zoom: u8,
    cover: Cover,
    filter: Option<Arc<GeomFilter>>,
    row: u32,
    range_idx: usize,
    col: u32,
    finished: bool,
}

impl<'a> TileIterator<'a> {
    pub(crate) fn new(
        pyramid: &'a TilePyramid,
        zoom: u8,
        cover: Cover,
        filter: Option<Arc<GeomFilter>>,
    ) -> TileIterator<'a> {
        let finished = cover.is_empty();
        let row = cover.rows.as_ref().map_or(0, |rows| *rows.start());
        let col = cover.cols.first().map_or(0, |range| *range.start());
        TileIterator {
            pyramid,
            zoom,
            cover,
            filter,
            row,
            range_idx: 0,
            col,
            finished,
        }
    }

    pub(crate) fn single(tile: Tile<'a>) -> TileIterator<'a> {
        TileIterator::new(
            tile.pyramid(),
            tile.zoom,
            Cover::single(tile.row, tile.col),
            None,
        )
    }

    fn advance(&mut self) {
        let rows = self.cover.rows.as_ref().unwrap();
        if self.col < *self.cover.cols[self.range_idx].end() {
            self.col += 1;
            return;
        }
        self.range_idx += 1;
        if self.range_idx < self.cover.cols.len() {
            self.col = *self.cover.cols[self.range_idx].start();
            return;
        }
        self.range_idx = 0;
        self.col = *self.cover.cols[0].start();
        if self.row < *rows.end() {
            self.row += 1;
        } else {
            self.finished = true;
        }
    }
}

impl<'a> Iterator for TileIterator<'a> {
    type Item = Tile<'a>;

    fn next(&mut self) -> Option<Tile<'a>> {
        loop {
            if self.finished {
                return None;
            }
            let tile = Tile::new(self.pyramid, self.zoom, self.row, self.col);
            self.advance();
            match &self.filter {
                Some(filter) if !filter.keep(&tile.bbox(0)) => continue,
                _ => return Some(tile),
            }
        }
    }
}

/// One row or column of a batched tile selection
pub struct TileBatch<'a>(TileIterator<'a>);

impl<'a> Iterator for TileBatch<'a> {
    type Item = Tile<'a>;

    fn next(&mut self) -> Option<Tile<'a>> {
        self.0.next()
    }
}

/// Iterator over the rows or columns of a selection, in ascending
/// order. With an exact geometry filter, individual batches can turn
/// out empty.
pub struct TileBatches<'a> {
    pyramid: &'a TilePyramid,
    zoom: u8,
    cover: Cover,
    batch_by: BatchBy,
    filter: Option<Arc<GeomFilter>>,
    row: u32,
    range_idx: usize,
    col: u32,
    finished: bool,
}

impl<'a> TileBatches<'a> {
    pub(crate) fn new(
        pyramid: &'a TilePyramid,
        zoom: u8,
        cover: Cover,
        batch_by: BatchBy,
        filter: Option<Arc<GeomFilter>>,
    ) -> TileBatches<'a> {
        let finished = cover.is_empty();
        let row = cover.rows.as_ref().map_or(0, |rows| *rows.start());
        let col = cover.cols.first().map_or(0, |range| *range.start());
        TileBatches {
            pyramid,
            zoom,
            cover,
            batch_by,
            filter,
            row,
            range_idx: 0,
            col,
            finished,
        }
    }

    pub(crate) fn single(tile: Tile<'a>, batch_by: BatchBy) -> TileBatches<'a> {
        TileBatches::new(
            tile.pyramid(),
            tile.zoom,
            Cover::single(tile.row, tile.col),
            batch_by,
            None,
        )
    }
}

impl<'a> Iterator for TileBatches<'a> {
    type Item = TileBatch<'a>;

    fn next(&mut self) -> Option<TileBatch<'a>> {
        if self.finished {
            return None;
        }
        let batch_cover = match self.batch_by {
            BatchBy::Row => Cover {
                rows: Some(self.row..=self.row),
                cols: self.cover.cols.clone(),
            },
            BatchBy::Column => Cover {
                rows: self.cover.rows.clone(),
                cols: vec![self.col..=self.col],
            },
        };
        match self.batch_by {
            BatchBy::Row => {
                let rows = self.cover.rows.as_ref().unwrap();
                if self.row < *rows.end() {
                    self.row += 1;
                } else {
                    self.finished = true;
                }
            }
            BatchBy::Column => {
                if self.col < *self.cover.cols[self.range_idx].end() {
                    self.col += 1;
                } else {
                    self.range_idx += 1;
                    if self.range_idx < self.cover.cols.len() {
                        self.col = *self.cover.cols[self.range_idx].start();
                    } else {
                        self.finished = true;
                    }
                }
            }
        }
        Some(TileBatch(TileIterator::new(
            self.pyramid,
            self.zoom,
            batch_cover,
            self.filter.clone(),
        )))
    }
}
