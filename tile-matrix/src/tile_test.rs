//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::grid::{Bounds, GridDefinition, Shape, Srs, TileIndex};
use crate::pyramid::TilePyramid;
use crate::tile::{Connectedness, Tile};
use geo::AffineTransform;
use std::collections::HashSet;

fn ids(tiles: Vec<Tile<'_>>) -> Vec<(u8, u32, u32)> {
    tiles.iter().map(|t| (t.zoom, t.row, t.col)).collect()
}

#[test]
fn test_tile_metrics() {
    let tp = TilePyramid::geodetic();
    let tile = tp.tile(8, 126, 257).unwrap();
    assert_eq!(tile.index(), TileIndex::new(8, 126, 257));
    assert_eq!(
        tile.bounds(0),
        Bounds::new(0.703125, 0.703125, 1.40625, 1.40625)
    );
    assert_eq!(tile.left(), 0.703125);
    assert_eq!(tile.bottom(), 0.703125);
    assert_eq!(tile.right(), 1.40625);
    assert_eq!(tile.top(), 1.40625);
    assert_eq!(tile.x_size(), 0.703125);
    assert_eq!(tile.y_size(), 0.703125);
    assert_eq!(tile.pixel_x_size(), 0.00274658203125);
    assert_eq!(tile.bbox(0).exterior().0.len(), 5);
    assert!(tile.is_valid());
}

#[test]
fn test_tile_shape() {
    let tp = TilePyramid::geodetic();
    let tile = tp.tile(8, 126, 257).unwrap();
    assert_eq!(tile.shape(0), Shape::new(256, 256));
    assert_eq!(tile.shape(10), Shape::new(276, 276));

    // first and last row of a global pyramid get no buffer beyond the edge
    let tile = tp.tile(8, 0, 0).unwrap();
    assert_eq!(tile.shape(10), Shape::new(276, 266));
    let tile = tp.tile(8, 255, 0).unwrap();
    assert_eq!(tile.shape(10), Shape::new(276, 266));

    // single row matrix is clamped on both sides
    let tile = tp.tile(0, 0, 0).unwrap();
    assert_eq!(tile.shape(5), Shape::new(266, 256));
}

#[test]
fn test_tile_affine() {
    let tp = TilePyramid::geodetic();
    let tile = tp.tile(8, 126, 257).unwrap();
    assert_eq!(
        tile.affine(0),
        AffineTransform::new(
            0.00274658203125,
            0.0,
            0.703125,
            0.0,
            -0.00274658203125,
            1.40625
        )
    );
    assert_eq!(
        tile.affine(10),
        AffineTransform::new(
            0.00274658203125,
            0.0,
            0.6756591796875,
            0.0,
            -0.00274658203125,
            1.4337158203125
        )
    );
}

#[test]
fn test_parent_children() {
    let tp = TilePyramid::geodetic();
    let tile = tp.tile(5, 12, 35).unwrap();
    let parent = tile.get_parent().unwrap();
    assert_eq!((parent.zoom, parent.row, parent.col), (4, 6, 17));
    assert!(tp.tile(0, 0, 0).unwrap().get_parent().is_none());

    assert_eq!(
        ids(parent.get_children()),
        vec![(5, 12, 34), (5, 12, 35), (5, 13, 34), (5, 13, 35)]
    );
    assert!(parent.get_children().contains(&tile));

    // children outside of the matrix are skipped
    let meta = TilePyramid::new(GridDefinition::geodetic(), 256, 2).unwrap();
    assert_eq!(
        ids(meta.tile(0, 0, 0).unwrap().get_children()),
        vec![(1, 0, 0), (1, 0, 1)]
    );
}

#[test]
fn test_children_high_zoom() {
    let tp = TilePyramid::geodetic();
    // child indices near the capped matrix dimensions must not wrap
    let tile = tp.tile(32, 2_147_483_647, 0).unwrap();
    assert_eq!(
        ids(tile.get_children()),
        vec![(33, 4_294_967_294, 0), (33, 4_294_967_294, 1)]
    );
    let tile = tp.tile(32, 3_000_000_000, 0).unwrap();
    assert!(tile.get_children().is_empty());
}

#[test]
fn test_neighbors() {
    let tp = TilePyramid::geodetic();
    let tile = tp.tile(5, 12, 35).unwrap();
    assert_eq!(tile.get_neighbors(Connectedness::Four).len(), 4);
    assert_eq!(tile.get_neighbors(Connectedness::Eight).len(), 8);

    // top left corner tile: no row above, column wraps around
    let tile = tp.tile(1, 0, 0).unwrap();
    assert_eq!(
        ids(tile.get_neighbors(Connectedness::Four)),
        vec![(1, 0, 1), (1, 1, 0), (1, 0, 3)]
    );
    assert_eq!(
        ids(tile.get_neighbors(Connectedness::Eight)),
        vec![(1, 0, 1), (1, 1, 0), (1, 0, 3), (1, 1, 1), (1, 1, 3)]
    );
}

#[test]
fn test_neighbors_non_global() {
    let grid = GridDefinition::new(
        Shape::new(1, 1),
        Bounds::new(0.0, 0.0, 100.0, 100.0),
        Srs::Epsg(2056),
        false,
    )
    .unwrap();
    let tp = TilePyramid::new(grid, 256, 1).unwrap();
    // corner tile without wraparound
    let tile = tp.tile(1, 0, 0).unwrap();
    assert_eq!(
        ids(tile.get_neighbors(Connectedness::Eight)),
        vec![(1, 0, 1), (1, 1, 0), (1, 1, 1)]
    );
}

#[test]
fn test_neighbors_single_tile_matrix() {
    let tp = TilePyramid::mercator();
    let tile = tp.tile(0, 0, 0).unwrap();
    // wrapping around leads back to the tile itself
    assert!(tile.get_neighbors(Connectedness::Eight).is_empty());
}

#[test]
fn test_tile_eq_hash() {
    let tp = TilePyramid::geodetic();
    let tp2 = tp.clone();
    assert_eq!(tp.tile(3, 1, 2).unwrap(), tp2.tile(3, 1, 2).unwrap());
    assert_ne!(tp.tile(3, 1, 2).unwrap(), tp.tile(3, 1, 3).unwrap());

    let mut set = HashSet::new();
    set.insert(tp.tile(3, 1, 2).unwrap());
    set.insert(tp2.tile(3, 1, 2).unwrap());
    assert_eq!(set.len(), 1);
}

#[test]
fn test_tile_debug() {
    let tp = TilePyramid::geodetic();
    assert_eq!(
        format!("{:?}", tp.tile(5, 12, 35).unwrap()),
        "Tile(5, 12, 35)"
    );
}

#[test]
fn test_tile_intersecting() {
    let tp = TilePyramid::geodetic();
    let meta = TilePyramid::new(GridDefinition::geodetic(), 256, 2).unwrap();
    let tile = tp.tile(8, 127, 257).unwrap();
    assert_eq!(ids(tile.intersecting(&meta).unwrap()), vec![(8, 63, 128)]);
}
