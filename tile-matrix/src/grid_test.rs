//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::grid::{Bounds, GridDefinition, Shape, Srs, TileIndex};
use std::collections::HashSet;

#[test]
fn test_predefined_grids() {
    let grid = GridDefinition::geodetic();
    assert_eq!(grid.shape, Shape::new(2, 1));
    assert_eq!(grid.bounds, Bounds::new(-180.0, -90.0, 180.0, 90.0));
    assert_eq!(grid.srs, Srs::Epsg(4326));
    assert!(grid.is_global);

    let grid = GridDefinition::mercator();
    assert_eq!(grid.shape, Shape::new(1, 1));
    assert_eq!(grid.srs, Srs::Epsg(3857));
    assert!(grid.is_global);
    assert_eq!(grid.bounds.width(), grid.bounds.height());
}

#[test]
fn test_custom_grid() {
    // LV95 extent with 3x2 tiles at zoom 0
    let grid = GridDefinition::new(
        Shape::new(3, 2),
        Bounds::new(2420000.0, 1030000.0, 2900000.0, 1350000.0),
        Srs::Epsg(2056),
        false,
    )
    .unwrap();
    assert_eq!(grid.shape, Shape::new(3, 2));
    assert!(!grid.is_global);

    // shape ratio must match bounds ratio
    assert!(GridDefinition::new(
        Shape::new(2, 2),
        Bounds::new(2420000.0, 1030000.0, 2900000.0, 1350000.0),
        Srs::Epsg(2056),
        false,
    )
    .is_err());
    // degenerate bounds
    assert!(GridDefinition::new(
        Shape::new(1, 1),
        Bounds::new(10.0, 10.0, 10.0, 20.0),
        Srs::Epsg(2056),
        false,
    )
    .is_err());
    // zero shape
    assert!(GridDefinition::new(
        Shape::new(0, 1),
        Bounds::new(0.0, 0.0, 1.0, 1.0),
        Srs::Epsg(2056),
        false,
    )
    .is_err());
}

#[test]
fn test_bounds() {
    let bounds = Bounds::new(-180.0, -90.0, 180.0, 90.0);
    assert_eq!(bounds.width(), 360.0);
    assert_eq!(bounds.height(), 180.0);
    let poly = bounds.to_polygon();
    let exterior = poly.exterior();
    assert_eq!(exterior.0.len(), 5);
    assert_eq!((exterior.0[0].x, exterior.0[0].y), (-180.0, 90.0));
    assert_eq!((exterior.0[2].x, exterior.0[2].y), (180.0, -90.0));
    assert_eq!(exterior.0[0], exterior.0[4]);
}

#[test]
fn test_tile_index() {
    let idx = TileIndex::new(5, 12, 35);
    assert!(idx < TileIndex::new(6, 0, 0));
    assert!(idx < TileIndex::new(5, 12, 36));
    assert!(idx > TileIndex::new(5, 11, 40));

    let mut set = HashSet::new();
    set.insert(TileIndex::new(5, 12, 35));
    set.insert(TileIndex::new(5, 12, 35));
    assert_eq!(set.len(), 1);
}

#[test]
fn test_grid_eq() {
    assert_eq!(GridDefinition::geodetic(), GridDefinition::geodetic());
    assert_ne!(GridDefinition::geodetic(), GridDefinition::mercator());
}
