//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::grid::{GridDefinition, Srs};
use crate::gridcfg::GridCfg;

#[test]
fn test_predefined_grid_cfg() {
    let toml = r#"predefined = "geodetic""#;
    let grid = GridDefinition::from_toml(toml).unwrap();
    assert_eq!(grid, GridDefinition::geodetic());

    let toml = r#"predefined = "mercator""#;
    let grid = GridDefinition::from_toml(toml).unwrap();
    assert_eq!(grid, GridDefinition::mercator());

    let toml = r#"predefined = "utm""#;
    assert!(GridDefinition::from_toml(toml).is_err());
}

#[test]
fn test_user_grid_cfg() {
    let toml = r#"
        [user]
        width = 1
        height = 1
        epsg = 3857
        is_global = true
        [user.bounds]
        left = -20037508.3427892
        bottom = -20037508.3427892
        right = 20037508.3427892
        top = 20037508.3427892
        "#;
    let grid = GridDefinition::from_toml(toml).unwrap();
    assert_eq!(grid, GridDefinition::mercator());

    let toml = r#"
        [user]
        width = 3
        height = 2
        proj = "+proj=somerc +lat_0=46.95240555555556 +lon_0=7.439583333333333"
        [user.bounds]
        left = 2420000.0
        bottom = 1030000.0
        right = 2900000.0
        top = 1350000.0
        "#;
    let grid = GridDefinition::from_toml(toml).unwrap();
    assert!(matches!(grid.srs, Srs::Proj(_)));
    assert!(!grid.is_global);
}

#[test]
fn test_invalid_grid_cfg() {
    // neither predefined nor user grid
    assert!(GridDefinition::from_toml("").is_err());

    // both epsg and proj
    let toml = r#"
        [user]
        width = 1
        height = 1
        epsg = 3857
        proj = "+proj=merc"
        [user.bounds]
        left = 0.0
        bottom = 0.0
        right = 1.0
        top = 1.0
        "#;
    assert!(GridDefinition::from_toml(toml).is_err());

    // not parseable
    assert!(GridDefinition::from_toml("predefined = ").is_err());
}

#[test]
fn test_grid_cfg_struct() {
    let cfg: GridCfg = toml::from_str(r#"predefined = "geodetic""#).unwrap();
    assert_eq!(cfg.predefined.as_deref(), Some("geodetic"));
    assert!(cfg.user.is_none());
}
