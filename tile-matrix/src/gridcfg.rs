//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Grid configuration deserialization

use crate::error::{Result, TileMatrixError};
use crate::grid::{Bounds, GridDefinition, Shape, Srs};
use serde::Deserialize;

#[derive(Deserialize, Clone, Debug)]
pub struct BoundsCfg {
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
    pub top: f64,
}

impl From<&BoundsCfg> for Bounds {
    fn from(cfg: &BoundsCfg) -> Bounds {
        Bounds::new(cfg.left, cfg.bottom, cfg.right, cfg.top)
    }
}

/// User defined grid. Exactly one of `epsg` or `proj` must be set.
#[derive(Deserialize, Clone, Debug)]
pub struct UserGridCfg {
    /// Grid width and height in tiles at zoom level 0
    pub width: u32,
    pub height: u32,
    pub bounds: BoundsCfg,
    pub epsg: Option<u32>,
    pub proj: Option<String>,
    #[serde(default)]
    pub is_global: bool,
}

/// Grid configuration entry: either a predefined grid name or a user grid.
#[derive(Deserialize, Clone, Debug)]
pub struct GridCfg {
    pub predefined: Option<String>,
    pub user: Option<UserGridCfg>,
}

impl GridDefinition {
    pub fn from_config(grid_cfg: &GridCfg) -> Result<GridDefinition> {
        if let Some(ref gridname) = grid_cfg.predefined {
            match gridname.as_str() {
                "geodetic" => Ok(GridDefinition::geodetic()),
                "mercator" => Ok(GridDefinition::mercator()),
                _ => Err(TileMatrixError::InvalidGrid(format!(
                    "unknown grid '{}'",
                    gridname
                ))),
            }
        } else if let Some(ref usergrid) = grid_cfg.user {
            let srs = match (&usergrid.epsg, &usergrid.proj) {
                (Some(epsg), None) => Ok(Srs::Epsg(*epsg)),
                (None, Some(proj)) => Ok(Srs::Proj(proj.clone())),
                _ => Err(TileMatrixError::InvalidGrid(
                    "provide either 'epsg' or 'proj' definition".to_string(),
                )),
            }?;
            GridDefinition::new(
                Shape::new(usergrid.width, usergrid.height),
                Bounds::from(&usergrid.bounds),
                srs,
                usergrid.is_global,
            )
        } else {
            Err(TileMatrixError::InvalidGrid(
                "missing predefined grid name or user grid".to_string(),
            ))
        }
    }

    pub fn from_toml(toml_str: &str) -> Result<GridDefinition> {
        let cfg: GridCfg = toml::from_str(toml_str)
            .map_err(|e| TileMatrixError::InvalidGrid(e.to_string()))?;
        GridDefinition::from_config(&cfg)
    }
}
