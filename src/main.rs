//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

#[macro_use]
extern crate clap;

use clap::{App, AppSettings, ArgMatches, SubCommand};
use dotenv::dotenv;
use env_logger::Builder;
use geo_types::Polygon;
use log::Record;
use serde_json::json;
use std::env;
use std::fs;
use std::io::Write;
use std::process;
use tile_matrix::{
    validate_pixelbuffer, Bounds, GridDefinition, OnEdge, Tile, TileMatrixError, TilePyramid,
};
use time;

fn init_logger(args: &ArgMatches<'_>) {
    let mut builder = Builder::new();
    builder.format(|buf, record: &Record<'_>| {
        let t = time::now();
        writeln!(
            buf,
            "{}.{:03} {} {}",
            time::strftime("%Y-%m-%d %H:%M:%S", &t).unwrap(),
            t.tm_nsec / 1000_000,
            record.level(),
            record.args()
        )
    });

    let rust_log_env = env::var("RUST_LOG");
    let rust_log = if args.value_of("loglevel").is_none() && rust_log_env.is_ok() {
        rust_log_env.as_ref().unwrap()
    } else {
        args.value_of("loglevel").unwrap_or("error")
    };
    builder.parse_filters(rust_log);

    builder.init();
}

#[derive(PartialEq, Clone, Copy)]
enum OutputFormat {
    Tile,
    Wkt,
    GeoJson,
}

fn output_format(args: &ArgMatches<'_>) -> OutputFormat {
    match args.value_of("output-format").unwrap_or("Tile") {
        "Tile" => OutputFormat::Tile,
        "WKT" => OutputFormat::Wkt,
        "GeoJSON" => OutputFormat::GeoJson,
        format => {
            eprintln!("Unknown output format '{}'", format);
            process::exit(1);
        }
    }
}

fn pyramid_from_args(args: &ArgMatches<'_>) -> Result<TilePyramid, TileMatrixError> {
    let grid = if let Some(path) = args.value_of("grid-config") {
        let toml_str = fs::read_to_string(path).map_err(|e| {
            TileMatrixError::InvalidGrid(format!("cannot read grid config '{}': {}", path, e))
        })?;
        GridDefinition::from_toml(&toml_str)?
    } else {
        match args.value_of("grid").unwrap_or("geodetic") {
            "geodetic" => GridDefinition::geodetic(),
            "mercator" => GridDefinition::mercator(),
            name => {
                return Err(TileMatrixError::InvalidGrid(format!(
                    "unknown grid '{}'",
                    name
                )))
            }
        }
    };
    let tile_size = args.value_of("tile-size").map_or(256, |s| {
        s.parse::<u32>()
            .expect("Error parsing 'tile-size' as integer value")
    });
    let metatiling = args.value_of("metatiling").map_or(1, |s| {
        s.parse::<u32>()
            .expect("Error parsing 'metatiling' as integer value")
    });
    TilePyramid::new(grid, tile_size, metatiling)
}

fn pixelbuffer_from_args(args: &ArgMatches<'_>) -> Result<u32, TileMatrixError> {
    let value = args.value_of("pixelbuffer").map_or(0, |s| {
        s.parse::<i64>()
            .expect("Error parsing 'pixelbuffer' as integer value")
    });
    validate_pixelbuffer(value)
}

fn zoom_from_args(args: &ArgMatches<'_>) -> u8 {
    args.value_of("zoom")
        .unwrap()
        .parse::<u8>()
        .expect("Error parsing 'zoom' as integer value")
}

fn bounds_from_args(args: &ArgMatches<'_>) -> Bounds {
    let coord = |name: &str| -> f64 {
        args.value_of(name)
            .unwrap()
            .parse()
            .unwrap_or_else(|_| panic!("Error parsing '{}' as float value", name))
    };
    Bounds::new(
        coord("left"),
        coord("bottom"),
        coord("right"),
        coord("top"),
    )
}

fn tile_index_from_args(args: &ArgMatches<'_>) -> (u32, u32) {
    let row = args
        .value_of("row")
        .unwrap()
        .parse::<u32>()
        .expect("Error parsing 'row' as integer value");
    let col = args
        .value_of("col")
        .unwrap()
        .parse::<u32>()
        .expect("Error parsing 'col' as integer value");
    (row, col)
}

fn polygon_wkt(poly: &Polygon<f64>) -> String {
    let coords: Vec<String> = poly
        .exterior()
        .0
        .iter()
        .map(|c| format!("{} {}", c.x, c.y))
        .collect();
    format!("POLYGON (({}))", coords.join(", "))
}

fn polygon_coordinates(poly: &Polygon<f64>) -> serde_json::Value {
    let ring: Vec<serde_json::Value> = poly
        .exterior()
        .0
        .iter()
        .map(|c| json!([c.x, c.y]))
        .collect();
    json!([ring])
}

fn polygon_geojson(poly: &Polygon<f64>) -> String {
    json!({"type": "Polygon", "coordinates": polygon_coordinates(poly)}).to_string()
}

fn print_geometry(poly: &Polygon<f64>, format: OutputFormat) {
    match format {
        // Tile output makes no sense for a bare geometry, fall back to WKT
        OutputFormat::Tile | OutputFormat::Wkt => println!("{}", polygon_wkt(poly)),
        OutputFormat::GeoJson => println!("{}", polygon_geojson(poly)),
    }
}

fn print_tiles<'a, I: Iterator<Item = Tile<'a>>>(tiles: I, pixelbuffer: u32, format: OutputFormat) {
    match format {
        OutputFormat::Tile => {
            for tile in tiles {
                println!("{} {} {}", tile.zoom, tile.row, tile.col);
            }
        }
        OutputFormat::Wkt => {
            for tile in tiles {
                println!("{}", polygon_wkt(&tile.bbox(pixelbuffer)));
            }
        }
        OutputFormat::GeoJson => {
            let features: Vec<serde_json::Value> = tiles
                .map(|tile| {
                    json!({
                        "type": "Feature",
                        "geometry": {
                            "type": "Polygon",
                            "coordinates": polygon_coordinates(&tile.bbox(pixelbuffer)),
                        },
                        "properties": {
                            "zoom": tile.zoom,
                            "row": tile.row,
                            "col": tile.col,
                        },
                    })
                })
                .collect();
            println!(
                "{}",
                json!({"type": "FeatureCollection", "features": features})
            );
        }
    }
}

fn bounds(args: &ArgMatches<'_>) -> Result<(), TileMatrixError> {
    let tp = pyramid_from_args(args)?;
    let pixelbuffer = pixelbuffer_from_args(args)?;
    let zoom = zoom_from_args(args);
    let (row, col) = tile_index_from_args(args);
    let bounds = tp.tile_bounds(zoom, row, col, pixelbuffer)?;
    println!(
        "{} {} {} {}",
        bounds.left, bounds.bottom, bounds.right, bounds.top
    );
    Ok(())
}

fn bbox(args: &ArgMatches<'_>) -> Result<(), TileMatrixError> {
    let tp = pyramid_from_args(args)?;
    let pixelbuffer = pixelbuffer_from_args(args)?;
    let zoom = zoom_from_args(args);
    let (row, col) = tile_index_from_args(args);
    let bbox = tp.tile_bbox(zoom, row, col, pixelbuffer)?;
    print_geometry(&bbox, output_format(args));
    Ok(())
}

fn tile(args: &ArgMatches<'_>) -> Result<(), TileMatrixError> {
    let tp = pyramid_from_args(args)?;
    let pixelbuffer = pixelbuffer_from_args(args)?;
    let zoom = zoom_from_args(args);
    let x: f64 = args
        .value_of("x")
        .unwrap()
        .parse()
        .expect("Error parsing 'x' as float value");
    let y: f64 = args
        .value_of("y")
        .unwrap()
        .parse()
        .expect("Error parsing 'y' as float value");
    let tile = tp.tile_from_xy(x, y, zoom, OnEdge::default())?;
    print_tiles(std::iter::once(tile), pixelbuffer, output_format(args));
    Ok(())
}

fn tiles(args: &ArgMatches<'_>) -> Result<(), TileMatrixError> {
    let tp = pyramid_from_args(args)?;
    let pixelbuffer = pixelbuffer_from_args(args)?;
    let zoom = zoom_from_args(args);
    let bounds = bounds_from_args(args);
    print_tiles(
        tp.tiles_from_bounds(bounds, zoom),
        pixelbuffer,
        output_format(args),
    );
    Ok(())
}

fn snap_bounds(args: &ArgMatches<'_>) -> Result<(), TileMatrixError> {
    let tp = pyramid_from_args(args)?;
    let pixelbuffer = pixelbuffer_from_args(args)?;
    let zoom = zoom_from_args(args);
    let snapped = tp.snap_bounds(bounds_from_args(args), zoom, pixelbuffer)?;
    println!(
        "{} {} {} {}",
        snapped.left, snapped.bottom, snapped.right, snapped.top
    );
    Ok(())
}

fn snap_bbox(args: &ArgMatches<'_>) -> Result<(), TileMatrixError> {
    let tp = pyramid_from_args(args)?;
    let pixelbuffer = pixelbuffer_from_args(args)?;
    let zoom = zoom_from_args(args);
    let snapped = tp.snap_bounds(bounds_from_args(args), zoom, pixelbuffer)?;
    print_geometry(&snapped.to_polygon(), output_format(args));
    Ok(())
}

fn main() {
    dotenv().ok();
    const PYRAMID_ARGS: &str = "--grid=[geodetic|mercator] 'Predefined grid (Default: geodetic)'
         --grid-config=[FILE] 'Read user grid definition from TOML file'
         --tile-size=[PIXELS] 'Tile size in pixels (Default: 256)'
         --metatiling=[FACTOR] 'Metatile size in tiles, power of two (Default: 1)'
         --pixelbuffer=[PIXELS] 'Buffer around tile in pixels (Default: 0)'
         --output-format=[Tile|WKT|GeoJSON] 'Output format (Default: Tile)'
         --loglevel=[error|warn|info|debug|trace] 'Log level (Default: error)'";
    // http://kbknapp.github.io/clap-rs/clap/
    let mut app = App::new("tmx")
        .version(crate_version!())
        .author("Pirmin Kalberer <pka@sourcepole.ch>")
        .about("tile matrix calculations for gridded map tile pyramids")
        .subcommand(
            SubCommand::with_name("bounds")
                .args_from_usage(PYRAMID_ARGS)
                .args_from_usage(
                    "<zoom> 'Zoom level'
                     <row> 'Tile row'
                     <col> 'Tile column'",
                )
                .about("Print boundaries of a tile"),
        )
        .subcommand(
            SubCommand::with_name("bbox")
                .args_from_usage(PYRAMID_ARGS)
                .args_from_usage(
                    "<zoom> 'Zoom level'
                     <row> 'Tile row'
                     <col> 'Tile column'",
                )
                .about("Print bounding box geometry of a tile"),
        )
        .subcommand(
            SubCommand::with_name("tile")
                .setting(AppSettings::AllowLeadingHyphen)
                .args_from_usage(PYRAMID_ARGS)
                .args_from_usage(
                    "<zoom> 'Zoom level'
                     <x> 'X coordinate'
                     <y> 'Y coordinate'",
                )
                .about("Print the tile containing a point"),
        )
        .subcommand(
            SubCommand::with_name("tiles")
                .setting(AppSettings::AllowLeadingHyphen)
                .args_from_usage(PYRAMID_ARGS)
                .args_from_usage(
                    "<zoom> 'Zoom level'
                     <left> 'Left boundary'
                     <bottom> 'Bottom boundary'
                     <right> 'Right boundary'
                     <top> 'Top boundary'",
                )
                .about("Print all tiles overlapping the given bounds"),
        )
        .subcommand(
            SubCommand::with_name("snap-bounds")
                .setting(AppSettings::AllowLeadingHyphen)
                .args_from_usage(PYRAMID_ARGS)
                .args_from_usage(
                    "<zoom> 'Zoom level'
                     <left> 'Left boundary'
                     <bottom> 'Bottom boundary'
                     <right> 'Right boundary'
                     <top> 'Top boundary'",
                )
                .about("Print bounds snapped to the tile grid"),
        )
        .subcommand(
            SubCommand::with_name("snap-bbox")
                .setting(AppSettings::AllowLeadingHyphen)
                .args_from_usage(PYRAMID_ARGS)
                .args_from_usage(
                    "<zoom> 'Zoom level'
                     <left> 'Left boundary'
                     <bottom> 'Bottom boundary'
                     <right> 'Right boundary'
                     <top> 'Top boundary'",
                )
                .about("Print bounding box geometry snapped to the tile grid"),
        );

    let result = match app.get_matches_from_safe_borrow(env::args()) {
        //app.get_matches() prohibits later call of app.print_help()
        Result::Err(e) => {
            println!("{}", e);
            Ok(())
        }
        Result::Ok(matches) => match matches.subcommand() {
            ("bounds", Some(sub_m)) => {
                init_logger(sub_m);
                bounds(sub_m)
            }
            ("bbox", Some(sub_m)) => {
                init_logger(sub_m);
                bbox(sub_m)
            }
            ("tile", Some(sub_m)) => {
                init_logger(sub_m);
                tile(sub_m)
            }
            ("tiles", Some(sub_m)) => {
                init_logger(sub_m);
                tiles(sub_m)
            }
            ("snap-bounds", Some(sub_m)) => {
                init_logger(sub_m);
                snap_bounds(sub_m)
            }
            ("snap-bbox", Some(sub_m)) => {
                init_logger(sub_m);
                snap_bbox(sub_m)
            }
            _ => {
                let _ = app.print_help();
                println!("");
                Ok(())
            }
        },
    };
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
