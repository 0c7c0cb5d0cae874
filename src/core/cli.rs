//! Command line interface for the Wardo room planner
//!
//! Handles parsing command line arguments and provides validation for user
//! inputs before the window opens, with messages that say how to fix the
//! mistake.

use crate::core::config_file::ConfigFile;
use crate::geometry::RoomGeometry;
use bevy::prelude::*;
use clap::Parser;
use std::path::PathBuf;

/// Wardo CLI arguments
///
/// Examples:
///   wardo                          # Default 4x3m room
///   wardo --room 5.2x4x2.6         # Custom room, meters as WxDxH
///   wardo --wall-thickness 0.15    # Thicker walls
///   wardo --catalog my-units.json  # Use a custom product catalog
#[derive(Parser, Debug, Resource, Clone)]
#[clap(
    name = "wardo",
    version,
    about = "An interactive 3D room planner built with Rust and Bevy",
    long_about = "Wardo lets you populate a rectangular room with modular wardrobe units. \
                  Wall units stay flush against a wall, corner units occupy room corners, \
                  and everything else avoids collisions automatically."
)]
pub struct CliArgs {
    /// Room size as WxDxH in meters, e.g. "4x3x2.4"
    ///
    /// Overrides the default_room setting from the user config file.
    #[clap(
        long = "room",
        short = 'r',
        help = "Room size as WxDxH in meters",
        long_help = "Room width, depth and height in meters, separated by 'x', e.g. 4x3x2.4. \
                     All three values must be positive."
    )]
    pub room: Option<String>,

    /// Wall thickness in meters
    #[clap(
        long = "wall-thickness",
        help = "Wall thickness in meters (default 0.1)",
        long_help = "Wall thickness in meters. Must be smaller than half the shortest \
                     room side."
    )]
    pub wall_thickness: Option<f32>,

    /// Path to a product catalog JSON file
    ///
    /// Replaces the built-in catalog. Each entry needs an item number,
    /// centimeter dimensions, a price and a placement class.
    #[clap(
        long = "catalog",
        short = 'c',
        help = "Product catalog JSON file",
        long_help = "Path to a JSON catalog of wardrobe units to use instead of the \
                     embedded default catalog."
    )]
    pub catalog: Option<PathBuf>,
}

impl CliArgs {
    /// Validate the CLI arguments after parsing
    ///
    /// This ensures that paths exist and geometry is sane before the
    /// application starts, providing clear error messages for common
    /// mistakes.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(room) = &self.room {
            parse_room(room)?;
        }
        if let Some(path) = &self.catalog {
            if !path.exists() {
                return Err(format!(
                    "Catalog file does not exist: {}\nMake sure the path is correct.",
                    path.display()
                ));
            }
            if !path.is_file() {
                return Err(format!(
                    "Catalog path is not a file: {}",
                    path.display()
                ));
            }
        }
        // Full geometry check (thickness against dimensions) happens in
        // room_geometry(), where the config file is also known.
        Ok(())
    }

    /// Resolve the room geometry from CLI args, config file, or defaults
    ///
    /// Priority order:
    /// 1. CLI argument (--room / --wall-thickness)
    /// 2. Config file setting (~/.config/wardo/settings.json)
    /// 3. Built-in default (4x3x2.4, 0.1 walls)
    pub fn room_geometry(&self, config: Option<&ConfigFile>) -> Result<RoomGeometry, String> {
        let defaults = RoomGeometry::default();
        let (width, depth, height) = match &self.room {
            Some(room) => {
                debug!("Using room size from CLI: {}", room);
                parse_room(room)?
            }
            None => match config.and_then(|c| c.default_room.as_deref()) {
                Some(room) => {
                    debug!("Using room size from config file: {}", room);
                    parse_room(room)?
                }
                None => (defaults.width, defaults.depth, defaults.height),
            },
        };
        let wall_thickness = self.wall_thickness.unwrap_or(defaults.wall_thickness);
        let room = RoomGeometry::new(width, depth, height, wall_thickness);
        room.validate()?;
        Ok(room)
    }
}

/// Parse a "WxDxH" room string into meters
fn parse_room(input: &str) -> Result<(f32, f32, f32), String> {
    let parts: Vec<&str> = input.split(['x', 'X']).collect();
    if parts.len() != 3 {
        return Err(format!(
            "Invalid room size: '{input}'\nExpected WxDxH in meters, e.g. 4x3x2.4"
        ));
    }
    let mut values = [0.0_f32; 3];
    for (value, part) in values.iter_mut().zip(&parts) {
        *value = part
            .trim()
            .parse()
            .map_err(|_| format!("Invalid room dimension: '{part}'\nExpected a number."))?;
    }
    Ok((values[0], values[1], values[2]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(room: Option<&str>, wall_thickness: Option<f32>) -> CliArgs {
        CliArgs {
            room: room.map(str::to_string),
            wall_thickness,
            catalog: None,
        }
    }

    #[test]
    fn room_strings_parse() {
        assert_eq!(parse_room("4x3x2.4").unwrap(), (4.0, 3.0, 2.4));
        assert_eq!(parse_room("5.5X4X2.6").unwrap(), (5.5, 4.0, 2.6));
        assert!(parse_room("4x3").is_err());
        assert!(parse_room("4xtallx2.4").is_err());
    }

    #[test]
    fn cli_overrides_config() {
        let config = ConfigFile {
            default_room: Some("6x5x2.8".to_string()),
            ..Default::default()
        };
        let room = args(Some("4x3x2.4"), None)
            .room_geometry(Some(&config))
            .unwrap();
        assert_eq!(room.width, 4.0);
        let room = args(None, None).room_geometry(Some(&config)).unwrap();
        assert_eq!(room.width, 6.0);
    }

    #[test]
    fn bad_geometry_is_rejected_with_a_message() {
        assert!(args(Some("0x3x2.4"), None).room_geometry(None).is_err());
        assert!(args(Some("2x2x2.4"), Some(1.5)).room_geometry(None).is_err());
    }
}
