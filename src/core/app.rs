//! Application builder and initialization
//!
//! This module provides the main app creation function: CLI validation,
//! resource setup, and plugin registration.

use crate::catalog::Catalog;
use crate::core::cli::CliArgs;
use crate::core::config_file::ConfigFile;
use crate::core::settings::WardoSettings;
use crate::core::state::DesignSession;
use crate::rendering::{ScenePlugin, UnitRenderPlugin};
use crate::systems::{DragPlugin, PointerPlugin, SpawnPlugin};
use anyhow::Result;
use bevy::prelude::*;

pub const WINDOW_TITLE: &str = "Wardo";
pub const DEFAULT_WINDOW_SIZE: (f32, f32) = (1280.0, 832.0);

/// Creates a fully configured Bevy room-planner application.
///
/// This is the main entry point for Wardo. It resolves the room geometry
/// and catalog from CLI arguments and the user config file, then builds a
/// complete Bevy application with all plugins, resources, and systems.
pub fn create_app(cli_args: CliArgs) -> Result<App> {
    cli_args
        .validate()
        .map_err(|e| anyhow::anyhow!("CLI validation failed: {}", e))?;

    let config = ConfigFile::load();
    let room = cli_args
        .room_geometry(config.as_ref())
        .map_err(|e| anyhow::anyhow!("Invalid room geometry: {}", e))?;
    let catalog_path = cli_args
        .catalog
        .clone()
        .or_else(|| config.as_ref().and_then(|c| c.default_catalog.clone()));
    let catalog = Catalog::load(catalog_path.as_deref())?;

    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: WINDOW_TITLE.to_string(),
            resolution: DEFAULT_WINDOW_SIZE.into(),
            ..default()
        }),
        ..default()
    }));

    app.insert_resource(ClearColor(Color::srgb(0.13, 0.14, 0.16)))
        .insert_resource(WardoSettings::default())
        .insert_resource(DesignSession::new(room))
        .insert_resource(catalog)
        .insert_resource(cli_args);

    app.add_plugins((
        PointerPlugin,
        DragPlugin,
        SpawnPlugin,
        ScenePlugin,
        UnitRenderPlugin,
    ));

    Ok(app)
}
