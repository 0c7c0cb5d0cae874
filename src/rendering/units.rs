//! Placed-unit visuals
//!
//! One cuboid per placed unit, spawned and despawned to mirror the design
//! session and re-posed every frame from the unit's position and facing.
//! This is the only place a `Facing` becomes an angle.

use bevy::prelude::*;
use std::collections::HashSet;

use crate::catalog::PlacementClass;
use crate::core::state::{DesignSession, UnitId};

/// Marker linking a scene entity to its placed unit
#[derive(Component, Debug, Clone, Copy)]
pub struct UnitVisual {
    pub id: UnitId,
}

pub struct UnitRenderPlugin;

impl Plugin for UnitRenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, sync_unit_visuals);
    }
}

fn sync_unit_visuals(
    mut commands: Commands,
    design: Res<DesignSession>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut visuals: Query<(Entity, &UnitVisual, &mut Transform)>,
) {
    let mut seen: HashSet<UnitId> = HashSet::new();

    // Re-pose existing visuals, drop the ones whose unit is gone
    for (entity, visual, mut transform) in &mut visuals {
        match design.get(visual.id) {
            Some(unit) => {
                seen.insert(visual.id);
                let mut translation = unit.position;
                translation.y = unit.item.height_units() / 2.0;
                transform.translation = translation;
                transform.rotation = Quat::from_rotation_y(unit.facing.radians());
            }
            None => {
                commands.entity(entity).despawn();
            }
        }
    }

    // Spawn visuals for new units
    for unit in design.units() {
        if seen.contains(&unit.id) {
            continue;
        }
        let fp = unit.item.base_footprint();
        let mut translation = unit.position;
        translation.y = unit.item.height_units() / 2.0;
        commands.spawn((
            UnitVisual { id: unit.id },
            Mesh3d(meshes.add(Cuboid::new(fp.x, unit.item.height_units(), fp.z))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: class_color(unit.item.placement),
                perceptual_roughness: 0.7,
                ..default()
            })),
            Transform::from_translation(translation)
                .with_rotation(Quat::from_rotation_y(unit.facing.radians())),
        ));
    }
}

fn class_color(placement: PlacementClass) -> Color {
    match placement {
        PlacementClass::FreeStanding => Color::srgb(0.55, 0.62, 0.75),
        PlacementClass::WallAttached => Color::srgb(0.72, 0.56, 0.44),
        PlacementClass::CornerAttached => Color::srgb(0.52, 0.68, 0.54),
    }
}
