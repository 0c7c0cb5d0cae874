//! Room shell, camera and lighting
//!
//! Spawned once at startup from the session's room geometry: a floor slab,
//! four wall slabs, a camera looking into the room, and a key light.

use bevy::prelude::*;

use crate::core::state::DesignSession;
use crate::geometry::{Axis, Wall};

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_scene);
    }
}

fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    design: Res<DesignSession>,
) {
    let room = design.room;

    // Camera: above the front edge, looking down into the room
    let eye = Vec3::new(0.0, room.width.max(room.depth) * 1.1, room.depth * 1.2);
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(eye).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 9_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(3.0, 6.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 180.0,
        ..default()
    });

    // Floor
    let floor_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.82, 0.78, 0.72),
        perceptual_roughness: 0.9,
        ..default()
    });
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(room.width, 0.05, room.depth))),
        MeshMaterial3d(floor_material),
        Transform::from_xyz(0.0, -0.025, 0.0),
    ));

    // Walls, sitting just outside the room bounds
    let wall_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.92, 0.91, 0.88),
        perceptual_roughness: 1.0,
        ..default()
    });
    for wall in Wall::ALL {
        let (size, mut position) = match wall.axis() {
            Axis::X => (
                Vec3::new(room.wall_thickness, room.height, room.depth),
                Vec3::ZERO,
            ),
            Axis::Z => (
                Vec3::new(room.width + 2.0 * room.wall_thickness, room.height, room.wall_thickness),
                Vec3::ZERO,
            ),
        };
        wall.axis().set(
            &mut position,
            wall.plane(&room) + wall.sign() * room.wall_thickness / 2.0,
        );
        position.y = room.height / 2.0;
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
            MeshMaterial3d(wall_material.clone()),
            Transform::from_translation(position),
        ));
    }
}
