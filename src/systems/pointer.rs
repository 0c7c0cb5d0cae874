//! Ground-plane pointer tracking
//!
//! Projects the window cursor through the camera onto the floor plane
//! (y = 0) once per frame and publishes the result as a resource. Every
//! other input system reads `PointerInfo` instead of redoing the raycast.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

/// Where the pointer is, in world and screen space
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct PointerInfo {
    /// Cursor intersection with the floor plane, if the cursor is over the
    /// window and the ray hits the plane
    pub ground: Option<Vec3>,
    /// Raw cursor position in window coordinates
    pub screen: Option<Vec2>,
}

pub struct PointerPlugin;

impl Plugin for PointerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PointerInfo>()
            .add_systems(PreUpdate, update_pointer_info);
    }
}

fn update_pointer_info(
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform)>,
    mut pointer: ResMut<PointerInfo>,
) {
    pointer.ground = None;
    pointer.screen = None;

    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    pointer.screen = Some(cursor);

    let Ok((camera, camera_transform)) = cameras.single() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(camera_transform, cursor) else {
        return;
    };
    if let Some(distance) = ray.intersect_plane(Vec3::ZERO, InfinitePlane3d::new(Vec3::Y)) {
        let hit = ray.get_point(distance);
        pointer.ground = Some(Vec3::new(hit.x, 0.0, hit.z));
    }
}
