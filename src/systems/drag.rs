//! Unit drag handling
//!
//! Pointer-down picks the unit under the cursor and opens a
//! [`DragSession`]; every pointer-move feeds the ground-plane target
//! through the session and applies the constrained outcome to the design
//! session; pointer-up finalizes with the session's release snap. Escape
//! aborts the drag and puts the unit back where it started.

use bevy::prelude::*;

use crate::core::settings::WardoSettings;
use crate::core::state::{DesignSession, UnitId};
use crate::geometry::BoundingBox;
use crate::placement::{unit_bounds, DragSession};
use crate::systems::pointer::PointerInfo;

/// The drag in progress, if any
#[derive(Resource, Debug, Default)]
pub struct ActiveDrag {
    pub session: Option<DragSession>,
    /// Last constrained position handed back by the engine
    pub last_position: Option<Vec3>,
}

pub struct DragPlugin;

impl Plugin for DragPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActiveDrag>().add_systems(
            Update,
            (begin_drag, update_drag, end_drag, cancel_drag).chain(),
        );
    }
}

fn begin_drag(
    buttons: Res<ButtonInput<MouseButton>>,
    pointer: Res<PointerInfo>,
    design: Res<DesignSession>,
    mut active: ResMut<ActiveDrag>,
) {
    if !buttons.just_pressed(MouseButton::Left) || active.session.is_some() {
        return;
    }
    let Some(ground) = pointer.ground else {
        return;
    };
    let Some(id) = pick_unit(ground, &design) else {
        return;
    };
    if let Some(unit) = design.get(id) {
        debug!("Drag started on unit {:?} ({})", id, unit.item.name);
        active.session = Some(DragSession::begin(unit, &design.room));
        active.last_position = Some(unit.position);
    }
}

fn update_drag(
    pointer: Res<PointerInfo>,
    mut design: ResMut<DesignSession>,
    mut active: ResMut<ActiveDrag>,
    settings: Res<WardoSettings>,
) {
    let Some(session) = active.session.as_mut() else {
        return;
    };
    let Some(target) = pointer.ground else {
        return;
    };
    let room = design.room;
    let Some(outcome) = session.update(target, design.units(), &room, &settings.tuning) else {
        // Unit vanished mid-drag, drop the session
        active.session = None;
        return;
    };
    let id = session.unit_id;
    design.apply(id, outcome.position, outcome.facing);
    active.last_position = Some(outcome.position);
}

fn end_drag(
    buttons: Res<ButtonInput<MouseButton>>,
    mut design: ResMut<DesignSession>,
    mut active: ResMut<ActiveDrag>,
    settings: Res<WardoSettings>,
) {
    if !buttons.just_released(MouseButton::Left) {
        return;
    }
    let Some(mut session) = active.session.take() else {
        return;
    };
    let last = active
        .last_position
        .take()
        .unwrap_or_else(|| design.get(session.unit_id).map(|u| u.position).unwrap_or(Vec3::ZERO));
    let room = design.room;
    if let Some(outcome) = session.release(last, design.units(), &room, &settings.tuning) {
        debug!(
            "Drag released, unit {:?} rests at ({:.2}, {:.2})",
            session.unit_id, outcome.position.x, outcome.position.z
        );
        design.apply(session.unit_id, outcome.position, outcome.facing);
    }
}

fn cancel_drag(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut design: ResMut<DesignSession>,
    mut active: ResMut<ActiveDrag>,
) {
    if !keyboard.just_pressed(KeyCode::Escape) {
        return;
    }
    if let Some(mut session) = active.session.take() {
        let outcome = session.cancel();
        design.apply(session.unit_id, outcome.position, outcome.facing);
        active.last_position = None;
        info!("Drag cancelled, unit {:?} restored", session.unit_id);
    }
}

/// Topmost unit whose footprint contains the ground point
///
/// On overlap during a drag preview the nearest center wins, which matches
/// what the cursor visually grabs.
fn pick_unit(ground: Vec3, design: &DesignSession) -> Option<UnitId> {
    design
        .units()
        .iter()
        .filter(|u| contains(&unit_bounds(u), ground))
        .min_by(|a, b| {
            a.position
                .distance_squared(ground)
                .total_cmp(&b.position.distance_squared(ground))
        })
        .map(|u| u.id)
}

fn contains(bounds: &BoundingBox, point: Vec3) -> bool {
    point.x >= bounds.min_x
        && point.x <= bounds.max_x
        && point.z >= bounds.min_z
        && point.z <= bounds.max_z
}
