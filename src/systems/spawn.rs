//! Keyboard input for adding and removing units
//!
//! Number keys add the corresponding catalog item through the placement
//! search; Backspace removes the most recent unit; Shift+X clears the
//! design. A full room is reported, never forced.

use bevy::prelude::*;

use crate::catalog::Catalog;
use crate::core::settings::WardoSettings;
use crate::core::state::DesignSession;

pub struct SpawnPlugin;

impl Plugin for SpawnPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (handle_add_input, handle_remove_input));
    }
}

const ITEM_KEYS: [KeyCode; 4] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
];

fn handle_add_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    catalog: Res<Catalog>,
    mut design: ResMut<DesignSession>,
    settings: Res<WardoSettings>,
) {
    for (index, key) in ITEM_KEYS.iter().enumerate() {
        if !keyboard.just_pressed(*key) {
            continue;
        }
        let Some(item) = catalog.items().get(index) else {
            warn!("No catalog item bound to key {}", index + 1);
            continue;
        };
        // Added without a drop position: the placement search picks the slot
        if design.add_item(item, None, &settings.tuning).is_none() {
            warn!("No space available for {} ({})", item.name, item.item_number);
        }
    }
}

fn handle_remove_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut design: ResMut<DesignSession>,
) {
    if keyboard.just_pressed(KeyCode::Backspace) {
        design.remove_last();
    }
    let shift =
        keyboard.pressed(KeyCode::ShiftLeft) || keyboard.pressed(KeyCode::ShiftRight);
    if shift && keyboard.just_pressed(KeyCode::KeyX) {
        design.clear();
    }
}
