//! Core plugin: shared resources and global settings.

use crate::common::tunables::Tunables;
use bevy::prelude::*;

/// Daylight sky behind the platforms.
pub const SKY: Color = Color::srgb(0.45, 0.72, 0.95);

pub fn plugin(app: &mut App) {
    if !app.world().contains_resource::<Tunables>() {
        app.insert_resource(Tunables::default());
    }
    app.insert_resource(ClearColor(SKY));
}
