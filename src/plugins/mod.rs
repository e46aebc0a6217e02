//! Feature plugins.

use bevy::prelude::*;

pub mod core;
pub mod hud;
pub mod physics;
pub mod pickups;
pub mod player;
pub mod rules;
pub mod world;

// Render-only
pub mod camera;

/// Register gameplay plugins that work in headless tests.
///
/// Order matters: `core` inserts the `Tunables` that `physics` and `rules` read.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    physics::plugin(app);
    world::plugin(app);
    player::plugin(app);
    hud::plugin(app);
    rules::plugin(app);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    camera::plugin(app);
}
