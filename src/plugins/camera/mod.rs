//! Camera plugin (render-only).
//!
//! The whole field fits the window, so the camera never moves.

use bevy::prelude::*;

#[derive(Component)]
pub struct MainCamera;

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_camera);
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("MainCamera"),
        Camera2d,
        MainCamera,
        Transform::from_xyz(0.0, 0.0, 999.0),
    ));
}
