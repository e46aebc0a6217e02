//! World plugin: spawns the platforms and the field bounds.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::{field::Field, layers::Layer, state::GameState, tunables::Tunables};

/// Static platforms in field coordinates: (centre, size).
pub const PLATFORMS: [(Vec2, Vec2); 4] = [
    (Vec2::new(400.0, 568.0), Vec2::new(800.0, 64.0)),
    (Vec2::new(600.0, 400.0), Vec2::new(400.0, 32.0)),
    (Vec2::new(50.0, 250.0), Vec2::new(400.0, 32.0)),
    (Vec2::new(750.0, 220.0), Vec2::new(400.0, 32.0)),
];

const BOUND_THICKNESS: f32 = 30.0;

#[derive(Component)]
pub struct Platform;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::Running), (spawn_platforms, spawn_bounds));
}

fn world_layers() -> CollisionLayers {
    CollisionLayers::new(
        Layer::World,
        [Layer::Player, Layer::Star, Layer::Hazard],
    )
}

fn spawn_platforms(mut commands: Commands, tunables: Res<Tunables>) {
    let field = Field::new(tunables.field_size);
    let color = Color::srgb(0.35, 0.6, 0.25);

    for (i, (centre, size)) in PLATFORMS.iter().enumerate() {
        commands.spawn((
            Name::new(format!("Platform{i}")),
            Platform,
            Sprite::from_color(color, *size),
            Transform::from_translation(field.to_world(*centre).extend(0.0)),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            world_layers(),
        ));
    }
}

/// Invisible walls so nothing leaves the field.
fn spawn_bounds(mut commands: Commands, tunables: Res<Tunables>) {
    let half = Field::new(tunables.field_size).half();
    let t = BOUND_THICKNESS;

    let mut spawn_bound = |name: &str, pos: Vec2, size: Vec2| {
        commands.spawn((
            Name::new(name.to_owned()),
            Transform::from_translation(pos.extend(0.0)),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            world_layers(),
        ));
    };

    let wide = Vec2::new(half.x * 2.0 + t * 2.0, t);
    let tall = Vec2::new(t, half.y * 2.0);
    spawn_bound("BoundTop", Vec2::new(0.0, half.y + t * 0.5), wide);
    spawn_bound("BoundBottom", Vec2::new(0.0, -half.y - t * 0.5), wide);
    spawn_bound("BoundLeft", Vec2::new(-half.x - t * 0.5, 0.0), tall);
    spawn_bound("BoundRight", Vec2::new(half.x + t * 0.5, 0.0), tall);
}
