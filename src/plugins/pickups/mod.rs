//! Stars and bombs.
//!
//! A star is two colliders:
//! - the body (layer `Star`) rests on platforms and ignores the player
//! - a child sensor (layer `Pickup`) reports overlap with the player
//!
//! Collecting a star never despawns it. The body is taken out of the
//! simulation and hidden, then restored in place on replenishment.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::Layer;
use crate::controller::{CollectibleId, HazardId};

pub const STAR_SIZE: Vec2 = Vec2::new(24.0, 22.0);
pub const BOMB_RADIUS: f32 = 7.0;

#[derive(Component, Debug, Clone, Copy)]
pub struct Collectible {
    pub id: CollectibleId,
    pub sensor: Entity,
}

/// Marker for the star's overlap sensor.
#[derive(Component, Debug, Clone, Copy)]
pub struct StarSensor;

#[derive(Component, Debug, Clone, Copy)]
pub struct Hazard(pub HazardId);

pub fn spawn_star(commands: &mut Commands, id: CollectibleId, world_pos: Vec2, bounce: f32) -> Entity {
    let star = commands.spawn_empty().id();

    let sensor = commands
        .spawn((
            Name::new(format!("StarSensor{}", id.0)),
            StarSensor,
            Transform::default(),
            Collider::circle(STAR_SIZE.y * 0.5),
            Sensor,
            CollisionLayers::new(Layer::Pickup, [Layer::Player]),
            ChildOf(star),
        ))
        .id();

    commands.entity(star).insert((
        Name::new(format!("Star{}", id.0)),
        Collectible { id, sensor },
        Sprite::from_color(Color::srgb(1.0, 0.85, 0.2), STAR_SIZE),
        Transform::from_translation(world_pos.extend(0.5)),
        RigidBody::Dynamic,
        Collider::rectangle(STAR_SIZE.x, STAR_SIZE.y),
        CollisionLayers::new(Layer::Star, [Layer::World]),
        Restitution::new(bounce).with_combine_rule(CoefficientCombine::Max),
        LockedAxes::ROTATION_LOCKED,
        LinearVelocity::ZERO,
    ));

    star
}

pub fn spawn_bomb(commands: &mut Commands, id: HazardId, world_pos: Vec2, world_vel: Vec2) -> Entity {
    commands
        .spawn((
            Name::new(format!("Bomb{}", id.0)),
            Hazard(id),
            Sprite::from_color(Color::srgb(0.15, 0.15, 0.15), Vec2::splat(BOMB_RADIUS * 2.0)),
            Transform::from_translation(world_pos.extend(0.6)),
            RigidBody::Dynamic,
            Collider::circle(BOMB_RADIUS),
            CollisionLayers::new(Layer::Hazard, [Layer::World, Layer::Player]),
            // Full bounce off everything, forever.
            Restitution::new(1.0).with_combine_rule(CoefficientCombine::Max),
            Friction::ZERO.with_combine_rule(CoefficientCombine::Min),
            LinearVelocity(world_vel),
        ))
        .id()
}

/// Take a star out of play: no simulation, no overlaps, not drawn.
pub fn disable_star(commands: &mut Commands, star: Entity, collectible: &Collectible) {
    commands
        .entity(star)
        .insert((RigidBodyDisabled, ColliderDisabled, Visibility::Hidden));
    commands.entity(collectible.sensor).insert(ColliderDisabled);
}

/// Put a star back at `world_pos`, at rest.
pub fn enable_star(commands: &mut Commands, star: Entity, collectible: &Collectible, world_pos: Vec2) {
    commands
        .entity(star)
        .remove::<(RigidBodyDisabled, ColliderDisabled)>()
        .insert((
            Transform::from_translation(world_pos.extend(0.5)),
            LinearVelocity::ZERO,
            Visibility::Inherited,
        ));
    commands.entity(collectible.sensor).remove::<ColliderDisabled>();
}
