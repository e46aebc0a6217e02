//! Player plugin.
//!
//! Pipeline:
//! - Update: sample arrow keys, write `PlayerInput`; advance the animation clip
//! - FixedUpdate (rules plugin): `detect_ground` refreshes `Grounded` from the
//!   feet shape cast, then input + ground contact go to the controller
//!
//! The body is spawned by the rules plugin when the controller asks for it
//! (see [`spawn_player`]).

use std::time::Duration;

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::{layers::Layer, tunables::Tunables};
use crate::controller::PlayerAnim;

/// Shape-cast reach below the feet that still counts as standing.
pub const GROUND_REACH: f32 = 2.0;

#[derive(Component)]
pub struct Player;

/// Whether the feet shape cast hit world geometry on the last fixed step.
#[derive(Component, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grounded(pub bool);

#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
}

/// Frame range and timing of one clip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clip {
    pub first: usize,
    pub last: usize,
    pub fps: f32,
    pub looping: bool,
}

impl Clip {
    pub fn of(anim: PlayerAnim) -> Self {
        match anim {
            PlayerAnim::Left => Self { first: 0, last: 3, fps: 10.0, looping: true },
            PlayerAnim::Turn => Self { first: 4, last: 4, fps: 20.0, looping: false },
            PlayerAnim::Right => Self { first: 5, last: 8, fps: 10.0, looping: true },
        }
    }

    pub fn frame_time(&self) -> Duration {
        Duration::from_millis((1000.0 / self.fps).round() as u64)
    }
}

#[derive(Component, Debug, Clone)]
pub struct PlayerAnimation {
    pub anim: PlayerAnim,
    pub frame: usize,
    timer: Timer,
}

impl PlayerAnimation {
    pub fn new(anim: PlayerAnim) -> Self {
        let clip = Clip::of(anim);
        Self {
            anim,
            frame: clip.first,
            timer: Timer::new(clip.frame_time(), TimerMode::Repeating),
        }
    }

    /// Switch clips. Re-playing the current clip keeps its progress.
    pub fn play(&mut self, anim: PlayerAnim) {
        if self.anim != anim {
            *self = Self::new(anim);
        }
    }

    pub fn advance(&mut self, dt: Duration) {
        let clip = Clip::of(self.anim);
        self.timer.tick(dt);
        for _ in 0..self.timer.times_finished_this_tick() {
            self.frame = if self.frame < clip.last {
                self.frame + 1
            } else if clip.looping {
                clip.first
            } else {
                clip.last
            };
        }
    }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<ButtonInput<KeyCode>>()
        .insert_resource(PlayerInput::default())
        .add_systems(Update, (gather_input, animate_player));
}

/// Spawn the player body at a world position.
pub fn spawn_player(commands: &mut Commands, tunables: &Tunables, world_pos: Vec2) -> Entity {
    let size = tunables.player_size;
    let layers = CollisionLayers::new(
        Layer::Player,
        [Layer::World, Layer::Hazard, Layer::Pickup],
    );

    let feet = ShapeCaster::new(
        Collider::rectangle(size.x - 4.0, 2.0),
        Vec2::new(0.0, -size.y * 0.5),
        0.0,
        Dir2::NEG_Y,
    )
    .with_max_distance(GROUND_REACH)
    .with_query_filter(SpatialQueryFilter::from_mask(Layer::World));

    commands
        .spawn((
            Name::new("Player"),
            Player,
            PlayerAnimation::new(PlayerAnim::Turn),
            Sprite {
                color: Color::srgb(0.55, 0.3, 0.75),
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(world_pos.extend(1.0)),
            RigidBody::Dynamic,
            Collider::rectangle(size.x, size.y),
            LockedAxes::ROTATION_LOCKED,
            Restitution::new(tunables.player_bounce),
            layers,
            feet,
            Grounded::default(),
            LinearVelocity::ZERO,
            // Opt-in collision events: star pickups and bombs report against the player.
            CollisionEventsEnabled,
        ))
        .id()
}

fn gather_input(keys: Res<ButtonInput<KeyCode>>, mut input: ResMut<PlayerInput>) {
    *input = PlayerInput {
        left: keys.pressed(KeyCode::ArrowLeft),
        right: keys.pressed(KeyCode::ArrowRight),
        up: keys.pressed(KeyCode::ArrowUp),
    };
}

/// A player without `ShapeHits` yet (first step after spawn) is airborne.
pub fn detect_ground(mut q: Query<(&mut Grounded, Option<&ShapeHits>), With<Player>>) {
    for (mut grounded, hits) in &mut q {
        grounded.set_if_neq(Grounded(hits.is_some_and(|hits| !hits.is_empty())));
    }
}

fn animate_player(time: Res<Time>, mut q: Query<(&mut PlayerAnimation, &mut Sprite), With<Player>>) {
    let Ok((mut anim, mut sprite)) = q.single_mut() else {
        return;
    };
    anim.advance(time.delta());
    sprite.flip_x = anim.anim == PlayerAnim::Left;
}
