//! Rules plugin: hosts the [`GameplayController`] inside the ECS.
//!
//! ```text
//! OnEnter(Running): on_create -> apply_host_commands
//! FixedUpdate:      detect_ground -> drive_frame (InputSnapshot -> on_frame_update) -> apply_host_commands
//! PostUpdate:       route_collisions (post-step position, CollisionStart -> hooks) -> apply_host_commands -> enter_game_over
//! ```
//!
//! The controller never touches entities. It records primitives into the
//! `HostCommandQueue`, and `apply_host_commands` drains that queue, so each
//! command lands exactly once no matter how many schedules run the applier.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::{field::Field, state::GameState, tunables::Tunables};
use crate::controller::{
    GameplayController, GameplayHooks, HostCommand, HostCommandQueue, InputSnapshot,
};
use crate::plugins::hud::ScoreText;
use crate::plugins::pickups::{self, Collectible, Hazard};
use crate::plugins::player::{self, Grounded, Player, PlayerAnimation, PlayerInput};

/// Entity handles for the ids the controller speaks in.
///
/// Written once per spawn, read on every command that targets an id.
#[derive(Resource, Default, Debug)]
pub struct SceneEntities {
    pub player: Option<Entity>,
    /// Indexed by `CollectibleId`.
    pub stars: Vec<Entity>,
    /// Indexed by `HazardId`.
    pub hazards: Vec<Entity>,
}

pub fn plugin(app: &mut App) {
    let controller = GameplayController::new(app.world().resource::<Tunables>());

    app.insert_resource(controller)
        .init_resource::<HostCommandQueue>()
        .init_resource::<SceneEntities>()
        .add_systems(
            OnEnter(GameState::Running),
            (create_scene, apply_host_commands).chain(),
        )
        .add_systems(
            FixedUpdate,
            (player::detect_ground, drive_frame, apply_host_commands)
                .chain()
                .run_if(in_state(GameState::Running)),
        )
        .add_systems(
            PostUpdate,
            (route_collisions, apply_host_commands, enter_game_over)
                .chain()
                .run_if(in_state(GameState::Running)),
        );
}

fn create_scene(mut controller: ResMut<GameplayController>, mut queue: ResMut<HostCommandQueue>) {
    controller.on_create(&mut *queue);
}

pub fn drive_frame(
    tunables: Res<Tunables>,
    input: Res<PlayerInput>,
    mut controller: ResMut<GameplayController>,
    mut queue: ResMut<HostCommandQueue>,
    q_player: Query<(&Transform, &LinearVelocity, &Grounded), With<Player>>,
) {
    let Ok((tf, vel, grounded)) = q_player.single() else {
        return;
    };

    let field = Field::new(tunables.field_size);
    let snapshot = InputSnapshot {
        left: input.left,
        right: input.right,
        up: input.up,
        touching_down: grounded.0,
        player_position: field.from_world(tf.translation.truncate()),
        player_velocity: Field::velocity_from_world(vel.0),
    };

    if let Err(e) = controller.on_frame_update(&snapshot, &mut *queue) {
        debug!("frame update rejected: {e}");
    }
}

/// Colliders may be children of the body that owns them (star sensors are).
#[inline]
fn gameplay_owner(collider: Entity, body: Option<Entity>) -> Entity {
    body.unwrap_or(collider)
}

pub fn route_collisions(
    mut started: MessageReader<CollisionStart>,
    tunables: Res<Tunables>,
    mut controller: ResMut<GameplayController>,
    mut queue: ResMut<HostCommandQueue>,
    q_player: Query<&Transform, With<Player>>,
    q_stars: Query<&Collectible>,
    q_hazards: Query<&Hazard>,
) {
    if started.is_empty() {
        return;
    }

    // Physics has stepped since drive_frame; the hazard side depends on where
    // the player is now.
    if let Ok(tf) = q_player.single() {
        let field = Field::new(tunables.field_size);
        controller.track_player(field.from_world(tf.translation.truncate()));
    }

    for ev in started.read() {
        let a = gameplay_owner(ev.collider1, ev.body1);
        let b = gameplay_owner(ev.collider2, ev.body2);

        let other = if q_player.contains(a) {
            b
        } else if q_player.contains(b) {
            a
        } else {
            continue;
        };

        let result = if let Ok(star) = q_stars.get(other) {
            controller.on_collectible_overlap(star.id, &mut *queue).map(|_| ())
        } else if let Ok(hazard) = q_hazards.get(other) {
            controller.on_hazard_collision(hazard.0, &mut *queue)
        } else {
            continue;
        };

        if let Err(e) = result {
            debug!("collision ignored: {e}");
        }
    }
}

pub fn apply_host_commands(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut queue: ResMut<HostCommandQueue>,
    mut scene: ResMut<SceneEntities>,
    mut physics_time: Option<ResMut<Time<Physics>>>,
    mut q_player: Query<(&mut LinearVelocity, &mut PlayerAnimation, &mut Sprite), With<Player>>,
    q_stars: Query<&Collectible>,
    mut q_score: Query<&mut Text, With<ScoreText>>,
) {
    if queue.is_empty() {
        return;
    }

    let field = Field::new(tunables.field_size);

    for cmd in queue.drain() {
        match cmd {
            HostCommand::SpawnPlayer { at } => {
                let e = player::spawn_player(&mut commands, &tunables, field.to_world(at));
                scene.player = Some(e);
            }
            HostCommand::SpawnCollectible { id, at, bounce } => {
                let e = pickups::spawn_star(&mut commands, id, field.to_world(at), bounce);
                debug_assert_eq!(scene.stars.len(), id.0);
                scene.stars.push(e);
            }
            HostCommand::SpawnHazard { id, at, velocity } => {
                let e = pickups::spawn_bomb(
                    &mut commands,
                    id,
                    field.to_world(at),
                    Field::velocity_to_world(velocity),
                );
                scene.hazards.push(e);
            }
            HostCommand::DisableCollectible(id) => {
                let Some((star, collectible)) = star_entity(&scene, &q_stars, id.0) else {
                    debug!("disable: no star entity for {id:?}");
                    continue;
                };
                pickups::disable_star(&mut commands, star, &collectible);
            }
            HostCommand::EnableCollectible { id, at } => {
                let Some((star, collectible)) = star_entity(&scene, &q_stars, id.0) else {
                    debug!("enable: no star entity for {id:?}");
                    continue;
                };
                pickups::enable_star(&mut commands, star, &collectible, field.to_world(at));
            }
            HostCommand::SetPlayerVelocityX(vx) => {
                if let Ok((mut vel, _, _)) = q_player.single_mut() {
                    vel.x = vx;
                }
            }
            HostCommand::SetPlayerVelocityY(vy) => {
                if let Ok((mut vel, _, _)) = q_player.single_mut() {
                    vel.y = -vy;
                }
            }
            HostCommand::PlayAnimation(anim) => {
                if let Ok((_, mut animation, _)) = q_player.single_mut() {
                    animation.play(anim);
                }
            }
            HostCommand::SetPlayerTint(tint) => {
                if let Ok((_, _, mut sprite)) = q_player.single_mut() {
                    sprite.color = tint;
                }
            }
            HostCommand::SetScoreText(text) => {
                for mut score in &mut q_score {
                    score.0.clone_from(&text);
                }
            }
            HostCommand::PausePhysics => {
                if let Some(time) = physics_time.as_mut() {
                    time.pause();
                }
            }
        }
    }
}

fn star_entity(
    scene: &SceneEntities,
    q_stars: &Query<&Collectible>,
    index: usize,
) -> Option<(Entity, Collectible)> {
    let star = *scene.stars.get(index)?;
    q_stars.get(star).ok().map(|c| (star, *c))
}

fn enter_game_over(controller: Res<GameplayController>, mut next: ResMut<NextState<GameState>>) {
    if controller.is_game_over() {
        info!("entering GameOver");
        next.set(GameState::GameOver);
    }
}

#[cfg(test)]
mod tests;
