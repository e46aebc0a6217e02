use bevy::ecs::message::Messages;
use bevy::prelude::*;
use avian2d::prelude::*;

use super::{apply_host_commands, drive_frame, route_collisions, SceneEntities};
use crate::common::test_utils::{run_system_once, seeded_tunables};
use crate::controller::{
    CollectibleId, GameplayController, GameplayHooks, HazardId, HostCommandQueue, HostEngine,
    PlayerAnim, GAME_OVER_TINT,
};
use crate::plugins::hud::ScoreText;
use crate::plugins::pickups::{Collectible, Hazard};
use crate::plugins::player::{self, Grounded, Player, PlayerAnimation, PlayerInput};

/// A world with the scene created through the controller.
fn created_world() -> World {
    let mut world = World::new();
    let tunables = seeded_tunables();
    let mut controller = GameplayController::new(&tunables);
    let mut queue = HostCommandQueue::default();
    controller.on_create(&mut queue);

    world.insert_resource(tunables);
    world.insert_resource(controller);
    world.insert_resource(queue);
    world.init_resource::<SceneEntities>();
    world.spawn((ScoreText, Text::new("Score: 0")));

    run_system_once(&mut world, apply_host_commands);
    world
}

fn with_queue(world: &mut World, f: impl FnOnce(&mut HostCommandQueue)) {
    f(&mut world.resource_mut::<HostCommandQueue>());
}

fn player_entity(world: &mut World) -> Entity {
    world.query_filtered::<Entity, With<Player>>().single(world).unwrap()
}

/// One fixed step of the bridge: ground check, frame update, apply.
fn fixed_step(world: &mut World) {
    run_system_once(world, player::detect_ground);
    run_system_once(world, drive_frame);
    run_system_once(world, apply_host_commands);
}

/// Like `fixed_step`, with the ground flag forced instead of detected.
fn fixed_step_grounded(world: &mut World, grounded: bool) {
    let player = player_entity(world);
    world.entity_mut(player).insert(Grounded(grounded));
    run_system_once(world, drive_frame);
    run_system_once(world, apply_host_commands);
}

fn set_player_world_x(world: &mut World, x: f32) {
    let player = player_entity(world);
    world.get_mut::<Transform>(player).unwrap().translation.x = x;
}

#[test]
fn create_spawns_player_and_twelve_stars() {
    let mut world = created_world();

    assert!(world.resource::<HostCommandQueue>().is_empty());
    let players = world.query::<&Player>().iter(&world).count();
    let stars = world.query::<&Collectible>().iter(&world).count();
    assert_eq!(players, 1);
    assert_eq!(stars, 12);

    let scene = world.resource::<SceneEntities>();
    assert!(scene.player.is_some());
    assert_eq!(scene.stars.len(), 12);
}

#[test]
fn player_lands_at_field_spawn_point() {
    let mut world = created_world();
    let player = player_entity(&mut world);
    // Field (100, 450) on an 800x600 field.
    assert_eq!(
        world.get::<Transform>(player).unwrap().translation.truncate(),
        Vec2::new(-300.0, -150.0)
    );
}

#[test]
fn velocity_commands_flip_vertical_axis() {
    let mut world = created_world();
    with_queue(&mut world, |q| {
        q.set_player_velocity_x(-160.0);
        q.set_player_velocity_y(-330.0);
    });
    run_system_once(&mut world, apply_host_commands);

    let player = player_entity(&mut world);
    assert_eq!(world.get::<LinearVelocity>(player).unwrap().0, Vec2::new(-160.0, 330.0));
}

#[test]
fn tint_and_animation_reach_the_player() {
    let mut world = created_world();
    with_queue(&mut world, |q| {
        q.play_animation(PlayerAnim::Left);
        q.set_player_tint(GAME_OVER_TINT);
    });
    run_system_once(&mut world, apply_host_commands);

    let player = player_entity(&mut world);
    assert_eq!(world.get::<PlayerAnimation>(player).unwrap().anim, PlayerAnim::Left);
    assert_eq!(world.get::<Sprite>(player).unwrap().color, GAME_OVER_TINT);
}

#[test]
fn score_text_is_rewritten() {
    let mut world = created_world();
    with_queue(&mut world, |q| q.set_score_text("Score: 30"));
    run_system_once(&mut world, apply_host_commands);

    let text = world.query_filtered::<&Text, With<ScoreText>>().single(&world).unwrap();
    assert_eq!(text.0, "Score: 30");
}

#[test]
fn disabling_hides_the_right_star() {
    let mut world = created_world();
    with_queue(&mut world, |q| q.disable_collectible(CollectibleId(4)));
    run_system_once(&mut world, apply_host_commands);

    let star = world.resource::<SceneEntities>().stars[4];
    assert_eq!(world.get::<Visibility>(star), Some(&Visibility::Hidden));
    let hidden = world
        .query::<(&Collectible, &Visibility)>()
        .iter(&world)
        .filter(|(_, v)| **v == Visibility::Hidden)
        .count();
    assert_eq!(hidden, 1);
}

#[test]
fn clearing_the_set_spawns_a_bomb_through_the_queue() {
    let mut world = created_world();

    world.resource_scope(|world, mut controller: Mut<GameplayController>| {
        let mut queue = world.resource_mut::<HostCommandQueue>();
        for i in 0..12 {
            controller.on_collectible_overlap(CollectibleId(i), &mut *queue).unwrap();
        }
    });
    run_system_once(&mut world, apply_host_commands);

    let bombs: Vec<HazardId> = world.query::<&Hazard>().iter(&world).map(|h| h.0).collect();
    assert_eq!(bombs, vec![HazardId(0)]);
    assert_eq!(world.resource::<SceneEntities>().hazards.len(), 1);

    let hidden = world
        .query::<(&Collectible, &Visibility)>()
        .iter(&world)
        .filter(|(_, v)| **v == Visibility::Hidden)
        .count();
    assert_eq!(hidden, 0);

    let text = world.query_filtered::<&Text, With<ScoreText>>().single(&world).unwrap();
    assert_eq!(text.0, "Score: 120");
}

#[test]
fn missing_entities_are_skipped() {
    let mut world = World::new();
    world.insert_resource(seeded_tunables());
    world.init_resource::<SceneEntities>();
    world.insert_resource(HostCommandQueue::default());
    with_queue(&mut world, |q| {
        q.disable_collectible(CollectibleId(0));
        q.set_player_velocity_x(160.0);
    });

    run_system_once(&mut world, apply_host_commands);
    assert!(world.resource::<HostCommandQueue>().is_empty());
}

#[test]
fn airborne_jump_leaves_vertical_velocity_alone() {
    let mut world = created_world();
    world.insert_resource(PlayerInput { up: true, ..default() });
    let player = player_entity(&mut world);
    world.entity_mut(player).insert(LinearVelocity(Vec2::new(0.0, -50.0)));

    fixed_step_grounded(&mut world, false);

    assert_eq!(world.get::<LinearVelocity>(player).unwrap().y, -50.0);
}

#[test]
fn grounded_jump_launches_upward() {
    let mut world = created_world();
    world.insert_resource(PlayerInput { up: true, ..default() });
    let player = player_entity(&mut world);
    world.entity_mut(player).insert(LinearVelocity(Vec2::new(0.0, -50.0)));

    fixed_step_grounded(&mut world, true);

    assert_eq!(world.get::<LinearVelocity>(player).unwrap().0, Vec2::new(0.0, 330.0));
}

#[test]
fn stale_ground_flag_is_cleared_before_the_frame_update() {
    let mut world = created_world();
    world.insert_resource(PlayerInput { up: true, ..default() });
    let player = player_entity(&mut world);
    world.entity_mut(player).insert((Grounded(true), LinearVelocity(Vec2::new(0.0, -50.0))));

    // No shape cast has run, so there are no hits under the feet.
    fixed_step(&mut world);

    assert_eq!(world.get::<Grounded>(player), Some(&Grounded(false)));
    assert_eq!(world.get::<LinearVelocity>(player).unwrap().y, -50.0);
}

#[test]
fn bomb_side_uses_the_post_step_player_position() {
    let mut world = created_world();
    world.insert_resource(PlayerInput::default());
    world.init_resource::<Messages<CollisionStart>>();

    // Frame update sees field x = 399, then physics carries the player to 401.
    set_player_world_x(&mut world, -1.0);
    fixed_step(&mut world);
    assert_eq!(world.resource::<GameplayController>().player().position.x, 399.0);
    set_player_world_x(&mut world, 1.0);

    let player = player_entity(&mut world);
    let stars = world.resource::<SceneEntities>().stars.clone();
    for star in stars {
        let sensor = world.get::<Collectible>(star).unwrap().sensor;
        world.write_message(CollisionStart {
            collider1: sensor,
            collider2: player,
            body1: Some(star),
            body2: Some(player),
        });
    }
    run_system_once(&mut world, route_collisions);
    run_system_once(&mut world, apply_host_commands);

    let controller = world.resource::<GameplayController>();
    assert_eq!(controller.score(), 120);
    assert_eq!(controller.player().position.x, 401.0);
    assert!((0.0..=400.0).contains(&controller.hazards()[0].spawn.x));
}
