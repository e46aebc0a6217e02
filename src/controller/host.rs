//! The boundary between gameplay rules and the engine hosting them.
//!
//! ```text
//! host  --InputSnapshot / overlap / collision-->  GameplayHooks (controller)
//! host  <--------- HostEngine primitives ---------  controller
//! ```
//!
//! `HostCommandQueue` records primitives as `HostCommand`s so an ECS system can
//! apply them later, outside the controller borrow.

use bevy::prelude::*;

use super::error::GameplayError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollectibleId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HazardId(pub usize);

/// Player animation clips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlayerAnim {
    Left,
    Right,
    /// Facing the camera; the idle pose.
    #[default]
    Turn,
}

impl PlayerAnim {
    pub fn key(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Turn => "turn",
        }
    }
}

/// Per-frame input, as sampled by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    /// The player's body rests on something below it.
    pub touching_down: bool,
    pub player_position: Vec2,
    pub player_velocity: Vec2,
}

/// Entity primitives the rules need from the engine.
pub trait HostEngine {
    fn spawn_player(&mut self, at: Vec2);
    fn spawn_collectible(&mut self, id: CollectibleId, at: Vec2, bounce: f32);
    fn spawn_hazard(&mut self, id: HazardId, at: Vec2, velocity: Vec2);
    /// Remove from simulation and hide.
    fn disable_collectible(&mut self, id: CollectibleId);
    /// Reset to `at`, back into simulation, visible.
    fn enable_collectible(&mut self, id: CollectibleId, at: Vec2);
    fn set_player_velocity_x(&mut self, vx: f32);
    fn set_player_velocity_y(&mut self, vy: f32);
    /// Playing the clip that is already playing is a no-op on the host side.
    fn play_animation(&mut self, anim: PlayerAnim);
    fn set_player_tint(&mut self, tint: Color);
    fn set_score_text(&mut self, text: &str);
    fn pause_physics(&mut self);
}

/// Callbacks the host invokes.
pub trait GameplayHooks {
    /// One-time scene setup.
    fn on_create(&mut self, host: &mut dyn HostEngine);

    fn on_frame_update(
        &mut self,
        input: &InputSnapshot,
        host: &mut dyn HostEngine,
    ) -> Result<(), GameplayError>;

    fn on_collectible_overlap(
        &mut self,
        id: CollectibleId,
        host: &mut dyn HostEngine,
    ) -> Result<Collected, GameplayError>;

    fn on_hazard_collision(
        &mut self,
        id: HazardId,
        host: &mut dyn HostEngine,
    ) -> Result<(), GameplayError>;
}

/// Result of a successful collection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collected {
    pub score: u32,
    /// Set when this collection emptied the set and released a hazard.
    pub released: Option<HazardId>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HostCommand {
    SpawnPlayer { at: Vec2 },
    SpawnCollectible { id: CollectibleId, at: Vec2, bounce: f32 },
    SpawnHazard { id: HazardId, at: Vec2, velocity: Vec2 },
    DisableCollectible(CollectibleId),
    EnableCollectible { id: CollectibleId, at: Vec2 },
    SetPlayerVelocityX(f32),
    SetPlayerVelocityY(f32),
    PlayAnimation(PlayerAnim),
    SetPlayerTint(Color),
    SetScoreText(String),
    PausePhysics,
}

/// Recording host: buffers commands until drained.
#[derive(Resource, Debug, Default)]
pub struct HostCommandQueue {
    commands: Vec<HostCommand>,
}

impl HostCommandQueue {
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn as_slice(&self) -> &[HostCommand] {
        &self.commands
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, HostCommand> {
        self.commands.drain(..)
    }

    #[inline]
    fn push(&mut self, cmd: HostCommand) {
        self.commands.push(cmd);
    }
}

impl HostEngine for HostCommandQueue {
    fn spawn_player(&mut self, at: Vec2) {
        self.push(HostCommand::SpawnPlayer { at });
    }

    fn spawn_collectible(&mut self, id: CollectibleId, at: Vec2, bounce: f32) {
        self.push(HostCommand::SpawnCollectible { id, at, bounce });
    }

    fn spawn_hazard(&mut self, id: HazardId, at: Vec2, velocity: Vec2) {
        self.push(HostCommand::SpawnHazard { id, at, velocity });
    }

    fn disable_collectible(&mut self, id: CollectibleId) {
        self.push(HostCommand::DisableCollectible(id));
    }

    fn enable_collectible(&mut self, id: CollectibleId, at: Vec2) {
        self.push(HostCommand::EnableCollectible { id, at });
    }

    fn set_player_velocity_x(&mut self, vx: f32) {
        self.push(HostCommand::SetPlayerVelocityX(vx));
    }

    fn set_player_velocity_y(&mut self, vy: f32) {
        self.push(HostCommand::SetPlayerVelocityY(vy));
    }

    fn play_animation(&mut self, anim: PlayerAnim) {
        self.push(HostCommand::PlayAnimation(anim));
    }

    fn set_player_tint(&mut self, tint: Color) {
        self.push(HostCommand::SetPlayerTint(tint));
    }

    fn set_score_text(&mut self, text: &str) {
        self.push(HostCommand::SetScoreText(text.to_owned()));
    }

    fn pause_physics(&mut self) {
        self.push(HostCommand::PausePhysics);
    }
}
