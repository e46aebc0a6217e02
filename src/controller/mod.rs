//! Gameplay controller: the rule set of the platformer.
//!
//! Engine-neutral. The controller owns score, player status and the spawn
//! policy for stars and bombs; everything physical is asked of the host
//! through [`HostEngine`].
//!
//! ```text
//! Running --on_hazard_collision--> GameOver (terminal)
//! ```
//!
//! In `GameOver` every hook is rejected with [`GameplayError::GameOver`].

use bevy::prelude::*;

use crate::common::tunables::Tunables;

pub mod error;
pub mod host;
pub mod rng;

pub use error::GameplayError;
pub use host::{
    Collected, CollectibleId, GameplayHooks, HazardId, HostCommand, HostCommandQueue, HostEngine,
    InputSnapshot, PlayerAnim,
};
pub use rng::GameRng;

/// Tint applied to the player on game over.
pub const GAME_OVER_TINT: Color = Color::srgb(1.0, 0.0, 0.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Running,
    GameOver,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    pub position: Vec2,
    pub velocity: Vec2,
    pub alive: bool,
    pub anim: PlayerAnim,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    /// Where the star is (re)placed on spawn and on replenishment.
    pub home: Vec2,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Hazard {
    pub spawn: Vec2,
    pub velocity: Vec2,
}

/// Numbers the rules need, lifted out of [`Tunables`].
#[derive(Debug, Clone)]
struct Rules {
    player_spawn: Vec2,
    player_speed: f32,
    jump_speed: f32,
    star_score: u32,
    star_bounce: (f32, f32),
    field_width: f32,
    field_midpoint: f32,
    hazard_spawn_y: f32,
    hazard_drop_speed: f32,
    hazard_max_horizontal_speed: i32,
}

#[derive(Resource, Debug, Clone)]
pub struct GameplayController {
    rules: Rules,
    phase: Phase,
    score: u32,
    player: PlayerState,
    stars: Vec<Star>,
    hazards: Vec<Hazard>,
    rng: GameRng,
}

impl GameplayController {
    pub fn new(tunables: &Tunables) -> Self {
        let rules = Rules {
            player_spawn: tunables.player_spawn,
            player_speed: tunables.player_speed,
            jump_speed: tunables.jump_speed,
            star_score: tunables.star_score,
            star_bounce: tunables.star_bounce,
            field_width: tunables.field_size.x,
            field_midpoint: tunables.field_midpoint(),
            hazard_spawn_y: tunables.hazard_spawn_y,
            hazard_drop_speed: tunables.hazard_drop_speed,
            hazard_max_horizontal_speed: tunables.hazard_max_horizontal_speed,
        };

        let stars = (0..tunables.star_count)
            .map(|i| Star { home: tunables.star_home(i), active: true })
            .collect();

        Self {
            player: PlayerState {
                position: rules.player_spawn,
                velocity: Vec2::ZERO,
                alive: true,
                anim: PlayerAnim::Turn,
            },
            rules,
            phase: Phase::Running,
            score: 0,
            stars,
            hazards: Vec::new(),
            rng: GameRng::from_seed_option(tunables.rng_seed),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn hazards(&self) -> &[Hazard] {
        &self.hazards
    }

    pub fn active_stars(&self) -> usize {
        self.stars.iter().filter(|s| s.active).count()
    }

    /// Record where the host last saw the player, outside a frame update.
    pub fn track_player(&mut self, position: Vec2) {
        if self.phase == Phase::Running {
            self.player.position = position;
        }
    }

    pub fn score_text(&self) -> String {
        format!("Score: {}", self.score)
    }

    #[inline]
    fn ensure_running(&self) -> Result<(), GameplayError> {
        match self.phase {
            Phase::Running => Ok(()),
            Phase::GameOver => Err(GameplayError::GameOver),
        }
    }

    /// Bring every star back at its home position and release one hazard.
    fn replenish(&mut self, host: &mut dyn HostEngine) -> HazardId {
        for (i, star) in self.stars.iter_mut().enumerate() {
            star.active = true;
            host.enable_collectible(CollectibleId(i), star.home);
        }

        let (spawn, velocity) = self.roll_hazard();
        let id = HazardId(self.hazards.len());
        self.hazards.push(Hazard { spawn, velocity });
        host.spawn_hazard(id, spawn, velocity);

        info!(
            "stars replenished; hazard {} released at x={} (player x={})",
            id.0, spawn.x, self.player.position.x
        );
        id
    }

    /// Spawn point on the half of the field away from the player, with a
    /// small downward drift and a random horizontal launch.
    fn roll_hazard(&mut self) -> (Vec2, Vec2) {
        let width = self.rules.field_width as i32;
        let mid = self.rules.field_midpoint;
        let x = if self.player.position.x < mid {
            self.rng.between(mid.ceil() as i32, width)
        } else {
            self.rng.between(0, mid.floor() as i32)
        };

        let max_vx = self.rules.hazard_max_horizontal_speed;
        let vx = self.rng.between(-max_vx, max_vx);

        (
            Vec2::new(x as f32, self.rules.hazard_spawn_y),
            Vec2::new(vx as f32, self.rules.hazard_drop_speed),
        )
    }
}

impl GameplayHooks for GameplayController {
    fn on_create(&mut self, host: &mut dyn HostEngine) {
        host.spawn_player(self.rules.player_spawn);

        let (lo, hi) = self.rules.star_bounce;
        for (i, star) in self.stars.iter().enumerate() {
            let bounce = self.rng.float_between(lo, hi);
            host.spawn_collectible(CollectibleId(i), star.home, bounce);
        }

        host.set_score_text(&self.score_text());
        debug!("scene created with {} stars", self.stars.len());
    }

    fn on_frame_update(
        &mut self,
        input: &InputSnapshot,
        host: &mut dyn HostEngine,
    ) -> Result<(), GameplayError> {
        self.ensure_running()?;

        self.player.position = input.player_position;
        self.player.velocity = input.player_velocity;

        let speed = self.rules.player_speed;
        let (vx, anim) = if input.left {
            (-speed, PlayerAnim::Left)
        } else if input.right {
            (speed, PlayerAnim::Right)
        } else {
            (0.0, PlayerAnim::Turn)
        };

        self.player.velocity.x = vx;
        self.player.anim = anim;
        host.set_player_velocity_x(vx);
        host.play_animation(anim);

        // No jumping off thin air.
        if input.up && input.touching_down {
            self.player.velocity.y = -self.rules.jump_speed;
            host.set_player_velocity_y(self.player.velocity.y);
        }

        Ok(())
    }

    fn on_collectible_overlap(
        &mut self,
        id: CollectibleId,
        host: &mut dyn HostEngine,
    ) -> Result<Collected, GameplayError> {
        self.ensure_running()?;

        let star = self
            .stars
            .get_mut(id.0)
            .ok_or(GameplayError::UnknownCollectible(id))?;
        if !star.active {
            return Err(GameplayError::AlreadyCollected(id));
        }

        star.active = false;
        host.disable_collectible(id);

        self.score += self.rules.star_score;
        host.set_score_text(&self.score_text());

        let released = if self.active_stars() == 0 {
            Some(self.replenish(host))
        } else {
            None
        };

        Ok(Collected { score: self.score, released })
    }

    fn on_hazard_collision(
        &mut self,
        id: HazardId,
        host: &mut dyn HostEngine,
    ) -> Result<(), GameplayError> {
        self.ensure_running()?;
        if id.0 >= self.hazards.len() {
            return Err(GameplayError::UnknownHazard(id));
        }

        host.pause_physics();
        host.set_player_tint(GAME_OVER_TINT);
        host.play_animation(PlayerAnim::Turn);

        self.player.alive = false;
        self.player.anim = PlayerAnim::Turn;
        self.phase = Phase::GameOver;

        info!("game over: hit by hazard {} with score {}", id.0, self.score);
        Ok(())
    }
}
