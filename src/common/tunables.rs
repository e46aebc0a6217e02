//! Tunable gameplay constants.
//!
//! Positions and velocities are in field coordinates (see [`crate::common::field`]).

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    pub pixels_per_meter: f32,
    /// Play field size in pixels.
    pub field_size: Vec2,
    /// Downward acceleration, pixels per second squared.
    pub gravity: f32,

    pub player_spawn: Vec2,
    pub player_size: Vec2,
    pub player_speed: f32,
    pub jump_speed: f32,
    pub player_bounce: f32,

    pub star_count: usize,
    pub star_origin: Vec2,
    pub star_step_x: f32,
    pub star_bounce: (f32, f32),
    pub star_score: u32,

    pub hazard_spawn_y: f32,
    pub hazard_drop_speed: f32,
    /// Horizontal launch speed is drawn from `-max..=max`.
    pub hazard_max_horizontal_speed: i32,

    /// Fixed seed for reproducible runs. `None` seeds from entropy.
    pub rng_seed: Option<u64>,
}

impl Tunables {
    #[inline]
    pub fn field_midpoint(&self) -> f32 {
        self.field_size.x * 0.5
    }

    /// Home position of the star with the given index.
    #[inline]
    pub fn star_home(&self, index: usize) -> Vec2 {
        self.star_origin + Vec2::new(self.star_step_x * index as f32, 0.0)
    }
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            pixels_per_meter: 100.0,
            field_size: Vec2::new(800.0, 600.0),
            gravity: 300.0,

            player_spawn: Vec2::new(100.0, 450.0),
            player_size: Vec2::new(32.0, 48.0),
            player_speed: 160.0,
            jump_speed: 330.0,
            player_bounce: 0.2,

            star_count: 12,
            star_origin: Vec2::new(12.0, 0.0),
            star_step_x: 70.0,
            star_bounce: (0.4, 0.8),
            star_score: 10,

            hazard_spawn_y: 16.0,
            hazard_drop_speed: 20.0,
            hazard_max_horizontal_speed: 200,

            rng_seed: None,
        }
    }
}
