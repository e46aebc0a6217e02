//! Global state machine.
//!
//! Mirrors the gameplay controller's macro-state. `GameOver` is terminal:
//! nothing transitions back to `Running` inside one app lifetime.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    #[default]
    Running,
    GameOver,
}
