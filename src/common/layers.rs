//! Collision layers.

use avian2d::prelude::*;

#[derive(PhysicsLayer, Default, Clone, Copy, Debug)]
pub enum Layer {
    #[default]
    Default,
    World,
    Player,
    /// Star bodies: rest on platforms, never touch the player physically.
    Star,
    /// Star pickup sensors: overlap the player only.
    Pickup,
    Hazard,
}
