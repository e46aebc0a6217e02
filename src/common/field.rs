//! Field <-> world coordinate mapping.
//!
//! Gameplay rules think in field coordinates: origin at the top-left corner of
//! the play field, +y pointing down. Bevy's world has its origin at the field
//! centre with +y pointing up.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Field {
    pub size: Vec2,
}

impl Field {
    pub fn new(size: Vec2) -> Self {
        Self { size }
    }

    #[inline]
    pub fn half(self) -> Vec2 {
        self.size * 0.5
    }

    #[inline]
    pub fn to_world(self, p: Vec2) -> Vec2 {
        Vec2::new(p.x - self.half().x, self.half().y - p.y)
    }

    #[inline]
    pub fn from_world(self, p: Vec2) -> Vec2 {
        Vec2::new(p.x + self.half().x, self.half().y - p.y)
    }

    /// Velocities only flip the vertical axis.
    #[inline]
    pub fn velocity_to_world(v: Vec2) -> Vec2 {
        Vec2::new(v.x, -v.y)
    }

    #[inline]
    pub fn velocity_from_world(v: Vec2) -> Vec2 {
        Vec2::new(v.x, -v.y)
    }
}
