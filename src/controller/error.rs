//! Rejected gameplay callbacks.

use thiserror::Error;

use super::host::{CollectibleId, HazardId};

/// Why a callback was refused. A rejected callback leaves the controller
/// untouched and emits no host commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameplayError {
    #[error("game is over")]
    GameOver,
    #[error("unknown collectible {0:?}")]
    UnknownCollectible(CollectibleId),
    #[error("collectible {0:?} is not active")]
    AlreadyCollected(CollectibleId),
    #[error("unknown hazard {0:?}")]
    UnknownHazard(HazardId),
}
