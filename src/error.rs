// Simulation error types: broken physics invariants, AI faults, map loading

use thiserror::Error;

/// Errors that abort a match.
///
/// None of these are expected during normal play; they signal a tuning or logic defect
/// and leave the shared terrain/character state untrustworthy.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Cannot resolve collision between {from:?} and {to:?}")]
    CollisionUnresolved { from: (i32, i32), to: (i32, i32) },
    #[error("Computer player finished its search without a battle plan")]
    NoBattlePlan,
    #[error("No character has been controlled yet")]
    NoCharacterControlled,
    #[error("Failed to load map: {0}")]
    MapLoad(String),
    #[error("Map has no pixels")]
    EmptyMap,
}
