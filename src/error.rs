use thiserror::Error;

use crate::action::PlayerId;
use crate::card::Color;
use crate::state::TurnPhase;

/// Errors that can occur when driving the game engine.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("player index {0} is out of range")]
    InvalidPlayer(PlayerId),
    #[error("not the submitting player's turn")]
    NotYourTurn,
    #[error("game is already over")]
    GameAlreadyOver,
    #[error("invalid move: {0}")]
    InvalidMove(#[from] MoveError),
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
    #[error("invariant violation: {0}")]
    InvariantViolation(&'static str),
    #[error("snapshot codec failure: {0}")]
    Snapshot(String),
}

/// Details of rejected moves. Returned by validation, never panicked; the
/// state is left untouched whenever one of these surfaces.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("action requires the {expected:?} phase but the game is in {actual:?}")]
    WrongPhase {
        expected: TurnPhase,
        actual: TurnPhase,
    },
    #[error("hand index {0} is out of range")]
    CardNotInHand(usize),
    #[error("card cannot be played this way")]
    WrongCardKind,
    #[error("the {0:?} slot is already occupied")]
    SlotOccupied(Color),
    #[error("card color does not match the {0:?} slot")]
    ColorMismatch(Color),
    #[error("a wildcard module is already installed in this system")]
    WildcardAlreadyPlaced,
    #[error("target slot is empty")]
    EmptyTarget,
    #[error("target module is immune")]
    TargetImmune,
    #[error("action cannot target the acting player")]
    SelfTarget,
    #[error("target slot is not infected")]
    SlotNotInfected,
    #[error("target slot already carries a modifier")]
    SlotAlreadyModified,
    #[error("declared effect does not match the operation card")]
    EffectMismatch,
    #[error("target player index {0} is out of range")]
    UnknownPlayer(PlayerId),
}
