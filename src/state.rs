use serde::{Deserialize, Serialize};

use crate::action::PlayerId;
use crate::card::{Card, Color, Modifier};
use crate::error::GameError;

/// Phase of the active turn. Each turn cycles Draw -> Play -> Discard before
/// the next player's Draw.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    Draw,
    Play,
    Discard,
}

/// Status of the entire game, derived from the winner field.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum GameStatus {
    Ongoing,
    Finished { winner: PlayerId },
}

/// A filled system slot. `color` is the assigned slot color, fixed at play
/// time; a wildcard module keeps the color it was assigned and is never
/// re-evaluated. Deck and hand cards cannot carry a modifier because the
/// modifier lives here, not on the card.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SystemSlot {
    pub color: Color,
    pub card: Card,
    pub modifier: Modifier,
}

impl SystemSlot {
    #[inline]
    pub fn is_infected(&self) -> bool {
        matches!(self.modifier, Modifier::Infected)
    }

    #[inline]
    pub fn is_immune(&self) -> bool {
        matches!(self.modifier, Modifier::Immune)
    }
}

/// One seat at the table. The hand order is meaningful: it drives the bots'
/// default draw/discard priority.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub is_bot: bool,
    pub hand: Vec<Card>,
    pub system: Vec<SystemSlot>,
    pub discard_pile: Vec<Card>,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, is_bot: bool) -> Self {
        Self {
            id,
            name: name.into(),
            is_bot,
            hand: Vec::new(),
            system: Vec::new(),
            discard_pile: Vec::new(),
        }
    }

    /// Slot assigned to the given color, if occupied.
    pub fn slot(&self, color: Color) -> Option<&SystemSlot> {
        self.system.iter().find(|slot| slot.color == color)
    }

    pub fn slot_mut(&mut self, color: Color) -> Option<&mut SystemSlot> {
        self.system.iter_mut().find(|slot| slot.color == color)
    }

    /// True when a wildcard module already fills one of the slots. At most
    /// one wildcard fill is permitted per system, tracked through the
    /// installed card's color rather than a separate counter.
    pub fn has_wildcard_module(&self) -> bool {
        self.system.iter().any(|slot| slot.card.color.is_wildcard())
    }

    /// Installed modules whose slot is not infected.
    pub fn healthy_modules(&self) -> usize {
        self.system.iter().filter(|slot| !slot.is_infected()).count()
    }
}

/// Complete game snapshot. The engine owns exactly one value of this type at
/// a time and replaces it wholesale after every accepted action; rule
/// functions receive it by reference and return fresh values.
///
/// The deck is a draw stack with the top at the last element.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub players: Vec<Player>,
    pub deck: Vec<Card>,
    pub current_player: PlayerId,
    pub phase: TurnPhase,
    pub winner: Option<PlayerId>,
    pub hand_limit: usize,
}

impl GameState {
    pub fn status(&self) -> GameStatus {
        match self.winner {
            Some(winner) => GameStatus::Finished { winner },
            None => GameStatus::Ongoing,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.winner.is_some()
    }

    /// The player whose turn it is.
    pub fn current(&self) -> &Player {
        &self.players[self.current_player]
    }

    pub fn player(&self, id: PlayerId) -> Result<&Player, GameError> {
        self.players.get(id).ok_or(GameError::InvalidPlayer(id))
    }

    /// Encodes the snapshot losslessly, including deck order, so a restored
    /// game resumes deterministically.
    pub fn to_bytes(&self) -> Result<Vec<u8>, GameError> {
        bincode::serde::encode_to_vec(self, bincode::config::standard())
            .map_err(|err| GameError::Snapshot(err.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, GameError> {
        let (state, _) = bincode::serde::decode_from_slice(bytes, bincode::config::standard())
            .map_err(|err| GameError::Snapshot(err.to_string()))?;
        Ok(state)
    }
}
