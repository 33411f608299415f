use serde::{Deserialize, Serialize};

use crate::card::Color;

/// Zero-based index of a player within the game.
pub type PlayerId = usize;

/// Declared effect shape of an operation play. Validation checks the shape
/// against the kind encoded on the card; a mismatch is rejected, never a
/// silent no-op.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum OperationPlay {
    /// The targeted opponent discards their whole hand.
    ForceDiscard { target: PlayerId },
    /// Exchange the actor's module in `own_slot` with the opponent's module
    /// in `target_slot`.
    CardSwap {
        own_slot: Color,
        target: PlayerId,
        target_slot: Color,
    },
    /// Draw additional cards immediately.
    ExtraDraw,
}

/// Action an agent can submit to the engine. One closed variant per move
/// kind so the rules can match exhaustively.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Take one card from the deck top (Draw phase). A drained deck or a
    /// hand at the limit makes this a no-op that still advances the phase.
    Draw,
    /// Install a module card from the hand into the named empty slot.
    PlayModule { hand_index: usize, slot: Color },
    /// Infect a module in an opponent's system.
    PlayMalware {
        hand_index: usize,
        target: PlayerId,
        slot: Color,
    },
    /// Apply a defense card to one of the actor's own slots.
    PlayDefense { hand_index: usize, slot: Color },
    /// Play an operation card with its declared effect.
    PlayOperation {
        hand_index: usize,
        op: OperationPlay,
    },
    /// Move a hand card to the actor's discard pile (Discard phase).
    Discard { hand_index: usize },
    /// Finish the Play phase.
    EndPlay,
}

impl Action {
    /// Hand slot consumed by the action, when it plays or discards a card.
    pub fn hand_index(&self) -> Option<usize> {
        match self {
            Action::PlayModule { hand_index, .. }
            | Action::PlayMalware { hand_index, .. }
            | Action::PlayDefense { hand_index, .. }
            | Action::PlayOperation { hand_index, .. }
            | Action::Discard { hand_index } => Some(*hand_index),
            Action::Draw | Action::EndPlay => None,
        }
    }

    /// Returns true for the card plays that are only legal in the Play phase.
    pub fn is_card_play(&self) -> bool {
        matches!(
            self,
            Action::PlayModule { .. }
                | Action::PlayMalware { .. }
                | Action::PlayDefense { .. }
                | Action::PlayOperation { .. }
        )
    }
}
