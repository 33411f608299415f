use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Identifier assigned to a card at deck composition time, dense from zero.
pub type CardId = u32;

/// Number of colored slots in a complete system.
pub const SYSTEM_SIZE: usize = 4;
/// Default hand limit: opening deal size, draw cap and discard target.
pub const HAND_LIMIT: usize = 5;
/// Cards granted by an extra-draw operation.
pub const EXTRA_DRAW_COUNT: usize = 2;
pub const MAX_PLAYERS: usize = 6;

/// Card and slot colors. `Purple` is the wildcard; `Neutral` appears only on
/// operation cards and never names a slot.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    Blue,
    Red,
    Green,
    Yellow,
    Purple,
    Neutral,
}

impl Color {
    /// The four slot colors, in tie-break order.
    pub const REGULAR: [Color; SYSTEM_SIZE] = [Color::Blue, Color::Red, Color::Green, Color::Yellow];

    /// Returns true for the four colors that can name a system slot.
    #[inline]
    pub fn is_regular(self) -> bool {
        !matches!(self, Color::Purple | Color::Neutral)
    }

    #[inline]
    pub fn is_wildcard(self) -> bool {
        matches!(self, Color::Purple)
    }

    /// Position used for deterministic tie-breaking.
    #[inline]
    pub fn ordinal(self) -> usize {
        self as usize
    }
}

/// What a defense card does to one of the owner's slots.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum DefenseKind {
    /// Clears an infection.
    Cure,
    /// Shields an unmodified module.
    Protect,
    /// Locks the slot against malware for the rest of the game.
    Immunize,
}

/// Encoded effect of an operation card.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum OperationKind {
    /// The targeted opponent discards their entire hand.
    ForceDiscard,
    /// Exchange one of the actor's modules with an opponent's.
    CardSwap,
    /// The actor immediately draws additional cards.
    ExtraDraw,
}

/// Card taxonomy. Defense and operation cards carry their concrete effect so
/// that validation can match on it exhaustively.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    Module,
    Malware,
    Defense(DefenseKind),
    Operation(OperationKind),
}

/// Per-slot status. Lives on the system slot, never on deck or hand cards.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Modifier {
    #[default]
    None,
    Infected,
    Protected,
    Immune,
}

/// An immutable card. Created once during deck composition; effects never
/// rewrite a card, they move it between zones.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub kind: CardKind,
    pub color: Color,
}

impl Card {
    #[inline]
    pub fn is_module(&self) -> bool {
        matches!(self.kind, CardKind::Module)
    }

    #[inline]
    pub fn is_malware(&self) -> bool {
        matches!(self.kind, CardKind::Malware)
    }

    #[inline]
    pub fn defense_kind(&self) -> Option<DefenseKind> {
        match self.kind {
            CardKind::Defense(kind) => Some(kind),
            _ => None,
        }
    }

    #[inline]
    pub fn operation_kind(&self) -> Option<OperationKind> {
        match self.kind {
            CardKind::Operation(kind) => Some(kind),
            _ => None,
        }
    }

    /// Color test shared by malware and defense targeting: the card matches a
    /// slot when its color equals the slot's assigned color, when the card is
    /// the wildcard, or when the slot holds a wildcard module.
    #[inline]
    pub fn matches_slot(&self, slot_color: Color, installed_color: Color) -> bool {
        self.color == slot_color || self.color.is_wildcard() || installed_color.is_wildcard()
    }
}

/// Deck composition. Per-color counts apply to each of the four regular
/// colors; wildcard counts are totals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckConfig {
    pub modules_per_color: usize,
    pub wildcard_modules: usize,
    pub malware_per_color: usize,
    pub wildcard_malware: usize,
    pub cures_per_color: usize,
    pub protects_per_color: usize,
    pub immunizes_per_color: usize,
    pub wildcard_cures: usize,
    pub force_discard_ops: usize,
    pub card_swap_ops: usize,
    pub extra_draw_ops: usize,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            modules_per_color: 5,
            wildcard_modules: 1,
            malware_per_color: 4,
            wildcard_malware: 1,
            cures_per_color: 2,
            protects_per_color: 1,
            immunizes_per_color: 1,
            wildcard_cures: 1,
            force_discard_ops: 2,
            card_swap_ops: 2,
            extra_draw_ops: 2,
        }
    }
}

impl DeckConfig {
    /// Rejects compositions that make the win condition unreachable. A system
    /// needs four distinct colors and accepts at most one wildcard fill, so
    /// every regular color must have at least one module in the supply.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.modules_per_color == 0 {
            return Err(GameError::InvalidConfiguration(
                "at least one module per color is required to complete a system",
            ));
        }
        Ok(())
    }

    pub fn total_cards(&self) -> usize {
        let per_color = self.modules_per_color
            + self.malware_per_color
            + self.cures_per_color
            + self.protects_per_color
            + self.immunizes_per_color;
        per_color * Color::REGULAR.len()
            + self.wildcard_modules
            + self.wildcard_malware
            + self.wildcard_cures
            + self.force_discard_ops
            + self.card_swap_ops
            + self.extra_draw_ops
    }

    /// Builds the unshuffled multiset in a fixed order with dense ids.
    pub fn compose(&self) -> Result<Vec<Card>, GameError> {
        self.validate()?;
        fn push(kind: CardKind, color: Color, count: usize, deck: &mut Vec<Card>) {
            for _ in 0..count {
                deck.push(Card {
                    id: deck.len() as CardId,
                    kind,
                    color,
                });
            }
        }

        let mut deck = Vec::with_capacity(self.total_cards());
        for color in Color::REGULAR {
            push(CardKind::Module, color, self.modules_per_color, &mut deck);
        }
        push(CardKind::Module, Color::Purple, self.wildcard_modules, &mut deck);
        for color in Color::REGULAR {
            push(CardKind::Malware, color, self.malware_per_color, &mut deck);
        }
        push(CardKind::Malware, Color::Purple, self.wildcard_malware, &mut deck);
        for color in Color::REGULAR {
            push(CardKind::Defense(DefenseKind::Cure), color, self.cures_per_color, &mut deck);
            push(CardKind::Defense(DefenseKind::Protect), color, self.protects_per_color, &mut deck);
            push(
                CardKind::Defense(DefenseKind::Immunize),
                color,
                self.immunizes_per_color,
                &mut deck,
            );
        }
        push(
            CardKind::Defense(DefenseKind::Cure),
            Color::Purple,
            self.wildcard_cures,
            &mut deck,
        );
        push(
            CardKind::Operation(OperationKind::ForceDiscard),
            Color::Neutral,
            self.force_discard_ops,
            &mut deck,
        );
        push(
            CardKind::Operation(OperationKind::CardSwap),
            Color::Neutral,
            self.card_swap_ops,
            &mut deck,
        );
        push(
            CardKind::Operation(OperationKind::ExtraDraw),
            Color::Neutral,
            self.extra_draw_ops,
            &mut deck,
        );
        Ok(deck)
    }
}

/// Composes and shuffles a deck. The same seed always yields the same order.
pub fn shuffled_deck(config: &DeckConfig, seed: u64) -> Result<Vec<Card>, GameError> {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;

    let mut deck = config.compose()?;
    let mut rng = StdRng::seed_from_u64(seed);
    deck.shuffle(&mut rng);
    Ok(deck)
}
