use std::fmt::Write;

use crate::action::{Action, OperationPlay};
use crate::card::{Card, CardKind, Color, DefenseKind, Modifier, OperationKind};
use crate::state::{GameState, GameStatus, SystemSlot};

/// Customize state rendering for CLI visualization.
#[derive(Clone, Copy, Debug)]
pub struct VisualOptions {
    pub show_hands: bool,
    pub show_discard_sizes: bool,
}

impl Default for VisualOptions {
    fn default() -> Self {
        Self {
            show_hands: true,
            show_discard_sizes: true,
        }
    }
}

pub fn render_state(state: &GameState) -> String {
    render_state_with_options(state, VisualOptions::default())
}

pub fn render_state_with_options(state: &GameState, options: VisualOptions) -> String {
    let mut out = String::new();
    let status = match state.status() {
        GameStatus::Ongoing => format!("Ongoing ({:?} phase)", state.phase),
        GameStatus::Finished { winner } => {
            format!("Finished (winner: {})", state.players[winner].name)
        }
    };
    let _ = writeln!(out, "Status: {status} | Deck: {} cards", state.deck.len());
    for player in &state.players {
        let marker = if player.id == state.current_player {
            ">"
        } else {
            " "
        };
        let system = if player.system.is_empty() {
            String::from("(no modules)")
        } else {
            player
                .system
                .iter()
                .map(slot_label)
                .collect::<Vec<_>>()
                .join("  ")
        };
        let _ = write!(out, "{marker} {}: {system}", player.name);
        if options.show_discard_sizes {
            let _ = write!(out, " | discard {}", player.discard_pile.len());
        }
        let _ = writeln!(out, " | hand {}", player.hand.len());
    }
    if options.show_hands {
        let current = state.current();
        let _ = writeln!(out, "Hand of {}:", current.name);
        for (index, card) in current.hand.iter().enumerate() {
            let _ = writeln!(out, "  [{index}] {}", card_label(card));
        }
    }
    out
}

pub fn card_label(card: &Card) -> String {
    match card.kind {
        CardKind::Module => format!("{:?} Module", card.color),
        CardKind::Malware => format!("{:?} Malware", card.color),
        CardKind::Defense(kind) => {
            let verb = match kind {
                DefenseKind::Cure => "Cure",
                DefenseKind::Protect => "Protect",
                DefenseKind::Immunize => "Immunize",
            };
            format!("{:?} Defense ({verb})", card.color)
        }
        CardKind::Operation(kind) => {
            let effect = match kind {
                OperationKind::ForceDiscard => "Force Discard",
                OperationKind::CardSwap => "Card Swap",
                OperationKind::ExtraDraw => "Extra Draw",
            };
            format!("Operation ({effect})")
        }
    }
}

fn slot_label(slot: &SystemSlot) -> String {
    let state = match slot.modifier {
        Modifier::None => "-",
        Modifier::Infected => "infected",
        Modifier::Protected => "protected",
        Modifier::Immune => "immune",
    };
    if slot.card.color == Color::Purple {
        format!("{:?}[wild,{state}]", slot.color)
    } else {
        format!("{:?}[{state}]", slot.color)
    }
}

pub fn describe_action(state: &GameState, action: &Action) -> String {
    let actor = state.current();
    let card = action
        .hand_index()
        .and_then(|index| actor.hand.get(index))
        .map(card_label);
    match action {
        Action::Draw => String::from("Draw a card"),
        Action::EndPlay => String::from("End the play phase"),
        Action::Discard { .. } => match card {
            Some(card) => format!("Discard {card}"),
            None => String::from("Discard"),
        },
        Action::PlayModule { slot, .. } => match card {
            Some(card) => format!("Install {card} into the {slot:?} slot"),
            None => format!("Install a module into the {slot:?} slot"),
        },
        Action::PlayMalware { target, slot, .. } => {
            let victim = state
                .players
                .get(*target)
                .map(|player| player.name.as_str())
                .unwrap_or("?");
            match card {
                Some(card) => format!("Infect {victim}'s {slot:?} module with {card}"),
                None => format!("Infect {victim}'s {slot:?} module"),
            }
        }
        Action::PlayDefense { slot, .. } => match card {
            Some(card) => format!("Apply {card} to own {slot:?} module"),
            None => format!("Defend own {slot:?} module"),
        },
        Action::PlayOperation { op, .. } => match op {
            OperationPlay::ForceDiscard { target } => {
                let victim = state
                    .players
                    .get(*target)
                    .map(|player| player.name.as_str())
                    .unwrap_or("?");
                format!("Force {victim} to discard their hand")
            }
            OperationPlay::CardSwap {
                own_slot,
                target,
                target_slot,
            } => {
                let victim = state
                    .players
                    .get(*target)
                    .map(|player| player.name.as_str())
                    .unwrap_or("?");
                format!("Swap own {own_slot:?} module with {victim}'s {target_slot:?} module")
            }
            OperationPlay::ExtraDraw => String::from("Draw extra cards"),
        },
    }
}
