use crate::action::{Action, OperationPlay, PlayerId};
use crate::bot::Bot;
use crate::card::{Card, CardKind, DefenseKind, Modifier, OperationKind, SYSTEM_SIZE};
use crate::score::healthy_modules;
use crate::state::{GameState, Player, TurnPhase};

/// Deterministic rule-based bot. Identical states always produce identical
/// actions; no randomness source is consulted anywhere.
///
/// Priority order during the Play phase, first match wins:
/// 1. A module play that completes the bot's own system with four distinct
///    healthy colors.
/// 2. A defense play on an own module, preferring Immunize over Cure over
///    Protect, ties broken by lowest slot color ordinal.
/// 3. Malware against the opponent with the most healthy modules (ties by
///    lowest player index).
/// 4. Any module play that extends the system toward completion.
/// 5. An operation with a clear benefit (swap out an infected module, strip
///    the leading opponent's hand, refill a thin hand).
/// 6. End the play phase.
///
/// In the Discard phase the bot sheds the card scored least useful for the
/// current board, ties broken by lowest hand index.
pub struct HeuristicBot;

impl HeuristicBot {
    pub fn new() -> Self {
        Self
    }

    /// Opponent currently closest to winning: most healthy modules, ties
    /// broken by lowest player index.
    fn leading_opponent(state: &GameState) -> Option<PlayerId> {
        state
            .players
            .iter()
            .filter(|player| player.id != state.current_player)
            .max_by(|a, b| {
                healthy_modules(a)
                    .cmp(&healthy_modules(b))
                    .then(b.id.cmp(&a.id))
            })
            .map(|player| player.id)
    }

    fn winning_module_play(state: &GameState, legal: &[Action]) -> Option<Action> {
        let actor = state.current();
        let completes = actor.system.len() == SYSTEM_SIZE - 1
            && actor.system.iter().all(|slot| !slot.is_infected());
        if !completes {
            return None;
        }
        Self::best_module_play(legal)
    }

    fn best_module_play(legal: &[Action]) -> Option<Action> {
        legal
            .iter()
            .filter_map(|action| match *action {
                Action::PlayModule { hand_index, slot } => {
                    Some(((slot.ordinal(), hand_index), *action))
                }
                _ => None,
            })
            .min_by_key(|(rank, _)| *rank)
            .map(|(_, action)| action)
    }

    fn best_defense_play(state: &GameState, legal: &[Action]) -> Option<Action> {
        let actor = state.current();
        legal
            .iter()
            .filter_map(|action| match *action {
                Action::PlayDefense { hand_index, slot } => {
                    let kind = actor.hand.get(hand_index)?.defense_kind()?;
                    let kind_rank = match kind {
                        DefenseKind::Immunize => 0,
                        DefenseKind::Cure => 1,
                        DefenseKind::Protect => 2,
                    };
                    Some(((kind_rank, slot.ordinal(), hand_index), *action))
                }
                _ => None,
            })
            .min_by_key(|(rank, _)| *rank)
            .map(|(_, action)| action)
    }

    fn best_malware_play(state: &GameState, legal: &[Action]) -> Option<Action> {
        let leader = Self::leading_opponent(state)?;
        legal
            .iter()
            .filter_map(|action| match *action {
                Action::PlayMalware {
                    hand_index,
                    target,
                    slot,
                } if target == leader => Some(((slot.ordinal(), hand_index), *action)),
                _ => None,
            })
            .min_by_key(|(rank, _)| *rank)
            .map(|(_, action)| action)
    }

    fn best_operation_play(state: &GameState, legal: &[Action]) -> Option<Action> {
        let actor = state.current();
        let leader = Self::leading_opponent(state);
        legal
            .iter()
            .filter_map(|action| match *action {
                Action::PlayOperation { hand_index, op } => {
                    let rank = match op {
                        // Trading an infected module for a clean one is the
                        // strongest operation available.
                        OperationPlay::CardSwap {
                            own_slot,
                            target,
                            target_slot,
                        } => {
                            let own = actor.slot(own_slot)?;
                            let theirs = state.players.get(target)?.slot(target_slot)?;
                            if own.is_infected() && !theirs.is_infected() {
                                (0, own_slot.ordinal(), hand_index)
                            } else {
                                return None;
                            }
                        }
                        OperationPlay::ForceDiscard { target } => {
                            if Some(target) == leader {
                                (1, target, hand_index)
                            } else {
                                return None;
                            }
                        }
                        OperationPlay::ExtraDraw => {
                            if actor.hand.len() < state.hand_limit && !state.deck.is_empty() {
                                (2, 0, hand_index)
                            } else {
                                return None;
                            }
                        }
                    };
                    Some((rank, *action))
                }
                _ => None,
            })
            .min_by_key(|(rank, _)| *rank)
            .map(|(_, action)| action)
    }

    fn best_discard(state: &GameState, legal: &[Action]) -> Option<Action> {
        let actor = state.current();
        legal
            .iter()
            .filter_map(|action| match *action {
                Action::Discard { hand_index } => {
                    let card = actor.hand.get(hand_index)?;
                    Some(((Self::usefulness(state, card), hand_index), *action))
                }
                _ => None,
            })
            .min_by_key(|(rank, _)| *rank)
            .map(|(_, action)| action)
    }

    /// Fixed scoring of how much a hand card is worth keeping. Cards that
    /// cannot currently be played score lowest and get shed first.
    fn usefulness(state: &GameState, card: &Card) -> i32 {
        let actor = state.current();
        match card.kind {
            CardKind::Module => {
                if card.color.is_wildcard() {
                    if actor.has_wildcard_module() { 5 } else { 90 }
                } else if actor.slot(card.color).is_none() {
                    80
                } else {
                    10
                }
            }
            CardKind::Malware => {
                if Self::opponent_slot_matches(state, card) {
                    50
                } else {
                    15
                }
            }
            CardKind::Defense(kind) => {
                let applicable = actor.system.iter().any(|slot| {
                    card.matches_slot(slot.color, slot.card.color)
                        && match kind {
                            DefenseKind::Cure => slot.is_infected(),
                            DefenseKind::Protect => slot.modifier == Modifier::None,
                            DefenseKind::Immunize => !slot.is_immune(),
                        }
                });
                if applicable { 60 } else { 25 }
            }
            CardKind::Operation(kind) => match kind {
                OperationKind::ExtraDraw => {
                    if state.deck.is_empty() { 5 } else { 40 }
                }
                OperationKind::ForceDiscard => {
                    if Self::any_opponent(state, |p| !p.hand.is_empty()) {
                        35
                    } else {
                        10
                    }
                }
                OperationKind::CardSwap => {
                    if !actor.system.is_empty()
                        && Self::any_opponent(state, |p| !p.system.is_empty())
                    {
                        30
                    } else {
                        10
                    }
                }
            },
        }
    }

    fn opponent_slot_matches(state: &GameState, card: &Card) -> bool {
        state
            .players
            .iter()
            .filter(|player| player.id != state.current_player)
            .flat_map(|player| player.system.iter())
            .any(|slot| !slot.is_immune() && card.matches_slot(slot.color, slot.card.color))
    }

    fn any_opponent(state: &GameState, predicate: impl Fn(&Player) -> bool) -> bool {
        state
            .players
            .iter()
            .filter(|player| player.id != state.current_player)
            .any(|player| predicate(player))
    }
}

impl Default for HeuristicBot {
    fn default() -> Self {
        Self::new()
    }
}

impl Bot for HeuristicBot {
    fn select_action(&mut self, state: &GameState, legal_actions: &[Action]) -> Action {
        assert!(
            !legal_actions.is_empty(),
            "heuristic bot requires at least one legal action"
        );
        match state.phase {
            TurnPhase::Draw => Action::Draw,
            TurnPhase::Discard => {
                Self::best_discard(state, legal_actions).unwrap_or(legal_actions[0])
            }
            TurnPhase::Play => Self::winning_module_play(state, legal_actions)
                .or_else(|| Self::best_defense_play(state, legal_actions))
                .or_else(|| Self::best_malware_play(state, legal_actions))
                .or_else(|| Self::best_module_play(legal_actions))
                .or_else(|| Self::best_operation_play(state, legal_actions))
                .unwrap_or(Action::EndPlay),
        }
    }
}
