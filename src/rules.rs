//! Pure rule functions. Everything here takes the state by reference and
//! either reports an error or returns a fresh snapshot; no function mutates
//! its input.

use crate::action::{Action, OperationPlay, PlayerId};
use crate::card::{Card, CardKind, Color, DefenseKind, EXTRA_DRAW_COUNT, Modifier, OperationKind, SYSTEM_SIZE};
use crate::error::{GameError, MoveError};
use crate::state::{GameState, Player, SystemSlot, TurnPhase};

/// Checks whether the current player may submit the action. Turn ownership
/// and terminal-state gating happen in the engine; this function assumes the
/// action comes from `state.current_player`.
pub fn validate(action: &Action, state: &GameState) -> Result<(), MoveError> {
    match *action {
        Action::Draw => require_phase(state, TurnPhase::Draw),
        Action::Discard { hand_index } => {
            require_phase(state, TurnPhase::Discard)?;
            hand_card(state.current(), hand_index)?;
            Ok(())
        }
        Action::EndPlay => require_phase(state, TurnPhase::Play),
        Action::PlayModule { hand_index, slot } => {
            require_phase(state, TurnPhase::Play)?;
            validate_module(state, hand_index, slot)
        }
        Action::PlayMalware {
            hand_index,
            target,
            slot,
        } => {
            require_phase(state, TurnPhase::Play)?;
            validate_malware(state, hand_index, target, slot)
        }
        Action::PlayDefense { hand_index, slot } => {
            require_phase(state, TurnPhase::Play)?;
            validate_defense(state, hand_index, slot)
        }
        Action::PlayOperation { hand_index, op } => {
            require_phase(state, TurnPhase::Play)?;
            validate_operation(state, hand_index, op)
        }
    }
}

fn require_phase(state: &GameState, expected: TurnPhase) -> Result<(), MoveError> {
    if state.phase == expected {
        Ok(())
    } else {
        Err(MoveError::WrongPhase {
            expected,
            actual: state.phase,
        })
    }
}

fn hand_card(player: &Player, hand_index: usize) -> Result<&Card, MoveError> {
    player
        .hand
        .get(hand_index)
        .ok_or(MoveError::CardNotInHand(hand_index))
}

fn opponent(state: &GameState, target: PlayerId) -> Result<&Player, MoveError> {
    let player = state
        .players
        .get(target)
        .ok_or(MoveError::UnknownPlayer(target))?;
    if target == state.current_player {
        return Err(MoveError::SelfTarget);
    }
    Ok(player)
}

fn validate_module(state: &GameState, hand_index: usize, slot: Color) -> Result<(), MoveError> {
    let actor = state.current();
    let card = hand_card(actor, hand_index)?;
    if !card.is_module() {
        return Err(MoveError::WrongCardKind);
    }
    if !slot.is_regular() {
        return Err(MoveError::ColorMismatch(slot));
    }
    if actor.slot(slot).is_some() {
        return Err(MoveError::SlotOccupied(slot));
    }
    if card.color.is_wildcard() {
        if actor.has_wildcard_module() {
            return Err(MoveError::WildcardAlreadyPlaced);
        }
    } else if card.color != slot {
        return Err(MoveError::ColorMismatch(slot));
    }
    Ok(())
}

fn validate_malware(
    state: &GameState,
    hand_index: usize,
    target: PlayerId,
    slot: Color,
) -> Result<(), MoveError> {
    let card = hand_card(state.current(), hand_index)?;
    if !card.is_malware() {
        return Err(MoveError::WrongCardKind);
    }
    let victim = opponent(state, target)?;
    let entry = victim.slot(slot).ok_or(MoveError::EmptyTarget)?;
    if entry.is_immune() {
        return Err(MoveError::TargetImmune);
    }
    if !card.matches_slot(entry.color, entry.card.color) {
        return Err(MoveError::ColorMismatch(slot));
    }
    Ok(())
}

fn validate_defense(state: &GameState, hand_index: usize, slot: Color) -> Result<(), MoveError> {
    let actor = state.current();
    let card = hand_card(actor, hand_index)?;
    let kind = card.defense_kind().ok_or(MoveError::WrongCardKind)?;
    let entry = actor.slot(slot).ok_or(MoveError::EmptyTarget)?;
    if !card.matches_slot(entry.color, entry.card.color) {
        return Err(MoveError::ColorMismatch(slot));
    }
    match kind {
        DefenseKind::Cure if !entry.is_infected() => Err(MoveError::SlotNotInfected),
        DefenseKind::Protect if entry.modifier != Modifier::None => {
            Err(MoveError::SlotAlreadyModified)
        }
        DefenseKind::Immunize if entry.is_immune() => Err(MoveError::SlotAlreadyModified),
        _ => Ok(()),
    }
}

fn validate_operation(
    state: &GameState,
    hand_index: usize,
    op: OperationPlay,
) -> Result<(), MoveError> {
    let actor = state.current();
    let card = hand_card(actor, hand_index)?;
    let kind = card.operation_kind().ok_or(MoveError::WrongCardKind)?;
    match (kind, op) {
        (OperationKind::ForceDiscard, OperationPlay::ForceDiscard { target }) => {
            let victim = opponent(state, target)?;
            if victim.hand.is_empty() {
                return Err(MoveError::EmptyTarget);
            }
            Ok(())
        }
        (
            OperationKind::CardSwap,
            OperationPlay::CardSwap {
                own_slot,
                target,
                target_slot,
            },
        ) => validate_swap(state, own_slot, target, target_slot),
        (OperationKind::ExtraDraw, OperationPlay::ExtraDraw) => Ok(()),
        _ => Err(MoveError::EffectMismatch),
    }
}

/// A swap exchanges whole slots, modifiers included, so both sides must end
/// up without duplicate colors or a second wildcard module.
fn validate_swap(
    state: &GameState,
    own_slot: Color,
    target: PlayerId,
    target_slot: Color,
) -> Result<(), MoveError> {
    let actor = state.current();
    let victim = opponent(state, target)?;
    let own = actor.slot(own_slot).ok_or(MoveError::EmptyTarget)?;
    let theirs = victim.slot(target_slot).ok_or(MoveError::EmptyTarget)?;
    if own.is_immune() || theirs.is_immune() {
        return Err(MoveError::TargetImmune);
    }
    if own_slot != target_slot {
        if actor.slot(target_slot).is_some() {
            return Err(MoveError::SlotOccupied(target_slot));
        }
        if victim.slot(own_slot).is_some() {
            return Err(MoveError::SlotOccupied(own_slot));
        }
    }
    let actor_keeps_wildcard = actor
        .system
        .iter()
        .any(|s| s.color != own_slot && s.card.color.is_wildcard());
    if theirs.card.color.is_wildcard() && actor_keeps_wildcard {
        return Err(MoveError::WildcardAlreadyPlaced);
    }
    let victim_keeps_wildcard = victim
        .system
        .iter()
        .any(|s| s.color != target_slot && s.card.color.is_wildcard());
    if own.card.color.is_wildcard() && victim_keeps_wildcard {
        return Err(MoveError::WildcardAlreadyPlaced);
    }
    Ok(())
}

/// Applies a validated action and returns the successor snapshot. The
/// resolver is total: an action that validation would have rejected leaves
/// the clone unchanged rather than corrupting it.
pub fn resolve(action: &Action, state: &GameState) -> GameState {
    let mut next = state.clone();
    let actor = next.current_player;
    match *action {
        Action::Draw => {
            if next.players[actor].hand.len() < next.hand_limit {
                if let Some(card) = next.deck.pop() {
                    next.players[actor].hand.push(card);
                }
            }
        }
        Action::EndPlay => {}
        Action::Discard { hand_index } => {
            if let Some(card) = take_hand(&mut next.players[actor], hand_index) {
                next.players[actor].discard_pile.push(card);
            }
        }
        Action::PlayModule { hand_index, slot } => {
            if let Some(card) = take_hand(&mut next.players[actor], hand_index) {
                next.players[actor].system.push(SystemSlot {
                    color: slot,
                    card,
                    modifier: Modifier::None,
                });
            }
        }
        Action::PlayMalware {
            hand_index,
            target,
            slot,
        } => {
            if let Some(card) = take_hand(&mut next.players[actor], hand_index) {
                // Protected is overwritten; Immune was blocked at validation.
                if let Some(entry) = next.players[target].slot_mut(slot) {
                    entry.modifier = Modifier::Infected;
                }
                next.players[actor].discard_pile.push(card);
            }
        }
        Action::PlayDefense { hand_index, slot } => {
            if let Some(card) = take_hand(&mut next.players[actor], hand_index) {
                if let Some(kind) = card.defense_kind() {
                    if let Some(entry) = next.players[actor].slot_mut(slot) {
                        entry.modifier = match kind {
                            DefenseKind::Cure => Modifier::None,
                            DefenseKind::Protect => Modifier::Protected,
                            DefenseKind::Immunize => Modifier::Immune,
                        };
                    }
                }
                next.players[actor].discard_pile.push(card);
            }
        }
        Action::PlayOperation { hand_index, op } => {
            if let Some(card) = take_hand(&mut next.players[actor], hand_index) {
                resolve_operation(&mut next, op);
                next.players[actor].discard_pile.push(card);
            }
        }
    }
    next
}

fn resolve_operation(state: &mut GameState, op: OperationPlay) {
    let actor = state.current_player;
    match op {
        OperationPlay::ForceDiscard { target } => {
            if target < state.players.len() {
                let emptied = std::mem::take(&mut state.players[target].hand);
                state.players[target].discard_pile.extend(emptied);
            }
        }
        OperationPlay::CardSwap {
            own_slot,
            target,
            target_slot,
        } => {
            if target >= state.players.len() {
                return;
            }
            let own_idx = state.players[actor]
                .system
                .iter()
                .position(|s| s.color == own_slot);
            let their_idx = state.players[target]
                .system
                .iter()
                .position(|s| s.color == target_slot);
            if let (Some(own_idx), Some(their_idx)) = (own_idx, their_idx) {
                let own_entry = state.players[actor].system.remove(own_idx);
                let their_entry = state.players[target].system.remove(their_idx);
                state.players[actor].system.push(their_entry);
                state.players[target].system.push(own_entry);
            }
        }
        OperationPlay::ExtraDraw => {
            // Deliberately ignores the hand limit; the surplus is shed in the
            // Discard phase.
            for _ in 0..EXTRA_DRAW_COUNT {
                match state.deck.pop() {
                    Some(card) => state.players[actor].hand.push(card),
                    None => break,
                }
            }
        }
    }
}

fn take_hand(player: &mut Player, hand_index: usize) -> Option<Card> {
    if hand_index < player.hand.len() {
        Some(player.hand.remove(hand_index))
    } else {
        None
    }
}

/// Finds a player whose system is complete: four slots, four distinct
/// regular colors (a wildcard counts as the color it was assigned), none
/// infected. The scan starts at the acting player, so an operation that
/// completes two systems at once awards the win to the actor.
pub fn check_winner(state: &GameState) -> Option<PlayerId> {
    let count = state.players.len();
    (0..count)
        .map(|offset| (state.current_player + offset) % count)
        .find(|&id| system_complete(&state.players[id]))
}

fn system_complete(player: &Player) -> bool {
    if player.system.len() != SYSTEM_SIZE {
        return false;
    }
    let mut seen = [false; SYSTEM_SIZE];
    for slot in &player.system {
        if slot.is_infected() || !slot.color.is_regular() {
            return false;
        }
        let ordinal = slot.color.ordinal();
        if seen[ordinal] {
            return false;
        }
        seen[ordinal] = true;
    }
    true
}

/// Structural invariants every published snapshot must satisfy. A failure
/// here is a programming defect in the resolver; the engine aborts the
/// offending action instead of publishing the corrupted state.
pub fn check_invariants(state: &GameState) -> Result<(), GameError> {
    if state.current_player >= state.players.len() {
        return Err(GameError::InvariantViolation(
            "current player index out of range",
        ));
    }
    if let Some(winner) = state.winner {
        if winner >= state.players.len() {
            return Err(GameError::InvariantViolation("winner index out of range"));
        }
    }
    for player in &state.players {
        if player.system.len() > SYSTEM_SIZE {
            return Err(GameError::InvariantViolation("system exceeds four slots"));
        }
        let mut seen = [false; SYSTEM_SIZE];
        let mut wildcards = 0usize;
        for slot in &player.system {
            if !slot.color.is_regular() {
                return Err(GameError::InvariantViolation(
                    "slot assigned a non-regular color",
                ));
            }
            if !matches!(slot.card.kind, CardKind::Module) {
                return Err(GameError::InvariantViolation(
                    "non-module card installed in a system slot",
                ));
            }
            let ordinal = slot.color.ordinal();
            if seen[ordinal] {
                return Err(GameError::InvariantViolation(
                    "two slots share an assigned color",
                ));
            }
            seen[ordinal] = true;
            if slot.card.color.is_wildcard() {
                wildcards += 1;
            }
        }
        if wildcards > 1 {
            return Err(GameError::InvariantViolation(
                "more than one wildcard module in a system",
            ));
        }
    }
    Ok(())
}

/// Enumerates every action `validate` would accept for the current player,
/// candidate generation first, then filtered through `validate` itself.
pub fn legal_actions(state: &GameState) -> Vec<Action> {
    if state.is_finished() {
        return Vec::new();
    }
    let actor = state.current();
    let mut actions = Vec::new();
    match state.phase {
        TurnPhase::Draw => actions.push(Action::Draw),
        TurnPhase::Discard => {
            for hand_index in 0..actor.hand.len() {
                actions.push(Action::Discard { hand_index });
            }
        }
        TurnPhase::Play => {
            for (hand_index, card) in actor.hand.iter().enumerate() {
                match card.kind {
                    CardKind::Module => {
                        for slot in Color::REGULAR {
                            actions.push(Action::PlayModule { hand_index, slot });
                        }
                    }
                    CardKind::Malware => {
                        for (target, victim) in state.players.iter().enumerate() {
                            if target == state.current_player {
                                continue;
                            }
                            for entry in &victim.system {
                                actions.push(Action::PlayMalware {
                                    hand_index,
                                    target,
                                    slot: entry.color,
                                });
                            }
                        }
                    }
                    CardKind::Defense(_) => {
                        for entry in &actor.system {
                            actions.push(Action::PlayDefense {
                                hand_index,
                                slot: entry.color,
                            });
                        }
                    }
                    CardKind::Operation(kind) => {
                        operation_candidates(state, hand_index, kind, &mut actions);
                    }
                }
            }
            actions.retain(|action| validate(action, state).is_ok());
            actions.push(Action::EndPlay);
            return actions;
        }
    }
    actions.retain(|action| validate(action, state).is_ok());
    actions
}

fn operation_candidates(
    state: &GameState,
    hand_index: usize,
    kind: OperationKind,
    actions: &mut Vec<Action>,
) {
    let actor = state.current();
    match kind {
        OperationKind::ForceDiscard => {
            for target in 0..state.players.len() {
                if target != state.current_player {
                    actions.push(Action::PlayOperation {
                        hand_index,
                        op: OperationPlay::ForceDiscard { target },
                    });
                }
            }
        }
        OperationKind::CardSwap => {
            for own in &actor.system {
                for (target, victim) in state.players.iter().enumerate() {
                    if target == state.current_player {
                        continue;
                    }
                    for theirs in &victim.system {
                        actions.push(Action::PlayOperation {
                            hand_index,
                            op: OperationPlay::CardSwap {
                                own_slot: own.color,
                                target,
                                target_slot: theirs.color,
                            },
                        });
                    }
                }
            }
        }
        OperationKind::ExtraDraw => {
            actions.push(Action::PlayOperation {
                hand_index,
                op: OperationPlay::ExtraDraw,
            });
        }
    }
}
