use crate::action::PlayerId;
use crate::state::{GameState, Player};

/// Installed modules whose slot is free of infection.
pub fn healthy_modules(player: &Player) -> usize {
    player.healthy_modules()
}

/// Players ranked by healthy module count, best first; ties keep the lower
/// player index first.
pub fn standings(state: &GameState) -> Vec<(PlayerId, usize)> {
    let mut ranks: Vec<(PlayerId, usize)> = state
        .players
        .iter()
        .map(|player| (player.id, healthy_modules(player)))
        .collect();
    ranks.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranks
}

/// Margin of victory for matchup statistics: the winner's healthy modules
/// minus the runner-up's. Zero when the game has no winner.
pub fn winner_margin(state: &GameState) -> usize {
    let Some(winner) = state.winner else {
        return 0;
    };
    let ranks = standings(state);
    let winner_score = ranks
        .iter()
        .find(|(id, _)| *id == winner)
        .map(|(_, score)| *score)
        .unwrap_or_default();
    let runner_up = ranks
        .iter()
        .filter(|(id, _)| *id != winner)
        .map(|(_, score)| *score)
        .max()
        .unwrap_or_default();
    winner_score.saturating_sub(runner_up)
}
