use rand::Rng;
use rand::seq::SliceRandom;

use crate::action::Action;
use crate::bot::Bot;
use crate::state::GameState;

/// Baseline bot that samples uniformly from the legal action set. The RNG is
/// injected by the caller, so a seeded instance replays identically.
pub struct RandomBot<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomBot<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Bot for RandomBot<R> {
    fn select_action(&mut self, _state: &GameState, legal_actions: &[Action]) -> Action {
        *legal_actions
            .choose(&mut self.rng)
            .expect("at least one legal action must be available")
    }
}
