//! Cyber Systems game engine: deterministic rule resolution over immutable
//! state snapshots, with a phase-cycling turn engine and bot experimentation
//! support.

pub mod action;
pub mod bot;
pub mod bots;
pub mod card;
pub mod error;
pub mod game;
pub mod rules;
pub mod score;
pub mod state;
pub mod visualize;

pub use crate::action::{Action, OperationPlay, PlayerId};
pub use crate::bot::Bot;
pub use crate::bots::{HeuristicBot, HumanBot, RandomBot, create_bot_from_spec, label_for_spec};
pub use crate::card::{
    Card, CardId, CardKind, Color, DeckConfig, DefenseKind, Modifier, OperationKind,
    shuffled_deck,
};
pub use crate::error::{GameError, MoveError};
pub use crate::game::{Game, GameBuilder, GameConfig, PlayerSpec};
pub use crate::score::{healthy_modules, standings, winner_margin};
pub use crate::state::{GameState, GameStatus, Player, SystemSlot, TurnPhase};
pub use crate::visualize::{VisualOptions, describe_action, render_state};
