use crate::action::{Action, PlayerId};
use crate::card::{Card, DeckConfig, HAND_LIMIT, MAX_PLAYERS, shuffled_deck};
use crate::error::GameError;
use crate::rules;
use crate::state::{GameState, GameStatus, Player, TurnPhase};

const DEFAULT_SEED: u64 = 0x5EED_CAFE_0B57_AC1E;

/// One seat registered with the builder.
#[derive(Clone, Debug)]
pub struct PlayerSpec {
    pub name: String,
    pub is_bot: bool,
}

impl PlayerSpec {
    pub fn human(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_bot: false,
        }
    }

    pub fn bot(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_bot: true,
        }
    }
}

/// Configuration required to bootstrap a game instance.
#[derive(Clone, Copy, Debug)]
pub struct GameConfig {
    pub seed: u64,
    pub hand_limit: usize,
    pub deck: DeckConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            hand_limit: HAND_LIMIT,
            deck: DeckConfig::default(),
        }
    }
}

/// Builder that registers players and enables deterministic deck injection
/// for tests and repeatable bot experiments.
#[derive(Default)]
pub struct GameBuilder {
    config: GameConfig,
    players: Vec<PlayerSpec>,
    deck: Option<Vec<Card>>,
}

impl GameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_player(mut self, name: impl Into<String>) -> Self {
        self.players.push(PlayerSpec::human(name));
        self
    }

    pub fn with_bot(mut self, name: impl Into<String>) -> Self {
        self.players.push(PlayerSpec::bot(name));
        self
    }

    pub fn with_spec(mut self, spec: PlayerSpec) -> Self {
        self.players.push(spec);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn with_hand_limit(mut self, hand_limit: usize) -> Self {
        self.config.hand_limit = hand_limit;
        self
    }

    pub fn with_deck_config(mut self, deck: DeckConfig) -> Self {
        self.config.deck = deck;
        self
    }

    /// Inject a prepared deck instead of composing and shuffling one. The
    /// deck is used as given, top at the last element.
    pub fn with_deck(mut self, deck: Vec<Card>) -> Self {
        self.deck = Some(deck);
        self
    }

    pub fn build(self) -> Result<Game, GameError> {
        Game::from_builder(self)
    }
}

/// Core engine. Owns exactly one `GameState` at a time; every accepted
/// action replaces it wholesale with the resolver's output.
pub struct Game {
    state: GameState,
}

impl Game {
    pub fn builder() -> GameBuilder {
        GameBuilder::new()
    }

    /// Resume from a snapshot, re-checking structural invariants first.
    pub fn from_state(state: GameState) -> Result<Self, GameError> {
        rules::check_invariants(&state)?;
        Ok(Self { state })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> GameStatus {
        self.state.status()
    }

    pub fn current_player(&self) -> PlayerId {
        self.state.current_player
    }

    pub fn phase(&self) -> TurnPhase {
        self.state.phase
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.state.winner
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Every action the rules would currently accept from the player.
    pub fn legal_actions(&self, player: PlayerId) -> Result<Vec<Action>, GameError> {
        if self.is_finished() {
            return Ok(Vec::new());
        }
        if player >= self.state.players.len() {
            return Err(GameError::InvalidPlayer(player));
        }
        if player != self.state.current_player {
            return Err(GameError::NotYourTurn);
        }
        Ok(rules::legal_actions(&self.state))
    }

    /// Single entry point for humans and bots alike: validate, resolve,
    /// re-check invariants, detect a winner, then advance the phase. A
    /// rejected action leaves the state untouched and surfaces its error.
    pub fn submit_action(
        &mut self,
        player: PlayerId,
        action: Action,
    ) -> Result<GameState, GameError> {
        if self.is_finished() {
            return Err(GameError::GameAlreadyOver);
        }
        if player >= self.state.players.len() {
            return Err(GameError::InvalidPlayer(player));
        }
        if player != self.state.current_player {
            return Err(GameError::NotYourTurn);
        }
        rules::validate(&action, &self.state)?;
        let mut next = rules::resolve(&action, &self.state);
        rules::check_invariants(&next)?;
        if let Some(winner) = rules::check_winner(&next) {
            next.winner = Some(winner);
        } else {
            Self::advance_phase(&mut next, &action);
        }
        self.state = next;
        Ok(self.state.clone())
    }

    /// Phase machine: Draw -> Play after the (possibly no-op) draw; Play ->
    /// Discard on the explicit end of play; Discard -> next player's Draw
    /// once the hand fits the limit. Card plays keep the Play phase open.
    fn advance_phase(state: &mut GameState, action: &Action) {
        match action {
            Action::Draw => state.phase = TurnPhase::Play,
            Action::EndPlay => {
                if state.current().hand.len() <= state.hand_limit {
                    Self::next_turn(state);
                } else {
                    state.phase = TurnPhase::Discard;
                }
            }
            Action::Discard { .. } => {
                if state.current().hand.len() <= state.hand_limit {
                    Self::next_turn(state);
                }
            }
            _ => {}
        }
    }

    fn next_turn(state: &mut GameState) {
        state.current_player = (state.current_player + 1) % state.players.len();
        state.phase = TurnPhase::Draw;
    }

    fn from_builder(builder: GameBuilder) -> Result<Self, GameError> {
        let GameBuilder {
            config,
            players,
            deck,
        } = builder;
        if !(2..=MAX_PLAYERS).contains(&players.len()) {
            return Err(GameError::InvalidConfiguration(
                "players must be between 2 and 6",
            ));
        }
        if config.hand_limit == 0 {
            return Err(GameError::InvalidConfiguration(
                "hand limit must be positive",
            ));
        }
        let mut deck = match deck {
            Some(deck) => deck,
            None => shuffled_deck(&config.deck, config.seed)?,
        };
        if deck.len() < config.hand_limit * players.len() {
            return Err(GameError::InvalidConfiguration(
                "deck does not contain enough cards for the opening deal",
            ));
        }

        let mut seats = Vec::with_capacity(players.len());
        for (id, spec) in players.into_iter().enumerate() {
            let mut player = Player::new(id, spec.name, spec.is_bot);
            for _ in 0..config.hand_limit {
                match deck.pop() {
                    Some(card) => player.hand.push(card),
                    None => {
                        return Err(GameError::InvalidConfiguration(
                            "deck exhausted during the opening deal",
                        ));
                    }
                }
            }
            seats.push(player);
        }

        let state = GameState {
            players: seats,
            deck,
            current_player: 0,
            phase: TurnPhase::Draw,
            winner: None,
            hand_limit: config.hand_limit,
        };
        rules::check_invariants(&state)?;
        Ok(Self { state })
    }
}
