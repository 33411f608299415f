use cybersys::{
    Action, Bot, Card, CardKind, Color, DefenseKind, Game, GameError, GameState, HeuristicBot,
    Modifier, Player, RandomBot, SystemSlot, TurnPhase, rules,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn module(id: u32, color: Color) -> Card {
    Card {
        id,
        kind: CardKind::Module,
        color,
    }
}

fn malware(id: u32, color: Color) -> Card {
    Card {
        id,
        kind: CardKind::Malware,
        color,
    }
}

fn defense(id: u32, color: Color, kind: DefenseKind) -> Card {
    Card {
        id,
        kind: CardKind::Defense(kind),
        color,
    }
}

fn healthy_slot(color: Color, id: u32) -> SystemSlot {
    SystemSlot {
        color,
        card: module(id, color),
        modifier: Modifier::None,
    }
}

fn board(players: Vec<Player>, phase: TurnPhase) -> GameState {
    GameState {
        players,
        deck: Vec::new(),
        current_player: 0,
        phase,
        winner: None,
        hand_limit: 5,
    }
}

fn seat(id: usize, name: &str) -> Player {
    Player::new(id, name, true)
}

#[test]
fn heuristic_is_deterministic_on_equal_states() {
    let mut bot_a = HeuristicBot::new();
    let mut bot_b = HeuristicBot::new();

    let mut player = seat(0, "Bot");
    player.hand = vec![
        module(0, Color::Blue),
        malware(1, Color::Red),
        defense(2, Color::Blue, DefenseKind::Protect),
    ];
    let mut rival = seat(1, "Rival");
    rival.system = vec![healthy_slot(Color::Red, 100)];
    let state = board(vec![player, rival], TurnPhase::Play);
    let twin = state.clone();

    let legal = rules::legal_actions(&state);
    assert_eq!(
        bot_a.select_action(&state, &legal),
        bot_b.select_action(&twin, &legal)
    );
}

#[test]
fn heuristic_completes_its_own_system_first() {
    let mut player = seat(0, "Bot");
    player.system = vec![
        healthy_slot(Color::Blue, 100),
        healthy_slot(Color::Red, 101),
        healthy_slot(Color::Green, 102),
    ];
    player.hand = vec![module(0, Color::Yellow), malware(1, Color::Blue)];
    let mut rival = seat(1, "Rival");
    rival.system = vec![healthy_slot(Color::Blue, 103)];
    let state = board(vec![player, rival], TurnPhase::Play);

    let legal = rules::legal_actions(&state);
    let action = HeuristicBot::new().select_action(&state, &legal);
    assert_eq!(
        action,
        Action::PlayModule {
            hand_index: 0,
            slot: Color::Yellow,
        }
    );
}

#[test]
fn heuristic_prefers_immunize_over_cure() {
    let mut player = seat(0, "Bot");
    player.system = vec![SystemSlot {
        color: Color::Blue,
        card: module(100, Color::Blue),
        modifier: Modifier::Infected,
    }];
    player.hand = vec![
        defense(0, Color::Blue, DefenseKind::Cure),
        defense(1, Color::Blue, DefenseKind::Immunize),
    ];
    let mut rival = seat(1, "Rival");
    rival.system = vec![healthy_slot(Color::Red, 101)];
    let state = board(vec![player, rival], TurnPhase::Play);

    let legal = rules::legal_actions(&state);
    let action = HeuristicBot::new().select_action(&state, &legal);
    assert_eq!(
        action,
        Action::PlayDefense {
            hand_index: 1,
            slot: Color::Blue,
        }
    );
}

#[test]
fn heuristic_attacks_the_healthiest_opponent() {
    let mut player = seat(0, "Bot");
    player.hand = vec![malware(0, Color::Blue)];
    let mut weak = seat(1, "Weak");
    weak.system = vec![healthy_slot(Color::Blue, 100)];
    let mut strong = seat(2, "Strong");
    strong.system = vec![
        healthy_slot(Color::Blue, 101),
        healthy_slot(Color::Red, 102),
    ];
    let state = board(vec![player, weak, strong], TurnPhase::Play);

    let legal = rules::legal_actions(&state);
    let action = HeuristicBot::new().select_action(&state, &legal);
    assert_eq!(
        action,
        Action::PlayMalware {
            hand_index: 0,
            target: 2,
            slot: Color::Blue,
        }
    );
}

#[test]
fn heuristic_breaks_opponent_ties_by_lowest_index() {
    let mut player = seat(0, "Bot");
    player.hand = vec![malware(0, Color::Blue)];
    let mut first = seat(1, "First");
    first.system = vec![healthy_slot(Color::Blue, 100)];
    let mut second = seat(2, "Second");
    second.system = vec![healthy_slot(Color::Blue, 101)];
    let state = board(vec![player, first, second], TurnPhase::Play);

    let legal = rules::legal_actions(&state);
    let action = HeuristicBot::new().select_action(&state, &legal);
    assert_eq!(
        action,
        Action::PlayMalware {
            hand_index: 0,
            target: 1,
            slot: Color::Blue,
        }
    );
}

#[test]
fn heuristic_discards_the_least_useful_card() {
    let mut player = seat(0, "Bot");
    player.system = vec![healthy_slot(Color::Blue, 100)];
    // The duplicate blue module cannot be played and goes first; the yellow
    // module still fills an empty slot and is kept.
    player.hand = vec![
        module(0, Color::Yellow),
        module(1, Color::Blue),
        malware(2, Color::Green),
        defense(3, Color::Red, DefenseKind::Cure),
    ];
    let mut state = board(vec![player, seat(1, "Rival")], TurnPhase::Discard);
    state.hand_limit = 3;

    let legal = rules::legal_actions(&state);
    let action = HeuristicBot::new().select_action(&state, &legal);
    assert_eq!(action, Action::Discard { hand_index: 1 });
}

#[test]
fn heuristic_drives_a_full_win_through_the_engine() -> Result<(), GameError> {
    let p0 = [
        module(0, Color::Blue),
        module(1, Color::Red),
        module(2, Color::Green),
        module(3, Color::Yellow),
    ];
    // Defense cards with no system to apply them to keep the rival passive.
    let p1 = [
        defense(10, Color::Blue, DefenseKind::Cure),
        defense(11, Color::Red, DefenseKind::Cure),
        defense(12, Color::Green, DefenseKind::Cure),
        defense(13, Color::Yellow, DefenseKind::Cure),
    ];
    let mut deck: Vec<Card> = Vec::new();
    for hand in [&p1, &p0] {
        deck.extend(hand.iter().rev().copied());
    }
    let mut game = Game::builder()
        .with_bot("Builder")
        .with_bot("Bystander")
        .with_hand_limit(4)
        .with_deck(deck)
        .build()?;

    let mut bot = HeuristicBot::new();
    for _ in 0..50 {
        if game.is_finished() {
            break;
        }
        let current = game.current_player();
        let state = game.state().clone();
        let legal = game.legal_actions(current)?;
        let action = bot.select_action(&state, &legal);
        game.submit_action(current, action)?;
    }
    assert_eq!(game.winner(), Some(0));
    Ok(())
}

#[test]
fn seeded_games_replay_identically() -> Result<(), GameError> {
    let final_states: Vec<GameState> = (0..2)
        .map(|_| {
            let mut game = Game::builder()
                .with_bot("A")
                .with_bot("B")
                .with_seed(99)
                .build()
                .expect("valid game");
            let mut bots: Vec<Box<dyn Bot>> = vec![
                Box::new(HeuristicBot::new()),
                Box::new(RandomBot::new(StdRng::seed_from_u64(7))),
            ];
            for _ in 0..200 {
                if game.is_finished() {
                    break;
                }
                let current = game.current_player();
                let state = game.state().clone();
                let legal = game.legal_actions(current).expect("legal actions");
                let action = bots[current].select_action(&state, &legal);
                game.submit_action(current, action).expect("accepted action");
            }
            game.state().clone()
        })
        .collect();
    assert_eq!(final_states[0], final_states[1]);
    Ok(())
}
