use super::test_support::*;
use super::*;

fn corridor_game() -> Game {
    game_on(Map::from_ascii(&[".....", ".....", "....."], Pos { y: 1, x: 1 }))
}

#[test]
fn new_session_starts_on_a_fifteen_square_level() {
    let game = Game::new(4242, GameConfig::default()).expect("default config is valid");
    assert_eq!(game.level(), 1);
    assert_eq!(game.phase(), SessionPhase::Exploring);
    assert_eq!((game.map().rows(), game.map().cols()), (15, 15));
    assert_eq!(game.turns(), 0);
    assert_eq!(game.log(), [LogEvent::LevelStarted { level: 1, rows: 15, cols: 15 }]);

    let portal = game.map().portal;
    let hint = game.portal_hint();
    assert!(
        hint == format!("({}, ?)", portal.y) || hint == format!("(?, {})", portal.x),
        "hint {hint} does not describe portal {portal:?}"
    );
}

#[test]
fn invalid_config_is_rejected_before_generation() {
    let config = GameConfig { heart_cost: 0, ..GameConfig::default() };
    assert!(matches!(Game::new(1, config), Err(GameError::InvalidConfig(_))));
}

#[test]
fn same_seed_sessions_hash_identically() {
    let a = Game::new(77, GameConfig::default()).expect("valid");
    let b = Game::new(77, GameConfig::default()).expect("valid");
    assert_eq!(a.snapshot_hash(), b.snapshot_hash());
    assert_eq!(a.portal_hint(), b.portal_hint());
}

#[test]
fn blocked_move_has_no_side_effects() {
    let mut game = game_on(Map::from_ascii(&["###", "#..", "###"], Pos { y: 1, x: 1 }));
    add_enemy(&mut game, Pos { y: 1, x: 2 });
    let hash = game.snapshot_hash();

    assert_eq!(game.apply_move(Direction::North), Ok(TurnOutcome::Blocked));
    assert_eq!(game.apply_move(Direction::West), Ok(TurnOutcome::Blocked));
    assert_eq!(game.snapshot_hash(), hash);
    assert_eq!(game.turns(), 0);
    assert_eq!(game.map().player.moves, 0);
    assert!(game.log().is_empty());
    assert_eq!(game.map().visibility.revealed_count(), 0);
}

#[test]
fn successful_move_reveals_around_the_new_position() {
    let mut game = game_on(Map::from_ascii(&["............"], Pos { y: 0, x: 0 }));
    assert_eq!(game.apply_move(Direction::East), Ok(TurnOutcome::Moved));
    let visibility = &game.map().visibility;
    assert!(visibility.is_revealed(Pos { y: 0, x: 4 }));
    assert!(!visibility.is_revealed(Pos { y: 0, x: 5 }));
    assert_eq!(game.turns(), 1);
}

#[test]
fn two_unarmored_hits_end_the_session() {
    let mut game = corridor_game();
    add_enemy(&mut game, Pos { y: 1, x: 2 });

    assert_eq!(game.apply_move(Direction::East), Ok(TurnOutcome::Moved));
    assert_eq!((game.map().player.hearts_full, game.map().player.hearts_total), (1, 2));
    assert_eq!(game.latest_event(), Some(&LogEvent::HeartLost { hearts_full: 1, hearts_total: 2 }));

    // The enemy gets its first step on move two and lands on the player again.
    assert_eq!(game.apply_move(Direction::West), Ok(TurnOutcome::Defeated));
    assert_eq!(game.phase(), SessionPhase::Defeated);
    assert_eq!((game.map().player.hearts_full, game.map().player.hearts_total), (0, 2));
    let tail = &game.log()[game.log().len() - 2..];
    assert_eq!(
        tail,
        [LogEvent::HeartLost { hearts_full: 0, hearts_total: 2 }, LogEvent::Defeated { level: 1 }]
    );

    let hash = game.snapshot_hash();
    assert_eq!(game.apply_move(Direction::East), Err(GameError::SessionOver));
    assert_eq!(game.snapshot_hash(), hash);
}

#[test]
fn sword_clears_the_enemy_in_the_way() {
    let mut game = corridor_game();
    game.map.player.swords = 1;
    let enemy = add_enemy(&mut game, Pos { y: 1, x: 2 });

    assert_eq!(game.apply_move(Direction::East), Ok(TurnOutcome::Moved));
    assert!(!game.map().enemies.contains_key(enemy));
    assert_eq!(game.map().player.swords, 0);
    assert_eq!(game.map().player.hearts_full, 2);
    assert_eq!(game.latest_event(), Some(&LogEvent::SwordUsed { at: Pos { y: 1, x: 2 } }));
}

#[test]
fn failed_push_is_logged_with_remaining_hearts() {
    let mut game = corridor_game();
    game.map.player.armors = 1;
    add_enemy(&mut game, Pos { y: 1, x: 2 });

    game.apply_move(Direction::East).expect("session running");
    assert_eq!(game.map().player.armors, 0);
    assert_eq!(
        game.latest_event(),
        Some(&LogEvent::PushFailed { hearts_full: 1, hearts_total: 2 })
    );
}

#[test]
fn chest_is_opened_once_per_session() {
    let mut game = corridor_game();
    add_chest(&mut game, Pos { y: 1, x: 2 }, ChestContents::Money, 25);

    game.apply_move(Direction::East).expect("session running");
    assert_eq!(
        game.latest_event(),
        Some(&LogEvent::ChestOpened { reward: ChestReward::Money(25), score: 25 })
    );
    game.apply_move(Direction::West).expect("session running");
    game.apply_move(Direction::East).expect("session running");

    let opened = game
        .log()
        .iter()
        .filter(|event| matches!(event, LogEvent::ChestOpened { .. }))
        .count();
    assert_eq!(opened, 1);
    assert_eq!(game.map().player.score, 25);
}

#[test]
fn combat_resolves_before_the_chest_on_the_same_cell() {
    let mut game = corridor_game();
    game.map.player.hearts_full = 1;
    add_enemy(&mut game, Pos { y: 1, x: 2 });
    let chest = add_chest(&mut game, Pos { y: 1, x: 2 }, ChestContents::Sword, 0);

    assert_eq!(game.apply_move(Direction::East), Ok(TurnOutcome::Defeated));
    assert!(!game.map().chests[chest].opened);
    assert_eq!(game.map().player.swords, 0);
}

#[test]
fn enemies_step_every_second_player_move() {
    let mut game = game_on(Map::from_ascii(&["........."], Pos { y: 0, x: 3 }));
    let enemy = add_enemy(&mut game, Pos { y: 0, x: 8 });

    let mut positions = Vec::new();
    for direction in [Direction::East, Direction::West, Direction::East, Direction::West] {
        game.apply_move(direction).expect("session running");
        positions.push(game.map().enemies[enemy].pos.x);
    }
    assert_eq!(positions, vec![8, 7, 7, 6]);
}

#[test]
fn oversized_reveal_radius_uncovers_the_level_without_panicking() {
    let mut game = corridor_game();
    game.config.reveal_radius = u32::MAX;
    assert_eq!(game.apply_move(Direction::East), Ok(TurnOutcome::Moved));
    assert_eq!(game.map().visibility.revealed_count(), 15);
}

#[test]
fn money_chest_saturates_a_maxed_score() {
    let mut game = corridor_game();
    game.map.player.score = u32::MAX - 10;
    add_chest(&mut game, Pos { y: 1, x: 2 }, ChestContents::Money, 50);

    game.apply_move(Direction::East).expect("session running");
    assert_eq!(game.map().player.score, u32::MAX);
    assert_eq!(
        game.latest_event(),
        Some(&LogEvent::ChestOpened { reward: ChestReward::Money(50), score: u32::MAX })
    );
}
