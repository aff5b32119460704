use gridpilot::{score, Cell, GameOver, SnakeOutcome, SnakeSim};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::VecDeque;

/// A score file path that does not exist, so every sim starts from 0
const NO_SCORE_FILE: &str = "snake_tests_missing_high_score.txt";

fn sim(width: i32, height: i32, seed: u64) -> SnakeSim {
    SnakeSim::new(width, height, NO_SCORE_FILE, StdRng::seed_from_u64(seed)).unwrap()
}

#[test]
fn test_setup_validation() {
    let rng = StdRng::seed_from_u64(0);
    assert!(SnakeSim::new(0, 10, NO_SCORE_FILE, rng).is_err());
    let rng = StdRng::seed_from_u64(0);
    assert!(SnakeSim::new(1, 1, NO_SCORE_FILE, rng).is_err());
}

#[test]
fn test_initial_food_off_body() {
    for seed in 0..10 {
        let sim = sim(8, 8, seed);
        assert!(!sim.body.contains(&sim.food));
    }
}

#[test]
fn test_eating_grows_by_exactly_one() {
    let mut sim = sim(8, 8, 3);

    // Park the food right next to the head so the next tick eats it
    sim.food = sim.head().offset(1, 0);
    let before = sim.body.len();

    assert_eq!(sim.tick(), SnakeOutcome::Ate);
    assert_eq!(sim.body.len(), before + 1);
    assert_eq!(sim.score, 1);
    assert!(!sim.body.contains(&sim.food), "relocated food landed on the body");
}

#[test]
fn test_non_eating_tick_keeps_length() {
    let mut sim = sim(10, 10, 5);
    sim.food = Cell::new(9, 9);

    let before = sim.body.len();
    let head_before = sim.head();

    assert_eq!(sim.tick(), SnakeOutcome::Continue);
    assert_eq!(sim.body.len(), before);
    assert_ne!(sim.head(), head_before);
}

#[test]
fn test_snake_follows_shortest_route_to_food() {
    let mut sim = sim(10, 10, 1);
    sim.food = Cell::new(0, 0);

    let expected_moves =
        (sim.head().x - sim.food.x).abs() + (sim.head().y - sim.food.y).abs();

    let mut moves = 0;
    loop {
        match sim.tick() {
            SnakeOutcome::Continue => moves += 1,
            SnakeOutcome::Ate => {
                moves += 1;
                break;
            }
            SnakeOutcome::Over(reason) => panic!("unexpected game over: {:?}", reason),
        }
        assert!(moves < 100, "snake never reached the food");
    }

    assert_eq!(moves, expected_moves);
}

#[test]
fn test_nearly_full_grid_endgame() {
    // 3x3 board, 7-segment snake coiled so only (0,2) and (1,1) are free,
    // food right next to the head
    let mut sim = sim(3, 3, 2);
    sim.body = VecDeque::from([
        Cell::new(0, 1), // head
        Cell::new(0, 0),
        Cell::new(1, 0),
        Cell::new(2, 0),
        Cell::new(2, 1),
        Cell::new(2, 2),
        Cell::new(1, 2),
    ]);
    sim.food = Cell::new(0, 2);

    let path = gridpilot::find_path(&sim.world(), sim.head(), sim.food);
    assert_eq!(path.len(), 2);

    assert_eq!(sim.tick(), SnakeOutcome::Ate);
    assert_eq!(sim.body.len(), 8);
    assert_eq!(sim.head(), Cell::new(0, 2));
    // The only cell left is where the food must go
    assert_eq!(sim.food, Cell::new(1, 1));
}

#[test]
fn test_sealed_off_food_terminates() {
    let mut sim = sim(3, 3, 4);
    // Head boxed in on all four sides by its own body
    sim.body = VecDeque::from([
        Cell::new(1, 1), // head
        Cell::new(1, 0),
        Cell::new(0, 1),
        Cell::new(1, 2),
        Cell::new(2, 1),
    ]);
    sim.food = Cell::new(0, 0);

    assert_eq!(sim.tick(), SnakeOutcome::Over(GameOver::NoPathToFood));
    assert_eq!(sim.game_over(), Some(GameOver::NoPathToFood));

    // Terminated stays terminated
    assert_eq!(sim.tick(), SnakeOutcome::Over(GameOver::NoPathToFood));
}

#[test]
fn test_high_score_persisted_on_new_record() {
    let path = std::env::temp_dir().join("gridpilot_snake_test_high_score.txt");
    let path = path.to_str().unwrap();
    let _ = std::fs::remove_file(path);

    let mut sim = SnakeSim::new(8, 8, path, StdRng::seed_from_u64(6)).unwrap();
    assert_eq!(sim.high_score, 0);

    sim.food = sim.head().offset(0, 1);
    assert_eq!(sim.tick(), SnakeOutcome::Ate);

    assert_eq!(sim.high_score, 1);
    assert_eq!(score::load_high_score(path), 1);

    let _ = std::fs::remove_file(path);
}

#[test]
fn test_length_never_decreases_over_run() {
    let mut sim = sim(12, 12, 8);
    let mut last_len = sim.body.len();

    for _ in 0..200 {
        match sim.tick() {
            SnakeOutcome::Over(_) => break,
            _ => {}
        }
        assert!(sim.body.len() >= last_len);
        last_len = sim.body.len();
    }
}
