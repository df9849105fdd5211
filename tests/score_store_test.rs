use std::fs;
use std::path::PathBuf;

use tone_puzzle::core::{GameState, Grid};
use tone_puzzle::scores::ScoreKeeper;
use tone_puzzle::store::{ScoreStore, StoreError};
use tone_puzzle::types::{is_adjacent, Category, GameAction, GAME_KEY, GRID_CELLS};

fn temp_file(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "tone-puzzle-it-{}-{}.json",
        tag,
        std::process::id()
    ))
}

/// Grid where swapping 7 and 13 clears [12, 13, 14] for 30 points.
fn scoring_state() -> GameState {
    let mut cats = [Category::Friendly; GRID_CELLS];
    for (i, c) in cats.iter_mut().enumerate() {
        *c = Category::from_index(i % 6 + i / 6);
    }
    cats[14] = Category::Casual;
    GameState::with_grid(3, Grid::from_categories(&cats))
}

/// First adjacent swap that scores on the current grid, if any.
fn find_scoring_swap(state: &GameState) -> Option<(usize, usize)> {
    for a in 0..GRID_CELLS {
        for b in a + 1..GRID_CELLS {
            if !is_adjacent(a, b) {
                continue;
            }
            let mut trial = state.clone();
            if trial.try_swap(a, b).is_ok() && trial.score() > 0 {
                return Some((a, b));
            }
        }
    }
    None
}

#[test]
fn session_score_is_recorded_under_game_key() {
    let path = temp_file("session");
    let _ = fs::remove_file(&path);

    let mut state = scoring_state();
    state.try_swap(7, 13).unwrap();
    assert_eq!(state.score(), 30);

    let mut store = ScoreStore::open(&path).unwrap();
    assert_eq!(store.get(GAME_KEY), 0);
    store.add(GAME_KEY, u64::from(state.score())).unwrap();
    store.add(GAME_KEY, 90).unwrap();

    let reopened = ScoreStore::open(&path).unwrap();
    assert_eq!(reopened.get(GAME_KEY), 120);
    assert_eq!(reopened.path(), path.as_path());

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["scores"]["tone_puzzle"], 120);
    fs::remove_file(&path).unwrap();
}

#[test]
fn keys_are_tracked_independently() {
    let path = temp_file("keys");
    let _ = fs::remove_file(&path);

    let mut store = ScoreStore::open(&path).unwrap();
    store.add("tone_puzzle", 10).unwrap();
    store.add("other_game", 5).unwrap();

    let reopened = ScoreStore::open(&path).unwrap();
    assert_eq!(reopened.get("tone_puzzle"), 10);
    assert_eq!(reopened.get("other_game"), 5);
    fs::remove_file(&path).unwrap();
}

#[test]
fn wrong_shape_is_a_json_error() {
    let path = temp_file("shape");
    fs::write(&path, r#"{"scores":{"tone_puzzle":"lots"}}"#).unwrap();

    let err = ScoreStore::open(&path).unwrap_err();
    assert!(matches!(err, StoreError::Json { .. }));
    assert!(err.to_string().contains("could not be parsed as a score file"));
    fs::remove_file(&path).unwrap();
}

#[test]
fn unreadable_location_is_an_io_error() {
    // Reading a directory fails with something other than NotFound.
    let dir = std::env::temp_dir().join(format!("tone-puzzle-it-dir-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();

    let err = ScoreStore::open(&dir).unwrap_err();
    assert!(matches!(err, StoreError::Io { .. }));
    fs::remove_dir(&dir).unwrap();
}

#[test]
fn restart_then_quit_banks_both_episodes() {
    let path = temp_file("episodes");
    let _ = fs::remove_file(&path);

    let mut keeper = ScoreKeeper::open(&path);
    assert!(keeper.is_enabled());
    assert_eq!(keeper.total(), Some(0));

    let mut state = scoring_state();
    state.try_swap(7, 13).unwrap();
    assert!(keeper.apply_action(&mut state, GameAction::Restart));
    assert_eq!(state.score(), 0);
    assert_eq!(keeper.total(), Some(30));

    // Restart until the fresh grid offers a scoring swap. Restarting a
    // zero-score episode must not change the total.
    let mut found = None;
    for _ in 0..100 {
        found = find_scoring_swap(&state);
        if found.is_some() {
            break;
        }
        keeper.apply_action(&mut state, GameAction::Restart);
        assert_eq!(keeper.total(), Some(30));
    }
    let (a, b) = found.expect("no scoring swap after 100 restarts");
    state.try_swap(a, b).unwrap();
    let second = u64::from(state.score());
    assert!(second > 0);

    assert_eq!(keeper.finish(&state), Some(30 + second));
    assert_eq!(ScoreStore::open(&path).unwrap().get(GAME_KEY), 30 + second);
    fs::remove_file(&path).unwrap();
}

#[test]
fn zero_score_episode_writes_nothing() {
    let path = temp_file("zero");
    let _ = fs::remove_file(&path);

    let mut keeper = ScoreKeeper::open(&path);
    let mut state = GameState::new(5);
    assert!(keeper.apply_action(&mut state, GameAction::Restart));
    assert_eq!(keeper.finish(&state), None);

    assert_eq!(keeper.total(), Some(0));
    assert!(!path.exists());
}

#[test]
fn unavailable_store_still_applies_actions() {
    let dir = std::env::temp_dir().join(format!("tone-puzzle-it-keeper-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();

    let mut keeper = ScoreKeeper::open(&dir);
    assert!(!keeper.is_enabled());

    let mut state = scoring_state();
    state.try_swap(7, 13).unwrap();
    assert!(keeper.apply_action(&mut state, GameAction::Restart));
    assert_eq!(state.episode_id(), 1);
    assert_eq!(keeper.bank(50), None);
    assert_eq!(keeper.total(), None);
    fs::remove_dir(&dir).unwrap();
}
