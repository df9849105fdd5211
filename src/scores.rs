//! Banking finished episodes into the score store.
//!
//! An episode ends on restart or when the player quits. Its score is added to
//! the cumulative total under [`GAME_KEY`]; zero scores are skipped. Store
//! failures are logged and never interrupt play.

use std::path::Path;

use tracing::warn;

use crate::core::GameState;
use crate::store::ScoreStore;
use crate::types::{GameAction, GAME_KEY};

#[derive(Debug)]
pub struct ScoreKeeper {
    store: Option<ScoreStore>,
}

impl ScoreKeeper {
    /// Open the score file. An unreadable file disables recording.
    pub fn open(path: &Path) -> Self {
        match ScoreStore::open(path) {
            Ok(store) => Self { store: Some(store) },
            Err(e) => {
                warn!(error = %e, "score store unavailable, scores will not be recorded");
                Self { store: None }
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.store.is_some()
    }

    /// Cumulative total as last persisted, if recording is enabled.
    pub fn total(&self) -> Option<u64> {
        self.store.as_ref().map(|s| s.get(GAME_KEY))
    }

    /// Add one episode's score. Returns the new total when something was written.
    pub fn bank(&mut self, score: u32) -> Option<u64> {
        if score == 0 {
            return None;
        }
        let store = self.store.as_mut()?;
        match store.add(GAME_KEY, u64::from(score)) {
            Ok(total) => Some(total),
            Err(e) => {
                warn!(error = %e, score, "failed to record score");
                None
            }
        }
    }

    /// Apply an action to the session, banking the episode first if the
    /// action ends it.
    pub fn apply_action(&mut self, state: &mut GameState, action: GameAction) -> bool {
        if action == GameAction::Restart {
            self.bank(state.score());
        }
        state.apply_action(action)
    }

    /// Bank the final episode when the session ends.
    pub fn finish(&mut self, state: &GameState) -> Option<u64> {
        self.bank(state.score())
    }
}
