#![no_std]

extern crate alloc;

use alloc::string::String;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use engine::*;
pub use error::*;
pub use tile::*;
pub use types::*;

mod board;
mod engine;
mod error;
mod tile;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Score that wins the game once reached after a scoring turn.
    pub target_score: Score,
    /// Awarded when every card has been cleared from the board.
    pub clearance_bonus: Score,
    /// Pause between the completing selection and evaluation of the turn.
    pub completion_delay_ms: u32,
    /// How long the outcome stays announced before the board is cleaned up.
    pub announce_delay_ms: u32,
}

impl GameConfig {
    pub const DEFAULT_TARGET_SCORE: Score = 10;
    pub const DEFAULT_CLEARANCE_BONUS: Score = 3;

    const fn new_unchecked(target_score: Score) -> Self {
        Self {
            target_score,
            clearance_bonus: Self::DEFAULT_CLEARANCE_BONUS,
            completion_delay_ms: 1000,
            announce_delay_ms: 1000,
        }
    }

    /// Config with the default bonus and delays. `target_score` is raised to at least 1.
    pub fn new(target_score: Score) -> Self {
        Self::new_unchecked(target_score.max(1))
    }

    pub const fn with_delays(self, completion_delay_ms: u32, announce_delay_ms: u32) -> Self {
        Self {
            completion_delay_ms,
            announce_delay_ms,
            ..self
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(Self::DEFAULT_TARGET_SCORE)
    }
}

/// Styling hint for the banner shown above the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageKind {
    Neutral,
    Success,
    Disruption,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub kind: MessageKind,
}

impl Message {
    pub fn new(kind: MessageKind, text: &str) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    pub fn welcome() -> Self {
        Self::new(MessageKind::Neutral, "Click up to 3 cards to start!")
    }

    pub fn new_game() -> Self {
        Self::new(MessageKind::Neutral, "New game started! Click up to 3 cards.")
    }

    pub fn prompt() -> Self {
        Self::new(MessageKind::Neutral, "Click up to 3 cards.")
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectOutcome {
    NoChange,
    Revealed,
    /// The turn is ready for evaluation once the step comes due.
    TurnComplete(Deferred),
}

impl SelectOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdvanceOutcome {
    /// Stale or out-of-phase step, nothing happened.
    Dropped,
    /// Evaluation found nothing to resolve; the turn stays open.
    Reopened,
    /// The outcome is visible, cleanup is due after the returned step.
    Announced(Deferred),
    TurnFinished,
    GameFinished(GameResult),
}

impl AdvanceOutcome {
    pub const fn has_update(self) -> bool {
        use AdvanceOutcome::*;
        match self {
            Dropped => false,
            Reopened => true,
            Announced(_) => true,
            TurnFinished => true,
            GameFinished(_) => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Score reached the target.
    Won,
    /// Every card was cleared.
    FullClearance,
}

impl GameResult {
    pub fn message(self) -> Message {
        use GameResult::*;
        match self {
            Won => Message::new(
                MessageKind::Success,
                "🎉 Congratulations! You created a thriving meadow!",
            ),
            FullClearance => Message::new(
                MessageKind::Success,
                "🏆 Perfect Ecosystem! All cards removed!",
            ),
        }
    }
}
