use alloc::vec::Vec;
use rand::prelude::*;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Most cards that can be face-up in one turn.
pub const MAX_REVEALED: usize = 3;

pub const PERFECT_COMBO_POINTS: Score = 5;
pub const PARTIAL_COMBO_POINTS: Score = 2;

type TurnIndices = SmallVec<[TileIndex; MAX_REVEALED]>;

/// Identifies one game session. Deferred steps from an older session are dropped.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionToken(u64);

impl SessionToken {
    const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    Evaluate,
    Cleanup,
}

/// A step the caller must feed back through [`TurnEngine::advance`] once `delay_ms` has passed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deferred {
    pub token: SessionToken,
    pub step: Step,
    pub delay_ms: u32,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Accepting selections.
    #[default]
    Open,
    /// The turn is complete, evaluation is pending.
    AwaitingCompletion,
    /// The outcome is on display, cleanup is pending.
    AnnouncingOutcome,
    Finished(GameResult),
}

impl Phase {
    pub const fn accepts_selection(self) -> bool {
        matches!(self, Self::Open)
    }

    pub const fn is_resolving(self) -> bool {
        matches!(self, Self::AwaitingCompletion | Self::AnnouncingOutcome)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Finished(_))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOutcome {
    /// One of each resource.
    PerfectCombo,
    /// Exactly two distinct resources.
    PartialCombo,
    NoMatch,
    /// A disruptor ended the turn early.
    Disrupted,
}

impl TurnOutcome {
    /// Scores three face-up cards without a disruptor among them.
    pub fn score(categories: &[Category]) -> Self {
        let distinct = Category::RESOURCES
            .iter()
            .filter(|resource| categories.contains(resource))
            .count();

        match distinct {
            3 => Self::PerfectCombo,
            2 => Self::PartialCombo,
            _ => Self::NoMatch,
        }
    }

    pub const fn points(self) -> Score {
        use TurnOutcome::*;
        match self {
            PerfectCombo => PERFECT_COMBO_POINTS,
            PartialCombo => PARTIAL_COMBO_POINTS,
            NoMatch | Disrupted => 0,
        }
    }

    pub const fn clears_tiles(self) -> bool {
        matches!(self, Self::PerfectCombo)
    }

    pub fn message(self) -> Message {
        use TurnOutcome::*;
        match self {
            PerfectCombo => Message::new(
                MessageKind::Success,
                "🌟 Perfect Photosynthesis! +5 points!",
            ),
            PartialCombo => Message::new(MessageKind::Success, "✨ Great pair! +2 points!"),
            NoMatch => Message::new(
                MessageKind::Neutral,
                "No matches this turn. Keep trying!",
            ),
            Disrupted => Message::new(
                MessageKind::Disruption,
                "🦗 Grasshopper disruption! Turn ended.",
            ),
        }
    }
}

/// Everything a completed turn will do, decided when the outcome is announced.
#[derive(Clone, Debug, PartialEq)]
struct Resolution {
    outcome: TurnOutcome,
    removals: TurnIndices,
    swaps: SmallVec<[(TileIndex, TileIndex); MAX_REVEALED]>,
}

/// Read-only view handed to the presentation layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tiles: Vec<Tile>,
    pub score: Score,
    pub target_score: Score,
    pub turn: u32,
    pub revealed_count: usize,
    pub message: Message,
    /// Final message while the end-of-game dialog should be shown.
    pub acknowledgment: Option<Message>,
}

#[derive(Clone, Debug)]
pub struct TurnEngine<R = SmallRng> {
    config: GameConfig,
    board: Board,
    turn: TurnIndices,
    score: Score,
    turn_count: u32,
    phase: Phase,
    pending: Option<Resolution>,
    session: SessionToken,
    message: Message,
    awaiting_acknowledgment: bool,
    rng: R,
}

impl TurnEngine<SmallRng> {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> TurnEngine<R> {
    /// Deals a shuffled board using `rng`, which also drives disruptor moves.
    pub fn with_rng(config: GameConfig, mut rng: R) -> Self {
        let board = Board::shuffled(&mut rng);
        Self::with_board(config, board, rng)
    }

    /// Starts from a prepared board instead of a fresh deal.
    pub fn with_board(config: GameConfig, board: Board, rng: R) -> Self {
        Self {
            config,
            board,
            turn: TurnIndices::new(),
            score: 0,
            turn_count: 1,
            phase: Phase::Open,
            pending: None,
            session: SessionToken::default(),
            message: Message::welcome(),
            awaiting_acknowledgment: false,
            rng,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn session(&self) -> SessionToken {
        self.session
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    /// Indices revealed since the last resolution, in selection order.
    pub fn selection(&self) -> &[TileIndex] {
        &self.turn
    }

    pub fn snapshot(&self) -> Snapshot {
        let acknowledgment = match self.phase {
            Phase::Finished(result) if self.awaiting_acknowledgment => Some(result.message()),
            _ => None,
        };

        Snapshot {
            tiles: self.board.iter().copied().collect(),
            score: self.score,
            target_score: self.config.target_score,
            turn: self.turn_count,
            revealed_count: self.turn.len(),
            message: self.message.clone(),
            acknowledgment,
        }
    }

    /// Reveals the card at `index` if the turn and the card allow it.
    pub fn select(&mut self, index: TileIndex) -> Result<SelectOutcome> {
        let index = self.board.validate_index(index)?;

        if !self.phase.accepts_selection()
            || self.turn.len() >= MAX_REVEALED
            || !self.board[index].is_selectable()
        {
            log::trace!("selection of {} rejected in {:?}", index, self.phase);
            return Ok(SelectOutcome::NoChange);
        }

        self.board.tile_mut(index).set_revealed(true);
        self.turn.push(index);

        Ok(match self.check_completion() {
            Some(deferred) => SelectOutcome::TurnComplete(deferred),
            None => SelectOutcome::Revealed,
        })
    }

    /// Runs a step previously handed out by [`Self::select`] or by an earlier `advance`.
    pub fn advance(&mut self, deferred: Deferred) -> AdvanceOutcome {
        if deferred.token != self.session {
            log::debug!("dropping {:?} from a previous session", deferred.step);
            return AdvanceOutcome::Dropped;
        }

        match (deferred.step, self.phase) {
            (Step::Evaluate, Phase::AwaitingCompletion) => self.evaluate_turn(),
            (Step::Cleanup, Phase::AnnouncingOutcome) => self.finish_turn(),
            (step, phase) => {
                log::warn!("dropping {:?} step in {:?}", step, phase);
                AdvanceOutcome::Dropped
            }
        }
    }

    /// Deals a fresh board and resets the score, abandoning any turn in progress.
    pub fn new_game(&mut self) {
        self.board = Board::shuffled(&mut self.rng);
        self.turn.clear();
        self.score = 0;
        self.turn_count = 1;
        self.phase = Phase::Open;
        self.pending = None;
        self.session = self.session.next();
        self.message = Message::new_game();
        self.awaiting_acknowledgment = false;
        log::debug!("new game, session {:?}", self.session);
    }

    /// Dismisses the end-of-game dialog. Returns whether one was showing.
    pub fn acknowledge(&mut self) -> bool {
        core::mem::take(&mut self.awaiting_acknowledgment)
    }

    fn is_turn_complete(&self) -> bool {
        self.turn.len() >= MAX_REVEALED
            || self
                .turn
                .iter()
                .any(|&index| self.board[index].category().is_disruptor())
    }

    fn check_completion(&mut self) -> Option<Deferred> {
        if !self.is_turn_complete() {
            return None;
        }

        self.phase = Phase::AwaitingCompletion;
        Some(Deferred {
            token: self.session,
            step: Step::Evaluate,
            delay_ms: self.config.completion_delay_ms,
        })
    }

    fn evaluate_turn(&mut self) -> AdvanceOutcome {
        let Some(resolution) = self.resolve() else {
            self.phase = Phase::Open;
            return AdvanceOutcome::Reopened;
        };

        let outcome = resolution.outcome;
        log::debug!("turn {} resolved as {:?}", self.turn_count, outcome);

        self.score = self.score.saturating_add(outcome.points());
        self.message = outcome.message();
        self.pending = Some(resolution);
        self.phase = Phase::AnnouncingOutcome;

        AdvanceOutcome::Announced(Deferred {
            token: self.session,
            step: Step::Cleanup,
            delay_ms: self.config.announce_delay_ms,
        })
    }

    fn resolve(&mut self) -> Option<Resolution> {
        let Self {
            board, turn, rng, ..
        } = self;

        let disruptors: TurnIndices = turn
            .iter()
            .copied()
            .filter(|&index| board[index].category().is_disruptor())
            .collect();

        if !disruptors.is_empty() {
            let mut swaps = SmallVec::new();
            for index in disruptors {
                let candidates: SmallVec<[TileIndex; 4]> = board
                    .adjacent_indices(index)
                    .filter(|&neighbor| !board[neighbor].is_removed() && !turn.contains(&neighbor))
                    .collect();

                if let Some(&neighbor) = candidates.choose(&mut *rng) {
                    swaps.push((index, neighbor));
                }
            }

            return Some(Resolution {
                outcome: TurnOutcome::Disrupted,
                removals: TurnIndices::new(),
                swaps,
            });
        }

        if turn.len() < MAX_REVEALED {
            return None;
        }

        let categories: SmallVec<[Category; MAX_REVEALED]> =
            turn.iter().map(|&index| board[index].category()).collect();
        let outcome = TurnOutcome::score(&categories);

        Some(Resolution {
            outcome,
            removals: if outcome.clears_tiles() {
                turn.clone()
            } else {
                TurnIndices::new()
            },
            swaps: SmallVec::new(),
        })
    }

    fn finish_turn(&mut self) -> AdvanceOutcome {
        let Some(resolution) = self.pending.take() else {
            self.phase = Phase::Open;
            return AdvanceOutcome::Dropped;
        };

        for &(from, to) in &resolution.swaps {
            log::debug!("disruptor at {} hops to {}", from, to);
            self.board.swap(from, to);
        }
        for &index in &resolution.removals {
            self.board.tile_mut(index).set_removed();
        }
        self.board.conceal_all();
        self.turn.clear();
        self.turn_count = self.turn_count.saturating_add(1);

        if resolution.outcome == TurnOutcome::Disrupted {
            return self.reopen();
        }

        if self.board.remaining_count() == 0 {
            self.score = self.score.saturating_add(self.config.clearance_bonus);
            self.end_game(GameResult::FullClearance)
        } else if self.score >= self.config.target_score {
            self.end_game(GameResult::Won)
        } else {
            self.reopen()
        }
    }

    fn reopen(&mut self) -> AdvanceOutcome {
        self.phase = Phase::Open;
        self.message = Message::prompt();
        AdvanceOutcome::TurnFinished
    }

    fn end_game(&mut self, result: GameResult) -> AdvanceOutcome {
        log::debug!("game finished: {:?} with {} points", result, self.score);
        self.phase = Phase::Finished(result);
        self.message = result.message();
        self.awaiting_acknowledgment = true;
        AdvanceOutcome::GameFinished(result)
    }
}
