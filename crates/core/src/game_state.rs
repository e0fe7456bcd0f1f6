//! Game state module - the round lifecycle and scoring state machine
//!
//! This module ties together the puzzle queue, round state, score tracker,
//! countdown timer and deferred callbacks. It owns the persisted store and
//! writes to it on every score mutation and difficulty change.
//!
//! Phases:
//!
//! ```text
//! Idle --start--> Active --correct/skip/3 misses--> BetweenRounds --1200ms--> Active
//!                   |                                   |
//!                   +------------ timer at 0 -----------+--> GameOver --start--> Active
//! ```

use std::sync::Arc;

use tracing::{debug, info};

use crate::deferred::{DeferredKind, DeferredQueue};
use crate::round::{GuessVerdict, RoundState};
use crate::scoring::ScoreTracker;
use crate::snapshot::{ControlState, GameSnapshot};
use crate::source::{load_puzzles, PuzzleSource};
use crate::store::{read_difficulty, write_or_warn, KeyValueStore, MemoryStore, KEY_DIFFICULTY};
use crate::timer::{CountdownTimer, TimerEvent};
use crate::types::*;
use crate::PuzzleQueue;

/// What a guess submission did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// No round accepting guesses (idle, between rounds, game over).
    Ignored,
    Correct,
    Incorrect { attempts_used: u32 },
    /// Third miss; the round moves on after the advance delay.
    RoundExhausted,
    /// The time penalty emptied the countdown.
    GameOver,
}

/// Complete game state (the controller).
#[derive(Debug, Clone)]
pub struct GameState<S: KeyValueStore = MemoryStore> {
    phase: Phase,
    queue: PuzzleQueue,
    round: RoundState,
    scores: ScoreTracker,
    timer: CountdownTimer,
    deferred: DeferredQueue,
    difficulty: Difficulty,
    message: String,
    hint_cooling: bool,
    /// Monotonic id of the presented puzzle (increments on every new round).
    round_id: u32,
    /// Monotonic game id (increments on every start/restart).
    game_id: u32,
    store: S,
}

impl GameState<MemoryStore> {
    /// In-memory game over the fallback puzzles. Mostly for tests.
    pub fn with_fallback(seed: u32) -> Self {
        Self::new(Vec::new(), seed, MemoryStore::new())
    }
}

impl<S: KeyValueStore> GameState<S> {
    /// Create an idle game.
    ///
    /// An empty `puzzles` set falls back to the built-in puzzles. The
    /// persisted difficulty, score and streak are restored from `store`.
    pub fn new(puzzles: Vec<PuzzleRecord>, seed: u32, store: S) -> Self {
        let queue = PuzzleQueue::from_records(puzzles, seed)
            .unwrap_or_else(|| PuzzleQueue::fallback(seed));
        let difficulty = read_difficulty(&store).unwrap_or_default();
        let scores = ScoreTracker::restore(&store);

        let mut timer = CountdownTimer::new(TIMER_MAX_SECS);
        timer.set(difficulty.start_secs() as i64);

        debug!(puzzles = queue.len(), difficulty = difficulty.as_str(), "game created");

        Self {
            phase: Phase::Idle,
            queue,
            round: RoundState::new(),
            scores,
            timer,
            deferred: DeferredQueue::new(),
            difficulty,
            message: String::new(),
            hint_cooling: false,
            round_id: 0,
            game_id: 0,
            store,
        }
    }

    /// Create an idle game from a puzzle source (fallback on failure).
    pub fn from_source(source: &dyn PuzzleSource, seed: u32, store: S) -> Self {
        Self::new(load_puzzles(source), seed, store)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase.is_running()
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.scores.score()
    }

    pub fn streak(&self) -> u32 {
        self.scores.streak()
    }

    pub fn remaining_secs(&self) -> u32 {
        self.timer.remaining()
    }

    pub fn timer(&self) -> &CountdownTimer {
        &self.timer
    }

    pub fn attempts_used(&self) -> u32 {
        self.round.attempts_used()
    }

    pub fn current_puzzle(&self) -> Option<&Arc<PuzzleRecord>> {
        self.round.current()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn round_id(&self) -> u32 {
        self.round_id
    }

    pub fn game_id(&self) -> u32 {
        self.game_id
    }

    pub fn queue(&self) -> &PuzzleQueue {
        &self.queue
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn controls(&self) -> ControlState {
        let running = self.phase.is_running();
        ControlState {
            guess: running,
            hint: running && !self.hint_cooling,
            skip: running,
            start: true,
        }
    }

    pub fn start_label(&self) -> &'static str {
        if self.phase.is_running() {
            "Restart"
        } else {
            "Start"
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.phase = self.phase;
        out.emojis.clear();
        if let Some(p) = self.round.current() {
            out.emojis.push_str(&p.emojis);
        }
        out.message.clear();
        out.message.push_str(&self.message);
        out.score = self.scores.score();
        out.streak = self.scores.streak();
        out.remaining_secs = self.timer.remaining();
        out.max_secs = self.timer.max();
        out.attempts_used = self.round.attempts_used();
        out.max_attempts = MAX_ATTEMPTS;
        out.difficulty = self.difficulty;
        out.controls = self.controls();
        out.start_label = self.start_label();
        out.round_id = self.round_id;
        out.game_id = self.game_id;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Start a new game, or restart the running one.
    ///
    /// Cancels everything pending from the previous game, zeroes and
    /// persists score/streak, starts the countdown from the selected
    /// difficulty and presents the first puzzle.
    pub fn start(&mut self) {
        self.deferred.supersede();
        self.game_id = self.game_id.wrapping_add(1);
        self.scores.reset(&mut self.store);
        self.hint_cooling = false;
        self.timer.start(self.difficulty.start_secs());
        self.begin_round();

        info!(
            game_id = self.game_id,
            difficulty = self.difficulty.as_str(),
            remaining = self.timer.remaining(),
            "game started"
        );
    }

    fn begin_round(&mut self) {
        let puzzle = self.queue.next();
        debug!(emojis = %puzzle.emojis, "round started");
        self.round.begin(puzzle);
        self.message.clear();
        self.round_id = self.round_id.wrapping_add(1);
        self.phase = Phase::Active;
    }

    /// Close the current round and schedule the next one.
    fn finish_round(&mut self) {
        self.phase = Phase::BetweenRounds;
        self.deferred
            .schedule(DeferredKind::AdvanceRound, ROUND_ADVANCE_DELAY_MS);
    }

    fn end_game(&mut self) {
        if self.timer.is_running() {
            self.timer.stop();
        }
        self.deferred.supersede();
        self.hint_cooling = false;
        self.phase = Phase::GameOver;
        self.message = format!(
            "🕹️ GAME OVER · Score: {} · Press Start to play again",
            self.scores.score()
        );
        info!(game_id = self.game_id, score = self.scores.score(), "game over");
    }

    /// Evaluate a guess against the current puzzle.
    ///
    /// A miss that empties the countdown ends the game before the attempt
    /// limit is considered.
    pub fn submit_guess(&mut self, guess: &str) -> GuessOutcome {
        if self.phase != Phase::Active {
            return GuessOutcome::Ignored;
        }
        let Some(verdict) = self.round.judge(guess) else {
            return GuessOutcome::Ignored;
        };

        match verdict {
            GuessVerdict::Correct => {
                self.timer.adjust(CORRECT_TIME_BONUS_SECS);
                self.scores.apply_outcome(true, &mut self.store);
                self.message = "✅ Correct!".to_string();
                self.finish_round();
                GuessOutcome::Correct
            }
            GuessVerdict::Incorrect { .. } | GuessVerdict::Exhausted => {
                let timer_event = self.timer.adjust(-WRONG_TIME_PENALTY_SECS);
                self.scores.apply_outcome(false, &mut self.store);

                if timer_event == TimerEvent::Expired || self.timer.remaining() == 0 {
                    self.end_game();
                    return GuessOutcome::GameOver;
                }

                match verdict {
                    GuessVerdict::Incorrect { attempts_used } => {
                        self.message = format!(
                            "❌ Try again (attempts: {}/{})",
                            attempts_used, MAX_ATTEMPTS
                        );
                        GuessOutcome::Incorrect { attempts_used }
                    }
                    _ => {
                        self.message = format!("☠️ {} tries used. Moving on…", MAX_ATTEMPTS);
                        self.finish_round();
                        GuessOutcome::RoundExhausted
                    }
                }
            }
        }
    }

    /// Show the current hint and lock the hint control for the cool-down.
    pub fn hint(&mut self) -> bool {
        if self.phase != Phase::Active || self.hint_cooling {
            return false;
        }
        let Some(puzzle) = self.round.current() else {
            return false;
        };

        self.message = format!("💡 Hint: {}", puzzle.hint);
        self.hint_cooling = true;
        self.deferred
            .schedule(DeferredKind::HintCooldown, HINT_COOLDOWN_MS);
        true
    }

    /// Abandon the current puzzle without scoring.
    pub fn skip(&mut self) -> bool {
        if self.phase != Phase::Active {
            return false;
        }
        self.message = "⏭️ Skipped.".to_string();
        self.finish_round();
        true
    }

    /// Select a difficulty. Persists a changed selection and restarts a
    /// running game with the new starting value.
    pub fn select_difficulty(&mut self, difficulty: Difficulty) -> bool {
        if difficulty == self.difficulty {
            return false;
        }
        self.difficulty = difficulty;
        write_or_warn(&mut self.store, KEY_DIFFICULTY, difficulty.as_str());
        debug!(difficulty = difficulty.as_str(), "difficulty changed");

        if self.phase.is_running() {
            self.start();
        } else if self.phase == Phase::Idle {
            self.timer.set(difficulty.start_secs() as i64);
        }
        true
    }

    /// Apply a game action. `Submit` carries no text and is handled by
    /// [`GameState::submit_guess`]; here it is ignored.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Start => {
                self.start();
                true
            }
            GameAction::Submit => false,
            GameAction::Hint => self.hint(),
            GameAction::Skip => self.skip(),
            GameAction::SelectDifficulty(d) => self.select_difficulty(d),
        }
    }

    /// Advance the countdown and deferred callbacks by `elapsed_ms`.
    ///
    /// Returns true if anything visible changed.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.phase.is_running() {
            return false;
        }

        let mut changed = false;
        match self.timer.advance(elapsed_ms) {
            TimerEvent::Expired => {
                self.end_game();
                return true;
            }
            TimerEvent::Ticked => changed = true,
            TimerEvent::Idle => {}
        }

        for kind in self.deferred.advance(elapsed_ms) {
            changed |= self.fire(kind);
        }
        changed
    }

    fn fire(&mut self, kind: DeferredKind) -> bool {
        match kind {
            DeferredKind::AdvanceRound => {
                if self.phase != Phase::BetweenRounds {
                    debug!(phase = self.phase.as_str(), "stale round advance dropped");
                    return false;
                }
                self.begin_round();
                true
            }
            DeferredKind::HintCooldown => {
                if !self.phase.is_running() || !self.hint_cooling {
                    debug!(phase = self.phase.as_str(), "stale hint cool-down dropped");
                    return false;
                }
                self.hint_cooling = false;
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{KEY_SCORE, KEY_STREAK};

    fn started(seed: u32) -> GameState {
        let mut state = GameState::with_fallback(seed);
        state.start();
        state
    }

    fn answer(state: &GameState) -> String {
        state.current_puzzle().unwrap().answer.clone()
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::with_fallback(12345);

        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.score(), 0);
        assert_eq!(state.streak(), 0);
        assert_eq!(state.difficulty(), Difficulty::Easy);
        assert_eq!(state.remaining_secs(), 60);
        assert!(state.current_puzzle().is_none());
        assert_eq!(state.controls(), ControlState::all_disabled());
        assert_eq!(state.start_label(), "Start");
    }

    #[test]
    fn test_start_presents_first_puzzle() {
        let state = started(12345);

        assert_eq!(state.phase(), Phase::Active);
        assert!(state.current_puzzle().is_some());
        assert_eq!(state.round_id(), 1);
        assert_eq!(state.game_id(), 1);
        assert!(state.timer().is_running());
        assert_eq!(state.start_label(), "Restart");
        let c = state.controls();
        assert!(c.guess && c.hint && c.skip && c.start);
    }

    #[test]
    fn test_input_ignored_while_idle() {
        let mut state = GameState::with_fallback(1);
        assert_eq!(state.submit_guess("gas"), GuessOutcome::Ignored);
        assert!(!state.hint());
        assert!(!state.skip());
        assert!(!state.tick(5000));
        assert_eq!(state.remaining_secs(), 60);
    }

    #[test]
    fn test_correct_guess() {
        let mut state = started(7);
        let a = answer(&state);

        assert_eq!(state.submit_guess(&a.to_uppercase()), GuessOutcome::Correct);
        assert_eq!(state.score(), 10);
        assert_eq!(state.streak(), 1);
        assert_eq!(state.remaining_secs(), 65);
        assert_eq!(state.phase(), Phase::BetweenRounds);
        assert_eq!(state.message(), "✅ Correct!");
    }

    #[test]
    fn test_between_rounds_ignores_input() {
        let mut state = started(7);
        let a = answer(&state);
        state.submit_guess(&a);

        // A second correct guess during the transition must not score twice.
        assert_eq!(state.submit_guess(&a), GuessOutcome::Ignored);
        assert!(!state.skip());
        assert!(!state.hint());
        assert_eq!(state.score(), 10);
        // Controls stay enabled during the transition.
        assert!(state.controls().guess);
    }

    #[test]
    fn test_round_advances_after_delay() {
        let mut state = started(3);
        state.skip();
        let round = state.round_id();

        state.tick(ROUND_ADVANCE_DELAY_MS - 1);
        assert_eq!(state.phase(), Phase::BetweenRounds);
        assert_eq!(state.round_id(), round);

        state.tick(1);
        assert_eq!(state.phase(), Phase::Active);
        assert_eq!(state.round_id(), round + 1);
        assert_eq!(state.attempts_used(), 0);
        assert_eq!(state.message(), "");
    }

    #[test]
    fn test_incorrect_guess_keeps_round() {
        let mut state = started(3);
        assert_eq!(
            state.submit_guess("definitely wrong"),
            GuessOutcome::Incorrect { attempts_used: 1 }
        );
        assert_eq!(state.remaining_secs(), 57);
        assert_eq!(state.phase(), Phase::Active);
        assert_eq!(state.message(), "❌ Try again (attempts: 1/3)");
    }

    #[test]
    fn test_three_misses_advance_exactly_once() {
        let mut state = started(3);
        let round = state.round_id();

        state.submit_guess("x");
        state.submit_guess("y");
        assert_eq!(state.submit_guess("z"), GuessOutcome::RoundExhausted);
        assert_eq!(state.remaining_secs(), 51);
        assert_eq!(state.streak(), 0);
        assert_eq!(state.score(), 0);

        // Further guesses in the transition do nothing.
        assert_eq!(state.submit_guess("w"), GuessOutcome::Ignored);

        state.tick(ROUND_ADVANCE_DELAY_MS);
        assert_eq!(state.round_id(), round + 1);
        state.tick(ROUND_ADVANCE_DELAY_MS);
        assert_eq!(state.round_id(), round + 1);
    }

    #[test]
    fn test_penalty_to_zero_ends_game_before_attempt_rule() {
        let mut state = started(3);
        state.tick(57_000);
        assert_eq!(state.remaining_secs(), 3);

        assert_eq!(state.submit_guess("a"), GuessOutcome::GameOver);
        assert_eq!(state.phase(), Phase::GameOver);
        assert_eq!(state.attempts_used(), 1);
        assert_eq!(state.submit_guess("b"), GuessOutcome::Ignored);
    }

    #[test]
    fn test_third_miss_that_zeroes_timer_is_game_over() {
        let mut state = started(3);
        state.tick(51_000);
        assert_eq!(state.remaining_secs(), 9);

        state.submit_guess("a");
        state.submit_guess("b");
        assert_eq!(state.remaining_secs(), 3);
        assert_eq!(state.submit_guess("c"), GuessOutcome::GameOver);
        assert_eq!(state.phase(), Phase::GameOver);
    }

    #[test]
    fn test_timer_expiry_is_game_over() {
        let mut state = started(3);
        assert!(state.tick(60_000));
        assert_eq!(state.phase(), Phase::GameOver);
        assert_eq!(state.remaining_secs(), 0);
        assert!(state.message().contains("GAME OVER"));
        let c = state.controls();
        assert!(!c.guess && !c.hint && !c.skip);
        assert!(c.start);

        // Late ticks are no-ops.
        assert!(!state.tick(1000));
        assert_eq!(state.submit_guess("gas"), GuessOutcome::Ignored);
    }

    #[test]
    fn test_pending_advance_cancelled_by_game_over() {
        let mut state = started(3);
        state.tick(59_000);
        state.skip();
        let round = state.round_id();

        state.tick(1000);
        assert_eq!(state.phase(), Phase::GameOver);
        state.tick(5000);
        assert_eq!(state.round_id(), round);
        assert_eq!(state.phase(), Phase::GameOver);
    }

    #[test]
    fn test_restart_resets_and_cancels_pending() {
        let mut state = started(3);
        let a = answer(&state);
        state.submit_guess(&a);

        state.start();
        assert_eq!(state.phase(), Phase::Active);
        assert_eq!(state.score(), 0);
        assert_eq!(state.streak(), 0);
        assert_eq!(state.remaining_secs(), 60);
        assert!(state.deferred.is_empty());
        let round = state.round_id();

        // The round advance from the previous game must not fire.
        state.tick(ROUND_ADVANCE_DELAY_MS);
        assert_eq!(state.round_id(), round);
        assert_eq!(state.phase(), Phase::Active);
    }

    #[test]
    fn test_restart_cancels_hint_cool_down() {
        let mut state = started(3);
        assert!(state.hint());
        assert!(state.deferred.is_pending(DeferredKind::HintCooldown));
        assert!(!state.controls().hint);

        state.start();
        assert!(!state.deferred.is_pending(DeferredKind::HintCooldown));
        assert!(state.controls().hint);

        // A hint in the new game starts a full cool-down of its own.
        state.tick(HINT_COOLDOWN_MS / 2);
        assert!(state.hint());
        state.tick(HINT_COOLDOWN_MS / 2);
        assert!(!state.controls().hint);
        assert!(!state.hint());

        state.tick(HINT_COOLDOWN_MS / 2);
        assert!(!state.deferred.is_pending(DeferredKind::HintCooldown));
        assert!(state.controls().hint);
    }

    #[test]
    fn test_hint_cooldown() {
        let mut state = started(5);
        let hint = state.current_puzzle().unwrap().hint.clone();

        assert!(state.hint());
        assert_eq!(state.message(), format!("💡 Hint: {hint}"));
        assert!(!state.controls().hint);
        assert!(!state.hint());

        state.tick(HINT_COOLDOWN_MS - 1);
        assert!(!state.controls().hint);
        state.tick(1);
        assert!(state.controls().hint);
        assert!(state.hint());
    }

    #[test]
    fn test_hint_cooldown_stale_after_game_over() {
        let mut state = started(5);
        state.tick(59_500);
        state.hint();
        state.tick(500);
        assert!(state.game_over());
        assert!(!state.controls().hint);
        state.tick(1000);
        assert!(!state.controls().hint);
    }

    #[test]
    fn test_skip_does_not_score() {
        let mut state = started(5);
        state.submit_guess("nope");
        assert!(state.skip());
        assert_eq!(state.message(), "⏭️ Skipped.");
        assert_eq!(state.score(), 0);
        assert_eq!(state.remaining_secs(), 57);
    }

    #[test]
    fn test_select_difficulty_while_idle_only_persists() {
        let mut state = GameState::with_fallback(5);
        assert!(state.select_difficulty(Difficulty::Hard));
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.remaining_secs(), 30);
        assert_eq!(
            state.store().get(KEY_DIFFICULTY).unwrap().as_deref(),
            Some("hard")
        );
        assert!(!state.select_difficulty(Difficulty::Hard));
    }

    #[test]
    fn test_select_difficulty_while_running_restarts() {
        let mut state = started(5);
        let a = answer(&state);
        state.submit_guess(&a);
        let game = state.game_id();

        assert!(state.select_difficulty(Difficulty::Medium));
        assert_eq!(state.game_id(), game + 1);
        assert_eq!(state.phase(), Phase::Active);
        assert_eq!(state.remaining_secs(), 45);
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_select_difficulty_after_game_over_does_not_restart() {
        let mut state = started(5);
        state.tick(60_000);
        assert!(state.select_difficulty(Difficulty::Hard));
        assert_eq!(state.phase(), Phase::GameOver);

        state.start();
        assert_eq!(state.remaining_secs(), 30);
    }

    #[test]
    fn test_restore_from_store() {
        let mut store = MemoryStore::new();
        store.set(KEY_DIFFICULTY, "medium").unwrap();
        store.set(KEY_SCORE, "40").unwrap();
        store.set(KEY_STREAK, "4").unwrap();

        let mut state = GameState::new(Vec::new(), 1, store);
        assert_eq!(state.difficulty(), Difficulty::Medium);
        assert_eq!(state.score(), 40);
        assert_eq!(state.streak(), 4);
        assert_eq!(state.remaining_secs(), 45);

        state.start();
        assert_eq!(state.score(), 0);
        assert_eq!(state.store().get(KEY_SCORE).unwrap().as_deref(), Some("0"));
        assert_eq!(state.store().get(KEY_STREAK).unwrap().as_deref(), Some("0"));
    }

    #[test]
    fn test_apply_action() {
        let mut state = GameState::with_fallback(5);
        assert!(state.apply_action(GameAction::Start));
        assert!(!state.apply_action(GameAction::Submit));
        assert!(state.apply_action(GameAction::Hint));
        assert!(state.apply_action(GameAction::Skip));
        assert!(state.apply_action(GameAction::SelectDifficulty(Difficulty::Hard)));
        assert_eq!(state.remaining_secs(), 30);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = started(5);
        state.submit_guess("nope");
        let snap = state.snapshot();

        assert_eq!(snap.phase, Phase::Active);
        assert_eq!(snap.emojis, state.current_puzzle().unwrap().emojis);
        assert_eq!(snap.attempts_used, 1);
        assert_eq!(snap.remaining_secs, 57);
        assert_eq!(snap.max_secs, TIMER_MAX_SECS);
        assert_eq!(snap.start_label, "Restart");
        assert_eq!(snap.round_id, 1);
        assert_eq!(snap.game_id, 1);
    }
}
