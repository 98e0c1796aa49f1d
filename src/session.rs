use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{Difficulty, GRID_SIZE};
use crate::food::Food;
use crate::game::{advance, CollisionKind, GameState, Phase, TickOutcome};
use crate::input::Direction;
use crate::quotes::QuoteSource;
use crate::spawn::GridExhausted;

/// Notable result of one applied tick, for front ends and score sinks.
#[derive(Debug, Clone)]
pub enum TickEvent {
    /// The snake moved; redraw.
    Advanced,
    /// A food was eaten; the session auto-paused when configured to.
    FoodConsumed(Food),
    /// The run ended; final score and difficulty for the leaderboard.
    GameOver {
        reason: CollisionKind,
        score: u32,
        difficulty: Difficulty,
    },
}

/// Owns the authoritative [`GameState`] and drives every phase transition.
///
/// Commands may arrive at any time between ticks; they are applied
/// synchronously and take effect no later than the next
/// [`tick`](Self::tick). The caller's timer must only fire ticks while the
/// phase is [`Phase::Running`]; `tick` refuses them otherwise, so a stopped
/// phase can never produce overlapping work.
pub struct GameSession {
    state: GameState,
    difficulty: Difficulty,
    rng: StdRng,
    quotes: Box<dyn QuoteSource>,
    pause_on_food: bool,
}

impl GameSession {
    /// Creates an idle session on the 15×15 arcade board.
    #[must_use]
    pub fn new(difficulty: Difficulty, quotes: Box<dyn QuoteSource>) -> Self {
        Self::with_seed(difficulty, quotes, rand::random())
    }

    /// Creates a deterministic session for tests and reproducible runs.
    #[must_use]
    pub fn with_seed(difficulty: Difficulty, quotes: Box<dyn QuoteSource>, seed: u64) -> Self {
        Self {
            state: GameState::new(GRID_SIZE),
            difficulty,
            rng: StdRng::seed_from_u64(seed),
            quotes,
            pause_on_food: true,
        }
    }

    /// Enables or disables the auto-pause after every food consumption.
    ///
    /// On by default: the eaten food's flavor text is surfaced and play
    /// waits for explicit acknowledgment.
    pub fn set_pause_on_food(&mut self, enabled: bool) {
        self.pause_on_food = enabled;
    }

    /// Returns the authoritative board state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Returns the current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Returns the current score.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.state.score
    }

    /// Returns the active difficulty.
    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Tick pacing for the active difficulty.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.difficulty.tick_interval()
    }

    /// Starts a game from [`Phase::Idle`], populating foods and obstacles.
    ///
    /// On exhaustion the session stays idle with an empty board rather than
    /// starting half-populated. Calls outside `Idle` change nothing.
    pub fn start(&mut self) -> Result<(), GridExhausted> {
        if self.state.phase != Phase::Idle {
            return Ok(());
        }
        self.state
            .populate(&mut self.rng, self.difficulty, self.quotes.as_mut())?;
        self.state.phase = Phase::Running;
        Ok(())
    }

    /// Suspends a running game. A second call changes nothing.
    pub fn pause(&mut self) {
        if self.state.phase == Phase::Running {
            self.state.phase = Phase::Paused;
        }
    }

    /// Resumes a paused game; this is also how a quote banner is
    /// acknowledged.
    pub fn resume(&mut self) {
        if self.state.phase == Phase::Paused {
            self.state.phase = Phase::Running;
        }
    }

    /// Throws the board away and returns to [`Phase::Idle`].
    pub fn reset(&mut self) {
        self.state = GameState::new(self.state.bounds());
        self.quotes.refresh();
    }

    /// Steers the snake. Reversals are ignored, and an accepted change takes
    /// effect on the next tick.
    pub fn set_direction(&mut self, direction: Direction) {
        if self.state.phase == Phase::Running {
            self.state.snake.buffer_direction(direction);
        }
    }

    /// Switches difficulty; a game in progress is reset to idle first.
    pub fn change_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        if matches!(self.state.phase, Phase::Running | Phase::Paused) {
            self.reset();
        }
    }

    /// Advances the simulation one tick while running.
    ///
    /// Returns what happened, or `None` when the phase permits no tick.
    pub fn tick(&mut self) -> Option<TickEvent> {
        if self.state.phase != Phase::Running {
            return None;
        }

        match advance(&self.state, &mut self.rng, self.quotes.as_mut()) {
            TickOutcome::Continued(next) => {
                self.state = next;
                Some(TickEvent::Advanced)
            }
            TickOutcome::FoodConsumed(next, eaten) => {
                self.state = next;
                if self.pause_on_food {
                    self.state.phase = Phase::Paused;
                }
                Some(TickEvent::FoodConsumed(eaten))
            }
            TickOutcome::Collided(reason) => {
                self.state.phase = Phase::GameOver;
                Some(TickEvent::GameOver {
                    reason,
                    score: self.state.score,
                    difficulty: self.difficulty,
                })
            }
        }
    }
}
