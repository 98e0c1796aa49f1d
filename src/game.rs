use std::collections::HashSet;

use rand::Rng;

use crate::config::{Difficulty, GridSize, FOOD_COUNT, SNAKE_START};
use crate::food::{Food, FoodKind};
use crate::input::Direction;
use crate::quotes::{flavor_line, QuoteSource};
use crate::snake::{Position, Snake};
use crate::spawn::{self, GridExhausted};

/// Lifecycle phase of one game session.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Phase {
    Idle,
    Running,
    Paused,
    GameOver,
}

/// What the snake ran into on a terminal tick.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CollisionKind {
    Wall,
    SelfHit,
    Obstacle,
}

/// Result of advancing the board one tick.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum TickOutcome {
    /// Plain step; carries the proposed next state.
    Continued(GameState),
    /// The step landed on a food; proposed next state plus what was eaten.
    FoodConsumed(GameState, Food),
    /// The step would collide; the current state is left untouched.
    Collided(CollisionKind),
}

/// Complete board state for one session.
///
/// Owned and mutated only by [`crate::session::GameSession`]; the tick
/// engine borrows it and returns proposed successors.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub foods: Vec<Food>,
    pub obstacles: HashSet<Position>,
    pub score: u32,
    pub phase: Phase,
    bounds: GridSize,
}

impl GameState {
    /// Creates the idle pre-game state: one-segment snake, empty board.
    #[must_use]
    pub fn new(bounds: GridSize) -> Self {
        Self {
            snake: Snake::new(SNAKE_START, Direction::Right),
            foods: Vec::new(),
            obstacles: HashSet::new(),
            score: 0,
            phase: Phase::Idle,
            bounds,
        }
    }

    /// Returns the board dimensions.
    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    /// Union of every cell reserved by the snake, foods, and obstacles.
    #[must_use]
    pub fn occupied_cells(&self) -> HashSet<Position> {
        let mut cells: HashSet<Position> = self.snake.segments().copied().collect();
        cells.extend(self.foods.iter().map(|food| food.position));
        cells.extend(self.obstacles.iter().copied());
        cells
    }

    /// Populates foods and obstacles for a new round.
    ///
    /// All-or-nothing: when the board cannot hold the full entity set, the
    /// state keeps its empty food and obstacle collections.
    pub fn populate<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        difficulty: Difficulty,
        quotes: &mut dyn QuoteSource,
    ) -> Result<(), GridExhausted> {
        let mut taken: HashSet<Position> = self.snake.segments().copied().collect();

        let mut foods = Vec::with_capacity(FOOD_COUNT);
        for _ in 0..FOOD_COUNT {
            let food = spawn_food(rng, self.bounds, &taken, quotes)?;
            taken.insert(food.position);
            foods.push(food);
        }

        let obstacles = spawn::free_cells(rng, self.bounds, difficulty.obstacle_count, &taken)?;

        self.foods = foods;
        self.obstacles = obstacles.into_iter().collect();
        Ok(())
    }
}

/// Advances the board one tick.
///
/// Borrows the current state and returns a proposed successor; the caller
/// owns the transition. Collision checks run against the candidate head in
/// fixed precedence (wall, then body, then obstacle), and a terminal tick
/// leaves the state untouched.
pub fn advance<R: Rng + ?Sized>(
    state: &GameState,
    rng: &mut R,
    quotes: &mut dyn QuoteSource,
) -> TickOutcome {
    let candidate = state.snake.next_head_position();

    if !candidate.is_within_bounds(state.bounds) {
        return TickOutcome::Collided(CollisionKind::Wall);
    }
    if state.snake.occupies_excluding_tail(candidate) {
        return TickOutcome::Collided(CollisionKind::SelfHit);
    }
    if state.obstacles.contains(&candidate) {
        return TickOutcome::Collided(CollisionKind::Obstacle);
    }

    let mut next = state.clone();
    let eaten_index = next
        .foods
        .iter()
        .position(|food| food.position == candidate);

    match eaten_index {
        Some(index) => {
            let eaten = next.foods.remove(index);
            next.snake.grow_next();
            next.snake.move_forward();
            next.score += eaten.points();

            // Refill the board; an exhausted board just skips the respawn.
            let taken = next.occupied_cells();
            if let Ok(replacement) = spawn_food(rng, next.bounds, &taken, quotes) {
                next.foods.push(replacement);
            }

            TickOutcome::FoodConsumed(next, eaten)
        }
        None => {
            next.snake.move_forward();
            TickOutcome::Continued(next)
        }
    }
}

/// Spawns one food on a free cell with a fresh flavor line.
fn spawn_food<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    taken: &HashSet<Position>,
    quotes: &mut dyn QuoteSource,
) -> Result<Food, GridExhausted> {
    let kind = FoodKind::random(rng);
    let position = spawn::free_cell(rng, bounds, taken)?;
    let flavor = flavor_line(quotes.next_quote().as_ref(), kind.points());
    Ok(Food::new(position, kind, flavor))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::{advance, CollisionKind, GameState, TickOutcome};
    use crate::config::{GridSize, HARD, MEDIUM};
    use crate::food::Food;
    use crate::input::Direction;
    use crate::quotes::{CannedQuotes, NoQuotes};
    use crate::snake::{Position, Snake};

    const BOUNDS: GridSize = GridSize {
        width: 15,
        height: 15,
    };

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn plain_step_shifts_the_snake_without_scoring() {
        let mut state = GameState::new(BOUNDS);
        state.snake = Snake::new(Position { x: 5, y: 5 }, Direction::Right);

        let next = match advance(&state, &mut rng(1), &mut NoQuotes) {
            TickOutcome::Continued(next) => next,
            other => panic!("expected a plain step, got {other:?}"),
        };
        assert_eq!(next.snake.head(), Position { x: 6, y: 5 });
        assert_eq!(next.snake.len(), 1);
        assert_eq!(next.score, 0);
    }

    #[test]
    fn eating_grows_scores_and_respawns_one_food() {
        let mut state = GameState::new(BOUNDS);
        state.snake = Snake::from_segments(
            vec![Position { x: 5, y: 5 }, Position { x: 4, y: 5 }],
            Direction::Right,
        );
        state.foods = vec![Food::regular(Position { x: 6, y: 5 })];

        let (next, eaten) = match advance(&state, &mut rng(2), &mut CannedQuotes::default()) {
            TickOutcome::FoodConsumed(next, eaten) => (next, eaten),
            other => panic!("expected food consumption, got {other:?}"),
        };
        assert_eq!(eaten.position, Position { x: 6, y: 5 });
        assert_eq!(
            next.snake.segments().copied().collect::<Vec<_>>(),
            vec![
                Position { x: 6, y: 5 },
                Position { x: 5, y: 5 },
                Position { x: 4, y: 5 },
            ]
        );
        assert_eq!(next.score, 1);
        assert_eq!(next.foods.len(), 1);
        assert_ne!(next.foods[0].position, Position { x: 6, y: 5 });
        assert!(!next.snake.occupies(next.foods[0].position));
    }

    #[test]
    fn wall_hit_reports_collision_and_leaves_state_alone() {
        let mut state = GameState::new(BOUNDS);
        state.snake = Snake::from_segments(
            vec![Position { x: 0, y: 5 }, Position { x: 1, y: 5 }],
            Direction::Left,
        );
        let before = state.clone();

        let outcome = advance(&state, &mut rng(3), &mut NoQuotes);

        assert_eq!(outcome, TickOutcome::Collided(CollisionKind::Wall));
        assert_eq!(state, before);
    }

    #[test]
    fn body_hit_is_fatal_but_tail_cell_is_not() {
        // Head at (2,2) moving left into (1,2), which is the tail: legal,
        // because the tail vacates on the same tick.
        let mut state = GameState::new(BOUNDS);
        state.snake = Snake::from_segments(
            vec![
                Position { x: 2, y: 2 },
                Position { x: 2, y: 3 },
                Position { x: 1, y: 3 },
                Position { x: 1, y: 2 },
            ],
            Direction::Left,
        );
        let outcome = advance(&state, &mut rng(4), &mut NoQuotes);
        assert!(matches!(outcome, TickOutcome::Continued(_)));

        // One more body segment behind the tail makes the same cell fatal.
        state.snake = Snake::from_segments(
            vec![
                Position { x: 2, y: 2 },
                Position { x: 2, y: 3 },
                Position { x: 1, y: 3 },
                Position { x: 1, y: 2 },
                Position { x: 0, y: 2 },
            ],
            Direction::Left,
        );
        let outcome = advance(&state, &mut rng(4), &mut NoQuotes);
        assert_eq!(outcome, TickOutcome::Collided(CollisionKind::SelfHit));
    }

    #[test]
    fn obstacle_hit_reports_its_own_reason() {
        let mut state = GameState::new(BOUNDS);
        state.snake = Snake::new(Position { x: 5, y: 5 }, Direction::Right);
        state.obstacles = HashSet::from([Position { x: 6, y: 5 }]);

        let outcome = advance(&state, &mut rng(5), &mut NoQuotes);

        assert_eq!(outcome, TickOutcome::Collided(CollisionKind::Obstacle));
    }

    #[test]
    fn respawn_is_skipped_when_the_board_is_full() {
        // 2×2 board: snake bent around three cells, food in the fourth.
        // After eating, the snake covers the whole board and the refill
        // has nowhere to go.
        let bounds = GridSize {
            width: 2,
            height: 2,
        };
        let mut state = GameState::new(bounds);
        state.snake = Snake::from_segments(
            vec![
                Position { x: 0, y: 1 },
                Position { x: 1, y: 1 },
                Position { x: 1, y: 0 },
            ],
            Direction::Up,
        );
        state.foods = vec![Food::regular(Position { x: 0, y: 0 })];

        let next = match advance(&state, &mut rng(6), &mut NoQuotes) {
            TickOutcome::FoodConsumed(next, _) => next,
            other => panic!("expected food consumption, got {other:?}"),
        };
        assert_eq!(next.snake.len(), 4);
        assert!(next.foods.is_empty());
    }

    #[test]
    fn populate_fills_food_and_obstacle_quotas_without_overlap() {
        let mut state = GameState::new(BOUNDS);
        state
            .populate(&mut rng(7), HARD, &mut CannedQuotes::default())
            .expect("the 15x15 board has room");

        assert_eq!(state.foods.len(), 3);
        assert_eq!(state.obstacles.len(), 8);

        let mut cells: Vec<Position> = state.snake.segments().copied().collect();
        cells.extend(state.foods.iter().map(|food| food.position));
        cells.extend(state.obstacles.iter().copied());
        let distinct: HashSet<Position> = cells.iter().copied().collect();
        assert_eq!(distinct.len(), cells.len());
    }

    #[test]
    fn populate_leaves_the_board_empty_when_it_cannot_finish() {
        // 2×2 board cannot hold snake + 3 foods + obstacles.
        let mut state = GameState::new(GridSize {
            width: 2,
            height: 2,
        });

        let result = state.populate(&mut rng(8), MEDIUM, &mut NoQuotes);

        assert!(result.is_err());
        assert!(state.foods.is_empty());
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn foods_carry_rotating_flavor_lines() {
        let mut state = GameState::new(BOUNDS);
        state
            .populate(&mut rng(9), MEDIUM, &mut CannedQuotes::default())
            .expect("the 15x15 board has room");

        for food in &state.foods {
            assert!(food.flavor.ends_with(&format!("({} pts)", food.points())));
        }
    }
}
