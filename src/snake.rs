use std::collections::VecDeque;

use crate::config::GridSize;
use crate::input::Direction;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns the neighboring cell one step in `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        match direction {
            Direction::Up => Self {
                x: self.x,
                y: self.y - 1,
            },
            Direction::Down => Self {
                x: self.x,
                y: self.y + 1,
            },
            Direction::Left => Self {
                x: self.x - 1,
                y: self.y,
            },
            Direction::Right => Self {
                x: self.x + 1,
                y: self.y,
            },
        }
    }
}

/// Mutable snake state and movement buffering behavior.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
    buffered_direction: Direction,
    next_buffered_direction: Option<Direction>,
    grow: bool,
}

impl Snake {
    /// Creates a one-cell snake at `start` with the provided direction.
    #[must_use]
    pub fn new(start: Position, direction: Direction) -> Self {
        let mut body = VecDeque::new();
        body.push_front(start);

        Self {
            body,
            direction,
            buffered_direction: direction,
            next_buffered_direction: None,
            grow: false,
        }
    }

    /// Creates a snake from explicit body segments (front is head).
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, direction: Direction) -> Self {
        Self {
            body: VecDeque::from(segments),
            direction,
            buffered_direction: direction,
            next_buffered_direction: None,
            grow: false,
        }
    }

    /// Queues growth on the next movement tick.
    pub fn grow_next(&mut self) {
        self.grow = true;
    }

    /// Applies one buffered movement step.
    pub fn move_forward(&mut self) {
        self.direction = self.buffered_direction;
        let next_head = self.next_head_position();

        if let Some(next) = self.next_buffered_direction.take() {
            self.buffered_direction = next;
        }

        self.body.push_front(next_head);
        if !self.grow {
            let _ = self.body.pop_back();
        }
        self.grow = false;
    }

    /// Returns the head position for the next movement tick.
    #[must_use]
    pub fn next_head_position(&self) -> Position {
        self.head().step(self.buffered_direction)
    }

    /// Buffers the next direction, supporting a two-deep queue for quick turns.
    ///
    /// When no turn is queued yet, the direction is stored as the primary
    /// buffered direction (rejecting direct reversals of the current
    /// direction). When a turn is already queued, a second direction is
    /// stored with last-input-wins semantics (rejecting reversals of the
    /// *queued* direction).
    pub fn buffer_direction(&mut self, direction: Direction) {
        if self.buffered_direction == self.direction {
            if direction == self.direction.opposite() {
                return;
            }
            self.buffered_direction = direction;
        } else {
            if direction == self.buffered_direction.opposite() {
                return;
            }
            self.next_buffered_direction = Some(direction);
        }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns true if any segment other than the tail occupies `position`.
    ///
    /// The tail cell vacates on the tick being evaluated, so it is a legal
    /// target for the incoming head.
    #[must_use]
    pub fn occupies_excluding_tail(&self, position: Position) -> bool {
        let len = self.body.len();
        self.body
            .iter()
            .take(len.saturating_sub(1))
            .any(|segment| *segment == position)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the current movement direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GridSize;
    use crate::input::Direction;

    use super::{Position, Snake};

    #[test]
    fn bounds_predicate_covers_all_four_edges() {
        let bounds = GridSize {
            width: 15,
            height: 15,
        };

        assert!(Position { x: 0, y: 0 }.is_within_bounds(bounds));
        assert!(Position { x: 14, y: 14 }.is_within_bounds(bounds));
        assert!(!Position { x: -1, y: 5 }.is_within_bounds(bounds));
        assert!(!Position { x: 5, y: -1 }.is_within_bounds(bounds));
        assert!(!Position { x: 15, y: 5 }.is_within_bounds(bounds));
        assert!(!Position { x: 5, y: 15 }.is_within_bounds(bounds));
    }

    #[test]
    fn step_moves_one_cell() {
        let origin = Position { x: 5, y: 5 };
        assert_eq!(origin.step(Direction::Up), Position { x: 5, y: 4 });
        assert_eq!(origin.step(Direction::Down), Position { x: 5, y: 6 });
        assert_eq!(origin.step(Direction::Left), Position { x: 4, y: 5 });
        assert_eq!(origin.step(Direction::Right), Position { x: 6, y: 5 });
    }

    #[test]
    fn snake_moves_one_cell_per_tick() {
        let mut snake = Snake::new(Position { x: 5, y: 5 }, Direction::Right);

        snake.move_forward();

        assert_eq!(snake.head(), Position { x: 6, y: 5 });
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn snake_growth_keeps_previous_tail() {
        let mut snake = Snake::new(Position { x: 5, y: 5 }, Direction::Right);

        snake.grow_next();
        snake.move_forward();

        assert_eq!(snake.len(), 2);
    }

    #[test]
    fn direction_buffer_rejects_reverse() {
        let mut snake = Snake::new(Position { x: 5, y: 5 }, Direction::Up);

        snake.buffer_direction(Direction::Down);
        snake.move_forward();

        assert_eq!(snake.head(), Position { x: 5, y: 4 });
    }

    #[test]
    fn direction_buffer_two_deep_queue() {
        let mut snake = Snake::new(Position { x: 5, y: 5 }, Direction::Down);

        // Right goes into the primary slot, Up into the second.
        snake.buffer_direction(Direction::Right);
        snake.buffer_direction(Direction::Up);

        snake.move_forward();
        assert_eq!(snake.head(), Position { x: 6, y: 5 });

        snake.move_forward();
        assert_eq!(snake.head(), Position { x: 6, y: 4 });
    }

    #[test]
    fn direction_buffer_rejects_reversal_of_queued_direction() {
        let mut snake = Snake::new(Position { x: 5, y: 5 }, Direction::Down);

        snake.buffer_direction(Direction::Right);
        // Left reverses the queued Right and must be dropped.
        snake.buffer_direction(Direction::Left);

        snake.move_forward();
        assert_eq!(snake.head(), Position { x: 6, y: 5 });

        snake.move_forward();
        assert_eq!(snake.head(), Position { x: 7, y: 5 });
    }

    #[test]
    fn tail_cell_is_not_counted_as_body_collision() {
        let snake = Snake::from_segments(
            vec![
                Position { x: 2, y: 2 },
                Position { x: 2, y: 3 },
                Position { x: 1, y: 3 },
                Position { x: 1, y: 2 },
            ],
            Direction::Left,
        );

        // (1, 2) is the tail and vacates this tick.
        assert!(!snake.occupies_excluding_tail(Position { x: 1, y: 2 }));
        assert!(snake.occupies_excluding_tail(Position { x: 2, y: 3 }));
        assert!(snake.occupies(Position { x: 1, y: 2 }));
    }
}
