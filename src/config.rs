use std::time::Duration;

use crate::snake::Position;

/// Logical grid dimensions passed through the game as a named type.
///
/// Keeps width vs. height unambiguous at every call site even though the
/// arcade board happens to be square.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// The classic 15×15 arcade board.
pub const GRID_SIZE: GridSize = GridSize {
    width: 15,
    height: 15,
};

/// Cell where every new snake starts, facing right.
pub const SNAKE_START: Position = Position { x: 5, y: 5 };

/// Number of foods kept on the board while a game is running.
pub const FOOD_COUNT: usize = 3;

/// Flavor text used when the quote source has nothing ready.
pub const FALLBACK_FLAVOR: &str = "Power-up!";

/// One selectable difficulty: board pace and obstacle density.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Difficulty {
    pub name: &'static str,
    pub tick_interval_ms: u64,
    pub obstacle_count: usize,
}

impl Difficulty {
    /// Time between simulation ticks at this difficulty.
    #[must_use]
    pub fn tick_interval(self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

/// Leisurely pace, few obstacles.
pub const EASY: Difficulty = Difficulty {
    name: "Easy",
    tick_interval_ms: 300,
    obstacle_count: 3,
};

/// Default arcade pace.
pub const MEDIUM: Difficulty = Difficulty {
    name: "Medium",
    tick_interval_ms: 200,
    obstacle_count: 5,
};

/// Fast ticks and a crowded board.
pub const HARD: Difficulty = Difficulty {
    name: "Hard",
    tick_interval_ms: 150,
    obstacle_count: 8,
};

/// All difficulties in selection order.
pub const DIFFICULTIES: &[Difficulty] = &[EASY, MEDIUM, HARD];

/// Glyph for a food cell.
pub const GLYPH_FOOD: &str = "●";

/// Glyph for an obstacle cell.
pub const GLYPH_OBSTACLE: &str = "█";

/// Glyph for a snake body segment.
pub const GLYPH_SNAKE_BODY: &str = "○";

/// Snake head glyphs by travel direction.
pub const GLYPH_SNAKE_HEAD_UP: &str = "▲";
pub const GLYPH_SNAKE_HEAD_DOWN: &str = "▼";
pub const GLYPH_SNAKE_HEAD_LEFT: &str = "◀";
pub const GLYPH_SNAKE_HEAD_RIGHT: &str = "▶";

#[cfg(test)]
mod tests {
    use super::{DIFFICULTIES, GRID_SIZE};

    #[test]
    fn grid_cell_count_matches_dimensions() {
        assert_eq!(GRID_SIZE.total_cells(), 225);
    }

    #[test]
    fn difficulties_get_faster_and_denser() {
        for pair in DIFFICULTIES.windows(2) {
            assert!(pair[0].tick_interval_ms > pair[1].tick_interval_ms);
            assert!(pair[0].obstacle_count < pair[1].obstacle_count);
        }
    }
}
