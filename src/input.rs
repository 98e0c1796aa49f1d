use crossterm::event::{KeyCode, KeyEvent};

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// High-level commands consumed by the session loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    /// Toggle pause while a game is in progress.
    Pause,
    /// Start a game, acknowledge a quote banner, or restart after game over.
    Confirm,
    /// Throw the current board away and return to the start screen.
    Reset,
    /// Index into [`crate::config::DIFFICULTIES`].
    SelectDifficulty(usize),
    Quit,
}

/// Maps a key press to a game command.
#[must_use]
pub fn decode_key(key: KeyEvent) -> Option<GameInput> {
    match key.code {
        KeyCode::Up | KeyCode::Char('w') => Some(GameInput::Direction(Direction::Up)),
        KeyCode::Down | KeyCode::Char('s') => Some(GameInput::Direction(Direction::Down)),
        KeyCode::Left | KeyCode::Char('a') => Some(GameInput::Direction(Direction::Left)),
        KeyCode::Right | KeyCode::Char('d') => Some(GameInput::Direction(Direction::Right)),
        KeyCode::Char('p') => Some(GameInput::Pause),
        KeyCode::Char('r') => Some(GameInput::Reset),
        KeyCode::Enter | KeyCode::Char(' ') => Some(GameInput::Confirm),
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            (index < crate::config::DIFFICULTIES.len()).then_some(GameInput::SelectDifficulty(index))
        }
        KeyCode::Char('q') | KeyCode::Esc => Some(GameInput::Quit),
        _ => None,
    }
}
