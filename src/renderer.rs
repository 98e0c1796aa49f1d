use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::config::{
    GridSize, DIFFICULTIES, GLYPH_FOOD, GLYPH_OBSTACLE, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD_DOWN,
    GLYPH_SNAKE_HEAD_LEFT, GLYPH_SNAKE_HEAD_RIGHT, GLYPH_SNAKE_HEAD_UP,
};
use crate::food::FoodKind;
use crate::game::{CollisionKind, GameState, Phase};
use crate::input::Direction;
use crate::score::Leaderboard;
use crate::snake::Position;

/// Everything one frame needs besides the board state itself.
#[derive(Debug)]
pub struct FrameInfo<'a> {
    pub difficulty_name: &'a str,
    pub leaderboard: &'a Leaderboard,
    /// Flavor text of the food just eaten, shown until acknowledged.
    pub banner: Option<&'a str>,
    /// What ended the last run, for the game-over screen.
    pub last_collision: Option<CollisionKind>,
    /// Surfaced when starting the board failed.
    pub notice: Option<&'a str>,
}

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, state: &GameState, info: &FrameInfo<'_>) {
    let area = frame.area();
    let [hud_row, play_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(3)]).areas(area);

    render_hud(frame, hud_row, state, info);

    let block = Block::bordered().border_style(Style::new().fg(Color::White));
    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    render_obstacles(frame, inner, state);
    render_foods(frame, inner, state);
    render_snake(frame, inner, state);

    match state.phase {
        Phase::Idle => render_start_menu(frame, play_area, info),
        Phase::Paused => match info.banner {
            Some(banner) => render_quote_banner(frame, play_area, banner),
            None => render_pause_menu(frame, play_area),
        },
        Phase::GameOver => render_game_over_menu(frame, play_area, state.score, info),
        Phase::Running => {}
    }
}

fn render_hud(frame: &mut Frame<'_>, area: Rect, state: &GameState, info: &FrameInfo<'_>) {
    let best = info
        .leaderboard
        .best()
        .map_or_else(String::new, |entry| {
            format!("   Best: {} ({})", entry.score, entry.name)
        });
    let line = format!(
        " Score: {}   Difficulty: {}{best}",
        state.score, info.difficulty_name
    );
    frame.render_widget(
        Paragraph::new(Line::from(line)).style(Style::new().add_modifier(Modifier::REVERSED)),
        area,
    );
}

fn render_obstacles(frame: &mut Frame<'_>, inner: Rect, state: &GameState) {
    let buffer = frame.buffer_mut();
    for obstacle in &state.obstacles {
        let Some((x, y)) = logical_to_terminal(inner, state.bounds(), *obstacle) else {
            continue;
        };
        buffer.set_string(x, y, GLYPH_OBSTACLE, Style::new().fg(Color::DarkGray));
    }
}

fn render_foods(frame: &mut Frame<'_>, inner: Rect, state: &GameState) {
    let buffer = frame.buffer_mut();
    for food in &state.foods {
        let Some((x, y)) = logical_to_terminal(inner, state.bounds(), food.position) else {
            continue;
        };
        buffer.set_string(x, y, GLYPH_FOOD, Style::new().fg(food_color(food.kind)));
    }
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, state: &GameState) {
    let head = state.snake.head();

    let buffer = frame.buffer_mut();
    for segment in state.snake.segments() {
        let Some((x, y)) = logical_to_terminal(inner, state.bounds(), *segment) else {
            continue;
        };

        if *segment == head {
            buffer.set_string(
                x,
                y,
                head_glyph(state.snake.direction()),
                Style::new().fg(Color::Green).add_modifier(Modifier::BOLD),
            );
        } else {
            buffer.set_string(x, y, GLYPH_SNAKE_BODY, Style::new().fg(Color::Green));
        }
    }
}

/// Food colors follow the classic arcade palette: regular red, bonus gold,
/// super purple.
fn food_color(kind: FoodKind) -> Color {
    match kind {
        FoodKind::Regular => Color::Red,
        FoodKind::Bonus => Color::Yellow,
        FoodKind::Super => Color::Magenta,
    }
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => GLYPH_SNAKE_HEAD_UP,
        Direction::Down => GLYPH_SNAKE_HEAD_DOWN,
        Direction::Left => GLYPH_SNAKE_HEAD_LEFT,
        Direction::Right => GLYPH_SNAKE_HEAD_RIGHT,
    }
}

/// Draws the start screen as a centered popup.
fn render_start_menu(frame: &mut Frame<'_>, area: Rect, info: &FrameInfo<'_>) {
    let popup = centered_popup(area, 70, 60);
    frame.render_widget(Clear, popup);

    let mut lines = vec![
        Line::from("QUOTE SNAKE").style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
    ];
    for (index, difficulty) in DIFFICULTIES.iter().enumerate() {
        let marker = if difficulty.name == info.difficulty_name {
            "»"
        } else {
            " "
        };
        lines.push(Line::from(format!(
            "{marker} [{}] {} — {} obstacles",
            index + 1,
            difficulty.name,
            difficulty.obstacle_count
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from("[Enter]/[Space] Start   [Q] Quit"));
    if let Some(notice) = info.notice {
        lines.push(Line::from(""));
        lines.push(Line::from(notice).style(Style::default().fg(Color::Red)));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" start ")),
        popup,
    );
}

/// Draws the flavor text of the food just eaten; play resumes on
/// acknowledgment.
fn render_quote_banner(frame: &mut Frame<'_>, area: Rect, banner: &str) {
    let popup = centered_popup(area, 80, 40);
    frame.render_widget(Clear, popup);

    let max_width = usize::from(popup.width.saturating_sub(4));
    let lines = vec![
        Line::from("POWER-UP!").style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from(fit_to_width(banner, max_width)),
        Line::from(""),
        Line::from("[Enter]/[Space]/[P] Continue"),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" power-up ")),
        popup,
    );
}

/// Draws the pause screen as a centered popup.
fn render_pause_menu(frame: &mut Frame<'_>, area: Rect) {
    let popup = centered_popup(area, 60, 30);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("PAUSED"),
        Line::from(""),
        Line::from("[P] Resume   [R] Reset   [Q] Quit"),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" pause ")),
        popup,
    );
}

/// Draws the game-over screen with the top leaderboard entries.
fn render_game_over_menu(frame: &mut Frame<'_>, area: Rect, score: u32, info: &FrameInfo<'_>) {
    let popup = centered_popup(area, 70, 70);
    frame.render_widget(Clear, popup);

    let mut lines = vec![
        Line::from("GAME OVER").style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        Line::from(""),
        Line::from(format!("Score: {score}")),
        Line::from(match info.last_collision {
            Some(CollisionKind::Wall) => "Cause: hit the wall",
            Some(CollisionKind::SelfHit) => "Cause: hit yourself",
            Some(CollisionKind::Obstacle) => "Cause: hit an obstacle",
            None => "",
        }),
        Line::from(""),
    ];

    if info.leaderboard.entries().is_empty() {
        lines.push(Line::from("No high scores yet"));
    } else {
        lines.push(Line::from("High scores:"));
        for (rank, entry) in info.leaderboard.entries().iter().take(5).enumerate() {
            lines.push(Line::from(format!(
                "{}. {} — {} ({})",
                rank + 1,
                entry.name,
                entry.score,
                entry.difficulty
            )));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from("[Enter]/[Space] Play Again   [Q] Quit"));

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" game over ")),
        popup,
    );
}

/// Truncates `text` to at most `max_width` terminal columns, appending an
/// ellipsis when something was cut.
fn fit_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut fitted = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width + 1 > max_width {
            break;
        }
        fitted.push(ch);
        used += ch_width;
    }
    fitted.push('…');
    fitted
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}
