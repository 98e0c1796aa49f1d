use std::collections::HashSet;

use rand::Rng;
use thiserror::Error;

use crate::config::GridSize;
use crate::snake::Position;

/// Placement failed because every cell on the board is already taken.
///
/// Recoverable: mid-game callers skip the spawn, while board population
/// aborts atomically and the session stays idle.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
#[error("no free cell left on the {width}x{height} board")]
pub struct GridExhausted {
    pub width: u16,
    pub height: u16,
}

/// Draws a uniformly random free cell.
///
/// Rejection-samples random in-bounds cells until one misses `occupied`.
/// The exhaustion check up front guarantees termination; expected draws are
/// O(1) while the board is sparse. `occupied` must only contain in-bounds
/// cells.
pub fn free_cell<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    occupied: &HashSet<Position>,
) -> Result<Position, GridExhausted> {
    if occupied.len() >= bounds.total_cells() {
        return Err(GridExhausted {
            width: bounds.width,
            height: bounds.height,
        });
    }

    loop {
        let candidate = Position {
            x: rng.gen_range(0..i32::from(bounds.width)),
            y: rng.gen_range(0..i32::from(bounds.height)),
        };
        if !occupied.contains(&candidate) {
            return Ok(candidate);
        }
    }
}

/// Draws `count` mutually distinct free cells.
///
/// Each placed cell joins the exclusion set before the next draw, so the
/// batch can never overlap itself or `occupied`.
pub fn free_cells<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    count: usize,
    occupied: &HashSet<Position>,
) -> Result<Vec<Position>, GridExhausted> {
    let mut taken = occupied.clone();
    let mut placed = Vec::with_capacity(count);

    for _ in 0..count {
        let cell = free_cell(rng, bounds, &taken)?;
        taken.insert(cell);
        placed.push(cell);
    }

    Ok(placed)
}
