use rand::Rng;

use crate::config::FALLBACK_FLAVOR;
use crate::snake::Position;

/// Food variety and its score value.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FoodKind {
    Regular,
    Bonus,
    Super,
}

/// All kinds, drawn from uniformly at spawn time.
pub const FOOD_KINDS: &[FoodKind] = &[FoodKind::Regular, FoodKind::Bonus, FoodKind::Super];

impl FoodKind {
    /// Returns the score value granted when eaten.
    #[must_use]
    pub fn points(self) -> u32 {
        match self {
            Self::Regular => 1,
            Self::Bonus => 3,
            Self::Super => 5,
        }
    }

    /// Lowercase display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Bonus => "bonus",
            Self::Super => "super",
        }
    }

    /// Draws a uniformly random kind.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        FOOD_KINDS[rng.gen_range(0..FOOD_KINDS.len())]
    }
}

/// Food entity currently active on the board.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
    pub kind: FoodKind,
    /// Cosmetic description surfaced when eaten. No gameplay effect.
    pub flavor: String,
}

impl Food {
    /// Creates a food with an explicit flavor line.
    #[must_use]
    pub fn new(position: Position, kind: FoodKind, flavor: impl Into<String>) -> Self {
        Self {
            position,
            kind,
            flavor: flavor.into(),
        }
    }

    /// Creates a regular food with the fallback flavor.
    #[must_use]
    pub fn regular(position: Position) -> Self {
        Self::new(position, FoodKind::Regular, FALLBACK_FLAVOR)
    }

    /// Returns the score value granted when eaten.
    #[must_use]
    pub fn points(&self) -> u32 {
        self.kind.points()
    }
}
