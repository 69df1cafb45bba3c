//! Player and BeltColor.

use crate::models::error::TournamentError;
use crate::models::tournament::TournamentId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in matches and lookups).
pub type PlayerId = Uuid;

/// Belt (aka) colour worn by the player.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BeltColor {
    Red,
    Blue,
}

impl BeltColor {
    /// Odd positions wear red, even positions wear blue.
    pub fn for_position(position: u32) -> Self {
        if position % 2 == 1 {
            BeltColor::Red
        } else {
            BeltColor::Blue
        }
    }
}

/// A player registered in a tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub tournament_id: TournamentId,
    pub name: String,
    /// 1-based seeding position, in insertion order.
    pub position: u32,
    pub belt_color: BeltColor,
}

impl Player {
    /// Create a player at `position`. The belt colour alternates by position unless given.
    pub fn new(
        tournament_id: TournamentId,
        name: impl Into<String>,
        position: u32,
        belt_color: Option<BeltColor>,
    ) -> Result<Self, TournamentError> {
        let name = validated_name(name)?;
        Ok(Self {
            id: Uuid::new_v4(),
            tournament_id,
            name,
            position,
            belt_color: belt_color.unwrap_or_else(|| BeltColor::for_position(position)),
        })
    }

    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), TournamentError> {
        self.name = validated_name(name)?;
        Ok(())
    }
}

fn validated_name(name: impl Into<String>) -> Result<String, TournamentError> {
    let name = name.into();
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(TournamentError::EmptyName);
    }
    Ok(trimmed.to_string())
}
