use super::table::{TablePhase, TableState};
use crate::model::card::Card;
use crate::model::deck::Deck;
use crate::model::modifier::Modifier;
use crate::model::player::Player;
use crate::model::seat::Seat;
use crate::model::stack::DiscardStack;
use core::fmt;
use serde::{Deserialize, Serialize};

/// A full-fidelity copy of the table: every card, hand, accumulator, and the
/// live modifier round-trip exactly. Unlike a seed, this survives penalty
/// draws and discard recycling, so a game can resume mid-chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub players: Vec<Player>,
    pub current: Seat,
    pub deck: Vec<Card>,
    pub stack: Vec<Card>,
    pub stack_modifier: Option<Modifier>,
    pub skip_chain: u32,
    pub draw_chain: u32,
    pub deck_enabled: bool,
    pub phase: TablePhase,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreError {
    /// The snapshot must describe exactly four seats.
    PlayerCount(usize),
}

impl fmt::Display for RestoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestoreError::PlayerCount(count) => {
                write!(f, "snapshot describes {count} players, expected 4")
            }
        }
    }
}

impl std::error::Error for RestoreError {}

impl TableSnapshot {
    pub fn capture(state: &TableState) -> Self {
        TableSnapshot {
            players: Seat::LOOP
                .iter()
                .map(|&seat| state.player(seat).clone())
                .collect(),
            current: state.current_seat(),
            deck: state.deck().cards().to_vec(),
            stack: state.stack().cards().to_vec(),
            stack_modifier: state.stack().modifier(),
            skip_chain: state.skip_chain(),
            draw_chain: state.draw_chain(),
            deck_enabled: state.deck_enabled(),
            phase: state.phase(),
        }
    }

    pub fn restore(self) -> Result<TableState, RestoreError> {
        let count = self.players.len();
        let players: [Player; 4] = self
            .players
            .try_into()
            .map_err(|_| RestoreError::PlayerCount(count))?;
        Ok(TableState::from_parts(
            players,
            self.current,
            Deck::from_cards(self.deck),
            DiscardStack::from_parts(self.stack, self.stack_modifier),
            self.skip_chain,
            self.draw_chain,
            self.deck_enabled,
            self.phase,
        ))
    }

    pub fn to_json(state: &TableState) -> serde_json::Result<String> {
        let snapshot = Self::capture(state);
        serde_json::to_string_pretty(&snapshot)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
