use crate::model::hand::Hand;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    name: String,
    hand: Hand,
    pending_skips: u32,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hand: Hand::new(),
            pending_skips: 0,
        }
    }

    pub fn from_parts(name: impl Into<String>, hand: Hand, pending_skips: u32) -> Self {
        Self {
            name: name.into(),
            hand,
            pending_skips,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }

    pub fn pending_skips(&self) -> u32 {
        self.pending_skips
    }

    pub fn add_pending_skips(&mut self, turns: u32) {
        self.pending_skips += turns;
    }

    /// Burns one owed skip. Returns whether a skip was consumed, i.e. whether
    /// this player loses the turn that just reached them.
    pub fn consume_skip(&mut self) -> bool {
        if self.pending_skips > 0 {
            self.pending_skips -= 1;
            true
        } else {
            false
        }
    }
}
