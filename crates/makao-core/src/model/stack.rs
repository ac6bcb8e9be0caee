use crate::model::card::Card;
use crate::model::deck::Deck;
use crate::model::modifier::Modifier;
use serde::{Deserialize, Serialize};

/// Number of discards kept on the table; older cards migrate back into the
/// deck.
pub const VISIBLE_CARDS: usize = 5;

/// The discard pile. Only the top card is "live": it alone may carry a
/// modifier, and it alone governs what may be played next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscardStack {
    cards: Vec<Card>,
    modifier: Option<Modifier>,
}

impl DiscardStack {
    /// Seeds the pile with the opening card, which never carries an effect.
    pub fn open(card: Card) -> Self {
        Self {
            cards: vec![card],
            modifier: None,
        }
    }

    pub fn from_parts(cards: Vec<Card>, modifier: Option<Modifier>) -> Self {
        Self { cards, modifier }
    }

    /// Covers the previous top. Whatever effect it carried is gone; the new
    /// top starts unmodified.
    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
        self.modifier = None;
    }

    pub fn top(&self) -> Option<Card> {
        self.cards.last().copied()
    }

    pub fn modifier(&self) -> Option<Modifier> {
        self.modifier
    }

    pub fn set_modifier(&mut self, modifier: Modifier) {
        self.modifier = Some(modifier);
    }

    /// Marks the top card's effect as absorbed.
    pub fn spend_modifier(&mut self) {
        self.modifier = Some(Modifier::Spent);
    }

    /// Migrates everything below the visible tail back into the deck.
    pub fn recycle_into(&mut self, deck: &mut Deck) {
        if self.cards.len() > VISIBLE_CARDS {
            let overflow = self.cards.len() - VISIBLE_CARDS;
            deck.return_all_to_bottom(self.cards.drain(..overflow));
        }
    }

    /// The tail rendered on the table, topmost card last.
    pub fn visible(&self) -> &[Card] {
        let start = self.cards.len().saturating_sub(VISIBLE_CARDS);
        &self.cards[start..]
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}
