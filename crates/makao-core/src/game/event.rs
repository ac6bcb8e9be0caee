use crate::model::card::Card;
use crate::model::rank::Rank;
use crate::model::seat::Seat;
use crate::model::suit::Suit;
use serde::{Deserialize, Serialize};

/// Notifications produced while the engine mutates the table. State is fully
/// settled before any event becomes visible; the presentation layer drains
/// them after each operation and may pause on them freely without affecting
/// the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableEvent {
    /// The turn pointer settled on this seat.
    TurnStarted { seat: Seat },
    /// This seat owed a skip and lost the turn that reached them.
    TurnSkipped { seat: Seat },
    /// A 2/3/penalty-king raised the pending draw penalty.
    PenaltyRaised { card: Card, amount: u8, total: u32 },
    /// A chain of fours closed on this seat.
    SkipsImposed { seat: Seat, turns: u32 },
    /// A draw chain closed on this seat; `drawn` may fall short of `owed`
    /// when the deck ran dry.
    ForcedDraw { seat: Seat, owed: u32, drawn: u32 },
    /// A draw was attempted against an empty deck.
    DeckExhausted,
    /// An ace fixed the suit that must follow.
    SuitDemanded { suit: Suit },
    /// A jack fixed the rank that must follow.
    RankDemanded { rank: Rank },
    /// This seat shed their last card.
    GameWon { winner: Seat },
}
