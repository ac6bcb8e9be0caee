use crate::model::rank::Rank;
use crate::model::suit::Suit;
use serde::{Deserialize, Serialize};

/// Transient tag carried by the top of the discard stack while a special
/// card's effect is unresolved. Owned by the stack, never by a card: at most
/// one modifier is live at any time, and it always describes the top card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Modifier {
    /// An ace was played and this suit was demanded.
    DemandSuit(Suit),
    /// A jack was played and this rank was demanded.
    DemandRank(Rank),
    /// An unresolved 2/3/penalty-king chain.
    DrawChain,
    /// An unresolved chain of fours.
    SkipChain,
    /// The effect has been absorbed; the card constrains play no further.
    Spent,
}
