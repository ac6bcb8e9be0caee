use crate::model::card::Card;
use crate::model::modifier::Modifier;
use crate::model::rank::Rank;
use crate::model::suit::Suit;

/// What the top of the stack currently demands, classified from its rank,
/// its suit (the two penalty kings differ), and its live modifier. A spent
/// or absent modifier always falls back to `Open`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Constraint {
    Open,
    SuitDemand(Suit),
    RankDemand(Rank),
    KingHeartsChain,
    KingSpadesChain,
    SkipChain,
    ThreeChain,
    TwoChain,
}

fn classify(top: Card, modifier: Option<Modifier>) -> Constraint {
    match modifier {
        Some(Modifier::DemandSuit(suit)) => Constraint::SuitDemand(suit),
        Some(Modifier::DemandRank(rank)) => Constraint::RankDemand(rank),
        Some(Modifier::SkipChain) => Constraint::SkipChain,
        Some(Modifier::DrawChain) => match (top.rank, top.suit) {
            (Rank::King, Suit::Hearts) => Constraint::KingHeartsChain,
            (Rank::King, Suit::Spades) => Constraint::KingSpadesChain,
            (Rank::Three, _) => Constraint::ThreeChain,
            (Rank::Two, _) => Constraint::TwoChain,
            _ => Constraint::Open,
        },
        Some(Modifier::Spent) | None => Constraint::Open,
    }
}

/// Whether `candidate` may be laid on `top`. While a special effect is
/// unresolved the matching rule comes from the chain, not from the top
/// card's identity; otherwise suit match, rank match, or a queen on either
/// side suffices.
pub fn is_valid_play(candidate: Card, top: Card, modifier: Option<Modifier>) -> bool {
    match classify(top, modifier) {
        Constraint::Open => {
            candidate.suit == top.suit
                || candidate.rank == top.rank
                || candidate.rank == Rank::Queen
                || top.rank == Rank::Queen
        }
        Constraint::SuitDemand(suit) => candidate.suit == suit || candidate.rank == top.rank,
        Constraint::RankDemand(rank) => candidate.rank == rank || candidate.rank == top.rank,
        Constraint::KingHeartsChain => {
            (candidate.suit == top.suit && matches!(candidate.rank, Rank::Two | Rank::Three))
                || candidate.is_king_of_spades()
        }
        Constraint::KingSpadesChain => {
            (candidate.suit == top.suit && matches!(candidate.rank, Rank::Two | Rank::Three))
                || candidate.is_king_of_hearts()
        }
        Constraint::SkipChain => candidate.rank == Rank::Four,
        Constraint::ThreeChain => {
            candidate.rank == Rank::Three
                || (matches!(candidate.rank, Rank::Two | Rank::King) && candidate.suit == top.suit)
        }
        Constraint::TwoChain => {
            candidate.rank == Rank::Two
                || (matches!(candidate.rank, Rank::Three | Rank::King) && candidate.suit == top.suit)
        }
    }
}
