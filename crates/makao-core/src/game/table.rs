use crate::game::event::TableEvent;
use crate::game::rules;
use crate::model::card::Card;
use crate::model::deck::{Deck, EmptyDeck};
use crate::model::modifier::Modifier;
use crate::model::player::Player;
use crate::model::rank::Rank;
use crate::model::seat::Seat;
use crate::model::stack::DiscardStack;
use crate::model::suit::Suit;
use core::fmt;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Cards dealt to each seat at the start of a game.
pub const HAND_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TablePhase {
    /// The current seat must play, draw, or pass.
    Turn,
    /// An ace sits on top; its suit demand has not been supplied yet.
    ChoosingSuit,
    /// A jack sits on top; its rank demand has not been supplied yet.
    ChoosingRank,
    Finished { winner: Seat },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    TurnEnded,
    /// The play is held open until `resolve_suit` supplies the demand.
    SuitChoicePending,
    /// The play is held open until `resolve_rank` supplies the demand.
    RankChoicePending,
    GameWon { winner: Seat },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOutcome {
    /// The card entered the hand; the seat keeps the turn but the deck is
    /// spent until the turn ends.
    Drew(Card),
    /// Nothing left to draw; the turn passed.
    DeckExhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawBlock {
    /// The deck was already used this turn.
    AlreadyDrew,
    /// A chain of fours must be answered with a four, not a draw.
    SkipChainOpen,
    /// A draw penalty must be answered by playing, not by passing.
    DrawChainOpen,
    /// The turn cannot be passed before drawing.
    NothingDrawn,
}

impl fmt::Display for DrawBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DrawBlock::AlreadyDrew => "the deck was already used this turn",
            DrawBlock::SkipChainOpen => "an open skip chain must be answered with a four",
            DrawBlock::DrawChainOpen => "an open draw penalty must be answered by playing",
            DrawBlock::NothingDrawn => "the turn cannot be passed before drawing",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    GameOver,
    /// A suit or rank choice is still owed; no other operation may run.
    ChoicePending,
    NoChoicePending,
    OutOfTurn { expected: Seat, actual: Seat },
    /// Caller-contract violation: plays must come from the acting hand.
    CardNotInHand(Card),
    IllegalPlay(Card),
    ForbiddenDraw(DrawBlock),
    /// Only plain ranks may be demanded after a jack.
    IllegalDemand(Rank),
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::GameOver => write!(f, "the game is over"),
            TableError::ChoicePending => write!(f, "a suit or rank choice is still pending"),
            TableError::NoChoicePending => write!(f, "no suit or rank choice is pending"),
            TableError::OutOfTurn { expected, actual } => {
                write!(f, "expected {expected} to act but got {actual}")
            }
            TableError::CardNotInHand(card) => {
                write!(f, "{card} is not in the acting player's hand")
            }
            TableError::IllegalPlay(card) => write!(f, "{card} cannot be laid on the stack"),
            TableError::ForbiddenDraw(block) => write!(f, "{block}"),
            TableError::IllegalDemand(rank) => write!(f, "{rank} cannot be demanded"),
        }
    }
}

impl std::error::Error for TableError {}

/// The whole table: four seats, the draw pile, the discard stack, the turn
/// pointer, and the two penalty accumulators. Every game mutation goes
/// through here, one synchronous operation at a time.
#[derive(Debug, Clone)]
pub struct TableState {
    players: [Player; 4],
    current: Seat,
    deck: Deck,
    stack: DiscardStack,
    skip_chain: u32,
    draw_chain: u32,
    deck_enabled: bool,
    phase: TablePhase,
    events: Vec<TableEvent>,
}

impl TableState {
    pub fn new(names: [String; 4]) -> Self {
        let seed: u64 = rand::random();
        Self::with_seed(names, seed)
    }

    pub fn with_seed(names: [String; 4], seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::deal(names, &mut rng)
    }

    /// Shuffles, deals five cards round-robin, then opens the stack with the
    /// first plain card drawn; action cards are returned to the bottom of
    /// the deck and never open play.
    pub fn deal<R: rand::Rng + ?Sized>(names: [String; 4], rng: &mut R) -> Self {
        let mut deck = Deck::shuffled(rng);
        let mut players = names.map(Player::new);

        for _ in 0..HAND_SIZE {
            for player in players.iter_mut() {
                let card = deck.draw_top().expect("52 cards cover the deal");
                player.hand_mut().add(card);
            }
        }

        let opening = loop {
            let card = deck
                .draw_top()
                .expect("the deck keeps at least one plain card after the deal");
            if card.rank.is_plain() {
                break card;
            }
            deck.return_to_bottom(card);
        };

        Self {
            players,
            current: Seat::North,
            deck,
            stack: DiscardStack::open(opening),
            skip_chain: 0,
            draw_chain: 0,
            deck_enabled: true,
            phase: TablePhase::Turn,
            events: Vec::new(),
        }
    }

    /// Rebuilds a table from explicit components; used by snapshot restore
    /// and by scenario tests.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        players: [Player; 4],
        current: Seat,
        deck: Deck,
        stack: DiscardStack,
        skip_chain: u32,
        draw_chain: u32,
        deck_enabled: bool,
        phase: TablePhase,
    ) -> Self {
        Self {
            players,
            current,
            deck,
            stack,
            skip_chain,
            draw_chain,
            deck_enabled,
            phase,
            events: Vec::new(),
        }
    }

    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat.index()]
    }

    pub fn current_seat(&self) -> Seat {
        self.current
    }

    pub fn current_player(&self) -> &Player {
        self.player(self.current)
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn stack(&self) -> &DiscardStack {
        &self.stack
    }

    pub fn skip_chain(&self) -> u32 {
        self.skip_chain
    }

    pub fn draw_chain(&self) -> u32 {
        self.draw_chain
    }

    pub fn deck_enabled(&self) -> bool {
        self.deck_enabled
    }

    pub fn phase(&self) -> TablePhase {
        self.phase
    }

    pub fn winner(&self) -> Option<Seat> {
        match self.phase {
            TablePhase::Finished { winner } => Some(winner),
            _ => None,
        }
    }

    /// Notifications accumulated since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<TableEvent> {
        std::mem::take(&mut self.events)
    }

    /// Lays `card` from the acting hand onto the stack and resolves its
    /// effect. Aces and jacks suspend the turn until the matching
    /// `resolve_*` call supplies the demand; everything else settles the
    /// turn synchronously. Validation precedes every mutation: an error
    /// leaves the table untouched.
    pub fn play_card(&mut self, seat: Seat, card: Card) -> Result<PlayOutcome, TableError> {
        self.ensure_actionable(seat)?;
        if !self.current_player().hand().contains(card) {
            return Err(TableError::CardNotInHand(card));
        }
        let top = self.stack.top().expect("the stack holds the opening card");
        if !rules::is_valid_play(card, top, self.stack.modifier()) {
            return Err(TableError::IllegalPlay(card));
        }

        self.players[self.current.index()].hand_mut().remove(card);
        tracing::debug!(seat = %self.current, card = %card, "card laid");

        match card.rank {
            Rank::Ace => {
                self.lay(card);
                self.phase = TablePhase::ChoosingSuit;
                Ok(PlayOutcome::SuitChoicePending)
            }
            Rank::Jack => {
                self.lay(card);
                self.phase = TablePhase::ChoosingRank;
                Ok(PlayOutcome::RankChoicePending)
            }
            Rank::Four => {
                self.skip_chain += 1;
                self.lay(card);
                self.stack.set_modifier(Modifier::SkipChain);
                let target = self.current.next();
                if !self.player(target).hand().has_rank(Rank::Four) {
                    let turns = self.skip_chain;
                    self.players[target.index()].add_pending_skips(turns);
                    self.skip_chain = 0;
                    self.stack.spend_modifier();
                    self.push_event(TableEvent::SkipsImposed { seat: target, turns });
                    tracing::debug!(seat = %target, turns, "skip chain closed");
                }
                self.advance_forward();
                Ok(self.turn_outcome())
            }
            _ if card.forced_draw_value() > 0 => Ok(self.resolve_penalty_card(card)),
            _ => {
                self.lay(card);
                self.advance_forward();
                Ok(self.turn_outcome())
            }
        }
    }

    /// Supplies the suit demanded by a pending ace and settles the turn.
    pub fn resolve_suit(&mut self, suit: Suit) -> Result<PlayOutcome, TableError> {
        if self.phase != TablePhase::ChoosingSuit {
            return Err(TableError::NoChoicePending);
        }
        self.stack.set_modifier(Modifier::DemandSuit(suit));
        self.push_event(TableEvent::SuitDemanded { suit });
        tracing::debug!(%suit, "suit demanded");
        self.phase = TablePhase::Turn;
        self.advance_forward();
        Ok(self.turn_outcome())
    }

    /// Supplies the rank demanded by a pending jack and settles the turn.
    /// Only plain ranks may be demanded.
    pub fn resolve_rank(&mut self, rank: Rank) -> Result<PlayOutcome, TableError> {
        if self.phase != TablePhase::ChoosingRank {
            return Err(TableError::NoChoicePending);
        }
        if !rank.is_plain() {
            return Err(TableError::IllegalDemand(rank));
        }
        self.stack.set_modifier(Modifier::DemandRank(rank));
        self.push_event(TableEvent::RankDemanded { rank });
        tracing::debug!(%rank, "rank demanded");
        self.phase = TablePhase::Turn;
        self.advance_forward();
        Ok(self.turn_outcome())
    }

    /// Voluntary draw in place of a play. Refused while the deck is spent
    /// for this turn or while a skip chain is open. An exhausted deck
    /// aborts the draw and passes the turn.
    pub fn draw_from_deck(&mut self, seat: Seat) -> Result<DrawOutcome, TableError> {
        self.ensure_actionable(seat)?;
        if !self.deck_enabled {
            return Err(TableError::ForbiddenDraw(DrawBlock::AlreadyDrew));
        }
        if self.stack.modifier() == Some(Modifier::SkipChain) {
            return Err(TableError::ForbiddenDraw(DrawBlock::SkipChainOpen));
        }
        match self.deck.draw_top() {
            Ok(card) => {
                self.players[self.current.index()].hand_mut().add(card);
                self.deck_enabled = false;
                tracing::debug!(seat = %self.current, card = %card, "voluntary draw");
                Ok(DrawOutcome::Drew(card))
            }
            Err(EmptyDeck) => {
                self.push_event(TableEvent::DeckExhausted);
                self.advance_forward();
                Ok(DrawOutcome::DeckExhausted)
            }
        }
    }

    /// Ends the turn after a voluntary draw left the seat with nothing to
    /// play. Refused before drawing, and refused outright while a draw
    /// penalty hangs over the stack.
    pub fn pass_turn(&mut self, seat: Seat) -> Result<(), TableError> {
        self.ensure_actionable(seat)?;
        if self.deck_enabled {
            return Err(TableError::ForbiddenDraw(DrawBlock::NothingDrawn));
        }
        if self.stack.modifier() == Some(Modifier::DrawChain) {
            return Err(TableError::ForbiddenDraw(DrawBlock::DrawChainOpen));
        }
        self.advance_forward();
        Ok(())
    }

    fn ensure_actionable(&self, seat: Seat) -> Result<(), TableError> {
        match self.phase {
            TablePhase::Finished { .. } => return Err(TableError::GameOver),
            TablePhase::ChoosingSuit | TablePhase::ChoosingRank => {
                return Err(TableError::ChoicePending);
            }
            TablePhase::Turn => {}
        }
        if seat != self.current {
            return Err(TableError::OutOfTurn {
                expected: self.current,
                actual: seat,
            });
        }
        Ok(())
    }

    /// 2, 3, and the two penalty kings: raise the draw chain, then settle
    /// against the target seat. The king of spades turns on the previous
    /// seat and reverses the pointer for one step; everything else targets
    /// the next seat.
    fn resolve_penalty_card(&mut self, card: Card) -> PlayOutcome {
        let amount = card.forced_draw_value();
        self.draw_chain += u32::from(amount);
        self.push_event(TableEvent::PenaltyRaised {
            card,
            amount,
            total: self.draw_chain,
        });
        tracing::debug!(card = %card, total = self.draw_chain, "draw penalty raised");

        self.lay(card);
        self.stack.set_modifier(Modifier::DrawChain);

        if card.is_king_of_spades() {
            let target = self.current.previous();
            if !self.seat_has_counter(target) {
                self.absorb_draw_chain(target);
                self.advance_forward();
            }
            self.advance_backward();
        } else {
            let target = self.current.next();
            if !self.seat_has_counter(target) {
                self.absorb_draw_chain(target);
                self.advance_forward();
            }
            self.advance_forward();
        }
        self.turn_outcome()
    }

    fn seat_has_counter(&self, seat: Seat) -> bool {
        let top = self.stack.top().expect("a penalty card was just laid");
        let modifier = self.stack.modifier();
        self.player(seat)
            .hand()
            .iter()
            .any(|&card| rules::is_valid_play(card, top, modifier))
    }

    /// The target could not counter: they draw the whole accumulated
    /// penalty, card by card. An exhausted deck ends the absorption early;
    /// the partial draw is terminal and the chain still closes.
    fn absorb_draw_chain(&mut self, seat: Seat) {
        let owed = self.draw_chain;
        let mut drawn = 0;
        for _ in 0..owed {
            match self.deck.draw_top() {
                Ok(card) => {
                    self.players[seat.index()].hand_mut().add(card);
                    drawn += 1;
                }
                Err(EmptyDeck) => {
                    self.push_event(TableEvent::DeckExhausted);
                    break;
                }
            }
        }
        self.push_event(TableEvent::ForcedDraw { seat, owed, drawn });
        tracing::info!(seat = %seat, owed, drawn, "draw penalty absorbed");
        self.draw_chain = 0;
        self.stack.spend_modifier();
    }

    fn lay(&mut self, card: Card) {
        self.stack.push(card);
        self.stack.recycle_into(&mut self.deck);
    }

    /// Moves the pointer one seat along the direction of play. Re-enables
    /// the deck, ends the game if the departing seat just shed its last
    /// card, and burns owed skips seat by seat until an unskipped player is
    /// reached.
    fn advance_forward(&mut self) {
        if matches!(self.phase, TablePhase::Finished { .. }) {
            return;
        }
        self.deck_enabled = true;
        if self.current_player().hand().is_empty() {
            self.finish(self.current);
            return;
        }
        self.current = self.current.next();
        if self.players[self.current.index()].consume_skip() {
            self.push_event(TableEvent::TurnSkipped { seat: self.current });
            tracing::debug!(seat = %self.current, "turn skipped");
            self.advance_forward();
            return;
        }
        self.push_event(TableEvent::TurnStarted { seat: self.current });
    }

    /// The single backward hop taken when the king of spades resolves. No
    /// skip burn-down: reversal targets are visited exactly once.
    fn advance_backward(&mut self) {
        if matches!(self.phase, TablePhase::Finished { .. }) {
            return;
        }
        self.deck_enabled = true;
        if self.current_player().hand().is_empty() {
            self.finish(self.current);
            return;
        }
        self.current = self.current.previous();
        self.push_event(TableEvent::TurnStarted { seat: self.current });
    }

    fn finish(&mut self, winner: Seat) {
        self.phase = TablePhase::Finished { winner };
        self.push_event(TableEvent::GameWon { winner });
        tracing::info!(winner = %winner, "game won");
    }

    fn turn_outcome(&self) -> PlayOutcome {
        match self.phase {
            TablePhase::Finished { winner } => PlayOutcome::GameWon { winner },
            _ => PlayOutcome::TurnEnded,
        }
    }

    fn push_event(&mut self, event: TableEvent) {
        self.events.push(event);
    }
}
