use makao_core::game::event::TableEvent;
use makao_core::game::rules;
use makao_core::game::snapshot::TableSnapshot;
use makao_core::game::table::{HAND_SIZE, TableError, TablePhase, TableState};
use makao_core::model::card::Card;
use makao_core::model::deck::Deck;
use makao_core::model::hand::Hand;
use makao_core::model::modifier::Modifier;
use makao_core::model::player::Player;
use makao_core::model::rank::Rank;
use makao_core::model::seat::Seat;
use makao_core::model::stack::DiscardStack;
use makao_core::model::suit::Suit;

fn card(rank: Rank, suit: Suit) -> Card {
    Card::new(rank, suit)
}

fn names() -> [String; 4] {
    ["Ala", "Ola", "Jan", "Ewa"].map(String::from)
}

#[test]
fn a_deal_leaves_thirty_one_cards_in_the_deck() {
    // 52 minus four hands of five minus the opening card. Rejected action
    // cards cycle back into the deck, so the split is exact for any seed.
    for seed in [0, 1, 7, 99, 12345] {
        let state = TableState::with_seed(names(), seed);
        assert_eq!(state.deck().len(), 31, "seed {seed}");
        assert_eq!(state.stack().len(), 1, "seed {seed}");
        for seat in Seat::LOOP {
            assert_eq!(state.player(seat).hand().len(), HAND_SIZE, "seed {seed}");
        }
        assert!(state.stack().top().unwrap().rank.is_plain(), "seed {seed}");
    }
}

#[test]
fn open_tops_obey_the_suit_rank_queen_rule() {
    let universe = Deck::standard();
    for &top in universe.cards() {
        if !top.rank.is_plain() {
            continue;
        }
        for &candidate in universe.cards() {
            let expected = candidate.suit == top.suit
                || candidate.rank == top.rank
                || candidate.rank == Rank::Queen;
            assert_eq!(
                rules::is_valid_play(candidate, top, None),
                expected,
                "{candidate} on {top}"
            );
        }
    }
}

#[test]
fn snapshot_preserves_a_game_suspended_mid_chain() {
    let players = [
        Player::from_parts(
            "Ala",
            Hand::with_cards(vec![card(Rank::Two, Suit::Hearts)]),
            0,
        ),
        Player::from_parts(
            "Ola",
            Hand::with_cards(vec![card(Rank::Nine, Suit::Clubs)]),
            2,
        ),
        Player::from_parts(
            "Jan",
            Hand::with_cards(vec![card(Rank::Five, Suit::Diamonds)]),
            0,
        ),
        Player::from_parts(
            "Ewa",
            Hand::with_cards(vec![card(Rank::Five, Suit::Spades)]),
            0,
        ),
    ];
    let state = TableState::from_parts(
        players,
        Seat::East,
        Deck::from_cards(vec![card(Rank::Ten, Suit::Diamonds)]),
        DiscardStack::from_parts(
            vec![card(Rank::Seven, Suit::Spades), card(Rank::Two, Suit::Spades)],
            Some(Modifier::DrawChain),
        ),
        0,
        4,
        false,
        TablePhase::Turn,
    );

    let json = TableSnapshot::to_json(&state).unwrap();
    let restored = TableSnapshot::from_json(&json).unwrap().restore().unwrap();

    assert_eq!(restored.current_seat(), Seat::East);
    assert_eq!(restored.draw_chain(), 4);
    assert_eq!(restored.stack().modifier(), Some(Modifier::DrawChain));
    assert!(!restored.deck_enabled());
    assert_eq!(restored.player(Seat::East).pending_skips(), 2);
    assert_eq!(restored.player(Seat::East).name(), "Ola");
    assert_eq!(
        restored.stack().cards(),
        &[card(Rank::Seven, Suit::Spades), card(Rank::Two, Suit::Spades)]
    );
    assert_eq!(restored.deck().cards(), &[card(Rank::Ten, Suit::Diamonds)]);
}

#[test]
fn snapshot_preserves_a_pending_suit_choice() {
    let mut seats = names().into_iter();
    let players = [
        vec![card(Rank::Ace, Suit::Hearts), card(Rank::Six, Suit::Clubs)],
        vec![card(Rank::Nine, Suit::Clubs)],
        vec![card(Rank::Five, Suit::Diamonds)],
        vec![card(Rank::Five, Suit::Spades)],
    ]
    .map(|cards| Player::from_parts(seats.next().unwrap(), Hand::with_cards(cards), 0));
    let mut state = TableState::from_parts(
        players,
        Seat::North,
        Deck::from_cards(vec![]),
        DiscardStack::from_parts(vec![card(Rank::Seven, Suit::Hearts)], None),
        0,
        0,
        true,
        TablePhase::Turn,
    );
    state
        .play_card(Seat::North, card(Rank::Ace, Suit::Hearts))
        .unwrap();
    assert_eq!(state.phase(), TablePhase::ChoosingSuit);

    let mut restored = TableSnapshot::capture(&state).restore().unwrap();
    assert_eq!(restored.phase(), TablePhase::ChoosingSuit);

    // The restored game picks up exactly where the choice was owed.
    assert_eq!(
        restored.pass_turn(Seat::North),
        Err(TableError::ChoicePending)
    );
    restored.resolve_suit(Suit::Clubs).unwrap();
    assert_eq!(
        restored.stack().modifier(),
        Some(Modifier::DemandSuit(Suit::Clubs))
    );
    assert_eq!(restored.current_seat(), Seat::East);
}

#[test]
fn owed_skips_swallow_turns_across_rounds() {
    let mut seats = names().into_iter();
    let hands = [
        vec![
            card(Rank::Eight, Suit::Hearts),
            card(Rank::Nine, Suit::Hearts),
            card(Rank::Two, Suit::Clubs),
        ],
        vec![
            card(Rank::Five, Suit::Hearts),
            card(Rank::Six, Suit::Hearts),
            card(Rank::Two, Suit::Diamonds),
        ],
        vec![
            card(Rank::Seven, Suit::Hearts),
            card(Rank::Ten, Suit::Hearts),
            card(Rank::Two, Suit::Spades),
        ],
        vec![card(Rank::Nine, Suit::Spades)],
    ];
    let mut players =
        hands.map(|cards| Player::from_parts(seats.next().unwrap(), Hand::with_cards(cards), 0));
    players[Seat::West.index()].add_pending_skips(2);

    let mut state = TableState::from_parts(
        players,
        Seat::North,
        Deck::from_cards(vec![]),
        DiscardStack::from_parts(vec![card(Rank::Seven, Suit::Hearts)], None),
        0,
        0,
        true,
        TablePhase::Turn,
    );

    for (seat, played) in [
        (Seat::North, card(Rank::Eight, Suit::Hearts)),
        (Seat::East, card(Rank::Five, Suit::Hearts)),
        (Seat::South, card(Rank::Seven, Suit::Hearts)),
    ] {
        state.play_card(seat, played).unwrap();
    }
    // West's first owed skip burned; play wrapped straight back to North.
    assert_eq!(state.current_seat(), Seat::North);
    assert_eq!(state.player(Seat::West).pending_skips(), 1);
    assert!(
        state
            .drain_events()
            .contains(&TableEvent::TurnSkipped { seat: Seat::West })
    );

    for (seat, played) in [
        (Seat::North, card(Rank::Nine, Suit::Hearts)),
        (Seat::East, card(Rank::Six, Suit::Hearts)),
        (Seat::South, card(Rank::Ten, Suit::Hearts)),
    ] {
        state.play_card(seat, played).unwrap();
    }
    assert_eq!(state.current_seat(), Seat::North);
    assert_eq!(state.player(Seat::West).pending_skips(), 0);
    assert_eq!(state.player(Seat::West).hand().len(), 1);
}
