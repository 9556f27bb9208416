//! Property-based tests for hand evaluation, counting and settlement.

use proptest::prelude::*;

use bjtrainer::count::hi_lo;
use bjtrainer::{Card, RoundEngine, RulesConfig, SeatConfig, Shoe, Suit, evaluate};

fn card() -> impl Strategy<Value = Card> {
    (0..4usize, 1..=13u8).prop_map(|(suit, rank)| Card::new(Suit::ALL[suit], rank))
}

fn hand(max: usize) -> impl Strategy<Value = Vec<Card>> {
    prop::collection::vec(card(), 1..=max)
}

/// Hands as they stand once play starts. A lone Ace right after a split
/// is soft 11.
fn dealt_hand(max: usize) -> impl Strategy<Value = Vec<Card>> {
    prop::collection::vec(card(), 2..=max)
}

proptest! {
    /// Property: the total does not depend on the order the cards arrive in.
    #[test]
    fn prop_order_does_not_change_value(
        (cards, shuffled) in hand(8).prop_flat_map(|cards| {
            let shuffled = Just(cards.clone()).prop_shuffle();
            (Just(cards), shuffled)
        }),
    ) {
        prop_assert_eq!(evaluate(&cards), evaluate(&shuffled));
    }

    /// Property: a soft total always lies between 12 and 21.
    #[test]
    fn prop_soft_total_in_range(cards in dealt_hand(8)) {
        let value = evaluate(&cards);
        if value.soft {
            prop_assert!((12..=21).contains(&value.total), "soft {}", value.total);
            prop_assert!(!value.bust);
        }
    }

    /// Property: only an Ace and a ten-class card make a natural.
    #[test]
    fn prop_blackjack_needs_two_cards(cards in hand(6)) {
        let value = evaluate(&cards);
        if value.blackjack_eligible {
            prop_assert_eq!(cards.len(), 2);
            prop_assert_eq!(value.total, 21);
        }
        if cards.len() != 2 {
            prop_assert!(!value.blackjack_eligible);
        }
    }

    /// Property: the Hi-Lo tags of a whole shoe cancel out.
    #[test]
    fn prop_full_shoe_counts_to_zero(decks in 1..=8u8, seed in any::<u64>()) {
        let mut shoe = Shoe::new(decks, seed);
        let total: i32 = (0..shoe.capacity()).map(|_| hi_lo(&shoe.draw().card)).sum();
        prop_assert_eq!(total, 0);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Property: a round moves exactly its net result into each balance.
    #[test]
    fn prop_settlement_moves_only_the_net(seed in any::<u64>(), skill in 0.0..=1.0f64) {
        let mut engine = RoundEngine::new(RulesConfig::vegas(), seed);
        engine.join(SeatConfig::default().with_autoplay(true).with_skill(skill));
        engine.join(SeatConfig::default().with_autoplay(true));

        let before: Vec<usize> = engine.seats().iter().map(|seat| seat.balance()).collect();
        let result = engine.play_round().unwrap();
        for (seat, start) in result.seats.iter().zip(before) {
            prop_assert_eq!(seat.balance as isize, start as isize + seat.net);
            prop_assert_eq!(seat.returned as isize - seat.wagered as isize, seat.net);
        }
    }
}
