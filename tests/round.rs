//! Round engine integration tests.

#![allow(clippy::float_cmp)]

use bjtrainer::{
    Action, ActionError, BetError, BettingSystem, Card, DealerStep, Event, HandOutcome,
    HandStatus, InsuranceError, PayoutRatio, Ramp, RoundEngine, RoundState, RulesConfig,
    SeatConfig, Shoe, Step, StepError, Suit, SurrenderKind, TurnPosition,
};

const fn card(rank: u8) -> Card {
    Card::new(Suit::Spades, rank)
}

fn rules() -> RulesConfig {
    RulesConfig::default().with_reshuffle_threshold(0)
}

/// Engine with `seats` seats of 1000 and a shoe that deals `draws` first.
///
/// Deal order: each seat's first card, the dealer's up card, each seat's
/// second card, the hole card, then hits.
fn stacked(rules: RulesConfig, seats: usize, draws: &[u8]) -> RoundEngine {
    let mut engine = RoundEngine::new(rules, 1).with_clock(|| 1_700_000_000);
    for _ in 0..seats {
        engine.join(SeatConfig::default().with_balance(1000).with_base_bet(100));
    }
    let cards: Vec<Card> = draws.iter().map(|&rank| card(rank)).collect();
    engine.session_mut().shoe_mut().stack(&cards).unwrap();
    engine
}

fn finish_dealer(engine: &mut RoundEngine) -> Vec<DealerStep> {
    let mut steps = Vec::new();
    while engine.state() == RoundState::DealerTurn {
        steps.push(engine.dealer_step().unwrap());
    }
    steps
}

#[test]
fn insurance_offsets_dealer_blackjack() {
    let mut engine = stacked(rules(), 1, &[13, 1, 12, 13]);
    engine.start_round().unwrap();
    engine.deal().unwrap();

    assert!(engine.is_insurance_pending());
    assert_eq!(engine.take_insurance(1), Err(InsuranceError::NotDecider(1)));
    assert_eq!(engine.take_insurance(0), Ok(50));
    assert_eq!(engine.seat(0).unwrap().balance(), 850);

    // The peek finds blackjack and play goes straight to settlement.
    assert_eq!(engine.state(), RoundState::Settlement);
    assert!(engine.dealer().is_hole_revealed());

    let result = engine.settle().unwrap();
    let seat = &result.seats[0];
    assert_eq!(seat.hands[0].outcome, HandOutcome::Loss);
    assert_eq!(seat.insurance_returned, 150);
    assert_eq!(seat.net, 0);
    assert_eq!(seat.balance, 1000);
    assert!(result.dealer_blackjack);

    let stats = engine.seat(0).unwrap().stats();
    assert_eq!(stats.insurance_taken, 1);
    assert_eq!(stats.insurance_won, 1);
}

#[test]
fn insurance_is_only_offered_once() {
    let mut engine = stacked(rules(), 1, &[10, 1, 6, 7]);
    engine.start_round().unwrap();
    engine.deal().unwrap();

    engine.decline_insurance(0).unwrap();
    assert_eq!(engine.state(), RoundState::SeatTurn(TurnPosition::new(0, 0)));
    assert_eq!(engine.take_insurance(0), Err(InsuranceError::InvalidState));
}

#[test]
fn push_returns_the_stake() {
    let mut engine = stacked(rules(), 1, &[13, 7, 7, 13]);
    engine.place_bet(0, 100).unwrap();
    engine.start_round().unwrap();
    engine.deal().unwrap();
    assert_eq!(engine.seat(0).unwrap().balance(), 900);

    engine.stand(0, 0).unwrap();
    let steps = finish_dealer(&mut engine);
    assert_eq!(
        steps,
        vec![DealerStep::Revealed(card(13)), DealerStep::Stands(17)]
    );

    let result = engine.settle().unwrap();
    assert_eq!(result.seats[0].hands[0].outcome, HandOutcome::Push);
    assert_eq!(engine.seat(0).unwrap().balance(), 1000);
    assert_eq!(engine.state(), RoundState::Idle);
}

#[test]
fn short_seat_aborts_the_whole_round() {
    let mut engine = RoundEngine::new(rules(), 3);
    engine.join(SeatConfig::default().with_balance(1000));
    engine.join(SeatConfig::default().with_balance(0));
    engine.toggle_autoplay();

    assert_eq!(
        engine.step(),
        Err(StepError::Bet(BetError::InsufficientFunds { seat: 1 }))
    );
    assert!(!engine.is_autoplay());
    assert_eq!(engine.state(), RoundState::Idle);
    assert_eq!(engine.round(), 0);
    assert_eq!(engine.seat(0).unwrap().balance(), 1000);
    assert!(engine.seat(0).unwrap().hands().is_empty());

    let events: Vec<Event> = engine.drain_events().collect();
    assert!(events.contains(&Event::RoundAborted {
        seat: 1,
        needed: 10,
        balance: 0
    }));
    assert_eq!(events.last(), Some(&Event::AutoplayHalted));
}

#[test]
fn manual_bets_are_checked_when_placed() {
    let mut engine = RoundEngine::new(rules(), 3);
    let seat = engine.join(SeatConfig::default().with_balance(50));

    assert_eq!(engine.place_bet(seat, 0), Err(BetError::ZeroBet));
    assert_eq!(
        engine.place_bet(seat, 60),
        Err(BetError::InsufficientFunds { seat })
    );
    assert_eq!(engine.place_bet(7, 10), Err(BetError::SeatNotFound));
    engine.place_bet(seat, 50).unwrap();
    assert_eq!(engine.seat(seat).unwrap().pending_bet(), Some(50));
}

#[test]
fn double_on_three_cards_is_rejected() {
    let mut engine = stacked(rules(), 1, &[2, 7, 3, 13, 4]);
    engine.start_round().unwrap();
    engine.deal().unwrap();

    assert_eq!(engine.hit(0, 0), Ok(card(4)));
    assert!(!engine.legal_actions(0, 0).contains(&Action::Double));
    assert_eq!(engine.double(0, 0), Err(ActionError::CannotDouble));

    let player = engine.seat(0).unwrap();
    assert_eq!(player.balance(), 900);
    assert_eq!(player.hand(0).unwrap().bet(), 100);
    assert_eq!(player.hand(0).unwrap().len(), 3);
}

#[test]
fn actions_outside_the_turn_are_rejected() {
    let mut engine = stacked(rules(), 2, &[10, 10, 7, 6, 9, 13]);
    assert_eq!(engine.hit(0, 0), Err(ActionError::InvalidState));

    engine.start_round().unwrap();
    engine.deal().unwrap();
    assert_eq!(engine.hit(1, 0), Err(ActionError::NotYourTurn));
    assert_eq!(engine.stand(5, 0), Err(ActionError::SeatNotFound));
    assert_eq!(engine.stand(0, 3), Err(ActionError::HandNotFound));
    assert!(engine.legal_actions(1, 0).is_empty());
}

#[test]
fn surrender_is_closed_after_insurance_was_offered() {
    let mut engine = stacked(rules(), 1, &[10, 1, 6, 7]);
    engine.start_round().unwrap();
    engine.deal().unwrap();
    engine.decline_insurance(0).unwrap();

    assert!(!engine.legal_actions(0, 0).contains(&Action::Surrender));
    assert_eq!(engine.surrender(0, 0), Err(ActionError::CannotSurrender));
    assert_eq!(
        engine.seat(0).unwrap().hand(0).unwrap().status(),
        HandStatus::Active
    );
}

#[test]
fn surrender_returns_half_the_bet() {
    let mut engine = stacked(rules(), 1, &[10, 10, 6, 7]);
    engine.start_round().unwrap();
    engine.deal().unwrap();

    assert!(engine.legal_actions(0, 0).contains(&Action::Surrender));
    engine.surrender(0, 0).unwrap();
    assert_eq!(engine.state(), RoundState::DealerTurn);

    // Nothing left to beat, so the dealer only turns the hole card.
    let steps = finish_dealer(&mut engine);
    assert_eq!(steps.len(), 2);

    let result = engine.settle().unwrap();
    assert_eq!(result.seats[0].hands[0].outcome, HandOutcome::Surrendered);
    assert_eq!(result.seats[0].returned, 50);
    assert_eq!(engine.seat(0).unwrap().balance(), 950);
}

#[test]
fn splitting_eights_makes_two_hands() {
    let mut engine = stacked(rules(), 1, &[8, 5, 8, 13, 3, 2]);
    engine.start_round().unwrap();
    engine.deal().unwrap();

    assert_eq!(engine.recommendation(0, 0).unwrap().action, Action::Split);
    engine.split(0, 0).unwrap();

    let player = engine.seat(0).unwrap();
    assert_eq!(player.hands().len(), 2);
    assert_eq!(player.hands().iter().map(|hand| hand.bet()).sum::<usize>(), 200);
    assert_eq!(player.balance(), 800);
    assert_eq!(player.hand(0).unwrap().cards(), &[card(8), card(3)]);
    assert_eq!(player.hand(1).unwrap().cards(), &[card(8), card(2)]);
    assert!(player.hand(1).unwrap().is_from_split());
    assert_eq!(player.stats().splits, 1);
    assert_eq!(engine.current_turn(), Some(TurnPosition::new(0, 0)));
}

#[test]
fn split_limit_is_enforced() {
    let rules = rules().with_max_splits(1);
    let mut engine = stacked(rules, 1, &[8, 5, 8, 13, 8, 2]);
    engine.start_round().unwrap();
    engine.deal().unwrap();
    engine.split(0, 0).unwrap();

    // The first hand is 8,8 again but the seat already split once.
    assert_eq!(engine.split(0, 0), Err(ActionError::MaxSplitsReached));
    assert_ne!(engine.recommendation(0, 0).unwrap().action, Action::Split);
}

#[test]
fn dealer_does_not_draw_when_every_hand_busts() {
    let mut engine = stacked(rules(), 1, &[10, 6, 6, 10, 13, 5]);
    engine.start_round().unwrap();
    engine.deal().unwrap();

    engine.hit(0, 0).unwrap();
    assert_eq!(
        engine.seat(0).unwrap().hand(0).unwrap().status(),
        HandStatus::Bust
    );
    assert_eq!(engine.state(), RoundState::DealerTurn);

    let steps = finish_dealer(&mut engine);
    assert_eq!(
        steps,
        vec![DealerStep::Revealed(card(10)), DealerStep::Stands(16)]
    );
    assert_eq!(engine.dealer().len(), 2);

    let result = engine.settle().unwrap();
    assert_eq!(result.seats[0].hands[0].outcome, HandOutcome::Loss);
    assert_eq!(engine.seat(0).unwrap().stats().busts, 1);
}

#[test]
fn dealer_draws_to_seventeen() {
    let mut engine = stacked(rules(), 1, &[10, 6, 8, 10, 1, 5]);
    engine.start_round().unwrap();
    engine.deal().unwrap();
    engine.stand(0, 0).unwrap();

    let steps = finish_dealer(&mut engine);
    assert_eq!(
        steps,
        vec![
            DealerStep::Revealed(card(10)),
            DealerStep::Drew(card(1)),
            DealerStep::Stands(17),
        ]
    );
    let result = engine.settle().unwrap();
    assert_eq!(result.seats[0].hands[0].outcome, HandOutcome::Win);
    assert_eq!(engine.seat(0).unwrap().balance(), 1100);
}

#[test]
fn soft_seventeen_against_six_doubles() {
    let mut engine = stacked(rules(), 1, &[1, 6, 6, 13]);
    engine.start_round().unwrap();
    engine.deal().unwrap();

    let recommendation = engine.recommendation(0, 0).unwrap();
    assert_eq!(recommendation.action, Action::Double);
    assert!(recommendation.value.soft);
    assert_eq!(recommendation.value.total, 17);
    assert!(!engine.explanation(0, 0).unwrap().is_empty());

    let events: Vec<Event> = engine.drain_events().collect();
    assert!(events.contains(&Event::Recommendation {
        seat: 0,
        hand: 0,
        action: Action::Double
    }));
}

#[test]
fn decisions_are_scored_against_the_recommendation() {
    let mut engine = stacked(rules(), 1, &[1, 6, 6, 13, 2]);
    engine.start_round().unwrap();
    engine.deal().unwrap();

    // Advised to double; hit instead.
    engine.hit(0, 0).unwrap();
    engine.stand(0, 0).unwrap();
    finish_dealer(&mut engine);
    engine.settle().unwrap();

    let stats = engine.seat(0).unwrap().stats();
    assert_eq!(stats.mistakes, 1);
    assert_eq!(stats.correct_decisions, 1);
    assert_eq!(stats.adherence(), 50.0);
}

#[test]
fn blackjack_pays_at_the_table_ratio() {
    let mut engine = stacked(rules(), 1, &[1, 9, 13, 7]);
    engine.start_round().unwrap();
    engine.deal().unwrap();
    assert_eq!(engine.state(), RoundState::DealerTurn);
    finish_dealer(&mut engine);
    let result = engine.settle().unwrap();
    assert_eq!(result.seats[0].hands[0].outcome, HandOutcome::Blackjack);
    assert_eq!(engine.seat(0).unwrap().balance(), 1150);

    let six_to_five = rules().with_blackjack_payout(PayoutRatio::SIX_TO_FIVE);
    let mut engine = stacked(six_to_five, 1, &[1, 9, 13, 7]);
    engine.start_round().unwrap();
    engine.deal().unwrap();
    finish_dealer(&mut engine);
    engine.settle().unwrap();
    assert_eq!(engine.seat(0).unwrap().balance(), 1120);
}

#[test]
fn without_peek_a_doubled_hand_loses_everything() {
    let rules = rules().with_dealer_peeks(false);
    let mut engine = stacked(rules, 1, &[6, 13, 5, 1, 9]);
    engine.start_round().unwrap();
    engine.deal().unwrap();

    // Ten up: no insurance, and no peek either.
    assert_eq!(engine.state(), RoundState::SeatTurn(TurnPosition::new(0, 0)));
    assert_eq!(engine.double(0, 0), Ok(card(9)));
    assert_eq!(engine.seat(0).unwrap().balance(), 800);

    finish_dealer(&mut engine);
    let result = engine.settle().unwrap();
    assert!(result.dealer_blackjack);
    assert_eq!(result.seats[0].hands[0].bet, 200);
    assert_eq!(result.seats[0].net, -200);
    assert_eq!(engine.seat(0).unwrap().balance(), 800);
}

#[test]
fn hole_card_is_counted_only_once_revealed() {
    let mut engine = stacked(rules(), 1, &[5, 13, 6, 2]);
    engine.start_round().unwrap();
    engine.deal().unwrap();
    assert_eq!(engine.session().counter().running_count(), 1);
    assert_eq!(engine.snapshot().dealer_cards, vec![card(13)]);

    engine.stand(0, 0).unwrap();
    assert_eq!(
        engine.dealer_step(),
        Ok(DealerStep::Revealed(card(2)))
    );
    assert_eq!(engine.session().counter().running_count(), 2);
}

#[test]
fn unknown_names_fall_back() {
    let mut engine = RoundEngine::new(rules(), 9);
    let seat = engine.join(SeatConfig::default().with_strategy("nonsense"));
    assert_eq!(engine.seat(seat).unwrap().config().strategy, "basic");

    assert_eq!(engine.set_playing_strategy(seat, "team_play"), Ok("team_play"));
    assert_eq!(engine.set_playing_strategy(seat, "bogus"), Ok("basic"));
    assert_eq!(
        engine.set_betting_strategy(seat, "martingale"),
        Ok(BettingSystem::Martingale)
    );
    assert_eq!(
        engine.set_betting_strategy(seat, "bogus"),
        Ok(BettingSystem::Flat)
    );
}

#[test]
fn autoplay_pauses_between_seats() {
    let mut engine = stacked(rules(), 2, &[2, 10, 6, 3, 9, 13, 2, 13]);
    engine.toggle_autoplay();

    assert_eq!(engine.step(), Ok(Step::Started));
    assert_eq!(engine.step(), Ok(Step::Dealt));
    let first = TurnPosition::new(0, 0);
    assert_eq!(
        engine.step(),
        Ok(Step::Played {
            position: first,
            action: Action::Hit
        })
    );

    // Switched off mid-seat: the seat still finishes its hand.
    engine.toggle_autoplay();
    assert_eq!(
        engine.step(),
        Ok(Step::Played {
            position: first,
            action: Action::Hit
        })
    );
    assert_eq!(
        engine.step(),
        Ok(Step::Played {
            position: first,
            action: Action::Stand
        })
    );
    assert_eq!(
        engine.step(),
        Ok(Step::AwaitingAction(TurnPosition::new(1, 0)))
    );
    assert_eq!(
        engine.play_round(),
        Err(StepError::AwaitingInput(1))
    );
}

#[test]
fn seeded_sessions_replay() {
    let play = || {
        let mut engine = RoundEngine::new(RulesConfig::default(), 2024);
        engine.join(SeatConfig::default().with_autoplay(true).with_skill(0.7));
        engine.join(
            SeatConfig::default()
                .with_autoplay(true)
                .with_betting(BettingSystem::Paroli),
        );
        (0..20)
            .map(|_| engine.play_round().unwrap())
            .collect::<Vec<_>>()
    };
    assert_eq!(play(), play());
}

#[test]
fn balances_add_up_over_a_session() {
    let mut engine = RoundEngine::new(RulesConfig::vegas(), 77);
    engine.join(SeatConfig::default().with_autoplay(true));
    let mut net = 0;
    for _ in 0..50 {
        net += engine.play_round().unwrap().total_net();
    }
    let player = engine.seat(0).unwrap();
    assert_eq!(player.balance() as isize, 1000 + net);
    assert_eq!(player.stats().profit_loss(), net);
}

#[test]
fn session_log_exports() {
    let mut engine = RoundEngine::new(rules(), 5).with_clock(|| 1_700_000_000);
    engine.join(SeatConfig::default().with_autoplay(true));
    engine.join(SeatConfig::default().with_autoplay(true));
    for _ in 0..3 {
        engine.play_round().unwrap();
    }

    let log = engine.log();
    assert_eq!(log.rounds().len(), 3);
    assert_eq!(log.summary().total_rounds, 3);

    let csv = log.to_csv().unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("Round,Timestamp,Total P/L,Player,Balance,Win Rate,RTP,Strategy %")
    );
    assert_eq!(lines.count(), 6);

    let json = log.to_json().unwrap();
    assert!(json.contains("\"rounds\""));
    assert!(json.contains("1700000000"));
}

#[test]
fn rules_change_only_between_rounds() {
    let mut engine = stacked(rules(), 1, &[10, 7, 8, 10]);
    engine.start_round().unwrap();
    assert!(engine.set_rules(RulesConfig::vegas()).is_err());

    engine.deal().unwrap();
    engine.stand(0, 0).unwrap();
    finish_dealer(&mut engine);
    engine.settle().unwrap();

    engine.set_rules(RulesConfig::default().with_decks(2)).unwrap();
    assert_eq!(engine.session().shoe().remaining(), 104);
}

#[test]
fn rebuilt_shoe_is_not_the_first_shoe_again() {
    let mut engine = RoundEngine::new(rules(), 7);
    engine.set_rules(rules().with_decks(2)).unwrap();
    assert_eq!(engine.drain_events().collect::<Vec<_>>(), vec![Event::Reshuffled]);

    let mut first = Shoe::new(2, 7);
    let replayed: Vec<Card> = (0..20).map(|_| first.draw().card).collect();
    let shoe = engine.session_mut().shoe_mut();
    let dealt: Vec<Card> = (0..20).map(|_| shoe.draw().card).collect();
    assert_ne!(dealt, replayed);
}

#[test]
fn early_surrender_comes_before_the_peek() {
    let rules = rules().with_surrender_kind(SurrenderKind::Early);
    let mut engine = stacked(rules, 2, &[10, 9, 10, 6, 7, 1]);
    engine.start_round().unwrap();
    engine.deal().unwrap();

    assert_eq!(engine.state(), RoundState::EarlySurrender(0));
    assert_eq!(engine.current_turn(), None);
    assert_eq!(engine.legal_actions(0, 0), vec![Action::Surrender]);
    assert!(engine.legal_actions(1, 0).is_empty());
    assert_eq!(engine.decline_surrender(1), Err(ActionError::NotYourTurn));
    assert_eq!(engine.hit(0, 0), Err(ActionError::InvalidState));

    engine.surrender(0, 0).unwrap();
    assert_eq!(engine.state(), RoundState::EarlySurrender(1));
    engine.decline_surrender(1).unwrap();

    // Both seats answered; the peek finds the dealer's blackjack.
    assert_eq!(engine.state(), RoundState::Settlement);
    let result = engine.settle().unwrap();
    assert!(result.dealer_blackjack);
    assert_eq!(result.seats[0].hands[0].outcome, HandOutcome::Surrendered);
    assert_eq!(result.seats[1].hands[0].outcome, HandOutcome::Loss);
    assert_eq!(engine.seat(0).unwrap().balance(), 950);
    assert_eq!(engine.seat(1).unwrap().balance(), 900);

    let events: Vec<Event> = engine.drain_events().collect();
    assert!(events.contains(&Event::SurrenderOffered { seat: 0 }));
    assert!(events.contains(&Event::SurrenderOffered { seat: 1 }));
    assert!(events.contains(&Event::DealerBlackjack));
}

#[test]
fn autoplay_keeps_the_hand_under_early_surrender() {
    let rules = rules().with_surrender_kind(SurrenderKind::Early);
    let mut engine = stacked(rules, 1, &[10, 10, 6, 7]);
    engine.toggle_autoplay();

    assert_eq!(engine.step(), Ok(Step::Started));
    assert_eq!(engine.step(), Ok(Step::Dealt));
    assert_eq!(engine.step(), Ok(Step::SurrenderDeclined(0)));
    assert_eq!(engine.state(), RoundState::SeatTurn(TurnPosition::new(0, 0)));
}

#[test]
fn no_double_after_split_when_the_rules_forbid_it() {
    let rules = rules().with_double_after_split(false);
    let mut engine = stacked(rules, 1, &[8, 6, 8, 10, 3, 2]);
    engine.start_round().unwrap();
    engine.deal().unwrap();
    engine.split(0, 0).unwrap();

    // 8,3 against a six would double; the rules only allow a hit.
    assert_eq!(engine.seat(0).unwrap().hand(0).unwrap().cards(), &[card(8), card(3)]);
    assert!(!engine.legal_actions(0, 0).contains(&Action::Double));
    assert_eq!(engine.recommendation(0, 0).unwrap().action, Action::Hit);
    assert_eq!(engine.double(0, 0), Err(ActionError::CannotDouble));
    assert_eq!(engine.seat(0).unwrap().balance(), 800);
}

#[test]
fn aces_resplit_only_when_allowed() {
    let draws = [1, 6, 1, 10, 1, 5, 9, 8];

    let mut engine = stacked(rules(), 1, &draws);
    engine.start_round().unwrap();
    engine.deal().unwrap();
    engine.split(0, 0).unwrap();
    assert_eq!(engine.seat(0).unwrap().hand(0).unwrap().cards(), &[card(1), card(1)]);
    assert!(!engine.legal_actions(0, 0).contains(&Action::Split));
    assert_ne!(engine.recommendation(0, 0).unwrap().action, Action::Split);
    assert_eq!(engine.split(0, 0), Err(ActionError::CannotSplit));

    let mut engine = stacked(rules().with_resplit_aces(true), 1, &draws);
    engine.start_round().unwrap();
    engine.deal().unwrap();
    engine.split(0, 0).unwrap();
    assert!(engine.legal_actions(0, 0).contains(&Action::Split));
    engine.split(0, 0).unwrap();

    let player = engine.seat(0).unwrap();
    assert_eq!(player.hands().len(), 3);
    assert_eq!(player.hand(0).unwrap().cards(), &[card(1), card(9)]);
    assert_eq!(player.hand(1).unwrap().cards(), &[card(1), card(8)]);
    assert_eq!(player.hand(2).unwrap().cards(), &[card(1), card(5)]);
    assert_eq!(player.balance(), 700);
}

#[test]
fn dealer_hits_soft_seventeen_when_the_rules_say_so() {
    let draws = [10, 6, 9, 1, 2];

    let mut engine = stacked(rules(), 1, &draws);
    engine.start_round().unwrap();
    engine.deal().unwrap();
    engine.stand(0, 0).unwrap();
    assert_eq!(
        finish_dealer(&mut engine),
        vec![DealerStep::Revealed(card(1)), DealerStep::Stands(17)]
    );

    let mut engine = stacked(rules().with_dealer_hits_soft_17(true), 1, &draws);
    engine.start_round().unwrap();
    engine.deal().unwrap();
    engine.stand(0, 0).unwrap();
    assert_eq!(
        finish_dealer(&mut engine),
        vec![
            DealerStep::Revealed(card(1)),
            DealerStep::Drew(card(2)),
            DealerStep::Stands(19),
        ]
    );
    let result = engine.settle().unwrap();
    assert_eq!(result.seats[0].hands[0].outcome, HandOutcome::Push);
}

#[test]
fn count_betting_sizes_the_round_from_the_true_count() {
    let mut engine = RoundEngine::new(rules(), 1);
    let seat = engine.join(
        SeatConfig::default()
            .with_balance(1000)
            .with_base_bet(1)
            .with_betting(BettingSystem::Count(Ramp::Standard)),
    );
    // Seven low cards for the first round, then neutral eights.
    let mut draws: Vec<Card> = [2, 6, 3, 5, 2, 3, 4].into_iter().map(card).collect();
    draws.extend([card(8); 20]);
    engine.session_mut().shoe_mut().stack(&draws).unwrap();

    engine.start_round().unwrap();
    assert_eq!(engine.seat(seat).unwrap().round_bet(), 1);
    engine.deal().unwrap();
    engine.stand(seat, 0).unwrap();
    assert_eq!(
        finish_dealer(&mut engine),
        vec![
            DealerStep::Revealed(card(5)),
            DealerStep::Drew(card(2)),
            DealerStep::Drew(card(3)),
            DealerStep::Drew(card(4)),
            DealerStep::Stands(20),
        ]
    );
    engine.settle().unwrap();
    assert_eq!(engine.session().counter().running_count(), 7);
    assert!(engine.session().true_count() > 5.0);

    // Ten units at this count, under the quarter-Kelly cap.
    engine.start_round().unwrap();
    assert_eq!(engine.seat(seat).unwrap().round_bet(), 10);
    assert_eq!(engine.seat(seat).unwrap().balance(), 989);
}
