use alloc::format;
use alloc::string::String;

use super::{Action, HandKind, Upcard};

/// Explains a recommendation for tutorial display.
///
/// `total` is the hand total; for pairs pass the rank class of the paired
/// cards (1 for Aces).
#[must_use]
pub fn explain(kind: HandKind, action: Action, total: u8, upcard: Upcard) -> String {
    let specific = match kind {
        HandKind::Hard => hard(action, total, upcard),
        HandKind::Soft => soft(action, total, upcard),
        HandKind::Pair => pair(action, total, upcard),
    };
    specific.unwrap_or_else(|| match kind {
        HandKind::Hard => format!("{action} on {total} vs {upcard}: the highest-expectation play."),
        HandKind::Soft => format!("{action} on soft {total} vs {upcard}: the highest-expectation soft-hand play."),
        HandKind::Pair => format!("{action} on a pair of {}s vs {upcard}: the highest-expectation pair play.", pair_label(total)),
    })
}

fn pair_label(class: u8) -> String {
    if class == 1 { "Ace".into() } else { format!("{class}") }
}

fn hard(action: Action, total: u8, upcard: Upcard) -> Option<String> {
    let text = match (action, total) {
        (Action::Stand, 17..) => format!(
            "Stand on {total}: the dealer must draw to 17 or more, so this hand already competes."
        ),
        (Action::Stand, 13..=16) if upcard.is_weak() => format!(
            "Stand on {total} vs {upcard}: a dealer showing 2-6 busts often, so let them take the risk."
        ),
        (Action::Stand, 12) if upcard.is_weak() => format!(
            "Stand on 12 vs {upcard}: the dealer's weak card makes standing better than risking a ten."
        ),
        (Action::Hit, ..=11) => format!(
            "Hit on {total}: no card can bust this hand, so there is nothing to lose by drawing."
        ),
        (Action::Hit, 12..=16) if !upcard.is_weak() => format!(
            "Hit on {total} vs {upcard}: a dealer showing 7-A usually makes 17-21, so this total must improve."
        ),
        (Action::Double, 11) => format!(
            "Double on 11 vs {upcard}: any ten makes 21, so put more money out while you are ahead."
        ),
        (Action::Double, 10) => format!(
            "Double on 10 vs {upcard}: a likely 20 beats most dealer outcomes."
        ),
        (Action::Double, 9) => format!(
            "Double on 9 vs {upcard}: the dealer is weak and you are likely to reach 19 or 20."
        ),
        _ => return None,
    };
    Some(text)
}

fn soft(action: Action, total: u8, upcard: Upcard) -> Option<String> {
    let text = match (action, total) {
        (Action::Stand, 19..) => format!(
            "Stand on soft {total}: already a strong hand; the Ace's flexibility is not needed."
        ),
        (Action::Stand, 18) => format!(
            "Stand on soft 18 vs {upcard}: 18 is good enough against this up card."
        ),
        (Action::Hit, ..=17) => format!(
            "Hit on soft {total}: one more card cannot bust a soft hand, so improve it."
        ),
        (Action::Hit, 18) => format!(
            "Hit on soft 18 vs {upcard}: against a 9, ten or Ace, 18 is an underdog."
        ),
        (Action::Double, _) if upcard.is_weak() => format!(
            "Double on soft {total} vs {upcard}: the dealer is weak and a soft hand cannot bust on one card."
        ),
        _ => return None,
    };
    Some(text)
}

fn pair(action: Action, class: u8, upcard: Upcard) -> Option<String> {
    let text = match (action, class) {
        (Action::Split, 1) => {
            "Always split Aces: two hands starting at 11 beat one soft 12.".into()
        }
        (Action::Split, 8) => format!(
            "Split 8s vs {upcard}: 16 is the worst total; two hands starting at 8 do far better."
        ),
        (Action::Split, 4) => format!(
            "Split 4s vs {upcard}: only against a 5 or 6 are two hands from 4 worth the extra bet."
        ),
        (Action::Split, _) if upcard.is_weak() => format!(
            "Split {class}s vs {upcard}: the dealer's weak card makes two bets better than one."
        ),
        (Action::Stand, 10) => {
            "Never split tens: 20 is already an excellent hand.".into()
        }
        (Action::Double, 5) => format!(
            "Double on a pair of 5s vs {upcard}: treat it as a hard 10, never split it."
        ),
        _ => return None,
    };
    Some(text)
}
