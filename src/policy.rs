//! Skill-level deviation for simulated seats.

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::strategy::Action;

/// Chooses the action a simulated seat actually takes.
///
/// With probability `skill` the recommendation is followed. Otherwise a
/// different action is picked uniformly from `legal`; if there is no other
/// legal action the recommendation stands. `skill` is clamped to `0..=1`.
///
/// ```
/// use bjtrainer::{Action, policy::choose_action};
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
/// let legal = [Action::Hit, Action::Stand];
/// assert_eq!(choose_action(Action::Hit, 1.0, &legal, &mut rng), Action::Hit);
/// assert_eq!(choose_action(Action::Hit, 0.0, &legal, &mut rng), Action::Stand);
/// ```
pub fn choose_action<R: Rng + ?Sized>(
    recommended: Action,
    skill: f64,
    legal: &[Action],
    rng: &mut R,
) -> Action {
    let skill = if skill.is_nan() { 1.0 } else { skill.clamp(0.0, 1.0) };
    if rng.random_bool(skill) {
        return recommended;
    }

    let alternatives: alloc::vec::Vec<Action> = legal
        .iter()
        .copied()
        .filter(|&action| action != recommended)
        .collect();
    alternatives.choose(rng).copied().unwrap_or(recommended)
}
