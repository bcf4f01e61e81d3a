use rand::Rng;

use crate::store::AppState;

/// Chance that a key press bumps the counter.
const CLICK_CHANCE: f64 = 0.2;
/// Chance that a jitter tick bumps the counter.
const TICK_CHANCE: f64 = 0.3;

pub fn increment_views(state: &mut AppState, amount: u64) -> u64 {
    state.profile.views = state.profile.views.saturating_add(amount);
    state.profile.views
}

/// Periodic jitter: sometimes adds 0 or 1. Returns whether the new value
/// should be persisted, which only happens on multiples of ten.
pub fn jitter_tick<R: Rng + ?Sized>(state: &mut AppState, rng: &mut R) -> bool {
    if rng.random_bool(TICK_CHANCE) {
        let amount = rng.random_range(0..2);
        increment_views(state, amount);
    }
    state.profile.views % 10 == 0
}

/// Interaction jitter. Returns true when the counter changed.
pub fn click_jitter<R: Rng + ?Sized>(state: &mut AppState, rng: &mut R) -> bool {
    if rng.random_bool(CLICK_CHANCE) {
        increment_views(state, 1);
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, StateStore};
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn five_increments_from_default_are_persisted() {
        let mut state = AppState::default();
        let mut store = MemoryStore::new();
        assert_eq!(state.profile.views, 1250);

        for _ in 0..5 {
            increment_views(&mut state, 1);
            store.save(&state);
        }

        assert_eq!(state.profile.views, 1255);
        assert_eq!(store.load().profile.views, 1255);
    }

    #[test]
    fn jitter_never_decreases_and_moves_at_most_one() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut state = AppState::default();

        for _ in 0..500 {
            let before = state.profile.views;
            let persist = jitter_tick(&mut state, &mut rng);
            assert!(state.profile.views - before <= 1);
            assert_eq!(persist, state.profile.views % 10 == 0);
        }
    }

    #[test]
    fn click_jitter_reports_changes() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut state = AppState::default();
        let mut changed = 0;

        for _ in 0..200 {
            if click_jitter(&mut state, &mut rng) {
                changed += 1;
            }
        }

        assert_eq!(state.profile.views, 1250 + changed);
        assert!(changed > 0 && changed < 200);
    }
}
