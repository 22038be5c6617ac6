//! Property tests for the rating store.
//!
//! Random rate/remove sequences (including invalid values) must never break
//! the store's invariants or the profile derived from it.

use proptest::prelude::*;
use session::{ProfileAnalytics, RatingStore, UiVisibility};
use std::collections::HashMap;

#[derive(Debug, Clone)]
enum Op {
    Rate { movie_id: u32, value: i64 },
    Remove { movie_id: u32 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0u32..12, -2i64..8).prop_map(|(movie_id, value)| Op::Rate { movie_id, value }),
        1 => (0u32..12).prop_map(|movie_id| Op::Remove { movie_id }),
    ]
}

proptest! {
    #[test]
    fn store_keeps_unique_in_range_entries(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let mut store = RatingStore::new();
        // Model: what the store should hold after each op
        let mut model: HashMap<u32, u8> = HashMap::new();

        for op in ops {
            match op {
                Op::Rate { movie_id, value } => {
                    let accepted = store.rate(movie_id, "Some Movie", value).is_ok();
                    let valid = movie_id != 0 && (1..=5).contains(&value);
                    prop_assert_eq!(accepted, valid);
                    if valid {
                        model.insert(movie_id, value as u8);
                    }
                }
                Op::Remove { movie_id } => {
                    store.remove(movie_id);
                    model.remove(&movie_id);
                }
            }

            let snapshot = store.snapshot();
            prop_assert_eq!(snapshot.len(), model.len());
            for rating in &snapshot {
                prop_assert!((1..=5).contains(&rating.rating.get()));
                prop_assert_eq!(model.get(&rating.movie_id).copied(), Some(rating.rating.get()));
            }

            let profile = ProfileAnalytics::compute(&snapshot);
            prop_assert_eq!(profile.rating_distribution.iter().sum::<usize>(), profile.total_ratings);
            prop_assert_eq!(profile.total_ratings, model.len());
            prop_assert_eq!(profile.average_rating.is_none(), model.is_empty());

            let visibility = UiVisibility::from_profile(&profile);
            prop_assert_eq!(visibility.show_recommendations, model.len() >= 3);
            prop_assert_eq!(visibility.show_analytics, model.len() >= 5);
        }
    }
}

#[test]
fn test_rerating_keeps_second_value() {
    let mut store = RatingStore::new();
    store.rate(42, "Heat (1995)", 2).unwrap();
    store.rate(42, "Heat (1995)", 5).unwrap();

    let snapshot = store.snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot.get(42).unwrap().rating.get(), 5);
}
