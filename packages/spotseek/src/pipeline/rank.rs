//! Positional relevance scoring.

use crate::types::session::EnrichedPlace;

/// Score assigned to the first arrival; each subsequent place scores one
/// less.
const TOP_SCORE: f64 = 10.0;

/// Assign relevance scores and sort by score, descending.
///
/// Scoring is purely positional: 10 for the first place, 9 for the
/// next, and so on. Ratings, review counts and news coverage are not
/// consulted. The sort is stable, and since scores strictly decrease by
/// position the output order always equals the input order.
pub fn rank_places(mut places: Vec<EnrichedPlace>) -> Vec<EnrichedPlace> {
    let mut score = TOP_SCORE;
    for place in &mut places {
        place.relevance_score = Some(score);
        score -= 1.0;
    }

    places.sort_by(|a, b| b.score().total_cmp(&a.score()));
    places
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_place;
    use proptest::prelude::*;

    fn enriched(n: usize) -> Vec<EnrichedPlace> {
        (0..n)
            .map(|i| EnrichedPlace::new(sample_place(format!("id-{i}"), format!("店{i}"))))
            .collect()
    }

    #[test]
    fn test_scores_count_down_from_ten() {
        let ranked = rank_places(enriched(4));
        let scores: Vec<_> = ranked.iter().map(|p| p.relevance_score.unwrap()).collect();
        assert_eq!(scores, vec![10.0, 9.0, 8.0, 7.0]);
    }

    #[test]
    fn test_order_is_preserved() {
        let ranked = rank_places(enriched(5));
        let ids: Vec<_> = ranked.iter().map(|p| p.place.place_id.as_str()).collect();
        assert_eq!(ids, vec!["id-0", "id-1", "id-2", "id-3", "id-4"]);
    }

    #[test]
    fn test_empty_input_is_fine() {
        assert!(rank_places(Vec::new()).is_empty());
    }

    #[test]
    fn test_quality_signals_are_ignored() {
        let mut places = enriched(2);
        // A stellar second place still ranks below the first arrival.
        places[1].place.rating = Some(5.0);
        places[1].place.user_ratings_total = Some(10_000);

        let ranked = rank_places(places);
        assert_eq!(ranked[0].place.place_id, "id-0");
        assert_eq!(ranked[0].relevance_score, Some(10.0));
    }

    proptest! {
        #[test]
        fn prop_score_is_ten_minus_position(n in 0usize..12) {
            let ranked = rank_places(enriched(n));
            for (i, place) in ranked.iter().enumerate() {
                prop_assert_eq!(place.relevance_score, Some(10.0 - i as f64));
                prop_assert_eq!(place.place.place_id.clone(), format!("id-{i}"));
            }
        }
    }
}
