use std::cmp::Ordering;
use crate::models::Provider;

/// Sort providers by total score, highest first
///
/// The sort is stable, so equal scores keep their input order. Missing or NaN
/// scores sink to the bottom.
pub fn sort_by_score(providers: &mut [Provider]) {
    providers.sort_by(|a, b| compare_scores(b.total_score, a.total_score));
}

fn compare_scores(a: Option<f64>, b: Option<f64>) -> Ordering {
    sort_key(a).total_cmp(&sort_key(b))
}

#[inline]
fn sort_key(score: Option<f64>) -> f64 {
    match score {
        Some(s) if s.is_nan() => f64::NEG_INFINITY,
        // -0.0 and 0.0 must compare equal
        Some(s) if s == 0.0 => 0.0,
        Some(s) => s,
        None => f64::NEG_INFINITY,
    }
}

/// Competition ranks for a list already sorted by score, highest first
///
/// Equal scores share the rank of the first of them; the next distinct score
/// takes its 1-based position, e.g. `[9, 7, 7, 5] -> [1, 2, 2, 4]`.
pub fn competition_ranks(scores: &[f64]) -> Vec<usize> {
    let mut ranks = Vec::with_capacity(scores.len());
    let mut previous: Option<(f64, usize)> = None;

    for (index, &score) in scores.iter().enumerate() {
        let rank = match previous {
            Some((previous_score, previous_rank)) if previous_score == score => previous_rank,
            _ => index + 1,
        };
        ranks.push(rank);
        previous = Some((score, rank));
    }

    ranks
}

/// Attach competition ranks to providers sorted by [`sort_by_score`]
pub fn assign_ranks(providers: &mut [Provider]) {
    let scores: Vec<f64> = providers
        .iter()
        .map(|provider| provider.total_score.unwrap_or(f64::NAN))
        .collect();

    for (provider, rank) in providers.iter_mut().zip(competition_ranks(&scores)) {
        provider.rank = Some(rank);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(id: &str, score: f64) -> Provider {
        let mut provider = Provider::new(id, id, None);
        provider.total_score = Some(score);
        provider
    }

    fn ids(providers: &[Provider]) -> Vec<&str> {
        providers.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_sort_descending() {
        let mut providers = vec![scored("a", 1.0), scored("b", 3.0), scored("c", 2.0)];
        sort_by_score(&mut providers);
        assert_eq!(ids(&providers), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_sort_is_stable_for_ties() {
        let mut providers = vec![
            scored("a", 1.0),
            scored("b", 2.0),
            scored("c", 1.0),
            scored("d", 2.0),
            scored("e", 1.0),
        ];
        sort_by_score(&mut providers);
        assert_eq!(ids(&providers), vec!["b", "d", "a", "c", "e"]);
    }

    #[test]
    fn test_negative_zero_ties_with_zero() {
        let mut providers = vec![scored("a", 0.0), scored("b", -0.0), scored("c", 0.0)];
        sort_by_score(&mut providers);
        assert_eq!(ids(&providers), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_nan_scores_sort_last() {
        let mut providers = vec![scored("a", f64::NAN), scored("b", -1.0), scored("c", 0.5)];
        sort_by_score(&mut providers);
        assert_eq!(ids(&providers), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_competition_ranks() {
        assert_eq!(competition_ranks(&[9.0, 7.0, 7.0, 5.0]), vec![1, 2, 2, 4]);
        assert_eq!(competition_ranks(&[3.0, 3.0, 3.0]), vec![1, 1, 1]);
        assert_eq!(competition_ranks(&[]), Vec::<usize>::new());
    }

    #[test]
    fn test_competition_ranks_long_tie_run() {
        let scores = vec![1.0; 100_000];
        let ranks = competition_ranks(&scores);
        assert!(ranks.iter().all(|&rank| rank == 1));
    }

    #[test]
    fn test_assign_ranks() {
        let mut providers = vec![scored("a", 2.0), scored("b", 2.0), scored("c", 1.0)];
        assign_ranks(&mut providers);
        let ranks: Vec<Option<usize>> = providers.iter().map(|p| p.rank).collect();
        assert_eq!(ranks, vec![Some(1), Some(1), Some(3)]);
    }
}
