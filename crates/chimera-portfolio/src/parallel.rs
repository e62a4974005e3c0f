//! Conditional parallel iteration.
//!
//! Uses rayon when the `parallel` feature is enabled, the configuration
//! allows it, and the collection is large enough; sequential otherwise.

use crate::config::PricingConfig;

/// Maps a function over items, conditionally using parallel iteration.
///
/// Results are returned in input order either way, so parallel and
/// sequential runs are interchangeable.
#[allow(unused_variables)]
pub fn maybe_parallel_map<T, U, F>(items: &[T], config: &PricingConfig, f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if config.should_parallelize(items.len()) {
            return items.par_iter().map(f).collect();
        }
    }

    items.iter().map(f).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maybe_parallel_map_preserves_order() {
        let config = PricingConfig::sequential();
        let items = vec![1, 2, 3, 4, 5];
        let results: Vec<i32> = maybe_parallel_map(&items, &config, |x| x * 2);
        assert_eq!(results, vec![2, 4, 6, 8, 10]);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let parallel = PricingConfig::default().with_threshold(1);
        let sequential = PricingConfig::sequential();
        let items: Vec<i32> = (0..100).collect();

        let a: Vec<i32> = maybe_parallel_map(&items, &parallel, |x| x * x);
        let b: Vec<i32> = maybe_parallel_map(&items, &sequential, |x| x * x);
        assert_eq!(a, b);
    }
}
