//! Neighborhood queries and core-point classification.
//!
//! [`RegionQuery`] is where a spatial index (grid, k-d tree, ball tree) plugs in.
//! The clustering loop only ever asks "which points lie within `eps` of point
//! `i`?", so a faster implementation can replace [`BruteForce`] without touching
//! the engine.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::metric::Metric;

/// Radius queries over a fixed set of points.
pub trait RegionQuery {
    /// Number of points in the collection.
    fn len(&self) -> usize;

    /// Whether the collection has no points.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Indices `j != point` with `distance(point, j) <= eps`, in increasing order.
    fn neighbors(&self, point: usize) -> Vec<usize>;
}

/// Exhaustive O(N) scan per query.
#[derive(Debug, Clone, Copy)]
pub struct BruteForce<'a> {
    data: &'a [Vec<f32>],
    eps: f32,
    metric: Metric,
}

impl<'a> BruteForce<'a> {
    /// Borrow `data` for radius queries with the given `eps` and metric.
    pub fn new(data: &'a [Vec<f32>], eps: f32, metric: Metric) -> Self {
        Self { data, eps, metric }
    }

    #[inline]
    fn is_neighbor(&self, point: usize, other: usize) -> bool {
        other != point && self.metric.distance(&self.data[point], &self.data[other]) <= self.eps
    }
}

impl RegionQuery for BruteForce<'_> {
    fn len(&self) -> usize {
        self.data.len()
    }

    #[cfg(not(feature = "parallel"))]
    fn neighbors(&self, point: usize) -> Vec<usize> {
        (0..self.data.len())
            .filter(|&j| self.is_neighbor(point, j))
            .collect()
    }

    // Indexed parallel iterators collect in index order, so the result matches
    // the sequential scan exactly.
    #[cfg(feature = "parallel")]
    fn neighbors(&self, point: usize) -> Vec<usize> {
        (0..self.data.len())
            .into_par_iter()
            .filter(|&j| self.is_neighbor(point, j))
            .collect()
    }
}

/// Whether `point` has at least `min_samples` neighbors, not counting itself.
pub fn is_core<Q: RegionQuery + ?Sized>(query: &Q, point: usize, min_samples: usize) -> bool {
    query.neighbors(point).len() >= min_samples
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line() -> Vec<Vec<f32>> {
        vec![vec![0.0], vec![1.0], vec![2.0], vec![3.5]]
    }

    #[test]
    fn test_excludes_self() {
        let data = line();
        let q = BruteForce::new(&data, 10.0, Metric::Euclidean);
        for i in 0..data.len() {
            let nbrs = q.neighbors(i);
            assert!(!nbrs.contains(&i));
            assert_eq!(nbrs.len(), data.len() - 1);
        }
    }

    #[test]
    fn test_inclusive_radius() {
        let data = line();
        let q = BruteForce::new(&data, 1.0, Metric::Euclidean);
        assert_eq!(q.neighbors(0), vec![1]);
        assert_eq!(q.neighbors(1), vec![0, 2]);
        assert_eq!(q.neighbors(3), Vec::<usize>::new());
    }

    #[test]
    fn test_zero_eps_matches_duplicates_only() {
        let data = vec![vec![1.0, 1.0], vec![1.0, 1.0], vec![1.0, 1.5]];
        let q = BruteForce::new(&data, 0.0, Metric::Euclidean);
        assert_eq!(q.neighbors(0), vec![1]);
        assert!(q.neighbors(2).is_empty());
    }

    #[test]
    fn test_concurrent_queries_match_sequential() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BruteForce<'_>>();

        let data: Vec<Vec<f32>> = (0..64)
            .map(|i| vec![(i % 8) as f32 * 0.6, (i / 8) as f32 * 0.6])
            .collect();
        let q = BruteForce::new(&data, 1.0, Metric::Euclidean);
        let n = data.len();
        let expected: Vec<Vec<usize>> = (0..n).map(|i| q.neighbors(i)).collect();

        let per_thread: Vec<Vec<(usize, Vec<usize>)>> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|t| {
                    let q = &q;
                    s.spawn(move || {
                        (t..n)
                            .step_by(4)
                            .map(|i| (i, q.neighbors(i)))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let mut seen = 0;
        for (i, nbrs) in per_thread.into_iter().flatten() {
            assert_eq!(nbrs, expected[i]);
            seen += 1;
        }
        assert_eq!(seen, n);
    }

    #[test]
    fn test_is_core_threshold() {
        let data = line();
        let q = BruteForce::new(&data, 1.0, Metric::Euclidean);
        assert!(is_core(&q, 1, 2));
        assert!(!is_core(&q, 0, 2));
        assert!(is_core(&q, 0, 1));
        assert!(!is_core(&q, 3, 1));
    }
}
