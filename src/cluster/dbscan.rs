//! DBSCAN: Density-Based Spatial Clustering of Applications with Noise.
//!
//! # The Algorithm (Ester et al., 1996)
//!
//! DBSCAN groups points based on neighborhood density. Unlike k-means, it:
//!
//! - Discovers clusters of arbitrary shape
//! - Automatically determines the number of clusters
//! - Identifies noise points (outliers)
//!
//! ## Core Concepts
//!
//! - **Epsilon (ε)**: Maximum distance between two points to be neighbors (inclusive).
//! - **min_samples**: Minimum number of *other* points within ε for a point to be "core".
//!   The point itself is never counted; implementations that count it need
//!   `min_samples + 1` to produce the same partition.
//! - **Core point**: Has at least `min_samples` neighbors within ε.
//! - **Border point**: Within ε of a clustered point but not core itself.
//! - **Noise point**: Never reached from any core point; labeled [`NOISE`].
//!
//! ## Algorithm Steps
//!
//! 1. Scan points in index order. Skip points that already carry a label.
//! 2. If the point is core, give it the next cluster id and expand:
//!    every unlabeled neighbor of a frontier point receives the same id and joins
//!    the frontier.
//! 3. Otherwise leave it unlabeled; a later expansion may still absorb it.
//!
//! Labels are write-once, so each point enters the frontier at most once and the
//! expansion terminates. The frontier is an explicit worklist; stack usage does not
//! grow with cluster size.
//!
//! ## Expansion rules
//!
//! [`Expansion::Transitive`] (the default) lets every absorbed point propagate the
//! cluster, so a cluster is the eps-connected component around a core seed.
//! [`Expansion::CoreOnly`] is textbook DBSCAN: border points are labeled but do not
//! propagate.
//!
//! ## Complexity
//!
//! - **Time**: O(n²) with [`BruteForce`], better with a spatial [`RegionQuery`].
//! - **Space**: O(n) for labels and the frontier.
//!
//! ## References
//!
//! Ester et al. (1996). "A Density-Based Algorithm for Discovering Clusters
//! in Large Spatial Databases with Noise." KDD-96.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, trace};

use super::metric::Metric;
use super::neighbors::{BruteForce, RegionQuery};
use super::traits::Clustering;
use crate::error::{Error, Result};

/// Label of points that belong to no cluster.
pub const NOISE: i32 = -1;

/// Which absorbed points keep growing a cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Expansion {
    /// Every newly labeled point propagates the cluster to its own neighbors.
    #[default]
    Transitive,
    /// Only core points propagate; border points are labeled and left alone.
    CoreOnly,
}

/// DBSCAN clustering algorithm.
///
/// Parameters are validated when the clusterer is built and never change
/// afterwards, so [`Dbscan::fit`] only fails on malformed input.
#[derive(Debug, Clone, PartialEq)]
pub struct Dbscan {
    /// Epsilon: maximum distance for neighborhood.
    epsilon: f32,
    /// Minimum number of other points for core point classification.
    min_samples: usize,
    metric: Metric,
    expansion: Expansion,
}

impl Dbscan {
    /// Create a new DBSCAN clusterer with the Euclidean metric.
    ///
    /// # Arguments
    ///
    /// * `epsilon` - Maximum distance between two points to be neighbors. Must be
    ///   finite and non-negative.
    /// * `min_samples` - Minimum number of other points within `epsilon` for a
    ///   point to be core. Must be at least 1.
    ///
    /// # Typical Values
    ///
    /// - `epsilon`: Often read off a k-distance plot (k = `min_samples`).
    /// - `min_samples`: `2 * dimension - 1` is a common heuristic.
    pub fn new(epsilon: f32, min_samples: usize) -> Result<Self> {
        if !epsilon.is_finite() || epsilon < 0.0 {
            return Err(Error::InvalidParameter {
                name: "eps",
                message: "must be finite and non-negative",
            });
        }

        if min_samples == 0 {
            return Err(Error::InvalidParameter {
                name: "min_samples",
                message: "must be at least 1",
            });
        }

        Ok(Self {
            epsilon,
            min_samples,
            metric: Metric::default(),
            expansion: Expansion::default(),
        })
    }

    /// Set the distance metric.
    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    /// Set the distance metric by name (see [`Metric`]'s `FromStr`).
    pub fn with_metric_name(self, name: &str) -> Result<Self> {
        Ok(self.with_metric(name.parse()?))
    }

    /// Set the expansion rule.
    pub fn with_expansion(mut self, expansion: Expansion) -> Self {
        self.expansion = expansion;
        self
    }

    /// Neighborhood radius.
    pub fn eps(&self) -> f32 {
        self.epsilon
    }

    /// Minimum neighbor count (excluding self) for a core point.
    pub fn min_samples(&self) -> usize {
        self.min_samples
    }

    /// Configured distance metric.
    pub fn metric(&self) -> Metric {
        self.metric
    }

    /// Configured expansion rule.
    pub fn expansion(&self) -> Expansion {
        self.expansion
    }

    /// Cluster `data` with a brute-force neighbor scan.
    pub fn fit(&self, data: &[Vec<f32>]) -> Result<DbscanFit> {
        validate(data)?;
        self.run(&BruteForce::new(data, self.epsilon, self.metric), None)
    }

    /// Like [`Dbscan::fit`], but gives up with [`Error::Cancelled`] once `cancel`
    /// is set. The flag is checked between outer-loop iterations.
    pub fn fit_with_cancel(&self, data: &[Vec<f32>], cancel: &AtomicBool) -> Result<DbscanFit> {
        validate(data)?;
        self.run(&BruteForce::new(data, self.epsilon, self.metric), Some(cancel))
    }

    /// Cluster the points behind a custom [`RegionQuery`].
    ///
    /// The query decides neighborhood membership; it is expected to use the same
    /// radius and metric as `self`. Only `min_samples` and the expansion rule are
    /// read from the clusterer.
    pub fn fit_query<Q: RegionQuery + ?Sized>(&self, query: &Q) -> Result<DbscanFit> {
        self.run(query, None)
    }

    fn run<Q: RegionQuery + ?Sized>(
        &self,
        query: &Q,
        cancel: Option<&AtomicBool>,
    ) -> Result<DbscanFit> {
        let n = query.len();

        let mut labels = vec![NOISE; n];
        let mut core = vec![false; n];
        let mut frontier: Vec<usize> = Vec::new();
        let mut cluster_id: i32 = 0;

        for point_idx in 0..n {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                return Err(Error::Cancelled {
                    processed: point_idx,
                });
            }

            if labels[point_idx] != NOISE {
                continue;
            }

            let neighbors = query.neighbors(point_idx);
            if neighbors.len() < self.min_samples {
                // Candidate noise: a later expansion may still absorb it.
                continue;
            }

            core[point_idx] = true;
            labels[point_idx] = cluster_id;
            let size = self.expand_cluster(
                query,
                &neighbors,
                cluster_id,
                &mut labels,
                &mut core,
                &mut frontier,
            );
            trace!("cluster {cluster_id}: seed {point_idx}, {size} points");
            cluster_id += 1;
        }

        let fit = DbscanFit {
            labels,
            core,
            n_clusters: cluster_id as usize,
        };
        debug!(
            "dbscan fit: n={} clusters={} noise={} ({})",
            n,
            fit.n_clusters,
            fit.n_noise(),
            self
        );
        Ok(fit)
    }

    /// Flood `cluster_id` out from a labeled core seed. Returns the cluster size.
    fn expand_cluster<Q: RegionQuery + ?Sized>(
        &self,
        query: &Q,
        seed_neighbors: &[usize],
        cluster_id: i32,
        labels: &mut [i32],
        core: &mut [bool],
        frontier: &mut Vec<usize>,
    ) -> usize {
        frontier.clear();
        let mut size = 1 + absorb(seed_neighbors, cluster_id, labels, frontier);

        while let Some(idx) = frontier.pop() {
            let neighbors = query.neighbors(idx);
            let is_core = neighbors.len() >= self.min_samples;
            core[idx] = is_core;

            if self.expansion == Expansion::CoreOnly && !is_core {
                continue;
            }
            size += absorb(&neighbors, cluster_id, labels, frontier);
        }
        size
    }
}

/// Label every unlabeled point in `neighbors` and queue it. Labels are write-once.
fn absorb(
    neighbors: &[usize],
    cluster_id: i32,
    labels: &mut [i32],
    frontier: &mut Vec<usize>,
) -> usize {
    let mut added = 0;
    for &nbr in neighbors {
        if labels[nbr] == NOISE {
            labels[nbr] = cluster_id;
            frontier.push(nbr);
            added += 1;
        }
    }
    added
}

/// Reject ragged or non-finite input before any labeling work starts.
pub(crate) fn validate(data: &[Vec<f32>]) -> Result<()> {
    let Some(first) = data.first() else {
        return Ok(());
    };

    let d = first.len();
    if d == 0 {
        return Err(Error::InvalidParameter {
            name: "dimension",
            message: "must be at least 1",
        });
    }

    for (index, point) in data.iter().enumerate() {
        if point.len() != d {
            return Err(Error::DimensionMismatch {
                index,
                expected: d,
                found: point.len(),
            });
        }
        if point.iter().any(|x| !x.is_finite()) {
            return Err(Error::NonFiniteValue { index });
        }
    }
    Ok(())
}

impl Default for Dbscan {
    fn default() -> Self {
        Self {
            epsilon: 0.5,
            min_samples: 4,
            metric: Metric::Euclidean,
            expansion: Expansion::Transitive,
        }
    }
}

impl fmt::Display for Dbscan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Dbscan(min_samples={}, eps={}, metric={})",
            self.min_samples, self.epsilon, self.metric
        )
    }
}

impl Clustering for Dbscan {
    fn fit_predict(&self, data: &[Vec<f32>]) -> Result<Vec<i32>> {
        self.fit(data).map(DbscanFit::into_labels)
    }

    /// DBSCAN discovers clusters dynamically, so this returns 0.
    ///
    /// The discovered count is available from [`DbscanFit::n_clusters`].
    fn n_clusters(&self) -> usize {
        0
    }
}

/// Result of a DBSCAN run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbscanFit {
    labels: Vec<i32>,
    core: Vec<bool>,
    n_clusters: usize,
}

impl DbscanFit {
    /// One label per input point: a cluster id in `0..n_clusters` or [`NOISE`].
    pub fn labels(&self) -> &[i32] {
        &self.labels
    }

    /// Take ownership of the labels.
    pub fn into_labels(self) -> Vec<i32> {
        self.labels
    }

    /// Labels with noise as `None`.
    pub fn as_options(&self) -> Vec<Option<usize>> {
        self.labels
            .iter()
            .map(|&l| if l == NOISE { None } else { Some(l as usize) })
            .collect()
    }

    /// Number of clusters discovered.
    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }

    /// Number of points labeled [`NOISE`].
    pub fn n_noise(&self) -> usize {
        self.labels.iter().filter(|&&l| l == NOISE).count()
    }

    /// Whether point `idx` ended up as noise.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is not a point of the fitted dataset.
    pub fn is_noise(&self, idx: usize) -> bool {
        self.labels[idx] == NOISE
    }

    /// Whether point `idx` has at least `min_samples` neighbors.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is not a point of the fitted dataset.
    pub fn is_core(&self, idx: usize) -> bool {
        self.core[idx]
    }

    /// Indices of core points, ascending.
    pub fn core_points(&self) -> Vec<usize> {
        self.core
            .iter()
            .enumerate()
            .filter_map(|(i, &c)| c.then_some(i))
            .collect()
    }

    /// Point count per cluster, indexed by cluster id.
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.n_clusters];
        for &l in &self.labels {
            if l != NOISE {
                sizes[l as usize] += 1;
            }
        }
        sizes
    }

    /// Indices of the points in `cluster`, ascending. Empty for unknown ids.
    pub fn members(&self, cluster: usize) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter_map(|(i, &l)| (l >= 0 && l as usize == cluster).then_some(i))
            .collect()
    }
}
