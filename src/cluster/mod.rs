//! Density-based clustering.
//!
//! ## DBSCAN
//!
//! Density-based clustering that discovers non-convex clusters and identifies
//! outliers (noise points). It does not require the number of clusters in
//! advance; instead it takes a neighborhood radius `eps` and a density threshold
//! `min_samples`.
//!
//! The pieces, leaves first:
//!
//! - [`Metric`]: the distance between two feature vectors.
//! - [`RegionQuery`]: every point within `eps` of a given point. [`BruteForce`]
//!   scans all points; a spatial index can implement the same trait.
//! - [`is_core`]: whether a point has at least `min_samples` other neighbors.
//! - [`Dbscan`]: scans points in index order and grows clusters from core points.
//! - [`DbscanModel`]: keeps the last fit around for inspection and plotting.
//!
//! ## Usage
//!
//! ```rust
//! use denscan::cluster::{Clustering, Dbscan, Metric, NOISE};
//!
//! let data = vec![
//!     vec![0.0, 0.0],
//!     vec![0.1, 0.1],
//!     vec![10.0, 10.0],
//!     vec![10.1, 10.1],
//!     vec![50.0, 50.0],
//! ];
//!
//! let dbscan = Dbscan::new(0.5, 1).unwrap().with_metric(Metric::Euclidean);
//! let labels = dbscan.fit_predict(&data).unwrap();
//! assert_eq!(labels, vec![0, 0, 1, 1, NOISE]);
//! ```

mod dbscan;
mod metric;
mod model;
mod neighbors;
mod traits;

pub(crate) use dbscan::validate;
pub use dbscan::{Dbscan, DbscanFit, Expansion, NOISE};
pub use metric::Metric;
pub use model::{label_series, DbscanModel, LabelSeries, Marker};
pub use neighbors::{is_core, BruteForce, RegionQuery};
pub use traits::Clustering;
