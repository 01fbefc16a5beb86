//! Density-based clustering for dense feature vectors.
//!
//! `denscan` groups points that sit in dense regions of a feature space and marks
//! isolated points as noise (DBSCAN).
//!
//! The primary public API is under [`cluster`], which provides:
//! - DBSCAN with pluggable distance metrics and neighbor queries
//! - a stateful model with label inspection for plotting front-ends
//!
//! [`reduce`] holds the optional dimensionality-reduction step that runs before
//! clustering.
//!
//! Enable the `parallel` feature to scan neighborhoods on the rayon thread pool.

#![forbid(unsafe_code)]

pub mod cluster;
pub mod error;
pub mod reduce;

pub use cluster::{
    Clustering, Dbscan, DbscanFit, DbscanModel, Expansion, LabelSeries, Marker, Metric, NOISE,
};
pub use error::{Error, Result};
