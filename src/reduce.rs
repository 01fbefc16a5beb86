//! Dimensionality reduction ahead of clustering.
//!
//! Clustering only sees already-prepared feature vectors. A [`Reducer`] is the
//! upstream step that produces them (PCA, UMAP, a random projection...), and
//! [`Reduced`] chains one in front of any [`Clustering`] algorithm.
//!
//! ```rust
//! use denscan::reduce::{RandomProjection, Reduced};
//! use denscan::{Clustering, Dbscan};
//!
//! let data = vec![
//!     vec![0.0, 0.0, 0.0, 0.0],
//!     vec![0.1, 0.0, 0.1, 0.0],
//!     vec![9.0, 9.0, 9.0, 9.0],
//! ];
//! let pipeline = Reduced::new(RandomProjection::new().with_seed(7), Dbscan::new(0.5, 1).unwrap())
//!     .with_n_components(2);
//! let labels = pipeline.fit_predict(&data).unwrap();
//! assert_eq!(labels.len(), data.len());
//! ```

use rand::prelude::*;

use crate::cluster::{validate, Clustering};
use crate::error::{Error, Result};

/// Maps `N x D` feature vectors to `N x target_dim`.
///
/// Input with no more than `target_dim` columns has nothing to reduce and is
/// returned unchanged.
pub trait Reducer {
    /// Fit the transform on `data` and return the projected rows.
    fn fit_transform(&self, data: &[Vec<f32>], target_dim: usize) -> Result<Vec<Vec<f32>>>;
}

impl<F> Reducer for F
where
    F: Fn(&[Vec<f32>], usize) -> Result<Vec<Vec<f32>>>,
{
    fn fit_transform(&self, data: &[Vec<f32>], target_dim: usize) -> Result<Vec<Vec<f32>>> {
        self(data, target_dim)
    }
}

/// Pass-through: features are already in the space to cluster in.
///
/// Input wider than `target_dim` is rejected, since there is no reduction to do it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Reducer for Identity {
    fn fit_transform(&self, data: &[Vec<f32>], target_dim: usize) -> Result<Vec<Vec<f32>>> {
        check_target_dim(target_dim)?;
        if data.first().is_some_and(|row| row.len() > target_dim) {
            return Err(Error::InvalidParameter {
                name: "target_dim",
                message: "identity cannot reduce input wider than target_dim",
            });
        }
        Ok(data.to_vec())
    }
}

/// Random linear projection onto `target_dim` unit-norm directions.
///
/// Pairwise distances are roughly preserved up to a
/// common scale (Johnson-Lindenstrauss), which is enough for density clustering
/// once `eps` is tuned in the projected space.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomProjection {
    seed: Option<u64>,
}

impl RandomProjection {
    /// Unseeded projection (thread-local RNG).
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the projection matrix for reproducible output.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Reducer for RandomProjection {
    fn fit_transform(&self, data: &[Vec<f32>], target_dim: usize) -> Result<Vec<Vec<f32>>> {
        check_target_dim(target_dim)?;
        validate(data)?;

        let original_dim = data.first().map_or(0, Vec::len);
        if original_dim <= target_dim {
            return Ok(data.to_vec());
        }

        let mut rng: Box<dyn RngCore> = match self.seed {
            Some(s) => Box::new(StdRng::seed_from_u64(s)),
            None => Box::new(rand::rng()),
        };

        // Projection matrix: target_dim x original_dim, uniform in [-1, 1] per entry.
        let mut mat: Vec<Vec<f32>> = Vec::with_capacity(target_dim);
        for _ in 0..target_dim {
            let mut row: Vec<f32> = (0..original_dim)
                .map(|_| rng.random::<f32>() * 2.0 - 1.0)
                .collect();
            normalize_in_place(&mut row);
            mat.push(row);
        }

        Ok(data
            .iter()
            .map(|v| mat.iter().map(|row| dot(v, row)).collect())
            .collect())
    }
}

fn check_target_dim(target_dim: usize) -> Result<()> {
    if target_dim == 0 {
        return Err(Error::InvalidParameter {
            name: "target_dim",
            message: "must be at least 1",
        });
    }
    Ok(())
}

fn normalize_in_place(v: &mut [f32]) {
    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > f32::EPSILON {
        for x in v {
            *x /= norm;
        }
    }
}

#[inline]
fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// A [`Clustering`] that reduces its input to `n_components` first.
#[derive(Debug, Clone)]
pub struct Reduced<R, C> {
    reducer: R,
    clusterer: C,
    n_components: usize,
}

impl<R: Reducer, C: Clustering> Reduced<R, C> {
    /// Chain `reducer` in front of `clusterer`, reducing to 3 components.
    pub fn new(reducer: R, clusterer: C) -> Self {
        Self {
            reducer,
            clusterer,
            n_components: 3,
        }
    }

    /// Set the number of components the reducer projects to.
    pub fn with_n_components(mut self, n_components: usize) -> Self {
        self.n_components = n_components;
        self
    }

    /// The wrapped clusterer.
    pub fn clusterer(&self) -> &C {
        &self.clusterer
    }
}

impl<R: Reducer, C: Clustering> Clustering for Reduced<R, C> {
    fn fit_predict(&self, data: &[Vec<f32>]) -> Result<Vec<i32>> {
        validate(data)?;
        let reduced = self.reducer.fit_transform(data, self.n_components)?;
        if reduced.len() != data.len() {
            return Err(Error::LengthMismatch {
                expected: data.len(),
                found: reduced.len(),
            });
        }
        self.clusterer.fit_predict(&reduced)
    }

    fn n_clusters(&self) -> usize {
        self.clusterer.n_clusters()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Dbscan, NOISE};

    fn blobs() -> Vec<Vec<f32>> {
        let mut data = Vec::new();
        for i in 0..5 {
            let t = i as f32 * 0.01;
            data.push(vec![t, t, 0.0, 0.0, 0.0, 0.0]);
            data.push(vec![20.0 + t, 20.0, 20.0, 20.0, 20.0, 20.0 - t]);
        }
        data
    }

    #[test]
    fn test_random_projection_shape_and_seed() {
        let data = blobs();
        let rp = RandomProjection::new().with_seed(42);
        let a = rp.fit_transform(&data, 2).unwrap();
        let b = rp.fit_transform(&data, 2).unwrap();
        assert_eq!(a.len(), data.len());
        assert!(a.iter().all(|row| row.len() == 2));
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_projection_passes_low_dim_through() {
        let data = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
        let out = RandomProjection::new().fit_transform(&data, 3).unwrap();
        assert_eq!(out, data);
    }

    #[test]
    fn test_zero_target_dim() {
        let data = vec![vec![1.0, 2.0]];
        assert!(Identity.fit_transform(&data, 0).is_err());
        assert!(RandomProjection::new().fit_transform(&data, 0).is_err());
    }

    #[test]
    fn test_reduced_pipeline_keeps_labels_aligned() {
        let data = blobs();
        let pipeline = Reduced::new(Identity, Dbscan::new(1.0, 2).unwrap()).with_n_components(6);
        let labels = pipeline.fit_predict(&data).unwrap();
        assert_eq!(labels, vec![0, 1, 0, 1, 0, 1, 0, 1, 0, 1]);
        assert_eq!(pipeline.n_clusters(), 0);
    }

    #[test]
    fn test_identity_rejects_wide_input() {
        let data = blobs();
        assert!(matches!(
            Identity.fit_transform(&data, 2),
            Err(Error::InvalidParameter { name: "target_dim", .. })
        ));
        assert_eq!(Identity.fit_transform(&data, 6).unwrap(), data);

        let pipeline = Reduced::new(Identity, Dbscan::default());
        assert!(pipeline.fit_predict(&data).is_err());
    }

    #[test]
    fn test_closure_reducer() {
        // Keep only the first coordinate.
        let first = |data: &[Vec<f32>], _: usize| -> Result<Vec<Vec<f32>>> {
            Ok(data.iter().map(|v| vec![v[0]]).collect())
        };
        let data = vec![vec![0.0, 100.0], vec![0.5, -100.0], vec![9.0, 0.0]];
        let pipeline = Reduced::new(first, Dbscan::new(1.0, 1).unwrap());
        assert_eq!(pipeline.fit_predict(&data).unwrap(), vec![0, 0, NOISE]);
    }

    #[test]
    fn test_reducer_dropping_rows_is_rejected() {
        let drop_all = |_: &[Vec<f32>], _: usize| -> Result<Vec<Vec<f32>>> { Ok(Vec::new()) };
        let pipeline = Reduced::new(drop_all, Dbscan::default());
        let data = vec![vec![1.0f32]];
        assert!(matches!(
            pipeline.fit_predict(&data),
            Err(Error::LengthMismatch { expected: 1, found: 0 })
        ));
    }
}
