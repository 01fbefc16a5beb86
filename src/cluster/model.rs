//! A fitted DBSCAN model and its inspection surface.
//!
//! [`Dbscan::fit`] already returns an owned [`DbscanFit`]. [`DbscanModel`] is for
//! callers that keep one long-lived object around (a notebook, a plotting
//! front-end) and want "not fitted yet" reported as an error instead of an
//! `Option`.

use std::collections::BTreeMap;
use std::fmt;

use super::dbscan::{Dbscan, DbscanFit, NOISE};
use crate::error::{Error, Result};
use crate::reduce::Reducer;

/// How a renderer should draw a group of points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// Clustered points.
    Dot,
    /// Noise.
    Cross,
}

/// All points sharing one label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSeries {
    /// Cluster id or [`NOISE`].
    pub label: i32,
    /// Suggested marker.
    pub marker: Marker,
    /// Indices of the points carrying `label`, ascending.
    pub indices: Vec<usize>,
}

/// A [`Dbscan`] configuration plus the result of its last successful fit.
#[derive(Debug, Clone, Default)]
pub struct DbscanModel {
    dbscan: Dbscan,
    fitted: Option<DbscanFit>,
}

impl DbscanModel {
    /// Unfitted model.
    pub fn new(dbscan: Dbscan) -> Self {
        Self {
            dbscan,
            fitted: None,
        }
    }

    /// The clusterer configuration.
    pub fn params(&self) -> &Dbscan {
        &self.dbscan
    }

    /// Run DBSCAN on `data`, replacing any previous result.
    ///
    /// The previous result is dropped before the run starts, so a failed fit
    /// leaves the model unfitted.
    pub fn fit(&mut self, data: &[Vec<f32>]) -> Result<&DbscanFit> {
        self.fitted = None;
        let fit = self.dbscan.fit(data)?;
        Ok(self.fitted.insert(fit))
    }

    /// Whether a fit has completed.
    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    /// The last fit result.
    pub fn fit_result(&self) -> Result<&DbscanFit> {
        self.fitted.as_ref().ok_or(Error::NotFitted)
    }

    /// Labels from the last fit.
    pub fn labels(&self) -> Result<&[i32]> {
        Ok(self.fit_result()?.labels())
    }

    /// Group point indices by label, ascending (noise first).
    pub fn series(&self) -> Result<Vec<LabelSeries>> {
        Ok(label_series(self.labels()?))
    }

    /// 2-D coordinates for drawing the fitted points.
    ///
    /// `data` must be the matrix the model was fitted on (same row count).
    /// Single-column output is placed on the x axis; a reducer that returns more
    /// than two columns is an error.
    pub fn projection<R: Reducer + ?Sized>(
        &self,
        data: &[Vec<f32>],
        reducer: &R,
    ) -> Result<Vec<[f32; 2]>> {
        let n = self.labels()?.len();
        if data.len() != n {
            return Err(Error::LengthMismatch {
                expected: n,
                found: data.len(),
            });
        }

        let reduced = reducer.fit_transform(data, 2)?;
        if reduced.len() != n {
            return Err(Error::LengthMismatch {
                expected: n,
                found: reduced.len(),
            });
        }
        reduced
            .iter()
            .enumerate()
            .map(|(index, row)| match row.as_slice() {
                [x] => Ok([*x, 0.0]),
                [x, y] => Ok([*x, *y]),
                _ => Err(Error::DimensionMismatch {
                    index,
                    expected: 2,
                    found: row.len(),
                }),
            })
            .collect()
    }
}

impl fmt::Display for DbscanModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.dbscan, f)
    }
}

/// One [`LabelSeries`] per distinct label in `labels`, ascending by label.
pub fn label_series(labels: &[i32]) -> Vec<LabelSeries> {
    let mut groups: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
    for (i, &label) in labels.iter().enumerate() {
        groups.entry(label).or_default().push(i);
    }
    groups
        .into_iter()
        .map(|(label, indices)| LabelSeries {
            label,
            marker: if label == NOISE {
                Marker::Cross
            } else {
                Marker::Dot
            },
            indices,
        })
        .collect()
}
