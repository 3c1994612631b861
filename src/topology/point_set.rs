//! Vertex coordinate storage.
//!
//! A [`PointSet`] owns an N×D row-major coordinate buffer; the row index is
//! the vertex id. Element sets share a point set through `Arc<PointSet>` and
//! never edit it in place: changes go through copy-on-write (`Arc::make_mut`)
//! or whole-buffer replacement, so sibling sets derived from one another keep
//! seeing the coordinates they were validated against.

use std::sync::Arc;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::mesh_error::MeshTopoError;

/// Options for [`PointSet::merge_vertices`].
#[derive(Clone, Copy, Debug)]
pub struct MergeOptions {
    /// Euclidean distance at or below which two vertices are merged.
    pub tolerance: f64,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self { tolerance: 1e-10 }
    }
}

/// Result of merging coincident vertices.
#[derive(Clone, Debug)]
pub struct MergedPoints {
    pub points: PointSet,
    /// `inverse[old_id]` is the id of the merged vertex `old_id` collapsed into.
    pub inverse: Vec<usize>,
}

/// Row-major coordinate buffer with a fixed embedding dimension.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPointSet")]
pub struct PointSet {
    dimension: usize,
    coordinates: Vec<f64>,
}

#[derive(Deserialize)]
struct RawPointSet {
    dimension: usize,
    coordinates: Vec<f64>,
}

impl TryFrom<RawPointSet> for PointSet {
    type Error = MeshTopoError;

    fn try_from(raw: RawPointSet) -> Result<Self, Self::Error> {
        PointSet::try_new(raw.dimension, raw.coordinates)
    }
}

impl PointSet {
    /// Wrap a flat coordinate buffer of `dimension`-wide rows.
    pub fn try_new(dimension: usize, coordinates: Vec<f64>) -> Result<Self, MeshTopoError> {
        validate_buffer(dimension, &coordinates)?;
        Ok(Self {
            dimension,
            coordinates,
        })
    }

    /// Build from fixed-size rows, e.g. `&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]`.
    pub fn from_rows<const D: usize>(rows: &[[f64; D]]) -> Result<Self, MeshTopoError> {
        Self::try_new(D, rows.iter().flatten().copied().collect())
    }

    /// An empty point set of the given dimension.
    pub fn empty(dimension: usize) -> Result<Self, MeshTopoError> {
        Self::try_new(dimension, Vec::new())
    }

    /// Returns the spatial dimension per point.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.coordinates.len() / self.dimension
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// Flat read-only view of all coordinates.
    #[inline]
    pub fn coordinates(&self) -> &[f64] {
        &self.coordinates
    }

    /// Mutable view of the coordinates; the vertex count cannot change.
    #[inline]
    pub fn coordinates_mut(&mut self) -> &mut [f64] {
        &mut self.coordinates
    }

    /// Coordinates of vertex `id`.
    pub fn try_point(&self, id: usize) -> Result<&[f64], MeshTopoError> {
        if id >= self.len() {
            return Err(MeshTopoError::VertexOutOfRange {
                vertex: id,
                len: self.len(),
            });
        }
        Ok(self.point(id))
    }

    #[inline]
    pub(crate) fn point(&self, id: usize) -> &[f64] {
        &self.coordinates[id * self.dimension..(id + 1) * self.dimension]
    }

    /// Iterate over coordinate rows in vertex-id order.
    pub fn iter(&self) -> std::slice::ChunksExact<'_, f64> {
        self.coordinates.chunks_exact(self.dimension)
    }

    /// Replace the whole buffer, re-validating it; the dimension may change.
    pub fn replace_coordinates(
        &mut self,
        dimension: usize,
        coordinates: Vec<f64>,
    ) -> Result<(), MeshTopoError> {
        validate_buffer(dimension, &coordinates)?;
        self.dimension = dimension;
        self.coordinates = coordinates;
        Ok(())
    }

    /// Move into a shareable, read-only handle.
    pub fn freeze(self) -> Arc<PointSet> {
        Arc::new(self)
    }

    /// Per-axis minimum and maximum over all vertices.
    pub fn bounds(&self) -> Result<(Vec<f64>, Vec<f64>), MeshTopoError> {
        let mut rows = self.iter();
        let first = rows
            .next()
            .ok_or(MeshTopoError::EmptyInput("bounds of an empty point set"))?;
        let mut min = first.to_vec();
        let mut max = first.to_vec();
        for row in rows {
            for (axis, &x) in row.iter().enumerate() {
                min[axis] = min[axis].min(x);
                max[axis] = max[axis].max(x);
            }
        }
        Ok((min, max))
    }

    /// Per-axis extent `max - min`.
    pub fn bounds_diagonal(&self) -> Result<Vec<f64>, MeshTopoError> {
        let (min, max) = self.bounds()?;
        Ok(max.iter().zip(&min).map(|(hi, lo)| hi - lo).collect())
    }

    /// Euclidean length of [`bounds_diagonal`](Self::bounds_diagonal).
    pub fn bounds_diagonal_norm(&self) -> Result<f64, MeshTopoError> {
        Ok(self
            .bounds_diagonal()?
            .iter()
            .map(|d| d * d)
            .sum::<f64>()
            .sqrt())
    }

    /// Ids of the vertices inside an axis-aligned box, in ascending order.
    ///
    /// `bounding_box[axis]` is the inclusive `[min, max]` range for that axis;
    /// exactly one range per coordinate dimension is required.
    pub fn select(&self, bounding_box: &[[f64; 2]]) -> Result<Vec<usize>, MeshTopoError> {
        if bounding_box.len() != self.dimension {
            return Err(MeshTopoError::DimensionMismatch {
                expected: self.dimension,
                found: bounding_box.len(),
            });
        }
        Ok(self
            .iter()
            .positions(|row| {
                row.iter()
                    .zip(bounding_box)
                    .all(|(&x, &[lo, hi])| lo <= x && x <= hi)
            })
            .collect())
    }

    /// Collapse vertices closer than `options.tolerance`.
    ///
    /// Vertices are visited in id order; each unmerged vertex seeds a new
    /// merged vertex (keeping its coordinates) and absorbs every unmerged
    /// vertex within tolerance. Merged ids therefore follow ascending seed id.
    pub fn merge_vertices(&self, options: MergeOptions) -> Result<MergedPoints, MeshTopoError> {
        if !(options.tolerance >= 0.0) {
            return Err(MeshTopoError::InvalidParameter(format!(
                "merge tolerance must be non-negative, got {}",
                options.tolerance
            )));
        }
        let n = self.len();
        let tol = options.tolerance;
        let tol_sq = tol * tol;

        // sweep along the first axis to bound candidate pairs
        let by_x: Vec<usize> = (0..n)
            .sorted_by(|&a, &b| self.point(a)[0].total_cmp(&self.point(b)[0]))
            .collect();
        let xs: Vec<f64> = by_x.iter().map(|&i| self.point(i)[0]).collect();

        let mut inverse = vec![usize::MAX; n];
        let mut merged = Vec::with_capacity(self.coordinates.len());
        let mut next = 0usize;
        for seed in 0..n {
            if inverse[seed] != usize::MAX {
                continue;
            }
            inverse[seed] = next;
            let p = self.point(seed);
            merged.extend_from_slice(p);
            let lo = xs.partition_point(|&x| x < p[0] - tol);
            let hi = xs.partition_point(|&x| x <= p[0] + tol);
            for &other in &by_x[lo..hi] {
                if inverse[other] != usize::MAX {
                    continue;
                }
                let dist_sq: f64 = self
                    .point(other)
                    .iter()
                    .zip(p)
                    .map(|(a, b)| (a - b) * (a - b))
                    .sum();
                if dist_sq <= tol_sq {
                    inverse[other] = next;
                }
            }
            next += 1;
        }
        log::debug!("merge_vertices: {n} -> {next} vertices (tolerance {tol})");

        Ok(MergedPoints {
            points: PointSet::try_new(self.dimension, merged)?,
            inverse,
        })
    }

    /// Stack several point sets; ids of set `k` are offset by the lengths of
    /// the sets before it.
    pub fn concat<'a, I>(sets: I) -> Result<PointSet, MeshTopoError>
    where
        I: IntoIterator<Item = &'a PointSet>,
    {
        let mut sets = sets.into_iter();
        let first = sets
            .next()
            .ok_or(MeshTopoError::EmptyInput("concat of zero point sets"))?;
        let mut out = first.clone();
        for set in sets {
            if set.dimension != out.dimension {
                return Err(MeshTopoError::DimensionMismatch {
                    expected: out.dimension,
                    found: set.dimension,
                });
            }
            out.coordinates.extend_from_slice(&set.coordinates);
        }
        Ok(out)
    }
}

fn validate_buffer(dimension: usize, coordinates: &[f64]) -> Result<(), MeshTopoError> {
    if dimension == 0 {
        return Err(MeshTopoError::InvalidParameter(
            "point dimension must be non-zero".into(),
        ));
    }
    if coordinates.len() % dimension != 0 {
        return Err(MeshTopoError::DimensionMismatch {
            expected: dimension,
            found: coordinates.len() % dimension,
        });
    }
    Ok(())
}
