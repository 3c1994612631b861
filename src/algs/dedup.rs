//! Canonicalization and grouping of fixed-width index rows.
//!
//! The canonical key of a row (edge, face, element) is its vertex ids sorted
//! ascending, so `(3, 1)` and `(1, 3)` are the same edge and a face shared by
//! two volumes is recognised even though they traverse it with opposite
//! winding. Winding is deliberately discarded here; callers that need it read
//! the representative's original row (see [`UniqueRows::first_occurrence`]).
//!
//! Grouping is batch-oriented: every row is sorted first (in parallel with
//! the `rayon` feature), then one stable hash pass over the row slices
//! assigns unique ids in first-occurrence order.
//!
//! Degenerate rows (a vertex id repeated within one row) are grouped like any
//! other row.

use hashbrown::HashMap;
use itertools::Itertools;
#[cfg(feature = "rayon")]
use rayon::prelude::*;
use serde::Serialize;

use crate::mesh_error::MeshTopoError;

fn check_rows(rows: &[usize], width: usize) -> Result<(), MeshTopoError> {
    if width == 0 {
        return Err(MeshTopoError::InvalidParameter(
            "row width must be non-zero".into(),
        ));
    }
    if rows.len() % width != 0 {
        return Err(MeshTopoError::DimensionMismatch {
            expected: width,
            found: rows.len() % width,
        });
    }
    Ok(())
}

/// Copy of `rows` with every row sorted ascending; count and order preserved.
pub fn sorted_rows(rows: &[usize], width: usize) -> Result<Vec<usize>, MeshTopoError> {
    check_rows(rows, width)?;
    let mut sorted = rows.to_vec();
    #[cfg(feature = "rayon")]
    sorted
        .par_chunks_exact_mut(width)
        .for_each(|row| row.sort_unstable());
    #[cfg(not(feature = "rayon"))]
    sorted
        .chunks_exact_mut(width)
        .for_each(|row| row.sort_unstable());
    Ok(sorted)
}

/// Distinct canonical rows with their multiplicities.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UniqueRows {
    width: usize,
    keys: Vec<usize>,
    first_occurrence: Vec<usize>,
    counts: Vec<usize>,
    inverse: Vec<usize>,
    rows_per_parent: usize,
}

impl UniqueRows {
    /// Number of distinct rows.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Row width the grouping was computed for.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Flat buffer of canonical (sorted) keys, one row per unique entity.
    pub fn keys(&self) -> &[usize] {
        &self.keys
    }

    /// Canonical key of unique entity `i`.
    pub fn key(&self, i: usize) -> Option<&[usize]> {
        self.keys.chunks_exact(self.width).nth(i)
    }

    /// Input row index where each unique entity was first seen.
    pub fn first_occurrence(&self) -> &[usize] {
        &self.first_occurrence
    }

    /// How many input rows mapped to each unique entity.
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// For every input row, the unique entity it belongs to.
    pub fn inverse(&self) -> &[usize] {
        &self.inverse
    }

    /// Unique ids referenced by exactly one input row (boundary entities).
    pub fn single(&self) -> Vec<usize> {
        self.counts
            .iter()
            .enumerate()
            .filter_map(|(i, &c)| (c == 1).then_some(i))
            .collect()
    }

    /// Input row indices of the single-occurrence entities, in unique order.
    pub fn single_rows(&self) -> Vec<usize> {
        self.single()
            .into_iter()
            .map(|i| self.first_occurrence[i])
            .collect()
    }

    /// Input rows each parent element contributed, e.g. 6 for hexahedron faces.
    pub fn rows_per_parent(&self) -> usize {
        self.rows_per_parent
    }

    /// Ascending ids of the parent elements owning unique entity `i`.
    ///
    /// A parent that contributes the entity more than once is listed once.
    pub fn owners(&self, i: usize) -> Vec<usize> {
        self.inverse
            .iter()
            .positions(|&uid| uid == i)
            .map(|row| row / self.rows_per_parent)
            .dedup()
            .collect()
    }

    /// Owner lists of every unique entity, in unique order.
    pub fn owner_lists(&self) -> Vec<Vec<usize>> {
        let mut owners: Vec<Vec<usize>> = self
            .counts
            .iter()
            .map(|&count| Vec::with_capacity(count))
            .collect();
        for (row, &uid) in self.inverse.iter().enumerate() {
            let parent = row / self.rows_per_parent;
            if owners[uid].last() != Some(&parent) {
                owners[uid].push(parent);
            }
        }
        owners
    }

    /// Attribute consecutive runs of `n` input rows to one parent element.
    pub(crate) fn with_rows_per_parent(mut self, n: usize) -> Self {
        self.rows_per_parent = n.max(1);
        self
    }

    /// Pick the first-occurrence row of every unique entity out of the
    /// original (unsorted) `rows`, keeping its winding.
    ///
    /// `rows` must be the buffer the grouping was computed from.
    pub(crate) fn representatives(&self, rows: &[usize]) -> Vec<usize> {
        gather_rows(rows, self.width, &self.first_occurrence)
    }
}

/// Gather rows `ids` out of a flat `width`-wide buffer; every id must be in range.
pub(crate) fn gather_rows(rows: &[usize], width: usize, ids: &[usize]) -> Vec<usize> {
    let mut out = Vec::with_capacity(ids.len() * width);
    for &i in ids {
        out.extend_from_slice(&rows[i * width..(i + 1) * width]);
    }
    out
}

/// Group `rows` by canonical key in first-occurrence order.
///
/// Empty input yields an empty grouping.
pub fn unique_rows(rows: &[usize], width: usize) -> Result<UniqueRows, MeshTopoError> {
    let sorted = sorted_rows(rows, width)?;
    let n_rows = sorted.len() / width;

    let mut index: HashMap<&[usize], usize> = HashMap::with_capacity(n_rows);
    let mut keys = Vec::new();
    let mut first_occurrence = Vec::new();
    let mut counts = Vec::new();
    let mut inverse = Vec::with_capacity(n_rows);

    for (row_id, key) in sorted.chunks_exact(width).enumerate() {
        let next = counts.len();
        let uid = *index.entry(key).or_insert(next);
        if uid == next {
            keys.extend_from_slice(key);
            first_occurrence.push(row_id);
            counts.push(0);
        }
        counts[uid] += 1;
        inverse.push(uid);
    }
    log::debug!(
        "unique_rows: {} rows of width {} -> {} unique",
        n_rows,
        width,
        counts.len()
    );

    Ok(UniqueRows {
        width,
        keys,
        first_occurrence,
        counts,
        inverse,
        rows_per_parent: 1,
    })
}
