//! Turn segments into dashed segments for display.
//!
//! Each edge is sampled at an even number of evenly spaced points along its
//! length and consecutive pairs become short edges. Edges shorter than about
//! one spacing vanish. Dash endpoints are not merged between edges.

use crate::mesh_error::MeshTopoError;
use crate::topology::cell_type::CellType;
use crate::topology::element_set::ElementSet;
use crate::topology::point_set::PointSet;

/// Upper bound on the samples taken along one edge.
pub const MAX_SAMPLES_PER_EDGE: usize = 1 << 24;

/// Options for [`dashed`].
#[derive(Clone, Copy, Debug, Default)]
pub struct DashOptions {
    /// Target dash length; `None` uses the bounds diagonal norm / 50.
    pub spacing: Option<f64>,
}

/// Chop every edge of a segment set into dashes.
pub fn dashed(set: &ElementSet, options: DashOptions) -> Result<ElementSet, MeshTopoError> {
    if set.cell_type() != CellType::Segment {
        return Err(MeshTopoError::UnsupportedShape {
            cell_type: set.cell_type(),
            operation: "dashed",
        });
    }
    let points = set.points();
    let spacing = match options.spacing {
        Some(spacing) => spacing,
        None => points.bounds_diagonal_norm()? / 50.0,
    };
    if !(spacing > 0.0 && spacing.is_finite()) {
        return Err(MeshTopoError::InvalidParameter(format!(
            "dash spacing must be positive, got {spacing}"
        )));
    }

    let dim = points.dimension();
    let mut coordinates = Vec::new();
    for edge in set.iter() {
        let (a, b) = (points.point(edge[0]), points.point(edge[1]));
        let length = a
            .iter()
            .zip(b)
            .map(|(x, y)| (y - x) * (y - x))
            .sum::<f64>()
            .sqrt();
        let intervals = (length / (spacing * 1.01)).floor();
        if !(intervals.is_finite() && intervals < MAX_SAMPLES_PER_EDGE as f64) {
            return Err(MeshTopoError::InvalidParameter(format!(
                "spacing {spacing} splits an edge of length {length} into more than \
                 {MAX_SAMPLES_PER_EDGE} samples"
            )));
        }
        let samples = (intervals as usize + 1) / 2 * 2;
        for k in 0..samples {
            let t = k as f64 / (samples - 1) as f64;
            coordinates.extend(a.iter().zip(b).map(|(x, y)| x + t * (y - x)));
        }
    }
    let n_points = coordinates.len() / dim;
    log::debug!(
        "dashed: {} edges -> {} dashes (spacing {spacing})",
        set.len(),
        n_points / 2
    );

    let mut out = ElementSet::try_new(
        CellType::Segment,
        PointSet::try_new(dim, coordinates)?,
        (0..n_points).collect(),
    )?;
    out.vis = set.vis;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_edge_into_dashes() {
        let points = PointSet::from_rows(&[[0.0, 0.0], [1.0, 0.0]]).unwrap();
        let edges = ElementSet::try_new(CellType::Segment, points, vec![0, 1]).unwrap();
        let dashes = edges
            .dashed(DashOptions {
                spacing: Some(0.2),
            })
            .unwrap();
        // 1 / 0.202 -> 4 spacings -> 4 samples
        assert_eq!(dashes.points().len(), 4);
        assert_eq!(dashes.len(), 2);
        assert_eq!(dashes.points().try_point(3).unwrap(), &[1.0, 0.0]);
    }

    #[test]
    fn tiny_spacing_rejected() {
        let points = PointSet::from_rows(&[[0.0, 0.0], [1.0, 0.0]]).unwrap();
        let edges = ElementSet::try_new(CellType::Segment, points, vec![0, 1]).unwrap();
        let err = edges
            .dashed(DashOptions {
                spacing: Some(1e-300),
            })
            .unwrap_err();
        assert!(matches!(err, MeshTopoError::InvalidParameter(_)));
    }

    #[test]
    fn unbounded_edge_rejected() {
        let points = PointSet::from_rows(&[[0.0, 0.0], [f64::INFINITY, 0.0]]).unwrap();
        let edges = ElementSet::try_new(CellType::Segment, points, vec![0, 1]).unwrap();
        let err = edges
            .dashed(DashOptions { spacing: Some(1.0) })
            .unwrap_err();
        assert!(matches!(err, MeshTopoError::InvalidParameter(_)));
    }

    #[test]
    fn faces_cannot_be_dashed() {
        let points = PointSet::from_rows(&[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]).unwrap();
        let tri = ElementSet::try_new(CellType::Triangle, points, vec![0, 1, 2]).unwrap();
        assert!(matches!(
            tri.dashed(DashOptions::default()),
            Err(MeshTopoError::UnsupportedShape { .. })
        ));
    }
}
