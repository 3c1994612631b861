//! Per-element shrinking for visualization.
//!
//! Every element gets a private copy of its vertices pulled toward the
//! element center: `p' = c + factor * (p - c)`. Vertex sharing between
//! elements is dropped, so neighbouring elements render with a visible gap.
//! The output has one vertex per (element, local vertex) and connectivity
//! `0, 1, 2, ...` in consecutive blocks.

use crate::mesh_error::MeshTopoError;
use crate::topology::element_set::ElementSet;
use crate::topology::point_set::PointSet;

/// Options for [`shrink`].
#[derive(Clone, Copy, Debug)]
pub struct ShrinkOptions {
    /// Scale toward the center, in `(0, 1]`; `1` leaves coordinates unchanged.
    pub factor: f64,
}

impl Default for ShrinkOptions {
    fn default() -> Self {
        Self { factor: 0.8 }
    }
}

/// Shrink every element of `set` toward its center.
pub fn shrink(set: &ElementSet, options: ShrinkOptions) -> Result<ElementSet, MeshTopoError> {
    let factor = options.factor;
    if !(factor > 0.0 && factor <= 1.0) {
        return Err(MeshTopoError::InvalidParameter(format!(
            "shrink factor must be in (0, 1], got {factor}"
        )));
    }
    let centers = set.centers()?;
    let points = set.points();
    let dim = points.dimension();

    let mut coordinates = Vec::with_capacity(set.elements().len() * dim);
    for (element, center) in set.iter().zip(centers.iter()) {
        for &v in element {
            let p = points.point(v);
            if factor == 1.0 {
                coordinates.extend_from_slice(p);
            } else {
                coordinates.extend(p.iter().zip(center).map(|(x, c)| c + factor * (x - c)));
            }
        }
    }
    let elements: Vec<usize> = (0..set.elements().len()).collect();
    log::debug!(
        "shrink: {} {:?} by {factor} -> {} private vertices",
        set.len(),
        set.cell_type(),
        elements.len()
    );

    let mut out = ElementSet::try_new(
        set.cell_type(),
        PointSet::try_new(dim, coordinates)?,
        elements,
    )?;
    out.vis = set.vis;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::cell_type::CellType;

    fn two_triangles() -> ElementSet {
        let points =
            PointSet::from_rows(&[[0.0, 0.0], [3.0, 0.0], [3.0, 3.0], [0.0, 3.0]]).unwrap();
        ElementSet::try_new(CellType::Triangle, points, vec![0, 1, 2, 0, 2, 3]).unwrap()
    }

    #[test]
    fn shared_vertices_are_duplicated() {
        let shrunk = two_triangles().shrink(ShrinkOptions::default()).unwrap();
        assert_eq!(shrunk.len(), 2);
        assert_eq!(shrunk.points().len(), 6);
        assert_eq!(shrunk.elements(), &[0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn half_factor_midpoints() {
        let shrunk = two_triangles()
            .shrink(ShrinkOptions { factor: 0.5 })
            .unwrap();
        // center of the first triangle is (2, 1)
        assert_eq!(shrunk.points().try_point(0).unwrap(), &[1.0, 0.5]);
        assert_eq!(shrunk.points().try_point(1).unwrap(), &[2.5, 0.5]);
    }

    #[test]
    fn unit_factor_is_identity() {
        let set = two_triangles();
        let shrunk = set.shrink(ShrinkOptions { factor: 1.0 }).unwrap();
        for (i, &v) in set.elements().iter().enumerate() {
            assert_eq!(
                shrunk.points().try_point(i).unwrap(),
                set.points().try_point(v).unwrap()
            );
        }
    }

    #[test]
    fn factor_out_of_range() {
        for factor in [0.0, -0.5, 1.5, f64::NAN] {
            let err = two_triangles().shrink(ShrinkOptions { factor }).unwrap_err();
            assert!(matches!(err, MeshTopoError::InvalidParameter(_)));
        }
    }

    #[test]
    fn arrows_hint_survives() {
        let mut set = two_triangles();
        set.vis.arrows = true;
        assert!(set.shrink(ShrinkOptions::default()).unwrap().vis.arrows);
    }
}
