//! Structured raster point sets and quad/hex connectivity.
//!
//! Resolutions count *vertices* per axis, so `[2, 3, 4]` is a raster of
//! 24 points and 1×2×3 hexahedra. Vertex ids run x fastest, then y, then z.

use crate::mesh_error::MeshTopoError;
use crate::topology::cell_type::CellType;
use crate::topology::element_set::ElementSet;
use crate::topology::point_set::PointSet;

fn invalid_parameter(message: impl Into<String>) -> MeshTopoError {
    MeshTopoError::InvalidParameter(message.into())
}

fn check_resolutions(resolutions: &[usize]) -> Result<(), MeshTopoError> {
    if let Some(axis) = resolutions.iter().position(|&r| r < 2) {
        return Err(invalid_parameter(format!(
            "resolution along axis {axis} must be at least 2, got {}",
            resolutions[axis]
        )));
    }
    Ok(())
}

/// Evenly spaced points over the box `[min, max]`, one axis per entry.
pub fn raster(min: &[f64], max: &[f64], resolutions: &[usize]) -> Result<PointSet, MeshTopoError> {
    let dim = resolutions.len();
    for found in [min.len(), max.len()] {
        if found != dim {
            return Err(MeshTopoError::DimensionMismatch {
                expected: dim,
                found,
            });
        }
    }
    check_resolutions(resolutions)?;

    let total: usize = resolutions.iter().product();
    let steps: Vec<f64> = (0..dim)
        .map(|axis| (max[axis] - min[axis]) / (resolutions[axis] - 1) as f64)
        .collect();
    let mut coordinates = Vec::with_capacity(total * dim);
    for id in 0..total {
        let mut rest = id;
        for axis in 0..dim {
            let i = rest % resolutions[axis];
            rest /= resolutions[axis];
            // hit `max` exactly on the last layer
            let x = if i + 1 == resolutions[axis] {
                max[axis]
            } else {
                min[axis] + steps[axis] * i as f64
            };
            coordinates.push(x);
        }
    }
    PointSet::try_new(dim, coordinates)
}

/// Quad connectivity of an `nx`×`ny` vertex raster, counter-clockwise.
pub fn make_quad_faces(resolutions: [usize; 2]) -> Result<Vec<usize>, MeshTopoError> {
    check_resolutions(&resolutions)?;
    let [nx, ny] = resolutions;
    let mut faces = Vec::with_capacity((nx - 1) * (ny - 1) * 4);
    for j in 0..ny - 1 {
        for i in 0..nx - 1 {
            let v0 = j * nx + i;
            let v3 = v0 + nx;
            faces.extend_from_slice(&[v0, v0 + 1, v3 + 1, v3]);
        }
    }
    Ok(faces)
}

/// Hexahedron connectivity of an `nx`×`ny`×`nz` vertex raster.
pub fn make_hexa_volumes(resolutions: [usize; 3]) -> Result<Vec<usize>, MeshTopoError> {
    check_resolutions(&resolutions)?;
    let [nx, ny, nz] = resolutions;
    let row_stride = nx;
    let slab_stride = nx * ny;
    let mut volumes = Vec::with_capacity((nx - 1) * (ny - 1) * (nz - 1) * 8);
    for k in 0..nz - 1 {
        for j in 0..ny - 1 {
            for i in 0..nx - 1 {
                let v0 = k * slab_stride + j * row_stride + i;
                let v1 = v0 + 1;
                let v3 = v0 + row_stride;
                let v2 = v3 + 1;
                let v4 = v0 + slab_stride;
                let v5 = v4 + 1;
                let v7 = v4 + row_stride;
                let v6 = v7 + 1;
                volumes.extend_from_slice(&[v0, v1, v2, v3, v4, v5, v6, v7]);
            }
        }
    }
    Ok(volumes)
}

/// Quadrilateral mesh of the rectangle `[min, max]`.
pub fn structured_quad(
    min: [f64; 2],
    max: [f64; 2],
    resolutions: [usize; 2],
) -> Result<ElementSet, MeshTopoError> {
    let points = raster(&min, &max, &resolutions)?;
    ElementSet::try_new(CellType::Quadrilateral, points, make_quad_faces(resolutions)?)
}

/// Hexahedral mesh of the box `[min, max]`.
pub fn structured_hexa(
    min: [f64; 3],
    max: [f64; 3],
    resolutions: [usize; 3],
) -> Result<ElementSet, MeshTopoError> {
    let points = raster(&min, &max, &resolutions)?;
    ElementSet::try_new(CellType::Hexahedron, points, make_hexa_volumes(resolutions)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raster_runs_x_fastest() {
        let points = raster(&[0.0, 0.0], &[1.0, 2.0], &[2, 3]).unwrap();
        assert_eq!(points.len(), 6);
        assert_eq!(
            points.coordinates(),
            &[0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0, 0.0, 2.0, 1.0, 2.0]
        );
    }

    #[test]
    fn raster_rejects_bad_input() {
        assert!(matches!(
            raster(&[0.0], &[1.0, 1.0], &[2, 2]),
            Err(MeshTopoError::DimensionMismatch { .. })
        ));
        assert!(matches!(
            raster(&[0.0, 0.0], &[1.0, 1.0], &[2, 1]),
            Err(MeshTopoError::InvalidParameter(_))
        ));
    }

    #[test]
    fn quad_faces_of_3x2() {
        assert_eq!(
            make_quad_faces([3, 2]).unwrap(),
            vec![0, 1, 4, 3, 1, 2, 5, 4]
        );
    }

    #[test]
    fn single_hexa() {
        assert_eq!(
            make_hexa_volumes([2, 2, 2]).unwrap(),
            vec![0, 1, 3, 2, 4, 5, 7, 6]
        );
    }

    #[test]
    fn hexa_grid_counts() {
        let volumes = structured_hexa([0.0; 3], [1.0; 3], [2, 3, 4]).unwrap();
        assert_eq!(volumes.points().len(), 24);
        assert_eq!(volumes.len(), 6);
        assert!(volumes.diagnose().is_empty());
    }
}
