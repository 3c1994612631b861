//! Cell type metadata and static incidence tables.
//!
//! Each shape fixes the local vertex ordering of its elements:
//!
//! - [`CellType::Segment`]: `(0,1)`
//! - [`CellType::Triangle`]: `(0,1,2)`
//! - [`CellType::Quadrilateral`]: `(0,1,2,3)` in cyclic order
//! - [`CellType::Tetrahedron`]: `(0,1,2,3)`
//! - [`CellType::Hexahedron`]: `(0,1,2,3,4,5,6,7)` with `0..=3` the bottom
//!   face and `4..=7` the top face, both counter-clockwise seen from above.
//!
//! The edge and face tables below are the only place sub-entities are
//! defined; every derivation in [`crate::algs::connectivity`] reads them.

use serde::{Deserialize, Serialize};

const SEGMENT_EDGES: &[[usize; 2]] = &[[0, 1]];

const TRIANGLE_EDGES: &[[usize; 2]] = &[[0, 1], [1, 2], [2, 0]];

const QUAD_EDGES: &[[usize; 2]] = &[[0, 1], [1, 2], [2, 3], [3, 0]];

const TET_EDGES: &[[usize; 2]] = &[[0, 1], [1, 2], [2, 0], [0, 3], [1, 3], [2, 3]];

const HEX_EDGES: &[[usize; 2]] = &[
    [0, 1],
    [1, 2],
    [2, 3],
    [3, 0],
    [4, 5],
    [5, 6],
    [6, 7],
    [7, 4],
    [0, 4],
    [1, 5],
    [2, 6],
    [3, 7],
];

// Outward winding for a positively oriented element.
const TET_FACES: &[&[usize]] = &[&[2, 1, 0], &[0, 1, 3], &[1, 2, 3], &[2, 0, 3]];

const HEX_FACES: &[&[usize]] = &[
    &[1, 0, 3, 2],
    &[0, 1, 5, 4],
    &[1, 2, 6, 5],
    &[2, 3, 7, 6],
    &[3, 0, 4, 7],
    &[4, 5, 6, 7],
];

/// Element shapes supported by the topology layer.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum CellType {
    /// 1D segment/edge.
    Segment,
    /// 2D simplex (triangle).
    Triangle,
    /// 2D tensor-product cell (quad).
    Quadrilateral,
    /// 3D simplex (tet).
    Tetrahedron,
    /// 3D tensor-product cell (hex).
    Hexahedron,
}

impl CellType {
    /// Returns the topological dimension of the cell.
    pub fn dimension(self) -> u8 {
        match self {
            CellType::Segment => 1,
            CellType::Triangle | CellType::Quadrilateral => 2,
            CellType::Tetrahedron | CellType::Hexahedron => 3,
        }
    }

    /// Number of vertices per element (the row width of its connectivity).
    pub fn vertex_count(self) -> usize {
        match self {
            CellType::Segment => 2,
            CellType::Triangle => 3,
            CellType::Quadrilateral | CellType::Tetrahedron => 4,
            CellType::Hexahedron => 8,
        }
    }

    /// Local vertex pairs forming each edge, in canonical order.
    pub fn edge_table(self) -> &'static [[usize; 2]] {
        match self {
            CellType::Segment => SEGMENT_EDGES,
            CellType::Triangle => TRIANGLE_EDGES,
            CellType::Quadrilateral => QUAD_EDGES,
            CellType::Tetrahedron => TET_EDGES,
            CellType::Hexahedron => HEX_EDGES,
        }
    }

    /// Local vertex tuples forming each face; `None` below dimension 3.
    pub fn face_table(self) -> Option<&'static [&'static [usize]]> {
        match self {
            CellType::Tetrahedron => Some(TET_FACES),
            CellType::Hexahedron => Some(HEX_FACES),
            _ => None,
        }
    }

    /// Shape of the faces produced by [`face_table`](Self::face_table).
    pub fn face_type(self) -> Option<CellType> {
        match self {
            CellType::Tetrahedron => Some(CellType::Triangle),
            CellType::Hexahedron => Some(CellType::Quadrilateral),
            _ => None,
        }
    }
}
