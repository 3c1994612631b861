//! Derive sub-entities (edges, faces) from element connectivity.
//!
//! All derivations are positional: for every parent element and every row of
//! the shape's incidence table, the parent's vertex ids at the table's local
//! positions form one child row. Children are emitted grouped by parent in
//! parent order, then in table order, and duplicates shared by neighbouring
//! parents are kept. Deduplication is a separate step, see
//! [`crate::algs::dedup`].
//!
//! # Example
//! ```rust
//! use mesh_topo::algs::connectivity::derive_edges;
//! use mesh_topo::topology::cell_type::CellType;
//!
//! let quad = [0, 1, 2, 3];
//! let edges = derive_edges(CellType::Quadrilateral, &quad)?;
//! assert_eq!(edges, vec![0, 1, 1, 2, 2, 3, 3, 0]);
//! # Ok::<(), mesh_topo::mesh_error::MeshTopoError>(())
//! ```

use crate::mesh_error::MeshTopoError;
use crate::topology::cell_type::CellType;

/// Gather child rows from `elements` (rows of `width`) through `table`.
///
/// Every table row must have `child_width` entries, each `< width`.
fn gather<T: AsRef<[usize]>>(
    elements: &[usize],
    width: usize,
    child_width: usize,
    table: &[T],
) -> Vec<usize> {
    let parents = elements.len() / width;
    let mut out = Vec::with_capacity(parents * table.len() * child_width);
    for parent in elements.chunks_exact(width) {
        for row in table {
            out.extend(row.as_ref().iter().map(|&local| parent[local]));
        }
    }
    out
}

fn check_width(cell_type: CellType, elements: &[usize]) -> Result<usize, MeshTopoError> {
    let width = cell_type.vertex_count();
    if elements.len() % width != 0 {
        return Err(MeshTopoError::DimensionMismatch {
            expected: width,
            found: elements.len() % width,
        });
    }
    Ok(width)
}

/// Non-unique edges of every element, as flat `(a, b)` pairs.
///
/// For segments this is the connectivity itself.
pub fn derive_edges(cell_type: CellType, elements: &[usize]) -> Result<Vec<usize>, MeshTopoError> {
    let width = check_width(cell_type, elements)?;
    let edges = gather(elements, width, 2, cell_type.edge_table());
    log::trace!(
        "derive_edges: {} {:?} -> {} edges",
        elements.len() / width,
        cell_type,
        edges.len() / 2
    );
    Ok(edges)
}

/// Non-unique faces of every volume element, with the face shape.
///
/// Faces of a 2D element set are the elements themselves; segments have none.
pub fn derive_faces(
    cell_type: CellType,
    elements: &[usize],
) -> Result<(CellType, Vec<usize>), MeshTopoError> {
    let width = check_width(cell_type, elements)?;
    match (cell_type.face_table(), cell_type.face_type()) {
        (Some(table), Some(face_type)) => {
            let faces = gather(elements, width, face_type.vertex_count(), table);
            log::trace!(
                "derive_faces: {} {:?} -> {} {:?}",
                elements.len() / width,
                cell_type,
                faces.len() / face_type.vertex_count(),
                face_type
            );
            Ok((face_type, faces))
        }
        _ if cell_type.dimension() == 2 => Ok((cell_type, elements.to_vec())),
        _ => Err(MeshTopoError::UnsupportedShape {
            cell_type,
            operation: "derive_faces",
        }),
    }
}

/// One dimension down: volumes → faces, faces → edges.
pub fn derive_lower_dimension(
    cell_type: CellType,
    elements: &[usize],
) -> Result<(CellType, Vec<usize>), MeshTopoError> {
    match cell_type.dimension() {
        3 => derive_faces(cell_type, elements),
        2 => Ok((CellType::Segment, derive_edges(cell_type, elements)?)),
        _ => Err(MeshTopoError::UnsupportedShape {
            cell_type,
            operation: "to_lower_dimension",
        }),
    }
}

/// Split every quad `(0,1,2,3)` into triangles `(0,1,2)` and `(2,3,0)`.
pub fn quads_to_triangles(quads: &[usize]) -> Result<Vec<usize>, MeshTopoError> {
    let width = check_width(CellType::Quadrilateral, quads)?;
    const SPLIT: [[usize; 3]; 2] = [[0, 1, 2], [2, 3, 0]];
    Ok(gather(quads, width, 3, &SPLIT))
}
