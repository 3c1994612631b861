//! Fixed-shape element connectivity over a shared point set.
//!
//! An [`ElementSet`] is a row-major buffer of vertex ids, `cell_type.vertex_count()`
//! ids per element, plus a shared handle to the [`PointSet`] the ids index
//! into. Edges, faces and volumes are all element sets; only the
//! [`CellType`] tag differs, and every shape-specific decision is a `match`
//! on it.
//!
//! Connectivity is validated when the set is built and whenever it is
//! replaced. Sub-entities are derived on demand from the static incidence
//! tables; the unique-edge and unique-face groupings are memoized until the
//! connectivity is replaced.
//!
//! # Example
//! ```rust
//! use mesh_topo::topology::cell_type::CellType;
//! use mesh_topo::topology::element_set::ElementSet;
//! use mesh_topo::topology::point_set::PointSet;
//!
//! let points = PointSet::from_rows(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]])?;
//! let tris = ElementSet::try_new(CellType::Triangle, points, vec![0, 1, 2, 0, 2, 3])?;
//!
//! // the diagonal (0,2) is shared, the four sides are boundary
//! assert_eq!(tris.unique_edges()?.len(), 5);
//! assert_eq!(tris.single_edges()?.len(), 4);
//! # Ok::<(), mesh_topo::mesh_error::MeshTopoError>(())
//! ```

use std::sync::Arc;

use itertools::Itertools;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::algs::connectivity::{
    derive_edges, derive_faces, derive_lower_dimension, quads_to_triangles,
};
use crate::algs::dashed::{DashOptions, dashed};
use crate::algs::dedup::{UniqueRows, gather_rows, sorted_rows, unique_rows};
use crate::algs::shrink::{ShrinkOptions, shrink};
use crate::mesh_error::MeshTopoError;
use crate::topology::cell_type::CellType;
use crate::topology::diagnostics::Diagnostic;
use crate::topology::point_set::{MergeOptions, PointSet};

/// Display hints passed through to a visualization consumer untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisHints {
    /// Draw elements as oriented arrows (useful for checking windings).
    pub arrows: bool,
}

/// Element set with unreferenced vertices stripped.
#[derive(Clone, Debug)]
pub struct CompactedElements {
    pub elements: ElementSet,
    /// `old_ids[new_id]` is the vertex id in the original point set.
    pub old_ids: Vec<usize>,
}

/// Connectivity of one [`CellType`] over a shared [`PointSet`].
///
/// Serializes as `{cell_type, points, elements, vis}` for export; there is
/// no `Deserialize`, build sets through [`ElementSet::try_new`] so they are
/// validated.
#[derive(Clone, Debug, Serialize)]
pub struct ElementSet {
    cell_type: CellType,
    points: Arc<PointSet>,
    elements: Vec<usize>,
    pub vis: VisHints,
    #[serde(skip)]
    unique_edges: OnceCell<UniqueRows>,
    #[serde(skip)]
    unique_faces: OnceCell<UniqueRows>,
}

impl PartialEq for ElementSet {
    fn eq(&self, other: &Self) -> bool {
        self.cell_type == other.cell_type
            && self.elements == other.elements
            && self.vis == other.vis
            && (Arc::ptr_eq(&self.points, &other.points) || self.points == other.points)
    }
}

impl ElementSet {
    /// Build and validate an element set.
    ///
    /// Fails with [`MeshTopoError::DimensionMismatch`] if the buffer is not a
    /// whole number of rows and [`MeshTopoError::IndexOutOfRange`] if any id
    /// is not a vertex of `points`.
    pub fn try_new(
        cell_type: CellType,
        points: impl Into<Arc<PointSet>>,
        elements: Vec<usize>,
    ) -> Result<Self, MeshTopoError> {
        let points = points.into();
        validate_elements(cell_type, &elements, points.len())?;
        Ok(Self {
            cell_type,
            points,
            elements,
            vis: VisHints::default(),
            unique_edges: OnceCell::new(),
            unique_faces: OnceCell::new(),
        })
    }

    /// Like [`try_new`](Self::try_new), reading connectivity from fixed-size rows.
    pub fn from_rows<const W: usize>(
        cell_type: CellType,
        points: impl Into<Arc<PointSet>>,
        rows: &[[usize; W]],
    ) -> Result<Self, MeshTopoError> {
        Self::try_new(cell_type, points, rows.iter().flatten().copied().collect())
    }

    /// Derived set sharing this set's points and display hints.
    fn derived(&self, cell_type: CellType, elements: Vec<usize>) -> Self {
        Self {
            cell_type,
            points: Arc::clone(&self.points),
            elements,
            vis: self.vis,
            unique_edges: OnceCell::new(),
            unique_faces: OnceCell::new(),
        }
    }

    #[inline]
    pub fn cell_type(&self) -> CellType {
        self.cell_type
    }

    /// Vertex ids per element.
    #[inline]
    pub fn width(&self) -> usize {
        self.cell_type.vertex_count()
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len() / self.width()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Shared handle to the point set.
    #[inline]
    pub fn points(&self) -> &Arc<PointSet> {
        &self.points
    }

    /// Flat connectivity buffer.
    #[inline]
    pub fn elements(&self) -> &[usize] {
        &self.elements
    }

    /// Vertex ids of element `i`.
    pub fn element(&self, i: usize) -> Option<&[usize]> {
        self.elements.chunks_exact(self.width()).nth(i)
    }

    /// Iterate over element rows.
    pub fn iter(&self) -> std::slice::ChunksExact<'_, usize> {
        self.elements.chunks_exact(self.width())
    }

    /// Replace the connectivity, re-validating it against the current points.
    ///
    /// On error the set is left unchanged.
    pub fn replace_elements(&mut self, elements: Vec<usize>) -> Result<(), MeshTopoError> {
        validate_elements(self.cell_type, &elements, self.points.len())?;
        self.elements = elements;
        self.unique_edges = OnceCell::new();
        self.unique_faces = OnceCell::new();
        Ok(())
    }

    /// Point this set at a different point set, re-validating connectivity.
    pub fn replace_points(&mut self, points: impl Into<Arc<PointSet>>) -> Result<(), MeshTopoError> {
        let points = points.into();
        validate_elements(self.cell_type, &self.elements, points.len())?;
        self.points = points;
        Ok(())
    }

    /// Copy-on-write access to the coordinates.
    ///
    /// Other sets sharing the same points keep the old buffer. The vertex
    /// count is fixed; use [`replace_points`](Self::replace_points) to change it.
    pub fn coordinates_mut(&mut self) -> &mut [f64] {
        Arc::make_mut(&mut self.points).coordinates_mut()
    }

    /// The shared vertex set.
    pub fn to_vertices(&self) -> Arc<PointSet> {
        Arc::clone(&self.points)
    }

    /// Mean of each element's vertex coordinates, one row per element.
    pub fn centers(&self) -> Result<PointSet, MeshTopoError> {
        if self.is_empty() {
            return Err(MeshTopoError::EmptyInput("centers of an empty element set"));
        }
        let dim = self.points.dimension();
        let width = self.width() as f64;
        let mut centers = Vec::with_capacity(self.len() * dim);
        for element in self.iter() {
            let start = centers.len();
            centers.resize(start + dim, 0.0);
            for &v in element {
                for (c, x) in centers[start..].iter_mut().zip(self.points.point(v)) {
                    *c += x;
                }
            }
            centers[start..].iter_mut().for_each(|c| *c /= width);
        }
        PointSet::try_new(dim, centers)
    }

    /// Distinct vertex ids used by any element, ascending.
    pub fn referenced_vertices(&self) -> Vec<usize> {
        self.elements.iter().copied().sorted_unstable().dedup().collect()
    }

    /// Drop vertices no element references and renumber the rest compactly.
    ///
    /// Kept vertices stay in ascending original-id order; `self` is untouched.
    pub fn remove_unreferenced_vertices(&self) -> Result<CompactedElements, MeshTopoError> {
        let old_ids = self.referenced_vertices();
        let mut new_id = vec![usize::MAX; self.points.len()];
        for (new, &old) in old_ids.iter().enumerate() {
            new_id[old] = new;
        }
        let dim = self.points.dimension();
        let mut coordinates = Vec::with_capacity(old_ids.len() * dim);
        for &old in &old_ids {
            coordinates.extend_from_slice(self.points.point(old));
        }
        let elements = self.elements.iter().map(|&v| new_id[v]).collect();
        log::debug!(
            "remove_unreferenced_vertices: {} -> {} vertices",
            self.points.len(),
            old_ids.len()
        );

        let mut compacted =
            ElementSet::try_new(self.cell_type, PointSet::try_new(dim, coordinates)?, elements)?;
        compacted.vis = self.vis;
        Ok(CompactedElements {
            elements: compacted,
            old_ids,
        })
    }

    /// Non-unique edges, grouped by element in edge-table order.
    pub fn edges(&self) -> Result<Vec<usize>, MeshTopoError> {
        derive_edges(self.cell_type, &self.elements)
    }

    /// Non-unique faces and their shape, grouped by element in face-table order.
    pub fn faces(&self) -> Result<(CellType, Vec<usize>), MeshTopoError> {
        derive_faces(self.cell_type, &self.elements)
    }

    /// Edges with each row sorted ascending.
    pub fn sorted_edges(&self) -> Result<Vec<usize>, MeshTopoError> {
        sorted_rows(&self.edges()?, 2)
    }

    /// Edge grouping by canonical key (memoized).
    pub fn unique_edges(&self) -> Result<&UniqueRows, MeshTopoError> {
        self.unique_edges.get_or_try_init(|| {
            let per_element = self.cell_type.edge_table().len();
            Ok(unique_rows(&self.edges()?, 2)?.with_rows_per_parent(per_element))
        })
    }

    /// For every unique edge, the ascending ids of the elements using it.
    pub fn edge_owners(&self) -> Result<Vec<Vec<usize>>, MeshTopoError> {
        Ok(self.unique_edges()?.owner_lists())
    }

    /// Indices into [`edges`](Self::edges) of edges used by exactly one element.
    pub fn single_edge_ids(&self) -> Result<Vec<usize>, MeshTopoError> {
        Ok(self.unique_edges()?.single_rows())
    }

    /// Boundary edges, in their first-seen orientation.
    pub fn single_edges(&self) -> Result<ElementSet, MeshTopoError> {
        let ids = self.single_edge_ids()?;
        Ok(self.derived(CellType::Segment, gather_rows(&self.edges()?, 2, &ids)))
    }

    /// Faces with each row sorted ascending.
    pub fn sorted_faces(&self) -> Result<Vec<usize>, MeshTopoError> {
        let (face_type, faces) = self.faces()?;
        sorted_rows(&faces, face_type.vertex_count())
    }

    /// Face grouping by canonical key (memoized).
    pub fn unique_faces(&self) -> Result<&UniqueRows, MeshTopoError> {
        self.unique_faces.get_or_try_init(|| {
            let (face_type, faces) = self.faces()?;
            let per_element = self.cell_type.face_table().map_or(1, |table| table.len());
            Ok(unique_rows(&faces, face_type.vertex_count())?.with_rows_per_parent(per_element))
        })
    }

    /// For every unique face, the ascending ids of the elements using it.
    ///
    /// Boundary faces have one owner, interior faces of a conforming volume
    /// mesh two.
    pub fn face_owners(&self) -> Result<Vec<Vec<usize>>, MeshTopoError> {
        Ok(self.unique_faces()?.owner_lists())
    }

    /// Indices into [`faces`](Self::faces) of faces used by exactly one element.
    pub fn single_face_ids(&self) -> Result<Vec<usize>, MeshTopoError> {
        Ok(self.unique_faces()?.single_rows())
    }

    /// Boundary faces, keeping the winding of the single owning element.
    pub fn single_faces(&self) -> Result<ElementSet, MeshTopoError> {
        let ids = self.single_face_ids()?;
        let (face_type, faces) = self.faces()?;
        Ok(self.derived(
            face_type,
            gather_rows(&faces, face_type.vertex_count(), &ids),
        ))
    }

    /// The set's own rows, each sorted ascending.
    pub fn sorted_elements(&self) -> Result<Vec<usize>, MeshTopoError> {
        sorted_rows(&self.elements, self.width())
    }

    /// Grouping of the set's own rows, e.g. to find duplicate volumes.
    pub fn unique_elements(&self) -> Result<UniqueRows, MeshTopoError> {
        unique_rows(&self.elements, self.width())
    }

    /// Edges as a segment set; `unique` keeps one row per canonical key.
    pub fn to_edges(&self, unique: bool) -> Result<ElementSet, MeshTopoError> {
        let edges = self.edges()?;
        let edges = if unique {
            self.unique_edges()?.representatives(&edges)
        } else {
            edges
        };
        Ok(self.derived(CellType::Segment, edges))
    }

    /// Faces as a face set; `unique` keeps one row per canonical key.
    pub fn to_faces(&self, unique: bool) -> Result<ElementSet, MeshTopoError> {
        let (face_type, faces) = self.faces()?;
        let faces = if unique {
            self.unique_faces()?.representatives(&faces)
        } else {
            faces
        };
        Ok(self.derived(face_type, faces))
    }

    /// Non-unique derivation one dimension down (volumes → faces → edges).
    pub fn to_lower_dimension(&self) -> Result<ElementSet, MeshTopoError> {
        let (cell_type, elements) = derive_lower_dimension(self.cell_type, &self.elements)?;
        Ok(self.derived(cell_type, elements))
    }

    /// Split a quadrilateral set into triangles.
    pub fn to_triangles(&self) -> Result<ElementSet, MeshTopoError> {
        match self.cell_type {
            CellType::Triangle => Ok(self.clone()),
            CellType::Quadrilateral => {
                Ok(self.derived(CellType::Triangle, quads_to_triangles(&self.elements)?))
            }
            cell_type => Err(MeshTopoError::UnsupportedShape {
                cell_type,
                operation: "to_triangles",
            }),
        }
    }

    /// Pull each element's vertices toward its center; see [`crate::algs::shrink`].
    pub fn shrink(&self, options: ShrinkOptions) -> Result<ElementSet, MeshTopoError> {
        shrink(self, options)
    }

    /// Chop segments into dashes; see [`crate::algs::dashed`].
    pub fn dashed(&self, options: DashOptions) -> Result<ElementSet, MeshTopoError> {
        dashed(self, options)
    }

    /// Merge coincident vertices and renumber connectivity through the merge.
    pub fn merge_vertices(&self, options: MergeOptions) -> Result<ElementSet, MeshTopoError> {
        let merged = self.points.merge_vertices(options)?;
        let elements = self.elements.iter().map(|&v| merged.inverse[v]).collect();
        let mut out = ElementSet::try_new(self.cell_type, merged.points, elements)?;
        out.vis = self.vis;
        Ok(out)
    }

    /// Stack element sets of one shape, offsetting ids by the preceding
    /// point counts. The result owns a fresh concatenated point set.
    pub fn concat<'a, I>(sets: I) -> Result<ElementSet, MeshTopoError>
    where
        I: IntoIterator<Item = &'a ElementSet>,
    {
        let sets: Vec<&ElementSet> = sets.into_iter().collect();
        let first = sets
            .first()
            .ok_or(MeshTopoError::EmptyInput("concat of zero element sets"))?;
        let mut elements = Vec::new();
        let mut offset = 0;
        for set in &sets {
            if set.cell_type != first.cell_type {
                return Err(MeshTopoError::UnsupportedShape {
                    cell_type: set.cell_type,
                    operation: "concat with a different cell type",
                });
            }
            elements.extend(set.elements.iter().map(|&v| v + offset));
            offset += set.points.len();
        }
        let points = PointSet::concat(sets.iter().map(|s| s.points.as_ref()))?;
        let mut out = ElementSet::try_new(first.cell_type, points, elements)?;
        out.vis = first.vis;
        Ok(out)
    }

    /// Legal-but-suspicious conditions: repeated vertices within an element
    /// and vertices nothing references.
    pub fn diagnose(&self) -> Vec<Diagnostic> {
        let mut found = Vec::new();
        for (element, row) in self.iter().enumerate() {
            if let Some(&vertex) = row.iter().duplicates().next() {
                found.push(Diagnostic::DegenerateElement { element, vertex });
            }
        }
        let unreferenced = self.points.len() - self.referenced_vertices().len();
        if unreferenced > 0 {
            found.push(Diagnostic::UnreferencedVertices {
                count: unreferenced,
            });
        }
        found
    }
}

fn validate_elements(
    cell_type: CellType,
    elements: &[usize],
    n_points: usize,
) -> Result<(), MeshTopoError> {
    let width = cell_type.vertex_count();
    if elements.len() % width != 0 {
        return Err(MeshTopoError::DimensionMismatch {
            expected: width,
            found: elements.len() % width,
        });
    }
    if let Some(pos) = elements.iter().position(|&v| v >= n_points) {
        return Err(MeshTopoError::IndexOutOfRange {
            element: pos / width,
            vertex: elements[pos],
            len: n_points,
        });
    }
    Ok(())
}
