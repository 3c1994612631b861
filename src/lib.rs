#![cfg_attr(docsrs, feature(doc_cfg))]
//! # mesh-topo
//!
//! mesh-topo derives and deduplicates mesh topology for FEM preprocessing.
//! Given point coordinates and element connectivity (segments, triangles,
//! quadrilaterals, tetrahedra, hexahedra) it derives lower-dimensional
//! entities (volumes → faces → edges → vertices), groups them by
//! permutation-invariant keys, finds boundary entities, and computes
//! per-element summaries and display transforms.
//!
//! ## Features
//! - One [`ElementSet`](topology::ElementSet) type for every shape, dispatched on a closed [`CellType`](topology::CellType)
//! - Static incidence tables as the single source of truth for sub-entities
//! - First-occurrence-stable deduplication with counts and inverse maps
//! - Boundary (single-occurrence) edges and faces with their original winding
//! - Centers, bounds, shrink, dashing, vertex merging and compaction
//! - Optional `rayon` feature for parallel row canonicalization
//!
//! ## Example
//! ```rust
//! use mesh_topo::algs::meshgen::structured_hexa;
//!
//! // 2×3×4 vertex raster → 1×2×3 hexahedra
//! let volumes = structured_hexa([0.0; 3], [1.0; 3], [2, 3, 4])?;
//! let boundary = volumes.single_faces()?;
//! assert_eq!(boundary.len(), 22);
//! # Ok::<(), mesh_topo::mesh_error::MeshTopoError>(())
//! ```
//!
//! ## Sharing
//! Derived sets share their parent's points through `Arc<PointSet>`.
//! Coordinates are never edited in place behind a sibling's back:
//! [`ElementSet::coordinates_mut`](topology::ElementSet::coordinates_mut)
//! copies on write and [`ElementSet::replace_points`](topology::ElementSet::replace_points)
//! swaps the handle after re-validating.
//!
//! ## Logging
//! Sizes in/out of derivations and transforms are reported through the `log`
//! facade at `debug`/`trace`. Input findings that are not errors are returned
//! by [`ElementSet::diagnose`](topology::ElementSet::diagnose) instead.

pub mod algs;
pub mod mesh_error;
pub mod topology;

/// A convenient prelude to import the most-used types:
pub mod prelude {
    pub use crate::algs::dashed::DashOptions;
    pub use crate::algs::dedup::UniqueRows;
    pub use crate::algs::shrink::ShrinkOptions;
    pub use crate::mesh_error::MeshTopoError;
    pub use crate::topology::cell_type::CellType;
    pub use crate::topology::diagnostics::Diagnostic;
    pub use crate::topology::element_set::{CompactedElements, ElementSet, VisHints};
    pub use crate::topology::point_set::{MergeOptions, MergedPoints, PointSet};
}
