//! Top-level module for mesh topology entities.
//!
//! This module provides the entity hierarchy of a mesh:
//! - [`PointSet`](point_set::PointSet): vertex coordinates, the leaf of the hierarchy
//! - [`ElementSet`](element_set::ElementSet): edges, faces or volumes over a shared point set
//! - [`CellType`](cell_type::CellType): element shapes and their static incidence tables
//!
//! Derivations between levels live in [`crate::algs`]; the methods on
//! `ElementSet` are the usual entry points.

pub mod cell_type;
pub mod diagnostics;
pub mod element_set;
pub mod point_set;

pub use cell_type::CellType;
pub use element_set::{ElementSet, VisHints};
pub use point_set::PointSet;
