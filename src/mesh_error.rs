//! MeshTopoError: Unified error type for mesh-topo public APIs
//!
//! Every constructor, derivation and transform validates its inputs eagerly
//! and reports contract violations through this type. No partial results are
//! returned on failure.

use crate::topology::cell_type::CellType;
use thiserror::Error;

/// Unified error type for mesh-topo operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshTopoError {
    /// A buffer width does not match what the shape or dimension requires.
    #[error("Dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    /// An element references a vertex id past the end of the point set.
    #[error("Element {element} references vertex {vertex}, but only {len} points exist")]
    IndexOutOfRange {
        element: usize,
        vertex: usize,
        len: usize,
    },
    /// A vertex lookup past the end of the point set.
    #[error("Vertex {vertex} out of range, only {len} points exist")]
    VertexOutOfRange { vertex: usize, len: usize },
    /// A query that needs at least one point/element was given none.
    #[error("Empty input: {0}")]
    EmptyInput(&'static str),
    /// The shape has no incidence table for the requested operation.
    #[error("Unsupported shape {cell_type:?} for `{operation}`")]
    UnsupportedShape {
        cell_type: CellType,
        operation: &'static str,
    },
    /// A tunable (shrink factor, spacing, tolerance, resolution) is out of range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}
