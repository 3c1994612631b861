//! Non-fatal findings about an element set.
//!
//! These are returned to the caller instead of being logged, so a caller can
//! decide whether a degenerate element is acceptable for its use.

use serde::Serialize;

/// A condition that is legal input but usually worth a second look.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Diagnostic {
    /// Element repeats a vertex id, so some derived edge/face collapses.
    DegenerateElement { element: usize, vertex: usize },
    /// Vertices that no element references.
    UnreferencedVertices { count: usize },
}
